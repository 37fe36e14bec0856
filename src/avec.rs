//! Convenience interfaces for reading and writing whole records.
//!
//! A [`Resolver`] maps a record tag to its [`Handler`]: either the
//! description-driven [`Basic`] handler, or a custom implementation. An
//! [`Extension`] is a record bound to that handler for its lifetime. The
//! functions in the [`slice`] and [`reader`] modules decode and encode
//! extensions from and to byte slices and I/O streams.
//!
//! Decoded records can be published to the [`FromTres`] and [`FromTre`]
//! traits. When records are of a known shape, these traits can be derived.
//! See the [`FromTres`](macro@FromTres) and [`FromTre`](macro@FromTre)
//! macros for details.

pub mod handler;
#[cfg(feature = "std")]
pub mod reader;
pub mod registry;
pub mod slice;

pub use handler::{Basic, Binding, Extension, Handler, Subfields};
#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use registry::{Registry, Resolver};
pub use slice::decode as decode_slice;

use alloc::{string::String, vec::Vec};

use crate::{
    Error,
    sans::{field::Field, record::Tre},
};

/// A source of record bytes.
pub trait Source {
    /// Fill `buf` completely, or fail.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error>;
}

/// A sink for record bytes.
pub trait Sink {
    /// Write all of `buf`, or fail.
    fn write_all(&mut self, buf: &[u8]) -> Result<(), Error>;
}

/// Convert a subfield into a Rust value.
pub trait FromField: Sized {
    /// Convert the field, if it holds a value of this type.
    fn from_field(field: &Field) -> Option<Self>;
}

impl FromField for String {
    /// Text without its trailing blanks.
    fn from_field(field: &Field) -> Option<Self> {
        field.as_str().map(|s| s.trim_end().into())
    }
}

impl FromField for Vec<u8> {
    /// The in-memory bytes.
    fn from_field(field: &Field) -> Option<Self> {
        Some(field.raw_data().into())
    }
}

macro_rules! from_field_integer {
    ($($t:ty),*) => {
        $(
            impl FromField for $t {
                fn from_field(field: &Field) -> Option<Self> {
                    field.as_integer()?.try_into().ok()
                }
            }
        )*
    };
}

from_field_integer!(u8, u16, u32, u64, i16, i32, i64, usize);

macro_rules! from_field_float {
    ($($t:ty),*) => {
        $(
            impl FromField for $t {
                fn from_field(field: &Field) -> Option<Self> {
                    field.as_str()?.trim().parse().ok()
                }
            }
        )*
    };
}

from_field_float!(f32, f64);

/// Derive [`FromTres`] for a struct holding a collection of records.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// To collect a single record, add the `tre("TAG")` attribute to an
/// `Option<T>` struct field, where `T` is a type implementing [`FromTre`] and
/// [`Default`]. Additional records with the same tag overwrite earlier ones.
/// To collect every occurrence, apply the attribute to a `Vec<T>` instead.
///
/// ```
/// #[derive(Debug, Default, FromTres)]
/// struct Extensions {
///     #[tre("SENSRA")]
///     sensor: Option<Sensor>,
///     #[tre("PTLIST")]
///     point_lists: Vec<PointList>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use tre_codec_derive::FromTres;

/// Produce receivers for a collection of records.
///
/// See the [`FromTres`](macro@FromTres) derive macro for an automatic
/// implementation of this trait.
pub trait FromTres {
    /// Retrieve a receiver for a record, if one exists.
    fn add_tre(&mut self, tag: &str) -> Option<&mut dyn FromTre>;
}

/// Derive [`FromTre`] for a struct representing a single record.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// To receive a single subfield, add the `field("TAG")` attribute to an
/// `Option<T>` struct field, where `T` implements [`FromField`]. Subfields
/// that do not convert are skipped.
///
/// ```
/// #[derive(Debug, Default, FromTre)]
/// struct Sensor {
///     #[field("ANGLE")]
///     angle: Option<u16>,
///     #[field("SENSOR")]
///     name: Option<String>,
/// }
/// ```
///
/// Subfields inside a loop are matched by their tag without indices. To
/// collect them, supply an accumulator closure; since the element type
/// cannot be inferred, the second argument must be typed.
///
/// ```
/// #[derive(Debug, Default, FromTre)]
/// struct PointList {
///     #[field("LAT", |v, x: f64| v.push(x))]
///     latitudes: Vec<f64>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use tre_codec_derive::FromTre;

/// Receive the subfields of a record.
///
/// The default implementation ignores received values.
///
/// See the [`FromTre`](macro@FromTre) derive macro for an automatic
/// implementation of this trait.
#[allow(unused_variables)]
pub trait FromTre {
    /// Add a subfield to the record. `tag` carries any loop indices.
    fn add_field(&mut self, tag: &str, field: &Field) {}
}

/// Publish every subfield of each record to the receiver for its tag.
pub fn publish<'t>(
    tres: impl IntoIterator<Item = &'t Tre>,
    o: &mut impl FromTres,
) -> Result<(), Error> {
    for tre in tres {
        // Shadow the collection receiver with that of a single record.
        let Some(o) = o.add_tre(tre.tag()) else {
            continue;
        };

        for entry in tre.iter() {
            let (tag, field) = entry?;
            o.add_field(&tag, field);
        }
    }

    Ok(())
}
