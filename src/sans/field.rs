//! Fixed-width subfield values.

use core::fmt;

use alloc::{string::String, vec::Vec};

use thiserror::Error;
use zerocopy::byteorder::network_endian::{U16, U32};

/// The representation of a subfield's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Basic character set text, left-justified and blank-padded.
    Alphanumeric,
    /// Numeric text, left-justified and blank-padded.
    Numeric,
    /// A fixed-width binary value.
    Binary,
}

impl FieldKind {
    /// Whether values of this kind are text.
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Binary)
    }
}

/// A rejected subfield value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// More bytes than the field holds.
    #[error("{given} bytes exceed the field width of {width}.")]
    TooLong { width: usize, given: usize },
    /// Binary values must fill the field exactly.
    #[error("{given} bytes do not fill the binary field width of {width}.")]
    TooShort { width: usize, given: usize },
    /// Text was supplied for a binary field.
    #[error("Binary fields do not hold text.")]
    NotText,
    /// The field buffer could not be allocated.
    #[error("Unable to allocate {0} bytes.")]
    Allocation(usize),
}

/// A decoded subfield: a typed value of fixed capacity.
///
/// The stored bytes are the in-memory representation. For two- and four-byte
/// binary fields this is host byte order, while the wire holds network order;
/// all other widths are stored exactly as they appear on the wire.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Field {
    kind: FieldKind,
    data: Vec<u8>,
}

impl Field {
    /// Allocate a zero-filled field of `length` bytes.
    pub fn new(length: usize, kind: FieldKind) -> Result<Self, FieldError> {
        Ok(Self {
            kind,
            data: zeroed(length)?,
        })
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The declared width of this field in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The full-width in-memory bytes.
    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }

    /// Replace the in-memory bytes.
    ///
    /// Text shorter than the field is blank-padded on the right. Binary values
    /// must fill the field exactly. The field is left untouched on failure.
    pub fn set_raw_data(&mut self, r: &[u8]) -> Result<(), FieldError> {
        let width = self.len();

        if r.len() > width {
            Err(FieldError::TooLong {
                width,
                given: r.len(),
            })?;
        }

        if self.kind == FieldKind::Binary && r.len() != width {
            Err(FieldError::TooShort {
                width,
                given: r.len(),
            })?;
        }

        let (head, tail) = self.data.split_at_mut(r.len());
        head.copy_from_slice(r);
        tail.fill(b' ');

        Ok(())
    }

    /// Replace the bytes from their on-wire form, converting two- and
    /// four-byte binary values from network to host order.
    pub fn set_wire_data(&mut self, r: &[u8]) -> Result<(), FieldError> {
        self.set_raw_data(r)?;

        if self.kind == FieldKind::Binary {
            network_to_host(&mut self.data);
        }

        Ok(())
    }

    /// Copy the on-wire form into `w`, which must be exactly as wide as the
    /// field.
    pub fn write_wire(&self, w: &mut [u8]) -> Result<(), FieldError> {
        if w.len() != self.len() {
            Err(FieldError::TooShort {
                width: self.len(),
                given: w.len(),
            })?;
        }

        w.copy_from_slice(&self.data);

        if self.kind == FieldKind::Binary {
            host_to_network(w);
        }

        Ok(())
    }

    /// Set a text field, blank-padding to the full width.
    pub fn set_string(&mut self, s: &str) -> Result<(), FieldError> {
        if !self.kind.is_text() {
            Err(FieldError::NotText)?;
        }

        self.set_raw_data(s.as_bytes())
    }

    /// Set a two-byte binary field.
    pub fn set_u16(&mut self, value: u16) -> Result<(), FieldError> {
        self.set_raw_data(&value.to_ne_bytes())
    }

    /// Set a four-byte binary field.
    pub fn set_u32(&mut self, value: u32) -> Result<(), FieldError> {
        self.set_raw_data(&value.to_ne_bytes())
    }

    /// The full-width text of a text field, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        if self.kind.is_text() {
            core::str::from_utf8(&self.data).ok()
        } else {
            None
        }
    }

    /// The integer held by this field.
    ///
    /// Text is parsed after trimming blanks. Binary fields of one, two or four
    /// bytes are read as unsigned integers; other widths are opaque.
    pub fn as_integer(&self) -> Option<i64> {
        match self.kind {
            FieldKind::Alphanumeric | FieldKind::Numeric => self.as_str()?.trim().parse().ok(),
            FieldKind::Binary => match *self.data.as_slice() {
                [a] => Some(a.into()),
                [a, b] => Some(u16::from_ne_bytes([a, b]).into()),
                [a, b, c, d] => Some(u32::from_ne_bytes([a, b, c, d]).into()),
                _ => None,
            },
        }
    }

    /// Compare against a literal: text ignoring trailing blanks, binary by
    /// integer value.
    pub fn matches(&self, value: &str) -> bool {
        if self.kind.is_text() {
            self.as_str().map(str::trim_end) == Some(value)
        } else {
            match (self.as_integer(), value.parse::<i64>()) {
                (Some(a), Ok(b)) => a == b,
                _ => false,
            }
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("kind", &self.kind)
            .field("value", &format_args!("{self}"))
            .finish()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_text() {
            return f.write_str(&String::from_utf8_lossy(&self.data));
        }

        if let Some(value) = self.as_integer() {
            return write!(f, "{value}");
        }

        self.data.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}

/// Convert a two- or four-byte value from network to host order in place.
/// Other widths are left unchanged.
pub fn network_to_host(b: &mut [u8]) {
    if let Ok(r) = <[u8; 2]>::try_from(&*b) {
        b.copy_from_slice(&U16::from_bytes(r).get().to_ne_bytes());
    } else if let Ok(r) = <[u8; 4]>::try_from(&*b) {
        b.copy_from_slice(&U32::from_bytes(r).get().to_ne_bytes());
    }
}

/// Convert a two- or four-byte value from host to network order in place.
/// Other widths are left unchanged.
pub fn host_to_network(b: &mut [u8]) {
    if let Ok(r) = <[u8; 2]>::try_from(&*b) {
        b.copy_from_slice(&U16::new(u16::from_ne_bytes(r)).to_bytes());
    } else if let Ok(r) = <[u8; 4]>::try_from(&*b) {
        b.copy_from_slice(&U32::new(u32::from_ne_bytes(r)).to_bytes());
    }
}

/// Allocate a zero-filled buffer, reporting rather than aborting on failure.
pub(crate) fn zeroed(length: usize) -> Result<Vec<u8>, FieldError> {
    let mut v = Vec::new();
    v.try_reserve_exact(length)
        .map_err(|_| FieldError::Allocation(length))?;
    v.resize(length, 0);
    Ok(v)
}
