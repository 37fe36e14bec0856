#![no_std]

//! A schema-driven codec for Tagged Record Extensions (TREs).
//!
//! A TRE is a self-describing binary record embedded in an imagery container
//! file: a tag naming its schema, a declared byte length, and a run of named
//! subfields whose widths, types and presence follow from the schema, from
//! previously decoded subfields, and from the record's length. This crate
//! walks a declarative description of that schema to decode a record's bytes
//! into typed subfields, and to encode them back into the identical layout.
//!
//! Most users should begin with the [`avec`] module, which resolves a tag to
//! its handler and reads or writes whole records. The description-driven
//! machinery underneath is exposed in the [`sans`] module for applications
//! that need finer control.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader- and writer-based adapters (default).

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod avec;
mod error;
pub mod sans;

pub use error::{Error, ErrorKind};
