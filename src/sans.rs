//! The I/O-free codec core.
//!
//! This module holds everything needed to decode and encode a record once its
//! bytes are in memory: the subfield value type ([`field`]), the declarative
//! layouts records are matched against ([`description`]), the walker that
//! resolves a layout against a byte offset ([`cursor`]), and the record itself
//! with its parse and serialize operations ([`record`]).
//!
//! # Layout rules
//!
//! A record's bytes carry no separators; subfield boundaries follow entirely
//! from walking its description:
//!
//! - Text subfields are fixed width, left-justified and blank-padded.
//!
//! - Binary subfields are fixed width. Two- and four-byte values are stored in
//! network order on the wire and host order in memory; all other widths pass
//! through unchanged.
//!
//! - A gobbling subfield consumes every byte up to the record's declared end
//! when decoding, and emits exactly its stored bytes when encoding.
//!
//! Most users should begin with [`crate::avec`], which binds records to the
//! handlers that read and write them.

pub mod cursor;
pub mod description;
pub mod enumerator;
pub mod field;
pub mod record;
