//! Reader- and writer-based decoder and encoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::{Read, Write};

use crate::Error;

use super::{Extension, Resolver, Sink, Source};

/// A [`Source`] reading from an I/O stream.
#[derive(Debug)]
pub struct IoSource<R>(pub R);

impl<R: Read> Source for IoSource<R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        Ok(self.0.read_exact(buf)?)
    }
}

/// A [`Sink`] writing to an I/O stream.
#[derive(Debug)]
pub struct IoSink<W>(pub W);

impl<W: Write> Sink for IoSink<W> {
    fn write_all(&mut self, buf: &[u8]) -> Result<(), Error> {
        Ok(self.0.write_all(buf)?)
    }
}

/// Decode a record of tag `tag` and declared length `length` from a reader.
///
/// This method is also re-exported as `tre_codec::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(
    resolver: &impl Resolver,
    tag: &str,
    length: usize,
    r: &mut impl Read,
) -> Result<Extension, Error> {
    let mut extension = Extension::new(resolver, tag, Some(length))?;
    extension.read(&mut IoSource(r))?;

    Ok(extension)
}

/// Encode a record to a writer.
///
/// _Requires Cargo feature `std`._
pub fn encode(extension: &Extension, w: &mut impl Write) -> Result<(), Error> {
    extension.write(&mut IoSink(w))
}
