//! Slice-based decoder and encoder implementation.

use alloc::vec::Vec;

use crate::Error;

use super::{Extension, Resolver, Sink, Source};

impl Source for &[u8] {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        let (head, tail) = self
            .split_at_checked(buf.len())
            .ok_or(Error::EndOfInput)?;

        buf.copy_from_slice(head);
        *self = tail;

        Ok(())
    }
}

impl Sink for Vec<u8> {
    fn write_all(&mut self, buf: &[u8]) -> Result<(), Error> {
        self.try_reserve(buf.len())
            .map_err(|_| Error::AllocationFailure(buf.len()))?;
        self.extend_from_slice(buf);

        Ok(())
    }
}

/// Decode a record of tag `tag` spanning the whole of `r`.
///
/// This method is also re-exported as `tre_codec::avec::decode_slice`.
pub fn decode(resolver: &impl Resolver, tag: &str, mut r: &[u8]) -> Result<Extension, Error> {
    let mut extension = Extension::new(resolver, tag, Some(r.len()))?;
    extension.read(&mut r)?;

    Ok(extension)
}

/// Encode a record into a new buffer.
pub fn encode(extension: &Extension) -> Result<Vec<u8>, Error> {
    let mut w = Vec::new();
    extension.write(&mut w)?;

    Ok(w)
}
