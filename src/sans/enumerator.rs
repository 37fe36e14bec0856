//! Forward iteration over a record's subfields.

use core::iter::FusedIterator;

use alloc::string::String;

use crate::{
    Error,
    sans::{cursor::Cursor, field::Field, record::Tre},
};

/// An iterator over the `(tag, field)` pairs of a record, in description
/// order, ending at the declared length if one is set.
///
/// The walk state is released as soon as the description is exhausted or an
/// error is yielded; the iterator then only returns `None`.
#[derive(Debug)]
pub struct Enumerator<'t> {
    tre: &'t Tre,
    cursor: Option<Cursor>,
}

impl<'t> Enumerator<'t> {
    pub(crate) fn new(tre: &'t Tre) -> Self {
        Self {
            tre,
            cursor: Some(Cursor::begin_bounded(tre)),
        }
    }
}

impl<'t> Iterator for Enumerator<'t> {
    type Item = Result<(String, &'t Field), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let tre = self.tre;
        let cursor = self.cursor.as_mut()?;

        let item = match cursor.iterate(tre.fields()) {
            Ok(Some(step)) => match tre.fields().get(&step.tag) {
                Some(field) => return Some(Ok((step.tag, field))),
                None => Err(Error::MissingField {
                    tag: tre.tag().into(),
                    field: step.tag,
                }),
            },
            Ok(None) => {
                self.cursor = None;
                return None;
            }
            Err(e) => Err(e),
        };

        self.cursor = None;
        Some(item)
    }
}

impl FusedIterator for Enumerator<'_> {}
