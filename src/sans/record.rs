//! Records and their description-driven operations.

use core::fmt;

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

use tracing::{trace, warn};

use crate::{
    Error,
    sans::{
        cursor::Cursor,
        description::Description,
        enumerator::Enumerator,
        field::{Field, zeroed},
    },
};

/// The decoded subfields of a record, keyed by (indexed) tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(BTreeMap<String, Field>);

impl Fields {
    pub fn get(&self, tag: &str) -> Option<&Field> {
        self.0.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over subfields in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.0.iter().map(|(tag, field)| (tag.as_str(), field))
    }

    /// Insert a field, replacing any previous value for the tag.
    pub(crate) fn insert(&mut self, tag: String, field: Field) -> Option<Field> {
        self.0.insert(tag, field)
    }

    pub(crate) fn get_mut(&mut self, tag: &str) -> Option<&mut Field> {
        self.0.get_mut(tag)
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear()
    }
}

/// A tagged record extension, bound to the description it is matched against.
#[derive(Debug, Clone)]
pub struct Tre {
    tag: String,
    length: Option<usize>,
    description: &'static Description,
    fields: Fields,
}

impl Tre {
    /// Create an empty record.
    ///
    /// A `length` of `None` (or zero) leaves the declared length unset; it is
    /// then computed from the stored fields when serializing.
    pub fn new(tag: &str, length: Option<usize>, description: &'static Description) -> Self {
        Self {
            tag: tag.to_string(),
            length: length.filter(|&n| n > 0),
            description,
            fields: Fields::default(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The declared length in bytes, if set.
    pub fn length(&self) -> Option<usize> {
        self.length
    }

    pub fn description(&self) -> &'static Description {
        self.description
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Decode `data` into subfields, replacing any previously stored.
    ///
    /// Exactly the declared length is consumed. On failure the record may be
    /// partially populated, and will not be sane.
    pub fn parse(&mut self, data: &[u8]) -> Result<(), Error> {
        let declared = self.length.ok_or_else(|| Error::InvalidArgument {
            tag: self.tag.clone(),
            reason: "the record length is unset",
        })?;

        let data = data
            .get(..declared)
            .ok_or_else(|| self.mismatch(declared, data.len()))?;

        self.fields.clear();

        let mut cursor = Cursor::begin(self);

        while cursor.offset() < declared {
            let Some(step) = cursor.iterate(&self.fields)? else {
                break;
            };

            let end = step.offset + step.length;
            let bytes = data
                .get(step.offset..end)
                .ok_or_else(|| self.mismatch(declared, end))?;

            let mut field =
                Field::new(step.length, step.kind).map_err(|e| Error::field(&step.tag, e))?;
            field
                .set_wire_data(bytes)
                .map_err(|e| Error::field(&step.tag, e))?;

            trace!(tre = %self.tag, field = %step.tag, length = step.length, "adding field");

            self.fields.insert(step.tag, field);
        }

        if cursor.offset() < declared {
            warn!(tre = %self.tag, declared, consumed = cursor.offset(), "unconsumed record data");
            Err(self.mismatch(declared, cursor.offset()))?;
        }

        Ok(())
    }

    /// Encode the stored subfields into their on-wire form.
    ///
    /// The declared length is used if set, and computed from the stored fields
    /// otherwise. Every subfield the description yields must be stored.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let total = match self.length {
            Some(n) => n,
            None => self.compute_length()?,
        };

        if total == 0 {
            Err(Error::InvalidArgument {
                tag: self.tag.clone(),
                reason: "the record has no length",
            })?;
        }

        let mut w = zeroed(total).map_err(|_| Error::AllocationFailure(total))?;

        let mut cursor = Cursor::begin_stored(self);

        while cursor.offset() < total {
            let Some(step) = cursor.iterate(&self.fields)? else {
                break;
            };

            let field = self
                .fields
                .get(&step.tag)
                .ok_or_else(|| Error::MissingField {
                    tag: self.tag.clone(),
                    field: step.tag.clone(),
                })?;

            let end = step.offset + step.length;
            let slot = w
                .get_mut(step.offset..end)
                .ok_or_else(|| self.mismatch(total, end))?;

            field
                .write_wire(slot)
                .map_err(|e| Error::field(&step.tag, e))?;
        }

        if cursor.offset() != total {
            Err(self.mismatch(total, cursor.offset()))?;
        }

        Ok(w)
    }

    /// The total length of the stored subfields.
    ///
    /// Gobbling subfields count with their stored width, or zero if absent.
    pub fn compute_length(&self) -> Result<usize, Error> {
        let mut cursor = Cursor::begin_stored(self);
        while cursor.iterate(&self.fields)?.is_some() {}
        Ok(cursor.offset())
    }

    /// Set the declared length to the current computed length.
    pub fn refresh_length(&mut self) -> Result<usize, Error> {
        let length = self.compute_length()?;
        self.length = Some(length).filter(|&n| n > 0);
        Ok(length)
    }

    /// Whether every subfield the description yields, up to the declared
    /// length if set, is stored.
    pub fn is_sane(&self) -> bool {
        let mut cursor = Cursor::begin_bounded(self);

        loop {
            match cursor.iterate(&self.fields) {
                Ok(Some(step)) if self.fields.contains(&step.tag) => {}
                Ok(Some(_)) | Err(_) => return false,
                Ok(None) => return true,
            }
        }
    }

    /// Set a subfield from its in-memory bytes.
    ///
    /// `data` must not be empty. A stored subfield is overwritten in place,
    /// and must receive at most its width. A new subfield must be yielded by
    /// the description; it takes the description's width, or for a gobbling
    /// entry the width of `data`. Stored subfields of zero width, as left by
    /// [`Tre::fill_defaults`] for gobbling entries, are treated as new.
    pub fn set_value(&mut self, tag: &str, data: &[u8]) -> Result<(), Error> {
        if data.is_empty() {
            Err(Error::InvalidArgument {
                tag: tag.to_string(),
                reason: "the data is empty",
            })?;
        }

        match self.fields.get_mut(tag) {
            Some(field) if !field.is_empty() => {
                if data.len() > field.len() {
                    Err(Error::InvalidArgument {
                        tag: tag.to_string(),
                        reason: "the data length does not fit the field",
                    })?;
                }

                return field.set_raw_data(data).map_err(|e| Error::field(tag, e));
            }
            _ => {}
        }

        let mut cursor = Cursor::begin_stored(self);

        while let Some(step) = cursor.iterate(&self.fields)? {
            if step.tag != tag {
                continue;
            }

            let length = if step.gobble { data.len() } else { step.length };

            let mut field = Field::new(length, step.kind).map_err(|e| Error::field(tag, e))?;
            field.set_raw_data(data).map_err(|e| Error::field(tag, e))?;

            trace!(tre = %self.tag, field = tag, length, "setting field");

            self.fields.insert(step.tag, field);
            return Ok(());
        }

        Err(Error::InvalidArgument {
            tag: tag.to_string(),
            reason: "the tag is not part of the description",
        })
    }

    /// Store a blank value for every subfield the description yields that has
    /// none: blanks for text and zeros for binary. Gobbling entries get an
    /// empty field. Loops and conditions that cannot be resolved are skipped.
    pub fn fill_defaults(&mut self) -> Result<(), Error> {
        let mut cursor = Cursor::begin_stored(self).skip_unresolved();

        while let Some(step) = cursor.iterate(&self.fields)? {
            if self.fields.contains(&step.tag) {
                continue;
            }

            let mut field =
                Field::new(step.length, step.kind).map_err(|e| Error::field(&step.tag, e))?;
            if step.kind.is_text() {
                field
                    .set_string("")
                    .map_err(|e| Error::field(&step.tag, e))?;
            }

            self.fields.insert(step.tag, field);
        }

        Ok(())
    }

    /// Iterate over the subfields in description order.
    pub fn iter(&self) -> Enumerator<'_> {
        Enumerator::new(self)
    }

    fn mismatch(&self, declared: usize, consumed: usize) -> Error {
        Error::LengthMismatch {
            tag: self.tag.clone(),
            declared,
            consumed,
        }
    }
}

impl fmt::Display for Tre {
    /// Write one line per subfield: `label (tag) = [value]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cursor = Cursor::begin_bounded(self);

        while let Ok(Some(step)) = cursor.iterate(&self.fields) {
            write!(f, "{} ({}) = [", step.label, step.tag)?;
            match self.fields.get(&step.tag) {
                Some(field) => write!(f, "{field}")?,
                None => f.write_str("<missing>")?,
            }
            f.write_str("]\n")?;
        }

        Ok(())
    }
}
