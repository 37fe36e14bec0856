//! Declarative record layouts.
//!
//! A [`Description`] is the ordered tree of subfields making up one record
//! variant. Descriptions are built as statics and shared by every record
//! matched against them:
//!
//! ```
//! static POINTS: Description = Description::new(&[
//!     Item::Field(Entry::new("NPTS", Length::Fixed(2), FieldKind::Numeric, "Point Count")),
//!     Item::Loop {
//!         count: Count::Field("NPTS"),
//!         body: &[Item::Field(Entry::new("LAT", Length::Fixed(4), FieldKind::Numeric, "Latitude"))],
//!     },
//!     Item::Field(Entry::new("REMARK", Length::Gobble, FieldKind::Alphanumeric, "Remark")),
//! ]);
//! ```

use alloc::string::ToString;

use tracing::debug;

use crate::{Error, sans::field::FieldKind};

/// The width of a subfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Length {
    /// A fixed number of bytes.
    Fixed(usize),
    /// All bytes remaining in the record.
    Gobble,
}

/// A single subfield of a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub tag: &'static str,
    pub length: Length,
    pub kind: FieldKind,
    /// Human-readable name, without semantic effect.
    pub label: &'static str,
}

impl Entry {
    pub const fn new(tag: &'static str, length: Length, kind: FieldKind, label: &'static str) -> Self {
        Self {
            tag,
            length,
            kind,
            label,
        }
    }
}

/// The number of repetitions of a loop body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Fixed(usize),
    /// The integer value of a previously parsed subfield.
    Field(&'static str),
}

/// A comparison against a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Test {
    Equals(&'static str),
    NotEquals(&'static str),
}

/// A predicate over a previously parsed subfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub field: &'static str,
    pub test: Test,
}

impl Condition {
    pub const fn equals(field: &'static str, value: &'static str) -> Self {
        Self {
            field,
            test: Test::Equals(value),
        }
    }

    pub const fn not_equals(field: &'static str, value: &'static str) -> Self {
        Self {
            field,
            test: Test::NotEquals(value),
        }
    }
}

/// A node of a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Field(Entry),
    /// Items repeated `count` times. Subfields inside are tagged `TAG[i]`.
    Loop {
        count: Count,
        body: &'static [Item],
    },
    /// Items present only when `condition` holds.
    If {
        condition: Condition,
        body: &'static [Item],
    },
}

/// An ordered schema of subfields for one record variant.
#[derive(Debug, PartialEq, Eq)]
pub struct Description {
    items: &'static [Item],
}

impl Description {
    pub const fn new(items: &'static [Item]) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &'static [Item] {
        self.items
    }
}

/// A named description variant, optionally bound to an exact record length.
#[derive(Debug)]
pub struct Candidate {
    pub name: &'static str,
    /// Selects this variant when it equals the record length. `None` places
    /// no constraint.
    pub length: Option<usize>,
    pub description: &'static Description,
}

/// All known description variants for one tag.
#[derive(Debug)]
pub struct DescriptionSet {
    pub candidates: &'static [Candidate],
    /// The candidate used when no length matches.
    pub default_index: usize,
}

impl DescriptionSet {
    pub const fn new(candidates: &'static [Candidate], default_index: usize) -> Self {
        Self {
            candidates,
            default_index,
        }
    }

    /// Select the description for a record of tag `tag` and declared length
    /// `length`.
    ///
    /// A set length selects the first candidate matching it exactly. Failing
    /// that, the default candidate is selected, and an unset length adopts the
    /// default's length, if it has one.
    ///
    /// Returns the description and the record's (possibly adopted) length.
    pub fn select(
        &self,
        tag: &str,
        length: Option<usize>,
    ) -> Result<(&'static Description, Option<usize>), Error> {
        let length = length.filter(|&n| n > 0);

        let exact = length.and_then(|n| self.candidates.iter().find(|c| c.length == Some(n)));

        let candidate = match exact {
            Some(c) => c,
            None => self
                .candidates
                .get(self.default_index)
                .ok_or_else(|| Error::SchemaNotFound { tag: tag.to_string() })?,
        };

        let length = length.or(candidate.length);

        debug!(tag, candidate = candidate.name, ?length, "selected description");

        Ok((candidate.description, length))
    }

    /// Find a candidate by name.
    pub fn find_name(&self, name: &str) -> Option<&'static Candidate> {
        self.candidates.iter().find(|c| c.name == name)
    }
}
