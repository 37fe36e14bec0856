//! Walker resolving a description's subfields against a byte offset.
//!
//! A [`Cursor`] starts before the first subfield. Each call to
//! [`Cursor::iterate`] yields the next subfield as a [`Step`], with its
//! length resolved, until the description is exhausted. Loop counts and
//! conditions are evaluated against the subfields supplied to each call, so
//! a caller filling a record as it walks sees its own insertions.
//!
//! A walk bounded by a declared length ends once that many bytes have been
//! yielded, leaving any later entries unvisited.

use core::fmt::Write;

use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use crate::{
    Error,
    sans::{
        description::{Count, Entry, Item, Length, Test},
        field::{Field, FieldKind},
        record::{Fields, Tre},
    },
};

/// The position of a cursor in its walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No subfield has been yielded yet.
    Start,
    Iterating,
    /// The description is exhausted.
    Done,
}

/// A resolved subfield.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The subfield tag, suffixed with its loop indices.
    pub tag: String,
    /// Offset of the subfield from the start of the record.
    pub offset: usize,
    pub length: usize,
    pub kind: FieldKind,
    pub label: &'static str,
    /// Whether the length was resolved from a gobbling entry.
    pub gobble: bool,
}

/// How gobbling entries are sized.
#[derive(Debug, Clone, Copy)]
enum Gobble {
    /// Whatever remains of the declared length.
    Remaining(usize),
    /// The width of the stored field, or zero if there is none.
    Stored,
}

#[derive(Debug)]
struct Frame {
    items: &'static [Item],
    next: usize,
    /// Current index and total count, for loop bodies.
    repeat: Option<(usize, usize)>,
    /// Steps yielded before the current pass over `items` began.
    pass_start: usize,
    /// Whether every pass over `items` resolves the same way.
    uniform: bool,
}

impl Frame {
    fn new(items: &'static [Item], repeat: Option<(usize, usize)>, yielded: usize) -> Self {
        Self {
            items,
            next: 0,
            repeat,
            pass_start: yielded,
            uniform: repeat.is_none() || !depends_on_index(items, items),
        }
    }
}

/// A stateful walk over a record's description.
#[derive(Debug)]
pub struct Cursor {
    tag: String,
    gobble: Gobble,
    lenient: bool,
    limit: Option<usize>,
    offset: usize,
    yielded: usize,
    stack: Vec<Frame>,
    /// Loop indices of the enclosing repeat frames, outermost first.
    indices: Vec<usize>,
    state: State,
}

impl Cursor {
    /// Begin a walk sizing gobbling entries from the record's declared length,
    /// as when parsing. The walk ends at the declared length.
    ///
    /// Records without a declared length are walked as by
    /// [`Cursor::begin_stored`].
    pub fn begin(tre: &Tre) -> Self {
        let gobble = match tre.length() {
            Some(n) => Gobble::Remaining(n),
            None => Gobble::Stored,
        };

        Self::with(tre, gobble, tre.length())
    }

    /// Begin a walk sizing gobbling entries from the stored fields, as when
    /// serializing. The walk covers the whole description.
    pub fn begin_stored(tre: &Tre) -> Self {
        Self::with(tre, Gobble::Stored, None)
    }

    /// Begin a walk over the stored fields that ends at the declared length,
    /// if one is set.
    pub fn begin_bounded(tre: &Tre) -> Self {
        Self::with(tre, Gobble::Stored, tre.length())
    }

    fn with(tre: &Tre, gobble: Gobble, limit: Option<usize>) -> Self {
        Self {
            tag: tre.tag().to_string(),
            gobble,
            lenient: false,
            limit,
            offset: 0,
            yielded: 0,
            stack: vec![Frame::new(tre.description().items(), None, 0)],
            indices: Vec::new(),
            state: State::Start,
        }
    }

    /// Skip, rather than fail on, loops and conditions whose operand has no
    /// usable value.
    pub fn skip_unresolved(mut self) -> Self {
        self.lenient = true;
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Bytes covered by the subfields yielded so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Advance to the next subfield.
    ///
    /// Returns `None` once the description is exhausted.
    pub fn iterate(&mut self, fields: &Fields) -> Result<Option<Step>, Error> {
        if self.state == State::Done {
            return Ok(None);
        }

        if self.limit.is_some_and(|n| self.offset >= n) {
            self.state = State::Done;
            return Ok(None);
        }

        loop {
            let Some(frame) = self.stack.last_mut() else {
                self.state = State::Done;
                return Ok(None);
            };

            let items = frame.items;
            let Some(item) = items.get(frame.next) else {
                // An empty pass over a uniform body leaves every later pass
                // empty too.
                let empty = frame.uniform && self.yielded == frame.pass_start;

                match frame.repeat {
                    Some((index, count)) if index + 1 < count && !empty => {
                        frame.repeat = Some((index + 1, count));
                        frame.next = 0;
                        frame.pass_start = self.yielded;
                        if let Some(last) = self.indices.last_mut() {
                            *last = index + 1;
                        }
                    }
                    Some(_) => {
                        self.stack.pop();
                        self.indices.pop();
                    }
                    None => {
                        self.stack.pop();
                    }
                }
                continue;
            };

            frame.next += 1;

            match *item {
                Item::Field(entry) => {
                    self.state = State::Iterating;
                    return Ok(Some(self.step(&entry, fields)));
                }
                Item::Loop { count, body } => {
                    let (operand, count) = match count {
                        Count::Fixed(n) => ("", Some(n)),
                        Count::Field(name) => (
                            name,
                            self.operand(name, fields)
                                .and_then(Field::as_integer)
                                .and_then(|n| usize::try_from(n).ok()),
                        ),
                    };

                    match count {
                        Some(0) => {}
                        Some(n) => {
                            self.stack.push(Frame::new(body, Some((0, n)), self.yielded));
                            self.indices.push(0);
                        }
                        None if self.lenient => {}
                        None => Err(self.unresolved(operand))?,
                    }
                }
                Item::If { condition, body } => {
                    let holds = self
                        .operand(condition.field, fields)
                        .map(|f| match condition.test {
                            Test::Equals(value) => f.matches(value),
                            Test::NotEquals(value) => !f.matches(value),
                        });

                    match holds {
                        Some(true) => self.stack.push(Frame::new(body, None, self.yielded)),
                        Some(false) => {}
                        None if self.lenient => {}
                        None => Err(self.unresolved(condition.field))?,
                    }
                }
            }
        }
    }

    fn step(&mut self, entry: &Entry, fields: &Fields) -> Step {
        let tag = indexed(entry.tag, &self.indices);

        let (length, gobble) = match entry.length {
            Length::Fixed(n) => (n, false),
            Length::Gobble => {
                let n = match self.gobble {
                    Gobble::Remaining(declared) => declared.saturating_sub(self.offset),
                    Gobble::Stored => fields.get(&tag).map_or(0, Field::len),
                };
                (n, true)
            }
        };

        let offset = self.offset;
        self.offset += length;
        self.yielded += 1;

        Step {
            tag,
            offset,
            length,
            kind: entry.kind,
            label: entry.label,
            gobble,
        }
    }

    /// Look up an operand, preferring the innermost loop scope.
    fn operand<'f>(&self, name: &str, fields: &'f Fields) -> Option<&'f Field> {
        (0..=self.indices.len())
            .rev()
            .find_map(|depth| fields.get(&indexed(name, &self.indices[..depth])))
    }

    fn unresolved(&self, operand: &'static str) -> Error {
        Error::SchemaResolution {
            tag: self.tag.clone(),
            operand,
        }
    }
}

/// Whether a loop count or condition within `items` refers to an entry
/// declared in `body`, and so may resolve differently on each pass.
fn depends_on_index(body: &[Item], items: &[Item]) -> bool {
    items.iter().any(|item| match *item {
        Item::Field(_) => false,
        Item::Loop { count, body: inner } => {
            matches!(count, Count::Field(name) if declares(body, name))
                || depends_on_index(body, inner)
        }
        Item::If {
            condition,
            body: inner,
        } => declares(body, condition.field) || depends_on_index(body, inner),
    })
}

fn declares(items: &[Item], tag: &str) -> bool {
    items.iter().any(|item| match *item {
        Item::Field(entry) => entry.tag == tag,
        Item::Loop { body, .. } | Item::If { body, .. } => declares(body, tag),
    })
}

/// Suffix a tag with loop indices: `LAT` and `[1, 2]` give `LAT[1][2]`.
pub fn indexed(tag: &str, indices: &[usize]) -> String {
    let mut s = String::from(tag);
    for i in indices {
        // Writing to a `String` cannot fail.
        let _ = write!(s, "[{i}]");
    }
    s
}

/// Strip loop indices from a tag: `LAT[1][2]` gives `LAT`.
pub fn base_tag(tag: &str) -> &str {
    tag.split_once('[').map_or(tag, |(base, _)| base)
}
