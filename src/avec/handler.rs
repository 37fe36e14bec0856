//! Handlers: the operations binding a record to its byte representation.

use core::fmt;

use alloc::{boxed::Box, string::String};
use either::Either::{self, Left, Right};
use tracing::debug;

use crate::{
    Error,
    sans::{
        description::DescriptionSet,
        field::{Field, zeroed},
        record::Tre,
    },
};

use super::{Sink, Source, registry::Resolver};

/// An iterator over a record's `(tag, field)` pairs, as supplied by its
/// handler.
pub type Subfields<'t> = Box<dyn Iterator<Item = Result<(String, &'t Field), Error>> + 't>;

/// The capability set for reading, writing and editing one kind of record.
///
/// [`Basic`] implements every operation from a [`DescriptionSet`]. Records
/// needing schema-specific logic supply their own implementation, registered
/// with a [`Resolver`].
pub trait Handler {
    /// Create an empty record of tag `tag`, with the declared length if known.
    fn init(&self, tag: &str, length: Option<usize>) -> Result<Tre, Error>;

    /// Read and decode the record's declared length of bytes from a source.
    fn read(&self, source: &mut dyn Source, tre: &mut Tre) -> Result<(), Error>;

    /// Encode the record and write it to a sink.
    fn write(&self, sink: &mut dyn Sink, tre: &Tre) -> Result<(), Error>;

    /// Set a subfield from its in-memory bytes.
    fn set_field(&self, tre: &mut Tre, tag: &str, data: &[u8]) -> Result<(), Error>;

    /// Find a stored subfield.
    fn find<'t>(&self, tre: &'t Tre, tag: &str) -> Option<&'t Field>;

    /// Iterate over the record's subfields.
    ///
    /// Description-driven records enumerate with [`Tre::iter`].
    fn begin<'t>(&self, tre: &'t Tre) -> Subfields<'t>;

    /// The length the record would currently encode to.
    fn current_size(&self, tre: &Tre) -> Result<usize, Error>;
}

/// The description-driven handler.
#[derive(Debug, Clone, Copy)]
pub struct Basic {
    set: &'static DescriptionSet,
}

impl Basic {
    pub const fn new(set: &'static DescriptionSet) -> Self {
        Self { set }
    }

    pub fn set(&self) -> &'static DescriptionSet {
        self.set
    }
}

impl Handler for Basic {
    fn init(&self, tag: &str, length: Option<usize>) -> Result<Tre, Error> {
        let (description, length) = self.set.select(tag, length)?;

        let mut tre = Tre::new(tag, length, description);
        tre.fill_defaults()?;

        Ok(tre)
    }

    fn read(&self, source: &mut dyn Source, tre: &mut Tre) -> Result<(), Error> {
        let length = tre.length().ok_or_else(|| Error::InvalidArgument {
            tag: tre.tag().into(),
            reason: "the record length is unset",
        })?;

        let mut r = zeroed(length).map_err(|_| Error::AllocationFailure(length))?;
        source.read_exact(&mut r)?;

        tre.parse(&r)
    }

    fn write(&self, sink: &mut dyn Sink, tre: &Tre) -> Result<(), Error> {
        sink.write_all(&tre.to_bytes()?)
    }

    fn set_field(&self, tre: &mut Tre, tag: &str, data: &[u8]) -> Result<(), Error> {
        tre.set_value(tag, data)
    }

    fn find<'t>(&self, tre: &'t Tre, tag: &str) -> Option<&'t Field> {
        tre.fields().get(tag)
    }

    fn begin<'t>(&self, tre: &'t Tre) -> Subfields<'t> {
        Box::new(tre.iter())
    }

    fn current_size(&self, tre: &Tre) -> Result<usize, Error> {
        tre.compute_length()
    }
}

/// The handler a record is bound to for its lifetime.
#[derive(Clone, Copy)]
pub enum Binding {
    Basic(Basic),
    Custom(&'static dyn Handler),
}

impl Binding {
    pub fn handler(&self) -> &dyn Handler {
        match self {
            Self::Basic(basic) => basic,
            Self::Custom(handler) => *handler,
        }
    }
}

impl From<Either<&'static DescriptionSet, &'static dyn Handler>> for Binding {
    fn from(value: Either<&'static DescriptionSet, &'static dyn Handler>) -> Self {
        match value {
            Left(set) => Self::Basic(Basic::new(set)),
            Right(handler) => Self::Custom(handler),
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(basic) => f.debug_tuple("Basic").field(basic).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// A record together with the handler it was created by.
#[derive(Debug, Clone)]
pub struct Extension {
    tre: Tre,
    binding: Binding,
}

impl Extension {
    /// Create an empty record of tag `tag`, bound to the handler `resolver`
    /// returns for it.
    pub fn new(resolver: &impl Resolver, tag: &str, length: Option<usize>) -> Result<Self, Error> {
        let binding = bind(resolver, tag)?;
        let tre = binding.handler().init(tag, length)?;

        debug!(tag, ?binding, length = ?tre.length(), "bound extension");

        Ok(Self { tre, binding })
    }

    /// Create an empty record of tag `tag` using its description variant
    /// named `name`, with every subfield filled with a blank value.
    ///
    /// Only records with a description-driven handler have named variants.
    pub fn named(resolver: &impl Resolver, tag: &str, name: &str) -> Result<Self, Error> {
        let binding = bind(resolver, tag)?;

        let Binding::Basic(basic) = binding else {
            return Err(Error::InvalidArgument {
                tag: tag.into(),
                reason: "custom handlers have no named variants",
            });
        };

        let candidate = basic
            .set()
            .find_name(name)
            .ok_or_else(|| Error::SchemaNotFound { tag: tag.into() })?;

        let mut tre = Tre::new(tag, candidate.length, candidate.description);
        tre.fill_defaults()?;

        Ok(Self { tre, binding })
    }

    pub fn tre(&self) -> &Tre {
        &self.tre
    }

    pub fn into_tre(self) -> Tre {
        self.tre
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    pub fn read(&mut self, source: &mut dyn Source) -> Result<(), Error> {
        self.binding.handler().read(source, &mut self.tre)
    }

    pub fn write(&self, sink: &mut dyn Sink) -> Result<(), Error> {
        self.binding.handler().write(sink, &self.tre)
    }

    pub fn set_field(&mut self, tag: &str, data: &[u8]) -> Result<(), Error> {
        self.binding.handler().set_field(&mut self.tre, tag, data)
    }

    pub fn find(&self, tag: &str) -> Option<&Field> {
        self.binding.handler().find(&self.tre, tag)
    }

    pub fn iter(&self) -> Subfields<'_> {
        self.binding.handler().begin(&self.tre)
    }

    pub fn current_size(&self) -> Result<usize, Error> {
        self.binding.handler().current_size(&self.tre)
    }

    pub fn is_sane(&self) -> bool {
        self.tre.is_sane()
    }
}

fn bind(resolver: &impl Resolver, tag: &str) -> Result<Binding, Error> {
    resolver
        .lookup(tag)
        .map(Binding::from)
        .ok_or_else(|| Error::InvalidArgument {
            tag: tag.into(),
            reason: "no handler is registered for the tag",
        })
}
