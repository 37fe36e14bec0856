//! Resolution of record tags to their handlers.

use alloc::{collections::BTreeMap, string::String};

use either::Either::{self, Left, Right};

use crate::sans::description::DescriptionSet;

use super::Handler;

/// Resolve a record tag to the description set driving a [`super::Basic`]
/// handler, or to a custom handler.
pub trait Resolver {
    fn lookup(&self, tag: &str) -> Option<Either<&'static DescriptionSet, &'static dyn Handler>>;
}

/// A table of handlers by tag.
#[derive(Default)]
pub struct Registry {
    entries: BTreeMap<String, Either<&'static DescriptionSet, &'static dyn Handler>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a description set for `tag`, replacing any earlier entry.
    pub fn register_set(&mut self, tag: &str, set: &'static DescriptionSet) -> &mut Self {
        self.entries.insert(tag.into(), Left(set));
        self
    }

    /// Register a custom handler for `tag`, replacing any earlier entry.
    pub fn register_handler(&mut self, tag: &str, handler: &'static dyn Handler) -> &mut Self {
        self.entries.insert(tag.into(), Right(handler));
        self
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }
}

impl Resolver for Registry {
    fn lookup(&self, tag: &str) -> Option<Either<&'static DescriptionSet, &'static dyn Handler>> {
        self.entries.get(tag).copied()
    }
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn lookup(&self, tag: &str) -> Option<Either<&'static DescriptionSet, &'static dyn Handler>> {
        (**self).lookup(tag)
    }
}
