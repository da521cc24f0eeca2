//! Directive tagging.
//!
//! The rendering engine receives opaque values and must decide, per value,
//! whether to execute it as a directive or insert it as literal content.
//! [`tag`] marks a function value as executable; [`is_directive`] answers
//! the engine's question. Recognition is by closure identity, not structure:
//! of two behaviorally identical functions, only the tagged one is
//! recognized.
//!
//! The tag set holds weak references, so it never keeps a directive value
//! alive. Dead entries are dropped opportunistically once the set grows past
//! a high-water mark.

use crate::value::{DirectiveClosure, DirectiveFn, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;
use tracing::debug;

const PRUNE_HIGH_WATER: usize = 128;

struct TagSet {
    entries: HashMap<usize, Weak<DirectiveClosure>>,
    high_water: usize,
}

impl TagSet {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            high_water: PRUNE_HIGH_WATER,
        }
    }

    fn insert(&mut self, fun: &DirectiveFn) {
        self.entries.insert(fun.addr(), fun.downgrade());
        if self.entries.len() > self.high_water {
            self.prune();
        }
    }

    fn prune(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|_, tag| tag.strong_count() > 0);
        self.high_water = (self.entries.len() * 2).max(PRUNE_HIGH_WATER);
        debug!(
            pruned = before - self.entries.len(),
            live = self.entries.len(),
            "pruned dead directive tags"
        );
    }

    fn contains(&self, fun: &DirectiveFn) -> bool {
        // A live entry at this address is necessarily this closure: the weak
        // reference pins the allocation, so the address cannot be reused
        // while the entry exists.
        self.entries
            .get(&fun.addr())
            .is_some_and(|tag| tag.strong_count() > 0)
    }

    fn live(&self) -> usize {
        self.entries
            .values()
            .filter(|tag| tag.strong_count() > 0)
            .count()
    }
}

thread_local! {
    static TAGS: RefCell<TagSet> = RefCell::new(TagSet::new());
}

/// Tag a directive function so the engine executes it instead of committing
/// it as data.
pub fn tag(fun: &DirectiveFn) {
    TAGS.with(|tags| tags.borrow_mut().insert(fun));
}

/// True only for a [`Value::Directive`] whose closure was previously tagged
/// on this thread and is still alive.
#[must_use]
pub fn is_directive(value: &Value) -> bool {
    match value {
        Value::Directive(fun) => TAGS.with(|tags| tags.borrow().contains(fun)),
        _ => false,
    }
}

/// Number of live tagged directives on this thread.
#[must_use]
pub fn tagged_count() -> usize {
    TAGS.with(|tags| tags.borrow().live())
}
