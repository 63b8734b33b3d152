use std::collections::HashMap;
use std::sync::{Arc, Weak};

use crate::types::error::{Error, ErrorRepr};

const MIN_SWEEP: usize = 64;

/// Identity-keyed set of errors the channel has already processed.
///
/// Entries hold a `Weak` reference, which keeps the allocation (and therefore
/// the address used as key) reserved without keeping the error alive. An entry
/// counts only while its error has a live handle; dead entries are dropped
/// whenever the table doubles past its last live size.
#[derive(Debug)]
pub(crate) struct HandledSet {
    entries: HashMap<usize, Weak<ErrorRepr>>,
    sweep_at: usize,
}

impl Default for HandledSet {
    fn default() -> Self {
        Self { entries: HashMap::new(), sweep_at: MIN_SWEEP }
    }
}

impl HandledSet {
    pub(crate) fn contains(&self, error: &Error) -> bool {
        self.entries.get(&error.addr()).is_some_and(|weak| weak.strong_count() > 0)
    }

    /// Marks `error`; returns `false` if it was already marked.
    pub(crate) fn insert(&mut self, error: &Error) -> bool {
        if self.contains(error) {
            return false;
        }
        if self.entries.len() >= self.sweep_at {
            self.sweep();
        }
        self.entries.insert(error.addr(), Arc::downgrade(&error.repr));
        true
    }

    pub(crate) fn remove(&mut self, error: &Error) {
        if self.contains(error) {
            self.entries.remove(&error.addr());
        }
    }

    fn sweep(&mut self) {
        self.entries.retain(|_, weak| weak.strong_count() > 0);
        self.sweep_at = (self.entries.len() * 2).max(MIN_SWEEP);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
