//! Memoization cache (C5): per-(position, non-terminal) outcomes.
//!
//! `get_or_insert_unknown` and `set` together cover both code paths the
//! spec's source exhibits (a `store` hook, or in-place mutation of the
//! value `lookup` returned): the engine never needs the cache to implement
//! the "mutate what `lookup` gave back" path itself, because it always
//! calls `set` explicitly once it has decided the outcome. See
//! SPEC_FULL.md §4.4 for the full justification.

use rdpeg_core::{Position, Symbol, Value};
use std::collections::HashMap;

/// A cache entry's tri-state outcome.
#[derive(Clone, Debug)]
pub enum Outcome<V> {
    Unknown,
    Fail,
    Success { value: V, next: Position },
}

/// A pluggable memoization strategy.
pub trait Cache<V: Value> {
    /// Look up the outcome at `(pos, nt)`. If none is recorded yet, record
    /// and return `Outcome::Unknown` — the caller (the engine) is
    /// responsible for immediately overwriting this with `Fail` before
    /// descending, per the left-recursion protocol.
    fn get_or_insert_unknown(&mut self, pos: usize, nt: Symbol) -> Outcome<V>;

    /// Record the outcome at `(pos, nt)`, overwriting whatever was there.
    fn set(&mut self, pos: usize, nt: Symbol, outcome: Outcome<V>);
}

/// Reference ("brute-force") memoization strategy: one entry per
/// `(position, non-terminal)` for the input's full length, no eviction.
///
/// Each position's entries are kept in a `Vec`, standing in for "a linked
/// list per position" — the same amortized append-only access pattern,
/// expressed the idiomatic-Rust way.
pub struct BruteForceCache<V> {
    table: HashMap<usize, Vec<(Symbol, Outcome<V>)>>,
}

impl<V> BruteForceCache<V> {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Pre-size the position table for an input of the given length.
    pub fn with_capacity(input_len: usize) -> Self {
        Self {
            table: HashMap::with_capacity(input_len + 1),
        }
    }
}

impl<V> Default for BruteForceCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Value> Cache<V> for BruteForceCache<V> {
    fn get_or_insert_unknown(&mut self, pos: usize, nt: Symbol) -> Outcome<V> {
        let list = self.table.entry(pos).or_default();
        if let Some((_, outcome)) = list.iter().find(|(s, _)| *s == nt) {
            return outcome.clone();
        }
        list.push((nt, Outcome::Unknown));
        Outcome::Unknown
    }

    fn set(&mut self, pos: usize, nt: Symbol, outcome: Outcome<V>) {
        let list = self.table.entry(pos).or_default();
        if let Some(slot) = list.iter_mut().find(|(s, _)| *s == nt) {
            slot.1 = outcome;
        } else {
            list.push((nt, outcome));
        }
    }
}
