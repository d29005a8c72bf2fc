//! Construction API (spec.md §6): builds a [`Grammar`] programmatically.

use super::types::NonTerminal;
use crate::interner::{Interner, Symbol};
use crate::value::Value;
use indexmap::IndexMap;

/// A grammar: an insertion-ordered, name-interned dictionary of
/// non-terminals, each with `normal` and `recursive` rule lists.
pub struct Grammar<V: Value> {
    interner: Interner,
    non_terminals: IndexMap<Symbol, NonTerminal<V>>,
}

impl<V: Value> Grammar<V> {
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            non_terminals: IndexMap::new(),
        }
    }

    /// Find the symbol for `name`, interning it if this is the first time
    /// it's been seen, and ensure a (possibly empty) non-terminal entry
    /// exists for it.
    pub fn find_or_add_nt(&mut self, name: &str) -> Symbol {
        let sym = self.interner.intern(name);
        self.non_terminals
            .entry(sym)
            .or_insert_with(|| NonTerminal::new(sym));
        sym
    }

    /// Look up a symbol without creating an entry, for read-only callers
    /// (e.g. element construction referencing an already-declared
    /// non-terminal).
    pub fn symbol(&mut self, name: &str) -> Symbol {
        self.interner.intern(name)
    }

    pub fn name_of(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    pub fn non_terminal(&self, sym: Symbol) -> &NonTerminal<V> {
        self.non_terminals
            .get(&sym)
            .unwrap_or_else(|| panic!("non-terminal {sym:?} was never added to the grammar"))
    }

    pub fn non_terminal_mut(&mut self, sym: Symbol) -> &mut NonTerminal<V> {
        self.non_terminals
            .get_mut(&sym)
            .unwrap_or_else(|| panic!("non-terminal {sym:?} was never added to the grammar"))
    }

    pub fn contains(&self, sym: Symbol) -> bool {
        self.non_terminals.contains_key(&sym)
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = (Symbol, &NonTerminal<V>)> {
        self.non_terminals.iter().map(|(s, nt)| (*s, nt))
    }
}

impl<V: Value> Default for Grammar<V> {
    fn default() -> Self {
        Self::new()
    }
}
