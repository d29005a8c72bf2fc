//! The grammar data model (C3): non-terminals, rules, elements, and the
//! construction API (spec.md §6) that builds them.

mod builder;
mod readback;
mod types;

pub use builder::Grammar;
pub use readback::{render_charset, render_element, render_rule};
pub use types::{
    AddCharHook, AddHook, AddSeqHook, AddSkipHook, BeginSeqHook, ConditionHook, Element,
    ElementKind, EndHook, NonTerminal, RecStartHook, Rule, SetPosHook, UserTerminalFn,
};
