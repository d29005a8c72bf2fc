//! Value composition interface (C4): the opaque semantic-value side.
//!
//! The engine threads a single "accumulator" value through a rule's
//! elements and never inspects its payload. In the source this was a void
//! pointer with manual reference counting; here it is an owned value type
//! with the operations the spec requires made explicit:
//!
//! - initialize-empty -> [`Value::empty`]
//! - assign (copy-or-share, caller's choice) -> `Clone::clone`
//! - transfer (move, leaving the source empty) -> [`transfer`]
//! - release (drop) -> `Drop` (automatic)
//! - print (diagnostic) -> `Debug`
//!
//! Grammars are generic over `V: Value`; the engine never needs to know
//! more about a semantic value than this trait exposes.

use std::fmt;

/// A semantic value the engine can accumulate, compose, and discard.
///
/// Implementors choose their own "assign" discipline (deep copy, `Rc`
/// sharing, etc.) via their `Clone` impl; the engine only ever calls
/// `clone()`, never inspects the payload.
pub trait Value: Clone + fmt::Debug {
    /// The initialized-empty value used to seed fresh accumulators and as
    /// the left-recursive-rule default prefix-discard result.
    fn empty() -> Self;
}

/// Move `slot`'s value out, leaving `slot` in the initialized-empty state.
///
/// This is the Rust encoding of the spec's "transfer" operation: "move,
/// leaving source empty."
pub fn transfer<V: Value>(slot: &mut V) -> V {
    std::mem::replace(slot, V::empty())
}

impl Value for () {
    fn empty() -> Self {}
}

impl Value for String {
    fn empty() -> Self {
        String::new()
    }
}

impl Value for i64 {
    fn empty() -> Self {
        0
    }
}
