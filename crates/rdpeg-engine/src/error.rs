//! Engine-level errors returned from the top-level `parse`/`parse_with_cache`
//! entry points: either a grammar-construction mistake caught before parsing
//! starts, or an ordinary parse failure (spec.md §6/§7) carrying the
//! farthest-position diagnostic.

use crate::engine::ParseFailure;
use rdpeg_core::Symbol;

#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("start non-terminal {0:?} was never added to the grammar")]
    UnknownStartNonTerminal(Symbol),
    #[error("no rule matched the input")]
    NoMatch(ParseFailure),
}

impl EngineError {
    /// The `ParseFailure` carried by a `NoMatch`, if this is one.
    pub fn as_parse_failure(&self) -> Option<&ParseFailure> {
        match self {
            Self::NoMatch(failure) => Some(failure),
            Self::UnknownStartNonTerminal(_) => None,
        }
    }
}
