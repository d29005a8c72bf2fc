//! A grammar-driven, scannerless, back-tracking recursive-descent parsing
//! engine: memoization cache (C5), expectation tracker (C7), frame stack
//! (C8), the parsing engine itself (C6), and failure reporting (§7).
//!
//! Grammars are built with [`rdpeg_core::grammar::Grammar`] and interpreted
//! directly — there is no separate compile step.

pub mod cache;
pub mod engine;
pub mod error;
pub mod expectation;
pub mod frame;
pub mod report;


pub use cache::{BruteForceCache, Cache, Outcome};
pub use engine::{parse, parse_with_cache, ParseFailure};
pub use error::EngineError;
pub use expectation::{ExpectedElement, Expectation, ExpectationTracker};
pub use frame::{Frame, Frames};
pub use report::FailureReport;
