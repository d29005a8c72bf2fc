//! Grammar data model and value-composition contracts for a grammar-driven,
//! scannerless, back-tracking recursive-descent parsing engine.
//!
//! This crate is pure data: the [`grammar`] module builds the non-terminal/
//! rule/element graph a grammar author constructs programmatically, and
//! [`value`] defines the trait contract a caller's semantic-value type must
//! satisfy. Parsing itself (the engine that interprets this graph against
//! an input string) lives in `rdpeg-engine`, which depends on this crate.

pub mod charset;
pub mod cursor;
pub mod grammar;
pub mod interner;
pub mod value;

pub use charset::CharSet;
pub use cursor::{Cursor, Position};
pub use interner::{Interner, Symbol};
pub use value::Value;
