//! Frame stack (C8): per-non-terminal activation records for diagnostics.
//!
//! Represented as an `Rc`-linked persistent stack rather than a mutated
//! `Vec`: pushing returns a *new* [`Frames`] sharing the old tail, which is
//! exactly the "reference-counted ... cheap snapshotting" the spec asks
//! for — a snapshot is just a cloned `Rc`, O(1) regardless of depth.

use rdpeg_core::{Position, Symbol};
use std::rc::Rc;

/// One non-terminal activation record.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub nt: Symbol,
    pub start: Position,
}

struct Node {
    frame: Frame,
    parent: Option<Rc<Node>>,
}

/// A cheaply-clonable snapshot of the current call stack of non-terminals.
#[derive(Clone, Default)]
pub struct Frames(Option<Rc<Node>>);

impl Frames {
    pub fn root() -> Self {
        Self(None)
    }

    /// Push a frame, returning the extended stack. `self` is left
    /// unmodified (it stays a valid snapshot of the stack before the push).
    #[must_use]
    pub fn push(&self, frame: Frame) -> Self {
        Self(Some(Rc::new(Node {
            frame,
            parent: self.0.clone(),
        })))
    }

    /// Iterate from the innermost (most recently pushed) frame outward.
    pub fn iter(&self) -> impl Iterator<Item = Frame> + '_ {
        let mut cur = self.0.as_ref();
        std::iter::from_fn(move || {
            let node = cur?;
            cur = node.parent.as_ref();
            Some(node.frame)
        })
    }

    /// Collect just the non-terminal names, innermost first — used as a
    /// dedup key by the expectation tracker.
    pub fn names(&self) -> Vec<Symbol> {
        self.iter().map(|f| f.nt).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}
