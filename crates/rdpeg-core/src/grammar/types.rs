//! Grammar model (C3): non-terminals, rules, elements, and the hooks that
//! make up the value-composition interface (C4) at the points they attach.

use crate::charset::CharSet;
use crate::cursor::Position;
use crate::interner::Symbol;
use crate::value::Value;
use std::fmt;

/// `condition`: after an element matches, accept or reject it.
pub type ConditionHook<V> = Box<dyn Fn(&V, Option<&V>) -> bool>;
/// `add_char`: fold a consumed byte onto the accumulator. Cannot fail.
pub type AddCharHook<V> = Box<dyn Fn(&V, u8) -> V>;
/// `add`: fold a matched value onto the accumulator. May reject (`None`).
pub type AddHook<V> = Box<dyn Fn(&V, &V) -> Option<V>>;
/// `add_skip`: fold a skipped optional element onto the accumulator.
pub type AddSkipHook<V> = Box<dyn Fn(&V) -> Option<V>>;
/// `begin_seq`: seed the seq-accumulator before the first sequence item.
pub type BeginSeqHook<V> = Box<dyn Fn(&V) -> V>;
/// `add_seq`: fold a finished seq-accumulator back onto the rule accumulator.
pub type AddSeqHook<V> = Box<dyn Fn(&V, &V) -> Option<V>>;
/// `set_pos`: annotate a freshly-produced result with its start position.
pub type SetPosHook<V> = Box<dyn Fn(&mut V, Position)>;
/// Rule-level `end_function`: finalize the accumulator into the rule result.
pub type EndHook<V> = Box<dyn Fn(&V, Option<&V>) -> Option<V>>;
/// Rule-level `rec_start_function`: seed a left-recursive rule from its
/// already-parsed prefix. Returning `None` means "refuse to seed".
pub type RecStartHook<V> = Box<dyn Fn(&V) -> Option<V>>;
/// `UserTerminal`'s scan function: given the unconsumed input tail, return
/// the number of bytes consumed (0 means no match) and a produced value.
pub type UserTerminalFn<V> = Box<dyn Fn(&[u8]) -> Option<(usize, V)>>;

/// One step of a rule.
pub enum ElementKind<V: Value> {
    NonTerminal(Symbol),
    Grouping(Vec<Rule<V>>),
    CharacterLiteral(u8),
    CharacterSet(CharSet),
    EndOfInput,
    UserTerminal(UserTerminalFn<V>),
}

impl<V: Value> fmt::Debug for ElementKind<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonTerminal(s) => f.debug_tuple("NonTerminal").field(s).finish(),
            Self::Grouping(rules) => f.debug_tuple("Grouping").field(&rules.len()).finish(),
            Self::CharacterLiteral(b) => f.debug_tuple("CharacterLiteral").field(b).finish(),
            Self::CharacterSet(s) => f.debug_tuple("CharacterSet").field(s).finish(),
            Self::EndOfInput => write!(f, "EndOfInput"),
            Self::UserTerminal(_) => write!(f, "UserTerminal(..)"),
        }
    }
}

/// One step of a rule, plus its flags and optional hooks.
///
/// All flags default to `false`, all hooks default to `None`, and `chain`
/// defaults to `None`, as specified for element construction.
pub struct Element<V: Value> {
    pub kind: ElementKind<V>,
    pub optional: bool,
    pub sequence: bool,
    pub avoid: bool,
    pub greedy: bool,
    /// Only meaningful when `sequence` is set: a sub-rule parsed between
    /// successive items, whose own value is discarded.
    pub chain: Option<Box<Rule<V>>>,
    pub condition: Option<ConditionHook<V>>,
    pub condition_arg: Option<V>,
    pub add_char: Option<AddCharHook<V>>,
    pub add: Option<AddHook<V>>,
    pub add_skip: Option<AddSkipHook<V>>,
    pub begin_seq: Option<BeginSeqHook<V>>,
    pub add_seq: Option<AddSeqHook<V>>,
    pub set_pos: Option<SetPosHook<V>>,
}

impl<V: Value> Element<V> {
    pub fn new(kind: ElementKind<V>) -> Self {
        Self {
            kind,
            optional: false,
            sequence: false,
            avoid: false,
            greedy: false,
            chain: None,
            condition: None,
            condition_arg: None,
            add_char: None,
            add: None,
            add_skip: None,
            begin_seq: None,
            add_seq: None,
            set_pos: None,
        }
    }
}

impl<V: Value> fmt::Debug for Element<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("kind", &self.kind)
            .field("optional", &self.optional)
            .field("sequence", &self.sequence)
            .field("avoid", &self.avoid)
            .field("greedy", &self.greedy)
            .field("chain", &self.chain.is_some())
            .finish()
    }
}

/// An ordered, possibly empty list of elements plus optional semantic hooks.
pub struct Rule<V: Value> {
    pub elements: Vec<Element<V>>,
    pub end_function: Option<EndHook<V>>,
    pub end_payload: Option<V>,
    /// Only meaningful for rules stored in a non-terminal's `recursive` list.
    pub rec_start_function: Option<RecStartHook<V>>,
}

impl<V: Value> Rule<V> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            end_function: None,
            end_payload: None,
            rec_start_function: None,
        }
    }

    pub fn push(&mut self, element: Element<V>) -> &mut Self {
        self.elements.push(element);
        self
    }
}

impl<V: Value> Default for Rule<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Value> fmt::Debug for Rule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("elements", &self.elements)
            .field("has_end_function", &self.end_function.is_some())
            .field("is_left_recursive", &self.rec_start_function.is_some())
            .finish()
    }
}

/// A named production slot: two ordered rule lists, `normal` and
/// `recursive`. `recursive` rules have their leading self-reference elided.
#[derive(Debug)]
pub struct NonTerminal<V: Value> {
    pub name: Symbol,
    pub normal: Vec<Rule<V>>,
    pub recursive: Vec<Rule<V>>,
}

impl<V: Value> NonTerminal<V> {
    pub fn new(name: Symbol) -> Self {
        Self {
            name,
            normal: Vec::new(),
            recursive: Vec::new(),
        }
    }
}
