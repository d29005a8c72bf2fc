//! Parsing engine (C6): the non-terminal/rule/element/sequence procedures.
//!
//! This is the core of the crate. It interprets a [`Grammar`] directly
//! against an input string — there is no compilation step, no bytecode,
//! and no separate tokenizer: terminals are individual bytes or byte sets
//! consulted straight off the [`Cursor`].

use crate::cache::{BruteForceCache, Cache, Outcome};
use crate::error::EngineError;
use crate::expectation::{ExpectedElement, Expectation, ExpectationTracker};
use crate::frame::{Frame, Frames};
use rdpeg_core::grammar::{Element, ElementKind, Grammar, Rule};
use rdpeg_core::{Cursor, Position, Symbol, Value};

/// The result of a failed top-level parse: the farthest offset reached and
/// every expectation recorded there.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    pub farthest: Position,
    pub expected: Vec<Expectation>,
}

/// Parse `input` against `start`, using the reference (brute-force)
/// memoization strategy.
pub fn parse<V: Value>(
    grammar: &Grammar<V>,
    start: Symbol,
    input: &str,
    tab_width: u32,
) -> Result<V, EngineError> {
    let cache = BruteForceCache::with_capacity(input.len());
    parse_with_cache(grammar, start, input, tab_width, cache)
}

/// Parse `input` against `start`, using a caller-supplied memoization
/// strategy (e.g. to bound memory, or to inspect cache statistics).
pub fn parse_with_cache<V: Value, C: Cache<V>>(
    grammar: &Grammar<V>,
    start: Symbol,
    input: &str,
    tab_width: u32,
    cache: C,
) -> Result<V, EngineError> {
    if !grammar.contains(start) {
        return Err(EngineError::UnknownStartNonTerminal(start));
    }

    let mut parser = Parser {
        grammar,
        cursor: Cursor::new(input, tab_width),
        cache,
        expectations: ExpectationTracker::new(),
        frames: Frames::root(),
    };

    match parser.parse_nt(start) {
        Some(value) if parser.cursor.at_end() => Ok(value),
        Some(_) => {
            parser.record_expectation(ExpectedElement::EndOfInput);
            Err(EngineError::NoMatch(parser.into_failure()))
        }
        None => Err(EngineError::NoMatch(parser.into_failure())),
    }
}

struct Parser<'g, V: Value, C: Cache<V>> {
    grammar: &'g Grammar<V>,
    cursor: Cursor<'g>,
    cache: C,
    expectations: ExpectationTracker,
    frames: Frames,
}

impl<'g, V: Value, C: Cache<V>> Parser<'g, V, C> {
    fn into_failure(self) -> ParseFailure {
        ParseFailure {
            farthest: self.expectations.farthest(),
            expected: self.expectations.expectations().to_vec(),
        }
    }

    fn record_expectation(&mut self, element: ExpectedElement) {
        let pos = self.cursor.save();
        self.expectations.record(pos, &self.frames, element);
    }

    // ---- §4.6.1 parse_nt -------------------------------------------------

    fn parse_nt(&mut self, nt: Symbol) -> Option<V> {
        let start = self.cursor.save();

        match self.cache.get_or_insert_unknown(start.offset, nt) {
            Outcome::Success { value, next } => {
                self.cursor.restore(next);
                return Some(value);
            }
            Outcome::Fail => return None,
            Outcome::Unknown => {
                // Force failure on indirect left recursion reached
                // transitively, before descending into this non-terminal's
                // rules.
                self.cache.set(start.offset, nt, Outcome::Fail);
            }
        }

        let saved_frames = self.frames.clone();
        self.frames = self.frames.push(Frame { nt, start });

        let def = self.grammar.non_terminal(nt);

        let mut current = None;
        for rule in &def.normal {
            self.cursor.restore(start);
            if let Some(v) = self.parse_rule(&rule.elements, V::empty(), rule) {
                current = Some(v);
                break;
            }
        }

        let Some(mut current) = current else {
            self.cursor.restore(start);
            self.frames = saved_frames;
            self.cache.set(start.offset, nt, Outcome::Fail);
            return None;
        };

        loop {
            let mut progressed = false;
            for rule in &def.recursive {
                let Some(seed) = self.apply_rec_start(rule, &current) else {
                    continue;
                };
                let before = self.cursor.save();
                if let Some(v) = self.parse_rule(&rule.elements, seed, rule) {
                    current = v;
                    progressed = true;
                    break;
                }
                self.cursor.restore(before);
            }
            if !progressed {
                break;
            }
        }

        let end = self.cursor.save();
        self.frames = saved_frames;
        self.cache.set(
            start.offset,
            nt,
            Outcome::Success {
                value: current.clone(),
                next: end,
            },
        );
        Some(current)
    }

    // ---- §4.6.2 parse_rule -------------------------------------------------

    fn parse_rule(&mut self, elements: &[Element<V>], acc: V, rule: &Rule<V>) -> Option<V> {
        let (acc, elements) = self.consume_greedy_prefix(elements, acc)?;
        self.parse_rule_tail(elements, acc, rule)
    }

    /// Step A: consume as many leading greedy elements as possible, never
    /// back-tracking into them.
    fn consume_greedy_prefix<'e>(
        &mut self,
        mut elements: &'e [Element<V>],
        mut acc: V,
    ) -> Option<(V, &'e [Element<V>])> {
        while let Some(e) = elements.first() {
            if !e.greedy {
                break;
            }

            if e.sequence {
                let save0 = self.cursor.save();
                let seed = self.apply_begin_seq(e, &acc);
                match self.parse_element(e, &seed) {
                    None => {
                        self.cursor.restore(save0);
                        if e.optional {
                            acc = self.apply_add_skip(e, &acc)?;
                        } else {
                            return None;
                        }
                    }
                    Some(mut seq_acc) => {
                        loop {
                            let save = self.cursor.save();
                            if let Some(chain) = &e.chain {
                                if self.parse_rule(&chain.elements, V::empty(), chain).is_none() {
                                    self.cursor.restore(save);
                                    break;
                                }
                            }
                            match self.parse_element(e, &seq_acc) {
                                Some(v) => seq_acc = v,
                                None => {
                                    self.cursor.restore(save);
                                    break;
                                }
                            }
                        }
                        acc = self.apply_add_seq(e, &acc, &seq_acc)?;
                    }
                }
            } else {
                // Degenerate case: mandatory, non-optional, non-sequence,
                // greedy element is equivalent to an ordinary mandatory
                // element — it must match, with no back-tracking ever
                // attempted into it.
                match self.parse_element(e, &acc) {
                    Some(v) => acc = v,
                    None => {
                        if e.optional {
                            acc = self.apply_add_skip(e, &acc)?;
                        } else {
                            return None;
                        }
                    }
                }
            }

            elements = &elements[1..];
        }
        Some((acc, elements))
    }

    /// Step B: back-tracking tail parse of the (now-reduced) element list.
    fn parse_rule_tail(&mut self, elements: &[Element<V>], acc: V, rule: &Rule<V>) -> Option<V> {
        let Some(e) = elements.first() else {
            return self.finish_rule(rule, acc);
        };
        let rest = &elements[1..];

        if e.optional && e.avoid {
            if let Some(skipped) = self.apply_add_skip(e, &acc) {
                if let Some(v) = self.parse_rule(rest, skipped, rule) {
                    return Some(v);
                }
            }
        }

        let save = self.cursor.save();

        if e.sequence {
            let seed = self.apply_begin_seq(e, &acc);
            if let Some(seq_acc) = self.parse_element(e, &seed) {
                if let Some(v) = self.parse_seq(e, rest, seq_acc, acc.clone(), rule) {
                    return Some(v);
                }
            }
            self.cursor.restore(save);
        } else if let Some(new_acc) = self.parse_element(e, &acc) {
            if let Some(v) = self.parse_rule(rest, new_acc, rule) {
                return Some(v);
            }
            self.cursor.restore(save);
        } else {
            self.cursor.restore(save);
        }

        if e.optional && !e.avoid {
            if let Some(skipped) = self.apply_add_skip(e, &acc) {
                if let Some(v) = self.parse_rule(rest, skipped, rule) {
                    return Some(v);
                }
            }
        }

        None
    }

    // ---- §4.6.3 parse_seq -------------------------------------------------

    fn parse_seq(
        &mut self,
        e: &Element<V>,
        rest: &[Element<V>],
        seq_acc: V,
        prev: V,
        rule: &Rule<V>,
    ) -> Option<V> {
        if e.avoid {
            if let Some(folded) = self.apply_add_seq(e, &prev, &seq_acc) {
                if let Some(v) = self.parse_rule(rest, folded, rule) {
                    return Some(v);
                }
            }
        }

        let save = self.cursor.save();

        let mut grew_acc = None;
        if let Some(chain) = &e.chain {
            if self.parse_rule(&chain.elements, V::empty(), chain).is_some() {
                grew_acc = self.parse_element(e, &seq_acc);
            }
        } else {
            grew_acc = self.parse_element(e, &seq_acc);
        }

        if let Some(grown) = grew_acc {
            if let Some(v) = self.parse_seq(e, rest, grown, prev.clone(), rule) {
                return Some(v);
            }
        }

        self.cursor.restore(save);

        if !e.avoid {
            if let Some(folded) = self.apply_add_seq(e, &prev, &seq_acc) {
                if let Some(v) = self.parse_rule(rest, folded, rule) {
                    return Some(v);
                }
            }
        }

        None
    }

    // ---- §4.6.4 parse_element ----------------------------------------------

    /// Parse one occurrence of `e`, folding the matched value (or consumed
    /// byte) onto `prev` via the appropriate hook, and returning the new
    /// accumulator. `prev` is the rule's accumulator, or the seq-accumulator
    /// when `e` is being parsed as part of a sequence.
    fn parse_element(&mut self, e: &Element<V>, prev: &V) -> Option<V> {
        let start = self.cursor.save();

        let mut out = match &e.kind {
            ElementKind::NonTerminal(nt) => {
                let Some(v) = self.parse_nt(*nt) else {
                    self.cursor.restore(start);
                    return None;
                };
                if let Some(cond) = &e.condition {
                    if !cond(&v, e.condition_arg.as_ref()) {
                        self.cursor.restore(start);
                        return None;
                    }
                }
                match self.apply_add(e, prev, &v) {
                    Some(acc) => acc,
                    None => {
                        self.cursor.restore(start);
                        return None;
                    }
                }
            }
            ElementKind::Grouping(rules) => {
                let mut matched = None;
                for inner in rules {
                    self.cursor.restore(start);
                    if let Some(v) = self.parse_rule(&inner.elements, V::empty(), inner) {
                        matched = Some(v);
                        break;
                    }
                }
                let Some(v) = matched else {
                    self.cursor.restore(start);
                    return None;
                };
                match self.apply_add(e, prev, &v) {
                    Some(acc) => acc,
                    None => {
                        self.cursor.restore(start);
                        return None;
                    }
                }
            }
            ElementKind::EndOfInput => {
                if self.cursor.at_end() {
                    prev.clone()
                } else {
                    self.record_expectation(ExpectedElement::EndOfInput);
                    return None;
                }
            }
            ElementKind::CharacterLiteral(byte) => match self.cursor.current_byte() {
                Some(b) if b == *byte => {
                    self.cursor.advance();
                    self.apply_add_char(e, prev, b)
                }
                _ => {
                    self.record_expectation(ExpectedElement::Char(*byte));
                    return None;
                }
            },
            ElementKind::CharacterSet(set) => match self.cursor.current_byte() {
                Some(b) if set.contains(b) => {
                    self.cursor.advance();
                    self.apply_add_char(e, prev, b)
                }
                _ => {
                    self.record_expectation(ExpectedElement::CharSet(*set));
                    return None;
                }
            },
            ElementKind::UserTerminal(scan) => match scan(self.cursor.remaining()) {
                Some((consumed, v)) if consumed > 0 => {
                    for _ in 0..consumed {
                        self.cursor.advance();
                    }
                    match self.apply_add(e, prev, &v) {
                        Some(acc) => acc,
                        None => {
                            self.cursor.restore(start);
                            return None;
                        }
                    }
                }
                _ => {
                    self.record_expectation(ExpectedElement::UserTerminal);
                    return None;
                }
            },
        };

        if let Some(setp) = &e.set_pos {
            setp(&mut out, start);
        }
        Some(out)
    }

    // ---- hook application helpers, with the documented defaults -----------

    fn apply_add(&self, e: &Element<V>, prev: &V, result: &V) -> Option<V> {
        match &e.add {
            Some(h) => h(prev, result),
            None => Some(prev.clone()),
        }
    }

    fn apply_add_char(&self, e: &Element<V>, prev: &V, byte: u8) -> V {
        match &e.add_char {
            Some(h) => h(prev, byte),
            None => prev.clone(),
        }
    }

    fn apply_add_skip(&self, e: &Element<V>, prev: &V) -> Option<V> {
        match &e.add_skip {
            Some(h) => h(prev),
            None => match &e.add {
                Some(h) => h(prev, &V::empty()),
                None => Some(prev.clone()),
            },
        }
    }

    fn apply_begin_seq(&self, e: &Element<V>, prev: &V) -> V {
        match &e.begin_seq {
            Some(h) => h(prev),
            None => V::empty(),
        }
    }

    fn apply_add_seq(&self, e: &Element<V>, prev: &V, seq_acc: &V) -> Option<V> {
        match &e.add_seq {
            Some(h) => h(prev, seq_acc),
            None => Some(prev.clone()),
        }
    }

    fn finish_rule(&self, rule: &Rule<V>, acc: V) -> Option<V> {
        match &rule.end_function {
            Some(h) => h(&acc, rule.end_payload.as_ref()),
            None => Some(acc),
        }
    }

    fn apply_rec_start(&self, rule: &Rule<V>, prefix: &V) -> Option<V> {
        match &rule.rec_start_function {
            Some(h) => h(prefix),
            None => Some(V::empty()),
        }
    }
}
