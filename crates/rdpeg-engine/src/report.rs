//! Renders a [`ParseFailure`] against its source text (spec.md §7).
//!
//! A failure report names the farthest position reached and every
//! expectation recorded there, grouped by which non-terminal was active
//! when that expectation failed.

use crate::engine::ParseFailure;
use crate::expectation::ExpectedElement;
use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use rdpeg_core::grammar::Grammar;
use rdpeg_core::{Symbol, Value};
use std::fmt::Write;

/// Builder for rendering a [`ParseFailure`] as human-readable text.
pub struct FailureReport<'f, 'g, 's, V: Value> {
    failure: &'f ParseFailure,
    grammar: &'g Grammar<V>,
    source: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'f, 'g, 's, V: Value> FailureReport<'f, 'g, 's, V> {
    pub fn new(failure: &'f ParseFailure, grammar: &'g Grammar<V>, source: &'s str) -> Self {
        Self {
            failure,
            grammar,
            source,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let offset = self.failure.farthest.offset;
        let span = offset..(offset + 1).min(self.source.len().max(offset + 1));
        let label = self.expectation_label();

        let mut snippet = Snippet::source(self.source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(span).label(&label));
        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let title = format!(
            "parse failed at line {}, column {}",
            self.failure.farthest.line, self.failure.farthest.column
        );
        let report = vec![Level::ERROR.primary_title(&title).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }

    fn expectation_label(&self) -> String {
        if self.failure.expected.is_empty() {
            return "parse failed here".to_owned();
        }

        let mut parts = Vec::new();
        for exp in &self.failure.expected {
            let path = self.frame_path(&exp.frames);
            let want = describe(&exp.element);
            if path.is_empty() {
                parts.push(format!("expected {want}"));
            } else {
                parts.push(format!("expected {want} (in {path})"));
            }
        }
        parts.join("; ")
    }

    fn frame_path(&self, frames: &[Symbol]) -> String {
        frames
            .iter()
            .rev()
            .map(|s| self.grammar.name_of(*s))
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

fn describe(element: &ExpectedElement) -> String {
    match element {
        ExpectedElement::Char(b) => format!("'{}'", render_byte(*b)),
        ExpectedElement::CharSet(_) => "one of a set of characters".to_owned(),
        ExpectedElement::EndOfInput => "end of input".to_owned(),
        ExpectedElement::UserTerminal => "a terminal".to_owned(),
    }
}

fn render_byte(b: u8) -> String {
    match b {
        b'\n' => "\\n".to_owned(),
        b'\t' => "\\t".to_owned(),
        b'\r' => "\\r".to_owned(),
        0x20..=0x7e => (b as char).to_string(),
        _ => format!("\\x{b:02x}"),
    }
}
