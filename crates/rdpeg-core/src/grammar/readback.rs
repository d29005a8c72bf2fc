//! Informal grammar readback form (spec.md §6), for documentation/debugging.

use super::builder::Grammar;
use super::types::{Element, ElementKind, Rule};
use crate::charset::CharSet;
use crate::value::Value;

fn fmt_byte(b: u8) -> String {
    match b {
        b'\n' => "\\n".into(),
        b'\t' => "\\t".into(),
        b'\r' => "\\r".into(),
        0x20..=0x7e => (b as char).to_string(),
        _ => format!("\\x{b:02x}"),
    }
}

/// Render a character set as bracketed, range-collapsed byte literals.
pub fn render_charset(set: &CharSet) -> String {
    let mut out = String::from("[");
    let mut b: u32 = 0;
    while b <= 255 {
        if set.contains(b as u8) {
            let start = b;
            while b <= 255 && set.contains(b as u8) {
                b += 1;
            }
            let end = b - 1;
            if end > start {
                out.push_str(&fmt_byte(start as u8));
                out.push('-');
                out.push_str(&fmt_byte(end as u8));
            } else {
                out.push_str(&fmt_byte(start as u8));
            }
        } else {
            b += 1;
        }
    }
    out.push(']');
    out
}

/// Render a single element using spec.md §6's literal vocabulary.
pub fn render_element<V: Value>(grammar: &Grammar<V>, e: &Element<V>) -> String {
    let mut token = match &e.kind {
        ElementKind::NonTerminal(s) => grammar.name_of(*s).to_string(),
        ElementKind::Grouping(rules) => {
            let parts: Vec<_> = rules.iter().map(|r| render_rule(grammar, r)).collect();
            format!("({})", parts.join(" | "))
        }
        ElementKind::CharacterLiteral(b) => format!("'{}'", fmt_byte(*b)),
        ElementKind::CharacterSet(set) => render_charset(set),
        ElementKind::EndOfInput => "<eof>".to_string(),
        ElementKind::UserTerminal(_) => "<term>".to_string(),
    };

    let mut mods = Vec::new();
    if e.sequence {
        mods.push(if e.greedy {
            "SEQ".to_string()
        } else {
            "SEQ BACK_TRACKING".to_string()
        });
    }
    if e.optional {
        mods.push("OPT".to_string());
    }
    if e.avoid {
        mods.push("AVOID".to_string());
    }
    if let Some(chain) = &e.chain {
        mods.push(format!("CHAIN({})", render_rule(grammar, chain)));
    }

    if !mods.is_empty() {
        token.push(' ');
        token.push_str(&mods.join(" "));
    }
    token
}

/// Render an entire rule's element chain, space-separated.
pub fn render_rule<V: Value>(grammar: &Grammar<V>, rule: &Rule<V>) -> String {
    rule.elements
        .iter()
        .map(|e| render_element(grammar, e))
        .collect::<Vec<_>>()
        .join(" ")
}
