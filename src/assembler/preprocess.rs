//! Source preprocessing: comment stripping and `define` substitution.

use std::collections::HashMap;

use crate::assembler::parser::is_identifier;

/// Constants collected from `define NAME VALUE` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Symbols {
    values: HashMap<String, String>,
}

impl Symbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a define. The first definition of a name wins; returns false
    /// when `name` was already defined.
    pub fn define(&mut self, name: &str, value: &str) -> bool {
        if self.values.contains_key(name) {
            return false;
        }
        self.values.insert(name.to_string(), value.to_string());
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Output of [`preprocess`]: one entry per source line, so indices still map
/// to 1-based line numbers.
#[derive(Debug, Clone, Default)]
pub struct Preprocessed {
    pub lines: Vec<String>,
    pub symbols: Symbols,
}

/// Strips comments and surrounding whitespace, collects defines and
/// substitutes them into operands.
///
/// # Examples
///
/// ```
/// use edu6502::assembler::preprocess::preprocess;
///
/// let out = preprocess("define color $05 ; red\n  lda #color\n  sta $0200,x");
/// assert_eq!(out.lines, vec!["", "lda #$05", "sta $0200,x"]);
/// assert_eq!(out.symbols.lookup("color"), Some("$05"));
/// ```
pub fn preprocess(source: &str) -> Preprocessed {
    let mut symbols = Symbols::new();

    let stripped: Vec<String> = source
        .lines()
        .map(|line| {
            let code = line.split(';').next().unwrap_or_default().trim();
            match parse_define(code) {
                Some((name, value)) => {
                    if !symbols.define(name, value) {
                        log::debug!("define {} ignored, already defined", name);
                    }
                    String::new()
                }
                None => code.to_string(),
            }
        })
        .collect();

    let lines = stripped
        .iter()
        .map(|line| substitute_line(line, &symbols))
        .collect();

    Preprocessed { lines, symbols }
}

/// Matches `define NAME VALUE` with a case-insensitive keyword.
fn parse_define(line: &str) -> Option<(&str, &str)> {
    let keyword_end = line.find(char::is_whitespace)?;
    if !line[..keyword_end].eq_ignore_ascii_case("define") {
        return None;
    }
    let rest = line[keyword_end..].trim_start();
    let name_end = rest.find(char::is_whitespace)?;
    let name = &rest[..name_end];
    let value = rest[name_end..].trim();
    if is_identifier(name) && !value.is_empty() {
        Some((name, value))
    } else {
        None
    }
}

/// Substitutes defines in the operand part of `line`, leaving the label and
/// the command word alone.
fn substitute_line(line: &str, symbols: &Symbols) -> String {
    if symbols.is_empty() {
        return line.to_string();
    }

    let mut head_end = 0;
    if let Some(colon) = line.find(':') {
        if is_identifier(&line[..colon]) {
            head_end = colon + 1;
        }
    }
    let after_label = &line[head_end..];
    let command_start = head_end + (after_label.len() - after_label.trim_start().len());
    let command_len = line[command_start..]
        .find(char::is_whitespace)
        .unwrap_or(line.len() - command_start);
    let operand_start = command_start + command_len;

    let mut out = String::with_capacity(line.len());
    out.push_str(&line[..operand_start]);
    out.push_str(&substitute_operand(&line[operand_start..], symbols));
    out
}

fn substitute_operand(operand: &str, symbols: &Symbols) -> String {
    // A bare `A` is the accumulator
    if operand.trim().eq_ignore_ascii_case("a") {
        return operand.to_string();
    }

    let mut out = String::with_capacity(operand.len());
    let mut prev: Option<char> = None;
    let mut prev_significant: Option<char> = None;
    let mut rest = operand;

    while let Some(c) = rest.chars().next() {
        if c.is_ascii_alphanumeric() || c == '_' {
            let len = rest
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
                .unwrap_or(rest.len());
            let token = &rest[..len];
            let is_literal = c.is_ascii_digit() || matches!(prev, Some('$') | Some('%'));
            let is_index = prev_significant == Some(',')
                && (token.eq_ignore_ascii_case("x") || token.eq_ignore_ascii_case("y"));

            match symbols.lookup(token) {
                Some(value) if !is_literal && !is_index => out.push_str(value),
                _ => out.push_str(token),
            }
            prev = token.chars().last();
            prev_significant = prev;
            rest = &rest[len..];
        } else {
            out.push(c);
            prev = Some(c);
            if !c.is_whitespace() {
                prev_significant = Some(c);
            }
            rest = &rest[c.len_utf8()..];
        }
    }

    out
}
