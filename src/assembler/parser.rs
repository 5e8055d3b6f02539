//! Assembly source parser
//!
//! Splits a preprocessed line into an optional label and a statement. Operand
//! text is kept as written (minus whitespace); the encoder decides which
//! addressing form it matches.

use crate::opcodes::Mnemonic;

/// Directive keyword for inline data bytes.
pub const DCB: &str = "DCB";

/// What a line asks the assembler to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Blank line, or a label on its own.
    Empty,

    /// `* = address`
    Origin(u16),

    /// `DCB v1, v2, ...`
    Data(Vec<u8>),

    /// A mnemonic and its operand with all whitespace removed.
    Instruction { mnemonic: Mnemonic, operand: String },
}

/// A parsed line of assembly source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyLine<'a> {
    /// Optional label definition (e.g., "start" from "start: LDA #1")
    pub label: Option<&'a str>,

    pub statement: Statement,
}

/// A numeric literal together with how it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    pub value: u16,

    /// Written narrowly enough to be a zero-page operand: 1-2 hex digits,
    /// 1-8 binary digits, or a decimal value up to 255.
    pub short: bool,
}

/// Returns true for `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Parses `$hex`, `%binary` or decimal, recording whether it is short.
pub fn parse_literal(s: &str) -> Option<Literal> {
    let (digits, radix, short_width) = if let Some(hex) = s.strip_prefix('$') {
        (hex, 16, 2)
    } else if let Some(bin) = s.strip_prefix('%') {
        (bin, 2, 8)
    } else {
        (s, 10, 0)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let value = u16::from_str_radix(digits, radix).ok()?;
    let short = if radix == 10 {
        value <= 0xFF
    } else {
        digits.len() <= short_width
    };

    Some(Literal { value, short })
}

/// Splits a leading `name:` off `line`.
fn split_label(line: &str) -> (Option<&str>, &str) {
    if let Some(colon) = line.find(':') {
        let name = &line[..colon];
        if is_identifier(name) {
            return (Some(name), line[colon + 1..].trim_start());
        }
    }
    (None, line)
}

/// Parses `* = $hex` or `* = decimal`.
fn parse_origin(rest: &str) -> Option<Result<u16, ()>> {
    let value = rest.strip_prefix('*')?.trim_start().strip_prefix('=')?.trim();
    Some(match value.strip_prefix('$') {
        Some(hex) if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            u16::from_str_radix(hex, 16).map_err(|_| ())
        }
        None if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) => {
            value.parse::<u16>().map_err(|_| ())
        }
        _ => Err(()),
    })
}

/// Parses the comma-separated byte list of a `DCB` directive.
///
/// Empty entries between commas are skipped; an empty list or any value
/// above 255 is rejected.
pub fn parse_data(operand: &str) -> Option<Vec<u8>> {
    let bytes = operand
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let literal = parse_literal(entry)?;
            u8::try_from(literal.value).ok()
        })
        .collect::<Option<Vec<u8>>>()?;

    if bytes.is_empty() {
        None
    } else {
        Some(bytes)
    }
}

/// Parses one preprocessed line. `None` means a syntax error.
///
/// # Examples
///
/// ```
/// use edu6502::assembler::parser::{parse_line, Statement};
/// use edu6502::opcodes::Mnemonic;
///
/// let line = parse_line("loop: sta $0200, x").unwrap();
/// assert_eq!(line.label, Some("loop"));
/// assert_eq!(
///     line.statement,
///     Statement::Instruction { mnemonic: Mnemonic::Sta, operand: "$0200,x".into() }
/// );
/// ```
pub fn parse_line(line: &str) -> Option<AssemblyLine<'_>> {
    let (label, rest) = split_label(line.trim());

    if rest.is_empty() {
        return Some(AssemblyLine {
            label,
            statement: Statement::Empty,
        });
    }

    if let Some(origin) = parse_origin(rest) {
        return Some(AssemblyLine {
            label,
            statement: Statement::Origin(origin.ok()?),
        });
    }

    // The operand may follow the command without a space: `LDA#$01`
    let command_end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let command = &rest[..command_end];
    let operand: String = rest[command_end..]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let statement = if command.eq_ignore_ascii_case(DCB) {
        Statement::Data(parse_data(&operand)?)
    } else {
        Statement::Instruction {
            mnemonic: command.parse().ok()?,
            operand,
        }
    };

    Some(AssemblyLine { label, statement })
}
