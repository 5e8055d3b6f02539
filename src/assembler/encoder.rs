//! Instruction encoder for the 6502 assembler
//!
//! Matches an operand against each addressing column a mnemonic supports, in
//! [`Column::ENCODING_ORDER`], and emits the bytes for the first match. The
//! label indexer and the assembler share this code so the indexer's program
//! counter advances exactly as the real pass will.

use crate::assembler::labels::Labels;
use crate::assembler::parser::{is_identifier, parse_literal, AssemblyLine, Statement};
use crate::opcodes::{Column, Mnemonic};

/// Address emitted for a label that is not known yet while indexing.
pub const UNRESOLVED_ADDRESS: u16 = 0xFFFF;

/// Which pass the encoder is serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Sizing only: unknown labels get filler values and branch distances are
    /// not checked.
    Index,
    /// Real pass: every label must resolve and branches must be in range.
    Emit,
}

/// Why a line failed to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    Syntax,
    BranchRange,
}

/// Effect of one encoded line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    Nothing,
    Origin(u16),
    Bytes(Vec<u8>),
}

/// Encodes a parsed line at `pc`.
pub fn encode_line(
    line: &AssemblyLine<'_>,
    pc: u16,
    labels: &Labels,
    pass: Pass,
) -> Result<Emission, LineError> {
    match &line.statement {
        Statement::Empty => Ok(Emission::Nothing),
        Statement::Origin(address) => Ok(Emission::Origin(*address)),
        Statement::Data(bytes) => Ok(Emission::Bytes(bytes.clone())),
        Statement::Instruction { mnemonic, operand } => {
            encode_instruction(*mnemonic, operand, pc, labels, pass).map(Emission::Bytes)
        }
    }
}

/// Encodes one instruction. `operand` must already have whitespace removed.
///
/// # Examples
///
/// ```
/// use edu6502::assembler::encoder::{encode_instruction, Pass};
/// use edu6502::assembler::labels::Labels;
/// use edu6502::opcodes::Mnemonic;
///
/// let labels = Labels::new();
/// let bytes = encode_instruction(Mnemonic::Lda, "$10,X", 0x0600, &labels, Pass::Emit).unwrap();
/// assert_eq!(bytes, vec![0xB5, 0x10]);
///
/// let bytes = encode_instruction(Mnemonic::Lda, "$0010,X", 0x0600, &labels, Pass::Emit).unwrap();
/// assert_eq!(bytes, vec![0xBD, 0x10, 0x00]);
/// ```
pub fn encode_instruction(
    mnemonic: Mnemonic,
    operand: &str,
    pc: u16,
    labels: &Labels,
    pass: Pass,
) -> Result<Vec<u8>, LineError> {
    let row = mnemonic.row();
    for column in Column::ENCODING_ORDER {
        let Some(opcode) = row.opcode(column) else {
            continue;
        };
        if let Some(bytes) = encode_column(column, opcode, operand, pc, labels, pass)? {
            return Ok(bytes);
        }
    }
    Err(LineError::Syntax)
}

fn encode_column(
    column: Column,
    opcode: u8,
    operand: &str,
    pc: u16,
    labels: &Labels,
    pass: Pass,
) -> Result<Option<Vec<u8>>, LineError> {
    let byte = |value: u8| vec![opcode, value];
    let word = |value: u16| {
        let [lo, hi] = value.to_le_bytes();
        vec![opcode, lo, hi]
    };

    let bytes = match column {
        Column::Single => {
            (operand.is_empty() || operand.eq_ignore_ascii_case("a")).then(|| vec![opcode])
        }
        Column::Immediate => immediate(operand, labels).map(byte),
        Column::ZeroPage => short(operand).map(byte),
        Column::ZeroPageX => indexed(operand, 'x').and_then(short).map(byte),
        Column::ZeroPageY => indexed(operand, 'y').and_then(short).map(byte),
        Column::AbsoluteX => indexed(operand, 'x')
            .and_then(|target| address(target, labels, pass))
            .map(word),
        Column::AbsoluteY => indexed(operand, 'y')
            .and_then(|target| address(target, labels, pass))
            .map(word),
        Column::Indirect => parenthesized(operand)
            .and_then(|target| address(target, labels, pass))
            .map(word),
        Column::IndirectX => parenthesized(operand)
            .and_then(|inner| indexed(inner, 'x'))
            .and_then(short)
            .map(byte),
        Column::IndirectY => indexed(operand, 'y')
            .and_then(parenthesized)
            .and_then(short)
            .map(byte),
        Column::Absolute => address(operand, labels, pass).map(word),
        Column::Branch => return branch(opcode, operand, pc, labels, pass),
    };

    Ok(bytes)
}

/// `#literal`, `#<label` or `#>label`.
fn immediate(operand: &str, labels: &Labels) -> Option<u8> {
    let value = operand.strip_prefix('#')?;

    if let Some(label) = value.strip_prefix('<') {
        return is_identifier(label).then(|| labels.get_pc(label).map_or(0x00, |a| a as u8));
    }
    if let Some(label) = value.strip_prefix('>') {
        return is_identifier(label)
            .then(|| labels.get_pc(label).map_or(0x00, |a| (a >> 8) as u8));
    }

    u8::try_from(parse_literal(value)?.value).ok()
}

/// A literal written in zero-page width.
fn short(operand: &str) -> Option<u8> {
    let literal = parse_literal(operand)?;
    if literal.short {
        u8::try_from(literal.value).ok()
    } else {
        None
    }
}

/// Any literal, or a label. Unknown labels resolve to
/// [`UNRESOLVED_ADDRESS`] while indexing and fail in the real pass.
fn address(operand: &str, labels: &Labels, pass: Pass) -> Option<u16> {
    if let Some(literal) = parse_literal(operand) {
        return Some(literal.value);
    }
    if !is_identifier(operand) {
        return None;
    }
    match (labels.get_pc(operand), pass) {
        (Some(address), _) => Some(address),
        (None, Pass::Index) => Some(UNRESOLVED_ADDRESS),
        (None, Pass::Emit) => None,
    }
}

/// Strips a case-insensitive `,X` / `,Y` suffix.
fn indexed(operand: &str, register: char) -> Option<&str> {
    let split = operand.len().checked_sub(2)?;
    let base = operand.get(..split)?;
    let mut chars = operand.get(split..)?.chars();
    match (chars.next(), chars.next()) {
        (Some(','), Some(r)) if r.eq_ignore_ascii_case(&register) => Some(base),
        _ => None,
    }
}

fn parenthesized(operand: &str) -> Option<&str> {
    operand.strip_prefix('(')?.strip_suffix(')')
}

/// Relative branch to a label or literal address. The offset is measured from
/// the instruction following the branch.
fn branch(
    opcode: u8,
    operand: &str,
    pc: u16,
    labels: &Labels,
    pass: Pass,
) -> Result<Option<Vec<u8>>, LineError> {
    let Some(target) = address(operand, labels, pass) else {
        return Ok(None);
    };
    if pass == Pass::Index {
        return Ok(Some(vec![opcode, 0x00]));
    }

    let distance = target as i32 - (pc as i32 + 2);
    if !(-128..=127).contains(&distance) {
        return Err(LineError::BranchRange);
    }

    Ok(Some(vec![opcode, distance as i8 as u8]))
}
