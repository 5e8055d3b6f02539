//! 6502 Disassembler Module
//!
//! Converts machine code back into assembly text, using the same decode table
//! the simulator executes from.

pub mod decoder;
pub mod formatter;

use crate::addressing::AddressingMode;

/// Mnemonic used for bytes that do not decode to an instruction.
pub const DATA_MNEMONIC: &str = "DCB";

/// A single disassembled instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "STA", "JMP"), or `DCB` for data
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,
}

impl Instruction {
    /// A single byte that did not decode.
    pub fn data(address: u16, byte: u8) -> Self {
        Self {
            address,
            opcode: byte,
            mnemonic: DATA_MNEMONIC,
            addressing_mode: AddressingMode::Implicit,
            operand_bytes: Vec::new(),
            size_bytes: 1,
        }
    }

    pub fn is_data(&self) -> bool {
        self.mnemonic == DATA_MNEMONIC
    }

    /// Opcode followed by operand bytes, as stored in memory.
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size_bytes as usize);
        bytes.push(self.opcode);
        bytes.extend_from_slice(&self.operand_bytes);
        bytes
    }

    /// Operand as a 16-bit value (little-endian when two bytes are present).
    pub fn operand_value(&self) -> Option<u16> {
        match self.operand_bytes.as_slice() {
            [lo] => Some(*lo as u16),
            [lo, hi] => Some(u16::from_le_bytes([*lo, *hi])),
            _ => None,
        }
    }

    /// Absolute branch target for relative instructions.
    pub fn branch_target(&self) -> Option<u16> {
        if self.addressing_mode != AddressingMode::Relative {
            return None;
        }
        let offset = *self.operand_bytes.first()? as i8;
        Some(self.address.wrapping_add(2).wrapping_add(offset as u16))
    }
}

/// Disassemble a byte slice into a vector of instructions
///
/// Bytes that are not a documented opcode, and instructions cut short by the
/// end of the slice, come out as one `DCB` entry per byte.
///
/// # Arguments
///
/// * `bytes` - The machine code to disassemble
/// * `start_address` - Address of `bytes[0]`
///
/// # Examples
///
/// ```
/// use edu6502::disassembler::{disassemble, formatter::format_instruction};
///
/// let listing = disassemble(&[0xA9, 0x01, 0x02], 0x0600);
/// assert_eq!(format_instruction(&listing[0]), "LDA #$01");
/// assert_eq!(format_instruction(&listing[1]), "DCB $02");
/// ```
pub fn disassemble(bytes: &[u8], start_address: u16) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pc = 0;
    let mut address = start_address;

    while pc < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[pc..], address)
            .unwrap_or_else(|| Instruction::data(address, bytes[pc]));
        pc += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}
