//! # Opcode Tables
//!
//! The single source of truth for 6502 instruction encodings.
//!
//! - [`INSTRUCTION_SET`] is the assembler's view: 56 mnemonics by 12
//!   addressing columns, each cell holding the opcode byte or `None` when the
//!   instruction has no encoding in that column.
//! - [`OPCODE_TABLE`] is the simulator's and disassembler's view: a dense
//!   256-entry table indexed by opcode byte. It is derived from
//!   [`INSTRUCTION_SET`] by a `const fn`, so the two can never disagree, and the
//!   derivation fails to compile if two cells claim the same byte or the number
//!   of documented opcodes is not 151.
//!
//! The vendor pseudo-op `0x42` is deliberately absent from both tables; the
//! simulator handles it before consulting [`OPCODE_TABLE`].

use crate::addressing::AddressingMode;
use std::fmt;
use std::str::FromStr;

/// The 56 documented NMOS 6502 mnemonics.
///
/// Variant order matches the row order of [`INSTRUCTION_SET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bit,
    Bpl,
    Bmi,
    Bvc,
    Bvs,
    Bcc,
    Bcs,
    Bne,
    Beq,
    Brk,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Eor,
    Clc,
    Sec,
    Cli,
    Sei,
    Clv,
    Cld,
    Sed,
    Inc,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Tax,
    Txa,
    Dex,
    Inx,
    Tay,
    Tya,
    Dey,
    Iny,
    Ror,
    Rol,
    Rti,
    Rts,
    Sbc,
    Sta,
    Txs,
    Tsx,
    Pha,
    Pla,
    Php,
    Plp,
    Stx,
    Sty,
}

impl Mnemonic {
    /// Upper-case three-letter name as written in assembly source.
    pub const fn as_str(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bit => "BIT",
            Bpl => "BPL",
            Bmi => "BMI",
            Bvc => "BVC",
            Bvs => "BVS",
            Bcc => "BCC",
            Bcs => "BCS",
            Bne => "BNE",
            Beq => "BEQ",
            Brk => "BRK",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Eor => "EOR",
            Clc => "CLC",
            Sec => "SEC",
            Cli => "CLI",
            Sei => "SEI",
            Clv => "CLV",
            Cld => "CLD",
            Sed => "SED",
            Inc => "INC",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Tax => "TAX",
            Txa => "TXA",
            Dex => "DEX",
            Inx => "INX",
            Tay => "TAY",
            Tya => "TYA",
            Dey => "DEY",
            Iny => "INY",
            Ror => "ROR",
            Rol => "ROL",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sta => "STA",
            Txs => "TXS",
            Tsx => "TSX",
            Pha => "PHA",
            Pla => "PLA",
            Php => "PHP",
            Plp => "PLP",
            Stx => "STX",
            Sty => "STY",
        }
    }

    /// Shift and rotate instructions whose single-byte form works on `A`.
    pub const fn has_accumulator_form(self) -> bool {
        matches!(
            self,
            Mnemonic::Asl | Mnemonic::Lsr | Mnemonic::Rol | Mnemonic::Ror
        )
    }

    /// The encode-table row for this mnemonic.
    pub fn row(self) -> &'static InstructionRow {
        &INSTRUCTION_SET[self as usize]
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text is not one of the 56 mnemonics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mnemonic '{0}'")]
pub struct UnknownMnemonic(pub String);

impl FromStr for Mnemonic {
    type Err = UnknownMnemonic;

    /// Case-insensitive lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        INSTRUCTION_SET
            .iter()
            .map(|row| row.mnemonic)
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMnemonic(s.to_string()))
    }
}

/// The assembler's addressing columns, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    /// Implied or accumulator (one-byte) form.
    Single,
    /// Relative branch.
    Branch,
}

impl Column {
    /// All columns in table order.
    pub const ALL: [Column; 12] = [
        Column::Immediate,
        Column::ZeroPage,
        Column::ZeroPageX,
        Column::ZeroPageY,
        Column::Absolute,
        Column::AbsoluteX,
        Column::AbsoluteY,
        Column::Indirect,
        Column::IndirectX,
        Column::IndirectY,
        Column::Single,
        Column::Branch,
    ];

    /// Order in which the assembler tries to match an operand. Zero-page
    /// forms come before absolute ones so a short operand is never widened.
    pub const ENCODING_ORDER: [Column; 12] = [
        Column::Single,
        Column::Immediate,
        Column::ZeroPage,
        Column::ZeroPageX,
        Column::ZeroPageY,
        Column::AbsoluteX,
        Column::AbsoluteY,
        Column::Indirect,
        Column::IndirectX,
        Column::IndirectY,
        Column::Absolute,
        Column::Branch,
    ];

    /// Addressing mode this column decodes to for the given mnemonic.
    pub const fn addressing_mode(self, mnemonic: Mnemonic) -> AddressingMode {
        match self {
            Column::Immediate => AddressingMode::Immediate,
            Column::ZeroPage => AddressingMode::ZeroPage,
            Column::ZeroPageX => AddressingMode::ZeroPageX,
            Column::ZeroPageY => AddressingMode::ZeroPageY,
            Column::Absolute => AddressingMode::Absolute,
            Column::AbsoluteX => AddressingMode::AbsoluteX,
            Column::AbsoluteY => AddressingMode::AbsoluteY,
            Column::Indirect => AddressingMode::Indirect,
            Column::IndirectX => AddressingMode::IndirectX,
            Column::IndirectY => AddressingMode::IndirectY,
            Column::Single => {
                if mnemonic.has_accumulator_form() {
                    AddressingMode::Accumulator
                } else {
                    AddressingMode::Implicit
                }
            }
            Column::Branch => AddressingMode::Relative,
        }
    }
}

/// One mnemonic's encodings across the 12 addressing columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionRow {
    pub mnemonic: Mnemonic,
    /// Opcode per column, indexed in [`Column::ALL`] order.
    pub opcodes: [Option<u8>; 12],
}

impl InstructionRow {
    /// Opcode byte for `column`, if the instruction supports it.
    pub fn opcode(&self, column: Column) -> Option<u8> {
        self.opcodes[column as usize]
    }

    /// Iterates the supported `(column, opcode)` pairs.
    pub fn encodings(&self) -> impl Iterator<Item = (Column, u8)> + '_ {
        Column::ALL
            .iter()
            .zip(self.opcodes.iter())
            .filter_map(|(column, code)| code.map(|code| (*column, code)))
    }
}

macro_rules! op {
    (_) => {
        None
    };
    ($code:literal) => {
        Some($code)
    };
}

macro_rules! row {
    ($mnemonic:ident, [$($code:tt),* $(,)?]) => {
        InstructionRow {
            mnemonic: Mnemonic::$mnemonic,
            opcodes: [$(op!($code)),*],
        }
    };
}

/// Encode table: rows in [`Mnemonic`] order, columns in [`Column::ALL`] order.
///
/// ```text
///        Imm   ZP    ZPX   ZPY   ABS   ABSX  ABSY  IND   INDX  INDY  SNGL  BRA
/// ```
#[rustfmt::skip]
pub const INSTRUCTION_SET: [InstructionRow; 56] = [
    row!(Adc, [0x69, 0x65, 0x75, _,    0x6D, 0x7D, 0x79, _,    0x61, 0x71, _,    _   ]),
    row!(And, [0x29, 0x25, 0x35, _,    0x2D, 0x3D, 0x39, _,    0x21, 0x31, _,    _   ]),
    row!(Asl, [_,    0x06, 0x16, _,    0x0E, 0x1E, _,    _,    _,    _,    0x0A, _   ]),
    row!(Bit, [_,    0x24, _,    _,    0x2C, _,    _,    _,    _,    _,    _,    _   ]),
    row!(Bpl, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x10]),
    row!(Bmi, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x30]),
    row!(Bvc, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x50]),
    row!(Bvs, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x70]),
    row!(Bcc, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x90]),
    row!(Bcs, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xB0]),
    row!(Bne, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xD0]),
    row!(Beq, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xF0]),
    row!(Brk, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x00, _   ]),
    row!(Cmp, [0xC9, 0xC5, 0xD5, _,    0xCD, 0xDD, 0xD9, _,    0xC1, 0xD1, _,    _   ]),
    row!(Cpx, [0xE0, 0xE4, _,    _,    0xEC, _,    _,    _,    _,    _,    _,    _   ]),
    row!(Cpy, [0xC0, 0xC4, _,    _,    0xCC, _,    _,    _,    _,    _,    _,    _   ]),
    row!(Dec, [_,    0xC6, 0xD6, _,    0xCE, 0xDE, _,    _,    _,    _,    _,    _   ]),
    row!(Eor, [0x49, 0x45, 0x55, _,    0x4D, 0x5D, 0x59, _,    0x41, 0x51, _,    _   ]),
    row!(Clc, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x18, _   ]),
    row!(Sec, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x38, _   ]),
    row!(Cli, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x58, _   ]),
    row!(Sei, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x78, _   ]),
    row!(Clv, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xB8, _   ]),
    row!(Cld, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xD8, _   ]),
    row!(Sed, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xF8, _   ]),
    row!(Inc, [_,    0xE6, 0xF6, _,    0xEE, 0xFE, _,    _,    _,    _,    _,    _   ]),
    row!(Jmp, [_,    _,    _,    _,    0x4C, _,    _,    0x6C, _,    _,    _,    _   ]),
    row!(Jsr, [_,    _,    _,    _,    0x20, _,    _,    _,    _,    _,    _,    _   ]),
    row!(Lda, [0xA9, 0xA5, 0xB5, _,    0xAD, 0xBD, 0xB9, _,    0xA1, 0xB1, _,    _   ]),
    row!(Ldx, [0xA2, 0xA6, _,    0xB6, 0xAE, _,    0xBE, _,    _,    _,    _,    _   ]),
    row!(Ldy, [0xA0, 0xA4, 0xB4, _,    0xAC, 0xBC, _,    _,    _,    _,    _,    _   ]),
    row!(Lsr, [_,    0x46, 0x56, _,    0x4E, 0x5E, _,    _,    _,    _,    0x4A, _   ]),
    row!(Nop, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xEA, _   ]),
    row!(Ora, [0x09, 0x05, 0x15, _,    0x0D, 0x1D, 0x19, _,    0x01, 0x11, _,    _   ]),
    row!(Tax, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xAA, _   ]),
    row!(Txa, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x8A, _   ]),
    row!(Dex, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xCA, _   ]),
    row!(Inx, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xE8, _   ]),
    row!(Tay, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xA8, _   ]),
    row!(Tya, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x98, _   ]),
    row!(Dey, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x88, _   ]),
    row!(Iny, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xC8, _   ]),
    row!(Ror, [_,    0x66, 0x76, _,    0x6E, 0x7E, _,    _,    _,    _,    0x6A, _   ]),
    row!(Rol, [_,    0x26, 0x36, _,    0x2E, 0x3E, _,    _,    _,    _,    0x2A, _   ]),
    row!(Rti, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x40, _   ]),
    row!(Rts, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x60, _   ]),
    row!(Sbc, [0xE9, 0xE5, 0xF5, _,    0xED, 0xFD, 0xF9, _,    0xE1, 0xF1, _,    _   ]),
    row!(Sta, [_,    0x85, 0x95, _,    0x8D, 0x9D, 0x99, _,    0x81, 0x91, _,    _   ]),
    row!(Txs, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x9A, _   ]),
    row!(Tsx, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0xBA, _   ]),
    row!(Pha, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x48, _   ]),
    row!(Pla, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x68, _   ]),
    row!(Php, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x08, _   ]),
    row!(Plp, [_,    _,    _,    _,    _,    _,    _,    _,    _,    _,    0x28, _   ]),
    row!(Stx, [_,    0x86, _,    0x96, 0x8E, _,    _,    _,    _,    _,    _,    _   ]),
    row!(Sty, [_,    0x84, 0x94, _,    0x8C, _,    _,    _,    _,    _,    _,    _   ]),
];

/// Decoded metadata for a single opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,

    /// How the instruction interprets its operand bytes.
    pub addressing_mode: AddressingMode,
}

impl OpcodeMetadata {
    /// Total instruction size in bytes (opcode + operands).
    pub const fn size_bytes(&self) -> u8 {
        self.addressing_mode.size_bytes()
    }
}

/// Number of documented NMOS 6502 opcodes.
pub const DOCUMENTED_OPCODES: usize = 151;

/// Opcode byte of the emulator-only character output pseudo-op (`WDM` on
/// the 65C816, a no-op on a real 6502).
pub const PSEUDO_OP: u8 = 0x42;

const fn build_opcode_table() -> [Option<OpcodeMetadata>; 256] {
    let mut table: [Option<OpcodeMetadata>; 256] = [None; 256];
    let mut count = 0;
    let mut r = 0;
    while r < INSTRUCTION_SET.len() {
        let row = &INSTRUCTION_SET[r];
        assert!(row.mnemonic as usize == r, "INSTRUCTION_SET rows out of order");
        let mut c = 0;
        while c < Column::ALL.len() {
            if let Some(code) = row.opcodes[c] {
                assert!(table[code as usize].is_none(), "opcode claimed twice");
                table[code as usize] = Some(OpcodeMetadata {
                    mnemonic: row.mnemonic,
                    addressing_mode: Column::ALL[c].addressing_mode(row.mnemonic),
                });
                count += 1;
            }
            c += 1;
        }
        r += 1;
    }
    assert!(count == DOCUMENTED_OPCODES, "wrong number of documented opcodes");
    assert!(table[PSEUDO_OP as usize].is_none(), "pseudo-op collides with a real opcode");
    table
}

/// Dense decode table indexed by opcode byte; `None` marks bytes that are
/// not documented 6502 instructions.
pub const OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_opcode_table();

/// Looks up the metadata for an opcode byte.
pub fn decode(opcode: u8) -> Option<OpcodeMetadata> {
    OPCODE_TABLE[opcode as usize]
}
