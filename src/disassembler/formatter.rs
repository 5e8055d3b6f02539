//! Formatting functions for disassembled instructions

use std::fmt::Write as _;

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;

/// Header of [`format_listing`] output.
pub const LISTING_HEADER: &str = "Address  Hexdump   Dissassembly";

/// Format a single instruction as assembly text
///
/// Branch targets are printed as absolute addresses. Hex digits are lowercase
/// to match the memory dump.
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// Format the operand based on addressing mode
fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    if instr.is_data() {
        return format!("${:02x}", instr.opcode);
    }

    let Some(value) = instr.operand_value() else {
        return match instr.addressing_mode {
            Accumulator => "A".to_string(),
            _ => String::new(),
        };
    };

    match instr.addressing_mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${:02x}", value),
        ZeroPage => format!("${:02x}", value),
        ZeroPageX => format!("${:02x},X", value),
        ZeroPageY => format!("${:02x},Y", value),
        Relative => match instr.branch_target() {
            Some(target) => format!("${:04x}", target),
            None => String::new(),
        },
        Absolute => format!("${:04x}", value),
        AbsoluteX => format!("${:04x},X", value),
        AbsoluteY => format!("${:04x},Y", value),
        Indirect => format!("(${:04x})", value),
        IndirectX => format!("(${:02x},X)", value),
        IndirectY => format!("(${:02x}),Y", value),
    }
}

/// Format instructions as a three-column listing: address, raw bytes, text.
///
/// ```text
/// Address  Hexdump   Dissassembly
/// -------------------------------
/// $0600    a9 01     LDA #$01
/// ```
pub fn format_listing(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    out.push_str(LISTING_HEADER);
    out.push('\n');
    out.push_str(&"-".repeat(LISTING_HEADER.len()));
    out.push('\n');

    for instr in instructions {
        let hex: Vec<String> = instr.bytes().iter().map(|b| format!("{:02x}", b)).collect();
        let _ = writeln!(
            out,
            "${:04x}    {:<10}{}",
            instr.address,
            hex.join(" "),
            format_instruction(instr)
        );
    }

    out
}
