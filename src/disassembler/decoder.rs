//! Instruction decoder for the 6502 disassembler

use crate::disassembler::Instruction;
use crate::opcodes::decode;

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The memory address of this instruction
///
/// # Returns
///
/// `Some(Instruction)` for a documented opcode with all operand bytes present,
/// `None` otherwise. The output pseudo-op is not an instruction here.
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<Instruction> {
    let (&opcode, rest) = bytes.split_first()?;
    let metadata = decode(opcode)?;

    let operand_len = metadata.addressing_mode.operand_len() as usize;
    let operand_bytes = rest.get(..operand_len)?.to_vec();

    Some(Instruction {
        address,
        opcode,
        mnemonic: metadata.mnemonic.as_str(),
        addressing_mode: metadata.addressing_mode,
        operand_bytes,
        size_bytes: metadata.size_bytes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addressing::AddressingMode;

    #[test]
    fn test_decode_lda_immediate() {
        let instr = decode_instruction(&[0xA9, 0x42], 0x0600).unwrap();

        assert_eq!(instr.address, 0x0600);
        assert_eq!(instr.mnemonic, "LDA");
        assert_eq!(instr.addressing_mode, AddressingMode::Immediate);
        assert_eq!(instr.operand_bytes, vec![0x42]);
        assert_eq!(instr.size_bytes, 2);
    }

    #[test]
    fn test_decode_accumulator_form() {
        let instr = decode_instruction(&[0x0A], 0x0600).unwrap();
        assert_eq!(instr.mnemonic, "ASL");
        assert_eq!(instr.addressing_mode, AddressingMode::Accumulator);
    }

    #[test]
    fn test_decode_rejects_unknown_and_short() {
        assert!(decode_instruction(&[0x02], 0).is_none());
        assert!(decode_instruction(&[0x42, 0x00], 0).is_none());
        assert!(decode_instruction(&[0x4C, 0x00], 0).is_none());
        assert!(decode_instruction(&[], 0).is_none());
    }
}
