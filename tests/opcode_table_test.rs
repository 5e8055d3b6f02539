//! Opcode table consistency.

use edu6502::opcodes::{decode, Column, DOCUMENTED_OPCODES, INSTRUCTION_SET, PSEUDO_OP};
use edu6502::{AddressingMode, Mnemonic, OPCODE_TABLE};

#[test]
fn test_documented_opcode_count() {
    let count = OPCODE_TABLE.iter().filter(|m| m.is_some()).count();
    assert_eq!(count, DOCUMENTED_OPCODES);
    assert_eq!(INSTRUCTION_SET.len(), 56);
}

#[test]
fn test_decode_agrees_with_instruction_set() {
    for row in INSTRUCTION_SET.iter() {
        for (column, opcode) in row.encodings() {
            let metadata = decode(opcode).unwrap();
            assert_eq!(metadata.mnemonic, row.mnemonic);
            assert_eq!(metadata.addressing_mode, column.addressing_mode(row.mnemonic));
        }
    }
}

#[test]
fn test_well_known_opcodes() {
    let lda = decode(0xA9).unwrap();
    assert_eq!(lda.mnemonic, Mnemonic::Lda);
    assert_eq!(lda.addressing_mode, AddressingMode::Immediate);
    assert_eq!(lda.size_bytes(), 2);

    let jmp = decode(0x6C).unwrap();
    assert_eq!(jmp.mnemonic, Mnemonic::Jmp);
    assert_eq!(jmp.addressing_mode, AddressingMode::Indirect);
    assert_eq!(jmp.size_bytes(), 3);

    let asl = decode(0x0A).unwrap();
    assert_eq!(asl.addressing_mode, AddressingMode::Accumulator);
    assert_eq!(asl.size_bytes(), 1);
}

#[test]
fn test_pseudo_op_is_not_an_instruction() {
    assert!(decode(PSEUDO_OP).is_none());
}

#[test]
fn test_mnemonic_parse() {
    assert_eq!("lda".parse::<Mnemonic>(), Ok(Mnemonic::Lda));
    assert_eq!("TxS".parse::<Mnemonic>(), Ok(Mnemonic::Txs));
    assert!("DCB".parse::<Mnemonic>().is_err());
    assert_eq!(Mnemonic::Bne.to_string(), "BNE");
}

#[test]
fn test_branch_column_only_for_branches() {
    let branches: Vec<Mnemonic> = INSTRUCTION_SET
        .iter()
        .filter(|row| row.opcode(Column::Branch).is_some())
        .map(|row| row.mnemonic)
        .collect();
    assert_eq!(
        branches,
        vec![
            Mnemonic::Bpl,
            Mnemonic::Bmi,
            Mnemonic::Bvc,
            Mnemonic::Bvs,
            Mnemonic::Bcc,
            Mnemonic::Bcs,
            Mnemonic::Bne,
            Mnemonic::Beq,
        ]
    );
}
