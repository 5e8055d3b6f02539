//! Integration tests for the two-pass assembler

use edu6502::opcodes::{Column, INSTRUCTION_SET};
use edu6502::{AssembleError, Assembler, LabelError, Memory};

fn assemble(source: &str) -> (Assembler, Memory, Result<usize, AssembleError>) {
    let mut memory = Memory::new();
    let mut assembler = Assembler::new();
    let result = assembler
        .assemble_code(source, &mut memory)
        .map(|report| report.bytes_assembled);
    (assembler, memory, result)
}

fn bytes_at(memory: &Memory, start: u16, len: usize) -> Vec<u8> {
    (0..len).map(|i| memory.get(start + i as u16)).collect()
}

/// Operand text selecting `column`, and the operand bytes it should emit.
fn operand_for(column: Column) -> (&'static str, Vec<u8>) {
    match column {
        Column::Single => ("", vec![]),
        Column::Immediate => ("#$42", vec![0x42]),
        Column::ZeroPage => ("$42", vec![0x42]),
        Column::ZeroPageX => ("$42,X", vec![0x42]),
        Column::ZeroPageY => ("$42,Y", vec![0x42]),
        Column::Absolute => ("$1234", vec![0x34, 0x12]),
        Column::AbsoluteX => ("$1234,X", vec![0x34, 0x12]),
        Column::AbsoluteY => ("$1234,Y", vec![0x34, 0x12]),
        Column::Indirect => ("($1234)", vec![0x34, 0x12]),
        Column::IndirectX => ("($42,X)", vec![0x42]),
        Column::IndirectY => ("($42),Y", vec![0x42]),
        // $0610 - ($0600 + 2)
        Column::Branch => ("$0610", vec![0x0E]),
    }
}

#[test]
fn test_every_table_entry_assembles() {
    let mut count = 0;
    for row in INSTRUCTION_SET.iter() {
        for (column, opcode) in row.encodings() {
            let (operand, operand_bytes) = operand_for(column);
            let source = format!("{} {}", row.mnemonic, operand);

            let (_, memory, result) = assemble(&source);

            let mut expected = vec![opcode];
            expected.extend(operand_bytes);
            assert_eq!(result, Ok(expected.len()), "{}", source);
            assert_eq!(bytes_at(&memory, 0x0600, expected.len()), expected, "{}", source);
            count += 1;
        }
    }
    assert_eq!(count, 151);
}

#[test]
fn test_simple_program() {
    let (assembler, memory, result) =
        assemble("LDA #$01\nSTA $0200\nLDA #$05\nSTA $0201\nLDA #$08\nSTA $0202");

    assert_eq!(result, Ok(15));
    assert_eq!(
        bytes_at(&memory, 0x0600, 16),
        vec![
            0xA9, 0x01, 0x8D, 0x00, 0x02, 0xA9, 0x05, 0x8D, 0x01, 0x02, 0xA9, 0x08, 0x8D,
            0x02, 0x02, 0x00
        ]
    );
    assert_eq!(assembler.current_pc(), 0x060F);
}

#[test]
fn test_case_insensitive_mnemonics_and_registers() {
    let (_, memory, result) = assemble("lda $10,x\nLdY $1234,X\nsta ($20),y");
    assert_eq!(result, Ok(7));
    assert_eq!(
        bytes_at(&memory, 0x0600, 7),
        vec![0xB5, 0x10, 0xBC, 0x34, 0x12, 0x91, 0x20]
    );
}

#[test]
fn test_operand_without_space() {
    let (_, memory, result) = assemble("LDA#$01\nSTA$0200,X");
    assert_eq!(result, Ok(5));
    assert_eq!(
        bytes_at(&memory, 0x0600, 5),
        vec![0xA9, 0x01, 0x9D, 0x00, 0x02]
    );
}

#[test]
fn test_comments_and_blank_lines() {
    let (_, memory, result) = assemble("; header\n\n  LDX #$08 ; count\n\n");
    assert_eq!(result, Ok(2));
    assert_eq!(bytes_at(&memory, 0x0600, 2), vec![0xA2, 0x08]);
}

#[test]
fn test_defines_substitute_into_operands() {
    let source = "define sysRandom $fe\ndefine black 0\nLDA sysRandom\nLDX #black";
    let (_, memory, result) = assemble(source);
    assert_eq!(result, Ok(4));
    assert_eq!(bytes_at(&memory, 0x0600, 4), vec![0xA5, 0xFE, 0xA2, 0x00]);
}

#[test]
fn test_labels_forward_and_backward() {
    let source = "\
        JMP start\n\
        loop:\n\
        DEX\n\
        BNE loop\n\
        start:\n\
        LDX #$03\n\
        JMP loop";
    let (assembler, memory, result) = assemble(source);

    assert_eq!(result, Ok(11));
    assert_eq!(
        bytes_at(&memory, 0x0600, 11),
        vec![0x4C, 0x06, 0x06, 0xCA, 0xD0, 0xFD, 0xA2, 0x03, 0x4C, 0x03, 0x06]
    );
    assert_eq!(assembler.labels().get_pc("loop"), Some(0x0603));
    assert_eq!(assembler.labels().get_pc("start"), Some(0x0606));
}

#[test]
fn test_label_low_high_bytes() {
    let source = "LDA #<data\nLDX #>data\n*=$1234\ndata: DCB 1";
    let (_, memory, result) = assemble(source);
    assert_eq!(result, Ok(5));
    assert_eq!(bytes_at(&memory, 0x0600, 4), vec![0xA9, 0x34, 0xA2, 0x12]);
    assert_eq!(memory.get(0x1234), 0x01);
}

#[test]
fn test_origin_and_data() {
    let source = "*=$0700\nDCB $01, 2, %11, $ff\n* = 2048\nNOP";
    let (assembler, memory, result) = assemble(source);

    assert_eq!(result, Ok(5));
    assert_eq!(bytes_at(&memory, 0x0700, 4), vec![0x01, 0x02, 0x03, 0xFF]);
    assert_eq!(memory.get(0x0800), 0xEA);
    assert_eq!(memory.get(0x0801), 0x00);
    assert_eq!(assembler.segments().len(), 2);
    assert_eq!(
        assembler.hexdump(&memory),
        "0700: 01 02 03 ff \n0800: ea "
    );
}

#[test]
fn test_syntax_error_reports_line() {
    let (_, _, result) = assemble("NOP\nLDA #$01\nFOO $10");
    assert_eq!(
        result,
        Err(AssembleError::Label(LabelError::Syntax {
            line: 3,
            text: "FOO $10".into()
        }))
    );
}

#[test]
fn test_unknown_label_fails_in_emit_pass() {
    let (_, memory, result) = assemble("LDA #$01\nJMP nowhere");
    assert_eq!(
        result,
        Err(AssembleError::Syntax {
            line: 2,
            text: "JMP nowhere".into()
        })
    );
    // Bytes before the failing line stay in memory
    assert_eq!(memory.get(0x0600), 0xA9);
}

#[test]
fn test_duplicate_label() {
    let (_, _, result) = assemble("here: NOP\nhere: NOP");
    assert_eq!(
        result,
        Err(AssembleError::Label(LabelError::Duplicate {
            name: "here".into(),
            line: 2
        }))
    );
}

#[test]
fn test_no_code() {
    let (_, _, result) = assemble("; nothing\ndefine x 1\nlabel:");
    assert_eq!(result, Err(AssembleError::NoCode));
}

#[test]
fn test_out_of_range_operands_rejected() {
    let (_, _, result) = assemble("LDA #$100");
    assert!(result.is_err());

    let (_, _, result) = assemble("DCB 256");
    assert!(result.is_err());

    let (_, _, result) = assemble("DCB");
    assert!(result.is_err());
}

#[test]
fn test_source_map_links_bytes_to_lines() {
    let (assembler, _, result) = assemble("LDA #$01\n\nSTA $0200");
    assert_eq!(result, Ok(5));
    assert_eq!(assembler.source_line(0x0600), Some(1));
    assert_eq!(assembler.source_line(0x0602), Some(3));
    assert_eq!(assembler.source_line(0x0605), None);
}
