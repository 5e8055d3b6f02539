//! Fuzz target for the assembler.
//!
//! Arbitrary source text must either assemble or fail with an error; it must
//! never panic, and a success must leave the `$00` terminator in place.

#![no_main]

use edu6502::{Assembler, Memory};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);

    let mut memory = Memory::new();
    let mut assembler = Assembler::new();
    if assembler.assemble_code(&source, &mut memory).is_ok() {
        assert!(assembler.bytes_assembled() > 0);
        assert_eq!(memory.get(assembler.current_pc()), 0x00);

        // Listing and dump cover every emitted segment
        let _ = assembler.hexdump(&memory);
        let _ = assembler.disassemble(&memory);
    }
});
