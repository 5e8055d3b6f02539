//! Property-based truth tables for logic, compare and shift instructions.

use edu6502::{Memory, MemoryBus, CPU};
use proptest::prelude::*;

/// Runs `opcode #operand` (or a one-byte opcode) with A preset.
fn run(opcode: u8, operand: Option<u8>, a: u8, carry: bool) -> CPU<Memory> {
    let mut cpu = CPU::new(Memory::new());
    cpu.memory_mut().write(0x0600, opcode);
    if let Some(value) = operand {
        cpu.memory_mut().write(0x0601, value);
    }
    cpu.set_a(a);
    cpu.set_flag_c(carry);
    cpu.step().unwrap();
    cpu
}

proptest! {
    #[test]
    fn prop_logic_ops(a in any::<u8>(), m in any::<u8>()) {
        for (opcode, expected) in [(0x29, a & m), (0x09, a | m), (0x49, a ^ m)] {
            let cpu = run(opcode, Some(m), a, false);
            prop_assert_eq!(cpu.a(), expected);
            prop_assert_eq!(cpu.flag_z(), expected == 0);
            prop_assert_eq!(cpu.flag_n(), expected & 0x80 != 0);
        }
    }

    #[test]
    fn prop_cmp_flags(a in any::<u8>(), m in any::<u8>()) {
        let cpu = run(0xC9, Some(m), a, false);
        let diff = a.wrapping_sub(m);
        prop_assert_eq!(cpu.a(), a);
        prop_assert_eq!(cpu.flag_c(), a >= m);
        prop_assert_eq!(cpu.flag_z(), a == m);
        prop_assert_eq!(cpu.flag_n(), diff & 0x80 != 0);
    }

    #[test]
    fn prop_rotate_through_carry(a in any::<u8>(), carry in any::<bool>()) {
        // ROL A
        let cpu = run(0x2A, None, a, carry);
        prop_assert_eq!(cpu.a(), (a << 1) | carry as u8);
        prop_assert_eq!(cpu.flag_c(), a & 0x80 != 0);

        // ROR A
        let cpu = run(0x6A, None, a, carry);
        prop_assert_eq!(cpu.a(), (a >> 1) | ((carry as u8) << 7));
        prop_assert_eq!(cpu.flag_c(), a & 0x01 != 0);
    }
}
