//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each works on the accumulator or on a memory operand. C receives the bit
//! shifted out; Z and N come from the result.

use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// Bit 0 is set to 0 and bit 7 is placed in the carry flag.
pub(crate) fn execute_asl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let result = cpu.modify(mode, |cpu, value| {
        cpu.flag_c = value & 0x80 != 0;
        value << 1
    });
    cpu.set_nz(result);
    Ok(())
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Bit 7 is set to 0 and bit 0 is placed in the carry flag. N is always
/// cleared.
pub(crate) fn execute_lsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let result = cpu.modify(mode, |cpu, value| {
        cpu.flag_c = value & 0x01 != 0;
        value >> 1
    });
    cpu.set_nz(result);
    Ok(())
}

/// Executes the ROL (Rotate Left) instruction.
pub(crate) fn execute_rol<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let result = cpu.modify(mode, |cpu, value| {
        let carry_in = cpu.flag_c as u8;
        cpu.flag_c = value & 0x80 != 0;
        (value << 1) | carry_in
    });
    cpu.set_nz(result);
    Ok(())
}

/// Executes the ROR (Rotate Right) instruction.
pub(crate) fn execute_ror<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let result = cpu.modify(mode, |cpu, value| {
        let carry_in = if cpu.flag_c { 0x80 } else { 0x00 };
        cpu.flag_c = value & 0x01 != 0;
        (value >> 1) | carry_in
    });
    cpu.set_nz(result);
    Ok(())
}
