//! # Branch Instructions
//!
//! This module implements conditional branch operations:
//! BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS.
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! measured from the address of the next instruction. No flags are affected.

use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Consumes the offset byte and branches when `taken`.
fn branch_if<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    taken: bool,
) -> Result<(), ExecutionError> {
    let addr = cpu.operand_address(mode);
    let offset = cpu.memory.read(addr) as i8;

    if taken {
        cpu.pc = cpu.pc.wrapping_add_signed(offset as i16);
    }

    Ok(())
}

/// Executes the BCC (Branch if Carry Clear) instruction.
pub(crate) fn execute_bcc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let taken = !cpu.flag_c;
    branch_if(cpu, mode, taken)
}

/// Executes the BCS (Branch if Carry Set) instruction.
pub(crate) fn execute_bcs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let taken = cpu.flag_c;
    branch_if(cpu, mode, taken)
}

/// Executes the BEQ (Branch if Equal) instruction.
pub(crate) fn execute_beq<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let taken = cpu.flag_z;
    branch_if(cpu, mode, taken)
}

/// Executes the BNE (Branch if Not Equal) instruction.
pub(crate) fn execute_bne<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let taken = !cpu.flag_z;
    branch_if(cpu, mode, taken)
}

/// Executes the BMI (Branch if Minus) instruction.
pub(crate) fn execute_bmi<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let taken = cpu.flag_n;
    branch_if(cpu, mode, taken)
}

/// Executes the BPL (Branch if Positive) instruction.
pub(crate) fn execute_bpl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let taken = !cpu.flag_n;
    branch_if(cpu, mode, taken)
}

/// Executes the BVC (Branch if Overflow Clear) instruction.
pub(crate) fn execute_bvc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let taken = !cpu.flag_v;
    branch_if(cpu, mode, taken)
}

/// Executes the BVS (Branch if Overflow Set) instruction.
pub(crate) fn execute_bvs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let taken = cpu.flag_v;
    branch_if(cpu, mode, taken)
}
