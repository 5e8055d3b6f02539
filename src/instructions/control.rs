//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - BRK: Halt the program
//! - JMP: Jump to address
//! - JSR, RTS: Subroutine call and return
//! - RTI: Return from interrupt
//! - NOP: No operation
//! - The `$42` output pseudo-op
//!
//! BRK does not fetch a vector. It stops execution and leaves PC one byte
//! past the opcode, which is what the simulator reports as the program end.

use crate::cpu::Signal;
use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Executes the BRK (Force Break) instruction.
pub(crate) fn execute_brk<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.signals.push(Signal::Halt);
    Ok(())
}

/// Executes the JMP (Jump) instruction.
///
/// Addressing modes:
/// - Absolute (0x4C): JMP $1234
/// - Indirect (0x6C): JMP ($1234), target read as a plain little-endian word
///   (the target high byte is read from the next page when the pointer ends
///   in $FF)
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.pc = cpu.operand_address(mode);
    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last operand byte (return address - 1), high
/// byte first, then jumps.
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let target = cpu.operand_address(mode);
    let return_addr = cpu.pc.wrapping_sub(1);

    cpu.push((return_addr >> 8) as u8);
    cpu.push((return_addr & 0xFF) as u8);
    cpu.pc = target;

    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let lo = cpu.pop() as u16;
    let hi = cpu.pop() as u16;
    cpu.pc = ((hi << 8) | lo).wrapping_add(1);
    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register (bits 4 and 5 forced on), then PC.
pub(crate) fn execute_rti<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let status = cpu.pop();
    cpu.set_status(status | 0x30);

    let lo = cpu.pop() as u16;
    let hi = cpu.pop() as u16;
    cpu.pc = (hi << 8) | lo;

    Ok(())
}

/// Executes the NOP (No Operation) instruction.
pub(crate) fn execute_nop<M: MemoryBus>(
    _cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    Ok(())
}

/// Executes the `$42` pseudo-op.
///
/// Always consumes one operand byte. Operand `$00` outputs the accumulator;
/// other operands are reserved and do nothing.
pub(crate) fn execute_pseudo_op<M: MemoryBus>(cpu: &mut CPU<M>) {
    let function = cpu.fetch_byte();
    if function == 0x00 {
        cpu.signals.push(Signal::Output(cpu.a));
    }
}
