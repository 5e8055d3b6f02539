//! # Stack Instructions
//!
//! PHA, PHP, PLA, PLP. The stack lives in page one and wraps at both ends;
//! a wrap is reported through [`Signal::StackWrapped`](crate::cpu::Signal).

use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.a;
    cpu.push(value);
    Ok(())
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed byte always has bits 4 and 5 set.
pub(crate) fn execute_php<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let status = cpu.status() | 0x30;
    cpu.push(status);
    Ok(())
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn execute_pla<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.pop();
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let status = cpu.pop();
    cpu.set_status(status | 0x30);
    Ok(())
}
