//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX update Z and N from the copied value.
//! TXS affects no flags.

use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_tax<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.a;
    cpu.set_nz(cpu.x);
    Ok(())
}

pub(crate) fn execute_tay<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.a;
    cpu.set_nz(cpu.y);
    Ok(())
}

pub(crate) fn execute_txa<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.x;
    cpu.set_nz(cpu.a);
    Ok(())
}

pub(crate) fn execute_tya<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.y;
    cpu.set_nz(cpu.a);
    Ok(())
}

pub(crate) fn execute_tsx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.sp;
    cpu.set_nz(cpu.x);
    Ok(())
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
pub(crate) fn execute_txs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.sp = cpu.x;
    Ok(())
}
