//! # Status Flag Manipulation Instructions
//!
//! This module implements instructions that directly modify processor status flags:
//! - CLC / SEC: Clear / Set Carry Flag
//! - CLD / SED: Clear / Set Decimal Mode
//! - CLV: Clear Overflow Flag
//! - CLI / SEI: rejected, the simulator has no interrupt model
//!
//! These instructions use implied addressing mode.

use crate::opcodes::Mnemonic;
use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Executes the CLC (Clear Carry Flag) instruction.
///
/// # Examples
///
/// ```
/// use edu6502::{CPU, Memory, MemoryBus};
///
/// let mut memory = Memory::new();
/// memory.write(0x0600, 0x18); // CLC
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_flag_c(true);
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.flag_c(), false);
/// assert_eq!(cpu.pc(), 0x0601);
/// ```
pub(crate) fn execute_clc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.flag_c = false;
    Ok(())
}

/// Executes the SEC (Set Carry Flag) instruction.
pub(crate) fn execute_sec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.flag_c = true;
    Ok(())
}

/// Executes the CLD (Clear Decimal Mode) instruction.
pub(crate) fn execute_cld<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.flag_d = false;
    Ok(())
}

/// Executes the SED (Set Decimal Mode) instruction.
pub(crate) fn execute_sed<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.flag_d = true;
    Ok(())
}

/// Executes the CLV (Clear Overflow Flag) instruction.
pub(crate) fn execute_clv<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.flag_v = false;
    Ok(())
}

/// CLI is not supported. The I flag is left unchanged.
pub(crate) fn execute_cli<M: MemoryBus>(
    _cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    Err(ExecutionError::Unimplemented {
        mnemonic: Mnemonic::Cli,
    })
}

/// SEI is not supported. The I flag is left unchanged.
pub(crate) fn execute_sei<M: MemoryBus>(
    _cpu: &mut CPU<M>,
    _mode: AddressingMode,
) -> Result<(), ExecutionError> {
    Err(ExecutionError::Unimplemented {
        mnemonic: Mnemonic::Sei,
    })
}
