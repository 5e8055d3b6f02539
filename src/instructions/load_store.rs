//! # Load and Store Instructions
//!
//! Loads (LDA, LDX, LDY) update Z and N; stores (STA, STX, STY) affect no
//! flags and write through [`MemoryBus::write`], so memory listeners see them.

use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Examples
///
/// ```
/// use edu6502::{CPU, Memory, MemoryBus};
///
/// let mut memory = Memory::new();
/// memory.write(0x0600, 0xA5); // LDA $10
/// memory.write(0x0601, 0x10);
/// memory.write(0x0010, 0x80);
///
/// let mut cpu = CPU::new(memory);
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.a(), 0x80);
/// assert!(cpu.flag_n());
/// ```
pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.operand_value(mode);
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.operand_value(mode);
    cpu.set_nz(cpu.x);
    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.operand_value(mode);
    cpu.set_nz(cpu.y);
    Ok(())
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let addr = cpu.operand_address(mode);
    cpu.memory.write(addr, cpu.a);
    Ok(())
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let addr = cpu.operand_address(mode);
    cpu.memory.write(addr, cpu.x);
    Ok(())
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let addr = cpu.operand_address(mode);
    cpu.memory.write(addr, cpu.y);
    Ok(())
}
