//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC, SBC: Add/subtract with carry, binary or BCD depending on the D flag
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Register comparisons
//! - BIT: Bit test
//!
//! Decimal mode follows NMOS behaviour: N and Z come from the corrected
//! result, and V is computed from the intermediate binary sum.

use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator. Updates N, V, Z
/// and C.
pub(crate) fn execute_adc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_value(mode);
    if cpu.flag_d {
        add_decimal(cpu, value);
    } else {
        add_binary(cpu, value);
    }
    Ok(())
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Subtracts the operand and the borrow (inverted carry) from the accumulator.
/// C is set when no borrow occurred.
pub(crate) fn execute_sbc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_value(mode);
    if cpu.flag_d {
        subtract_decimal(cpu, value);
    } else {
        // A - M - (1 - C) == A + !M + C
        add_binary(cpu, !value);
    }
    Ok(())
}

fn add_binary<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let result16 = a as u16 + value as u16 + cpu.flag_c as u16;
    let result = result16 as u8;

    cpu.flag_c = result16 > 0xFF;
    // Both operands share a sign that the result does not
    cpu.flag_v = (a ^ result) & (value ^ result) & 0x80 != 0;
    cpu.a = result;
    cpu.set_nz(result);
}

fn add_decimal<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a as i32;
    let m = value as i32;
    let mut overflow = (a ^ m) & 0x80 == 0;

    let mut tmp = (a & 0x0F) + (m & 0x0F) + cpu.flag_c as i32;
    if tmp >= 10 {
        tmp = 0x10 | ((tmp + 6) & 0x0F);
    }
    tmp += (a & 0xF0) + (m & 0xF0);

    if tmp >= 0xA0 {
        cpu.flag_c = true;
        if overflow && tmp >= 0x180 {
            overflow = false;
        }
        tmp += 0x60;
    } else {
        cpu.flag_c = false;
        if overflow && tmp < 0x80 {
            overflow = false;
        }
    }

    cpu.flag_v = overflow;
    cpu.a = (tmp & 0xFF) as u8;
    cpu.set_nz(cpu.a);
}

fn subtract_decimal<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a as i32;
    let m = value as i32;
    let mut overflow = (a ^ m) & 0x80 != 0;

    let mut low = 0x0F + (a & 0x0F) - (m & 0x0F) + cpu.flag_c as i32;
    let mut high;
    if low < 0x10 {
        high = 0;
        low -= 6;
    } else {
        high = 0x10;
        low -= 0x10;
    }
    high += 0xF0 + (a & 0xF0) - (m & 0xF0);

    if high < 0x100 {
        cpu.flag_c = false;
        if overflow && high < 0x80 {
            overflow = false;
        }
        high -= 0x60;
    } else {
        cpu.flag_c = true;
        if overflow && high >= 0x180 {
            overflow = false;
        }
    }
    high += low;

    cpu.flag_v = overflow;
    cpu.a = (high & 0xFF) as u8;
    cpu.set_nz(cpu.a);
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_value(mode);
    cpu.a &= value;
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_value(mode);
    cpu.a |= value;
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_value(mode);
    cpu.a ^= value;
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Shared comparison: C = register >= operand, N/Z from the difference.
fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, value: u8) {
    cpu.flag_c = register >= value;
    cpu.set_nz(register.wrapping_sub(value));
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_value(mode);
    let register = cpu.a;
    compare(cpu, register, value);
    Ok(())
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_value(mode);
    let register = cpu.x;
    compare(cpu, register, value);
    Ok(())
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_value(mode);
    let register = cpu.y;
    compare(cpu, register, value);
    Ok(())
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set from `A & M`; N and V are copied from bits 7 and 6 of M.
/// The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_value(mode);
    cpu.flag_z = cpu.a & value == 0;
    cpu.flag_n = value & 0x80 != 0;
    cpu.flag_v = value & 0x40 != 0;
    Ok(())
}
