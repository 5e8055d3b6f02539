//! Tests for the ADC (Add with Carry) instruction.
//!
//! Tests cover:
//! - Every binary-mode input (256 × 256 × carry) against two's-complement
//! - Decimal mode examples
//! - Addressing modes that read through memory

use edu6502::{Memory, MemoryBus, CPU};

/// Helper function to create a CPU at the default program start
fn setup_cpu() -> CPU<Memory> {
    CPU::new(Memory::new())
}

// ========== Basic ADC Operation Tests ==========

#[test]
fn test_adc_immediate_basic() {
    let mut cpu = setup_cpu();

    // ADC #$05
    cpu.memory_mut().write(0x0600, 0x69);
    cpu.memory_mut().write(0x0601, 0x05);

    cpu.set_a(0x10);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x15);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x0602);
}

#[test]
fn test_adc_signed_overflow() {
    let mut cpu = setup_cpu();

    // ADC #$50
    cpu.memory_mut().write(0x0600, 0x69);
    cpu.memory_mut().write(0x0601, 0x50);

    cpu.set_a(0x50);
    cpu.set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xA0); // 80 + 80 = -96 as signed
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_zero_page_x() {
    let mut cpu = setup_cpu();

    // ADC $10,X
    cpu.memory_mut().write(0x0600, 0x75);
    cpu.memory_mut().write(0x0601, 0x10);
    cpu.memory_mut().write(0x0015, 0x22);

    cpu.set_a(0x01);
    cpu.set_x(0x05);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x23);
}

#[test]
fn test_adc_zero_page_x_wraps() {
    let mut cpu = setup_cpu();

    // ADC $F0,X with X=$20 reads $0010
    cpu.memory_mut().write(0x0600, 0x75);
    cpu.memory_mut().write(0x0601, 0xF0);
    cpu.memory_mut().write(0x0010, 0x07);

    cpu.set_x(0x20);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x07);
}

#[test]
fn test_adc_indirect_y() {
    let mut cpu = setup_cpu();

    // ADC ($20),Y
    cpu.memory_mut().write(0x0600, 0x71);
    cpu.memory_mut().write(0x0601, 0x20);
    cpu.memory_mut().write(0x0020, 0x00);
    cpu.memory_mut().write(0x0021, 0x30);
    cpu.memory_mut().write(0x3004, 0x40);

    cpu.set_a(0x02);
    cpu.set_y(0x04);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x42);
}

// ========== Decimal Mode ==========

#[test]
fn test_adc_decimal_carry_out() {
    let mut cpu = setup_cpu();

    // SED ; ADC #$01
    cpu.memory_mut().write(0x0600, 0xF8);
    cpu.memory_mut().write(0x0601, 0x69);
    cpu.memory_mut().write(0x0602, 0x01);

    cpu.set_a(0x99);
    cpu.set_flag_c(false);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_d());
}

// ========== Exhaustive Binary Mode ==========

#[test]
fn test_adc_binary_matches_twos_complement() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0600, 0x69);

    for a in 0..=255u8 {
        for b in 0..=255u8 {
            cpu.memory_mut().write(0x0601, b);
            for carry in [false, true] {
                cpu.set_pc(0x0600);
                cpu.set_a(a);
                cpu.set_flag_c(carry);

                cpu.step().unwrap();

                let sum = a as u16 + b as u16 + carry as u16;
                let result = sum as u8;
                let overflow = (!(a ^ b) & (a ^ result) & 0x80) != 0;

                assert_eq!(cpu.a(), result, "{:02x} + {:02x} + {}", a, b, carry);
                assert_eq!(cpu.flag_c(), sum > 0xFF);
                assert_eq!(cpu.flag_v(), overflow);
                assert_eq!(cpu.flag_z(), result == 0);
                assert_eq!(cpu.flag_n(), result & 0x80 != 0);
            }
        }
    }
}
