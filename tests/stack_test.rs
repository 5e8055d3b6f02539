//! Tests for stack instructions and subroutine calls.
//!
//! The stack lives at $0100-$01FF and grows down from SP=$FF. Pushing at
//! SP=$00 or pulling at SP=$FF wraps and raises a signal.

use edu6502::cpu::{Signal, StackWrap};
use edu6502::{Memory, MemoryBus, CPU};

fn setup_cpu() -> CPU<Memory> {
    CPU::new(Memory::new())
}

#[test]
fn test_pha_pla() {
    let mut cpu = setup_cpu();

    // PHA ; LDA #$00 ; PLA
    cpu.memory_mut().write(0x0600, 0x48);
    cpu.memory_mut().write(0x0601, 0xA9);
    cpu.memory_mut().write(0x0602, 0x00);
    cpu.memory_mut().write(0x0603, 0x68);

    cpu.set_a(0x80);

    cpu.step().unwrap();
    assert_eq!(cpu.sp(), 0xFE);
    assert_eq!(cpu.memory().read(0x01FF), 0x80);

    cpu.step().unwrap();
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x80);
    assert_eq!(cpu.sp(), 0xFF);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert!(cpu.take_signals().is_empty());
}

#[test]
fn test_php_sets_break_and_unused_bits() {
    let mut cpu = setup_cpu();

    // PHP
    cpu.memory_mut().write(0x0600, 0x08);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x01FF), 0x31);
}

#[test]
fn test_plp_restores_flags() {
    let mut cpu = setup_cpu();

    // PLP
    cpu.memory_mut().write(0x0600, 0x28);
    cpu.memory_mut().write(0x0100, 0xC3);
    cpu.set_sp(0xFF);

    cpu.step().unwrap();

    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert_eq!(cpu.status() & 0x30, 0x30);
    assert_eq!(cpu.take_signals(), vec![Signal::StackWrapped(StackWrap::Emptied)]);
}

#[test]
fn test_push_at_bottom_wraps() {
    let mut cpu = setup_cpu();

    // PHA
    cpu.memory_mut().write(0x0600, 0x48);
    cpu.set_a(0x5A);
    cpu.set_sp(0x00);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0100), 0x5A);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.take_signals(), vec![Signal::StackWrapped(StackWrap::Filled)]);
}

#[test]
fn test_pull_at_top_wraps() {
    let mut cpu = setup_cpu();

    // PLA
    cpu.memory_mut().write(0x0600, 0x68);
    cpu.memory_mut().write(0x0100, 0x11);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x11);
    assert_eq!(cpu.sp(), 0x00);
    assert_eq!(cpu.take_signals(), vec![Signal::StackWrapped(StackWrap::Emptied)]);
}

#[test]
fn test_jsr_rts() {
    let mut cpu = setup_cpu();

    // JSR $0610 ; ... ; $0610: RTS
    cpu.memory_mut().write(0x0600, 0x20);
    cpu.memory_mut().write(0x0601, 0x10);
    cpu.memory_mut().write(0x0602, 0x06);
    cpu.memory_mut().write(0x0610, 0x60);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0610);
    assert_eq!(cpu.sp(), 0xFD);
    // Return address - 1, high byte pushed first
    assert_eq!(cpu.memory().read(0x01FF), 0x06);
    assert_eq!(cpu.memory().read(0x01FE), 0x02);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0603);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_rti() {
    let mut cpu = setup_cpu();

    // RTI with P=$81, PC=$1234 on the stack
    cpu.memory_mut().write(0x0600, 0x40);
    cpu.memory_mut().write(0x01FD, 0x81);
    cpu.memory_mut().write(0x01FE, 0x34);
    cpu.memory_mut().write(0x01FF, 0x12);
    cpu.set_sp(0xFC);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1234);
    assert!(cpu.flag_n());
    assert!(cpu.flag_c());
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_tsx_txs() {
    let mut cpu = setup_cpu();

    // TSX ; LDX #$00 ; TXS
    cpu.memory_mut().write(0x0600, 0xBA);
    cpu.memory_mut().write(0x0601, 0xA2);
    cpu.memory_mut().write(0x0602, 0x00);
    cpu.memory_mut().write(0x0603, 0x9A);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0xFF);
    assert!(cpu.flag_n());

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.sp(), 0x00);
    // TXS leaves flags alone
    assert!(cpu.flag_z());
}
