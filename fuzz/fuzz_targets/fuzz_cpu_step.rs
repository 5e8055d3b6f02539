//! Fuzz target for simulator stepping.
//!
//! Arbitrary register state and memory contents, then a handful of debug
//! steps. Errors are fine; panics are not.

#![no_main]

use arbitrary::Arbitrary;
use edu6502::{Simulator, SimulatorConfig};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at $0600
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    seed: u64,
}

fuzz_target!(|input: FuzzInput| {
    let config = SimulatorConfig {
        random_seed: Some(input.seed),
        ..SimulatorConfig::default()
    };
    let mut sim = Simulator::new(config);

    let memory = sim.memory_mut();
    for (i, &byte) in input.memory.zero_page.iter().enumerate() {
        memory.set(i as u16, byte);
    }
    for (i, &byte) in input.memory.stack_page.iter().enumerate() {
        memory.set(0x0100 + i as u16, byte);
    }
    for (i, &byte) in input.memory.program.iter().enumerate() {
        memory.set(0x0600 + i as u16, byte);
    }

    let cpu = sim.cpu_mut();
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    for _ in 0..8 {
        if sim.debug_exec_step().is_err() {
            break;
        }
    }

    // Bit 5 always reads as set
    assert_eq!(sim.registers().p & 0x20, 0x20);
});
