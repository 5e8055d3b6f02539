//! # Simulator
//!
//! Run-state machine over the [`CPU`]: single stepping, timer-driven batches,
//! reset and goto. Every observable change is reported on the [`EventBus`].
//!
//! ## Run Model
//!
//! The host owns the clock. While running, it calls [`Simulator::tick`] every
//! [`SimulatorConfig::tick_interval`]; each tick executes up to
//! [`SimulatorConfig::batch_size`] instructions. With the stepper enabled,
//! ticks do nothing and [`Simulator::debug_exec_step`] advances one
//! instruction at a time.
//!
//! Before each instruction the cell at `$FE` receives a fresh pseudo-random
//! byte.

use std::fmt;

use crate::config::SimulatorConfig;
use crate::cpu::{Signal, StackWrap, CPU, RESET_PC, RESET_SP, RESET_STATUS};
use crate::error::{ExecutionError, GotoError};
use crate::events::{Event, EventBus, PseudoOpKind, StopReason};
use crate::assembler::labels::Labels;
use crate::memory::{Memory, RANDOM_ADDR};

/// Message reported when `goto_addr` cannot resolve its input.
pub const GOTO_FAILURE: &str = "Unable to find/parse given address/label";

/// Observable state of the simulator, derived from the run flags and the
/// register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    /// Freshly reset, nothing loaded at or above `$0600`.
    Initialized,
    /// Freshly reset with a program loaded.
    Ready,
    Running,
    /// Stepper enabled and running.
    Debugging,
    /// Stepper enabled, not running.
    DebuggingPaused,
    /// Registers moved away from reset defaults and not running.
    Stopped,
}

/// Snapshot of the register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    pub pc: u16,
    pub sp: u8,
}

impl Registers {
    /// True when every register holds its reset value.
    pub fn is_reset(&self) -> bool {
        self.a == 0
            && self.x == 0
            && self.y == 0
            && self.pc == RESET_PC
            && self.sp == RESET_SP
            && self.p == RESET_STATUS
    }
}

/// Renders the debugger panel:
///
/// ```text
/// A=$00 X=$00 Y=$00
/// SP=$ff PC=$0600
/// NV-BDIZC
/// 00110000
/// ```
impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "A=${:02x} X=${:02x} Y=${:02x}", self.a, self.x, self.y)?;
        writeln!(f, "SP=${:02x} PC=${:04x}", self.sp, self.pc)?;
        writeln!(f, "NV-BDIZC")?;
        write!(f, "{:08b}", self.p)
    }
}

/// Xorshift generator feeding the `$FE` cell.
#[derive(Debug, Clone)]
struct Xorshift64(u64);

impl Xorshift64 {
    fn new(seed: u64) -> Self {
        // Zero is a fixed point
        Self(if seed == 0 { 0x2545_F491_4F6C_DD1D } else { seed })
    }

    fn next_byte(&mut self) -> u8 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x >> 32) as u8
    }
}

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    js_sys::Date::now().to_bits()
}

#[cfg(not(all(feature = "wasm", target_arch = "wasm32")))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Parses `$hhhh` or `0xhhhh` (1-4 hex digits).
fn parse_hex_address(input: &str) -> Option<u16> {
    let digits = input
        .strip_prefix('$')
        .or_else(|| input.strip_prefix("0x"))
        .or_else(|| input.strip_prefix("0X"))?;
    if (1..=4).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        u16::from_str_radix(digits, 16).ok()
    } else {
        None
    }
}

/// Instruction-set simulator over a 64KB [`Memory`].
///
/// # Examples
///
/// ```
/// use edu6502::{Assembler, Simulator, SimulatorConfig, SimulatorState};
///
/// let mut sim = Simulator::new(SimulatorConfig::default());
/// Assembler::new()
///     .assemble_code("LDA #$07\nSTA $0200", sim.memory_mut())
///     .unwrap();
/// assert_eq!(sim.state(), SimulatorState::Ready);
///
/// sim.run_binary();
/// sim.tick().unwrap();
///
/// assert_eq!(sim.memory().get(0x0200), 0x07);
/// assert_eq!(sim.state(), SimulatorState::Stopped);
/// ```
pub struct Simulator {
    cpu: CPU<Memory>,
    running: bool,
    stepper: bool,
    config: SimulatorConfig,
    rng: Xorshift64,
    events: EventBus,
}

impl Simulator {
    /// Creates a simulator over fresh memory with a private event bus.
    pub fn new(config: SimulatorConfig) -> Self {
        Self::with_memory(Memory::new(), config, EventBus::new())
    }

    /// Creates a simulator over `memory`, reporting on `events`.
    pub fn with_memory(memory: Memory, config: SimulatorConfig, events: EventBus) -> Self {
        let seed = config.random_seed.unwrap_or_else(clock_seed);
        Self {
            cpu: CPU::new(memory),
            running: false,
            stepper: false,
            config,
            rng: Xorshift64::new(seed),
            events,
        }
    }

    /// Executes one instruction if running, or unconditionally when
    /// `debugging`.
    ///
    /// Stops with [`StopReason::ProgramEnd`] when PC reaches `$0000`, or when
    /// BRK cleared the run flag outside of debugging.
    ///
    /// # Errors
    ///
    /// Unknown opcodes and CLI/SEI stop the simulator and are returned.
    pub fn execute(&mut self, debugging: bool) -> Result<(), ExecutionError> {
        if !self.running && !debugging {
            return Ok(());
        }

        let random = self.rng.next_byte();
        self.cpu.memory_mut().set(RANDOM_ADDR, random);

        let result = self.cpu.step();
        self.dispatch_signals();
        if let Err(err) = result {
            self.fault(&err);
            return Err(err);
        }

        self.events.emit(Event::Step);

        if self.cpu.pc() == 0 || (!self.running && !debugging) {
            let pc = self.cpu.pc().wrapping_sub(1);
            self.events.emit(Event::SimulatorInfo {
                message: format!("Program end at PC=${:04x}", pc),
            });
            log::info!("program end at ${:04x}", pc);
            self.stop(StopReason::ProgramEnd { pc });
        }

        Ok(())
    }

    fn dispatch_signals(&mut self) {
        for signal in self.cpu.take_signals() {
            match signal {
                Signal::Halt => self.running = false,
                Signal::StackWrapped(wrap) => {
                    let message = match wrap {
                        StackWrap::Filled => "6502 Stack filled! Wrapping...",
                        StackWrap::Emptied => "6502 Stack emptied! Wrapping...",
                    };
                    log::warn!("{}", message);
                    self.events.emit(Event::SimulatorInfo {
                        message: message.to_string(),
                    });
                }
                Signal::Output(value) => self.events.emit(Event::PseudoOp {
                    kind: PseudoOpKind::Output,
                    payload: value,
                }),
            }
        }
    }

    fn fault(&mut self, err: &ExecutionError) {
        log::warn!("execution halted: {}", err);
        self.events.emit(Event::SimulatorFailure {
            message: err.to_string(),
        });
        let reason = match err {
            ExecutionError::UnknownOpcode { address, .. } => StopReason::Fault { address: *address },
            ExecutionError::Unimplemented { .. } => StopReason::Unimplemented,
        };
        self.stop(reason);
    }

    fn stop(&mut self, reason: StopReason) {
        self.running = false;
        log::debug!("simulator stopped: {:?}", reason);
        self.events.emit(Event::Stop { reason });
    }

    /// Toggles between running and stopped.
    pub fn run_binary(&mut self) {
        if self.running {
            self.stop(StopReason::Requested);
        } else {
            self.running = true;
            log::debug!("simulator started at ${:04x}", self.cpu.pc());
            self.events.emit(Event::Start);
        }
    }

    /// Timer body: executes up to `batch_size` instructions while running with
    /// the stepper off, then reports `multistep`. Returns how many
    /// instructions ran.
    pub fn tick(&mut self) -> Result<usize, ExecutionError> {
        if !self.running || self.stepper {
            return Ok(0);
        }

        let mut executed = 0;
        while executed < self.config.batch_size && self.running {
            self.execute(false)?;
            executed += 1;
        }

        self.events.emit(Event::Multistep);
        Ok(executed)
    }

    /// Executes exactly one instruction regardless of the run flag.
    pub fn debug_exec_step(&mut self) -> Result<(), ExecutionError> {
        self.execute(true)
    }

    pub fn enable_stepper(&mut self, enabled: bool) {
        self.stepper = enabled;
        log::debug!("stepper {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn stepper_enabled(&self) -> bool {
        self.stepper
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Sets PC to a label, `$hhhh` or `0xhhhh`.
    ///
    /// # Errors
    ///
    /// [`GotoError::Unresolved`] when the input is neither; PC is unchanged.
    pub fn goto_addr(&mut self, input: &str, labels: &Labels) -> Result<u16, GotoError> {
        let input = input.trim();
        match labels.get_pc(input).or_else(|| parse_hex_address(input)) {
            Some(address) => {
                self.cpu.set_pc(address);
                self.events.emit(Event::Goto { address });
                Ok(address)
            }
            None => {
                self.events.emit(Event::SimulatorInfo {
                    message: GOTO_FAILURE.to_string(),
                });
                Err(GotoError::Unresolved(input.to_string()))
            }
        }
    }

    /// Stops, restores register defaults and zeroes memory below `$0600`.
    pub fn reset(&mut self) {
        self.running = false;
        self.cpu.memory_mut().clear_range(0x0000..RESET_PC);
        self.cpu.reset();
        log::debug!("simulator reset");
        self.events.emit(Event::Reset);
    }

    pub fn registers(&self) -> Registers {
        Registers {
            a: self.cpu.a(),
            x: self.cpu.x(),
            y: self.cpu.y(),
            p: self.cpu.status(),
            pc: self.cpu.pc(),
            sp: self.cpu.sp(),
        }
    }

    pub fn state(&self) -> SimulatorState {
        match (self.stepper, self.running) {
            (true, true) => SimulatorState::Debugging,
            (true, false) => SimulatorState::DebuggingPaused,
            (false, true) => SimulatorState::Running,
            (false, false) if self.registers().is_reset() => {
                if self.memory().has_data_from(RESET_PC) {
                    SimulatorState::Ready
                } else {
                    SimulatorState::Initialized
                }
            }
            (false, false) => SimulatorState::Stopped,
        }
    }

    pub fn current_pc(&self) -> u16 {
        self.cpu.pc()
    }

    /// Latches a key code into `$FF`.
    pub fn store_keypress(&mut self, code: u8) {
        self.cpu.memory_mut().store_keypress(code);
    }

    pub fn memory(&self) -> &Memory {
        self.cpu.memory()
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        self.cpu.memory_mut()
    }

    pub fn cpu(&self) -> &CPU<Memory> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CPU<Memory> {
        &mut self.cpu
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("cpu", &self.cpu)
            .field("running", &self.running)
            .field("stepper", &self.stepper)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::record;

    fn simulator(program: &[u8]) -> Simulator {
        let config = SimulatorConfig {
            random_seed: Some(1),
            ..SimulatorConfig::default()
        };
        let mut sim = Simulator::new(config);
        for (i, byte) in program.iter().enumerate() {
            sim.memory_mut().set(RESET_PC + i as u16, *byte);
        }
        sim
    }

    #[test]
    fn test_registers_display() {
        let sim = simulator(&[]);
        assert_eq!(
            sim.registers().to_string(),
            "A=$00 X=$00 Y=$00\nSP=$ff PC=$0600\nNV-BDIZC\n00110000"
        );
    }

    #[test]
    fn test_execute_is_noop_when_stopped() {
        let mut sim = simulator(&[0xE8]);
        sim.execute(false).unwrap();
        assert_eq!(sim.current_pc(), 0x0600);
        assert_eq!(sim.memory().get(RANDOM_ADDR), 0);
    }

    #[test]
    fn test_brk_ends_program() {
        let mut sim = simulator(&[0xE8, 0x00]);
        let log = record(sim.events());
        sim.run_binary();
        assert_eq!(sim.tick().unwrap(), 2);

        assert!(!sim.is_running());
        assert_eq!(sim.cpu().x(), 1);
        assert!(log.borrow().contains(&Event::SimulatorInfo {
            message: "Program end at PC=$0601".into()
        }));
        assert!(log.borrow().contains(&Event::Stop {
            reason: StopReason::ProgramEnd { pc: 0x0601 }
        }));
        assert_eq!(log.borrow().last(), Some(&Event::Multistep));
    }

    #[test]
    fn test_brk_while_debugging_pauses_without_ending() {
        let mut sim = simulator(&[0x00]);
        let log = record(sim.events());
        sim.enable_stepper(true);
        sim.debug_exec_step().unwrap();
        assert_eq!(sim.current_pc(), 0x0601);
        assert_eq!(*log.borrow(), vec![Event::Step]);
    }

    #[test]
    fn test_tick_respects_batch_size_and_stepper() {
        // JMP $0600
        let mut sim = simulator(&[0x4C, 0x00, 0x06]);
        sim.run_binary();
        assert_eq!(sim.tick().unwrap(), 97);
        assert_eq!(sim.cpu().instructions(), 97);

        sim.enable_stepper(true);
        assert_eq!(sim.tick().unwrap(), 0);
        assert_eq!(sim.state(), SimulatorState::Debugging);
    }

    #[test]
    fn test_random_cell_refreshed_each_instruction() {
        let mut sim = simulator(&[0xEA, 0xEA, 0xEA, 0xEA]);
        let mut seen = Vec::new();
        for _ in 0..4 {
            sim.debug_exec_step().unwrap();
            seen.push(sim.memory().get(RANDOM_ADDR));
        }
        seen.dedup();
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_parse_hex_address() {
        assert_eq!(parse_hex_address("$0600"), Some(0x0600));
        assert_eq!(parse_hex_address("0x1"), Some(0x0001));
        assert_eq!(parse_hex_address("0X0000"), Some(0x0000));
        assert_eq!(parse_hex_address("$10000"), None);
        assert_eq!(parse_hex_address("0600"), None);
        assert_eq!(parse_hex_address("$"), None);
    }
}
