//! # Session
//!
//! One assembler, one simulator and one display sharing a single memory and
//! event bus. This is the surface a host drives: an editor assembles, a timer
//! calls [`Session::tick`], buttons map onto the remaining methods.

use std::cell::RefCell;
use std::rc::Rc;

use crate::assembler::{Assembler, AssemblyReport};
use crate::config::SimulatorConfig;
use crate::disassembler::Instruction;
use crate::display::Display;
use crate::error::{AssembleError, ExecutionError, GotoError};
use crate::events::{Event, EventBus};
use crate::memory::Memory;
use crate::simulator::{Registers, Simulator, SimulatorState};

/// Assembler, simulator and display bound together.
///
/// # Examples
///
/// ```
/// use edu6502::{Session, SimulatorConfig};
///
/// let mut session = Session::new(SimulatorConfig::default());
/// session
///     .assemble("LDA #$01\nSTA $0200\nLDA #$05\nSTA $0201")
///     .unwrap();
///
/// session.run_binary();
/// session.tick().unwrap();
///
/// assert_eq!(session.memory().get(0x0201), 0x05);
/// assert_eq!(session.display().borrow().pixel(0, 0), 0x01);
/// assert_eq!(session.display().borrow().pixel(1, 0), 0x05);
/// ```
pub struct Session {
    assembler: Assembler,
    simulator: Simulator,
    display: Rc<RefCell<Display>>,
    events: EventBus,
}

impl Session {
    pub fn new(config: SimulatorConfig) -> Self {
        let events = EventBus::new();
        let mut memory = Memory::new();
        let display = Display::attach(&mut memory);

        Self {
            assembler: Assembler::with_events(events.clone()),
            simulator: Simulator::with_memory(memory, config, events.clone()),
            display,
            events,
        }
    }

    /// Resets the simulator, then assembles `source` into memory at `$0600`.
    pub fn assemble(&mut self, source: &str) -> Result<AssemblyReport, AssembleError> {
        self.simulator.reset();
        self.assembler
            .assemble_code(source, self.simulator.memory_mut())
    }

    pub fn run_binary(&mut self) {
        self.simulator.run_binary();
    }

    pub fn tick(&mut self) -> Result<usize, ExecutionError> {
        self.simulator.tick()
    }

    pub fn debug_exec_step(&mut self) -> Result<(), ExecutionError> {
        self.simulator.debug_exec_step()
    }

    pub fn enable_stepper(&mut self, enabled: bool) {
        self.simulator.enable_stepper(enabled);
    }

    pub fn reset(&mut self) {
        self.simulator.reset();
    }

    /// Jumps to a label from the last assembly, or a `$`/`0x` hex address.
    pub fn goto_addr(&mut self, input: &str) -> Result<u16, GotoError> {
        self.simulator.goto_addr(input, self.assembler.labels())
    }

    pub fn hexdump(&self) -> String {
        self.assembler.hexdump(self.simulator.memory())
    }

    pub fn disassemble(&self) -> Vec<Instruction> {
        self.assembler.disassemble(self.simulator.memory())
    }

    pub fn store_keypress(&mut self, code: u8) {
        self.simulator.store_keypress(code);
    }

    pub fn registers(&self) -> Registers {
        self.simulator.registers()
    }

    pub fn state(&self) -> SimulatorState {
        self.simulator.state()
    }

    pub fn memory(&self) -> &Memory {
        self.simulator.memory()
    }

    pub fn display(&self) -> &Rc<RefCell<Display>> {
        &self.display
    }

    /// Registers an observer for every event from the assembler and the
    /// simulator.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.events.subscribe(observer);
    }

    pub fn assembler(&self) -> &Assembler {
        &self.assembler
    }

    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::StopReason;

    #[test]
    fn test_assemble_resets_previous_run() {
        let mut session = Session::default();
        session.assemble("LDA #$03\nSTA $0200").unwrap();
        session.run_binary();
        session.tick().unwrap();
        assert_eq!(session.display().borrow().pixel(0, 0), 0x03);

        session.assemble("NOP").unwrap();
        assert_eq!(session.registers().pc, 0x0600);
        assert_eq!(session.memory().get(0x0200), 0x00);
        assert_eq!(session.display().borrow().pixel(0, 0), 0x00);
        assert_eq!(session.state(), SimulatorState::Ready);
    }

    #[test]
    fn test_goto_uses_assembled_labels() {
        let mut session = Session::default();
        session.assemble("NOP\nNOP\nhere: BRK").unwrap();
        assert_eq!(session.goto_addr("here"), Ok(0x0602));
        assert_eq!(session.registers().pc, 0x0602);
        assert!(session.goto_addr("there").is_err());
    }

    #[test]
    fn test_events_from_both_halves_share_one_bus() {
        let mut session = Session::default();
        let names = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&names);
        session.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        session.assemble("BRK").unwrap();
        session.run_binary();
        session.tick().unwrap();

        let events = names.borrow();
        assert_eq!(events.first(), Some(&Event::Reset));
        assert!(events.contains(&Event::AssembleSuccess { bytes_assembled: 1 }));
        assert!(events.contains(&Event::Stop {
            reason: StopReason::ProgramEnd { pc: 0x0600 }
        }));
    }

    #[test]
    fn test_keypress_visible_to_program() {
        let mut session = Session::default();
        session.assemble("LDA $ff\nSTA $0200").unwrap();
        session.store_keypress(0x77);
        session.run_binary();
        session.tick().unwrap();
        assert_eq!(session.memory().get(0x0200), 0x77);
    }
}
