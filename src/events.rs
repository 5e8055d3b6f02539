//! # Events
//!
//! Notification vocabulary shared by the assembler and the simulator, and the
//! synchronous observer bus that delivers it.
//!
//! Hosts subscribe once and receive every [`Event`] in the order it was raised.
//! Delivery happens inside the call that caused it: an observer registered on
//! a [`Session`](crate::Session) sees `step` before `debug_exec_step` returns.
//!
//! Observers must not emit or subscribe from inside a callback. A re-entrant
//! emit is dropped and logged at `warn` level.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::disassembler::Instruction;
use crate::error::FailureReason;

/// Why the simulator stopped running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The host toggled the run state off.
    Requested,
    /// BRK executed, or PC reached `$0000`. `pc` is the address of the last
    /// instruction byte fetched.
    ProgramEnd { pc: u16 },
    /// Execution hit a byte that is not an opcode.
    Fault { address: u16 },
    /// Execution hit CLI or SEI.
    Unimplemented,
}

/// Kind of pseudo-op notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoOpKind {
    /// `$42 $00`: write the accumulator as a character.
    Output,
}

impl PseudoOpKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PseudoOpKind::Output => "output",
        }
    }
}

/// Everything the core reports to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    AssembleSuccess { bytes_assembled: usize },
    AssembleFailure {
        line: usize,
        text: String,
        reason: FailureReason,
    },
    Hexdump { text: String },
    Disassembly { instructions: Vec<Instruction> },
    AssembleInfo { message: String },
    Start,
    Step,
    Multistep,
    Reset,
    Stop { reason: StopReason },
    Goto { address: u16 },
    SimulatorFailure { message: String },
    SimulatorInfo { message: String },
    PseudoOp { kind: PseudoOpKind, payload: u8 },
    LabelsInfo { message: String },
    LabelsFailure { message: String },
}

impl Event {
    /// Stable kebab-case identifier used by the JavaScript bindings.
    pub fn name(&self) -> &'static str {
        match self {
            Event::AssembleSuccess { .. } => "assemble-success",
            Event::AssembleFailure { .. } => "assemble-failure",
            Event::Hexdump { .. } => "hexdump",
            Event::Disassembly { .. } => "disassembly",
            Event::AssembleInfo { .. } => "assemble-info",
            Event::Start => "start",
            Event::Step => "step",
            Event::Multistep => "multistep",
            Event::Reset => "reset",
            Event::Stop { .. } => "stop",
            Event::Goto { .. } => "goto",
            Event::SimulatorFailure { .. } => "simulator-failure",
            Event::SimulatorInfo { .. } => "simulator-info",
            Event::PseudoOp { .. } => "pseudo-op",
            Event::LabelsInfo { .. } => "labels-info",
            Event::LabelsFailure { .. } => "labels-failure",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::AssembleSuccess { bytes_assembled } => {
                write!(f, "Code assembled successfully, {} bytes.", bytes_assembled)
            }
            Event::AssembleFailure { line, text, reason } => match reason {
                FailureReason::Syntax => write!(f, "Syntax error line {}: {}", line, text),
                FailureReason::BranchRange => {
                    write!(f, "Branch out of range line {}: {}", line, text)
                }
            },
            Event::Hexdump { text } => f.write_str(text),
            Event::Disassembly { instructions } => {
                write!(f, "{} instruction(s)", instructions.len())
            }
            Event::Goto { address } => write!(f, "${:04x}", address),
            Event::Stop { reason } => write!(f, "{:?}", reason),
            Event::PseudoOp { kind, payload } => write!(f, "{} ${:02x}", kind.as_str(), payload),
            Event::AssembleInfo { message }
            | Event::SimulatorFailure { message }
            | Event::SimulatorInfo { message }
            | Event::LabelsInfo { message }
            | Event::LabelsFailure { message } => f.write_str(message),
            Event::Start | Event::Step | Event::Multistep | Event::Reset => {
                f.write_str(self.name())
            }
        }
    }
}

type Observer = Box<dyn FnMut(&Event)>;

/// Shared, single-threaded observer list.
///
/// Cloning an `EventBus` yields a handle to the same observers, which is how
/// the assembler, the simulator and the session all report through one bus.
///
/// # Examples
///
/// ```
/// use edu6502::{Event, EventBus};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let bus = EventBus::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// bus.subscribe(move |event| sink.borrow_mut().push(event.name()));
///
/// bus.clone().emit(Event::Start);
/// assert_eq!(*seen.borrow(), vec!["start"]);
/// ```
#[derive(Clone, Default)]
pub struct EventBus {
    observers: Rc<RefCell<Vec<Observer>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer that receives every subsequent event.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: FnMut(&Event) + 'static,
    {
        match self.observers.try_borrow_mut() {
            Ok(mut observers) => observers.push(Box::new(observer)),
            Err(_) => log::warn!("subscribe from inside an event observer ignored"),
        }
    }

    /// Delivers `event` to every observer, in registration order.
    pub fn emit(&self, event: Event) {
        match self.observers.try_borrow_mut() {
            Ok(mut observers) => {
                for observer in observers.iter_mut() {
                    observer(&event);
                }
            }
            Err(_) => log::warn!("re-entrant {} event dropped", event.name()),
        }
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.try_borrow().map(|o| o.len()).ok())
            .finish()
    }
}

/// Test helper: subscribes a collector and returns the shared event log.
#[cfg(test)]
pub(crate) fn record(bus: &EventBus) -> Rc<RefCell<Vec<Event>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    log
}
