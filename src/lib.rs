//! # Educational 6502 Assembler and Simulator
//!
//! A two-pass 6502 assembler and an instruction-level NMOS 6502 simulator over
//! a flat 64KB memory, with a memory-mapped 32×32 display, keyboard latch and
//! random-number cell.
//!
//! Programs assemble to `$0600` and run from there. The simulator is not
//! cycle-accurate: it executes whole instructions, in batches driven by the
//! host's timer or one at a time under the stepper.
//!
//! ## Quick Start
//!
//! ```rust
//! use edu6502::{Session, SimulatorConfig};
//!
//! let mut session = Session::new(SimulatorConfig::default());
//! session
//!     .assemble("LDA #$01\nSTA $0200\nLDA #$05\nSTA $0201")
//!     .unwrap();
//!
//! assert_eq!(
//!     session.hexdump(),
//!     "0600: a9 01 8d 00 02 a9 05 8d 01 02 "
//! );
//!
//! session.run_binary();
//! session.tick().unwrap();
//!
//! assert_eq!(session.memory().get(0x0200), 0x01);
//! assert_eq!(session.memory().get(0x0201), 0x05);
//! ```
//!
//! ## Memory Map
//!
//! | Range           | Use                                         |
//! |-----------------|---------------------------------------------|
//! | `$00FE`         | fresh random byte before every instruction  |
//! | `$00FF`         | last key code                               |
//! | `$0100-$01FF`   | stack                                       |
//! | `$0200-$05FF`   | display, one byte per pixel (low nibble)    |
//! | `$0600-`        | program                                     |
//!
//! ## Modules
//!
//! - `assembler` - preprocessing, label indexing and encoding
//! - `disassembler` - decoding and listing format
//! - `cpu` - registers, flags and instruction execution
//! - `memory` - `MemoryBus` trait and the observable 64KB `Memory`
//! - `opcodes` - instruction set table and opcode decoding
//! - `simulator` - run state, stepping, goto and reset
//! - `display` - framebuffer mirroring the display region
//! - `events` - event vocabulary and observer bus
//! - `session` - everything above wired together
//! - `wasm` - JavaScript bindings (feature `wasm`)
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade. Install any logger in the host;
//! the `wasm` feature provides a browser console one in `wasm::logger`,
//! installed from JavaScript with `initLogging("info")`.

pub mod addressing;
pub mod assembler;
pub mod config;
pub mod cpu;
pub mod disassembler;
pub mod display;
pub mod error;
pub mod events;
pub mod memory;
pub mod opcodes;
pub mod session;
pub mod simulator;
pub mod wasm;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use assembler::labels::{Label, Labels};
pub use assembler::{Assembler, AssemblyReport, Segment};
pub use config::SimulatorConfig;
pub use cpu::CPU;
pub use disassembler::{disassemble, Instruction};
pub use display::{Display, Rgb, PALETTE};
pub use error::{AssembleError, ExecutionError, FailureReason, GotoError, LabelError};
pub use events::{Event, EventBus, PseudoOpKind, StopReason};
pub use memory::{FormatOptions, Memory, MemoryBus};
pub use opcodes::{Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use session::Session;
pub use simulator::{Registers, Simulator, SimulatorState};
