//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute step.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields)
//! - **Instruction counter**: number of instructions executed
//!
//! ## Execution Model
//!
//! There is no cycle accounting. `step()` runs exactly one instruction, or
//! fails without side effects beyond the opcode fetch.
//!
//! Conditions the CPU cannot report through its return value (stack wrap,
//! character output, BRK) are queued as [`Signal`]s for the
//! [`Simulator`](crate::Simulator) to drain after each step.

use crate::instructions;
use crate::opcodes::{decode, PSEUDO_OP};
use crate::{AddressingMode, ExecutionError, MemoryBus};

/// Address the program counter starts at after reset.
pub const RESET_PC: u16 = 0x0600;

/// Stack pointer after reset.
pub const RESET_SP: u8 = 0xFF;

/// Status register after reset (bit 5 and B set).
pub const RESET_STATUS: u8 = 0x30;

/// Base address of the stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Direction of a stack pointer wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackWrap {
    /// A push at SP=$00 wrapped SP to $FF.
    Filled,
    /// A pull at SP=$FF wrapped SP to $00.
    Emptied,
}

/// Side conditions raised by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    StackWrapped(StackWrap),
    /// The output pseudo-op wrote the accumulator.
    Output(u8),
    /// BRK executed.
    Halt,
}

/// 6502 CPU state and execution context.
///
/// The CPU struct contains all processor state including registers, flags, program counter,
/// and stack pointer. It is generic over the memory implementation via the
/// `MemoryBus` trait.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use edu6502::{CPU, Memory, MemoryBus};
///
/// let mut memory = Memory::new();
/// memory.write(0x0600, 0xA9); // LDA #$2A
/// memory.write(0x0601, 0x2A);
///
/// let mut cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x0600);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert_eq!(cpu.status(), 0x30);
///
/// cpu.step().unwrap();
/// assert_eq!(cpu.a(), 0x2A);
/// assert_eq!(cpu.pc(), 0x0602);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Break flag
    pub(crate) flag_b: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow/underflow)
    pub(crate) flag_c: bool,

    /// Instructions executed since reset
    pub(crate) instructions: u64,

    /// Conditions raised since the last `take_signals`
    pub(crate) signals: Vec<Signal>,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU over `memory` in the reset state:
    /// A=X=Y=0, PC=$0600, SP=$FF, P=$30.
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: RESET_PC,
            sp: RESET_SP,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            instructions: 0,
            signals: Vec::new(),
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Restores registers and flags to their reset values. Memory is untouched.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.pc = RESET_PC;
        self.sp = RESET_SP;
        self.set_status(RESET_STATUS);
        self.instructions = 0;
        self.signals.clear();
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// 1. Fetch the opcode at PC (PC is incremented)
    /// 2. `$42` runs the output pseudo-op
    /// 3. Otherwise decode through the opcode table and dispatch
    ///
    /// # Errors
    ///
    /// - [`ExecutionError::UnknownOpcode`] for a byte that is not an opcode
    /// - [`ExecutionError::Unimplemented`] for CLI and SEI
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        let address = self.pc;
        let opcode = self.fetch_byte();

        if opcode == PSEUDO_OP {
            instructions::control::execute_pseudo_op(self);
            self.instructions += 1;
            return Ok(());
        }

        let metadata = decode(opcode).ok_or(ExecutionError::UnknownOpcode { opcode, address })?;
        instructions::execute(self, metadata)?;
        self.instructions += 1;

        Ok(())
    }

    /// Drains the signals raised since the previous call.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    // ========== Fetch and Addressing ==========

    /// Reads the byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads a little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Reads a pointer from zero page, wrapping the high byte within page zero.
    fn zero_page_word(&self, zp: u8) -> u16 {
        let lo = self.memory.read(zp as u16) as u16;
        let hi = self.memory.read(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    /// Consumes the operand bytes for `mode` and returns the effective address.
    ///
    /// Immediate and Relative operands resolve to the address of the operand
    /// byte itself. Implicit and Accumulator consume nothing and return PC.
    pub(crate) fn operand_address(&mut self, mode: AddressingMode) -> u16 {
        use AddressingMode::*;
        match mode {
            Implicit | Accumulator => self.pc,
            Immediate | Relative => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                addr
            }
            ZeroPage => self.fetch_byte() as u16,
            ZeroPageX => self.fetch_byte().wrapping_add(self.x) as u16,
            ZeroPageY => self.fetch_byte().wrapping_add(self.y) as u16,
            Absolute => self.fetch_word(),
            AbsoluteX => self.fetch_word().wrapping_add(self.x as u16),
            AbsoluteY => self.fetch_word().wrapping_add(self.y as u16),
            Indirect => {
                let ptr = self.fetch_word();
                self.memory.read_word(ptr)
            }
            IndirectX => {
                let zp = self.fetch_byte().wrapping_add(self.x);
                self.zero_page_word(zp)
            }
            IndirectY => {
                let zp = self.fetch_byte();
                self.zero_page_word(zp).wrapping_add(self.y as u16)
            }
        }
    }

    /// Consumes the operand bytes for `mode` and returns the operand value.
    pub(crate) fn operand_value(&mut self, mode: AddressingMode) -> u8 {
        match mode {
            AddressingMode::Accumulator => self.a,
            _ => {
                let addr = self.operand_address(mode);
                self.memory.read(addr)
            }
        }
    }

    /// Applies `op` to the accumulator or to the memory operand in place and
    /// returns the new value.
    pub(crate) fn modify<F>(&mut self, mode: AddressingMode, op: F) -> u8
    where
        F: FnOnce(&mut Self, u8) -> u8,
    {
        if mode == AddressingMode::Accumulator {
            let value = self.a;
            let result = op(self, value);
            self.a = result;
            result
        } else {
            let addr = self.operand_address(mode);
            let value = self.memory.read(addr);
            let result = op(self, value);
            self.memory.write(addr, result);
            result
        }
    }

    // ========== Stack ==========

    /// Pushes a byte, wrapping SP from $00 to $FF.
    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        if self.sp == 0x00 {
            self.signals.push(Signal::StackWrapped(StackWrap::Filled));
        }
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pulls a byte, wrapping SP from $FF to $00.
    pub(crate) fn pop(&mut self) -> u8 {
        if self.sp == 0xFF {
            self.signals.push(Signal::StackWrapped(StackWrap::Emptied));
        }
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    /// Updates Z and N from an 8-bit result.
    pub(crate) fn set_nz(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    pub fn status(&self) -> u8 {
        let mut status: u8 = 0b00100000;

        if self.flag_n {
            status |= 0b10000000;
        }
        if self.flag_v {
            status |= 0b01000000;
        }
        if self.flag_b {
            status |= 0b00010000;
        }
        if self.flag_d {
            status |= 0b00001000;
        }
        if self.flag_i {
            status |= 0b00000100;
        }
        if self.flag_z {
            status |= 0b00000010;
        }
        if self.flag_c {
            status |= 0b00000001;
        }

        status
    }

    /// Unpacks a status byte into the individual flags.
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = value & 0b10000000 != 0;
        self.flag_v = value & 0b01000000 != 0;
        self.flag_b = value & 0b00010000 != 0;
        self.flag_d = value & 0b00001000 != 0;
        self.flag_i = value & 0b00000100 != 0;
        self.flag_z = value & 0b00000010 != 0;
        self.flag_c = value & 0b00000001 != 0;
    }

    /// Returns the number of instructions executed since reset.
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    /// Returns a reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }
}

impl<M: MemoryBus> std::fmt::Debug for CPU<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("a", &self.a)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("pc", &self.pc)
            .field("sp", &self.sp)
            .field("p", &self.status())
            .finish_non_exhaustive()
    }
}
