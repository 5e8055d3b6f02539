//! # Memory
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from a
//! specific memory implementation, and [`Memory`], the flat 64KB address space
//! the assembler writes into and the simulator executes from.
//!
//! ## Memory Map
//!
//! Nothing below is enforced structurally; these are the conventions the
//! simulator and its hosts agree on:
//!
//! | Range           | Use                                             |
//! |-----------------|-------------------------------------------------|
//! | `$0000-$00FF`   | Zero page                                       |
//! | `$00FE`         | Pseudo-random byte, refreshed every instruction |
//! | `$00FF`         | Last key pressed                                |
//! | `$0100-$01FF`   | Stack                                           |
//! | `$0200-$05FF`   | 32x32 display, one palette index per cell       |
//! | `$0600-`        | Default program origin                          |
//!
//! ## Change Notification
//!
//! Every write through [`Memory::set`] calls the registered listeners
//! synchronously with the address and new value. Listeners must not write to
//! memory themselves.

use std::fmt::Write as _;
use std::ops::Range;

/// Size of the 6502 address space.
pub const MEMORY_SIZE: usize = 0x10000;

/// Cell holding the last key code stored by the host.
pub const KEYPRESS_ADDR: u16 = 0x00FF;

/// Cell refreshed with a pseudo-random byte before every instruction.
pub const RANDOM_ADDR: u16 = 0x00FE;

/// First cell of the memory-mapped display.
pub const DISPLAY_START: u16 = 0x0200;

/// One past the last cell of the memory-mapped display.
pub const DISPLAY_END: u16 = 0x0600;

/// Memory bus trait for CPU to read/write bytes.
///
/// # Design
///
/// - `read(&self)`: Immutable reference allows shared reads
/// - `write(&mut self)`: Mutable reference makes side effects explicit
/// - No error types: 6502 hardware has no bus error mechanism
///
/// # Examples
///
/// ```
/// use edu6502::{Memory, MemoryBus};
///
/// let mut mem = Memory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// This method must never panic.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian word; the high byte address wraps at `$FFFF`.
    fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

/// Controls the layout of [`Memory::format`] output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Prefix each 16-byte row with `HHHH: `.
    pub include_address: bool,

    /// Follow every byte with a space.
    pub include_spaces: bool,

    /// Separate rows with a newline.
    pub include_newline: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            include_address: true,
            include_spaces: true,
            include_newline: true,
        }
    }
}

type ChangeListener = Box<dyn FnMut(u16, u8)>;

/// Flat 64KB memory with change notification.
///
/// # Examples
///
/// ```
/// use edu6502::Memory;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let mut memory = Memory::new();
/// let last = Rc::new(Cell::new(None));
/// let seen = Rc::clone(&last);
/// memory.subscribe(move |addr, value| seen.set(Some((addr, value))));
///
/// memory.set(0x0200, 0x05);
/// assert_eq!(memory.get(0x0200), 0x05);
/// assert_eq!(last.get(), Some((0x0200, 0x05)));
/// ```
pub struct Memory {
    /// 64KB contiguous memory array
    data: Box<[u8; MEMORY_SIZE]>,
    listeners: Vec<ChangeListener>,
}

impl Memory {
    /// Creates a new memory with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; MEMORY_SIZE]),
            listeners: Vec::new(),
        }
    }

    /// Registers a listener called after every write with `(address, value)`.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(u16, u8) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Returns the byte at `addr`.
    pub fn get(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    /// Stores `value` at `addr` and notifies listeners.
    pub fn set(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
        for listener in self.listeners.iter_mut() {
            listener(addr, value);
        }
    }

    /// Write path used by instruction execution. Same as [`Memory::set`].
    pub fn store_byte(&mut self, addr: u16, value: u8) {
        self.set(addr, value);
    }

    /// Little-endian word at `addr`.
    pub fn get_word(&self, addr: u16) -> u16 {
        self.read_word(addr)
    }

    /// Latches a key code into [`KEYPRESS_ADDR`].
    pub fn store_keypress(&mut self, code: u8) {
        self.set(KEYPRESS_ADDR, code);
    }

    /// Zeroes every cell in `range` through [`Memory::set`], so listeners see
    /// the cleared cells.
    pub fn clear_range(&mut self, range: Range<u16>) {
        for addr in range {
            self.set(addr, 0x00);
        }
    }

    /// Returns true if any byte at or above `start` is non-zero.
    pub fn has_data_from(&self, start: u16) -> bool {
        self.data[start as usize..].iter().any(|&b| b != 0)
    }

    /// Formats `length` bytes starting at `start` as a hex dump, sixteen bytes
    /// per row. The window is clamped to the 64KB address space.
    ///
    /// # Examples
    ///
    /// ```
    /// use edu6502::{FormatOptions, Memory};
    ///
    /// let mut memory = Memory::new();
    /// memory.set(0x0600, 0xA9);
    /// memory.set(0x0601, 0x01);
    ///
    /// assert_eq!(memory.format(0x0600, 2, FormatOptions::default()), "0600: a9 01 ");
    ///
    /// let bare = FormatOptions { include_address: false, include_spaces: false, include_newline: false };
    /// assert_eq!(memory.format(0x0600, 2, bare), "a901");
    /// ```
    pub fn format(&self, start: usize, length: usize, options: FormatOptions) -> String {
        let start = start.min(MEMORY_SIZE - 1);
        let end = start.saturating_add(length).min(MEMORY_SIZE);
        let mut out = String::with_capacity((end - start) * 3 + (end - start) / 16 * 7);

        for (offset, addr) in (start..end).enumerate() {
            if offset % 16 == 0 {
                if offset > 0 && options.include_newline {
                    out.push('\n');
                }
                if options.include_address {
                    let _ = write!(out, "{:04x}: ", addr);
                }
            }
            let _ = write!(out, "{:02x}", self.data[addr]);
            if options.include_spaces {
                out.push(' ');
            }
        }

        out
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl MemoryBus for Memory {
    fn read(&self, addr: u16) -> u8 {
        self.get(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.store_byte(addr, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_memory_read_write() {
        let mut mem = Memory::new();

        assert_eq!(mem.get(0x0000), 0x00);
        assert_eq!(mem.get(0xFFFF), 0x00);

        mem.set(0x1234, 0x42);
        assert_eq!(mem.get(0x1234), 0x42);
        assert_eq!(mem.get(0x1233), 0x00);
        assert_eq!(mem.get(0x1235), 0x00);
    }

    #[test]
    fn test_get_word_little_endian_and_wrapping() {
        let mut mem = Memory::new();
        mem.set(0x0010, 0x34);
        mem.set(0x0011, 0x12);
        assert_eq!(mem.get_word(0x0010), 0x1234);

        mem.set(0xFFFF, 0xCD);
        mem.set(0x0000, 0xAB);
        assert_eq!(mem.get_word(0xFFFF), 0xABCD);
    }

    #[test]
    fn test_listeners_see_every_write_in_order() {
        let mut mem = Memory::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        mem.subscribe(move |addr, value| sink.borrow_mut().push((addr, value)));

        mem.set(0x0200, 1);
        mem.store_byte(0x0201, 2);
        mem.store_keypress(0x41);

        assert_eq!(
            *log.borrow(),
            vec![(0x0200, 1), (0x0201, 2), (KEYPRESS_ADDR, 0x41)]
        );
    }

    #[test]
    fn test_format_rows_and_clamping() {
        let mut mem = Memory::new();
        for i in 0..18u16 {
            mem.set(0x0600 + i, i as u8);
        }
        let dump = mem.format(0x0600, 18, FormatOptions::default());
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("0600: 00 01 02"));
        assert_eq!(lines[1], "0610: 10 11 ");

        let tail = mem.format(0xFFFE, 10, FormatOptions::default());
        assert_eq!(tail, "fffe: 00 00 ");
    }

    #[test]
    fn test_format_without_newlines_joins_rows() {
        let mem = Memory::new();
        let options = FormatOptions {
            include_address: false,
            include_spaces: true,
            include_newline: false,
        };
        let dump = mem.format(0, 32, options);
        assert!(!dump.contains('\n'));
        assert_eq!(dump.len(), 32 * 3);
    }

    #[test]
    fn test_clear_range_and_has_data() {
        let mut mem = Memory::new();
        mem.set(0x0100, 7);
        mem.set(0x0700, 9);
        assert!(mem.has_data_from(0x0600));

        mem.clear_range(0x0000..0x0600);
        assert_eq!(mem.get(0x0100), 0);
        assert_eq!(mem.get(0x0700), 9);
    }
}
