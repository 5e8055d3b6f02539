//! # Display
//!
//! 32×32 pixel framebuffer mirroring the memory region `$0200-$05FF`. Each
//! byte selects one of 16 [`PALETTE`] entries through its low nibble; rows run
//! left to right, top to bottom, 32 bytes per row.
//!
//! The display never reads memory directly. [`Display::attach`] subscribes to
//! memory changes, so the grid stays in sync with every write from the
//! assembler, the CPU or a reset.

use std::cell::RefCell;
use std::rc::Rc;

use crate::memory::{Memory, DISPLAY_END, DISPLAY_START};

/// Width and height of the grid in pixels.
pub const DISPLAY_SIZE: usize = 32;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` notation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Black, white, red, cyan, purple, green, blue, yellow, orange, brown,
/// light red, dark grey, grey, light green, light blue, light grey.
pub const PALETTE: [Rgb; 16] = [
    Rgb(0x00, 0x00, 0x00),
    Rgb(0xff, 0xff, 0xff),
    Rgb(0x88, 0x00, 0x00),
    Rgb(0xaa, 0xff, 0xee),
    Rgb(0xcc, 0x44, 0xcc),
    Rgb(0x00, 0xcc, 0x55),
    Rgb(0x00, 0x00, 0xaa),
    Rgb(0xee, 0xee, 0x77),
    Rgb(0xdd, 0x88, 0x55),
    Rgb(0x66, 0x44, 0x00),
    Rgb(0xff, 0x77, 0x77),
    Rgb(0x33, 0x33, 0x33),
    Rgb(0x77, 0x77, 0x77),
    Rgb(0xaa, 0xff, 0x66),
    Rgb(0x00, 0x88, 0xff),
    Rgb(0xbb, 0xbb, 0xbb),
];

/// Grid coordinates for a display address, or `None` outside the region.
///
/// ```
/// use edu6502::display::pixel_for_address;
///
/// assert_eq!(pixel_for_address(0x0200), Some((0, 0)));
/// assert_eq!(pixel_for_address(0x0221), Some((1, 1)));
/// assert_eq!(pixel_for_address(0x05FF), Some((31, 31)));
/// assert_eq!(pixel_for_address(0x0600), None);
/// ```
pub fn pixel_for_address(addr: u16) -> Option<(usize, usize)> {
    if !(DISPLAY_START..DISPLAY_END).contains(&addr) {
        return None;
    }
    let offset = (addr - DISPLAY_START) as usize;
    Some((offset % DISPLAY_SIZE, offset / DISPLAY_SIZE))
}

/// Palette-indexed framebuffer.
#[derive(Debug, Clone)]
pub struct Display {
    pixels: [u8; DISPLAY_SIZE * DISPLAY_SIZE],
}

impl Display {
    /// A black display, not attached to any memory.
    pub fn new() -> Self {
        Self {
            pixels: [0; DISPLAY_SIZE * DISPLAY_SIZE],
        }
    }

    /// Creates a display seeded from the current contents of `memory` and
    /// keeps it updated through a change listener.
    ///
    /// # Examples
    ///
    /// ```
    /// use edu6502::display::{Display, PALETTE};
    /// use edu6502::Memory;
    ///
    /// let mut memory = Memory::new();
    /// let display = Display::attach(&mut memory);
    ///
    /// memory.set(0x0200, 0x11);
    /// assert_eq!(display.borrow().pixel(0, 0), 0x01);
    /// assert_eq!(display.borrow().color(0, 0), PALETTE[1]);
    /// ```
    pub fn attach(memory: &mut Memory) -> Rc<RefCell<Display>> {
        let mut display = Display::new();
        for addr in DISPLAY_START..DISPLAY_END {
            display.update(addr, memory.get(addr));
        }

        let display = Rc::new(RefCell::new(display));
        let listener = Rc::clone(&display);
        memory.subscribe(move |addr, value| match listener.try_borrow_mut() {
            Ok(mut display) => display.update(addr, value),
            Err(_) => log::warn!("display busy, dropped write to ${:04x}", addr),
        });
        display
    }

    /// Applies a memory write. Addresses outside the display are ignored.
    pub fn update(&mut self, addr: u16, value: u8) {
        if let Some((x, y)) = pixel_for_address(addr) {
            self.pixels[y * DISPLAY_SIZE + x] = value & 0x0F;
        }
    }

    /// Palette index at `(x, y)`; coordinates wrap at 32.
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[(y % DISPLAY_SIZE) * DISPLAY_SIZE + x % DISPLAY_SIZE]
    }

    pub fn color(&self, x: usize, y: usize) -> Rgb {
        PALETTE[self.pixel(x, y) as usize]
    }

    /// Row-major RGBA bytes, 4 per pixel, alpha always `0xFF`.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&index| {
                let Rgb(r, g, b) = PALETTE[index as usize];
                [r, g, b, 0xFF]
            })
            .collect()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_seeds_from_memory() {
        let mut memory = Memory::new();
        memory.set(0x05FF, 0x0E);
        let display = Display::attach(&mut memory);
        assert_eq!(display.borrow().pixel(31, 31), 0x0E);
    }

    #[test]
    fn test_writes_outside_region_ignored() {
        let mut memory = Memory::new();
        let display = Display::attach(&mut memory);
        memory.set(0x01FF, 0x01);
        memory.set(0x0600, 0x01);
        assert!(display.borrow().pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_clear_range_blanks_display() {
        let mut memory = Memory::new();
        let display = Display::attach(&mut memory);
        memory.set(0x0300, 0x05);
        memory.clear_range(0x0000..0x0600);
        assert_eq!(display.borrow().pixel(0, 8), 0);
    }

    #[test]
    fn test_to_rgba() {
        let mut memory = Memory::new();
        let display = Display::attach(&mut memory);
        memory.set(0x0201, 0x02);

        let rgba = display.borrow().to_rgba();
        assert_eq!(rgba.len(), DISPLAY_SIZE * DISPLAY_SIZE * 4);
        assert_eq!(&rgba[0..4], &[0x00, 0x00, 0x00, 0xFF]);
        assert_eq!(&rgba[4..8], &[0x88, 0x00, 0x00, 0xFF]);
    }

    #[test]
    fn test_palette_hex() {
        assert_eq!(PALETTE[3].to_hex(), "#aaffee");
        assert_eq!(PALETTE[15].to_hex(), "#bbbbbb");
    }
}
