//! Tests for the observable 64KB memory.

use edu6502::memory::{KEYPRESS_ADDR, RANDOM_ADDR};
use edu6502::{FormatOptions, Memory, MemoryBus};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_new_memory_is_zeroed() {
    let memory = Memory::new();
    assert_eq!(memory.get(0x0000), 0);
    assert_eq!(memory.get(0xFFFF), 0);
    assert!(!memory.has_data_from(0x0000));
}

#[test]
fn test_listeners_see_every_write_in_order() {
    let mut memory = Memory::new();
    let writes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&writes);
    memory.subscribe(move |addr, value| sink.borrow_mut().push((addr, value)));

    memory.set(0x0200, 0x01);
    memory.write(0x0201, 0x02);
    memory.store_keypress(0x61);

    assert_eq!(
        *writes.borrow(),
        vec![(0x0200, 0x01), (0x0201, 0x02), (KEYPRESS_ADDR, 0x61)]
    );
}

#[test]
fn test_clear_range_notifies() {
    let mut memory = Memory::new();
    memory.set(RANDOM_ADDR, 0x99);

    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    memory.subscribe(move |_, _| *sink.borrow_mut() += 1);

    memory.clear_range(0x0000..0x0600);

    assert_eq!(memory.get(RANDOM_ADDR), 0x00);
    assert_eq!(*count.borrow(), 0x0600);
}

#[test]
fn test_get_word_little_endian_and_wrapping() {
    let mut memory = Memory::new();
    memory.set(0x1000, 0x34);
    memory.set(0x1001, 0x12);
    memory.set(0xFFFF, 0xCD);
    memory.set(0x0000, 0xAB);

    assert_eq!(memory.get_word(0x1000), 0x1234);
    assert_eq!(memory.get_word(0xFFFF), 0xABCD);
}

#[test]
fn test_has_data_from() {
    let mut memory = Memory::new();
    memory.set(0x05FF, 0x01);
    assert!(!memory.has_data_from(0x0600));
    memory.set(0xFFFF, 0x01);
    assert!(memory.has_data_from(0x0600));
}

#[test]
fn test_format_rows_of_sixteen() {
    let mut memory = Memory::new();
    for i in 0..18u16 {
        memory.set(0x0600 + i, i as u8);
    }

    let text = memory.format(0x0600, 18, FormatOptions::default());
    let rows: Vec<&str> = text.split('\n').collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        "0600: 00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f "
    );
    assert_eq!(rows[1], "0610: 10 11 ");
}

#[test]
fn test_format_without_newlines() {
    let memory = Memory::new();
    let options = FormatOptions {
        include_newline: false,
        ..FormatOptions::default()
    };
    let text = memory.format(0x0000, 32, options);
    assert!(!text.contains('\n'));
    assert!(text.contains("0010: "));
}

#[test]
fn test_format_clamps_at_end_of_memory() {
    let mut memory = Memory::new();
    memory.set(0xFFFF, 0xEE);
    assert_eq!(memory.format(0xFFFF, 16, FormatOptions::default()), "ffff: ee ");
}
