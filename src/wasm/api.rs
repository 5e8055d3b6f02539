//! WASM API for the educational 6502 simulator.
//!
//! Wraps a [`Session`] for JavaScript. Every event is forwarded to a callback
//! as `(eventName, payload)`, where `payload` is a plain object (or
//! `undefined` for events without data).

use wasm_bindgen::prelude::*;

use crate::disassembler::formatter::format_instruction;
use crate::disassembler::Instruction;
use crate::error::FailureReason;
use crate::events::{Event, StopReason};
use crate::memory::FormatOptions;
use crate::{Session, SimulatorConfig};

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

/// One decoded instruction for the listing view
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    mnemonic: String,
    text: String,
}

impl From<&Instruction> for DisassemblyLine {
    fn from(instr: &Instruction) -> Self {
        DisassemblyLine {
            address: instr.address,
            bytes: instr.bytes(),
            mnemonic: instr.mnemonic.to_string(),
            text: format_instruction(instr),
        }
    }
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mnemonic(&self) -> String {
        self.mnemonic.clone()
    }

    /// Formatted instruction, e.g. `LDA #$01`.
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

fn set(target: &js_sys::Object, key: &str, value: JsValue) {
    // Reflect::set only fails on frozen objects or proxies
    let _ = js_sys::Reflect::set(target, &JsValue::from_str(key), &value);
}

fn object(fields: &[(&str, JsValue)]) -> JsValue {
    let obj = js_sys::Object::new();
    for (key, value) in fields {
        set(&obj, key, value.clone());
    }
    obj.into()
}

fn stop_payload(reason: &StopReason) -> JsValue {
    match reason {
        StopReason::Requested => object(&[("reason", "requested".into())]),
        StopReason::ProgramEnd { pc } => {
            object(&[("reason", "program-end".into()), ("pc", (*pc).into())])
        }
        StopReason::Fault { address } => {
            object(&[("reason", "fault".into()), ("address", (*address).into())])
        }
        StopReason::Unimplemented => object(&[("reason", "unimplemented".into())]),
    }
}

/// Builds the JavaScript payload for an event.
fn event_payload(event: &Event) -> JsValue {
    match event {
        Event::AssembleSuccess { bytes_assembled } => {
            object(&[("bytesAssembled", (*bytes_assembled as u32).into())])
        }
        Event::AssembleFailure { line, text, reason } => {
            let reason = match reason {
                FailureReason::Syntax => "syntax",
                FailureReason::BranchRange => "branch-range",
            };
            object(&[
                ("line", (*line as u32).into()),
                ("text", text.as_str().into()),
                ("reason", reason.into()),
            ])
        }
        Event::Hexdump { text } => object(&[("text", text.as_str().into())]),
        Event::Disassembly { instructions } => {
            let lines: js_sys::Array = instructions
                .iter()
                .map(|instr| JsValue::from(DisassemblyLine::from(instr)))
                .collect();
            object(&[("instructions", lines.into())])
        }
        Event::AssembleInfo { message }
        | Event::SimulatorFailure { message }
        | Event::SimulatorInfo { message }
        | Event::LabelsInfo { message }
        | Event::LabelsFailure { message } => object(&[("message", message.as_str().into())]),
        Event::Stop { reason } => stop_payload(reason),
        Event::Goto { address } => object(&[("address", (*address).into())]),
        Event::PseudoOp { kind, payload } => object(&[
            ("kind", kind.as_str().into()),
            ("payload", (*payload).into()),
        ]),
        Event::Start | Event::Step | Event::Multistep | Event::Reset => JsValue::UNDEFINED,
    }
}

/// Main simulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator6502 {
    session: Session,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Creates a session whose events are delivered to `on_event`.
    #[wasm_bindgen(constructor)]
    pub fn new(on_event: js_sys::Function) -> Self {
        let session = Session::new(SimulatorConfig::default());
        session.subscribe(move |event| {
            let name = JsValue::from_str(event.name());
            if let Err(err) = on_event.call2(&JsValue::NULL, &name, &event_payload(event)) {
                log::warn!("event callback threw: {:?}", err);
            }
        });
        Emulator6502 { session }
    }

    /// Assemble source into memory at $0600. Failures are also reported as
    /// events.
    pub fn assemble(&mut self, source: &str) -> Result<u32, JsError> {
        self.session
            .assemble(source)
            .map(|report| report.bytes_assembled as u32)
            .map_err(js_error)
    }

    /// Toggle between running and stopped
    pub fn run_binary(&mut self) {
        self.session.run_binary();
    }

    /// Timer body; returns the number of instructions executed
    pub fn tick(&mut self) -> Result<u32, JsError> {
        self.session.tick().map(|n| n as u32).map_err(js_error)
    }

    /// Host timer period in milliseconds
    #[wasm_bindgen(getter)]
    pub fn tick_interval_ms(&self) -> u32 {
        self.session.simulator().config().tick_interval.as_millis() as u32
    }

    pub fn debug_exec_step(&mut self) -> Result<(), JsError> {
        self.session.debug_exec_step().map_err(js_error)
    }

    pub fn enable_stepper(&mut self, enabled: bool) {
        self.session.enable_stepper(enabled);
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn goto_addr(&mut self, input: &str) -> Result<u16, JsError> {
        self.session.goto_addr(input).map_err(js_error)
    }

    pub fn store_keypress(&mut self, code: u8) {
        self.session.store_keypress(code);
    }

    /// Hex dump of the assembled program
    pub fn hexdump(&self) -> String {
        self.session.hexdump()
    }

    /// Disassembly of the assembled program
    pub fn disassemble(&self) -> Vec<JsValue> {
        self.session
            .disassemble()
            .iter()
            .map(|instr| JsValue::from(DisassemblyLine::from(instr)))
            .collect()
    }

    /// Debugger panel text
    pub fn registers_text(&self) -> String {
        self.session.registers().to_string()
    }

    /// Simulator state name, e.g. `"running"`
    pub fn state(&self) -> String {
        format!("{:?}", self.session.state()).to_lowercase()
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.session.registers().a
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.session.registers().x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.session.registers().y
    }

    #[wasm_bindgen(getter)]
    pub fn p(&self) -> u8 {
        self.session.registers().p
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.session.registers().pc
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.session.registers().sp
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.session.memory().get(addr)
    }

    /// Read a 256-byte page from memory
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as u16) << 8;
        (0..256).map(|i| self.session.memory().get(start + i)).collect()
    }

    /// Hex dump of an arbitrary memory window
    pub fn format_memory(&self, start: u16, length: u32) -> String {
        self.session
            .memory()
            .format(start as usize, length as usize, FormatOptions::default())
    }

    /// 32×32 RGBA framebuffer of the display region
    pub fn display_rgba(&self) -> Vec<u8> {
        self.session.display().borrow().to_rgba()
    }
}
