//! 6502 Assembler Module
//!
//! Converts assembly language source code into machine code written straight
//! into a [`MemoryBus`].
//!
//! ## Pipeline
//!
//! 1. [`preprocess`]: strip comments, collect and substitute `define`s
//! 2. [`Labels::index_lines`]: size every line and record label addresses
//! 3. Encode each line at the current PC and store the bytes
//!
//! ## Source Syntax
//!
//! ```text
//! define  sprite  $05        ; constant
//! *=$0600                    ; origin
//! start:  LDX #sprite        ; label + instruction
//!         DCB $01, 2, %11    ; data bytes
//! ```
//!
//! Progress and failures are reported on the [`EventBus`] as well as through
//! the returned `Result`.

pub mod encoder;
pub mod labels;
pub mod parser;
pub mod preprocess;
pub mod source_map;

use crate::cpu::RESET_PC;
use crate::disassembler::{self, Instruction};
use crate::error::{AssembleError, FailureReason, LabelError};
use crate::events::{Event, EventBus};
use crate::memory::{FormatOptions, Memory, MemoryBus};

use encoder::{encode_line, Emission, LineError, Pass};
use labels::Labels;
use parser::parse_line;
use preprocess::preprocess;
use source_map::{AddressRange, SourceMap};

/// A contiguous run of emitted bytes. Each origin change starts a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: u16,
    pub len: usize,
}

/// Summary of a successful assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyReport {
    pub bytes_assembled: usize,
    pub labels_found: usize,
}

/// Two-pass assembler state: labels, current PC and what was emitted where.
///
/// # Examples
///
/// ```
/// use edu6502::{Assembler, Memory};
///
/// let mut memory = Memory::new();
/// let mut assembler = Assembler::new();
/// let report = assembler
///     .assemble_code("LDA #$01\nSTA $0200", &mut memory)
///     .unwrap();
///
/// assert_eq!(report.bytes_assembled, 5);
/// assert_eq!(memory.get(0x0600), 0xA9);
/// assert_eq!(assembler.hexdump(&memory), "0600: a9 01 8d 00 02 ");
/// ```
#[derive(Debug)]
pub struct Assembler {
    labels: Labels,
    code_pc: u16,
    bytes_assembled: usize,
    segments: Vec<Segment>,
    source_map: SourceMap,
    events: EventBus,
}

impl Assembler {
    /// Creates an assembler reporting on its own private bus.
    pub fn new() -> Self {
        Self::with_events(EventBus::new())
    }

    /// Creates an assembler reporting on `events`.
    pub fn with_events(events: EventBus) -> Self {
        Self {
            labels: Labels::new(),
            code_pc: RESET_PC,
            bytes_assembled: 0,
            segments: Vec::new(),
            source_map: SourceMap::new(),
            events,
        }
    }

    fn info(&self, message: &str) {
        log::debug!("{}", message);
        self.events.emit(Event::AssembleInfo {
            message: message.to_string(),
        });
    }

    fn fail(&self, line: usize, text: &str, reason: FailureReason) {
        self.events.emit(Event::AssembleFailure {
            line,
            text: text.to_string(),
            reason,
        });
    }

    /// Assembles `source` into `memory`, starting at `$0600`.
    ///
    /// On success a `$00` byte is stored right after the last emitted byte
    /// (not counted in the report). On failure, bytes already stored are left
    /// in memory.
    ///
    /// # Errors
    ///
    /// - [`AssembleError::Label`] if label indexing fails
    /// - [`AssembleError::Syntax`] / [`AssembleError::BranchOutOfRange`] for
    ///   the first bad line
    /// - [`AssembleError::NoCode`] if nothing was emitted
    pub fn assemble_code<M: MemoryBus>(
        &mut self,
        source: &str,
        memory: &mut M,
    ) -> Result<AssemblyReport, AssembleError> {
        self.code_pc = RESET_PC;
        self.bytes_assembled = 0;
        self.segments.clear();
        self.source_map.clear();

        self.info("Preprocessing ...");
        let preprocessed = preprocess(source);
        let lines = &preprocessed.lines;

        self.info("Indexing labels ...");
        let labels_found = match self.labels.index_lines(lines, &preprocessed.symbols) {
            Ok(count) => count,
            Err(err) => return Err(self.label_failure(err, lines)),
        };
        self.events.emit(Event::LabelsInfo {
            message: format!("Found {} label(s).", labels_found),
        });

        self.info("Assembling code ...");
        self.segments.push(Segment {
            start: self.code_pc,
            len: 0,
        });

        for (index, text) in lines.iter().enumerate() {
            let line_number = index + 1;
            let result = parse_line(text)
                .ok_or(LineError::Syntax)
                .and_then(|line| encode_line(&line, self.code_pc, &self.labels, Pass::Emit));

            match result {
                Ok(Emission::Nothing) => {}
                Ok(Emission::Origin(address)) => {
                    self.code_pc = address;
                    self.segments.push(Segment {
                        start: address,
                        len: 0,
                    });
                }
                Ok(Emission::Bytes(bytes)) => self.store(memory, &bytes, line_number),
                Err(LineError::Syntax) => {
                    self.fail(line_number, text, FailureReason::Syntax);
                    return Err(AssembleError::Syntax {
                        line: line_number,
                        text: text.clone(),
                    });
                }
                Err(LineError::BranchRange) => {
                    self.fail(line_number, text, FailureReason::BranchRange);
                    return Err(AssembleError::BranchOutOfRange {
                        line: line_number,
                        text: text.clone(),
                    });
                }
            }
        }

        self.segments.retain(|segment| segment.len > 0);
        self.source_map.finalize();

        if self.bytes_assembled == 0 {
            self.info("No code to run.");
            return Err(AssembleError::NoCode);
        }

        memory.write(self.code_pc, 0x00);
        log::info!("assembled {} byte(s)", self.bytes_assembled);
        self.events.emit(Event::AssembleSuccess {
            bytes_assembled: self.bytes_assembled,
        });

        Ok(AssemblyReport {
            bytes_assembled: self.bytes_assembled,
            labels_found,
        })
    }

    fn store<M: MemoryBus>(&mut self, memory: &mut M, bytes: &[u8], line: usize) {
        let start = self.code_pc;
        for &byte in bytes {
            memory.write(self.code_pc, byte);
            self.code_pc = self.code_pc.wrapping_add(1);
        }
        self.bytes_assembled += bytes.len();
        if let Some(segment) = self.segments.last_mut() {
            segment.len += bytes.len();
        }
        self.source_map.add_mapping(
            AddressRange {
                start,
                len: bytes.len() as u16,
            },
            line,
        );
    }

    fn label_failure(&self, err: LabelError, lines: &[String]) -> AssembleError {
        let line = match &err {
            LabelError::Duplicate { line, .. }
            | LabelError::ShadowsDefine { line, .. }
            | LabelError::Syntax { line, .. } => *line,
        };
        let text = lines.get(line.saturating_sub(1)).cloned().unwrap_or_default();
        log::debug!("label indexing failed: {}", err);
        self.events.emit(Event::LabelsFailure {
            message: err.to_string(),
        });
        self.fail(line, &text, FailureReason::Syntax);
        AssembleError::Label(err)
    }

    /// Decodes every emitted segment back into instructions.
    pub fn disassemble<M: MemoryBus>(&self, memory: &M) -> Vec<Instruction> {
        let instructions: Vec<Instruction> = self
            .segments
            .iter()
            .flat_map(|segment| {
                let bytes: Vec<u8> = (0..segment.len)
                    .map(|offset| memory.read(segment.start.wrapping_add(offset as u16)))
                    .collect();
                disassembler::disassemble(&bytes, segment.start)
            })
            .collect();

        self.events.emit(Event::Disassembly {
            instructions: instructions.clone(),
        });
        instructions
    }

    /// Hex dump of every emitted segment, one block per segment.
    pub fn hexdump(&self, memory: &Memory) -> String {
        let text = self
            .segments
            .iter()
            .map(|segment| memory.format(segment.start as usize, segment.len, FormatOptions::default()))
            .collect::<Vec<_>>()
            .join("\n");

        self.events.emit(Event::Hexdump { text: text.clone() });
        text
    }

    /// Source line that emitted the byte at `address`.
    pub fn source_line(&self, address: u16) -> Option<usize> {
        self.source_map.line_for_address(address)
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn bytes_assembled(&self) -> usize {
        self.bytes_assembled
    }

    /// PC after the last emitted byte.
    pub fn current_pc(&self) -> u16 {
        self.code_pc
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}
