//! Error types shared by the assembler, the label indexer and the simulator.
//!
//! Every error is also reported as an [`Event`](crate::events::Event) at the
//! point where it occurs; the `Result` return lets callers react without
//! subscribing to the bus.

use thiserror::Error;

use crate::opcodes::Mnemonic;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The byte at `address` is neither a documented opcode nor the output
    /// pseudo-op.
    #[error("Address ${address:04x} - unknown opcode ${opcode:02x}")]
    UnknownOpcode {
        /// The undecodable byte.
        opcode: u8,
        /// Address the byte was fetched from.
        address: u16,
    },

    /// A documented instruction the simulator refuses to run (CLI, SEI).
    #[error("{mnemonic}: Interrupts not implemented")]
    Unimplemented {
        /// Mnemonic of the rejected instruction.
        mnemonic: Mnemonic,
    },
}

/// Failures raised while indexing labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// A label name was declared twice.
    #[error("Label {name} is already used (line {line})")]
    Duplicate { name: String, line: usize },

    /// A label has the same name as a `define` constant.
    #[error("Label {name} is already used as a define (line {line})")]
    ShadowsDefine { name: String, line: usize },

    /// A line could not be sized while indexing.
    #[error("Syntax error line {line}: {text}")]
    Syntax { line: usize, text: String },
}

/// Why an assembly line was rejected, as carried by
/// [`Event::AssembleFailure`](crate::events::Event::AssembleFailure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The line does not match any directive or addressing form.
    Syntax,
    /// A branch target lies outside `-128..=127` bytes.
    BranchRange,
}

/// Errors returned by [`Assembler::assemble_code`](crate::Assembler::assemble_code).
///
/// Line numbers are 1-based and `text` is the offending line after comment
/// stripping and define substitution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    #[error("Syntax error line {line}: {text}")]
    Syntax { line: usize, text: String },

    #[error("Branch out of range line {line}: {text}")]
    BranchOutOfRange { line: usize, text: String },

    #[error(transparent)]
    Label(#[from] LabelError),

    #[error("No code to run")]
    NoCode,
}

impl AssembleError {
    /// Line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            AssembleError::Syntax { line, .. } | AssembleError::BranchOutOfRange { line, .. } => {
                Some(*line)
            }
            AssembleError::Label(LabelError::Duplicate { line, .. })
            | AssembleError::Label(LabelError::ShadowsDefine { line, .. })
            | AssembleError::Label(LabelError::Syntax { line, .. }) => Some(*line),
            AssembleError::NoCode => None,
        }
    }
}

/// Error returned by [`Simulator::goto_addr`](crate::Simulator::goto_addr).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GotoError {
    /// The input is neither a known label nor a `$`/`0x` hex address.
    #[error("Unable to find/parse given address/label: {0}")]
    Unresolved(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ExecutionError::UnknownOpcode {
            opcode: 0x02,
            address: 0x0600,
        };
        assert_eq!(err.to_string(), "Address $0600 - unknown opcode $02");

        let err = ExecutionError::Unimplemented {
            mnemonic: Mnemonic::Sei,
        };
        assert_eq!(err.to_string(), "SEI: Interrupts not implemented");

        let err: AssembleError = LabelError::Duplicate {
            name: "loop".into(),
            line: 4,
        }
        .into();
        assert_eq!(err.to_string(), "Label loop is already used (line 4)");
        assert_eq!(err.line(), Some(4));
        assert_eq!(AssembleError::NoCode.line(), None);
    }
}
