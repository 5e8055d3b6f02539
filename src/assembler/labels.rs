//! Label table built by an indexing pre-pass over the source.

use crate::assembler::encoder::{encode_line, Emission, Pass};
use crate::assembler::parser::parse_line;
use crate::assembler::preprocess::Symbols;
use crate::cpu::RESET_PC;
use crate::error::LabelError;

/// A label entry mapping a name to an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Label name (case-sensitive)
    pub name: String,

    /// Address of the first byte emitted after the label
    pub address: u16,

    /// Source line where the label was defined (1-indexed)
    pub defined_at: usize,
}

/// Ordered label table.
///
/// # Examples
///
/// ```
/// use edu6502::assembler::labels::Labels;
/// use edu6502::assembler::preprocess::Symbols;
///
/// let lines: Vec<String> = ["start: LDX #$08", "loop: DEX", "BNE loop"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
///
/// let mut labels = Labels::new();
/// assert_eq!(labels.index_lines(&lines, &Symbols::new()), Ok(2));
/// assert_eq!(labels.get_pc("start"), Some(0x0600));
/// assert_eq!(labels.get_pc("loop"), Some(0x0602));
/// assert!(!labels.find("end"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Labels {
    labels: Vec<Label>,
}

impl Labels {
    /// Create a new empty label table
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the table from preprocessed `lines`.
    ///
    /// Each line is sized with the same encoder the assembler uses, so label
    /// addresses match the real pass. Returns the number of labels found.
    ///
    /// # Errors
    ///
    /// A duplicate label, a label named like a define, or a line that cannot
    /// be sized. The table is left holding the labels seen before the error.
    pub fn index_lines(&mut self, lines: &[String], symbols: &Symbols) -> Result<usize, LabelError> {
        self.reset();
        let mut pc = RESET_PC;

        for (index, text) in lines.iter().enumerate() {
            let line_number = index + 1;
            let syntax = || LabelError::Syntax {
                line: line_number,
                text: text.clone(),
            };

            let line = parse_line(text).ok_or_else(syntax)?;
            let emission = encode_line(&line, pc, self, Pass::Index).map_err(|_| syntax())?;

            if let Some(name) = line.label {
                self.add_label(name, pc, line_number, symbols)?;
            }

            match emission {
                Emission::Nothing => {}
                Emission::Origin(address) => pc = address,
                Emission::Bytes(bytes) => pc = pc.wrapping_add(bytes.len() as u16),
            }
        }

        log::debug!("indexed {} label(s)", self.labels.len());
        Ok(self.labels.len())
    }

    /// Add a label to the table
    fn add_label(
        &mut self,
        name: &str,
        address: u16,
        line: usize,
        symbols: &Symbols,
    ) -> Result<(), LabelError> {
        if symbols.contains(name) {
            return Err(LabelError::ShadowsDefine {
                name: name.to_string(),
                line,
            });
        }
        if self.find(name) {
            return Err(LabelError::Duplicate {
                name: name.to_string(),
                line,
            });
        }

        self.labels.push(Label {
            name: name.to_string(),
            address,
            defined_at: line,
        });
        Ok(())
    }

    /// Look up a label by name
    pub fn lookup(&self, name: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.name == name)
    }

    pub fn find(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Address of `name`, if defined.
    pub fn get_pc(&self, name: &str) -> Option<u16> {
        self.lookup(name).map(|l| l.address)
    }

    pub fn reset(&mut self) {
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_forward_labels_sized_as_absolute() {
        let mut labels = Labels::new();
        let src = lines(&["JMP end", "LDA $10", "end: BRK"]);
        assert_eq!(labels.index_lines(&src, &Symbols::new()), Ok(1));
        assert_eq!(labels.get_pc("end"), Some(0x0605));
    }

    #[test]
    fn test_origin_moves_label_addresses() {
        let mut labels = Labels::new();
        let src = lines(&["*=$1000", "here: NOP", "DCB 1,2,3", "there:"]);
        labels.index_lines(&src, &Symbols::new()).unwrap();
        assert_eq!(labels.get_pc("here"), Some(0x1000));
        assert_eq!(labels.get_pc("there"), Some(0x1004));
    }

    #[test]
    fn test_duplicate_label() {
        let mut labels = Labels::new();
        let src = lines(&["a1: NOP", "a1: NOP"]);
        assert_eq!(
            labels.index_lines(&src, &Symbols::new()),
            Err(LabelError::Duplicate {
                name: "a1".into(),
                line: 2
            })
        );
    }

    #[test]
    fn test_label_shadowing_define() {
        let mut symbols = Symbols::new();
        symbols.define("screen", "$0200");
        let mut labels = Labels::new();
        let src = lines(&["screen: NOP"]);
        assert!(matches!(
            labels.index_lines(&src, &symbols),
            Err(LabelError::ShadowsDefine { line: 1, .. })
        ));
    }

    #[test]
    fn test_sizing_failure_reports_line() {
        let mut labels = Labels::new();
        let src = lines(&["NOP", "LDA ???"]);
        assert_eq!(
            labels.index_lines(&src, &Symbols::new()),
            Err(LabelError::Syntax {
                line: 2,
                text: "LDA ???".into()
            })
        );
    }

    #[test]
    fn test_reindex_starts_fresh() {
        let mut labels = Labels::new();
        labels
            .index_lines(&lines(&["one: NOP"]), &Symbols::new())
            .unwrap();
        labels
            .index_lines(&lines(&["two: NOP"]), &Symbols::new())
            .unwrap();
        assert!(!labels.find("one"));
        assert_eq!(labels.len(), 1);
    }
}
