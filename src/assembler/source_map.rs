//! Source map for mapping between assembled addresses and source lines

/// A range of instruction addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    /// Starting address (inclusive)
    pub start: u16,

    /// Number of bytes emitted for the line
    pub len: u16,
}

impl AddressRange {
    pub fn contains(&self, address: u16) -> bool {
        address.wrapping_sub(self.start) < self.len
    }
}

/// Bidirectional mapping between emitted bytes and source lines
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    /// Forward map: instruction range → source line.
    /// Sorted by start address for binary search
    address_to_line: Vec<(AddressRange, usize)>,

    /// Reverse map: source line → instruction range.
    /// Sorted by line number for binary search
    line_to_address: Vec<(usize, AddressRange)>,
}

impl SourceMap {
    /// Create a new empty source map
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `range` was emitted by source `line` (1-indexed).
    pub fn add_mapping(&mut self, range: AddressRange, line: usize) {
        self.address_to_line.push((range, line));
        self.line_to_address.push((line, range));
    }

    /// Source line whose bytes include `address`.
    pub fn line_for_address(&self, address: u16) -> Option<usize> {
        let idx = self
            .address_to_line
            .partition_point(|(range, _)| range.start <= address);
        let (range, line) = self.address_to_line.get(idx.checked_sub(1)?)?;
        range.contains(address).then_some(*line)
    }

    /// Address range emitted by a given source line
    pub fn address_range(&self, line: usize) -> Option<AddressRange> {
        self.line_to_address
            .binary_search_by_key(&line, |(l, _)| *l)
            .ok()
            .map(|idx| self.line_to_address[idx].1)
    }

    /// Finalize the source map (sort for binary search)
    pub fn finalize(&mut self) {
        self.address_to_line.sort_by_key(|(range, _)| range.start);
        self.line_to_address.sort_by_key(|(line, _)| *line);
    }

    pub fn clear(&mut self) {
        self.address_to_line.clear();
        self.line_to_address.clear();
    }

    pub fn len(&self) -> usize {
        self.address_to_line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.address_to_line.is_empty()
    }
}
