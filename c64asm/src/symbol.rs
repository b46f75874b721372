//! Symbol table for labels and pending references

use std::collections::HashMap;

/// A label bound to a byte offset in the output buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    /// Offset of the next byte emitted after the definition.
    pub code_position: usize,
    pub row: usize,
}

/// An operand naming a label whose offset was not known when it was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub label: String,
    /// Offset of the first placeholder byte.
    pub patch_position: usize,
    pub source_row: usize,
    /// One-byte branch displacement instead of a word address.
    pub is_relative: bool,
    /// Word address is stored minus one.
    pub is_branch_adjusted: bool,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    labels: HashMap<String, Label>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, returning the entry it replaced.
    pub fn define(&mut self, name: String, code_position: usize, row: usize) -> Option<Label> {
        let label = Label { name: name.clone(), code_position, row };
        self.labels.insert(name, label)
    }

    pub fn get(&self, name: &str) -> Option<&Label> {
        self.labels.get(name)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// `(name, address)` pairs for a given origin, sorted by address then name.
    pub fn addresses(&self, start_address: u16) -> Vec<(String, u16)> {
        let mut out: Vec<(String, u16)> = self
            .labels
            .values()
            .map(|l| (l.name.clone(), start_address.wrapping_add(l.code_position as u16)))
            .collect();
        out.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        out
    }
}
