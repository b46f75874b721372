//! Assembled output image

use std::io::Write;

use crate::error::AsmError;

/// Result of a successful run: the bytes, the row that produced each byte,
/// and the source they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyImage {
    pub start_address: u16,
    pub bytes: Vec<u8>,
    /// Source row of every byte; always as long as `bytes`.
    pub byte_rows: Vec<usize>,
    pub source_lines: Vec<String>,
    /// Label addresses, sorted by address.
    pub labels: Vec<(String, u16)>,
}

impl AssemblyImage {
    pub fn new(source: &str) -> Self {
        Self {
            source_lines: source.trim_end().lines().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn push(&mut self, byte: u8, row: usize) {
        self.bytes.push(byte);
        self.byte_rows.push(row);
    }

    pub(crate) fn push_word(&mut self, word: u16, row: usize) {
        let [lo, hi] = word.to_le_bytes();
        self.push(lo, row);
        self.push(hi, row);
    }

    /// Overwrites a placeholder; the row tag stays with the instruction.
    pub(crate) fn patch(&mut self, position: usize, byte: u8) {
        if let Some(slot) = self.bytes.get_mut(position) {
            *slot = byte;
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Address of the byte at `offset`.
    pub fn address_of(&self, offset: usize) -> u16 {
        self.start_address.wrapping_add(offset as u16)
    }

    /// Address one past the last byte.
    pub fn end_address(&self) -> u16 {
        self.address_of(self.bytes.len())
    }

    /// Bytes emitted by a 1-based source row.
    pub fn bytes_for_row(&self, row: usize) -> Vec<u8> {
        self.bytes
            .iter()
            .zip(&self.byte_rows)
            .filter(|(_, r)| **r == row)
            .map(|(b, _)| *b)
            .collect()
    }

    /// Writes the raw bytes with no load-address header.
    pub fn write_bin<W: Write>(&self, mut w: W) -> Result<(), AsmError> {
        w.write_all(&self.bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_rows_aligned() {
        let mut image = AssemblyImage::new("  lda $1234\n  nop\n");
        image.push(0xAD, 1);
        image.push_word(0x1234, 1);
        image.push(0xEA, 2);
        assert_eq!(image.bytes, vec![0xAD, 0x34, 0x12, 0xEA]);
        assert_eq!(image.byte_rows, vec![1, 1, 1, 2]);
        assert_eq!(image.source_lines.len(), 2);
        assert_eq!(image.bytes_for_row(1), vec![0xAD, 0x34, 0x12]);
        assert!(image.bytes_for_row(3).is_empty());
    }

    #[test]
    fn test_addresses() {
        let mut image = AssemblyImage::new("");
        assert!(image.is_empty());
        image.start_address = 0xC000;
        image.push(0x60, 1);
        assert_eq!(image.address_of(0), 0xC000);
        assert_eq!(image.end_address(), 0xC001);
    }

    #[test]
    fn test_patch_ignores_out_of_range() {
        let mut image = AssemblyImage::new("");
        image.push(0x00, 1);
        image.patch(0, 0xFF);
        image.patch(5, 0x11);
        assert_eq!(image.bytes, vec![0xFF]);
    }

    #[test]
    fn test_write_bin() {
        let mut image = AssemblyImage::new("");
        image.push(0xA9, 1);
        image.push(0x01, 1);
        let mut out = Vec::new();
        image.write_bin(&mut out).unwrap();
        assert_eq!(out, vec![0xA9, 0x01]);
    }
}
