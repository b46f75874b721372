//! Human-readable hex listings of an assembled image

use std::io::Write;

use crate::error::AsmError;
use crate::image::AssemblyImage;

/// Column where the source text starts in a matched listing (0-based).
const SOURCE_COLUMN: usize = 19;
/// Byte groups stop before this column when source text follows.
const BYTES_LIMIT: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingFormat {
    pub include_address: bool,
    /// One output line per source line instead of fixed-width rows.
    pub match_source_code: bool,
    /// Only used with `match_source_code`.
    pub include_source_code: bool,
    /// Only used without `match_source_code`.
    pub max_bytes_per_row: usize,
}

impl Default for ListingFormat {
    fn default() -> Self {
        Self {
            include_address: true,
            match_source_code: true,
            include_source_code: true,
            max_bytes_per_row: 8,
        }
    }
}

impl AssemblyImage {
    pub fn listing(&self, format: &ListingFormat) -> String {
        if format.match_source_code {
            self.matched_listing(format)
        } else {
            self.raw_listing(format)
        }
    }

    pub fn write_listing<W: Write>(&self, format: &ListingFormat, mut w: W) -> Result<(), AsmError> {
        w.write_all(self.listing(format).as_bytes())?;
        Ok(())
    }

    fn matched_listing(&self, format: &ListingFormat) -> String {
        let mut out = String::new();
        let mut tagged = self.bytes.iter().zip(&self.byte_rows).enumerate().peekable();
        for (i, source) in self.source_lines.iter().enumerate() {
            let row = i + 1;
            // rows out of order are skipped rather than listed twice
            while tagged.next_if(|(_, (_, r))| **r < row).is_some() {}
            let mut first = None;
            let mut bytes = Vec::new();
            while let Some((offset, (byte, _))) = tagged.next_if(|(_, (_, r))| **r == row) {
                first.get_or_insert(offset);
                bytes.push(*byte);
            }

            let mut line = String::new();
            if let (true, Some(first)) = (format.include_address, first) {
                line.push_str(&format!("{:04X}: ", self.address_of(first)));
            }
            for byte in bytes {
                if !format.include_source_code || line.len() < BYTES_LIMIT {
                    line.push_str(&format!("{byte:02X} "));
                } else {
                    line.push_str(".. ");
                    break;
                }
            }
            if format.include_source_code {
                line = format!("{line:<width$}{source}", width = SOURCE_COLUMN);
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    fn raw_listing(&self, format: &ListingFormat) -> String {
        self.bytes
            .chunks(format.max_bytes_per_row.max(1))
            .enumerate()
            .map(|(i, chunk)| {
                let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02X}")).collect();
                if format.include_address {
                    let address = self.address_of(i * format.max_bytes_per_row.max(1));
                    format!("{address:04X}: {}", hex.join(" "))
                } else {
                    hex.join(" ")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> AssemblyImage {
        let mut image = AssemblyImage::new("*=$c000\nstart\n  lda #$01\n  .text \"HELLO\"");
        image.start_address = 0xC000;
        for b in [0xA9, 0x01] {
            image.push(b, 3);
        }
        for b in [0x48, 0x45, 0x4C, 0x4C, 0x4F] {
            image.push(b, 4);
        }
        image
    }

    #[test]
    fn test_matched_listing() {
        let text = image().listing(&ListingFormat::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], format!("{:19}*=$c000", ""));
        assert_eq!(lines[1], format!("{:19}start", ""));
        assert_eq!(lines[2], format!("{:<19}  lda #$01", "C000: A9 01 "));
        assert_eq!(lines[3], format!("{:<19}  .text \"HELLO\"", "C002: 48 45 4C .. "));
    }

    #[test]
    fn test_matched_without_source() {
        let format = ListingFormat { include_source_code: false, ..ListingFormat::default() };
        let text = image().listing(&format);
        assert_eq!(text, "\n\nC000: A9 01\nC002: 48 45 4C 4C 4F\n");
    }

    #[test]
    fn test_matched_without_address() {
        let format = ListingFormat { include_address: false, ..ListingFormat::default() };
        let text = image().listing(&format);
        assert_eq!(text.lines().nth(3), Some(format!("{:<19}  .text \"HELLO\"", "48 45 4C 4C 4F ").as_str()));
    }

    #[test]
    fn test_raw_rows() {
        let format = ListingFormat {
            match_source_code: false,
            max_bytes_per_row: 4,
            ..ListingFormat::default()
        };
        assert_eq!(image().listing(&format), "C000: A9 01 48 45\nC004: 4C 4C 4F");
        let format = ListingFormat { include_address: false, ..format };
        assert_eq!(image().listing(&format), "A9 01 48 45\n4C 4C 4F");
    }

    #[test]
    fn test_mismatched_row_tags_do_not_panic() {
        let mut short = image();
        short.byte_rows.pop();
        let text = short.listing(&ListingFormat { include_source_code: false, ..ListingFormat::default() });
        assert_eq!(text, "\n\nC000: A9 01\nC002: 48 45 4C 4C\n");

        let mut long = image();
        long.byte_rows.push(4);
        assert_eq!(long.listing(&ListingFormat::default()), image().listing(&ListingFormat::default()));
    }

    #[test]
    fn test_empty_image() {
        let image = AssemblyImage::new("");
        assert_eq!(image.listing(&ListingFormat::default()), "");
        let raw = ListingFormat { match_source_code: false, ..ListingFormat::default() };
        assert_eq!(image.listing(&raw), "");
    }
}
