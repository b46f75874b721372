//! Flat result record for callers that only want plain data

use crate::listing::ListingFormat;

/// Outcome of [`assemble6502`]. On failure `machine_code` is `None` and
/// `error_string` holds the diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembleResult {
    pub error: bool,
    pub error_string: String,
    pub machine_code: Option<Vec<u8>>,
    pub machine_code_address: u16,
    pub stringified_code: String,
}

/// Assembles with the shared instruction table and renders the default listing.
pub fn assemble6502(source: &str) -> AssembleResult {
    match crate::assemble(source) {
        Ok(image) => AssembleResult {
            error: false,
            error_string: String::new(),
            stringified_code: image.listing(&ListingFormat::default()),
            machine_code_address: image.start_address,
            machine_code: Some(image.bytes),
        },
        Err(diags) => AssembleResult {
            error: true,
            error_string: diags.render(),
            ..AssembleResult::default()
        },
    }
}
