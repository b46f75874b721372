//! Second pass: patch label placeholders once every label is known

use tracing::trace;

use crate::error::AsmError;
use crate::image::AssemblyImage;
use crate::symbol::{SymbolTable, UnresolvedReference};

/// Branch displacement from the byte after the operand at `patch_position`.
/// Out-of-range targets wrap silently.
pub fn relative_offset(label_position: usize, patch_position: usize) -> u8 {
    (label_position as isize - patch_position as isize - 1) as u8
}

/// Final word stored for a non-relative reference.
pub fn absolute_address(start_address: u16, label_position: usize, branch_adjusted: bool) -> u16 {
    let address = start_address.wrapping_add(label_position as u16);
    if branch_adjusted { address.wrapping_sub(1) } else { address }
}

/// Patches every reference in order. The first label missing from `symbols`
/// fails the run.
pub fn resolve(
    image: &mut AssemblyImage,
    symbols: &SymbolTable,
    references: &[UnresolvedReference],
) -> Result<(), AsmError> {
    for reference in references {
        let label = symbols.get(&reference.label).ok_or_else(|| AsmError::UnresolvedLabel {
            row: reference.source_row,
            label: reference.label.clone(),
        })?;

        if reference.is_relative {
            let offset = relative_offset(label.code_position, reference.patch_position);
            trace!(label = %reference.label, at = reference.patch_position, offset, "patch relative");
            image.patch(reference.patch_position, offset);
        } else {
            let address = absolute_address(
                image.start_address,
                label.code_position,
                reference.is_branch_adjusted,
            );
            trace!(label = %reference.label, at = reference.patch_position, address, "patch absolute");
            let [lo, hi] = address.to_le_bytes();
            image.patch(reference.patch_position, lo);
            image.patch(reference.patch_position + 1, hi);
        }
    }
    Ok(())
}
