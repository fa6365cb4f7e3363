//! Single-letter column codec (A..Z)

use crate::error::{PlanError, PlanResult};

/// Highest column number representable by a single letter
pub const MAX_COLUMNS: usize = 26;

/// Convert a 1-based column number to its letter
///
/// Examples:
/// - 1 → A
/// - 2 → B
/// - 26 → Z
/// - 27 → `ColumnOverflow`
pub fn number_to_letter(number: usize) -> PlanResult<char> {
    if !(1..=MAX_COLUMNS).contains(&number) {
        return Err(PlanError::ColumnOverflow {
            sheet: None,
            column: number,
        });
    }
    Ok((b'A' + (number - 1) as u8) as char)
}

/// Convert an uppercase column letter to its 1-based number
pub fn letter_to_number(letter: char) -> PlanResult<usize> {
    if !letter.is_ascii_uppercase() {
        return Err(PlanError::InvalidColumnLetter(letter));
    }
    Ok((letter as u8 - b'A') as usize + 1)
}
