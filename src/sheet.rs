//! Workbook extraction for the SB import.

use crate::errors::AppError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Fixed column layout of the SB sheet.
///
/// The source sheet carries no reliable headers, so fields are addressed by
/// position. Keeping the whole mapping here makes the hard-coded layout
/// visible and swappable.
pub mod columns {
    /// Account holder's full name.
    pub const FULL_NAME: usize = 0;
    /// Source account number.
    pub const ACCOUNT_NUMBER: usize = 1;
    /// Earlier-period (Jestha) closing balance.
    pub const JESTHA_BALANCE: usize = 2;
    /// Later-period (Ashad) closing balance.
    pub const ASHAD_BALANCE: usize = 4;
}

/// Open the workbook at `path` and return the named sheet's cell range.
pub fn read_sheet(path: &Path, sheet_name: &str) -> Result<Range<Data>, AppError> {
    if !path.exists() {
        return Err(AppError::WorkbookError(format!(
            "workbook not found at {}",
            path.display()
        )));
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range(sheet_name)?;
    Ok(range)
}
