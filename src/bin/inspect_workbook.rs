//! Utility to inspect a workbook and print each sheet's structure.
//!
//! Purely diagnostic: dimensions, column labels, the first ten rows and the
//! inferred type of every column. Nothing is persisted.

use anyhow::{bail, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

const DEFAULT_WORKBOOK: &str = "Ashad 2082.xlsx";
const PREVIEW_ROWS: usize = 10;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_WORKBOOK.to_string());

    if !Path::new(&path).exists() {
        bail!("file '{}' not found", path);
    }

    let mut workbook = open_workbook_auto(&path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    println!("Workbook: {}", path);
    println!("Number of sheets: {}", sheet_names.len());
    println!("Sheet names: {:?}", sheet_names);
    println!("{}", "=".repeat(50));

    for name in &sheet_names {
        println!("\nSheet: '{}'", name);
        println!("{}", "-".repeat(30));

        let range = workbook.worksheet_range(name)?;
        if range.is_empty() {
            println!("Sheet is empty");
            continue;
        }

        println!(
            "Shape: ({}, {}) (rows, columns)",
            range.height(),
            range.width()
        );

        if let Some(labels) = range.rows().next() {
            let labels: Vec<String> = labels.iter().map(|c| c.to_string()).collect();
            println!("Columns: {:?}", labels);
        }

        println!("\nFirst {} rows:", PREVIEW_ROWS);
        for (idx, row) in range.rows().take(PREVIEW_ROWS).enumerate() {
            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            println!("  {:>3}: {:?}", idx + 1, cells);
        }

        println!("\nColumn types:");
        for (idx, kind) in infer_column_types(&range).iter().enumerate() {
            println!("  col {}: {}", idx, kind);
        }

        println!("\n{}", "=".repeat(50));
    }

    Ok(())
}

/// Dominant cell type per column, skipping the first (label) row.
fn infer_column_types(range: &Range<Data>) -> Vec<&'static str> {
    let width = range.width();
    let mut kinds = vec![None::<&'static str>; width];
    let mut mixed = vec![false; width];

    for row in range.rows().skip(1) {
        for (col, cell) in row.iter().enumerate() {
            let kind = match cell {
                Data::Empty => continue,
                Data::Int(_) | Data::Float(_) => "number",
                Data::String(_) => "text",
                Data::Bool(_) => "bool",
                Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => "datetime",
                Data::Error(_) => "error",
            };

            match kinds[col] {
                None => kinds[col] = Some(kind),
                Some(existing) if existing != kind => mixed[col] = true,
                Some(_) => {}
            }
        }
    }

    kinds
        .into_iter()
        .zip(mixed)
        .map(|(kind, is_mixed)| {
            if is_mixed {
                "mixed"
            } else {
                kind.unwrap_or("empty")
            }
        })
        .collect()
}
