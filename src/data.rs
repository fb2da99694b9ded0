//! Transaction loading from delimited files using Polars

use crate::model::{Item, Transaction};
use anyhow::Context;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// Options controlling how table rows become transactions
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether the first row holds column names
    pub has_header: bool,
    /// Field separator byte
    pub delimiter: u8,
    /// Prefix each item with its column name (`column=value`)
    pub tag_columns: bool,
    /// Columns ignored while building transactions
    pub exclude: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
            tag_columns: false,
            exclude: Vec::new(),
        }
    }
}

/// Load a delimited file where each row is a transaction
///
/// # Arguments
/// * `file_path` - Path to the CSV file
/// * `options` - Header, delimiter and item naming options
///
/// # Returns
/// * One `Transaction` per row, holding that row's non-null, non-blank cells
pub fn load_transactions(file_path: impl AsRef<Path>, options: &LoadOptions) -> crate::Result<Vec<Transaction>> {
    let path = file_path.as_ref();
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let delimiter = options.delimiter;
    // A zero-length inference window reads every column as a string
    let df = CsvReadOptions::default()
        .with_has_header(options.has_header)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|parse| parse.with_separator(delimiter))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
        .with_context(|| format!("Failed to read transactions from {}", path.display()))?;

    if df.height() == 0 {
        anyhow::bail!("No transactions found in {}", path.display());
    }
    debug!(rows = df.height(), columns = df.width(), path = %path.display(), "read transaction table");

    let transactions = transactions_from_frame(&df, options)?;

    let empty_rows = transactions.iter().filter(|t| t.is_empty()).count();
    if empty_rows > 0 {
        warn!(empty_rows, "some rows contain no items");
    }

    Ok(transactions)
}

/// Collect the items of each row of `df`, column by column
fn transactions_from_frame(df: &DataFrame, options: &LoadOptions) -> crate::Result<Vec<Transaction>> {
    let mut rows: Vec<Vec<Item>> = vec![Vec::new(); df.height()];

    for column in df.get_columns() {
        let name = column.name().to_string();
        if options.exclude.iter().any(|excluded| *excluded == name) {
            debug!(column = %name, "skipping excluded column");
            continue;
        }

        let values = column.cast(&DataType::String)?;
        for (row, cell) in rows.iter_mut().zip(values.str()?.into_iter()) {
            if let Some(item) = cell.and_then(|value| to_item(&name, value, options.tag_columns)) {
                row.push(item);
            }
        }
    }

    Ok(rows.into_iter().map(Transaction::new).collect())
}

fn to_item(column: &str, value: &str, tag_columns: bool) -> Option<Item> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else if tag_columns {
        Some(format!("{}={}", column, value))
    } else {
        Some(value.to_string())
    }
}

/// Build transactions from in-memory rows, applying the same cell cleaning as the loader
pub fn transactions_from_rows<R, S>(rows: R) -> Vec<Transaction>
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .filter_map(|cell| to_item("", cell.as_ref(), false))
                .collect()
        })
        .collect()
}
