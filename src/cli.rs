//! Command-line interface definitions and argument parsing

use crate::data::LoadOptions;
use crate::error::validate_threshold;
use clap::Parser;
use std::path::Path;

/// Frequent itemset mining and association rules using Apriori
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file (one transaction per row)
    #[arg(short, long, default_value = "transactions.csv")]
    pub input: String,

    /// Minimum support as a fraction between 0 and 1
    #[arg(short = 's', long, default_value = "0.4")]
    pub min_support: f64,

    /// Minimum confidence as a fraction between 0 and 1
    #[arg(short = 'c', long, default_value = "0.75")]
    pub min_confidence: f64,

    /// Output path for the text report
    #[arg(short, long, default_value = "report.txt")]
    pub output: String,

    /// Optional output path for a PNG chart of the most frequent itemsets
    #[arg(long)]
    pub plot: Option<String>,

    /// Number of itemsets shown in the chart
    #[arg(long, default_value = "15")]
    pub top: usize,

    /// Treat the first row as data instead of column names
    #[arg(long)]
    pub no_header: bool,

    /// Field delimiter (a single ASCII character)
    #[arg(short, long, default_value = ",")]
    pub delimiter: char,

    /// Prefix every item with its column name, e.g. "color=red"
    #[arg(long)]
    pub tag_columns: bool,

    /// Column to ignore; may be repeated
    #[arg(long = "exclude", value_name = "COLUMN")]
    pub exclude: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Check thresholds, delimiter and input path before any mining starts
    pub fn validate(&self) -> crate::Result<()> {
        validate_threshold("min_support", self.min_support)?;
        validate_threshold("min_confidence", self.min_confidence)?;

        if !self.delimiter.is_ascii() {
            anyhow::bail!("Delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        if self.top == 0 {
            anyhow::bail!("--top must be at least 1");
        }
        if !Path::new(&self.input).exists() {
            anyhow::bail!("Input file not found: {}", self.input);
        }

        Ok(())
    }

    /// Loader options derived from the arguments
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            has_header: !self.no_header,
            delimiter: self.delimiter as u8,
            tag_columns: self.tag_columns,
            exclude: self.exclude.clone(),
        }
    }
}
