//! BasketForge: frequent itemset mining and association rules with Apriori
//!
//! This library loads transaction tables, mines the frequent-itemset lattice
//! level by level and derives single-consequent association rules from it.

pub mod apriori;
pub mod cli;
pub mod data;
pub mod error;
pub mod model;
pub mod report;
pub mod rules;
pub mod viz;

// Re-export public items for easier access
pub use apriori::{generate_candidates, mine};
pub use cli::Args;
pub use data::{load_transactions, transactions_from_rows, LoadOptions};
pub use error::{MiningError, MiningResult};
pub use model::{Item, Itemset, Lattice, Level, Rule, Transaction};
pub use report::{render_report, write_report};
pub use rules::{derive_rules, sort_rules};
pub use viz::create_support_chart;

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
