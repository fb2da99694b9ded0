//! Text report rendering for frequent itemsets and association rules

use crate::model::{Itemset, Lattice, Rule};
use crate::rules::sort_rules;
use anyhow::Context;
use chrono::Local;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Format a fraction as a percentage with two decimals
pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Itemsets of one level ordered by descending support, then canonically
fn ranked_level(lattice: &Lattice, k: usize) -> Vec<(&Itemset, f64)> {
    let mut ranked: Vec<(&Itemset, f64)> = lattice
        .level(k)
        .into_iter()
        .flat_map(|level| level.iter())
        .map(|(itemset, &count)| (itemset, lattice.support_of(count)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then_with(|| a.0.cmp(b.0)));
    ranked
}

/// Render the full report: a header, every frequent itemset by level, then the rules
pub fn render_report(lattice: &Lattice, rules: &[Rule], min_confidence: f64) -> String {
    let mut lines = vec![
        format!("Apriori report generated {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
        format!("Transactions: {}", lattice.transaction_count()),
        format!("Minimum support: {}", percent(lattice.min_support())),
        format!("Minimum confidence: {}", percent(min_confidence)),
    ];

    for (k, level) in lattice.levels() {
        lines.push(String::new());
        lines.push(format!("Frequent {}-itemsets ({}):", k, level.len()));
        lines.extend(
            ranked_level(lattice, k)
                .into_iter()
                .map(|(itemset, support)| format!("{}, {}", itemset, percent(support))),
        );
    }

    let mut sorted = rules.to_vec();
    sort_rules(&mut sorted);

    lines.push(String::new());
    lines.push(format!("Association rules ({}):", sorted.len()));
    lines.extend(sorted.iter().map(ToString::to_string));

    lines.push(String::new());
    lines.join("\n")
}

/// Render the report and write it to `output_path`
pub fn write_report(
    lattice: &Lattice,
    rules: &[Rule],
    min_confidence: f64,
    output_path: impl AsRef<Path>,
) -> crate::Result<()> {
    let path = output_path.as_ref();
    fs::write(path, render_report(lattice, rules, min_confidence))
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

/// Print lattice and rule statistics to console
pub fn print_summary(lattice: &Lattice, rules: &[Rule], max_rules: usize) {
    println!("\n=== Frequent Itemsets ===");
    println!("Transactions: {}", lattice.transaction_count());
    for (k, level) in lattice.levels() {
        println!("  {}-itemsets: {}", k, level.len());
    }

    println!("\n=== Association Rules ===");
    println!("Rules found: {}", rules.len());

    let mut sorted = rules.to_vec();
    sort_rules(&mut sorted);
    for rule in sorted.iter().take(max_rules) {
        println!("  {} lift={:.2}", rule, rule.lift);
    }
}
