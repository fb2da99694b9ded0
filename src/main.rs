//! BasketForge: frequent itemset mining CLI using the Apriori algorithm
//!
//! This is the main entrypoint that orchestrates transaction loading, mining,
//! rule derivation, reporting and visualization.

use anyhow::Result;
use basketforge::{derive_rules, load_transactions, mine, report, viz, Args};
use clap::Parser;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();
    init_logging(args.verbose);

    args.validate()?;
    run_pipeline(&args)?;

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the default filter
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "basketforge=debug" } else { "basketforge=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the full mining pipeline
fn run_pipeline(args: &Args) -> Result<()> {
    println!("=== Apriori Mining Pipeline ===\n");

    let start_time = Instant::now();

    // Step 1: Load transactions
    if args.verbose {
        println!("Step 1: Loading transactions");
        println!("  Input file: {}", args.input);
    }

    let data_start = Instant::now();
    let transactions = load_transactions(&args.input, &args.load_options())?;
    let data_time = data_start.elapsed();

    println!("✓ Data loaded: {} transactions", transactions.len());
    if args.verbose {
        println!("  Loading time: {:.2}s", data_time.as_secs_f64());
    }

    // Step 2: Mine frequent itemsets
    if args.verbose {
        println!("\nStep 2: Mining frequent itemsets");
        println!("  Minimum support: {}", args.min_support);
    }

    let mine_start = Instant::now();
    let lattice = mine(&transactions, args.min_support)?;
    let mine_time = mine_start.elapsed();

    println!(
        "✓ Found {} frequent itemsets up to size {}",
        lattice.len(),
        lattice.max_level()
    );
    if args.verbose {
        println!("  Mining time: {:.2}s", mine_time.as_secs_f64());
    }

    // Step 3: Derive association rules
    if args.verbose {
        println!("\nStep 3: Deriving association rules");
        println!("  Minimum confidence: {}", args.min_confidence);
    }

    let rules = derive_rules(&lattice, args.min_confidence)?;
    println!("✓ Derived {} association rules", rules.len());

    report::print_summary(&lattice, &rules, if args.verbose { 20 } else { 5 });

    // Step 4: Write report and chart
    report::write_report(&lattice, &rules, args.min_confidence, &args.output)?;
    println!("\n✓ Report written to: {}", args.output);

    if let Some(plot_path) = &args.plot {
        if lattice.is_empty() {
            println!("Skipping chart: no frequent itemsets");
        } else {
            viz::create_support_chart(&lattice, plot_path, args.top)?;
        }
    }

    let total_time = start_time.elapsed();
    println!("\n=== Pipeline Complete ===");
    println!("Total processing time: {:.2}s", total_time.as_secs_f64());

    Ok(())
}
