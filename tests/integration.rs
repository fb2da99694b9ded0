//! Integration tests for BasketForge

use basketforge::{
    derive_rules, load_transactions, mine, render_report, sort_rules, write_report, Itemset, LoadOptions,
    MiningError,
};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

/// Create a test CSV file with the grocery baskets, one item per column
fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "item1,item2,item3").unwrap();
    writeln!(file, "milk,bread,butter").unwrap();
    writeln!(file, "bread,butter,").unwrap();
    writeln!(file, "milk,bread,").unwrap();
    writeln!(file, "bread,butter,jam").unwrap();
    writeln!(file, "milk,butter,jam").unwrap();
    file
}

#[test]
fn test_end_to_end_pipeline() {
    let test_file = create_test_csv();

    // Load transactions
    let transactions = load_transactions(test_file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(transactions.len(), 5);

    // Mine the lattice
    let lattice = mine(&transactions, 0.4).unwrap();
    assert_eq!(lattice.max_level(), 2);
    assert_eq!(lattice.level(1).unwrap().len(), 4);
    assert_eq!(lattice.level(2).unwrap().len(), 4);
    assert_eq!(lattice.count(&Itemset::new(["bread", "butter"])), Some(3));

    // Derive rules
    let mut rules = derive_rules(&lattice, 0.75).unwrap();
    sort_rules(&mut rules);
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0].to_string(), "[jam] => [butter] (Conf: 100.00%, Supp: 40.00%)");

    // Write the report
    let temp_dir = tempdir().unwrap();
    let report_path = temp_dir.path().join("report.txt");
    write_report(&lattice, &rules, 0.75, &report_path).unwrap();

    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(!report.contains("[milk,butter]"));
    assert!(report.contains("[butter,milk], 40.00%"));
    assert!(report.contains("[bread] => [butter] (Conf: 75.00%, Supp: 60.00%)"));
    assert!(report.contains("[butter] => [bread] (Conf: 75.00%, Supp: 60.00%)"));
}

#[test]
fn test_mining_is_idempotent() {
    let test_file = create_test_csv();
    let transactions = load_transactions(test_file.path(), &LoadOptions::default()).unwrap();

    let first = mine(&transactions, 0.2).unwrap();
    let second = mine(&transactions, 0.2).unwrap();
    assert_eq!(first, second);

    assert_eq!(derive_rules(&first, 0.5).unwrap(), derive_rules(&second, 0.5).unwrap());
}

#[test]
fn test_lower_support_reaches_level_three() {
    let test_file = create_test_csv();
    let transactions = load_transactions(test_file.path(), &LoadOptions::default()).unwrap();

    let lattice = mine(&transactions, 0.2).unwrap();
    assert_eq!(lattice.max_level(), 3);
    assert!(lattice.count(&Itemset::new(["bread", "butter", "milk"])).is_some());

    let report = render_report(&lattice, &[], 1.0);
    assert!(report.contains("Frequent 3-itemsets"));
    assert!(report.contains("Association rules (0):"));
}

#[test]
fn test_error_handling() {
    let test_file = create_test_csv();
    let transactions = load_transactions(test_file.path(), &LoadOptions::default()).unwrap();

    assert!(matches!(
        mine(&transactions, 1.2),
        Err(MiningError::InvalidThreshold { .. })
    ));
    assert_eq!(mine(&[], 0.5), Err(MiningError::EmptyTransactionSet));

    let lattice = mine(&transactions, 0.4).unwrap();
    assert!(derive_rules(&lattice, -0.5).is_err());

    assert!(load_transactions("no/such/file.csv", &LoadOptions::default()).is_err());
}
