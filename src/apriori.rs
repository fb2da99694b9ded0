//! Level-wise Apriori mining: support counting and candidate generation

use crate::error::{validate_threshold, MiningError, MiningResult};
use crate::model::{Itemset, Lattice, Level, Transaction};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// Mine every itemset whose support is at least `min_support`.
///
/// # Arguments
/// * `transactions` - The transaction store; must not be empty
/// * `min_support` - Minimum support as a fraction in `[0, 1]`
///
/// # Returns
/// * A `Lattice` holding levels 1..=k, where k is the last non-empty level
pub fn mine(transactions: &[Transaction], min_support: f64) -> MiningResult<Lattice> {
    validate_threshold("min_support", min_support)?;
    if transactions.is_empty() {
        return Err(MiningError::EmptyTransactionSet);
    }

    let total = transactions.len();
    // Itemsets that never occur are not counted, even at a zero threshold
    let is_frequent = |count: usize| count > 0 && count as f64 / total as f64 >= min_support;

    let level_one = frequent_items(transactions, &is_frequent);
    debug!(level = 1, frequent = level_one.len(), "counted single items");
    if level_one.is_empty() {
        warn!(min_support, "no single item reaches the support threshold");
    }

    let mut lattice = Lattice::new(level_one, total, min_support);

    let mut k = 2;
    while let Some(prev_level) = lattice.level(k - 1).filter(|level| !level.is_empty()) {
        let candidates = generate_candidates(prev_level, k);
        let candidate_count = candidates.len();

        let level: Level = candidates
            .into_iter()
            .filter_map(|candidate| {
                let count = count_support(transactions, &candidate);
                is_frequent(count).then_some((candidate, count))
            })
            .collect();

        debug!(level = k, candidates = candidate_count, frequent = level.len(), "counted candidates");
        if level.is_empty() {
            break;
        }

        lattice.push_level(level);
        k += 1;
    }

    info!(
        transactions = total,
        levels = lattice.max_level(),
        itemsets = lattice.len(),
        "mined frequent itemsets"
    );

    Ok(lattice)
}

/// Count every distinct item once per transaction and keep the frequent ones
fn frequent_items(transactions: &[Transaction], is_frequent: impl Fn(usize) -> bool) -> Level {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for transaction in transactions {
        for item in transaction.items() {
            *counts.entry(item.as_str()).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .filter(|&(_, count)| is_frequent(count))
        .map(|(item, count)| (Itemset::singleton(item), count))
        .collect()
}

/// Number of transactions that are supersets of `candidate`
fn count_support(transactions: &[Transaction], candidate: &Itemset) -> usize {
    transactions
        .iter()
        .filter(|transaction| transaction.contains_all(candidate))
        .count()
}

/// Generate the size-`k` candidates from the frequent itemsets of size `k - 1`.
///
/// Join: two itemsets sharing their first `k - 2` items, where the first one's
/// last item is strictly smaller, yield their union. Prune: a candidate
/// survives only if all of its `k` immediate subsets are in `prev_level`.
pub fn generate_candidates(prev_level: &Level, k: usize) -> BTreeSet<Itemset> {
    debug_assert!(k >= 2);
    debug_assert!(prev_level.keys().all(|itemset| itemset.len() == k - 1));

    let prefix_len = k - 2;
    let sorted: Vec<&Itemset> = prev_level.keys().collect();

    let mut joined = BTreeSet::new();
    for (i, p) in sorted.iter().enumerate() {
        for q in &sorted[i + 1..] {
            // Itemsets sharing a prefix are contiguous in canonical order
            if p.prefix(prefix_len) != q.prefix(prefix_len) {
                break;
            }
            if let (Some(p_last), Some(q_last)) = (p.last(), q.last()) {
                if p_last < q_last {
                    joined.insert(p.with_item(q_last.clone()));
                }
            }
        }
    }

    joined
        .into_iter()
        .filter(|candidate| candidate.subsets().all(|subset| prev_level.contains_key(&subset)))
        .collect()
}
