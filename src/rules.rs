//! Association rule derivation over a completed lattice

use crate::error::{validate_threshold, MiningError, MiningResult};
use crate::model::{Itemset, Lattice, Rule};
use std::cmp::Ordering;
use tracing::info;

/// Derive every single-consequent rule whose confidence is at least `min_confidence`.
///
/// For each frequent itemset of size k >= 2 and each of its items, the rule
/// `itemset - {item} => item` is considered. Confidence is computed from the
/// absolute counts, so boundary ratios such as 3/4 compare exactly.
pub fn derive_rules(lattice: &Lattice, min_confidence: f64) -> MiningResult<Vec<Rule>> {
    validate_threshold("min_confidence", min_confidence)?;

    let mut rules = Vec::new();
    for (k, level) in lattice.levels().skip(1) {
        let antecedents = lattice
            .level(k - 1)
            .ok_or_else(|| inconsistency(level.keys().next(), "level below"))?;

        for (itemset, &count) in level {
            for (index, consequent) in itemset.items().iter().enumerate() {
                let antecedent = itemset.without(index);
                let antecedent_count = *antecedents
                    .get(&antecedent)
                    .ok_or_else(|| inconsistency(Some(itemset), &antecedent.to_string()))?;

                let confidence = count as f64 / antecedent_count as f64;
                if confidence < min_confidence {
                    continue;
                }

                let consequent_support = lattice
                    .support(&Itemset::singleton(consequent.clone()))
                    .ok_or_else(|| inconsistency(Some(itemset), &format!("[{}]", consequent)))?;

                rules.push(Rule {
                    antecedent,
                    consequent: consequent.clone(),
                    support: lattice.support_of(count),
                    confidence,
                    lift: confidence / consequent_support,
                });
            }
        }
    }

    info!(rules = rules.len(), min_confidence, "derived association rules");
    Ok(rules)
}

fn inconsistency(itemset: Option<&Itemset>, missing: &str) -> MiningError {
    MiningError::InternalInconsistency {
        itemset: itemset.map(ToString::to_string).unwrap_or_default(),
        missing: missing.to_string(),
    }
}

/// Order rules by descending confidence, then descending support, then lexically
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.support.partial_cmp(&a.support).unwrap_or(Ordering::Equal))
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
}
