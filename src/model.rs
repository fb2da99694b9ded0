//! Core data model: items, transactions, itemsets, the frequent-itemset lattice and rules

use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// An opaque item identifier, ordered lexicographically
pub type Item = String;

/// A single transaction: an immutable set of distinct items
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    items: HashSet<Item>,
}

impl Transaction {
    /// Build a transaction from any collection of items; duplicates collapse
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Item>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(item)
    }

    /// True when every item of `itemset` occurs in this transaction
    pub fn contains_all(&self, itemset: &Itemset) -> bool {
        itemset.len() <= self.items.len()
            && itemset.items().iter().all(|item| self.items.contains(item))
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}

impl<S: Into<Item>> FromIterator<S> for Transaction {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// A set of distinct items kept in canonical (ascending, deduplicated) order.
///
/// Two itemsets with the same members compare and hash equal, so an itemset
/// is used directly as a map key. The derived ordering is lexicographic over
/// the sorted item sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Itemset {
    items: Vec<Item>,
}

impl Itemset {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Item>,
    {
        let mut items: Vec<Item> = items.into_iter().map(Into::into).collect();
        items.sort();
        items.dedup();
        Self { items }
    }

    pub fn singleton(item: impl Into<Item>) -> Self {
        Self {
            items: vec![item.into()],
        }
    }

    /// Wrap an already sorted, duplicate-free sequence
    fn from_sorted(items: Vec<Item>) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items
            .binary_search_by(|probe| probe.as_str().cmp(item))
            .is_ok()
    }

    /// The first `n` items in canonical order
    pub fn prefix(&self, n: usize) -> &[Item] {
        &self.items[..n.min(self.items.len())]
    }

    pub fn last(&self) -> Option<&Item> {
        self.items.last()
    }

    /// The subset obtained by dropping the item at `index`
    pub fn without(&self, index: usize) -> Itemset {
        let mut items = self.items.clone();
        items.remove(index);
        Self::from_sorted(items)
    }

    /// All immediate subsets (one item removed), in index order
    pub fn subsets(&self) -> impl Iterator<Item = Itemset> + '_ {
        (0..self.items.len()).map(move |index| self.without(index))
    }

    /// This itemset extended by `item`, re-canonicalized
    pub fn with_item(&self, item: impl Into<Item>) -> Itemset {
        let item = item.into();
        match self.items.binary_search(&item) {
            Ok(_) => self.clone(),
            Err(pos) => {
                let mut items = self.items.clone();
                items.insert(pos, item);
                Self::from_sorted(items)
            }
        }
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.items.join(","))
    }
}

/// Frequent itemsets of one size, mapped to their absolute transaction counts
pub type Level = BTreeMap<Itemset, usize>;

/// The frequent-itemset lattice produced by one mining run.
///
/// Levels are dense from size 1 up to [`Lattice::max_level`]. Level 1 always
/// exists, possibly empty; no other level is ever empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    levels: Vec<Level>,
    transaction_count: usize,
    min_support: f64,
}

impl Lattice {
    pub(crate) fn new(level_one: Level, transaction_count: usize, min_support: f64) -> Self {
        Self {
            levels: vec![level_one],
            transaction_count,
            min_support,
        }
    }

    pub(crate) fn push_level(&mut self, level: Level) {
        debug_assert!(!level.is_empty());
        self.levels.push(level);
    }

    /// Frequent itemsets of size `k`, if that level exists
    pub fn level(&self, k: usize) -> Option<&Level> {
        k.checked_sub(1).and_then(|index| self.levels.get(index))
    }

    /// All levels paired with their itemset size
    pub fn levels(&self) -> impl Iterator<Item = (usize, &Level)> {
        self.levels.iter().enumerate().map(|(index, level)| (index + 1, level))
    }

    /// Size of the largest stored level
    pub fn max_level(&self) -> usize {
        self.levels.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    pub fn min_support(&self) -> f64 {
        self.min_support
    }

    /// Number of transactions containing `itemset`, if it is frequent
    pub fn count(&self, itemset: &Itemset) -> Option<usize> {
        self.level(itemset.len())?.get(itemset).copied()
    }

    pub fn support(&self, itemset: &Itemset) -> Option<f64> {
        self.count(itemset).map(|count| self.support_of(count))
    }

    /// Convert an absolute count into a fraction of all transactions
    pub fn support_of(&self, count: usize) -> f64 {
        count as f64 / self.transaction_count as f64
    }

    /// Total number of frequent itemsets across levels
    pub fn len(&self) -> usize {
        self.levels.iter().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every frequent itemset with its support, level by level
    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, f64)> + '_ {
        self.levels
            .iter()
            .flat_map(|level| level.iter())
            .map(|(itemset, &count)| (itemset, self.support_of(count)))
    }
}

/// An association rule `antecedent => consequent` with a single-item consequent
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub antecedent: Itemset,
    pub consequent: Item,
    /// Support of `antecedent ∪ {consequent}`
    pub support: f64,
    /// `support(antecedent ∪ {consequent}) / support(antecedent)`
    pub confidence: f64,
    /// `confidence / support({consequent})`
    pub lift: f64,
}

impl Rule {
    /// The full itemset the rule was drawn from
    pub fn itemset(&self) -> Itemset {
        self.antecedent.with_item(self.consequent.clone())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} => [{}] (Conf: {:.2}%, Supp: {:.2}%)",
            self.antecedent,
            self.consequent,
            self.confidence * 100.0,
            self.support * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itemset_is_canonical() {
        let a = Itemset::new(["milk", "bread", "butter", "bread"]);
        let b = Itemset::new(["butter", "milk", "bread"]);

        assert_eq!(a, b);
        assert_eq!(a.items(), &["bread", "butter", "milk"]);
        assert_eq!(a.len(), 3);
        assert_eq!(a.to_string(), "[bread,butter,milk]");
    }

    #[test]
    fn test_itemset_ordering_is_lexicographic() {
        let ab = Itemset::new(["a", "b"]);
        let ac = Itemset::new(["a", "c"]);
        let bc = Itemset::new(["b", "c"]);

        assert!(ab < ac);
        assert!(ac < bc);
    }

    #[test]
    fn test_itemset_subsets() {
        let abc = Itemset::new(["c", "a", "b"]);
        let subsets: Vec<Itemset> = abc.subsets().collect();

        assert_eq!(
            subsets,
            vec![
                Itemset::new(["b", "c"]),
                Itemset::new(["a", "c"]),
                Itemset::new(["a", "b"]),
            ]
        );
        assert_eq!(abc.prefix(2), &["a", "b"]);
        assert_eq!(abc.last().map(String::as_str), Some("c"));
    }

    #[test]
    fn test_itemset_with_item() {
        let ac = Itemset::new(["a", "c"]);

        assert_eq!(ac.with_item("b"), Itemset::new(["a", "b", "c"]));
        assert_eq!(ac.with_item("a"), ac);
        assert!(ac.contains("c"));
        assert!(!ac.contains("b"));
    }

    #[test]
    fn test_transaction_collapses_duplicates() {
        let t = Transaction::new(["jam", "jam", "bread"]);

        assert_eq!(t.len(), 2);
        assert!(t.contains("jam"));
        assert!(t.contains_all(&Itemset::new(["bread", "jam"])));
        assert!(!t.contains_all(&Itemset::new(["bread", "milk"])));
        assert!(Transaction::default().is_empty());
    }

    #[test]
    fn test_lattice_lookup() {
        let mut level_one = Level::new();
        level_one.insert(Itemset::singleton("a"), 3);
        level_one.insert(Itemset::singleton("b"), 2);
        let mut lattice = Lattice::new(level_one, 4, 0.5);

        let mut level_two = Level::new();
        level_two.insert(Itemset::new(["a", "b"]), 2);
        lattice.push_level(level_two);

        assert_eq!(lattice.max_level(), 2);
        assert_eq!(lattice.len(), 3);
        assert_eq!(lattice.count(&Itemset::new(["b", "a"])), Some(2));
        assert_eq!(lattice.support(&Itemset::singleton("a")), Some(0.75));
        assert_eq!(lattice.support(&Itemset::singleton("z")), None);
        assert!(lattice.level(0).is_none());
        assert!(lattice.level(3).is_none());
        assert_eq!(lattice.iter().count(), 3);
    }

    #[test]
    fn test_rule_display() {
        let rule = Rule {
            antecedent: Itemset::singleton("bread"),
            consequent: "butter".to_string(),
            support: 0.6,
            confidence: 0.75,
            lift: 0.9375,
        };

        assert_eq!(rule.to_string(), "[bread] => [butter] (Conf: 75.00%, Supp: 60.00%)");
        assert_eq!(rule.itemset(), Itemset::new(["bread", "butter"]));
    }
}
