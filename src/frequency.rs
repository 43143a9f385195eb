use crate::config::{Config, EmptyInput};
use crate::error::{HuffmanError, Result};
use std::collections::btree_map::{self, BTreeMap};
use tracing::debug;

/// Occurrence counts per symbol.
///
/// Every key present has a count of at least one. Keys are kept in symbol
/// order, which is what makes tree construction reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap<Symbol> {
    counts: BTreeMap<Symbol, u64>,
}

impl<Symbol> FrequencyMap<Symbol>
where
    Symbol: Ord,
{
    /// Counts every symbol in a single pass. An empty source gives an empty map.
    pub fn count(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut counts = BTreeMap::new();
        for s in symbols {
            *counts.entry(s).or_insert(0u64) += 1;
        }

        debug!(distinct = counts.len(), "counted symbol frequencies");
        Self { counts }
    }

    /// Like [`count`](Self::count), but applies the configured empty-input policy.
    pub fn count_with(symbols: impl IntoIterator<Item = Symbol>, config: &Config) -> Result<Self> {
        let freq = Self::count(symbols);
        if freq.is_empty() && config.empty_input == EmptyInput::Reject {
            return Err(HuffmanError::EmptyInput);
        }

        Ok(freq)
    }

    /// Builds a map from counts known ahead of time. Zero counts are dropped
    /// and repeated symbols accumulate.
    ///
    /// Fails if the counts sum past `u64::MAX`, so no subtree weight built
    /// from the map can overflow.
    pub fn from_counts(pairs: impl IntoIterator<Item = (Symbol, u64)>) -> Result<Self> {
        let mut counts = BTreeMap::new();
        let mut total = 0u64;
        for (s, n) in pairs.into_iter().filter(|&(_, n)| n > 0) {
            total = total.checked_add(n).ok_or(HuffmanError::WeightOverflow)?;
            let count = counts.entry(s).or_insert(0u64);
            // bounded by total
            *count += n;
        }

        Ok(Self { counts })
    }

    pub fn get(&self, symbol: &Symbol) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Sum of all counts, i.e. the length of the counted source.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl<Symbol> FrequencyMap<Symbol> {
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Symbol, u64> {
        self.counts.iter()
    }
}

impl<'a, Symbol> IntoIterator for &'a FrequencyMap<Symbol> {
    type Item = (&'a Symbol, &'a u64);
    type IntoIter = btree_map::Iter<'a, Symbol, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_bytes() {
        let f = FrequencyMap::count("AAAABBBCCD".bytes());
        assert_eq!(f.len(), 4);
        assert_eq!(f.get(&b'A'), 4);
        assert_eq!(f.get(&b'B'), 3);
        assert_eq!(f.get(&b'C'), 2);
        assert_eq!(f.get(&b'D'), 1);
        assert_eq!(f.get(&b'Z'), 0);
        assert_eq!(f.total(), 10);
    }

    #[test]
    fn count_empty_is_empty() {
        let f = FrequencyMap::count(std::iter::empty::<char>());
        assert!(f.is_empty());
        assert_eq!(f.total(), 0);
    }

    #[test]
    fn reject_policy_fails_on_empty() {
        let config = Config::new().with_empty_input(EmptyInput::Reject);
        let err = FrequencyMap::count_with("".chars(), &config).unwrap_err();
        assert_eq!(err, HuffmanError::EmptyInput);

        let f = FrequencyMap::count_with("x".chars(), &config).unwrap();
        assert_eq!(f.get(&'x'), 1);
    }

    #[test]
    fn allow_policy_passes_empty() {
        let f = FrequencyMap::count_with("".chars(), &Config::new()).unwrap();
        assert!(f.is_empty());
    }

    #[test]
    fn from_counts_drops_zero_and_merges() {
        let f = FrequencyMap::from_counts([('a', 2), ('b', 0), ('a', 3), ('c', 1)]).unwrap();
        assert_eq!(f.len(), 2);
        assert_eq!(f.get(&'a'), 5);
        assert_eq!(f.get(&'b'), 0);
    }

    #[test]
    fn from_counts_rejects_overflowing_total() {
        assert_eq!(
            FrequencyMap::from_counts([('a', u64::MAX), ('b', 1)]),
            Err(HuffmanError::WeightOverflow)
        );
        assert_eq!(
            FrequencyMap::from_counts([('a', u64::MAX), ('a', 1)]),
            Err(HuffmanError::WeightOverflow)
        );

        let f = FrequencyMap::from_counts([('a', u64::MAX - 1), ('b', 1)]).unwrap();
        assert_eq!(f.total(), u64::MAX);
    }

    #[test]
    fn iterates_in_symbol_order() {
        let f = FrequencyMap::count("cabca".chars());
        let keys: Vec<char> = f.iter().map(|(s, _)| *s).collect();
        assert_eq!(keys, vec!['a', 'b', 'c']);
    }
}
