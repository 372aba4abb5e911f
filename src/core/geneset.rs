use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered list of gene symbols
///
/// Order follows whatever source the symbols came from. Duplicates can arrive
/// from upstream mappings (one input gene with several orthologs) and are kept;
/// callers that need uniqueness ask for [`GeneSet::deduplicated`]. Membership
/// operations build a transient hash set over the other collection, so each
/// filter is linear in the sizes of both sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneSet(pub Vec<String>);

impl GeneSet {
    #[must_use]
    pub fn new(genes: Vec<String>) -> Self {
        Self(genes)
    }

    /// Build a set from string slices; convenient for fixtures and tests
    #[must_use]
    pub fn from_symbols(symbols: &[&str]) -> Self {
        Self(symbols.iter().map(|s| (*s).to_string()).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.0.iter().any(|g| g == symbol)
    }

    /// Copy with duplicates removed, keeping the first occurrence of each symbol
    #[must_use]
    pub fn deduplicated(&self) -> Self {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.0.len());
        let mut out = Vec::with_capacity(self.0.len());
        for gene in &self.0 {
            if seen.insert(gene.as_str()) {
                out.push(gene.clone());
            }
        }
        Self(out)
    }

    /// Copy keeping only symbols that are members of `universe`, in order
    #[must_use]
    pub fn retained_in(&self, universe: &GeneSet) -> Self {
        let members = universe.member_set();
        Self(
            self.0
                .iter()
                .filter(|g| members.contains(g.as_str()))
                .cloned()
                .collect(),
        )
    }

    /// Copy with every member of `other` removed, in order
    #[must_use]
    pub fn minus(&self, other: &GeneSet) -> Self {
        let members = other.member_set();
        Self(
            self.0
                .iter()
                .filter(|g| !members.contains(g.as_str()))
                .cloned()
                .collect(),
        )
    }

    /// True when every symbol here is also a member of `superset`
    #[must_use]
    pub fn is_subset_of(&self, superset: &GeneSet) -> bool {
        let members = superset.member_set();
        self.0.iter().all(|g| members.contains(g.as_str()))
    }

    /// True when the two sets share no symbol
    #[must_use]
    pub fn is_disjoint_from(&self, other: &GeneSet) -> bool {
        let members = other.member_set();
        self.0.iter().all(|g| !members.contains(g.as_str()))
    }

    fn member_set(&self) -> HashSet<&str> {
        self.0.iter().map(String::as_str).collect()
    }
}

impl From<Vec<String>> for GeneSet {
    fn from(genes: Vec<String>) -> Self {
        Self(genes)
    }
}

impl FromIterator<String> for GeneSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a GeneSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicated_keeps_first_occurrence() {
        let set = GeneSet::from_symbols(&["A", "B", "A", "C", "B"]);
        assert_eq!(set.deduplicated(), GeneSet::from_symbols(&["A", "B", "C"]));
    }

    #[test]
    fn test_deduplicated_preserves_order() {
        let set = GeneSet::from_symbols(&["Z", "A", "Z", "M"]);
        assert_eq!(set.deduplicated(), GeneSet::from_symbols(&["Z", "A", "M"]));
    }

    #[test]
    fn test_retained_in() {
        let set = GeneSet::from_symbols(&["A", "B", "C", "D"]);
        let universe = GeneSet::from_symbols(&["B", "D", "E"]);
        assert_eq!(set.retained_in(&universe), GeneSet::from_symbols(&["B", "D"]));
    }

    #[test]
    fn test_retained_in_keeps_duplicates() {
        // Duplicates arriving from an upstream mapping survive a filter
        let set = GeneSet::from_symbols(&["A", "B", "A"]);
        let universe = GeneSet::from_symbols(&["A"]);
        assert_eq!(set.retained_in(&universe), GeneSet::from_symbols(&["A", "A"]));
    }

    #[test]
    fn test_minus() {
        let set = GeneSet::from_symbols(&["A", "B", "C", "D"]);
        let removed = GeneSet::from_symbols(&["B", "D"]);
        assert_eq!(set.minus(&removed), GeneSet::from_symbols(&["A", "C"]));
    }

    #[test]
    fn test_minus_empty_is_identity() {
        let set = GeneSet::from_symbols(&["A", "B"]);
        assert_eq!(set.minus(&GeneSet::default()), set);
    }

    #[test]
    fn test_is_subset_of() {
        let set = GeneSet::from_symbols(&["A", "B"]);
        let superset = GeneSet::from_symbols(&["A", "B", "C"]);
        assert!(set.is_subset_of(&superset));
        assert!(!superset.is_subset_of(&set));
        assert!(GeneSet::default().is_subset_of(&set));
    }

    #[test]
    fn test_is_disjoint_from() {
        let set = GeneSet::from_symbols(&["A", "B"]);
        assert!(set.is_disjoint_from(&GeneSet::from_symbols(&["C", "D"])));
        assert!(!set.is_disjoint_from(&GeneSet::from_symbols(&["B"])));
        assert!(set.is_disjoint_from(&GeneSet::default()));
    }

    #[test]
    fn test_contains() {
        let set = GeneSet::from_symbols(&["SNAP25", "GFAP"]);
        assert!(set.contains("GFAP"));
        assert!(!set.contains("gfap"));
    }

    #[test]
    fn test_serde_transparent() {
        let set = GeneSet::from_symbols(&["A", "B"]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[\"A\",\"B\"]");
        let back: GeneSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
