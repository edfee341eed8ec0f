//! Category suggestion index
//!
//! Categories are plain display names. The list is a suggestion index rather
//! than a foreign-key table: names are unique ignoring case, the first-seen
//! casing is kept, and removing a name never touches existing expenses.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sorted, case-insensitively unique list of category names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryList(Vec<String>);

impl CategoryList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from raw names, canonicalizing each in order
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for name in names {
            list.canonicalize(name.as_ref());
        }
        list
    }

    /// Resolve a raw category string to its canonical form
    ///
    /// The name is trimmed and matched case-insensitively against the list.
    /// On a match the stored casing is returned; otherwise the trimmed name is
    /// inserted (keeping the list sorted) and returned. Blank input returns an
    /// empty string and is not stored.
    pub fn canonicalize(&mut self, raw: &str) -> String {
        let name = raw.trim();
        if name.is_empty() {
            return String::new();
        }
        if let Some(existing) = self.find(name) {
            return existing.to_string();
        }
        self.0.push(name.to_string());
        self.0.sort_by(|a, b| compare_names(a, b));
        name.to_string()
    }

    /// Find the canonical form of a name, ignoring case
    pub fn find(&self, name: &str) -> Option<&str> {
        let lower = name.trim().to_lowercase();
        self.0
            .iter()
            .find(|c| c.to_lowercase() == lower)
            .map(String::as_str)
    }

    /// Whether the list contains the exact canonical name
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    /// Replace `old` with `new`, keeping the list sorted and unique
    ///
    /// Returns the canonical form of the new name: if `new` matches another
    /// existing category ignoring case, the two entries merge into that one.
    pub fn rename(&mut self, old: &str, new: &str) -> String {
        self.0.retain(|c| c != old);
        self.canonicalize(new)
    }

    /// Remove a name from the suggestion list; returns whether it was present
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != name);
        self.0.len() != before
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Alphabetical order ignoring case, with exact text as tiebreaker
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_casing_wins() {
        let mut list = CategoryList::new();
        assert_eq!(list.canonicalize("food"), "food");
        assert_eq!(list.canonicalize("Food"), "food");
        assert_eq!(list.canonicalize(" FOOD "), "food");
        assert_eq!(list.names(), &["food".to_string()]);
    }

    #[test]
    fn test_list_is_sorted() {
        let list = CategoryList::from_names(["Transport", "food", "Bills"]);
        assert_eq!(list.names(), &["Bills", "food", "Transport"]);
    }

    #[test]
    fn test_blank_names_are_not_stored() {
        let mut list = CategoryList::new();
        assert_eq!(list.canonicalize("   "), "");
        assert!(list.is_empty());
    }

    #[test]
    fn test_rename() {
        let mut list = CategoryList::from_names(["Food", "Transport"]);
        assert_eq!(list.rename("Food", "Groceries"), "Groceries");
        assert_eq!(list.names(), &["Groceries", "Transport"]);
    }

    #[test]
    fn test_rename_merges_into_existing() {
        let mut list = CategoryList::from_names(["Food", "Groceries"]);
        assert_eq!(list.rename("Food", "groceries"), "Groceries");
        assert_eq!(list.names(), &["Groceries"]);
    }

    #[test]
    fn test_remove() {
        let mut list = CategoryList::from_names(["Food", "Transport"]);
        assert!(list.remove("Food"));
        assert!(!list.remove("Food"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_serialization_is_a_plain_array() {
        let list = CategoryList::from_names(["Food"]);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["Food"]"#);
    }
}
