//! Prefix completion over known category names.

use std::collections::BTreeSet;

/// The set of categories offered when completing the category prompt.
///
/// Seeded from the store at session start and extended with every category
/// accepted during the session.
#[derive(Debug, Clone, Default)]
pub struct CategoryCompleter {
  known: BTreeSet<String>,
}

impl CategoryCompleter {
  pub fn new<I, S>(categories: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let mut completer = Self::default();
    for c in categories {
      completer.insert(c);
    }
    completer
  }

  /// Add a category. Empty names are ignored.
  pub fn insert(&mut self, category: impl Into<String>) {
    let category = category.into();
    if !category.is_empty() {
      self.known.insert(category);
    }
  }

  pub fn len(&self) -> usize { self.known.len() }

  pub fn is_empty(&self) -> bool { self.known.is_empty() }

  /// All known categories starting with `prefix`, in sorted order.
  pub fn complete(&self, prefix: &str) -> Vec<&str> {
    self
      .known
      .range(prefix.to_owned()..)
      .take_while(|c| c.starts_with(prefix))
      .map(String::as_str)
      .collect()
  }

  /// The longest string every match for `prefix` starts with.
  ///
  /// Returns `prefix` unchanged when nothing matches.
  pub fn common_prefix(&self, prefix: &str) -> String {
    let matches = self.complete(prefix);
    let Some((first, rest)) = matches.split_first() else {
      return prefix.to_owned();
    };

    let mut end = first.len();
    for other in rest {
      end = first
        .char_indices()
        .zip(other.chars())
        .take_while(|((_, a), b)| a == b)
        .last()
        .map_or(0, |((i, a), _)| i + a.len_utf8())
        .min(end);
    }
    first[..end].to_owned()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn completer() -> CategoryCompleter {
    CategoryCompleter::new([
      "French (Body parts)",
      "French (Food)",
      "German",
      "Französisch",
    ])
  }

  #[test]
  fn complete_returns_sorted_prefix_matches() {
    let c = completer();
    assert_eq!(c.complete("French"), vec!["French (Body parts)", "French (Food)"]);
    assert_eq!(c.complete("G"), vec!["German"]);
    assert!(c.complete("Spanish").is_empty());
    assert_eq!(c.complete("").len(), 4);
  }

  #[test]
  fn common_prefix_extends_as_far_as_matches_agree() {
    let c = completer();
    assert_eq!(c.common_prefix("French"), "French (");
    assert_eq!(c.common_prefix("Fr"), "Fr");
    assert_eq!(c.common_prefix("Ge"), "German");
    assert_eq!(c.common_prefix("Xy"), "Xy");
  }

  #[test]
  fn common_prefix_respects_multibyte_characters() {
    let c = CategoryCompleter::new(["Französisch", "Franzose"]);
    assert_eq!(c.common_prefix("F"), "Franz");

    let c = CategoryCompleter::new(["Öl", "Öfen"]);
    assert_eq!(c.common_prefix(""), "Ö");
  }

  #[test]
  fn inserted_categories_become_candidates() {
    let mut c = completer();
    c.insert("Spanish");
    c.insert("");
    assert_eq!(c.len(), 5);
    assert_eq!(c.complete("Sp"), vec!["Spanish"]);
  }
}
