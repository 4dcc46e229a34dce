//! Fraction (fraccionamiento) labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// A packaging size label such as `100g` or `1kg`
///
/// Stored trimmed and lower-cased. Whether the label actually converts to
/// grams is decided by the pricing engine, so any text is accepted here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FractionLabel(String);

impl FractionLabel {
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(label.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split a FRACCIONAMIENTO cell (`"100g, 250g"`) into labels, keeping order
    pub fn parse_list(cell: &str) -> Vec<FractionLabel> {
        cell.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(FractionLabel::new)
            .collect()
    }

    /// Render labels back into a single cell
    pub fn join(labels: &[FractionLabel]) -> String {
        labels
            .iter()
            .map(FractionLabel::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FractionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FractionLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for FractionLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes() {
        assert_eq!(FractionLabel::new(" 1KG ").as_str(), "1kg");
        assert_eq!(FractionLabel::new("250g"), FractionLabel::from("250G"));
    }

    #[test]
    fn test_parse_list() {
        let labels = FractionLabel::parse_list("100g, 250g,,500g ");
        assert_eq!(
            labels,
            vec![
                FractionLabel::new("100g"),
                FractionLabel::new("250g"),
                FractionLabel::new("500g")
            ]
        );
        assert!(FractionLabel::parse_list("   ").is_empty());
    }

    #[test]
    fn test_join() {
        let labels = FractionLabel::parse_list("250g,1kg");
        assert_eq!(FractionLabel::join(&labels), "250g, 1kg");
        assert_eq!(FractionLabel::join(&[]), "");
    }
}
