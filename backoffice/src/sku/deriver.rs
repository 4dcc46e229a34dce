//! SKU deriver
//!
//! Stateless: everything it remembers goes into the caller's
//! [`SkuRegistry`].

use super::{CategoryCodePolicy, SkuNotice, SkuRegistry};
use shared::{FractionLabel, UnitType};

/// Shortest free code for a category
///
/// A category that already has a code keeps it. Otherwise prefixes of the
/// normalized name (trimmed, upper-cased, whitespace removed) are tried
/// from 3 characters up; when none is free the full name is used, handled
/// according to `policy`.
pub fn category_code(
    category: &str,
    registry: &mut SkuRegistry,
    policy: CategoryCodePolicy,
) -> String {
    if let Some(code) = registry.code_for(category) {
        return code.to_string();
    }

    let normalized: Vec<char> = category
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    for len in 3..=normalized.len() {
        let candidate: String = normalized[..len].iter().collect();
        if !registry.is_code_taken(&candidate) {
            registry.register_code(category, candidate.clone());
            return candidate;
        }
    }

    let full: String = normalized.into_iter().collect();
    let code = match (policy, registry.owner_of(&full).map(str::to_string)) {
        (_, None) => full,
        (CategoryCodePolicy::Shared, Some(owner)) => {
            registry.push_notice(SkuNotice::DuplicateCategoryCode {
                category: category.trim().to_string(),
                code: full.clone(),
                shared_with: owner,
            });
            full
        }
        (CategoryCodePolicy::Suffixed, Some(_)) => {
            let mut n = 1u32;
            loop {
                let candidate = format!("{}{}", full, n);
                if !registry.is_code_taken(&candidate) {
                    break candidate;
                }
                n += 1;
            }
        }
    };

    registry.register_code(category, code.clone());
    code
}

/// First 4 characters of the product name, whitespace removed, upper-cased
pub fn product_type_code(product_name: &str) -> String {
    product_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .take(4)
        .collect()
}

/// Code of one fraction label
///
/// - UNIDAD: `UNI` for an empty label, otherwise the label upper-cased
/// - KG: `1kg` → `1KG`, `unidad` → `UNI`, otherwise the label's digits
///   followed by `G` (`250g` → `250G`); a label without digits gives an
///   empty code
pub fn fraction_code(unit_type: UnitType, label: &str) -> String {
    let label = label.trim();
    match unit_type {
        UnitType::ByUnit if label.is_empty() => "UNI".to_string(),
        UnitType::ByUnit => label.to_uppercase(),
        UnitType::ByWeight => match label.to_lowercase().as_str() {
            "1kg" => "1KG".to_string(),
            "unidad" => "UNI".to_string(),
            other => {
                let digits: String = other.chars().filter(char::is_ascii_digit).collect();
                if digits.is_empty() {
                    digits
                } else {
                    digits + "G"
                }
            }
        },
    }
}

/// SKU field for a product: one token per fraction, joined with `", "`
///
/// Labels are used in the order given. A product without labels gets a
/// single token for an empty fraction (`UNI` for UNIDAD products).
pub fn derive(
    product_name: &str,
    category: &str,
    unit_type: UnitType,
    labels: &[FractionLabel],
    registry: &mut SkuRegistry,
    policy: CategoryCodePolicy,
) -> String {
    let cat_code = category_code(category, registry, policy);
    let type_code = product_type_code(product_name);

    let empty = [FractionLabel::new("")];
    let labels = if labels.is_empty() { &empty[..] } else { labels };

    let tokens: Vec<String> = labels
        .iter()
        .map(|label| {
            let frac_code = fraction_code(unit_type, label.as_str());
            let base = format!("{}-{}-{}", cat_code, type_code, frac_code);
            let base = base.trim_end_matches('-');
            registry.next_token(base)
        })
        .collect();

    tracing::debug!(product = product_name, category, sku = %tokens.join(", "), "SKU derived");
    tokens.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn labels(cell: &str) -> Vec<FractionLabel> {
        FractionLabel::parse_list(cell)
    }

    #[test]
    fn test_category_code_shortest_free_prefix() {
        let mut registry = SkuRegistry::new();
        let policy = CategoryCodePolicy::Shared;
        assert_eq!(category_code("Frutos Secos", &mut registry, policy), "FRU");
        assert_eq!(category_code("Frutas", &mut registry, policy), "FRUT");
        assert_eq!(category_code("frutos secos", &mut registry, policy), "FRU");
        assert_eq!(category_code("Lacteos", &mut registry, policy), "LAC");
    }

    #[test]
    fn test_category_code_short_name() {
        let mut registry = SkuRegistry::new();
        assert_eq!(
            category_code("Te", &mut registry, CategoryCodePolicy::Shared),
            "TE"
        );
    }

    #[test]
    fn test_category_code_exhausted_shared() {
        let mut registry = SkuRegistry::new();
        let policy = CategoryCodePolicy::Shared;
        assert_eq!(category_code("TES", &mut registry, policy), "TES");
        // same normalized name, different category
        assert_eq!(category_code("T ES", &mut registry, policy), "TES");
        assert_eq!(
            registry.notices(),
            &[SkuNotice::DuplicateCategoryCode {
                category: "T ES".into(),
                code: "TES".into(),
                shared_with: "tes".into(),
            }]
        );
    }

    #[test]
    fn test_category_code_exhausted_suffixed() {
        let mut registry = SkuRegistry::new();
        let policy = CategoryCodePolicy::Suffixed;
        assert_eq!(category_code("TES", &mut registry, policy), "TES");
        assert_eq!(category_code("T ES", &mut registry, policy), "TES1");
        assert_eq!(category_code("T E S", &mut registry, policy), "TES2");
        assert!(registry.notices().is_empty());
    }

    #[test]
    fn test_product_type_code() {
        assert_eq!(product_type_code("Almendras"), "ALME");
        assert_eq!(product_type_code("Te Verde"), "TEVE");
        assert_eq!(product_type_code("Sal"), "SAL");
        assert_eq!(product_type_code(""), "");
    }

    #[test]
    fn test_fraction_code() {
        assert_eq!(fraction_code(UnitType::ByUnit, ""), "UNI");
        assert_eq!(fraction_code(UnitType::ByUnit, "pack x6"), "PACK X6");
        assert_eq!(fraction_code(UnitType::ByWeight, "1kg"), "1KG");
        assert_eq!(fraction_code(UnitType::ByWeight, "1KG"), "1KG");
        assert_eq!(fraction_code(UnitType::ByWeight, "unidad"), "UNI");
        assert_eq!(fraction_code(UnitType::ByWeight, "250g"), "250G");
        assert_eq!(fraction_code(UnitType::ByWeight, "0.5kg"), "05G");
        assert_eq!(fraction_code(UnitType::ByWeight, ""), "");
    }

    #[test]
    fn test_derive_almendras_twice() {
        let mut registry = SkuRegistry::new();
        let policy = CategoryCodePolicy::Shared;
        let first = derive(
            "Almendras",
            "Frutos Secos",
            UnitType::ByWeight,
            &labels("250g"),
            &mut registry,
            policy,
        );
        assert_eq!(first, "FRU-ALME-250G");

        let second = derive(
            "Almendras",
            "Frutos Secos",
            UnitType::ByWeight,
            &labels("250g"),
            &mut registry,
            policy,
        );
        assert_eq!(second, "FRU-ALME-250G2");
    }

    #[test]
    fn test_derive_multiple_fractions_keeps_order() {
        let mut registry = SkuRegistry::new();
        let sku = derive(
            "Nueces",
            "Frutos Secos",
            UnitType::ByWeight,
            &labels("500g, 100g, 1kg"),
            &mut registry,
            CategoryCodePolicy::Shared,
        );
        assert_eq!(sku, "FRU-NUEC-500G, FRU-NUEC-100G, FRU-NUEC-1KG");
    }

    #[test]
    fn test_derive_unit_and_empty_fraction() {
        let mut registry = SkuRegistry::new();
        let policy = CategoryCodePolicy::Shared;
        assert_eq!(
            derive("Agua", "Bebidas", UnitType::ByUnit, &[], &mut registry, policy),
            "BEB-AGUA-UNI"
        );
        assert_eq!(
            derive("Mix Oriental", "Mixes", UnitType::ByWeight, &[], &mut registry, policy),
            "MIX-MIXO"
        );
        assert_eq!(
            derive("Mix Oriental", "Mixes", UnitType::ByWeight, &labels("surtido"), &mut registry, policy),
            "MIX-MIXO2"
        );
    }

    #[test]
    fn test_derive_never_repeats_tokens() {
        let mut registry = SkuRegistry::new();
        let mut seen = HashSet::new();
        for _ in 0..12 {
            let sku = derive(
                "Almendras",
                "Frutos Secos",
                UnitType::ByWeight,
                &labels("100g, 250g"),
                &mut registry,
                CategoryCodePolicy::Shared,
            );
            for token in sku.split(", ") {
                assert!(seen.insert(token.to_string()), "repeated token {}", token);
            }
        }
        assert_eq!(registry.base_count("FRU-ALME-100G"), 12);
    }
}
