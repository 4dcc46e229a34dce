//! SKU registry
//!
//! Category codes already handed out, per-base usage counts and every
//! token issued so far. Seeded from the catalog at session start so that
//! persisted SKUs are never handed out again.

use super::SkuNotice;
use shared::CatalogRecord;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct SkuRegistry {
    /// trimmed lower-case category name → code
    category_codes: HashMap<String, String>,
    /// base SKU → times used
    used_base_skus: HashMap<String, u32>,
    issued: HashSet<String>,
    notices: Vec<SkuNotice>,
}

fn category_key(category: &str) -> String {
    category.trim().to_lowercase()
}

impl SkuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-filled from the SKU fields of existing records
    pub fn seeded(records: &[CatalogRecord]) -> Self {
        let mut registry = Self::new();
        registry.seed(records);
        registry
    }

    /// Scan existing SKUs
    ///
    /// Each category takes one leading segment of its tokens, and no code
    /// goes to two categories. Codes that prefix the category's own name
    /// are preferred (a product moved in keeps its old category's code),
    /// then the code with more tokens, then the one seen first. A category
    /// left without a code derives one on first use.
    ///
    /// A token counts as one use of itself; a token ending in a suffix
    /// `n >= 2` also counts as `n` uses of the unsuffixed base.
    pub fn seed(&mut self, records: &[CatalogRecord]) {
        // (category key, code) → (prefixes the name, token count, first seen)
        let mut votes: HashMap<(String, String), (bool, usize, usize)> = HashMap::new();
        let mut seen = 0usize;

        for record in records {
            for token in record.sku_tokens() {
                if let Some(code) = token.split('-').next().filter(|c| !c.is_empty()) {
                    let vote = votes
                        .entry((category_key(&record.category), code.to_string()))
                        .or_insert_with(|| (name_has_prefix(&record.category, code), 0, seen));
                    vote.1 += 1;
                    seen += 1;
                }

                self.issued.insert(token.to_string());
                raise_count(&mut self.used_base_skus, token, 1);

                let base = token.trim_end_matches(|c: char| c.is_ascii_digit());
                if base.is_empty() || base.len() == token.len() {
                    continue;
                }
                match token[base.len()..].parse::<u32>() {
                    Ok(n) if n >= 2 => raise_count(&mut self.used_base_skus, base, n),
                    _ => {}
                }
            }
        }

        let mut votes: Vec<_> = votes.into_iter().collect();
        votes.sort_by(|(_, (a_own, a_count, a_seen)), (_, (b_own, b_count, b_seen))| {
            b_own
                .cmp(a_own)
                .then(b_count.cmp(a_count))
                .then(a_seen.cmp(b_seen))
        });
        for ((category, code), _) in votes {
            if self.category_codes.contains_key(&category) {
                continue;
            }
            if let Some(owner) = self.owner_of(&code) {
                tracing::debug!(category = %category, code = %code, owner, "Seeded code already claimed");
                continue;
            }
            self.category_codes.insert(category, code);
        }

        tracing::debug!(
            categories = self.category_codes.len(),
            tokens = self.issued.len(),
            "SKU registry seeded"
        );
    }

    /// Code registered for a category (case-insensitive, trimmed)
    pub fn code_for(&self, category: &str) -> Option<&str> {
        self.category_codes
            .get(&category_key(category))
            .map(String::as_str)
    }

    pub fn is_code_taken(&self, code: &str) -> bool {
        self.category_codes.values().any(|c| c == code)
    }

    /// Category (lower-cased) that owns `code`
    pub fn owner_of(&self, code: &str) -> Option<&str> {
        self.category_codes
            .iter()
            .find(|(_, c)| c.as_str() == code)
            .map(|(name, _)| name.as_str())
    }

    pub fn register_code(&mut self, category: &str, code: impl Into<String>) {
        self.category_codes.insert(category_key(category), code.into());
    }

    /// How many times `base` has been used
    pub fn base_count(&self, base: &str) -> u32 {
        self.used_base_skus.get(base).copied().unwrap_or(0)
    }

    pub fn is_issued(&self, token: &str) -> bool {
        self.issued.contains(token)
    }

    /// Next token for `base`: the base itself on first use, then `base2`,
    /// `base3`, ... skipping anything already issued
    pub fn next_token(&mut self, base: &str) -> String {
        let count = self.used_base_skus.entry(base.to_string()).or_insert(0);
        loop {
            *count += 1;
            let token = if *count == 1 {
                base.to_string()
            } else {
                format!("{}{}", base, count)
            };
            if self.issued.insert(token.clone()) {
                return token;
            }
        }
    }

    pub(crate) fn push_notice(&mut self, notice: SkuNotice) {
        tracing::warn!("{}", notice);
        self.notices.push(notice);
    }

    pub fn notices(&self) -> &[SkuNotice] {
        &self.notices
    }

    /// Drain collected notices
    pub fn take_notices(&mut self) -> Vec<SkuNotice> {
        std::mem::take(&mut self.notices)
    }
}

/// Whether `code` starts the category name (upper-cased, whitespace removed)
fn name_has_prefix(category: &str, code: &str) -> bool {
    let normalized: String = category
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();
    normalized.starts_with(code)
}

fn raise_count(counts: &mut HashMap<String, u32>, base: &str, at_least: u32) {
    let count = counts.entry(base.to_string()).or_insert(0);
    *count = (*count).max(at_least);
}
