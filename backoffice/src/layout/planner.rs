//! Category Layout Planner
//!
//! Decides how a category's fractions map onto the three price columns
//! (B, C, D) shared by the price-list export and the fractionation setup.
//!
//! Rules:
//! - A category mixing KG and UNIDAD products shows at most 2 fractions,
//!   a pure category at most 3.
//! - Fractions are ordered by weight; when there are too many the smallest
//!   are kept.
//! - Weight columns are right-aligned; in a mixed category column D is
//!   reserved for the UNIDAD price.

use super::diagnostics::Diagnostic;
use super::grid::Cell;
use crate::pricing::{price_for_fraction, same_weight, sort_weight, to_grams};
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::{CatalogRecord, FractionLabel, UnitType};

/// Number of price columns (B, C, D)
pub const PRICE_COLUMNS: usize = 3;

/// Column that holds UNIDAD prices
const UNIT_COLUMN: usize = PRICE_COLUMNS - 1;

/// Kind of a category, derived from the sale types of its products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    PureWeight,
    PureUnit,
    Mixed,
}

impl CategoryKind {
    /// Classify from the sale types present; `None` for an empty category
    pub fn classify<I>(units: I) -> Option<Self>
    where
        I: IntoIterator<Item = UnitType>,
    {
        let (mut weight, mut unit) = (false, false);
        for u in units {
            match u {
                UnitType::ByWeight => weight = true,
                UnitType::ByUnit => unit = true,
            }
        }
        match (weight, unit) {
            (true, true) => Some(Self::Mixed),
            (true, false) => Some(Self::PureWeight),
            (false, true) => Some(Self::PureUnit),
            (false, false) => None,
        }
    }

    /// How many fraction columns the category may show
    pub const fn capacity(&self) -> usize {
        match self {
            Self::Mixed => 2,
            Self::PureWeight | Self::PureUnit => 3,
        }
    }

    /// Columns a KG price may occupy in this kind of category
    fn weight_columns(&self) -> std::ops::Range<usize> {
        match self {
            Self::Mixed => 0..UNIT_COLUMN,
            Self::PureWeight | Self::PureUnit => 0..PRICE_COLUMNS,
        }
    }
}

/// Content of one header column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Fraction(FractionLabel),
    Unit,
}

/// Column assignment of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLayout {
    pub category: String,
    pub kind: CategoryKind,
    pub allowed: usize,
    pub columns: [Option<Slot>; PRICE_COLUMNS],
}

impl CategoryLayout {
    pub fn slots_used(&self) -> usize {
        self.columns.iter().filter(|c| c.is_some()).count()
    }

    /// Header fractions, left to right
    pub fn fractions(&self) -> Vec<FractionLabel> {
        self.columns
            .iter()
            .filter_map(|c| match c {
                Some(Slot::Fraction(label)) => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    /// Column holding the header fraction of the same weight as `label`
    pub fn column_for(&self, label: &FractionLabel) -> Option<usize> {
        self.columns.iter().position(|c| match c {
            Some(Slot::Fraction(header)) => same_weight(header.as_str(), label.as_str()),
            _ => false,
        })
    }

    fn fraction_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, Some(Slot::Fraction(_))))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Group records by category, in order of first appearance
pub fn group_by_category(records: &[CatalogRecord]) -> Vec<(&str, Vec<&CatalogRecord>)> {
    let mut groups: Vec<(&str, Vec<&CatalogRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(name, _)| *name == record.category) {
            Some((_, members)) => members.push(record),
            None => groups.push((record.category.as_str(), vec![record])),
        }
    }
    groups
}

/// Lay out one category's header columns
///
/// Returns `None` when `members` is empty.
pub fn plan_category(
    category: &str,
    members: &[&CatalogRecord],
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<CategoryLayout> {
    let kind = CategoryKind::classify(members.iter().map(|r| r.unit_type))?;
    let allowed = kind.capacity();

    let mut union: Vec<FractionLabel> = Vec::new();
    for record in members.iter().filter(|r| r.unit_type == UnitType::ByWeight) {
        push_distinct(&mut union, &record.fractions);
    }

    for label in union.iter().filter(|l| to_grams(l.as_str()).is_err()) {
        Diagnostic::UnparsableFraction {
            category: category.to_string(),
            label: label.clone(),
        }
        .emit(diagnostics);
    }

    let kept = sort_and_truncate(union, allowed, category, None, diagnostics);

    Some(CategoryLayout {
        category: category.to_string(),
        kind,
        allowed,
        columns: assign_columns(kind, &kept),
    })
}

/// Price cells of one product row, aligned to the category header
///
/// An out-of-stock KG product shows `SIN STOCK` in the header's fraction
/// columns only, so a weight column the header leaves empty stays blank.
/// Without any header fraction it fills every weight-capable column.
pub fn product_cells(
    layout: &CategoryLayout,
    record: &CatalogRecord,
    diagnostics: &mut Vec<Diagnostic>,
) -> [Cell; PRICE_COLUMNS] {
    let mut cells: [Cell; PRICE_COLUMNS] = Default::default();
    let out_of_stock = record.stock.is_out_of_stock();

    match record.unit_type {
        UnitType::ByUnit => {
            cells[UNIT_COLUMN] = if out_of_stock {
                Cell::OutOfStock
            } else {
                price_for_fraction(UnitType::ByUnit, record.base_price, "")
                    .map(Cell::Price)
                    .unwrap_or_default()
            };
        }
        UnitType::ByWeight if out_of_stock => {
            let mut columns = layout.fraction_columns();
            if columns.is_empty() {
                columns = layout.kind.weight_columns().collect();
            }
            for c in columns {
                cells[c] = Cell::OutOfStock;
            }
        }
        UnitType::ByWeight => {
            if record.fractions.is_empty() {
                Diagnostic::MissingFractions {
                    category: layout.category.clone(),
                    product: record.product_name.clone(),
                }
                .emit(diagnostics);
                return cells;
            }

            let mut own = Vec::new();
            push_distinct(&mut own, &record.fractions);
            let own = sort_and_truncate(
                own,
                layout.allowed,
                &layout.category,
                Some(&record.product_name),
                diagnostics,
            );

            for label in own {
                let Some(column) = layout.column_for(&label) else {
                    continue;
                };
                match price_for_fraction(UnitType::ByWeight, record.base_price, label.as_str()) {
                    Some(price) => cells[column] = Cell::Price(price),
                    None => Diagnostic::UnpriceableFraction {
                        category: layout.category.clone(),
                        product: record.product_name.clone(),
                        label,
                    }
                    .emit(diagnostics),
                }
            }
        }
    }

    cells
}

/// Check a fraction configuration for a category kind
///
/// Every label must convert to grams and the count must fit the kind's
/// capacity. Returns the header columns the configuration would produce.
pub fn check_fractionation(
    kind: CategoryKind,
    labels: &[FractionLabel],
) -> AppResult<[Option<Slot>; PRICE_COLUMNS]> {
    for label in labels {
        to_grams(label.as_str()).map_err(AppError::from)?;
    }

    let mut distinct = Vec::new();
    push_distinct(&mut distinct, labels);
    if distinct.len() > kind.capacity() {
        return Err(AppError::with_message(
            ErrorCode::CapacityExceeded,
            format!(
                "At most {} fractions can be configured for this category",
                kind.capacity()
            ),
        )
        .with_detail("allowed", kind.capacity())
        .with_detail("requested", distinct.len()));
    }

    distinct.sort_by_key(|l| sort_weight(l.as_str()));
    Ok(assign_columns(kind, &distinct))
}

fn push_distinct(into: &mut Vec<FractionLabel>, labels: &[FractionLabel]) {
    for label in labels {
        if !into.iter().any(|l| same_weight(l.as_str(), label.as_str())) {
            into.push(label.clone());
        }
    }
}

/// Stable sort by grams, then keep the `allowed` smallest
fn sort_and_truncate(
    mut labels: Vec<FractionLabel>,
    allowed: usize,
    category: &str,
    product: Option<&str>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<FractionLabel> {
    labels.sort_by_key(|l| sort_weight(l.as_str()));
    if labels.len() > allowed {
        let dropped = labels.split_off(allowed);
        Diagnostic::CapacityExceeded {
            category: category.to_string(),
            product: product.map(str::to_string),
            allowed,
            dropped,
        }
        .emit(diagnostics);
    }
    labels
}

fn assign_columns(kind: CategoryKind, fractions: &[FractionLabel]) -> [Option<Slot>; PRICE_COLUMNS] {
    let mut columns: [Option<Slot>; PRICE_COLUMNS] = Default::default();
    match kind {
        CategoryKind::PureUnit => columns[UNIT_COLUMN] = Some(Slot::Unit),
        CategoryKind::PureWeight | CategoryKind::Mixed => {
            let end = kind.weight_columns().end;
            let start = end.saturating_sub(fractions.len());
            for (column, label) in (start..end).zip(fractions) {
                columns[column] = Some(Slot::Fraction(label.clone()));
            }
            if kind == CategoryKind::Mixed {
                columns[UNIT_COLUMN] = Some(Slot::Unit);
            }
        }
    }
    columns
}
