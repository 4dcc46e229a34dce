//! Price-list grid
//!
//! Five fixed columns per row: label, B, C, D, brand. Category rows carry
//! the fraction headers, product rows the prices aligned under them.

use super::diagnostics::Diagnostic;
use super::planner::{self, PRICE_COLUMNS, Slot};
use serde::Serialize;
use shared::CatalogRecord;
use shared::models::catalog_record::columns;

/// Marker shown instead of a price when a product is out of stock
pub const OUT_OF_STOCK: &str = "SIN STOCK";

/// Header of the per-unit price column
pub const UNIT_MARKER: &str = "UNIDAD";

/// One price cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Price(i64),
    OutOfStock,
    Unit,
}

impl Cell {
    pub fn render(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(text) => text.clone(),
            Cell::Price(amount) => format_price(*amount),
            Cell::OutOfStock => OUT_OF_STOCK.to_string(),
            Cell::Unit => UNIT_MARKER.to_string(),
        }
    }
}

impl From<&Option<Slot>> for Cell {
    fn from(slot: &Option<Slot>) -> Self {
        match slot {
            Some(Slot::Fraction(label)) => Cell::Text(label.to_string()),
            Some(Slot::Unit) => Cell::Unit,
            None => Cell::Empty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Category,
    Product,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub kind: RowKind,
    /// Category name or product name
    pub label: String,
    pub columns: [Cell; PRICE_COLUMNS],
    pub brand: String,
}

impl GridRow {
    /// Plain text of the five columns
    pub fn render(&self) -> [String; 5] {
        let [b, c, d] = &self.columns;
        [
            self.label.clone(),
            b.render(),
            c.render(),
            d.render(),
            self.brand.clone(),
        ]
    }
}

/// A generated price list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceList {
    pub title: String,
    pub rows: Vec<GridRow>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PriceList {
    /// Lay out every category of `records`, in order of first appearance
    pub fn build(title: impl Into<String>, records: &[CatalogRecord]) -> Self {
        let mut rows = Vec::with_capacity(records.len());
        let mut diagnostics = Vec::new();

        for (category, members) in planner::group_by_category(records) {
            let Some(layout) = planner::plan_category(category, &members, &mut diagnostics) else {
                continue;
            };

            rows.push(GridRow {
                kind: RowKind::Category,
                label: category.to_string(),
                columns: layout.columns.each_ref().map(Cell::from),
                brand: columns::BRAND.to_string(),
            });

            for record in members {
                rows.push(GridRow {
                    kind: RowKind::Product,
                    label: record.product_name.clone(),
                    columns: planner::product_cells(&layout, record, &mut diagnostics),
                    brand: record.brand.clone(),
                });
            }
        }

        tracing::debug!(
            rows = rows.len(),
            diagnostics = diagnostics.len(),
            "Price list built"
        );

        Self {
            title: title.into(),
            rows,
            diagnostics,
        }
    }

    pub fn rendered_rows(&self) -> Vec<[String; 5]> {
        self.rows.iter().map(GridRow::render).collect()
    }
}

/// Render whole currency units as `$2.079`
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
