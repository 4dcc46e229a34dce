//! Catalog Record Model
//!
//! One product row of the catalog sheet, plus the codec between sheet rows
//! (column name → cell text) and the typed record.

use super::fraction::FractionLabel;
use super::unit::{StockIndicator, UnitType};
use crate::error::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Sheet column headers
pub mod columns {
    pub const CATEGORY: &str = "CATEGORIA";
    pub const PRODUCT: &str = "PRODUCTO";
    pub const UNIT_TYPE: &str = "KG / UNIDAD";
    pub const SALE_PRICE: &str = "PRECIO VENTA";
    pub const COST: &str = "COSTO";
    pub const FRACTIONS: &str = "FRACCIONAMIENTO";
    pub const STOCK: &str = "STOCK";
    pub const SKU: &str = "SKU";
    pub const FACTOR: &str = "FACTOR";
    pub const BRAND: &str = "MARCA";

    /// Every column written back by [`super::CatalogRecord::to_row`]
    pub const ALL: [&str; 10] = [
        SKU, PRODUCT, SALE_PRICE, COST, BRAND, CATEGORY, UNIT_TYPE, STOCK, FRACTIONS, FACTOR,
    ];
}

/// A sheet row: column header → cell text
pub type CatalogRow = BTreeMap<String, String>;

/// Catalog record entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Category name (trimmed; grouping is case-sensitive)
    pub category: String,
    pub product_name: String,
    pub unit_type: UnitType,
    /// Price per kilogram (KG) or per unit (UNIDAD)
    pub base_price: Decimal,
    pub cost: Decimal,
    /// Packaging sizes, only meaningful for KG products
    #[serde(default)]
    pub fractions: Vec<FractionLabel>,
    #[serde(default)]
    pub stock: StockIndicator,
    /// Comma-joined SKU tokens, one per fraction
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub brand: String,
    /// Price factor used by mixes; carried through untouched
    #[serde(default)]
    pub factor: Option<Decimal>,
}

impl CatalogRecord {
    pub fn new(
        category: impl Into<String>,
        product_name: impl Into<String>,
        unit_type: UnitType,
        base_price: Decimal,
    ) -> Self {
        Self {
            category: category.into().trim().to_string(),
            product_name: product_name.into().trim().to_string(),
            unit_type,
            base_price,
            cost: Decimal::ZERO,
            fractions: Vec::new(),
            stock: StockIndicator::Unlimited,
            sku: String::new(),
            brand: String::new(),
            factor: None,
        }
    }

    /// Set fractions from a FRACCIONAMIENTO cell
    pub fn with_fractions(mut self, cell: &str) -> Self {
        self.fractions = FractionLabel::parse_list(cell);
        self
    }

    pub fn with_stock(mut self, stock: StockIndicator) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Individual SKU tokens of the comma-joined SKU field
    ///
    /// A `nan` left behind by spreadsheet exports counts as no SKU.
    pub fn sku_tokens(&self) -> impl Iterator<Item = &str> {
        self.sku
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("nan"))
    }

    pub fn has_sku(&self) -> bool {
        self.sku_tokens().next().is_some()
    }

    /// Build a record from a sheet row
    ///
    /// CATEGORIA and PRODUCTO are required; the sale type and stock must be
    /// valid; prices that cannot be read fall back to zero with a warning.
    pub fn from_row(row: &CatalogRow) -> AppResult<Self> {
        let cell = |name: &str| row.get(name).map(|v| v.trim()).unwrap_or("");

        let category = cell(columns::CATEGORY);
        if category.is_empty() {
            return Err(AppError::required(columns::CATEGORY));
        }
        let product_name = cell(columns::PRODUCT);
        if product_name.is_empty() {
            return Err(AppError::required(columns::PRODUCT)
                .with_detail("category", category));
        }

        let unit_type = UnitType::from_str(cell(columns::UNIT_TYPE))
            .map_err(|e| e.with_detail("product", product_name))?;
        let stock = StockIndicator::from_str(cell(columns::STOCK))
            .map_err(|e| e.with_detail("product", product_name))?;

        let base_price = money_or_zero(cell(columns::SALE_PRICE), product_name, columns::SALE_PRICE);
        let cost = money_or_zero(cell(columns::COST), product_name, columns::COST);
        let factor = parse_money(cell(columns::FACTOR));

        Ok(Self {
            category: category.to_string(),
            product_name: product_name.to_string(),
            unit_type,
            base_price,
            cost,
            fractions: FractionLabel::parse_list(cell(columns::FRACTIONS)),
            stock,
            sku: cell(columns::SKU).to_string(),
            brand: cell(columns::BRAND).to_string(),
            factor,
        })
    }

    /// Render this record as a sheet row
    pub fn to_row(&self) -> CatalogRow {
        let mut row = CatalogRow::new();
        row.insert(columns::SKU.into(), self.sku.clone());
        row.insert(columns::PRODUCT.into(), self.product_name.clone());
        row.insert(columns::SALE_PRICE.into(), format_money(self.base_price));
        row.insert(columns::COST.into(), format_money(self.cost));
        row.insert(columns::BRAND.into(), self.brand.clone());
        row.insert(columns::CATEGORY.into(), self.category.clone());
        row.insert(columns::UNIT_TYPE.into(), self.unit_type.to_string());
        row.insert(columns::STOCK.into(), self.stock.to_string());
        row.insert(columns::FRACTIONS.into(), FractionLabel::join(&self.fractions));
        row.insert(
            columns::FACTOR.into(),
            self.factor.map(format_money).unwrap_or_default(),
        );
        row
    }
}

/// Read a sheet money cell such as `$20.200` or `20,5`
///
/// `$` is dropped, `.` is a thousands separator and `,` the decimal mark.
/// Returns `None` for empty cells and for anything that is not a number.
pub fn parse_money(cell: &str) -> Option<Decimal> {
    let cleaned: String = cell
        .trim()
        .replace('$', "")
        .replace('.', "")
        .replace(',', ".")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Write a money value in the sheet format read by [`parse_money`]
pub fn format_money(value: Decimal) -> String {
    value.normalize().to_string().replace('.', ",")
}

fn money_or_zero(cell: &str, product: &str, column: &str) -> Decimal {
    if cell.is_empty() {
        return Decimal::ZERO;
    }
    match parse_money(cell) {
        Some(value) => value,
        None => {
            tracing::warn!(product, column, value = cell, "Unreadable price cell, using 0");
            Decimal::ZERO
        }
    }
}
