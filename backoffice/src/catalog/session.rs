//! Catalog editing session
//!
//! Owns the records, the category order and the SKU registry for one
//! editing session. Every operation runs to completion before the next.

use crate::layout::{CategoryKind, PriceList, Slot, check_fractionation};
use crate::sku::{self, CategoryCodePolicy, SkuNotice, SkuRegistry};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::catalog_record::columns;
use shared::{CatalogRecord, CatalogRow, FractionLabel, StockIndicator, UnitType};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Input of [`CatalogSession::add_product`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub category: String,
    pub product_name: String,
    pub unit_type: UnitType,
    pub base_price: Decimal,
    pub cost: Decimal,
    pub fractions: Vec<FractionLabel>,
    pub stock: StockIndicator,
    pub brand: String,
}

impl NewProduct {
    pub fn new(
        category: impl Into<String>,
        product_name: impl Into<String>,
        unit_type: UnitType,
        base_price: Decimal,
    ) -> Self {
        Self {
            category: category.into(),
            product_name: product_name.into(),
            unit_type,
            base_price,
            cost: Decimal::ZERO,
            fractions: Vec::new(),
            stock: StockIndicator::Unlimited,
            brand: String::new(),
        }
    }

    pub fn with_fractions(mut self, cell: &str) -> Self {
        self.fractions = FractionLabel::parse_list(cell);
        self
    }

    pub fn with_stock(mut self, stock: StockIndicator) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }
}

/// Field changes for [`CatalogSession::update_product`]; `None` keeps the value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub category: Option<String>,
    pub product_name: Option<String>,
    pub unit_type: Option<UnitType>,
    pub base_price: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub fractions: Option<Vec<FractionLabel>>,
    pub stock: Option<StockIndicator>,
    pub brand: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CatalogSession {
    records: Vec<CatalogRecord>,
    category_order: Vec<String>,
    registry: SkuRegistry,
    policy: CategoryCodePolicy,
}

impl CatalogSession {
    /// Open a session over existing records and seed the SKU registry
    pub fn open(records: Vec<CatalogRecord>, policy: CategoryCodePolicy) -> Self {
        let registry = SkuRegistry::seeded(&records);
        let mut session = Self {
            records,
            category_order: Vec::new(),
            registry,
            policy,
        };
        session.sync_order();

        tracing::info!(
            products = session.records.len(),
            categories = session.category_order.len(),
            policy = %policy,
            "Catalog session opened"
        );
        session
    }

    /// Open a session from sheet rows
    ///
    /// Rows without a product name are skipped; any other invalid row fails
    /// the whole load.
    pub fn from_rows(rows: &[CatalogRow], policy: CategoryCodePolicy) -> AppResult<Self> {
        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let product = row.get(columns::PRODUCT).map(|p| p.trim()).unwrap_or("");
            if product.is_empty() {
                tracing::debug!(row = index, "Skipping row without product");
                continue;
            }
            let record = CatalogRecord::from_row(row).map_err(|e| e.with_detail("row", index))?;
            records.push(record);
        }
        Ok(Self::open(records, policy))
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> AppResult<&CatalogRecord> {
        self.records
            .get(index)
            .ok_or_else(|| AppError::product_not_found(index))
    }

    pub fn category_order(&self) -> &[String] {
        &self.category_order
    }

    pub fn registry(&self) -> &SkuRegistry {
        &self.registry
    }

    pub fn policy(&self) -> CategoryCodePolicy {
        self.policy
    }

    /// Drain notices raised while deriving SKUs
    pub fn take_sku_notices(&mut self) -> Vec<SkuNotice> {
        self.registry.take_notices()
    }

    // ==================== Products ====================

    /// Add a product and derive its SKU; returns its index
    ///
    /// A KG product added without fractions to an existing category takes
    /// the fraction configuration of that category's first KG product.
    pub fn add_product(&mut self, product: NewProduct) -> AppResult<usize> {
        let category = required(&product.category, columns::CATEGORY)?;
        let product_name = required(&product.product_name, columns::PRODUCT)?;
        check_price(product.base_price, columns::SALE_PRICE)?;
        check_price(product.cost, columns::COST)?;

        let mut fractions = product.fractions;
        if product.unit_type == UnitType::ByWeight
            && fractions.is_empty()
            && let Some(template) = self
                .records
                .iter()
                .find(|r| {
                    r.category == category
                        && r.unit_type == UnitType::ByWeight
                        && !r.fractions.is_empty()
                })
        {
            fractions = template.fractions.clone();
        }

        let sku = sku::derive(
            &product_name,
            &category,
            product.unit_type,
            &fractions,
            &mut self.registry,
            self.policy,
        );

        let mut record = CatalogRecord::new(
            category.clone(),
            product_name,
            product.unit_type,
            product.base_price,
        )
        .with_stock(product.stock)
        .with_sku(sku)
        .with_brand(product.brand.trim());
        record.cost = product.cost;
        record.fractions = fractions;

        let index = match self.records.iter().rposition(|r| r.category == category) {
            Some(last) => last + 1,
            None => self.records.len(),
        };

        tracing::info!(
            product = %record.product_name,
            category = %record.category,
            sku = %record.sku,
            index,
            "Product added"
        );
        self.records.insert(index, record);
        self.sync_order();
        Ok(index)
    }

    /// Apply field changes to one product
    ///
    /// The SKU is derived again when the category, name, sale type or
    /// fractions change.
    pub fn update_product(&mut self, index: usize, update: ProductUpdate) -> AppResult<()> {
        let category = update
            .category
            .as_deref()
            .map(|c| required(c, columns::CATEGORY))
            .transpose()?;
        let product_name = update
            .product_name
            .as_deref()
            .map(|p| required(p, columns::PRODUCT))
            .transpose()?;
        if let Some(price) = update.base_price {
            check_price(price, columns::SALE_PRICE)?;
        }
        if let Some(cost) = update.cost {
            check_price(cost, columns::COST)?;
        }

        let record = self
            .records
            .get_mut(index)
            .ok_or_else(|| AppError::product_not_found(index))?;

        let mut identity_changed = false;
        if let Some(category) = category {
            identity_changed |= record.category != category;
            record.category = category;
        }
        if let Some(name) = product_name {
            identity_changed |= record.product_name != name;
            record.product_name = name;
        }
        if let Some(unit_type) = update.unit_type {
            identity_changed |= record.unit_type != unit_type;
            record.unit_type = unit_type;
        }
        if let Some(fractions) = update.fractions {
            identity_changed |= record.fractions != fractions;
            record.fractions = fractions;
        }
        if let Some(price) = update.base_price {
            record.base_price = price;
        }
        if let Some(cost) = update.cost {
            record.cost = cost;
        }
        if let Some(stock) = update.stock {
            record.stock = stock;
        }
        if let Some(brand) = update.brand {
            record.brand = brand.trim().to_string();
        }

        if identity_changed {
            record.sku = sku::derive(
                &record.product_name,
                &record.category,
                record.unit_type,
                &record.fractions,
                &mut self.registry,
                self.policy,
            );
        }

        tracing::info!(
            index,
            product = %record.product_name,
            sku_changed = identity_changed,
            "Product updated"
        );
        self.sync_order();
        Ok(())
    }

    /// Remove the given rows; returns how many were removed
    pub fn delete_products(&mut self, indices: &[usize]) -> AppResult<usize> {
        let indices = self.checked_indices(indices)?;
        for &index in indices.iter().rev() {
            self.records.remove(index);
        }
        self.sync_order();

        tracing::info!(count = indices.len(), "Products deleted");
        Ok(indices.len())
    }

    /// Move the given rows to another category
    ///
    /// SKUs are kept: persisted codes are never reassigned.
    pub fn move_products(&mut self, indices: &[usize], destination: &str) -> AppResult<()> {
        let destination = required(destination, columns::CATEGORY)?;
        let indices = self.checked_indices(indices)?;
        for &index in &indices {
            self.records[index].category = destination.clone();
        }
        self.sync_order();

        tracing::info!(count = indices.len(), destination = %destination, "Products moved");
        Ok(())
    }

    // ==================== Categories ====================

    /// Rename a category; returns how many products were touched
    pub fn rename_category(&mut self, old: &str, new: &str) -> AppResult<usize> {
        let old = old.trim();
        let new = required(new, columns::CATEGORY)?;

        let mut renamed = 0;
        for record in self.records.iter_mut().filter(|r| r.category == old) {
            record.category = new.clone();
            renamed += 1;
        }
        if renamed == 0 {
            return Err(AppError::category_not_found(old));
        }

        if self.registry.code_for(&new).is_none()
            && let Some(code) = self.registry.code_for(old).map(str::to_string)
        {
            self.registry.register_code(&new, code);
        }

        if self.category_order.iter().any(|c| *c == new) {
            self.category_order.retain(|c| c != old);
        } else {
            for entry in self.category_order.iter_mut().filter(|c| c.as_str() == old) {
                *entry = new.clone();
            }
        }
        self.sync_order();

        tracing::info!(old, new = %new, products = renamed, "Category renamed");
        Ok(renamed)
    }

    /// Remove a category and all of its products
    pub fn delete_category(&mut self, name: &str) -> AppResult<usize> {
        let name = name.trim();
        let before = self.records.len();
        self.records.retain(|r| r.category != name);
        let removed = before - self.records.len();
        if removed == 0 {
            return Err(AppError::category_not_found(name));
        }
        self.sync_order();

        tracing::info!(category = name, products = removed, "Category deleted");
        Ok(removed)
    }

    /// Set the fractions of every KG product in a category
    ///
    /// The labels must convert to grams and fit the column capacity of the
    /// category. Returns the stored labels, de-duplicated and sorted by
    /// weight.
    pub fn configure_fractionation(
        &mut self,
        category: &str,
        labels: &[FractionLabel],
    ) -> AppResult<Vec<FractionLabel>> {
        let category = category.trim();
        let members: Vec<&CatalogRecord> = self
            .records
            .iter()
            .filter(|r| r.category == category)
            .collect();
        let Some(kind) = CategoryKind::classify(members.iter().map(|r| r.unit_type)) else {
            return Err(AppError::category_not_found(category));
        };
        if kind == CategoryKind::PureUnit {
            return Err(AppError::new(ErrorCode::NoWeightProducts).with_detail("category", category));
        }

        let columns = check_fractionation(kind, labels)
            .map_err(|e| e.with_detail("category", category))?;
        let fractions: Vec<FractionLabel> = columns
            .into_iter()
            .filter_map(|slot| match slot {
                Some(Slot::Fraction(label)) => Some(label),
                _ => None,
            })
            .collect();

        let mut updated = 0;
        for record in self
            .records
            .iter_mut()
            .filter(|r| r.category == category && r.unit_type == UnitType::ByWeight)
        {
            record.fractions = fractions.clone();
            updated += 1;
        }

        tracing::info!(
            category,
            fractions = %FractionLabel::join(&fractions),
            products = updated,
            "Fractionation configured"
        );
        Ok(fractions)
    }

    /// Reorder categories; rows are sorted by category position, then name
    pub fn reorder_categories(&mut self, order: &[String]) -> AppResult<()> {
        let order: Vec<String> = order.iter().map(|c| c.trim().to_string()).collect();
        let requested: HashSet<&str> = order.iter().map(String::as_str).collect();
        let current: HashSet<&str> = self.category_order.iter().map(String::as_str).collect();

        if requested.len() != order.len() || requested != current {
            return Err(AppError::with_message(
                ErrorCode::InvalidCategoryOrder,
                "Category order must list every category exactly once",
            )
            .with_detail("expected", self.category_order.len())
            .with_detail("received", order.len()));
        }

        let position: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        self.records.sort_by(|a, b| {
            let pa = position.get(a.category.as_str()).copied().unwrap_or(usize::MAX);
            let pb = position.get(b.category.as_str()).copied().unwrap_or(usize::MAX);
            pa.cmp(&pb).then_with(|| a.product_name.cmp(&b.product_name))
        });
        self.category_order = order;

        tracing::info!(order = ?self.category_order, "Categories reordered");
        Ok(())
    }

    // ==================== SKUs and output ====================

    /// Derive SKUs for records whose SKU field is empty; returns how many
    pub fn assign_missing_skus(&mut self) -> usize {
        let mut assigned = 0;
        for record in &mut self.records {
            if record.has_sku() {
                continue;
            }
            record.sku = sku::derive(
                &record.product_name,
                &record.category,
                record.unit_type,
                &record.fractions,
                &mut self.registry,
                self.policy,
            );
            assigned += 1;
        }
        if assigned > 0 {
            tracing::info!(count = assigned, "Missing SKUs assigned");
        }
        assigned
    }

    /// Price list of the current catalog, categories in session order
    pub fn price_list(&self, title: &str) -> PriceList {
        PriceList::build(title, &self.ordered_records())
    }

    /// Rows for the catalog sink
    pub fn snapshot_rows(&self) -> Vec<CatalogRow> {
        self.records.iter().map(CatalogRecord::to_row).collect()
    }

    // ==================== Helpers ====================

    fn ordered_records(&self) -> Vec<CatalogRecord> {
        let position: HashMap<&str, usize> = self
            .category_order
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        let mut records = self.records.clone();
        records.sort_by_key(|r| position.get(r.category.as_str()).copied().unwrap_or(usize::MAX));
        records
    }

    /// Drop categories without products, append new ones in first-appearance order
    fn sync_order(&mut self) {
        let present: HashSet<&str> = self.records.iter().map(|r| r.category.as_str()).collect();
        self.category_order.retain(|c| present.contains(c.as_str()));
        for record in &self.records {
            if !self.category_order.contains(&record.category) {
                self.category_order.push(record.category.clone());
            }
        }
    }

    /// Sorted, de-duplicated indices; any unknown index fails the call
    fn checked_indices(&self, indices: &[usize]) -> AppResult<Vec<usize>> {
        let unique: BTreeSet<usize> = indices.iter().copied().collect();
        if let Some(&bad) = unique.iter().find(|&&i| i >= self.records.len()) {
            return Err(AppError::product_not_found(bad));
        }
        Ok(unique.into_iter().collect())
    }
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::required(field));
    }
    Ok(value.to_string())
}

fn check_price(value: Decimal, field: &str) -> AppResult<()> {
    if value.is_sign_negative() {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("{} cannot be negative", field),
        )
        .with_detail("value", value.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn sample() -> CatalogSession {
        CatalogSession::open(
            vec![
                CatalogRecord::new("FRUTOS SECOS", "Almendras", UnitType::ByWeight, d(19400))
                    .with_fractions("100g, 250g")
                    .with_sku("FRU-ALME-100G, FRU-ALME-250G"),
                CatalogRecord::new("BEBIDAS", "Agua", UnitType::ByUnit, d(900))
                    .with_sku("BEB-AGUA-UNI"),
                CatalogRecord::new("FRUTOS SECOS", "Nueces", UnitType::ByWeight, d(16000))
                    .with_fractions("250g, 500g")
                    .with_sku("FRU-NUEC-250G, FRU-NUEC-500G"),
            ],
            CategoryCodePolicy::Shared,
        )
    }

    fn names(session: &CatalogSession) -> Vec<&str> {
        session
            .records()
            .iter()
            .map(|r| r.product_name.as_str())
            .collect()
    }

    #[test]
    fn test_open_tracks_category_order() {
        let session = sample();
        assert_eq!(session.category_order(), &["FRUTOS SECOS", "BEBIDAS"]);
    }

    #[test]
    fn test_add_product_inserts_after_category() {
        let mut session = sample();
        let index = session
            .add_product(NewProduct::new("BEBIDAS", "Jugo", UnitType::ByUnit, d(1500)))
            .unwrap();
        assert_eq!(index, 2);
        assert_eq!(session.record(index).unwrap().sku, "BEB-JUGO-UNI");
        assert_eq!(names(&session), vec!["Almendras", "Agua", "Jugo", "Nueces"]);
    }

    #[test]
    fn test_add_product_new_category_appends() {
        let mut session = sample();
        let index = session
            .add_product(NewProduct::new("TES", "Verde", UnitType::ByWeight, d(9000)).with_fractions("100g"))
            .unwrap();
        assert_eq!(index, 3);
        assert_eq!(session.category_order(), &["FRUTOS SECOS", "BEBIDAS", "TES"]);
        assert_eq!(session.record(index).unwrap().sku, "TES-VERD-100G");
    }

    #[test]
    fn test_add_weight_product_inherits_fractions() {
        let mut session = sample();
        let index = session
            .add_product(NewProduct::new("FRUTOS SECOS", "Pasas", UnitType::ByWeight, d(7000)))
            .unwrap();
        let record = session.record(index).unwrap();
        assert_eq!(record.fractions, FractionLabel::parse_list("100g, 250g"));
        assert_eq!(record.sku, "FRU-PASA-100G, FRU-PASA-250G");
    }

    #[test]
    fn test_add_product_requires_name_and_category() {
        let mut session = sample();
        let err = session
            .add_product(NewProduct::new("BEBIDAS", "  ", UnitType::ByUnit, d(1)))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let err = session
            .add_product(NewProduct::new("", "Jugo", UnitType::ByUnit, d(1)))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let err = session
            .add_product(NewProduct::new("BEBIDAS", "Jugo", UnitType::ByUnit, d(-1)))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPrice);
        assert_eq!(session.records().len(), 3);
    }

    #[test]
    fn test_add_duplicate_product_gets_suffix() {
        let mut session = sample();
        let index = session
            .add_product(
                NewProduct::new("FRUTOS SECOS", "Almendras", UnitType::ByWeight, d(19400))
                    .with_fractions("250g"),
            )
            .unwrap();
        assert_eq!(session.record(index).unwrap().sku, "FRU-ALME-250G2");
    }

    #[test]
    fn test_update_product_rederives_sku() {
        let mut session = sample();
        session
            .update_product(
                1,
                ProductUpdate {
                    product_name: Some("Agua Mineral".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        // same type code, so the base is reused
        assert_eq!(session.record(1).unwrap().sku, "BEB-AGUA-UNI2");
    }

    #[test]
    fn test_update_price_keeps_sku() {
        let mut session = sample();
        session
            .update_product(
                0,
                ProductUpdate {
                    base_price: Some(d(20000)),
                    stock: Some(StockIndicator::OutOfStock),
                    ..Default::default()
                },
            )
            .unwrap();
        let record = session.record(0).unwrap();
        assert_eq!(record.base_price, d(20000));
        assert_eq!(record.sku, "FRU-ALME-100G, FRU-ALME-250G");
    }

    #[test]
    fn test_update_unknown_index() {
        let mut session = sample();
        let err = session.update_product(9, ProductUpdate::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }

    #[test]
    fn test_delete_products() {
        let mut session = sample();
        assert_eq!(session.delete_products(&[2, 0, 0]).unwrap(), 2);
        assert_eq!(names(&session), vec!["Agua"]);
        assert_eq!(session.category_order(), &["BEBIDAS"]);

        let err = session.delete_products(&[0, 5]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn test_move_products() {
        let mut session = sample();
        session.move_products(&[1], "FRUTOS SECOS").unwrap();
        assert_eq!(session.record(1).unwrap().category, "FRUTOS SECOS");
        assert_eq!(session.record(1).unwrap().sku, "BEB-AGUA-UNI");
        assert_eq!(session.category_order(), &["FRUTOS SECOS"]);
    }

    #[test]
    fn test_rename_category() {
        let mut session = sample();
        assert_eq!(session.rename_category("FRUTOS SECOS", "SECOS").unwrap(), 2);
        assert_eq!(session.category_order(), &["SECOS", "BEBIDAS"]);
        assert_eq!(session.registry().code_for("SECOS"), Some("FRU"));

        let err = session.rename_category("NADA", "OTRA").unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
    }

    #[test]
    fn test_rename_into_existing_category_merges() {
        let mut session = sample();
        session.rename_category("BEBIDAS", "FRUTOS SECOS").unwrap();
        assert_eq!(session.category_order(), &["FRUTOS SECOS"]);
    }

    #[test]
    fn test_delete_category() {
        let mut session = sample();
        assert_eq!(session.delete_category("FRUTOS SECOS").unwrap(), 2);
        assert_eq!(names(&session), vec!["Agua"]);
        assert_eq!(session.category_order(), &["BEBIDAS"]);
        assert_eq!(
            session.delete_category("FRUTOS SECOS").unwrap_err().code,
            ErrorCode::CategoryNotFound
        );
    }

    #[test]
    fn test_configure_fractionation() {
        let mut session = sample();
        let stored = session
            .configure_fractionation("FRUTOS SECOS", &FractionLabel::parse_list("1kg, 250g"))
            .unwrap();
        assert_eq!(stored, FractionLabel::parse_list("250g, 1kg"));
        assert_eq!(session.record(0).unwrap().fractions, stored);
        assert_eq!(session.record(2).unwrap().fractions, stored);
    }

    #[test]
    fn test_configure_fractionation_errors() {
        let mut session = sample();
        let err = session
            .configure_fractionation("BEBIDAS", &FractionLabel::parse_list("100g"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NoWeightProducts);

        let err = session
            .configure_fractionation("FRUTOS SECOS", &FractionLabel::parse_list("abc"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedFraction);

        let err = session
            .configure_fractionation(
                "FRUTOS SECOS",
                &FractionLabel::parse_list("100g, 250g, 500g, 1kg"),
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CapacityExceeded);

        let err = session
            .configure_fractionation("NADA", &FractionLabel::parse_list("100g"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
    }

    #[test]
    fn test_configure_fractionation_mixed_allows_two() {
        let mut session = sample();
        session.move_products(&[1], "FRUTOS SECOS").unwrap();
        let err = session
            .configure_fractionation("FRUTOS SECOS", &FractionLabel::parse_list("100g, 250g, 500g"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CapacityExceeded);
        assert!(
            session
                .configure_fractionation("FRUTOS SECOS", &FractionLabel::parse_list("100g, 250g"))
                .is_ok()
        );
    }

    #[test]
    fn test_reorder_categories() {
        let mut session = sample();
        session
            .reorder_categories(&["BEBIDAS".to_string(), "FRUTOS SECOS".to_string()])
            .unwrap();
        assert_eq!(names(&session), vec!["Agua", "Almendras", "Nueces"]);
        assert_eq!(session.category_order(), &["BEBIDAS", "FRUTOS SECOS"]);
    }

    #[test]
    fn test_reorder_requires_permutation() {
        let mut session = sample();
        for order in [
            vec!["BEBIDAS".to_string()],
            vec!["BEBIDAS".to_string(), "BEBIDAS".to_string()],
            vec!["BEBIDAS".to_string(), "TES".to_string()],
        ] {
            let err = session.reorder_categories(&order).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidCategoryOrder);
        }
    }

    #[test]
    fn test_assign_missing_skus() {
        let mut session = CatalogSession::open(
            vec![
                CatalogRecord::new("FRUTOS SECOS", "Almendras", UnitType::ByWeight, d(19400))
                    .with_fractions("250g")
                    .with_sku("FRU-ALME-250G"),
                CatalogRecord::new("FRUTOS SECOS", "Almendras", UnitType::ByWeight, d(19400))
                    .with_fractions("250g"),
                CatalogRecord::new("BEBIDAS", "Agua", UnitType::ByUnit, d(900)).with_sku("nan"),
            ],
            CategoryCodePolicy::Shared,
        );
        assert_eq!(session.assign_missing_skus(), 2);
        assert_eq!(session.record(1).unwrap().sku, "FRU-ALME-250G2");
        assert_eq!(session.record(2).unwrap().sku, "BEB-AGUA-UNI");
        assert_eq!(session.assign_missing_skus(), 0);
    }

    #[test]
    fn test_price_list_follows_category_order() {
        let session = sample();
        let list = session.price_list("LISTA");
        let labels: Vec<&str> = list.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["FRUTOS SECOS", "Almendras", "Nueces", "BEBIDAS", "Agua"]
        );
    }

    #[test]
    fn test_from_rows_skips_blank_products() {
        let rows: Vec<CatalogRow> = vec![
            CatalogRecord::new("BEBIDAS", "Agua", UnitType::ByUnit, d(900)).to_row(),
            [(columns::CATEGORY.to_string(), "BEBIDAS".to_string())]
                .into_iter()
                .collect(),
        ];
        let session = CatalogSession::from_rows(&rows, CategoryCodePolicy::Shared).unwrap();
        assert_eq!(session.records().len(), 1);
        assert_eq!(session.snapshot_rows().len(), 1);
    }
}
