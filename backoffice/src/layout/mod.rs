//! Category layout and price-list grid
//!
//! [`planner`] assigns fractions to the B/C/D price columns of a category;
//! [`grid`] turns a whole catalog into price-list rows.

pub mod diagnostics;
pub mod grid;
pub mod planner;

pub use diagnostics::Diagnostic;
pub use grid::{Cell, GridRow, PriceList, RowKind, format_price};
pub use planner::{CategoryKind, CategoryLayout, Slot, check_fractionation, plan_category};
