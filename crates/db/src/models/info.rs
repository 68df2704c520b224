//! Flat result rows for the inventory statistics queries.
//!
//! Each row converts into the matching input type of
//! [`sims_core::stats::build_info`].

use sims_core::stats::{ModelFigures, SalesTotals, SizeFigures, SizeSales};
use sims_core::types::DbId;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct ModelFiguresRow {
    pub id: DbId,
    pub name: String,
    pub brand: Option<String>,
    pub price: f64,
    pub picture_id: Option<String>,
}

impl From<ModelFiguresRow> for ModelFigures {
    fn from(row: ModelFiguresRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            brand: row.brand,
            price: row.price,
            picture_id: row.picture_id,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct SizeFiguresRow {
    pub id: DbId,
    pub pid: DbId,
    pub size: String,
    pub stock: i64,
}

impl From<SizeFiguresRow> for SizeFigures {
    fn from(row: SizeFiguresRow) -> Self {
        Self {
            id: row.id,
            pid: row.pid,
            size: row.size,
            stock: row.stock,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct SizeSalesRow {
    pub size_id: DbId,
    pub units_sold: i64,
    pub revenue: f64,
}

impl From<SizeSalesRow> for SizeSales {
    fn from(row: SizeSalesRow) -> Self {
        Self {
            size_id: row.size_id,
            units_sold: row.units_sold,
            revenue: row.revenue,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct SalesTotalsRow {
    pub transactions: i64,
    pub units_sold: i64,
    pub revenue: f64,
}

impl From<SalesTotalsRow> for SalesTotals {
    fn from(row: SalesTotalsRow) -> Self {
        Self {
            transactions: row.transactions,
            units_sold: row.units_sold,
            revenue: row.revenue,
        }
    }
}
