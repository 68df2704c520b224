//! Read-only statistics queries backing `/getInfo`.
//!
//! Each query returns a flat result set; the nesting is done by
//! [`sims_core::stats::build_info`]. The queries are independent so callers
//! may run them concurrently.

use sims_core::stats::{ModelFigures, SalesTotals, SizeFigures, SizeSales};
use sqlx::SqlitePool;

use crate::models::info::{ModelFiguresRow, SalesTotalsRow, SizeFiguresRow, SizeSalesRow};

pub struct InfoRepo;

impl InfoRepo {
    /// Active models, ordered by name.
    pub async fn models(pool: &SqlitePool) -> Result<Vec<ModelFigures>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ModelFiguresRow>(
            "SELECT id, name, brand, price, picture_id
             FROM models
             WHERE is_active = 1
             ORDER BY name, id",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Every size with its current stock.
    pub async fn sizes(pool: &SqlitePool) -> Result<Vec<SizeFigures>, sqlx::Error> {
        let rows = sqlx::query_as::<_, SizeFiguresRow>(
            "SELECT id, pid, size, stock FROM sizes ORDER BY pid, id",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Units sold and revenue grouped by size.
    pub async fn size_sales(pool: &SqlitePool) -> Result<Vec<SizeSales>, sqlx::Error> {
        let rows = sqlx::query_as::<_, SizeSalesRow>(
            "SELECT size_id,
                    COALESCE(SUM(quantity), 0) AS units_sold,
                    COALESCE(SUM(price), 0.0) AS revenue
             FROM transactions
             WHERE size_id IS NOT NULL
             GROUP BY size_id",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Totals over the whole sales history.
    pub async fn sales_totals(pool: &SqlitePool) -> Result<SalesTotals, sqlx::Error> {
        let row = sqlx::query_as::<_, SalesTotalsRow>(
            "SELECT COUNT(*) AS transactions,
                    COALESCE(SUM(quantity), 0) AS units_sold,
                    COALESCE(SUM(price), 0.0) AS revenue
             FROM transactions",
        )
        .fetch_one(pool)
        .await?;
        Ok(row.into())
    }
}
