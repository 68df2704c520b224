//! Inventory statistics roll-up for the `/getInfo` endpoint.
//!
//! The database layer fetches four flat result sets (models, sizes, per-size
//! sales, global sales totals); [`build_info`] nests them into the response
//! tree. Keeping the assembly here lets the arithmetic be tested without a
//! database.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One product model as seen by the statistics query.
#[derive(Debug, Clone)]
pub struct ModelFigures {
    pub id: DbId,
    pub name: String,
    pub brand: Option<String>,
    pub price: f64,
    pub picture_id: Option<String>,
}

/// One size row with its current stock.
#[derive(Debug, Clone)]
pub struct SizeFigures {
    pub id: DbId,
    pub pid: DbId,
    pub size: String,
    pub stock: i64,
}

/// Sales aggregated per size.
#[derive(Debug, Clone)]
pub struct SizeSales {
    pub size_id: DbId,
    pub units_sold: i64,
    pub revenue: f64,
}

/// Sales aggregated over the whole `transactions` table.
///
/// Includes transactions whose model or size has since been deleted, so these
/// figures can exceed the sums over the nested models.
#[derive(Debug, Clone, Default)]
pub struct SalesTotals {
    pub transactions: i64,
    pub units_sold: i64,
    pub revenue: f64,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Response body of `GET /getInfo`.
#[derive(Debug, Clone, Serialize)]
pub struct InfoModel {
    pub totals: InfoTotals,
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfoTotals {
    pub models: i64,
    pub sizes: i64,
    pub stock_units: i64,
    pub transactions: i64,
    pub units_sold: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: DbId,
    pub name: String,
    pub brand: Option<String>,
    pub price: f64,
    pub picture_id: Option<String>,
    pub stock: i64,
    pub units_sold: i64,
    pub revenue: f64,
    pub sizes: Vec<SizeInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SizeInfo {
    pub id: DbId,
    pub size: String,
    pub stock: i64,
    pub units_sold: i64,
    pub revenue: f64,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Nest sizes and their sales under their models and compute the totals.
///
/// Models keep the order they were given in; sizes keep their relative order
/// within each model. Sizes pointing at an unknown model are dropped.
pub fn build_info(
    models: Vec<ModelFigures>,
    sizes: Vec<SizeFigures>,
    sales: Vec<SizeSales>,
    totals: SalesTotals,
) -> InfoModel {
    let sales_by_size: HashMap<DbId, SizeSales> =
        sales.into_iter().map(|s| (s.size_id, s)).collect();

    let mut sizes_by_model: HashMap<DbId, Vec<SizeInfo>> = HashMap::new();
    for size in sizes {
        let (units_sold, revenue) = sales_by_size
            .get(&size.id)
            .map_or((0, 0.0), |s| (s.units_sold, s.revenue));
        sizes_by_model.entry(size.pid).or_default().push(SizeInfo {
            id: size.id,
            size: size.size,
            stock: size.stock,
            units_sold,
            revenue,
        });
    }

    let models: Vec<ModelInfo> = models
        .into_iter()
        .map(|m| {
            let sizes = sizes_by_model.remove(&m.id).unwrap_or_default();
            ModelInfo {
                stock: sizes.iter().map(|s| s.stock).sum(),
                units_sold: sizes.iter().map(|s| s.units_sold).sum(),
                revenue: sizes.iter().map(|s| s.revenue).sum(),
                id: m.id,
                name: m.name,
                brand: m.brand,
                price: m.price,
                picture_id: m.picture_id,
                sizes,
            }
        })
        .collect();

    InfoModel {
        totals: InfoTotals {
            models: models.len() as i64,
            sizes: models.iter().map(|m| m.sizes.len() as i64).sum(),
            stock_units: models.iter().map(|m| m.stock).sum(),
            transactions: totals.transactions,
            units_sold: totals.units_sold,
            revenue: totals.revenue,
        },
        models,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: DbId, name: &str) -> ModelFigures {
        ModelFigures {
            id,
            name: name.to_string(),
            brand: None,
            price: 50.0,
            picture_id: None,
        }
    }

    fn size(id: DbId, pid: DbId, label: &str, stock: i64) -> SizeFigures {
        SizeFigures {
            id,
            pid,
            size: label.to_string(),
            stock,
        }
    }

    #[test]
    fn empty_inventory_has_zero_totals() {
        let info = build_info(vec![], vec![], vec![], SalesTotals::default());
        assert!(info.models.is_empty());
        assert_eq!(info.totals.models, 0);
        assert_eq!(info.totals.stock_units, 0);
        assert_eq!(info.totals.revenue, 0.0);
    }

    #[test]
    fn sizes_and_sales_nest_under_models() {
        let info = build_info(
            vec![model(1, "Runner"), model(2, "Walker")],
            vec![size(10, 1, "42", 3), size(11, 1, "43", 5), size(20, 2, "40", 7)],
            vec![SizeSales {
                size_id: 11,
                units_sold: 2,
                revenue: 100.0,
            }],
            SalesTotals {
                transactions: 1,
                units_sold: 2,
                revenue: 100.0,
            },
        );

        assert_eq!(info.models.len(), 2);
        let runner = &info.models[0];
        assert_eq!(runner.name, "Runner");
        assert_eq!(runner.stock, 8);
        assert_eq!(runner.units_sold, 2);
        assert_eq!(runner.revenue, 100.0);
        assert_eq!(runner.sizes.len(), 2);
        assert_eq!(runner.sizes[0].units_sold, 0);
        assert_eq!(runner.sizes[1].units_sold, 2);

        let walker = &info.models[1];
        assert_eq!(walker.stock, 7);
        assert_eq!(walker.units_sold, 0);

        assert_eq!(info.totals.models, 2);
        assert_eq!(info.totals.sizes, 3);
        assert_eq!(info.totals.stock_units, 15);
        assert_eq!(info.totals.transactions, 1);
        assert_eq!(info.totals.units_sold, 2);
    }

    #[test]
    fn orphan_sizes_are_dropped() {
        let info = build_info(
            vec![model(1, "Runner")],
            vec![size(10, 1, "42", 3), size(99, 404, "44", 9)],
            vec![],
            SalesTotals::default(),
        );
        assert_eq!(info.totals.sizes, 1);
        assert_eq!(info.totals.stock_units, 3);
    }
}
