//! PostgreSQL adapter for InventoryRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseBackend, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Statement,
};
use uuid::Uuid;

use crate::domain::entities::{
    Period, ProductSales, StockCounts, StockLevel, StockMovement, StockValueTotals,
    LOW_STOCK_THRESHOLD,
};
use crate::domain::ports::InventoryRepository;
use crate::entity::products;
use crate::error::DomainError;

const STOCK_COUNTS_SQL: &str = r#"
SELECT COUNT(*) AS total_products,
       COUNT(*) FILTER (WHERE stock > 0 AND stock < $1) AS low_stock,
       COUNT(*) FILTER (WHERE stock = 0) AS out_of_stock
FROM products
"#;

const STOCK_MOVEMENTS_SQL: &str = r#"
SELECT p.id AS product_id,
       p.stock AS stock,
       COALESCE(SUM(oi.quantity), 0)::bigint AS quantity_sold
FROM products p
LEFT JOIN order_items oi ON oi.product_id = p.id
GROUP BY p.id, p.stock
"#;

const TOP_SELLING_SQL: &str = r#"
SELECT p.id AS product_id,
       p.name AS name,
       SUM(oi.quantity)::bigint AS quantity_sold
FROM order_items oi
JOIN orders o ON o.id = oi.order_id
JOIN products p ON p.id = oi.product_id
WHERE o.created_at BETWEEN $1 AND $2
GROUP BY p.id, p.name
HAVING SUM(oi.quantity) > 0
ORDER BY quantity_sold DESC
LIMIT $3
"#;

#[derive(Debug, FromQueryResult)]
struct StockCountsRow {
    total_products: i64,
    low_stock: i64,
    out_of_stock: i64,
}

#[derive(Debug, FromQueryResult)]
struct StockMovementRow {
    product_id: Uuid,
    stock: i32,
    quantity_sold: i64,
}

#[derive(Debug, FromQueryResult)]
struct ProductSalesRow {
    product_id: Uuid,
    name: String,
    quantity_sold: i64,
}

/// PostgreSQL implementation of InventoryRepository
pub struct PostgresInventoryRepository {
    db: DatabaseConnection,
}

impl PostgresInventoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    async fn stock_counts(&self) -> Result<StockCounts, DomainError> {
        let row = StockCountsRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            STOCK_COUNTS_SQL,
            [LOW_STOCK_THRESHOLD.into()],
        ))
        .one(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(row
            .map(|r| StockCounts {
                total_products: r.total_products,
                low_stock: r.low_stock,
                out_of_stock: r.out_of_stock,
            })
            .unwrap_or_default())
    }

    async fn stock_value_totals(&self) -> Result<StockValueTotals, DomainError> {
        let result: Option<(Option<i64>, Option<f64>)> = products::Entity::find()
            .select_only()
            .column_as(Expr::col(products::Column::Stock).sum(), "total_stock")
            .column_as(Expr::col(products::Column::Price).sum(), "total_price")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let (total_stock, total_price) = result.unwrap_or((None, None));
        Ok(StockValueTotals {
            total_stock: total_stock.unwrap_or(0),
            total_price: total_price.unwrap_or(0.0),
        })
    }

    async fn stock_movements(&self) -> Result<Vec<StockMovement>, DomainError> {
        let rows = StockMovementRow::find_by_statement(Statement::from_string(
            DatabaseBackend::Postgres,
            STOCK_MOVEMENTS_SQL,
        ))
        .all(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| StockMovement {
                product_id: r.product_id,
                stock: r.stock,
                quantity_sold: r.quantity_sold,
            })
            .collect())
    }

    async fn top_selling_products(
        &self,
        period: &Period,
        limit: u64,
    ) -> Result<Vec<ProductSales>, DomainError> {
        let rows = ProductSalesRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            TOP_SELLING_SQL,
            [period.start.into(), period.end.into(), (limit as i64).into()],
        ))
        .all(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| ProductSales {
                product_id: r.product_id,
                name: r.name,
                quantity_sold: r.quantity_sold,
            })
            .collect())
    }

    async fn low_stock_products(&self) -> Result<Vec<StockLevel>, DomainError> {
        let results = products::Entity::find()
            .filter(products::Column::Stock.gt(0))
            .filter(products::Column::Stock.lt(LOW_STOCK_THRESHOLD))
            .order_by_asc(products::Column::Stock)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<products::Model> for StockLevel {
    fn from(model: products::Model) -> Self {
        StockLevel {
            product_id: model.id,
            name: model.name,
            sku: model.sku,
            stock: model.stock,
            price: model.price,
        }
    }
}
