//! PostgreSQL adapter for SalesRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseBackend, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QuerySelect, Statement,
};
use uuid::Uuid;

use crate::domain::entities::{CategoryRevenue, DailyRevenue, Period, ProductRevenue, SalesTotals};
use crate::domain::ports::SalesRepository;
use crate::entity::orders;
use crate::error::DomainError;

const TOP_PRODUCTS_SQL: &str = r#"
SELECT p.id AS product_id,
       p.name AS name,
       SUM(oi.price * oi.quantity)::float8 AS revenue,
       SUM(oi.quantity)::bigint AS units_sold
FROM order_items oi
JOIN orders o ON o.id = oi.order_id
JOIN products p ON p.id = oi.product_id
WHERE o.created_at BETWEEN $1 AND $2
GROUP BY p.id, p.name
ORDER BY revenue DESC
LIMIT $3
"#;

const CATEGORY_REVENUE_SQL: &str = r#"
SELECT p.category AS category,
       SUM(oi.price * oi.quantity)::float8 AS revenue
FROM order_items oi
JOIN orders o ON o.id = oi.order_id
JOIN products p ON p.id = oi.product_id
WHERE o.created_at BETWEEN $1 AND $2
GROUP BY p.category
ORDER BY revenue DESC
"#;

const DAILY_REVENUE_SQL: &str = r#"
SELECT (created_at AT TIME ZONE 'UTC')::date AS date,
       SUM(total)::float8 AS revenue,
       COUNT(*) AS orders
FROM orders
WHERE created_at BETWEEN $1 AND $2
GROUP BY 1
ORDER BY 1 ASC
"#;

#[derive(Debug, FromQueryResult)]
struct ProductRevenueRow {
    product_id: Uuid,
    name: String,
    revenue: f64,
    units_sold: i64,
}

#[derive(Debug, FromQueryResult)]
struct CategoryRevenueRow {
    category: String,
    revenue: f64,
}

#[derive(Debug, FromQueryResult)]
struct DailyRevenueRow {
    date: NaiveDate,
    revenue: f64,
    orders: i64,
}

/// PostgreSQL implementation of SalesRepository
pub struct PostgresSalesRepository {
    db: DatabaseConnection,
}

impl PostgresSalesRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SalesRepository for PostgresSalesRepository {
    async fn sales_totals(&self, period: &Period) -> Result<SalesTotals, DomainError> {
        let result: Option<(Option<f64>, i64)> = orders::Entity::find()
            .filter(orders::Column::CreatedAt.between(period.start, period.end))
            .select_only()
            .column_as(Expr::col(orders::Column::Total).sum(), "revenue")
            .column_as(Expr::col(orders::Column::Id).count(), "orders")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let (revenue, orders) = result.unwrap_or((None, 0));
        Ok(SalesTotals {
            revenue: revenue.unwrap_or(0.0),
            orders,
        })
    }

    async fn top_products_by_revenue(
        &self,
        period: &Period,
        limit: u64,
    ) -> Result<Vec<ProductRevenue>, DomainError> {
        let rows = ProductRevenueRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            TOP_PRODUCTS_SQL,
            [period.start.into(), period.end.into(), (limit as i64).into()],
        ))
        .all(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| ProductRevenue {
                product_id: r.product_id,
                name: r.name,
                revenue: r.revenue,
                units_sold: r.units_sold,
            })
            .collect())
    }

    async fn revenue_by_category(
        &self,
        period: &Period,
    ) -> Result<Vec<CategoryRevenue>, DomainError> {
        let rows = CategoryRevenueRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            CATEGORY_REVENUE_SQL,
            [period.start.into(), period.end.into()],
        ))
        .all(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| CategoryRevenue {
                category: r.category,
                revenue: r.revenue,
            })
            .collect())
    }

    async fn daily_revenue(&self, period: &Period) -> Result<Vec<DailyRevenue>, DomainError> {
        let rows = DailyRevenueRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            DAILY_REVENUE_SQL,
            [period.start.into(), period.end.into()],
        ))
        .all(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| DailyRevenue {
                date: r.date,
                revenue: r.revenue,
                orders: r.orders,
            })
            .collect())
    }
}
