//! PostgreSQL adapter for CustomerRepository

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseBackend, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, Statement,
};
use uuid::Uuid;

use crate::domain::entities::{CustomerSpend, LocationCount, Period};
use crate::domain::ports::CustomerRepository;
use crate::entity::customers;
use crate::error::DomainError;

const RETURNING_CUSTOMERS_SQL: &str = r#"
SELECT COUNT(*) AS count
FROM (
    SELECT customer_id
    FROM orders
    WHERE created_at BETWEEN $1 AND $2
    GROUP BY customer_id
    HAVING COUNT(*) > 1
) returning_customers
"#;

const TOP_CUSTOMERS_SQL: &str = r#"
SELECT c.id AS customer_id,
       c.name AS name,
       c.email AS email,
       SUM(o.total)::float8 AS total_spent,
       COUNT(o.id) AS orders
FROM customers c
JOIN orders o ON o.customer_id = c.id
WHERE o.created_at BETWEEN $1 AND $2
GROUP BY c.id, c.name, c.email
ORDER BY total_spent DESC
LIMIT $3
"#;

const CUSTOMERS_BY_LOCATION_SQL: &str = r#"
SELECT COALESCE(location, 'Unknown') AS location,
       COUNT(*) AS customers
FROM customers
GROUP BY 1
ORDER BY customers DESC, location ASC
"#;

const LIFETIME_SPEND_SQL: &str = r#"
SELECT SUM(total)::float8 AS total_spent
FROM orders
GROUP BY customer_id
"#;

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct CustomerSpendRow {
    customer_id: Uuid,
    name: String,
    email: String,
    total_spent: f64,
    orders: i64,
}

#[derive(Debug, FromQueryResult)]
struct LocationRow {
    location: String,
    customers: i64,
}

#[derive(Debug, FromQueryResult)]
struct SpendRow {
    total_spent: f64,
}

/// PostgreSQL implementation of CustomerRepository
pub struct PostgresCustomerRepository {
    db: DatabaseConnection,
}

impl PostgresCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn count_customers(&self) -> Result<i64, DomainError> {
        let count = customers::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count as i64)
    }

    async fn count_new_customers(&self, period: &Period) -> Result<i64, DomainError> {
        let count = customers::Entity::find()
            .filter(customers::Column::CreatedAt.between(period.start, period.end))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count as i64)
    }

    async fn count_returning_customers(&self, period: &Period) -> Result<i64, DomainError> {
        let row = CountRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            RETURNING_CUSTOMERS_SQL,
            [period.start.into(), period.end.into()],
        ))
        .one(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    async fn top_customers_by_spend(
        &self,
        period: &Period,
        limit: u64,
    ) -> Result<Vec<CustomerSpend>, DomainError> {
        let rows = CustomerSpendRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            TOP_CUSTOMERS_SQL,
            [period.start.into(), period.end.into(), (limit as i64).into()],
        ))
        .all(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| CustomerSpend {
                customer_id: r.customer_id,
                name: r.name,
                email: r.email,
                total_spent: r.total_spent,
                orders: r.orders,
            })
            .collect())
    }

    async fn customers_by_location(&self) -> Result<Vec<LocationCount>, DomainError> {
        let rows = LocationRow::find_by_statement(Statement::from_string(
            DatabaseBackend::Postgres,
            CUSTOMERS_BY_LOCATION_SQL,
        ))
        .all(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| LocationCount {
                location: r.location,
                customers: r.customers,
            })
            .collect())
    }

    async fn lifetime_spend(&self) -> Result<Vec<f64>, DomainError> {
        let rows = SpendRow::find_by_statement(Statement::from_string(
            DatabaseBackend::Postgres,
            LIFETIME_SPEND_SQL,
        ))
        .all(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.total_spent).collect())
    }
}
