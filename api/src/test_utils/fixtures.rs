//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Timestamps are relative to the real clock so they line up with periods
//! resolved by the services under test.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::{
    Campaign, EmailCampaign, Invoice, InvoiceStatus, Period, Promotion, SocialMediaPost,
};

/// `n` days before now
pub fn days_ago(n: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(n)
}

pub fn week() -> Period {
    Period::current(Some("week"))
}

pub fn month() -> Period {
    Period::current(Some("month"))
}

/// Catalogue row as the store sees it
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub price: f64,
    pub stock: i32,
}

pub fn test_product(name: &str, category: &str, price: f64, stock: i32) -> ProductRecord {
    ProductRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        sku: format!("SKU-{}", name.to_uppercase().replace(' ', "-")),
        category: category.to_string(),
        price,
        stock,
    }
}

#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub total: f64,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemRecord>,
}

impl OrderRecord {
    /// Add a line item priced at the product's current price
    pub fn with_item(mut self, product: &ProductRecord, quantity: i32) -> Self {
        self.items.push(OrderItemRecord {
            product_id: product.id,
            quantity,
            price: product.price,
        });
        self
    }
}

pub fn test_order(customer_id: Uuid, total: f64, created_at: DateTime<Utc>) -> OrderRecord {
    OrderRecord {
        id: Uuid::new_v4(),
        customer_id,
        total,
        created_at,
        items: Vec::new(),
    }
}

#[derive(Debug, Clone)]
pub struct CustomerRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub fn test_customer(
    name: &str,
    location: Option<&str>,
    created_at: DateTime<Utc>,
) -> CustomerRecord {
    CustomerRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        location: location.map(str::to_string),
        created_at,
    }
}

pub fn test_campaign(name: &str, status: &str, created_at: DateTime<Utc>) -> Campaign {
    Campaign {
        id: Uuid::new_v4(),
        name: name.to_string(),
        channel: "email".to_string(),
        status: status.to_string(),
        budget: 1000.0,
        start_date: created_at.date_naive(),
        end_date: None,
        created_at,
    }
}

pub fn test_promotion(code: &str, usage_count: i64, created_at: DateTime<Utc>) -> Promotion {
    Promotion {
        id: Uuid::new_v4(),
        code: code.to_string(),
        discount_percent: 10.0,
        usage_count,
        is_active: true,
        created_at,
    }
}

pub fn test_email_campaign(
    subject: &str,
    sent_count: i64,
    open_count: i64,
    click_count: i64,
    created_at: DateTime<Utc>,
) -> EmailCampaign {
    EmailCampaign {
        id: Uuid::new_v4(),
        subject: subject.to_string(),
        sent_count,
        open_count,
        click_count,
        created_at,
    }
}

pub fn test_social_post(platform: &str, created_at: DateTime<Utc>) -> SocialMediaPost {
    SocialMediaPost {
        id: Uuid::new_v4(),
        platform: platform.to_string(),
        content: format!("New arrivals on {}", platform),
        likes: 12,
        shares: 3,
        comments: 1,
        created_at,
    }
}

/// Invoice due `due_in_days` after it was issued (negative for past due)
pub fn test_invoice(
    number: &str,
    amount: f64,
    status: InvoiceStatus,
    issued_at: DateTime<Utc>,
    due_in_days: i64,
) -> Invoice {
    Invoice {
        id: Uuid::new_v4(),
        invoice_number: number.to_string(),
        customer_id: None,
        amount,
        status,
        issued_at,
        due_date: (issued_at + Duration::days(due_in_days)).date_naive(),
        paid_at: (status == InvoiceStatus::Paid).then_some(issued_at),
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub category: String,
    pub amount: f64,
    pub incurred_at: DateTime<Utc>,
}

pub fn test_expense(category: &str, amount: f64, incurred_at: DateTime<Utc>) -> ExpenseRecord {
    ExpenseRecord {
        id: Uuid::new_v4(),
        category: category.to_string(),
        amount,
        incurred_at,
    }
}
