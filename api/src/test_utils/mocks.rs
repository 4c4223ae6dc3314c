//! Mock implementations of port traits
//!
//! `InMemoryStore` implements every analytics repository over plain vectors,
//! mirroring the grouping and ordering the SQL adapters produce. It can be
//! told to fail for a domain or to answer slowly.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use uuid::Uuid;

use super::fixtures::{CustomerRecord, ExpenseRecord, OrderRecord, ProductRecord};
use crate::app::AnalyticsService;
use crate::domain::entities::{
    Campaign, CategoryRevenue, CustomerSpend, DailyRevenue, Domain, EmailCampaign,
    ExpenseCategory, Invoice, InvoiceStatus, LocationCount, NewReportLedgerEntry, Period,
    ProductRevenue, ProductSales, Promotion, ReportArtifact, ReportDocument, ReportFilter,
    ReportFormat, ReportId, ReportLedgerEntry, SalesTotals, SocialMediaPost, StockCounts,
    StockLevel, StockMovement, StockValueTotals, ACTIVE_CAMPAIGN_STATUS,
};
use crate::domain::ports::{
    CustomerRepository, FinancialRepository, InventoryRepository, MarketingRepository,
    ReportExporter, ReportRepository, SalesRepository,
};
use crate::error::{DomainError, ExportError};

// ============================================================================
// In-Memory Store
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryStore {
    products: Arc<RwLock<Vec<ProductRecord>>>,
    orders: Arc<RwLock<Vec<OrderRecord>>>,
    customers: Arc<RwLock<Vec<CustomerRecord>>>,
    campaigns: Arc<RwLock<Vec<Campaign>>>,
    promotions: Arc<RwLock<Vec<Promotion>>>,
    email_campaigns: Arc<RwLock<Vec<EmailCampaign>>>,
    social_posts: Arc<RwLock<Vec<SocialMediaPost>>>,
    invoices: Arc<RwLock<Vec<Invoice>>>,
    expenses: Arc<RwLock<Vec<ExpenseRecord>>>,
    failing: HashSet<Domain>,
    delay: Option<Duration>,
    queries: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(self, product: ProductRecord) -> Self {
        self.products.write().unwrap().push(product);
        self
    }

    pub fn with_order(self, order: OrderRecord) -> Self {
        self.orders.write().unwrap().push(order);
        self
    }

    pub fn with_customer(self, customer: CustomerRecord) -> Self {
        self.customers.write().unwrap().push(customer);
        self
    }

    pub fn with_campaign(self, campaign: Campaign) -> Self {
        self.campaigns.write().unwrap().push(campaign);
        self
    }

    pub fn with_promotion(self, promotion: Promotion) -> Self {
        self.promotions.write().unwrap().push(promotion);
        self
    }

    pub fn with_email_campaign(self, email: EmailCampaign) -> Self {
        self.email_campaigns.write().unwrap().push(email);
        self
    }

    pub fn with_social_post(self, post: SocialMediaPost) -> Self {
        self.social_posts.write().unwrap().push(post);
        self
    }

    pub fn with_invoice(self, invoice: Invoice) -> Self {
        self.invoices.write().unwrap().push(invoice);
        self
    }

    pub fn with_expense(self, expense: ExpenseRecord) -> Self {
        self.expenses.write().unwrap().push(expense);
        self
    }

    /// Every query for this domain returns a database error
    pub fn failing_domain(mut self, domain: Domain) -> Self {
        self.failing.insert(domain);
        self
    }

    /// Every query sleeps before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of queries answered or rejected so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    async fn enter(&self, domain: Domain) -> Result<(), DomainError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&domain) {
            return Err(DomainError::Database(format!("{} store unavailable", domain)));
        }
        Ok(())
    }

    fn orders_in(&self, period: &Period) -> Vec<OrderRecord> {
        self.orders
            .read()
            .unwrap()
            .iter()
            .filter(|o| period.contains(o.created_at))
            .cloned()
            .collect()
    }

    fn product(&self, id: Uuid) -> Option<ProductRecord> {
        self.products
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// (revenue, quantity) per product over the given orders
    fn item_totals(orders: &[OrderRecord]) -> HashMap<Uuid, (f64, i64)> {
        let mut totals: HashMap<Uuid, (f64, i64)> = HashMap::new();
        for item in orders.iter().flat_map(|o| &o.items) {
            let entry = totals.entry(item.product_id).or_default();
            entry.0 += item.price * item.quantity as f64;
            entry.1 += item.quantity as i64;
        }
        totals
    }
}

fn newest_first<T>(mut rows: Vec<T>, created_at: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    rows.sort_by_key(|r| std::cmp::Reverse(created_at(r)));
    rows
}

#[async_trait]
impl SalesRepository for InMemoryStore {
    async fn sales_totals(&self, period: &Period) -> Result<SalesTotals, DomainError> {
        self.enter(Domain::Sales).await?;
        let orders = self.orders_in(period);
        Ok(SalesTotals {
            revenue: orders.iter().map(|o| o.total).sum(),
            orders: orders.len() as i64,
        })
    }

    async fn top_products_by_revenue(
        &self,
        period: &Period,
        limit: u64,
    ) -> Result<Vec<ProductRevenue>, DomainError> {
        self.enter(Domain::Sales).await?;
        let mut rows: Vec<ProductRevenue> = Self::item_totals(&self.orders_in(period))
            .into_iter()
            .filter_map(|(id, (revenue, units))| {
                self.product(id).map(|p| ProductRevenue {
                    product_id: id,
                    name: p.name,
                    revenue,
                    units_sold: units,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn revenue_by_category(
        &self,
        period: &Period,
    ) -> Result<Vec<CategoryRevenue>, DomainError> {
        self.enter(Domain::Sales).await?;
        let mut by_category: HashMap<String, f64> = HashMap::new();
        for (id, (revenue, _)) in Self::item_totals(&self.orders_in(period)) {
            if let Some(product) = self.product(id) {
                *by_category.entry(product.category).or_default() += revenue;
            }
        }
        let mut rows: Vec<CategoryRevenue> = by_category
            .into_iter()
            .map(|(category, revenue)| CategoryRevenue { category, revenue })
            .collect();
        rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        Ok(rows)
    }

    async fn daily_revenue(&self, period: &Period) -> Result<Vec<DailyRevenue>, DomainError> {
        self.enter(Domain::Sales).await?;
        let mut by_day: BTreeMap<NaiveDate, (f64, i64)> = BTreeMap::new();
        for order in self.orders_in(period) {
            let day = by_day.entry(order.created_at.date_naive()).or_default();
            day.0 += order.total;
            day.1 += 1;
        }
        Ok(by_day
            .into_iter()
            .map(|(date, (revenue, orders))| DailyRevenue {
                date,
                revenue,
                orders,
            })
            .collect())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn count_customers(&self) -> Result<i64, DomainError> {
        self.enter(Domain::Customers).await?;
        Ok(self.customers.read().unwrap().len() as i64)
    }

    async fn count_new_customers(&self, period: &Period) -> Result<i64, DomainError> {
        self.enter(Domain::Customers).await?;
        Ok(self
            .customers
            .read()
            .unwrap()
            .iter()
            .filter(|c| period.contains(c.created_at))
            .count() as i64)
    }

    async fn count_returning_customers(&self, period: &Period) -> Result<i64, DomainError> {
        self.enter(Domain::Customers).await?;
        let mut orders_per_customer: HashMap<Uuid, i64> = HashMap::new();
        for order in self.orders_in(period) {
            *orders_per_customer.entry(order.customer_id).or_default() += 1;
        }
        Ok(orders_per_customer.values().filter(|n| **n > 1).count() as i64)
    }

    async fn top_customers_by_spend(
        &self,
        period: &Period,
        limit: u64,
    ) -> Result<Vec<CustomerSpend>, DomainError> {
        self.enter(Domain::Customers).await?;
        let mut spend: HashMap<Uuid, (f64, i64)> = HashMap::new();
        for order in self.orders_in(period) {
            let entry = spend.entry(order.customer_id).or_default();
            entry.0 += order.total;
            entry.1 += 1;
        }

        let customers = self.customers.read().unwrap();
        let mut rows: Vec<CustomerSpend> = customers
            .iter()
            .filter_map(|c| {
                spend.get(&c.id).map(|(total, orders)| CustomerSpend {
                    customer_id: c.id,
                    name: c.name.clone(),
                    email: c.email.clone(),
                    total_spent: *total,
                    orders: *orders,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn customers_by_location(&self) -> Result<Vec<LocationCount>, DomainError> {
        self.enter(Domain::Customers).await?;
        let mut counts: HashMap<String, i64> = HashMap::new();
        for customer in self.customers.read().unwrap().iter() {
            let location = customer
                .location
                .clone()
                .unwrap_or_else(|| "Unknown".to_string());
            *counts.entry(location).or_default() += 1;
        }
        let mut rows: Vec<LocationCount> = counts
            .into_iter()
            .map(|(location, customers)| LocationCount {
                location,
                customers,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.customers
                .cmp(&a.customers)
                .then_with(|| a.location.cmp(&b.location))
        });
        Ok(rows)
    }

    async fn lifetime_spend(&self) -> Result<Vec<f64>, DomainError> {
        self.enter(Domain::Customers).await?;
        let mut spend: HashMap<Uuid, f64> = HashMap::new();
        for order in self.orders.read().unwrap().iter() {
            *spend.entry(order.customer_id).or_default() += order.total;
        }
        Ok(spend.into_values().collect())
    }
}

fn stock_level(product: &ProductRecord) -> StockLevel {
    StockLevel {
        product_id: product.id,
        name: product.name.clone(),
        sku: product.sku.clone(),
        stock: product.stock,
        price: product.price,
    }
}

#[async_trait]
impl InventoryRepository for InMemoryStore {
    async fn stock_counts(&self) -> Result<StockCounts, DomainError> {
        self.enter(Domain::Inventory).await?;
        let products = self.products.read().unwrap();
        Ok(StockCounts {
            total_products: products.len() as i64,
            low_stock: products
                .iter()
                .filter(|p| stock_level(p).is_low_stock())
                .count() as i64,
            out_of_stock: products.iter().filter(|p| p.stock == 0).count() as i64,
        })
    }

    async fn stock_value_totals(&self) -> Result<StockValueTotals, DomainError> {
        self.enter(Domain::Inventory).await?;
        let products = self.products.read().unwrap();
        Ok(StockValueTotals {
            total_stock: products.iter().map(|p| p.stock as i64).sum(),
            total_price: products.iter().map(|p| p.price).sum(),
        })
    }

    async fn stock_movements(&self) -> Result<Vec<StockMovement>, DomainError> {
        self.enter(Domain::Inventory).await?;
        let sold = Self::item_totals(&self.orders.read().unwrap());
        Ok(self
            .products
            .read()
            .unwrap()
            .iter()
            .map(|p| StockMovement {
                product_id: p.id,
                stock: p.stock,
                quantity_sold: sold.get(&p.id).map(|(_, qty)| *qty).unwrap_or(0),
            })
            .collect())
    }

    async fn top_selling_products(
        &self,
        period: &Period,
        limit: u64,
    ) -> Result<Vec<ProductSales>, DomainError> {
        self.enter(Domain::Inventory).await?;
        let mut rows: Vec<ProductSales> = Self::item_totals(&self.orders_in(period))
            .into_iter()
            .filter(|(_, (_, qty))| *qty > 0)
            .filter_map(|(id, (_, qty))| {
                self.product(id).map(|p| ProductSales {
                    product_id: id,
                    name: p.name,
                    quantity_sold: qty,
                })
            })
            .collect();
        rows.sort_by_key(|r| std::cmp::Reverse(r.quantity_sold));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn low_stock_products(&self) -> Result<Vec<StockLevel>, DomainError> {
        self.enter(Domain::Inventory).await?;
        let mut rows: Vec<StockLevel> = self
            .products
            .read()
            .unwrap()
            .iter()
            .map(stock_level)
            .filter(StockLevel::is_low_stock)
            .collect();
        rows.sort_by_key(|r| r.stock);
        Ok(rows)
    }
}

#[async_trait]
impl MarketingRepository for InMemoryStore {
    async fn campaigns(&self, period: &Period) -> Result<Vec<Campaign>, DomainError> {
        self.enter(Domain::Marketing).await?;
        let rows = self
            .campaigns
            .read()
            .unwrap()
            .iter()
            .filter(|c| period.contains(c.created_at))
            .cloned()
            .collect();
        Ok(newest_first(rows, |c: &Campaign| c.created_at))
    }

    async fn count_active_campaigns(&self) -> Result<i64, DomainError> {
        self.enter(Domain::Marketing).await?;
        Ok(self
            .campaigns
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.status.eq_ignore_ascii_case(ACTIVE_CAMPAIGN_STATUS))
            .count() as i64)
    }

    async fn promotions(&self, period: &Period) -> Result<Vec<Promotion>, DomainError> {
        self.enter(Domain::Marketing).await?;
        let rows = self
            .promotions
            .read()
            .unwrap()
            .iter()
            .filter(|p| period.contains(p.created_at))
            .cloned()
            .collect();
        Ok(newest_first(rows, |p: &Promotion| p.created_at))
    }

    async fn email_campaigns(&self, period: &Period) -> Result<Vec<EmailCampaign>, DomainError> {
        self.enter(Domain::Marketing).await?;
        let rows = self
            .email_campaigns
            .read()
            .unwrap()
            .iter()
            .filter(|e| period.contains(e.created_at))
            .cloned()
            .collect();
        Ok(newest_first(rows, |e: &EmailCampaign| e.created_at))
    }

    async fn social_media_posts(
        &self,
        period: &Period,
    ) -> Result<Vec<SocialMediaPost>, DomainError> {
        self.enter(Domain::Marketing).await?;
        let rows = self
            .social_posts
            .read()
            .unwrap()
            .iter()
            .filter(|s| period.contains(s.created_at))
            .cloned()
            .collect();
        Ok(newest_first(rows, |s: &SocialMediaPost| s.created_at))
    }
}

#[async_trait]
impl FinancialRepository for InMemoryStore {
    async fn invoice_total(
        &self,
        period: &Period,
        status: InvoiceStatus,
    ) -> Result<f64, DomainError> {
        self.enter(Domain::Financial).await?;
        Ok(self
            .invoices
            .read()
            .unwrap()
            .iter()
            .filter(|i| i.status == status && period.contains(i.issued_at))
            .map(|i| i.amount)
            .sum())
    }

    async fn invoices(
        &self,
        period: &Period,
        status: InvoiceStatus,
    ) -> Result<Vec<Invoice>, DomainError> {
        self.enter(Domain::Financial).await?;
        let mut rows: Vec<Invoice> = self
            .invoices
            .read()
            .unwrap()
            .iter()
            .filter(|i| i.status == status && period.contains(i.issued_at))
            .cloned()
            .collect();
        match status {
            InvoiceStatus::Paid => rows.sort_by_key(|i| std::cmp::Reverse(i.issued_at)),
            InvoiceStatus::Pending | InvoiceStatus::Overdue => rows.sort_by_key(|i| i.due_date),
        }
        Ok(rows)
    }

    async fn expense_total(&self, period: &Period) -> Result<f64, DomainError> {
        self.enter(Domain::Financial).await?;
        Ok(self
            .expenses
            .read()
            .unwrap()
            .iter()
            .filter(|e| period.contains(e.incurred_at))
            .map(|e| e.amount)
            .sum())
    }

    async fn expenses_by_category(
        &self,
        period: &Period,
    ) -> Result<Vec<ExpenseCategory>, DomainError> {
        self.enter(Domain::Financial).await?;
        let mut by_category: HashMap<String, f64> = HashMap::new();
        for expense in self
            .expenses
            .read()
            .unwrap()
            .iter()
            .filter(|e| period.contains(e.incurred_at))
        {
            *by_category.entry(expense.category.clone()).or_default() += expense.amount;
        }
        let mut rows: Vec<ExpenseCategory> = by_category
            .into_iter()
            .map(|(category, amount)| ExpenseCategory { category, amount })
            .collect();
        rows.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        Ok(rows)
    }
}

/// An analytics service backed entirely by one in-memory store
pub fn analytics_service(
    store: InMemoryStore,
    timeout: Duration,
) -> AnalyticsService<InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore> {
    let store = Arc::new(store);
    AnalyticsService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store,
        timeout,
    )
}

// ============================================================================
// In-Memory Report Ledger
// ============================================================================

#[derive(Default)]
pub struct InMemoryReportRepository {
    entries: Arc<RwLock<Vec<ReportLedgerEntry>>>,
    failing: bool,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger that rejects every write
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_entry(self, entry: ReportLedgerEntry) -> Self {
        self.entries.write().unwrap().push(entry);
        self
    }

    pub fn entries(&self) -> Vec<ReportLedgerEntry> {
        self.entries.read().unwrap().clone()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn record(&self, entry: &NewReportLedgerEntry) -> Result<ReportLedgerEntry, DomainError> {
        if self.failing {
            return Err(DomainError::Database("ledger unavailable".to_string()));
        }

        let recorded = ReportLedgerEntry {
            id: ReportId::new(),
            report_type: entry.report_type,
            period: entry.period,
            format: entry.format,
            file_url: entry.file_url.clone(),
            generated_by: entry.generated_by.clone(),
            created_at: Utc::now(),
        };
        self.entries.write().unwrap().push(recorded.clone());
        Ok(recorded)
    }

    async fn list(&self, filter: &ReportFilter) -> Result<Vec<ReportLedgerEntry>, DomainError> {
        let rows = self
            .entries
            .read()
            .unwrap()
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        let mut rows = newest_first(rows, |e: &ReportLedgerEntry| e.created_at);
        rows.truncate(filter.limit as usize);
        Ok(rows)
    }
}

// ============================================================================
// Stub Exporter
// ============================================================================

/// Records every call; never touches the file system
pub struct StubExporter {
    format: ReportFormat,
    fail: bool,
    calls: AtomicUsize,
    last: Mutex<Option<ReportDocument>>,
}

impl StubExporter {
    pub fn new(format: ReportFormat) -> Self {
        Self {
            format,
            fail: false,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn failing(format: ReportFormat) -> Self {
        Self {
            fail: true,
            ..Self::new(format)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_document(&self) -> Option<ReportDocument> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportExporter for StubExporter {
    fn format(&self) -> ReportFormat {
        self.format
    }

    async fn render(&self, document: &ReportDocument) -> Result<ReportArtifact, ExportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(document.clone());

        if self.fail {
            return Err(ExportError::Render("stub exporter failure".to_string()));
        }

        let filename = format!("{}_report_stub.{}", document.report_type, self.format.extension());
        Ok(ReportArtifact {
            url: format!("/reports/files/{}", filename),
            path: PathBuf::from(&filename),
            filename,
            format: self.format,
        })
    }
}
