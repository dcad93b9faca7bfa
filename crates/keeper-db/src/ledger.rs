//! # Ledger Service
//!
//! The single entry point for ledger mutations. Wraps the repositories and
//! maintains in-memory mirrors of all three tables so callers get synchronous,
//! always-current snapshots without touching SQL.
//!
//! ## Write Path
//! ```text
//! caller
//!   │ validate input
//!   ▼
//! repository (SQLite is the source of truth)
//!   │ on success
//!   ▼
//! refresh mirrors (full re-read of all three tables)
//! ```
//!
//! Refreshing everything after every write is deliberate: the tables are
//! small, and a full re-read keeps the mirrors correct under any combination
//! of writes without per-table bookkeeping.

use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::DbResult;
use crate::pool::{Database, DbConfig};
use keeper_core::validation::{
    validate_amount_cents, validate_quantity, validate_title, validate_uuid,
};
use keeper_core::{
    Client, ClientDraft, FinancialSummary, PaymentStatus, Product, ProductDraft, Transaction,
    TransactionDraft,
};

// =============================================================================
// Mirrors
// =============================================================================

/// In-memory snapshots of the ledger tables.
#[derive(Debug, Default)]
struct LedgerMirrors {
    products: Vec<Product>,
    clients: Vec<Client>,
    transactions: Vec<Transaction>,
}

// =============================================================================
// Ledger
// =============================================================================

/// The ledger: database handle plus mirrored state.
///
/// The mutex only guards the mirrors and is never held across an await; all
/// database work completes before the lock is taken.
#[derive(Debug)]
pub struct Ledger {
    db: Database,
    mirrors: Mutex<LedgerMirrors>,
}

impl Ledger {
    /// Opens the ledger: connects (creating the database file if missing),
    /// runs migrations, and loads the initial mirrors.
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        let db = Database::new(config).await?;

        let ledger = Ledger {
            db,
            mirrors: Mutex::new(LedgerMirrors::default()),
        };
        ledger.refresh().await?;

        info!("Ledger opened");
        Ok(ledger)
    }

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Re-reads all three tables into the mirrors.
    pub async fn refresh(&self) -> DbResult<()> {
        let products = self.db.products().list_all().await?;
        let clients = self.db.clients().list_all().await?;
        let transactions = self.db.transactions().list_all().await?;

        debug!(
            products = products.len(),
            clients = clients.len(),
            transactions = transactions.len(),
            "Refreshed ledger mirrors"
        );

        let mut mirrors = self.mirrors.lock().expect("ledger mirror lock poisoned");
        mirrors.products = products;
        mirrors.clients = clients;
        mirrors.transactions = transactions;

        Ok(())
    }

    // =========================================================================
    // Snapshot accessors
    // =========================================================================

    /// Current products, sorted by name.
    pub fn products(&self) -> Vec<Product> {
        self.mirrors
            .lock()
            .expect("ledger mirror lock poisoned")
            .products
            .clone()
    }

    /// Current clients, sorted by name.
    pub fn clients(&self) -> Vec<Client> {
        self.mirrors
            .lock()
            .expect("ledger mirror lock poisoned")
            .clients
            .clone()
    }

    /// Current transactions, newest first.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.mirrors
            .lock()
            .expect("ledger mirror lock poisoned")
            .transactions
            .clone()
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Creates a product from a draft and returns the stored product.
    pub async fn add_product(&self, draft: ProductDraft) -> DbResult<Product> {
        validate_title("name", &draft.name)?;
        validate_amount_cents("costCents", draft.cost_cents)?;
        validate_amount_cents("salePriceCents", draft.sale_price_cents)?;

        let product = draft.create(Utc::now());
        self.db.products().insert(&product).await?;
        self.refresh().await?;

        info!(id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// Updates a product in place. `updated_at` is restamped.
    pub async fn update_product(&self, mut product: Product) -> DbResult<Product> {
        validate_uuid(&product.id)?;
        validate_title("name", &product.name)?;
        validate_amount_cents("costCents", product.cost_cents)?;
        validate_amount_cents("salePriceCents", product.sale_price_cents)?;

        let now = Utc::now();
        self.db.products().update(&product, now).await?;
        product.updated_at = now;
        self.refresh().await?;

        Ok(product)
    }

    /// Deletes a product. Transactions that reference it keep their rows.
    pub async fn delete_product(&self, id: &str) -> DbResult<()> {
        self.db.products().delete(id).await?;
        self.refresh().await?;

        info!(id = %id, "Product deleted");
        Ok(())
    }

    // =========================================================================
    // Clients
    // =========================================================================

    /// Creates a client from a draft and returns the stored client.
    pub async fn add_client(&self, draft: ClientDraft) -> DbResult<Client> {
        validate_title("name", &draft.name)?;

        let client = draft.create(Utc::now());
        self.db.clients().insert(&client).await?;
        self.refresh().await?;

        info!(id = %client.id, name = %client.name, "Client added");
        Ok(client)
    }

    /// Updates a client in place. `updated_at` is restamped.
    pub async fn update_client(&self, mut client: Client) -> DbResult<Client> {
        validate_uuid(&client.id)?;
        validate_title("name", &client.name)?;

        let now = Utc::now();
        self.db.clients().update(&client, now).await?;
        client.updated_at = now;
        self.refresh().await?;

        Ok(client)
    }

    /// Deletes a client. Transactions that reference it keep their rows.
    pub async fn delete_client(&self, id: &str) -> DbResult<()> {
        self.db.clients().delete(id).await?;
        self.refresh().await?;

        info!(id = %id, "Client deleted");
        Ok(())
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Records a transaction and applies its stock rule to the product.
    ///
    /// The transaction is always recorded. If the referenced product no
    /// longer exists, the stock step is skipped and a warning logged; the
    /// journal survives the product.
    pub async fn add_transaction(&self, draft: TransactionDraft) -> DbResult<Transaction> {
        validate_quantity(draft.quantity)?;
        validate_amount_cents("unitPriceCents", draft.unit_price_cents)?;
        validate_amount_cents("totalCents", draft.total_cents)?;

        let now = Utc::now();
        let transaction = draft.create(now);
        self.db.transactions().insert(&transaction).await?;

        match self.db.products().get_by_id(&transaction.product_id).await? {
            Some(product) => {
                let new_quantity = transaction
                    .kind
                    .apply_stock(product.quantity, transaction.quantity);
                self.db
                    .products()
                    .set_quantity(&product.id, new_quantity, now)
                    .await?;

                debug!(
                    product_id = %product.id,
                    old_quantity = product.quantity,
                    new_quantity,
                    "Applied stock rule"
                );
            }
            None => {
                warn!(
                    transaction_id = %transaction.id,
                    product_id = %transaction.product_id,
                    "Transaction references a missing product; stock not adjusted"
                );
            }
        }

        self.refresh().await?;

        info!(
            id = %transaction.id,
            kind = ?transaction.kind,
            total_cents = transaction.total_cents,
            "Transaction recorded"
        );
        Ok(transaction)
    }

    /// Toggles a transaction's payment status.
    pub async fn update_transaction_status(
        &self,
        id: &str,
        status: PaymentStatus,
    ) -> DbResult<()> {
        self.db.transactions().update_status(id, status).await?;
        self.refresh().await?;

        Ok(())
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Computes the financial summary over the stored transactions,
    /// optionally bounded by an inclusive date range. Pure read; nothing is
    /// persisted.
    pub async fn financial_summary(
        &self,
        start: Option<chrono::DateTime<Utc>>,
        end: Option<chrono::DateTime<Utc>>,
    ) -> DbResult<FinancialSummary> {
        let transactions = self.db.transactions().list_all().await?;
        Ok(FinancialSummary::compute(&transactions, start, end))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use keeper_core::TransactionKind;

    async fn test_ledger() -> Ledger {
        Ledger::open(DbConfig::in_memory()).await.unwrap()
    }

    fn widget_draft(quantity: i64) -> ProductDraft {
        ProductDraft {
            name: "Widget".to_string(),
            category: "misc".to_string(),
            cost_cents: 100,
            sale_price_cents: 250,
            quantity,
            supplier: "Acme".to_string(),
            min_stock: 2,
            image: None,
        }
    }

    fn txn_draft(
        kind: TransactionKind,
        product_id: &str,
        quantity: i64,
        total_cents: i64,
        status: PaymentStatus,
    ) -> TransactionDraft {
        TransactionDraft {
            kind,
            product_id: product_id.to_string(),
            client_id: None,
            quantity,
            unit_price_cents: if quantity > 0 { total_cents / quantity } else { 0 },
            total_cents,
            payment_status: status,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_product_crud_and_mirrors() {
        let ledger = test_ledger().await;

        let product = ledger.add_product(widget_draft(10)).await.unwrap();
        assert_eq!(ledger.products().len(), 1);

        let mut edited = product.clone();
        edited.name = "Widget Deluxe".to_string();
        let edited = ledger.update_product(edited).await.unwrap();
        assert!(edited.updated_at >= product.updated_at);
        assert_eq!(ledger.products()[0].name, "Widget Deluxe");

        ledger.delete_product(&product.id).await.unwrap();
        assert!(ledger.products().is_empty());

        let err = ledger.delete_product(&product.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_stock_rules_applied_on_transaction() {
        let ledger = test_ledger().await;
        let product = ledger.add_product(widget_draft(10)).await.unwrap();

        // Sale subtracts
        ledger
            .add_transaction(txn_draft(
                TransactionKind::Sale,
                &product.id,
                3,
                750,
                PaymentStatus::Paid,
            ))
            .await
            .unwrap();
        assert_eq!(ledger.products()[0].quantity, 7);

        // Purchase adds
        ledger
            .add_transaction(txn_draft(
                TransactionKind::Purchase,
                &product.id,
                5,
                500,
                PaymentStatus::Paid,
            ))
            .await
            .unwrap();
        assert_eq!(ledger.products()[0].quantity, 12);

        // Adjustment sets absolutely
        ledger
            .add_transaction(txn_draft(
                TransactionKind::Adjustment,
                &product.id,
                4,
                0,
                PaymentStatus::Paid,
            ))
            .await
            .unwrap();
        assert_eq!(ledger.products()[0].quantity, 4);

        assert_eq!(ledger.transactions().len(), 3);
    }

    #[tokio::test]
    async fn test_transaction_against_missing_product_is_recorded() {
        let ledger = test_ledger().await;

        let txn = ledger
            .add_transaction(txn_draft(
                TransactionKind::Sale,
                "ghost-product",
                2,
                500,
                PaymentStatus::Paid,
            ))
            .await
            .unwrap();

        // Recorded, even though no stock was touched
        let stored = ledger
            .database()
            .transactions()
            .get_by_id(&txn.id)
            .await
            .unwrap();
        assert!(stored.is_some());
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[tokio::test]
    async fn test_payment_status_toggle() {
        let ledger = test_ledger().await;
        let product = ledger.add_product(widget_draft(10)).await.unwrap();

        let txn = ledger
            .add_transaction(txn_draft(
                TransactionKind::Sale,
                &product.id,
                1,
                250,
                PaymentStatus::Pending,
            ))
            .await
            .unwrap();

        ledger
            .update_transaction_status(&txn.id, PaymentStatus::Paid)
            .await
            .unwrap();

        assert_eq!(ledger.transactions()[0].payment_status, PaymentStatus::Paid);

        let err = ledger
            .update_transaction_status("no-such-txn", PaymentStatus::Paid)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_financial_summary_from_stored_transactions() {
        let ledger = test_ledger().await;
        let product = ledger.add_product(widget_draft(100)).await.unwrap();

        ledger
            .add_transaction(txn_draft(
                TransactionKind::Sale,
                &product.id,
                1,
                100,
                PaymentStatus::Paid,
            ))
            .await
            .unwrap();
        ledger
            .add_transaction(txn_draft(
                TransactionKind::Sale,
                &product.id,
                1,
                50,
                PaymentStatus::Pending,
            ))
            .await
            .unwrap();
        ledger
            .add_transaction(txn_draft(
                TransactionKind::Purchase,
                &product.id,
                1,
                30,
                PaymentStatus::Paid,
            ))
            .await
            .unwrap();

        let summary = ledger.financial_summary(None, None).await.unwrap();
        assert_eq!(summary.total_revenue_cents, 100);
        assert_eq!(summary.pending_receivables_cents, 50);
        assert_eq!(summary.total_costs_cents, 30);
        assert_eq!(summary.profit_cents, 70);
        assert!((summary.profit_margin - 70.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_client_crud() {
        let ledger = test_ledger().await;

        let client = ledger
            .add_client(ClientDraft {
                name: "Marta".to_string(),
                email: Some("marta@example.com".to_string()),
                phone: None,
                address: None,
            })
            .await
            .unwrap();
        assert_eq!(ledger.clients().len(), 1);

        let mut edited = client.clone();
        edited.phone = Some("+351 910 000 001".to_string());
        ledger.update_client(edited).await.unwrap();
        assert_eq!(
            ledger.clients()[0].phone.as_deref(),
            Some("+351 910 000 001")
        );

        ledger.delete_client(&client.id).await.unwrap();
        assert!(ledger.clients().is_empty());
    }

    #[tokio::test]
    async fn test_validation_rejects_bad_input() {
        let ledger = test_ledger().await;

        let mut draft = widget_draft(10);
        draft.name = "   ".to_string();
        assert!(matches!(
            ledger.add_product(draft).await.unwrap_err(),
            DbError::Validation(_)
        ));

        let product = ledger.add_product(widget_draft(10)).await.unwrap();
        let mut txn = txn_draft(
            TransactionKind::Sale,
            &product.id,
            1,
            250,
            PaymentStatus::Paid,
        );
        txn.quantity = -1;
        assert!(matches!(
            ledger.add_transaction(txn).await.unwrap_err(),
            DbError::Validation(_)
        ));
        // Nothing recorded, stock untouched
        assert!(ledger.transactions().is_empty());
        assert_eq!(ledger.products()[0].quantity, 10);
    }
}
