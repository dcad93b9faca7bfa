//! # Ledger Types
//!
//! Inventory ledger domain: products, clients, transactions, and the derived
//! financial summary.
//!
//! ## Stock Invariant
//! A product's `quantity` is adjusted only through transaction creation (or a
//! direct product update). The rule per transaction kind:
//!
//! ```text
//! sale        quantity -= txn.quantity
//! purchase    quantity += txn.quantity
//! adjustment  quantity  = txn.quantity   (absolute set)
//! ```
//!
//! A sale can drive the quantity below zero; that is recorded, not rejected.
//!
//! ## Money
//! All monetary fields are integer cents (i64). The only floating point in
//! this module is the derived profit margin percentage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::generate_id;

// =============================================================================
// Product
// =============================================================================

/// A product tracked by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4), assigned by the ledger on insert.
    pub id: String,
    pub name: String,
    pub category: String,
    /// Acquisition cost per unit, in cents.
    pub cost_cents: i64,
    /// Sale price per unit, in cents.
    pub sale_price_cents: i64,
    /// Current stock level. May go negative through sales.
    pub quantity: i64,
    pub supplier: String,
    /// Low-stock warning threshold.
    pub min_stock: i64,
    /// Optional image reference (data URL or path).
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the stock level has fallen to or below the warning threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }
}

/// Input for creating a product; the ledger assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub cost_cents: i64,
    pub sale_price_cents: i64,
    pub quantity: i64,
    pub supplier: String,
    pub min_stock: i64,
    pub image: Option<String>,
}

impl ProductDraft {
    /// Materializes the draft into a full product with a fresh id and
    /// `created_at == updated_at == now`.
    pub fn create(self, now: DateTime<Utc>) -> Product {
        Product {
            id: generate_id(),
            name: self.name,
            category: self.category,
            cost_cents: self.cost_cents,
            sale_price_cents: self.sale_price_cents,
            quantity: self.quantity,
            supplier: self.supplier,
            min_stock: self.min_stock,
            image: self.image,
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client transactions can be attributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDraft {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ClientDraft {
    pub fn create(self, now: DateTime<Utc>) -> Client {
        Client {
            id: generate_id(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// The kind of a ledger transaction, which determines the stock rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Stock leaves: quantity -= txn.quantity
    Sale,
    /// Stock arrives: quantity += txn.quantity
    Purchase,
    /// Stock is corrected: quantity = txn.quantity
    Adjustment,
}

impl TransactionKind {
    /// Applies this kind's stock rule to the current quantity.
    pub fn apply_stock(&self, current: i64, txn_quantity: i64) -> i64 {
        match self {
            TransactionKind::Sale => current - txn_quantity,
            TransactionKind::Purchase => current + txn_quantity,
            TransactionKind::Adjustment => txn_quantity,
        }
    }
}

/// Payment state of a transaction. The only mutable field after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

/// A ledger transaction.
///
/// Immutable once created, except for `payment_status` which may be toggled
/// independently. `product_id` is a soft reference: the schema does not
/// enforce it, and a transaction against a missing product is still recorded
/// (its stock adjustment is skipped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub product_id: String,
    pub client_id: Option<String>,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_cents: i64,
    pub payment_status: PaymentStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub product_id: String,
    pub client_id: Option<String>,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_cents: i64,
    pub payment_status: PaymentStatus,
    pub description: Option<String>,
}

impl TransactionDraft {
    pub fn create(self, now: DateTime<Utc>) -> Transaction {
        Transaction {
            id: generate_id(),
            kind: self.kind,
            product_id: self.product_id,
            client_id: self.client_id,
            quantity: self.quantity,
            unit_price_cents: self.unit_price_cents,
            total_cents: self.total_cents,
            payment_status: self.payment_status,
            description: self.description,
            created_at: now,
        }
    }
}

// =============================================================================
// Financial Summary
// =============================================================================

/// Derived financial aggregate over a transaction set. Never stored.
///
/// ## Definitions
/// - revenue     = sum of `total_cents` over **paid sales**
/// - receivables = sum of `total_cents` over **pending sales**
/// - costs       = sum of `total_cents` over **purchases** (any status)
/// - profit      = revenue - costs
/// - margin      = profit / revenue * 100, or 0.0 when revenue is 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_revenue_cents: i64,
    pub total_costs_cents: i64,
    pub profit_cents: i64,
    pub profit_margin: f64,
    pub pending_receivables_cents: i64,
}

impl FinancialSummary {
    /// Computes the summary over the given transactions, optionally bounded
    /// by an inclusive date range.
    pub fn compute<'a, I>(
        transactions: I,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut total_revenue_cents = 0;
        let mut total_costs_cents = 0;
        let mut pending_receivables_cents = 0;

        for txn in transactions {
            if let Some(start) = start {
                if txn.created_at < start {
                    continue;
                }
            }
            if let Some(end) = end {
                if txn.created_at > end {
                    continue;
                }
            }

            match (txn.kind, txn.payment_status) {
                (TransactionKind::Sale, PaymentStatus::Paid) => {
                    total_revenue_cents += txn.total_cents;
                }
                (TransactionKind::Sale, PaymentStatus::Pending) => {
                    pending_receivables_cents += txn.total_cents;
                }
                (TransactionKind::Purchase, _) => {
                    total_costs_cents += txn.total_cents;
                }
                (TransactionKind::Adjustment, _) => {}
            }
        }

        let profit_cents = total_revenue_cents - total_costs_cents;
        // Guard the division: an empty or purchase-only period has no revenue.
        let profit_margin = if total_revenue_cents == 0 {
            0.0
        } else {
            profit_cents as f64 / total_revenue_cents as f64 * 100.0
        };

        FinancialSummary {
            total_revenue_cents,
            total_costs_cents,
            profit_cents,
            profit_margin,
            pending_receivables_cents,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(kind: TransactionKind, status: PaymentStatus, total_cents: i64) -> Transaction {
        TransactionDraft {
            kind,
            product_id: "p1".to_string(),
            client_id: None,
            quantity: 1,
            unit_price_cents: total_cents,
            total_cents,
            payment_status: status,
            description: None,
        }
        .create(Utc::now())
    }

    #[test]
    fn test_stock_rules() {
        assert_eq!(TransactionKind::Sale.apply_stock(10, 3), 7);
        assert_eq!(TransactionKind::Purchase.apply_stock(10, 3), 13);
        assert_eq!(TransactionKind::Adjustment.apply_stock(10, 3), 3);
        // A sale can drive stock negative; recorded, not rejected.
        assert_eq!(TransactionKind::Sale.apply_stock(2, 5), -3);
    }

    #[test]
    fn test_financial_summary() {
        let txns = vec![
            txn(TransactionKind::Sale, PaymentStatus::Paid, 100),
            txn(TransactionKind::Sale, PaymentStatus::Pending, 50),
            txn(TransactionKind::Purchase, PaymentStatus::Paid, 30),
        ];

        let summary = FinancialSummary::compute(&txns, None, None);

        assert_eq!(summary.total_revenue_cents, 100);
        assert_eq!(summary.pending_receivables_cents, 50);
        assert_eq!(summary.total_costs_cents, 30);
        assert_eq!(summary.profit_cents, 70);
        assert!((summary.profit_margin - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_financial_summary_empty_set_has_zero_margin() {
        let summary = FinancialSummary::compute(std::iter::empty(), None, None);
        assert_eq!(summary.profit_margin, 0.0);
        assert_eq!(summary.profit_cents, 0);
    }

    #[test]
    fn test_financial_summary_date_bounds() {
        let mut old_sale = txn(TransactionKind::Sale, PaymentStatus::Paid, 100);
        old_sale.created_at = Utc::now() - chrono::Duration::days(30);
        let recent_sale = txn(TransactionKind::Sale, PaymentStatus::Paid, 40);

        let txns = vec![old_sale, recent_sale];
        let start = Utc::now() - chrono::Duration::days(7);

        let summary = FinancialSummary::compute(&txns, Some(start), None);
        assert_eq!(summary.total_revenue_cents, 40);
    }

    #[test]
    fn test_low_stock_detection() {
        let mut product = ProductDraft {
            name: "Widget".to_string(),
            category: "misc".to_string(),
            cost_cents: 100,
            sale_price_cents: 250,
            quantity: 5,
            supplier: "Acme".to_string(),
            min_stock: 5,
            image: None,
        }
        .create(Utc::now());

        assert!(product.is_low_stock());
        product.quantity = 6;
        assert!(!product.is_low_stock());
    }
}
