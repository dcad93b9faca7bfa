//! End-to-end ledger flow over the public API: open an in-memory database,
//! run a small trading day, and check the books balance.

use keeper_core::{
    ClientDraft, PaymentStatus, ProductDraft, TransactionDraft, TransactionKind,
};
use keeper_db::{DbConfig, Ledger};

fn draft(name: &str, cost: i64, price: i64, quantity: i64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        category: "misc".to_string(),
        cost_cents: cost,
        sale_price_cents: price,
        quantity,
        supplier: "Acme".to_string(),
        min_stock: 5,
        image: None,
    }
}

#[tokio::test]
async fn trading_day_round_trip() {
    let ledger = Ledger::open(DbConfig::in_memory()).await.unwrap();

    let coffee = ledger.add_product(draft("Coffee", 1200, 2500, 30)).await.unwrap();
    let tea = ledger.add_product(draft("Tea", 350, 900, 50)).await.unwrap();

    let client = ledger
        .add_client(ClientDraft {
            name: "Cafe Central".to_string(),
            email: None,
            phone: None,
            address: None,
        })
        .await
        .unwrap();

    // Morning: restock tea
    ledger
        .add_transaction(TransactionDraft {
            kind: TransactionKind::Purchase,
            product_id: tea.id.clone(),
            client_id: None,
            quantity: 20,
            unit_price_cents: 350,
            total_cents: 7000,
            payment_status: PaymentStatus::Paid,
            description: Some("Restock".to_string()),
        })
        .await
        .unwrap();

    // Afternoon: sell coffee, one paid, one on credit
    ledger
        .add_transaction(TransactionDraft {
            kind: TransactionKind::Sale,
            product_id: coffee.id.clone(),
            client_id: Some(client.id.clone()),
            quantity: 4,
            unit_price_cents: 2500,
            total_cents: 10000,
            payment_status: PaymentStatus::Paid,
            description: None,
        })
        .await
        .unwrap();
    let credit_sale = ledger
        .add_transaction(TransactionDraft {
            kind: TransactionKind::Sale,
            product_id: coffee.id.clone(),
            client_id: Some(client.id.clone()),
            quantity: 2,
            unit_price_cents: 2500,
            total_cents: 5000,
            payment_status: PaymentStatus::Pending,
            description: None,
        })
        .await
        .unwrap();

    // Evening: stocktake finds 43 teas on the shelf
    ledger
        .add_transaction(TransactionDraft {
            kind: TransactionKind::Adjustment,
            product_id: tea.id.clone(),
            client_id: None,
            quantity: 43,
            unit_price_cents: 0,
            total_cents: 0,
            payment_status: PaymentStatus::Paid,
            description: Some("Stocktake".to_string()),
        })
        .await
        .unwrap();

    // Stock: coffee 30 - 4 - 2 = 24; tea adjusted to exactly 43
    let products = ledger.products();
    let coffee_now = products.iter().find(|p| p.id == coffee.id).unwrap();
    let tea_now = products.iter().find(|p| p.id == tea.id).unwrap();
    assert_eq!(coffee_now.quantity, 24);
    assert_eq!(tea_now.quantity, 43);

    // Books before the credit sale settles
    let summary = ledger.financial_summary(None, None).await.unwrap();
    assert_eq!(summary.total_revenue_cents, 10000);
    assert_eq!(summary.pending_receivables_cents, 5000);
    assert_eq!(summary.total_costs_cents, 7000);
    assert_eq!(summary.profit_cents, 3000);

    // Client pays up
    ledger
        .update_transaction_status(&credit_sale.id, PaymentStatus::Paid)
        .await
        .unwrap();

    let summary = ledger.financial_summary(None, None).await.unwrap();
    assert_eq!(summary.total_revenue_cents, 15000);
    assert_eq!(summary.pending_receivables_cents, 0);
    assert_eq!(summary.profit_cents, 8000);

    // Deleting the product leaves the journal intact
    ledger.delete_product(&coffee.id).await.unwrap();
    assert_eq!(ledger.transactions().len(), 4);
}
