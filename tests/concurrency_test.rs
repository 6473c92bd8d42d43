//! Racing writers on one ingredient or one receipt.
//!
//! Set `TEST_DATABASE_URL` to a Postgres database to run these with real
//! row locking; without it they run serialized on SQLite.

mod common;

use retail_backoffice::domain::{OrderInfo, PayType};
use retail_backoffice::errors::{AppError, AppResult, ConflictKind};
use retail_backoffice::services::{SellItem, ServiceContainer, Services};
use retail_backoffice::RequestContext;
use tokio::task::JoinSet;

use common::{seed_product, setup_shared, signup, stock_of, unique_name};

const SALES: usize = 40;

fn one(product_id: i64) -> SellItem {
    SellItem {
        product_id,
        quantity: 1.0,
    }
}

async fn void(services: Services, ctx: RequestContext, order_id: i64) -> AppResult<OrderInfo> {
    services.orders().void(&ctx, order_id).await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_sales_deduct_every_unit() {
    let app = setup_shared().await;
    let acme = signup(&app, &unique_name("Acme"), None).await;
    let (beans, espresso) = seed_product(&app, &acme, 1000.0, 1.0).await;

    app.services
        .sessions()
        .open(&acme.cashier_ctx(), 0.0)
        .await
        .unwrap();
    let shared = app
        .services
        .orders()
        .create(&acme.cashier_ctx(), PayType::Cash, Vec::new())
        .await
        .unwrap()
        .order
        .id;

    // Half add lines to one receipt, half ring up receipts of their own
    let mut tasks = JoinSet::new();
    for i in 0..SALES {
        let services = app.services.clone();
        let ctx = acme.cashier_ctx();
        let product_id = espresso.id;
        tasks.spawn(async move {
            let orders = services.orders();
            if i % 2 == 0 {
                orders.sell(&ctx, shared, one(product_id)).await.map(|_| ())
            } else {
                orders
                    .create(&ctx, PayType::Card, vec![one(product_id)])
                    .await
                    .map(|_| ())
            }
        });
    }

    let mut sold = 0;
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
        sold += 1;
    }
    assert_eq!(sold, SALES);
    assert_eq!(
        stock_of(&app, &acme, beans.id).await,
        1000.0 - SALES as f64
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_voids_restore_stock_once() {
    let app = setup_shared().await;
    let bistro = signup(&app, &unique_name("Bistro"), None).await;
    let (beans, espresso) = seed_product(&app, &bistro, 100.0, 2.0).await;

    app.services
        .sessions()
        .open(&bistro.cashier_ctx(), 0.0)
        .await
        .unwrap();

    for round in 0..10 {
        let order_id = app
            .services
            .orders()
            .create(&bistro.cashier_ctx(), PayType::Cash, vec![one(espresso.id)])
            .await
            .unwrap()
            .order
            .id;
        assert_eq!(stock_of(&app, &bistro, beans.id).await, 98.0);

        let (first, second) = tokio::join!(
            tokio::spawn(void(app.services.clone(), bistro.owner_ctx(), order_id)),
            tokio::spawn(void(app.services.clone(), bistro.owner_ctx(), order_id)),
        );
        let outcomes = [first.unwrap(), second.unwrap()];

        let succeeded = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(succeeded, 1, "round {}", round);
        assert!(outcomes.iter().any(|r| matches!(
            r,
            Err(AppError::StateConflict(ConflictKind::OrderAlreadyVoided))
        )));
        assert_eq!(stock_of(&app, &bistro, beans.id).await, 100.0);
    }
}
