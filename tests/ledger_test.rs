//! Inventory and cash ledger: sales, void/recover, arrivals, counts and
//! manual cash movements.

mod common;

use retail_backoffice::domain::{
    ArrivalItem, CashReason, DateRange, OrderState, PayType,
};
use retail_backoffice::errors::{AppError, ConflictKind};
use retail_backoffice::services::{CountItem, SellItem, ServiceContainer};

use common::{seed_product, setup, signup, stock_of};

fn item(product_id: i64, quantity: f64) -> SellItem {
    SellItem {
        product_id,
        quantity,
    }
}

#[tokio::test]
async fn test_sell_void_recover_round_trip() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let (beans, espresso) = seed_product(&app, &acme, 10.0, 0.25).await;
    let orders = app.services.orders();

    app.services
        .sessions()
        .open(&acme.cashier_ctx(), 100.0)
        .await
        .unwrap();

    let details = orders
        .create(&acme.cashier_ctx(), PayType::Cash, vec![item(espresso.id, 2.0)])
        .await
        .unwrap();
    assert_eq!(details.lines.len(), 1);
    assert_eq!(details.lines[0].product_name, "Espresso");
    assert_eq!(details.lines[0].price, 2.5);
    assert_eq!(stock_of(&app, &acme, beans.id).await, 9.5);

    let order_id = details.order.id;
    orders
        .sell(&acme.cashier_ctx(), order_id, item(espresso.id, 4.0))
        .await
        .unwrap();
    assert_eq!(stock_of(&app, &acme, beans.id).await, 8.5);

    let voided = orders.void(&acme.owner_ctx(), order_id).await.unwrap();
    assert_eq!(voided.state, OrderState::Voided);
    assert_eq!(stock_of(&app, &acme, beans.id).await, 10.0);
    assert!(orders
        .lines(&acme.owner_ctx(), order_id)
        .await
        .unwrap()
        .iter()
        .all(|l| l.voided));

    let twice = orders.void(&acme.owner_ctx(), order_id).await;
    assert!(matches!(
        twice,
        Err(AppError::StateConflict(ConflictKind::OrderAlreadyVoided))
    ));
    assert_eq!(stock_of(&app, &acme, beans.id).await, 10.0);

    let recovered = orders.recover(&acme.owner_ctx(), order_id).await.unwrap();
    assert_eq!(recovered.state, OrderState::Active);
    assert_eq!(stock_of(&app, &acme, beans.id).await, 8.5);
}

#[tokio::test]
async fn test_recover_active_order_conflicts_without_mutation() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let (beans, espresso) = seed_product(&app, &acme, 5.0, 1.0).await;

    app.services
        .sessions()
        .open(&acme.cashier_ctx(), 0.0)
        .await
        .unwrap();
    let details = app
        .services
        .orders()
        .create(&acme.cashier_ctx(), PayType::Card, vec![item(espresso.id, 1.0)])
        .await
        .unwrap();
    assert_eq!(stock_of(&app, &acme, beans.id).await, 4.0);

    let result = app
        .services
        .orders()
        .recover(&acme.owner_ctx(), details.order.id)
        .await;
    assert!(matches!(
        result,
        Err(AppError::StateConflict(ConflictKind::OrderAlreadyRecovered))
    ));
    assert_eq!(stock_of(&app, &acme, beans.id).await, 4.0);
}

#[tokio::test]
async fn test_cashier_cannot_void() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let (_, espresso) = seed_product(&app, &acme, 5.0, 1.0).await;

    app.services
        .sessions()
        .open(&acme.cashier_ctx(), 0.0)
        .await
        .unwrap();
    let details = app
        .services
        .orders()
        .create(&acme.cashier_ctx(), PayType::Cash, vec![item(espresso.id, 1.0)])
        .await
        .unwrap();

    let result = app
        .services
        .orders()
        .void(&acme.cashier_ctx(), details.order.id)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn test_order_requires_open_session() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let (beans, espresso) = seed_product(&app, &acme, 5.0, 1.0).await;

    let result = app
        .services
        .orders()
        .create(&acme.cashier_ctx(), PayType::Cash, vec![item(espresso.id, 1.0)])
        .await;
    assert!(matches!(
        result,
        Err(AppError::StateConflict(ConflictKind::SessionNotOpen))
    ));
    assert_eq!(stock_of(&app, &acme, beans.id).await, 5.0);
}

#[tokio::test]
async fn test_unknown_product_leaves_stock_untouched() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let (beans, espresso) = seed_product(&app, &acme, 5.0, 1.0).await;

    app.services
        .sessions()
        .open(&acme.cashier_ctx(), 0.0)
        .await
        .unwrap();
    let result = app
        .services
        .orders()
        .create(
            &acme.cashier_ctx(),
            PayType::Cash,
            vec![item(espresso.id, 1.0), item(espresso.id + 1000, 1.0)],
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
    assert_eq!(stock_of(&app, &acme, beans.id).await, 5.0);

    let orders = app
        .services
        .orders()
        .list(&acme.owner_ctx(), DateRange::default())
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_arrival_with_write_off_books_expense() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let (beans, _) = seed_product(&app, &acme, 1.0, 1.0).await;
    let arrival = vec![ArrivalItem {
        ingredient_id: beans.id,
        quantity: 4.0,
        price: 2.5,
        write_off: true,
    }];

    // Write-off needs the caller's open session
    let without_session = app
        .services
        .inventory()
        .arrival(&acme.owner_ctx(), arrival.clone())
        .await;
    assert!(matches!(
        without_session,
        Err(AppError::StateConflict(ConflictKind::SessionNotOpen))
    ));
    assert_eq!(stock_of(&app, &acme, beans.id).await, 1.0);

    let session = app
        .services
        .sessions()
        .open(&acme.owner_ctx(), 50.0)
        .await
        .unwrap();
    let receipt = app
        .services
        .inventory()
        .arrival(&acme.owner_ctx(), arrival)
        .await
        .unwrap();
    assert_eq!(receipt.ingredients[0].count, 5.0);

    let expense = receipt.cash_change.expect("write-off expense");
    assert_eq!(expense.amount, -10.0);
    assert_eq!(expense.reason, CashReason::ReceiptOfGoods);
    assert_eq!(expense.session_id, session.id);
}

#[tokio::test]
async fn test_arrival_without_write_off_needs_no_session() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let (beans, _) = seed_product(&app, &acme, 1.0, 1.0).await;

    let receipt = app
        .services
        .inventory()
        .arrival(
            &acme.owner_ctx(),
            vec![ArrivalItem {
                ingredient_id: beans.id,
                quantity: 0.5,
                price: 0.0,
                write_off: false,
            }],
        )
        .await
        .unwrap();
    assert!(receipt.cash_change.is_none());
    assert_eq!(stock_of(&app, &acme, beans.id).await, 1.5);
}

#[tokio::test]
async fn test_inventory_count_records_loss() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let (beans, _) = seed_product(&app, &acme, 10.0, 1.0).await;
    let inventory = app.services.inventory();

    let history = inventory
        .create_history(&acme.owner_ctx(), "weekly count".to_string())
        .await
        .unwrap();
    let lines = inventory
        .record_count(
            &acme.owner_ctx(),
            history.id,
            vec![CountItem {
                ingredient_id: beans.id,
                new_count: 8.0,
            }],
        )
        .await
        .unwrap();

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].old_count, 10.0);
    assert_eq!(lines[0].new_count, 8.0);
    // Two units lost at a purchase price of 20
    assert_eq!(lines[0].loss_price, 40.0);
    assert_eq!(stock_of(&app, &acme, beans.id).await, 8.0);

    let stored = inventory
        .history_lines(&acme.owner_ctx(), history.id)
        .await
        .unwrap();
    assert_eq!(stored, lines);
}

#[tokio::test]
async fn test_cash_changes_follow_reason_sign() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let cash = app.services.cash();

    let no_session = cash
        .record(&acme.cashier_ctx(), 10.0, CashReason::ManualIn, String::new())
        .await;
    assert!(matches!(
        no_session,
        Err(AppError::StateConflict(ConflictKind::SessionNotOpen))
    ));

    let session = app
        .services
        .sessions()
        .open(&acme.cashier_ctx(), 100.0)
        .await
        .unwrap();
    let change_in = cash
        .record(&acme.cashier_ctx(), -15.0, CashReason::ManualIn, "float".to_string())
        .await
        .unwrap();
    let change_out = cash
        .record(&acme.cashier_ctx(), 7.25, CashReason::ManualOut, "milk".to_string())
        .await
        .unwrap();
    assert_eq!(change_in.amount, 15.0);
    assert_eq!(change_out.amount, -7.25);

    let listed = cash
        .list(&acme.owner_ctx(), Some(session.id), DateRange::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn test_arrival_with_unknown_ingredient_changes_nothing() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let beta = signup(&app, "Beta", None).await;
    let (beans, _) = seed_product(&app, &acme, 3.0, 1.0).await;
    let (foreign, _) = seed_product(&app, &beta, 3.0, 1.0).await;

    let line = |ingredient_id| ArrivalItem {
        ingredient_id,
        quantity: 2.0,
        price: 1.0,
        write_off: false,
    };

    // The first line is applied before the second fails
    let result = app
        .services
        .inventory()
        .arrival(&acme.owner_ctx(), vec![line(beans.id), line(foreign.id)])
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
    assert_eq!(stock_of(&app, &acme, beans.id).await, 3.0);
    assert_eq!(stock_of(&app, &beta, foreign.id).await, 3.0);

    let receipt = app
        .services
        .inventory()
        .arrival(&acme.owner_ctx(), vec![line(beans.id), line(beans.id)])
        .await
        .unwrap();
    assert_eq!(receipt.ingredients[0].count, 5.0);
    assert_eq!(receipt.ingredients[1].count, 7.0);
    assert!(receipt.cash_change.is_none());
}
