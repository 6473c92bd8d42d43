//! Receipts and the stock they move.
//!
//! Selling deducts every recipe ingredient, voiding puts it back and
//! recovering deducts it again. Each operation runs in one transaction, so
//! a missing product or ingredient leaves stock untouched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::scope_service::{authorize_scope, authorize_write};
use crate::domain::{
    round_quantity, Action, DateRange, OrderInfo, OrderLine, OrderState, PayType,
    RequestContext, StockDirection,
};
use crate::errors::{AppError, AppResult, ConflictKind, OptionExt};
use crate::infra::repositories::NewOrder;
use crate::infra::{TransactionContext, UnitOfWork};
use crate::utils::now_millis;

/// One product sold on a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SellItem {
    pub product_id: i64,
    pub quantity: f64,
}

impl SellItem {
    fn validated(self) -> AppResult<Self> {
        let quantity = round_quantity(self.quantity);
        if quantity <= 0.0 {
            return Err(AppError::validation("quantity must be positive"));
        }
        Ok(Self { quantity, ..self })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: OrderInfo,
    pub lines: Vec<OrderLine>,
}

#[async_trait]
pub trait OrderService: Send + Sync {
    /// Open a receipt on the caller's open session, selling `items` inline.
    async fn create(
        &self,
        ctx: &RequestContext,
        pay_type: PayType,
        items: Vec<SellItem>,
    ) -> AppResult<OrderDetails>;

    /// Add a line to an active receipt.
    async fn sell(&self, ctx: &RequestContext, order_id: i64, item: SellItem)
        -> AppResult<OrderLine>;

    async fn void(&self, ctx: &RequestContext, order_id: i64) -> AppResult<OrderInfo>;

    async fn recover(&self, ctx: &RequestContext, order_id: i64) -> AppResult<OrderInfo>;

    async fn list(&self, ctx: &RequestContext, range: DateRange) -> AppResult<Vec<OrderInfo>>;

    async fn lines(&self, ctx: &RequestContext, order_id: i64) -> AppResult<Vec<OrderLine>>;
}

/// Move the stock consumed by `units` of a product.
async fn move_stock(
    tx: TransactionContext<'_>,
    outlet_id: i64,
    product_id: i64,
    units: f64,
    direction: StockDirection,
) -> AppResult<()> {
    for item in tx.recipes().for_product(product_id).await? {
        let delta = direction.delta(item.consumption(units));
        tx.ingredients()
            .apply_delta(outlet_id, item.ingredient_id, delta)
            .await?
            .ok_or_not_found()?;
    }
    Ok(())
}

async fn sell_line(
    tx: TransactionContext<'_>,
    order: &OrderInfo,
    item: SellItem,
) -> AppResult<OrderLine> {
    let product = tx
        .products()
        .find_in_outlet(order.outlet_id, item.product_id)
        .await?
        .ok_or_not_found()?;

    move_stock(
        tx,
        order.outlet_id,
        product.id,
        item.quantity,
        StockDirection::Deduct,
    )
    .await?;
    tx.orders().add_line(order, &product, item.quantity).await
}

pub struct OrderManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OrderManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Void or recover through the single lifecycle transition.
    async fn transition(
        &self,
        ctx: &RequestContext,
        order_id: i64,
        action: Action,
        target: OrderState,
    ) -> AppResult<OrderInfo> {
        let scope = authorize_write(ctx, action, &self.uow.reader()).await?;

        let order = self
            .uow
            .transaction(move |tx| {
                Box::pin(async move {
                    let order = tx
                        .orders()
                        .find_scoped(&scope, order_id)
                        .await?
                        .ok_or_not_found()?;
                    let direction = order.state.transition(target)?;

                    // Flip first: a racing void or recover blocks on the header
                    // row and then matches nothing.
                    if !tx.orders().set_state(order.id, target).await? {
                        return Err(target.already_there());
                    }
                    for line in tx.orders().lines(order.id).await? {
                        let units = line.quantity;
                        move_stock(tx, order.outlet_id, line.product_id, units, direction).await?;
                    }

                    Ok(OrderInfo {
                        state: target,
                        ..order
                    })
                })
            })
            .await?;

        tracing::info!(order_id, state = ?order.state, "order state changed");
        Ok(order)
    }
}

#[async_trait]
impl<U: UnitOfWork> OrderService for OrderManager<U> {
    async fn create(
        &self,
        ctx: &RequestContext,
        pay_type: PayType,
        items: Vec<SellItem>,
    ) -> AppResult<OrderDetails> {
        let scope = authorize_write(ctx, Action::CreateOrder, &self.uow.reader()).await?;
        let outlet_id = scope.require_outlet()?;
        let employee_id = ctx.actor.employee()?.employee_id;
        let items = items
            .into_iter()
            .map(SellItem::validated)
            .collect::<AppResult<Vec<_>>>()?;
        let now = now_millis();

        let details = self
            .uow
            .transaction(move |tx| {
                Box::pin(async move {
                    let session = tx
                        .sessions()
                        .find_open_for_employee(employee_id)
                        .await?
                        .filter(|s| s.outlet_id == outlet_id)
                        .ok_or(AppError::StateConflict(ConflictKind::SessionNotOpen))?;
                    let cashier = tx
                        .employees()
                        .find_by_id(employee_id)
                        .await?
                        .ok_or_not_found()?;

                    let order = tx
                        .orders()
                        .create(NewOrder {
                            org_id: session.org_id,
                            outlet_id,
                            session_id: session.id,
                            pay_type,
                            cashier_name: cashier.name,
                            created_at: now,
                        })
                        .await?;

                    let mut lines = Vec::with_capacity(items.len());
                    for item in items {
                        lines.push(sell_line(tx, &order, item).await?);
                    }
                    Ok(OrderDetails { order, lines })
                })
            })
            .await?;

        tracing::info!(
            order_id = details.order.id,
            session_id = details.order.session_id,
            lines = details.lines.len(),
            "order created"
        );
        Ok(details)
    }

    async fn sell(
        &self,
        ctx: &RequestContext,
        order_id: i64,
        item: SellItem,
    ) -> AppResult<OrderLine> {
        let scope = authorize_write(ctx, Action::SellProduct, &self.uow.reader()).await?;
        let item = item.validated()?;

        let line = self
            .uow
            .transaction(move |tx| {
                Box::pin(async move {
                    let order = tx
                        .orders()
                        .find_scoped_for_update(&scope, order_id)
                        .await?
                        .ok_or_not_found()?;
                    if order.state.is_voided() {
                        return Err(AppError::StateConflict(ConflictKind::OrderAlreadyVoided));
                    }

                    let session = tx
                        .sessions()
                        .find_by_id(order.session_id)
                        .await?
                        .ok_or_not_found()?;
                    if !session.is_open() {
                        return Err(AppError::StateConflict(ConflictKind::SessionNotOpen));
                    }

                    sell_line(tx, &order, item).await
                })
            })
            .await?;

        tracing::debug!(
            order_id,
            product_id = line.product_id,
            quantity = line.quantity,
            "product sold"
        );
        Ok(line)
    }

    async fn void(&self, ctx: &RequestContext, order_id: i64) -> AppResult<OrderInfo> {
        self.transition(ctx, order_id, Action::VoidOrder, OrderState::Voided)
            .await
    }

    async fn recover(&self, ctx: &RequestContext, order_id: i64) -> AppResult<OrderInfo> {
        self.transition(ctx, order_id, Action::RecoverOrder, OrderState::Active)
            .await
    }

    async fn list(&self, ctx: &RequestContext, range: DateRange) -> AppResult<Vec<OrderInfo>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadOrders, &reader).await?;
        reader.orders().list(&scope, &range).await
    }

    async fn lines(&self, ctx: &RequestContext, order_id: i64) -> AppResult<Vec<OrderLine>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadOrders, &reader).await?;
        let order = reader
            .orders()
            .find_scoped(&scope, order_id)
            .await?
            .ok_or_not_found()?;
        reader.orders().lines(order.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sell_item_validation() {
        let item = SellItem {
            product_id: 1,
            quantity: 1.23456,
        };
        assert_eq!(item.validated().unwrap().quantity, 1.235);

        let zero = SellItem {
            product_id: 1,
            quantity: 0.0001,
        };
        assert!(matches!(zero.validated(), Err(AppError::Validation(_))));
    }
}
