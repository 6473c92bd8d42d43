//! Stock movements outside of sales: goods arrivals and inventory counts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::scope_service::{authorize_scope, authorize_write};
use crate::domain::inventory::{count_ingredient, write_off_total};
use crate::domain::{
    round_quantity, Action, ArrivalItem, CashChange, CashReason, DateRange, Ingredient,
    InventoryHistory, InventoryLine, RequestContext,
};
use crate::errors::{AppError, AppResult, ConflictKind, OptionExt};
use crate::infra::UnitOfWork;
use crate::utils::now_millis;

/// Counted quantity of one ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountItem {
    pub ingredient_id: i64,
    pub new_count: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArrivalReceipt {
    pub ingredients: Vec<Ingredient>,
    /// Expense posted for write-off lines, if any.
    pub cash_change: Option<CashChange>,
}

#[async_trait]
pub trait InventoryService: Send + Sync {
    async fn list_ingredients(&self, ctx: &RequestContext) -> AppResult<Vec<Ingredient>>;

    /// Receive goods. Write-off lines are also booked as one cash expense on
    /// the caller's open session.
    async fn arrival(&self, ctx: &RequestContext, items: Vec<ArrivalItem>)
        -> AppResult<ArrivalReceipt>;

    /// Start an inventory count.
    async fn create_history(
        &self,
        ctx: &RequestContext,
        comment: String,
    ) -> AppResult<InventoryHistory>;

    /// Record counted quantities against a count started earlier.
    async fn record_count(
        &self,
        ctx: &RequestContext,
        history_id: i64,
        items: Vec<CountItem>,
    ) -> AppResult<Vec<InventoryLine>>;

    async fn list_histories(
        &self,
        ctx: &RequestContext,
        range: DateRange,
    ) -> AppResult<Vec<InventoryHistory>>;

    async fn history_lines(
        &self,
        ctx: &RequestContext,
        history_id: i64,
    ) -> AppResult<Vec<InventoryLine>>;
}

pub struct InventoryManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> InventoryManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> InventoryService for InventoryManager<U> {
    async fn list_ingredients(&self, ctx: &RequestContext) -> AppResult<Vec<Ingredient>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadInventory, &reader).await?;
        reader.ingredients().list(&scope).await
    }

    async fn arrival(
        &self,
        ctx: &RequestContext,
        items: Vec<ArrivalItem>,
    ) -> AppResult<ArrivalReceipt> {
        let scope = authorize_write(ctx, Action::RecordArrival, &self.uow.reader()).await?;
        let outlet_id = scope.require_outlet()?;
        if items.iter().any(|i| i.quantity <= 0.0 || i.price < 0.0) {
            return Err(AppError::validation(
                "arrival quantities must be positive and prices non-negative",
            ));
        }

        let employee_id = ctx.actor.employee().ok().map(|e| e.employee_id);
        let needs_session = items.iter().any(|i| i.write_off);
        let expense = write_off_total(&items);
        let now = now_millis();

        let receipt = self
            .uow
            .transaction(move |tx| {
                Box::pin(async move {
                    let session = if needs_session {
                        let session = match employee_id {
                            Some(id) => tx.sessions().find_open_for_employee(id).await?,
                            None => None,
                        };
                        Some(
                            session
                                .filter(|s| s.outlet_id == outlet_id)
                                .ok_or(AppError::StateConflict(ConflictKind::SessionNotOpen))?,
                        )
                    } else {
                        None
                    };

                    let mut ingredients = Vec::with_capacity(items.len());
                    for item in &items {
                        let received = round_quantity(item.quantity);
                        let ingredient = tx
                            .ingredients()
                            .apply_delta(outlet_id, item.ingredient_id, received)
                            .await?
                            .ok_or_not_found()?;
                        ingredients.push(ingredient);
                    }

                    let cash_change = match session {
                        Some(session) => Some(
                            tx.cash()
                                .create(
                                    &session,
                                    CashReason::ReceiptOfGoods.signed_amount(expense),
                                    CashReason::ReceiptOfGoods,
                                    String::new(),
                                    now,
                                )
                                .await?,
                        ),
                        None => None,
                    };

                    Ok(ArrivalReceipt {
                        ingredients,
                        cash_change,
                    })
                })
            })
            .await?;

        tracing::info!(
            outlet_id,
            lines = receipt.ingredients.len(),
            expense,
            "goods arrival recorded"
        );
        Ok(receipt)
    }

    async fn create_history(
        &self,
        ctx: &RequestContext,
        comment: String,
    ) -> AppResult<InventoryHistory> {
        let scope = authorize_write(ctx, Action::CountInventory, &self.uow.reader()).await?;
        let outlet_id = scope.require_outlet()?;
        let employee_id = ctx.actor.employee().ok().map(|e| e.employee_id);

        self.uow
            .reader()
            .inventory()
            .create_history(scope.org_id, outlet_id, employee_id, comment, now_millis())
            .await
    }

    async fn record_count(
        &self,
        ctx: &RequestContext,
        history_id: i64,
        items: Vec<CountItem>,
    ) -> AppResult<Vec<InventoryLine>> {
        let scope = authorize_write(ctx, Action::CountInventory, &self.uow.reader()).await?;
        if items.iter().any(|i| i.new_count < 0.0) {
            return Err(AppError::validation("counted quantity cannot be negative"));
        }

        let lines = self
            .uow
            .transaction(move |tx| {
                Box::pin(async move {
                    let history = tx
                        .inventory()
                        .find_history(&scope, history_id)
                        .await?
                        .ok_or_not_found()?;

                    let mut lines = Vec::with_capacity(items.len());
                    for item in items {
                        let ingredient = tx
                            .ingredients()
                            .find_in_outlet_for_update(history.outlet_id, item.ingredient_id)
                            .await?
                            .ok_or_not_found()?;

                        let outcome = count_ingredient(
                            ingredient.count,
                            item.new_count,
                            ingredient.purchase_price,
                        );
                        if outcome.changed {
                            tx.ingredients()
                                .set_count(ingredient.id, outcome.new_count)
                                .await?;
                        }
                        lines.push(
                            tx.inventory()
                                .add_line(&history, ingredient.id, &outcome)
                                .await?,
                        );
                    }
                    Ok(lines)
                })
            })
            .await?;

        let loss: f64 = lines.iter().map(|l| l.loss_price).sum();
        tracing::info!(history_id, lines = lines.len(), loss, "inventory counted");
        Ok(lines)
    }

    async fn list_histories(
        &self,
        ctx: &RequestContext,
        range: DateRange,
    ) -> AppResult<Vec<InventoryHistory>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadInventory, &reader).await?;
        reader.inventory().list_histories(&scope, &range).await
    }

    async fn history_lines(
        &self,
        ctx: &RequestContext,
        history_id: i64,
    ) -> AppResult<Vec<InventoryLine>> {
        let reader = self.uow.reader();
        let scope = authorize_scope(ctx, Action::ReadInventory, &reader).await?;
        let history = reader
            .inventory()
            .find_history(&scope, history_id)
            .await?
            .ok_or_not_found()?;
        reader.inventory().lines(history.id).await
    }
}
