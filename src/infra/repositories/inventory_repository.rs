//! Inventory count headers and lines.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::base::ScopedSelect;
use super::entities::{inventory_history, inventory_line};
use crate::domain::{CountOutcome, DateRange, InventoryHistory, InventoryLine, Scope};
use crate::errors::AppResult;

pub struct InventoryRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> InventoryRepository<'a, C> {
    pub(crate) fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create_history(
        &self,
        org_id: i64,
        outlet_id: i64,
        employee_id: Option<i64>,
        comment: String,
        created_at: i64,
    ) -> AppResult<InventoryHistory> {
        let model = inventory_history::ActiveModel {
            org_id: Set(org_id),
            outlet_id: Set(outlet_id),
            employee_id: Set(employee_id),
            comment: Set(comment),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }

    pub async fn find_history(
        &self,
        scope: &Scope,
        id: i64,
    ) -> AppResult<Option<InventoryHistory>> {
        let model = inventory_history::Entity::find_by_id(id)
            .scoped(scope)
            .one(self.conn)
            .await?;
        Ok(model.map(InventoryHistory::from))
    }

    pub async fn list_histories(
        &self,
        scope: &Scope,
        range: &DateRange,
    ) -> AppResult<Vec<InventoryHistory>> {
        let models = inventory_history::Entity::find()
            .scoped(scope)
            .within(inventory_history::Column::CreatedAt, range)
            .order_by_desc(inventory_history::Column::CreatedAt)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(InventoryHistory::from).collect())
    }

    pub async fn add_line(
        &self,
        history: &InventoryHistory,
        ingredient_id: i64,
        outcome: &CountOutcome,
    ) -> AppResult<InventoryLine> {
        let model = inventory_line::ActiveModel {
            history_id: Set(history.id),
            org_id: Set(history.org_id),
            outlet_id: Set(history.outlet_id),
            ingredient_id: Set(ingredient_id),
            old_count: Set(outcome.old_count),
            new_count: Set(outcome.new_count),
            loss_price: Set(outcome.loss_price),
            ..Default::default()
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }

    pub async fn lines(&self, history_id: i64) -> AppResult<Vec<InventoryLine>> {
        let models = inventory_line::Entity::find()
            .filter(inventory_line::Column::HistoryId.eq(history_id))
            .order_by_asc(inventory_line::Column::Id)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(InventoryLine::from).collect())
    }
}
