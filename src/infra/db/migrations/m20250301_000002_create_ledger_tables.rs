//! Migration: sessions, catalog, receipts, cash movements and inventory counts.

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_tenancy_tables::{Employees, Outlets};
use super::{amount_column, id_column, ref_column};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn outlet_fk(
    name: &str,
    table: impl IntoTableRef,
    column: impl IdenList,
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(Outlets::Table, Outlets::Id)
        .on_delete(ForeignKeyAction::Restrict)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkSessions::Table)
                    .if_not_exists()
                    .col(id_column(WorkSessions::Id))
                    .col(ref_column(WorkSessions::OrgId))
                    .col(ref_column(WorkSessions::OutletId))
                    .col(ref_column(WorkSessions::EmployeeId))
                    .col(amount_column(WorkSessions::OpenCash))
                    .col(amount_column(WorkSessions::CloseCash))
                    .col(amount_column(WorkSessions::EarnedByCash))
                    .col(amount_column(WorkSessions::EarnedByCard))
                    .col(
                        ColumnDef::new(WorkSessions::ReceiptCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ref_column(WorkSessions::OpenedAt))
                    .col(ColumnDef::new(WorkSessions::ClosedAt).big_integer().null())
                    .foreign_key(&mut outlet_fk(
                        "fk_work_sessions_outlet",
                        WorkSessions::Table,
                        WorkSessions::OutletId,
                    ))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_sessions_employee")
                            .from(WorkSessions::Table, WorkSessions::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_work_sessions_employee_open")
                    .table(WorkSessions::Table)
                    .col(WorkSessions::EmployeeId)
                    .col(WorkSessions::ClosedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ingredients::Table)
                    .if_not_exists()
                    .col(id_column(Ingredients::Id))
                    .col(ref_column(Ingredients::OrgId))
                    .col(ref_column(Ingredients::OutletId))
                    .col(ColumnDef::new(Ingredients::Name).string().not_null())
                    .col(amount_column(Ingredients::Count))
                    .col(amount_column(Ingredients::PurchasePrice))
                    .col(ColumnDef::new(Ingredients::Measure).string_len(16).not_null())
                    .foreign_key(&mut outlet_fk(
                        "fk_ingredients_outlet",
                        Ingredients::Table,
                        Ingredients::OutletId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(id_column(Products::Id))
                    .col(ref_column(Products::OrgId))
                    .col(ref_column(Products::OutletId))
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(amount_column(Products::Price))
                    .foreign_key(&mut outlet_fk(
                        "fk_products_outlet",
                        Products::Table,
                        Products::OutletId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductIngredients::Table)
                    .if_not_exists()
                    .col(id_column(ProductIngredients::Id))
                    .col(ref_column(ProductIngredients::OrgId))
                    .col(ref_column(ProductIngredients::OutletId))
                    .col(ref_column(ProductIngredients::ProductId))
                    .col(ref_column(ProductIngredients::IngredientId))
                    .col(amount_column(ProductIngredients::Quantity))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_ingredients_product")
                            .from(ProductIngredients::Table, ProductIngredients::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_ingredients_ingredient")
                            .from(ProductIngredients::Table, ProductIngredients::IngredientId)
                            .to(Ingredients::Table, Ingredients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderInfos::Table)
                    .if_not_exists()
                    .col(id_column(OrderInfos::Id))
                    .col(ref_column(OrderInfos::OrgId))
                    .col(ref_column(OrderInfos::OutletId))
                    .col(ref_column(OrderInfos::SessionId))
                    .col(ColumnDef::new(OrderInfos::PayType).string_len(8).not_null())
                    .col(ColumnDef::new(OrderInfos::CashierName).string().not_null())
                    .col(ref_column(OrderInfos::CreatedAt))
                    .col(
                        ColumnDef::new(OrderInfos::Voided)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_infos_session")
                            .from(OrderInfos::Table, OrderInfos::SessionId)
                            .to(WorkSessions::Table, WorkSessions::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderLines::Table)
                    .if_not_exists()
                    .col(id_column(OrderLines::Id))
                    .col(ref_column(OrderLines::OrgId))
                    .col(ref_column(OrderLines::OutletId))
                    .col(ref_column(OrderLines::OrderId))
                    .col(ref_column(OrderLines::ProductId))
                    .col(ColumnDef::new(OrderLines::ProductName).string().not_null())
                    .col(amount_column(OrderLines::Quantity))
                    .col(amount_column(OrderLines::Price))
                    .col(
                        ColumnDef::new(OrderLines::Voided)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_lines_order")
                            .from(OrderLines::Table, OrderLines::OrderId)
                            .to(OrderInfos::Table, OrderInfos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_lines_product")
                            .from(OrderLines::Table, OrderLines::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CashChanges::Table)
                    .if_not_exists()
                    .col(id_column(CashChanges::Id))
                    .col(ref_column(CashChanges::OrgId))
                    .col(ref_column(CashChanges::OutletId))
                    .col(ref_column(CashChanges::SessionId))
                    .col(amount_column(CashChanges::Amount))
                    .col(ColumnDef::new(CashChanges::Reason).string_len(32).not_null())
                    .col(
                        ColumnDef::new(CashChanges::Comment)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ref_column(CashChanges::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cash_changes_session")
                            .from(CashChanges::Table, CashChanges::SessionId)
                            .to(WorkSessions::Table, WorkSessions::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InventoryHistories::Table)
                    .if_not_exists()
                    .col(id_column(InventoryHistories::Id))
                    .col(ref_column(InventoryHistories::OrgId))
                    .col(ref_column(InventoryHistories::OutletId))
                    .col(ColumnDef::new(InventoryHistories::EmployeeId).big_integer().null())
                    .col(
                        ColumnDef::new(InventoryHistories::Comment)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ref_column(InventoryHistories::CreatedAt))
                    .foreign_key(&mut outlet_fk(
                        "fk_inventory_histories_outlet",
                        InventoryHistories::Table,
                        InventoryHistories::OutletId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InventoryLines::Table)
                    .if_not_exists()
                    .col(id_column(InventoryLines::Id))
                    .col(ref_column(InventoryLines::HistoryId))
                    .col(ref_column(InventoryLines::OrgId))
                    .col(ref_column(InventoryLines::OutletId))
                    .col(ref_column(InventoryLines::IngredientId))
                    .col(amount_column(InventoryLines::OldCount))
                    .col(amount_column(InventoryLines::NewCount))
                    .col(amount_column(InventoryLines::LossPrice))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_lines_history")
                            .from(InventoryLines::Table, InventoryLines::HistoryId)
                            .to(InventoryHistories::Table, InventoryHistories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_lines_ingredient")
                            .from(InventoryLines::Table, InventoryLines::IngredientId)
                            .to(Ingredients::Table, Ingredients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first
        for table in [
            InventoryLines::Table.into_iden(),
            InventoryHistories::Table.into_iden(),
            CashChanges::Table.into_iden(),
            OrderLines::Table.into_iden(),
            OrderInfos::Table.into_iden(),
            ProductIngredients::Table.into_iden(),
            Products::Table.into_iden(),
            Ingredients::Table.into_iden(),
            WorkSessions::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum WorkSessions {
    Table,
    Id,
    OrgId,
    OutletId,
    EmployeeId,
    OpenCash,
    CloseCash,
    EarnedByCash,
    EarnedByCard,
    ReceiptCount,
    OpenedAt,
    ClosedAt,
}

#[derive(Iden)]
enum Ingredients {
    Table,
    Id,
    OrgId,
    OutletId,
    Name,
    Count,
    PurchasePrice,
    Measure,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    OrgId,
    OutletId,
    Name,
    Price,
}

#[derive(Iden)]
enum ProductIngredients {
    Table,
    Id,
    OrgId,
    OutletId,
    ProductId,
    IngredientId,
    Quantity,
}

#[derive(Iden)]
enum OrderInfos {
    Table,
    Id,
    OrgId,
    OutletId,
    SessionId,
    PayType,
    CashierName,
    CreatedAt,
    Voided,
}

#[derive(Iden)]
enum OrderLines {
    Table,
    Id,
    OrgId,
    OutletId,
    OrderId,
    ProductId,
    ProductName,
    Quantity,
    Price,
    Voided,
}

#[derive(Iden)]
enum CashChanges {
    Table,
    Id,
    OrgId,
    OutletId,
    SessionId,
    Amount,
    Reason,
    Comment,
    CreatedAt,
}

#[derive(Iden)]
enum InventoryHistories {
    Table,
    Id,
    OrgId,
    OutletId,
    EmployeeId,
    Comment,
    CreatedAt,
}

#[derive(Iden)]
enum InventoryLines {
    Table,
    Id,
    HistoryId,
    OrgId,
    OutletId,
    IngredientId,
    OldCount,
    NewCount,
    LossPrice,
}
