//! Migration: organizations, outlets, employees and invitations.

use sea_orm_migration::prelude::*;

use super::{id_column, ref_column};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(id_column(Organizations::Id))
                    .col(ColumnDef::new(Organizations::Name).string().not_null())
                    .col(
                        ColumnDef::new(Organizations::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Organizations::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Organizations::EmailConfirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ref_column(Organizations::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Outlets::Table)
                    .if_not_exists()
                    .col(id_column(Outlets::Id))
                    .col(ref_column(Outlets::OrgId))
                    .col(ColumnDef::new(Outlets::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_outlets_org")
                            .from(Outlets::Table, Outlets::OrgId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(id_column(Employees::Id))
                    .col(ref_column(Employees::OrgId))
                    .col(ref_column(Employees::OutletId))
                    .col(ColumnDef::new(Employees::Name).string().not_null())
                    .col(ColumnDef::new(Employees::PinHash).string().not_null())
                    .col(ColumnDef::new(Employees::Role).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Employees::Online)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_outlet")
                            .from(Employees::Table, Employees::OutletId)
                            .to(Outlets::Table, Outlets::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employees_outlet")
                    .table(Employees::Table)
                    .col(Employees::OutletId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Invitations::Table)
                    .if_not_exists()
                    .col(id_column(Invitations::Id))
                    .col(ref_column(Invitations::OrgId))
                    .col(ColumnDef::new(Invitations::Code).string_len(32).null())
                    .col(ColumnDef::new(Invitations::ExpiresAt).big_integer().null())
                    .col(ColumnDef::new(Invitations::AffiliateOrgId).big_integer().null())
                    .col(ref_column(Invitations::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invitations_issuer")
                            .from(Invitations::Table, Invitations::OrgId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invitations_affiliate")
                            .from(Invitations::Table, Invitations::AffiliateOrgId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // NULL codes (activated invitations) do not collide
        manager
            .create_index(
                Index::create()
                    .name("idx_invitations_code")
                    .table(Invitations::Table)
                    .col(Invitations::Code)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invitations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Outlets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum Organizations {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    EmailConfirmed,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum Outlets {
    Table,
    Id,
    OrgId,
    Name,
}

#[derive(Iden)]
pub(crate) enum Employees {
    Table,
    Id,
    OrgId,
    OutletId,
    Name,
    PinHash,
    Role,
    Online,
}

#[derive(Iden)]
enum Invitations {
    Table,
    Id,
    OrgId,
    Code,
    ExpiresAt,
    AffiliateOrgId,
    CreatedAt,
}
