//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20250301_000001_create_tenancy_tables;
mod m20250301_000002_create_ledger_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_tenancy_tables::Migration),
            Box::new(m20250301_000002_create_ledger_tables::Migration),
        ]
    }
}

/// Auto-increment `BIGINT` primary key.
pub(crate) fn id_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// Non-null `BIGINT` reference column.
pub(crate) fn ref_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).big_integer().not_null().to_owned()
}

/// Non-null `DOUBLE` column defaulting to zero.
pub(crate) fn amount_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).double().not_null().default(0.0).to_owned()
}
