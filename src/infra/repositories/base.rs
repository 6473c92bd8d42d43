//! Tenant filtering shared by every repository.
//!
//! Rows owned by an organization carry `org_id` and `outlet_id` columns.
//! [`ScopedSelect::scoped`] narrows a query to a resolved [`Scope`]; a scope
//! without an outlet covers the whole organization.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};

use super::entities::{
    cash_change, employee, ingredient, inventory_history, inventory_line, order_info, order_line,
    outlet, product, product_ingredient, work_session,
};
use crate::domain::{DateRange, Scope};

/// Entity whose rows belong to one organization and one outlet.
pub trait TenantScoped: EntityTrait {
    fn org_column() -> Self::Column;
    fn outlet_column() -> Self::Column;
}

pub trait ScopedSelect: Sized {
    type Column: ColumnTrait;

    /// Keep only rows visible in `scope`.
    fn scoped(self, scope: &Scope) -> Self;

    /// Keep only rows with `column` in `[from, to]`; an open `to` means now.
    fn within(self, column: Self::Column, range: &DateRange) -> Self;
}

impl<E: TenantScoped> ScopedSelect for Select<E> {
    type Column = E::Column;

    fn scoped(self, scope: &Scope) -> Self {
        let query = self.filter(E::org_column().eq(scope.org_id));
        match scope.outlet_id {
            Some(outlet_id) => query.filter(E::outlet_column().eq(outlet_id)),
            None => query,
        }
    }

    fn within(self, column: E::Column, range: &DateRange) -> Self {
        let query = self.filter(column.gte(range.from));
        match range.to {
            Some(to) => query.filter(column.lte(to)),
            None => query,
        }
    }
}

impl TenantScoped for outlet::Entity {
    fn org_column() -> Self::Column {
        outlet::Column::OrgId
    }

    fn outlet_column() -> Self::Column {
        outlet::Column::Id
    }
}

macro_rules! tenant_scoped {
    ($($module:ident),+ $(,)?) => {
        $(
            impl TenantScoped for $module::Entity {
                fn org_column() -> Self::Column {
                    $module::Column::OrgId
                }

                fn outlet_column() -> Self::Column {
                    $module::Column::OutletId
                }
            }
        )+
    };
}

tenant_scoped!(
    cash_change,
    employee,
    ingredient,
    inventory_history,
    inventory_line,
    order_info,
    order_line,
    product,
    product_ingredient,
    work_session,
);
