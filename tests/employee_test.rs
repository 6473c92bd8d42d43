//! Employee management along the role hierarchy, and the outlet guards
//! that depend on who is assigned where.

mod common;

use retail_backoffice::domain::{Actor, Employee, Role};
use retail_backoffice::errors::AppError;
use retail_backoffice::services::{CreateEmployeeInput, ServiceContainer, UpdateEmployeeInput};
use retail_backoffice::RequestContext;

use common::{employee_actor, setup, signup, TestApp, Tenant};

async fn hire(app: &TestApp, ctx: &RequestContext, name: &str, role: Role) -> Employee {
    app.services
        .employees()
        .create(
            ctx,
            CreateEmployeeInput {
                name: name.to_string(),
                pin: "4821".to_string(),
                role,
                outlet_id: None,
            },
        )
        .await
        .unwrap()
}

fn acting_as(tenant: &Tenant, employee: &Employee) -> RequestContext {
    RequestContext::new(employee_actor(
        tenant.org_id,
        employee.outlet_id,
        employee.id,
        employee.role,
    ))
}

fn promote(role: Role) -> UpdateEmployeeInput {
    UpdateEmployeeInput {
        role: Some(role),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_managers_only_create_lower_roles() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let director = hire(&app, &acme.owner_ctx(), "Dana", Role::Director).await;
    let admin = hire(&app, &acting_as(&acme, &director), "Alex", Role::Admin).await;
    let employees = app.services.employees();

    let input = |role| CreateEmployeeInput {
        name: "Sam".to_string(),
        pin: "1234".to_string(),
        role,
        outlet_id: None,
    };

    let err = employees
        .create(&acting_as(&acme, &admin), input(Role::Director))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    let err = employees
        .create(&acting_as(&acme, &admin), input(Role::Admin))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    let err = employees
        .create(&acme.org_ctx(), input(Role::Owner))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let cashier = employees
        .create(&acting_as(&acme, &admin), input(Role::Cashier))
        .await
        .unwrap();
    assert_eq!(cashier.role, Role::Cashier);
    assert_eq!(cashier.outlet_id, acme.outlet_id);

    let err = employees
        .create(&acme.cashier_ctx(), input(Role::Cashier))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn test_promotion_capped_below_own_role() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let director = hire(&app, &acme.owner_ctx(), "Dana", Role::Director).await;
    let admin = hire(&app, &acme.owner_ctx(), "Alex", Role::Admin).await;
    let employees = app.services.employees();
    let as_director = acting_as(&acme, &director);

    let err = employees
        .update(&as_director, admin.id, promote(Role::Director))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let renamed = employees
        .update(
            &as_director,
            admin.id,
            UpdateEmployeeInput {
                name: Some("Alexis".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Alexis");
    assert_eq!(renamed.role, Role::Admin);

    let promoted = employees
        .update(&acme.owner_ctx(), admin.id, promote(Role::Director))
        .await
        .unwrap();
    assert_eq!(promoted.role, Role::Director);
}

#[tokio::test]
async fn test_nobody_changes_their_own_role() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let employees = app.services.employees();
    let Actor::Employee(owner) = acme.owner else {
        panic!("owner is an employee actor");
    };

    let err = employees
        .update(&acme.owner_ctx(), owner.employee_id, promote(Role::Director))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // The owner may still edit the rest of their own record
    let renamed = employees
        .update(
            &acme.owner_ctx(),
            owner.employee_id,
            UpdateEmployeeInput {
                name: Some("Founder".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.role, Role::Owner);

    let director = hire(&app, &acme.owner_ctx(), "Dana", Role::Director).await;
    let err = employees
        .update(&acting_as(&acme, &director), director.id, promote(Role::Admin))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn test_owner_record_cannot_be_deleted() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let employees = app.services.employees();
    let Actor::Employee(owner) = acme.owner else {
        panic!("owner is an employee actor");
    };

    for ctx in [acme.owner_ctx(), acme.org_ctx()] {
        let err = employees.delete(&ctx, owner.employee_id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    let director = hire(&app, &acme.owner_ctx(), "Dana", Role::Director).await;
    let admin = hire(&app, &acme.owner_ctx(), "Alex", Role::Admin).await;
    let err = employees
        .delete(&acting_as(&acme, &admin), director.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    employees
        .delete(&acting_as(&acme, &director), admin.id)
        .await
        .unwrap();
    let remaining = employees.list(&acme.org_ctx()).await.unwrap();
    assert!(remaining.iter().all(|e| e.id != admin.id));
    assert!(remaining.iter().any(|e| e.id == owner.employee_id));
}

#[tokio::test]
async fn test_main_outlet_is_in_use() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let outlets = app.services.outlets();

    let err = outlets
        .delete(&acme.org_ctx(), acme.outlet_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InUse(_)));
    assert_eq!(err.code(), "IN_USE");

    let kiosk = outlets
        .create(&acme.org_ctx(), "Kiosk".to_string())
        .await
        .unwrap();
    assert_eq!(outlets.list(&acme.org_ctx()).await.unwrap().len(), 2);

    outlets.delete(&acme.owner_ctx(), kiosk.id).await.unwrap();
    let left = outlets.list(&acme.org_ctx()).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, acme.outlet_id);
}

#[tokio::test]
async fn test_outlet_of_another_organization_not_found() {
    let app = setup().await;
    let acme = signup(&app, "Acme", None).await;
    let beta = signup(&app, "Beta", None).await;

    let err = app
        .services
        .outlets()
        .delete(&acme.org_ctx(), beta.outlet_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
