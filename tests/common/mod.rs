//! Shared fixtures: an in-memory database with migrations applied and
//! organizations created through the signup flow.

#![allow(dead_code)]

use std::sync::Arc;

use retail_backoffice::config::Config;
use retail_backoffice::domain::{
    Actor, EmployeeActor, Ingredient, MeasureUnit, Product, RequestContext, Role, ScopeOverride,
};
use retail_backoffice::infra::Database;
use retail_backoffice::services::{
    CreateIngredientInput, ServiceContainer, Services, SignupInput,
};

pub const JWT_SECRET: &str = "test-secret-key-for-testing-only-32chars";

pub struct TestApp {
    pub services: Services,
    pub database: Arc<Database>,
    pub config: Config,
}

pub async fn setup() -> TestApp {
    setup_with(|_| {}).await
}

/// Build the app after adjusting the configuration.
pub async fn setup_with(adjust: impl FnOnce(&mut Config)) -> TestApp {
    let mut config = Config::for_database("sqlite::memory:", JWT_SECRET);
    adjust(&mut config);
    build(config).await
}

/// Postgres when `TEST_DATABASE_URL` is set, otherwise in-memory SQLite.
///
/// SQLite runs one writer at a time, so races on row locks only show up
/// against Postgres. Tenants created here need unique names, see
/// [`unique_name`].
pub async fn setup_shared() -> TestApp {
    let url = std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".into());
    build(Config::for_database(url, JWT_SECRET)).await
}

/// Organization name that cannot clash with earlier runs on a shared database.
pub fn unique_name(prefix: &str) -> String {
    format!("{}{}", prefix, retail_backoffice::utils::now_millis())
}

async fn build(config: Config) -> TestApp {
    let database = Database::connect(&config)
        .await
        .expect("test database with migrations");
    let services = Services::from_connection(database.get_connection(), config.clone());

    TestApp {
        services,
        database: Arc::new(database),
        config,
    }
}

/// An organization as signup leaves it: main outlet, owner and cashier.
pub struct Tenant {
    pub org_id: i64,
    pub outlet_id: i64,
    pub org: Actor,
    pub owner: Actor,
    pub cashier: Actor,
}

impl Tenant {
    pub fn org_ctx(&self) -> RequestContext {
        RequestContext::new(self.org)
    }

    pub fn owner_ctx(&self) -> RequestContext {
        RequestContext::new(self.owner)
    }

    pub fn cashier_ctx(&self) -> RequestContext {
        RequestContext::new(self.cashier)
    }

    /// Organization token viewing another organization.
    pub fn viewing(&self, org_id: i64) -> RequestContext {
        RequestContext::new(self.org).with_override(ScopeOverride {
            org_id: Some(org_id),
            outlet_id: None,
        })
    }
}

pub fn employee_actor(tenant_org: i64, outlet_id: i64, employee_id: i64, role: Role) -> Actor {
    Actor::Employee(EmployeeActor {
        org_id: tenant_org,
        outlet_id,
        employee_id,
        role,
    })
}

pub async fn signup(app: &TestApp, name: &str, invite_code: Option<String>) -> Tenant {
    let response = app
        .services
        .auth()
        .signup(SignupInput {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password: "SecurePass123!".to_string(),
            invite_code,
        })
        .await
        .expect("signup");

    let org_id = response.organization.id;
    let org = Actor::Organization { org_id };
    let employees = app
        .services
        .employees()
        .list(&RequestContext::new(org))
        .await
        .expect("list employees");

    let owner = employees
        .iter()
        .find(|e| e.role == Role::Owner)
        .expect("owner created at signup");
    let cashier = employees
        .iter()
        .find(|e| e.role == Role::Cashier)
        .expect("cashier created at signup");

    Tenant {
        org_id,
        outlet_id: owner.outlet_id,
        org,
        owner: employee_actor(org_id, owner.outlet_id, owner.id, Role::Owner),
        cashier: employee_actor(org_id, cashier.outlet_id, cashier.id, Role::Cashier),
    }
}

/// One ingredient and a product consuming `per_unit` of it.
pub async fn seed_product(
    app: &TestApp,
    tenant: &Tenant,
    stock: f64,
    per_unit: f64,
) -> (Ingredient, Product) {
    let ctx = tenant.owner_ctx();
    let catalog = app.services.catalog();

    let ingredient = catalog
        .create_ingredient(
            &ctx,
            CreateIngredientInput {
                name: "Coffee beans".to_string(),
                measure: MeasureUnit::Weight,
                purchase_price: 20.0,
                count: stock,
            },
        )
        .await
        .expect("create ingredient");
    let product = catalog
        .create_product(&ctx, "Espresso".to_string(), 2.5)
        .await
        .expect("create product");
    catalog
        .add_recipe_item(&ctx, product.id, ingredient.id, per_unit)
        .await
        .expect("add recipe item");

    (ingredient, product)
}

pub async fn stock_of(app: &TestApp, tenant: &Tenant, ingredient_id: i64) -> f64 {
    app.services
        .inventory()
        .list_ingredients(&tenant.owner_ctx())
        .await
        .expect("list ingredients")
        .into_iter()
        .find(|i| i.id == ingredient_id)
        .expect("ingredient in scope")
        .count
}
