//! Authentication: organization signup and login, employee PIN login and
//! the JWT claims that become a request's [`Actor`].

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{
    Config, DEFAULT_CASHIER_NAME, DEFAULT_EMPLOYEE_PIN, DEFAULT_OWNER_NAME, MAIN_OUTLET_NAME,
    SECONDS_PER_HOUR, TOKEN_TYPE_BEARER,
};
use crate::domain::{Actor, EmployeeActor, Employee, Organization, Password, Role};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::NewEmployee;
use crate::infra::UnitOfWork;
use crate::utils::now_millis;

/// JWT claims payload.
///
/// `sub` is the organization id. Employee tokens also carry the employee,
/// their outlet and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlet_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// The actor these claims authenticate.
    pub fn actor(&self) -> AppResult<Actor> {
        match (self.employee_id, self.outlet_id, self.role) {
            (None, None, None) => Ok(Actor::Organization { org_id: self.sub }),
            (Some(employee_id), Some(outlet_id), Some(role)) => Ok(Actor::Employee(EmployeeActor {
                org_id: self.sub,
                outlet_id,
                employee_id,
                role,
            })),
            _ => Err(AppError::Unauthorized),
        }
    }
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Signup payload after validation.
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub invite_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub organization: Organization,
    #[serde(flatten)]
    pub token: TokenResponse,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an organization with its main outlet, an owner and a cashier.
    /// A supplied invite code is consumed in the same transaction.
    async fn signup(&self, input: SignupInput) -> AppResult<SignupResponse>;

    /// Organization email/password login.
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Exchange an organization token plus employee PIN for an employee token.
    async fn employee_login(
        &self,
        actor: &Actor,
        employee_id: i64,
        pin: String,
    ) -> AppResult<TokenResponse>;

    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(
    org_id: i64,
    employee: Option<&Employee>,
    config: &Config,
) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: org_id,
        employee_id: employee.map(|e| e.id),
        outlet_id: employee.map(|e| e.outlet_id),
        role: employee.map(|e| e.role),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

// Verified against when the account does not exist so both paths cost the same
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn signup(&self, input: SignupInput) -> AppResult<SignupResponse> {
        let SignupInput {
            name,
            email,
            password,
            invite_code,
        } = input;

        // Hash outside the transaction; argon2 is slow on purpose
        let password_hash = Password::new(&password)?.into_string();
        let owner_pin = Password::pin(DEFAULT_EMPLOYEE_PIN)?.into_string();
        let cashier_pin = Password::pin(DEFAULT_EMPLOYEE_PIN)?.into_string();
        let now = now_millis();

        let organization = self
            .uow
            .transaction_serializable(move |tx| {
                Box::pin(async move {
                    if tx.organizations().find_by_email(&email).await?.is_some() {
                        return Err(AppError::conflict("Organization"));
                    }

                    let invitation = match invite_code.as_deref() {
                        Some(code) => Some(
                            tx.invitations()
                                .find_live_by_code(code, now)
                                .await?
                                .ok_or(AppError::InvalidInviteCode)?,
                        ),
                        None => None,
                    };

                    let org = tx
                        .organizations()
                        .create(name, email, password_hash, now)
                        .await?;
                    let outlet = tx
                        .outlets()
                        .create(org.id, MAIN_OUTLET_NAME.to_string())
                        .await?;

                    for (name, pin_hash, role) in [
                        (DEFAULT_OWNER_NAME, owner_pin, Role::Owner),
                        (DEFAULT_CASHIER_NAME, cashier_pin, Role::Cashier),
                    ] {
                        tx.employees()
                            .create(NewEmployee {
                                org_id: org.id,
                                outlet_id: outlet.id,
                                name: name.to_string(),
                                pin_hash,
                                role,
                            })
                            .await?;
                    }

                    if let Some(invitation) = invitation {
                        if !tx.invitations().activate(invitation.id, org.id).await? {
                            return Err(AppError::InvalidInviteCode);
                        }
                        tracing::info!(
                            issuer = invitation.org_id,
                            affiliate = org.id,
                            "invitation activated"
                        );
                    }

                    Ok(org)
                })
            })
            .await?;

        tracing::info!(org_id = organization.id, "organization signed up");
        let token = generate_token(organization.id, None, &self.config)?;
        Ok(SignupResponse {
            organization,
            token,
        })
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let organization = self.uow.reader().organizations().find_by_email(&email).await?;

        let hash = organization
            .as_ref()
            .map_or(DUMMY_HASH, |org| org.password_hash.as_str());
        let password_valid = Password::from_hash(hash.to_string()).verify(&password);

        match organization {
            Some(org) if password_valid => generate_token(org.id, None, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    async fn employee_login(
        &self,
        actor: &Actor,
        employee_id: i64,
        pin: String,
    ) -> AppResult<TokenResponse> {
        let org_id = match actor {
            Actor::Organization { org_id } => *org_id,
            Actor::Employee(_) => return Err(AppError::Forbidden),
        };

        let employee = self
            .uow
            .reader()
            .employees()
            .find_by_id(employee_id)
            .await?
            .filter(|e| e.org_id == org_id);

        let hash = employee
            .as_ref()
            .map_or(DUMMY_HASH, |e| e.pin_hash.as_str());
        let pin_valid = Password::from_hash(hash.to_string()).verify(&pin);

        match employee {
            Some(employee) if pin_valid => {
                tracing::debug!(employee_id, role = %employee.role, "employee logged in");
                generate_token(org_id, Some(&employee), &self.config)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::for_database("sqlite::memory:", "test-secret-key-minimum-32-chars!!")
    }

    fn employee() -> Employee {
        Employee {
            id: 5,
            org_id: 1,
            outlet_id: 3,
            name: "Ann".to_string(),
            pin_hash: String::new(),
            role: Role::Admin,
            online: false,
        }
    }

    #[test]
    fn test_org_token_round_trip() {
        let config = config();
        let token = generate_token(1, None, &config).unwrap();
        let claims = verify_token_internal(&token.access_token, &config).unwrap();

        assert_eq!(claims.actor().unwrap(), Actor::Organization { org_id: 1 });
    }

    #[test]
    fn test_employee_token_carries_role_and_outlet() {
        let config = config();
        let token = generate_token(1, Some(&employee()), &config).unwrap();
        let claims = verify_token_internal(&token.access_token, &config).unwrap();

        assert_eq!(
            claims.actor().unwrap(),
            Actor::Employee(EmployeeActor {
                org_id: 1,
                outlet_id: 3,
                employee_id: 5,
                role: Role::Admin,
            })
        );
    }

    #[test]
    fn test_partial_employee_claims_rejected() {
        let claims = Claims {
            sub: 1,
            employee_id: Some(5),
            outlet_id: None,
            role: None,
            exp: 0,
            iat: 0,
        };
        assert!(matches!(claims.actor(), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let token = generate_token(1, None, &config()).unwrap();
        let other = Config::for_database("sqlite::memory:", "another-secret-key-minimum-32-chars");
        assert!(verify_token_internal(&token.access_token, &other).is_err());
    }
}
