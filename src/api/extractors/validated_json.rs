//! JSON body extractor that runs `validator` rules before the handler.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

/// Deserializes and validates a request body. Both failures surface as
/// `400 VALIDATION_ERROR`.
///
/// ```rust,ignore
/// #[derive(Deserialize, Validate)]
/// pub struct CashChangeRequest {
///     pub amount: f64,
///     pub reason: CashReason,
///     #[validate(length(max = 500, message = "Comment is too long"))]
///     pub comment: String,
/// }
///
/// async fn record(ctx: RequestContext, ValidatedJson(body): ValidatedJson<CashChangeRequest>) {
///     // body.comment fits
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(describe(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// One `field: message` entry per failed rule, ordered by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: invalid value", field),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize, Validate)]
    struct OpenRequest {
        #[validate(range(min = 0.0, message = "must not be negative"))]
        open_cash: f64,
        #[validate(length(min = 4, max = 8))]
        pin: String,
    }

    #[test]
    fn test_errors_are_listed_per_field() {
        let request = OpenRequest {
            open_cash: -1.0,
            pin: "12".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            describe(&errors),
            "open_cash: must not be negative, pin: invalid value"
        );
    }
}
