//! Receipts: order headers, their lines and the void/recover lifecycle.

use serde::{Deserialize, Serialize};

use super::inventory::round_quantity;
use crate::errors::{AppError, AppResult, ConflictKind};

/// How a receipt was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayType {
    Cash,
    Card,
}

impl PayType {
    pub fn as_str(self) -> &'static str {
        match self {
            PayType::Cash => "cash",
            PayType::Card => "card",
        }
    }
}

impl std::str::FromStr for PayType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PayType::Cash),
            "card" => Ok(PayType::Card),
            other => Err(AppError::validation(format!("Unknown pay type: {}", other))),
        }
    }
}

/// Lifecycle of a receipt: `Active -> Voided -> Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Active,
    Voided,
}

/// Stock movement paired with a lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDirection {
    /// Take consumed ingredients out of stock (sale, recovery).
    Deduct,
    /// Put consumed ingredients back (void).
    Restore,
}

impl StockDirection {
    /// Signed change to a stock level when moving `amount` this way.
    pub fn delta(self, amount: f64) -> f64 {
        let amount = round_quantity(amount);
        match self {
            StockDirection::Deduct => -amount,
            StockDirection::Restore => amount,
        }
    }
}

impl OrderState {
    pub fn from_voided(voided: bool) -> Self {
        if voided {
            OrderState::Voided
        } else {
            OrderState::Active
        }
    }

    pub fn is_voided(self) -> bool {
        self == OrderState::Voided
    }

    /// The only way a receipt changes state. Returns the stock movement the
    /// caller must apply to every line in the same transaction.
    pub fn transition(self, target: OrderState) -> AppResult<StockDirection> {
        match (self, target) {
            (OrderState::Active, OrderState::Voided) => Ok(StockDirection::Restore),
            (OrderState::Voided, OrderState::Active) => Ok(StockDirection::Deduct),
            (current, _) => Err(current.already_there()),
        }
    }

    /// Error for a transition into the state the receipt is already in.
    pub fn already_there(self) -> AppError {
        match self {
            OrderState::Voided => AppError::StateConflict(ConflictKind::OrderAlreadyVoided),
            OrderState::Active => AppError::StateConflict(ConflictKind::OrderAlreadyRecovered),
        }
    }
}

/// Receipt header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderInfo {
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub session_id: i64,
    pub pay_type: PayType,
    pub cashier_name: String,
    pub created_at: i64,
    pub state: OrderState,
}

/// Receipt line. `product_name` and `price` are snapshots taken at sale time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: f64,
    pub price: f64,
    pub voided: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_restores_and_recover_deducts() {
        assert_eq!(
            OrderState::Active.transition(OrderState::Voided).unwrap(),
            StockDirection::Restore
        );
        assert_eq!(
            OrderState::Voided.transition(OrderState::Active).unwrap(),
            StockDirection::Deduct
        );
    }

    #[test]
    fn test_stock_delta_sign() {
        assert_eq!(StockDirection::Deduct.delta(0.25), -0.25);
        assert_eq!(StockDirection::Restore.delta(1.0004), 1.0);
    }

    #[test]
    fn test_repeated_transitions_conflict() {
        let err = OrderState::Active.transition(OrderState::Active).unwrap_err();
        assert_eq!(err.code(), "ORDER_ALREADY_RECOVERED");

        let err = OrderState::Voided.transition(OrderState::Voided).unwrap_err();
        assert_eq!(err.code(), "ORDER_ALREADY_VOIDED");
    }

    #[test]
    fn test_stock_direction_round_trip() {
        let after_sale = round_quantity(10.0 + StockDirection::Deduct.delta(0.3));
        let after_void = round_quantity(after_sale + StockDirection::Restore.delta(0.3));
        assert_eq!(after_sale, 9.7);
        assert_eq!(after_void, 10.0);
    }
}
