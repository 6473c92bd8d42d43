//! Manual cash movements tied to a work session.

use serde::{Deserialize, Serialize};

use super::inventory::round_money;
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashReason {
    ManualIn,
    ManualOut,
    /// Posted automatically by write-off arrivals.
    ReceiptOfGoods,
    Other,
}

impl CashReason {
    pub fn as_str(self) -> &'static str {
        match self {
            CashReason::ManualIn => "manual_in",
            CashReason::ManualOut => "manual_out",
            CashReason::ReceiptOfGoods => "receipt_of_goods",
            CashReason::Other => "other",
        }
    }

    /// Stored amount: outflows are negative, inflows positive, `Other`
    /// keeps the caller's sign.
    pub fn signed_amount(self, amount: f64) -> f64 {
        let amount = round_money(amount);
        match self {
            CashReason::ManualIn => amount.abs(),
            CashReason::ManualOut | CashReason::ReceiptOfGoods => -amount.abs(),
            CashReason::Other => amount,
        }
    }
}

impl std::str::FromStr for CashReason {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual_in" => Ok(CashReason::ManualIn),
            "manual_out" => Ok(CashReason::ManualOut),
            "receipt_of_goods" => Ok(CashReason::ReceiptOfGoods),
            "other" => Ok(CashReason::Other),
            other => Err(AppError::validation(format!("Unknown cash reason: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashChange {
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub session_id: i64,
    pub amount: f64,
    pub reason: CashReason,
    pub comment: String,
    pub created_at: i64,
}
