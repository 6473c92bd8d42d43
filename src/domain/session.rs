//! Employee work sessions (cash-register shifts).

use serde::{Deserialize, Serialize};

use super::inventory::round_money;
use crate::errors::{AppError, AppResult, ConflictKind};

/// Requested transition for `POST /sessions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionAction {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkSession {
    pub id: i64,
    pub org_id: i64,
    pub outlet_id: i64,
    pub employee_id: i64,
    pub open_cash: f64,
    pub close_cash: f64,
    pub earned_by_cash: f64,
    pub earned_by_card: f64,
    pub receipt_count: i64,
    pub opened_at: i64,
    /// `None` while the session is open.
    pub closed_at: Option<i64>,
}

impl WorkSession {
    pub fn state(&self) -> SessionState {
        match self.closed_at {
            None => SessionState::Open,
            Some(_) => SessionState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == SessionState::Open
    }
}

/// Figures recorded when a session is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionClosing {
    pub close_cash: f64,
    pub earned_by_cash: f64,
    pub earned_by_card: f64,
    pub closed_at: i64,
}

impl SessionClosing {
    pub fn new(close_cash: f64, earned_by_cash: f64, earned_by_card: f64, closed_at: i64) -> Self {
        Self {
            close_cash: round_money(close_cash),
            earned_by_cash: round_money(earned_by_cash),
            earned_by_card: round_money(earned_by_card),
            closed_at,
        }
    }
}

/// An employee may enter `Open` only from "no open session".
pub fn ensure_can_open(current: Option<&WorkSession>) -> AppResult<()> {
    match current {
        Some(session) if session.is_open() => {
            Err(AppError::StateConflict(ConflictKind::SessionAlreadyOpen))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(closed_at: Option<i64>) -> WorkSession {
        WorkSession {
            id: 1,
            org_id: 1,
            outlet_id: 1,
            employee_id: 1,
            open_cash: 1000.0,
            close_cash: 0.0,
            earned_by_cash: 0.0,
            earned_by_card: 0.0,
            receipt_count: 0,
            opened_at: 1_700_000_000_000,
            closed_at,
        }
    }

    #[test]
    fn test_state_follows_close_timestamp() {
        assert_eq!(session(None).state(), SessionState::Open);
        assert_eq!(session(Some(1)).state(), SessionState::Closed);
    }

    #[test]
    fn test_cannot_open_twice() {
        assert!(ensure_can_open(None).is_ok());
        assert!(ensure_can_open(Some(&session(Some(5)))).is_ok());

        let err = ensure_can_open(Some(&session(None))).unwrap_err();
        assert!(matches!(
            err,
            AppError::StateConflict(ConflictKind::SessionAlreadyOpen)
        ));
    }

    #[test]
    fn test_closing_rounds_money() {
        let closing = SessionClosing::new(1200.004, 200.0, 0.126, 10);
        assert_eq!(closing.close_cash, 1200.0);
        assert_eq!(closing.earned_by_card, 0.13);
    }
}
