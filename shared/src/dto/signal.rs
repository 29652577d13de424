//! # Signal DTOs
//!
//! Admins create signals through the dashboard form, which submits prices as
//! text and the side as `BUY`/`SELL`. The backend contract wants numbers and a
//! lower-case side, so the gateway converts a [`SignalRequest`] into a
//! [`Signal`] before forwarding.

use serde::{Deserialize, Serialize};

use crate::utils::deserialize_number;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    #[serde(alias = "buy")]
    Buy,
    #[serde(alias = "sell")]
    Sell,
}

impl SignalType {
    /// Lower-case value used on the backend contract.
    pub fn backend_value(&self) -> &'static str {
        match self {
            SignalType::Buy => "buy",
            SignalType::Sell => "sell",
        }
    }
}

/// Signal creation form as submitted by the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct SignalRequest {
    pub symbol: String,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    #[serde(deserialize_with = "deserialize_number")]
    pub entry_price: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub stop_loss: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub take_profit: f64,
}

/// Signal payload in the backend's shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    pub symbol: String,
    #[serde(rename = "type")]
    pub signal_type: &'static str,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl From<SignalRequest> for Signal {
    fn from(req: SignalRequest) -> Self {
        Signal {
            symbol: req.symbol.trim().to_uppercase(),
            signal_type: req.signal_type.backend_value(),
            entry_price: req.entry_price,
            stop_loss: req.stop_loss,
            take_profit: req.take_profit,
        }
    }
}
