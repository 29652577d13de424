//! # Service Catalog
//!
//! The purchase form submits the human-readable service name ("Copy Trading");
//! the backend only accepts its enum value (`copy_trading`). The catalog is the
//! single explicit table between the two.
//!
//! A catalog is checked when it is built:
//! - no two names may normalize to the same key,
//! - every [`SubscriptionType`] must be reachable from some name.
//!
//! [`ServiceCatalog::new`] rejects a table breaking either rule.
//! [`ServiceCatalog::lenient`] keeps the first entry for a duplicated key and
//! only logs, for production where refusing to start is worse.

use std::collections::HashMap;

use shared::SubscriptionType;
use tracing::error;

use crate::error::{AppError, Result};

/// Names shown on the pricing page.
pub const DEFAULT_SERVICE_NAMES: &[(&str, SubscriptionType)] = &[
    ("Trading Signals", SubscriptionType::TradingSignals),
    ("Copy Trading", SubscriptionType::CopyTrading),
    ("Advanced Analytics", SubscriptionType::AdvancedAnalytics),
    ("Personal Coaching", SubscriptionType::PersonalCoaching),
    ("IVREX Pro", SubscriptionType::IvrexPro),
    ("Shares Challenge", SubscriptionType::SharesChallenge),
];

/// Lookup table from service name to backend subscription type.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    entries: HashMap<String, SubscriptionType>,
}

impl ServiceCatalog {
    /// Build a catalog, rejecting duplicate keys and uncovered types.
    pub fn new(names: &[(&str, SubscriptionType)]) -> Result<Self> {
        let mut entries = HashMap::with_capacity(names.len());

        for (name, subscription_type) in names {
            let key = normalize(name);
            if key.is_empty() {
                return Err(AppError::Config("Service catalog contains an empty name".to_string()));
            }
            if entries.insert(key, *subscription_type).is_some() {
                return Err(AppError::Config(format!(
                    "Service catalog lists '{}' more than once",
                    name
                )));
            }
        }

        let catalog = Self { entries };
        let uncovered = catalog.uncovered();
        if !uncovered.is_empty() {
            return Err(AppError::Config(format!(
                "Service catalog has no name for: {}",
                uncovered.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
            )));
        }

        Ok(catalog)
    }

    /// Build a catalog that logs problems instead of failing.
    pub fn lenient(names: &[(&str, SubscriptionType)]) -> Self {
        let mut entries = HashMap::with_capacity(names.len());

        for (name, subscription_type) in names {
            let key = normalize(name);
            if key.is_empty() || entries.contains_key(&key) {
                error!("[CATALOG] Ignoring invalid or duplicate service name '{}'", name);
                continue;
            }
            entries.insert(key, *subscription_type);
        }

        let catalog = Self { entries };
        for missing in catalog.uncovered() {
            error!("[CATALOG] No service name maps to {}", missing);
        }
        catalog
    }

    /// The pricing-page catalog.
    pub fn standard() -> Result<Self> {
        Self::new(DEFAULT_SERVICE_NAMES)
    }

    /// Resolve a submitted service name, or a backend enum string, to a type.
    ///
    /// Unknown names are a validation failure; there is no silent default tier.
    pub fn resolve(&self, name: &str) -> Result<SubscriptionType> {
        if let Ok(subscription_type) = name.trim().parse::<SubscriptionType>() {
            return Ok(subscription_type);
        }

        self.entries
            .get(&normalize(name))
            .copied()
            .ok_or_else(|| AppError::ValidationFailed(format!("Unknown service: {}", name.trim())))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn uncovered(&self) -> Vec<SubscriptionType> {
        SubscriptionType::ALL
            .into_iter()
            .filter(|t| !self.entries.values().any(|v| v == t))
            .collect()
    }
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
