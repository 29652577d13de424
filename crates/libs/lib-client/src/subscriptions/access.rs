//! # Access Predicates
//!
//! Pure functions over an in-memory subscription list. Only `active` entries
//! grant anything, and an active `ivrex_pro` grants every tier.

use shared::{Subscription, SubscriptionType};

/// True iff some entry has type `service` and is active.
pub fn has_active_subscription(subscriptions: &[Subscription], service: SubscriptionType) -> bool {
    subscriptions
        .iter()
        .any(|s| s.subscription_type == service && s.is_active())
}

/// True iff the caller may use `service`, directly or through an active pro tier.
pub fn has_access_to_service(subscriptions: &[Subscription], service: SubscriptionType) -> bool {
    has_active_subscription(subscriptions, SubscriptionType::IvrexPro) || has_active_subscription(subscriptions, service)
}

/// Active entries, in fetch order.
pub fn active_subscriptions(subscriptions: &[Subscription]) -> Vec<&Subscription> {
    subscriptions.iter().filter(|s| s.is_active()).collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};
    use shared::{Subscription, SubscriptionStatus, SubscriptionType};

    pub fn subscription(id: &str, subscription_type: SubscriptionType, status: SubscriptionStatus) -> Subscription {
        Subscription {
            id: id.to_string(),
            subscription_type,
            status,
            price: 49.0,
            expires_at: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::subscription;
    use super::*;
    use shared::SubscriptionStatus;

    const NOT_ACTIVE: [SubscriptionStatus; 4] = [
        SubscriptionStatus::Pending,
        SubscriptionStatus::Expired,
        SubscriptionStatus::Cancelled,
        SubscriptionStatus::PaymentFailed,
    ];

    #[test]
    fn test_active_pro_grants_every_tier() {
        let list = vec![subscription("s1", SubscriptionType::IvrexPro, SubscriptionStatus::Active)];

        for service in SubscriptionType::ALL {
            assert!(has_access_to_service(&list, service), "{}", service);
        }
        assert!(!has_active_subscription(&list, SubscriptionType::CopyTrading));
    }

    #[test]
    fn test_inactive_pro_grants_nothing() {
        for status in NOT_ACTIVE {
            let list = vec![subscription("s1", SubscriptionType::IvrexPro, status)];
            for service in SubscriptionType::ALL {
                assert!(!has_access_to_service(&list, service));
            }
        }
    }

    #[test]
    fn test_no_matching_active_entry() {
        for service in SubscriptionType::ALL {
            assert!(!has_active_subscription(&[], service));
            assert!(!has_access_to_service(&[], service));
        }

        let list: Vec<_> = NOT_ACTIVE
            .iter()
            .enumerate()
            .map(|(i, status)| subscription(&i.to_string(), SubscriptionType::TradingSignals, *status))
            .collect();
        assert!(!has_active_subscription(&list, SubscriptionType::TradingSignals));

        let list = vec![subscription("s1", SubscriptionType::CopyTrading, SubscriptionStatus::Active)];
        assert!(!has_active_subscription(&list, SubscriptionType::TradingSignals));
        assert!(has_active_subscription(&list, SubscriptionType::CopyTrading));
    }

    #[test]
    fn test_active_subscriptions_keep_fetch_order() {
        let list = vec![
            subscription("a", SubscriptionType::SharesChallenge, SubscriptionStatus::Active),
            subscription("b", SubscriptionType::CopyTrading, SubscriptionStatus::Expired),
            subscription("c", SubscriptionType::TradingSignals, SubscriptionStatus::Active),
            subscription("d", SubscriptionType::PersonalCoaching, SubscriptionStatus::Pending),
        ];

        let ids: Vec<&str> = active_subscriptions(&list).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
