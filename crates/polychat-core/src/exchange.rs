//! The chat exchange handler.
//!
//! One exchange is: validate inputs, check entitlement, dispatch to the
//! responder registry, return the text. Each step is a commit point; a
//! later failure does not roll back earlier steps. No retry, no timeout
//! enforcement, no idempotency key -- a repeated identical request runs
//! the whole sequence again.

use tracing::debug;

use polychat_types::error::ExchangeError;

use crate::entitlement::{EntitlementChecker, SubscriptionRepository};
use crate::responder::ResponderRegistry;

/// One inbound chat exchange request.
#[derive(Debug, Clone)]
pub struct ExchangeRequest {
    pub message: String,
    pub model: String,
    pub user_id: String,
}

/// Orchestrates the exchange flow.
///
/// Generic over `SubscriptionRepository` so the entitlement store stays a
/// seam (polychat-core never depends on polychat-infra).
pub struct ExchangeService<S: SubscriptionRepository> {
    entitlement: EntitlementChecker<S>,
    responders: ResponderRegistry,
}

impl<S: SubscriptionRepository> ExchangeService<S> {
    pub fn new(subscriptions: S, responders: ResponderRegistry) -> Self {
        Self {
            entitlement: EntitlementChecker::new(subscriptions),
            responders,
        }
    }

    /// Run one exchange and return the assistant text.
    ///
    /// Errors map onto the wire taxonomy: `MissingFields` (400),
    /// `EntitlementDenied` (403), anything else (500).
    pub async fn handle(&self, request: &ExchangeRequest) -> Result<String, ExchangeError> {
        if request.message.is_empty() || request.model.is_empty() || request.user_id.is_empty() {
            return Err(ExchangeError::MissingFields);
        }

        if !self
            .entitlement
            .is_allowed(&request.user_id, &request.model)
            .await?
        {
            debug!(user_id = %request.user_id, model = %request.model, "entitlement denied");
            return Err(ExchangeError::EntitlementDenied);
        }

        let reply = self
            .responders
            .respond(&request.model, &request.message)
            .await?;

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entitlement::SubscriptionRepository;
    use chrono::Utc;
    use polychat_types::error::RepositoryError;
    use polychat_types::subscription::{Subscription, SubscriptionStatus};
    use std::collections::HashSet;

    struct FakeSubscriptions {
        active_users: HashSet<String>,
        fail: bool,
    }

    impl FakeSubscriptions {
        fn with_active(users: &[&str]) -> Self {
            Self {
                active_users: users.iter().map(|u| u.to_string()).collect(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                active_users: HashSet::new(),
                fail: true,
            }
        }
    }

    impl SubscriptionRepository for FakeSubscriptions {
        async fn find_active(
            &self,
            user_id: &str,
        ) -> Result<Option<Subscription>, RepositoryError> {
            if self.fail {
                return Err(RepositoryError::Connection);
            }
            Ok(self.active_users.contains(user_id).then(|| Subscription {
                user_id: user_id.to_string(),
                status: SubscriptionStatus::Active,
                price_id: None,
                created_at: Utc::now(),
            }))
        }
    }

    fn service(subscriptions: FakeSubscriptions) -> ExchangeService<FakeSubscriptions> {
        ExchangeService::new(subscriptions, ResponderRegistry::default())
    }

    fn request(message: &str, model: &str, user_id: &str) -> ExchangeRequest {
        ExchangeRequest {
            message: message.to_string(),
            model: model.to_string(),
            user_id: user_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_fields_rejected() {
        let svc = service(FakeSubscriptions::with_active(&["u1"]));
        for req in [
            request("", "gpt-4", "u1"),
            request("hi", "", "u1"),
            request("hi", "gpt-4", ""),
        ] {
            let err = svc.handle(&req).await.unwrap_err();
            assert!(matches!(err, ExchangeError::MissingFields), "{req:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_premium_denied_without_subscription() {
        let svc = service(FakeSubscriptions::with_active(&[]));
        for model in ["gpt-4", "claude-3"] {
            let err = svc.handle(&request("hi", model, "u1")).await.unwrap_err();
            assert!(matches!(err, ExchangeError::EntitlementDenied), "{model}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_premium_allowed_with_subscription() {
        let svc = service(FakeSubscriptions::with_active(&["u1"]));
        let reply = svc.handle(&request("hi", "gpt-4", "u1")).await.unwrap();
        assert!(reply.starts_with("[GPT-4]"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_free_model_skips_entitlement_store() {
        // A failing store does not matter for non-premium models.
        let svc = service(FakeSubscriptions::failing());
        let reply = svc.handle(&request("hi", "olmo-2", "u1")).await.unwrap();
        assert!(reply.starts_with("[OLMo]"));
    }

    #[tokio::test]
    async fn test_unknown_model_gets_fallback_reply() {
        let svc = service(FakeSubscriptions::with_active(&[]));
        let reply = svc.handle(&request("hi", "llama-9", "u1")).await.unwrap();
        assert_eq!(reply, "I'm not sure how to respond to that.");
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_repository_error() {
        let svc = service(FakeSubscriptions::failing());
        let err = svc.handle(&request("hi", "gpt-4", "u1")).await.unwrap_err();
        assert!(matches!(err, ExchangeError::Repository(_)));
    }
}
