//! Entitlement check: may this user invoke this model?
//!
//! Premium models require exactly one active subscription row for the
//! user. Non-premium models -- including ids not present in the catalog
//! at all -- are always allowed; the subscription store is not consulted
//! for them.
//!
//! A failed subscription query is distinct from a confirmed absence of a
//! subscription: `Ok(false)` means "no active subscription", `Err` means
//! "could not verify".

use polychat_types::error::RepositoryError;
use polychat_types::model;
use polychat_types::subscription::Subscription;

/// Repository trait for subscription lookups.
///
/// Implementations live in polychat-infra (e.g., `SqliteSubscriptionRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait SubscriptionRepository: Send + Sync {
    /// Find the user's active subscription.
    ///
    /// Returns `Ok(None)` when no active row exists. More than one active
    /// row is a data anomaly and must surface as an error, not as
    /// entitlement either way.
    fn find_active(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Subscription>, RepositoryError>> + Send;
}

/// Decides model access from the catalog's premium flags and the
/// subscription store.
pub struct EntitlementChecker<S: SubscriptionRepository> {
    subscriptions: S,
}

impl<S: SubscriptionRepository> EntitlementChecker<S> {
    pub fn new(subscriptions: S) -> Self {
        Self { subscriptions }
    }

    /// Whether `user_id` may invoke `model_id`.
    ///
    /// One read against the subscription store for premium ids; no reads
    /// otherwise. No writes ever.
    pub async fn is_allowed(
        &self,
        user_id: &str,
        model_id: &str,
    ) -> Result<bool, RepositoryError> {
        if !model::is_premium(model_id) {
            return Ok(true);
        }

        let subscription = self.subscriptions.find_active(user_id).await?;
        Ok(subscription.is_some())
    }
}
