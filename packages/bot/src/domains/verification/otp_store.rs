use chrono::{DateTime, Duration, Utc};
use serenity::all::UserId;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A passcode waiting to be entered by one user
#[derive(Debug, Clone)]
pub struct PendingOtp {
    pub code: String,
    pub issued_at: DateTime<Utc>,
}

/// In-memory pending-passcode store
///
/// At most one pending code per user: issuing again overwrites, so only the
/// latest code is ever valid. Entries expire after the configured TTL;
/// `validate` checks age itself, so an expired code is rejected even before
/// the next sweep runs.
///
/// Owned by `BotDeps` and shared across flows; the map is guarded by an
/// async RwLock so concurrent flows for different users never interfere.
pub struct OtpStore {
    pending: RwLock<HashMap<UserId, PendingOtp>>,
    ttl: Duration,
}

impl OtpStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            pending: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Issue a fresh 6-digit passcode for a user, replacing any prior one.
    ///
    /// Delivery is the caller's job; this only records the code.
    pub async fn issue(&self, user_id: UserId) -> String {
        let code = fastrand::u32(100_000..=999_999).to_string();
        let mut pending = self.pending.write().await;
        pending.insert(
            user_id,
            PendingOtp {
                code: code.clone(),
                issued_at: Utc::now(),
            },
        );
        code
    }

    /// Check a submitted passcode against the pending one.
    ///
    /// Exact string comparison, no trimming or normalization. Returns false
    /// when no code is pending or the pending code has outlived the TTL.
    /// Does not remove the entry; callers follow a success with `clear`.
    pub async fn validate(&self, user_id: UserId, submitted: &str) -> bool {
        let pending = self.pending.read().await;
        match pending.get(&user_id) {
            Some(otp) if Utc::now().signed_duration_since(otp.issued_at) < self.ttl => {
                otp.code == submitted
            }
            _ => false,
        }
    }

    /// Remove any pending code for a user; no-op if none exists.
    pub async fn clear(&self, user_id: UserId) {
        self.pending.write().await.remove(&user_id);
    }

    /// Remove entries older than the TTL, returning how many were removed.
    pub async fn sweep(&self) -> usize {
        let mut pending = self.pending.write().await;
        let now = Utc::now();
        let before = pending.len();
        pending.retain(|_, otp| now.signed_duration_since(otp.issued_at) < self.ttl);
        before - pending.len()
    }

    #[cfg(test)]
    async fn insert_at(&self, user_id: UserId, code: &str, issued_at: DateTime<Utc>) {
        self.pending.write().await.insert(
            user_id,
            PendingOtp {
                code: code.to_string(),
                issued_at,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> OtpStore {
        OtpStore::new(Duration::minutes(5))
    }

    #[tokio::test]
    async fn test_validate_without_pending_code() {
        let store = store();
        assert!(!store.validate(UserId::new(1), "123456").await);
    }

    #[tokio::test]
    async fn test_issue_validate_clear_cycle() {
        let store = store();
        let user = UserId::new(1);

        let code = store.issue(user).await;
        assert!(store.validate(user, &code).await);

        store.clear(user).await;
        assert!(!store.validate(user, &code).await);
    }

    #[tokio::test]
    async fn test_codes_are_six_digit_decimal() {
        let store = store();
        for i in 0..50 {
            let code = store.issue(UserId::new(i + 1)).await;
            let value: u32 = code.parse().expect("code should be numeric");
            assert!((100_000..=999_999).contains(&value), "got {code}");
        }
    }

    #[tokio::test]
    async fn test_reissue_invalidates_previous_code() {
        let store = store();
        let user = UserId::new(1);

        let first = store.issue(user).await;
        let second = store.issue(user).await;

        assert!(store.validate(user, &second).await);
        if first != second {
            assert!(!store.validate(user, &first).await);
        }
    }

    #[tokio::test]
    async fn test_comparison_is_exact() {
        let store = store();
        let user = UserId::new(1);
        let code = store.issue(user).await;

        assert!(!store.validate(user, &format!(" {code}")).await);
        assert!(!store.validate(user, &format!("{code}\n")).await);
    }

    #[tokio::test]
    async fn test_users_do_not_interfere() {
        let store = store();
        let alice = UserId::new(1);
        let bob = UserId::new(2);

        let alice_code = store.issue(alice).await;
        let bob_code = store.issue(bob).await;

        assert!(!store.validate(alice, &bob_code).await || alice_code == bob_code);
        assert!(store.validate(alice, &alice_code).await);

        store.clear(alice).await;
        assert!(store.validate(bob, &bob_code).await);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = store();
        let user = UserId::new(1);
        store.clear(user).await;
        store.clear(user).await;
        assert!(!store.validate(user, "123456").await);
    }

    #[tokio::test]
    async fn test_expired_code_fails_validate_before_sweep() {
        let store = store();
        let user = UserId::new(1);
        store
            .insert_at(user, "482913", Utc::now() - Duration::minutes(6))
            .await;

        assert!(!store.validate(user, "482913").await);
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired_entries() {
        let store = store();
        let stale = UserId::new(1);
        let fresh = UserId::new(2);

        store
            .insert_at(stale, "111111", Utc::now() - Duration::minutes(10))
            .await;
        store.insert_at(fresh, "222222", Utc::now()).await;

        let removed = store.sweep().await;
        assert_eq!(removed, 1);
        assert!(!store.validate(stale, "111111").await);
        assert!(store.validate(fresh, "222222").await);
    }

    #[tokio::test]
    async fn test_sweep_on_empty_store() {
        let store = store();
        assert_eq!(store.sweep().await, 0);
    }
}
