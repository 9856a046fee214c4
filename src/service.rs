//! Ledger service: the stateful edge around the pure ledger core.
//!
//! Every write for a user runs under that user's async mutex and decides on
//! a snapshot fetched after the lock is taken, so two settlements for the
//! same user cannot both spend the same hours. Locks exist only for known
//! users and only while someone holds or waits on them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use chrono::{NaiveDate, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{
    LedgerSummary, RequestDraft, ReviewDecision, SettlementAction, SettlementCandidate,
    SettlementCommand, SettlementOutcome, authorize, balance_for, ensure_admin, entries_on,
    new_request, new_roster_entry, resolve_cycle, review, settlement_candidates, summarize,
};
use crate::models::{Balance, Record};
use crate::store::{Authorizer, LedgerStore};

type UserLocks = StdMutex<HashMap<String, Arc<Mutex<()>>>>;

/// Coordinates the store, the authorizer and the ledger core.
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    authorizer: Arc<dyn Authorizer>,
    user_locks: UserLocks,
}

/// Holds one user's write lock. Dropping it removes the map entry once no
/// other task holds or waits on the same lock.
struct UserGuard<'a> {
    locks: &'a UserLocks,
    user_id: String,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserGuard<'_> {
    fn drop(&mut self) {
        drop(self.held.take());
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // The map's own handle is the last one.
        if locks
            .get(&self.user_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.user_id);
        }
    }
}

impl LedgerService {
    /// Creates a service over the given collaborators.
    pub fn new(store: Arc<dyn LedgerStore>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            store,
            authorizer,
            user_locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Takes the write lock of a user already known to exist.
    async fn lock_user(&self, user_id: &str) -> UserGuard<'_> {
        let mut guard = UserGuard {
            locks: &self.user_locks,
            user_id: user_id.to_string(),
            held: None,
        };
        let lock = {
            let mut locks = self.user_locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(user_id.to_string()).or_default())
        };
        guard.held = Some(lock.lock_owned().await);
        guard
    }

    /// Fails with `UserNotFound` before any lock is created for `user_id`.
    async fn ensure_user_exists(&self, user_id: &str) -> LedgerResult<()> {
        self.store.load_all().await?.user(user_id).map(|_| ())
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.user_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Replays a user's balance for the cycle in effect on `as_of`.
    pub async fn balance(&self, user_id: &str, as_of: NaiveDate) -> LedgerResult<Balance> {
        let snapshot = self.store.load_all().await?;
        let user = snapshot.user(user_id)?;
        let balance = balance_for(user, &snapshot.records, as_of);

        if !balance.warnings.is_empty() {
            warn!(
                user_id = %user_id,
                warnings = balance.warnings.len(),
                "Balance computed with warnings"
            );
        }
        debug!(
            user_id = %user_id,
            annual_left = %balance.annual_left,
            comp_left = %balance.comp_left,
            "Balance computed"
        );
        Ok(balance)
    }

    /// Files a leave or overtime request as `actor_id` for `target_id`.
    pub async fn submit_request(
        &self,
        actor_id: &str,
        target_id: &str,
        draft: RequestDraft,
    ) -> LedgerResult<Record> {
        self.ensure_user_exists(target_id).await?;
        let _guard = self.lock_user(target_id).await;
        let snapshot = self.store.load_all().await?;
        let actor = snapshot.user(actor_id)?;
        let target = snapshot.user(target_id)?;

        let record = new_request(actor, target, draft, Utc::now())?;
        self.store.append_record(record.clone()).await?;

        info!(
            user_id = %record.user_id,
            record_id = %record.id,
            category = %record.category,
            amount = %record.amount,
            "Request submitted"
        );
        Ok(record)
    }

    /// Puts `target_id` on duty for `date`. Admin only.
    pub async fn add_roster(
        &self,
        actor_id: &str,
        target_id: &str,
        date: NaiveDate,
        note: &str,
    ) -> LedgerResult<Record> {
        self.ensure_user_exists(target_id).await?;
        let _guard = self.lock_user(target_id).await;
        let snapshot = self.store.load_all().await?;
        let actor = snapshot.user(actor_id)?;
        let target = snapshot.user(target_id)?;

        let record = new_roster_entry(actor, target, date, note, Utc::now())?;
        self.store.append_record(record.clone()).await?;

        info!(user_id = %record.user_id, record_id = %record.id, date = %date, "Roster duty added");
        Ok(record)
    }

    /// Approves or rejects a pending record. Admin only.
    ///
    /// Returns the record with its new status.
    pub async fn review(
        &self,
        actor_id: &str,
        record_id: &str,
        decision: ReviewDecision,
    ) -> LedgerResult<Record> {
        let owner_id = self.store.load_all().await?.record(record_id)?.user_id.clone();
        let _guard = self.lock_user(&owner_id).await;

        let snapshot = self.store.load_all().await?;
        let actor = snapshot.user(actor_id)?;
        let mut record = snapshot.record(record_id)?.clone();

        let status = review(&record, actor, decision)?;
        self.store.set_status(record_id, status).await?;
        record.status = status;

        info!(
            user_id = %record.user_id,
            record_id = %record.id,
            status = %status,
            reviewer = %actor_id,
            "Record reviewed"
        );
        Ok(record)
    }

    /// Settles hours at the end of the cycle in effect on `today`. Admin only.
    ///
    /// Deferral additionally needs `secret` to pass the authorizer. The
    /// requested hours are checked against a balance replayed under the
    /// user's lock, before the settlement itself is priced.
    ///
    /// # Errors
    ///
    /// - `NotPermitted` if the actor is not an admin
    /// - `AuthorizationFailed` for a deferral without a valid secret
    /// - `InvalidAmount`, `MissingHireDate` as refused by the ledger
    /// - `InsufficientBalance` if the bucket holds fewer hours
    /// - `PersistenceUnavailable` from the store; nothing was written
    pub async fn settle(
        &self,
        actor_id: &str,
        command: &SettlementCommand,
        secret: Option<&str>,
        today: NaiveDate,
    ) -> LedgerResult<SettlementOutcome> {
        self.ensure_user_exists(&command.user_id).await?;
        let _guard = self.lock_user(&command.user_id).await;
        let snapshot = self.store.load_all().await?;
        let actor = snapshot.user(actor_id)?;
        ensure_admin(actor, "settle hours")?;
        let user = snapshot.user(&command.user_id)?;

        let grant = match (command.action, secret) {
            (SettlementAction::Defer, Some(secret)) => {
                Some(authorize(self.authorizer.as_ref(), secret).await?)
            }
            _ => None,
        };

        let available = balance_for(user, &snapshot.records, today).left(command.bucket);
        if command.amount > available {
            warn!(
                user_id = %user.id,
                bucket = %command.bucket,
                requested = %command.amount,
                available = %available,
                "Settlement exceeds balance"
            );
            return Err(LedgerError::InsufficientBalance {
                bucket: command.bucket,
                requested: command.amount,
                available,
            });
        }

        let cycle = resolve_cycle(user.hire_date, today);
        let outcome = command.execute(user, &cycle, grant.as_ref(), Utc::now())?;
        self.store.append_record(outcome.record.clone()).await?;

        info!(
            user_id = %user.id,
            record_id = %outcome.record.id,
            action = ?command.action,
            bucket = %command.bucket,
            amount = %command.amount,
            cash_value = ?outcome.cash_value,
            "Settlement recorded"
        );
        Ok(outcome)
    }

    /// Checks that `user_id` is an admin holding the admin secret.
    pub async fn verify_admin(&self, user_id: &str, secret: &str) -> LedgerResult<()> {
        let snapshot = self.store.load_all().await?;
        ensure_admin(snapshot.user(user_id)?, "open the admin area")?;
        authorize(self.authorizer.as_ref(), secret).await.map(|_| ())
    }

    /// Ledger-wide totals on `today`.
    pub async fn summary(&self, today: NaiveDate) -> LedgerResult<LedgerSummary> {
        let snapshot = self.store.load_all().await?;
        Ok(summarize(&snapshot, today))
    }

    /// Members and the settlements open to them on `today`.
    pub async fn settlement_candidates(
        &self,
        today: NaiveDate,
    ) -> LedgerResult<Vec<SettlementCandidate>> {
        let snapshot = self.store.load_all().await?;
        Ok(settlement_candidates(&snapshot, today))
    }

    /// Calendar entries for one day.
    pub async fn calendar(&self, date: NaiveDate) -> LedgerResult<Vec<Record>> {
        let snapshot = self.store.load_all().await?;
        Ok(entries_on(&snapshot.records, date).into_iter().cloned().collect())
    }
}
