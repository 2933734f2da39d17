//! In-memory store
//!
//! Backing implementation for development and tests. All records live in
//! per-user maps behind a single RwLock.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::domain::{
    Budget, BudgetChanges, NewBudget, NewTransaction, ProfileUpdate, Transaction,
    TransactionChanges, UserProfile,
};

use super::{Store, StoreError};

#[derive(Debug, Default)]
struct Records {
    transactions: HashMap<Uuid, Vec<Transaction>>,
    budgets: HashMap<Uuid, Vec<Budget>>,
    profiles: HashMap<Uuid, UserProfile>,
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Records> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Records> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Store for MemoryStore {
    fn transactions(&self, user_id: Uuid) -> Vec<Transaction> {
        self.read()
            .transactions
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    fn insert_transaction(&self, user_id: Uuid, new: NewTransaction) -> Transaction {
        let now = Utc::now();
        let transaction = Transaction {
            id: Uuid::new_v4(),
            user_id,
            amount: new.amount,
            category: new.category,
            kind: new.kind,
            date: new.date,
            description: new.description,
            merchant: new.merchant,
            payment_method: new.payment_method,
            created_at: now,
            updated_at: now,
        };
        self.write()
            .transactions
            .entry(user_id)
            .or_default()
            .push(transaction.clone());
        transaction
    }

    fn update_transaction(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: TransactionChanges,
    ) -> Result<Transaction, StoreError> {
        let mut records = self.write();
        let transaction = records
            .transactions
            .get_mut(&user_id)
            .and_then(|list| list.iter_mut().find(|tx| tx.id == id))
            .ok_or(StoreError::NotFound {
                entity: "Transaction",
                id,
            })?;
        transaction.apply(changes);
        Ok(transaction.clone())
    }

    fn delete_transaction(&self, user_id: Uuid, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.write();
        let list = records.transactions.entry(user_id).or_default();
        let before = list.len();
        list.retain(|tx| tx.id != id);
        if list.len() == before {
            return Err(StoreError::NotFound {
                entity: "Transaction",
                id,
            });
        }
        Ok(())
    }

    fn budgets(&self, user_id: Uuid) -> Vec<Budget> {
        self.read().budgets.get(&user_id).cloned().unwrap_or_default()
    }

    fn insert_budget(&self, user_id: Uuid, new: NewBudget) -> Budget {
        let now = Utc::now();
        let budget = Budget {
            id: Uuid::new_v4(),
            user_id,
            category: new.category,
            amount: new.amount,
            period: new.period,
            alert_threshold: new.alert_threshold,
            start_date: new.start_date,
            end_date: new.end_date,
            created_at: now,
            updated_at: now,
        };
        self.write()
            .budgets
            .entry(user_id)
            .or_default()
            .push(budget.clone());
        budget
    }

    fn update_budget(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: BudgetChanges,
    ) -> Result<Budget, StoreError> {
        let mut records = self.write();
        let budget = records
            .budgets
            .get_mut(&user_id)
            .and_then(|list| list.iter_mut().find(|b| b.id == id))
            .ok_or(StoreError::NotFound {
                entity: "Budget",
                id,
            })?;
        budget.apply(changes);
        Ok(budget.clone())
    }

    fn delete_budget(&self, user_id: Uuid, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.write();
        let list = records.budgets.entry(user_id).or_default();
        let before = list.len();
        list.retain(|b| b.id != id);
        if list.len() == before {
            return Err(StoreError::NotFound {
                entity: "Budget",
                id,
            });
        }
        Ok(())
    }

    fn profile(&self, user: &AuthenticatedUser) -> UserProfile {
        self.read()
            .profiles
            .get(&user.id)
            .cloned()
            .unwrap_or_else(|| UserProfile::defaults_for(user.id, &user.email))
    }

    fn update_profile(&self, user: &AuthenticatedUser, update: ProfileUpdate) -> UserProfile {
        let mut records = self.write();
        let profile = records
            .profiles
            .entry(user.id)
            .or_insert_with(|| UserProfile::defaults_for(user.id, &user.email));
        profile.apply(update);
        profile.clone()
    }

    fn delete_account(&self, user_id: Uuid) {
        let mut records = self.write();
        records.transactions.remove(&user_id);
        records.budgets.remove(&user_id);
        records.profiles.remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetPeriod, TransactionKind};
    use rust_decimal_macros::dec;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
        }
    }

    fn new_tx(amount: rust_decimal::Decimal) -> NewTransaction {
        NewTransaction {
            amount,
            category: "Groceries".to_string(),
            kind: TransactionKind::Expense,
            date: "2024-01-15".parse().unwrap(),
            description: None,
            merchant: None,
            payment_method: None,
        }
    }

    #[test]
    fn test_transaction_round_trip() {
        let store = MemoryStore::new();
        let user = user();

        let created = store.insert_transaction(user.id, new_tx(dec!(100.50)));
        let listed = store.transactions(user.id);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].amount, dec!(100.50));
    }

    #[test]
    fn test_update_transaction() {
        let store = MemoryStore::new();
        let user = user();
        let created = store.insert_transaction(user.id, new_tx(dec!(10)));

        let updated = store
            .update_transaction(
                user.id,
                created.id,
                TransactionChanges {
                    amount: Some(dec!(25)),
                    ..TransactionChanges::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, dec!(25));
        assert_eq!(updated.category, "Groceries");
    }

    #[test]
    fn test_missing_ids_report_not_found() {
        let store = MemoryStore::new();
        let user = user();
        let id = Uuid::new_v4();

        assert!(matches!(
            store.update_transaction(user.id, id, TransactionChanges::default()),
            Err(StoreError::NotFound { entity: "Transaction", .. })
        ));
        assert!(matches!(
            store.delete_budget(user.id, id),
            Err(StoreError::NotFound { entity: "Budget", .. })
        ));
    }

    #[test]
    fn test_records_are_scoped_per_user() {
        let store = MemoryStore::new();
        let alice = user();
        let bob = user();

        let tx = store.insert_transaction(alice.id, new_tx(dec!(10)));
        assert!(store.transactions(bob.id).is_empty());
        assert!(store.delete_transaction(bob.id, tx.id).is_err());
    }

    #[test]
    fn test_profile_defaults_then_persists() {
        let store = MemoryStore::new();
        let user = user();

        let profile = store.profile(&user);
        assert_eq!(profile.email, user.email);
        assert_eq!(profile.preferred_currency, "USD");

        store.update_profile(
            &user,
            ProfileUpdate {
                preferred_currency: Some("EUR".to_string()),
                ..ProfileUpdate::default()
            },
        );
        assert_eq!(store.profile(&user).preferred_currency, "EUR");
    }

    #[test]
    fn test_delete_account_purges_everything() {
        let store = MemoryStore::new();
        let user = user();

        store.insert_transaction(user.id, new_tx(dec!(10)));
        store.insert_budget(
            user.id,
            NewBudget {
                category: "Groceries".to_string(),
                amount: dec!(500),
                period: BudgetPeriod::Monthly,
                alert_threshold: 80,
                start_date: None,
                end_date: None,
            },
        );
        store.update_profile(&user, ProfileUpdate::default());

        store.delete_account(user.id);

        assert!(store.transactions(user.id).is_empty());
        assert!(store.budgets(user.id).is_empty());
        assert_eq!(store.profile(&user).preferred_currency, "USD");
    }
}
