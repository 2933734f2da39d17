//! Persistence collaborator
//!
//! The store is an external collaborator injected into handlers; calls are
//! synchronous from the handler's point of view and scoped to a single user.

mod memory;

pub use memory::MemoryStore;

use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::domain::{
    Budget, BudgetChanges, NewBudget, NewTransaction, ProfileUpdate, Transaction,
    TransactionChanges, UserProfile,
};

/// Persistence failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },
}

/// Storage operations the route handlers depend on.
///
/// Writes always target a single user's records; implementations own their
/// locking and I/O policy.
pub trait Store: Send + Sync {
    fn transactions(&self, user_id: Uuid) -> Vec<Transaction>;
    fn insert_transaction(&self, user_id: Uuid, new: NewTransaction) -> Transaction;
    fn update_transaction(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: TransactionChanges,
    ) -> Result<Transaction, StoreError>;
    fn delete_transaction(&self, user_id: Uuid, id: Uuid) -> Result<(), StoreError>;

    fn budgets(&self, user_id: Uuid) -> Vec<Budget>;
    fn insert_budget(&self, user_id: Uuid, new: NewBudget) -> Budget;
    fn update_budget(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: BudgetChanges,
    ) -> Result<Budget, StoreError>;
    fn delete_budget(&self, user_id: Uuid, id: Uuid) -> Result<(), StoreError>;

    /// Read the stored profile, or a default synthesized from the identity.
    fn profile(&self, user: &AuthenticatedUser) -> UserProfile;
    fn update_profile(&self, user: &AuthenticatedUser, update: ProfileUpdate) -> UserProfile;

    /// Remove every record belonging to the user. Idempotent.
    fn delete_account(&self, user_id: Uuid);
}
