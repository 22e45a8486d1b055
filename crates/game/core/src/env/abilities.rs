//! Ability definition oracle.

use crate::ability::{Ability, AbilityId};

/// Read-only lookup from ability id to its immutable definition.
///
/// Implemented by the content crate's catalog. Returning `None` means the id
/// is unknown to the catalog, which the engine reports as an error rather
/// than a rejection.
pub trait AbilityOracle: Send + Sync {
    fn ability(&self, id: AbilityId) -> Option<&Ability>;
}
