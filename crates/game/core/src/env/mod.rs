//! Traits describing read-only battle data.
//!
//! Oracles expose ability definitions, balance tables, and the deterministic
//! RNG. The [`Env`] aggregate bundles them so the engine can access
//! everything it needs without hard coupling to concrete implementations.
mod abilities;
mod items;
mod rng;
mod tables;

pub use abilities::AbilityOracle;
pub use items::{ConsumableDefinition, ConsumableId, LootDefinition, LootId, Rarity};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use tables::{RewardParams, TablesOracle};

/// Errors raised when a required oracle was not provided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("rng oracle not available")]
    RngNotAvailable,
    #[error("ability oracle not available")]
    AbilitiesNotAvailable,
    #[error("tables oracle not available")]
    TablesNotAvailable,
}

/// Aggregates the read-only oracles required by the engine and progression.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, R, A, T>
where
    R: RngOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    T: TablesOracle + ?Sized,
{
    rng: Option<&'a R>,
    abilities: Option<&'a A>,
    tables: Option<&'a T>,
}

pub type BattleEnv<'a> =
    Env<'a, dyn RngOracle + 'a, dyn AbilityOracle + 'a, dyn TablesOracle + 'a>;

impl<'a, R, A, T> Env<'a, R, A, T>
where
    R: RngOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    T: TablesOracle + ?Sized,
{
    pub fn new(rng: Option<&'a R>, abilities: Option<&'a A>, tables: Option<&'a T>) -> Self {
        Self {
            rng,
            abilities,
            tables,
        }
    }

    pub fn with_all(rng: &'a R, abilities: &'a A, tables: &'a T) -> Self {
        Self::new(Some(rng), Some(abilities), Some(tables))
    }

    pub fn empty() -> Self {
        Self {
            rng: None,
            abilities: None,
            tables: None,
        }
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the AbilityOracle, or an error if not available.
    pub fn abilities(&self) -> Result<&'a A, OracleError> {
        self.abilities.ok_or(OracleError::AbilitiesNotAvailable)
    }

    /// Returns the TablesOracle, or an error if not available.
    pub fn tables(&self) -> Result<&'a T, OracleError> {
        self.tables.ok_or(OracleError::TablesNotAvailable)
    }
}

impl<'a, R, A, T> Env<'a, R, A, T>
where
    R: RngOracle + 'a,
    A: AbilityOracle + 'a,
    T: TablesOracle + 'a,
{
    /// Converts this environment into a trait-object based [`BattleEnv`].
    pub fn as_battle_env(&self) -> BattleEnv<'a> {
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        let abilities: Option<&'a dyn AbilityOracle> = self.abilities.map(|a| a as _);
        let tables: Option<&'a dyn TablesOracle> = self.tables.map(|t| t as _);
        Env::new(rng, abilities, tables)
    }
}
