//! In-memory owner of the user-created collection.
//!
//! The repository never touches storage itself. Every mutation returns a
//! [`PersistIntent`] and the reducer turns it into a store effect, so the
//! store has exactly one writer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::CustomPokemon;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RepositoryPhase {
    #[default]
    Uninitialized,
    Loaded,
}

/// What the store should do after a mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PersistIntent {
    Save(Vec<CustomPokemon>),
    Clear,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonRepository {
    phase: RepositoryPhase,
    records: Vec<CustomPokemon>,
}

impl PokemonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RepositoryPhase {
        self.phase
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == RepositoryPhase::Loaded
    }

    /// Populates the collection from storage. Only the first call has any
    /// effect; records added before it are kept after the stored ones.
    pub fn finish_loading(&mut self, stored: Vec<CustomPokemon>) -> Option<PersistIntent> {
        if self.is_loaded() {
            return None;
        }
        let pending = std::mem::replace(&mut self.records, stored);
        self.records.extend(pending);
        self.phase = RepositoryPhase::Loaded;
        Some(self.intent())
    }

    /// Appends without checking for duplicates.
    pub fn add(&mut self, record: CustomPokemon) -> Option<PersistIntent> {
        self.records.push(record);
        if self.is_loaded() {
            Some(self.intent())
        } else {
            None
        }
    }

    pub fn records(&self) -> &[CustomPokemon] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_id(&self, id: u32) -> Option<&CustomPokemon> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.records
            .iter()
            .any(|record| record.name.to_lowercase() == needle)
    }

    fn intent(&self) -> PersistIntent {
        if self.records.is_empty() {
            PersistIntent::Clear
        } else {
            PersistIntent::Save(self.records.clone())
        }
    }
}
