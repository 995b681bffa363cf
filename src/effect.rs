//! Effects - side effects declared by the reducer

use crate::model::CustomPokemon;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Read the stored collection.
    LoadCollection,
    /// Overwrite the stored collection.
    SaveCollection { records: Vec<CustomPokemon> },
    /// Remove the storage slot.
    ClearCollection,
    /// Run a catalog prefix search. Debounced unless `immediate`; either way
    /// it replaces any pending search.
    SearchCatalog { query: String, immediate: bool },
    /// Drop any pending or in-flight catalog search.
    CancelSearch,
}
