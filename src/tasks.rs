//! Effect handling: each effect becomes a keyed task on the task manager.
//!
//! Tasks that share a key replace each other, so a newer search drops the
//! pending one and a newer write supersedes the previous write.

use std::sync::Arc;
use std::time::Duration;

use tui_dispatch::{TaskKey, TaskManager};

use crate::action::Action;
use crate::api::{search_by_prefix, CatalogSource, SearchOutcome};
use crate::effect::Effect;
use crate::store::{LocalStore, StorageSlot};

pub const SEARCH_TASK: &str = "catalog_search";
pub const LOAD_TASK: &str = "collection_load";
pub const WRITE_TASK: &str = "collection_write";

/// Long-lived adapters shared by spawned tasks.
pub struct Services<S> {
    pub store: LocalStore<S>,
    pub catalog: Arc<dyn CatalogSource>,
    pub debounce: Duration,
}

impl<S: StorageSlot> Services<S> {
    pub fn new(slot: S, catalog: Arc<dyn CatalogSource>, debounce: Duration) -> Self {
        Self {
            store: LocalStore::new(slot),
            catalog,
            debounce,
        }
    }
}

fn write_failed(error: impl std::fmt::Display) -> Action {
    Action::CollectionDidError(format!("No se pudo guardar: {error}"))
}

pub fn handle_effect<S>(
    effect: Effect,
    tasks: &mut TaskManager<Action>,
    services: Arc<Services<S>>,
) where
    S: StorageSlot + 'static,
{
    match effect {
        Effect::LoadCollection => {
            tracing::debug!("loading stored collection");
            tasks.spawn(LOAD_TASK, async move {
                Action::CollectionDidLoad(services.store.load().await)
            });
        }
        Effect::SaveCollection { records } => {
            tracing::debug!(count = records.len(), "saving collection");
            tasks.spawn(WRITE_TASK, async move {
                match services.store.save(&records).await {
                    Ok(()) => Action::CollectionDidSave,
                    Err(error) => {
                        tracing::error!(%error, "failed to save collection");
                        write_failed(error)
                    }
                }
            });
        }
        Effect::ClearCollection => {
            tracing::debug!("clearing stored collection");
            tasks.spawn(WRITE_TASK, async move {
                match services.store.clear().await {
                    Ok(()) => Action::CollectionDidSave,
                    Err(error) => {
                        tracing::error!(%error, "failed to clear collection");
                        write_failed(error)
                    }
                }
            });
        }
        Effect::SearchCatalog { query, immediate } => {
            tracing::debug!(%query, immediate, "catalog search scheduled");
            let debounce = services.debounce;
            let search = async move {
                match search_by_prefix(services.catalog.as_ref(), &query).await {
                    Ok(SearchOutcome::Found(results)) => Action::SearchDidLoad { query, results },
                    Ok(SearchOutcome::NotFound) => Action::SearchDidMiss { query },
                    Err(error) => Action::SearchDidError {
                        query,
                        error: error.to_string(),
                    },
                }
            };
            if immediate {
                tasks.spawn(SEARCH_TASK, search);
            } else {
                tasks.debounce(SEARCH_TASK, debounce, search);
            }
        }
        Effect::CancelSearch => {
            tasks.cancel(&TaskKey::new(SEARCH_TASK));
        }
    }
}
