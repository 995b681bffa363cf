//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::form::PokemonForm;
use crate::model::{ApiPokemon, PokemonRecord};
use crate::repository::PokemonRepository;
use crate::route::Route;

/// Subscription interval driving the spinner and message expiry.
pub const TICK_MS: u64 = 100;
/// How long a footer message stays up, in ticks.
pub const MESSAGE_TICKS: u16 = 30;
/// Queries shorter than this never reach the catalog.
pub const MIN_QUERY_CHARS: usize = 3;

pub const MSG_QUERY_TOO_SHORT: &str = "Escribe al menos 3 caracteres";
pub const MSG_SEARCH_FAILED: &str = "Error al buscar Pokémon";
pub const MSG_CREATED: &str = "¡Pokémon creado exitosamente!";
pub const MSG_COLLECTION_LOADING: &str = "Cargando tus Pokémon, intenta de nuevo";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SearchFocus {
    #[default]
    Input,
    Results,
}

impl SearchFocus {
    pub fn toggle(&self) -> Self {
        match self {
            SearchFocus::Input => SearchFocus::Results,
            SearchFocus::Results => SearchFocus::Input,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    /// Text in the input box.
    pub input: String,
    /// Trimmed text the last search (or pending search) is for.
    pub query: String,
    /// Accumulated catalog results, oldest batch first.
    pub api_results: Vec<ApiPokemon>,
    pub loading: bool,
    pub error: Option<String>,
    /// Query that matched nothing in the catalog index.
    pub not_found: Option<String>,
    pub selected: usize,
    pub focus: SearchFocus,
}

/// What the status line under the search box shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Error(String),
    Count(usize),
    NotFound(String),
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub ticks_remaining: u16,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
            ticks_remaining: MESSAGE_TICKS,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::info(text)
        }
    }
}

#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Navigation", label = "Route", debug_fmt)]
    pub route: Route,

    #[debug(section = "Collection", label = "Repository", debug_fmt)]
    pub repository: PokemonRepository,

    #[debug(section = "Search", label = "State", debug_fmt)]
    pub search: SearchState,

    #[debug(section = "Form", label = "Fields", debug_fmt)]
    pub form: PokemonForm,

    #[debug(section = "Ui", label = "Message", debug_fmt)]
    pub message: Option<StatusMessage>,

    #[debug(skip)]
    pub tick: u64,

    #[debug(skip)]
    pub terminal_size: (u16, u16),
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Route::default())
    }
}

impl AppState {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            repository: PokemonRepository::new(),
            search: SearchState::default(),
            form: PokemonForm::default(),
            message: None,
            tick: 0,
            terminal_size: (80, 24),
        }
    }

    /// Catalog results followed by the user-created collection.
    pub fn merged_records(&self) -> Vec<PokemonRecord> {
        self.search
            .api_results
            .iter()
            .cloned()
            .map(PokemonRecord::from)
            .chain(
                self.repository
                    .records()
                    .iter()
                    .cloned()
                    .map(PokemonRecord::from),
            )
            .collect()
    }

    pub fn merged_len(&self) -> usize {
        self.search.api_results.len() + self.repository.len()
    }

    pub fn selected_record(&self) -> Option<PokemonRecord> {
        let index = self.search.selected;
        let api_len = self.search.api_results.len();
        if index < api_len {
            return self
                .search
                .api_results
                .get(index)
                .cloned()
                .map(PokemonRecord::from);
        }
        self.repository
            .records()
            .get(index - api_len)
            .cloned()
            .map(PokemonRecord::from)
    }

    pub fn search_status(&self) -> SearchStatus {
        let search = &self.search;
        if search.loading {
            return SearchStatus::Loading;
        }
        if let Some(error) = &search.error {
            return SearchStatus::Error(error.clone());
        }
        let total = self.merged_len();
        if total > 0 {
            return SearchStatus::Count(total);
        }
        if let Some(query) = &search.not_found {
            return SearchStatus::NotFound(query.clone());
        }
        if search.query.chars().count() >= MIN_QUERY_CHARS {
            SearchStatus::Empty
        } else {
            SearchStatus::Idle
        }
    }

    pub fn notify(&mut self, message: StatusMessage) {
        self.message = Some(message);
    }
}
