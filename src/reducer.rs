//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::form::{FormField, PokemonForm};
use crate::repository::PersistIntent;
use crate::route::Route;
use crate::state::{
    AppState, SearchFocus, StatusMessage, MIN_QUERY_CHARS, MSG_COLLECTION_LOADING, MSG_CREATED,
    MSG_QUERY_TOO_SHORT, MSG_SEARCH_FAILED,
};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => DispatchResult::changed_with(Effect::LoadCollection),

        // ===== Collection =====
        Action::CollectionDidLoad(records) => {
            let effects = persist(state.repository.finish_loading(records));
            clamp_selection(state);
            DispatchResult::changed_with_many(effects)
        }

        Action::CollectionDidSave => DispatchResult::unchanged(),

        Action::CollectionDidError(error) => {
            state.notify(StatusMessage::error(error));
            DispatchResult::changed()
        }

        // ===== Search =====
        Action::SearchQueryChange(text) => {
            let query = text.trim().to_string();
            state.search.input = text;
            query_changed(state, query, false)
        }

        Action::SearchQuerySubmit(text) => {
            let query = text.trim().to_string();
            // Enter on an empty box only drops the pending search.
            if query.is_empty() {
                return DispatchResult::effect(Effect::CancelSearch);
            }
            state.search.input.clear();
            query_changed(state, query, true)
        }

        Action::SearchDidLoad { results, .. } => {
            state.search.api_results.extend(results);
            state.search.loading = false;
            clamp_selection(state);
            DispatchResult::changed()
        }

        Action::SearchDidMiss { query } => {
            state.search.api_results.clear();
            state.search.not_found = Some(query);
            state.search.loading = false;
            clamp_selection(state);
            DispatchResult::changed()
        }

        Action::SearchDidError { .. } => {
            state.search.error = Some(MSG_SEARCH_FAILED.to_string());
            state.search.loading = false;
            DispatchResult::changed()
        }

        Action::SearchFocusToggle => {
            let next = state.search.focus.toggle();
            if next == SearchFocus::Results && state.merged_len() == 0 {
                return DispatchResult::unchanged();
            }
            state.search.focus = next;
            DispatchResult::changed()
        }

        Action::SearchSelect(index) => {
            if index < state.merged_len() && index != state.search.selected {
                state.search.selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SearchOpen => {
            let Some(record) = state.selected_record() else {
                return DispatchResult::unchanged();
            };
            state.route = Route::for_record(&record);
            DispatchResult::changed()
        }

        // ===== Navigation =====
        Action::NavigateTo(route) => {
            if route == Route::NewPokemon {
                state.form = PokemonForm::default();
            } else if route == state.route {
                return DispatchResult::unchanged();
            }
            state.route = route;
            DispatchResult::changed()
        }

        Action::NavigateBack => {
            if state.route == Route::Search {
                return DispatchResult::unchanged();
            }
            state.route = Route::Search;
            DispatchResult::changed()
        }

        // ===== Form =====
        Action::FormIdChange(value) => form_text(state, FormField::Id, value),
        Action::FormNameChange(value) => form_text(state, FormField::Name, value),
        Action::FormImageChange(value) => form_text(state, FormField::Image, value),

        Action::FormFocus(field) => {
            if state.form.focus == field {
                return DispatchResult::unchanged();
            }
            state.form.focus = field;
            DispatchResult::changed()
        }

        Action::FormFocusNext => {
            state.form.focus = state.form.focus.next();
            DispatchResult::changed()
        }

        Action::FormFocusPrev => {
            state.form.focus = state.form.focus.prev();
            DispatchResult::changed()
        }

        Action::FormTypeCycle { field, delta } => {
            if state.form.cycle_type(field, delta) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // Duplicate checks need the stored collection.
        Action::FormSubmit if !state.repository.is_loaded() => {
            state.notify(StatusMessage::error(MSG_COLLECTION_LOADING));
            DispatchResult::changed()
        }

        Action::FormSubmit => match state.form.submit(&state.repository) {
            Ok(record) => {
                let effects = persist(state.repository.add(record));
                state.form = PokemonForm::default();
                state.route = Route::Search;
                state.notify(StatusMessage::info(MSG_CREATED));
                clamp_selection(state);
                DispatchResult::changed_with_many(effects)
            }
            Err(errors) => {
                if let Some(field) = errors.first_field() {
                    state.form.focus = field;
                }
                state.form.errors = errors;
                DispatchResult::changed()
            }
        },

        // ===== UI =====
        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global =====
        Action::Tick => {
            state.tick = state.tick.wrapping_add(1);
            let had_message = state.message.is_some();
            if let Some(message) = state.message.as_mut() {
                message.ticks_remaining = message.ticks_remaining.saturating_sub(1);
                if message.ticks_remaining == 0 {
                    state.message = None;
                }
            }
            if state.search.loading || had_message {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn query_changed(state: &mut AppState, query: String, immediate: bool) -> DispatchResult<Effect> {
    let search = &mut state.search;
    search.selected = 0;

    if query.is_empty() {
        search.query = query;
        search.error = None;
        search.not_found = None;
        search.api_results.clear();
        search.loading = false;
        return DispatchResult::changed_with(Effect::CancelSearch);
    }

    if query.chars().count() < MIN_QUERY_CHARS {
        search.query = query;
        search.error = Some(MSG_QUERY_TOO_SHORT.to_string());
        search.loading = false;
        return DispatchResult::changed_with(Effect::CancelSearch);
    }

    search.query = query.clone();
    search.error = None;
    search.not_found = None;
    search.loading = true;
    DispatchResult::changed_with(Effect::SearchCatalog { query, immediate })
}

fn form_text(state: &mut AppState, field: FormField, value: String) -> DispatchResult<Effect> {
    if state.form.set_text(field, value) {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}

fn persist(intent: Option<PersistIntent>) -> Vec<Effect> {
    match intent {
        Some(PersistIntent::Save(records)) => vec![Effect::SaveCollection { records }],
        Some(PersistIntent::Clear) => vec![Effect::ClearCollection],
        None => Vec::new(),
    }
}

fn clamp_selection(state: &mut AppState) {
    let len = state.merged_len();
    if len == 0 {
        state.search.selected = 0;
        state.search.focus = SearchFocus::Input;
    } else if state.search.selected >= len {
        state.search.selected = len - 1;
    }
}
