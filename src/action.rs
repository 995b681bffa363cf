//! Actions: intents from the UI and results from background tasks

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::form::FormField;
use crate::model::{ApiPokemon, CustomPokemon};
use crate::route::Route;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: load the stored collection.
    Init,

    // ===== Collection =====
    CollectionDidLoad(Vec<CustomPokemon>),
    CollectionDidSave,
    CollectionDidError(String),

    // ===== Search =====
    SearchQueryChange(String),
    /// Explicit submit: fetch now and clear the input box.
    SearchQuerySubmit(String),
    SearchDidLoad {
        query: String,
        results: Vec<ApiPokemon>,
    },
    SearchDidMiss {
        query: String,
    },
    SearchDidError {
        query: String,
        error: String,
    },
    SearchFocusToggle,
    SearchSelect(usize),
    /// Open the detail view for the selected card.
    SearchOpen,

    // ===== Navigation =====
    NavigateTo(Route),
    NavigateBack,

    // ===== Form =====
    FormIdChange(String),
    FormNameChange(String),
    FormImageChange(String),
    FormFocus(FormField),
    FormFocusNext,
    FormFocusPrev,
    FormTypeCycle { field: FormField, delta: i8 },
    FormSubmit,

    // ===== UI =====
    UiTerminalResize(u16, u16),
    Render,

    // ===== Global =====
    Tick,
    Quit,
}
