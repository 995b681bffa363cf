//! Pokédex TUI: catalog search merged with a locally stored collection of
//! user-created Pokémon.
//!
//! The library holds everything but the terminal loop so that the reducer,
//! the views and the storage/catalog adapters can be tested directly.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod detail;
pub mod effect;
pub mod form;
pub mod logging;
pub mod model;
pub mod reducer;
pub mod repository;
pub mod route;
pub mod state;
pub mod store;
pub mod tasks;
