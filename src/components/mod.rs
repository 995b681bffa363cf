pub mod detail_view;
pub mod footer;
pub mod nav_bar;
pub mod pokemon_form;
pub mod pokemon_list;
pub mod search_view;
pub mod theme;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_view::{DetailView, DetailViewProps};
pub use footer::{Footer, FooterProps};
pub use nav_bar::{NavBar, NavBarProps};
pub use pokemon_form::{PokemonFormView, PokemonFormViewProps};
pub use pokemon_list::{card_line, PokemonList, PokemonListProps};
pub use search_view::{SearchView, SearchViewProps};
