//! The three views and their path form: `/`, `/new` and `/pokemon/:id?`
//! with optional `name`, `image`, `typeOne` and `typeTwo` query parameters.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{PokemonRecord, PokemonSummary};

/// Image parameter for catalog cards that have no sprite.
pub const NO_SPRITE: &str = "sin imagen";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown route: {0}")]
    Unknown(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetailRoute {
    /// Raw path segment; may be absent or non-numeric.
    pub id: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub type_one: Option<String>,
    pub type_two: Option<String>,
}

impl DetailRoute {
    pub fn by_id(id: u32) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }

    pub fn numeric_id(&self) -> Option<u32> {
        self.id.as_deref()?.trim().parse().ok()
    }

    /// Query parameters in the order they are written to the path.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", self.name.as_deref()),
            ("image", self.image.as_deref()),
            ("typeOne", self.type_one.as_deref()),
            ("typeTwo", self.type_two.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Route {
    #[default]
    Search,
    NewPokemon,
    Detail(DetailRoute),
}

impl Route {
    /// Where selecting a card leads. Catalog records are not in the
    /// repository, so their fields travel in the query string.
    pub fn for_record(record: &PokemonRecord) -> Self {
        if !record.is_api() {
            return Route::Detail(DetailRoute::by_id(record.id()));
        }
        let PokemonSummary {
            id,
            name,
            image,
            type_one,
            type_two,
        } = record.summary();
        Route::Detail(DetailRoute {
            id: Some(id.to_string()),
            name: Some(name),
            image: Some(image.unwrap_or_else(|| NO_SPRITE.to_string())),
            type_one: Some(type_one.unwrap_or_default()),
            type_two,
        })
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Search => "/".to_string(),
            Route::NewPokemon => "/new".to_string(),
            Route::Detail(detail) => {
                let mut path = format!("/pokemon/{}", detail.id.as_deref().unwrap_or_default());
                let query: Vec<String> = detail
                    .params()
                    .into_iter()
                    .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
                    .collect();
                if !query.is_empty() {
                    path.push('?');
                    path.push_str(&query.join("&"));
                }
                path
            }
        }
    }

    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let input = input.trim();
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (input, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();

        match segments.as_slice() {
            [] => Ok(Route::Search),
            ["new"] => Ok(Route::NewPokemon),
            ["pokemon"] | ["pokemon", _] => {
                let mut detail = DetailRoute {
                    id: segments.get(1).map(|id| decode(id)),
                    ..DetailRoute::default()
                };
                for pair in query.unwrap_or_default().split('&') {
                    let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                    let value = decode(value);
                    match key {
                        "name" => detail.name = Some(value),
                        "image" => detail.image = Some(value),
                        "typeOne" => detail.type_one = Some(value),
                        "typeTwo" => detail.type_two = Some(value),
                        _ => {}
                    }
                }
                Ok(Route::Detail(detail))
            }
            _ => Err(RouteError::Unknown(input.to_string())),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Search => "Home",
            Route::NewPokemon => "Nuevo Pokémon",
            Route::Detail(_) => "Detalles",
        }
    }
}

fn decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
