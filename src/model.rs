//! Pokémon records: the API shape, the user-created shape, and the summary
//! both are normalised to before rendering.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The fixed type enumeration offered by the creation form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    pub const ALL: [PokemonType; 18] = [
        PokemonType::Normal,
        PokemonType::Fire,
        PokemonType::Water,
        PokemonType::Electric,
        PokemonType::Grass,
        PokemonType::Ice,
        PokemonType::Fighting,
        PokemonType::Poison,
        PokemonType::Ground,
        PokemonType::Flying,
        PokemonType::Psychic,
        PokemonType::Bug,
        PokemonType::Rock,
        PokemonType::Ghost,
        PokemonType::Dragon,
        PokemonType::Dark,
        PokemonType::Steel,
        PokemonType::Fairy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PokemonType::Normal => "normal",
            PokemonType::Fire => "fire",
            PokemonType::Water => "water",
            PokemonType::Electric => "electric",
            PokemonType::Grass => "grass",
            PokemonType::Ice => "ice",
            PokemonType::Fighting => "fighting",
            PokemonType::Poison => "poison",
            PokemonType::Ground => "ground",
            PokemonType::Flying => "flying",
            PokemonType::Psychic => "psychic",
            PokemonType::Bug => "bug",
            PokemonType::Rock => "rock",
            PokemonType::Ghost => "ghost",
            PokemonType::Dragon => "dragon",
            PokemonType::Dark => "dark",
            PokemonType::Steel => "steel",
            PokemonType::Fairy => "fairy",
        }
    }

    /// Capitalised label used by the type selectors ("Fire").
    pub fn label(&self) -> String {
        capitalize(self.as_str())
    }

    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| kind == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pokemon type: {0}")]
pub struct UnknownType(pub String);

impl FromStr for PokemonType {
    type Err = UnknownType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == needle)
            .ok_or_else(|| UnknownType(value.to_string()))
    }
}

/// A Pokémon entered through the creation form. Serialised with the camelCase
/// keys of the storage slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomPokemon {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub type_one: PokemonType,
    #[serde(default)]
    pub type_two: Option<PokemonType>,
}

/// A Pokémon fetched from the catalog, already flattened from the nested
/// `sprites` / `types` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApiPokemon {
    pub id: u32,
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PokemonRecord {
    Api(ApiPokemon),
    Custom(CustomPokemon),
}

/// What a card or the detail view renders, independent of the record source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
    pub image: Option<String>,
    pub type_one: Option<String>,
    pub type_two: Option<String>,
}

impl PokemonRecord {
    pub fn id(&self) -> u32 {
        match self {
            PokemonRecord::Api(record) => record.id,
            PokemonRecord::Custom(record) => record.id,
        }
    }

    pub fn is_api(&self) -> bool {
        matches!(self, PokemonRecord::Api(_))
    }

    pub fn summary(&self) -> PokemonSummary {
        match self {
            PokemonRecord::Api(record) => PokemonSummary {
                id: record.id,
                name: record.name.clone(),
                image: record.sprite.clone(),
                type_one: record.types.first().cloned(),
                type_two: record.types.get(1).cloned(),
            },
            PokemonRecord::Custom(record) => PokemonSummary {
                id: record.id,
                name: record.name.clone(),
                image: Some(record.image.clone()),
                type_one: Some(record.type_one.to_string()),
                type_two: record.type_two.map(|kind| kind.to_string()),
            },
        }
    }
}

impl From<ApiPokemon> for PokemonRecord {
    fn from(record: ApiPokemon) -> Self {
        PokemonRecord::Api(record)
    }
}

impl From<CustomPokemon> for PokemonRecord {
    fn from(record: CustomPokemon) -> Self {
        PokemonRecord::Custom(record)
    }
}

/// `#025` style id label.
pub fn format_id(id: u32) -> String {
    format!("#{id:03}")
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
