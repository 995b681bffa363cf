//! PokeAPI catalog client and the prefix search built on top of it.

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::Deserialize;

use crate::model::ApiPokemon;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
/// Size of the catalog index listing.
pub const INDEX_LIMIT: usize = 1000;
/// Most detail records fetched per search.
pub const MAX_MATCHES: usize = 5;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// At least one index entry matched. May still be empty when every detail
    /// fetch failed.
    Found(Vec<ApiPokemon>),
    NotFound,
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_index(&self) -> Result<Vec<CatalogEntry>, CatalogError>;
    async fn fetch_detail(&self, url: &str) -> Result<ApiPokemon, CatalogError>;
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<CatalogEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    #[serde(default)]
    types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

pub struct HttpCatalog {
    base: String,
    client: reqwest::Client,
}

impl HttpCatalog {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn index_url(&self) -> String {
        format!("{}/pokemon?limit={INDEX_LIMIT}", self.base)
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| CatalogError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_index(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let url = self.index_url();
        let response: ListResponse = self.fetch_json(&url).await?;
        Ok(response.results)
    }

    async fn fetch_detail(&self, url: &str) -> Result<ApiPokemon, CatalogError> {
        let response: PokemonResponse = self.fetch_json(url).await?;
        Ok(pokemon_from_response(response))
    }
}

fn pokemon_from_response(response: PokemonResponse) -> ApiPokemon {
    ApiPokemon {
        id: response.id,
        name: response.name,
        sprite: pointer_string(&response.sprites, "/front_default"),
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

/// Index entries whose name starts with `text`, in index order, capped at
/// [`MAX_MATCHES`].
pub fn prefix_matches<'a>(entries: &'a [CatalogEntry], text: &str) -> Vec<&'a CatalogEntry> {
    let needle = text.trim().to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.name.to_lowercase().starts_with(&needle))
        .take(MAX_MATCHES)
        .collect()
}

/// Resolves a name prefix into detailed records. Only an index failure is an
/// error; individual detail failures are logged and dropped.
pub async fn search_by_prefix(
    source: &dyn CatalogSource,
    text: &str,
) -> Result<SearchOutcome, CatalogError> {
    let index = source.fetch_index().await.map_err(|error| {
        tracing::error!(query = text, %error, "catalog index fetch failed");
        error
    })?;

    let matches = prefix_matches(&index, text);
    if matches.is_empty() {
        tracing::debug!(query = text, "no catalog entries match");
        return Ok(SearchOutcome::NotFound);
    }

    let fetches = matches.iter().map(|entry| async move {
        match source.fetch_detail(&entry.url).await {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::warn!(name = %entry.name, %error, "dropping pokemon with failed detail fetch");
                None
            }
        }
    });
    let records: Vec<ApiPokemon> = join_all(fetches).await.into_iter().flatten().collect();

    tracing::debug!(query = text, matched = matches.len(), loaded = records.len(), "catalog search finished");
    Ok(SearchOutcome::Found(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            url: format!("https://pokeapi.test/pokemon/{name}/"),
        }
    }

    #[test]
    fn prefix_matches_keep_index_order_and_cap() {
        let index: Vec<CatalogEntry> = [
            "bulbasaur", "pidgey", "pidgeotto", "pikachu", "pichu", "pinsir", "piplup", "ivysaur",
        ]
        .into_iter()
        .map(entry)
        .collect();

        let names: Vec<&str> = prefix_matches(&index, "Pi")
            .into_iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["pidgey", "pidgeotto", "pikachu", "pichu", "pinsir"]);
    }

    #[test]
    fn prefix_is_not_substring() {
        let index = vec![entry("raichu"), entry("pikachu")];
        assert!(prefix_matches(&index, "chu").is_empty());
    }

    #[test]
    fn detail_payload_is_flattened() {
        let payload = serde_json::json!({
            "id": 6,
            "name": "charizard",
            "height": 17,
            "sprites": { "front_default": "https://sprites/6.png", "back_default": null },
            "types": [
                { "slot": 1, "type": { "name": "fire", "url": "u" } },
                { "slot": 2, "type": { "name": "flying", "url": "u" } }
            ]
        });
        let response: PokemonResponse = serde_json::from_value(payload).unwrap();
        let record = pokemon_from_response(response);
        assert_eq!(record.id, 6);
        assert_eq!(record.sprite.as_deref(), Some("https://sprites/6.png"));
        assert_eq!(record.types, vec!["fire".to_string(), "flying".to_string()]);
    }

    #[test]
    fn missing_sprite_is_none() {
        let payload = serde_json::json!({
            "id": 10,
            "name": "missingno",
            "sprites": { "front_default": null },
            "types": []
        });
        let response: PokemonResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(pokemon_from_response(response).sprite, None);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let catalog = HttpCatalog::new("http://localhost:9000/api/v2/");
        assert_eq!(
            catalog.index_url(),
            "http://localhost:9000/api/v2/pokemon?limit=1000"
        );
    }
}
