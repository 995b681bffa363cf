//! Prefix search against an in-memory catalog.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pokedex::api::{search_by_prefix, CatalogEntry, CatalogError, CatalogSource, SearchOutcome};
use pokedex::model::ApiPokemon;
use pretty_assertions::assert_eq;

#[derive(Default)]
struct FakeCatalog {
    names: Vec<&'static str>,
    broken: HashSet<&'static str>,
    index_down: bool,
    index_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl FakeCatalog {
    fn with_names(names: &[&'static str]) -> Self {
        Self {
            names: names.to_vec(),
            ..Self::default()
        }
    }

    fn url(name: &str) -> String {
        format!("https://pokeapi.test/pokemon/{name}/")
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_index(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        self.index_calls.fetch_add(1, Ordering::SeqCst);
        if self.index_down {
            return Err(CatalogError::Decode {
                url: "https://pokeapi.test/pokemon?limit=1000".into(),
                message: "connection reset".into(),
            });
        }
        Ok(self
            .names
            .iter()
            .map(|name| CatalogEntry {
                name: name.to_string(),
                url: Self::url(name),
            })
            .collect())
    }

    async fn fetch_detail(&self, url: &str) -> Result<ApiPokemon, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let position = self
            .names
            .iter()
            .position(|name| Self::url(name) == url)
            .ok_or_else(|| CatalogError::Decode {
                url: url.into(),
                message: "404".into(),
            })?;
        let name = self.names[position];
        if self.broken.contains(name) {
            return Err(CatalogError::Decode {
                url: url.into(),
                message: "500".into(),
            });
        }
        Ok(ApiPokemon {
            id: position as u32 + 1,
            name: name.to_string(),
            sprite: Some(format!("https://sprites.test/{name}.png")),
            types: vec!["normal".into()],
        })
    }
}

fn names(outcome: &SearchOutcome) -> Vec<&str> {
    match outcome {
        SearchOutcome::Found(records) => records.iter().map(|r| r.name.as_str()).collect(),
        SearchOutcome::NotFound => Vec::new(),
    }
}

#[tokio::test]
async fn pik_finds_only_pikachu() {
    let catalog = FakeCatalog::with_names(&["bulbasaur", "pidgey", "pikachu", "raichu"]);

    let outcome = search_by_prefix(&catalog, "pik").await.unwrap();

    assert_eq!(names(&outcome), vec!["pikachu"]);
    assert_eq!(catalog.index_calls.load(Ordering::SeqCst), 1);
    assert_eq!(catalog.detail_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn no_match_is_not_found_without_detail_calls() {
    let catalog = FakeCatalog::with_names(&["bulbasaur", "pikachu"]);

    let outcome = search_by_prefix(&catalog, "zzz").await.unwrap();

    assert_eq!(outcome, SearchOutcome::NotFound);
    assert_eq!(catalog.detail_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn matches_are_capped_at_five_in_index_order() {
    let catalog = FakeCatalog::with_names(&[
        "pidgey", "pidgeotto", "pidgeot", "pikachu", "pichu", "pinsir", "piplup",
    ]);

    let outcome = search_by_prefix(&catalog, "PI").await.unwrap();

    assert_eq!(
        names(&outcome),
        vec!["pidgey", "pidgeotto", "pidgeot", "pikachu", "pichu"]
    );
    assert_eq!(catalog.detail_calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn failed_detail_is_dropped() {
    let mut catalog = FakeCatalog::with_names(&["charmander", "charmeleon", "charizard"]);
    catalog.broken.insert("charmeleon");

    let outcome = search_by_prefix(&catalog, "char").await.unwrap();

    assert_eq!(names(&outcome), vec!["charmander", "charizard"]);
}

#[tokio::test]
async fn every_detail_failing_is_still_found() {
    let mut catalog = FakeCatalog::with_names(&["mew", "mewtwo"]);
    catalog.broken.extend(["mew", "mewtwo"]);

    let outcome = search_by_prefix(&catalog, "mew").await.unwrap();

    assert_eq!(outcome, SearchOutcome::Found(Vec::new()));
}

#[tokio::test]
async fn index_failure_is_an_error() {
    let catalog = FakeCatalog {
        index_down: true,
        ..FakeCatalog::with_names(&["pikachu"])
    };

    let result = search_by_prefix(&catalog, "pik").await;

    assert!(matches!(result, Err(CatalogError::Decode { .. })));
    assert_eq!(catalog.detail_calls.load(Ordering::SeqCst), 0);
}
