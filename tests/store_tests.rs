//! Collection persistence against real files.

use pokedex::model::{CustomPokemon, PokemonType};
use pokedex::store::{FileSlot, LocalStore, StorageSlot, COLLECTION_KEY};
use pretty_assertions::assert_eq;

fn collection(count: u32) -> Vec<CustomPokemon> {
    (1..=count)
        .map(|id| CustomPokemon {
            id,
            name: format!("criatura {id}"),
            image: format!("https://img.example/{id}.webp"),
            type_one: PokemonType::ALL[id as usize % PokemonType::ALL.len()],
            type_two: (id % 2 == 0).then_some(PokemonType::Dragon),
        })
        .collect()
}

#[tokio::test]
async fn saved_collection_reloads_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let records = collection(12);

    let store = LocalStore::new(FileSlot::new(dir.path()));
    store.save(&records).await.unwrap();

    let reopened = LocalStore::new(FileSlot::new(dir.path()));
    assert_eq!(reopened.load().await, records);
}

#[tokio::test]
async fn stored_file_uses_collection_key_and_camel_case() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(FileSlot::new(dir.path()));
    store.save(&collection(2)).await.unwrap();

    let path = dir.path().join("customPokemons.json");
    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["typeOne"], "fire");
    assert_eq!(value[0]["typeTwo"], serde_json::Value::Null);
    assert_eq!(value[1]["typeTwo"], "dragon");
    let staged = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"));
    assert!(!staged);
}

#[tokio::test]
async fn overwrite_replaces_previous_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(FileSlot::new(dir.path()));
    store.save(&collection(5)).await.unwrap();
    store.save(&collection(2)).await.unwrap();
    assert_eq!(store.load().await, collection(2));
}

#[tokio::test]
async fn corrupt_file_loads_empty_and_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let slot = FileSlot::new(dir.path());
    slot.set(COLLECTION_KEY, r#"[{"id": "uno"}"#).await.unwrap();

    let store = LocalStore::new(slot);
    assert!(store.load().await.is_empty());
    assert!(!store.slot().path_for(COLLECTION_KEY).exists());
}

#[tokio::test]
async fn clear_then_load_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(FileSlot::new(dir.path()));
    store.save(&collection(3)).await.unwrap();
    store.clear().await.unwrap();
    store.clear().await.unwrap();
    assert!(store.load().await.is_empty());
}
