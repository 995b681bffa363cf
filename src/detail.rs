//! Resolves what the detail view shows for a route.

use crate::model::{format_id, PokemonRecord};
use crate::repository::PokemonRepository;
use crate::route::DetailRoute;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailCard {
    pub id: Option<u32>,
    pub name: String,
    pub image: String,
    pub type_one: Option<String>,
    pub type_two: Option<String>,
    pub from_repository: bool,
}

impl DetailCard {
    pub fn id_label(&self) -> String {
        self.id.map(format_id).unwrap_or_else(|| "#???".to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailResolution {
    Found(DetailCard),
    NotFound {
        id: Option<String>,
        params: Vec<(String, String)>,
    },
}

/// Repository lookup by numeric id first, then the route's query parameters.
pub fn resolve(route: &DetailRoute, repository: &PokemonRepository) -> DetailResolution {
    let id = route.numeric_id();

    if let Some(record) = id.and_then(|id| repository.find_by_id(id)) {
        let summary = PokemonRecord::Custom(record.clone()).summary();
        return DetailResolution::Found(DetailCard {
            id: Some(summary.id),
            name: summary.name,
            image: summary.image.unwrap_or_default(),
            type_one: summary.type_one,
            type_two: summary.type_two,
            from_repository: true,
        });
    }

    let name = non_empty(route.name.as_deref());
    let image = non_empty(route.image.as_deref());
    match (name, image) {
        (Some(name), Some(image)) => DetailResolution::Found(DetailCard {
            id,
            name: name.to_string(),
            image: image.to_string(),
            type_one: non_empty(route.type_one.as_deref()).map(str::to_string),
            type_two: non_empty(route.type_two.as_deref()).map(str::to_string),
            from_repository: false,
        }),
        _ => DetailResolution::NotFound {
            id: route.id.clone(),
            params: route
                .params()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        },
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomPokemon, PokemonType};

    fn repository() -> PokemonRepository {
        let mut repo = PokemonRepository::new();
        repo.finish_loading(vec![CustomPokemon {
            id: 25,
            name: "voltio".into(),
            image: "https://img/voltio.png".into(),
            type_one: PokemonType::Electric,
            type_two: Some(PokemonType::Steel),
        }]);
        repo
    }

    #[test]
    fn repository_wins_over_query_params() {
        let route = DetailRoute {
            id: Some("25".into()),
            name: Some("pikachu".into()),
            image: Some("https://sprites/25.png".into()),
            type_one: Some("electric".into()),
            type_two: None,
        };
        let DetailResolution::Found(card) = resolve(&route, &repository()) else {
            panic!("expected a card");
        };
        assert_eq!(card.name, "voltio");
        assert!(card.from_repository);
        assert_eq!(card.type_two.as_deref(), Some("steel"));
        assert_eq!(card.id_label(), "#025");
    }

    #[test]
    fn falls_back_to_query_params() {
        let route = DetailRoute {
            id: Some("4".into()),
            name: Some("charmander".into()),
            image: Some("https://sprites/4.png".into()),
            type_one: Some("fire".into()),
            type_two: None,
        };
        let DetailResolution::Found(card) = resolve(&route, &repository()) else {
            panic!("expected a card");
        };
        assert_eq!(card.id_label(), "#004");
        assert!(!card.from_repository);
    }

    #[test]
    fn missing_image_is_not_found() {
        let route = DetailRoute {
            id: Some("4".into()),
            name: Some("charmander".into()),
            ..DetailRoute::default()
        };
        assert_eq!(
            resolve(&route, &repository()),
            DetailResolution::NotFound {
                id: Some("4".into()),
                params: vec![("name".into(), "charmander".into())],
            }
        );
    }

    #[test]
    fn bare_detail_route_is_not_found() {
        assert!(matches!(
            resolve(&DetailRoute::default(), &repository()),
            DetailResolution::NotFound { id: None, .. }
        ));
    }
}
