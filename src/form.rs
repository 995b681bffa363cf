//! Creation form state and its validation rules.

use std::sync::OnceLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{CustomPokemon, PokemonType};
use crate::repository::PokemonRepository;

pub const MSG_ID_REQUIRED: &str = "El ID es requerido";
pub const MSG_ID_NUMERIC: &str = "El ID debe ser un número";
pub const MSG_ID_MIN: &str = "El ID debe ser mayor a 0";
pub const MSG_ID_TAKEN: &str = "Ya existe un Pokémon con este ID";
pub const MSG_NAME_REQUIRED: &str = "El nombre es requerido";
pub const MSG_NAME_SHORT: &str = "El nombre debe tener al menos 3 caracteres";
pub const MSG_NAME_LETTERS: &str = "El nombre solo puede contener letras";
pub const MSG_NAME_TAKEN: &str = "Ya existe un Pokémon con este nombre";
pub const MSG_IMAGE_REQUIRED: &str = "La imagen es requerida";
pub const MSG_IMAGE_URL: &str = "Debe ser una URL válida de imagen (png, jpg, jpeg, gif, webp)";
pub const MSG_TYPE_REQUIRED: &str = "El tipo primario es requerido";

const NAME_MIN_CHARS: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum FormField {
    #[default]
    Id,
    Name,
    Image,
    TypeOne,
    TypeTwo,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Id,
        FormField::Name,
        FormField::Image,
        FormField::TypeOne,
        FormField::TypeTwo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Id => "ID *",
            FormField::Name => "Nombre *",
            FormField::Image => "URL de la Imagen *",
            FormField::TypeOne => "Tipo Primario *",
            FormField::TypeTwo => "Tipo Secundario",
        }
    }

    pub fn is_type_selector(&self) -> bool {
        matches!(self, FormField::TypeOne | FormField::TypeTwo)
    }

    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|f| f == self).unwrap_or_default();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let index = Self::ALL.iter().position(|f| f == self).unwrap_or_default();
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// One message per field at most.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldErrors {
    pub id: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub type_one: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Id => self.id.as_deref(),
            FormField::Name => self.name.as_deref(),
            FormField::Image => self.image.as_deref(),
            FormField::TypeOne => self.type_one.as_deref(),
            FormField::TypeTwo => None,
        }
    }

    pub fn set(&mut self, field: FormField, message: &str) {
        let slot = match field {
            FormField::Id => &mut self.id,
            FormField::Name => &mut self.name,
            FormField::Image => &mut self.image,
            FormField::TypeOne => &mut self.type_one,
            FormField::TypeTwo => return,
        };
        *slot = Some(message.to_string());
    }

    pub fn clear(&mut self, field: FormField) {
        match field {
            FormField::Id => self.id = None,
            FormField::Name => self.name = None,
            FormField::Image => self.image = None,
            FormField::TypeOne => self.type_one = None,
            FormField::TypeTwo => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_none())
    }

    pub fn first_field(&self) -> Option<FormField> {
        FormField::ALL
            .iter()
            .copied()
            .find(|field| self.get(*field).is_some())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonForm {
    pub id: String,
    pub name: String,
    pub image: String,
    pub type_one: Option<PokemonType>,
    pub type_two: Option<PokemonType>,
    pub focus: FormField,
    pub errors: FieldErrors,
}

impl PokemonForm {
    pub fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::Name => &self.name,
            FormField::Image => &self.image,
            FormField::TypeOne | FormField::TypeTwo => "",
        }
    }

    /// Updates a text field and drops its pending error.
    pub fn set_text(&mut self, field: FormField, value: String) -> bool {
        let slot = match field {
            FormField::Id => &mut self.id,
            FormField::Name => &mut self.name,
            FormField::Image => &mut self.image,
            FormField::TypeOne | FormField::TypeTwo => return false,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        self.errors.clear(field);
        true
    }

    pub fn selection(&self, field: FormField) -> Option<PokemonType> {
        match field {
            FormField::TypeOne => self.type_one,
            FormField::TypeTwo => self.type_two,
            _ => None,
        }
    }

    /// Steps a type selector through "none" and the 18 types, wrapping.
    pub fn cycle_type(&mut self, field: FormField, delta: i8) -> bool {
        let slot = match field {
            FormField::TypeOne => &mut self.type_one,
            FormField::TypeTwo => &mut self.type_two,
            _ => return false,
        };
        let positions = PokemonType::ALL.len() as i16 + 1;
        let current = slot.map(|kind| kind.index() as i16 + 1).unwrap_or(0);
        let next = (current + delta as i16).rem_euclid(positions);
        *slot = if next == 0 {
            None
        } else {
            Some(PokemonType::ALL[(next - 1) as usize])
        };
        self.errors.clear(field);
        true
    }

    /// Field-level rules only; every failing field gets its message.
    pub fn validate(&self) -> Result<CustomPokemon, FieldErrors> {
        let mut errors = FieldErrors::default();

        let id = match validate_id(&self.id) {
            Ok(id) => Some(id),
            Err(message) => {
                errors.set(FormField::Id, message);
                None
            }
        };
        if let Err(message) = validate_name(&self.name) {
            errors.set(FormField::Name, message);
        }
        if let Err(message) = validate_image(&self.image) {
            errors.set(FormField::Image, message);
        }
        if self.type_one.is_none() {
            errors.set(FormField::TypeOne, MSG_TYPE_REQUIRED);
        }

        match (id, self.type_one) {
            (Some(id), Some(type_one)) if errors.is_empty() => Ok(CustomPokemon {
                id,
                name: self.name.trim().to_lowercase(),
                image: self.image.trim().to_string(),
                type_one,
                type_two: self.type_two,
            }),
            _ => Err(errors),
        }
    }

    /// Validation followed by the duplicate id / name checks against the
    /// current collection.
    pub fn submit(&self, repository: &PokemonRepository) -> Result<CustomPokemon, FieldErrors> {
        let candidate = self.validate()?;
        let mut errors = FieldErrors::default();
        if repository.contains_id(candidate.id) {
            errors.set(FormField::Id, MSG_ID_TAKEN);
        } else if repository.contains_name(&candidate.name) {
            errors.set(FormField::Name, MSG_NAME_TAKEN);
        }
        if errors.is_empty() {
            Ok(candidate)
        } else {
            Err(errors)
        }
    }
}

fn validate_id(raw: &str) -> Result<u32, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MSG_ID_REQUIRED);
    }
    let value: i64 = raw.parse().map_err(|_| MSG_ID_NUMERIC)?;
    if value < 1 {
        return Err(MSG_ID_MIN);
    }
    u32::try_from(value).map_err(|_| MSG_ID_NUMERIC)
}

fn validate_name(raw: &str) -> Result<(), &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MSG_NAME_REQUIRED);
    }
    if raw.chars().count() < NAME_MIN_CHARS {
        return Err(MSG_NAME_SHORT);
    }
    if !name_pattern().is_match(raw) {
        return Err(MSG_NAME_LETTERS);
    }
    Ok(())
}

fn validate_image(raw: &str) -> Result<(), &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(MSG_IMAGE_REQUIRED);
    }
    if !image_pattern().is_match(raw) {
        return Err(MSG_IMAGE_URL);
    }
    Ok(())
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$").unwrap_or_else(|_| unreachable!("static pattern"))
    })
}

fn image_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^https?://.*\.(?:png|jpg|jpeg|gif|webp)$")
            .unwrap_or_else(|_| unreachable!("static pattern"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> PokemonForm {
        PokemonForm {
            id: "1001".into(),
            name: "Lumbra".into(),
            image: "https://img.example/lumbra.PNG".into(),
            type_one: Some(PokemonType::Ghost),
            ..PokemonForm::default()
        }
    }

    fn repository_with(id: u32, name: &str) -> PokemonRepository {
        let mut repo = PokemonRepository::new();
        repo.finish_loading(vec![CustomPokemon {
            id,
            name: name.into(),
            image: "https://img/x.png".into(),
            type_one: PokemonType::Normal,
            type_two: None,
        }]);
        repo
    }

    #[test]
    fn valid_form_lowercases_name() {
        let record = filled().validate().unwrap();
        assert_eq!(record.name, "lumbra");
        assert_eq!(record.id, 1001);
        assert_eq!(record.type_two, None);
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = PokemonForm::default().validate().unwrap_err();
        assert_eq!(
            errors,
            FieldErrors {
                id: Some(MSG_ID_REQUIRED.into()),
                name: Some(MSG_NAME_REQUIRED.into()),
                image: Some(MSG_IMAGE_REQUIRED.into()),
                type_one: Some(MSG_TYPE_REQUIRED.into()),
            }
        );
        assert_eq!(errors.first_field(), Some(FormField::Id));
    }

    #[test]
    fn id_rules() {
        for (raw, message) in [
            ("abc", MSG_ID_NUMERIC),
            ("0", MSG_ID_MIN),
            ("-4", MSG_ID_MIN),
            ("99999999999", MSG_ID_NUMERIC),
        ] {
            let form = PokemonForm {
                id: raw.into(),
                ..filled()
            };
            assert_eq!(form.validate().unwrap_err().id.as_deref(), Some(message), "{raw}");
        }
    }

    #[test]
    fn name_rules() {
        for (raw, message) in [("ab", MSG_NAME_SHORT), ("mew2", MSG_NAME_LETTERS)] {
            let form = PokemonForm {
                name: raw.into(),
                ..filled()
            };
            assert_eq!(form.validate().unwrap_err().name.as_deref(), Some(message));
        }
        let accented = PokemonForm {
            name: "Ñandú Veloz".into(),
            ..filled()
        };
        assert_eq!(accented.validate().unwrap().name, "ñandú veloz");
    }

    #[test]
    fn name_is_trimmed() {
        let blank = PokemonForm {
            name: "   ".into(),
            ..filled()
        };
        assert_eq!(
            blank.validate().unwrap_err().name.as_deref(),
            Some(MSG_NAME_REQUIRED)
        );

        let padded = PokemonForm {
            name: "  Lumbra ".into(),
            ..filled()
        };
        assert_eq!(padded.validate().unwrap().name, "lumbra");

        let repo = repository_with(7, "lumbra");
        let errors = padded.submit(&repo).unwrap_err();
        assert_eq!(errors.name.as_deref(), Some(MSG_NAME_TAKEN));
    }

    #[test]
    fn image_rules() {
        for raw in ["ftp://img/x.png", "https://img/x.bmp", "img/x.png"] {
            let form = PokemonForm {
                image: raw.into(),
                ..filled()
            };
            assert_eq!(
                form.validate().unwrap_err().image.as_deref(),
                Some(MSG_IMAGE_URL),
                "{raw}"
            );
        }
    }

    #[test]
    fn duplicate_id_blocks_submission() {
        let repo = repository_with(1, "bulba");
        let form = PokemonForm {
            id: "1".into(),
            ..filled()
        };
        let errors = form.submit(&repo).unwrap_err();
        assert_eq!(errors.id.as_deref(), Some(MSG_ID_TAKEN));
        assert_eq!(errors.name, None);
    }

    #[test]
    fn duplicate_name_ignores_case() {
        let repo = repository_with(7, "lumbra");
        let errors = filled().submit(&repo).unwrap_err();
        assert_eq!(errors.name.as_deref(), Some(MSG_NAME_TAKEN));
    }

    #[test]
    fn editing_clears_field_error() {
        let mut form = PokemonForm::default();
        form.errors = form.validate().unwrap_err();
        assert!(form.set_text(FormField::Id, "5".into()));
        assert_eq!(form.errors.id, None);
        assert!(form.errors.name.is_some());
    }

    #[test]
    fn type_selector_wraps_through_none() {
        let mut form = PokemonForm::default();
        form.cycle_type(FormField::TypeOne, -1);
        assert_eq!(form.type_one, Some(PokemonType::Fairy));
        form.cycle_type(FormField::TypeOne, 1);
        assert_eq!(form.type_one, None);
        form.cycle_type(FormField::TypeOne, 1);
        assert_eq!(form.type_one, Some(PokemonType::Normal));
        assert!(!form.cycle_type(FormField::Name, 1));
    }

    #[test]
    fn focus_order_wraps() {
        assert_eq!(FormField::TypeTwo.next(), FormField::Id);
        assert_eq!(FormField::Id.prev(), FormField::TypeTwo);
    }
}
