use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize};

/// A pet as the service represents it.
///
/// Every text field is kept as an opaque string: the service is loosely
/// typed and may answer with a JSON string, a number or `null`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Pet {
    #[serde(deserialize_with = "opaque_string")]
    pub id: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub name: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub animal_type: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub age: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_photo"
    )]
    pub pet_photo: Option<String>,
}

/// Body of `api/pets`, newest pet first.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

/// Text fields sent when creating or updating a pet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetForm {
    pub name: String,
    pub animal_type: String,
    pub age: String,
}

impl PetForm {
    pub fn new(name: &str, animal_type: &str, age: &str) -> Self {
        Self {
            name: name.to_string(),
            animal_type: animal_type.to_string(),
            age: age.to_string(),
        }
    }

    pub fn get(&self, field: PetField) -> &str {
        match field {
            PetField::Name => &self.name,
            PetField::AnimalType => &self.animal_type,
            PetField::Age => &self.age,
        }
    }

    pub fn fields(&self) -> [(PetField, &str); 3] {
        [PetField::Name, PetField::AnimalType, PetField::Age].map(|field| (field, self.get(field)))
    }
}

/// Server side listing filter, displayed as its query value.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PetFilter {
    #[default]
    #[display("")]
    All,
    #[display("my_pets")]
    MyPets,
}

/// Editable pet attribute, displayed as its wire field name.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum PetField {
    #[display("name")]
    Name,
    #[display("animal_type")]
    AnimalType,
    #[display("age")]
    Age,
}

impl PetField {
    pub fn of(self, pet: &Pet) -> &str {
        match self {
            PetField::Name => &pet.name,
            PetField::AnimalType => &pet.animal_type,
            PetField::Age => &pet.age,
        }
    }
}

fn opaque_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(value) => Ok(value),
        serde_json::Value::Number(value) => Ok(value.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or a number, got {other}"
        ))),
    }
}

// The service answers with an empty string for pets without a photo.
fn optional_photo<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|photo| !photo.is_empty()))
}
