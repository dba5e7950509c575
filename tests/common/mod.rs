//! In-process stand-in for the Pet Friends service.
//!
//! Keeps pets in memory, newest first, and answers the same routes the real
//! service does. The validation mode decides how boundary input is treated.

#![allow(dead_code)]

use base64::Engine;
use envconfig::Envconfig;
use pet_friends::{
    config::Settings,
    models::pet::{Pet, PetForm},
};
use serde_json::json;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate, matchers::any};

pub const VALID_EMAIL: &str = "owner@example.com";
pub const VALID_PASSWORD: &str = "s3cret";
pub const ISSUED_KEY: &str = "8a3c6b0f0f4c4d8ab1e7c41f36f1ad0c2e3b6a74d8e2c9b51f0a7e33";

pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_AGE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validation {
    /// Stores whatever it is given.
    Lenient,
    /// Refuses empty fields, symbol-only or long names, odd types and ages.
    Strict,
    /// Answers 200 but silently cuts names to `MAX_NAME_CHARS`.
    Truncating,
}

#[derive(Default)]
struct State {
    /// (owned by the valid user, pet), newest first
    pets: Vec<(bool, Pet)>,
    next_id: u64,
}

#[derive(Clone)]
pub struct FakePetFriends {
    state: Arc<Mutex<State>>,
    validation: Validation,
}

struct FormPart {
    name: String,
    value: Vec<u8>,
    file: Option<(String, String)>,
}

impl FakePetFriends {
    /// Starts a mock server backed by a fresh fake holding one foreign pet.
    pub async fn start(validation: Validation) -> (MockServer, Self) {
        let fake = Self {
            state: Arc::default(),
            validation,
        };
        fake.insert(false, PetForm::new("Rex", "dog", "3"), None);

        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(fake.clone())
            .mount(&server)
            .await;

        (server, fake)
    }

    pub fn seed_my_pet(&self, pet: PetForm) -> Pet {
        self.insert(true, pet, None)
    }

    pub fn my_pets(&self) -> Vec<Pet> {
        let state = self.state.lock().unwrap();
        state
            .pets
            .iter()
            .filter(|(owned, _)| *owned)
            .map(|(_, pet)| pet.clone())
            .collect()
    }

    fn insert(&self, owned: bool, form: PetForm, pet_photo: Option<String>) -> Pet {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;

        let pet = Pet {
            id: format!("{:08x}", state.next_id),
            name: form.name,
            animal_type: form.animal_type,
            age: form.age,
            pet_photo,
        };
        state.pets.insert(0, (owned, pet.clone()));
        pet
    }

    fn validate(&self, form: PetForm) -> Option<PetForm> {
        match self.validation {
            Validation::Lenient => Some(form),
            Validation::Truncating => Some(PetForm {
                name: form.name.chars().take(MAX_NAME_CHARS).collect(),
                ..form
            }),
            Validation::Strict => {
                let filled = !form.name.is_empty()
                    && !form.animal_type.is_empty()
                    && !form.age.is_empty();
                let name_ok = form.name.chars().any(char::is_alphanumeric)
                    && form.name.chars().count() <= MAX_NAME_CHARS;
                let type_ok = form
                    .animal_type
                    .chars()
                    .all(|c| c.is_alphabetic() || c == ' ');
                let age_ok = form.age.parse::<u32>().is_ok_and(|age| age <= MAX_AGE);

                (filled && name_ok && type_ok && age_ok).then_some(form)
            }
        }
    }

    fn issue_key(&self, request: &Request) -> ResponseTemplate {
        let email = header(request, "email");
        let password = header(request, "password");

        if email.as_deref() == Some(VALID_EMAIL) && password.as_deref() == Some(VALID_PASSWORD) {
            return ResponseTemplate::new(200).set_body_json(json!({ "key": ISSUED_KEY }));
        }
        ResponseTemplate::new(403).set_body_string("This user wasn't found in database")
    }

    fn list(&self, request: &Request) -> ResponseTemplate {
        let only_mine = request
            .url
            .query_pairs()
            .any(|(key, value)| key == "filter" && value == "my_pets");

        let state = self.state.lock().unwrap();
        let pets: Vec<&Pet> = state
            .pets
            .iter()
            .filter(|(owned, _)| *owned || !only_mine)
            .map(|(_, pet)| pet)
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({ "pets": pets }))
    }

    fn create(&self, request: &Request, with_photo: bool) -> ResponseTemplate {
        let parts = form_parts(request);
        let photo = photo_data_uri(&parts);
        if with_photo && photo.is_none() {
            return bad_request();
        }

        let Some(form) = self.validate(pet_form(&parts)) else {
            return bad_request();
        };
        let pet = self.insert(true, form, photo);

        ResponseTemplate::new(200).set_body_json(pet)
    }

    fn update(&self, pet_id: &str, request: &Request) -> ResponseTemplate {
        let Some(form) = self.validate(pet_form(&form_parts(request))) else {
            return bad_request();
        };

        let mut state = self.state.lock().unwrap();
        let Some((_, pet)) = state
            .pets
            .iter_mut()
            .find(|(owned, pet)| *owned && pet.id == pet_id)
        else {
            return bad_request();
        };

        pet.name = form.name;
        pet.animal_type = form.animal_type;
        pet.age = form.age;
        ResponseTemplate::new(200).set_body_json(pet.clone())
    }

    fn delete(&self, pet_id: &str) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        let before = state.pets.len();
        state.pets.retain(|(owned, pet)| !(*owned && pet.id == pet_id));

        if state.pets.len() == before {
            return ResponseTemplate::new(404).set_body_string("Not Found");
        }
        ResponseTemplate::new(200)
    }

    fn set_photo(&self, pet_id: &str, request: &Request) -> ResponseTemplate {
        let Some(photo) = photo_data_uri(&form_parts(request)) else {
            return bad_request();
        };

        let mut state = self.state.lock().unwrap();
        let Some((_, pet)) = state
            .pets
            .iter_mut()
            .find(|(owned, pet)| *owned && pet.id == pet_id)
        else {
            return bad_request();
        };

        pet.pet_photo = Some(photo);
        ResponseTemplate::new(200).set_body_json(pet.clone())
    }
}

impl Respond for FakePetFriends {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<&str> = request.url.path().trim_matches('/').split('/').collect();
        let method = request.method.as_str();

        if method == "GET" && segments == ["api", "key"] {
            return self.issue_key(request);
        }
        if header(request, "auth_key").as_deref() != Some(ISSUED_KEY) {
            return ResponseTemplate::new(403).set_body_string("Please provide 'auth_key' Header");
        }

        match (method, segments.as_slice()) {
            ("GET", ["api", "pets"]) => self.list(request),
            ("POST", ["api", "pets"]) => self.create(request, true),
            ("POST", ["api", "create_pet_simple"]) => self.create(request, false),
            ("PUT", ["api", "pets", pet_id]) => self.update(pet_id, request),
            ("DELETE", ["api", "pets", pet_id]) => self.delete(pet_id),
            ("POST", ["api", "pets", "set_photo", pet_id]) => self.set_photo(pet_id, request),
            _ => ResponseTemplate::new(404).set_body_string("Not Found"),
        }
    }
}

/// Settings pointing at `server` with the fake's credentials.
pub fn settings(server: &MockServer) -> Settings {
    settings_with_password(server, VALID_PASSWORD)
}

pub fn settings_with_password(server: &MockServer, password: &str) -> Settings {
    Settings::init_from_hashmap(&HashMap::from([
        ("PET_FRIENDS_BASE_URL".to_string(), server.uri()),
        ("PET_FRIENDS_VALID_EMAIL".to_string(), VALID_EMAIL.to_string()),
        ("PET_FRIENDS_VALID_PASSWORD".to_string(), password.to_string()),
        (
            "PET_FRIENDS_IMAGES_DIR".to_string(),
            concat!(env!("CARGO_MANIFEST_DIR"), "/images").to_string(),
        ),
    ]))
    .unwrap()
}

fn bad_request() -> ResponseTemplate {
    ResponseTemplate::new(400).set_body_string("Bad Request")
}

fn header(request: &Request, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn pet_form(parts: &[FormPart]) -> PetForm {
    let text = |name: &str| {
        parts
            .iter()
            .find(|part| part.name == name && part.file.is_none())
            .map(|part| String::from_utf8_lossy(&part.value).into_owned())
            .unwrap_or_default()
    };

    PetForm::new(&text("name"), &text("animal_type"), &text("age"))
}

fn photo_data_uri(parts: &[FormPart]) -> Option<String> {
    let part = parts.iter().find(|part| part.name == "pet_photo")?;
    let (_, mime_type) = part.file.as_ref()?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&part.value);

    Some(format!("data:{mime_type};base64,{encoded}"))
}

fn form_parts(request: &Request) -> Vec<FormPart> {
    let content_type = header(request, "content-type").unwrap_or_default();

    if content_type.starts_with("multipart/form-data") {
        return multipart_parts(&content_type, &request.body);
    }

    url::form_urlencoded::parse(&request.body)
        .map(|(name, value)| FormPart {
            name: name.into_owned(),
            value: value.into_owned().into_bytes(),
            file: None,
        })
        .collect()
}

fn multipart_parts(content_type: &str, body: &[u8]) -> Vec<FormPart> {
    let Ok(boundary) = multer::parse_boundary(content_type) else {
        return Vec::new();
    };
    let body = body.to_vec();
    let stream = futures::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    futures::executor::block_on(async move {
        let mut parts = Vec::new();

        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            let file = field.file_name().map(|file_name| {
                let mime_type = field
                    .content_type()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                (file_name.to_string(), mime_type)
            });

            let Ok(value) = field.bytes().await else {
                break;
            };
            parts.push(FormPart {
                name,
                value: value.to_vec(),
                file,
            });
        }

        parts
    })
}
