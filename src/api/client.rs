//! # Pet Friends API Client
//!
//! Thin wrapper over the Pet Friends REST service. Every method issues exactly
//! one request and hands back the status together with the parsed body, so
//! callers can assert on failure statuses directly. Only transport faults
//! (connection errors, unreadable photo files) are reported as `Err`.

use super::response::{ApiResponse, ResponseBody};
use crate::{
    config::Settings,
    consts,
    models::{
        auth::{AuthKey, Credentials},
        pet::{PetFilter, PetForm},
    },
};
use anyhow::{Context, Result, bail};
use reqwest::{StatusCode, Url, multipart};
use std::path::Path;

/// Client for one Pet Friends deployment
pub struct PetFriends {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// Service root; always ends with `/`
    base_url: Url,
}

impl PetFriends {
    /// Creates a client for the service rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: Url::parse(&base_url)
                .with_context(|| format!("invalid pet friends base url: {base_url}"))?,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Requests an auth key for the given credentials.
    ///
    /// On success the body carries a `key` field.
    pub async fn get_api_key(&self, credentials: &Credentials) -> Result<ApiResponse> {
        let request = self
            .client
            .get(self.endpoint(consts::API_KEY_PATH)?)
            .header(consts::EMAIL_HEADER, &credentials.email)
            .header(consts::PASSWORD_HEADER, &credentials.password);

        self.send(consts::API_KEY_PATH, request).await
    }

    /// Lists pets, either all of them or only the caller's.
    pub async fn get_list_of_pets(
        &self,
        auth_key: &AuthKey,
        filter: PetFilter,
    ) -> Result<ApiResponse> {
        let request = self
            .client
            .get(self.endpoint(consts::PETS_PATH)?)
            .header(consts::AUTH_KEY_HEADER, auth_key.as_str())
            .query(&[("filter", filter.to_string())]);

        self.send(consts::PETS_PATH, request).await
    }

    /// Creates a pet with a photo read from `photo_path`.
    pub async fn add_new_pet(
        &self,
        auth_key: &AuthKey,
        pet: &PetForm,
        photo_path: &Path,
    ) -> Result<ApiResponse> {
        let form = pet_form_fields(pet).part(consts::PET_PHOTO_FIELD, photo_part(photo_path).await?);

        let request = self
            .client
            .post(self.endpoint(consts::PETS_PATH)?)
            .header(consts::AUTH_KEY_HEADER, auth_key.as_str())
            .multipart(form);

        self.send(consts::PETS_PATH, request).await
    }

    /// Creates a pet without a photo.
    pub async fn add_new_pet_simple(&self, auth_key: &AuthKey, pet: &PetForm) -> Result<ApiResponse> {
        let request = self
            .client
            .post(self.endpoint(consts::CREATE_PET_SIMPLE_PATH)?)
            .header(consts::AUTH_KEY_HEADER, auth_key.as_str())
            .multipart(pet_form_fields(pet));

        self.send(consts::CREATE_PET_SIMPLE_PATH, request).await
    }

    /// Replaces name, animal type and age of an existing pet.
    pub async fn update_pet_info(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        pet: &PetForm,
    ) -> Result<ApiResponse> {
        let path = format!("{}/{pet_id}", consts::PETS_PATH);
        let fields: Vec<(String, &str)> = pet
            .fields()
            .into_iter()
            .map(|(field, value)| (field.to_string(), value))
            .collect();

        let request = self
            .client
            .put(self.endpoint(&path)?)
            .header(consts::AUTH_KEY_HEADER, auth_key.as_str())
            .form(&fields);

        self.send(&path, request).await
    }

    /// Deletes a pet; only the status is meaningful.
    pub async fn delete_pet_by_pet_id(&self, auth_key: &AuthKey, pet_id: &str) -> Result<StatusCode> {
        let path = format!("{}/{pet_id}", consts::PETS_PATH);

        let request = self
            .client
            .delete(self.endpoint(&path)?)
            .header(consts::AUTH_KEY_HEADER, auth_key.as_str());

        let response = self.send(&path, request).await?;
        Ok(response.status)
    }

    /// Attaches a photo to an existing pet, replacing any previous one.
    pub async fn add_photo_of_pet(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        photo_path: &Path,
    ) -> Result<ApiResponse> {
        let path = format!("{}/{pet_id}", consts::SET_PHOTO_PATH);
        let form = multipart::Form::new().part(consts::PET_PHOTO_FIELD, photo_part(photo_path).await?);

        let request = self
            .client
            .post(self.endpoint(&path)?)
            .header(consts::AUTH_KEY_HEADER, auth_key.as_str())
            .multipart(form);

        self.send(&path, request).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("failed to build url for {path}"))
    }

    async fn send(&self, path: &str, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
        log::debug!("calling {path}");
        let response = request
            .send()
            .await
            .with_context(|| format!("failed to send request to {path}"))?;

        let status = response.status();
        log::debug!("{path} answered with {status}");

        let raw = response
            .text()
            .await
            .with_context(|| format!("failed to read response body from {path}"))?;

        Ok(ApiResponse {
            status,
            body: ResponseBody::parse(raw),
        })
    }
}

fn pet_form_fields(pet: &PetForm) -> multipart::Form {
    pet.fields()
        .into_iter()
        .fold(multipart::Form::new(), |form, (field, value)| {
            form.text(field.to_string(), value.to_string())
        })
}

async fn photo_part(photo_path: &Path) -> Result<multipart::Part> {
    let mime_type = image_mime_type(photo_path)?;
    let file_name = photo_path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("photo path has no file name: {}", photo_path.display()))?
        .to_string();

    let bytes = tokio::fs::read(photo_path)
        .await
        .with_context(|| format!("failed to read photo {}", photo_path.display()))?;

    Ok(multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_type)?)
}

/// MIME type for an accepted image extension.
pub fn image_mime_type(photo_path: &Path) -> Result<&'static str> {
    let extension = photo_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !consts::ACCEPTED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        bail!(
            "unsupported photo extension {extension:?}, expected one of {:?}",
            consts::ACCEPTED_IMAGE_EXTENSIONS
        );
    }

    Ok(match extension.as_str() {
        "png" => "image/png",
        "heic" => "image/heic",
        _ => "image/jpeg",
    })
}
