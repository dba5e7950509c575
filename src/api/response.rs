use crate::{
    consts,
    models::{
        auth::AuthKey,
        pet::{Pet, PetList},
    },
};
use anyhow::{Context, bail};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::fmt;

/// Response payload: JSON when the body parses as JSON, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(raw: String) -> Self {
        match serde_json::from_str(&raw) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(raw),
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        matches!(self, Self::Json(value) if value.get(name).is_some())
    }

    /// Top level string or number field as text.
    pub fn text_field(&self, name: &str) -> Option<String> {
        let Self::Json(value) = self else {
            return None;
        };

        match value.get(name)? {
            serde_json::Value::String(text) => Some(text.clone()),
            serde_json::Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    pub fn deserialize<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        match self {
            Self::Json(value) => Ok(serde_json::from_value(value.clone())?),
            Self::Text(text) => bail!("expected a JSON body, got text: {text}"),
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Status and body of a single call, whatever the status is.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    pub fn auth_key(&self) -> Option<AuthKey> {
        self.body.text_field(consts::KEY_FIELD).map(AuthKey::from)
    }

    pub fn pet(&self) -> anyhow::Result<Pet> {
        self.body
            .deserialize()
            .with_context(|| format!("response with status {} is not a pet", self.status))
    }

    pub fn pets(&self) -> anyhow::Result<Vec<Pet>> {
        self.body
            .deserialize::<PetList>()
            .map(|list| list.pets)
            .with_context(|| format!("response with status {} is not a pet list", self.status))
    }
}
