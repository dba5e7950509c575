//! Settings for running the scenarios against a Pet Friends deployment.
//!
//! Values come from environment variables. Credentials and keys are sensitive
//! and must never be logged, so `Settings` intentionally has no `Debug` impl.

use crate::models::auth::{AuthKey, Credentials};
use anyhow::Context;
use envconfig::Envconfig;
use log::LevelFilter;
use std::{path::PathBuf, str::FromStr};

/// Configuration consumed by the scenario runner and the test suites.
#[derive(Envconfig, Clone)]
pub struct Settings {
    /// Root of the Pet Friends service (NON-SENSITIVE)
    /// The `api/...` paths are resolved against it.
    #[envconfig(
        from = "PET_FRIENDS_BASE_URL",
        default = "https://petfriends.skillfactory.ru/"
    )]
    pub base_url: String,

    /// 🔒 SENSITIVE: email of a registered account
    #[envconfig(from = "PET_FRIENDS_VALID_EMAIL")]
    pub valid_email: String,

    /// 🔒 SENSITIVE: password of the registered account
    #[envconfig(from = "PET_FRIENDS_VALID_PASSWORD")]
    pub valid_password: String,

    /// Email no account is registered with (NON-SENSITIVE)
    #[envconfig(
        from = "PET_FRIENDS_INVALID_EMAIL",
        default = "nobody@pet-friends.invalid"
    )]
    pub invalid_email: String,

    /// Password that does not match the registered account (NON-SENSITIVE)
    #[envconfig(from = "PET_FRIENDS_INVALID_PASSWORD", default = "not-the-password")]
    pub invalid_password: String,

    /// Well formed key the service never issued (NON-SENSITIVE)
    #[envconfig(
        from = "PET_FRIENDS_INVALID_AUTH_KEY",
        default = "ea738148a1f19838e1c5d1413877f3691a3731380e733e877b0ae729"
    )]
    pub invalid_auth_key: String,

    /// Directory holding the photo fixtures (`b14.jpeg`, `cat1.jpeg`)
    #[envconfig(from = "PET_FRIENDS_IMAGES_DIR", default = "images")]
    pub images_dir: String,

    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    #[envconfig(from = "PET_FRIENDS_LOG_LEVEL", default = "info")]
    pub log_level: String,
}

impl Settings {
    /// Loads the settings from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::init_from_env().context("failed to load pet friends settings from environment")
    }

    pub fn valid_credentials(&self) -> Credentials {
        Credentials::new(&self.valid_email, &self.valid_password)
    }

    pub fn invalid_email_credentials(&self) -> Credentials {
        Credentials::new(&self.invalid_email, &self.valid_password)
    }

    pub fn invalid_password_credentials(&self) -> Credentials {
        Credentials::new(&self.valid_email, &self.invalid_password)
    }

    pub fn invalid_credentials(&self) -> Credentials {
        Credentials::new(&self.invalid_email, &self.invalid_password)
    }

    pub fn invalid_auth_key(&self) -> AuthKey {
        AuthKey::from(self.invalid_auth_key.as_str())
    }

    /// Path of a photo fixture inside `images_dir`.
    pub fn fixture(&self, file_name: &str) -> PathBuf {
        PathBuf::from(&self.images_dir).join(file_name)
    }

    pub fn log_level_filter(&self) -> anyhow::Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .with_context(|| format!("unknown log level: {}", self.log_level))
    }
}
