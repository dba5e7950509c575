//! Accept-or-reject checks for boundary input scenarios.
//!
//! The service's validation rules are not documented, so boundary scenarios
//! only require one of two consistent outcomes: the value is stored verbatim
//! and listed, or the call is refused and the value shows up nowhere.

use crate::{
    api::{ApiResponse, ResponseBody},
    models::pet::{Pet, PetField},
};
use anyhow::{Context, ensure};
use reqwest::StatusCode;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted(Pet),
    Rejected {
        status: StatusCode,
        body: ResponseBody,
    },
}

impl Outcome {
    /// A 200 must carry the created pet; any other status is a rejection.
    pub fn from_response(response: ApiResponse) -> anyhow::Result<Self> {
        if response.is_ok() {
            let pet = response
                .pet()
                .context("service accepted the pet but did not return it")?;
            return Ok(Self::Accepted(pet));
        }

        Ok(Self::Rejected {
            status: response.status,
            body: response.body,
        })
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Checks `expected` against the response and the head of `my_pets`.
    pub fn verify(&self, field: PetField, expected: &str, my_pets: &[Pet]) -> anyhow::Result<()> {
        let listed = my_pets.first().map(|pet| field.of(pet));

        match self {
            Self::Accepted(pet) => {
                ensure!(
                    field.of(pet) == expected,
                    "accepted {field} {expected:?} but the response holds {:?}",
                    field.of(pet)
                );
                ensure!(
                    listed == Some(expected),
                    "accepted {field} {expected:?} but my_pets starts with {listed:?}"
                );
            }
            Self::Rejected { status, body } => {
                let returned = body.text_field(&field.to_string());
                ensure!(
                    returned.as_deref() != Some(expected),
                    "rejected with {status} but the response still holds {field} {expected:?}"
                );
                ensure!(
                    listed != Some(expected),
                    "rejected with {status} but my_pets starts with {field} {expected:?}"
                );
            }
        }

        Ok(())
    }
}
