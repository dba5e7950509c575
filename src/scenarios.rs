//! Scripted scenarios run against a Pet Friends deployment.
//!
//! Each scenario authenticates on its own, drives a short sequence of client
//! calls and fails with a descriptive error when an expectation is not met.
//! Order matters only through the service's persisted pets: update, delete
//! and photo scenarios need at least one pet in `my_pets`.

use crate::{
    api::PetFriends,
    config::Settings,
    consts,
    models::{
        auth::{AuthKey, Credentials},
        pet::{Pet, PetField, PetFilter, PetForm},
    },
    oracle::Outcome,
};
use anyhow::{Context, Result, ensure};
use derive_more::Display;
use reqwest::StatusCode;

const VERY_LONG_NAME: &str =
    "CpeZ5e69i1u20zqzveOx32Snjr0OFliAvzOhtdIJRQqJ8zQkK2Vwjl8CaZ2A6UyJp1Lv9zP0pw6nRQ9a0tov0nOfN3pf1fGH2uRs";

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Scenario {
    #[display("get-api-key-for-valid-user")]
    GetApiKeyForValidUser,
    #[display("get-all-pets-with-valid-key")]
    GetAllPetsWithValidKey,
    #[display("add-new-pet-with-valid-data")]
    AddNewPetWithValidData,
    #[display("update-pet-info-with-valid-data")]
    UpdatePetInfoWithValidData,
    #[display("delete-pet-by-pet-id")]
    DeletePetByPetId,
    #[display("add-new-pet-simple-with-valid-data")]
    AddNewPetSimpleWithValidData,
    #[display("add-photo-of-pet-with-valid-data")]
    AddPhotoOfPetWithValidData,
    #[display("get-api-key-with-invalid-email")]
    GetApiKeyWithInvalidEmail,
    #[display("get-api-key-with-invalid-password")]
    GetApiKeyWithInvalidPassword,
    #[display("get-api-key-for-invalid-user")]
    GetApiKeyForInvalidUser,
    #[display("add-new-pet-simple-with-invalid-auth-key")]
    AddNewPetSimpleWithInvalidAuthKey,
    #[display("add-new-pet-simple-with-empty-data")]
    AddNewPetSimpleWithEmptyData,
    #[display("add-new-pet-simple-with-symbol-name")]
    AddNewPetSimpleWithSymbolName,
    #[display("add-new-pet-simple-with-very-long-name")]
    AddNewPetSimpleWithVeryLongName,
    #[display("add-new-pet-simple-with-non-standard-animal-type")]
    AddNewPetSimpleWithNonStandardAnimalType,
    #[display("add-new-pet-simple-with-non-standard-age")]
    AddNewPetSimpleWithNonStandardAge,
}

impl Scenario {
    /// Every scenario, in the order the suite is meant to run.
    pub const ALL: [Scenario; 16] = [
        Scenario::GetApiKeyForValidUser,
        Scenario::GetAllPetsWithValidKey,
        Scenario::AddNewPetWithValidData,
        Scenario::UpdatePetInfoWithValidData,
        Scenario::DeletePetByPetId,
        Scenario::AddNewPetSimpleWithValidData,
        Scenario::AddPhotoOfPetWithValidData,
        Scenario::GetApiKeyWithInvalidEmail,
        Scenario::GetApiKeyWithInvalidPassword,
        Scenario::GetApiKeyForInvalidUser,
        Scenario::AddNewPetSimpleWithInvalidAuthKey,
        Scenario::AddNewPetSimpleWithEmptyData,
        Scenario::AddNewPetSimpleWithSymbolName,
        Scenario::AddNewPetSimpleWithVeryLongName,
        Scenario::AddNewPetSimpleWithNonStandardAnimalType,
        Scenario::AddNewPetSimpleWithNonStandardAge,
    ];

    pub async fn run(self, client: &PetFriends, settings: &Settings) -> Result<()> {
        match self {
            Scenario::GetApiKeyForValidUser => get_api_key_for_valid_user(client, settings).await,
            Scenario::GetAllPetsWithValidKey => get_all_pets_with_valid_key(client, settings).await,
            Scenario::AddNewPetWithValidData => add_new_pet_with_valid_data(client, settings).await,
            Scenario::UpdatePetInfoWithValidData => {
                update_pet_info_with_valid_data(client, settings).await
            }
            Scenario::DeletePetByPetId => delete_pet_by_pet_id(client, settings).await,
            Scenario::AddNewPetSimpleWithValidData => {
                add_new_pet_simple_with_valid_data(client, settings).await
            }
            Scenario::AddPhotoOfPetWithValidData => {
                add_photo_of_pet_with_valid_data(client, settings).await
            }
            Scenario::GetApiKeyWithInvalidEmail => {
                expect_no_api_key(client, &settings.invalid_email_credentials()).await
            }
            Scenario::GetApiKeyWithInvalidPassword => {
                expect_no_api_key(client, &settings.invalid_password_credentials()).await
            }
            Scenario::GetApiKeyForInvalidUser => {
                expect_no_api_key(client, &settings.invalid_credentials()).await
            }
            Scenario::AddNewPetSimpleWithInvalidAuthKey => {
                add_new_pet_simple_with_invalid_auth_key(client, settings).await
            }
            Scenario::AddNewPetSimpleWithEmptyData => {
                let pet = PetForm::new("", "", "");
                add_boundary_pet(client, settings, &pet, PetField::Name, "empty data").await
            }
            Scenario::AddNewPetSimpleWithSymbolName => {
                let pet = PetForm::new("@#$%^&*()-±?`~|/=+", "dog", "1");
                add_boundary_pet(client, settings, &pet, PetField::Name, "a symbol-only name").await
            }
            Scenario::AddNewPetSimpleWithVeryLongName => {
                let pet = PetForm::new(VERY_LONG_NAME, "dog", "1");
                let description = format!("a {} character name", VERY_LONG_NAME.chars().count());
                add_boundary_pet(client, settings, &pet, PetField::Name, &description).await
            }
            Scenario::AddNewPetSimpleWithNonStandardAnimalType => {
                let pet = PetForm::new("Lucky", "rabbit's foot", "1");
                add_boundary_pet(
                    client,
                    settings,
                    &pet,
                    PetField::AnimalType,
                    "a non-standard animal type",
                )
                .await
            }
            Scenario::AddNewPetSimpleWithNonStandardAge => {
                let pet = PetForm::new("Fairy", "goldfish", "10000");
                add_boundary_pet(client, settings, &pet, PetField::Age, "an impossible age").await
            }
        }
    }
}

async fn authenticate(client: &PetFriends, settings: &Settings) -> Result<AuthKey> {
    let response = client.get_api_key(&settings.valid_credentials()).await?;

    response.auth_key().with_context(|| {
        format!(
            "no auth key issued for the valid user, status {}: {}",
            response.status, response.body
        )
    })
}

async fn my_pets(client: &PetFriends, auth_key: &AuthKey) -> Result<Vec<Pet>> {
    client
        .get_list_of_pets(auth_key, PetFilter::MyPets)
        .await?
        .pets()
}

async fn first_of_my_pets(client: &PetFriends, auth_key: &AuthKey) -> Result<Pet> {
    my_pets(client, auth_key)
        .await?
        .into_iter()
        .next()
        .context("there are no pets in my_pets")
}

fn ensure_first_named(my_pets: &[Pet], name: &str) -> Result<()> {
    let listed = my_pets.first().map(|pet| pet.name.as_str());
    ensure!(
        listed == Some(name),
        "expected {name:?} first in my_pets, found {listed:?}"
    );
    Ok(())
}

async fn get_api_key_for_valid_user(client: &PetFriends, settings: &Settings) -> Result<()> {
    let response = client.get_api_key(&settings.valid_credentials()).await?;

    ensure!(
        response.status == StatusCode::OK,
        "expected 200 for the valid user, got {}",
        response.status
    );
    ensure!(
        response.body.has_field(consts::KEY_FIELD),
        "no key in response: {}",
        response.body
    );
    Ok(())
}

async fn get_all_pets_with_valid_key(client: &PetFriends, settings: &Settings) -> Result<()> {
    let auth_key = authenticate(client, settings).await?;
    let response = client.get_list_of_pets(&auth_key, PetFilter::All).await?;

    ensure!(
        response.status == StatusCode::OK,
        "expected 200 listing all pets, got {}",
        response.status
    );
    ensure!(!response.pets()?.is_empty(), "the list of all pets is empty");
    Ok(())
}

async fn add_new_pet_with_valid_data(client: &PetFriends, settings: &Settings) -> Result<()> {
    let pet = PetForm::new("Bam", "rat", "2");
    let auth_key = authenticate(client, settings).await?;

    let response = client
        .add_new_pet(&auth_key, &pet, &settings.fixture("b14.jpeg"))
        .await?;
    let my_pets = my_pets(client, &auth_key).await?;

    ensure!(
        response.status == StatusCode::OK,
        "expected 200 adding a pet with photo, got {}: {}",
        response.status,
        response.body
    );
    ensure!(response.pet()?.name == pet.name, "created pet has another name");
    ensure_first_named(&my_pets, &pet.name)
}

async fn update_pet_info_with_valid_data(client: &PetFriends, settings: &Settings) -> Result<()> {
    let pet = PetForm::new("Bob", "dog", "5");
    let auth_key = authenticate(client, settings).await?;
    let target = first_of_my_pets(client, &auth_key).await?;

    let response = client.update_pet_info(&auth_key, &target.id, &pet).await?;
    let my_pets = my_pets(client, &auth_key).await?;

    ensure!(
        response.status == StatusCode::OK,
        "expected 200 updating pet {}, got {}: {}",
        target.id,
        response.status,
        response.body
    );
    ensure!(response.pet()?.name == pet.name, "updated pet has another name");
    ensure_first_named(&my_pets, &pet.name)
}

// Removal is confirmed by the status alone; the listing is not re-checked.
async fn delete_pet_by_pet_id(client: &PetFriends, settings: &Settings) -> Result<()> {
    let auth_key = authenticate(client, settings).await?;
    let target = first_of_my_pets(client, &auth_key).await?;

    let status = client.delete_pet_by_pet_id(&auth_key, &target.id).await?;

    ensure!(
        status == StatusCode::OK,
        "expected 200 deleting pet {}, got {status}",
        target.id
    );
    Ok(())
}

async fn add_new_pet_simple_with_valid_data(client: &PetFriends, settings: &Settings) -> Result<()> {
    let pet = PetForm::new("Bonnie", "cat", "7");
    let auth_key = authenticate(client, settings).await?;

    let response = client.add_new_pet_simple(&auth_key, &pet).await?;
    let my_pets = my_pets(client, &auth_key).await?;

    ensure!(
        response.status == StatusCode::OK,
        "expected 200 adding a pet, got {}: {}",
        response.status,
        response.body
    );
    ensure!(response.pet()?.name == pet.name, "created pet has another name");
    ensure_first_named(&my_pets, &pet.name)
}

async fn add_photo_of_pet_with_valid_data(client: &PetFriends, settings: &Settings) -> Result<()> {
    let auth_key = authenticate(client, settings).await?;
    let target = first_of_my_pets(client, &auth_key).await?;

    let response = client
        .add_photo_of_pet(&auth_key, &target.id, &settings.fixture("cat1.jpeg"))
        .await?;
    let listed = first_of_my_pets(client, &auth_key).await?;

    ensure!(
        response.status == StatusCode::OK,
        "expected 200 setting the photo of pet {}, got {}: {}",
        target.id,
        response.status,
        response.body
    );
    let photo = response.pet()?.pet_photo;
    ensure!(photo.is_some(), "pet {} has no photo after upload", target.id);
    ensure!(
        photo == listed.pet_photo,
        "uploaded photo differs from the listed one"
    );
    Ok(())
}

async fn expect_no_api_key(client: &PetFriends, credentials: &Credentials) -> Result<()> {
    let response = client.get_api_key(credentials).await?;

    ensure!(
        response.status != StatusCode::OK,
        "invalid credentials for {} were accepted",
        credentials.email
    );
    ensure!(
        !response.body.has_field(consts::KEY_FIELD),
        "a key was issued with status {}",
        response.status
    );
    log::info!(
        "response status {}, api key not received: {}",
        response.status,
        response.body
    );
    Ok(())
}

async fn add_new_pet_simple_with_invalid_auth_key(
    client: &PetFriends,
    settings: &Settings,
) -> Result<()> {
    let pet = PetForm::new("Bonnie", "cat", "7");

    let response = client
        .add_new_pet_simple(&settings.invalid_auth_key(), &pet)
        .await?;

    ensure!(
        response.status != StatusCode::OK,
        "a pet was created with an invalid auth key"
    );
    log::info!("response status {}: {}", response.status, response.body);
    Ok(())
}

/// Descriptive check: records whether the service takes `pet`, and requires
/// the outcome to be consistent either way.
async fn add_boundary_pet(
    client: &PetFriends,
    settings: &Settings,
    pet: &PetForm,
    field: PetField,
    description: &str,
) -> Result<()> {
    let auth_key = authenticate(client, settings).await?;

    let response = client.add_new_pet_simple(&auth_key, pet).await?;
    let my_pets = my_pets(client, &auth_key).await?;

    let outcome = Outcome::from_response(response)?;
    outcome.verify(field, pet.get(field), &my_pets)?;

    match outcome {
        Outcome::Accepted(created) => {
            log::info!("service accepts a pet with {description}: {created:?}")
        }
        Outcome::Rejected { status, .. } => {
            log::info!("service refuses a pet with {description} ({status})")
        }
    }
    Ok(())
}
