pub const API_KEY_PATH: &str = "api/key";
pub const PETS_PATH: &str = "api/pets";
pub const CREATE_PET_SIMPLE_PATH: &str = "api/create_pet_simple";
pub const SET_PHOTO_PATH: &str = "api/pets/set_photo";

pub const EMAIL_HEADER: &str = "email";
pub const PASSWORD_HEADER: &str = "password";
pub const AUTH_KEY_HEADER: &str = "auth_key";

pub const KEY_FIELD: &str = "key";
pub const PET_PHOTO_FIELD: &str = "pet_photo";

pub const ACCEPTED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpeg", "jpg", "heic"];
