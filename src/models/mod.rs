pub mod auth;
pub mod pet;
