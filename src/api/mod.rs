pub mod client;
pub mod response;

pub use client::PetFriends;
pub use response::{ApiResponse, ResponseBody};
