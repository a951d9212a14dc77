pub mod auth;
pub mod friends;
pub mod users;
