pub mod admin;
pub mod api;
pub mod embed;
pub mod health_check;
pub mod login;
