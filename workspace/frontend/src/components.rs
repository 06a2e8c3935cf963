pub mod admin;
pub mod chat;
pub mod counselor;
pub mod layout;
pub mod settings;
