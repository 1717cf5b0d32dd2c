//! Domain entities and value objects shared by every layer of the client.

pub mod access;
pub mod appointment;
pub mod auth;
pub mod history;
pub mod pet;
pub mod species;
pub mod statistics;
pub mod types;
pub mod user;
