//! Client library for the veterinary clinic API.
//!
//! The `data` feature exposes the domain model, form validation and
//! pagination helpers. The `client` feature adds the HTTP gateway, the
//! session, the paginated list controllers and the page services built on
//! them.

pub mod domain;
pub mod forms;
pub mod models;
pub mod pagination;

#[cfg(feature = "client")]
pub mod controller;
#[cfg(feature = "client")]
pub mod dto;
#[cfg(feature = "client")]
pub mod gateway;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod session;
