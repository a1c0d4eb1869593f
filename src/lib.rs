//! Terminal client for a REST backend of real-estate property listings.
//!
//! [`client::ListingClient`] mirrors the backend's collection, renders it as
//! a [`view::Table`], and sends create, update, and delete requests through
//! an [`api::PropertyApi`], reloading the whole listing after every write.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod view;

pub use api::{ApiError, HttpPropertyApi, PropertyApi};
pub use client::{ClientError, ClientState, Confirm, ListingClient, SubmitKind};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{Property, PropertyForm, PropertyId, PropertyInput};
pub use view::{RowAction, Table};
