//! Movie catalog REST API client module.
//!
//! Builds JSON and multipart requests against the catalog backend,
//! attaches the bearer token of the current session and decodes
//! responses into typed models.

mod api;
mod client;
mod decode;
mod error;
mod form;
mod resources;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CatalogClient, CatalogClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::{CatalogError, Result};
pub use form::{MultipartForm, PhotoSource};
pub use types::{
    Actor, ActorForm, AdminCredentials, AgeRating, Favorite, Genre, MessageResponse, Movie,
    MovieForm, MovieRating, NamePayload, ProfileUpdate, RatingPayload, Registration, Studio,
    TokenResponse, User, UserCredentials, UserEnvelope,
};
