//! Client library for the cinecat movie catalog.
//!
//! Provides a typed client for the catalog REST API (movies, actors,
//! studios, genres, ratings, favorites and accounts).

/// Movie catalog REST API client.
pub mod catalog;
