//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::Result;
use super::types::{
    Actor, ActorForm, Favorite, Genre, Movie, MovieForm, MovieRating, NamePayload, RatingPayload,
    Studio,
};

/// Movie catalog resource operations.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// All operations require a bearer token and fail with
/// `CatalogError::AuthenticationRequired` before any request when none is
/// set. Reads return `None` and deletes return `false` on a non-2xx answer;
/// creates and updates return `CatalogError::Remote`.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    // --- Movies ---

    /// Lists all movies.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the HTTP request fails or the
    /// JSON body cannot be decoded.
    async fn movies(&self) -> Result<Option<Vec<Movie>>>;

    /// Fetches one movie.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the HTTP request fails or the
    /// JSON body cannot be decoded.
    async fn movie(&self, id: u64) -> Result<Option<Movie>>;

    /// Creates a movie, uploading its poster when given.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the server rejects the movie,
    /// the HTTP request fails or the JSON body cannot be decoded.
    async fn create_movie(&self, form: &MovieForm) -> Result<Movie>;

    /// Updates a movie.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the server rejects the update,
    /// the HTTP request fails or the JSON body cannot be decoded.
    async fn update_movie(&self, id: u64, form: &MovieForm) -> Result<Movie>;

    /// Deletes a movie; `false` if the server refused.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set or the HTTP request fails.
    async fn delete_movie(&self, id: u64) -> Result<bool>;

    // --- Actors ---

    /// Lists all actors.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the HTTP request fails or the
    /// JSON body cannot be decoded.
    async fn actors(&self) -> Result<Option<Vec<Actor>>>;

    /// Fetches one actor.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the HTTP request fails or the
    /// JSON body cannot be decoded.
    async fn actor(&self, id: u64) -> Result<Option<Actor>>;

    /// Creates an actor, uploading a photo when given.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the server rejects the actor,
    /// the HTTP request fails or the JSON body cannot be decoded.
    async fn create_actor(&self, form: &ActorForm) -> Result<Actor>;

    /// Updates an actor. `PhotoSource::Keep` re-sends the current photo.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the server rejects the update,
    /// the HTTP request fails or the JSON body cannot be decoded.
    async fn update_actor(&self, id: u64, form: &ActorForm) -> Result<Actor>;

    /// Deletes an actor; `false` if the server refused.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set or the HTTP request fails.
    async fn delete_actor(&self, id: u64) -> Result<bool>;

    // --- Studios ---

    /// Lists all studios.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the HTTP request fails or the
    /// JSON body cannot be decoded.
    async fn studios(&self) -> Result<Option<Vec<Studio>>>;

    /// Fetches one studio.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the HTTP request fails or the
    /// JSON body cannot be decoded.
    async fn studio(&self, id: u64) -> Result<Option<Studio>>;

    /// Creates a studio.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the server rejects the studio,
    /// the HTTP request fails or the JSON body cannot be decoded.
    async fn create_studio(&self, payload: &NamePayload) -> Result<Studio>;

    /// Renames a studio.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the server rejects the update,
    /// the HTTP request fails or the JSON body cannot be decoded.
    async fn update_studio(&self, id: u64, payload: &NamePayload) -> Result<Studio>;

    /// Deletes a studio; `false` if the server refused.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set or the HTTP request fails.
    async fn delete_studio(&self, id: u64) -> Result<bool>;

    // --- Genres ---

    /// Lists all genres.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the HTTP request fails or the
    /// JSON body cannot be decoded.
    async fn genres(&self) -> Result<Option<Vec<Genre>>>;

    /// Fetches one genre.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the HTTP request fails or the
    /// JSON body cannot be decoded.
    async fn genre(&self, id: u64) -> Result<Option<Genre>>;

    /// Creates a genre.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the server rejects the genre,
    /// the HTTP request fails or the JSON body cannot be decoded.
    async fn create_genre(&self, payload: &NamePayload) -> Result<Genre>;

    /// Renames a genre.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the server rejects the update,
    /// the HTTP request fails or the JSON body cannot be decoded.
    async fn update_genre(&self, id: u64, payload: &NamePayload) -> Result<Genre>;

    /// Deletes a genre; `false` if the server refused.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set or the HTTP request fails.
    async fn delete_genre(&self, id: u64) -> Result<bool>;

    // --- Ratings ---

    /// Lists all ratings.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the HTTP request fails or the
    /// JSON body cannot be decoded.
    async fn ratings(&self) -> Result<Option<Vec<MovieRating>>>;

    /// Fetches one rating.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the HTTP request fails or the
    /// JSON body cannot be decoded.
    async fn rating(&self, id: u64) -> Result<Option<MovieRating>>;

    /// Posts a review.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the server rejects the review,
    /// the HTTP request fails or the JSON body cannot be decoded.
    async fn create_rating(&self, payload: &RatingPayload) -> Result<MovieRating>;

    /// Edits a review.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the server rejects the update,
    /// the HTTP request fails or the JSON body cannot be decoded.
    async fn update_rating(&self, id: u64, payload: &RatingPayload) -> Result<MovieRating>;

    /// Deletes a review; `false` if the server refused.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set or the HTTP request fails.
    async fn delete_rating(&self, id: u64) -> Result<bool>;

    // --- Favorites ---

    /// Lists the current user's favorite movies.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the HTTP request fails or the
    /// JSON body cannot be decoded.
    async fn favorites(&self) -> Result<Option<Vec<Favorite>>>;

    /// Marks a movie as favorite; `false` if the server refused.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set or the HTTP request fails.
    async fn add_favorite(&self, movie_id: u64) -> Result<bool>;

    /// Removes a movie from the favorites; `false` if the server refused.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set or the HTTP request fails.
    async fn remove_favorite(&self, movie_id: u64) -> Result<bool>;
}
