//! `LocalCatalogApi` implementation for `CatalogClient`.

use reqwest::Method;
use reqwest::header::CONTENT_LENGTH;
use tracing::instrument;

use super::api::LocalCatalogApi;
use super::client::CatalogClient;
use super::error::Result;
use super::form::MultipartForm;
use super::types::{
    Actor, ActorForm, Favorite, Genre, Movie, MovieForm, MovieRating, NamePayload, RatingPayload,
    Studio,
};

/// Fills the movie fields of a multipart form.
async fn movie_fields<'a>(form: MultipartForm<'a>, movie: &MovieForm) -> MultipartForm<'a> {
    form.text("title", movie.title.as_str())
        .opt_text("release_year", movie.release_year)
        .opt_text("duration", movie.duration)
        .opt_text("description", movie.description.as_ref())
        .opt_text("studio_id", movie.studio_id)
        .opt_text("age_rating_id", movie.age_rating_id)
        .list("genres[]", &movie.genre_ids)
        .opt_text("watch_url", movie.watch_url.as_ref())
        .photo("photo", movie.photo.as_ref())
        .await
}

/// Fills the actor fields of a multipart form.
async fn actor_fields<'a>(form: MultipartForm<'a>, actor: &ActorForm) -> MultipartForm<'a> {
    form.text("first_name", actor.first_name.as_str())
        .text("last_name", actor.last_name.as_str())
        .opt_text(
            "birth_date",
            actor.birth_date.map(|d| d.format("%Y-%m-%d")),
        )
        .opt_text("biography", actor.biography.as_ref())
        .photo("photo", actor.photo.as_ref())
        .await
}

impl LocalCatalogApi for CatalogClient {
    // --- Movies ---

    #[instrument(skip_all)]
    async fn movies(&self) -> Result<Option<Vec<Movie>>> {
        self.get_authorized("movies", "api/movies").await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn movie(&self, id: u64) -> Result<Option<Movie>> {
        self.get_authorized("movie", &format!("api/movies/{id}"))
            .await
    }

    #[instrument(skip_all)]
    async fn create_movie(&self, form: &MovieForm) -> Result<Movie> {
        let operation = "create_movie";
        self.bearer(operation)?;
        let multipart = movie_fields(self.form(), form).await;
        self.post_form_authorized(operation, "api/movies/create", multipart)
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn update_movie(&self, id: u64, form: &MovieForm) -> Result<Movie> {
        let operation = "update_movie";
        self.bearer(operation)?;
        let multipart = movie_fields(self.form(), form).await;
        self.post_form_authorized(operation, &format!("api/movies/update/{id}"), multipart)
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn delete_movie(&self, id: u64) -> Result<bool> {
        self.send_authorized("delete_movie", Method::DELETE, &format!("api/movies/{id}"))
            .await
    }

    // --- Actors ---

    #[instrument(skip_all)]
    async fn actors(&self) -> Result<Option<Vec<Actor>>> {
        self.get_authorized("actors", "api/actors").await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn actor(&self, id: u64) -> Result<Option<Actor>> {
        self.get_authorized("actor", &format!("api/actors/{id}"))
            .await
    }

    #[instrument(skip_all)]
    async fn create_actor(&self, form: &ActorForm) -> Result<Actor> {
        let operation = "create_actor";
        self.bearer(operation)?;
        let multipart = actor_fields(self.form(), form).await;
        self.post_form_authorized(operation, "api/actors", multipart)
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn update_actor(&self, id: u64, form: &ActorForm) -> Result<Actor> {
        let operation = "update_actor";
        self.bearer(operation)?;
        let multipart = actor_fields(self.form(), form).await;
        self.post_form_authorized(operation, &format!("api/actors/update/{id}"), multipart)
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn delete_actor(&self, id: u64) -> Result<bool> {
        self.send_authorized("delete_actor", Method::DELETE, &format!("api/actors/{id}"))
            .await
    }

    // --- Studios ---

    #[instrument(skip_all)]
    async fn studios(&self) -> Result<Option<Vec<Studio>>> {
        self.get_authorized("studios", "api/studios").await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn studio(&self, id: u64) -> Result<Option<Studio>> {
        self.get_authorized("studio", &format!("api/studios/{id}"))
            .await
    }

    #[instrument(skip_all)]
    async fn create_studio(&self, payload: &NamePayload) -> Result<Studio> {
        self.post_json_authorized("create_studio", "api/studios", payload)
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn update_studio(&self, id: u64, payload: &NamePayload) -> Result<Studio> {
        self.post_json_authorized("update_studio", &format!("api/studios/{id}"), payload)
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn delete_studio(&self, id: u64) -> Result<bool> {
        self.send_authorized("delete_studio", Method::DELETE, &format!("api/studios/{id}"))
            .await
    }

    // --- Genres ---

    #[instrument(skip_all)]
    async fn genres(&self) -> Result<Option<Vec<Genre>>> {
        self.get_authorized("genres", "api/genres").await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn genre(&self, id: u64) -> Result<Option<Genre>> {
        self.get_authorized("genre", &format!("api/genres/{id}"))
            .await
    }

    #[instrument(skip_all)]
    async fn create_genre(&self, payload: &NamePayload) -> Result<Genre> {
        self.post_json_authorized("create_genre", "api/genres", payload)
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn update_genre(&self, id: u64, payload: &NamePayload) -> Result<Genre> {
        self.post_json_authorized("update_genre", &format!("api/genres/{id}"), payload)
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn delete_genre(&self, id: u64) -> Result<bool> {
        self.send_authorized("delete_genre", Method::DELETE, &format!("api/genres/{id}"))
            .await
    }

    // --- Ratings ---

    #[instrument(skip_all)]
    async fn ratings(&self) -> Result<Option<Vec<MovieRating>>> {
        self.get_authorized("ratings", "api/ratings").await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn rating(&self, id: u64) -> Result<Option<MovieRating>> {
        self.get_authorized("rating", &format!("api/ratings/{id}"))
            .await
    }

    #[instrument(skip_all)]
    async fn create_rating(&self, payload: &RatingPayload) -> Result<MovieRating> {
        self.post_json_authorized("create_rating", "api/ratings", payload)
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn update_rating(&self, id: u64, payload: &RatingPayload) -> Result<MovieRating> {
        self.post_json_authorized("update_rating", &format!("api/ratings/{id}"), payload)
            .await
    }

    #[instrument(skip_all, fields(id = id))]
    async fn delete_rating(&self, id: u64) -> Result<bool> {
        self.send_authorized("delete_rating", Method::DELETE, &format!("api/ratings/{id}"))
            .await
    }

    // --- Favorites ---

    #[instrument(skip_all)]
    async fn favorites(&self) -> Result<Option<Vec<Favorite>>> {
        let movies: Option<Vec<Movie>> = self
            .get_authorized("favorites", "api/movies/favorites")
            .await?;
        Ok(movies.map(|list| list.into_iter().map(Favorite::from).collect()))
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn add_favorite(&self, movie_id: u64) -> Result<bool> {
        let path = format!("api/movies/{movie_id}/favorite");
        // Body-less POST, sent with `Content-Length: 0`.
        let request = self
            .authorized("add_favorite", Method::POST, &path)?
            .header(CONTENT_LENGTH, 0);
        self.fetch_status(request, &path).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn remove_favorite(&self, movie_id: u64) -> Result<bool> {
        self.send_authorized(
            "remove_favorite",
            Method::DELETE,
            &format!("api/movies/{movie_id}/favorite"),
        )
        .await
    }
}
