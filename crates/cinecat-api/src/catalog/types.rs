//! Catalog resource models and request payloads.
//!
//! One canonical `snake_case` wire schema per resource. Responses go
//! through `decode::from_str`, which folds foreign key casings first.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::decode::{lenient_date, lenient_datetime, lenient_int, lenient_opt_int};
use super::form::PhotoSource;

// --- Resources ---

/// A catalog user. Passwords are write-only and never decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    #[serde(deserialize_with = "lenient_int")]
    pub id: u64,
    /// Role ID.
    #[serde(
        default,
        deserialize_with = "lenient_opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub roles_id: Option<u64>,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// E-mail address.
    #[serde(default)]
    pub email: String,
    /// Gender as stored by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Server-side avatar path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// API token, when the server chooses to echo it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Creation timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Movie ID.
    #[serde(deserialize_with = "lenient_int")]
    pub id: u64,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Release year. Older servers sent it as a string.
    #[serde(
        default,
        deserialize_with = "lenient_opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_year: Option<i32>,
    /// Running time in minutes.
    #[serde(
        default,
        deserialize_with = "lenient_opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<u32>,
    /// Synopsis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Server-side poster path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Studio ID (flat form).
    #[serde(
        default,
        deserialize_with = "lenient_opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub studio_id: Option<u64>,
    /// Studio (embedded form).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studio: Option<Studio>,
    /// Age rating ID (flat form).
    #[serde(
        default,
        deserialize_with = "lenient_opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub age_rating_id: Option<u64>,
    /// Age rating (embedded form).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_rating: Option<AgeRating>,
    /// Genres.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<Genre>,
    /// Cast.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actors: Vec<Actor>,
    /// Reviews.
    #[serde(default, alias = "rating", skip_serializing_if = "Vec::is_empty")]
    pub ratings: Vec<MovieRating>,
    /// Streaming link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_url: Option<String>,
    /// Creation timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Movie {
    /// Studio ID from either the flat or the embedded form.
    #[must_use]
    pub fn studio_ref(&self) -> Option<u64> {
        self.studio_id.or_else(|| self.studio.as_ref().map(|s| s.id))
    }

    /// Age rating ID from either the flat or the embedded form.
    #[must_use]
    pub fn age_rating_ref(&self) -> Option<u64> {
        self.age_rating_id
            .or_else(|| self.age_rating.as_ref().map(|r| r.id))
    }
}

/// Age rating (e.g. "16+").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRating {
    /// Age rating ID.
    #[serde(deserialize_with = "lenient_int")]
    pub id: u64,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// An actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Actor ID.
    #[serde(deserialize_with = "lenient_int")]
    pub id: u64,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Date of birth.
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<NaiveDate>,
    /// Biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    /// Server-side photo path.
    #[serde(default, alias = "photo_file_path", skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Actor {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// A film studio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Studio {
    /// Studio ID.
    #[serde(deserialize_with = "lenient_int")]
    pub id: u64,
    /// Studio name.
    #[serde(default)]
    pub name: String,
    /// Creation timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Movies produced by the studio.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub movies: Vec<Movie>,
}

/// A genre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre ID.
    #[serde(deserialize_with = "lenient_int")]
    pub id: u64,
    /// Genre name.
    #[serde(default)]
    pub name: String,
    /// Creation timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Movies in the genre.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub movies: Vec<Movie>,
}

/// A user's review of a movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRating {
    /// Rating ID.
    #[serde(deserialize_with = "lenient_int")]
    pub id: u64,
    /// Reviewed movie ID.
    #[serde(default, deserialize_with = "lenient_int")]
    pub movies_id: u64,
    /// Author ID.
    #[serde(
        default,
        deserialize_with = "lenient_opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub users_id: Option<u64>,
    /// Review text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    /// Creation timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Embedded movie.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie: Option<Movie>,
    /// Embedded author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// A favorited movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// The movie.
    pub movie: Movie,
}

impl From<Movie> for Favorite {
    fn from(movie: Movie) -> Self {
        Self { movie }
    }
}

// --- Response shells ---

/// Body of `POST /api/login` and `POST /login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    /// Bearer token (absent on failure).
    #[serde(default)]
    pub token: Option<String>,
}

/// Body of `POST /api/logout`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    /// Server message.
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /api/user` answers either a bare user or `{"user": ...}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserEnvelope {
    /// `{"user": {...}}`.
    Wrapped {
        /// The user.
        user: User,
    },
    /// `{...}`.
    Bare(User),
}

impl UserEnvelope {
    /// Unwraps the user.
    #[must_use]
    pub fn into_user(self) -> User {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

// --- Request payloads ---

/// Credentials for `POST /api/login` (administrators).
#[derive(Clone, Serialize)]
pub struct AdminCredentials {
    /// E-mail address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl AdminCredentials {
    /// Creates admin credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Credentials for `POST /login` (regular users).
#[derive(Clone, Serialize)]
pub struct UserCredentials {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl UserCredentials {
    /// Creates user credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// New account. Sent as JSON to `/register` or as a multipart form with an
/// optional avatar to `/api/register`.
#[derive(Clone, Serialize)]
pub struct Registration {
    /// Login name.
    pub username: String,
    /// E-mail address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password repeated.
    pub password_confirmation: String,
    /// Gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Avatar to upload (multipart registration only).
    #[serde(skip)]
    pub avatar: Option<PhotoSource>,
}

impl Registration {
    /// Creates a registration whose confirmation matches `password`.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            email: email.into(),
            password_confirmation: password.clone(),
            password,
            gender: None,
            avatar: None,
        }
    }

    /// Credentials for the login that follows a JSON registration.
    #[must_use]
    pub fn credentials(&self) -> UserCredentials {
        UserCredentials::new(&self.username, &self.password)
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("gender", &self.gender)
            .field("avatar", &self.avatar)
            .finish_non_exhaustive()
    }
}

/// Profile changes for `POST /api/user/profile`.
#[derive(Clone, Default)]
pub struct ProfileUpdate {
    /// Login name.
    pub username: String,
    /// E-mail address.
    pub email: String,
    /// New password (unchanged when `None`).
    pub password: Option<String>,
    /// New password repeated.
    pub password_confirmation: Option<String>,
    /// Gender.
    pub gender: Option<String>,
    /// New avatar.
    pub avatar: Option<PhotoSource>,
}

impl From<&User> for ProfileUpdate {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            gender: user.gender.clone(),
            ..Self::default()
        }
    }
}

impl std::fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("gender", &self.gender)
            .field("avatar", &self.avatar)
            .finish_non_exhaustive()
    }
}

/// Multipart fields for movie create/update.
#[derive(Debug, Clone, Default)]
pub struct MovieForm {
    /// Title.
    pub title: String,
    /// Release year.
    pub release_year: Option<i32>,
    /// Running time in minutes.
    pub duration: Option<u32>,
    /// Synopsis.
    pub description: Option<String>,
    /// Studio ID.
    pub studio_id: Option<u64>,
    /// Age rating ID.
    pub age_rating_id: Option<u64>,
    /// Genre IDs, sent as repeated `genres[]` fields.
    pub genre_ids: Vec<u64>,
    /// Streaming link.
    pub watch_url: Option<String>,
    /// Poster to upload.
    pub photo: Option<PhotoSource>,
}

impl From<&Movie> for MovieForm {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            release_year: movie.release_year,
            duration: movie.duration,
            description: movie.description.clone(),
            studio_id: movie.studio_ref(),
            age_rating_id: movie.age_rating_ref(),
            genre_ids: movie.genres.iter().map(|g| g.id).collect(),
            watch_url: movie.watch_url.clone(),
            photo: None,
        }
    }
}

/// Multipart fields for actor create/update.
#[derive(Debug, Clone, Default)]
pub struct ActorForm {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Date of birth, sent as `yyyy-MM-dd`.
    pub birth_date: Option<NaiveDate>,
    /// Biography.
    pub biography: Option<String>,
    /// Photo to upload, or the existing photo to keep.
    pub photo: Option<PhotoSource>,
}

impl From<&Actor> for ActorForm {
    fn from(actor: &Actor) -> Self {
        Self {
            first_name: actor.first_name.clone(),
            last_name: actor.last_name.clone(),
            birth_date: actor.birth_date,
            biography: actor.biography.clone(),
            photo: actor.photo.clone().map(PhotoSource::Keep),
        }
    }
}

/// JSON body for studios and genres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamePayload {
    /// Name.
    pub name: String,
}

impl NamePayload {
    /// Creates a payload.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// JSON body for ratings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingPayload {
    /// Reviewed movie ID.
    pub movies_id: u64,
    /// Review text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::super::decode;
    use super::*;

    #[test]
    fn test_parse_movie_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/catalog/movie_alien.json");

        // Act
        let movie: Movie = decode::from_str(json, "api/movies/1").unwrap();

        // Assert
        assert_eq!(movie.id, 1);
        assert_eq!(movie.title, "Alien");
        assert_eq!(movie.release_year, Some(1979));
        assert_eq!(movie.duration, Some(117));
        assert_eq!(movie.studio_ref(), Some(3));
        assert_eq!(movie.age_rating_ref(), Some(4));
        assert_eq!(movie.genres.len(), 2);
        assert_eq!(movie.actors[0].full_name(), "Sigourney Weaver");
        assert_eq!(movie.ratings[0].review_text.as_deref(), Some("In space no one can hear you scream."));
    }

    #[test]
    fn test_parse_legacy_pascal_case_movie() {
        // Arrange: older servers sent PascalCase keys and a string year
        let json = r#"{
            "Id": 9,
            "Title": "Heat",
            "ReleaseYear": "1995",
            "Duration": 170,
            "Photo": "movies/heat.jpg",
            "Studio": {"Id": 2, "Name": "Warner Bros."},
            "AgeRating": {"Id": 5},
            "Rating": [{"Id": 1, "MoviesId": 9, "ReviewText": "Diner scene."}]
        }"#;

        // Act
        let movie: Movie = decode::from_str(json, "api/movies/9").unwrap();

        // Assert
        assert_eq!(movie.release_year, Some(1995));
        assert_eq!(movie.studio.as_ref().unwrap().name, "Warner Bros.");
        assert_eq!(movie.age_rating_ref(), Some(5));
        assert_eq!(movie.ratings.len(), 1);
        assert_eq!(movie.ratings[0].movies_id, 9);
    }

    #[test]
    fn test_movie_wire_form_survives_server_echo() {
        // Arrange
        let movie = Movie {
            id: 0,
            title: String::from("Solaris"),
            release_year: Some(1972),
            duration: Some(166),
            description: Some(String::from("A psychologist is sent to a station.")),
            studio_id: Some(8),
            genres: vec![Genre {
                id: 2,
                name: String::from("Drama"),
                ..Genre::default()
            }],
            watch_url: Some(String::from("https://watch.example/solaris")),
            ..Movie::default()
        };
        let mut echo = serde_json::to_value(&movie).unwrap();
        echo["id"] = serde_json::json!(42);

        // Act
        let decoded: Movie = decode::from_str(&echo.to_string(), "api/movies/create").unwrap();

        // Assert
        assert_eq!(decoded.id, 42);
        assert_eq!(Movie { id: 0, ..decoded }, movie);
    }

    #[test]
    fn test_actor_and_rating_wire_forms_survive_server_echo() {
        // Arrange
        let actor = Actor {
            id: 5,
            first_name: String::from("Ian"),
            last_name: String::from("Holm"),
            birth_date: NaiveDate::from_ymd_opt(1931, 9, 12),
            biography: Some(String::from("English actor.")),
            photo: Some(String::from("actors/holm.jpg")),
        };
        let rating = MovieRating {
            id: 3,
            movies_id: 1,
            users_id: Some(7),
            review_text: Some(String::from("Perfect organism.")),
            ..MovieRating::default()
        };

        // Act
        let actor_echo: Actor =
            decode::from_str(&serde_json::to_string(&actor).unwrap(), "api/actors").unwrap();
        let rating_echo: MovieRating =
            decode::from_str(&serde_json::to_string(&rating).unwrap(), "api/ratings").unwrap();

        // Assert
        assert_eq!(actor_echo, actor);
        assert_eq!(rating_echo, rating);
    }

    #[test]
    fn test_studio_and_genre_wire_forms_survive_server_echo() {
        // Arrange
        let created: DateTime<Utc> = "2024-09-01T00:00:00Z".parse().unwrap();
        let updated: DateTime<Utc> = "2024-09-02T12:30:00Z".parse().unwrap();
        let alien = Movie {
            id: 1,
            title: String::from("Alien"),
            release_year: Some(1979),
            ..Movie::default()
        };
        let studio = Studio {
            id: 3,
            name: String::from("Brandywine Productions"),
            created_at: Some(created),
            updated_at: Some(updated),
            movies: vec![alien.clone()],
        };
        let genre = Genre {
            id: 1,
            name: String::from("Horror"),
            created_at: Some(created),
            updated_at: Some(updated),
            movies: vec![alien],
        };

        // Act
        let studio_echo: Studio =
            decode::from_str(&serde_json::to_string(&studio).unwrap(), "api/studios").unwrap();
        let genre_echo: Genre =
            decode::from_str(&serde_json::to_string(&genre).unwrap(), "api/genres").unwrap();

        // Assert
        assert_eq!(studio_echo, studio);
        assert_eq!(genre_echo, genre);
    }

    #[test]
    fn test_entities_without_id_are_rejected() {
        // Arrange
        let body = r#"{"message":"Unauthenticated."}"#;

        // Act & Assert
        assert!(decode::from_str::<Movie>(body, "api/movies/1").is_err());
        assert!(decode::from_str::<Actor>(body, "api/actors/1").is_err());
        assert!(decode::from_str::<Studio>(body, "api/studios/1").is_err());
        assert!(decode::from_str::<Genre>(body, "api/genres/1").is_err());
        assert!(decode::from_str::<MovieRating>(body, "api/ratings/1").is_err());
        assert!(decode::from_str::<UserEnvelope>(body, "api/user").is_err());
        assert!(decode::from_str::<Vec<Movie>>(r#"[{"title":"Alien"}]"#, "api/movies").is_err());
    }

    #[test]
    fn test_user_envelope_accepts_both_shapes() {
        // Arrange
        let wrapped = r#"{"user":{"id":7,"username":"ripley","email":"r@nostromo.space"}}"#;
        let bare = r#"{"id":7,"username":"ripley","email":"r@nostromo.space","roles_id":"2"}"#;

        // Act
        let from_wrapped = decode::from_str::<UserEnvelope>(wrapped, "api/user")
            .unwrap()
            .into_user();
        let from_bare = decode::from_str::<UserEnvelope>(bare, "api/user")
            .unwrap()
            .into_user();

        // Assert
        assert_eq!(from_wrapped.username, "ripley");
        assert_eq!(from_bare.id, 7);
        assert_eq!(from_bare.roles_id, Some(2));
    }

    #[test]
    fn test_registration_json_skips_avatar_and_missing_gender() {
        // Arrange
        let mut registration = Registration::new("ripley", "r@nostromo.space", "secret");
        registration.avatar = Some(PhotoSource::parse("/tmp/avatar.jpg"));

        // Act
        let json = serde_json::to_value(&registration).unwrap();

        // Assert
        assert_eq!(
            json,
            serde_json::json!({
                "username": "ripley",
                "email": "r@nostromo.space",
                "password": "secret",
                "password_confirmation": "secret"
            })
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        // Arrange
        let credentials = UserCredentials::new("ripley", "secret");

        // Act
        let debug = format!("{credentials:?}");

        // Assert
        assert!(debug.contains("ripley"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_rating_payload_omits_missing_review() {
        // Arrange
        let payload = RatingPayload {
            movies_id: 4,
            review_text: None,
        };

        // Act
        let json = serde_json::to_string(&payload).unwrap();

        // Assert
        assert_eq!(json, r#"{"movies_id":4}"#);
    }

    #[test]
    fn test_actor_form_keeps_existing_photo() {
        // Arrange
        let actor = Actor {
            id: 5,
            first_name: String::from("Ian"),
            photo: Some(String::from("actors/holm.jpg")),
            ..Actor::default()
        };

        // Act
        let form = ActorForm::from(&actor);

        // Assert
        assert_eq!(
            form.photo,
            Some(PhotoSource::Keep(String::from("actors/holm.jpg")))
        );
    }

    #[test]
    fn test_movie_form_from_movie_uses_embedded_refs() {
        // Arrange
        let movie = Movie {
            title: String::from("Alien"),
            studio: Some(Studio {
                id: 3,
                ..Studio::default()
            }),
            age_rating: Some(AgeRating { id: 4, name: None }),
            genres: vec![
                Genre {
                    id: 1,
                    ..Genre::default()
                },
                Genre {
                    id: 6,
                    ..Genre::default()
                },
            ],
            ..Movie::default()
        };

        // Act
        let form = MovieForm::from(&movie);

        // Assert
        assert_eq!(form.studio_id, Some(3));
        assert_eq!(form.age_rating_id, Some(4));
        assert_eq!(form.genre_ids, vec![1, 6]);
    }
}
