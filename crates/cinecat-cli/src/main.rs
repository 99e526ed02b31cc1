//! cinecat - movie catalog command-line client.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use cinecat_api::catalog::{
    Actor, ActorForm, AdminCredentials, CatalogClient, Favorite, LocalCatalogApi, Movie,
    MovieForm, MovieRating, NamePayload, PhotoSource, ProfileUpdate, RatingPayload, Registration,
    User, UserCredentials,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Catalog server base URL (overrides `[server] base_url`).
    #[arg(long, global = true, env = "CINECAT_BASE_URL")]
    base_url: Option<Url>,

    /// Bearer token (overrides the saved session).
    #[arg(long, global = true, env = "CINECAT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Log in as a regular user and save the session.
    Login(LoginArgs),
    /// Log in as an administrator and save the session.
    AdminLogin(AdminLoginArgs),
    /// Create an account.
    Register(RegisterArgs),
    /// End the saved session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Manage the logged-in user's profile.
    Profile(ProfileCommand),
    /// Manage movies.
    Movies(MoviesCommand),
    /// Manage actors.
    Actors(ActorsCommand),
    /// Manage studios.
    Studios(NamedCommand),
    /// Manage genres.
    Genres(NamedCommand),
    /// Manage movie reviews.
    Ratings(RatingsCommand),
    /// Manage favorite movies.
    Favorites(FavoritesCommand),
}

/// Arguments for the `login` subcommand.
#[derive(clap::Args)]
struct LoginArgs {
    /// Login name.
    #[arg(long, required = true)]
    username: String,
    /// Password.
    #[arg(long, env = "CINECAT_PASSWORD", hide_env_values = true)]
    password: String,
}

/// Arguments for the `admin-login` subcommand.
#[derive(clap::Args)]
struct AdminLoginArgs {
    /// Administrator e-mail address.
    #[arg(long, required = true)]
    email: String,
    /// Password.
    #[arg(long, env = "CINECAT_PASSWORD", hide_env_values = true)]
    password: String,
}

/// Arguments for the `register` subcommand.
#[derive(clap::Args)]
struct RegisterArgs {
    /// Login name.
    #[arg(long, required = true)]
    username: String,
    /// E-mail address.
    #[arg(long, required = true)]
    email: String,
    /// Password.
    #[arg(long, env = "CINECAT_PASSWORD", hide_env_values = true)]
    password: String,
    /// Gender.
    #[arg(long)]
    gender: Option<String>,
    /// Avatar: local path or http(s) URL.
    #[arg(long)]
    avatar: Option<PhotoSource>,
    /// Log in right after registering and save the session.
    #[arg(long, conflicts_with = "avatar")]
    login: bool,
}

/// Arguments for the `profile` subcommand.
#[derive(clap::Args)]
struct ProfileCommand {
    /// Profile subcommand to run.
    #[command(subcommand)]
    command: ProfileSubcommands,
}

/// Available profile subcommands.
#[derive(Subcommand)]
enum ProfileSubcommands {
    /// Update the profile. Omitted fields keep their current value.
    Update(ProfileArgs),
}

/// Arguments for the `profile update` subcommand.
#[derive(clap::Args)]
struct ProfileArgs {
    /// New login name.
    #[arg(long)]
    username: Option<String>,
    /// New e-mail address.
    #[arg(long)]
    email: Option<String>,
    /// New password.
    #[arg(long)]
    password: Option<String>,
    /// Gender.
    #[arg(long)]
    gender: Option<String>,
    /// New avatar: local path or http(s) URL.
    #[arg(long)]
    avatar: Option<PhotoSource>,
}

/// Arguments selecting a resource by ID.
#[derive(clap::Args)]
struct IdArgs {
    /// Resource ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `movies` subcommand.
#[derive(clap::Args)]
struct MoviesCommand {
    /// Movies subcommand to run.
    #[command(subcommand)]
    command: MoviesSubcommands,
}

/// Available movies subcommands.
#[derive(Subcommand)]
enum MoviesSubcommands {
    /// List all movies.
    List,
    /// Show one movie.
    Get(IdArgs),
    /// Create a movie.
    Create(MovieFieldArgs),
    /// Update a movie. Omitted fields keep their current value.
    Update {
        /// Movie to update.
        #[command(flatten)]
        target: IdArgs,
        /// New field values.
        #[command(flatten)]
        fields: MovieFieldArgs,
    },
    /// Delete a movie.
    Delete(IdArgs),
}

/// Movie fields accepted by `movies create` and `movies update`.
#[derive(clap::Args)]
struct MovieFieldArgs {
    /// Title.
    #[arg(long)]
    title: Option<String>,
    /// Release year.
    #[arg(long)]
    release_year: Option<i32>,
    /// Running time in minutes.
    #[arg(long)]
    duration: Option<u32>,
    /// Synopsis.
    #[arg(long)]
    description: Option<String>,
    /// Studio ID.
    #[arg(long)]
    studio_id: Option<u64>,
    /// Age rating ID.
    #[arg(long)]
    age_rating_id: Option<u64>,
    /// Comma-separated genre IDs (e.g. "1,6").
    #[arg(long, value_delimiter = ',')]
    genre_ids: Option<Vec<u64>>,
    /// Streaming link.
    #[arg(long)]
    watch_url: Option<String>,
    /// Poster: local path or http(s) URL.
    #[arg(long)]
    photo: Option<PhotoSource>,
}

impl MovieFieldArgs {
    /// Overwrites the fields given on the command line.
    fn apply(&self, form: &mut MovieForm) {
        if let Some(title) = &self.title {
            form.title.clone_from(title);
        }
        if self.release_year.is_some() {
            form.release_year = self.release_year;
        }
        if self.duration.is_some() {
            form.duration = self.duration;
        }
        if self.description.is_some() {
            form.description.clone_from(&self.description);
        }
        if self.studio_id.is_some() {
            form.studio_id = self.studio_id;
        }
        if self.age_rating_id.is_some() {
            form.age_rating_id = self.age_rating_id;
        }
        if let Some(ids) = &self.genre_ids {
            form.genre_ids.clone_from(ids);
        }
        if self.watch_url.is_some() {
            form.watch_url.clone_from(&self.watch_url);
        }
        if self.photo.is_some() {
            form.photo.clone_from(&self.photo);
        }
    }
}

/// Arguments for the `actors` subcommand.
#[derive(clap::Args)]
struct ActorsCommand {
    /// Actors subcommand to run.
    #[command(subcommand)]
    command: ActorsSubcommands,
}

/// Available actors subcommands.
#[derive(Subcommand)]
enum ActorsSubcommands {
    /// List all actors.
    List,
    /// Show one actor.
    Get(IdArgs),
    /// Create an actor.
    Create(ActorFieldArgs),
    /// Update an actor. Omitted fields (including the photo) are kept.
    Update {
        /// Actor to update.
        #[command(flatten)]
        target: IdArgs,
        /// New field values.
        #[command(flatten)]
        fields: ActorFieldArgs,
    },
    /// Delete an actor.
    Delete(IdArgs),
}

/// Actor fields accepted by `actors create` and `actors update`.
#[derive(clap::Args)]
struct ActorFieldArgs {
    /// First name.
    #[arg(long)]
    first_name: Option<String>,
    /// Last name.
    #[arg(long)]
    last_name: Option<String>,
    /// Date of birth (e.g. "1931-09-12").
    #[arg(long)]
    birth_date: Option<NaiveDate>,
    /// Biography.
    #[arg(long)]
    biography: Option<String>,
    /// Photo: local path or http(s) URL.
    #[arg(long)]
    photo: Option<PhotoSource>,
}

impl ActorFieldArgs {
    /// Overwrites the fields given on the command line.
    fn apply(&self, form: &mut ActorForm) {
        if let Some(first_name) = &self.first_name {
            form.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &self.last_name {
            form.last_name.clone_from(last_name);
        }
        if self.birth_date.is_some() {
            form.birth_date = self.birth_date;
        }
        if self.biography.is_some() {
            form.biography.clone_from(&self.biography);
        }
        if self.photo.is_some() {
            form.photo.clone_from(&self.photo);
        }
    }
}

/// Arguments for the `studios` and `genres` subcommands.
#[derive(clap::Args)]
struct NamedCommand {
    /// Subcommand to run.
    #[command(subcommand)]
    command: NamedSubcommands,
}

/// Subcommands of name-only resources.
#[derive(Subcommand)]
enum NamedSubcommands {
    /// List all entries.
    List,
    /// Show one entry.
    Get(IdArgs),
    /// Create an entry.
    Create(NameArgs),
    /// Rename an entry.
    Update {
        /// Entry to rename.
        #[command(flatten)]
        target: IdArgs,
        /// New name.
        #[command(flatten)]
        name: NameArgs,
    },
    /// Delete an entry.
    Delete(IdArgs),
}

/// Name argument.
#[derive(clap::Args)]
struct NameArgs {
    /// Name.
    #[arg(long, required = true)]
    name: String,
}

/// Arguments for the `ratings` subcommand.
#[derive(clap::Args)]
struct RatingsCommand {
    /// Ratings subcommand to run.
    #[command(subcommand)]
    command: RatingsSubcommands,
}

/// Available ratings subcommands.
#[derive(Subcommand)]
enum RatingsSubcommands {
    /// List all reviews.
    List,
    /// Show one review.
    Get(IdArgs),
    /// Review a movie.
    Create(RatingCreateArgs),
    /// Edit a review. Omitted fields keep their current value.
    Update(RatingUpdateArgs),
    /// Delete a review.
    Delete(IdArgs),
}

/// Arguments for the `ratings create` subcommand.
#[derive(clap::Args)]
struct RatingCreateArgs {
    /// Reviewed movie ID.
    #[arg(long, required = true)]
    movie_id: u64,
    /// Review text.
    #[arg(long)]
    review: Option<String>,
}

/// Arguments for the `ratings update` subcommand.
#[derive(clap::Args)]
struct RatingUpdateArgs {
    /// Review ID.
    #[arg(long, required = true)]
    id: u64,
    /// Reviewed movie ID.
    #[arg(long)]
    movie_id: Option<u64>,
    /// Review text.
    #[arg(long)]
    review: Option<String>,
}

/// Arguments for the `favorites` subcommand.
#[derive(clap::Args)]
struct FavoritesCommand {
    /// Favorites subcommand to run.
    #[command(subcommand)]
    command: FavoritesSubcommands,
}

/// Available favorites subcommands.
#[derive(Subcommand)]
enum FavoritesSubcommands {
    /// List favorite movies.
    List,
    /// Mark a movie as favorite.
    Add(MovieIdArgs),
    /// Remove a movie from the favorites.
    Remove(MovieIdArgs),
}

/// Arguments selecting a movie by ID.
#[derive(clap::Args)]
struct MovieIdArgs {
    /// Movie ID.
    #[arg(long, required = true)]
    movie_id: u64,
}

// --- Session state ---

/// Loaded config and command-line overrides.
struct AppState {
    /// Path of the loaded config file.
    config_path: PathBuf,
    /// Loaded config.
    config: AppConfig,
    /// `--base-url` / `CINECAT_BASE_URL`.
    base_url: Option<Url>,
    /// `--token` / `CINECAT_TOKEN`.
    token: Option<String>,
}

impl AppState {
    /// Loads the config file selected by `--dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config path cannot be resolved or the file
    /// cannot be parsed.
    fn load(dir: Option<&PathBuf>, base_url: Option<Url>, token: Option<String>) -> Result<Self> {
        let config_path = resolve_config_path(dir)?;
        let config = AppConfig::load(&config_path)?;
        tracing::debug!(path = %config_path.display(), "Loaded config");
        Ok(Self {
            config_path,
            config,
            base_url,
            token,
        })
    }

    /// Builds a catalog client, authenticated when a token is known.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL is configured or the client fails to build.
    #[instrument(skip_all)]
    fn build_client(&self) -> Result<CatalogClient> {
        let base_url = match &self.base_url {
            Some(url) => url.clone(),
            None => {
                let raw = self.config.server.base_url.as_deref().context(
                    "no catalog base URL configured: pass --base-url, set CINECAT_BASE_URL \
                     or add [server] base_url to config.toml",
                )?;
                Url::parse(raw).with_context(|| format!("invalid [server] base_url: {raw}"))?
            }
        };

        let mut builder = CatalogClient::builder().base_url(base_url).user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = self.config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(token) = self
            .token
            .as_deref()
            .or(self.config.session.token.as_deref())
        {
            builder = builder.token(token);
        }
        builder.build().context("failed to build catalog client")
    }

    /// Stores (or clears) the session token in the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    fn save_session(&mut self, token: Option<&str>) -> Result<()> {
        self.config.session.token = token.map(str::to_owned);
        self.config
            .save(&self.config_path)
            .context("failed to save session")?;
        tracing::debug!(path = %self.config_path.display(), "Saved session");
        Ok(())
    }
}

/// `-` for missing values.
fn dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| String::from("-"), |v| v.to_string())
}

// --- Accounts ---

/// Runs the `login` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails, the server rejects the
/// credentials or the session cannot be saved.
#[instrument(skip_all)]
async fn run_login(state: &mut AppState, args: &LoginArgs) -> Result<()> {
    let client = state.build_client()?;
    let session = client
        .login(&UserCredentials::new(&args.username, &args.password))
        .await
        .context("login request failed")?
        .context("login rejected by the server")?;

    state.save_session(session.token())?;
    tracing::info!("Logged in as {}", args.username);
    Ok(())
}

/// Runs the `admin-login` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails, the server rejects the
/// credentials or the session cannot be saved.
#[instrument(skip_all)]
async fn run_admin_login(state: &mut AppState, args: &AdminLoginArgs) -> Result<()> {
    let client = state.build_client()?;
    let session = client
        .admin_login(&AdminCredentials::new(&args.email, &args.password))
        .await
        .context("admin login request failed")?
        .context("admin login rejected by the server")?;

    state.save_session(session.token())?;
    tracing::info!("Logged in as administrator {}", args.email);
    Ok(())
}

/// Runs the `register` subcommand.
///
/// With `--login` the account is created through the JSON endpoint and the
/// resulting session is saved; otherwise the multipart endpoint (with an
/// optional avatar) is used.
///
/// # Errors
///
/// Returns an error if a request fails or the server rejects the account.
#[instrument(skip_all)]
async fn run_register(state: &mut AppState, args: &RegisterArgs) -> Result<()> {
    let client = state.build_client()?;
    let mut registration = Registration::new(&args.username, &args.email, &args.password);
    registration.gender.clone_from(&args.gender);
    registration.avatar.clone_from(&args.avatar);

    if args.login {
        let session = client
            .register_and_login(&registration)
            .await
            .context("registration request failed")?
            .context("registration or login rejected by the server")?;
        state.save_session(session.token())?;
        tracing::info!("Registered and logged in as {}", args.username);
        return Ok(());
    }

    let registered = client
        .register(&registration)
        .await
        .context("registration request failed")?;
    ensure!(registered, "registration rejected by the server");
    tracing::info!("Registered {}", args.username);
    Ok(())
}

/// Runs the `logout` subcommand.
///
/// # Errors
///
/// Returns an error if no session exists, the request fails or the server
/// refuses the logout.
#[instrument(skip_all)]
async fn run_logout(state: &mut AppState) -> Result<()> {
    let client = state.build_client()?;
    let Some(anonymous) = client.logout().await.context("logout failed")? else {
        bail!("server refused the logout; the saved session was kept");
    };

    state.save_session(anonymous.token())?;
    tracing::info!("Logged out");
    Ok(())
}

/// Runs the `whoami` subcommand.
///
/// # Errors
///
/// Returns an error if no session exists or the request fails.
#[instrument(skip_all)]
async fn run_whoami(state: &AppState) -> Result<()> {
    let client = state.build_client()?;
    let user = client
        .current_user()
        .await
        .context("failed to fetch current user")?
        .context("server did not return the current user")?;
    print_user(&user);
    Ok(())
}

/// Runs the `profile update` subcommand.
///
/// # Errors
///
/// Returns an error if no session exists or a request fails.
#[instrument(skip_all)]
async fn run_profile_update(state: &AppState, args: &ProfileArgs) -> Result<()> {
    let client = state.build_client()?;
    let current = client
        .current_user()
        .await
        .context("failed to fetch current user")?
        .context("server did not return the current user")?;

    let mut update = ProfileUpdate::from(&current);
    if let Some(username) = &args.username {
        update.username.clone_from(username);
    }
    if let Some(email) = &args.email {
        update.email.clone_from(email);
    }
    if args.gender.is_some() {
        update.gender.clone_from(&args.gender);
    }
    update.password.clone_from(&args.password);
    update.password_confirmation.clone_from(&args.password);
    update.avatar.clone_from(&args.avatar);

    let user = client
        .update_profile(&update)
        .await
        .context("failed to update profile")?;
    tracing::info!("Profile updated");
    print_user(&user);
    Ok(())
}

fn print_user(user: &User) {
    tracing::info!("ID:\t\t{}", user.id);
    tracing::info!("Username:\t{}", user.username);
    tracing::info!("Email:\t\t{}", user.email);
    tracing::info!("Role:\t\t{}", dash(user.roles_id));
    tracing::info!("Gender:\t\t{}", dash(user.gender.as_deref()));
    tracing::info!("Avatar:\t\t{}", dash(user.avatar.as_deref()));
}

// --- Movies ---

/// Runs the `movies` subcommand.
///
/// # Errors
///
/// Returns an error if no session exists, a request fails or the server
/// refuses the operation.
#[instrument(skip_all)]
async fn run_movies(client: &CatalogClient, command: &MoviesSubcommands) -> Result<()> {
    match command {
        MoviesSubcommands::List => {
            let movies = client
                .movies()
                .await
                .context("failed to list movies")?
                .context("server refused to list movies")?;
            print_movies(&movies);
        }
        MoviesSubcommands::Get(args) => {
            let movie = fetch_movie(client, args.id).await?;
            print_movie(&movie);
        }
        MoviesSubcommands::Create(fields) => {
            ensure!(fields.title.is_some(), "--title is required to create a movie");
            let mut form = MovieForm::default();
            fields.apply(&mut form);
            let movie = client
                .create_movie(&form)
                .await
                .context("failed to create movie")?;
            tracing::info!("Created movie {}", movie.id);
            print_movie(&movie);
        }
        MoviesSubcommands::Update { target, fields } => {
            let current = fetch_movie(client, target.id).await?;
            let mut form = MovieForm::from(&current);
            fields.apply(&mut form);
            let movie = client
                .update_movie(target.id, &form)
                .await
                .with_context(|| format!("failed to update movie {}", target.id))?;
            tracing::info!("Updated movie {}", movie.id);
            print_movie(&movie);
        }
        MoviesSubcommands::Delete(args) => {
            let deleted = client
                .delete_movie(args.id)
                .await
                .with_context(|| format!("failed to delete movie {}", args.id))?;
            ensure!(deleted, "server refused to delete movie {}", args.id);
            tracing::info!("Deleted movie {}", args.id);
        }
    }
    Ok(())
}

/// Fetches a movie that must exist.
///
/// # Errors
///
/// Returns an error if the request fails or the movie is not returned.
async fn fetch_movie(client: &CatalogClient, id: u64) -> Result<Movie> {
    client
        .movie(id)
        .await
        .with_context(|| format!("failed to fetch movie {id}"))?
        .with_context(|| format!("movie {id} not found"))
}

fn print_movies(movies: &[Movie]) {
    tracing::info!("ID\tYear\tMinutes\tTitle");
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            movie.id,
            dash(movie.release_year),
            dash(movie.duration),
            movie.title,
        );
    }
    tracing::info!("Total: {} movies", movies.len());
}

fn print_movie(movie: &Movie) {
    tracing::info!("ID:\t\t{}", movie.id);
    tracing::info!("Title:\t\t{}", movie.title);
    tracing::info!("Year:\t\t{}", dash(movie.release_year));
    tracing::info!("Duration:\t{} min", dash(movie.duration));
    tracing::info!(
        "Studio:\t\t{}",
        movie
            .studio
            .as_ref()
            .map(|s| s.name.clone())
            .or_else(|| movie.studio_id.map(|id| format!("#{id}")))
            .unwrap_or_else(|| String::from("-"))
    );
    tracing::info!(
        "Age rating:\t{}",
        dash(
            movie
                .age_rating
                .as_ref()
                .and_then(|r| r.name.as_deref())
        )
    );
    let genres: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
    tracing::info!("Genres:\t\t{}", genres.join(", "));
    let cast: Vec<String> = movie.actors.iter().map(Actor::full_name).collect();
    tracing::info!("Cast:\t\t{}", cast.join(", "));
    tracing::info!("Reviews:\t{}", movie.ratings.len());
    tracing::info!("Watch:\t\t{}", dash(movie.watch_url.as_deref()));
    tracing::info!("Description:\t{}", dash(movie.description.as_deref()));
}

// --- Actors ---

/// Runs the `actors` subcommand.
///
/// # Errors
///
/// Returns an error if no session exists, a request fails or the server
/// refuses the operation.
#[instrument(skip_all)]
async fn run_actors(client: &CatalogClient, command: &ActorsSubcommands) -> Result<()> {
    match command {
        ActorsSubcommands::List => {
            let actors = client
                .actors()
                .await
                .context("failed to list actors")?
                .context("server refused to list actors")?;
            tracing::info!("ID\tBorn\t\tName");
            for actor in &actors {
                tracing::info!(
                    "{}\t{}\t{}",
                    actor.id,
                    dash(actor.birth_date),
                    actor.full_name()
                );
            }
            tracing::info!("Total: {} actors", actors.len());
        }
        ActorsSubcommands::Get(args) => {
            let actor = fetch_actor(client, args.id).await?;
            print_actor(&actor);
        }
        ActorsSubcommands::Create(fields) => {
            ensure!(
                fields.first_name.is_some() && fields.last_name.is_some(),
                "--first-name and --last-name are required to create an actor"
            );
            let mut form = ActorForm::default();
            fields.apply(&mut form);
            let actor = client
                .create_actor(&form)
                .await
                .context("failed to create actor")?;
            tracing::info!("Created actor {}", actor.id);
            print_actor(&actor);
        }
        ActorsSubcommands::Update { target, fields } => {
            let current = fetch_actor(client, target.id).await?;
            let mut form = ActorForm::from(&current);
            fields.apply(&mut form);
            let actor = client
                .update_actor(target.id, &form)
                .await
                .with_context(|| format!("failed to update actor {}", target.id))?;
            tracing::info!("Updated actor {}", actor.id);
            print_actor(&actor);
        }
        ActorsSubcommands::Delete(args) => {
            let deleted = client
                .delete_actor(args.id)
                .await
                .with_context(|| format!("failed to delete actor {}", args.id))?;
            ensure!(deleted, "server refused to delete actor {}", args.id);
            tracing::info!("Deleted actor {}", args.id);
        }
    }
    Ok(())
}

/// Fetches an actor that must exist.
///
/// # Errors
///
/// Returns an error if the request fails or the actor is not returned.
async fn fetch_actor(client: &CatalogClient, id: u64) -> Result<Actor> {
    client
        .actor(id)
        .await
        .with_context(|| format!("failed to fetch actor {id}"))?
        .with_context(|| format!("actor {id} not found"))
}

fn print_actor(actor: &Actor) {
    tracing::info!("ID:\t\t{}", actor.id);
    tracing::info!("Name:\t\t{}", actor.full_name());
    tracing::info!("Born:\t\t{}", dash(actor.birth_date));
    tracing::info!("Photo:\t\t{}", dash(actor.photo.as_deref()));
    tracing::info!("Biography:\t{}", dash(actor.biography.as_deref()));
}

// --- Studios & genres ---

fn print_named<'a>(kind: &str, rows: impl ExactSizeIterator<Item = (u64, &'a str)>) {
    let total = rows.len();
    tracing::info!("ID\tName");
    for (id, name) in rows {
        tracing::info!("{id}\t{name}");
    }
    tracing::info!("Total: {total} {kind}");
}

/// Runs the `studios` subcommand.
///
/// # Errors
///
/// Returns an error if no session exists, a request fails or the server
/// refuses the operation.
#[instrument(skip_all)]
async fn run_studios(client: &CatalogClient, command: &NamedSubcommands) -> Result<()> {
    match command {
        NamedSubcommands::List => {
            let studios = client
                .studios()
                .await
                .context("failed to list studios")?
                .context("server refused to list studios")?;
            print_named("studios", studios.iter().map(|s| (s.id, s.name.as_str())));
        }
        NamedSubcommands::Get(args) => {
            let studio = client
                .studio(args.id)
                .await
                .with_context(|| format!("failed to fetch studio {}", args.id))?
                .with_context(|| format!("studio {} not found", args.id))?;
            tracing::info!("{}\t{}", studio.id, studio.name);
            for movie in &studio.movies {
                tracing::info!("  {}\t{}", movie.id, movie.title);
            }
        }
        NamedSubcommands::Create(args) => {
            let studio = client
                .create_studio(&NamePayload::new(&args.name))
                .await
                .context("failed to create studio")?;
            tracing::info!("Created studio {}\t{}", studio.id, studio.name);
        }
        NamedSubcommands::Update { target, name } => {
            let studio = client
                .update_studio(target.id, &NamePayload::new(&name.name))
                .await
                .with_context(|| format!("failed to update studio {}", target.id))?;
            tracing::info!("Updated studio {}\t{}", studio.id, studio.name);
        }
        NamedSubcommands::Delete(args) => {
            let deleted = client
                .delete_studio(args.id)
                .await
                .with_context(|| format!("failed to delete studio {}", args.id))?;
            ensure!(deleted, "server refused to delete studio {}", args.id);
            tracing::info!("Deleted studio {}", args.id);
        }
    }
    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if no session exists, a request fails or the server
/// refuses the operation.
#[instrument(skip_all)]
async fn run_genres(client: &CatalogClient, command: &NamedSubcommands) -> Result<()> {
    match command {
        NamedSubcommands::List => {
            let genres = client
                .genres()
                .await
                .context("failed to list genres")?
                .context("server refused to list genres")?;
            print_named("genres", genres.iter().map(|g| (g.id, g.name.as_str())));
        }
        NamedSubcommands::Get(args) => {
            let genre = client
                .genre(args.id)
                .await
                .with_context(|| format!("failed to fetch genre {}", args.id))?
                .with_context(|| format!("genre {} not found", args.id))?;
            tracing::info!("{}\t{}", genre.id, genre.name);
            for movie in &genre.movies {
                tracing::info!("  {}\t{}", movie.id, movie.title);
            }
        }
        NamedSubcommands::Create(args) => {
            let genre = client
                .create_genre(&NamePayload::new(&args.name))
                .await
                .context("failed to create genre")?;
            tracing::info!("Created genre {}\t{}", genre.id, genre.name);
        }
        NamedSubcommands::Update { target, name } => {
            let genre = client
                .update_genre(target.id, &NamePayload::new(&name.name))
                .await
                .with_context(|| format!("failed to update genre {}", target.id))?;
            tracing::info!("Updated genre {}\t{}", genre.id, genre.name);
        }
        NamedSubcommands::Delete(args) => {
            let deleted = client
                .delete_genre(args.id)
                .await
                .with_context(|| format!("failed to delete genre {}", args.id))?;
            ensure!(deleted, "server refused to delete genre {}", args.id);
            tracing::info!("Deleted genre {}", args.id);
        }
    }
    Ok(())
}

// --- Ratings ---

/// Runs the `ratings` subcommand.
///
/// # Errors
///
/// Returns an error if no session exists, a request fails or the server
/// refuses the operation.
#[instrument(skip_all)]
async fn run_ratings(client: &CatalogClient, command: &RatingsSubcommands) -> Result<()> {
    match command {
        RatingsSubcommands::List => {
            let ratings = client
                .ratings()
                .await
                .context("failed to list ratings")?
                .context("server refused to list ratings")?;
            tracing::info!("ID\tMovie\tUser\tReview");
            for rating in &ratings {
                print_rating(rating);
            }
            tracing::info!("Total: {} ratings", ratings.len());
        }
        RatingsSubcommands::Get(args) => {
            let rating = fetch_rating(client, args.id).await?;
            print_rating(&rating);
        }
        RatingsSubcommands::Create(args) => {
            let payload = RatingPayload {
                movies_id: args.movie_id,
                review_text: args.review.clone(),
            };
            let rating = client
                .create_rating(&payload)
                .await
                .context("failed to create rating")?;
            tracing::info!("Created rating {}", rating.id);
        }
        RatingsSubcommands::Update(args) => {
            let current = fetch_rating(client, args.id).await?;
            let payload = RatingPayload {
                movies_id: args.movie_id.unwrap_or(current.movies_id),
                review_text: args.review.clone().or(current.review_text),
            };
            let rating = client
                .update_rating(args.id, &payload)
                .await
                .with_context(|| format!("failed to update rating {}", args.id))?;
            tracing::info!("Updated rating {}", rating.id);
        }
        RatingsSubcommands::Delete(args) => {
            let deleted = client
                .delete_rating(args.id)
                .await
                .with_context(|| format!("failed to delete rating {}", args.id))?;
            ensure!(deleted, "server refused to delete rating {}", args.id);
            tracing::info!("Deleted rating {}", args.id);
        }
    }
    Ok(())
}

/// Fetches a rating that must exist.
///
/// # Errors
///
/// Returns an error if the request fails or the rating is not returned.
async fn fetch_rating(client: &CatalogClient, id: u64) -> Result<MovieRating> {
    client
        .rating(id)
        .await
        .with_context(|| format!("failed to fetch rating {id}"))?
        .with_context(|| format!("rating {id} not found"))
}

fn print_rating(rating: &MovieRating) {
    tracing::info!(
        "{}\t{}\t{}\t{}",
        rating.id,
        rating.movies_id,
        dash(rating.users_id),
        dash(rating.review_text.as_deref()),
    );
}

// --- Favorites ---

/// Runs the `favorites` subcommand.
///
/// # Errors
///
/// Returns an error if no session exists, a request fails or the server
/// refuses the operation.
#[instrument(skip_all)]
async fn run_favorites(client: &CatalogClient, command: &FavoritesSubcommands) -> Result<()> {
    match command {
        FavoritesSubcommands::List => {
            let favorites: Vec<Favorite> = client
                .favorites()
                .await
                .context("failed to list favorites")?
                .context("server refused to list favorites")?;
            let movies: Vec<Movie> = favorites.into_iter().map(|f| f.movie).collect();
            print_movies(&movies);
        }
        FavoritesSubcommands::Add(args) => {
            let added = client
                .add_favorite(args.movie_id)
                .await
                .with_context(|| format!("failed to add movie {} to favorites", args.movie_id))?;
            ensure!(added, "server refused to add movie {} to favorites", args.movie_id);
            tracing::info!("Added movie {} to favorites", args.movie_id);
        }
        FavoritesSubcommands::Remove(args) => {
            let removed = client
                .remove_favorite(args.movie_id)
                .await
                .with_context(|| {
                    format!("failed to remove movie {} from favorites", args.movie_id)
                })?;
            ensure!(
                removed,
                "server refused to remove movie {} from favorites",
                args.movie_id
            );
            tracing::info!("Removed movie {} from favorites", args.movie_id);
        }
    }
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let mut state = AppState::load(cli.dir.as_ref(), cli.base_url, cli.token)?;
    match cli.command {
        Commands::Login(args) => run_login(&mut state, &args).await,
        Commands::AdminLogin(args) => run_admin_login(&mut state, &args).await,
        Commands::Register(args) => run_register(&mut state, &args).await,
        Commands::Logout => run_logout(&mut state).await,
        Commands::Whoami => run_whoami(&state).await,
        Commands::Profile(cmd) => match cmd.command {
            ProfileSubcommands::Update(args) => run_profile_update(&state, &args).await,
        },
        Commands::Movies(cmd) => run_movies(&state.build_client()?, &cmd.command).await,
        Commands::Actors(cmd) => run_actors(&state.build_client()?, &cmd.command).await,
        Commands::Studios(cmd) => run_studios(&state.build_client()?, &cmd.command).await,
        Commands::Genres(cmd) => run_genres(&state.build_client()?, &cmd.command).await,
        Commands::Ratings(cmd) => run_ratings(&state.build_client()?, &cmd.command).await,
        Commands::Favorites(cmd) => run_favorites(&state.build_client()?, &cmd.command).await,
    }
}
