//! Multipart form builder shared by movie, actor and account uploads.

use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use url::Url;

/// Where an uploaded photo or avatar comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// A local file, streamed from disk.
    Local(PathBuf),
    /// An `http`/`https` image, downloaded and streamed through.
    Remote(Url),
    /// The server-side path of the current photo, sent back as text.
    Keep(String),
}

impl PhotoSource {
    /// Interprets user input: absolute `http`/`https` URLs are remote,
    /// anything else is a local path.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            _ => Self::Local(PathBuf::from(value)),
        }
    }
}

impl FromStr for PhotoSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Field map to multipart body.
///
/// Text fields are added as-is. Photo parts are streamed; a photo that
/// cannot be read or downloaded is left out with a warning so the
/// remaining fields are still sent.
#[derive(Debug)]
pub struct MultipartForm<'a> {
    /// Client used to fetch remote photos.
    http_client: &'a Client,
    /// Form under construction.
    form: Form,
    /// Names of the parts added so far.
    fields: Vec<&'static str>,
}

impl<'a> MultipartForm<'a> {
    /// Creates an empty form.
    pub(crate) fn new(http_client: &'a Client) -> Self {
        Self {
            http_client,
            form: Form::new(),
            fields: Vec::new(),
        }
    }

    /// Adds a text field.
    #[must_use]
    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.form = self.form.text(name, value.into());
        self.fields.push(name);
        self
    }

    /// Adds a text field unless the value is `None` or empty.
    #[must_use]
    pub fn opt_text<V: ToString>(self, name: &'static str, value: Option<V>) -> Self {
        match value.map(|v| v.to_string()).filter(|v| !v.is_empty()) {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    /// Adds one text field per value under the same (array-style) name.
    #[must_use]
    pub fn list<I, V>(self, name: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        values
            .into_iter()
            .fold(self, |form, v| form.text(name, v.to_string()))
    }

    /// Adds a photo part.
    pub async fn photo(mut self, name: &'static str, source: Option<&PhotoSource>) -> Self {
        let part = match source {
            None => return self,
            Some(PhotoSource::Keep(path)) => return self.opt_text(name, Some(path)),
            Some(PhotoSource::Local(path)) => local_part(path).await,
            Some(PhotoSource::Remote(url)) => self.remote_part(url).await,
        };
        if let Some(part) = part {
            self.form = self.form.part(name, part);
            self.fields.push(name);
        }
        self
    }

    /// Names of the parts added so far, in order.
    #[must_use]
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Finishes the form.
    pub(crate) fn into_form(self) -> Form {
        self.form
    }

    /// Downloads a remote image into a streamed part.
    async fn remote_part(&self, url: &Url) -> Option<Part> {
        tracing::debug!(%url, "Downloading remote photo");
        let response = match self.http_client.get(url.clone()).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(%url, error = %e, "Photo download failed, sending form without it");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                %url,
                status = status.as_u16(),
                "Photo download returned an error status, sending form without it"
            );
            return None;
        }

        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or_else(|| guess_mime(Path::new(url.path())), str::to_owned);
        let file_name = url
            .path_segments()
            .and_then(Iterator::last)
            .filter(|s| !s.is_empty())
            .map_or_else(|| String::from("photo"), str::to_owned);
        let length = response.content_length();
        let body = Body::wrap_stream(response.bytes_stream());

        let part = match length {
            Some(len) => Part::stream_with_length(body, len),
            None => Part::stream(body),
        };
        with_mime(part.file_name(file_name), &mime)
    }
}

/// Opens a local file into a streamed part.
async fn local_part(path: &Path) -> Option<Part> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(m) if m.is_file() => m,
        Ok(_) => {
            tracing::warn!(
                path = %path.display(),
                "Photo path is not a regular file, sending form without it"
            );
            return None;
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Photo not found, sending form without it"
            );
            return None;
        }
    };

    let file = match tokio::fs::File::open(path).await {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Photo could not be opened, sending form without it"
            );
            return None;
        }
    };

    tracing::debug!(path = %path.display(), len = metadata.len(), "Attaching photo");
    let file_name = path
        .file_name()
        .map_or_else(|| String::from("photo"), |n| n.to_string_lossy().into_owned());
    let part = Part::stream_with_length(Body::from(file), metadata.len()).file_name(file_name);
    with_mime(part, &guess_mime(path))
}

/// MIME type from the file extension.
fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_owned()
}

fn with_mime(part: Part, mime: &str) -> Option<Part> {
    match part.mime_str(mime) {
        Ok(part) => Some(part),
        Err(e) => {
            tracing::warn!(%mime, error = %e, "Invalid photo MIME type, sending form without it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_http_url_is_remote() {
        // Arrange & Act
        let source = PhotoSource::parse("https://img.example/posters/alien.jpg");

        // Assert
        assert!(matches!(source, PhotoSource::Remote(ref url) if url.host_str() == Some("img.example")));
    }

    #[test]
    fn test_parse_path_is_local() {
        // Arrange & Act
        let unix = PhotoSource::parse("/home/ripley/alien.jpg");
        let relative = PhotoSource::parse("posters/alien.jpg");
        let windows = PhotoSource::parse(r"C:\posters\alien.jpg");
        let ftp = PhotoSource::parse("ftp://files.example/alien.jpg");

        // Assert
        assert_eq!(unix, PhotoSource::Local(PathBuf::from("/home/ripley/alien.jpg")));
        assert_eq!(relative, PhotoSource::Local(PathBuf::from("posters/alien.jpg")));
        assert!(matches!(windows, PhotoSource::Local(_)));
        assert!(matches!(ftp, PhotoSource::Local(_)));
    }

    #[test]
    fn test_text_fields_skip_empty_values() {
        // Arrange
        let client = Client::new();

        // Act
        let form = MultipartForm::new(&client)
            .text("title", "Alien")
            .opt_text("description", None::<String>)
            .opt_text("watch_url", Some(""))
            .opt_text("duration", Some(117))
            .list("genres[]", [1_u64, 6]);

        // Assert
        assert_eq!(form.fields(), ["title", "duration", "genres[]", "genres[]"]);
    }

    #[tokio::test]
    async fn test_local_photo_is_attached() {
        // Arrange
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"\x89PNG fake").unwrap();
        let source = PhotoSource::Local(file.path().to_path_buf());
        let client = Client::new();

        // Act
        let form = MultipartForm::new(&client)
            .text("title", "Alien")
            .photo("photo", Some(&source))
            .await;

        // Assert
        assert_eq!(form.fields(), ["title", "photo"]);
    }

    #[tokio::test]
    async fn test_missing_local_photo_is_skipped() {
        // Arrange
        let source = PhotoSource::Local(PathBuf::from("/nonexistent/cinecat/poster.jpg"));
        let client = Client::new();

        // Act
        let form = MultipartForm::new(&client)
            .text("title", "Alien")
            .photo("photo", Some(&source))
            .await;

        // Assert
        assert_eq!(form.fields(), ["title"]);
    }

    #[tokio::test]
    async fn test_directory_photo_is_skipped() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let source = PhotoSource::Local(dir.path().to_path_buf());
        let client = Client::new();

        // Act
        let form = MultipartForm::new(&client).photo("photo", Some(&source)).await;

        // Assert
        assert!(form.fields().is_empty());
    }

    #[tokio::test]
    async fn test_keep_photo_is_sent_as_text() {
        // Arrange
        let keep = PhotoSource::Keep(String::from("actors/holm.jpg"));
        let empty = PhotoSource::Keep(String::new());
        let client = Client::new();

        // Act
        let kept = MultipartForm::new(&client).photo("photo", Some(&keep)).await;
        let skipped = MultipartForm::new(&client).photo("photo", Some(&empty)).await;

        // Assert
        assert_eq!(kept.fields(), ["photo"]);
        assert!(skipped.fields().is_empty());
    }

    #[tokio::test]
    async fn test_remote_photo_is_downloaded() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/posters/alien.jpg"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .insert_header("Content-Type", "image/jpeg")
                    .set_body_bytes(b"jpeg bytes".to_vec()),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        let url = Url::parse(&format!("{}/posters/alien.jpg", mock_server.uri())).unwrap();
        let client = Client::new();

        // Act
        let form = MultipartForm::new(&client)
            .photo("photo", Some(&PhotoSource::Remote(url)))
            .await;

        // Assert
        assert_eq!(form.fields(), ["photo"]);
    }

    #[tokio::test]
    async fn test_failed_remote_photo_is_skipped() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        let url = Url::parse(&format!("{}/posters/missing.jpg", mock_server.uri())).unwrap();
        let client = Client::new();

        // Act
        let form = MultipartForm::new(&client)
            .text("title", "Alien")
            .photo("photo", Some(&PhotoSource::Remote(url)))
            .await;

        // Assert
        assert_eq!(form.fields(), ["title"]);
    }
}
