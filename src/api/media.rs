use std::path::Path;

use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::models::response::normalize_list_field;
use crate::models::{ApiResponse, MediaResponse, UploadResponse};
use crate::{TelesocialClient, TelesocialError, TelesocialResult};

/// Content type of uploaded media files.
const MEDIA_CONTENT_TYPE: &str = "audio/mpeg";

/// Provides methods for managing server-side audio resources.
#[derive(Debug, Clone)]
pub struct MediaApi {
    client: TelesocialClient,
}

impl MediaApi {
    pub(crate) fn new(client: TelesocialClient) -> Self {
        Self { client }
    }

    /// Allocates a new media id.
    pub async fn create(&self) -> TelesocialResult<ApiResponse> {
        let res = self.client.send("media", &[], Method::POST).await?;
        res.accept_success()
    }

    /// Calls `network_id` and records what is said under `media_id`.
    ///
    /// The recording runs asynchronously on the server; poll
    /// [`status`](Self::status) to find out when content exists.
    pub async fn record(
        &self,
        media_id: &str,
        network_id: &str,
        greeting_id: Option<&str>,
    ) -> TelesocialResult<ApiResponse> {
        self.action_with_network_id(media_id, network_id, "record", greeting_id).await
    }

    /// Calls `network_id` and plays the audio stored under `media_id`.
    pub async fn blast(
        &self,
        media_id: &str,
        network_id: &str,
        greeting_id: Option<&str>,
    ) -> TelesocialResult<ApiResponse> {
        self.action_with_network_id(media_id, network_id, "blast", greeting_id).await
    }

    async fn action_with_network_id(
        &self,
        media_id: &str,
        network_id: &str,
        action: &str,
        greeting_id: Option<&str>,
    ) -> TelesocialResult<ApiResponse> {
        let endpoint = format!("media/{media_id}");
        let mut params = vec![("networkid", network_id), ("action", action)];
        if let Some(greeting_id) = greeting_id {
            params.push(("greetingid", greeting_id));
        }
        let res = self.client.send(&endpoint, &params, Method::POST).await?;
        res.accept_success()
    }

    /// Retrieves status information about a media id and any operation in
    /// progress on it.
    pub async fn status(&self, media_id: &str) -> TelesocialResult<ApiResponse> {
        let endpoint = format!("media/status/{media_id}");
        let res = self.client.send(&endpoint, &[], Method::POST).await?;
        res.accept_success()
    }

    /// Requests permission to upload a file for `media_id`.
    ///
    /// The grant id in the returned `UploadResponse` authorizes one
    /// [`upload`](Self::upload).
    pub async fn request_upload_grant(&self, media_id: &str) -> TelesocialResult<ApiResponse> {
        let endpoint = format!("media/{media_id}");
        let res = self
            .client
            .send(&endpoint, &[("action", "upload_grant")], Method::POST)
            .await?;
        res.accept_success()
    }

    /// Removes a media instance.
    pub async fn remove(&self, media_id: &str) -> TelesocialResult<ApiResponse> {
        let endpoint = format!("media/{media_id}");
        let res = self
            .client
            .send(&endpoint, &[("action", "remove")], Method::POST)
            .await?;
        res.accept_success()
    }

    /// Lists the application's media ids.
    ///
    /// The `MediaidListResponse.uploaded` and `.recorded` fields are
    /// normalized so they are always lists.
    pub async fn list(&self) -> TelesocialResult<ApiResponse> {
        let res = self.client.send("media", &[], Method::GET).await?;
        let mut res = res.accept_ok()?;
        normalize_list_field(&mut res.body, "MediaidListResponse", "uploaded");
        normalize_list_field(&mut res.body, "MediaidListResponse", "recorded");
        Ok(res)
    }

    /// Uploads a local audio file under a previously obtained grant.
    ///
    /// The upload endpoint lives outside the REST prefix and takes a
    /// multipart form: a `grant` field and a `mediafile` file part typed
    /// `audio/mpeg`. No status-code policy is applied; callers interpret
    /// the raw response themselves.
    pub async fn upload(
        &self,
        grant_id: &str,
        path: impl AsRef<Path>,
    ) -> TelesocialResult<ApiResponse> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mediafile".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(MEDIA_CONTENT_TYPE)
            .map_err(|e| {
                TelesocialError::Configuration(format!("Invalid media content type: {e}"))
            })?;
        let form = Form::new().text("grant", grant_id.to_string()).part("mediafile", part);

        let url = self.client.base_url().join("forklift")?;
        debug!("POST {url} (multipart, grant {grant_id})");
        let response = self.client.http().post(url).multipart(form).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse::new(status, &body))
    }

    /// Downloads the content of a media id to a local file.
    ///
    /// Looks up the media status, follows its `downloadUrl`, and writes the
    /// fetched bytes verbatim to `path`. Failures at any stage propagate;
    /// a media id without content is a service error.
    pub async fn download(
        &self,
        media_id: &str,
        path: impl AsRef<Path>,
    ) -> TelesocialResult<()> {
        let res = self.status(media_id).await?;
        let envelope: MediaResponse = res.decode("MediaResponse")?;
        let download_url = envelope.download_url.ok_or_else(|| {
            TelesocialError::service(res.status, format!("no content to download for media {media_id}"))
        })?;

        debug!("GET {download_url}");
        let response = self.client.http().get(&download_url).send().await?;
        if !response.status().is_success() {
            return Err(TelesocialError::service(
                response.status().as_u16(),
                format!("fetching {download_url} failed"),
            ));
        }
        let bytes = response.bytes().await?;
        std::fs::write(path, &bytes)?;
        Ok(())
    }

    /// Wraps an id in a [`Media`] handle bound to this client.
    pub fn get(&self, media_id: impl Into<String>) -> Media {
        Media {
            id: media_id.into(),
            client: self.client.clone(),
        }
    }
}

/// Handle over one media id, exposing the same operations as methods.
///
/// Derived accessors like [`content_exists`](Media::content_exists) re-query
/// the server on every call; nothing is cached.
#[derive(Debug, Clone)]
pub struct Media {
    id: String,
    client: TelesocialClient,
}

impl Media {
    /// The wrapped media id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether audio content exists for this media id.
    pub async fn content_exists(&self) -> TelesocialResult<bool> {
        let res = self.client.media().status(&self.id).await?;
        Ok(res.status == 200)
    }

    /// URL of this media's content, or `None` when no content exists yet.
    pub async fn download_url(&self) -> TelesocialResult<Option<String>> {
        let res = self.client.media().status(&self.id).await?;
        if res.status != 200 {
            return Ok(None);
        }
        let envelope: MediaResponse = res.decode("MediaResponse")?;
        Ok(envelope.download_url)
    }

    /// Size of this media's content in bytes, or `None` when no content
    /// exists yet.
    pub async fn file_size(&self) -> TelesocialResult<Option<u64>> {
        let res = self.client.media().status(&self.id).await?;
        if res.status != 200 {
            return Ok(None);
        }
        let envelope: MediaResponse = res.decode("MediaResponse")?;
        Ok(envelope.file_size)
    }

    /// Requests an upload grant for this media id and returns the grant id.
    pub async fn upload_grant(&self) -> TelesocialResult<String> {
        let res = self.client.media().request_upload_grant(&self.id).await?;
        let envelope: UploadResponse = res.decode("UploadResponse")?;
        Ok(envelope.grant_id)
    }

    /// Calls `network_id` and records what is said under this media id.
    pub async fn record(
        &self,
        network_id: &str,
        greeting_id: Option<&str>,
    ) -> TelesocialResult<ApiResponse> {
        self.client.media().record(&self.id, network_id, greeting_id).await
    }

    /// Calls `network_id` and plays this media's audio.
    pub async fn blast(
        &self,
        network_id: &str,
        greeting_id: Option<&str>,
    ) -> TelesocialResult<ApiResponse> {
        self.client.media().blast(&self.id, network_id, greeting_id).await
    }

    /// Retrieves unmodified status information for this media id.
    pub async fn status(&self) -> TelesocialResult<ApiResponse> {
        self.client.media().status(&self.id).await
    }

    /// Removes this media instance.
    pub async fn remove(&self) -> TelesocialResult<ApiResponse> {
        self.client.media().remove(&self.id).await
    }

    /// Uploads a local audio file as this media's content.
    ///
    /// Obtains a fresh grant first, then performs the multipart upload.
    pub async fn upload(&self, path: impl AsRef<Path>) -> TelesocialResult<ApiResponse> {
        let grant_id = self.upload_grant().await?;
        self.client.media().upload(&grant_id, path).await
    }

    /// Downloads this media's content to a local file.
    pub async fn download(&self, path: impl AsRef<Path>) -> TelesocialResult<()> {
        self.client.media().download(&self.id, path).await
    }
}
