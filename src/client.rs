use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use log::debug;
use reqwest::{Client as ReqwestClient, Method};
use url::Url;

use crate::api::conference::{Conference, ConferenceApi};
use crate::api::media::{Media, MediaApi};
use crate::api::network_id::{NetworkId, NetworkIdApi};
use crate::models::{ApiResponse, ApiVersion, ConferenceResponse, MediaResponse};
use crate::{TelesocialError, TelesocialResult};

/// Default API server hostname.
pub const DEFAULT_HOST: &str = "api4.bitmouth.com";

const REST_PREFIX: &str = "api/rest/";

/// Builder for [`TelesocialClient`].
///
/// Validates the configuration at build time.
#[derive(Default)]
pub struct TelesocialClientBuilder {
    app_key: Option<String>,
    host: Option<String>,
    https: bool,
    user_agent: Option<String>,
    http_client: Option<ReqwestClient>,
}

impl TelesocialClientBuilder {
    /// Sets the application key sent with every request.
    pub fn app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }

    /// Sets the API server hostname (default: `api4.bitmouth.com`).
    ///
    /// A full URL with scheme and port is also accepted, which is how the
    /// tests point the client at a mock server.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Selects HTTPS instead of plain HTTP.
    pub fn https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    /// Sets a custom user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets a custom reqwest client (e.g., for testing or custom middleware).
    pub fn http_client(mut self, http_client: ReqwestClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn build(self) -> TelesocialResult<TelesocialClient> {
        let app_key = self
            .app_key
            .ok_or_else(|| TelesocialError::Configuration("Application key is required".into()))?;

        let host = self.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let base = if host.contains("://") {
            host
        } else if self.https {
            format!("https://{host}/")
        } else {
            format!("http://{host}/")
        };
        let base_url = Url::parse(&base).map_err(|e| {
            TelesocialError::Configuration(format!("Invalid API host '{base}': {e}"))
        })?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| concat!("telesocial/", env!("CARGO_PKG_VERSION")).to_string());

        let http_client = match self.http_client {
            Some(custom_client) => custom_client,
            None => ReqwestClient::builder().user_agent(user_agent).build().map_err(|e| {
                TelesocialError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?,
        };

        Ok(TelesocialClient {
            base_url,
            app_key: Arc::new(ArcSwap::from_pointee(app_key)),
            http_client,
        })
    }
}

/// The main client for the Telesocial conferencing REST API.
///
/// The client holds the API server location, the application key, and the
/// underlying HTTP client. It is cheap to clone; clones share the HTTP
/// connection pool and the application key, so [`set_app_key`] on any clone
/// is visible to all of them on their next request.
///
/// [`set_app_key`]: TelesocialClient::set_app_key
#[derive(Clone)]
pub struct TelesocialClient {
    base_url: Url,
    app_key: Arc<ArcSwap<String>>,
    http_client: ReqwestClient,
}

impl fmt::Debug for TelesocialClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelesocialClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl TelesocialClient {
    /// Creates a client for the default API server.
    pub fn new(app_key: impl Into<String>) -> TelesocialResult<Self> {
        Self::builder().app_key(app_key).build()
    }

    pub fn builder() -> TelesocialClientBuilder {
        TelesocialClientBuilder::default()
    }

    /// Replaces the application key.
    ///
    /// Takes effect on the next request, from this instance or any clone.
    pub fn set_app_key(&self, app_key: impl Into<String>) {
        self.app_key.store(Arc::new(app_key.into()));
    }

    /// Returns a snapshot of the current application key.
    pub fn app_key(&self) -> String {
        String::clone(&self.app_key.load())
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &ReqwestClient {
        &self.http_client
    }

    /// Issues one request against the REST prefix and classifies the raw
    /// response.
    ///
    /// The application key is injected unless the caller already supplied
    /// one. `POST` sends the parameters as a url-encoded body; `GET` and
    /// `DELETE` append them as a query string. A response with any status
    /// code yields an [`ApiResponse`]; only the failure to obtain a response
    /// at all is a [`TelesocialError::Network`].
    pub(crate) async fn send(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        method: Method,
    ) -> TelesocialResult<ApiResponse> {
        let (status, body) = self.send_text(endpoint, params, method).await?;
        Ok(ApiResponse::new(status, &body))
    }

    pub(crate) async fn send_text(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        method: Method,
    ) -> TelesocialResult<(u16, String)> {
        let url = self.base_url.join(&format!("{REST_PREFIX}{endpoint}"))?;

        let app_key = self.app_key.load();
        let mut pairs: Vec<(&str, &str)> = params.to_vec();
        if !pairs.iter().any(|(name, _)| *name == "appkey") {
            pairs.push(("appkey", app_key.as_str()));
        }

        debug!("{method} {url}");
        let request = self.http_client.request(method.clone(), url);
        let request = if method == Method::POST {
            request.form(&pairs)
        } else {
            request.query(&pairs)
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("-> {status} ({} bytes)", body.len());

        Ok((status, body))
    }

    /// Returns the version of the server API implementation.
    ///
    /// The version endpoint replies with a bare dotted string rather than
    /// JSON; an unparsable body is a service error, distinct from an HTTP
    /// failure.
    pub async fn version(&self) -> TelesocialResult<ApiVersion> {
        let (_, body) = self.send_text("version", &[], Method::GET).await?;
        ApiVersion::parse(&body).ok_or_else(|| {
            TelesocialError::service(500, format!("Invalid version response: {body}"))
        })
    }

    /// Gets the network-id API interface.
    pub fn network_ids(&self) -> NetworkIdApi {
        NetworkIdApi::new(self.clone())
    }

    /// Gets the conference API interface.
    pub fn conferences(&self) -> ConferenceApi {
        ConferenceApi::new(self.clone())
    }

    /// Gets the media API interface.
    pub fn media(&self) -> MediaApi {
        MediaApi::new(self.clone())
    }

    /// Registers a network id and returns a handle bound to it.
    ///
    /// Registering an id that already exists relates it to the calling
    /// application instead.
    pub async fn register_network_id(
        &self,
        network_id: &str,
        phone: Option<&str>,
        greeting_id: Option<&str>,
    ) -> TelesocialResult<NetworkId> {
        self.network_ids().register(network_id, phone, greeting_id).await?;
        Ok(self.network_ids().get(network_id))
    }

    /// Creates a conference led by `network_id` and returns a handle to it.
    pub async fn create_conference(
        &self,
        network_id: &str,
        greeting_id: Option<&str>,
        recording_id: Option<&str>,
    ) -> TelesocialResult<Conference> {
        let res = self.conferences().create(network_id, greeting_id, recording_id).await?;
        let envelope: ConferenceResponse = res.decode("ConferenceResponse")?;
        Ok(self.conferences().get(envelope.conference_id))
    }

    /// Allocates a new media id and returns a handle to it.
    pub async fn create_media(&self) -> TelesocialResult<Media> {
        let res = self.media().create().await?;
        let envelope: MediaResponse = res.decode("MediaResponse")?;
        let media_id = envelope.media_id.ok_or_else(|| {
            TelesocialError::service(res.status, "missing mediaId in MediaResponse")
        })?;
        Ok(self.media().get(media_id))
    }
}
