use reqwest::Method;

use crate::models::response::normalize_list_field;
use crate::models::ApiResponse;
use crate::{TelesocialClient, TelesocialResult};

/// Provides methods for orchestrating conference calls.
#[derive(Debug, Clone)]
pub struct ConferenceApi {
    client: TelesocialClient,
}

impl ConferenceApi {
    pub(crate) fn new(client: TelesocialClient) -> Self {
        Self { client }
    }

    /// Creates a new conference call led by `network_id`.
    ///
    /// `greeting_id` is played to participants when they answer;
    /// `recording_id` names the media id the conference audio is recorded
    /// to. Both are optional and omitted from the request when not supplied.
    pub async fn create(
        &self,
        network_id: &str,
        greeting_id: Option<&str>,
        recording_id: Option<&str>,
    ) -> TelesocialResult<ApiResponse> {
        let mut params = vec![("networkid", network_id)];
        if let Some(recording_id) = recording_id {
            params.push(("recordingid", recording_id));
        }
        if let Some(greeting_id) = greeting_id {
            params.push(("greetingid", greeting_id));
        }
        let res = self.client.send("conference", &params, Method::POST).await?;
        res.accept_success()
    }

    /// Adds one or more network ids to a conference.
    ///
    /// Each id is sent as a repeated `networkid` parameter.
    pub async fn add(
        &self,
        conference_id: &str,
        network_ids: &[&str],
        greeting_id: Option<&str>,
    ) -> TelesocialResult<ApiResponse> {
        let endpoint = format!("conference/{conference_id}");
        let mut params: Vec<(&str, &str)> =
            network_ids.iter().map(|id| ("networkid", *id)).collect();
        params.push(("action", "add"));
        if let Some(greeting_id) = greeting_id {
            params.push(("greetingid", greeting_id));
        }
        let res = self.client.send(&endpoint, &params, Method::POST).await?;
        res.accept_success()
    }

    /// Closes an active conference.
    pub async fn close(&self, conference_id: &str) -> TelesocialResult<ApiResponse> {
        let endpoint = format!("conference/{conference_id}");
        let res = self
            .client
            .send(&endpoint, &[("action", "close")], Method::POST)
            .await?;
        res.accept_success()
    }

    /// Terminates one leg of a conference.
    pub async fn hangup(
        &self,
        conference_id: &str,
        network_id: &str,
    ) -> TelesocialResult<ApiResponse> {
        let endpoint = format!("conference/{conference_id}/{network_id}");
        let res = self
            .client
            .send(&endpoint, &[("action", "hangup")], Method::POST)
            .await?;
        res.accept_success()
    }

    /// Moves a call leg from one conference to another.
    pub async fn move_leg(
        &self,
        from_id: &str,
        to_id: &str,
        network_id: &str,
    ) -> TelesocialResult<ApiResponse> {
        let endpoint = format!("conference/{from_id}/{network_id}");
        let params = [("toconferenceid", to_id), ("action", "move")];
        let res = self.client.send(&endpoint, &params, Method::POST).await?;
        res.accept_success()
    }

    /// Mutes one leg of a conference.
    pub async fn mute(
        &self,
        conference_id: &str,
        network_id: &str,
    ) -> TelesocialResult<ApiResponse> {
        self.set_muted(conference_id, network_id, true).await
    }

    /// Un-mutes one leg of a conference.
    pub async fn unmute(
        &self,
        conference_id: &str,
        network_id: &str,
    ) -> TelesocialResult<ApiResponse> {
        self.set_muted(conference_id, network_id, false).await
    }

    async fn set_muted(
        &self,
        conference_id: &str,
        network_id: &str,
        mute: bool,
    ) -> TelesocialResult<ApiResponse> {
        let endpoint = format!("conference/{conference_id}/{network_id}");
        let action = if mute { "mute" } else { "unmute" };
        let res = self
            .client
            .send(&endpoint, &[("action", action)], Method::POST)
            .await?;
        res.accept_success()
    }

    /// Retrieves details for one conference.
    pub async fn details(&self, conference_id: &str) -> TelesocialResult<ApiResponse> {
        let endpoint = format!("conference/{conference_id}");
        let res = self.client.send(&endpoint, &[], Method::GET).await?;
        res.accept_ok()
    }

    /// Lists the application's conferences.
    ///
    /// The `ConferenceListResponse.active` and `.inactive` fields are
    /// normalized so they are always lists.
    pub async fn list(&self) -> TelesocialResult<ApiResponse> {
        let res = self.client.send("conference", &[], Method::GET).await?;
        let mut res = res.accept_ok()?;
        normalize_list_field(&mut res.body, "ConferenceListResponse", "active");
        normalize_list_field(&mut res.body, "ConferenceListResponse", "inactive");
        Ok(res)
    }

    /// Wraps an id in a [`Conference`] handle bound to this client.
    pub fn get(&self, conference_id: impl Into<String>) -> Conference {
        Conference {
            id: conference_id.into(),
            client: self.client.clone(),
        }
    }
}

/// Handle over one conference, exposing the same operations as methods.
#[derive(Debug, Clone)]
pub struct Conference {
    id: String,
    client: TelesocialClient,
}

impl Conference {
    /// The wrapped conference id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds one or more network ids to this conference.
    pub async fn add(
        &self,
        network_ids: &[&str],
        greeting_id: Option<&str>,
    ) -> TelesocialResult<ApiResponse> {
        self.client.conferences().add(&self.id, network_ids, greeting_id).await
    }

    /// Closes this conference, if it is active.
    pub async fn close(&self) -> TelesocialResult<ApiResponse> {
        self.client.conferences().close(&self.id).await
    }

    /// Terminates the specified call leg from this conference.
    pub async fn hangup(&self, network_id: &str) -> TelesocialResult<ApiResponse> {
        self.client.conferences().hangup(&self.id, network_id).await
    }

    /// Moves a call leg from this conference to another.
    pub async fn move_leg(
        &self,
        to_id: &str,
        network_id: &str,
    ) -> TelesocialResult<ApiResponse> {
        self.client.conferences().move_leg(&self.id, to_id, network_id).await
    }

    /// Mutes the specified call leg.
    pub async fn mute(&self, network_id: &str) -> TelesocialResult<ApiResponse> {
        self.client.conferences().mute(&self.id, network_id).await
    }

    /// Un-mutes the specified call leg.
    pub async fn unmute(&self, network_id: &str) -> TelesocialResult<ApiResponse> {
        self.client.conferences().unmute(&self.id, network_id).await
    }

    /// Retrieves details for this conference.
    pub async fn details(&self) -> TelesocialResult<ApiResponse> {
        self.client.conferences().details(&self.id).await
    }
}
