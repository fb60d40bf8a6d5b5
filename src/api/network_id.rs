use reqwest::Method;

use crate::models::response::normalize_list_field;
use crate::models::ApiResponse;
use crate::{TelesocialClient, TelesocialResult};

/// Provides methods for registering and inspecting network ids.
///
/// A network id is an opaque identifier representing a registered
/// phone-number endpoint in the remote system.
#[derive(Debug, Clone)]
pub struct NetworkIdApi {
    client: TelesocialClient,
}

impl NetworkIdApi {
    pub(crate) fn new(client: TelesocialClient) -> Self {
        Self { client }
    }

    /// Registers a (network id, phone number) pair, or relates an existing
    /// network id to the calling application.
    ///
    /// `greeting_id` names pre-recorded media to play to the potential
    /// registrant. Optional arguments are omitted from the request entirely
    /// when not supplied.
    ///
    /// # Errors
    ///
    /// Any non-2xx status is a [`TelesocialError::Service`] carrying the
    /// status code and the message found in the body.
    ///
    /// [`TelesocialError::Service`]: crate::TelesocialError::Service
    pub async fn register(
        &self,
        network_id: &str,
        phone: Option<&str>,
        greeting_id: Option<&str>,
    ) -> TelesocialResult<ApiResponse> {
        let mut params = vec![("networkid", network_id)];
        if let Some(phone) = phone {
            params.push(("phone", phone));
        }
        if let Some(greeting_id) = greeting_id {
            params.push(("greetingid", greeting_id));
        }
        let res = self.client.send("registrant/", &params, Method::POST).await?;
        res.accept_success()
    }

    /// Queries the registration status of a network id.
    ///
    /// With `check_related`, also asks whether the id is associated with the
    /// calling application. The statuses 200, 401 and 404 are all successful
    /// determinations here (registered and related, registered elsewhere,
    /// unknown) and are returned, not raised.
    pub async fn status(
        &self,
        network_id: &str,
        check_related: bool,
    ) -> TelesocialResult<ApiResponse> {
        let endpoint = format!("registrant/{network_id}");
        let mut params = Vec::new();
        if check_related {
            params.push(("query", "related"));
        }
        let res = self.client.send(&endpoint, &params, Method::POST).await?;
        res.accept(&[200, 401, 404])
    }

    /// Lists the network ids registered to the calling application.
    ///
    /// The `NetworkidListResponse.networkids` field is normalized so it is
    /// always a list, whatever the server collapsed it to.
    pub async fn list(&self) -> TelesocialResult<ApiResponse> {
        let res = self.client.send("registrant/", &[], Method::GET).await?;
        let mut res = res.accept_ok()?;
        normalize_list_field(&mut res.body, "NetworkidListResponse", "networkids");
        Ok(res)
    }

    /// Removes a network id registration.
    pub async fn delete(&self, network_id: &str) -> TelesocialResult<ApiResponse> {
        let endpoint = format!("registrant/{network_id}");
        let res = self.client.send(&endpoint, &[], Method::DELETE).await?;
        res.accept_success()
    }

    /// Wraps an id in a [`NetworkId`] handle bound to this client.
    pub fn get(&self, network_id: impl Into<String>) -> NetworkId {
        NetworkId {
            id: network_id.into(),
            client: self.client.clone(),
        }
    }
}

/// Handle over one network id, exposing the same operations as methods.
///
/// The handle holds no state beyond the id; every accessor re-queries the
/// server.
#[derive(Debug, Clone)]
pub struct NetworkId {
    id: String,
    client: TelesocialClient,
}

impl NetworkId {
    /// The wrapped network id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether this network id was previously registered, by any
    /// application.
    pub async fn exists(&self) -> TelesocialResult<bool> {
        let res = self.client.network_ids().status(&self.id, true).await?;
        Ok(matches!(res.status, 200 | 401))
    }

    /// Whether this network id is registered and associated with the calling
    /// application.
    pub async fn related(&self) -> TelesocialResult<bool> {
        let res = self.client.network_ids().status(&self.id, true).await?;
        Ok(res.status == 200)
    }

    /// Calls this network id and plays a previously recorded audio clip.
    pub async fn blast(
        &self,
        media_id: &str,
        greeting_id: Option<&str>,
    ) -> TelesocialResult<ApiResponse> {
        self.client.media().blast(media_id, &self.id, greeting_id).await
    }

    /// Calls this network id and records the response under `media_id`.
    pub async fn record(
        &self,
        media_id: &str,
        greeting_id: Option<&str>,
    ) -> TelesocialResult<ApiResponse> {
        self.client.media().record(media_id, &self.id, greeting_id).await
    }

    /// Adds this network id to a conference.
    pub async fn join(
        &self,
        conference_id: &str,
        greeting_id: Option<&str>,
    ) -> TelesocialResult<ApiResponse> {
        self.client
            .conferences()
            .add(conference_id, &[&self.id], greeting_id)
            .await
    }

    /// Terminates this id's leg of a conference.
    pub async fn hangup(&self, conference_id: &str) -> TelesocialResult<ApiResponse> {
        self.client.conferences().hangup(conference_id, &self.id).await
    }

    /// Moves this id's call leg between conferences.
    pub async fn move_to(&self, from_id: &str, to_id: &str) -> TelesocialResult<ApiResponse> {
        self.client.conferences().move_leg(from_id, to_id, &self.id).await
    }

    /// Mutes this id's leg of a conference.
    pub async fn mute(&self, conference_id: &str) -> TelesocialResult<ApiResponse> {
        self.client.conferences().mute(conference_id, &self.id).await
    }

    /// Un-mutes this id's leg of a conference.
    pub async fn unmute(&self, conference_id: &str) -> TelesocialResult<ApiResponse> {
        self.client.conferences().unmute(conference_id, &self.id).await
    }

    /// Removes this network id's registration.
    pub async fn deregister(&self) -> TelesocialResult<ApiResponse> {
        self.client.network_ids().delete(&self.id).await
    }
}
