use common::playlist::PlaylistPayload;
use reqwest::{Client, RequestBuilder, Url};

use super::{playlist_url, PlaylistObject};
use crate::api::client::{ApiError, ApiRequest};

/// `PATCH /api/v4/linear-playlist/{id}`
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub id: String,
    pub payload: PlaylistPayload,
}

impl ApiRequest for UpdateRequest {
    type Response = PlaylistObject;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = playlist_url(base_url, Some(&self.id))?;
        Ok(client.patch(full_url).json(&self.payload))
    }
}
