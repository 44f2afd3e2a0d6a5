use common::playlist::PlaylistPayload;
use reqwest::{Client, RequestBuilder, Url};

use super::{playlist_url, PlaylistObject};
use crate::api::client::{ApiError, ApiRequest};

/// `POST /api/v4/linear-playlist/`
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub payload: PlaylistPayload,
}

impl ApiRequest for CreateRequest {
    type Response = PlaylistObject;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = playlist_url(base_url, None)?;
        Ok(client.post(full_url).json(&self.payload))
    }
}
