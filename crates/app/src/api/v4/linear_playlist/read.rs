use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use super::playlist_url;
use crate::api::client::{ApiError, ApiRequest};

/// `GET /api/v4/linear-playlist/[{id}]`
///
/// Without an id the service lists every playlist on the account; the
/// response shape differs between the two, so it is left as raw JSON.
#[derive(Debug, Clone, Default)]
pub struct ReadRequest {
    pub id: Option<String>,
}

impl ApiRequest for ReadRequest {
    type Response = Value;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = playlist_url(base_url, self.id.as_deref())?;
        Ok(client.get(full_url))
    }
}
