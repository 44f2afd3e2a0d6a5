use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use super::playlist_url;
use crate::api::client::{ApiError, ApiRequest};

/// `DELETE /api/v4/linear-playlist/{id}`
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub id: String,
}

impl ApiRequest for DeleteRequest {
    type Response = Value;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = playlist_url(base_url, Some(&self.id))?;
        Ok(client.delete(full_url))
    }
}
