use common::signing::MessageSigner;
use reqwest::{header::HeaderMap, header::HeaderValue, Client};
use url::Url;

use super::error::ApiError;
use super::ApiRequest;

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub remote: Url,
    client: Client,
    signer: MessageSigner,
}

impl ApiClient {
    pub fn new(remote: &Url, signer: MessageSigner) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            remote: remote.clone(),
            client,
            signer,
        })
    }

    /// Send `request` with a freshly signed `msg`/`sig` pair in the query.
    ///
    /// Any 2xx status is a success; an empty success body decodes as JSON
    /// `null`.
    pub async fn call<T: ApiRequest>(&self, request: T) -> Result<T::Response, ApiError> {
        let signed = self.signer.sign_empty()?;
        let request = request
            .build_request(&self.remote, &self.client)?
            .query(&signed)
            .build()?;

        tracing::debug!(method = %request.method(), url = %request.url().path(), "sending signed request");
        let response = self.client.execute(request).await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let body = if body.trim().is_empty() { "null" } else { body.as_str() };
            Ok(serde_json::from_str::<T::Response>(body)?)
        } else {
            tracing::warn!(%status, "API call failed");
            Err(ApiError::HttpStatus(status, body))
        }
    }
}
