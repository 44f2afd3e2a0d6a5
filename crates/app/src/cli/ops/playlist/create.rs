use clap::Args;

use common::credentials;
use common::error::SignError;
use linear_playlist::api::client::ApiError;
use linear_playlist::api::v4::linear_playlist::{CreateRequest, PlaylistObject};
use linear_playlist::state::StateError;

use super::{PayloadArgs, PLAYBACK_FORMATS};
use crate::cli::op::playback_signer;

#[derive(Args, Debug, Clone)]
pub struct Create {
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Debug, thiserror::Error)]
pub enum PlaylistCreateError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("config error: {0}")]
    State(#[from] StateError),
    #[error("failed to sign playback URL: {0}")]
    Sign(#[from] SignError),
    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Create {
    type Error = PlaylistCreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let settings = ctx.settings()?;
        let (owner_id, _) = credentials::require(&settings.credentials)?;
        let client = ctx.client(&settings)?;

        let request = CreateRequest {
            payload: self.payload.to_payload(),
        };
        let response: PlaylistObject = client.call(request).await?;
        tracing::info!(id = %response.id, "created playlist");

        let mut lines = vec![
            "Created playlist:".to_string(),
            serde_json::to_string_pretty(&response)?,
            String::new(),
            "Playback URLs:".to_string(),
        ];

        let signer = playback_signer(&settings);
        for (label, suffix) in PLAYBACK_FORMATS {
            let url = signer.sign_playback_url(
                &settings.playback_prefix,
                suffix,
                &response.id,
                owner_id,
                settings.ad_config.as_deref(),
            )?;
            lines.push(format!("  {:<5} {}", label, url));
        }

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::fs;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use common::signing::{verify_playback_query, SignedMessage};
    use linear_playlist::state::{AppConfig, AppState, CONFIG_FILE_NAME, SECRET_FILE_NAME};
    use serde_json::{json, Value};
    use url::Url;

    use super::*;
    use crate::cli::op::{Op, OpContext};

    async fn create_handler(
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> Result<(StatusCode, Json<Value>), StatusCode> {
        let signed = SignedMessage {
            msg: query.get("msg").cloned().unwrap_or_default(),
            sig: query.get("sig").cloned().unwrap_or_default(),
        };
        signed.verify(b"k").map_err(|_| StatusCode::UNAUTHORIZED)?;

        let mut created = body;
        created["id"] = json!("pl-new");
        Ok((StatusCode::CREATED, Json(created)))
    }

    async fn spawn_server() -> Url {
        let router = Router::new().route("/api/v4/linear-playlist/", post(create_handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{}", addr)).unwrap()
    }

    fn playback_url<'a>(output: &'a str, suffix: &str) -> &'a str {
        let marker = format!("/pl-new.{}?", suffix);
        output
            .lines()
            .filter_map(|line| line.split_whitespace().last())
            .find(|url| url.contains(&marker))
            .unwrap_or_else(|| panic!("no {} url in output:\n{}", suffix, output))
    }

    #[tokio::test]
    async fn test_create_prints_signed_playback_urls() {
        let api_host = spawn_server().await;
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().to_path_buf();
        AppState::init(
            Some(dir.clone()),
            AppConfig {
                owner_id: "abc123".to_string(),
                api_host,
                playback_prefix: "https://cdn.example/playlist".to_string(),
                ad_config: Some("beta".to_string()),
            },
            "k",
        )
        .unwrap();

        let op = Create {
            payload: PayloadArgs {
                desc: Some("Morning".into()),
                playlist: Some("30,beamA".into()),
                ..Default::default()
            },
        };
        let output = op.execute(&OpContext::new(None, Some(dir))).await.unwrap();
        assert!(output.contains("\"id\": \"pl-new\""));

        for suffix in ["m3u8", "mpd"] {
            let url = playback_url(&output, suffix);
            assert!(url.starts_with("https://cdn.example/playlist/pl-new."));

            let claims = verify_playback_query(url, b"k").unwrap();
            assert_eq!(claims.cid, "pl-new");
            assert_eq!(claims.oid, "abc123");
            assert_eq!(claims.ad, "beta");
        }
    }

    #[tokio::test]
    async fn test_create_without_owner_is_missing_credentials() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "owner_id = \"\"\napi_host = \"http://127.0.0.1:1\"\n",
        )
        .unwrap();
        fs::write(temp.path().join(SECRET_FILE_NAME), "k").unwrap();

        let op = Create {
            payload: PayloadArgs::default(),
        };
        let err = op
            .execute(&OpContext::new(None, Some(temp.path().to_path_buf())))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PlaylistCreateError::Sign(SignError::MissingCredentials("owner id"))
        ));
    }
}
