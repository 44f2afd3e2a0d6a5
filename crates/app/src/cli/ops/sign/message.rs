use clap::Args;
use serde_json::{Map, Value};

use common::error::SignError;
use linear_playlist::state::StateError;

use crate::cli::op::message_signer;

/// Print the `msg`/`sig` pair for a request body
#[derive(Args, Debug, Clone)]
pub struct Message {
    /// JSON object to sign (defaults to an empty object)
    #[arg(long)]
    pub body: Option<String>,

    /// Also print the decoded JSON that was signed
    #[arg(long)]
    pub decode: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SignMessageError {
    #[error("config error: {0}")]
    State(#[from] StateError),
    #[error("signing failed: {0}")]
    Sign(#[from] SignError),
    #[error("invalid --body: {0}")]
    InvalidBody(serde_json::Error),
    #[error("failed to render message: {0}")]
    Render(serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Message {
    type Error = SignMessageError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let body: Value = match &self.body {
            Some(raw) => serde_json::from_str(raw).map_err(SignMessageError::InvalidBody)?,
            None => Value::Object(Map::new()),
        };

        let settings = ctx.settings()?;
        let signed = message_signer(&settings).sign(&body)?;

        let mut lines = vec![format!("msg={}", signed.msg), format!("sig={}", signed.sig)];
        if self.decode {
            let decoded = signed.decode()?;
            lines.push(serde_json::to_string_pretty(&decoded).map_err(SignMessageError::Render)?);
        }
        Ok(lines.join("\n"))
    }
}
