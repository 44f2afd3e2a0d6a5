use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use common::signing::{MessageSigner, PlaybackSigner};
use url::Url;

use linear_playlist::api::client::{ApiClient, ApiError};
use linear_playlist::state::{Settings, StateError};

#[derive(Debug, Clone)]
pub struct OpContext {
    /// Explicit `--remote` override for the API host
    pub remote: Option<Url>,
    /// Optional custom config path (defaults to ~/.lpl)
    pub config_path: Option<PathBuf>,
}

impl OpContext {
    pub fn new(remote: Option<Url>, config_path: Option<PathBuf>) -> Self {
        Self {
            remote,
            config_path,
        }
    }

    /// Resolve config directory, environment and `--remote` into settings
    pub fn settings(&self) -> Result<Settings, StateError> {
        Settings::resolve(self.config_path.clone(), self.remote.clone())
    }

    /// API client signing with the resolved credentials
    pub fn client(&self, settings: &Settings) -> Result<ApiClient, ApiError> {
        ApiClient::new(&settings.api_host, message_signer(settings))
    }
}

pub fn message_signer(settings: &Settings) -> MessageSigner {
    MessageSigner::new(Arc::new(settings.credentials.clone()))
}

pub fn playback_signer(settings: &Settings) -> PlaybackSigner {
    PlaybackSigner::new(Arc::new(settings.credentials.clone()))
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($($(#[$meta:meta])* ($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($(#[$meta])* $variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
