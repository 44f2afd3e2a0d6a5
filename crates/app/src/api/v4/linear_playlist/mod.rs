pub mod create;
pub mod delete;
pub mod read;
pub mod update;

pub use create::CreateRequest;
pub use delete::DeleteRequest;
pub use read::ReadRequest;
pub use update::UpdateRequest;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::api::client::ApiError;

pub const LINEAR_PLAYLIST_PATH: &str = "/api/v4/linear-playlist/";

/// A playlist object as returned by create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistObject {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// `{base}/api/v4/linear-playlist/` or `{base}/api/v4/linear-playlist/{id}`.
pub fn playlist_url(base_url: &Url, id: Option<&str>) -> Result<Url, ApiError> {
    let mut url = base_url.join(LINEAR_PLAYLIST_PATH)?;
    if let Some(id) = id {
        url.path_segments_mut()
            .map_err(|_| ApiError::CannotBeABase(base_url.clone()))?
            .pop_if_empty()
            .push(id);
    }
    Ok(url)
}
