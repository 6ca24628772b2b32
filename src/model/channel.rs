use serde::{Deserialize, Serialize};

/// Broadcast destination for a race: a display name and the stream URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub url: String,
}
