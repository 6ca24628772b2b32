use serde::{Deserialize, Serialize};

use crate::model::channel::Channel;

/// One scheduled race as delivered by the upstream endpoint.
///
/// Every field is optional in the wire format; sparse records must still
/// deserialize so a single bad row never takes down the whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    /// Start instant as an ISO-8601 string, source of truth UTC.
    #[serde(default)]
    pub datetime: Option<String>,
    /// Participant names in provider order.
    #[serde(default)]
    pub runners: Vec<String>,
    #[serde(default)]
    pub channel: Option<Channel>,
    #[serde(default)]
    pub commentary: Option<Vec<String>>,
    #[serde(default)]
    pub tracking: Option<Vec<String>>,
}
