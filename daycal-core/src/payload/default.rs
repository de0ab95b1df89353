use serde::{Deserialize, Serialize};

use super::PayloadVariant;

/// Payload for events that only carry an optional user-provided link.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultPayload {
    #[serde(default)]
    pub provided_link: Option<String>,
}

impl DefaultPayload {
    pub fn with_link(link: impl Into<String>) -> Self {
        DefaultPayload {
            provided_link: Some(link.into()),
        }
    }
}

impl PayloadVariant for DefaultPayload {
    const TAG: &'static str = "DefaultEventData";
}
