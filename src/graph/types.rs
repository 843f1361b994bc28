//! Meta Graph API wire types.

use serde::{Deserialize, Serialize};

/// A targetable ad interest returned by Graph search.
///
/// Field names follow the Graph API wire format. Audience bounds and the
/// category path are frequently absent for niche interests, so they default
/// to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Interest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub audience_size_lower_bound: u64,
    #[serde(default)]
    pub audience_size_upper_bound: u64,
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Graph wraps every collection response in `{"data": [...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    #[serde(default)]
    pub data: Vec<T>,
}

/// Graph failure envelope: `{"error": {"message", "type", "code"}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorEnvelope {
    pub error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorBody {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub code: i64,
}
