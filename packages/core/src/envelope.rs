use serde::{Deserialize, Serialize};

/// Standard response wrapper used by every backend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    pub success: bool,
    pub message: String,
    pub data: T,
}

/// Envelope variant for paginated collections
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedEnvelope<T> {
    pub status_code: u16,
    pub success: bool,
    pub message: String,
    pub page: u32,
    pub total: u64,
    pub last_page: u32,
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wrap a payload in a successful envelope (used by tests and mocks)
    pub fn success(data: T) -> Self {
        Envelope {
            status_code: 200,
            success: true,
            message: "OK".to_string(),
            data,
        }
    }
}
