use mercado_core::UtcDateTime;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Response envelope printed by every command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    pub meta: EnvelopeMeta,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub generated_at: UtcDateTime,
    pub latency_ms: u64,
}

impl EnvelopeMeta {
    pub fn new(latency_ms: u64) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            generated_at: UtcDateTime::now(),
            latency_ms,
        }
    }
}

impl Envelope {
    pub fn new(success: bool, message: impl Into<String>, data: Value, latency_ms: u64) -> Self {
        Self {
            success,
            message: message.into(),
            meta: EnvelopeMeta::new(latency_ms),
            data,
        }
    }
}
