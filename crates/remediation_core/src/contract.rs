use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

pub const SUCCESS_BODY: &str = "EC2 rebooted and notification sent";
pub const NOTIFICATION_SUBJECT: &str = "Sumo Logic Alert - EC2 Restarted";
pub const REMEDIATION_CAUSE: &str = "high latency";

pub const STATUS_OK: u16 = 200;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Response record returned to the Lambda runtime for every invocation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    pub fn success() -> Self {
        Self {
            status_code: STATUS_OK,
            body: SUCCESS_BODY.to_string(),
        }
    }

    pub fn failure(body: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_INTERNAL_ERROR,
            body: body.into(),
        }
    }
}

/// Subject and message published after an instance reboot was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub message: String,
}

impl Notification {
    pub fn instance_rebooted(instance_id: &str) -> Self {
        Self {
            subject: NOTIFICATION_SUBJECT.to_string(),
            message: format!("EC2 instance {instance_id} restarted due to {REMEDIATION_CAUSE}."),
        }
    }
}

/// Hex SHA-256 of the compact JSON form of an alert. Used to correlate log
/// lines belonging to the same alert; never used to deduplicate.
pub fn alert_fingerprint(event: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(event.to_string());
    format!("{:x}", hasher.finalize())
}
