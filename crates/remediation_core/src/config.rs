use crate::error::ConfigError;

pub const INSTANCE_ID_VAR: &str = "EC2_INSTANCE_ID";
pub const TOPIC_ARN_VAR: &str = "SNS_TOPIC_ARN";
pub const MISSING_CONFIGURATION_MESSAGE: &str =
    "EC2_INSTANCE_ID or SNS_TOPIC_ARN environment variable not set";

/// Raw configuration as read for a single invocation. Values are not
/// validated until [`RemediationSettings::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemediationSettings {
    pub instance_id: Option<String>,
    pub topic_arn: Option<String>,
}

/// Validated configuration: both values present and non-empty, kept exactly
/// as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationTarget {
    pub instance_id: String,
    pub topic_arn: String,
}

impl RemediationSettings {
    pub fn new(instance_id: Option<String>, topic_arn: Option<String>) -> Self {
        Self {
            instance_id,
            topic_arn,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            instance_id: lookup(INSTANCE_ID_VAR),
            topic_arn: lookup(TOPIC_ARN_VAR),
        }
    }

    pub fn validate(self) -> Result<RemediationTarget, ConfigError> {
        let instance_id = non_empty(self.instance_id);
        let topic_arn = non_empty(self.topic_arn);

        match (instance_id, topic_arn) {
            (Some(instance_id), Some(topic_arn)) => Ok(RemediationTarget {
                instance_id,
                topic_arn,
            }),
            (instance_id, topic_arn) => {
                let mut missing = Vec::with_capacity(2);
                if instance_id.is_none() {
                    missing.push(INSTANCE_ID_VAR);
                }
                if topic_arn.is_none() {
                    missing.push(TOPIC_ARN_VAR);
                }
                Err(ConfigError::new(missing))
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.is_empty())
}
