use remediation_core::contract::Notification;
use remediation_core::error::AdapterError;

pub trait TopicPublisher {
    fn publish(&self, topic_arn: &str, notification: &Notification) -> Result<(), AdapterError>;
}
