use remediation_core::config::{RemediationSettings, RemediationTarget};
use remediation_core::contract::{alert_fingerprint, HandlerResponse, Notification};
use remediation_core::error::RemediationError;
use serde_json::Value;
use tracing::{error, info};

use crate::adapters::compute::InstanceController;
use crate::adapters::notification::TopicPublisher;

const COMPONENT: &str = "remediation_handler";

/// Handles one alert: validates configuration, reboots the configured
/// instance, then publishes a notification. Every failure is reported as a
/// 500 response; nothing is propagated or retried.
pub fn handle_alert_event(
    event: &Value,
    settings: RemediationSettings,
    controller: &dyn InstanceController,
    publisher: &dyn TopicPublisher,
) -> HandlerResponse {
    info!(
        component = COMPONENT,
        event = "alert_received",
        alert_fingerprint = %alert_fingerprint(event),
        alert = %event,
        "Received alert"
    );

    let target = match settings.validate() {
        Ok(value) => value,
        Err(config_error) => {
            error!(
                component = COMPONENT,
                event = "configuration_missing",
                missing = ?config_error.missing(),
                "{config_error}"
            );
            return HandlerResponse::failure(config_error.to_string());
        }
    };

    match remediate(&target, controller, publisher) {
        Ok(()) => HandlerResponse::success(),
        Err(remediation_error) => {
            error!(
                component = COMPONENT,
                event = "remediation_failed",
                stage = remediation_error.stage(),
                instance_id = %target.instance_id,
                "Error during EC2 reboot or SNS publish: {remediation_error}"
            );
            HandlerResponse::failure(remediation_error.response_body())
        }
    }
}

fn remediate(
    target: &RemediationTarget,
    controller: &dyn InstanceController,
    publisher: &dyn TopicPublisher,
) -> Result<(), RemediationError> {
    controller
        .reboot_instance(&target.instance_id)
        .map_err(RemediationError::Reboot)?;
    info!(
        component = COMPONENT,
        event = "reboot_initiated",
        instance_id = %target.instance_id,
        "Reboot initiated for EC2 instance {}",
        target.instance_id
    );

    let notification = Notification::instance_rebooted(&target.instance_id);
    publisher
        .publish(&target.topic_arn, &notification)
        .map_err(RemediationError::Publish)?;
    info!(
        component = COMPONENT,
        event = "notification_sent",
        topic_arn = %target.topic_arn,
        "SNS notification sent to topic {}",
        target.topic_arn
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use remediation_core::contract::SUCCESS_BODY;
    use remediation_core::error::AdapterError;
    use serde_json::json;

    use super::*;

    type CallLog = Arc<Mutex<Vec<String>>>;

    struct RecordingController {
        calls: CallLog,
        failure: Option<&'static str>,
    }

    impl InstanceController for RecordingController {
        fn reboot_instance(&self, instance_id: &str) -> Result<(), AdapterError> {
            self.calls
                .lock()
                .expect("poisoned mutex")
                .push(format!("reboot:{instance_id}"));
            match self.failure {
                Some(message) => Err(AdapterError::new(message)),
                None => Ok(()),
            }
        }
    }

    struct RecordingPublisher {
        calls: CallLog,
        published: Mutex<Vec<(String, Notification)>>,
        failure: Option<&'static str>,
    }

    impl RecordingPublisher {
        fn published(&self) -> Vec<(String, Notification)> {
            self.published.lock().expect("poisoned mutex").clone()
        }
    }

    impl TopicPublisher for RecordingPublisher {
        fn publish(&self, topic_arn: &str, notification: &Notification) -> Result<(), AdapterError> {
            self.calls
                .lock()
                .expect("poisoned mutex")
                .push(format!("publish:{topic_arn}"));
            if let Some(message) = self.failure {
                return Err(AdapterError::new(message));
            }
            self.published
                .lock()
                .expect("poisoned mutex")
                .push((topic_arn.to_string(), notification.clone()));
            Ok(())
        }
    }

    fn collaborators(
        reboot_failure: Option<&'static str>,
        publish_failure: Option<&'static str>,
    ) -> (CallLog, RecordingController, RecordingPublisher) {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let controller = RecordingController {
            calls: Arc::clone(&calls),
            failure: reboot_failure,
        };
        let publisher = RecordingPublisher {
            calls: Arc::clone(&calls),
            published: Mutex::new(Vec::new()),
            failure: publish_failure,
        };
        (calls, controller, publisher)
    }

    fn calls(log: &CallLog) -> Vec<String> {
        log.lock().expect("poisoned mutex").clone()
    }

    fn configured() -> RemediationSettings {
        RemediationSettings::new(
            Some("i-0abc123".to_string()),
            Some("arn:aws:sns:us-east-1:123456789012:alerts".to_string()),
        )
    }

    fn sample_alert() -> Value {
        json!({
            "SearchName": "High latency on checkout",
            "NumRawResults": 12,
            "SearchQueryUrl": "https://service.sumologic.com/ui/#/search/abc"
        })
    }

    #[test]
    fn reboots_then_notifies_on_success() {
        let (log, controller, publisher) = collaborators(None, None);

        let response = handle_alert_event(&sample_alert(), configured(), &controller, &publisher);

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, SUCCESS_BODY);
        assert_eq!(
            calls(&log),
            vec![
                "reboot:i-0abc123".to_string(),
                "publish:arn:aws:sns:us-east-1:123456789012:alerts".to_string(),
            ]
        );

        let published = publisher.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].1.subject, "Sumo Logic Alert - EC2 Restarted");
        assert_eq!(
            published[0].1.message,
            "EC2 instance i-0abc123 restarted due to high latency."
        );
    }

    #[test]
    fn missing_configuration_skips_both_collaborators() {
        let (log, controller, publisher) = collaborators(None, None);
        let settings = RemediationSettings::new(
            None,
            Some("arn:aws:sns:us-east-1:123456789012:alerts".to_string()),
        );

        let response = handle_alert_event(&sample_alert(), settings, &controller, &publisher);

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body,
            "EC2_INSTANCE_ID or SNS_TOPIC_ARN environment variable not set"
        );
        assert!(calls(&log).is_empty());
    }

    #[test]
    fn missing_topic_skips_both_collaborators() {
        let (log, controller, publisher) = collaborators(None, None);
        let settings = RemediationSettings::new(Some("i-0abc123".to_string()), Some(String::new()));

        let response = handle_alert_event(&json!({}), settings, &controller, &publisher);

        assert_eq!(response.status_code, 500);
        assert!(calls(&log).is_empty());
    }

    #[test]
    fn reboot_failure_short_circuits_publish() {
        let (log, controller, publisher) = collaborators(
            Some("InstanceNotFound: The instance ID 'i-0abc123' does not exist"),
            None,
        );

        let response = handle_alert_event(&sample_alert(), configured(), &controller, &publisher);

        assert_eq!(response.status_code, 500);
        assert!(response.body.starts_with("Error: "));
        assert!(response.body.contains("InstanceNotFound"));
        assert_eq!(calls(&log), vec!["reboot:i-0abc123".to_string()]);
        assert!(publisher.published().is_empty());
    }

    #[test]
    fn publish_failure_after_reboot_is_still_a_failure() {
        let (log, controller, publisher) =
            collaborators(None, Some("AuthorizationError: not authorized to publish"));

        let response = handle_alert_event(&sample_alert(), configured(), &controller, &publisher);

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body,
            "Error: AuthorizationError: not authorized to publish"
        );
        assert_eq!(calls(&log).len(), 2);
    }

    #[test]
    fn repeated_alerts_are_not_deduplicated() {
        let (log, controller, publisher) = collaborators(None, None);
        let alert = sample_alert();

        let first = handle_alert_event(&alert, configured(), &controller, &publisher);
        let second = handle_alert_event(&alert, configured(), &controller, &publisher);

        assert_eq!(first, second);
        assert_eq!(calls(&log).len(), 4);
        assert_eq!(publisher.published().len(), 2);
    }

    #[test]
    fn accepts_non_object_alert_payloads() {
        let (_log, controller, publisher) = collaborators(None, None);

        let response = handle_alert_event(
            &json!(["not", "an", "object"]),
            configured(),
            &controller,
            &publisher,
        );

        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn whitespace_instance_id_is_sent_to_reboot_as_read() {
        let (log, controller, publisher) =
            collaborators(Some("InvalidInstanceID.Malformed: Invalid id: \"   \""), None);
        let settings = RemediationSettings::new(
            Some("   ".to_string()),
            Some("arn:aws:sns:us-east-1:123456789012:alerts".to_string()),
        );

        let response = handle_alert_event(&sample_alert(), settings, &controller, &publisher);

        assert_eq!(response.status_code, 500);
        assert!(response.body.starts_with("Error: InvalidInstanceID.Malformed"));
        assert_eq!(calls(&log), vec!["reboot:   ".to_string()]);
    }
}
