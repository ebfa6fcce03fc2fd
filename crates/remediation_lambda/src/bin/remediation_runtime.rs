use aws_sdk_ec2::error::DisplayErrorContext;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use remediation_core::config::RemediationSettings;
use remediation_core::contract::{HandlerResponse, Notification};
use remediation_core::error::AdapterError;
use remediation_lambda::adapters::compute::InstanceController;
use remediation_lambda::adapters::notification::TopicPublisher;
use remediation_lambda::handlers::alert::handle_alert_event;
use remediation_lambda::logging::init_logging;
use serde_json::Value;

struct Ec2InstanceController {
    ec2_client: aws_sdk_ec2::Client,
}

impl InstanceController for Ec2InstanceController {
    fn reboot_instance(&self, instance_id: &str) -> Result<(), AdapterError> {
        let client = self.ec2_client.clone();
        let target_instance_id = instance_id.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .reboot_instances()
                    .instance_ids(target_instance_id)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| AdapterError::new(DisplayErrorContext(&error).to_string()))
            })
        })
    }
}

struct SnsTopicPublisher {
    sns_client: aws_sdk_sns::Client,
}

impl TopicPublisher for SnsTopicPublisher {
    fn publish(&self, topic_arn: &str, notification: &Notification) -> Result<(), AdapterError> {
        let client = self.sns_client.clone();
        let target_topic_arn = topic_arn.to_string();
        let subject = notification.subject.clone();
        let message = notification.message.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .publish()
                    .topic_arn(target_topic_arn)
                    .subject(subject)
                    .message(message)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| AdapterError::new(DisplayErrorContext(&error).to_string()))
            })
        })
    }
}

#[derive(Clone)]
struct RuntimeDependencies {
    ec2_client: aws_sdk_ec2::Client,
    sns_client: aws_sdk_sns::Client,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: RuntimeDependencies,
) -> Result<HandlerResponse, Error> {
    let (payload, _context) = event.into_parts();
    let settings = RemediationSettings::from_env();

    let controller = Ec2InstanceController {
        ec2_client: deps.ec2_client,
    };
    let publisher = SnsTopicPublisher {
        sns_client: deps.sns_client,
    };

    Ok(handle_alert_event(&payload, settings, &controller, &publisher))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging()?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        ec2_client: aws_sdk_ec2::Client::new(&aws_config),
        sns_client: aws_sdk_sns::Client::new(&aws_config),
    };

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        handle_request(event, deps.clone())
    }))
    .await
}
