use async_trait::async_trait;
use cloudwatch_custom_connector::config::Config;
use cloudwatch_custom_connector::events::{
    CloudWatchCustomConnectorEvent, CloudWatchCustomConnectorEventType, GetMetricDataRequest,
    MetricArgument,
};
use cloudwatch_custom_connector::response::{
    ConnectorResponse, MessageData, MetricDataResult, StatusCode,
};
use cloudwatch_custom_connector::MetricDataSource;
use lambda_runtime::{Context, Error, LambdaEvent};
use pretty_assertions_sorted::assert_eq_sorted;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

fn load_event(name: &str) -> Value {
    let data = std::fs::read(format!("./tests/fixtures/{}", name)).unwrap();
    serde_json::from_slice(&data).unwrap()
}

/// Records the requests it receives and answers with a fixed CPU series.
#[derive(Default, Clone)]
struct RecordingSource {
    requests: Arc<Mutex<Vec<(i64, i64, i64, Vec<MetricArgument<'static>>)>>>,
}

impl RecordingSource {
    fn take_requests(&self) -> Vec<(i64, i64, i64, Vec<MetricArgument<'static>>)> {
        std::mem::take(&mut self.requests.lock().unwrap())
    }
}

#[async_trait]
impl MetricDataSource for RecordingSource {
    async fn get_metric_data(
        &self,
        request: &GetMetricDataRequest<'_>,
    ) -> Result<Vec<MetricDataResult>, Error> {
        let arguments = request
            .arguments()?
            .into_iter()
            .map(MetricArgument::into_owned)
            .collect();
        self.requests.lock().unwrap().push((
            request.start_time()?,
            request.end_time()?,
            request.period()?,
            arguments,
        ));

        Ok(vec![
            MetricDataResult::new()
                .with_label("CPUUtilization")
                .with_timestamps([1697060700, 1697061000, 1697061300])
                .with_values([15000, 14000, 16000]),
            MetricDataResult::new()
                .with_label("MemoryUtilization")
                .with_status_code(StatusCode::PartialData)
                .with_messages(vec![MessageData::with_value("memory agent lagging")]),
        ])
    }
}

#[test]
fn test_get_metric_data_request_view() {
    let raw = load_event("cloudWatchGetMetricData.json");
    let event = CloudWatchCustomConnectorEvent::new(&raw);

    assert_eq!(
        event.event_type().unwrap(),
        CloudWatchCustomConnectorEventType::GetMetricData
    );
    let request = event.get_metric_data_request().unwrap();
    let request_raw = &raw["GetMetricDataRequest"];
    assert_eq!(request.start_time().unwrap(), request_raw["StartTime"]);
    assert_eq!(request.end_time().unwrap(), request_raw["EndTime"]);
    assert_eq!(request.period().unwrap(), request_raw["Period"]);
    assert_eq!(
        serde_json::to_value(request.arguments().unwrap()).unwrap(),
        request_raw["Arguments"]
    );
}

#[test]
fn test_describe_event_view() {
    let raw = load_event("cloudWatchDescribeGetMetricData.json");
    let event = CloudWatchCustomConnectorEvent::new(&raw);
    assert_eq!(
        event.event_type().unwrap(),
        CloudWatchCustomConnectorEventType::DescribeGetMetricData
    );
    assert!(event.get_metric_data_request().is_none());
}

#[test_log::test(tokio::test)]
async fn test_get_metric_data_flow() {
    let source = RecordingSource::default();
    let evt = LambdaEvent::new(load_event("cloudWatchGetMetricData.json"), Context::default());

    let response = cloudwatch_custom_connector::function_handler(&source, &Config::default(), evt)
        .await
        .unwrap();

    assert!(matches!(response, ConnectorResponse::GetMetricData(_)));
    assert_eq_sorted!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "MetricDataResults": [
                {
                    "StatusCode": "Complete",
                    "Label": "CPUUtilization",
                    "Timestamps": [1697060700, 1697061000, 1697061300],
                    "Values": [15000, 14000, 16000]
                },
                {
                    "StatusCode": "PartialData",
                    "Label": "MemoryUtilization",
                    "Messages": [{"Value": "memory agent lagging"}]
                }
            ]
        })
    );

    let requests = source.take_requests();
    assert_eq!(requests.len(), 1);
    let (start, end, period, arguments) = &requests[0];
    assert_eq!((*start, *end, *period), (1697060700, 1697061600, 300));
    assert_eq!(
        arguments[0].as_str(),
        Some("serviceregistry_external_http_requests{host_environment=\"cmh\",service=\"EXAMPLE\"}")
    );
}

async fn run_test_describe_flow() {
    let config = Config::load_from_env().unwrap();
    let evt = LambdaEvent::new(
        load_event("cloudWatchDescribeGetMetricData.json"),
        Context::default(),
    );
    let source = RecordingSource::default();

    let response = cloudwatch_custom_connector::function_handler(&source, &config, evt)
        .await
        .unwrap();

    assert_eq_sorted!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "Description": "## Service registry\nRequests per period.",
            "ArgumentDefaults": [{"Value": "serviceregistry_external_http_requests"}, {"Value": 300}],
            "ArgumentsOptional": true
        })
    );
    assert!(source.take_requests().is_empty());
}

#[tokio::test]
async fn test_describe_flow() {
    temp_env::async_with_vars(
        [
            (
                "CONNECTOR_DESCRIPTION",
                Some("## Service registry\nRequests per period."),
            ),
            (
                "ARGUMENT_DEFAULTS",
                Some(r#"["serviceregistry_external_http_requests", 300]"#),
            ),
            ("ARGUMENTS_OPTIONAL", Some("true")),
        ],
        run_test_describe_flow(),
    )
    .await;
}
