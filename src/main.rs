use async_trait::async_trait;
use cloudwatch_custom_connector::config::Config;
use cloudwatch_custom_connector::events::GetMetricDataRequest;
use cloudwatch_custom_connector::response::MetricDataResult;
use cloudwatch_custom_connector::MetricDataSource;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{debug, info};

/// Emits one series holding the same value at every period of the requested
/// window. Arguments: `[label, value]`, both optional.
struct ConstantSource;

#[async_trait]
impl MetricDataSource for ConstantSource {
    async fn get_metric_data(
        &self,
        request: &GetMetricDataRequest<'_>,
    ) -> Result<Vec<MetricDataResult>, Error> {
        let (start, end, period) = (request.start_time()?, request.end_time()?, request.period()?);
        if period <= 0 {
            return Err(format!("period must be positive, got {}", period).into());
        }

        let arguments = request.arguments()?;
        let label = arguments
            .iter()
            .find_map(|argument| argument.as_str())
            .unwrap_or("constant");
        let value = arguments
            .iter()
            .find_map(|argument| argument.as_f64())
            .unwrap_or(0.0);
        debug!(label, value, start, end, period, "building constant series");

        let timestamps: Vec<i64> = (start..=end).step_by(period as usize).collect();
        let values = vec![value; timestamps.len()];
        Ok(vec![MetricDataResult::new()
            .with_label(label)
            .with_timestamps(timestamps)
            .with_values(values)])
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    cloudwatch_custom_connector::set_up_logging();

    info!(
        "Initializing {} version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::load_from_env()?;
    let source = ConstantSource;

    run(service_fn(|request: LambdaEvent<Value>| {
        cloudwatch_custom_connector::function_handler(&source, &config, request)
    }))
    .await
}
