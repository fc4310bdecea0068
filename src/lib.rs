use async_trait::async_trait;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::ConnectorError;
use crate::events::{
    CloudWatchCustomConnectorEvent, CloudWatchCustomConnectorEventType, GetMetricDataRequest,
};
use crate::response::{
    ConnectorResponse, GetMetricDataResponse, MessageData, MetricDataResult, StatusCode,
};

pub mod config;
pub mod error;
pub mod events;
pub mod response;

pub fn set_up_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();
}

/// Supplies the metric series answering a `GetMetricData` event.
///
/// An error returned here is reported to CloudWatch inside the response
/// instead of failing the invocation.
#[async_trait]
pub trait MetricDataSource: Send + Sync {
    async fn get_metric_data(
        &self,
        request: &GetMetricDataRequest<'_>,
    ) -> Result<Vec<MetricDataResult>, Error>;
}

// lambda handler
pub async fn function_handler<S>(
    source: &S,
    config: &Config,
    evt: LambdaEvent<Value>,
) -> Result<ConnectorResponse, Error>
where
    S: MetricDataSource + ?Sized,
{
    info!("Handling lambda invocation");
    debug!("Handling event payload: {:?}", evt.payload);

    let event = CloudWatchCustomConnectorEvent::new(&evt.payload);
    match event.event_type()? {
        CloudWatchCustomConnectorEventType::DescribeGetMetricData => {
            info!("DescribeGetMetricData EVENT Detected");
            Ok(config.describe_response().into())
        }
        CloudWatchCustomConnectorEventType::GetMetricData => {
            info!("GetMetricData EVENT Detected");
            let request = event
                .get_metric_data_request()
                .ok_or(ConnectorError::KeyNotFound("GetMetricDataRequest"))?;
            Ok(handle_get_metric_data(source, &request).await.into())
        }
    }
}

pub async fn handle_get_metric_data<S>(
    source: &S,
    request: &GetMetricDataRequest<'_>,
) -> GetMetricDataResponse
where
    S: MetricDataSource + ?Sized,
{
    match source.get_metric_data(request).await {
        Ok(results) => {
            debug!("metric data source returned {} series", results.len());
            GetMetricDataResponse::from_results(results)
        }
        Err(e) => {
            error!(error = %e, "metric data source failed");
            GetMetricDataResponse::from_error(MessageData::new(
                StatusCode::InternalError.as_str(),
                e.to_string(),
            ))
        }
    }
}
