use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::ConnectorError;
use crate::events::MetricArgument;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum StatusCode {
    #[default]
    Complete,
    InternalError,
    PartialData,
    Forbidden,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Complete => "Complete",
            StatusCode::InternalError => "InternalError",
            StatusCode::PartialData => "PartialData",
            StatusCode::Forbidden => "Forbidden",
        }
    }
}

impl FromStr for StatusCode {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, ConnectorError> {
        match s {
            "Complete" => Ok(StatusCode::Complete),
            "InternalError" => Ok(StatusCode::InternalError),
            "PartialData" => Ok(StatusCode::PartialData),
            "Forbidden" => Ok(StatusCode::Forbidden),
            other => Err(ConnectorError::UnknownStatusCode(other.to_string())),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message returned to CloudWatch, made of a code and a free-text value.
/// The value is displayed in the CloudWatch console.
#[derive(PartialEq, Eq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl MessageData {
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        MessageData {
            code: Some(code.into()),
            value: Some(value.into()),
        }
    }

    pub fn with_code(code: impl Into<String>) -> Self {
        MessageData {
            code: Some(code.into()),
            value: None,
        }
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        MessageData {
            code: None,
            value: Some(value.into()),
        }
    }
}

impl fmt::Display for MessageData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.code, &self.value) {
            (Some(code), Some(value)) => write!(f, "{}: {}", code, value),
            (Some(code), None) => f.write_str(code),
            (None, Some(value)) => f.write_str(value),
            (None, None) => Ok(()),
        }
    }
}

/// One sample of a metric series. Integer samples keep their integer JSON form.
#[derive(PartialEq, Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum DataPoint {
    Int(i64),
    Float(f64),
}

impl From<i32> for DataPoint {
    fn from(v: i32) -> Self {
        DataPoint::Int(v.into())
    }
}

impl From<u32> for DataPoint {
    fn from(v: u32) -> Self {
        DataPoint::Int(v.into())
    }
}

impl From<i64> for DataPoint {
    fn from(v: i64) -> Self {
        DataPoint::Int(v)
    }
}

impl From<f64> for DataPoint {
    fn from(v: f64) -> Self {
        DataPoint::Float(v)
    }
}

/// The data points of one metric, with their timestamps and identifying label.
///
/// `timestamps` and `values` are expected to line up one to one; nothing here
/// checks it.
#[derive(PartialEq, Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDataResult {
    pub status_code: StatusCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<MessageData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<DataPoint>>,
}

impl MetricDataResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status_code(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn with_messages(mut self, messages: Vec<MessageData>) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_timestamps(mut self, timestamps: impl IntoIterator<Item = i64>) -> Self {
        self.timestamps = Some(timestamps.into_iter().collect());
        self
    }

    pub fn with_values<V: Into<DataPoint>>(mut self, values: impl IntoIterator<Item = V>) -> Self {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Response to a `GetMetricData` event.
///
/// An `error` replaces the results entirely when serialized.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct GetMetricDataResponse {
    pub error: Option<MessageData>,
    pub results: Vec<MetricDataResult>,
}

impl GetMetricDataResponse {
    pub fn from_results(results: Vec<MetricDataResult>) -> Self {
        GetMetricDataResponse {
            error: None,
            results,
        }
    }

    pub fn from_error(error: MessageData) -> Self {
        GetMetricDataResponse {
            error: Some(error),
            results: Vec::new(),
        }
    }
}

impl Serialize for GetMetricDataResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        match &self.error {
            // CloudWatch misrenders a response holding both keys
            Some(error) => map.serialize_entry("Error", error)?,
            // an absent MetricDataResults key raises a console warning
            None => map.serialize_entry("MetricDataResults", &self.results)?,
        }
        map.end()
    }
}

#[derive(PartialEq, Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArgumentDefault {
    pub value: MetricArgument<'static>,
}

impl From<MetricArgument<'static>> for ArgumentDefault {
    fn from(value: MetricArgument<'static>) -> Self {
        ArgumentDefault { value }
    }
}

/// Response to a `DescribeGetMetricData` event. The description is rendered as
/// markdown in the CloudWatch console and the defaults prefill the query editor.
#[derive(PartialEq, Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeGetMetricDataResponse {
    pub description: String,
    pub argument_defaults: Vec<ArgumentDefault>,
    pub arguments_optional: bool,
}

#[derive(PartialEq, Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ConnectorResponse {
    Describe(DescribeGetMetricDataResponse),
    GetMetricData(GetMetricDataResponse),
}

impl From<DescribeGetMetricDataResponse> for ConnectorResponse {
    fn from(response: DescribeGetMetricDataResponse) -> Self {
        ConnectorResponse::Describe(response)
    }
}

impl From<GetMetricDataResponse> for ConnectorResponse {
    fn from(response: GetMetricDataResponse) -> Self {
        ConnectorResponse::GetMetricData(response)
    }
}
