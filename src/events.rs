use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConnectorError;

const EVENT_TYPE: &str = "EventType";
const GET_METRIC_DATA_REQUEST: &str = "GetMetricDataRequest";
const START_TIME: &str = "StartTime";
const END_TIME: &str = "EndTime";
const PERIOD: &str = "Period";
const ARGUMENTS: &str = "Arguments";
const CODE: &str = "Code";
const VALUE: &str = "Value";

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum CloudWatchCustomConnectorEventType {
    GetMetricData,
    DescribeGetMetricData,
}

impl CloudWatchCustomConnectorEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudWatchCustomConnectorEventType::GetMetricData => "GetMetricData",
            CloudWatchCustomConnectorEventType::DescribeGetMetricData => "DescribeGetMetricData",
        }
    }
}

impl FromStr for CloudWatchCustomConnectorEventType {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, ConnectorError> {
        match s {
            "GetMetricData" => Ok(CloudWatchCustomConnectorEventType::GetMetricData),
            "DescribeGetMetricData" => Ok(CloudWatchCustomConnectorEventType::DescribeGetMetricData),
            other => Err(ConnectorError::UnknownEventType(other.to_string())),
        }
    }
}

impl fmt::Display for CloudWatchCustomConnectorEventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single argument of a metric math expression, as typed by the user in the
/// CloudWatch console.
///
/// String arguments borrow from the inbound payload when read through a
/// [`GetMetricDataRequest`]; [`MetricArgument::into_owned`] detaches them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricArgument<'a> {
    String(Cow<'a, str>),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl<'a> MetricArgument<'a> {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetricArgument::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Numeric value of the argument, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricArgument::Int(i) => Some(*i as f64),
            MetricArgument::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn into_owned(self) -> MetricArgument<'static> {
        match self {
            MetricArgument::String(s) => MetricArgument::String(Cow::Owned(s.into_owned())),
            MetricArgument::Bool(b) => MetricArgument::Bool(b),
            MetricArgument::Int(i) => MetricArgument::Int(i),
            MetricArgument::Float(f) => MetricArgument::Float(f),
        }
    }
}

impl<'a> TryFrom<&'a Value> for MetricArgument<'a> {
    type Error = ConnectorError;

    fn try_from(value: &'a Value) -> Result<Self, ConnectorError> {
        let invalid = ConnectorError::InvalidType {
            key: ARGUMENTS,
            expected: "a list of scalars",
        };
        match value {
            Value::String(s) => Ok(MetricArgument::String(Cow::Borrowed(s.as_str()))),
            Value::Bool(b) => Ok(MetricArgument::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(MetricArgument::Int)
                .or_else(|| n.as_f64().map(MetricArgument::Float))
                .ok_or(invalid),
            _ => Err(invalid),
        }
    }
}

impl From<&str> for MetricArgument<'static> {
    fn from(s: &str) -> Self {
        MetricArgument::String(Cow::Owned(s.to_string()))
    }
}

impl From<bool> for MetricArgument<'static> {
    fn from(b: bool) -> Self {
        MetricArgument::Bool(b)
    }
}

impl From<i64> for MetricArgument<'static> {
    fn from(i: i64) -> Self {
        MetricArgument::Int(i)
    }
}

impl From<f64> for MetricArgument<'static> {
    fn from(f: f64) -> Self {
        MetricArgument::Float(f)
    }
}

fn lookup<'a>(raw: &'a Value, key: &'static str) -> Result<&'a Value, ConnectorError> {
    raw.get(key).ok_or(ConnectorError::KeyNotFound(key))
}

fn lookup_i64(raw: &Value, key: &'static str) -> Result<i64, ConnectorError> {
    lookup(raw, key)?
        .as_i64()
        .ok_or(ConnectorError::InvalidType {
            key,
            expected: "an integer",
        })
}

/// Read-only view over an inbound custom connector event.
///
/// Nothing is validated when the view is built; each accessor looks its key up
/// in the underlying payload when called.
#[derive(Debug, Clone, Copy)]
pub struct CloudWatchCustomConnectorEvent<'a> {
    raw: &'a Value,
}

impl<'a> CloudWatchCustomConnectorEvent<'a> {
    pub fn new(raw: &'a Value) -> Self {
        CloudWatchCustomConnectorEvent { raw }
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    pub fn event_type(&self) -> Result<CloudWatchCustomConnectorEventType, ConnectorError> {
        lookup(self.raw, EVENT_TYPE)?
            .as_str()
            .ok_or(ConnectorError::InvalidType {
                key: EVENT_TYPE,
                expected: "a string",
            })?
            .parse()
    }

    /// The nested request of a `GetMetricData` event. `None` when the key is
    /// absent or null; the event type is not consulted.
    pub fn get_metric_data_request(&self) -> Option<GetMetricDataRequest<'a>> {
        match self.raw.get(GET_METRIC_DATA_REQUEST) {
            None | Some(Value::Null) => None,
            Some(request) => Some(GetMetricDataRequest::new(request)),
        }
    }
}

impl<'a> From<&'a Value> for CloudWatchCustomConnectorEvent<'a> {
    fn from(raw: &'a Value) -> Self {
        CloudWatchCustomConnectorEvent::new(raw)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetMetricDataRequest<'a> {
    raw: &'a Value,
}

impl<'a> GetMetricDataRequest<'a> {
    pub fn new(raw: &'a Value) -> Self {
        GetMetricDataRequest { raw }
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    /// Earliest data to return, in epoch seconds.
    pub fn start_time(&self) -> Result<i64, ConnectorError> {
        lookup_i64(self.raw, START_TIME)
    }

    /// Latest data to return, in epoch seconds.
    pub fn end_time(&self) -> Result<i64, ConnectorError> {
        lookup_i64(self.raw, END_TIME)
    }

    /// Seconds covered by each aggregated data point. CloudWatch never sends
    /// less than 60.
    pub fn period(&self) -> Result<i64, ConnectorError> {
        lookup_i64(self.raw, PERIOD)
    }

    pub fn arguments(&self) -> Result<Vec<MetricArgument<'a>>, ConnectorError> {
        lookup(self.raw, ARGUMENTS)?
            .as_array()
            .ok_or(ConnectorError::InvalidType {
                key: ARGUMENTS,
                expected: "a list of scalars",
            })?
            .iter()
            .map(MetricArgument::try_from)
            .collect()
    }
}

/// Read-only view over a `{"Code": .., "Value": ..}` message mapping.
#[derive(Debug, Clone, Copy)]
pub struct MessageDataView<'a> {
    raw: &'a Value,
}

impl<'a> MessageDataView<'a> {
    pub fn new(raw: &'a Value) -> Self {
        MessageDataView { raw }
    }

    pub fn code(&self) -> Option<&'a str> {
        self.raw.get(CODE).and_then(Value::as_str)
    }

    pub fn value(&self) -> Option<&'a str> {
        self.raw.get(VALUE).and_then(Value::as_str)
    }

    pub fn to_message_data(&self) -> crate::response::MessageData {
        crate::response::MessageData {
            code: self.code().map(str::to_string),
            value: self.value().map(str::to_string),
        }
    }
}
