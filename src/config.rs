use std::env;

use thiserror::Error;

use crate::events::MetricArgument;
use crate::response::{ArgumentDefault, DescribeGetMetricDataResponse};

pub const DEFAULT_DESCRIPTION: &str = "CloudWatch custom metrics connector";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Markdown shown in the CloudWatch console when the data source is selected.
    pub description: String,
    pub argument_defaults: Vec<MetricArgument<'static>>,
    pub arguments_optional: bool,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error parsing ARGUMENT_DEFAULTS as a JSON list of scalars - {0}")]
    InvalidArgumentDefaults(#[from] serde_json::Error),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            description: DEFAULT_DESCRIPTION.to_string(),
            argument_defaults: Vec::new(),
            arguments_optional: false,
        }
    }
}

impl Config {
    pub fn load_from_env() -> Result<Config, ConfigError> {
        let description = env::var("CONNECTOR_DESCRIPTION")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

        let argument_defaults = match env::var("ARGUMENT_DEFAULTS") {
            Ok(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)?,
            _ => Vec::new(),
        };

        let arguments_optional = env::var("ARGUMENTS_OPTIONAL")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Config {
            description,
            argument_defaults,
            arguments_optional,
        })
    }

    pub fn describe_response(&self) -> DescribeGetMetricDataResponse {
        DescribeGetMetricDataResponse {
            description: self.description.clone(),
            argument_defaults: self
                .argument_defaults
                .iter()
                .cloned()
                .map(ArgumentDefault::from)
                .collect(),
            arguments_optional: self.arguments_optional,
        }
    }
}
