use std::error::Error;

use rusoto_cloudwatch::GetMetricStatisticsError;
use rusoto_core::RusotoError;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::metric::ReductionKind;

#[derive(Debug, PartialEq)]
pub enum MetricsPluginError {
    NoneValue(ReductionKind),
    ToPrimitive,
    InvalidTimestamp(String),
    Credentials(String),
    HttpClient(String),
    GetMetricsError(RusotoError<GetMetricStatisticsError>),
}

impl Display for MetricsPluginError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            MetricsPluginError::NoneValue(kind) => {
                write!(f, "Datapoint has no {} value", kind.as_str())
            }
            MetricsPluginError::ToPrimitive => {
                write!(f, "Failed to convert bigDecimal to primitive")
            }
            MetricsPluginError::InvalidTimestamp(ref timestamp) => {
                write!(f, "Invalid datapoint timestamp: {:?}", timestamp)
            }
            MetricsPluginError::Credentials(ref message) => {
                write!(f, "Failed to create credentials provider: {}", message)
            }
            MetricsPluginError::HttpClient(ref message) => {
                write!(f, "Failed to create http client: {}", message)
            }
            MetricsPluginError::GetMetricsError(ref error) => std::fmt::Display::fmt(error, f),
        }
    }
}

impl Error for MetricsPluginError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            MetricsPluginError::GetMetricsError(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<RusotoError<GetMetricStatisticsError>> for MetricsPluginError {
    fn from(e: RusotoError<GetMetricStatisticsError>) -> MetricsPluginError {
        MetricsPluginError::GetMetricsError(e)
    }
}
