use std::collections::BTreeMap;
use std::convert::TryFrom;

use chrono::{DateTime, Utc};
use rusoto_cloudwatch::Datapoint;

use crate::error::MetricsPluginError;

pub const NAMESPACE: &str = "AWS/DynamoDB";
pub const TABLE_NAME_DIMENSION: &str = "TableName";

/// Output name to collected value for a single pass.
pub type StatResult = BTreeMap<&'static str, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReductionKind {
    Average,
    Sum,
    Maximum,
    Minimum,
    SampleCount,
}

impl ReductionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReductionKind::Average => "Average",
            ReductionKind::Sum => "Sum",
            ReductionKind::Maximum => "Maximum",
            ReductionKind::Minimum => "Minimum",
            ReductionKind::SampleCount => "SampleCount",
        }
    }

    fn read(self, data_point: &Datapoint) -> Option<f64> {
        match self {
            ReductionKind::Average => data_point.average,
            ReductionKind::Sum => data_point.sum,
            ReductionKind::Maximum => data_point.maximum,
            ReductionKind::Minimum => data_point.minimum,
            ReductionKind::SampleCount => data_point.sample_count,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct MetricOutput {
    pub name: &'static str,
    pub reduction: ReductionKind,
}

/// One upstream CloudWatch metric and every value we keep from it.
#[derive(Debug, PartialEq)]
pub struct MetricSpec {
    pub upstream_name: &'static str,
    pub outputs: &'static [MetricOutput],
}

impl MetricSpec {
    /// Statistic names for the query, without duplicates.
    pub fn statistics(&self) -> Vec<String> {
        let mut statistics: Vec<String> = Vec::with_capacity(self.outputs.len());
        for output in self.outputs {
            let name = output.reduction.as_str();
            if !statistics.iter().any(|statistic| statistic == name) {
                statistics.push(name.to_string());
            }
        }
        statistics
    }
}

const fn output(name: &'static str, reduction: ReductionKind) -> MetricOutput {
    MetricOutput { name, reduction }
}

pub const CATALOG: [MetricSpec; 11] = [
    MetricSpec {
        upstream_name: "ConditionalCheckFailedRequests",
        outputs: &[output("ConditionalCheckFailedRequests", ReductionKind::Sum)],
    },
    MetricSpec {
        upstream_name: "ConsumedReadCapacityUnits",
        outputs: &[
            output("ConsumedReadCapacityUnitsSum", ReductionKind::Sum),
            output("ConsumedReadCapacityUnitsAverage", ReductionKind::Average),
        ],
    },
    MetricSpec {
        upstream_name: "ConsumedWriteCapacityUnits",
        outputs: &[
            output("ConsumedWriteCapacityUnitsSum", ReductionKind::Sum),
            output("ConsumedWriteCapacityUnitsAverage", ReductionKind::Average),
        ],
    },
    MetricSpec {
        upstream_name: "ProvisionedReadCapacityUnits",
        outputs: &[output("ProvisionedReadCapacityUnits", ReductionKind::Minimum)],
    },
    MetricSpec {
        upstream_name: "ProvisionedWriteCapacityUnits",
        outputs: &[output("ProvisionedWriteCapacityUnits", ReductionKind::Minimum)],
    },
    MetricSpec {
        upstream_name: "ReadThrottleEvents",
        outputs: &[output("ReadThrottleEvents", ReductionKind::Sum)],
    },
    MetricSpec {
        upstream_name: "SuccessfulRequestLatency",
        outputs: &[
            output("SuccessfulRequestLatencyMinimum", ReductionKind::Minimum),
            output("SuccessfulRequestLatencyMaximum", ReductionKind::Maximum),
            output("SuccessfulRequestLatencyAverage", ReductionKind::Average),
            output("SuccessfulRequestLatencySampleCount", ReductionKind::SampleCount),
        ],
    },
    MetricSpec {
        upstream_name: "SystemErrors",
        outputs: &[output("SystemErrors", ReductionKind::Sum)],
    },
    // can take Operation as well, only the table dimension is queried
    MetricSpec {
        upstream_name: "ThrottledRequests",
        outputs: &[output("ThrottledRequests", ReductionKind::Sum)],
    },
    MetricSpec {
        upstream_name: "UserErrors",
        outputs: &[output("UserErrors", ReductionKind::Sum)],
    },
    MetricSpec {
        upstream_name: "WriteThrottleEvents",
        outputs: &[output("WriteThrottleEvents", ReductionKind::Sum)],
    },
];

#[derive(Debug, PartialEq)]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    pub values: BTreeMap<ReductionKind, f64>,
}

impl DataPoint {
    pub fn value(&self, kind: ReductionKind) -> Result<f64, MetricsPluginError> {
        self.values
            .get(&kind)
            .copied()
            .ok_or(MetricsPluginError::NoneValue(kind))
    }
}

const ALL_KINDS: [ReductionKind; 5] = [
    ReductionKind::Average,
    ReductionKind::Sum,
    ReductionKind::Maximum,
    ReductionKind::Minimum,
    ReductionKind::SampleCount,
];

impl TryFrom<&Datapoint> for DataPoint {
    type Error = MetricsPluginError;

    fn try_from(data_point: &Datapoint) -> Result<Self, Self::Error> {
        let raw = data_point
            .timestamp
            .as_ref()
            .ok_or_else(|| MetricsPluginError::InvalidTimestamp(String::new()))?;
        let timestamp = DateTime::parse_from_rfc3339(raw)
            .map_err(|_| MetricsPluginError::InvalidTimestamp(raw.clone()))?
            .with_timezone(&Utc);

        let values = ALL_KINDS
            .iter()
            .filter_map(|kind| kind.read(data_point).map(|value| (*kind, value)))
            .collect();
        Ok(DataPoint { timestamp, values })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::MetricsPluginError;
    use crate::metric::{DataPoint, ReductionKind, CATALOG};
    use chrono::{TimeZone, Utc};
    use rusoto_cloudwatch::Datapoint;
    use std::collections::HashSet;
    use std::convert::TryFrom;

    #[test]
    fn test_catalog_output_names_are_unique() {
        let mut names = HashSet::new();
        for spec in CATALOG.iter() {
            for output in spec.outputs {
                assert!(names.insert(output.name), "duplicated {}", output.name);
            }
        }
    }

    #[test]
    fn test_statistics_requests_each_kind_once() {
        let latency = CATALOG
            .iter()
            .find(|spec| spec.upstream_name == "SuccessfulRequestLatency")
            .unwrap();
        assert_eq!(
            latency.statistics(),
            vec!["Minimum", "Maximum", "Average", "SampleCount"]
        );
    }

    #[test]
    fn test_try_from_datapoint() {
        let result = DataPoint::try_from(&Datapoint {
            average: Some(20.0),
            sum: Some(1200.0),
            timestamp: Some("2019-01-12T00:05:00Z".to_string()),
            unit: Some("Count".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            result.timestamp,
            Utc.ymd(2019, 1, 12).and_hms(0, 5, 0)
        );
        assert_eq!(result.value(ReductionKind::Sum), Ok(1200.0));
        assert_eq!(result.value(ReductionKind::Average), Ok(20.0));
        assert_eq!(
            result.value(ReductionKind::Maximum),
            Err(MetricsPluginError::NoneValue(ReductionKind::Maximum))
        );
    }

    #[test]
    fn test_try_from_datapoint_without_timestamp() {
        let result = DataPoint::try_from(&Datapoint {
            sum: Some(1.0),
            ..Default::default()
        });
        assert_eq!(
            result.err().unwrap(),
            MetricsPluginError::InvalidTimestamp(String::new())
        );
    }

    #[test]
    fn test_try_from_datapoint_with_broken_timestamp() {
        let result = DataPoint::try_from(&Datapoint {
            sum: Some(1.0),
            timestamp: Some("yesterday".to_string()),
            ..Default::default()
        });
        assert_eq!(
            result.err().unwrap(),
            MetricsPluginError::InvalidTimestamp("yesterday".to_string())
        );
    }
}
