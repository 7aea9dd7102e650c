use crate::error::MetricsPluginError;
use async_trait::async_trait;

use rusoto_cloudwatch::{
    CloudWatch, CloudWatchClient, Datapoint, Dimension, GetMetricStatisticsInput,
};

use crate::metric::{DataPoint, MetricSpec, NAMESPACE, TABLE_NAME_DIMENSION};
use crate::time_range::{TimeRange, PERIOD_SECONDS};
use std::convert::TryFrom;

pub struct CloudWatchMetricsClient {
    client: CloudWatchClient,
    table_name: String,
}

#[async_trait]
pub trait FetchLatestPoint {
    /// `Ok(None)` when the window holds no datapoints.
    async fn fetch_latest_point(
        &self,
        spec: &MetricSpec,
        time_range: &TimeRange,
    ) -> Result<Option<DataPoint>, MetricsPluginError>;
}

#[async_trait]
impl FetchLatestPoint for CloudWatchMetricsClient {
    async fn fetch_latest_point(
        &self,
        spec: &MetricSpec,
        time_range: &TimeRange,
    ) -> Result<Option<DataPoint>, MetricsPluginError> {
        let metrics = self
            .client
            .get_metric_statistics(GetMetricStatisticsInput {
                dimensions: Some(vec![Dimension {
                    name: TABLE_NAME_DIMENSION.to_string(),
                    value: self.table_name.clone(),
                }]),
                start_time: time_range.start_time(),
                end_time: time_range.end_time(),
                metric_name: spec.upstream_name.to_string(),
                namespace: NAMESPACE.to_string(),
                period: PERIOD_SECONDS,
                statistics: Some(spec.statistics()),
                ..Default::default()
            })
            .await?;
        Self::latest_data_point(metrics.datapoints)
    }
}

impl CloudWatchMetricsClient {
    pub fn new_with_client(client: CloudWatchClient, table_name: String) -> Self {
        CloudWatchMetricsClient { client, table_name }
    }

    /// Picks the datapoint with the newest timestamp. On equal timestamps the
    /// first one seen is kept.
    fn latest_data_point(
        data_points: Option<Vec<Datapoint>>,
    ) -> Result<Option<DataPoint>, MetricsPluginError> {
        let data_points = data_points.map_or(vec![], |points| points);
        let mut latest: Option<DataPoint> = None;
        for data_point in data_points.iter() {
            let data_point = DataPoint::try_from(data_point)?;
            if let Some(ref current) = latest {
                if data_point.timestamp <= current.timestamp {
                    continue;
                }
            }
            latest = Some(data_point);
        }
        Ok(latest)
    }
}
