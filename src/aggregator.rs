use crate::cloud_watch_metrics_client::FetchLatestPoint;
use crate::error::MetricsPluginError;
use crate::metric::{MetricSpec, StatResult};
use crate::time_range::TimeRange;

/// Values gathered in one pass, plus what went wrong per upstream metric.
#[derive(Debug, Default)]
pub struct Collection {
    pub stats: StatResult,
    pub failures: Vec<(&'static str, MetricsPluginError)>,
}

/// Walks the catalog in order. A failing metric is recorded and skipped.
pub async fn collect<F>(fetcher: &F, catalog: &[MetricSpec], time_range: &TimeRange) -> Collection
where
    F: FetchLatestPoint + Sync,
{
    let mut collection = Collection::default();
    for spec in catalog {
        let point = match fetcher.fetch_latest_point(spec, time_range).await {
            Ok(Some(point)) => point,
            Ok(None) => {
                tracing::debug!(metric = spec.upstream_name, "fetched no datapoints");
                continue;
            }
            Err(error) => {
                tracing::warn!(metric = spec.upstream_name, %error, "failed to fetch metric");
                collection.failures.push((spec.upstream_name, error));
                continue;
            }
        };

        for output in spec.outputs {
            match point.value(output.reduction) {
                Ok(value) => {
                    collection.stats.insert(output.name, value);
                }
                Err(error) => {
                    tracing::warn!(metric = output.name, %error, "datapoint is missing a statistic");
                    collection.failures.push((spec.upstream_name, error));
                }
            }
        }
    }
    collection
}
