use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_PREFIX: &str = "dynamodb";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Integer,
    Float,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: &'static str,
    pub label: &'static str,
    pub stacked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub label: String,
    pub unit: Unit,
    pub metrics: Vec<Series>,
}

pub type GraphDefinition = BTreeMap<&'static str, Graph>;

fn series(name: &'static str, label: &'static str) -> Series {
    Series {
        name,
        label,
        stacked: false,
    }
}

pub fn metric_key_prefix(prefix: &str) -> &str {
    if prefix.is_empty() {
        DEFAULT_PREFIX
    } else {
        prefix
    }
}

/// `"my-table"` becomes `"My Table"`.
pub fn display_prefix(prefix: &str) -> String {
    let mut label = String::with_capacity(prefix.len());
    let mut word_start = true;
    for c in prefix.chars() {
        if c.is_alphanumeric() {
            if word_start {
                label.extend(c.to_uppercase());
            } else {
                label.push(c);
            }
            word_start = false;
        } else {
            label.push(' ');
            word_start = true;
        }
    }
    label
}

pub fn graph_definition(prefix: &str) -> GraphDefinition {
    let label_prefix = display_prefix(prefix);
    let graph = |suffix: &str, unit: Unit, metrics: Vec<Series>| Graph {
        label: format!("{} {}", label_prefix, suffix),
        unit,
        metrics,
    };

    let mut graphs = GraphDefinition::new();
    graphs.insert(
        "ReadCapacity",
        graph(
            "Read Capacity Units",
            Unit::Float,
            vec![
                series("ProvisionedReadCapacityUnits", "Provisioned"),
                series("ConsumedReadCapacityUnitsNormalized", "Consumed"),
                series("ConsumedReadCapacityUnitsAverage", "Consumed (Average)"),
            ],
        ),
    );
    graphs.insert(
        "WriteCapacity",
        graph(
            "Write Capacity Units",
            Unit::Float,
            vec![
                series("ProvisionedWriteCapacityUnits", "Provisioned"),
                series("ConsumedWriteCapacityUnitsNormalized", "Consumed"),
                series("ConsumedWriteCapacityUnitsAverage", "Consumed (Average)"),
            ],
        ),
    );
    graphs.insert(
        "ThrottledEvents",
        graph(
            "Throttle Events",
            Unit::Integer,
            vec![
                series("ReadThrottleEvents", "Read"),
                series("WriteThrottleEvents", "Write"),
            ],
        ),
    );
    graphs.insert(
        "Requests",
        graph(
            "Requests",
            Unit::Integer,
            vec![
                series("ConditionalCheckFailedRequests", "ConditionalCheck Failure"),
                series("SystemErrors", "System Error"),
                series("UserErrors", "User Error"),
                series("ThrottledRequests", "Throttled"),
                series("SuccessfulRequestLatencySampleCount", "Success"),
            ],
        ),
    );
    graphs.insert(
        "SuccessfulRequestLatency",
        graph(
            "Latency of Successful Requests",
            Unit::Float,
            vec![
                series("SuccessfulRequestLatencyAverage", "Average"),
                series("SuccessfulRequestLatencyMaximum", "Maximum"),
                series("SuccessfulRequestLatencyMinimum", "Minimum"),
            ],
        ),
    );
    graphs
}

#[cfg(test)]
mod tests {
    use crate::graph::{display_prefix, graph_definition, metric_key_prefix, Unit, DEFAULT_PREFIX};
    use crate::metric::CATALOG;
    use std::collections::HashSet;

    #[test]
    fn test_display_prefix() {
        assert_eq!(display_prefix("orders"), "Orders");
        assert_eq!(display_prefix("my-table"), "My Table");
        assert_eq!(display_prefix("dynamodb.prod_v2"), "Dynamodb Prod V2");
        assert_eq!(display_prefix(""), "");
    }

    #[test]
    fn test_metric_key_prefix() {
        assert_eq!(metric_key_prefix(""), "dynamodb");
        assert_eq!(metric_key_prefix("orders"), "orders");
    }

    #[test]
    fn test_graph_definition_titles() {
        let graphs = graph_definition("orders");

        assert_eq!(graphs.len(), 5);
        for graph in graphs.values() {
            assert!(graph.label.starts_with("Orders "), "{}", graph.label);
        }
        assert_eq!(graphs["ReadCapacity"].label, "Orders Read Capacity Units");
        assert_eq!(graphs["ReadCapacity"].unit, Unit::Float);
        assert_eq!(graphs["ThrottledEvents"].unit, Unit::Integer);
    }

    #[test]
    fn test_graph_definition_is_idempotent() {
        assert_eq!(graph_definition(DEFAULT_PREFIX), graph_definition(DEFAULT_PREFIX));
    }

    #[test]
    fn test_graph_series_are_collected_keys() {
        let mut keys: HashSet<&str> = CATALOG
            .iter()
            .flat_map(|spec| spec.outputs.iter().map(|output| output.name))
            .collect();
        keys.insert("ConsumedReadCapacityUnitsNormalized");
        keys.insert("ConsumedWriteCapacityUnitsNormalized");

        for graph in graph_definition(DEFAULT_PREFIX).values() {
            for series in graph.metrics.iter() {
                assert!(keys.contains(series.name), "unknown key {}", series.name);
            }
        }
    }

    #[test]
    fn test_graph_definition_json() {
        let graphs = graph_definition("orders");
        let json = serde_json::to_value(&graphs["ThrottledEvents"]).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "label": "Orders Throttle Events",
                "unit": "integer",
                "metrics": [
                    {"name": "ReadThrottleEvents", "label": "Read", "stacked": false},
                    {"name": "WriteThrottleEvents", "label": "Write", "stacked": false},
                ],
            })
        );
    }
}
