use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::graph::{Graph, GraphDefinition};
use crate::metric::StatResult;

pub const META_ENV: &str = "MACKEREL_AGENT_PLUGIN_META";
const META_HEADER: &str = "# mackerel-agent-plugin";

#[derive(Serialize)]
struct Meta<'a> {
    graphs: BTreeMap<String, &'a Graph>,
}

pub fn meta_requested(value: Option<&str>) -> bool {
    match value {
        Some(value) => !value.is_empty() && value != "0",
        None => false,
    }
}

/// One `key\tvalue\tepoch` line per graphed series that was collected.
pub fn write_values<W: Write>(
    writer: &mut W,
    prefix: &str,
    graphs: &GraphDefinition,
    stats: &StatResult,
    now: DateTime<Utc>,
) -> io::Result<()> {
    for (graph_name, graph) in graphs {
        for series in graph.metrics.iter() {
            if let Some(value) = stats.get(series.name) {
                writeln!(
                    writer,
                    "{}.{}.{}\t{}\t{}",
                    prefix,
                    graph_name,
                    series.name,
                    value,
                    now.timestamp()
                )?;
            }
        }
    }
    Ok(())
}

pub fn write_meta<W: Write>(writer: &mut W, prefix: &str, graphs: &GraphDefinition) -> io::Result<()> {
    let meta = Meta {
        graphs: graphs
            .iter()
            .map(|(name, graph)| (format!("{}.{}", prefix, name), graph))
            .collect(),
    };
    writeln!(writer, "{}", META_HEADER)?;
    serde_json::to_writer(&mut *writer, &meta)?;
    writeln!(writer)
}
