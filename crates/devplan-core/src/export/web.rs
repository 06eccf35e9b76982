//! ReactFlow-style JSON document.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::ExportOptions;
use crate::{
    error::Result,
    graph::{WorkflowEdge, WorkflowNode},
};

/// Version of the web graph document layout.
pub const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetadata {
    pub plan_name: String,
    /// ISO-8601 instant
    pub exported_at: Timestamp,
    pub version: String,
    pub platform: String,
    pub node_count: usize,
    pub edge_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebGraph {
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
    pub viewport: Viewport,
    pub metadata: GraphMetadata,
}

impl WebGraph {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Wrap positioned nodes and edges in a web graph document.
pub fn to_web_graph(
    plan_name: &str,
    nodes: Vec<WorkflowNode>,
    edges: Vec<WorkflowEdge>,
    options: &ExportOptions,
    exported_at: Timestamp,
) -> WebGraph {
    let metadata = GraphMetadata {
        plan_name: plan_name.to_string(),
        exported_at,
        version: FORMAT_VERSION.to_string(),
        platform: options.platform.clone(),
        node_count: nodes.len(),
        edge_count: edges.len(),
    };
    WebGraph {
        nodes,
        edges,
        viewport: Viewport::default(),
        metadata,
    }
}
