//! Graph serializers and the build → layout → serialize pipelines.

pub mod mermaid;
pub mod web;

use jiff::Timestamp;
use log::info;
use serde::{Deserialize, Serialize};

pub use mermaid::to_mermaid;
pub use web::{to_web_graph, GraphMetadata, Viewport, WebGraph};

use crate::{
    graph::{
        build_edges, build_nodes,
        layout::{layout, LayoutConfig, NodeSpacing},
        GraphOptions,
    },
    models::PlanDocument,
};

/// Platform tag written into web graph metadata by default.
pub const DEFAULT_PLATFORM: &str = "reactflow";

/// Knobs for the export pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    /// Target canvas, recorded in metadata only
    pub platform: String,
    pub graph: GraphOptions,
    pub layout: LayoutConfig,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            platform: DEFAULT_PLATFORM.to_string(),
            graph: GraphOptions::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl ExportOptions {
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn with_graph_options(mut self, graph: GraphOptions) -> Self {
        self.graph = graph;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_spacing(mut self, spacing: NodeSpacing) -> Self {
        self.layout = self.layout.with_spacing(spacing);
        self
    }
}

/// Build, lay out and serialize `plan` as a web graph stamped with the
/// current time.
pub fn export_web_graph(plan: &PlanDocument, options: &ExportOptions) -> WebGraph {
    let nodes = layout(build_nodes(plan, &options.graph), &options.layout);
    let edges = build_edges(plan, &options.graph);
    info!(
        "Exporting '{}' for {}: {} nodes, {} edges",
        plan.project_name,
        options.platform,
        nodes.len(),
        edges.len()
    );
    to_web_graph(&plan.project_name, nodes, edges, options, Timestamp::now())
}

/// Build `plan`'s graph and render it as a Mermaid flowchart.
pub fn export_mermaid(plan: &PlanDocument, options: &ExportOptions) -> String {
    let nodes = layout(build_nodes(plan, &options.graph), &options.layout);
    let edges = build_edges(plan, &options.graph);
    to_mermaid(&nodes, &edges)
}
