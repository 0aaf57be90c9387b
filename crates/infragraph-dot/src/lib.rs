//! Graph rendering module for producing DOT format output.
//!
//! This module serializes a [`ResourceGraph`] into Graphviz DOT text. Nodes
//! are grouped into subgraph clusters by their stack key, and both node and
//! edge ordering follow graph insertion order, so repeated renders of an
//! unchanged graph are byte-identical.
//!
//! # Module Structure
//!
//! - [`dot`]: DOT format utilities and the [`DotBuilder`]

mod dot;

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use infragraph_core::{
    Artifact, ArtifactKind, DiagramArtifacts, RelationKind, Reporter, ResourceEdge, ResourceGraph,
    ResourceId, ResourceNode,
};
use infragraph_error::{Error, Result};

pub use dot::{DotBuilder, escape_label, sanitize_id, shape_for_kind};

/// Pure function producing a node's display label from its metadata.
pub type NodeLabelFn = fn(&ResourceNode) -> String;

/// Pure function producing the DOT attribute list of an edge.
pub type EdgeAttrsFn = fn(&ResourceEdge) -> Vec<(&'static str, String)>;

/// Default node label: the resource's display name.
pub fn default_node_label(node: &ResourceNode) -> String {
    node.name.clone()
}

/// Default edge attributes: the relation kind, with line styles telling the
/// weak relations apart from deployment ordering.
pub fn default_edge_attrs(edge: &ResourceEdge) -> Vec<(&'static str, String)> {
    let mut attrs = vec![("relation", edge.relation.to_string())];
    match edge.relation {
        RelationKind::DependsOn => {}
        RelationKind::Contains => attrs.push(("style", "dotted".to_string())),
        RelationKind::References => attrs.push(("style", "dashed".to_string())),
    }
    attrs
}

/// Options for DOT rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Node label function over entity metadata.
    pub node_label: NodeLabelFn,
    /// Edge attribute function over entity metadata.
    pub edge_attrs: EdgeAttrsFn,
    /// If true (default), group nodes into subgraph clusters by stack key.
    /// Clusters are emitted in sorted stack-name order.
    pub cluster_by_stack: bool,
    /// If true (default), show nodes without any incident edge.
    pub show_isolated_nodes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            node_label: default_node_label,
            edge_attrs: default_edge_attrs,
            cluster_by_stack: true,
            show_isolated_nodes: true,
        }
    }
}

/// Render the graph to DOT format.
///
/// Fails if the graph contains an edge referencing an unknown node id.
/// A zero-node graph produces a valid empty-body document.
pub fn render_graph(graph: &ResourceGraph, options: &RenderOptions) -> Result<String> {
    if let Some(edge) = graph.find_dangling_edge() {
        return Err(
            Error::dangling_edge(edge.from.as_str(), edge.to.as_str())
                .with_operation("dot::render")
                .with_context("graph", graph.name()),
        );
    }

    if graph.is_empty() {
        return Ok("digraph G {\n}\n".to_string());
    }

    let visible = visible_nodes(graph, options);
    if visible.is_empty() {
        return Ok("digraph G {\n}\n".to_string());
    }

    debug!(
        graph = graph.name(),
        nodes = visible.len(),
        edges = graph.edge_count(),
        "rendering dot"
    );

    let mut dot = DotBuilder::new(graph.name());
    dot.attr("rankdir", "TB");
    dot.node_defaults(r##"shape=box, style="rounded,filled", fillcolor="#f0f0f0", fontname="Helvetica""##);
    dot.edge_defaults(r##"color="#888888", arrowsize=0.7"##);
    dot.blank();

    // Split visible nodes into stack clusters and top-level nodes. Clusters
    // are keyed by stack name (sorted); nodes keep insertion order inside.
    let mut clusters: BTreeMap<&str, Vec<&ResourceNode>> = BTreeMap::new();
    let mut top_level: Vec<&ResourceNode> = Vec::new();
    for node in &visible {
        match node.stack.as_deref() {
            Some(stack) if options.cluster_by_stack => {
                clusters.entry(stack).or_default().push(node);
            }
            _ => top_level.push(node),
        }
    }

    for (stack, nodes) in &clusters {
        dot.start_cluster(stack, stack);
        for node in nodes {
            write_node(&mut dot, node, options);
        }
        dot.end_cluster();
    }

    for node in &top_level {
        write_node(&mut dot, node, options);
    }

    let has_edges = !graph.edges().is_empty();
    if !top_level.is_empty() && has_edges {
        dot.blank();
    }

    for edge in graph.edges() {
        let attrs = (options.edge_attrs)(edge);
        dot.edge_with_attrs(
            &sanitize_id(edge.from.as_str()),
            &sanitize_id(edge.to.as_str()),
            &attrs,
        );
    }

    Ok(dot.build())
}

fn visible_nodes<'g>(graph: &'g ResourceGraph, options: &RenderOptions) -> Vec<&'g ResourceNode> {
    if options.show_isolated_nodes {
        return graph.nodes().iter().collect();
    }

    let connected: HashSet<&ResourceId> = graph
        .edges()
        .iter()
        .flat_map(|e| [&e.from, &e.to])
        .collect();
    graph
        .nodes()
        .iter()
        .filter(|n| connected.contains(&n.id))
        .collect()
}

fn write_node(dot: &mut DotBuilder, node: &ResourceNode, options: &RenderOptions) {
    let attrs = [
        ("label", (options.node_label)(node)),
        ("kind", node.kind.to_string()),
        ("shape", shape_for_kind(node.kind).to_string()),
    ];
    dot.node_full(&sanitize_id(node.id.as_str()), &attrs);
}

/// Serializes a graph into a Graphviz DOT artifact.
#[derive(Debug, Clone, Default)]
pub struct DotRenderer {
    options: RenderOptions,
}

impl DotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render to a DOT string without touching the filesystem.
    pub fn render(&self, graph: &ResourceGraph) -> Result<String> {
        render_graph(graph, &self.options)
    }

    /// Render and write `<graph-name>.dot` under `outdir`.
    pub fn render_to_file(&self, graph: &ResourceGraph, outdir: &Path) -> Result<Artifact> {
        let text = self.render(graph)?;
        let path = outdir.join(format!("{}.dot", graph.name()));
        fs::write(&path, &text)?;
        info!(path = %path.display(), bytes = text.len(), "dot artifact written");
        Ok(Artifact::new(ArtifactKind::Dot, path))
    }
}

impl Reporter for DotRenderer {
    fn name(&self) -> &'static str {
        "dot"
    }

    fn report(&self, graph: &ResourceGraph, outdir: &Path) -> Result<DiagramArtifacts> {
        let artifact = self.render_to_file(graph, outdir)?;
        let mut artifacts = DiagramArtifacts::new();
        artifacts.push(artifact)?;
        Ok(artifacts)
    }
}
