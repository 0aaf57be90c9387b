//! Infrastructure resource graph.
//!
//! The graph is produced once by a [`GraphBuilder`] and is immutable for the
//! duration of a render pass. Node and edge insertion order is preserved and
//! is the documented ordering for every renderer, so repeated renders of an
//! unchanged graph are byte-identical.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

use infragraph_error::{Error, Result};

/// Stable identifier of a resource within one graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Category of an infrastructure resource.
///
/// Drives the DOT node shape and default labeling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IntoStaticStr, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ResourceKind {
    /// Deployment stack (grouping resource)
    Stack,
    /// Serverless function
    Function,
    /// HTTP/REST API surface
    Api,
    /// Object storage bucket
    Bucket,
    /// Key-value or document table
    Table,
    /// Message queue
    Queue,
    /// Pub/sub topic
    Topic,
    /// Network (VPC, subnet)
    Network,
    /// Anything without a dedicated category
    #[default]
    Other,
}

/// Semantic kind of a relationship between two resources.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IntoStaticStr, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RelationKind {
    /// Source requires target to exist first
    #[default]
    DependsOn,
    /// Source is the parent scope of target
    Contains,
    /// Source holds a weak reference to target (no ordering)
    References,
}

/// A single infrastructure resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: ResourceId,
    /// Display name (e.g., "orders-table")
    pub name: String,
    #[serde(default)]
    pub kind: ResourceKind,
    /// Stack grouping key used for subgraph clustering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Free-form provider metadata surfaced in labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl ResourceNode {
    pub fn new(id: impl Into<ResourceId>, name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            stack: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A directed relationship between two resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEdge {
    pub from: ResourceId,
    pub to: ResourceId,
    #[serde(default)]
    pub relation: RelationKind,
}

/// Serialized form of a graph, as synthesized by an external builder.
#[derive(Debug, Deserialize)]
struct GraphDocument {
    #[serde(default = "GraphDocument::default_name")]
    name: String,
    #[serde(default)]
    nodes: Vec<ResourceNode>,
    #[serde(default)]
    edges: Vec<ResourceEdge>,
}

impl GraphDocument {
    fn default_name() -> String {
        "diagram".to_string()
    }
}

/// Immutable, insertion-ordered infrastructure graph.
#[derive(Debug, Clone)]
pub struct ResourceGraph {
    name: String,
    nodes: Vec<ResourceNode>,
    edges: Vec<ResourceEdge>,
    index: HashMap<ResourceId, usize>,
}

impl ResourceGraph {
    /// Graph name; also the artifact file stem (`<name>.dot`, `<name>.png`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[ResourceEdge] {
        &self.edges
    }

    pub fn node(&self, id: &ResourceId) -> Option<&ResourceNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.index.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Find the first edge whose endpoint is not a node of this graph.
    ///
    /// Renderers treat such an edge as a fatal input error.
    pub fn find_dangling_edge(&self) -> Option<&ResourceEdge> {
        self.edges
            .iter()
            .find(|e| !self.contains(&e.from) || !self.contains(&e.to))
    }

    /// Deserialize a graph document (JSON) produced by an external builder.
    pub fn from_json(input: &str) -> Result<Self> {
        let doc: GraphDocument = serde_json::from_str(input).map_err(|e| {
            Error::new(
                infragraph_error::ErrorKind::DeserializationFailed,
                format!("invalid graph document: {e}"),
            )
            .with_operation("graph::from_json")
            .set_source(e)
        })?;

        let mut builder = GraphBuilder::new(doc.name);
        for node in doc.nodes {
            builder.add_node(node)?;
        }
        for edge in doc.edges {
            builder.add_edge(edge.from, edge.to, edge.relation);
        }
        Ok(builder.build())
    }
}

/// Builder accumulating nodes and edges in insertion order.
///
/// Edges may reference nodes added later; dangling endpoints are only
/// rejected when a renderer consumes the graph.
#[derive(Debug)]
pub struct GraphBuilder {
    name: String,
    nodes: Vec<ResourceNode>,
    edges: Vec<ResourceEdge>,
    index: HashMap<ResourceId, usize>,
}

impl GraphBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a node. Duplicate ids are rejected.
    pub fn add_node(&mut self, node: ResourceNode) -> Result<&mut Self> {
        if self.index.contains_key(&node.id) {
            return Err(Error::invalid_argument(format!(
                "duplicate node id '{}'",
                node.id
            ))
            .with_operation("graph::add_node")
            .with_context("id", node.id.as_str()));
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(self)
    }

    pub fn add_edge(
        &mut self,
        from: impl Into<ResourceId>,
        to: impl Into<ResourceId>,
        relation: RelationKind,
    ) -> &mut Self {
        self.edges.push(ResourceEdge {
            from: from.into(),
            to: to.into(),
            relation,
        });
        self
    }

    pub fn build(self) -> ResourceGraph {
        ResourceGraph {
            name: self.name,
            nodes: self.nodes,
            edges: self.edges,
            index: self.index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_graph() -> ResourceGraph {
        let mut b = GraphBuilder::new("app");
        b.add_node(ResourceNode::new("api", "orders-api", ResourceKind::Api))
            .unwrap();
        b.add_node(ResourceNode::new("table", "orders", ResourceKind::Table))
            .unwrap();
        b.add_edge("api", "table", RelationKind::DependsOn);
        b.build()
    }

    #[test]
    fn test_insertion_order_preserved() {
        let graph = sample_graph();
        let ids: Vec<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["api", "table"]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut b = GraphBuilder::new("app");
        b.add_node(ResourceNode::new("api", "a", ResourceKind::Api))
            .unwrap();
        let err = b
            .add_node(ResourceNode::new("api", "b", ResourceKind::Api))
            .unwrap_err();
        assert_eq!(err.kind(), infragraph_error::ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_find_dangling_edge() {
        let mut b = GraphBuilder::new("app");
        b.add_node(ResourceNode::new("api", "a", ResourceKind::Api))
            .unwrap();
        b.add_edge("api", "ghost", RelationKind::DependsOn);
        let graph = b.build();

        let dangling = graph.find_dangling_edge().expect("dangling edge");
        assert_eq!(dangling.to.as_str(), "ghost");

        let graph = sample_graph();
        assert!(graph.find_dangling_edge().is_none());
    }

    #[test]
    fn test_from_json_document() {
        let input = r#"{
            "name": "shop",
            "nodes": [
                {"id": "api", "name": "orders-api", "kind": "api", "stack": "prod"},
                {"id": "table", "name": "orders", "kind": "table"}
            ],
            "edges": [
                {"from": "api", "to": "table", "relation": "depends-on"}
            ]
        }"#;

        let graph = ResourceGraph::from_json(input).unwrap();
        assert_eq!(graph.name(), "shop");
        assert_eq!(graph.node_count(), 2);
        assert_eq!(
            graph.node(&ResourceId::from("api")).unwrap().stack.as_deref(),
            Some("prod")
        );
        assert_eq!(graph.edges()[0].relation, RelationKind::DependsOn);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = ResourceGraph::from_json("not json").unwrap_err();
        assert_eq!(
            err.kind(),
            infragraph_error::ErrorKind::DeserializationFailed
        );
    }

    #[test]
    fn test_from_json_defaults() {
        let graph = ResourceGraph::from_json("{}").unwrap();
        assert_eq!(graph.name(), "diagram");
        assert!(graph.is_empty());
    }
}
