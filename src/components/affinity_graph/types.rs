use serde::{Deserialize, Serialize};

/// Group id for student nodes.
pub const GROUP_STUDENT: u32 = 1;
/// Group id for teacher nodes.
pub const GROUP_TEACHER: u32 = 2;
/// Group id for content-subject nodes.
pub const GROUP_CONTENT: u32 = 3;

/// A vertex of the affinity graph as supplied by the data collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: String,
	pub name: String,
	pub group: u32,
}

/// A weighted, undirected affinity between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	pub source: String,
	pub target: String,
	pub value: f64,
}

/// Raw graph snapshot, `{ "nodes": [...], "edges": [...] }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl GraphNode {
	pub fn new(id: impl Into<String>, name: impl Into<String>, group: u32) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			group,
		}
	}
}

impl GraphEdge {
	pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			value,
		}
	}
}
