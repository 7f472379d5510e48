use std::collections::HashMap;

use super::error::GraphError;
use super::types::{GraphData, GraphEdge, GraphNode};

/// Validated, immutable graph snapshot.
///
/// Every edge endpoint is guaranteed to resolve to a node, and node ids are
/// unique. Positions are not stored here; the layout engine owns them.
#[derive(Clone, Debug)]
pub struct GraphModel {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	index: HashMap<String, usize>,
}

impl GraphModel {
	pub fn new(data: GraphData) -> Result<Self, GraphError> {
		let GraphData { nodes, edges } = data;

		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			if index.insert(node.id.clone(), i).is_some() {
				return Err(GraphError::DuplicateNode(node.id.clone()));
			}
		}

		let model = Self {
			nodes,
			edges,
			index,
		};
		for edge in &model.edges {
			model.resolve_endpoints(edge)?;
		}
		Ok(model)
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	pub fn resolve_endpoints(&self, edge: &GraphEdge) -> Result<(&GraphNode, &GraphNode), GraphError> {
		let lookup = |id: &str| {
			self.node(id).ok_or_else(|| GraphError::DanglingEdge {
				from: edge.source.clone(),
				to: edge.target.clone(),
				missing: id.to_string(),
			})
		};
		Ok((lookup(&edge.source)?, lookup(&edge.target)?))
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	/// Borrowed view in the raw snapshot shape, used for export.
	pub fn snapshot(&self) -> SnapshotRef<'_> {
		SnapshotRef {
			nodes: &self.nodes,
			edges: &self.edges,
		}
	}
}

impl TryFrom<GraphData> for GraphModel {
	type Error = GraphError;

	fn try_from(data: GraphData) -> Result<Self, Self::Error> {
		Self::new(data)
	}
}

#[derive(Debug, serde::Serialize)]
pub struct SnapshotRef<'a> {
	pub nodes: &'a [GraphNode],
	pub edges: &'a [GraphEdge],
}

#[cfg(test)]
mod tests {
	use super::*;

	fn triangle() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode::new("a", "Ana", 1),
				GraphNode::new("b", "Bruno", 1),
				GraphNode::new("c", "Cálculo", 3),
			],
			edges: vec![
				GraphEdge::new("a", "b", 2.0),
				GraphEdge::new("b", "c", 1.0),
				GraphEdge::new("c", "a", 4.0),
			],
		}
	}

	#[test]
	fn counts_match_snapshot() {
		let model = GraphModel::new(triangle()).unwrap();
		assert_eq!(model.node_count(), 3);
		assert_eq!(model.edge_count(), 3);
	}

	#[test]
	fn empty_snapshot_is_valid() {
		let model = GraphModel::new(GraphData::default()).unwrap();
		assert_eq!(model.node_count(), 0);
		assert_eq!(model.edge_count(), 0);
	}

	#[test]
	fn resolves_edge_endpoints() {
		let model = GraphModel::new(triangle()).unwrap();
		let (src, tgt) = model.resolve_endpoints(&model.edges()[1]).unwrap();
		assert_eq!(src.name, "Bruno");
		assert_eq!(tgt.name, "Cálculo");
	}

	#[test]
	fn rejects_dangling_target() {
		let mut data = triangle();
		data.edges.push(GraphEdge::new("a", "zz", 1.0));
		let err = GraphModel::new(data).unwrap_err();
		assert_eq!(
			err,
			GraphError::DanglingEdge {
				from: "a".into(),
				to: "zz".into(),
				missing: "zz".into(),
			}
		);
	}

	#[test]
	fn rejects_dangling_source() {
		let mut data = triangle();
		data.edges.insert(0, GraphEdge::new("ghost", "a", 1.0));
		assert!(matches!(
			GraphModel::new(data),
			Err(GraphError::DanglingEdge { missing, .. }) if missing == "ghost"
		));
	}

	#[test]
	fn resolve_reports_dangling_for_foreign_edge() {
		let model = GraphModel::new(triangle()).unwrap();
		let foreign = GraphEdge::new("a", "nowhere", 1.0);
		assert!(matches!(
			model.resolve_endpoints(&foreign),
			Err(GraphError::DanglingEdge { .. })
		));
	}

	#[test]
	fn rejects_duplicate_ids() {
		let mut data = triangle();
		data.nodes.push(GraphNode::new("b", "Otro Bruno", 2));
		assert_eq!(
			GraphModel::new(data).unwrap_err(),
			GraphError::DuplicateNode("b".into())
		);
	}
}
