use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::model::GraphModel;
use super::types::{GraphEdge, GraphNode};

/// Simulated seconds of physics before the layout is frozen.
pub const COOLDOWN_SECS: f32 = 3.0;
/// Simulation step per animation frame (~60 fps).
pub const FRAME_DT: f32 = 0.016;
pub const HIT_RADIUS: f64 = 12.0;
const SEED_RADIUS: f64 = 100.0;

/// Pan offset from the canvas center plus the scale factor.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Physics simulation plus viewport for one graph snapshot.
pub struct LayoutState {
	pub graph: ForceGraph<GraphNode, GraphEdge>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	elapsed: f32,
	cooldown: f32,
}

impl LayoutState {
	pub fn new(model: &GraphModel, width: f64, height: f64, cooldown: f32) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut ids = std::collections::HashMap::new();
		let count = model.node_count().max(1) as f64;

		for (i, node) in model.nodes().iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let idx = graph.add_node(NodeData {
				x: (SEED_RADIUS * angle.cos()) as f32,
				y: (SEED_RADIUS * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: node.clone(),
			});
			ids.insert(node.id.as_str(), idx);
		}

		// The model already guarantees both endpoints exist.
		for edge in model.edges() {
			if let (Some(&src), Some(&tgt)) =
				(ids.get(edge.source.as_str()), ids.get(edge.target.as_str()))
			{
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: edge.clone(),
					},
				);
			}
		}

		Self {
			graph,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			elapsed: 0.0,
			cooldown,
		}
	}

	/// Advances the physics by `dt` unless the cooldown has elapsed.
	/// Returns whether the simulation is still running afterwards.
	pub fn tick(&mut self, dt: f32) -> bool {
		if self.is_settled() {
			return false;
		}
		self.graph.update(dt);
		self.elapsed += dt;
		!self.is_settled()
	}

	pub fn is_settled(&self) -> bool {
		self.elapsed >= self.cooldown
	}

	/// Screen-space position of the graph origin.
	pub fn origin(&self) -> (f64, f64) {
		(
			self.width / 2.0 + self.transform.x,
			self.height / 2.0 + self.transform.y,
		)
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		let (ox, oy) = self.origin();
		(
			(sx - ox) / self.transform.k,
			(sy - oy) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_position(&self, id: &str) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	/// Starts a node drag when the pointer is over a node, a pan otherwise.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag.active = true;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = x;
			self.drag.start_y = y;
			let drag = &mut self.drag;
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					drag.node_start_x = node.x();
					drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan.active = true;
			self.pan.start_x = x;
			self.pan.start_y = y;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	/// Returns whether the frame needs to be redrawn.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return false;
			};
			let (dx, dy) = (
				(x - self.drag.start_x) / self.transform.k,
				(y - self.drag.start_y) / self.transform.k,
			);
			let (nx, ny) = (
				self.drag.node_start_x + dx as f32,
				self.drag.node_start_y + dy as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
			true
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
			true
		} else {
			false
		}
	}

	pub fn pointer_up(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
