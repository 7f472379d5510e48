//! Frame building for the graph canvas.
//!
//! A frame is a list of [`DrawCommand`]s produced by the node and edge draw
//! hooks. Anything implementing [`Surface`] can consume it, which keeps the
//! drawing logic independent of the browser canvas.

use super::controller::InteractionState;
use super::encoding::{self, EdgeEncoding, NodeEncoding, Palette};
use super::engine::{Engine, EngineStatus};
use super::error::GraphError;
use super::layout::LayoutState;
use super::types::GraphNode;

pub const BACKGROUND: &str = "#f8fafc";
pub const PLACEHOLDER_TEXT: &str = "Cargando grafo...";
pub const PLACEHOLDER_COLOR: &str = "#64748b";
const LABEL_FONT_PX: f64 = 10.0;
const HIGHLIGHT_WIDTH_PX: f64 = 2.5;
const LABEL_PAD_PX: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
	pub color: String,
	pub width: f64,
}

/// A single primitive understood by every [`Surface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	Clear {
		width: f64,
		height: f64,
		color: String,
	},
	/// Saves the current state, then translates and scales.
	Transform {
		x: f64,
		y: f64,
		k: f64,
	},
	Restore,
	Line {
		from: (f64, f64),
		to: (f64, f64),
		width: f64,
		color: String,
	},
	Circle {
		x: f64,
		y: f64,
		radius: f64,
		fill: String,
		stroke: Option<Stroke>,
	},
	Rect {
		x: f64,
		y: f64,
		width: f64,
		height: f64,
		fill: String,
	},
	/// Centered on `(x, y)`.
	Text {
		x: f64,
		y: f64,
		text: String,
		size: f64,
		color: String,
	},
}

pub trait Surface {
	fn paint(&mut self, commands: &[DrawCommand]);
}

/// A node at its current layout position.
#[derive(Clone, Copy, Debug)]
pub struct PlacedNode<'a> {
	pub node: &'a GraphNode,
	pub x: f64,
	pub y: f64,
}

pub type NodeHook = fn(&PlacedNode<'_>, &NodeEncoding, f64) -> Vec<DrawCommand>;
pub type EdgeHook = fn((f64, f64), (f64, f64), &EdgeEncoding, f64) -> Vec<DrawCommand>;

/// Circle with an optional highlight outline and a name tag below it.
/// Stroke widths and font size are divided by `scale` to stay legible.
pub fn default_node_hook(placed: &PlacedNode<'_>, enc: &NodeEncoding, scale: f64) -> Vec<DrawCommand> {
	let (x, y) = (placed.x, placed.y);
	let font = LABEL_FONT_PX / scale;
	let pad = LABEL_PAD_PX / scale;
	let text_width = placed.node.name.chars().count() as f64 * font * 0.6;
	let tag_y = y + enc.radius + pad;

	vec![
		DrawCommand::Circle {
			x,
			y,
			radius: enc.radius,
			fill: enc.fill_color.clone(),
			stroke: enc.highlighted.then(|| Stroke {
				color: encoding::HIGHLIGHT_STROKE.to_string(),
				width: HIGHLIGHT_WIDTH_PX / scale,
			}),
		},
		DrawCommand::Rect {
			x: x - text_width / 2.0 - pad,
			y: tag_y,
			width: text_width + 2.0 * pad,
			height: font + 2.0 * pad,
			fill: enc.fill_color.clone(),
		},
		DrawCommand::Text {
			x,
			y: tag_y + pad + font / 2.0,
			text: placed.node.name.clone(),
			size: font,
			color: enc.label_color.clone(),
		},
	]
}

pub fn default_edge_hook(
	from: (f64, f64),
	to: (f64, f64),
	enc: &EdgeEncoding,
	scale: f64,
) -> Vec<DrawCommand> {
	vec![DrawCommand::Line {
		from,
		to,
		width: enc.line_width / scale,
		color: enc.color.clone(),
	}]
}

/// Shown until the engine is loaded, and forever if it fails.
pub fn placeholder_frame(width: f64, height: f64) -> Vec<DrawCommand> {
	vec![
		DrawCommand::Clear {
			width,
			height,
			color: BACKGROUND.to_string(),
		},
		DrawCommand::Text {
			x: width / 2.0,
			y: height / 2.0,
			text: PLACEHOLDER_TEXT.to_string(),
			size: 14.0,
			color: PLACEHOLDER_COLOR.to_string(),
		},
	]
}

/// Layout plus the engine it paints through.
pub struct RenderSurface<S> {
	pub layout: LayoutState,
	engine: Engine<S>,
	node_hook: NodeHook,
	edge_hook: EdgeHook,
}

impl<S: Surface> RenderSurface<S> {
	pub fn new(layout: LayoutState) -> Self {
		Self {
			layout,
			engine: Engine::Unloaded,
			node_hook: default_node_hook,
			edge_hook: default_edge_hook,
		}
	}

	pub fn with_node_hook(mut self, hook: NodeHook) -> Self {
		self.node_hook = hook;
		self
	}

	pub fn with_edge_hook(mut self, hook: EdgeHook) -> Self {
		self.edge_hook = hook;
		self
	}

	pub fn attach(&mut self, surface: S) {
		self.engine = Engine::Loaded(surface);
	}

	pub fn fail(&mut self, err: &GraphError) {
		log::error!("affinity graph: {}", err);
		self.engine = Engine::Failed;
	}

	pub fn status(&self) -> EngineStatus {
		self.engine.status()
	}

	pub fn surface(&self) -> Option<&S> {
		match &self.engine {
			Engine::Loaded(s) => Some(s),
			_ => None,
		}
	}

	/// Builds the current frame: edges first, then nodes on top.
	pub fn frame(&mut self, state: &InteractionState, palette: &Palette) -> Vec<DrawCommand> {
		let (width, height) = (self.layout.width, self.layout.height);
		if !self.status().is_loaded() {
			return placeholder_frame(width, height);
		}

		self.layout.transform.k = state.zoom_level;
		let k = state.zoom_level;
		let (ox, oy) = self.layout.origin();
		let view = state.selected_view;
		let (node_hook, edge_hook) = (self.node_hook, self.edge_hook);

		let mut commands = vec![
			DrawCommand::Clear {
				width,
				height,
				color: BACKGROUND.to_string(),
			},
			DrawCommand::Transform { x: ox, y: oy, k },
		];

		self.layout.graph.visit_edges(|n1, n2, edge| {
			let (src, tgt) = (&n1.data.user_data, &n2.data.user_data);
			if !encoding::edge_visible(&edge.user_data, src, tgt, view) {
				return;
			}
			let enc = encoding::encode_edge(&edge.user_data);
			commands.extend(edge_hook(
				(n1.x() as f64, n1.y() as f64),
				(n2.x() as f64, n2.y() as f64),
				&enc,
				k,
			));
		});

		self.layout.graph.visit_nodes(|node| {
			let data = &node.data.user_data;
			if !encoding::node_visible(data, view) {
				return;
			}
			let enc = encoding::encode_node(data, state, palette);
			let placed = PlacedNode {
				node: data,
				x: node.x() as f64,
				y: node.y() as f64,
			};
			commands.extend(node_hook(&placed, &enc, k));
		});

		commands.push(DrawCommand::Restore);
		commands
	}

	/// Paints the current frame if the engine is loaded.
	pub fn draw(&mut self, state: &InteractionState, palette: &Palette) {
		let commands = self.frame(state, palette);
		if let Engine::Loaded(surface) = &mut self.engine {
			surface.paint(&commands);
		}
	}

	/// One animation frame: advance physics (until cooldown) and redraw.
	/// Returns whether another frame is needed.
	pub fn step(&mut self, dt: f32, state: &InteractionState, palette: &Palette) -> bool {
		let running = self.layout.tick(dt);
		self.draw(state, palette);
		running || self.layout.drag.active
	}
}
