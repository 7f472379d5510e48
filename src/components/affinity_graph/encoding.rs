//! Pure mapping from graph elements and interaction state to visual attributes.

use std::collections::{HashMap, HashSet};

use super::controller::{InteractionState, ViewOption};
use super::types::{GROUP_CONTENT, GROUP_STUDENT, GROUP_TEACHER, GraphEdge, GraphNode};

pub const NODE_RADIUS: f64 = 8.0;
pub const DEFAULT_FILL: &str = "#666666";
pub const EDGE_COLOR: &str = "#999999";
pub const HIGHLIGHT_STROKE: &str = "#ff5722";
pub const LABEL_LIGHT: &str = "#ffffff";
pub const LABEL_DARK: &str = "#000000";
/// Minimum edge value admitted by [`ViewOption::StrongLinks`].
pub const STRONG_LINK_THRESHOLD: f64 = 4.0;

/// Group color and label-contrast tables.
///
/// Label contrast comes from a fixed set of "dark" groups rather than the
/// luminance of the fill, so a light color added under a group listed in
/// `dark_groups` gets a white label.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	colors: HashMap<u32, String>,
	dark_groups: HashSet<u32>,
}

impl Palette {
	pub fn new(
		colors: impl IntoIterator<Item = (u32, String)>,
		dark_groups: impl IntoIterator<Item = u32>,
	) -> Self {
		Self {
			colors: colors.into_iter().collect(),
			dark_groups: dark_groups.into_iter().collect(),
		}
	}

	pub fn fill_for(&self, group: u32) -> &str {
		self.colors.get(&group).map(String::as_str).unwrap_or(DEFAULT_FILL)
	}

	pub fn label_for(&self, group: u32) -> &'static str {
		if self.dark_groups.contains(&group) {
			LABEL_LIGHT
		} else {
			LABEL_DARK
		}
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::new(
			[
				(GROUP_STUDENT, "#1e3a8a".to_string()),
				(GROUP_TEACHER, "#7c3aed".to_string()),
				(GROUP_CONTENT, "#facc15".to_string()),
			],
			[GROUP_STUDENT, GROUP_TEACHER],
		)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeEncoding {
	pub radius: f64,
	pub fill_color: String,
	pub label_color: String,
	pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeEncoding {
	pub line_width: f64,
	pub color: String,
}

pub fn encode_node(node: &GraphNode, state: &InteractionState, palette: &Palette) -> NodeEncoding {
	NodeEncoding {
		radius: NODE_RADIUS,
		fill_color: palette.fill_for(node.group).to_string(),
		label_color: palette.label_for(node.group).to_string(),
		highlighted: matches_search(&node.name, &state.search_query),
	}
}

pub fn encode_edge(edge: &GraphEdge) -> EdgeEncoding {
	EdgeEncoding {
		line_width: edge.value * 0.5,
		color: EDGE_COLOR.to_string(),
	}
}

/// Case-insensitive substring match; an empty query matches nothing.
pub fn matches_search(name: &str, query: &str) -> bool {
	!query.is_empty() && name.to_lowercase().contains(&query.to_lowercase())
}

pub fn node_visible(node: &GraphNode, view: ViewOption) -> bool {
	match view {
		ViewOption::All | ViewOption::StrongLinks => true,
		ViewOption::Students => node.group == GROUP_STUDENT,
		ViewOption::Contents => node.group == GROUP_CONTENT,
	}
}

/// An edge is drawn only when both of its endpoints are.
pub fn edge_visible(edge: &GraphEdge, source: &GraphNode, target: &GraphNode, view: ViewOption) -> bool {
	if !node_visible(source, view) || !node_visible(target, view) {
		return false;
	}
	match view {
		ViewOption::StrongLinks => edge.value >= STRONG_LINK_THRESHOLD,
		_ => true,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn searching(query: &str) -> InteractionState {
		InteractionState {
			search_query: query.into(),
			..Default::default()
		}
	}

	#[test]
	fn highlights_case_insensitive_substring() {
		let ana = GraphNode::new("ana", "Ana", GROUP_STUDENT);
		let palette = Palette::default();
		assert!(encode_node(&ana, &searching("an"), &palette).highlighted);
		assert!(encode_node(&ana, &searching("ANA"), &palette).highlighted);
		assert!(!encode_node(&ana, &searching("xyz"), &palette).highlighted);
	}

	#[test]
	fn empty_query_highlights_nothing() {
		let ana = GraphNode::new("ana", "Ana", GROUP_STUDENT);
		assert!(!encode_node(&ana, &searching(""), &Palette::default()).highlighted);
	}

	#[test]
	fn matches_non_ascii_names() {
		assert!(matches_search("Profa. Lucía", "LUCÍA"));
		assert!(matches_search("Matemáticas", "máti"));
	}

	#[test]
	fn unmapped_group_falls_back() {
		let odd = GraphNode::new("x", "Misterio", 99);
		let enc = encode_node(&odd, &InteractionState::default(), &Palette::default());
		assert_eq!(enc.fill_color, "#666666");
		assert_eq!(enc.label_color, LABEL_DARK);
	}

	#[test]
	fn label_contrast_follows_dark_group_table() {
		let palette = Palette::default();
		let state = InteractionState::default();
		let student = encode_node(&GraphNode::new("s", "Ana", GROUP_STUDENT), &state, &palette);
		let subject = encode_node(&GraphNode::new("c", "Biología", GROUP_CONTENT), &state, &palette);
		assert_eq!(student.label_color, LABEL_LIGHT);
		assert_eq!(subject.label_color, LABEL_DARK);
	}

	#[test]
	fn light_fill_in_dark_subset_keeps_white_label() {
		let palette = Palette::new([(7, "#fefefe".to_string())], [7]);
		let enc = encode_node(&GraphNode::new("n", "Nieve", 7), &InteractionState::default(), &palette);
		assert_eq!(enc.fill_color, "#fefefe");
		assert_eq!(enc.label_color, LABEL_LIGHT);
	}

	#[test]
	fn encode_node_is_pure() {
		let node = GraphNode::new("m", "Prof. Martín", GROUP_TEACHER);
		let before = node.clone();
		let state = searching("mar");
		let palette = Palette::default();
		let first = encode_node(&node, &state, &palette);
		let second = encode_node(&node, &state, &palette);
		assert_eq!(first, second);
		assert_eq!(node, before);
	}

	#[test]
	fn radius_ignores_zoom() {
		let node = GraphNode::new("a", "Ana", GROUP_STUDENT);
		let zoomed = InteractionState {
			zoom_level: 2.0,
			..Default::default()
		};
		let palette = Palette::default();
		assert_eq!(
			encode_node(&node, &zoomed, &palette).radius,
			encode_node(&node, &InteractionState::default(), &palette).radius
		);
	}

	#[test]
	fn edge_width_is_half_the_value() {
		let enc = encode_edge(&GraphEdge::new("a", "b", 5.0));
		assert_eq!(enc.line_width, 2.5);
		assert_eq!(enc.color, EDGE_COLOR);
	}

	#[test]
	fn view_filters() {
		let student = GraphNode::new("a", "Ana", GROUP_STUDENT);
		let peer = GraphNode::new("b", "Bruno", GROUP_STUDENT);
		let subject = GraphNode::new("c", "Biología", GROUP_CONTENT);
		let weak = GraphEdge::new("a", "b", 1.0);
		let strong = GraphEdge::new("a", "c", 5.0);

		assert!(edge_visible(&weak, &student, &peer, ViewOption::All));
		assert!(edge_visible(&weak, &student, &peer, ViewOption::Students));
		assert!(!edge_visible(&strong, &student, &subject, ViewOption::Students));
		assert!(!node_visible(&student, ViewOption::Contents));
		assert!(node_visible(&subject, ViewOption::Contents));

		assert!(node_visible(&student, ViewOption::StrongLinks));
		assert!(!edge_visible(&weak, &student, &peer, ViewOption::StrongLinks));
		assert!(edge_visible(&strong, &student, &subject, ViewOption::StrongLinks));
	}
}
