//! Transient UI state of the graph viewer: search text, zoom and view filter.

use std::fmt;
use std::str::FromStr;

use super::error::GraphError;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.2;
pub const DEFAULT_ZOOM: f64 = 1.0;

/// The enumerated view filters offered by the `view-select` control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewOption {
	#[default]
	All,
	Students,
	Contents,
	StrongLinks,
}

impl ViewOption {
	pub const ALL: [ViewOption; 4] = [
		ViewOption::All,
		ViewOption::Students,
		ViewOption::Contents,
		ViewOption::StrongLinks,
	];

	pub fn label(self) -> &'static str {
		match self {
			ViewOption::All => "Todos",
			ViewOption::Students => "Estudiantes",
			ViewOption::Contents => "Contenidos",
			ViewOption::StrongLinks => "Conexiones Fuertes",
		}
	}
}

impl FromStr for ViewOption {
	type Err = GraphError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|v| v.label() == s)
			.ok_or_else(|| GraphError::InvalidViewOption(s.to_string()))
	}
}

impl fmt::Display for ViewOption {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionState {
	pub search_query: String,
	pub zoom_level: f64,
	pub selected_view: ViewOption,
}

impl Default for InteractionState {
	fn default() -> Self {
		Self {
			search_query: String::new(),
			zoom_level: DEFAULT_ZOOM,
			selected_view: ViewOption::default(),
		}
	}
}

impl InteractionState {
	pub fn set_search(&mut self, query: impl Into<String>) {
		self.search_query = query.into();
	}

	pub fn zoom_in(&mut self) {
		self.zoom_level = step_zoom(self.zoom_level, ZOOM_STEP);
	}

	pub fn zoom_out(&mut self) {
		self.zoom_level = step_zoom(self.zoom_level, -ZOOM_STEP);
	}

	/// Restores every field in one assignment so observers never see a
	/// partially reset state.
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	/// Selects a view by its label. Unknown labels leave the state untouched.
	pub fn select_view(&mut self, label: &str) -> Result<ViewOption, GraphError> {
		let view = label.parse::<ViewOption>()?;
		self.selected_view = view;
		Ok(view)
	}
}

// Rounded to tenths so repeated steps don't accumulate float drift.
fn step_zoom(current: f64, delta: f64) -> f64 {
	let next = ((current + delta) * 10.0).round() / 10.0;
	next.clamp(MIN_ZOOM, MAX_ZOOM)
}
