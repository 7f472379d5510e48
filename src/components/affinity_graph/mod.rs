mod canvas;
mod component;
mod controller;
mod encoding;
mod engine;
mod error;
mod export;
mod layout;
mod model;
mod render;
mod types;

pub use component::AffinityGraph;
pub use controller::{InteractionState, ViewOption};
pub use encoding::Palette;
pub use error::GraphError;
pub use export::snapshot_json;
pub use model::GraphModel;
pub use types::{GROUP_CONTENT, GROUP_STUDENT, GROUP_TEACHER, GraphData, GraphEdge, GraphNode};
