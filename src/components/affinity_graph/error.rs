use thiserror::Error;

/// Failures raised by the affinity graph component.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
	#[error("rendering engine failed to load: {0}")]
	EngineLoad(String),

	#[error("edge {from} -> {to} references unknown node '{missing}'")]
	DanglingEdge {
		from: String,
		to: String,
		missing: String,
	},

	#[error("node id '{0}' appears more than once in the snapshot")]
	DuplicateNode(String),

	#[error("'{0}' is not a valid view option")]
	InvalidViewOption(String),

	#[error("failed to serialize graph: {0}")]
	Serialize(String),

	#[error("export failed: {0}")]
	Export(String),
}

impl From<serde_json::Error> for GraphError {
	fn from(err: serde_json::Error) -> Self {
		Self::Serialize(err.to_string())
	}
}
