use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::error::GraphError;
use super::model::GraphModel;

pub const EXPORT_FILENAME: &str = "affinity-graph-export.json";
pub const EXPORT_MIME: &str = "application/json";

/// Pretty-printed `{ "nodes": [...], "edges": [...] }`. Carries no view state.
pub fn snapshot_json(model: &GraphModel) -> Result<String, GraphError> {
	Ok(serde_json::to_string_pretty(&model.snapshot())?)
}

/// Serializes the model and hands it to the browser as a file download.
pub fn download(model: &GraphModel) -> Result<(), GraphError> {
	let json = snapshot_json(model)?;
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| GraphError::Export("no document".into()))?;

	let parts = js_sys::Array::of1(&JsValue::from_str(&json));
	let options = BlobPropertyBag::new();
	options.set_type(EXPORT_MIME);
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
	let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

	let anchor: HtmlAnchorElement = document
		.create_element("a")
		.map_err(js_error)?
		.dyn_into()
		.map_err(|_| GraphError::Export("anchor element has unexpected type".into()))?;
	anchor.set_href(&url);
	anchor.set_download(EXPORT_FILENAME);
	anchor.click();

	Url::revoke_object_url(&url).map_err(js_error)?;
	log::info!(
		"affinity graph: exported {} nodes, {} edges to {}",
		model.node_count(),
		model.edge_count(),
		EXPORT_FILENAME
	);
	Ok(())
}

fn js_error(value: JsValue) -> GraphError {
	GraphError::Export(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::affinity_graph::types::{GraphData, GraphEdge, GraphNode};

	#[test]
	fn json_has_only_nodes_and_edges() {
		let model = GraphModel::new(GraphData {
			nodes: vec![GraphNode::new("a", "Ana", 1), GraphNode::new("m", "Matemáticas", 3)],
			edges: vec![GraphEdge::new("a", "m", 5.0)],
		})
		.unwrap();
		let json = snapshot_json(&model).unwrap();
		let value: serde_json::Value = serde_json::from_str(&json).unwrap();

		let object = value.as_object().unwrap();
		let mut keys: Vec<_> = object.keys().cloned().collect();
		keys.sort();
		assert_eq!(keys, ["edges", "nodes"]);
		assert_eq!(value["nodes"][1]["name"], "Matemáticas");
		assert_eq!(value["edges"][0]["value"], 5.0);
		assert!(json.contains('\n'), "export should be pretty-printed");
	}

	#[test]
	fn export_leaves_model_untouched() {
		let model = GraphModel::new(GraphData {
			nodes: vec![GraphNode::new("a", "Ana", 1)],
			edges: vec![],
		})
		.unwrap();
		let before = model.nodes().to_vec();
		snapshot_json(&model).unwrap();
		snapshot_json(&model).unwrap();
		assert_eq!(model.nodes(), before.as_slice());
	}
}
