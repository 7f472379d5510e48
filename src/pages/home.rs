use leptos::prelude::*;

use crate::components::affinity_graph::{
	AffinityGraph, GROUP_CONTENT, GROUP_STUDENT, GROUP_TEACHER, GraphData, GraphEdge, GraphNode,
};

/// Example affinity snapshot: students, teachers and subjects.
pub fn affinity_snapshot() -> GraphData {
	let nodes = vec![
		GraphNode::new("ana", "Ana", GROUP_STUDENT),
		GraphNode::new("bruno", "Bruno", GROUP_STUDENT),
		GraphNode::new("camila", "Camila", GROUP_STUDENT),
		GraphNode::new("lucia", "Profa. Lucía", GROUP_TEACHER),
		GraphNode::new("martin", "Prof. Martín", GROUP_TEACHER),
		GraphNode::new("matematicas", "Matemáticas", GROUP_CONTENT),
		GraphNode::new("biologia", "Biología", GROUP_CONTENT),
		GraphNode::new("programacion", "Programación", GROUP_CONTENT),
	];

	let edges = [
		("ana", "bruno", 2.0),
		("ana", "camila", 1.0),
		("bruno", "camila", 3.0),
		("ana", "matematicas", 5.0),
		("bruno", "programacion", 4.0),
		("camila", "biologia", 5.0),
		("lucia", "matematicas", 4.0),
		("lucia", "ana", 2.0),
		("martin", "programacion", 5.0),
		("martin", "bruno", 3.0),
		("biologia", "matematicas", 1.0),
		("lucia", "martin", 2.0),
	]
	.into_iter()
	.map(|(source, target, value)| GraphEdge::new(source, target, value))
	.collect();

	GraphData { nodes, edges }
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(affinity_snapshot);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"No se pudo mostrar el grafo"</h1>

				<p>"Errores: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="graph-page">
				<div class="graph-header">
					<h1>"Mapa de Afinidades"</h1>
					<p class="subtitle">"Busca un nodo, filtra la vista o exporta los datos."</p>
				</div>
				<AffinityGraph data=graph_data height=Some(560.0) />
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::affinity_graph::{GraphModel, snapshot_json};

	#[test]
	fn example_snapshot_is_consistent() {
		let model = GraphModel::new(affinity_snapshot()).unwrap();
		assert_eq!(model.node_count(), 8);
		assert_eq!(model.edge_count(), 12);
	}

	#[test]
	fn export_round_trips_example_snapshot() {
		let original = affinity_snapshot();
		let model = GraphModel::new(original.clone()).unwrap();
		let json = snapshot_json(&model).unwrap();

		let parsed: GraphData = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed.nodes.len(), 8);
		assert_eq!(parsed.edges.len(), 12);
		assert_eq!(parsed, original);

		let value: serde_json::Value = serde_json::from_str(&json).unwrap();
		for field in ["searchQuery", "search_query", "zoom_level", "selected_view"] {
			assert!(value.get(field).is_none(), "{field} leaked into export");
		}
	}
}
