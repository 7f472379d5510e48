pub mod affinity_graph;
