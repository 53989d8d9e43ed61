//! Graph construction: REST detail payloads in, node-link graphs out.
//!
//! [`build::from_node`] and [`build::from_topic`] are pure; the journey
//! annotation step ([`build::annotate_recent`]) is applied afterwards so the
//! builders stay free of store coupling.

pub mod build;
pub mod types;

pub use build::{BuildError, annotate_recent, from_node, from_topic};
pub use types::{
	GraphData, GraphLink, GraphNode, LinkRelation, NodeKind, qualified_name, split_qualified,
};

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn qualified_name_round_trips() {
		assert_eq!(qualified_name("/cam", "driver"), "/cam/driver");
		assert_eq!(qualified_name("/", "lidar"), "lidar");
		assert_eq!(
			split_qualified("/cam/driver"),
			("/cam".to_string(), "driver".to_string())
		);
		assert_eq!(
			split_qualified("lidar"),
			("/".to_string(), "lidar".to_string())
		);
		assert_eq!(
			split_qualified("/lidar"),
			("/".to_string(), "lidar".to_string())
		);
	}
}
