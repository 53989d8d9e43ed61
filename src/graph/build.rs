//! Pure builders turning REST detail payloads into renderable graphs.
//!
//! No I/O and no side effects: callers invoke a builder only after the
//! detail fetch has succeeded, and a validation failure yields an error
//! instead of a partial graph.

use thiserror::Error;

use crate::api::{NodeDetail, TopicDetail};
use crate::journey::{JourneyKind, JourneyStore};

use super::types::{GraphData, GraphLink, GraphNode, LinkRelation, NodeKind, qualified_name};

/// A detail payload that cannot produce a well-formed graph.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
	/// The focal entity has an empty name.
	#[error("detail payload has an empty {0} name")]
	EmptyIdentity(&'static str),
	/// The focal node has an empty namespace.
	#[error("node detail has an empty namespace")]
	EmptyNamespace,
	/// A publisher/subscriber entry is missing its identifying name.
	#[error("{role} entry {index} has an empty name")]
	EmptyEntry {
		/// Which list the entry came from.
		role: &'static str,
		/// Position in that list.
		index: usize,
	},
}

/// Builds the node-centric graph: the focal node, one topic node per unique
/// topic it touches, a `PublishesTo` link per publish entry and a
/// `SubscribesTo` link per subscribe entry.
///
/// A topic appearing in both lists gets a single topic node (first
/// occurrence wins) but still two links, one in each direction. Output order
/// follows input order, so equal payloads build structurally equal graphs.
/// Topic ids carry a `topic:` prefix; a topic may legally share its name
/// with the focal node's qualified name, and the prefix keeps the two ids
/// distinct.
pub fn from_node(detail: &NodeDetail) -> Result<GraphData, BuildError> {
	if detail.node.is_empty() {
		return Err(BuildError::EmptyIdentity("node"));
	}
	if detail.namespace.is_empty() {
		return Err(BuildError::EmptyNamespace);
	}
	for (index, entry) in detail.publishes.iter().enumerate() {
		if entry.topic.is_empty() {
			return Err(BuildError::EmptyEntry {
				role: "publishes",
				index,
			});
		}
	}
	for (index, entry) in detail.subscribes.iter().enumerate() {
		if entry.topic.is_empty() {
			return Err(BuildError::EmptyEntry {
				role: "subscribes",
				index,
			});
		}
	}

	let node_id = qualified_name(&detail.namespace, &detail.node);
	let mut nodes = vec![GraphNode {
		id: node_id.clone(),
		kind: NodeKind::Node {
			name: detail.node.clone(),
			namespace: detail.namespace.clone(),
		},
		is_recent: false,
	}];
	let mut links = Vec::with_capacity(detail.publishes.len() + detail.subscribes.len());

	let mut push_topic = |nodes: &mut Vec<GraphNode>, topic: &str| {
		let id = format!("topic:{topic}");
		if !nodes.iter().any(|n| n.id == id) {
			nodes.push(GraphNode {
				id: id.clone(),
				kind: NodeKind::Topic {
					name: topic.to_string(),
				},
				is_recent: false,
			});
		}
		id
	};

	for entry in &detail.publishes {
		let topic_id = push_topic(&mut nodes, &entry.topic);
		links.push(GraphLink {
			source: node_id.clone(),
			target: topic_id,
			relation: LinkRelation::PublishesTo,
		});
	}
	for entry in &detail.subscribes {
		let topic_id = push_topic(&mut nodes, &entry.topic);
		links.push(GraphLink {
			source: topic_id,
			target: node_id.clone(),
			relation: LinkRelation::SubscribesTo,
		});
	}

	Ok(GraphData { nodes, links })
}

/// Builds the topic-centric graph: the focal topic, one publisher-kind node
/// per publisher entry and one subscriber-kind node per subscriber entry,
/// with a `Publishes`/`Subscribes` link each.
///
/// Roles are deliberately not merged: a node that both publishes and
/// subscribes the topic appears twice, once per role, because the role is
/// part of the entity's kind in this view. Ids carry a role prefix so the
/// graph still has no duplicate ids.
pub fn from_topic(detail: &TopicDetail) -> Result<GraphData, BuildError> {
	if detail.topic.is_empty() {
		return Err(BuildError::EmptyIdentity("topic"));
	}
	for (index, peer) in detail.publishers.iter().enumerate() {
		if peer.node_name.is_empty() || peer.node_namespace.is_empty() {
			return Err(BuildError::EmptyEntry {
				role: "publishers",
				index,
			});
		}
	}
	for (index, peer) in detail.subscribers.iter().enumerate() {
		if peer.node_name.is_empty() || peer.node_namespace.is_empty() {
			return Err(BuildError::EmptyEntry {
				role: "subscribers",
				index,
			});
		}
	}

	let mut nodes = vec![GraphNode {
		id: detail.topic.clone(),
		kind: NodeKind::Topic {
			name: detail.topic.clone(),
		},
		is_recent: false,
	}];
	let mut links = Vec::with_capacity(detail.publishers.len() + detail.subscribers.len());

	for peer in &detail.publishers {
		let id = format!(
			"pub:{}",
			qualified_name(&peer.node_namespace, &peer.node_name)
		);
		nodes.push(GraphNode {
			id: id.clone(),
			kind: NodeKind::Publisher {
				name: peer.node_name.clone(),
				namespace: peer.node_namespace.clone(),
			},
			is_recent: false,
		});
		links.push(GraphLink {
			source: id,
			target: detail.topic.clone(),
			relation: LinkRelation::Publishes,
		});
	}
	for peer in &detail.subscribers {
		let id = format!(
			"sub:{}",
			qualified_name(&peer.node_namespace, &peer.node_name)
		);
		nodes.push(GraphNode {
			id: id.clone(),
			kind: NodeKind::Subscriber {
				name: peer.node_name.clone(),
				namespace: peer.node_namespace.clone(),
			},
			is_recent: false,
		});
		links.push(GraphLink {
			source: detail.topic.clone(),
			target: id,
			relation: LinkRelation::Subscribes,
		});
	}

	Ok(GraphData { nodes, links })
}

/// Marks every node whose identity appears in the journey store.
/// Topic kinds match on kind + name; node-backed kinds match on kind `node`
/// plus name and namespace, regardless of the role they play in this graph.
pub fn annotate_recent(graph: &mut GraphData, journey: &JourneyStore) {
	for node in &mut graph.nodes {
		node.is_recent = match &node.kind {
			NodeKind::Topic { name } => journey.contains(JourneyKind::Topic, name, "/"),
			NodeKind::Node { name, namespace }
			| NodeKind::Publisher { name, namespace }
			| NodeKind::Subscriber { name, namespace } => {
				journey.contains(JourneyKind::Node, name, namespace)
			}
		};
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{TopicEndpoint, TopicPeer};

	fn node_detail(
		node: &str,
		namespace: &str,
		publishes: &[&str],
		subscribes: &[&str],
	) -> NodeDetail {
		let endpoint = |topic: &&str| TopicEndpoint {
			topic: topic.to_string(),
			types: vec!["std_msgs/msg/String".to_string()],
		};
		NodeDetail {
			node: node.to_string(),
			namespace: namespace.to_string(),
			publishes: publishes.iter().map(endpoint).collect(),
			subscribes: subscribes.iter().map(endpoint).collect(),
			services: Vec::new(),
			clients: Vec::new(),
		}
	}

	fn topic_detail(topic: &str, publishers: &[(&str, &str)], subscribers: &[(&str, &str)]) -> TopicDetail {
		let peer = |(name, namespace): &(&str, &str)| TopicPeer {
			node_name: name.to_string(),
			node_namespace: namespace.to_string(),
			topic_type: "sensor_msgs/msg/LaserScan".to_string(),
		};
		TopicDetail {
			topic: topic.to_string(),
			encoded_topic: topic.replace('/', "%2F"),
			publishers: publishers.iter().map(peer).collect(),
			subscribers: subscribers.iter().map(peer).collect(),
		}
	}

	#[test]
	fn node_graph_publisher_only() {
		let graph = from_node(&node_detail("driver", "/cam", &["/image_raw"], &[])).unwrap();

		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.nodes[0].id, "/cam/driver");
		assert!(matches!(graph.nodes[0].kind, NodeKind::Node { .. }));
		assert_eq!(graph.nodes[1].id, "topic:/image_raw");
		assert!(matches!(graph.nodes[1].kind, NodeKind::Topic { .. }));

		assert_eq!(graph.links.len(), 1);
		assert_eq!(graph.links[0].source, "/cam/driver");
		assert_eq!(graph.links[0].target, "topic:/image_raw");
		assert_eq!(graph.links[0].relation, LinkRelation::PublishesTo);
	}

	#[test]
	fn node_graph_root_namespace_uses_bare_name() {
		let graph = from_node(&node_detail("lidar", "/", &["/scan"], &[])).unwrap();
		assert_eq!(graph.nodes[0].id, "lidar");
	}

	#[test]
	fn node_graph_dedups_topics_across_both_roles() {
		let graph = from_node(&node_detail(
			"relay",
			"/",
			&["/chatter", "/other"],
			&["/chatter"],
		))
		.unwrap();

		// One focal node, two unique topics.
		assert_eq!(graph.nodes.len(), 3);
		let node_kinds = graph
			.nodes
			.iter()
			.filter(|n| matches!(n.kind, NodeKind::Node { .. }))
			.count();
		assert_eq!(node_kinds, 1);

		// Two links still exist for the shared topic, one per direction.
		assert_eq!(graph.links.len(), 3);
		assert!(graph.links.iter().any(|l| {
			l.relation == LinkRelation::PublishesTo && l.target == "topic:/chatter"
		}));
		assert!(graph.links.iter().any(|l| {
			l.relation == LinkRelation::SubscribesTo && l.source == "topic:/chatter"
		}));
	}

	#[test]
	fn node_graph_keeps_topic_named_like_the_node() {
		// A node may publish a topic whose name equals its own qualified
		// name; the topic still gets its own graph node and the link joins
		// two distinct entities.
		let graph = from_node(&node_detail("driver", "/cam", &["/cam/driver"], &[])).unwrap();

		assert_eq!(graph.nodes.len(), 2);
		assert!(matches!(graph.nodes[0].kind, NodeKind::Node { .. }));
		assert!(matches!(graph.nodes[1].kind, NodeKind::Topic { .. }));
		assert_ne!(graph.nodes[0].id, graph.nodes[1].id);

		assert_eq!(graph.links.len(), 1);
		assert_ne!(graph.links[0].source, graph.links[0].target);
	}

	#[test]
	fn node_graph_has_no_duplicate_ids_and_closed_links() {
		let graph = from_node(&node_detail(
			"relay",
			"/ns",
			&["/a", "/b", "/a"],
			&["/b", "/c"],
		))
		.unwrap();

		let mut ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		ids.sort_unstable();
		let before = ids.len();
		ids.dedup();
		assert_eq!(ids.len(), before);

		for link in &graph.links {
			assert!(graph.nodes.iter().any(|n| n.id == link.source));
			assert!(graph.nodes.iter().any(|n| n.id == link.target));
		}
	}

	#[test]
	fn node_graph_is_deterministic() {
		let detail = node_detail("relay", "/ns", &["/a", "/b"], &["/b"]);
		assert_eq!(from_node(&detail).unwrap(), from_node(&detail).unwrap());
	}

	#[test]
	fn node_graph_rejects_empty_identity() {
		assert_eq!(
			from_node(&node_detail("", "/", &[], &[])),
			Err(BuildError::EmptyIdentity("node"))
		);
		assert_eq!(
			from_node(&node_detail("x", "", &[], &[])),
			Err(BuildError::EmptyNamespace)
		);
		assert_eq!(
			from_node(&node_detail("x", "/", &[""], &[])),
			Err(BuildError::EmptyEntry {
				role: "publishes",
				index: 0
			})
		);
	}

	#[test]
	fn topic_graph_keeps_roles_distinct() {
		let graph = from_topic(&topic_detail(
			"/scan",
			&[("lidar", "/")],
			&[("lidar", "/")],
		))
		.unwrap();

		// Topic plus one node per role, even for identical node identity.
		assert_eq!(graph.nodes.len(), 3);
		assert!(matches!(graph.nodes[0].kind, NodeKind::Topic { .. }));
		assert!(matches!(graph.nodes[1].kind, NodeKind::Publisher { .. }));
		assert!(matches!(graph.nodes[2].kind, NodeKind::Subscriber { .. }));
		assert_ne!(graph.nodes[1].id, graph.nodes[2].id);

		assert_eq!(graph.links.len(), 2);
		assert_eq!(graph.links[0].relation, LinkRelation::Publishes);
		assert_eq!(graph.links[0].target, "/scan");
		assert_eq!(graph.links[1].relation, LinkRelation::Subscribes);
		assert_eq!(graph.links[1].source, "/scan");
	}

	#[test]
	fn topic_graph_one_node_per_entry() {
		let graph = from_topic(&topic_detail(
			"/tf",
			&[("a", "/"), ("b", "/ns")],
			&[("c", "/"), ("a", "/")],
		))
		.unwrap();

		let publishers = graph
			.nodes
			.iter()
			.filter(|n| matches!(n.kind, NodeKind::Publisher { .. }))
			.count();
		let subscribers = graph
			.nodes
			.iter()
			.filter(|n| matches!(n.kind, NodeKind::Subscriber { .. }))
			.count();
		assert_eq!(publishers, 2);
		assert_eq!(subscribers, 2);
		assert_eq!(graph.links.len(), 4);
	}

	#[test]
	fn topic_graph_rejects_empty_fields() {
		assert_eq!(
			from_topic(&topic_detail("", &[], &[])),
			Err(BuildError::EmptyIdentity("topic"))
		);
		assert_eq!(
			from_topic(&topic_detail("/scan", &[("", "/")], &[])),
			Err(BuildError::EmptyEntry {
				role: "publishers",
				index: 0
			})
		);
	}

	#[test]
	fn annotation_marks_visited_entities() {
		let mut journey = JourneyStore::in_memory();
		journey.add(JourneyKind::Topic, "/scan", "/");
		journey.add(JourneyKind::Node, "lidar", "/");

		let mut graph = from_topic(&topic_detail(
			"/scan",
			&[("lidar", "/"), ("rviz", "/viz")],
			&[],
		))
		.unwrap();
		annotate_recent(&mut graph, &journey);

		assert!(graph.nodes[0].is_recent, "visited topic is marked");
		assert!(graph.nodes[1].is_recent, "visited node is marked in its role");
		assert!(!graph.nodes[2].is_recent, "unvisited node stays unmarked");
	}

	#[test]
	fn annotation_clears_after_removal() {
		let mut journey = JourneyStore::in_memory();
		journey.add(JourneyKind::Topic, "/scan", "/");

		let detail = topic_detail("/scan", &[], &[]);
		let mut graph = from_topic(&detail).unwrap();
		annotate_recent(&mut graph, &journey);
		assert!(graph.nodes[0].is_recent);

		journey.remove_at(0);
		let mut graph = from_topic(&detail).unwrap();
		annotate_recent(&mut graph, &journey);
		assert!(!graph.nodes[0].is_recent);
	}
}
