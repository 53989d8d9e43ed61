//! Node-link graph model produced by the builders and consumed by the renderer.

/// Role-specific identity of a graph entity.
///
/// Publisher and subscriber are not separate things in the middleware; they
/// are the two roles a node can play relative to a topic. The topic-centric
/// view renders each role as its own graph node, so the role is part of the
/// kind here rather than an annotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// A topic, identified by its fully qualified name.
	Topic {
		/// Fully qualified topic name (e.g. `/scan`).
		name: String,
	},
	/// A node as the focal entity of the node-centric view.
	Node {
		/// Bare node name.
		name: String,
		/// Node namespace, `/` for the root.
		namespace: String,
	},
	/// A node in its publisher role, as seen from a topic's perspective.
	Publisher {
		/// Bare node name.
		name: String,
		/// Node namespace, `/` for the root.
		namespace: String,
	},
	/// A node in its subscriber role, as seen from a topic's perspective.
	Subscriber {
		/// Bare node name.
		name: String,
		/// Node namespace, `/` for the root.
		namespace: String,
	},
}

impl NodeKind {
	/// Human-readable label drawn next to the node.
	pub fn display_name(&self) -> &str {
		match self {
			NodeKind::Topic { name } => name,
			NodeKind::Node { name, .. } => name,
			NodeKind::Publisher { name, .. } => name,
			NodeKind::Subscriber { name, .. } => name,
		}
	}

	/// Namespace for node-backed kinds; topics have no namespace concept.
	pub fn namespace(&self) -> Option<&str> {
		match self {
			NodeKind::Topic { .. } => None,
			NodeKind::Node { namespace, .. }
			| NodeKind::Publisher { namespace, .. }
			| NodeKind::Subscriber { namespace, .. } => Some(namespace),
		}
	}

	/// Kind name for legends and tooltips.
	pub fn label(&self) -> &'static str {
		match self {
			NodeKind::Topic { .. } => "Topic",
			NodeKind::Node { .. } => "Node",
			NodeKind::Publisher { .. } => "Publisher",
			NodeKind::Subscriber { .. } => "Subscriber",
		}
	}
}

/// A renderable graph entity with a graph-unique id.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique within one graph. The focal entity uses its qualified name;
	/// satellite entries carry a kind prefix (`topic:`, `pub:`, `sub:`).
	pub id: String,
	/// What the entity is, with its identity fields.
	pub kind: NodeKind,
	/// True if the journey store holds a visit to this entity.
	pub is_recent: bool,
}

/// Directionality of a pub/sub relationship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkRelation {
	/// Publisher node → topic (topic-centric view).
	Publishes,
	/// Topic → subscriber node (topic-centric view).
	Subscribes,
	/// Focal node → topic it publishes (node-centric view).
	PublishesTo,
	/// Topic → focal node subscribed to it (node-centric view).
	SubscribesTo,
}

/// A directed edge between two nodes of the same graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Which pub/sub relationship the edge represents.
	pub relation: LinkRelation,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Graph entities, no duplicate ids.
	pub nodes: Vec<GraphNode>,
	/// Directed edges; both endpoints reference ids present in `nodes`.
	pub links: Vec<GraphLink>,
}

/// Joins a namespace and a bare name into the qualified form used as a node
/// id and in REST paths. The root namespace `/` yields the bare name.
pub fn qualified_name(namespace: &str, name: &str) -> String {
	if namespace == "/" {
		name.to_string()
	} else {
		format!("{namespace}/{name}")
	}
}

/// Splits a qualified name back into `(namespace, name)`.
/// Inverse of [`qualified_name`]; bare names map to the root namespace.
pub fn split_qualified(qualified: &str) -> (String, String) {
	match qualified.rfind('/') {
		None => ("/".to_string(), qualified.to_string()),
		Some(0) => ("/".to_string(), qualified[1..].to_string()),
		Some(i) => (qualified[..i].to_string(), qualified[i + 1..].to_string()),
	}
}
