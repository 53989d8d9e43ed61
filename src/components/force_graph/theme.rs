//! Visual theming for the graph canvas.
//!
//! Node color is keyed on entity kind and link color on relation direction,
//! so the two view contexts (node-centric, topic-centric) read consistently.

use crate::graph::{LinkRelation, NodeKind};

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Node fill colors per entity kind.
#[derive(Clone, Debug)]
pub struct KindPalette {
	pub topic: Color,
	pub node: Color,
	pub publisher: Color,
	pub subscriber: Color,
}

/// Complete visual theme for the graph canvas.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas background fill.
	pub background: Color,
	/// Label text color.
	pub label: Color,
	/// Backing box behind labels, for contrast over edges.
	pub label_background: Color,
	/// Publish-direction link color (both view contexts).
	pub publish_link: Color,
	/// Subscribe-direction link color (both view contexts).
	pub subscribe_link: Color,
	/// Ring marker for previously visited entities.
	pub recent_ring: Color,
	/// Ring drawn around the hovered node.
	pub hover_ring: Color,
	pub kinds: KindPalette,
}

impl Theme {
	/// Light theme matching the panel pages (default).
	pub fn light() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			label: Color::rgb(31, 41, 55),
			label_background: Color::rgba(255, 255, 255, 0.9),
			publish_link: Color::rgb(16, 185, 129),
			subscribe_link: Color::rgb(245, 158, 11),
			recent_ring: Color::rgb(99, 102, 241),
			hover_ring: Color::rgba(55, 65, 81, 0.8),
			kinds: KindPalette {
				topic: Color::rgb(59, 130, 246),
				node: Color::rgb(139, 92, 246),
				publisher: Color::rgb(16, 185, 129),
				subscriber: Color::rgb(245, 158, 11),
			},
		}
	}

	/// Fill color for a graph entity.
	pub fn node_color(&self, kind: &NodeKind) -> Color {
		match kind {
			NodeKind::Topic { .. } => self.kinds.topic,
			NodeKind::Node { .. } => self.kinds.node,
			NodeKind::Publisher { .. } => self.kinds.publisher,
			NodeKind::Subscriber { .. } => self.kinds.subscriber,
		}
	}

	/// Stroke color for a link, by relation direction.
	pub fn link_color(&self, relation: LinkRelation) -> Color {
		match relation {
			LinkRelation::Publishes | LinkRelation::PublishesTo => self.publish_link,
			LinkRelation::Subscribes | LinkRelation::SubscribesTo => self.subscribe_link,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
