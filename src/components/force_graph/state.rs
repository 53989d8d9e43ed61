//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node display data,
//! the pan/zoom view transform, hover highlight intensities, and the
//! auto-fit countdown that re-frames the view once the layout settles.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::graph::{GraphData, GraphNode, LinkRelation};

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Theme;

/// Display data attached to each simulated node.
#[derive(Clone, Debug)]
pub struct NodeVisual {
	/// The domain entity, handed back through the click callback.
	pub node: GraphNode,
	/// Pre-resolved CSS fill color.
	pub color: String,
	/// Size multiplier (1.0 = normal).
	pub size: f64,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
///
/// A press-release on a node that never crosses the movement threshold is a
/// click, not a drag; `moved` disambiguates the two.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Minimum time (seconds) a highlight is held before it may fade out,
/// preventing flicker when the cursor skirts a hover zone.
const MIN_HOLD_TIME: f64 = 0.12;

const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;

/// Per-node hover highlight intensities with smooth transitions.
///
/// Each node carries its own intensity in [0, 1], eased exponentially
/// towards 1 while in the highlight set (hovered node + neighbors) and back
/// towards 0 once it leaves, after a short hold.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	/// Currently hovered node, if any.
	pub hovered: Option<DefaultNodeIdx>,
	target: HashSet<DefaultNodeIdx>,
	intensity: HashMap<DefaultNodeIdx, f64>,
	hold: HashMap<DefaultNodeIdx, f64>,
	cached_max: f64,
}

impl HighlightState {
	/// Update the hovered node and recompute the highlight set.
	pub fn set_hover(
		&mut self,
		node: Option<DefaultNodeIdx>,
		edges: &[(DefaultNodeIdx, DefaultNodeIdx, LinkRelation)],
	) {
		if self.hovered == node {
			return;
		}

		self.hovered = node;
		self.target.clear();

		if let Some(idx) = node {
			self.target.insert(idx);
			for &(src, tgt, _) in edges {
				if src == idx {
					self.target.insert(tgt);
				} else if tgt == idx {
					self.target.insert(src);
				}
			}
			for &idx in &self.target {
				self.hold.insert(idx, MIN_HOLD_TIME);
			}
		}
	}

	/// Ease all intensities towards their targets.
	pub fn tick(&mut self, dt: f64) {
		let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.target {
			let intensity = self.intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in;
		}

		self.hold.retain(|idx, timer| {
			if self.target.contains(idx) {
				true
			} else {
				*timer -= dt;
				*timer > 0.0
			}
		});

		let mut new_max: f64 = 0.0;
		self.intensity.retain(|idx, intensity| {
			if self.target.contains(idx) {
				new_max = new_max.max(*intensity);
				true
			} else {
				if self.hold.get(idx).copied().unwrap_or(0.0) <= 0.0 {
					*intensity *= fade_out;
				}
				new_max = new_max.max(*intensity);
				*intensity > 0.005
			}
		});
		self.cached_max = new_max;
	}

	/// Smoothed highlight intensity for one node.
	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Edge intensity as the geometric mean of its endpoints, which tracks
	/// node transitions without lagging behind them.
	pub fn edge_intensity(&self, a: DefaultNodeIdx, b: DefaultNodeIdx) -> f64 {
		(self.node_intensity(a) * self.node_intensity(b)).sqrt()
	}

	/// Maximum intensity of any node, used to dim everything else.
	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}
}

/// Seconds after (re)build before the view auto-fits to the settled layout.
const FIT_DELAY: f64 = 0.9;

const FIT_PADDING: f64 = 48.0;

/// Core graph state: physics simulation plus interaction tracking.
///
/// Created when the component mounts and replaced whenever the data signal
/// changes; the animation loop mutates it every frame.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeVisual, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx, LinkRelation)>,
	fit_countdown: f64,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, theme: &Theme) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		// Connection counts drive node size so hubs read as hubs.
		let mut edge_counts: HashMap<&String, usize> = HashMap::new();
		for link in &data.links {
			*edge_counts.entry(&link.source).or_insert(0) += 1;
			*edge_counts.entry(&link.target).or_insert(0) += 1;
		}
		let max_edges = edge_counts.values().copied().max().unwrap_or(1).max(1);

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len().max(1) as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);

			let connections = edge_counts.get(&node.id).copied().unwrap_or(0);
			let edge_factor = (connections as f64 / max_edges as f64).sqrt();
			// The focal entity is always first in builder output.
			let size = if i == 0 {
				1.5
			} else {
				0.9 + 0.4 * edge_factor
			};

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeVisual {
					node: node.clone(),
					color: theme.node_color(&node.kind).to_css(),
					size,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt, link.relation));
			}
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			width,
			height,
			flow_time: 0.0,
			fit_countdown: FIT_DELAY,
		}
	}

	/// Edges with their relation, in builder order.
	pub fn edges(&self) -> &[(DefaultNodeIdx, DefaultNodeIdx, LinkRelation)] {
		&self.edges
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit = scale.hit_radius * node.data.user_data.size;
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	/// The domain entity behind a simulation node.
	pub fn domain_node(&self, idx: DefaultNodeIdx) -> Option<GraphNode> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.node.clone());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node, &self.edges);
	}

	/// Advance simulation, highlight transitions, and the auto-fit timer.
	pub fn tick(&mut self, dt: f64) {
		self.graph.update(dt as f32);
		self.flow_time += dt;
		self.highlight.tick(dt);

		if self.fit_countdown > 0.0 {
			self.fit_countdown -= dt;
			if self.fit_countdown <= 0.0 {
				self.fit_to_view();
			}
		}
	}

	/// Center and zoom the view so every node is visible.
	pub fn fit_to_view(&mut self) {
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		let mut count = 0usize;
		self.graph.visit_nodes(|node| {
			min_x = min_x.min(node.x() as f64);
			min_y = min_y.min(node.y() as f64);
			max_x = max_x.max(node.x() as f64);
			max_y = max_y.max(node.y() as f64);
			count += 1;
		});
		if count == 0 {
			return;
		}

		let span_x = (max_x - min_x) + FIT_PADDING * 2.0;
		let span_y = (max_y - min_y) + FIT_PADDING * 2.0;
		let k = (self.width / span_x)
			.min(self.height / span_y)
			.clamp(0.1, 2.5);

		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.transform.k = k;
		self.transform.x = self.width / 2.0 - cx * k;
		self.transform.y = self.height / 2.0 - cy * k;
	}
}
