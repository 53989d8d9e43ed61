//! Zoom-dependent sizing for graph visuals.
//!
//! The canvas transform scales everything by the zoom factor `k`, so
//! elements that should keep a constant pixel size divide by `k`, while
//! world-space elements pass through. [`ScaledValues`] is computed once per
//! frame and handed to the renderer.

/// How a visual size reacts to the zoom factor.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for a base size at zoom `k`, ready to use after the
	/// canvas transform has been applied.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Tunables for all zoom-dependent visuals.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Base node radius in world units.
	pub node_radius: f64,
	/// How the node radius scales with zoom.
	pub node_behavior: ScaleBehavior,
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Below this zoom level labels are culled entirely.
	pub label_min_k: f64,
	/// Edge line width in screen pixels.
	pub edge_width: f64,
	/// Dash pattern (dash, gap) in world units.
	pub dash_pattern: (f64, f64),
	/// Flow animation speed in world units per second.
	pub flow_speed: f64,
	/// Zoom range over which the dash pattern fades to a solid line:
	/// fully solid at the first value, fully dashed at the second.
	pub dash_fade: (f64, f64),
	/// Arrowhead size in world units.
	pub arrow_size: f64,
	/// Arrowheads never exceed this screen size.
	pub arrow_max_screen: f64,
	/// Arrows fade with zoom; below this alpha they are skipped.
	pub arrow_cull_alpha: f64,
	/// Hover/recency ring stroke width in screen pixels.
	pub ring_width: f64,
	/// Ring offset from the node edge in screen pixels.
	pub ring_offset: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 5.0,
			node_behavior: ScaleBehavior::Clamped {
				min_screen: 5.0,
				max_screen: f64::INFINITY,
			},
			hit_radius: 12.0,
			label_size: 11.0,
			label_min_k: 0.5,
			edge_width: 1.5,
			dash_pattern: (8.0, 4.0),
			flow_speed: 12.0,
			dash_fade: (0.4, 0.9),
			arrow_size: 5.0,
			arrow_max_screen: 18.0,
			arrow_cull_alpha: 0.05,
			ring_width: 1.5,
			ring_offset: 2.0,
		}
	}
}

/// Pre-computed world-space sizes for one frame at zoom `k`.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom factor.
	pub k: f64,
	/// Node radius in world units.
	pub node_radius: f64,
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	/// Canvas font string, or `None` when labels are culled at this zoom.
	pub label_font: Option<String>,
	/// Label font size in world units.
	pub label_size: f64,
	/// Edge line width in world units.
	pub edge_width: f64,
	/// Dash pattern in world units.
	pub dash_pattern: (f64, f64),
	/// Dash visibility in [0, 1]; at 0 edges are drawn solid.
	pub dash_alpha: f64,
	/// Arrowhead size in world units.
	pub arrow_size: f64,
	/// Arrow opacity at this zoom.
	pub arrow_alpha: f64,
	/// Whether arrows should be skipped entirely.
	pub cull_arrows: bool,
	/// Ring stroke width in world units.
	pub ring_width: f64,
	/// Ring offset from the node edge in world units.
	pub ring_offset: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_size = config.label_size / k;
		let label_font = (k >= config.label_min_k).then(|| format!("{label_size}px sans-serif"));
		let (solid_k, dashed_k) = config.dash_fade;
		let dash_alpha = ((k - solid_k) / (dashed_k - solid_k)).clamp(0.0, 1.0);
		let arrow_alpha = k.clamp(0.0, 1.0);

		Self {
			k,
			node_radius: config.node_behavior.apply(config.node_radius, k),
			hit_radius: config.node_behavior.apply(config.hit_radius, k),
			label_font,
			label_size,
			edge_width: config.edge_width / k,
			dash_pattern: config.dash_pattern,
			dash_alpha,
			arrow_size: ScaleBehavior::Clamped {
				min_screen: 0.0,
				max_screen: config.arrow_max_screen,
			}
			.apply(config.arrow_size, k),
			arrow_alpha,
			cull_arrows: arrow_alpha < config.arrow_cull_alpha,
			ring_width: config.ring_width / k,
			ring_offset: config.ring_offset / k,
		}
	}

	/// Dash offset for the flow animation along edges.
	pub fn dash_offset(&self, flow_time: f64, flow_speed: f64) -> f64 {
		-flow_time * flow_speed
	}
}
