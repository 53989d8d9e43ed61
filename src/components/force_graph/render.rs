//! Canvas rendering for the graph view.
//!
//! Draw order: background, edges (dimmed pass under highlight), arrowheads,
//! then nodes in two passes so highlighted nodes sit on top, with recency
//! rings, hover rings, and labels.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, NodeVisual};
use super::theme::Theme;

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	// Endpoint positions and sizes, collected once per frame.
	let mut layout: HashMap<DefaultNodeIdx, (f64, f64, f64)> = HashMap::new();
	state.graph.visit_nodes(|node| {
		layout.insert(
			node.index(),
			(node.x() as f64, node.y() as f64, node.data.user_data.size),
		);
	});

	draw_edges(state, ctx, config, &scale, theme, &layout);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
	layout: &HashMap<DefaultNodeIdx, (f64, f64, f64)>,
) {
	let dash_offset = scale.dash_offset(state.flow_time, config.flow_speed);
	let max_t = smooth_step(state.highlight.max_intensity());

	for &(src, tgt, relation) in state.edges() {
		let (Some(&(x1, y1, s1)), Some(&(x2, y2, s2))) = (layout.get(&src), layout.get(&tgt))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		let edge_t = smooth_step(state.highlight.edge_intensity(src, tgt));
		let (alpha, width) = if edge_t > 0.01 {
			(0.7 + 0.3 * edge_t, scale.edge_width * (1.0 + 0.4 * edge_t))
		} else if max_t > 0.01 {
			(0.7 - 0.5 * max_t, scale.edge_width * (1.0 - 0.3 * max_t))
		} else {
			(0.7, scale.edge_width)
		};
		// Compensate for the dash pattern fading to solid.
		let width = width * (1.0 + 0.3 * (1.0 - scale.dash_alpha));

		let color = theme.link_color(relation);
		ctx.set_stroke_style_str(&color.with_alpha(alpha * color.a).to_css());
		ctx.set_line_width(width);

		let effective_gap = scale.dash_pattern.1 * scale.dash_alpha;
		if effective_gap > 0.1 {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(scale.dash_pattern.0),
				&JsValue::from_f64(effective_gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		let src_offset = scale.node_radius * s1;
		let tgt_offset = scale.node_radius * s2 + scale.arrow_size;
		ctx.begin_path();
		ctx.move_to(x1 + ux * src_offset, y1 + uy * src_offset);
		ctx.line_to(x2 - ux * tgt_offset, y2 - uy * tgt_offset);
		ctx.stroke();

		// Arrowhead at the target end; direction is the point of the graph.
		if !scale.cull_arrows {
			let arrow_alpha = (0.9 * scale.arrow_alpha * alpha).min(1.0);
			let _ = ctx.set_line_dash(&js_sys::Array::new());
			ctx.set_fill_style_str(&color.with_alpha(arrow_alpha * color.a).to_css());

			let tip = scale.node_radius * s2;
			let (tip_x, tip_y) = (x2 - ux * tip, y2 - uy * tip);
			let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
			let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	}

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let max_t = smooth_step(state.highlight.max_intensity());
	let has_highlight = max_t > 0.01;

	// Pass 1: nodes outside the highlight set, dimmed while anything is
	// highlighted.
	state.graph.visit_nodes(|node| {
		if state.highlight.node_intensity(node.index()) > 0.001 {
			return;
		}
		let (alpha, radius_mult) = if has_highlight {
			(1.0 - 0.6 * max_t, 1.0 - 0.15 * max_t)
		} else {
			(1.0, 1.0)
		};
		let hovered = state.highlight.hovered == Some(node.index());
		let ring_t = smooth_step(state.highlight.node_intensity(node.index()));
		draw_node(
			ctx,
			scale,
			theme,
			&node.data.user_data,
			node.x() as f64,
			node.y() as f64,
			alpha,
			radius_mult,
			hovered.then_some(ring_t),
		);
	});

	// Pass 2: highlighted and transitioning nodes on top.
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let node_t = state.highlight.node_intensity(idx);
		if node_t <= 0.001 {
			return;
		}
		let eased = smooth_step(node_t);
		let dim_alpha = if has_highlight { 1.0 - 0.6 * max_t } else { 1.0 };
		let alpha = dim_alpha + (1.0 - dim_alpha) * eased;
		let radius_mult = 1.0 + 0.25 * eased;
		let hovered = state.highlight.hovered == Some(idx);
		draw_node(
			ctx,
			scale,
			theme,
			&node.data.user_data,
			node.x() as f64,
			node.y() as f64,
			alpha,
			radius_mult,
			hovered.then_some(eased),
		);
	});
}

#[allow(clippy::too_many_arguments)]
fn draw_node(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	visual: &NodeVisual,
	x: f64,
	y: f64,
	alpha: f64,
	radius_mult: f64,
	hover_ring: Option<f64>,
) {
	let radius = scale.node_radius * radius_mult * visual.size;

	ctx.set_global_alpha(alpha);

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&visual.color);
	ctx.fill();

	// Previously visited entities carry a dashed marker ring.
	if visual.node.is_recent {
		let dash = 3.0 / scale.k;
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(dash),
		));
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + scale.ring_offset, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.recent_ring.to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	// Solid ring on the hovered node itself.
	if let Some(ring_t) = hover_ring {
		if ring_t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + scale.ring_offset * 2.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&theme.hover_ring.with_alpha(0.8 * ring_t).to_css());
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}
	}

	if let Some(font) = &scale.label_font {
		let label = visual.node.kind.display_name();
		ctx.set_font(font);
		let text_width = ctx
			.measure_text(label)
			.map(|m| m.width())
			.unwrap_or_default();
		let pad = scale.label_size * 0.2;
		let box_y = y + radius + scale.ring_offset + pad;

		ctx.set_fill_style_str(&theme.label_background.to_css());
		ctx.fill_rect(
			x - text_width / 2.0 - pad,
			box_y,
			text_width + pad * 2.0,
			scale.label_size + pad * 2.0,
		);

		ctx.set_text_align("center");
		ctx.set_text_baseline("top");
		ctx.set_fill_style_str(&theme.label.to_css());
		let _ = ctx.fill_text(label, x, box_y + pad);
	}

	ctx.set_global_alpha(1.0);
}
