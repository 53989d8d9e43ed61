//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas and wires up mouse/wheel handlers
//! for node dragging, panning, zooming, hover, and click-to-navigate. An
//! animation loop runs via `requestAnimationFrame`, advancing the physics
//! simulation and rendering each frame. When the `data` signal changes, the
//! simulation state is rebuilt in place and the view re-fits automatically.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use crate::graph::{GraphData, GraphNode};

use super::render;
use super::scale::ScaleConfig;
use super::state::ForceGraphState;
use super::theme::Theme;

/// Bundles simulation state with visual configuration.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
}

/// Pixels of mouse travel before a press counts as a drag instead of a click.
const CLICK_SLOP: f64 = 3.0;

/// Renders an interactive pub/sub graph on a canvas element.
///
/// Pass graph data via the reactive `data` signal; the simulation rebuilds
/// whenever it changes. `on_node_click` receives the domain entity behind a
/// clicked node. The component sizes itself to its parent's width.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional, into)] on_node_click: Option<Callback<GraphNode>>,
	#[prop(default = 360.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let hovered: RwSignal<Option<GraphNode>> = RwSignal::new(None);
	let cursor: RwSignal<(f64, f64)> = RwSignal::new((0.0, 0.0));

	// Legend lists only the kinds present in the current graph.
	let legend = Memo::new(move |_| {
		let theme = Theme::default();
		let mut entries: Vec<(&'static str, String)> = Vec::new();
		for node in &data.get().nodes {
			let label = node.kind.label();
			if !entries.iter().any(|(l, _)| *l == label) {
				entries.push((label, theme.node_color(&node.kind).to_css()));
			}
		}
		entries
	});

	let (context_init, animate_init) = (context.clone(), animate.clone());
	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		// Data changes swap the simulation state in place; canvas, 2d
		// context, and animation loop are wired up exactly once.
		if let Some(ref mut c) = *context_init.borrow_mut() {
			let (w, h) = (c.state.width, c.state.height);
			c.state = ForceGraphState::new(&graph, w, h, &c.theme);
			return;
		}

		let width = canvas
			.parent_element()
			.map(|p| p.client_width() as f64)
			.unwrap_or(800.0);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let theme = Theme::default();
		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(&graph, width, height, &theme),
			scale: ScaleConfig::default(),
			theme,
		});

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(0.016);
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = web_sys::window()
				.unwrap()
				.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(idx) = c.state.node_at_position(x, y, &c.scale) {
				c.state.drag.active = true;
				c.state.drag.moved = false;
				c.state.drag.node_idx = Some(idx);
				c.state.drag.start_x = x;
				c.state.drag.start_y = y;
				c.state.graph.visit_nodes(|node| {
					if node.index() == idx {
						c.state.drag.node_start_x = node.x();
						c.state.drag.node_start_y = node.y();
					}
				});
			} else {
				c.state.pan.active = true;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if !c.state.drag.active && !c.state.pan.active {
				let hit = c.state.node_at_position(x, y, &c.scale);
				c.state.set_hover(hit);
				hovered.set(hit.and_then(|idx| c.state.domain_node(idx)));
				cursor.set((x, y));
			}

			if c.state.drag.active {
				if let Some(idx) = c.state.drag.node_idx {
					let (dx, dy) = (x - c.state.drag.start_x, y - c.state.drag.start_y);
					if dx.abs() > CLICK_SLOP || dy.abs() > CLICK_SLOP {
						c.state.drag.moved = true;
					}
					if c.state.drag.moved {
						let (nx, ny) = (
							c.state.drag.node_start_x + (dx / c.state.transform.k) as f32,
							c.state.drag.node_start_y + (dy / c.state.transform.k) as f32,
						);
						c.state.graph.visit_nodes_mut(|node| {
							if node.index() == idx {
								node.data.x = nx;
								node.data.y = ny;
								node.data.is_anchor = true;
							}
						});
					}
				}
			} else if c.state.pan.active {
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if c.state.drag.active {
				if let Some(idx) = c.state.drag.node_idx {
					if c.state.drag.moved {
						c.state.graph.visit_nodes_mut(|node| {
							if node.index() == idx {
								node.data.is_anchor = true;
							}
						});
					} else if let Some(callback) = on_node_click {
						if let Some(node) = c.state.domain_node(idx) {
							callback.run(node);
						}
					}
				}
			}
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.pan.active = false;
			c.state.set_hover(None);
		}
		hovered.set(None);
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.state.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / c.state.transform.k;
			c.state.transform.x = x - (x - c.state.transform.x) * ratio;
			c.state.transform.y = y - (y - c.state.transform.y) * ratio;
			c.state.transform.k = new_k;
		}
	};

	view! {
		<div class="force-graph" style="position: relative; width: 100%;">
			<canvas
				node_ref=canvas_ref
				class="force-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="graph-legend">
				{move || {
					legend
						.get()
						.into_iter()
						.map(|(label, color)| {
							view! {
								<div class="legend-entry">
									<span class="legend-swatch" style:background-color=color></span>
									<span>{label}</span>
								</div>
							}
						})
						.collect_view()
				}}
			</div>
			{move || {
				hovered.get().map(|node| {
					let (x, y) = cursor.get();
					let style = format!(
						"position: absolute; left: {}px; top: {}px; pointer-events: none;",
						x + 10.0,
						y + 10.0,
					);
					view! {
						<div class="graph-tooltip" style=style>
							<div class="tooltip-name">{node.kind.display_name().to_string()}</div>
							<div class="tooltip-kind">{node.kind.label()}</div>
							{node.is_recent.then(|| view! { <div class="tooltip-recent">"Previously visited"</div> })}
						</div>
					}
				})
			}}
		</div>
	}
}
