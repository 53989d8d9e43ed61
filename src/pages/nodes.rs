//! Node inspection page: searchable node list, pub/sub/service detail, and
//! the node-centric graph.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};
use log::debug;

use crate::api::{self, NodeDetail, NodeSummary, ServiceEndpoint, TopicEndpoint};
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::search_bar::SearchBar;
use crate::graph::{self, GraphData, GraphNode, NodeKind, qualified_name, split_qualified};
use crate::journey::{JourneyKind, JourneyStore};

/// Lists every node and shows the selected node's detail panel. Selection
/// comes from the list or from a `?node=` query parameter (graph and
/// history clicks navigate here with one).
#[component]
pub fn NodesPage() -> impl IntoView {
	let journey = expect_context::<RwSignal<JourneyStore>>();
	let query = use_query_map();
	let navigate = use_navigate();

	let nodes = RwSignal::new(Vec::<NodeSummary>::new());
	let loading_nodes = RwSignal::new(true);
	let error_nodes = RwSignal::new(None::<String>);
	let search = RwSignal::new(String::new());

	let selected = RwSignal::new(None::<NodeSummary>);
	let detail = RwSignal::new(None::<NodeDetail>);
	let loading_detail = RwSignal::new(false);
	let error_detail = RwSignal::new(None::<String>);
	// Monotonic request token: a response is applied only while it is still
	// the latest, so a slow stale fetch cannot overwrite a newer selection.
	let generation = StoredValue::new(0u64);

	spawn_local(async move {
		match api::fetch_nodes().await {
			Ok(list) => {
				debug!("rosview: loaded {} nodes", list.len());
				nodes.set(list);
			}
			Err(e) => error_nodes.set(Some(e.to_string())),
		}
		loading_nodes.set(false);
	});

	// A `?node=` query parameter drives selection.
	Effect::new(move |_| {
		if let Some(qualified) = query.get().get("node") {
			let (namespace, name) = split_qualified(&qualified);
			let summary = NodeSummary { name, namespace };
			if selected.with(|s| s.as_ref() != Some(&summary)) {
				selected.set(Some(summary));
			}
		}
	});

	// Detail fetch tracks the selection.
	Effect::new(move |_| {
		let Some(node) = selected.get() else {
			detail.set(None);
			return;
		};
		let token = generation.with_value(|g| g + 1);
		generation.set_value(token);
		loading_detail.set(true);
		error_detail.set(None);

		spawn_local(async move {
			let result = api::fetch_node_detail(&qualified_name(&node.namespace, &node.name)).await;
			if generation.get_value() != token {
				// Superseded by a newer selection; drop the response.
				return;
			}
			match result {
				Ok(info) => {
					journey.update(|j| j.add(JourneyKind::Node, &node.name, &node.namespace));
					detail.set(Some(info));
				}
				Err(e) => error_detail.set(Some(e.to_string())),
			}
			loading_detail.set(false);
		});
	});

	let graph = Memo::new(move |_| {
		detail.get().map(|info| {
			graph::from_node(&info).map(|mut g| {
				journey.with(|j| graph::annotate_recent(&mut g, j));
				g
			})
		})
	});
	let graph_data = Signal::derive(move || match graph.get() {
		Some(Ok(g)) => g,
		_ => GraphData::default(),
	});
	let build_error = move || match graph.get() {
		Some(Err(e)) => Some(e.to_string()),
		_ => None,
	};

	// Clicking a topic in the node-centric graph navigates to its detail.
	let on_graph_click = Callback::new(move |node: GraphNode| {
		if let NodeKind::Topic { name } = node.kind {
			navigate(
				&format!("/topics?topic={}", api::encode_segment(&name)),
				NavigateOptions::default(),
			);
		}
	});

	let filtered = move || {
		let q = search.get().to_lowercase();
		nodes
			.get()
			.into_iter()
			.filter(|n| {
				qualified_name(&n.namespace, &n.name)
					.to_lowercase()
					.contains(&q)
			})
			.collect::<Vec<_>>()
	};

	view! {
		<div class="page">
			<h1>"ROS 2 Nodes"</h1>

			<div class="page-columns">
				<div class="list-panel">
					<SearchBar value=search placeholder="Search nodes or namespaces..." />

					<Show when=move || loading_nodes.get()>
						<p>"Loading nodes..."</p>
					</Show>
					{move || {
						error_nodes
							.get()
							.map(|e| view! { <p class="error">"Error: " {e}</p> })
					}}
					<Show when=move || !loading_nodes.get() && error_nodes.get().is_none()>
						<Show
							when=move || !filtered().is_empty()
							fallback=|| view! { <p class="empty">"No nodes found matching your search."</p> }
						>
							<ul class="entity-list">
								{move || {
									filtered()
										.into_iter()
										.map(|node| {
											let summary = node.clone();
											let active = move || {
												selected.with(|s| s.as_ref() == Some(&summary))
											};
											let label_node = node.clone();
											view! {
												<li>
													<button
														class="entity-link"
														class:active=active
														on:click=move |_| selected.set(Some(label_node.clone()))
													>
														{node.name.clone()}
													</button>
													" "
													<span class="entity-namespace">"(" {node.namespace.clone()} ")"</span>
												</li>
											}
										})
										.collect_view()
								}}
							</ul>
						</Show>
					</Show>
				</div>

				<div class="detail-panel">
					{move || {
						selected.get().map(|node| {
							view! {
								<section class="detail-card">
									<h2>
										"Node Info: " {node.name.clone()}
										<span class="entity-namespace">" (" {node.namespace.clone()} ")"</span>
									</h2>

									<Show when=move || loading_detail.get()>
										<p>"Loading info..."</p>
									</Show>
									{move || {
										error_detail
											.get()
											.map(|e| view! { <p class="error">"Error: " {e}</p> })
									}}
									{move || {
										build_error()
											.map(|e| view! { <p class="error">"Error: " {e}</p> })
									}}

									<Show when=move || matches!(graph.get(), Some(Ok(_)))>
										<ForceGraphCanvas
											data=graph_data
											on_node_click=on_graph_click
											height=240.0
										/>
									</Show>

									{move || {
										detail.get().map(|info| {
											view! {
												<TopicEndpointList title="Publishes:" entries=info.publishes.clone() />
												<TopicEndpointList title="Subscribes:" entries=info.subscribes.clone() />
												<ServiceEndpointList title="Services:" entries=info.services.clone() />
												<ServiceEndpointList title="Clients:" entries=info.clients.clone() />
											}
										})
									}}
								</section>
							}
						})
					}}
				</div>
			</div>
		</div>
	}
}

#[component]
fn TopicEndpointList(title: &'static str, entries: Vec<TopicEndpoint>) -> impl IntoView {
	view! {
		<div class="endpoint-group">
			<h3>{title}</h3>
			{entries.is_empty().then(|| view! { <p>"None"</p> })}
			<ul class="endpoint-list">
				{entries
					.into_iter()
					.map(|e| {
						view! { <li>{e.topic} " \u{2014} " {e.types.join(", ")}</li> }
					})
					.collect_view()}
			</ul>
		</div>
	}
}

#[component]
fn ServiceEndpointList(title: &'static str, entries: Vec<ServiceEndpoint>) -> impl IntoView {
	view! {
		<div class="endpoint-group">
			<h3>{title}</h3>
			{entries.is_empty().then(|| view! { <p>"None"</p> })}
			<ul class="endpoint-list">
				{entries
					.into_iter()
					.map(|e| {
						view! { <li>{e.service} " \u{2014} " {e.types.join(", ")}</li> }
					})
					.collect_view()}
			</ul>
		</div>
	}
}
