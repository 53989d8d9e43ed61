//! Topic inspection page: searchable topic list, publisher/subscriber
//! detail, and the topic-centric graph.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};
use log::debug;

use crate::api::{self, TopicDetail, TopicPeer, TopicSummary};
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::search_bar::SearchBar;
use crate::graph::{self, GraphData, GraphNode, NodeKind, qualified_name};
use crate::journey::{JourneyKind, JourneyStore};

/// Identifies the selected topic: display name plus the percent-encoded
/// form used in the request path.
#[derive(Clone, Debug, PartialEq)]
struct TopicSelection {
	name: String,
	encoded: String,
}

/// Lists every topic and shows the selected topic's detail panel. Selection
/// comes from the list or from a `?topic=` query parameter.
#[component]
pub fn TopicsPage() -> impl IntoView {
	let journey = expect_context::<RwSignal<JourneyStore>>();
	let query = use_query_map();
	let navigate = use_navigate();

	let topics = RwSignal::new(Vec::<TopicSummary>::new());
	let loading_topics = RwSignal::new(true);
	let error_topics = RwSignal::new(None::<String>);
	let search = RwSignal::new(String::new());

	let selected = RwSignal::new(None::<TopicSelection>);
	let detail = RwSignal::new(None::<TopicDetail>);
	let loading_detail = RwSignal::new(false);
	let error_detail = RwSignal::new(None::<String>);
	// Monotonic request token guarding against stale responses.
	let generation = StoredValue::new(0u64);

	spawn_local(async move {
		match api::fetch_topics().await {
			Ok(list) => {
				debug!("rosview: loaded {} topics", list.len());
				topics.set(list);
			}
			Err(e) => error_topics.set(Some(e.to_string())),
		}
		loading_topics.set(false);
	});

	// A `?topic=` query parameter (plain topic name) drives selection.
	Effect::new(move |_| {
		if let Some(name) = query.get().get("topic") {
			let selection = TopicSelection {
				encoded: api::encode_segment(&name),
				name,
			};
			if selected.with(|s| s.as_ref() != Some(&selection)) {
				selected.set(Some(selection));
			}
		}
	});

	Effect::new(move |_| {
		let Some(topic) = selected.get() else {
			detail.set(None);
			return;
		};
		let token = generation.with_value(|g| g + 1);
		generation.set_value(token);
		loading_detail.set(true);
		error_detail.set(None);

		spawn_local(async move {
			let result = api::fetch_topic_detail(&topic.encoded).await;
			if generation.get_value() != token {
				// Superseded by a newer selection; drop the response.
				return;
			}
			match result {
				Ok(info) => {
					journey.update(|j| j.add(JourneyKind::Topic, &topic.name, "/"));
					detail.set(Some(info));
				}
				Err(e) => error_detail.set(Some(e.to_string())),
			}
			loading_detail.set(false);
		});
	});

	let graph = Memo::new(move |_| {
		detail.get().map(|info| {
			graph::from_topic(&info).map(|mut g| {
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

	// Clicking a publisher or subscriber navigates to that node's detail.
	let on_graph_click = Callback::new(move |node: GraphNode| {
		match node.kind {
			NodeKind::Publisher { name, namespace } | NodeKind::Subscriber { name, namespace } => {
				navigate(
					&format!(
						"/nodes?node={}",
						api::encode_segment(&qualified_name(&namespace, &name))
					),
					NavigateOptions::default(),
				);
			}
			_ => {}
		}
	});

	let filtered = move || {
		let q = search.get().to_lowercase();
		topics
			.get()
			.into_iter()
			.filter(|t| t.name.to_lowercase().contains(&q))
			.collect::<Vec<_>>()
	};

	view! {
		<div class="page">
			<h1>"ROS 2 Topics"</h1>

			<div class="page-columns">
				<div class="list-panel">
					<SearchBar value=search placeholder="Search topics..." />

					<Show when=move || loading_topics.get()>
						<p>"Loading topics..."</p>
					</Show>
					{move || {
						error_topics
							.get()
							.map(|e| view! { <p class="error">"Error: " {e}</p> })
					}}
					<Show when=move || !loading_topics.get() && error_topics.get().is_none()>
						<Show
							when=move || !filtered().is_empty()
							fallback=|| view! { <p class="empty">"No topics found matching your search."</p> }
						>
							<ul class="entity-list">
								{move || {
									filtered()
										.into_iter()
										.map(|topic| {
											let selection = TopicSelection {
												name: topic.name.clone(),
												encoded: topic.encoded_name.clone(),
											};
											let active_selection = selection.clone();
											let active = move || {
												selected.with(|s| s.as_ref() == Some(&active_selection))
											};
											view! {
												<li>
													<button
														class="entity-link"
														class:active=active
														on:click=move |_| selected.set(Some(selection.clone()))
													>
														{topic.name.clone()}
													</button>
													<span class="entity-namespace">" (" {topic.types.join(", ")} ")"</span>
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
						selected.get().map(|topic| {
							view! {
								<section class="detail-card">
									<h2>"Topic Info: " {topic.name.clone()}</h2>

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
												<TopicPeerList title="Publishers:" peers=info.publishers.clone() />
												<TopicPeerList title="Subscribers:" peers=info.subscribers.clone() />
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
fn TopicPeerList(title: &'static str, peers: Vec<TopicPeer>) -> impl IntoView {
	view! {
		<div class="endpoint-group">
			<h3>{title}</h3>
			{peers.is_empty().then(|| view! { <p>"None"</p> })}
			<ul class="endpoint-list">
				{peers
					.into_iter()
					.map(|p| {
						view! {
							<li>
								{p.node_name} " " <em>"(" {p.node_namespace} ")"</em>
								" \u{2014} " {p.topic_type}
							</li>
						}
					})
					.collect_view()}
			</ul>
		</div>
	}
}
