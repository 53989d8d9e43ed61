//! Panel listing recently visited nodes and topics.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::JsValue;

use crate::api::encode_segment;
use crate::graph::qualified_name;
use crate::journey::{JourneyKind, JourneyRecord, JourneyStore};

fn format_time(ms: f64) -> String {
	js_sys::Date::new(&JsValue::from_f64(ms))
		.to_locale_time_string("en-US")
		.into()
}

/// Route back to the detail view a record points at.
fn record_href(record: &JourneyRecord) -> String {
	match record.kind {
		JourneyKind::Node => format!(
			"/nodes?node={}",
			encode_segment(&qualified_name(&record.namespace, &record.name))
		),
		JourneyKind::Topic => format!("/topics?topic={}", encode_segment(&record.name)),
	}
}

/// Ordered list of visits with per-entry removal, clear-all, and
/// click-to-navigate back to the visited entity.
#[component]
pub fn JourneyHistory() -> impl IntoView {
	let journey = expect_context::<RwSignal<JourneyStore>>();
	let navigate = use_navigate();

	let records = move || journey.with(|j| j.records().to_vec());

	view! {
		<div class="journey-history">
			<div class="journey-header">
				<h3>"Navigation History"</h3>
				<Show when=move || journey.with(|j| !j.is_empty())>
					<button
						class="journey-clear"
						on:click=move |_| journey.update(|j| j.clear())
					>
						"Clear History"
					</button>
				</Show>
			</div>

			<Show
				when=move || journey.with(|j| !j.is_empty())
				fallback=|| view! { <p class="journey-empty">"No navigation history yet"</p> }
			>
				<ul class="journey-list">
					{
						let navigate = navigate.clone();
						move || {
							let navigate = navigate.clone();
							records()
								.into_iter()
								.enumerate()
								.map(|(index, record)| {
									let navigate = navigate.clone();
									let href = record_href(&record);
									let kind_class = match record.kind {
										JourneyKind::Node => "journey-node",
										JourneyKind::Topic => "journey-topic",
									};
									view! {
										<li class="journey-entry">
											<button
												class=format!("journey-link {kind_class}")
												on:click=move |_| navigate(&href, NavigateOptions::default())
											>
												<span class="journey-name">{record.name.clone()}</span>
												<span class="journey-time">{format_time(record.visited_at)}</span>
											</button>
											<button
												class="journey-remove"
												on:click=move |_| journey.update(|j| j.remove_at(index))
											>
												"\u{00d7}"
											</button>
										</li>
									}
								})
								.collect_view()
						}
					}
				</ul>
			</Show>
		</div>
	}
}
