//! Text filter input shared by the list panels.

use leptos::prelude::*;

/// Controlled search input bound to `value`.
#[component]
pub fn SearchBar(
	/// Signal holding the current query text.
	value: RwSignal<String>,
	#[prop(into, default = "Search...".to_string())] placeholder: String,
) -> impl IntoView {
	view! {
		<input
			type="text"
			class="search-bar"
			placeholder=placeholder
			prop:value=move || value.get()
			on:input=move |ev| value.set(event_target_value(&ev))
		/>
	}
}
