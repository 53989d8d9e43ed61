//! Top navigation bar.

use leptos::prelude::*;
use leptos_router::components::A;

/// Links to the two inspection pages. The router marks the active link with
/// `aria-current` for styling.
#[component]
pub fn Navigation() -> impl IntoView {
	view! {
		<nav class="top-nav">
			<A href="/topics">"Topics"</A>
			<A href="/nodes">"Nodes"</A>
		</nav>
	}
}
