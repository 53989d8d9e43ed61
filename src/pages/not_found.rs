use leptos::prelude::*;
use leptos_router::components::A;

/// Fallback for unmatched routes.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="page not-found">
			<h1>"404"</h1>
			<p>"This page does not exist."</p>
			<A href="/">"Back to the inspector"</A>
		</div>
	}
}
