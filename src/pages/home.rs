//! Landing page: entry cards for the two inspection views plus the
//! navigation history panel.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::journey_history::JourneyHistory;

/// Entry cards for the two inspection views, followed by the journey panel.
#[component]
pub fn HomePage() -> impl IntoView {
	view! {
		<div class="page home">
			<h1>"ROS 2 Graph Inspector"</h1>
			<p class="subtitle">"Explore the nodes and topics of a running ROS 2 system."</p>

			<div class="home-cards">
				<A href="/nodes" attr:class="home-card">
					<h2>"Nodes"</h2>
					<p>"Browse running nodes and the topics they publish and subscribe to."</p>
				</A>
				<A href="/topics" attr:class="home-card">
					<h2>"Topics"</h2>
					<p>"Browse active topics and the nodes on each side of them."</p>
				</A>
			</div>

			<JourneyHistory />
		</div>
	}
}
