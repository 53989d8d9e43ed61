//! rosview: browser-based inspector for a running ROS 2 graph.
//!
//! This crate is a CSR WASM application that fetches node and topic
//! information from a REST backend and renders it as interactive
//! force-directed graphs, with a persistent history of visited entities.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod graph;
pub mod journey;
pub mod pages;

use components::navigation::Navigation;
use journey::{JourneyStore, LocalStorageBackend};
use pages::{HomePage, NodesPage, NotFound, TopicsPage};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("rosview: logging initialized");
}

/// Root application component: provides the journey store and wires up
/// routing for the inspection pages.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let journey = RwSignal::new(JourneyStore::new(Box::new(LocalStorageBackend)));
	provide_context(journey);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="ROS 2 Graph Inspector" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Navigation />
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=HomePage />
					<Route path=path!("/nodes") view=NodesPage />
					<Route path=path!("/topics") view=TopicsPage />
				</Routes>
			</main>
		</Router>
	}
}
