//! Typed client for the graph introspection REST API.
//!
//! The backend walks the live middleware graph and exposes it as JSON; this
//! module owns the payload shapes and the fetch plumbing. All errors are
//! recoverable and scoped to the panel that issued the request.

use gloo_net::http::Request;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A fetch that did not produce a usable payload.
#[derive(Debug, Error)]
pub enum ApiError {
	/// Network failure or undecodable response body.
	#[error("request failed: {0}")]
	Transport(#[from] gloo_net::Error),
	/// The backend answered with a non-2xx status.
	#[error("HTTP {0}")]
	Status(u16),
}

/// One entry of `GET /nodes`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NodeSummary {
	/// Bare node name.
	pub name: String,
	/// Node namespace, `/` for the root.
	pub namespace: String,
}

/// A topic a node publishes or subscribes, as listed in its detail payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TopicEndpoint {
	/// Fully qualified topic name.
	pub topic: String,
	/// Message types seen on the topic.
	#[serde(default)]
	pub types: Vec<String>,
}

/// A service a node offers or calls.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ServiceEndpoint {
	/// Fully qualified service name.
	pub service: String,
	/// Service types.
	#[serde(default)]
	pub types: Vec<String>,
}

/// Response of `GET /nodes/{name}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NodeDetail {
	/// Bare node name.
	pub node: String,
	/// Node namespace, `/` for the root.
	pub namespace: String,
	/// Topics this node publishes.
	#[serde(default)]
	pub publishes: Vec<TopicEndpoint>,
	/// Topics this node subscribes to.
	#[serde(default)]
	pub subscribes: Vec<TopicEndpoint>,
	/// Services this node offers.
	#[serde(default)]
	pub services: Vec<ServiceEndpoint>,
	/// Service clients this node holds.
	#[serde(default)]
	pub clients: Vec<ServiceEndpoint>,
}

/// One entry of `GET /topics`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TopicSummary {
	/// Fully qualified topic name.
	pub name: String,
	/// Message types seen on the topic.
	#[serde(default)]
	pub types: Vec<String>,
	/// Percent-encoded name, usable directly in a request path.
	pub encoded_name: String,
}

/// A node endpoint of a topic, in either role.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TopicPeer {
	/// Bare node name.
	pub node_name: String,
	/// Node namespace, `/` for the root.
	pub node_namespace: String,
	/// Message type this endpoint uses.
	#[serde(default)]
	pub topic_type: String,
}

/// Response of `GET /topics/{encoded_name}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TopicDetail {
	/// Fully qualified topic name.
	pub topic: String,
	/// Percent-encoded form of `topic`.
	pub encoded_topic: String,
	/// Nodes publishing on this topic.
	#[serde(default)]
	pub publishers: Vec<TopicPeer>,
	/// Nodes subscribed to this topic.
	#[serde(default)]
	pub subscribers: Vec<TopicPeer>,
}

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Backend base URL. Overridable via a `data-api-base` attribute on the
/// document body so deployments can point at a remote backend without a
/// rebuild.
pub fn base_url() -> String {
	web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.body())
		.and_then(|b| b.get_attribute("data-api-base"))
		.unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Percent-encodes a path segment (topic or qualified node name).
pub fn encode_segment(raw: &str) -> String {
	js_sys::encode_uri_component(raw).into()
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
	let url = format!("{}{}", base_url(), path);
	let response = Request::get(&url).send().await?;
	if !response.ok() {
		return Err(ApiError::Status(response.status()));
	}
	Ok(response.json().await?)
}

/// `GET /nodes`: every node currently present in the graph.
pub async fn fetch_nodes() -> Result<Vec<NodeSummary>, ApiError> {
	get_json("/nodes").await
}

/// `GET /nodes/{name}`: pub/sub/service detail for one node.
/// `qualified` is the `namespace/name` form ([`crate::graph::qualified_name`]).
pub async fn fetch_node_detail(qualified: &str) -> Result<NodeDetail, ApiError> {
	get_json(&format!("/nodes/{}", encode_segment(qualified))).await
}

/// `GET /topics`: every topic currently present in the graph.
pub async fn fetch_topics() -> Result<Vec<TopicSummary>, ApiError> {
	get_json("/topics").await
}

/// `GET /topics/{encoded_name}`: publisher/subscriber detail for one topic.
/// `encoded_name` must already be percent-encoded (the list payload carries
/// it in that form).
pub async fn fetch_topic_detail(encoded_name: &str) -> Result<TopicDetail, ApiError> {
	get_json(&format!("/topics/{encoded_name}")).await
}
