//! Journey history: a capped, ordered log of visited nodes and topics.
//!
//! Every successful navigation to a detail view appends a record. The log
//! feeds the history panel and the graph annotation step that marks
//! previously visited entities. Visiting the same entity twice appends two
//! records; the log is a timeline, not a set.

use log::warn;
use serde::{Deserialize, Serialize};

/// Oldest records are evicted once the log grows past this many entries.
pub const MAX_RECORDS: usize = 50;

const STORAGE_KEY: &str = "rosview-journey";

/// Which kind of entity a journey record points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyKind {
	/// A middleware node, identified by name + namespace.
	Node,
	/// A topic, identified by name alone.
	Topic,
}

/// One visit to a node or topic detail view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JourneyRecord {
	/// Entity kind.
	pub kind: JourneyKind,
	/// Bare node name, or fully qualified topic name.
	pub name: String,
	/// Node namespace; topics have no namespace and use the root `/`.
	pub namespace: String,
	/// Milliseconds since the Unix epoch at visit time.
	pub visited_at: f64,
}

/// Persistence strategy for the journey log: restored wholesale at startup,
/// overwritten wholesale on every mutation.
pub trait JourneyBackend {
	/// Load the persisted record list, empty if nothing was stored.
	fn load(&self) -> Vec<JourneyRecord>;
	/// Persist the full record list.
	fn save(&self, records: &[JourneyRecord]);
}

/// Backend that persists nothing. Used in tests and as a fallback when the
/// browser exposes no storage.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryBackend;

impl JourneyBackend for MemoryBackend {
	fn load(&self) -> Vec<JourneyRecord> {
		Vec::new()
	}

	fn save(&self, _records: &[JourneyRecord]) {}
}

/// Backend storing the log as one JSON blob in browser localStorage.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
	fn storage() -> Option<web_sys::Storage> {
		web_sys::window().and_then(|w| w.local_storage().ok().flatten())
	}
}

impl JourneyBackend for LocalStorageBackend {
	fn load(&self) -> Vec<JourneyRecord> {
		let Some(storage) = Self::storage() else {
			return Vec::new();
		};
		let Ok(Some(blob)) = storage.get_item(STORAGE_KEY) else {
			return Vec::new();
		};
		match serde_json::from_str(&blob) {
			Ok(records) => records,
			Err(e) => {
				warn!("rosview: discarding unreadable journey blob: {e}");
				Vec::new()
			}
		}
	}

	fn save(&self, records: &[JourneyRecord]) {
		let Some(storage) = Self::storage() else {
			return;
		};
		match serde_json::to_string(records) {
			Ok(blob) => {
				if storage.set_item(STORAGE_KEY, &blob).is_err() {
					warn!("rosview: journey persistence write failed");
				}
			}
			Err(e) => warn!("rosview: journey serialization failed: {e}"),
		}
	}
}

/// Ordered log of visits, oldest first, capped at [`MAX_RECORDS`].
///
/// Owned explicitly and handed to consumers (history panel, graph
/// annotation) through Leptos context rather than living as ambient global
/// state. Single-threaded mutation only; every change is written through to
/// the backend before the call returns.
pub struct JourneyStore {
	records: Vec<JourneyRecord>,
	backend: Box<dyn JourneyBackend + Send + Sync>,
}

impl JourneyStore {
	/// Restores the log from `backend`, trimming anything beyond the cap.
	pub fn new(backend: Box<dyn JourneyBackend + Send + Sync>) -> Self {
		let mut records = backend.load();
		if records.len() > MAX_RECORDS {
			records.drain(..records.len() - MAX_RECORDS);
		}
		Self { records, backend }
	}

	/// An empty store with no persistence.
	pub fn in_memory() -> Self {
		Self::new(Box::new(MemoryBackend))
	}

	/// Records in insertion order, oldest first.
	pub fn records(&self) -> &[JourneyRecord] {
		&self.records
	}

	/// True when no visit has been recorded.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Appends a visit stamped with the current time, evicting from the
	/// front if the log would exceed the cap.
	pub fn add(&mut self, kind: JourneyKind, name: &str, namespace: &str) {
		self.records.push(JourneyRecord {
			kind,
			name: name.to_string(),
			namespace: namespace.to_string(),
			visited_at: now_ms(),
		});
		if self.records.len() > MAX_RECORDS {
			self.records.drain(..self.records.len() - MAX_RECORDS);
		}
		self.backend.save(&self.records);
	}

	/// Removes the record at `index`; out-of-range indices are a no-op.
	pub fn remove_at(&mut self, index: usize) {
		if index >= self.records.len() {
			return;
		}
		self.records.remove(index);
		self.backend.save(&self.records);
	}

	/// Drops every record.
	pub fn clear(&mut self) {
		self.records.clear();
		self.backend.save(&self.records);
	}

	/// True if any record matches. Topic records compare kind + name only;
	/// node records compare all three fields.
	pub fn contains(&self, kind: JourneyKind, name: &str, namespace: &str) -> bool {
		self.records.iter().any(|r| {
			r.kind == kind
				&& r.name == name
				&& (kind == JourneyKind::Topic || r.namespace == namespace)
		})
	}
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
	js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
	use std::time::{SystemTime, UNIX_EPOCH};
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_millis() as f64)
		.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_then_contains() {
		let mut store = JourneyStore::in_memory();
		store.add(JourneyKind::Topic, "/scan", "/");
		assert!(store.contains(JourneyKind::Topic, "/scan", "/"));

		store.clear();
		assert!(!store.contains(JourneyKind::Topic, "/scan", "/"));
		assert!(store.is_empty());
	}

	#[test]
	fn topic_records_ignore_namespace() {
		let mut store = JourneyStore::in_memory();
		store.add(JourneyKind::Topic, "/scan", "/");
		assert!(store.contains(JourneyKind::Topic, "/scan", "/anything"));
	}

	#[test]
	fn node_records_compare_namespace() {
		let mut store = JourneyStore::in_memory();
		store.add(JourneyKind::Node, "driver", "/cam");
		assert!(store.contains(JourneyKind::Node, "driver", "/cam"));
		assert!(!store.contains(JourneyKind::Node, "driver", "/"));
		assert!(!store.contains(JourneyKind::Topic, "driver", "/cam"));
	}

	#[test]
	fn cap_evicts_oldest_and_keeps_relative_order() {
		let mut store = JourneyStore::in_memory();
		for i in 0..51 {
			store.add(JourneyKind::Node, &format!("n{i}"), "/");
		}
		assert_eq!(store.records().len(), MAX_RECORDS);
		assert!(!store.contains(JourneyKind::Node, "n0", "/"));
		let names: Vec<&str> = store.records().iter().map(|r| r.name.as_str()).collect();
		let expected: Vec<String> = (1..=50).map(|i| format!("n{i}")).collect();
		assert_eq!(names, expected.iter().map(String::as_str).collect::<Vec<_>>());
	}

	#[test]
	fn duplicate_visits_are_kept() {
		let mut store = JourneyStore::in_memory();
		store.add(JourneyKind::Topic, "/scan", "/");
		store.add(JourneyKind::Topic, "/scan", "/");
		assert_eq!(store.records().len(), 2);
	}

	#[test]
	fn remove_at_out_of_range_is_a_noop() {
		let mut store = JourneyStore::in_memory();
		store.add(JourneyKind::Topic, "/scan", "/");
		store.remove_at(5);
		assert_eq!(store.records().len(), 1);
	}

	#[test]
	fn remove_at_drops_matching_record() {
		let mut store = JourneyStore::in_memory();
		store.add(JourneyKind::Topic, "/scan", "/");
		store.add(JourneyKind::Node, "lidar", "/");
		store.remove_at(0);
		assert!(!store.contains(JourneyKind::Topic, "/scan", "/"));
		assert!(store.contains(JourneyKind::Node, "lidar", "/"));
	}

	#[test]
	fn restore_trims_oversized_blob() {
		struct Oversized;
		impl JourneyBackend for Oversized {
			fn load(&self) -> Vec<JourneyRecord> {
				(0..60)
					.map(|i| JourneyRecord {
						kind: JourneyKind::Node,
						name: format!("n{i}"),
						namespace: "/".to_string(),
						visited_at: i as f64,
					})
					.collect()
			}
			fn save(&self, _records: &[JourneyRecord]) {}
		}
		let store = JourneyStore::new(Box::new(Oversized));
		assert_eq!(store.records().len(), MAX_RECORDS);
		assert_eq!(store.records()[0].name, "n10");
	}
}
