use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

/// Result of a cache refresh. A failed fetch keeps serving the last good
/// value; the error rides along as a non-blocking notice.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Fresh(T),
    Stale { value: T, error: anyhow::Error },
    Failed(anyhow::Error),
}

struct EntryState<T> {
    value: Option<T>,
    version: u64,
}

struct Entry<T> {
    /// Serializes fetches so at most one is in flight per key.
    gate: tokio::sync::Mutex<()>,
    state: Mutex<EntryState<T>>,
}

/// Response cache keyed by request identity. Concurrent refreshes of the
/// same key coalesce: whoever wins the gate fetches, everyone queued behind
/// reuses the fresh value.
pub struct ResponseCache<T> {
    entries: Mutex<HashMap<String, Arc<Entry<T>>>>,
}

impl<T: Clone> ResponseCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entry(&self, key: &str) -> Arc<Entry<T>> {
        let mut entries = self.entries.lock();
        entries
            .entry(key.to_string())
            .or_insert_with(|| {
                Arc::new(Entry {
                    gate: tokio::sync::Mutex::new(()),
                    state: Mutex::new(EntryState {
                        value: None,
                        version: 0,
                    }),
                })
            })
            .clone()
    }

    /// Last cached value for a key, if any. Reads never allocate an entry.
    pub fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.lock();
        let entry = entries.get(key)?.clone();
        drop(entries);
        let state = entry.state.lock();
        state.value.clone()
    }

    pub async fn refresh<F, Fut>(&self, key: &str, fetch: F) -> FetchOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let entry = self.entry(key);
        let seen_version = entry.state.lock().version;

        let _gate = entry.gate.lock().await;

        // Someone refreshed this key while we were queued; their value is
        // fresh enough for us.
        {
            let state = entry.state.lock();
            if state.version != seen_version {
                if let Some(value) = &state.value {
                    return FetchOutcome::Fresh(value.clone());
                }
            }
        }

        match fetch().await {
            Ok(value) => {
                let mut state = entry.state.lock();
                state.value = Some(value.clone());
                state.version += 1;
                FetchOutcome::Fresh(value)
            }
            Err(error) => {
                let state = entry.state.lock();
                match &state.value {
                    Some(value) => FetchOutcome::Stale {
                        value: value.clone(),
                        error,
                    },
                    None => FetchOutcome::Failed(error),
                }
            }
        }
    }
}

impl<T: Clone> Default for ResponseCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
