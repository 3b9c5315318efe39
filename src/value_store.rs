use std::sync::Arc;
use tokio::sync::RwLock;

/// Single-slot string holder shared by every request worker.
///
/// Cloning is cheap and every clone points at the same value. Readers run
/// in parallel; a writer holds the slot exclusively.
#[derive(Clone, Default, Debug)]
pub struct ValueStore {
    inner: Arc<RwLock<String>>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(String::new())),
        }
    }

    pub async fn set(&self, value: String) {
        let mut slot = self.inner.write().await;
        *slot = value;
    }

    pub async fn get(&self) -> String {
        let slot = self.inner.read().await;
        slot.clone()
    }
}
