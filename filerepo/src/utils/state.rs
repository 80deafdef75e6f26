use crate::config::Config;
use crate::storage::{Storage, driver::filesystem::FilesystemStorage};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-name locks serializing the check-then-act sequences of write and delete.
#[derive(Clone, Default)]
pub struct NameLocks {
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl NameLocks {
    pub async fn lock(&self, name: &str) -> OwnedMutexGuard<()> {
        let entry = {
            let mut locks = self.locks.lock().await;
            // Entries only referenced by the table are idle.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        entry.lock_owned().await
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub locks: NameLocks,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            storage: Arc::new(FilesystemStorage::new(&config.root_dir)),
            locks: NameLocks::default(),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn same_name_is_serialized() {
        let locks = NameLocks::default();
        let guard = locks.lock("a.txt").await;
        assert!(timeout(Duration::from_millis(50), locks.lock("a.txt")).await.is_err());
        drop(guard);
        assert!(timeout(Duration::from_millis(50), locks.lock("a.txt")).await.is_ok());
    }

    #[tokio::test]
    async fn different_names_do_not_block_each_other() {
        let locks = NameLocks::default();
        let _a = locks.lock("a.txt").await;
        assert!(timeout(Duration::from_millis(50), locks.lock("b.txt")).await.is_ok());
    }

    #[tokio::test]
    async fn idle_entries_are_pruned() {
        let locks = NameLocks::default();
        for name in ["a", "b", "c"] {
            drop(locks.lock(name).await);
        }
        let _held = locks.lock("d").await;
        assert_eq!(locks.len().await, 1);
    }
}
