use crate::domain::repository::SnapshotPersistence;
use crate::domain::snapshot::Snapshot;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, trace};

/// The whole entity store held in memory.
///
/// Every mutation goes through [`InMemoryStore::commit`]: the change is applied
/// to a copy of the snapshot, the copy is handed to the persistence port, and
/// only a successful save swaps it in. A commit that leaves the copy equal to
/// the current snapshot is not saved. Writers serialize on the lock.
#[derive(Clone)]
pub struct InMemoryStore {
    storage: Arc<RwLock<Snapshot>>,
    persistence: Arc<dyn SnapshotPersistence>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_persistence(Arc::new(VolatilePersistence::new()))
    }

    pub fn with_persistence(persistence: Arc<dyn SnapshotPersistence>) -> Self {
        Self {
            storage: Arc::new(RwLock::new(Snapshot::default())),
            persistence,
        }
    }

    /// Builds a store from whatever the persistence port currently holds.
    #[instrument(skip(persistence))]
    pub async fn open(persistence: Arc<dyn SnapshotPersistence>) -> Result<Self> {
        let snapshot = persistence.load().await?.unwrap_or_default();
        info!(
            users = snapshot.users.len(),
            families = snapshot.families.len(),
            products = snapshot.products.len(),
            shopping_lists = snapshot.shopping_lists.len(),
            "Store opened"
        );
        Ok(Self {
            storage: Arc::new(RwLock::new(snapshot)),
            persistence,
        })
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.storage.read().await.clone()
    }

    pub(crate) async fn read<T>(&self, view: impl FnOnce(&Snapshot) -> T) -> T {
        trace!("Acquiring read lock for store");
        let storage = self.storage.read().await;
        view(&storage)
    }

    pub(crate) async fn commit<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Snapshot) -> T + Send,
        T: Send,
    {
        trace!("Acquiring write lock for store");
        let mut storage = self.storage.write().await;
        let mut next = storage.clone();
        let out = op(&mut next);
        if next == *storage {
            trace!("Commit changed nothing, skipping save");
            return Ok(out);
        }
        self.persistence.save(&next).await?;
        *storage = next;
        debug!("Snapshot committed");
        Ok(out)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Persistence that keeps the last saved snapshot in memory only.
#[derive(Default)]
pub struct VolatilePersistence {
    last: Mutex<Option<Snapshot>>,
    saves: AtomicUsize,
}

impl VolatilePersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(snapshot: Snapshot) -> Self {
        Self {
            last: Mutex::new(Some(snapshot)),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn last_saved(&self) -> Option<Snapshot> {
        self.last.lock().await.clone()
    }
}

#[async_trait]
impl SnapshotPersistence for VolatilePersistence {
    async fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.last.lock().await.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        *self.last.lock().await = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
