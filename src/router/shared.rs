use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex};
use tracing::info;

use super::core::RoutingTable;
use super::route::RouteEntry;
use crate::error::RouteError;
use crate::ids::SessionId;
use crate::view::Kwargs;
use crate::wrapper::WrapperChain;

/// A routing table that can be re-registered while requests are served.
///
/// Readers take a lock-free snapshot with [`SharedRoutingTable::load`].
/// Writers serialize on a mutex, register into a copy of the current table
/// and publish the copy, so a reader never sees half of a batch.
#[derive(Debug, Clone)]
pub struct SharedRoutingTable {
    current: Arc<ArcSwap<RoutingTable>>,
    writer: Arc<Mutex<()>>,
}

impl SharedRoutingTable {
    #[must_use]
    pub fn new(table: RoutingTable) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(table)),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Snapshot of the current table
    #[must_use]
    pub fn load(&self) -> Arc<RoutingTable> {
        self.current.load_full()
    }

    /// Register a batch on a copy of the current table and publish it.
    ///
    /// # Errors
    ///
    /// Configuration errors from [`RoutingTable::register`]; the published
    /// table is left untouched.
    pub fn register(
        &self,
        entries: Vec<RouteEntry>,
        wrappers: WrapperChain,
    ) -> Result<SessionId, RouteError> {
        self.update(|table| table.register(entries, wrappers))
    }

    /// Include a nested table on a copy of the current table and publish it.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` if `prefix` does not compile.
    pub fn include(
        &self,
        prefix: &str,
        table: RoutingTable,
        default_args: Kwargs,
    ) -> Result<(), RouteError> {
        self.update(|current| current.include(prefix, table, default_args))
    }

    /// Replace the whole table
    pub fn replace(&self, table: RoutingTable) {
        let _guard = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        info!(nodes = table.len(), "Routing table replaced");
        self.current.store(Arc::new(table));
    }

    fn update<T, F>(&self, f: F) -> Result<T, RouteError>
    where
        F: FnOnce(&mut RoutingTable) -> Result<T, RouteError>,
    {
        let _guard = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut next = RoutingTable::clone(&self.current.load());
        let out = f(&mut next)?;
        self.current.store(Arc::new(next));
        Ok(out)
    }
}

impl Default for SharedRoutingTable {
    fn default() -> Self {
        Self::new(RoutingTable::new())
    }
}
