//! Pick a storage backend.
//!
//! Priority: localStorage → Memory (fallback)

use std::rc::Rc;
use chatdeck_core::ports::StoragePort;
use chatdeck_types::config::StorageBackendType;
use super::MemoryStorage;

/// Open the best available backend.
/// Returns a trait object so callers are backend-agnostic.
pub fn auto_detect_storage() -> Rc<dyn StoragePort> {
    #[cfg(target_arch = "wasm32")]
    {
        match super::LocalStorage::open() {
            Ok(local) => {
                log::info!("Storage backend: localStorage");
                return Rc::new(local);
            }
            Err(e) => {
                log::warn!("localStorage unavailable ({}), falling back to memory", e);
            }
        }
    }

    Rc::new(MemoryStorage::new())
}

/// Open the backend named in the config; `Auto` defers to detection.
pub fn open_storage(kind: &StorageBackendType) -> Rc<dyn StoragePort> {
    match kind {
        StorageBackendType::Memory => {
            log::info!("Storage backend: memory (configured)");
            Rc::new(MemoryStorage::new())
        }
        StorageBackendType::LocalStorage | StorageBackendType::Auto => auto_detect_storage(),
    }
}
