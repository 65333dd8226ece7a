#[cfg(test)]
mod tests {
    use crate::storage::{open_storage, MemoryStorage};
    use chatdeck_core::ports::StoragePort;
    use chatdeck_types::config::StorageBackendType;
    use futures::executor::block_on;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        block_on(storage.set("k", b"v")).unwrap();
        assert_eq!(block_on(storage.get("k")).unwrap(), Some(b"v".to_vec()));
        assert_eq!(storage.len(), 1);
        assert!(block_on(storage.exists("k")).unwrap());
    }

    #[test]
    fn test_memory_storage_get_missing() {
        let storage = MemoryStorage::new();
        assert!(block_on(storage.get("nope")).unwrap().is_none());
        assert!(!block_on(storage.exists("nope")).unwrap());
    }

    #[test]
    fn test_memory_storage_delete() {
        let storage = MemoryStorage::new();
        block_on(storage.set("k", b"v")).unwrap();
        block_on(storage.delete("k")).unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_storage_list_keys_sorted() {
        let storage = MemoryStorage::new();
        block_on(storage.set("p:2", b"")).unwrap();
        block_on(storage.set("p:1", b"")).unwrap();
        block_on(storage.set("q:1", b"")).unwrap();
        assert_eq!(
            block_on(storage.list_keys("p:")).unwrap(),
            vec!["p:1".to_string(), "p:2".to_string()]
        );
    }

    #[test]
    fn test_open_storage_native_falls_back_to_memory() {
        assert_eq!(open_storage(&StorageBackendType::Memory).backend_name(), "memory");
        // no browser here: auto-detection lands on memory
        assert_eq!(open_storage(&StorageBackendType::Auto).backend_name(), "memory");
        assert_eq!(open_storage(&StorageBackendType::LocalStorage).backend_name(), "memory");
    }
}
