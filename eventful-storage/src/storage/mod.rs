mod memory;

pub use memory::*;

/// Host-provided key-value storage area.
///
/// Mirrors the `Storage` interface of a browsing context. Methods take `&self`
/// because the area is a shared host object mutated through a handle.
pub trait StorageBackend {
    type Error: std::error::Error;

    /// Number of entries
    fn length(&self) -> Result<usize, Self::Error>;

    /// Key at the given index, `None` when out of range
    fn key(&self, index: usize) -> Result<Option<String>, Self::Error>;

    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    fn remove_item(&self, key: &str) -> Result<(), Self::Error>;

    fn clear(&self) -> Result<(), Self::Error>;
}
