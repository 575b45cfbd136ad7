mod in_memory_bitmap_store;
mod sqlite_bitmap_store;

pub use in_memory_bitmap_store::InMemoryBitmapStore;
pub use sqlite_bitmap_store::SqliteBitmapStore;
