mod memory;

pub use memory::MemoryRecordStore;
