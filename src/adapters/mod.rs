// Adapters layer: concrete implementations for external systems (mail provider, storage, file formats).

pub mod categories;
pub mod gmail;
pub mod storage;
pub mod tabular;
