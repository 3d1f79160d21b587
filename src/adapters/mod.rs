// Adapters layer: concrete implementations for external systems (files, http).

pub mod http;
pub mod storage;
