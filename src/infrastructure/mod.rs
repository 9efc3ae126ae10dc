//! Infrastructure layer - Cache, storage and translation backends

pub mod cache;
pub mod logging;
pub mod services;
pub mod storage;
pub mod translation;
