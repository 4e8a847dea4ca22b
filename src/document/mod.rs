//! Task attachments kept in object storage.
//!
//! The bytes of an attachment live in a storage bucket under a timestamped
//! key. A metadata record per upload is kept alongside the task data:
//!
//! - Domain types in [`domain`]
//! - Object storage and metadata ports in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Upload, download and delete orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
