//! Storage module: data model and the in-memory repository.
//!
//! Layout:
//! - `models.rs`: records exposed over the API and their insert/update shapes
//! - `memory.rs`: process-lifetime store, lost on restart

pub mod memory;
pub mod models;

pub use memory::MemStorage;
pub use models::{
    ActivityEntry, NewPackage, NewTrackingEvent, NewUser, Package, PackageStatus, PackageUpdate,
    TrackingEvent, User,
};
