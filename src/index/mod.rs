//! Index server: placement, mapping store, volume client and HTTP surface

pub mod http;
pub mod mapping;
pub mod placement;
pub mod server;
pub mod volume_client;

pub use mapping::MappingStore;
pub use placement::{PlacementPolicy, VolumeTarget};
pub use server::IndexServer;
pub use volume_client::{StoreOutcome, VolumeClient};
