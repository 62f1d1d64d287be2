//! # rendezkv
//!
//! A minimal distributed key-value store built from two kinds of nodes:
//! - an **index server** (this crate) that owns the key → volume mapping and
//!   mediates every client request
//! - a set of **volume servers**: dumb HTTP file servers (e.g. nginx with
//!   `dav_methods PUT DELETE`) that store opaque blobs at a path
//!
//! Placement is rendezvous (highest-random-weight) hashing: every volume is
//! ranked per key by a combined digest, so the assignment is deterministic and
//! near-uniform without any central assignment table.
//!
//! ## Architecture
//!
//! ```text
//! client ──► ┌──────────────────┐
//!            │   Index server   │  key → (volume, subvolume) in RocksDB
//!            │  (this crate)    │  PUT proxies, GET redirects
//!            └────────┬─────────┘
//!                     │ HTTP
//!        ┌────────────┼────────────┐
//!   ┌────▼─────┐ ┌────▼─────┐ ┌────▼─────┐
//!   │ Volume 1 │ │ Volume 2 │ │ Volume 3 │   plain HTTP file servers
//!   └──────────┘ └──────────┘ └──────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! rendezkv-index serve \
//!   --bind 0.0.0.0:3000 \
//!   --db ./index-data \
//!   --volumes localhost:3001,localhost:3002,localhost:3003 \
//!   --replicas 1 \
//!   --subvolumes 10
//! ```
//!
//! Then speak plain HTTP to the index server:
//!
//! ```bash
//! curl -X PUT -d 'hello' localhost:3000/my-key   # 201
//! curl -L localhost:3000/my-key                  # 302 → volume → hello
//! curl -X DELETE localhost:3000/my-key           # 204
//! ```

pub mod common;
pub mod index;

// Re-export commonly used types
pub use common::{Error, IndexConfig, Result};
pub use index::IndexServer;

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
