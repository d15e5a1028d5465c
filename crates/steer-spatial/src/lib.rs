//! `steer-spatial`: neighbourhood queries for steering agents.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`query`]  | `SpatialQuery` / `SpatialIndex` traits, `BodyEntry`, `Hit`  |
//! | [`rtree`]  | `RTreeIndex`: bulk-loaded `rstar` R-tree                   |
//! | [`linear`] | `LinearIndex`: brute-force scan for small scenes and tests |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod linear;
pub mod query;
pub mod rtree;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use linear::LinearIndex;
pub use query::{BodyEntry, Hit, SpatialIndex, SpatialQuery};
pub use rtree::RTreeIndex;
