//! Favorite domain module.
//!
//! - `model`: `FavoriteSet`
//! - `repository`: `FavoriteRepository` trait for persistence

mod model;
pub mod repository;

pub use model::FavoriteSet;
pub use repository::FavoriteRepository;
