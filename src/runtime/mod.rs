//! Runtime adapters for spawning onto tokio.

pub mod tokio_spawner;

pub use tokio_spawner::TokioSpawner;
