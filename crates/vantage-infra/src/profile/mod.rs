//! Profile store implementations.

mod memory;

pub use memory::InMemoryProfileStore;

#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "postgres")]
pub use postgres::PostgresProfileStore;
