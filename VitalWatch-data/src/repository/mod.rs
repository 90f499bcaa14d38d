// Repository module structure
pub mod errors;
mod in_memory;
mod readings;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use in_memory::InMemoryStorage;
pub use readings::{HttpReadingRepository, ReadingRepository, ReadingRepositoryTrait};

// Re-export test modules for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use readings::tests;
