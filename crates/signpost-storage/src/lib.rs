pub mod memory;
pub mod resources;

pub use memory::InMemoryRepository;
pub use resources::{InMemoryContentRepository, InMemoryMediaRepository};
