// Service exports
pub mod seed;

pub use seed::{builtin_locations, SeedError, SeedSource};
