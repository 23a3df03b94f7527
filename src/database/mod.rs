pub mod activity_registry;
pub mod seed_data;

pub use activity_registry::ActivityRegistry;
