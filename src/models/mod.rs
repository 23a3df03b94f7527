pub mod activity;

pub use activity::Activity;
pub use activity::MessageResponse;
