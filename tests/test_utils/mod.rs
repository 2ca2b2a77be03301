pub mod fixtures;

pub use fixtures::counted_handler;
