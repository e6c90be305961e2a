pub mod api;
pub mod synthesize;
