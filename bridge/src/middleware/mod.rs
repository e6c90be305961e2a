pub mod cors;
pub mod security;

// Re-export middleware layers
pub use cors::cors_layer;
pub use security::security_headers;
