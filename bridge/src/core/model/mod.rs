//! Real speech model integration
//!
//! The backend is treated as an opaque capability: something that can load a
//! model by identifier and turn `(text, voice)` into float samples.
//!
//! - `backend` - `SpeechModel` / `ModelLoader` traits and `BackendError`
//! - `config` - model identifier, default voice and backend endpoint settings
//! - `adapter` - capability detection and the shared, lazily loaded handle
//! - `remote` - KittenTTS served by an HTTP inference server

mod adapter;
pub mod backend;
pub mod config;
pub mod remote;

pub use adapter::{BackendCapability, ModelAdapter};
pub use backend::{BackendError, BackendResult, ModelLoader, SpeechModel};
pub use config::{
    DEFAULT_MODEL_ID, DEFAULT_VOICE, KITTEN_SAMPLE_RATE, ModelConfig, REQUEST_DEFAULT_VOICE,
};
pub use remote::{RemoteKittenLoader, RemoteKittenModel};
