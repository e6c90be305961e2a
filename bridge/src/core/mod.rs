pub mod audio;
pub mod dispatcher;
pub mod model;
pub mod request;

// Re-export commonly used types for convenience
pub use audio::{PcmBuffer, ToneConfig, WavBytes, WavError};
pub use dispatcher::{Dispatcher, DispatcherConfig, PlaceholderConfig};
pub use model::{
    BackendCapability, BackendError, ModelAdapter, ModelConfig, ModelLoader, SpeechModel,
};
pub use request::SynthesisRequest;
