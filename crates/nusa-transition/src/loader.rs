/// Opaque id for a loaded model owned by a [`ModelLoader`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelHandle(pub u64);

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("model not found: {0}")]
    NotFound(String),
    #[error("failed to load model {path}: {reason}")]
    Load { path: String, reason: String },
}

/// Loads models by asset-relative path. Every successful `load` must be
/// matched by one `release`.
pub trait ModelLoader {
    fn load(&mut self, path: &str) -> Result<ModelHandle, AssetError>;
    fn release(&mut self, handle: ModelHandle);
}
