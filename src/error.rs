use thiserror::Error;

/// Problems detected while building a [`crate::Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("prompt is {len} bytes long, but at most {max} are allowed")]
    PromptTooLong { len: usize, max: usize },

    #[error("prompt contains control byte {byte:#04x}")]
    PromptControlByte { byte: u8 },
}
