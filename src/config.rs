use crate::ConfigError;

/// Maximum number of bytes in a prompt.
pub const MAX_PROMPT_LEN: usize = 10;

/// The text printed in front of each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    buf: [u8; MAX_PROMPT_LEN],
    len: u8,
}

impl Prompt {
    pub const fn new() -> Self {
        Self {
            buf: [0; MAX_PROMPT_LEN],
            len: 0,
        }
    }

    /// Copies `text` into a prompt, rejecting text that is too long or that
    /// contains control bytes, either of which would throw off the column
    /// arithmetic used when redrawing the line.
    pub fn from_bytes(text: &[u8]) -> Result<Self, ConfigError> {
        if text.len() > MAX_PROMPT_LEN {
            return Err(ConfigError::PromptTooLong {
                len: text.len(),
                max: MAX_PROMPT_LEN,
            });
        }
        if let Some(&byte) = text.iter().find(|b| b.is_ascii_control()) {
            return Err(ConfigError::PromptControlByte { byte });
        }
        let mut ret = Self::new();
        ret.buf[..text.len()].copy_from_slice(text);
        ret.len = text.len() as u8;
        Ok(ret)
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&str> for Prompt {
    type Error = ConfigError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::from_bytes(text.as_bytes())
    }
}

/// Settings for a [`crate::LineMachine`].
///
/// Buffer sizes are const parameters of the machine itself; this covers the
/// settings that can vary at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    prompt: Prompt,
    serial_xlate: bool,
}

impl Config {
    /// An empty prompt with serial translation enabled.
    pub const fn new() -> Self {
        Self {
            prompt: Prompt::new(),
            serial_xlate: true,
        }
    }

    pub fn with_prompt(mut self, prompt: &str) -> Result<Self, ConfigError> {
        self.prompt = Prompt::try_from(prompt)?;
        Ok(self)
    }

    /// Controls translation for serial terminals: when enabled, a carriage
    /// return on input ends the line just like a newline does, and newlines
    /// are echoed as CR LF.
    pub const fn with_serial_xlate(mut self, enabled: bool) -> Self {
        self.serial_xlate = enabled;
        self
    }

    #[inline(always)]
    pub const fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    #[inline(always)]
    pub const fn serial_xlate(&self) -> bool {
        self.serial_xlate
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
