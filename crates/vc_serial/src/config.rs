/// Knobs of the decoding side.
///
/// # Examples
///
/// ```
/// use vc_serial::SerialConfig;
///
/// let config = SerialConfig::new()
///     .with_string_chunk_size(256)
///     .with_max_depth(None);
///
/// assert_eq!(config.string_chunk_size(), 256);
/// assert_eq!(config.max_depth(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    string_chunk_size: usize,
    max_depth: Option<usize>,
}

impl SerialConfig {
    /// Size of the intermediate buffer used for binary string reads.
    pub const DEFAULT_STRING_CHUNK_SIZE: usize = 4096;
    /// Default nesting limit of a decoded value.
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    /// Create the default configuration.
    #[inline]
    pub const fn new() -> Self {
        Self {
            string_chunk_size: Self::DEFAULT_STRING_CHUNK_SIZE,
            max_depth: Some(Self::DEFAULT_MAX_DEPTH),
        }
    }

    /// Sets the string read chunk size. Zero is raised to one.
    #[inline]
    pub const fn with_string_chunk_size(mut self, size: usize) -> Self {
        self.string_chunk_size = if size == 0 { 1 } else { size };
        self
    }

    /// Sets the nesting limit; `None` disables it.
    #[inline]
    pub const fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    #[inline]
    pub const fn string_chunk_size(&self) -> usize {
        self.string_chunk_size
    }

    #[inline]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

impl Default for SerialConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
