/// Where and how the comment segment ends up in the carrier file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EmbedStrategy {
    /// Writes the comment segment over the bytes at offset 2, right behind the
    /// start-of-image marker. Whatever segment lived there gets clobbered, the
    /// file size stays the same unless the comment reaches past the end.
    #[default]
    Overwrite,

    /// Inserts the comment segment behind the start-of-image marker and shifts
    /// everything that follows. The file grows by the size of the segment.
    Splice,
}

/// Options for embedding a message
#[derive(Debug, Default, Clone)]
pub struct EmbedOptions {
    pub strategy: EmbedStrategy,
}

impl EmbedOptions {
    pub fn with_strategy(mut self, strategy: EmbedStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
