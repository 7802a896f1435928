/// Configuration for a single parse.
///
/// The simplest usage is `thistle::Options::default()`; a builder pattern is
/// exposed for the rest.
#[derive(Debug, Clone)]
pub struct Options {
    pub(crate) source_name: String,
    pub(crate) source_index: u32,
}

impl Default for Options {
    #[inline]
    fn default() -> Self {
        Self {
            source_name: String::new(),
            source_index: 0,
        }
    }
}

impl Options {
    /// The display name used in diagnostics.
    ///
    /// When left empty, errors are reported against `(stdin)`.
    #[must_use]
    #[inline]
    pub fn source_name<S: Into<String>>(mut self, name: S) -> Self {
        self.source_name = name.into();
        self
    }

    /// An opaque index identifying this source to the caller.
    ///
    /// Every statement in the produced tree is tagged with it, so that a
    /// consumer holding several parsed files can map statements back to
    /// their origin.
    #[must_use]
    #[inline]
    pub const fn source_index(mut self, source_index: u32) -> Self {
        self.source_index = source_index;
        self
    }

    pub(crate) fn display_name(&self) -> &str {
        if self.source_name.is_empty() {
            "(stdin)"
        } else {
            &self.source_name
        }
    }
}
