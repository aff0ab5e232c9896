//! Models of components that reference an external resource.

/// An image, described by the component's label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageModel {
    source: Option<String>,
}

impl ImageModel {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the previous source.
    pub fn set_source(&mut self, source: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.source, source)
    }
}

/// A nested document shown inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineFrameModel {
    source: Option<String>,
}

impl InlineFrameModel {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the previous source.
    pub fn set_source(&mut self, source: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.source, source)
    }
}
