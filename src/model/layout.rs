//! Panel and frame models.

/// Direction a panel flows its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// Layout of a panel's children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutModel {
    pub orientation: Orientation,
}

impl LayoutModel {
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }
}

/// State of a frame. The frame's title is its label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameModel {
    /// Whether the frame blocks input to the rest of the application.
    pub modal: bool,
}
