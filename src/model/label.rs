//! Label model: the text and icon a component presents.

/// A label and an icon reference, both optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelModel {
    label: Option<String>,
    icon: Option<String>,
}

impl LabelModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label (builder).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the icon (builder).
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Replace the label, returning the previous one.
    pub fn set_label(&mut self, label: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.label, label)
    }

    /// Replace the icon, returning the previous one.
    pub fn set_icon(&mut self, icon: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.icon, icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders() {
        let model = LabelModel::new().with_label("Name").with_icon("user.png");
        assert_eq!(model.label(), Some("Name"));
        assert_eq!(model.icon(), Some("user.png"));
    }

    #[test]
    fn set_returns_previous() {
        let mut model = LabelModel::new().with_label("Old");
        assert_eq!(model.set_label(Some("New".into())), Some("Old".into()));
        assert_eq!(model.set_label(None), Some("New".into()));
        assert_eq!(model.label(), None);
    }
}
