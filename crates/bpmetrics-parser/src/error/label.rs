//! Labeled shape locations for diagnostic messages.
//!
//! A label associates a message with a shape of the diagram, providing
//! context for where an error or warning occurred.

use crate::path::ShapePath;

/// A labeled location in a shape tree.
///
/// # Primary vs Secondary Labels
///
/// - **Primary labels** mark the offending shape.
/// - **Secondary labels** provide additional context, such as
///   "first defined here" for a duplicate resource id.
///
/// # Example
///
/// ```text
/// error[E101]: resource id `sid-7` is used by more than one shape
///   at /childShapes/3: duplicate definition
///   at /childShapes/0/childShapes/1: first defined here
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    path: ShapePath,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(path: ShapePath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(path: ShapePath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the shape path this label applies to.
    pub fn path(&self) -> &ShapePath {
        &self.path
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(ShapePath::root().child(1), "missing id");

        assert_eq!(label.path().to_string(), "/childShapes/1");
        assert_eq!(label.message(), "missing id");
        assert!(label.is_primary());
        assert!(!label.is_secondary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(ShapePath::root(), "first defined here");

        assert!(label.path().is_root());
        assert!(label.is_secondary());
    }
}
