//! Locations inside a shape tree.
//!
//! A [`ShapePath`] is the chain of `childShapes` indices leading from the
//! root to a shape, rendered like a JSON pointer:
//! `/childShapes/2/childShapes/0`. The root itself is `/`.

use std::fmt;

/// Position of a shape within its diagram's tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ShapePath(Vec<usize>);

impl ShapePath {
    /// The path of the root shape.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the path of this shape's `index`-th child.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Returns `true` for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Nesting depth; the root is at depth 0.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Returns the child indices from the root down.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for ShapePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/childShapes/{index}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display() {
        assert_eq!(ShapePath::root().to_string(), "/");
        assert!(ShapePath::root().is_root());
    }

    #[test]
    fn test_nested_display() {
        let path = ShapePath::root().child(2).child(0);

        assert_eq!(path.to_string(), "/childShapes/2/childShapes/0");
        assert_eq!(path.depth(), 2);
        assert_eq!(path.indices(), &[2, 0]);
    }
}
