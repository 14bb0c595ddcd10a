//! Structural wrappers that pair tree elements with incidental whitespace
//!
//! - [`RightPadded`]: an element followed by whitespace (`a` in `a , b` keeps
//!   the space before the comma)
//! - [`LeftPadded`]: whitespace followed by an element (`= 1` keeps the space
//!   before `=`)
//! - [`Container`]: whitespace before an opening delimiter plus an ordered list
//!   of right-padded elements (argument lists, type parameters)

use super::Space;

/// An element and the whitespace that follows it
#[derive(Debug, Clone, PartialEq)]
pub struct RightPadded<T> {
    pub element: T,
    pub after: Space,
}

impl<T> RightPadded<T> {
    pub fn new(element: T, after: Space) -> Self {
        Self { element, after }
    }

    /// An element with no trailing whitespace
    pub fn bare(element: T) -> Self {
        Self::new(element, Space::EMPTY)
    }

    pub fn with_element(self, element: T) -> Self {
        Self {
            element,
            after: self.after,
        }
    }

    pub fn with_after(self, after: Space) -> Self {
        Self {
            element: self.element,
            after,
        }
    }
}

/// Whitespace and the element that follows it
#[derive(Debug, Clone, PartialEq)]
pub struct LeftPadded<T> {
    pub before: Space,
    pub element: T,
}

impl<T> LeftPadded<T> {
    pub fn new(before: Space, element: T) -> Self {
        Self { before, element }
    }

    pub fn with_element(self, element: T) -> Self {
        Self {
            before: self.before,
            element,
        }
    }

    pub fn with_before(self, before: Space) -> Self {
        Self {
            before,
            element: self.element,
        }
    }
}

/// Whitespace before an opening delimiter and the delimited elements
#[derive(Debug, Clone, PartialEq)]
pub struct Container<T> {
    pub before: Space,
    pub elements: Vec<RightPadded<T>>,
}

impl<T> Container<T> {
    pub fn new(before: Space, elements: Vec<RightPadded<T>>) -> Self {
        Self { before, elements }
    }

    pub fn empty() -> Self {
        Self::new(Space::EMPTY, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// The unwrapped elements in order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter().map(|padded| &padded.element)
    }

    pub fn first(&self) -> Option<&T> {
        self.elements.first().map(|padded| &padded.element)
    }

    /// Index of a padded element of this container, compared by address.
    pub fn position_of(&self, padded: &RightPadded<T>) -> Option<usize> {
        self.elements
            .iter()
            .position(|candidate| std::ptr::eq(candidate, padded))
    }
}
