//! Traversal path from the root of a tree to the element being visited
//!
//! Each frame records what was entered (a node, a padded wrapper, a container)
//! and owns a small message map. Messages are how a visitor hands state down to
//! descendants: a value put on a frame is visible to everything visited below
//! it and disappears when the frame is popped, so siblings never observe each
//! other's messages unless they were placed on a shared ancestor.

use std::any::Any;
use std::collections::HashMap;

use crate::tree::{Container, ContainerLocation, LeftPaddedLocation, Node, RightPadded, RightPaddedLocation};

/// What a cursor frame refers to
#[derive(Debug, Clone, Copy)]
pub enum CursorValue<'a> {
    /// Bottom frame, above the root node
    Root,
    Node(&'a Node),
    RightPadded {
        location: RightPaddedLocation,
        padded: &'a RightPadded<Node>,
    },
    LeftPadded(LeftPaddedLocation),
    Container {
        location: ContainerLocation,
        container: &'a Container<Node>,
    },
}

impl<'a> CursorValue<'a> {
    pub fn node(&self) -> Option<&'a Node> {
        match self {
            CursorValue::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_left_padded(&self) -> bool {
        matches!(self, CursorValue::LeftPadded(_))
    }
}

struct Frame<'a> {
    value: CursorValue<'a>,
    messages: HashMap<&'static str, Box<dyn Any>>,
}

impl<'a> Frame<'a> {
    fn new(value: CursorValue<'a>) -> Self {
        Self {
            value,
            messages: HashMap::new(),
        }
    }
}

/// Stack of frames from the root to the current element
pub struct Cursor<'a> {
    frames: Vec<Frame<'a>>,
}

impl Default for Cursor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Cursor<'a> {
    /// Cursor holding only the root frame
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new(CursorValue::Root)],
        }
    }

    pub fn push(&mut self, value: CursorValue<'a>) {
        self.frames.push(Frame::new(value));
    }

    /// Pop the current frame and its messages. The root frame is never popped.
    pub fn pop(&mut self) -> Option<CursorValue<'a>> {
        if self.frames.len() <= 1 {
            return None;
        }
        self.frames.pop().map(|frame| frame.value)
    }

    /// Number of frames, root included
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn value(&self) -> CursorValue<'a> {
        self.frames
            .last()
            .map_or(CursorValue::Root, |frame| frame.value)
    }

    /// Value `up` frames above the current one (`0` is the current frame)
    pub fn value_at(&self, up: usize) -> Option<CursorValue<'a>> {
        self.frame(up).map(|frame| frame.value)
    }

    pub fn parent_value(&self) -> Option<CursorValue<'a>> {
        self.value_at(1)
    }

    /// Frame values from the current frame up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = CursorValue<'a>> + '_ {
        self.frames.iter().rev().map(|frame| frame.value)
    }

    /// Nearest enclosing node, including the current frame
    pub fn nearest_node(&self) -> Option<&'a Node> {
        self.ancestors().find_map(|value| value.node())
    }

    pub fn put_message<T: Any>(&mut self, key: &'static str, value: T) {
        self.put_message_at(0, key, value);
    }

    /// Attach a message to the frame `up` levels above the current one.
    /// Nothing happens when there is no such frame.
    pub fn put_message_at<T: Any>(&mut self, up: usize, key: &'static str, value: T) {
        let Some(index) = self.index(up) else {
            return;
        };
        self.frames[index].messages.insert(key, Box::new(value));
    }

    /// Message on the current frame only
    pub fn message<T: Any + Clone>(&self, key: &'static str) -> Option<T> {
        self.message_at(0, key)
    }

    /// Message on the frame `up` levels above the current one, without
    /// looking further up
    pub fn message_at<T: Any + Clone>(&self, up: usize, key: &'static str) -> Option<T> {
        self.frame(up)?.messages.get(key)?.downcast_ref::<T>().cloned()
    }

    /// First message of type `T` under `key`, searching from the current frame
    /// toward the root
    pub fn peek_nearest_message<T: Any + Clone>(&self, key: &'static str) -> Option<T> {
        self.peek_nearest_message_from(0, key)
    }

    /// Like [`Cursor::peek_nearest_message`], starting `up` frames above the
    /// current one
    pub fn peek_nearest_message_from<T: Any + Clone>(
        &self,
        up: usize,
        key: &'static str,
    ) -> Option<T> {
        let start = self.index(up)?;
        self.frames[..=start]
            .iter()
            .rev()
            .find_map(|frame| frame.messages.get(key)?.downcast_ref::<T>().cloned())
    }

    /// Remove and return the nearest message of type `T` under `key`
    pub fn poll_nearest_message<T: Any>(&mut self, key: &'static str) -> Option<T> {
        let frame = self
            .frames
            .iter_mut()
            .rev()
            .find(|frame| frame.messages.get(key).is_some_and(|value| value.is::<T>()))?;
        let value = frame.messages.remove(key)?;
        value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    fn index(&self, up: usize) -> Option<usize> {
        self.frames.len().checked_sub(1 + up)
    }

    fn frame(&self, up: usize) -> Option<&Frame<'a>> {
        self.index(up).map(|index| &self.frames[index])
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.frames.iter().map(|frame| match frame.value {
                CursorValue::Root => "Root",
                CursorValue::Node(node) => node.kind().name(),
                CursorValue::RightPadded { .. } => "RightPadded",
                CursorValue::LeftPadded(_) => "LeftPadded",
                CursorValue::Container { .. } => "Container",
            }))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build::ident;

    #[test]
    fn test_root_frame_is_never_popped() {
        let mut cursor = Cursor::new();
        assert_eq!(cursor.depth(), 1);
        assert!(cursor.pop().is_none());
        assert!(matches!(cursor.value(), CursorValue::Root));
    }

    #[test]
    fn test_messages_visible_to_descendants() {
        let outer = ident("", "outer");
        let inner = ident("", "inner");
        let mut cursor = Cursor::new();
        cursor.push(CursorValue::Node(&outer));
        cursor.put_message("lastIndent", 4usize);
        cursor.push(CursorValue::Node(&inner));

        assert_eq!(cursor.peek_nearest_message::<usize>("lastIndent"), Some(4));
        assert_eq!(cursor.message::<usize>("lastIndent"), None);
        assert!(Node::same(cursor.nearest_node().unwrap(), &inner));
    }

    #[test]
    fn test_sibling_messages_are_isolated() {
        let parent = ident("", "parent");
        let first = ident("", "first");
        let second = ident("", "second");
        let mut cursor = Cursor::new();
        cursor.push(CursorValue::Node(&parent));

        cursor.push(CursorValue::Node(&first));
        cursor.put_message("flag", true);
        cursor.pop();

        cursor.push(CursorValue::Node(&second));
        assert_eq!(cursor.peek_nearest_message::<bool>("flag"), None);
    }

    #[test]
    fn test_wrong_type_yields_none() {
        let mut cursor = Cursor::new();
        cursor.put_message("lastIndent", 4usize);
        assert_eq!(cursor.peek_nearest_message::<i32>("lastIndent"), None);
        assert_eq!(cursor.poll_nearest_message::<i32>("lastIndent"), None);
        assert_eq!(cursor.peek_nearest_message::<usize>("lastIndent"), Some(4));
    }

    #[test]
    fn test_nearest_message_shadows_ancestor() {
        let a = ident("", "a");
        let b = ident("", "b");
        let mut cursor = Cursor::new();
        cursor.push(CursorValue::Node(&a));
        cursor.put_message("lastIndent", 4usize);
        cursor.push(CursorValue::Node(&b));
        cursor.put_message("lastIndent", 8usize);

        assert_eq!(cursor.peek_nearest_message::<usize>("lastIndent"), Some(8));
        assert_eq!(
            cursor.peek_nearest_message_from::<usize>(1, "lastIndent"),
            Some(4)
        );
    }

    #[test]
    fn test_put_message_at_ancestor_and_poll() {
        let a = ident("", "a");
        let b = ident("", "b");
        let mut cursor = Cursor::new();
        cursor.push(CursorValue::Node(&a));
        cursor.push(CursorValue::Node(&b));
        cursor.put_message_at(1, "afterAnnotation", true);
        cursor.pop();

        assert_eq!(cursor.message::<bool>("afterAnnotation"), Some(true));
        assert_eq!(cursor.poll_nearest_message::<bool>("afterAnnotation"), Some(true));
        assert_eq!(cursor.peek_nearest_message::<bool>("afterAnnotation"), None);
    }

    #[test]
    fn test_put_message_beyond_root_is_ignored() {
        let mut cursor = Cursor::new();
        cursor.put_message_at(5, "lastIndent", 1usize);
        assert_eq!(cursor.peek_nearest_message::<usize>("lastIndent"), None);
        assert!(cursor.value_at(5).is_none());
    }
}
