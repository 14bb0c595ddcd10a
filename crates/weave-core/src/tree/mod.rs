//! Lossless semantic tree
//!
//! Every character of the source is kept: tokens live in [`Node`] kinds, and
//! everything between tokens lives in [`Space`] values attached either to a
//! node (its prefix) or to a padded wrapper. Printing a tree that has not been
//! modified reproduces the source byte-for-byte.

pub mod build;
mod location;
mod markers;
mod node;
mod padding;
mod space;

pub use location::{ContainerLocation, LeftPaddedLocation, RightPaddedLocation, SpaceLocation};
pub use markers::{AutoCrlf, Eol, GitProvenance, Marker, Markers};
pub use node::*;
pub use padding::{Container, LeftPadded, RightPadded};
pub use space::{Comment, CommentStyle, Space};
