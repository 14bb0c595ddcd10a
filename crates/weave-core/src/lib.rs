//! Weave Core
//!
//! Lossless semantic tree model for source-to-source transformations.
//! This crate provides the tree, the cursor that tracks a traversal path, the
//! rebuild-if-changed visitor contract, the printer, and the style
//! configuration shared by Weave formatters.

pub mod config;
pub mod cursor;
pub mod error;
pub mod printer;
pub mod result;
pub mod tree;
pub mod visitor;

// Re-export commonly used types
pub use config::{ConfigLoader, StyleConfig, TabsAndIndentsStyle};
pub use cursor::{Cursor, CursorValue};
pub use error::{ErrorKind, WeaveError};
pub use printer::{print, print_until};
pub use result::Result;
pub use tree::{
    Comment, CommentStyle, Container, ContainerLocation, Kind, LeftPadded, LeftPaddedLocation,
    Markers, Node, RightPadded, RightPaddedLocation, Space, SpaceLocation,
};
pub use visitor::{TreeVisitor, VisitResult};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("weave=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
