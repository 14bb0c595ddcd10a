//! Style configuration
//!
//! Style files are discovered by walking up from a start directory and may be
//! written in YAML, JSON or TOML. Every field is optional and falls back to
//! its default.
//!
//! ## Example Configuration
//!
//! ```yaml
//! tabsAndIndents:
//!   useTabCharacter: false
//!   tabSize: 4
//!   indentSize: 4
//!   continuationIndent: 8
//! ```

mod loader;
mod style;

pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
pub use style::{StyleConfig, TabsAndIndentsStyle};
