//! `storefront-editor`
//!
//! **Responsibility:** the interactive catalog editor.
//!
//! This crate provides:
//! - `EditorSession`, the single owner of all editor state (catalog, form,
//!   pending image, delete confirmation, messages)
//! - environment-driven configuration
//! - the line-command front end used by the `storefront-editor` binary

pub mod command;
pub mod config;
pub mod form;
pub mod session;

pub use command::{Command, CommandError, parse_command};
pub use config::{ConfigError, EditorConfig};
pub use form::{FormField, FormState, PendingImage};
pub use session::{EditorSession, Message, Tone, UserEvent};
