// Library crate: the editing session, persistence and command protocol.
// The binary only wires them to the command line.

pub mod command;
pub mod error;
pub mod fixtures;
pub mod state;
pub mod store;

pub use error::SessionError;
pub use state::{EditorSettings, TemplateSession};
pub use store::{FileTemplateStore, MemoryTemplateStore, PersistenceError, TemplateStore};
