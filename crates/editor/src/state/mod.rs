pub mod session;
pub mod settings;

pub use session::{Observer, TemplateSession};
pub use settings::{EditorSettings, LayoutSettings, StorageSettings};
