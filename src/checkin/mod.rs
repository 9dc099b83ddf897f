//! Server-driven check-in screens with conditional sections.

pub mod condition;
pub mod screen;
pub mod session;
pub mod submission;
pub mod value;

pub use condition::*;
pub use screen::*;
pub use session::*;
pub use submission::*;
pub use value::*;
