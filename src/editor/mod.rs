//! Photo Capture - Photo Editor
//!
//! Reversible rotate/flip edits with linear undo/redo. Every history entry
//! owns its own pixel buffer.

pub mod codec;
pub mod history;
pub mod session;
pub mod transform;

pub use history::EditHistory;
pub use session::{commit_image, EditSession};
pub use transform::Transform;
