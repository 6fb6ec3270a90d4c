//! Models module for the fretboard diagram
//!
//! Static tuning/layout configuration, note identity and attributes, the
//! note registry and the canonical diagram state.

pub mod tuning;
pub mod note;
pub mod registry;
pub mod diagram_state;

// Re-export commonly used types
pub use tuning::*;
pub use note::*;
pub use registry::NoteRegistry;
pub use diagram_state::*;
