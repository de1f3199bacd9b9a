//! Scientific name values for nomina

pub mod name;

// Re-export commonly used types
pub use name::{Name, NameTable};
