pub mod table;
pub mod types;

pub use table::NameTable;
pub use types::Name;
