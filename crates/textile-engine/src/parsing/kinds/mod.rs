//! Constructs that carry their own tags and state on top of the generic driver.

pub mod definition_list;
pub mod list;
pub mod table;

pub use definition_list::DefinitionList;
pub use list::List;
pub use table::Table;
