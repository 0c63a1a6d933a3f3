pub mod list;
pub mod startup;

pub use list::execute_list;
pub use startup::{execute_startup, execute_status};
