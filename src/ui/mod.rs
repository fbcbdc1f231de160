mod json;
mod table;

pub use json::json_print;
pub use table::{Table, TableOptions};
