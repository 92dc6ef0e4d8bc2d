pub mod colors;
pub mod date;
pub mod formatting;
pub mod number;
pub mod table;
pub mod time;

pub use formatting::format_quantity;
