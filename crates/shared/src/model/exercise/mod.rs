mod date;
pub use date::*;

mod record;
pub use record::*;

mod filter;
pub use filter::*;
