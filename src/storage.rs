mod catalog;
pub use catalog::Catalog;

mod detail;
pub use detail::Detail;

mod error;
pub use error::Error;

mod record;
pub use record::{ForeignKey, Record, Writable};

pub mod schema;
