pub mod error;
pub mod geometry;
pub mod ingest;
pub mod query;
pub mod record;
pub mod store;
pub mod translate;
pub mod util;

pub use error::{Error, Result};
