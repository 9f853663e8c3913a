pub mod query_args;
pub mod search;
pub mod translate;
