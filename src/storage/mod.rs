pub mod error;
pub mod ordering;
pub mod tuple;
