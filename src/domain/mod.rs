//! Record types, validation and the generator vocabulary.

pub mod record;
pub mod validate;
pub mod vocabulary;

pub use record::{Candidate, NewRecord, Record, ServedRecord};
pub use validate::{validate, Rejection};
pub use vocabulary::Vocabulary;
