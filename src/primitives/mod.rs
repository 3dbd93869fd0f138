//! Primitive facades exposed by the [`Corpus`](crate::Corpus) handle.

pub(crate) mod shared;

mod index;
mod ingest;
mod records;
mod training;

pub use index::Index;
pub use ingest::Ingest;
pub use records::Records;
pub use training::Training;
