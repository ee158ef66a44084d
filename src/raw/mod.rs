mod arena;
mod build;
mod index;
mod raw_flat_bst;
mod traverse;

pub(crate) use index::Link;
pub(crate) use raw_flat_bst::RawFlatBst;
pub(crate) use traverse::InorderCursor;
