pub use self::{grid::*, word_catalog::*, word_source::*};

pub(crate) mod grid;
pub(crate) mod word_catalog;
pub(crate) mod word_source;
