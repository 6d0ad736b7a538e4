//! Document-level outline assembly.
//!
//! Level assignment needs a statistic over the whole document, so assembly
//! is a two-stage pass: [`FontProfile`] is built from every fragment first,
//! then [`OutlineAssembler`] classifies fragments in reading order against it.

mod assemble;
mod profile;

pub use assemble::{select_title, OutlineAssembler};
pub use profile::{FontProfile, PROFILE_DEPTH};
