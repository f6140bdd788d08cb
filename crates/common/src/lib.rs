//! Pieces shared by every crate in the workspace: logging bootstrap and
//! small wire types that are not owned by a single domain.

pub mod types;
pub mod utils;
