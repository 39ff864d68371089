//! Pieces shared by every BizTime crate: logging bootstrap and small wire types.

pub mod types;
pub mod utils;
