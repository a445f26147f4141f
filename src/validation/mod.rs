//! Structural checks on a temporal graph.
//!
//! The rules here are shared with frame-metadata rebuilds, which stop at the
//! first violation. `Validator` runs the same rules to completion and reports
//! every violation at once.
pub use self::validator::Validator;

mod validator;
pub(crate) mod rules {
    pub mod frames;
    pub mod time_direction;
}
