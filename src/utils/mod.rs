//! Internal utilities shared by the catcher.

pub(crate) mod quiet;
