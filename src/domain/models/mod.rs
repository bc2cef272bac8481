//! Domain model types.

pub mod record;
pub mod settings;
