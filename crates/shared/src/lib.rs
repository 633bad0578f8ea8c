//! Vocabulary shared by the gesture core, the metadata store and the replay host.

pub mod domain;
pub mod error;
pub mod settings;
pub mod style;
