// Analizador: image text extraction, translation and topic classification.
//
// This is the library root. The topic classifier is self-contained; the
// other modules wrap the external services it is combined with.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod topics;

#[cfg(feature = "web")]
pub mod web;
