pub mod classify;
pub mod upload;
