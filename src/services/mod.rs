// Business logic services module
// This module contains the in-memory stores and the upload filesystem area

pub mod credential_store;
pub mod essay_store;
pub mod session_manager;
pub mod upload_storage;
pub mod upload_store;
