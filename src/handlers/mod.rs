// HTTP request handlers module
// This module contains all the web request handlers for the application

pub mod admin;
pub mod auth;
pub mod essays;
pub mod health;
pub mod upload;
