//! Backend for the mini chat client: a text chat endpoint and an image
//! analysis endpoint, both answered by a local Ollama model server.

pub mod agent;
pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod service;
