//! Professor-finder chat backend.
//!
//! A single-endpoint RAG service: embed the latest student query, retrieve
//! the most similar professor reviews from an external vector index, splice
//! them into the conversation, and stream the model's answer back.

pub mod chat;
pub mod core;
pub mod llm;
pub mod server;
pub mod state;
pub mod vector;
