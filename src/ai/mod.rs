//! AI module for turning natural-language requests into shell commands.
//!
//! This module talks to the inference server, builds the instruction
//! prompt, and reduces the model's free-form answer to one command line.

pub mod client;
pub mod parser;
pub mod prompt;

pub use client::{CommandGenerator, GenerationRequest, InferenceClient, InferenceError};
pub use parser::normalize;
