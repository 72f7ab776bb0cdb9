//! Lead Audit LLM
//!
//! Client for the external generative-text service. One client backs two
//! collaborators of the classification engine:
//! - `RuleLookup`: grounded web search for a country's numbering plan
//! - `NarrativeGenerator`: executive summary of a classified batch

pub mod client;
pub mod parse;
pub mod prompts;
pub mod wire;

pub use client::{GeminiClient, GeminiConfig};
pub use parse::{extract_explanation, extract_pattern, parse_lookup_response};
