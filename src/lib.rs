// plagcheck: estimate how much of a text appears elsewhere on the web.
//
// This is the library root. Each module corresponds to a stage of the check
// pipeline or to one of its surfaces (CLI output, HTTP API).

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod search;
pub mod similarity;
pub mod text;

#[cfg(feature = "web")]
pub mod web;
