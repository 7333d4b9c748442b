//! Command implementations for the exemplar CLI.

mod build;
mod serve;
mod site;

pub use build::execute as build_corpus;
pub use serve::execute as serve_corpus;
pub use site::execute as generate_site;
