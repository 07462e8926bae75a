// Managed favorites services
// Stateless format engine (generator, parser), tree operations, and settings.

pub mod format_generator;
pub mod format_parser;
pub mod settings_engine;
pub mod tree_operations;
