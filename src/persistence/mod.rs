// * Persistence
// * Input inventories in, tables and reports out

pub mod export;
pub mod schema;

// * Re-exports for convenient access
pub use export::{
    copy_sources, ensure_output_dir, read_table, write_patterns, write_table, write_text,
    ExportError, OutputPaths,
};
pub use schema::{Block, BlockInstance, BlockInventory, SchemaError, UrlEntry, UrlInventory};
