pub mod cardano_format;
pub mod key_reader;
pub mod key_writer;

// Re-export commonly used items
pub use cardano_format::CardanoKeyFile;
pub use key_reader::KeyReader;
pub use key_writer::KeyWriter;
