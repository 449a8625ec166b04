//! 功能元件模組

pub mod artwork_exporter;

pub use artwork_exporter::ArtworkExporter;
