// Export modules for library usage
pub mod adapters;
pub mod analyzers;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod core;
pub mod io;
pub mod render;

// Re-export commonly used types
pub use crate::core::{
    Analysis, Error, ModelFamily, Output, OutputKind, Parameter, ParameterKind,
};

pub use crate::analyzers::{analyze, classify_model_family, sanitize_name};

pub use crate::codegen::{generate_stub, inject_stub};

pub use crate::io::notebook::{Cell, CellKind, Notebook};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::render::{render, CollectionRule, RenderPlan};

pub use crate::adapters::{EnrichmentClient, TransportClient};
