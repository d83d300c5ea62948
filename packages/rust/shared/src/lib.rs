//! Shared types, error model, and configuration for Brandscope.
//!
//! This crate is the foundation depended on by all other Brandscope crates.
//! It provides:
//! - [`BrandscopeError`] and [`FetchError`]: the unified error types
//! - The extracted document model ([`ExtractedData`], [`DesignTokens`], [`VoiceAnalysis`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, FetchSettings, MAX_LINKED_STYLESHEETS, StorageSettings, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{BrandscopeError, FetchError, Result};
pub use types::{
    AudienceAnalysis, Breakpoint, ButtonDescriptor, CardDescriptor, DesignTokens, ExtractedData,
    ExtractionId, ExtractionRecord, FormFieldDescriptor, FormFieldSchema, FormSchema, GridSystem,
    Heading, IconDescriptor, ImageDescriptor, LayoutStructure, NavigationGroup, NavLink, Tone,
    ToneAnalysis, ToneScore, VoiceAnalysis,
};
