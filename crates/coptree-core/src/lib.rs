//! Coptree Core Types and Definitions
//!
//! This crate provides the shared vocabulary for working with dependency
//! annotations of Coptic text. It includes:
//!
//! - **Labels**: Interned open-vocabulary tags and relations ([`label::Label`])
//! - **Records**: Per-token annotations and sentence batches ([`record`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types for rendering ([`geometry`] module)
//! - **Transliteration**: Coptic to Latin letter mapping ([`translit`] module)

pub mod color;
pub mod geometry;
pub mod label;
pub mod record;
pub mod translit;
