//! # Providers
//!
//! Providers represent a source of metadata, such as a container format like
//! RIFF.
//!
//! Each provider has a struct with a `MetadataProvider` implementation. This
//! allows a consistent interface for obtaining metadata from different media
//! sources.

pub mod riff;
