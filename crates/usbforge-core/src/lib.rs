//! USBForge Core - USB descriptor document model
//!
//! This crate provides the foundational types for the USBForge editor:
//! - Typed descriptor fields (elements) with fixed binary encodings
//! - The closed descriptor catalog with per-kind schemas and child rules
//! - An arena-backed document that keeps derived fields (lengths, counts,
//!   string indices) consistent across arbitrary edits
//! - Binary and structured export of the descriptor forest

pub mod descriptor;
pub mod document;
pub mod element;
pub mod langid;

pub use descriptor::{Descriptor, DescriptorKind, ROOT_KINDS};
pub use document::{
    Document, DocumentError, NodeId, StructuredDescriptor, StructuredDocument, FORMAT_VERSION,
};
pub use element::{
    AutoRule, Choice, DisplayFormat, Element, ElementError, ElementKind, StructuredElement,
    StructuredValue,
};
