//! Typed descriptor fields and their binary encodings
//!
//! Every field of a USB descriptor is an [`Element`]: a named, fixed-width
//! value that knows how to encode itself, whether it is currently valid, and
//! (for derived fields) how it is recomputed from the descriptor that owns it.

use serde::Serialize;
use thiserror::Error;

use crate::descriptor::DescriptorKind;

#[derive(Error, Debug)]
pub enum ElementError {
    #[error("No encoding defined for element width {0}")]
    UnsupportedWidth(usize),
}

/// How a variable element's value is rendered by an editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    Dec,
    Hex,
}

/// Recompute rule for an auto element
///
/// Evaluated by the document's recomputation pass against a snapshot of the
/// owning descriptor. Rules never hold references back into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoRule {
    /// Byte length of the owner's own elements
    OwnLength,
    /// Number of direct children of the given kind
    ChildCountOf(DescriptorKind),
    /// Byte length of the owner plus all of its descendants
    SubtreeLength,
}

/// A labelled value offered to an editor by an enum, bitmap, or string link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    pub value: u64,
}

/// The closed set of element variants
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// Value fixed at construction (descriptor type tags, reserved fields)
    Constant { value: u64 },
    /// Free numeric value bounded by the element width
    Variable { value: u64, format: DisplayFormat },
    /// Value restricted to a fixed option table; defaults to the first option
    Enum {
        options: &'static [(&'static str, u64)],
        value: u64,
    },
    /// Bit-OR of flags from a fixed mask table
    Bitmap {
        flags: &'static [(&'static str, u64)],
        value: u64,
    },
    /// Derived value, overwritten on every recomputation pass
    Auto { rule: AutoRule, value: u64 },
    /// Index of a string descriptor; candidates are rebuilt on every pass
    StringLink { candidates: Vec<Choice>, value: u64 },
    /// UTF-8 text payload of a string descriptor
    Text { value: String },
}

/// A single field of a descriptor
#[derive(Debug, Clone)]
pub struct Element {
    name: &'static str,
    comment: &'static str,
    width: usize,
    kind: ElementKind,
}

impl Element {
    pub fn constant(name: &'static str, comment: &'static str, width: usize, value: u64) -> Self {
        Self {
            name,
            comment,
            width,
            kind: ElementKind::Constant { value },
        }
    }

    pub fn variable(
        name: &'static str,
        comment: &'static str,
        width: usize,
        format: DisplayFormat,
    ) -> Self {
        Self {
            name,
            comment,
            width,
            kind: ElementKind::Variable { value: 0, format },
        }
    }

    pub fn enumeration(
        name: &'static str,
        comment: &'static str,
        width: usize,
        options: &'static [(&'static str, u64)],
    ) -> Self {
        let value = options.first().map(|(_, v)| *v).unwrap_or(0);
        Self {
            name,
            comment,
            width,
            kind: ElementKind::Enum { options, value },
        }
    }

    pub fn bitmap(
        name: &'static str,
        comment: &'static str,
        width: usize,
        flags: &'static [(&'static str, u64)],
    ) -> Self {
        Self {
            name,
            comment,
            width,
            kind: ElementKind::Bitmap { flags, value: 0 },
        }
    }

    pub fn auto(name: &'static str, comment: &'static str, width: usize, rule: AutoRule) -> Self {
        Self {
            name,
            comment,
            width,
            kind: ElementKind::Auto { rule, value: 0 },
        }
    }

    pub fn string_link(name: &'static str, comment: &'static str, width: usize) -> Self {
        Self {
            name,
            comment,
            width,
            kind: ElementKind::StringLink {
                candidates: Vec::new(),
                value: 0,
            },
        }
    }

    pub fn text(name: &'static str, comment: &'static str) -> Self {
        Self {
            name,
            comment,
            width: 0,
            kind: ElementKind::Text {
                value: String::new(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn comment(&self) -> &'static str {
        self.comment
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Encoded byte length: the declared width, except for text elements
    /// whose length follows their current value.
    pub fn length(&self) -> usize {
        match &self.kind {
            ElementKind::Text { value } => value.len(),
            _ => self.width,
        }
    }

    /// Current numeric value; text elements have none.
    pub fn value(&self) -> Option<u64> {
        match &self.kind {
            ElementKind::Constant { value }
            | ElementKind::Variable { value, .. }
            | ElementKind::Enum { value, .. }
            | ElementKind::Bitmap { value, .. }
            | ElementKind::Auto { value, .. }
            | ElementKind::StringLink { value, .. } => Some(*value),
            ElementKind::Text { .. } => None,
        }
    }

    /// Current text value of a text element.
    pub fn text_value(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { value } => Some(value),
            _ => None,
        }
    }

    /// Set the value of a user-editable numeric element.
    ///
    /// Returns false for constant, auto, and text elements, which cannot be
    /// assigned a numeric value by the caller.
    pub fn set_value(&mut self, new_value: u64) -> bool {
        match &mut self.kind {
            ElementKind::Variable { value, .. }
            | ElementKind::Enum { value, .. }
            | ElementKind::Bitmap { value, .. }
            | ElementKind::StringLink { value, .. } => {
                *value = new_value;
                true
            }
            ElementKind::Constant { .. } | ElementKind::Auto { .. } | ElementKind::Text { .. } => {
                false
            }
        }
    }

    /// Set the value of a text element. Returns false for any other kind.
    pub fn set_text(&mut self, new_value: &str) -> bool {
        match &mut self.kind {
            ElementKind::Text { value } => {
                *value = new_value.to_string();
                true
            }
            _ => false,
        }
    }

    /// Store a recomputed value into an auto element.
    pub(crate) fn store_auto(&mut self, new_value: u64) {
        if let ElementKind::Auto { value, .. } = &mut self.kind {
            *value = new_value;
        }
    }

    /// Replace the candidate set of a string link element.
    ///
    /// The current value is left untouched; a selection whose string was
    /// removed becomes invalid rather than being corrected.
    pub(crate) fn rebuild_candidates(&mut self, new_candidates: &[Choice]) {
        if let ElementKind::StringLink { candidates, .. } = &mut self.kind {
            *candidates = new_candidates.to_vec();
        }
    }

    /// The choices offered to an editor, for elements that have any.
    pub fn choices(&self) -> Option<Vec<Choice>> {
        match &self.kind {
            ElementKind::Enum { options, .. } | ElementKind::Bitmap { flags: options, .. } => {
                Some(
                    options
                        .iter()
                        .map(|(label, value)| Choice {
                            label: (*label).to_string(),
                            value: *value,
                        })
                        .collect(),
                )
            }
            ElementKind::StringLink { candidates, .. } => Some(candidates.clone()),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        match &self.kind {
            ElementKind::Variable { value, .. } => {
                let bits = 8 * self.width as u32;
                bits >= 64 || *value < (1u64 << bits)
            }
            ElementKind::Enum { options, value } => options.iter().any(|(_, v)| v == value),
            ElementKind::StringLink { candidates, value } => {
                *value == 0 || candidates.iter().any(|c| c.value == *value)
            }
            _ => true,
        }
    }

    /// Encode the element's current value as its wire bytes.
    ///
    /// Numeric elements emit their declared width little-endian; text
    /// elements emit their raw UTF-8 bytes. Only widths of 1, 2, and 4
    /// bytes have a defined encoding.
    pub fn encode(&self) -> Result<Vec<u8>, ElementError> {
        if let ElementKind::Text { value } = &self.kind {
            return Ok(value.as_bytes().to_vec());
        }

        let value = self.value().unwrap_or(0);
        match self.width {
            1 => Ok(vec![value as u8]),
            2 => Ok((value as u16).to_le_bytes().to_vec()),
            4 => Ok((value as u32).to_le_bytes().to_vec()),
            width => Err(ElementError::UnsupportedWidth(width)),
        }
    }

    pub fn to_structured(&self) -> StructuredElement {
        let value = match &self.kind {
            ElementKind::Text { value } => StructuredValue::Text(value.clone()),
            _ => StructuredValue::Number(self.value().unwrap_or(0)),
        };
        StructuredElement {
            name: self.name.to_string(),
            value,
        }
    }
}

/// One element in the structured document export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredElement {
    pub name: String,
    pub value: StructuredValue,
}

/// Element value in the structured document export
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredValue {
    Number(u64),
    Text(String),
}
