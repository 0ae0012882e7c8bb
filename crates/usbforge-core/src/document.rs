//! The descriptor document: arena forest, recomputation, and export
//!
//! The document owns every descriptor node in an arena keyed by stable
//! [`NodeId`] handles; parent/child links and the root list are handle lists.
//! Every mutation runs the recomputation passes and index assignment before
//! returning, so derived state is always consistent when read.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::descriptor::{Descriptor, DescriptorKind};
use crate::element::{AutoRule, Choice, ElementError, ElementKind, StructuredElement};

/// Version tag embedded in structured exports
pub const FORMAT_VERSION: &str = "1.0";

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("{0} is not permitted at the document root")]
    InvalidRootType(DescriptorKind),
    #[error("{parent} cannot contain a {child}")]
    InvalidChildType {
        parent: DescriptorKind,
        child: DescriptorKind,
    },
    #[error("Descriptor not found in document")]
    NotFound,
    #[error("Unknown element: {0}")]
    UnknownElement(String),
    #[error("Element {0} is not user-editable")]
    ImmutableElement(String),
    #[error("Encoding error: {0}")]
    Element(#[from] ElementError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stable handle to a descriptor node in a document's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An editable forest of USB descriptors
///
/// A new document seeds the standard minimal set: one Device descriptor, one
/// String Zero descriptor for the language table, and one Configuration.
pub struct Document {
    nodes: HashMap<NodeId, Descriptor>,
    roots: Vec<NodeId>,
    next_id: u64,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            next_id: 0,
        };
        for kind in [
            DescriptorKind::Device,
            DescriptorKind::StringZero,
            DescriptorKind::Configuration,
        ] {
            let id = doc.alloc(kind);
            doc.roots.push(id);
        }
        doc.refresh();
        doc.assign_indices();
        doc
    }

    fn alloc(&mut self, kind: DescriptorKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Descriptor::new(kind));
        id
    }

    /// Top-level descriptors in document order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&Descriptor> {
        self.nodes.get(&id)
    }

    pub fn is_valid(&self, id: NodeId) -> Option<bool> {
        self.nodes.get(&id).map(|node| node.is_valid())
    }

    pub fn length(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(&id).map(|node| node.length())
    }

    pub fn permitted_child_kinds(&self, id: NodeId) -> Option<&'static [DescriptorKind]> {
        self.nodes.get(&id).map(|node| node.permitted_children())
    }

    /// Byte length of a descriptor plus all of its descendants.
    pub fn subtree_length(&self, id: NodeId) -> Option<usize> {
        let node = self.nodes.get(&id)?;
        let mut total = node.length();
        for child in node.children() {
            total += self.subtree_length(*child).unwrap_or(0);
        }
        Some(total)
    }

    /// Append a top-level descriptor.
    pub fn add_root(&mut self, kind: DescriptorKind) -> Result<NodeId, DocumentError> {
        if !kind.is_root_kind() {
            return Err(DocumentError::InvalidRootType(kind));
        }
        let id = self.alloc(kind);
        self.roots.push(id);
        info!(kind = %kind, id = %id, "root descriptor added");
        self.refresh();
        self.assign_indices();
        Ok(id)
    }

    /// Append a child descriptor under `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        kind: DescriptorKind,
    ) -> Result<NodeId, DocumentError> {
        let parent_node = self.nodes.get(&parent).ok_or(DocumentError::NotFound)?;
        if !parent_node.can_have_child(kind) {
            return Err(DocumentError::InvalidChildType {
                parent: parent_node.kind(),
                child: kind,
            });
        }
        let id = self.alloc(kind);
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children_mut().push(id);
        }
        info!(kind = %kind, parent = %parent, id = %id, "child descriptor added");
        self.refresh();
        self.assign_indices();
        Ok(id)
    }

    /// Remove a descriptor and its whole subtree.
    pub fn remove(&mut self, target: NodeId) -> Result<(), DocumentError> {
        if let Some(position) = self.roots.iter().position(|id| *id == target) {
            self.roots.remove(position);
        } else {
            let parent = self
                .nodes
                .iter()
                .find_map(|(id, node)| node.children().contains(&target).then_some(*id))
                .ok_or(DocumentError::NotFound)?;
            if let Some(node) = self.nodes.get_mut(&parent) {
                node.children_mut().retain(|id| *id != target);
            }
        }

        let mut subtree = Vec::new();
        self.collect_subtree(target, &mut subtree);
        for id in &subtree {
            self.nodes.remove(id);
        }
        info!(id = %target, removed = subtree.len(), "descriptor removed");
        self.refresh();
        self.assign_indices();
        Ok(())
    }

    /// Set a user-editable numeric element on a descriptor.
    pub fn set_value(
        &mut self,
        id: NodeId,
        element: &str,
        value: u64,
    ) -> Result<(), DocumentError> {
        let node = self.nodes.get_mut(&id).ok_or(DocumentError::NotFound)?;
        let el = node
            .element_mut(element)
            .ok_or_else(|| DocumentError::UnknownElement(element.to_string()))?;
        if !el.set_value(value) {
            return Err(DocumentError::ImmutableElement(element.to_string()));
        }
        self.refresh();
        Ok(())
    }

    /// Set the text payload of a string descriptor's text element.
    pub fn set_text(&mut self, id: NodeId, element: &str, text: &str) -> Result<(), DocumentError> {
        let node = self.nodes.get_mut(&id).ok_or(DocumentError::NotFound)?;
        let el = node
            .element_mut(element)
            .ok_or_else(|| DocumentError::UnknownElement(element.to_string()))?;
        if !el.set_text(text) {
            return Err(DocumentError::ImmutableElement(element.to_string()));
        }
        self.refresh();
        Ok(())
    }

    /// Recompute all derived element state.
    ///
    /// Idempotent and side-effect free beyond the recomputed values; runs
    /// the auto pass depth-first (children before parents) and then rebuilds
    /// every string link's candidate set.
    pub fn refresh(&mut self) {
        let roots = self.roots.clone();
        for id in roots {
            self.refresh_autos_in(id);
        }
        self.refresh_string_links();
    }

    fn refresh_autos_in(&mut self, id: NodeId) -> usize {
        let Some(node) = self.nodes.get(&id) else {
            return 0;
        };
        let children = node.children().to_vec();

        let mut child_lengths = 0;
        let mut child_counts: HashMap<DescriptorKind, u64> = HashMap::new();
        for child in &children {
            child_lengths += self.refresh_autos_in(*child);
            if let Some(kind) = self.nodes.get(child).map(|n| n.kind()) {
                *child_counts.entry(kind).or_insert(0) += 1;
            }
        }

        let Some(node) = self.nodes.get_mut(&id) else {
            return 0;
        };
        let own_length = node.length();
        for element in node.elements_mut() {
            let rule = match element.kind() {
                ElementKind::Auto { rule, .. } => *rule,
                _ => continue,
            };
            let value = match rule {
                AutoRule::OwnLength => own_length as u64,
                AutoRule::ChildCountOf(kind) => child_counts.get(&kind).copied().unwrap_or(0),
                AutoRule::SubtreeLength => (own_length + child_lengths) as u64,
            };
            element.store_auto(value);
        }
        own_length + child_lengths
    }

    fn refresh_string_links(&mut self) {
        let strings = self.collect_strings();
        let candidates: Vec<Choice> = strings
            .iter()
            .enumerate()
            .map(|(position, id)| {
                let text = self.nodes.get(id).and_then(|n| n.text()).unwrap_or("");
                // String indices are 1-based; 0 is reserved for the language table.
                Choice {
                    label: format!("{} (index {})", text, position + 1),
                    value: (position + 1) as u64,
                }
            })
            .collect();
        debug!(strings = strings.len(), "string link candidates rebuilt");

        let ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for id in ids {
            if let Some(node) = self.nodes.get_mut(&id) {
                for element in node.elements_mut() {
                    element.rebuild_candidates(&candidates);
                }
            }
        }
    }

    /// String descriptors in forest order: root order, depth-first within.
    fn collect_strings(&self) -> Vec<NodeId> {
        let mut strings = Vec::new();
        for root in &self.roots {
            self.collect_strings_in(*root, &mut strings);
        }
        strings
    }

    fn collect_strings_in(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if node.kind() == DescriptorKind::String {
            out.push(id);
        }
        for child in node.children() {
            self.collect_strings_in(*child, out);
        }
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        out.push(id);
        for child in node.children() {
            self.collect_subtree(*child, out);
        }
    }

    /// Assign per-type indices to top-level descriptors.
    ///
    /// Counters start at 0 for every kind except String, which starts at 1
    /// because index 0 names the language table. Nested descriptors are not
    /// numbered by this pass.
    pub fn assign_indices(&mut self) {
        let mut counters: HashMap<DescriptorKind, u32> = HashMap::new();
        counters.insert(DescriptorKind::String, 1);

        let roots = self.roots.clone();
        for id in roots {
            if let Some(node) = self.nodes.get_mut(&id) {
                let counter = counters.entry(node.kind()).or_insert(0);
                node.set_index(*counter);
                *counter += 1;
            }
        }
    }

    /// Encode the whole forest as a contiguous byte stream, depth-first.
    pub fn export_binary(&self) -> Result<Vec<u8>, DocumentError> {
        let mut bytes = Vec::new();
        for root in &self.roots {
            self.encode_subtree(*root, &mut bytes)?;
        }
        Ok(bytes)
    }

    fn encode_subtree(&self, id: NodeId, out: &mut Vec<u8>) -> Result<(), DocumentError> {
        let Some(node) = self.nodes.get(&id) else {
            return Ok(());
        };
        out.extend_from_slice(&node.encode()?);
        for child in node.children() {
            self.encode_subtree(*child, out)?;
        }
        Ok(())
    }

    /// Export the forest as a structured document for tooling.
    pub fn export_structured(&self) -> StructuredDocument {
        StructuredDocument {
            generated_at: Utc::now(),
            format_version: FORMAT_VERSION.to_string(),
            descriptors: self
                .roots
                .iter()
                .filter_map(|id| self.structured_subtree(*id))
                .collect(),
        }
    }

    /// Structured export serialized as pretty-printed JSON.
    pub fn export_structured_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.export_structured())?)
    }

    fn structured_subtree(&self, id: NodeId) -> Option<StructuredDescriptor> {
        let node = self.nodes.get(&id)?;
        Some(StructuredDescriptor {
            name: node.name().to_string(),
            index: node.index(),
            elements: node.structured_elements(),
            children: node
                .children()
                .iter()
                .filter_map(|child| self.structured_subtree(*child))
                .collect(),
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Structured export of a whole document
#[derive(Debug, Clone, Serialize)]
pub struct StructuredDocument {
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "formatVersion")]
    pub format_version: String,
    pub descriptors: Vec<StructuredDescriptor>,
}

/// Structured export of one descriptor subtree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredDescriptor {
    pub name: String,
    pub index: u32,
    pub elements: Vec<StructuredElement>,
    pub children: Vec<StructuredDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config(doc: &Document) -> NodeId {
        *doc.roots()
            .iter()
            .find(|id| doc.node(**id).map(|n| n.kind()) == Some(DescriptorKind::Configuration))
            .unwrap()
    }

    fn default_device(doc: &Document) -> NodeId {
        *doc.roots()
            .iter()
            .find(|id| doc.node(**id).map(|n| n.kind()) == Some(DescriptorKind::Device))
            .unwrap()
    }

    fn element_value(doc: &Document, id: NodeId, name: &str) -> u64 {
        doc.node(id).unwrap().element(name).unwrap().value().unwrap()
    }

    #[test]
    fn test_new_document_seeds_standard_roots() {
        let doc = Document::new();
        let kinds: Vec<_> = doc
            .roots()
            .iter()
            .map(|id| doc.node(*id).unwrap().kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                DescriptorKind::Device,
                DescriptorKind::StringZero,
                DescriptorKind::Configuration,
            ]
        );
        for id in doc.roots() {
            assert_eq!(doc.node(*id).unwrap().index(), 0);
            assert_eq!(doc.is_valid(*id), Some(true));
        }
        // bLength fields are populated by the initial pass.
        assert_eq!(element_value(&doc, default_device(&doc), "bLength"), 18);
    }

    #[test]
    fn test_add_root_rejects_non_root_kinds() {
        let mut doc = Document::new();
        for kind in [
            DescriptorKind::Endpoint,
            DescriptorKind::Interface,
            DescriptorKind::DeviceQualifier,
            DescriptorKind::Hid,
        ] {
            assert!(matches!(
                doc.add_root(kind),
                Err(DocumentError::InvalidRootType(k)) if k == kind
            ));
        }
        assert_eq!(doc.roots().len(), 3);
    }

    #[test]
    fn test_add_child_enforces_permitted_kinds() {
        let mut doc = Document::new();
        let config = default_config(&doc);
        let device = default_device(&doc);

        let iface = doc.add_child(config, DescriptorKind::Interface).unwrap();
        doc.add_child(iface, DescriptorKind::Endpoint).unwrap();

        assert!(matches!(
            doc.add_child(config, DescriptorKind::Endpoint),
            Err(DocumentError::InvalidChildType {
                parent: DescriptorKind::Configuration,
                child: DescriptorKind::Endpoint,
            })
        ));
        assert!(matches!(
            doc.add_child(device, DescriptorKind::Interface),
            Err(DocumentError::InvalidChildType { .. })
        ));
    }

    #[test]
    fn test_add_child_unknown_parent() {
        let mut doc = Document::new();
        let config = default_config(&doc);
        doc.remove(config).unwrap();
        assert!(matches!(
            doc.add_child(config, DescriptorKind::Interface),
            Err(DocumentError::NotFound)
        ));
    }

    #[test]
    fn test_length_consistency_after_refresh() {
        let mut doc = Document::new();
        let config = default_config(&doc);
        let iface = doc.add_child(config, DescriptorKind::Interface).unwrap();
        doc.add_child(iface, DescriptorKind::Endpoint).unwrap();
        doc.add_child(iface, DescriptorKind::Endpoint).unwrap();

        // 9 (config) + 9 (interface) + 7 + 7 (endpoints)
        assert_eq!(doc.subtree_length(config), Some(32));
        assert_eq!(element_value(&doc, config, "wTotalLength"), 32);
        assert_eq!(element_value(&doc, config, "bLength"), 9);
        assert_eq!(element_value(&doc, iface, "bNumEndpoints"), 2);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut doc = Document::new();
        let config = default_config(&doc);
        let iface = doc.add_child(config, DescriptorKind::Interface).unwrap();
        doc.add_child(iface, DescriptorKind::Endpoint).unwrap();

        let before = doc.export_binary().unwrap();
        doc.refresh();
        doc.refresh();
        assert_eq!(doc.export_binary().unwrap(), before);
    }

    #[test]
    fn test_index_assignment_per_type() {
        let mut doc = Document::new();
        doc.remove(default_config(&doc)).unwrap();

        let first = doc.add_root(DescriptorKind::Configuration).unwrap();
        let second = doc.add_root(DescriptorKind::Configuration).unwrap();
        assert_eq!(doc.node(first).unwrap().index(), 0);
        assert_eq!(doc.node(second).unwrap().index(), 1);

        // Other types keep their own counters.
        assert_eq!(doc.node(default_device(&doc)).unwrap().index(), 0);
    }

    #[test]
    fn test_string_indices_start_at_one() {
        let mut doc = Document::new();
        let first = doc.add_root(DescriptorKind::String).unwrap();
        let second = doc.add_root(DescriptorKind::String).unwrap();
        assert_eq!(doc.node(first).unwrap().index(), 1);
        assert_eq!(doc.node(second).unwrap().index(), 2);
    }

    #[test]
    fn test_index_assignment_is_deterministic() {
        let mut doc = Document::new();
        doc.add_root(DescriptorKind::String).unwrap();
        doc.add_root(DescriptorKind::Configuration).unwrap();

        let snapshot: Vec<_> = doc
            .roots()
            .iter()
            .map(|id| doc.node(*id).unwrap().index())
            .collect();
        doc.assign_indices();
        let again: Vec<_> = doc
            .roots()
            .iter()
            .map(|id| doc.node(*id).unwrap().index())
            .collect();
        assert_eq!(snapshot, again);
    }

    #[test]
    fn test_string_link_scenario() {
        let mut doc = Document::new();
        let device = default_device(&doc);

        let string = doc.add_root(DescriptorKind::String).unwrap();
        doc.set_text(string, "bString", "Acme Inc").unwrap();

        let manufacturer = |doc: &Document| {
            doc.node(device)
                .unwrap()
                .element("iManufacturer")
                .unwrap()
                .clone()
        };

        let choices = manufacturer(&doc).choices().unwrap();
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].value, 1);
        assert_eq!(choices[0].label, "Acme Inc (index 1)");

        doc.set_value(device, "iManufacturer", 1).unwrap();
        assert!(manufacturer(&doc).is_valid());
        assert_eq!(doc.is_valid(device), Some(true));

        doc.set_value(device, "iManufacturer", 2).unwrap();
        assert!(!manufacturer(&doc).is_valid());
        assert_eq!(doc.is_valid(device), Some(false));
    }

    #[test]
    fn test_string_link_candidate_count_tracks_strings() {
        let mut doc = Document::new();
        let device = default_device(&doc);
        let link_choices = |doc: &Document| {
            doc.node(device)
                .unwrap()
                .element("iProduct")
                .unwrap()
                .choices()
                .unwrap()
                .len()
        };
        assert_eq!(link_choices(&doc), 0);

        let a = doc.add_root(DescriptorKind::String).unwrap();
        let b = doc.add_root(DescriptorKind::String).unwrap();
        assert_eq!(link_choices(&doc), 2);

        doc.remove(a).unwrap();
        assert_eq!(link_choices(&doc), 1);
        doc.remove(b).unwrap();
        assert_eq!(link_choices(&doc), 0);
    }

    #[test]
    fn test_removed_string_invalidates_selection_without_correction() {
        let mut doc = Document::new();
        let device = default_device(&doc);
        let string = doc.add_root(DescriptorKind::String).unwrap();
        doc.set_value(device, "iSerialNumber", 1).unwrap();
        assert_eq!(doc.is_valid(device), Some(true));

        doc.remove(string).unwrap();
        let link = doc.node(device).unwrap().element("iSerialNumber").unwrap();
        // Value is kept; only the candidate set changed.
        assert_eq!(link.value(), Some(1));
        assert!(!link.is_valid());

        doc.set_value(device, "iSerialNumber", 0).unwrap();
        assert_eq!(doc.is_valid(device), Some(true));
    }

    #[test]
    fn test_deep_removal_leaves_rest_of_forest_intact() {
        let mut doc = Document::new();
        let config = default_config(&doc);
        let iface = doc.add_child(config, DescriptorKind::Interface).unwrap();
        let keep = doc.add_child(iface, DescriptorKind::Endpoint).unwrap();
        let victim = doc.add_child(iface, DescriptorKind::Endpoint).unwrap();

        doc.remove(victim).unwrap();

        assert!(doc.node(victim).is_none());
        assert!(doc.node(keep).is_some());
        assert_eq!(doc.node(iface).unwrap().children(), &[keep]);
        assert_eq!(element_value(&doc, iface, "bNumEndpoints"), 1);
        assert_eq!(element_value(&doc, config, "wTotalLength"), 25);

        assert!(matches!(doc.remove(victim), Err(DocumentError::NotFound)));
    }

    #[test]
    fn test_removal_destroys_whole_subtree() {
        let mut doc = Document::new();
        let config = default_config(&doc);
        let iface = doc.add_child(config, DescriptorKind::Interface).unwrap();
        let endpoint = doc.add_child(iface, DescriptorKind::Endpoint).unwrap();

        doc.remove(iface).unwrap();
        assert!(doc.node(iface).is_none());
        assert!(doc.node(endpoint).is_none());
        assert!(doc.node(config).unwrap().children().is_empty());
        assert_eq!(element_value(&doc, config, "wTotalLength"), 9);
    }

    #[test]
    fn test_set_value_rules() {
        let mut doc = Document::new();
        let device = default_device(&doc);

        doc.set_value(device, "idVendor", 0x1209).unwrap();
        assert_eq!(element_value(&doc, device, "idVendor"), 0x1209);

        assert!(matches!(
            doc.set_value(device, "bLength", 1),
            Err(DocumentError::ImmutableElement(_))
        ));
        assert!(matches!(
            doc.set_value(device, "bNoSuchField", 1),
            Err(DocumentError::UnknownElement(_))
        ));

        let config = default_config(&doc);
        doc.remove(config).unwrap();
        assert!(matches!(
            doc.set_value(config, "bMaxPower", 50),
            Err(DocumentError::NotFound)
        ));
    }

    #[test]
    fn test_set_text_updates_derived_lengths() {
        let mut doc = Document::new();
        let string = doc.add_root(DescriptorKind::String).unwrap();
        assert_eq!(element_value(&doc, string, "bLength"), 2);

        doc.set_text(string, "bString", "Acme Inc").unwrap();
        assert_eq!(element_value(&doc, string, "bLength"), 10);
        assert_eq!(doc.length(string), Some(10));

        assert!(matches!(
            doc.set_text(string, "bLength", "nope"),
            Err(DocumentError::ImmutableElement(_))
        ));
    }

    #[test]
    fn test_export_binary_layout() {
        let doc = Document::new();
        let bytes = doc.export_binary().unwrap();
        // Device (18) + String Zero (4) + Configuration (9)
        assert_eq!(bytes.len(), 31);
        assert_eq!(bytes[0], 18); // device bLength
        assert_eq!(bytes[1], 1); // DEVICE type tag
        assert_eq!(bytes[18], 4); // string zero bLength
        assert_eq!(bytes[19], 3); // STRING type tag
        assert_eq!(bytes[22], 9); // configuration bLength
        assert_eq!(bytes[23], 2); // CONFIGURATION type tag
        assert_eq!(&bytes[24..26], &[9, 0]); // wTotalLength, little-endian
    }

    #[test]
    fn test_export_binary_is_depth_first() {
        let mut doc = Document::new();
        let config = default_config(&doc);
        let iface = doc.add_child(config, DescriptorKind::Interface).unwrap();
        doc.add_child(iface, DescriptorKind::Endpoint).unwrap();

        let bytes = doc.export_binary().unwrap();
        assert_eq!(bytes.len(), 18 + 4 + 9 + 9 + 7);
        // Configuration, then its interface, then the endpoint.
        assert_eq!(bytes[22 + 1], 2);
        assert_eq!(bytes[31 + 1], 4);
        assert_eq!(bytes[40 + 1], 5);
    }

    #[test]
    fn test_structured_export_is_pure_modulo_timestamp() {
        let mut doc = Document::new();
        let config = default_config(&doc);
        let iface = doc.add_child(config, DescriptorKind::Interface).unwrap();
        doc.add_child(iface, DescriptorKind::Endpoint).unwrap();
        doc.add_root(DescriptorKind::String).unwrap();

        let first = doc.export_structured();
        let second = doc.export_structured();
        assert_eq!(first.format_version, second.format_version);
        assert_eq!(first.descriptors, second.descriptors);
    }

    #[test]
    fn test_structured_export_field_names() {
        let doc = Document::new();
        let value = serde_json::to_value(doc.export_structured()).unwrap();
        assert!(value.get("generatedAt").is_some());
        assert_eq!(value["formatVersion"], "1.0");
        let descriptors = value["descriptors"].as_array().unwrap();
        assert_eq!(descriptors.len(), 3);
        assert_eq!(descriptors[0]["name"], "Device Descriptor");
        assert_eq!(descriptors[0]["elements"][0]["name"], "bLength");
        assert_eq!(descriptors[0]["elements"][0]["value"], 18);
        assert!(descriptors[0]["children"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_structured_export_nests_children() {
        let mut doc = Document::new();
        let config = default_config(&doc);
        let iface = doc.add_child(config, DescriptorKind::Interface).unwrap();
        doc.add_child(iface, DescriptorKind::Endpoint).unwrap();

        let export = doc.export_structured();
        let config_tree = export
            .descriptors
            .iter()
            .find(|d| d.name == "Configuration Descriptor")
            .unwrap();
        assert_eq!(config_tree.children.len(), 1);
        assert_eq!(config_tree.children[0].name, "Interface Descriptor");
        assert_eq!(config_tree.children[0].children.len(), 1);
        assert_eq!(
            config_tree.children[0].children[0].name,
            "Endpoint Descriptor"
        );
    }

    #[test]
    fn test_export_structured_json_round_trips_as_json() {
        let doc = Document::new();
        let json = doc.export_structured_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["formatVersion"], "1.0");
    }
}
