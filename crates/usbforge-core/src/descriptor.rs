//! The closed descriptor catalog: kinds, schemas, and child rules
//!
//! Each descriptor kind has a fixed element schema (order is emission order)
//! and a fixed set of permitted child kinds. Schemas are instantiated at
//! construction and never change shape afterwards; only element values and
//! string link candidate sets are updated.

use serde::{Deserialize, Serialize};

use crate::document::NodeId;
use crate::element::{AutoRule, DisplayFormat, Element, ElementError, StructuredElement};
use crate::langid::LANGIDS;

/// The closed set of descriptor record types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorKind {
    Device,
    DeviceQualifier,
    Configuration,
    OtherSpeedConfiguration,
    Interface,
    InterfaceAssociation,
    StringZero,
    String,
    Endpoint,
    DfuFunctional,
    Hid,
}

/// Kinds permitted at the document root
pub const ROOT_KINDS: &[DescriptorKind] = &[
    DescriptorKind::Device,
    DescriptorKind::Configuration,
    DescriptorKind::OtherSpeedConfiguration,
    DescriptorKind::String,
    DescriptorKind::StringZero,
];

impl DescriptorKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Device => "Device Descriptor",
            Self::DeviceQualifier => "Device Qualifier Descriptor",
            Self::Configuration => "Configuration Descriptor",
            Self::OtherSpeedConfiguration => "Other Speed Configuration Descriptor",
            Self::Interface => "Interface Descriptor",
            Self::InterfaceAssociation => "Interface Association Descriptor",
            Self::StringZero => "String Zero Descriptor",
            Self::String => "String Descriptor",
            Self::Endpoint => "Endpoint Descriptor",
            Self::DfuFunctional => "DFU Functional Descriptor",
            Self::Hid => "HID Descriptor",
        }
    }

    /// Look up a kind by its display name, as used by editor frontends.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            Self::Device,
            Self::DeviceQualifier,
            Self::Configuration,
            Self::OtherSpeedConfiguration,
            Self::Interface,
            Self::InterfaceAssociation,
            Self::StringZero,
            Self::String,
            Self::Endpoint,
            Self::DfuFunctional,
            Self::Hid,
        ]
        .into_iter()
        .find(|kind| kind.display_name() == name)
    }

    /// Kinds this descriptor may parent; empty for leaf-only kinds.
    pub fn permitted_children(&self) -> &'static [DescriptorKind] {
        match self {
            Self::Configuration | Self::OtherSpeedConfiguration => &[
                DescriptorKind::Interface,
                DescriptorKind::InterfaceAssociation,
                DescriptorKind::DeviceQualifier,
            ],
            Self::Interface => &[
                DescriptorKind::Endpoint,
                DescriptorKind::DfuFunctional,
                DescriptorKind::Hid,
            ],
            _ => &[],
        }
    }

    pub fn is_root_kind(&self) -> bool {
        ROOT_KINDS.contains(self)
    }
}

impl std::fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

const USB_RELEASES: &[(&str, u64)] = &[
    ("1.0", 0x0100),
    ("1.1", 0x0110),
    ("2.0", 0x0200),
    ("3.0", 0x0300),
];

const MAX_PACKET_SIZES: &[(&str, u64)] = &[
    ("8 bytes", 8),
    ("16 bytes", 16),
    ("32 bytes", 32),
    ("64 bytes", 64),
];

const DEVICE_CLASSES: &[(&str, u64)] = &[
    ("Use class information in the interface descriptors", 0x00),
    ("Communication and CDC Control", 0x02),
    ("Hub", 0x09),
    ("Billboard Device Class", 0x11),
    ("Diagnostic Device", 0xdc),
    ("Miscellaneous", 0xef),
    ("Vendor-specific", 0xff),
];

const INTERFACE_CLASSES: &[(&str, u64)] = &[
    ("Audio", 0x01),
    ("Communication and CDC Control", 0x02),
    ("HID", 0x03),
    ("Physical", 0x05),
    ("Image", 0x06),
    ("Printer", 0x07),
    ("Mass Storage", 0x08),
    ("CDC Data", 0x0a),
    ("Smart Card", 0x0b),
    ("Content Security", 0x0d),
    ("Video", 0x0e),
    ("Personal Healthcare", 0x0f),
    ("Audio/Video Devices", 0x10),
    ("USB Type-C Bridge Class", 0x12),
    ("USB Bulk Display Protocol Device Class", 0x13),
    ("MCTP over USB Protocol Endpoint Device Class", 0x14),
    ("I3C Device Class", 0x3c),
    ("Diagnostic Device", 0xdc),
    ("Wireless Controller", 0xe0),
    ("Miscellaneous", 0xef),
    ("Application specific", 0xfe),
    ("Vendor-specific", 0xff),
];

const FUNCTION_CLASSES: &[(&str, u64)] = &[
    ("Defined in interface descriptor", 0),
    ("Audio", 1),
    ("Communication and CDC Control", 2),
    ("HID", 3),
    ("Mass Storage", 8),
    ("Hub", 9),
    ("CDC Data", 10),
    ("Vendor-specific", 255),
];

const CONFIGURATION_ATTRIBUTES: &[(&str, u64)] = &[
    ("Bus-powered", 0x80),
    ("Self-powered", 0x40),
    ("Remote wakeup", 0x20),
];

const TRANSFER_TYPES: &[(&str, u64)] = &[
    ("Control", 0x00),
    ("Isochronous", 0x01),
    ("Bulk", 0x02),
    ("Interrupt", 0x03),
];

const DFU_ATTRIBUTES: &[(&str, u64)] = &[
    ("Can download", 0x01),
    ("Can upload", 0x02),
    ("Manifestation tolerant", 0x04),
    ("Will detach", 0x08),
];

fn device_elements() -> Vec<Element> {
    vec![
        Element::auto(
            "bLength",
            "Length of descriptor in bytes",
            1,
            AutoRule::OwnLength,
        ),
        Element::constant("bDescriptorType", "DEVICE descriptor type", 1, 1),
        Element::enumeration("bcdUSB", "USB specification release number", 2, USB_RELEASES),
        Element::enumeration("bDeviceClass", "Class code", 1, DEVICE_CLASSES),
        Element::variable("bDeviceSubClass", "Subclass code", 1, DisplayFormat::Hex),
        Element::variable("bDeviceProtocol", "Protocol code", 1, DisplayFormat::Hex),
        Element::enumeration(
            "bMaxPacketSize0",
            "Maximum packet size for endpoint 0",
            1,
            MAX_PACKET_SIZES,
        ),
        Element::variable("idVendor", "Vendor ID", 2, DisplayFormat::Hex),
        Element::variable("idProduct", "Product ID", 2, DisplayFormat::Hex),
        Element::variable("bcdDevice", "Device release number", 2, DisplayFormat::Hex),
        Element::string_link("iManufacturer", "Index of manufacturer string descriptor", 1),
        Element::string_link("iProduct", "Index of product string descriptor", 1),
        Element::string_link("iSerialNumber", "Index of serial number string descriptor", 1),
        Element::auto(
            "bNumConfigurations",
            "Number of configurations",
            1,
            AutoRule::ChildCountOf(DescriptorKind::Configuration),
        ),
    ]
}

fn device_qualifier_elements() -> Vec<Element> {
    vec![
        Element::auto(
            "bLength",
            "Length of descriptor in bytes",
            1,
            AutoRule::OwnLength,
        ),
        Element::constant("bDescriptorType", "DEVICE QUALIFIER descriptor type", 1, 6),
        Element::enumeration("bcdUSB", "USB specification release number", 2, USB_RELEASES),
        Element::enumeration("bDeviceClass", "Class code", 1, DEVICE_CLASSES),
        Element::variable("bDeviceSubClass", "Subclass code", 1, DisplayFormat::Hex),
        Element::variable("bDeviceProtocol", "Protocol code", 1, DisplayFormat::Hex),
        Element::enumeration(
            "bMaxPacketSize0",
            "Maximum packet size for endpoint 0",
            1,
            MAX_PACKET_SIZES,
        ),
        Element::variable(
            "bNumConfigurations",
            "Number of configurations",
            1,
            DisplayFormat::Dec,
        ),
        Element::constant("bReserved", "Reserved", 1, 0),
    ]
}

fn configuration_elements(descriptor_type: u64) -> Vec<Element> {
    vec![
        Element::auto(
            "bLength",
            "Length of descriptor in bytes",
            1,
            AutoRule::OwnLength,
        ),
        Element::constant(
            "bDescriptorType",
            "CONFIGURATION descriptor type",
            1,
            descriptor_type,
        ),
        Element::auto(
            "wTotalLength",
            "Total length of configuration descriptor",
            2,
            AutoRule::SubtreeLength,
        ),
        Element::variable(
            "bNumInterfaces",
            "Number of interfaces in configuration",
            1,
            DisplayFormat::Dec,
        ),
        Element::variable(
            "bConfigurationValue",
            "Value to select configuration",
            1,
            DisplayFormat::Dec,
        ),
        Element::string_link(
            "iConfiguration",
            "Index of configuration string descriptor",
            1,
        ),
        Element::bitmap(
            "bmAttributes",
            "Configuration characteristics",
            1,
            CONFIGURATION_ATTRIBUTES,
        ),
        Element::variable(
            "bMaxPower",
            "Maximum power consumption in 2mA units",
            1,
            DisplayFormat::Dec,
        ),
    ]
}

fn string_zero_elements() -> Vec<Element> {
    vec![
        Element::auto(
            "bLength",
            "Length of descriptor in bytes",
            1,
            AutoRule::OwnLength,
        ),
        Element::constant("bDescriptorType", "STRING descriptor type", 1, 3),
        Element::enumeration("wLANGID", "Language ID", 2, LANGIDS),
    ]
}

fn string_elements() -> Vec<Element> {
    vec![
        Element::auto(
            "bLength",
            "Length of descriptor in bytes",
            1,
            AutoRule::OwnLength,
        ),
        Element::constant("bDescriptorType", "STRING descriptor type", 1, 3),
        Element::text("bString", "String value"),
    ]
}

fn interface_elements() -> Vec<Element> {
    vec![
        Element::auto(
            "bLength",
            "Length of descriptor in bytes",
            1,
            AutoRule::OwnLength,
        ),
        Element::constant("bDescriptorType", "INTERFACE descriptor type", 1, 4),
        Element::variable(
            "bInterfaceNumber",
            "Number of interface",
            1,
            DisplayFormat::Dec,
        ),
        Element::variable(
            "bAlternateSetting",
            "Value to select alternate setting",
            1,
            DisplayFormat::Dec,
        ),
        Element::auto(
            "bNumEndpoints",
            "Number of endpoints in interface",
            1,
            AutoRule::ChildCountOf(DescriptorKind::Endpoint),
        ),
        Element::enumeration("bInterfaceClass", "Class code", 1, INTERFACE_CLASSES),
        Element::variable("bInterfaceSubClass", "Subclass code", 1, DisplayFormat::Hex),
        Element::variable("bInterfaceProtocol", "Protocol code", 1, DisplayFormat::Hex),
        Element::string_link("iInterface", "Index of interface string descriptor", 1),
    ]
}

fn interface_association_elements() -> Vec<Element> {
    vec![
        Element::auto(
            "bLength",
            "Length of descriptor in bytes",
            1,
            AutoRule::OwnLength,
        ),
        Element::constant(
            "bDescriptorType",
            "INTERFACE ASSOCIATION descriptor type",
            1,
            8,
        ),
        Element::variable(
            "bFirstInterface",
            "First interface number",
            1,
            DisplayFormat::Dec,
        ),
        Element::variable(
            "bInterfaceCount",
            "Number of interfaces",
            1,
            DisplayFormat::Dec,
        ),
        Element::enumeration("bFunctionClass", "Class code", 1, FUNCTION_CLASSES),
        Element::variable("bFunctionSubClass", "Subclass code", 1, DisplayFormat::Hex),
        Element::variable("bFunctionProtocol", "Protocol code", 1, DisplayFormat::Hex),
        Element::string_link("iFunction", "Index of function string descriptor", 1),
    ]
}

fn endpoint_elements() -> Vec<Element> {
    vec![
        Element::auto(
            "bLength",
            "Length of descriptor in bytes",
            1,
            AutoRule::OwnLength,
        ),
        Element::constant("bDescriptorType", "ENDPOINT descriptor type", 1, 5),
        Element::variable("bEndpointAddress", "Endpoint address", 1, DisplayFormat::Hex),
        Element::enumeration("bmAttributes", "Endpoint attributes", 1, TRANSFER_TYPES),
        Element::variable("wMaxPacketSize", "Maximum packet size", 2, DisplayFormat::Dec),
        Element::variable("bInterval", "Polling interval", 1, DisplayFormat::Dec),
    ]
}

fn dfu_functional_elements() -> Vec<Element> {
    vec![
        Element::auto(
            "bLength",
            "Length of descriptor in bytes",
            1,
            AutoRule::OwnLength,
        ),
        Element::constant("bDescriptorType", "DFU FUNCTIONAL descriptor type", 1, 0x21),
        Element::bitmap("bmAttributes", "Attributes", 1, DFU_ATTRIBUTES),
        Element::variable("wDetachTimeOut", "Detach timeout", 2, DisplayFormat::Dec),
        Element::variable("wTransferSize", "Transfer size", 2, DisplayFormat::Dec),
        Element::variable("bcdDFUVersion", "DFU version", 2, DisplayFormat::Hex),
    ]
}

fn hid_elements() -> Vec<Element> {
    vec![
        Element::auto(
            "bLength",
            "Length of descriptor in bytes",
            1,
            AutoRule::OwnLength,
        ),
        Element::constant("bDescriptorType", "HID descriptor type", 1, 0x21),
        Element::variable(
            "bcdHID",
            "HID class specification release number",
            2,
            DisplayFormat::Hex,
        ),
        Element::variable("bCountryCode", "Country code", 1, DisplayFormat::Hex),
        Element::variable(
            "bNumDescriptors",
            "Number of class descriptors",
            1,
            DisplayFormat::Dec,
        ),
        Element::constant("bReportDescriptorType", "REPORT descriptor type", 1, 0x22),
        Element::variable(
            "wReportDescriptorLength",
            "Length of report descriptor",
            2,
            DisplayFormat::Dec,
        ),
    ]
}

/// A descriptor node: an ordered run of elements plus ordered children
///
/// Children are handles into the owning [`Document`](crate::Document)'s
/// arena; a descriptor never holds its children directly.
#[derive(Debug, Clone)]
pub struct Descriptor {
    kind: DescriptorKind,
    elements: Vec<Element>,
    children: Vec<NodeId>,
    index: u32,
}

impl Descriptor {
    pub fn new(kind: DescriptorKind) -> Self {
        let elements = match kind {
            DescriptorKind::Device => device_elements(),
            DescriptorKind::DeviceQualifier => device_qualifier_elements(),
            DescriptorKind::Configuration => configuration_elements(2),
            DescriptorKind::OtherSpeedConfiguration => configuration_elements(7),
            DescriptorKind::Interface => interface_elements(),
            DescriptorKind::InterfaceAssociation => interface_association_elements(),
            DescriptorKind::StringZero => string_zero_elements(),
            DescriptorKind::String => string_elements(),
            DescriptorKind::Endpoint => endpoint_elements(),
            DescriptorKind::DfuFunctional => dfu_functional_elements(),
            DescriptorKind::Hid => hid_elements(),
        };
        Self {
            kind,
            elements,
            children: Vec::new(),
            index: 0,
        }
    }

    pub fn kind(&self) -> DescriptorKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    /// Per-type index assigned by the document's index pass.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: u32) {
        self.index = index;
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.name() == name)
    }

    pub(crate) fn element_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.name() == name)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.children
    }

    pub fn permitted_children(&self) -> &'static [DescriptorKind] {
        self.kind.permitted_children()
    }

    pub fn can_have_child(&self, kind: DescriptorKind) -> bool {
        self.kind.permitted_children().contains(&kind)
    }

    /// Byte length of this descriptor's own elements, children excluded.
    pub fn length(&self) -> usize {
        self.elements.iter().map(|el| el.length()).sum()
    }

    /// Validity of this descriptor's own elements; children are judged on
    /// their own, never aggregated upward.
    pub fn is_valid(&self) -> bool {
        self.elements.iter().all(|el| el.is_valid())
    }

    /// Text payload of a string descriptor, if this node has one.
    pub fn text(&self) -> Option<&str> {
        self.elements.iter().find_map(|el| el.text_value())
    }

    /// Encode this descriptor's own elements, children excluded.
    pub fn encode(&self) -> Result<Vec<u8>, ElementError> {
        let mut bytes = Vec::with_capacity(self.length());
        for element in &self.elements {
            bytes.extend_from_slice(&element.encode()?);
        }
        Ok(bytes)
    }

    pub fn structured_elements(&self) -> Vec<StructuredElement> {
        self.elements.iter().map(|el| el.to_structured()).collect()
    }
}
