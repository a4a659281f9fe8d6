use crate::model::{ConnectorType, ControlType, LibraryType, PropertyType, PropertyValue};
use serde::{Deserialize, Serialize};

/// Shape of a node body on the canvas. Unknown shape strings fall back to
/// `RoundedRectangle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyShape {
    #[default]
    RoundedRectangle,
    Rectangle,
    Ellipse,
    Diamond,
}

impl BodyShape {
    pub fn parse(input: &str) -> Self {
        match input {
            "rectangle" => Self::Rectangle,
            "ellipse" => Self::Ellipse,
            "diamond" => Self::Diamond,
            _ => Self::RoundedRectangle,
        }
    }
}

/// Visual styling of a node body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub shape: BodyShape,
    pub fill_color: String,
    pub border_color: String,
    pub size: (f64, f64),
    pub icon: String,
    pub z_index: i32,
}

/// Declaration of one node property: its id, type, and default value.
///
/// Also reused for "state" field declarations and flow argument lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertiesConfig {
    pub id: String,
    pub name: String,
    pub property_type: PropertyType,
    pub default: Option<PropertyValue>,
    /// Choices for a `select`-typed property.
    pub options: Vec<String>,
    pub is_valid: bool,
    pub error_message: String,
}

impl PropertiesConfig {
    pub fn invalid(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_valid: false,
            error_message: message.into(),
            ..Default::default()
        }
    }
}

/// Declaration of an interactive control a node offers in the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    pub id: String,
    pub control_type: ControlType,
    pub text: String,
    pub is_valid: bool,
    pub error_message: String,
}

/// Declaration of a connector point and its direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    pub id: String,
    pub connector_type: ConnectorType,
    pub is_valid: bool,
    pub error_message: String,
}

/// Declared signature of an externally callable event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    pub id: String,
    pub name: String,
    pub return_type: PropertyType,
    pub arguments: Vec<PropertiesConfig>,
    pub is_valid: bool,
    pub error_message: String,
}

/// A fully parsed node-library entry: everything the editor and generator
/// need to know about one node type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// The node type key, e.g. `"Generic::Component"`.
    pub node_type: String,
    pub library_type: LibraryType,
    pub body: BodyConfig,
    pub properties: Vec<PropertiesConfig>,
    pub connectors: Vec<ConnectorConfig>,
    pub controls: Vec<ControlsConfig>,
    pub help_text: String,
    pub error_message: String,
}

impl NodeConfig {
    /// A config is valid only if it parsed cleanly and every one of its
    /// declared properties, connectors and controls is itself valid.
    pub fn is_valid(&self) -> bool {
        self.error_message.is_empty()
            && self.properties.iter().all(|p| p.is_valid)
            && self.connectors.iter().all(|c| c.is_valid)
            && self.controls.iter().all(|c| c.is_valid)
    }

    /// First validation message found, walking own state then children.
    pub fn first_error(&self) -> Option<&str> {
        if !self.error_message.is_empty() {
            return Some(&self.error_message);
        }
        self.properties
            .iter()
            .filter(|p| !p.is_valid)
            .map(|p| p.error_message.as_str())
            .chain(
                self.connectors
                    .iter()
                    .filter(|c| !c.is_valid)
                    .map(|c| c.error_message.as_str()),
            )
            .chain(
                self.controls
                    .iter()
                    .filter(|c| !c.is_valid)
                    .map(|c| c.error_message.as_str()),
            )
            .next()
    }
}
