use super::types::PropertyType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value of a node property.
///
/// Every value carries the tag declared by its owning config; the generator
/// only ever reads these, mutation happens through the editor's explicit
/// property setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    List(Vec<PropertyValue>),
    Color(String),
    Select {
        options: Vec<String>,
        chosen: String,
    },
    ComponentSelect {
        node_id: String,
        event_id: String,
    },
    EventSelect(String),
    StateSelect(String),
    Enum {
        name: String,
        values: Vec<String>,
    },
    Void,
}

/// Resolved cross-reference carried by a `component` property: the callee
/// node and the callee flow within it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentRef {
    pub data_id: String,
    pub option_data_id: String,
}

impl PropertyValue {
    /// The declared-type tag this value satisfies.
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Integer(_) => PropertyType::Integer,
            PropertyValue::Real(_) => PropertyType::Real,
            PropertyValue::Boolean(_) => PropertyType::Boolean,
            PropertyValue::List(_) => PropertyType::List,
            PropertyValue::Color(_) => PropertyType::Color,
            PropertyValue::Select { .. } => PropertyType::Select,
            PropertyValue::ComponentSelect { .. } => PropertyType::ComponentSelect,
            PropertyValue::EventSelect(_) => PropertyType::EventSelect,
            PropertyValue::StateSelect(_) => PropertyType::StateSelect,
            PropertyValue::Enum { .. } => PropertyType::Enum,
            PropertyValue::Void => PropertyType::Void,
        }
    }

    /// The type-driven default used when a library config declares no
    /// explicit `default` key.
    pub fn default_for(property_type: PropertyType) -> Option<PropertyValue> {
        match property_type {
            PropertyType::String | PropertyType::Select => {
                Some(PropertyValue::String(String::new()))
            }
            PropertyType::Integer => Some(PropertyValue::Integer(0)),
            PropertyType::Real => Some(PropertyValue::Real(0.0)),
            PropertyType::Boolean => Some(PropertyValue::Boolean(false)),
            PropertyType::List => Some(PropertyValue::List(Vec::new())),
            PropertyType::Color => Some(PropertyValue::Color("#050505".to_string())),
            PropertyType::Void => Some(PropertyValue::Void),
            _ => None,
        }
    }

    /// Extracts a component cross-reference from this value.
    ///
    /// Editors store the reference either as a structured `ComponentSelect`
    /// or as a raw JSON payload in a string property; both forms resolve to
    /// the same `ComponentRef`.
    pub fn component_ref(&self) -> Option<ComponentRef> {
        match self {
            PropertyValue::ComponentSelect { node_id, event_id } => Some(ComponentRef {
                data_id: node_id.clone(),
                option_data_id: event_id.clone(),
            }),
            PropertyValue::String(raw) => serde_json::from_str(raw).ok(),
            _ => None,
        }
    }

    /// Returns the string payload for text-like values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s)
            | PropertyValue::Color(s)
            | PropertyValue::EventSelect(s)
            | PropertyValue::StateSelect(s) => Some(s),
            PropertyValue::Select { chosen, .. } => Some(chosen),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{}", s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Real(r) => write!(f, "{}", r),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            PropertyValue::Color(c) => write!(f, "{}", c),
            PropertyValue::Select { chosen, .. } => write!(f, "{}", chosen),
            PropertyValue::ComponentSelect { node_id, event_id } => {
                write!(f, "{}::{}", node_id, event_id)
            }
            PropertyValue::EventSelect(e) => write!(f, "{}", e),
            PropertyValue::StateSelect(s) => write!(f, "{}", s),
            PropertyValue::Enum { name, .. } => write!(f, "{}", name),
            PropertyValue::Void => write!(f, "void"),
        }
    }
}
