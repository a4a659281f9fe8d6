use super::config::{
    BodyConfig, BodyShape, ConnectorConfig, ControlsConfig, NodeConfig, PropertiesConfig,
};
use crate::error::ConfigError;
use crate::model::{ConnectorType, ControlType, LibraryType, PropertyType, PropertyValue};
use ahash::AHashMap;
use serde_json::Value;

/// A loaded node library: validated `NodeConfig` entries keyed by
/// `"<LibraryName>::<NodeType>"`.
#[derive(Debug, Default)]
pub struct Library {
    pub name: String,
    pub library_type: LibraryType,
    configs: AHashMap<String, NodeConfig>,
}

impl Library {
    pub fn new(name: impl Into<String>, library_type: LibraryType) -> Self {
        Self {
            name: name.into(),
            library_type,
            configs: AHashMap::new(),
        }
    }

    /// Parses a complete library document.
    ///
    /// Expected shape: `{ "name": ..., "type": ..., "nodes": { "<key>": { ... } } }`.
    /// Any invalid entry aborts the load with its first validation message;
    /// a library never ends up partially registered.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let document: Value =
            serde_json::from_str(text).map_err(|e| ConfigError::JsonParseError(e.to_string()))?;

        let name = document
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let library_type = document
            .get("type")
            .and_then(Value::as_str)
            .map(LibraryType::parse)
            .unwrap_or_default();

        let mut library = Library::new(name, library_type);
        if let Some(nodes) = document.get("nodes").and_then(Value::as_object) {
            for (key, entry) in nodes {
                let config = parse_node_config(entry)?;
                library.register(key, config)?;
            }
        }
        Ok(library)
    }

    /// Adds a config under the given key. Invalid configs are refused.
    pub fn register(&mut self, key: &str, config: NodeConfig) -> Result<(), ConfigError> {
        if !config.is_valid() {
            return Err(ConfigError::InvalidEntry {
                key: key.to_string(),
                message: config.first_error().unwrap_or_default().to_string(),
            });
        }
        self.configs.insert(key.to_string(), config);
        Ok(())
    }

    pub fn config(&self, key: &str) -> Option<&NodeConfig> {
        self.configs.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

/// Parses a single node definition object into a `NodeConfig`.
///
/// A missing `type` key fails immediately; per-entry problems in properties,
/// connectors and controls are accumulated into the returned config's
/// validity instead of aborting, so one bad property does not hide the rest.
pub fn parse_node_config(value: &Value) -> Result<NodeConfig, ConfigError> {
    let node_type = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ConfigError::MissingType)?;

    let mut config = NodeConfig {
        node_type: node_type.to_string(),
        library_type: value
            .get("library")
            .and_then(Value::as_str)
            .map(LibraryType::parse)
            .unwrap_or_default(),
        help_text: value
            .get("help")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        ..Default::default()
    };

    if let Some(body) = value.get("body") {
        config.body = parse_body(body);
    }
    if let Some(properties) = value.get("properties").and_then(Value::as_array) {
        config.properties = properties.iter().map(parse_property).collect();
    }
    if let Some(connectors) = value.get("connectors").and_then(Value::as_array) {
        config.connectors = connectors.iter().map(parse_connector).collect();
    }
    if let Some(controls) = value.get("controls").and_then(Value::as_array) {
        config.controls = controls.iter().map(parse_control).collect();
    }

    Ok(config)
}

fn parse_body(value: &Value) -> BodyConfig {
    BodyConfig {
        shape: value
            .get("shape")
            .and_then(Value::as_str)
            .map(BodyShape::parse)
            .unwrap_or_default(),
        fill_color: string_or_default(value, "fill_color"),
        border_color: string_or_default(value, "border_color"),
        size: (
            value.get("width").and_then(Value::as_f64).unwrap_or(0.0),
            value.get("height").and_then(Value::as_f64).unwrap_or(0.0),
        ),
        icon: string_or_default(value, "icon"),
        z_index: value.get("z_index").and_then(Value::as_i64).unwrap_or(0) as i32,
    }
}

/// Parses one `properties[]` entry. Never fails; problems are recorded on the
/// returned config.
pub fn parse_property(value: &Value) -> PropertiesConfig {
    let (Some(id), Some(type_name)) = (
        value.get("id").and_then(Value::as_str),
        value.get("type").and_then(Value::as_str),
    ) else {
        return PropertiesConfig::invalid("", ConfigError::MissingIdOrType.to_string());
    };

    let property_type = PropertyType::parse(type_name);
    if property_type == PropertyType::Unknown {
        return PropertiesConfig::invalid(
            id,
            format!("Invalid property type: {} for {}", type_name, id),
        );
    }

    let name = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(id)
        .to_string();

    let mut config = PropertiesConfig {
        id: id.to_string(),
        name,
        property_type,
        is_valid: true,
        ..Default::default()
    };

    if property_type == PropertyType::Select {
        let Some(options) = value.get("options").and_then(Value::as_array) else {
            return PropertiesConfig::invalid(
                id,
                format!("Select property {} requires an options array", id),
            );
        };
        config.options = options
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
    }

    config.default = match value.get("default") {
        Some(default) => match convert_default(property_type, default) {
            Some(converted) => Some(converted),
            None => {
                return PropertiesConfig::invalid(
                    id,
                    format!("Invalid default value for {}", id),
                );
            }
        },
        None => PropertyValue::default_for(property_type),
    };

    // A select's resolved default follows the string rule, paired with the
    // declared options.
    if property_type == PropertyType::Select {
        let chosen = match config.default.take() {
            Some(PropertyValue::String(s)) => s,
            _ => String::new(),
        };
        config.default = Some(PropertyValue::Select {
            options: config.options.clone(),
            chosen,
        });
    }

    config
}

fn parse_connector(value: &Value) -> ConnectorConfig {
    let (Some(id), Some(type_name)) = (
        value.get("id").and_then(Value::as_str),
        value.get("type").and_then(Value::as_str),
    ) else {
        return ConnectorConfig {
            error_message: ConfigError::MissingIdOrType.to_string(),
            ..Default::default()
        };
    };

    let connector_type = ConnectorType::parse(type_name);
    if connector_type == ConnectorType::Unknown {
        return ConnectorConfig {
            id: id.to_string(),
            error_message: format!("Invalid connector type: {} for {}", type_name, id),
            ..Default::default()
        };
    }

    ConnectorConfig {
        id: id.to_string(),
        connector_type,
        is_valid: true,
        error_message: String::new(),
    }
}

fn parse_control(value: &Value) -> ControlsConfig {
    let (Some(id), Some(type_name)) = (
        value.get("id").and_then(Value::as_str),
        value.get("type").and_then(Value::as_str),
    ) else {
        return ControlsConfig {
            error_message: ConfigError::MissingIdOrType.to_string(),
            ..Default::default()
        };
    };

    let control_type = ControlType::parse(type_name);
    if control_type == ControlType::Unknown {
        return ControlsConfig {
            id: id.to_string(),
            error_message: format!("Invalid control type: {} for {}", type_name, id),
            ..Default::default()
        };
    }

    ControlsConfig {
        id: id.to_string(),
        control_type,
        text: string_or_default(value, "text"),
        is_valid: true,
        error_message: String::new(),
    }
}

/// Converts a JSON `default` value into the declared property type.
/// Returns `None` when the value cannot represent that type.
fn convert_default(property_type: PropertyType, value: &Value) -> Option<PropertyValue> {
    match property_type {
        PropertyType::String | PropertyType::Select => {
            value.as_str().map(|s| PropertyValue::String(s.to_string()))
        }
        PropertyType::Integer => value.as_i64().map(PropertyValue::Integer),
        PropertyType::Real => value.as_f64().map(PropertyValue::Real),
        PropertyType::Boolean => value.as_bool().map(PropertyValue::Boolean),
        PropertyType::Color => value.as_str().map(|s| PropertyValue::Color(s.to_string())),
        PropertyType::List => {
            let items = value.as_array()?;
            let mut converted = Vec::with_capacity(items.len());
            for item in items {
                converted.push(convert_list_item(item)?);
            }
            Some(PropertyValue::List(converted))
        }
        PropertyType::Void => Some(PropertyValue::Void),
        _ => None,
    }
}

fn convert_list_item(value: &Value) -> Option<PropertyValue> {
    if let Some(s) = value.as_str() {
        Some(PropertyValue::String(s.to_string()))
    } else if let Some(i) = value.as_i64() {
        Some(PropertyValue::Integer(i))
    } else if let Some(r) = value.as_f64() {
        Some(PropertyValue::Real(r))
    } else {
        value.as_bool().map(PropertyValue::Boolean)
    }
}

fn string_or_default(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
