use serde::{Deserialize, Serialize};
use std::fmt;

/// Master macro defining the library enumerations and their string tables.
///
/// Parsing is a case-sensitive exact match; any unrecognised input maps to the
/// `Unknown` sentinel instead of failing. `as_str` is the left inverse, so
/// `parse(as_str(v)) == v` for every listed variant.
macro_rules! string_enum {
    ( $(#[$meta:meta])* $name:ident { $( $variant:ident => $text:literal ),* $(,)? } ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
        pub enum $name {
            #[default]
            Unknown,
            $( $variant, )*
        }

        impl $name {
            pub fn parse(input: &str) -> Self {
                match input {
                    $( $text => Self::$variant, )*
                    _ => Self::Unknown,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    Self::Unknown => "unknown",
                    $( Self::$variant => $text, )*
                }
            }

            /// All variants except the `Unknown` sentinel.
            pub fn known_variants() -> &'static [$name] {
                &[ $( Self::$variant, )* ]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

string_enum! {
    /// Direction of a connector point on a node.
    ConnectorType {
        In => "in",
        Out => "out",
        InAndOut => "in_and_out",
    }
}

string_enum! {
    /// Primitive type of a node property, used both for config validation and
    /// for stringifying a declared type into target syntax.
    PropertyType {
        String => "string",
        Integer => "integer",
        Real => "real",
        Boolean => "boolean",
        Select => "select",
        List => "list",
        Color => "color",
        Void => "void",
        ComponentSelect => "component_select",
        EventSelect => "event_select",
        StateSelect => "state_select",
        Enum => "enum",
        SetState => "set_state",
    }
}

string_enum! {
    /// Kind of an interactive control declared by a node config.
    ControlType {
        AddField => "add_field",
        AddControl => "add_control",
        RemoveControl => "remove_control",
        AddEvent => "add_event",
        AddState => "add_state",
    }
}

string_enum! {
    /// Whether a node library contributes structural or behaviour nodes.
    LibraryType {
        Structural => "structural",
        Behaviour => "behaviour",
    }
}

string_enum! {
    /// Direction of a flow relative to its owning structural node.
    FlowType {
        In => "in",
        Out => "out",
    }
}
