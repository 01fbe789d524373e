//! TypeScript type expressions.
//!
//! [`TsType`] is the tree the generator renders into argument, body and
//! return shapes. It is serialized with a `kind` tag so backends can emit it
//! as plain JSON.

use serde::{Deserialize, Serialize};

/// A field of an object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectField {
    /// Property name.
    pub name: String,
    /// Property type.
    pub schema: TsType,
    /// Whether the property is required (`a: T`) or optional (`a?: T`).
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl ObjectField {
    /// A required field.
    pub fn required(name: impl Into<String>, schema: TsType) -> Self {
        Self {
            name: name.into(),
            schema,
            required: true,
        }
    }

    /// An optional field.
    pub fn optional(name: impl Into<String>, schema: TsType) -> Self {
        Self {
            name: name.into(),
            schema,
            required: false,
        }
    }
}

/// A TypeScript type expression.
///
/// ## Examples
///
/// ```
/// use typesync_define::{ObjectField, TsType};
///
/// let ty = TsType::Object {
///     fields: vec![
///         ObjectField::required("result", TsType::Tuple {
///             items: vec![TsType::simple("number"), TsType::simple("boolean")],
///         }),
///         ObjectField::optional("x", TsType::simple("number")),
///     ],
/// };
/// assert_eq!(ty.render(None), "{result: [number, boolean]; x?: number;}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TsType {
    /// A named type or literal (`string`, `number`, `"on"`, `undefined`).
    Simple {
        /// The type text.
        name: String,
    },
    /// `Record<K, V>`.
    Record {
        /// Key type.
        key: Box<TsType>,
        /// Value type.
        value: Box<TsType>,
    },
    /// An inline object literal type.
    Object {
        /// Properties in declaration order.
        fields: Vec<ObjectField>,
    },
    /// `A | B | C`.
    Union {
        /// Union members.
        members: Vec<TsType>,
    },
    /// `[A, B]`.
    Tuple {
        /// Tuple items.
        items: Vec<TsType>,
    },
    /// `T[]`.
    Array {
        /// Element type.
        item: Box<TsType>,
    },
    /// A reference to the type currently being declared.
    SelfRef,
}

impl TsType {
    /// A simple named type.
    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple { name: name.into() }
    }

    /// The `undefined` type.
    pub fn undefined() -> Self {
        Self::simple("undefined")
    }

    /// The `unknown` type.
    pub fn unknown() -> Self {
        Self::simple("unknown")
    }

    /// Whether this is exactly `undefined`.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Simple { name } if name == "undefined")
    }

    /// Renders the expression.
    ///
    /// `type_name` is substituted for [`TsType::SelfRef`]; anonymous
    /// self references render as `=Self`.
    pub fn render(&self, type_name: Option<&str>) -> String {
        match self {
            // `...` is the backend's marker for a type that never resolves
            Self::Simple { name } if name == "..." => "never".to_string(),
            Self::Simple { name } => name.clone(),
            Self::Record { key, value } => format!(
                "Record<{}, {}>",
                key.render(type_name),
                value.render(type_name)
            ),
            Self::Object { fields } => {
                let body = fields
                    .iter()
                    .map(|field| {
                        format!(
                            "{}{}: {};",
                            field.name,
                            if field.required { "" } else { "?" },
                            field.schema.render(type_name)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{{{body}}}")
            }
            Self::Union { members } => members
                .iter()
                .map(|member| member.render(type_name))
                .collect::<Vec<_>>()
                .join(" | "),
            Self::Tuple { items } => format!(
                "[{}]",
                items
                    .iter()
                    .map(|item| item.render(type_name))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::Array { item } => match item.as_ref() {
                Self::Union { .. } => format!("({})[]", item.render(type_name)),
                _ => format!("{}[]", item.render(type_name)),
            },
            Self::SelfRef => type_name.unwrap_or("=Self").to_string(),
        }
    }
}
