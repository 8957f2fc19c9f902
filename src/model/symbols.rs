//! Symbols of the host program's semantic model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Name the host uses for the optional-value wrapper type.
pub const NULLABLE_WRAPPER: &str = "Nullable";

/// What sort of type a [`TypeRef`] denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// Class, struct, enum, interface or delegate with a name
    #[default]
    Named,
    Array,
    Pointer,
    TypeParameter,
    Dynamic,
}

/// A reference to a type as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeRef {
    /// Unqualified metadata name, e.g. `Int32` or `Nullable`
    pub name: String,
    /// Fully qualified rendering, e.g. `int` or `System.Guid` or `bool?`
    pub full_name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub is_value_type: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeRef>,
}

impl TypeRef {
    /// A named reference type.
    pub fn reference(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            kind: TypeKind::Named,
            is_value_type: false,
            type_arguments: Vec::new(),
        }
    }

    /// A named value type.
    pub fn value(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            is_value_type: true,
            ..Self::reference(name, full_name)
        }
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::value("Boolean", "bool")
    }

    #[must_use]
    pub fn int32() -> Self {
        Self::value("Int32", "int")
    }

    #[must_use]
    pub fn string() -> Self {
        Self::reference("String", "string")
    }

    /// The optional-value wrapper around `inner`, rendered `inner?`.
    #[must_use]
    pub fn nullable(inner: Self) -> Self {
        Self {
            name: NULLABLE_WRAPPER.to_string(),
            full_name: format!("{}?", inner.full_name),
            kind: TypeKind::Named,
            is_value_type: true,
            type_arguments: vec![inner],
        }
    }

    /// Generic instantiation of a named type.
    #[must_use]
    pub fn generic(mut self, arguments: Vec<Self>) -> Self {
        self.type_arguments = arguments;
        self
    }

    #[must_use]
    pub fn is_named(&self) -> bool {
        self.kind == TypeKind::Named
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.type_arguments.is_empty()
    }

    #[must_use]
    pub fn is_void(&self) -> bool {
        self.name == "Void"
    }

    /// Whether this is the optional-value wrapper form.
    #[must_use]
    pub fn is_nullable_wrapper(&self) -> bool {
        self.is_named() && self.name == NULLABLE_WRAPPER
    }
}

/// A member of a [`TypeSymbol`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberSymbol {
    /// The `get` half of a property; `None` return means `void`
    PropertyGetter {
        property: String,
        return_type: Option<TypeRef>,
    },
    /// The `set` half of a property
    PropertySetter { property: String },
    Method {
        name: String,
        return_type: Option<TypeRef>,
    },
    Field { name: String, field_type: TypeRef },
}

/// A named type referenced somewhere in the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeSymbol {
    /// Simple name, e.g. `RedisConfiguration`
    pub name: String,
    /// Containing namespace, empty for the global namespace
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub members: Vec<MemberSymbol>,
}

impl TypeSymbol {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            members: Vec::new(),
        }
    }

    /// Add an auto-property: a getter and a setter.
    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>, ty: TypeRef) -> Self {
        let property = property.into();
        self.members.push(MemberSymbol::PropertyGetter {
            property: property.clone(),
            return_type: Some(ty),
        });
        self.members.push(MemberSymbol::PropertySetter { property });
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: MemberSymbol) -> Self {
        self.members.push(member);
        self
    }

    /// Fully qualified name.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Property getters paired with the property they belong to.
    pub fn property_getters(&self) -> impl Iterator<Item = (&str, Option<&TypeRef>)> {
        self.members.iter().filter_map(|member| match member {
            MemberSymbol::PropertyGetter {
                property,
                return_type,
            } => Some((property.as_str(), return_type.as_ref())),
            _ => None,
        })
    }
}
