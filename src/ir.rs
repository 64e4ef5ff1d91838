// Resolved schema model. Produced once by the parser, read-only afterwards.

use std::collections::BTreeMap;
use indexmap::IndexMap;
use serde::Serialize;

// ————————————————————————————————————————————————————————————————————————————
// KINDS
// ————————————————————————————————————————————————————————————————————————————

/// Root operation categories, ordered the way they are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RootOperationKind {
    Query,
    Mutation,
    Subscription,
}

impl RootOperationKind {
    pub const ALL: [RootOperationKind; 3] = [
        RootOperationKind::Query,
        RootOperationKind::Mutation,
        RootOperationKind::Subscription,
    ];

    /// Case-insensitive match against `Query` / `Mutation` / `Subscription`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str().eq_ignore_ascii_case(label))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RootOperationKind::Query => "QUERY",
            RootOperationKind::Mutation => "MUTATION",
            RootOperationKind::Subscription => "SUBSCRIPTION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NamedKind {
    Scalar,
    Enum,
    Input,
    Interface,
    Object,
    Union,
}

impl NamedKind {
    /// Maps a declaration keyword (`type`, `input`, ...) to its kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "TYPE" => Some(NamedKind::Object),
            "INPUT" => Some(NamedKind::Input),
            "ENUM" => Some(NamedKind::Enum),
            "INTERFACE" => Some(NamedKind::Interface),
            "UNION" => Some(NamedKind::Union),
            _ => None,
        }
    }
}

/// Built-in scalars; every other label must be declared in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Scalar {
    Int,
    Float,
    String,
    #[serde(rename = "ID")]
    Id,
    Boolean,
}

impl Scalar {
    pub const ALL: [Scalar; 5] = [Scalar::Int, Scalar::Float, Scalar::String, Scalar::Id, Scalar::Boolean];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scalar| scalar.label() == label)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scalar::Int => "Int",
            Scalar::Float => "Float",
            Scalar::String => "String",
            Scalar::Id => "ID",
            Scalar::Boolean => "Boolean",
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// FIELDS
// ————————————————————————————————————————————————————————————————————————————

/// What a type reference resolved to. Scalar and non-scalar names are
/// mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedType {
    Scalar(Scalar),
    NonScalar { kind: NamedKind, label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldType {
    pub named: NamedType,
    pub is_optional: bool,           // no trailing `!`
    pub list_depth: usize,           // 0 = not a list, 2 = `[[T]]`
    pub is_list_value_optional: bool, // only meaningful when list_depth > 0
}

impl FieldType {
    pub fn kind(&self) -> NamedKind {
        match &self.named {
            NamedType::Scalar(_) => NamedKind::Scalar,
            NamedType::NonScalar { kind, .. } => *kind,
        }
    }

    pub fn scalar_name(&self) -> Option<&'static str> {
        match &self.named {
            NamedType::Scalar(scalar) => Some(scalar.label()),
            NamedType::NonScalar { .. } => None,
        }
    }

    pub fn non_scalar_name(&self) -> Option<&str> {
        match &self.named {
            NamedType::Scalar(_) => None,
            NamedType::NonScalar { label, .. } => Some(label),
        }
    }

    pub fn is_list(&self) -> bool {
        self.list_depth > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub label: String,
    pub field_type: FieldType,
}

// ————————————————————————————————————————————————————————————————————————————
// OPERATIONS & TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionRequest {
    pub name: String,
    pub arguments: Vec<FieldDef>,
    pub returns: FieldType,
}

impl ExecutionRequest {
    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    /// Non-scalar labels referenced by the arguments and the return type.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.arguments
            .iter()
            .map(|argument| &argument.field_type)
            .chain(std::iter::once(&self.returns))
            .filter_map(FieldType::non_scalar_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootOperation {
    pub kind: RootOperationKind,
    pub requests: Vec<ExecutionRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeBody {
    Fields(Vec<FieldDef>), // input, interface, object
    Members(Vec<String>),  // enum values or union members
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonScalarType {
    pub kind: NamedKind,
    pub label: String,
    pub body: TypeBody,
}

impl NonScalarType {
    /// Labels of the non-scalar types this declaration points at.
    /// Enum values are not type references.
    pub fn references(&self) -> Vec<&str> {
        match (&self.body, self.kind) {
            (TypeBody::Fields(fields), _) => fields
                .iter()
                .filter_map(|field| field.field_type.non_scalar_name())
                .collect(),
            (TypeBody::Members(members), NamedKind::Union) => {
                members.iter().map(String::as_str).collect()
            }
            (TypeBody::Members(_), _) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaModel {
    pub root_operations: BTreeMap<RootOperationKind, RootOperation>,
    pub non_scalar_types: IndexMap<String, NonScalarType>, // declaration order
}

impl SchemaModel {
    pub fn root_operation(&self, kind: RootOperationKind) -> Option<&RootOperation> {
        self.root_operations.get(&kind)
    }

    pub fn non_scalar(&self, label: &str) -> Option<&NonScalarType> {
        self.non_scalar_types.get(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_operation_labels_match_case_insensitively() {
        assert_eq!(RootOperationKind::from_label("Query"), Some(RootOperationKind::Query));
        assert_eq!(RootOperationKind::from_label("MUTATION"), Some(RootOperationKind::Mutation));
        assert_eq!(RootOperationKind::from_label("subscription"), Some(RootOperationKind::Subscription));
        assert_eq!(RootOperationKind::from_label("Queries"), None);
    }

    #[test]
    fn root_operations_iterate_in_emission_order() {
        let mut model = SchemaModel::default();
        for kind in [RootOperationKind::Subscription, RootOperationKind::Query, RootOperationKind::Mutation] {
            model.root_operations.insert(kind, RootOperation { kind, requests: Vec::new() });
        }
        let order: Vec<_> = model.root_operations.keys().copied().collect();
        assert_eq!(order, RootOperationKind::ALL.to_vec());
    }

    #[test]
    fn keywords_map_to_kinds() {
        assert_eq!(NamedKind::from_keyword("type"), Some(NamedKind::Object));
        assert_eq!(NamedKind::from_keyword("Input"), Some(NamedKind::Input));
        assert_eq!(NamedKind::from_keyword("scalar"), None);
    }

    #[test]
    fn union_members_count_as_references_but_enum_values_do_not() {
        let union = NonScalarType {
            kind: NamedKind::Union,
            label: "Result".into(),
            body: TypeBody::Members(vec!["Post".into(), "Comment".into()]),
        };
        let enumeration = NonScalarType {
            kind: NamedKind::Enum,
            label: "Role".into(),
            body: TypeBody::Members(vec!["ADMIN".into()]),
        };
        assert_eq!(union.references(), vec!["Post", "Comment"]);
        assert!(enumeration.references().is_empty());
    }
}
