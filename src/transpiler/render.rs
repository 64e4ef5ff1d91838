//! TypeScript text for individual fields and declarations.

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{FieldDef, FieldType, NamedKind, NamedType, Scalar};

pub const ARG_SUFFIX: &str = "ARGS";
pub const LIST_SUFFIX: &str = "[]";
pub const UNION_BAR: &str = "|";
const EXPORT: &str = "export";

/// A lowercase letter directly followed by an uppercase one: `getUserById`.
static CAMEL_HUMP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z][A-Z]").expect("static pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Interface,
    Enum,
    TypeAlias,
}

impl DeclarationKind {
    pub fn of(kind: NamedKind) -> Self {
        match kind {
            NamedKind::Enum => DeclarationKind::Enum,
            NamedKind::Union => DeclarationKind::TypeAlias,
            NamedKind::Scalar | NamedKind::Input | NamedKind::Interface | NamedKind::Object => {
                DeclarationKind::Interface
            }
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            DeclarationKind::Interface => "interface",
            DeclarationKind::Enum => "enum",
            DeclarationKind::TypeAlias => "type",
        }
    }
}

pub fn header(timestamp: Option<DateTime<Local>>) -> String {
    let generated_at = match timestamp {
        Some(at) => format!(" at {}", at.format("%Y-%m-%d %H:%M:%S")),
        None => String::new(),
    };
    format!(
        "/*\n\
         * Type Definitions automatically generated via gql-tg{generated_at}.\n\
         * Do not change this file directly as the changes would be overwritten.\n\
         * Change the source GraphQL Schema File instead.\n\
         */\n"
    )
}

pub fn scalar_type(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::Int | Scalar::Float => "number",
        Scalar::String | Scalar::Id => "string",
        Scalar::Boolean => "boolean",
    }
}

pub fn field_type(ty: &FieldType) -> String {
    let base = match &ty.named {
        NamedType::Scalar(scalar) => scalar_type(*scalar),
        NamedType::NonScalar { label, .. } => label.as_str(),
    };
    format!("{base}{}", LIST_SUFFIX.repeat(ty.list_depth))
}

pub fn field(field: &FieldDef, indent: &str) -> String {
    let optional = if field.field_type.is_optional { "?" } else { "" };
    format!("{indent}{}{optional}: {};\n", field.label, field_type(&field.field_type))
}

pub fn fields(fields: &[FieldDef], indent: &str) -> String {
    fields.iter().map(|f| field(f, indent)).collect()
}

pub fn enum_members(members: &[String], indent: &str) -> String {
    members
        .iter()
        .map(|member| format!("{indent}{member} = '{member}',\n"))
        .collect()
}

pub fn union_members(members: &[String]) -> String {
    if members.is_empty() {
        return "never".to_string();
    }
    let joined: String = members.iter().map(|member| format!("{member} {UNION_BAR} ")).collect();
    // drop the trailing separator
    joined.trim_end().trim_end_matches(UNION_BAR).trim_end().to_string()
}

pub fn declaration(kind: DeclarationKind, label: &str, body: &str) -> String {
    match kind {
        DeclarationKind::TypeAlias => format!("{EXPORT} {} {label} = {body};\n", kind.keyword()),
        DeclarationKind::Interface | DeclarationKind::Enum => {
            format!("{EXPORT} {} {label} {{\n{body}}}\n", kind.keyword())
        }
    }
}

/// Capitalises every segment and concatenates them. Segments that are not
/// already camel-cased are lower-cased first: `["greet", "QUERY", "ARGS"]`
/// becomes `GreetQueryArgs`.
pub fn join_camel_case(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|segment| {
            let segment = if CAMEL_HUMP.is_match(segment) {
                segment.to_string()
            } else {
                segment.to_lowercase()
            };
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(named: NamedType, is_optional: bool, list_depth: usize) -> FieldType {
        FieldType { named, is_optional, list_depth, is_list_value_optional: list_depth > 0 }
    }

    #[test]
    fn scalars_map_to_typescript_primitives() {
        assert_eq!(scalar_type(Scalar::Int), "number");
        assert_eq!(scalar_type(Scalar::Float), "number");
        assert_eq!(scalar_type(Scalar::String), "string");
        assert_eq!(scalar_type(Scalar::Id), "string");
        assert_eq!(scalar_type(Scalar::Boolean), "boolean");
    }

    #[test]
    fn lists_append_one_suffix_per_level() {
        let post = NamedType::NonScalar { kind: NamedKind::Object, label: "Post".into() };
        assert_eq!(field_type(&ty(post.clone(), false, 0)), "Post");
        assert_eq!(field_type(&ty(post, false, 1)), "Post[]");
        assert_eq!(field_type(&ty(NamedType::Scalar(Scalar::Int), true, 2)), "number[][]");
    }

    #[test]
    fn optional_fields_get_a_question_mark() {
        let required = FieldDef { label: "name".into(), field_type: ty(NamedType::Scalar(Scalar::String), false, 0) };
        let optional = FieldDef { label: "bio".into(), field_type: ty(NamedType::Scalar(Scalar::String), true, 0) };
        assert_eq!(field(&required, "  "), "  name: string;\n");
        assert_eq!(field(&optional, "  "), "  bio?: string;\n");
    }

    #[test]
    fn enum_declaration() {
        let body = enum_members(&["ADMIN".into(), "USER".into()], "  ");
        assert_eq!(
            declaration(DeclarationKind::Enum, "Role", &body),
            "export enum Role {\n  ADMIN = 'ADMIN',\n  USER = 'USER',\n}\n"
        );
    }

    #[test]
    fn union_declaration_has_no_stray_separators() {
        let body = union_members(&["Post".into(), "Comment".into()]);
        assert_eq!(body, "Post | Comment");
        assert_eq!(declaration(DeclarationKind::TypeAlias, "Result", &body), "export type Result = Post | Comment;\n");
        assert_eq!(union_members(&["Only".into()]), "Only");
        assert_eq!(union_members(&[]), "never");
    }

    #[test]
    fn camel_case_joining() {
        assert_eq!(join_camel_case(&["greet", "QUERY", ARG_SUFFIX]), "GreetQueryArgs");
        assert_eq!(join_camel_case(&["getUserById", "MUTATION", ARG_SUFFIX]), "GetUserByIdMutationArgs");
        assert_eq!(join_camel_case(&["POSTS", "Subscription", ARG_SUFFIX]), "PostsSubscriptionArgs");
        assert_eq!(join_camel_case(&["", "QUERY"]), "Query");
    }

    #[test]
    fn header_mentions_generator_and_optional_timestamp() {
        let plain = header(None);
        assert!(plain.starts_with("/*\n* Type Definitions automatically generated via gql-tg.\n"));
        assert!(plain.ends_with("*/\n"));

        let at = Local::now();
        assert!(header(Some(at)).contains(&at.format("%Y-%m-%d").to_string()));
    }
}
