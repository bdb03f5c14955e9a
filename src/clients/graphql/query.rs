//! GraphQL query text synthesis.
//!
//! A [`QueryBuilder`] receives a two-part template and an argument map and
//! produces the final query text plus its variables. The template is split
//! where the rendered arguments go:
//!
//! - with arguments: `["query { user (", ") { id name } }"]`
//! - without arguments: `["query { user ", " { id name } }"]`
//!
//! [`VariableQueryBuilder`] is the default implementation.

use std::fmt;

use apollo_compiler::{ast, Name, Node};
use serde_json::{Map, Value};

use crate::clients::graphql::errors::QueryBuildError;

/// The three GraphQL operation types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// A read operation.
    Query,
    /// A write operation.
    Mutation,
    /// A subscription; only the query text is built, there is no live transport.
    Subscription,
}

impl OperationKind {
    /// Resolves an operation name (`query`, `mutation`, `subscription`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "query" => Some(Self::Query),
            "mutation" => Some(Self::Mutation),
            "subscription" => Some(Self::Subscription),
            _ => None,
        }
    }

    /// Returns the GraphQL keyword for this operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query text and variables produced by a [`QueryBuilder`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuiltQuery {
    /// The final query text.
    pub query: String,
    /// Variables referenced by the query.
    pub variables: Map<String, Value>,
}

/// Synthesizes query text from a template and arguments.
pub trait QueryBuilder: Send + Sync + fmt::Debug {
    /// Builds the query.
    ///
    /// # Errors
    ///
    /// Returns [`QueryBuildError`] if the arguments cannot be rendered.
    fn build(
        &self,
        template: &[String; 2],
        args: &Map<String, Value>,
    ) -> Result<BuiltQuery, QueryBuildError>;
}

/// Returns the template for an operation, field and selection.
///
/// Note the asymmetric spacing: the no-argument form keeps a space before the
/// selection braces that the argument form does not.
#[must_use]
pub fn template_for(
    kind: OperationKind,
    field: &str,
    selection: &str,
    has_args: bool,
) -> [String; 2] {
    if has_args {
        [
            format!("{kind} {{ {field} ("),
            format!(") {{ {selection} }} }}"),
        ]
    } else {
        [
            format!("{kind} {{ {field} "),
            format!(" {{ {selection} }} }}"),
        ]
    }
}

/// Default [`QueryBuilder`].
///
/// Plain argument values are rendered inline as GraphQL literals. Argument
/// names and input-object keys must be valid GraphQL names. An
/// argument of the form `{"type": "ID!", "value": ...}` becomes a variable:
/// it is rendered as `name: $name`, its value is stored in `variables`, and
/// a `($name: ID!)` declaration is inserted after the operation keyword.
///
/// # Example
///
/// ```rust
/// use fluent_api::clients::graphql::{template_for, OperationKind, QueryBuilder, VariableQueryBuilder};
/// use serde_json::json;
///
/// let args = json!({"id": {"type": "ID!", "value": "42"}, "active": true});
/// let args = args.as_object().unwrap();
/// let template = template_for(OperationKind::Query, "user", "id", true);
///
/// let built = VariableQueryBuilder.build(&template, args).unwrap();
/// assert_eq!(built.query, "query ($id: ID!) { user (id: $id, active: true) { id } }");
/// assert_eq!(built.variables["id"], json!("42"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct VariableQueryBuilder;

impl QueryBuilder for VariableQueryBuilder {
    fn build(
        &self,
        template: &[String; 2],
        args: &Map<String, Value>,
    ) -> Result<BuiltQuery, QueryBuildError> {
        let mut rendered = Vec::with_capacity(args.len());
        let mut declarations = Vec::new();
        let mut variables = Map::new();

        for (key, value) in args {
            let name = argument_name(key)?;
            let literal = if let Some((ty, var_value)) = variable_parts(key, value)? {
                let ty = parse_type(ty).ok_or_else(|| QueryBuildError::InvalidVariable {
                    name: key.clone(),
                    reason: format!("'{}' is not a GraphQL type", ty.trim()),
                })?;
                declarations.push(format!("${name}: {ty}"));
                variables.insert(key.clone(), var_value.clone());
                ast::Value::Variable(name.clone())
            } else {
                to_graphql_value(value)?
            };
            rendered.push(format!("{name}: {}", literal.serialize().no_indent()));
        }

        let head = if declarations.is_empty() {
            template[0].clone()
        } else {
            let declarations = declarations.join(", ");
            match template[0].split_once(' ') {
                Some((keyword, rest)) => format!("{keyword} ({declarations}) {rest}"),
                None => format!("{} ({declarations})", template[0]),
            }
        };

        Ok(BuiltQuery {
            query: format!("{head}{}{}", rendered.join(", "), template[1]),
            variables,
        })
    }
}

/// Validates an argument or input-object key as a GraphQL name.
fn argument_name(key: &str) -> Result<Name, QueryBuildError> {
    Name::new(key).map_err(|_| QueryBuildError::InvalidArgumentName {
        name: key.to_string(),
    })
}

/// Splits a `{type, value}` argument into its parts.
///
/// Objects with exactly the keys `type` and `value` are variables; anything
/// else is a literal.
fn variable_parts<'a>(
    name: &str,
    value: &'a Value,
) -> Result<Option<(&'a str, &'a Value)>, QueryBuildError> {
    let Some(object) = value.as_object() else {
        return Ok(None);
    };
    if object.len() != 2 || !object.contains_key("type") || !object.contains_key("value") {
        return Ok(None);
    }

    match object.get("type").and_then(Value::as_str) {
        Some(ty) if !ty.trim().is_empty() => Ok(object.get("value").map(|v| (ty, v))),
        _ => Err(QueryBuildError::InvalidVariable {
            name: name.to_string(),
            reason: "type must be a non-empty string".to_string(),
        }),
    }
}

/// Parses a type reference such as `ID!`, `[String]` or `[Int!]!`.
fn parse_type(text: &str) -> Option<ast::Type> {
    let text = text.trim();
    let (text, non_null) = match text.strip_suffix('!') {
        Some(inner) => (inner.trim_end(), true),
        None => (text, false),
    };

    if let Some(inner) = text.strip_prefix('[') {
        let inner = parse_type(inner.strip_suffix(']')?)?;
        return Some(if non_null {
            ast::Type::NonNullList(Box::new(inner))
        } else {
            ast::Type::List(Box::new(inner))
        });
    }

    let name = Name::new(text).ok()?;
    Some(if non_null {
        ast::Type::NonNullNamed(name)
    } else {
        ast::Type::Named(name)
    })
}

/// Converts a JSON value into a GraphQL input value.
fn to_graphql_value(value: &Value) -> Result<ast::Value, QueryBuildError> {
    Ok(match value {
        Value::Null => ast::Value::Null,
        Value::Bool(b) => ast::Value::Boolean(*b),
        Value::Number(n) if n.is_f64() => {
            ast::Value::Float(ast::FloatValue::new_parsed(&n.to_string()))
        }
        Value::Number(n) => ast::Value::Int(ast::IntValue::new_parsed(&n.to_string())),
        Value::String(s) => ast::Value::String(s.clone()),
        Value::Array(items) => ast::Value::List(
            items
                .iter()
                .map(|item| to_graphql_value(item).map(Node::new))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(fields) => ast::Value::Object(
            fields
                .iter()
                .map(|(key, item)| Ok((argument_name(key)?, Node::new(to_graphql_value(item)?))))
                .collect::<Result<_, QueryBuildError>>()?,
        ),
    })
}
