//! Catalog metadata attached to IR nodes by the resolver.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A resolved reference to a catalog function definition.
///
/// The resolver attaches one of these to every function-call expression; the
/// compiler performs no catalog lookups of its own. `native` is the target
/// dialect's identifier for the function; when it is absent the function
/// cannot be compiled and the whole query fails with
/// [`CompileError::UnsupportedFunction`](crate::CompileError::UnsupportedFunction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRef {
    /// Catalog display name, used in error messages.
    pub name: String,

    /// Native function identifier in the target dialect, possibly
    /// schema-qualified (e.g. `pg_catalog.count`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,

    /// True for functions computed over a group of rows.
    #[serde(default)]
    pub aggregate: bool,
}

impl FunctionRef {
    /// A scalar function with a native mapping.
    pub fn scalar(name: impl Into<String>, native: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native: Some(native.into()),
            aggregate: false,
        }
    }

    /// An aggregate function with a native mapping.
    pub fn aggregate(name: impl Into<String>, native: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native: Some(native.into()),
            aggregate: true,
        }
    }

    /// A function the target dialect has no equivalent for.
    pub fn unmapped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native: None,
            aggregate: false,
        }
    }

    /// Marks the function as an aggregate.
    pub fn as_aggregate(mut self) -> Self {
        self.aggregate = true;
        self
    }
}
