//! Value types carried inside documents.

use bson::{Bson, Document, JavaScriptCodeWithScope};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A piece of JavaScript source with no attached scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(pub String);

impl Code {
    /// The source text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Code {
    fn from(code: &str) -> Self {
        Code(code.to_string())
    }
}

impl From<String> for Code {
    fn from(code: String) -> Self {
        Code(code)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Code> for Bson {
    fn from(code: Code) -> Self {
        Bson::JavaScriptCode(code.0)
    }
}

/// A piece of JavaScript source together with the scope it runs against.
///
/// Two values are equal only when both the source text and the scope
/// document are equal, and equal values always hash equally.
#[derive(Debug, Clone)]
pub struct CodeWithScope {
    code: Code,
    scope: Document,
}

impl CodeWithScope {
    /// Creates a value from source text and its scope. Both parts are
    /// required; neither is defaulted.
    pub fn new(code: impl Into<Code>, scope: Document) -> Self {
        CodeWithScope {
            code: code.into(),
            scope,
        }
    }

    /// The source text.
    pub fn code(&self) -> &Code {
        &self.code
    }

    /// The scope document.
    pub fn scope(&self) -> &Document {
        &self.scope
    }
}

impl PartialEq for CodeWithScope {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.scope == other.scope
    }
}

impl Eq for CodeWithScope {}

impl Hash for CodeWithScope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut code_hasher = DefaultHasher::new();
        self.code.hash(&mut code_hasher);

        // Equal documents have equal canonical bytes, which keeps the
        // hash consistent with `eq`.
        let mut scope_hasher = DefaultHasher::new();
        bson::to_vec(&self.scope)
            .unwrap_or_default()
            .hash(&mut scope_hasher);

        state.write_u64(code_hasher.finish() ^ scope_hasher.finish());
    }
}

impl From<CodeWithScope> for Bson {
    fn from(value: CodeWithScope) -> Self {
        Bson::JavaScriptCodeWithScope(JavaScriptCodeWithScope {
            code: value.code.0,
            scope: value.scope,
        })
    }
}
