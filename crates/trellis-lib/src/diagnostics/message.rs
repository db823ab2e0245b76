use crate::Location;

/// Diagnostic kinds, grouped by the phase that reports them.
///
/// Declaration order is also the tie-breaker when two diagnostics share a
/// location, so include problems sort before the lookups they break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // File loading
    UnresolvedInclude,
    IncludeDepthExceeded,

    // Declaration pass
    DuplicateSymbol,

    // Link pass - name resolution
    UnresolvedType,
    AmbiguousType,
    UnresolvedConstant,
    CyclicTypedef,
    CyclicConstant,
    TypeMismatch,
    InvalidFieldType,

    // Validation pass
    DuplicateFieldId,
    DuplicateFieldName,
    InvalidUnionField,
    InvalidExceptionType,
    OneWayReturnType,
    OneWayThrows,
    DuplicateEnumMember,
    InvalidServiceExtends,
    CyclicServiceInheritance,
    DuplicateMethod,

    // Advisory
    DeprecatedUsage,
}

impl DiagnosticKind {
    /// Default severity for this kind. Can be overridden by policy.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::DeprecatedUsage => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Default hint for this kind, automatically included in diagnostics.
    /// Call sites can add additional hints for context-specific information.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::AmbiguousType => Some("qualify the name with its include prefix"),
            Self::CyclicTypedef => Some("a typedef must eventually name a non-typedef type"),
            Self::OneWayThrows => Some("oneway calls never deliver a response"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnresolvedInclude => "include could not be resolved",
            Self::IncludeDepthExceeded => "include chain is too deep",

            Self::DuplicateSymbol => "duplicate declaration",

            Self::UnresolvedType => "unknown type",
            Self::AmbiguousType => "ambiguous type reference",
            Self::UnresolvedConstant => "unknown constant",
            Self::CyclicTypedef => "cyclic typedef",
            Self::CyclicConstant => "cyclic constant reference",
            Self::TypeMismatch => "type mismatch",
            Self::InvalidFieldType => "invalid type",

            Self::DuplicateFieldId => "duplicate field id",
            Self::DuplicateFieldName => "duplicate field name",
            Self::InvalidUnionField => "invalid union field",
            Self::InvalidExceptionType => "only exception types can be thrown",
            Self::OneWayReturnType => "oneway methods must return void",
            Self::OneWayThrows => "oneway methods may not throw exceptions",
            Self::DuplicateEnumMember => "duplicate enum member",
            Self::InvalidServiceExtends => "services may only extend services",
            Self::CyclicServiceInheritance => "cyclic service inheritance",
            Self::DuplicateMethod => "duplicate method",

            Self::DeprecatedUsage => "use of deprecated type",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnresolvedInclude => "cannot resolve include `{}`".to_string(),
            Self::DuplicateSymbol => "`{}` is already declared".to_string(),
            Self::UnresolvedType => "`{}` is not a known type".to_string(),
            Self::AmbiguousType => "`{}` is ambiguous".to_string(),
            Self::UnresolvedConstant => "`{}` is not a known constant".to_string(),
            Self::InvalidExceptionType => {
                "only exception types can be thrown; `{}` is not an exception".to_string()
            }
            Self::OneWayReturnType => "oneway method `{}` must return void".to_string(),
            Self::OneWayThrows => "oneway method `{}` may not throw exceptions".to_string(),
            Self::InvalidServiceExtends => "`{}` is not a service".to_string(),
            Self::DuplicateMethod => "method `{}` is already declared".to_string(),
            Self::DeprecatedUsage => "`{}` is deprecated".to_string(),

            // Standard pattern: fallback + context
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Secondary location shown alongside a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) location: Location,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) location: Location,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
            related: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, location: Location) -> Self {
        let mut msg = Self::new(kind, location, kind.fallback_message());
        if let Some(hint) = kind.default_hint() {
            msg.hints.push(hint.to_string());
        }
        msg
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}: {}",
            self.severity(),
            self.location,
            self.message
        )?;
        for related in &self.related {
            write!(f, " (related: {} at {})", related.message, related.location)?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
