use super::Span;

/// Diagnostic kinds, ordered by severity of consequence.
///
/// Table diagnostics are row-local: a bad row is dropped and parsing moves on,
/// so there is no cascade suppression here. The ordering still groups kinds
/// the way they surface: rows that never become descriptors, then registry
/// conflicts, then chain problems, then advisories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Rows that cannot become descriptors
    MalformedRow,
    InvalidSignature,
    UnknownModifier,
    RowOutsideModule,

    // Registry conflicts
    DuplicateKind,
    ConflictingUpstream,

    // Module chain problems
    UnknownUpstream,
    UpstreamCycle,

    // Advisories
    UnresolvedType,
}

impl DiagnosticKind {
    /// Default severity for this kind.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnresolvedType => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Default hint for this kind, automatically included in diagnostics.
    /// Call sites can add additional hints for context-specific information.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::MalformedRow => {
                Some("rows have three `|`-separated columns: tag, signature, description")
            }
            Self::InvalidSignature => {
                Some("signatures look like `name(first: type, rest: type*) : superclass`")
            }
            Self::UnknownModifier => Some("valid flags are `S` and `O`"),
            Self::UnresolvedType => {
                Some("parameter types may reference external types freely; superclasses must be declared")
            }
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::MalformedRow => "row does not have three columns",
            Self::InvalidSignature => "cannot parse constructor signature",
            Self::UnknownModifier => "unknown modifier flag",
            Self::RowOutsideModule => "row appears before any `module` header",
            Self::DuplicateKind => "duplicate node kind",
            Self::ConflictingUpstream => "module reopened with a different upstream",
            Self::UnknownUpstream => "unknown upstream module",
            Self::UpstreamCycle => "module chain contains a cycle",
            Self::UnresolvedType => "type is never declared",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownModifier => "`{}` is not a recognized modifier flag".to_string(),
            Self::DuplicateKind => "`{}` is already declared in this module".to_string(),
            Self::UnknownUpstream => "upstream module `{}` is not declared".to_string(),
            Self::UpstreamCycle => "module chain cycles through `{}`".to_string(),
            Self::UnresolvedType => "type `{}` is never declared".to_string(),
            Self::ConflictingUpstream => {
                "module `{}` was already opened with a different upstream".to_string()
            }
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The span underlined in output.
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        let hints = kind.default_hint().map(str::to_string).into_iter().collect();
        Self {
            kind,
            span,
            message: message.into(),
            related: Vec::new(),
            hints,
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, span: Span) -> Self {
        Self::new(kind, span, kind.fallback_message())
    }

    pub(crate) fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.span.range.start()),
            u32::from(self.span.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.span.range.start()),
                u32::from(related.span.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
