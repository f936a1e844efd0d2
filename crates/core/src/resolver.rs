//! Input resolution for entrypoints.
//!
//! Every entrypoint turns a loose set of caller arguments into exactly one
//! input string: scan the candidate field names in order, fall back to the
//! first positional argument, then to a fixed default. Resolution never
//! fails; missing input only degrades what the delegate receives.

use ag_protocol::config_models::DEFAULT_INPUT;
use ag_protocol::entrypoint_models::ResolveStrategy;
use ag_protocol::request_models::EntrypointRequest;
use serde_json::Value;
use tracing::debug;

/// Describes which caller arguments feed an entrypoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    /// Candidate field names, scanned in declared order.
    pub fields: Vec<String>,

    /// Returned when nothing else resolves.
    pub default: String,

    pub strategy: ResolveStrategy,
}

impl InputSpec {
    /// Create a spec with the given candidate fields and the global default.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            default: DEFAULT_INPUT.to_string(),
            strategy: ResolveStrategy::FirstMatch,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_strategy(mut self, strategy: ResolveStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Whether a value counts as supplied.
///
/// `null`, `false`, numeric zero, and empty strings, arrays or objects are
/// all treated as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// String form of an argument: strings verbatim, everything else as compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolve a request into the single string forwarded to the delegate.
///
/// With [`ResolveStrategy::FirstMatch`] only the first truthy candidate is
/// used; later candidates are ignored even when supplied. With
/// [`ResolveStrategy::Joined`] every truthy candidate is joined with `\n`.
/// Either way an unmatched request falls back to the first non-null
/// positional argument, then to `spec.default`.
///
/// # Examples
///
/// ```
/// use ag_core::resolver::{resolve_input, InputSpec};
/// use ag_protocol::request_models::EntrypointRequest;
///
/// let spec = InputSpec::new(["topic", "audience"]);
/// let request = EntrypointRequest::new().with_named("audience", "teens");
/// assert_eq!(resolve_input(&spec, &request), "teens");
/// ```
pub fn resolve_input(spec: &InputSpec, request: &EntrypointRequest) -> String {
    if request.is_empty() {
        debug!(default = %spec.default, "empty request, using default");
        return spec.default.clone();
    }

    let from_fields = match spec.strategy {
        ResolveStrategy::FirstMatch => first_match(spec, request),
        ResolveStrategy::Joined => joined(spec, request),
    };

    if let Some(input) = from_fields {
        return input;
    }

    if let Some(first) = request.positional.first().filter(|v| !v.is_null()) {
        debug!("input resolved from first positional argument");
        return value_to_string(first);
    }

    debug!(default = %spec.default, "no input supplied, using default");
    spec.default.clone()
}

fn first_match(spec: &InputSpec, request: &EntrypointRequest) -> Option<String> {
    spec.fields.iter().find_map(|field| {
        let value = request.named.get(field).filter(|v| is_truthy(v))?;
        debug!(field = %field, "input resolved from named field");
        Some(value_to_string(value))
    })
}

fn joined(spec: &InputSpec, request: &EntrypointRequest) -> Option<String> {
    let parts: Vec<String> = spec
        .fields
        .iter()
        .filter_map(|field| request.named.get(field))
        .filter(|v| is_truthy(v))
        .map(value_to_string)
        .collect();

    if parts.is_empty() {
        None
    } else {
        debug!(count = parts.len(), "input joined from named fields");
        Some(parts.join("\n"))
    }
}
