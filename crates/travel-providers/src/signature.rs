//! Collaborator signatures and the call descriptor handed to them.
//!
//! Every provider query type declares a [`ProviderSignature`] listing the
//! argument names it accepts. Tools translate their own parameters into a
//! [`ProviderCall`] carrying exactly those names, and the query type is
//! decoded from the call with unknown fields rejected.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ProviderError;

/// A single argument accepted by a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderParam {
    /// Argument name as the collaborator expects it.
    pub name: &'static str,
    /// Whether the collaborator cannot run without it.
    pub required: bool,
}

impl ProviderParam {
    /// A required collaborator argument.
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    /// An optional collaborator argument.
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

/// Static declaration of a collaborator's name and accepted arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderSignature {
    /// Collaborator identity (e.g. `search_flights`).
    pub name: &'static str,
    /// Accepted arguments.
    pub params: &'static [ProviderParam],
}

impl ProviderSignature {
    /// Create a signature.
    pub const fn new(name: &'static str, params: &'static [ProviderParam]) -> Self {
        Self { name, params }
    }

    /// Look up an argument by name.
    pub fn param(&self, name: &str) -> Option<&ProviderParam> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Names of the arguments the collaborator requires.
    pub fn required(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().filter(|p| p.required).map(|p| p.name)
    }
}

/// One outbound call to a collaborator.
///
/// Built fresh for every tool invocation and consumed by it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCall {
    /// Target collaborator.
    pub provider: &'static str,
    /// Arguments keyed by collaborator argument name.
    pub args: Map<String, Value>,
}

impl ProviderCall {
    /// Create an empty call for the given collaborator.
    pub fn new(provider: &'static str) -> Self {
        Self {
            provider,
            args: Map::new(),
        }
    }

    /// Add an argument.
    pub fn with_arg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.args.insert(name.into(), value);
        self
    }
}

/// A typed collaborator query decodable from a [`ProviderCall`].
pub trait ProviderQuery: DeserializeOwned {
    /// The collaborator this query is for.
    const SIGNATURE: ProviderSignature;

    /// Decode the query from a call addressed to this collaborator.
    fn from_call(call: ProviderCall) -> Result<Self, ProviderError> {
        let name = Self::SIGNATURE.name;
        if call.provider != name {
            return Err(ProviderError::invalid_query(
                name,
                format!("call addressed to '{}'", call.provider),
            ));
        }

        if let Some(missing) = Self::SIGNATURE
            .required()
            .find(|param| !call.args.contains_key(*param))
        {
            return Err(ProviderError::invalid_query(
                name,
                format!("missing argument '{}'", missing),
            ));
        }

        serde_json::from_value(Value::Object(call.args))
            .map_err(|e| ProviderError::invalid_query(name, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct EchoQuery {
        word: String,
        #[serde(default)]
        times: Option<u32>,
    }

    impl ProviderQuery for EchoQuery {
        const SIGNATURE: ProviderSignature = ProviderSignature::new(
            "echo",
            &[ProviderParam::required("word"), ProviderParam::optional("times")],
        );
    }

    #[test]
    fn test_decode_call() {
        let call = ProviderCall::new("echo")
            .with_arg("word", json!("hi"))
            .with_arg("times", json!(2));
        let query = EchoQuery::from_call(call).unwrap();
        assert_eq!(query.word, "hi");
        assert_eq!(query.times, Some(2));
    }

    #[test]
    fn test_rejects_unknown_argument() {
        let call = ProviderCall::new("echo")
            .with_arg("word", json!("hi"))
            .with_arg("departure_date", json!("2024-12-15"));
        let err = EchoQuery::from_call(call).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidQuery { provider: "echo", .. }));
    }

    #[test]
    fn test_rejects_missing_argument() {
        let err = EchoQuery::from_call(ProviderCall::new("echo")).unwrap_err();
        assert!(err.to_string().contains("missing argument 'word'"));
    }

    #[test]
    fn test_rejects_wrong_collaborator() {
        let call = ProviderCall::new("shout").with_arg("word", json!("hi"));
        assert!(EchoQuery::from_call(call).is_err());
    }

    #[test]
    fn test_required_params() {
        let required: Vec<_> = EchoQuery::SIGNATURE.required().collect();
        assert_eq!(required, vec!["word"]);
        assert!(EchoQuery::SIGNATURE.param("times").is_some());
        assert!(EchoQuery::SIGNATURE.param("nope").is_none());
    }
}
