//! Static translation tables from tool parameters to collaborator arguments.
//!
//! Tool-facing names and collaborator-facing names are allowed to differ
//! (`departure_date` vs `date`, `destination` vs `location`). Every
//! difference is spelled out in an [`ArgMapping`] and checked once, when
//! the tool is registered, so a mismatch fails at start-up instead of on
//! the first call.

use travel_providers::{ProviderCall, ProviderQuery, ProviderSignature};

use crate::error::{RegistryError, ToolError};
use crate::schema::ToolSpec;
use crate::tool::ToolArgs;

/// Pairs of (tool param, collaborator param) for one collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgMapping {
    pub signature: ProviderSignature,
    pub pairs: &'static [(&'static str, &'static str)],
}

impl ArgMapping {
    /// Create a mapping to an explicit signature.
    pub const fn new(
        signature: ProviderSignature,
        pairs: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { signature, pairs }
    }

    /// Create a mapping to the collaborator behind query type `Q`.
    pub const fn to<Q: ProviderQuery>(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self::new(Q::SIGNATURE, pairs)
    }

    /// Collaborator name.
    pub fn provider(&self) -> &'static str {
        self.signature.name
    }

    /// Build the outbound call. Absent tool params are left out.
    pub fn translate(&self, args: &ToolArgs) -> ProviderCall {
        self.pairs
            .iter()
            .fold(ProviderCall::new(self.signature.name), |call, (from, to)| {
                match args.get(from) {
                    Some(value) => call.with_arg(*to, value.clone()),
                    None => call,
                }
            })
    }

    /// Translate and decode into the collaborator's typed query.
    pub fn query<Q: ProviderQuery>(&self, args: &ToolArgs) -> Result<Q, ToolError> {
        Ok(Q::from_call(self.translate(args))?)
    }

    /// Check the table against the tool's declared parameters.
    ///
    /// Every source must be a declared tool parameter, every target a
    /// collaborator parameter, and every required collaborator parameter
    /// must be fed by a tool parameter that is always present.
    pub fn check(&self, spec: &ToolSpec) -> Result<(), RegistryError> {
        let fail = |reason: String| RegistryError::Mapping {
            tool: spec.name.clone(),
            provider: self.signature.name,
            reason,
        };

        let mut targets: Vec<&str> = Vec::with_capacity(self.pairs.len());
        for &(from, to) in self.pairs {
            if spec.get(from).is_none() {
                return Err(fail(format!("'{}' is not a parameter of the tool", from)));
            }
            if self.signature.param(to).is_none() {
                return Err(fail(format!(
                    "'{}' is not accepted by the collaborator",
                    to
                )));
            }
            if targets.contains(&to) {
                return Err(fail(format!("'{}' is mapped more than once", to)));
            }
            targets.push(to);
        }

        for required in self.signature.required() {
            let source = self
                .pairs
                .iter()
                .find(|(_, to)| *to == required)
                .and_then(|(from, _)| spec.get(from));

            match source {
                None => {
                    return Err(fail(format!(
                        "required argument '{}' is not mapped from any tool parameter",
                        required
                    )))
                }
                Some(param) if !param.required && param.default.is_none() => {
                    return Err(fail(format!(
                        "required argument '{}' is fed by optional parameter '{}' without a default",
                        required, param.name
                    )))
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}
