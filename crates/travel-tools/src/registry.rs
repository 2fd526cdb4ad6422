//! Tool registry.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::info;

use crate::error::{RegistryError, ToolError};
use crate::schema::ToolSpec;
use crate::tool::{RegisteredTool, Tool};

/// Registry of the tools a server exposes.
///
/// Built once at start-up and then shared read-only behind an `Arc`.
/// Tools are kept in registration order, which is the order discovery
/// lists them in.
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Arc<dyn RegisteredTool>>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// Fails if the name is taken, if the tool's parameter schema is
    /// inconsistent, or if any of its argument mappings does not fit the
    /// collaborator it targets.
    pub fn register<T: Tool>(&mut self, tool: T) -> Result<(), RegistryError> {
        self.register_shared(Arc::new(tool))
    }

    /// Register an already shared tool.
    pub fn register_shared(&mut self, tool: Arc<dyn RegisteredTool>) -> Result<(), RegistryError> {
        let spec = tool.describe();
        if self.tools.contains_key(&spec.name) {
            return Err(RegistryError::DuplicateName(spec.name.clone()));
        }

        spec.check()?;
        for mapping in tool.translations() {
            mapping.check(spec)?;
        }

        let name = spec.name.clone();
        info!(
            "Registering tool: {} ({} params, {} collaborators)",
            name,
            spec.params.len(),
            tool.translations().len()
        );
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn RegisteredTool>, ToolError> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    /// Tool specs in registration order.
    pub fn list(&self) -> Vec<&ToolSpec> {
        self.tools.values().map(|t| t.describe()).collect()
    }

    /// Registered tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::ArgMapping;
    use crate::schema::ParamSpec;
    use crate::tool::ToolArgs;
    use async_trait::async_trait;
    use travel_providers::SafetyQuery;

    struct EchoTool {
        spec: ToolSpec,
    }

    impl EchoTool {
        fn named(name: &str) -> Self {
            Self {
                spec: ToolSpec::new(name, "Echoes the country back")
                    .param(ParamSpec::string("country").required()),
            }
        }
    }

    const ECHO_MAPPINGS: &[ArgMapping] = &[ArgMapping::to::<SafetyQuery>(&[("country", "country")])];

    #[async_trait]
    impl Tool for EchoTool {
        type Output = String;

        fn spec(&self) -> &ToolSpec {
            &self.spec
        }

        fn mappings(&self) -> &[ArgMapping] {
            ECHO_MAPPINGS
        }

        async fn call(&self, args: &ToolArgs) -> Result<String, ToolError> {
            args.get_string("country")
        }

        fn format(&self, _args: &ToolArgs, output: &String) -> Result<String, ToolError> {
            Ok(output.clone())
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool::named("echo")).unwrap();

        assert!(registry.has_tool("echo"));
        assert!(registry.lookup("echo").is_ok());
        assert!(matches!(
            registry.lookup("nope"),
            Err(ToolError::UnknownTool(ref n)) if n == "nope"
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool::named("echo")).unwrap();

        let err = registry.register(EchoTool::named("echo")).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(ref n) if n == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_keeps_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(EchoTool::named(name)).unwrap();
        }
        assert_eq!(registry.names(), vec!["zeta", "alpha", "mid"]);
        let specs = registry.list();
        assert_eq!(specs[1].name, "alpha");
    }

    #[test]
    fn test_bad_mapping_rejected() {
        let mut tool = EchoTool::named("echo");
        tool.spec = ToolSpec::new("echo", "Echo").param(ParamSpec::string("nation").required());

        let mut registry = ToolRegistry::new();
        let err = registry.register(tool).unwrap_err();
        assert!(matches!(err, RegistryError::Mapping { .. }));
        assert!(registry.is_empty());
    }
}
