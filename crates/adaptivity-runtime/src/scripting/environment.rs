//! Scripting environment
//!
//! An [`Environment`] is an arena of named scopes holding typed variables.
//! Scopes form a tree rooted at [`ScopeId::ROOT`]:
//!
//! - reads fall through to ancestor scopes
//! - writing a key an ancestor already owns updates the ancestor, so nested
//!   layers that share state see each other's mutations
//! - writing an unseen key creates it in the writing scope
//!
//! A layer that shares its parent's state is handed the parent's `ScopeId`;
//! a layer with private variables gets a child scope from
//! [`Environment::create_scope`].

use super::evaluator::Lookup;
use crate::error::{Result, RuntimeError};
use adaptivity_core::{CoreError, FlattenedState, TypedValue, Value, VariableType};
use std::collections::{BTreeMap, HashSet};

/// Bound variables may chain, but never further than this
const MAX_BINDING_DEPTH: usize = 16;

/// Handle to a scope inside an [`Environment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The root scope every environment starts with
    pub const ROOT: ScopeId = ScopeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Scope {
    name: String,
    parent: Option<ScopeId>,
    variables: BTreeMap<String, TypedValue>,
}

/// Arena of variable scopes
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create an environment with an empty root scope
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                name: "root".to_string(),
                parent: None,
                variables: BTreeMap::new(),
            }],
        }
    }

    /// Create an environment whose root scope holds the given state, types inferred
    pub fn from_state(state: &FlattenedState) -> Self {
        let mut env = Self::new();
        for (key, value) in state {
            env.scopes[0]
                .variables
                .insert(key.clone(), TypedValue::inferred(key.clone(), value.clone()));
        }
        env
    }

    /// Create a named child scope
    pub fn create_scope(&mut self, name: impl Into<String>, parent: ScopeId) -> Result<ScopeId> {
        self.scope(parent)?;
        let id = ScopeId(self.scopes.len());
        let name = name.into();
        tracing::debug!("Creating scope '{}' ({:?}) under {:?}", name, id, parent);
        self.scopes.push(Scope {
            name,
            parent: Some(parent),
            variables: BTreeMap::new(),
        });
        Ok(id)
    }

    /// Find a scope by name (first created wins)
    pub fn find_scope(&self, name: &str) -> Option<ScopeId> {
        self.scopes
            .iter()
            .position(|scope| scope.name == name)
            .map(ScopeId)
    }

    pub fn scope_name(&self, id: ScopeId) -> Option<&str> {
        self.scopes.get(id.0).map(|scope| scope.name.as_str())
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scopes.get(id.0).and_then(|scope| scope.parent)
    }

    fn scope(&self, id: ScopeId) -> Result<&Scope> {
        self.scopes.get(id.0).ok_or(RuntimeError::UnknownScope(id.0))
    }

    /// Scope chain from `id` up to the root
    fn ancestry(&self, id: ScopeId) -> Vec<ScopeId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(scope_id) = current {
            match self.scopes.get(scope_id.0) {
                Some(scope) => {
                    chain.push(scope_id);
                    current = scope.parent;
                }
                None => break,
            }
        }
        chain
    }

    /// Nearest scope (self or ancestor) that owns `key`
    pub fn owner_of(&self, scope: ScopeId, key: &str) -> Option<ScopeId> {
        self.ancestry(scope)
            .into_iter()
            .find(|id| self.scopes[id.0].variables.contains_key(key))
    }

    /// The variable visible from `scope` under `key`, without following bindings
    pub fn variable(&self, scope: ScopeId, key: &str) -> Option<&TypedValue> {
        let owner = self.owner_of(scope, key)?;
        self.scopes[owner.0].variables.get(key)
    }

    /// Key a read or write of `key` resolves to after following bindings
    fn resolve_binding(&self, scope: ScopeId, key: &str) -> String {
        let mut current = key.to_string();
        let mut seen = HashSet::new();
        while let Some(target) = self
            .variable(scope, &current)
            .and_then(|var| var.bind_to.clone())
        {
            if !seen.insert(current.clone()) || seen.len() > MAX_BINDING_DEPTH {
                tracing::warn!("Binding cycle at '{}', reading it directly", current);
                break;
            }
            current = target;
        }
        current
    }

    /// Value visible from `scope`; missing keys read as `Null`
    pub fn get(&self, scope: ScopeId, key: &str) -> Value {
        let resolved = self.resolve_binding(scope, key);
        self.variable(scope, &resolved)
            .map(|var| var.value.clone())
            .unwrap_or(Value::Null)
    }

    /// Declare a variable in exactly this scope, shadowing any ancestor's
    pub fn declare(&mut self, scope: ScopeId, variable: TypedValue) -> Result<()> {
        self.scope(scope)?;
        tracing::debug!(
            "Declaring '{}' as {} in {:?}",
            variable.key,
            variable.declared_type.name(),
            scope
        );
        self.scopes[scope.0]
            .variables
            .insert(variable.key.clone(), variable);
        Ok(())
    }

    /// Write a value, coercing it into the variable's declared type
    pub fn set(&mut self, scope: ScopeId, key: &str, value: Value) -> Result<Value> {
        self.set_typed(scope, key, value, None)
    }

    /// Write a value; `declared_type` is used only when the key is new
    ///
    /// Returns the value as stored.
    pub fn set_typed(
        &mut self,
        scope: ScopeId,
        key: &str,
        value: Value,
        declared_type: Option<VariableType>,
    ) -> Result<Value> {
        self.scope(scope)?;
        let resolved = self.resolve_binding(scope, key);

        match self.owner_of(scope, &resolved) {
            Some(owner) => {
                let variable = self.scopes[owner.0]
                    .variables
                    .get_mut(&resolved)
                    .ok_or_else(|| {
                        RuntimeError::InvalidOperation(format!("lost variable '{}'", resolved))
                    })?;
                variable.assign(&value)?;
                Ok(variable.value.clone())
            }
            None => {
                let variable = match declared_type {
                    Some(ty) => TypedValue::new(resolved.clone(), value, ty)?,
                    None => TypedValue::inferred(resolved.clone(), value),
                };
                let stored = variable.value.clone();
                self.scopes[scope.0].variables.insert(resolved, variable);
                Ok(stored)
            }
        }
    }

    /// Make `key` follow `target`: reads and writes of `key` go to `target`
    pub fn bind(&mut self, scope: ScopeId, key: &str, target: &str) -> Result<()> {
        self.scope(scope)?;
        if key == target {
            return Err(RuntimeError::InvalidOperation(format!(
                "cannot bind '{}' to itself",
                key
            )));
        }

        match self.owner_of(scope, key) {
            Some(owner) => {
                let variable = self.scopes[owner.0]
                    .variables
                    .get_mut(key)
                    .ok_or_else(|| {
                        RuntimeError::InvalidOperation(format!("lost variable '{}'", key))
                    })?;
                if variable.read_only {
                    return Err(CoreError::ReadOnly(key.to_string()).into());
                }
                variable.bind_to = Some(target.to_string());
            }
            None => {
                let variable = TypedValue::inferred(key, Value::Null).bound_to(target);
                self.scopes[scope.0].variables.insert(key.to_string(), variable);
            }
        }
        Ok(())
    }

    /// Every variable visible from `scope`; inner scopes shadow outer ones
    pub fn visible_variables(&self, scope: ScopeId) -> BTreeMap<&str, &TypedValue> {
        let mut visible = BTreeMap::new();
        for id in self.ancestry(scope).into_iter().rev() {
            for (key, variable) in &self.scopes[id.0].variables {
                visible.insert(key.as_str(), variable);
            }
        }
        visible
    }

    /// Read-only view of the environment from one scope
    pub fn view(&self, scope: ScopeId) -> ScopeView<'_> {
        ScopeView { env: self, scope }
    }
}

/// Variable lookups through one scope of an environment
#[derive(Debug, Clone, Copy)]
pub struct ScopeView<'a> {
    env: &'a Environment,
    scope: ScopeId,
}

impl Lookup for ScopeView<'_> {
    fn lookup(&self, key: &str) -> Value {
        self.env.get(self.scope, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_fall_through_to_ancestors() {
        let mut env = Environment::new();
        env.set(ScopeId::ROOT, "variables.scoreFactor", Value::from(2)).unwrap();
        let child = env.create_scope("q:1", ScopeId::ROOT).unwrap();

        assert_eq!(env.get(child, "variables.scoreFactor"), Value::from(2));
        assert_eq!(env.get(child, "missing"), Value::Null);
        assert_eq!(env.scope_name(child), Some("q:1"));
        assert_eq!(env.parent(child), Some(ScopeId::ROOT));
        assert_eq!(env.find_scope("q:1"), Some(child));
    }

    #[test]
    fn test_writes_to_ancestor_keys_are_shared() {
        let mut env = Environment::new();
        env.set(ScopeId::ROOT, "session.tutorialScore", Value::from(1)).unwrap();
        let child = env.create_scope("layer", ScopeId::ROOT).unwrap();

        env.set(child, "session.tutorialScore", Value::from(5)).unwrap();
        assert_eq!(env.get(ScopeId::ROOT, "session.tutorialScore"), Value::from(5));

        env.set(child, "stage.local.value", Value::from("x")).unwrap();
        assert_eq!(env.owner_of(child, "stage.local.value"), Some(child));
        assert_eq!(env.get(ScopeId::ROOT, "stage.local.value"), Value::Null);
    }

    #[test]
    fn test_declare_shadows_ancestor() {
        let mut env = Environment::new();
        env.set(ScopeId::ROOT, "k", Value::from(1)).unwrap();
        let child = env.create_scope("c", ScopeId::ROOT).unwrap();
        env.declare(child, TypedValue::inferred("k", Value::from(2))).unwrap();

        assert_eq!(env.get(child, "k"), Value::from(2));
        assert_eq!(env.get(ScopeId::ROOT, "k"), Value::from(1));
    }

    #[test]
    fn test_writes_coerce_to_declared_type() {
        let mut env = Environment::new();
        env.declare(
            ScopeId::ROOT,
            TypedValue::new("stage.slider.value", Value::from(0), VariableType::Number).unwrap(),
        )
        .unwrap();

        assert_eq!(
            env.set(ScopeId::ROOT, "stage.slider.value", Value::from("7")).unwrap(),
            Value::from(7)
        );
        assert!(matches!(
            env.set(ScopeId::ROOT, "stage.slider.value", Value::from("seven")),
            Err(RuntimeError::Core(CoreError::InvalidShape { .. }))
        ));
    }

    #[test]
    fn test_new_key_uses_declared_type() {
        let mut env = Environment::new();
        let stored = env
            .set_typed(
                ScopeId::ROOT,
                "stage.input.value",
                Value::from("1,2"),
                Some(VariableType::Array),
            )
            .unwrap();
        assert_eq!(stored, Value::from(vec![1, 2]));
        assert_eq!(
            env.variable(ScopeId::ROOT, "stage.input.value").unwrap().declared_type,
            VariableType::Array
        );
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut env = Environment::new();
        env.declare(
            ScopeId::ROOT,
            TypedValue::inferred("session.attemptNumber", Value::from(1)).read_only(true),
        )
        .unwrap();
        let err = env
            .set(ScopeId::ROOT, "session.attemptNumber", Value::from(2))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Core(CoreError::ReadOnly(_))));
    }

    #[test]
    fn test_bind_follows_target() {
        let mut env = Environment::new();
        env.set(ScopeId::ROOT, "stage.a.value", Value::from(3)).unwrap();
        env.bind(ScopeId::ROOT, "variables.alias", "stage.a.value").unwrap();
        assert_eq!(env.get(ScopeId::ROOT, "variables.alias"), Value::from(3));

        env.set(ScopeId::ROOT, "variables.alias", Value::from(4)).unwrap();
        assert_eq!(env.get(ScopeId::ROOT, "stage.a.value"), Value::from(4));
    }

    #[test]
    fn test_binding_cycle_does_not_hang() {
        let mut env = Environment::new();
        env.bind(ScopeId::ROOT, "a", "b").unwrap();
        env.bind(ScopeId::ROOT, "b", "a").unwrap();
        assert_eq!(env.get(ScopeId::ROOT, "a"), Value::Null);
        assert!(env.bind(ScopeId::ROOT, "c", "c").is_err());
    }

    #[test]
    fn test_unknown_scope() {
        let mut env = Environment::new();
        let err = env.create_scope("orphan", ScopeId(42)).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownScope(42)));
    }

    #[test]
    fn test_scope_view_lookup() {
        let env = Environment::from_state(&FlattenedState::from([(
            "session.attemptNumber".to_string(),
            Value::from(3),
        )]));
        assert_eq!(env.view(ScopeId::ROOT).lookup("session.attemptNumber"), Value::from(3));
    }
}
