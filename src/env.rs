//! Caller-supplied group values and the per-call group environment.

use std::collections::BTreeMap;

use crate::ast::{GroupRef, GroupTable};
use crate::error::{Error, Result};

/// Values to seed capturing groups with before generation.
///
/// `positional[i]` seeds group `i + 1`; `named[name]` seeds the group aliased
/// by `name` and overrides a positional value for the same group. Seeds are
/// not checked against the group's sub-pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupValues {
    pub positional: Vec<String>,
    pub named: BTreeMap<String, String>,
}

impl GroupValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positional<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positional.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn push(mut self, value: impl Into<String>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }
}

/// Resolved group values for one generation call.
///
/// A slot is written at most once: either from a seed or the first time its
/// group is generated. Name aliases resolve through the group table, so a
/// value stored under an id is visible under its name too.
#[derive(Debug)]
pub struct GroupEnv<'a> {
    groups: &'a GroupTable,
    values: Vec<Option<String>>,
}

impl<'a> GroupEnv<'a> {
    pub fn new(groups: &'a GroupTable) -> Self {
        GroupEnv {
            groups,
            values: vec![None; groups.count()],
        }
    }

    /// Build an environment pre-populated from `seeds`.
    pub fn seeded(groups: &'a GroupTable, seeds: &GroupValues) -> Result<Self> {
        let mut env = GroupEnv::new(groups);
        for (i, value) in seeds.positional.iter().enumerate() {
            let target = GroupRef::Index(i + 1);
            let index = groups.resolve(&target).ok_or(Error::UnknownGroup { target })?;
            env.values[index - 1] = Some(value.clone());
        }
        for (name, value) in &seeds.named {
            let target = GroupRef::Name(name.clone());
            let index = groups.resolve(&target).ok_or(Error::UnknownGroup { target })?;
            env.values[index - 1] = Some(value.clone());
        }
        Ok(env)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index.checked_sub(1)?)?.as_deref()
    }

    pub fn lookup(&self, target: &GroupRef) -> Option<&str> {
        self.get(self.groups.resolve(target)?)
    }

    /// Record the generated value of group `index`. A group that already has
    /// a value keeps it.
    pub fn store(&mut self, index: usize, value: String) {
        if let Some(slot) = index.checked_sub(1).and_then(|i| self.values.get_mut(i)) {
            debug_assert!(slot.is_none(), "group {} resolved twice", index);
            slot.get_or_insert(value);
        }
    }
}
