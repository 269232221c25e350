//! Method signatures and interfaces

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{Type, collect_deps};

/// A single method signature
///
/// Parameter and result order is exactly the declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Func {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ins: Vec<Type>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outs: Vec<Type>,
}

impl Func {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ins: Vec::new(),
            outs: Vec::new(),
        }
    }

    pub fn with_ins(mut self, ins: Vec<Type>) -> Self {
        self.ins = ins;
        self
    }

    pub fn with_outs(mut self, outs: Vec<Type>) -> Self {
        self.outs = outs;
        self
    }

    /// Import paths referenced by the parameters and results
    pub fn deps(&self) -> Vec<String> {
        collect_deps(self.ins.iter().chain(self.outs.iter()))
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[Type]) -> fmt::Result {
    for (i, typ) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", typ)?;
    }
    Ok(())
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_list(f, &self.ins)?;
        f.write_str(")")?;
        match self.outs.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " {}", single),
            outs => {
                f.write_str(" (")?;
                write_list(f, outs)?;
                f.write_str(")")
            }
        }
    }
}

/// The minimal method set of a type, sorted by method name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interface {
    funcs: Vec<Func>,
}

impl Interface {
    /// Build an interface from methods, sorting them by name.
    pub fn new(mut funcs: Vec<Func>) -> Self {
        funcs.sort_by(|a, b| a.name.cmp(&b.name));
        Self { funcs }
    }

    pub fn funcs(&self) -> &[Func] {
        &self.funcs
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Func> {
        self.funcs.iter()
    }

    /// Get a method by name
    pub fn get(&self, name: &str) -> Option<&Func> {
        self.funcs
            .binary_search_by(|f| f.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.funcs[i])
    }

    /// Import paths the interface depends on
    pub fn deps(&self) -> Vec<String> {
        collect_deps(
            self.funcs
                .iter()
                .flat_map(|f| f.ins.iter().chain(f.outs.iter())),
        )
    }
}

impl<'a> IntoIterator for &'a Interface {
    type Item = &'a Func;
    type IntoIter = std::slice::Iter<'a, Func>;

    fn into_iter(self) -> Self::IntoIter {
        self.funcs.iter()
    }
}
