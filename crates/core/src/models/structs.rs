//! Struct definitions inferred from tabular samples

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{Type, collect_deps};

/// A single struct tag entry, e.g. `json:"id"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\"{}\"", self.name, self.value)
    }
}

/// Ordered struct tags, rendered as a single raw string literal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(pub Vec<Tag>);

impl Tags {
    pub fn push(&mut self, tag: Tag) {
        self.0.push(tag);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.value.as_str())
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        f.write_str("`")?;
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", tag)?;
        }
        f.write_str("`")
    }
}

/// A single struct member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            tags: Tags::default(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)?;
        if !self.tags.is_empty() {
            write!(f, " {}", self.tags)?;
        }
        Ok(())
    }
}

/// Ordered struct fields; order matches the source header's column order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Struct {
    fields: Vec<Field>,
}

impl Struct {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Append a tag named `key` to every field, deriving its value from the field.
    pub fn tag_all(&mut self, key: &str, value: impl Fn(&Field) -> String) {
        for field in &mut self.fields {
            let tag = Tag::new(key, value(field));
            field.tags.push(tag);
        }
    }

    /// Import paths the struct's field types depend on
    pub fn deps(&self) -> Vec<String> {
        collect_deps(self.fields.iter().map(|f| &f.ty))
    }
}

impl<'a> IntoIterator for &'a Struct {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Renders the struct body: one tab-indented, column-aligned line per field.
impl fmt::Display for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<String> = self.fields.iter().map(|fl| fl.ty.to_string()).collect();
        let max_name = self
            .fields
            .iter()
            .map(|fl| fl.name.chars().count())
            .max()
            .unwrap_or(0);
        let max_type = types.iter().map(|t| t.chars().count()).max().unwrap_or(0);

        for (field, typ) in self.fields.iter().zip(&types) {
            let line = if field.tags.is_empty() {
                format!("\t{:<w$} {}", field.name, typ, w = max_name)
            } else {
                format!(
                    "\t{:<nw$} {:<tw$} {}",
                    field.name,
                    typ,
                    field.tags,
                    nw = max_name,
                    tw = max_type
                )
            };
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
