//! Type queries of the form `"package/path".TypeName`

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::QueryError;

static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{N}_]*$").expect("identifier regex is valid"));

/// Identifies the named type under inspection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    /// Import path of the package declaring the type
    pub package: String,
    /// Name of the type
    #[serde(rename = "name")]
    pub type_name: String,
}

impl Query {
    /// Create a query from its parts, validating both.
    pub fn new(package: impl Into<String>, type_name: impl Into<String>) -> Result<Self, QueryError> {
        let query = Self {
            package: package.into(),
            type_name: type_name.into(),
        };
        query.validate()?;
        Ok(query)
    }

    /// Parse either the quoted form `"github.com/acme/widgets".Widget` or the bare
    /// form `github.com/acme/widgets.Widget`.
    ///
    /// In the bare form the separator is the last `.` after the last `/`, so
    /// package paths with dotted final segments (`gopkg.in/yaml.v3.Node`) parse.
    pub fn parse(query: &str) -> Result<Self, QueryError> {
        if query.is_empty() {
            return Err(QueryError::Empty);
        }
        let syntax = || QueryError::Syntax {
            query: query.to_string(),
        };

        let (package, type_name) = if let Some(rest) = query.strip_prefix('"') {
            let close = rest.rfind('"').ok_or_else(syntax)?;
            let type_name = rest[close + 1..].strip_prefix('.').ok_or_else(syntax)?;
            (&rest[..close], type_name)
        } else {
            let segment_start = query.rfind('/').map_or(0, |i| i + 1);
            let dot = query[segment_start..].rfind('.').ok_or_else(syntax)? + segment_start;
            (&query[..dot], &query[dot + 1..])
        };

        let parsed = Self {
            package: package.to_string(),
            type_name: type_name.to_string(),
        };
        parsed.validate()?;
        if !IDENTIFIER_REGEX.is_match(&parsed.type_name) {
            return Err(syntax());
        }
        Ok(parsed)
    }

    /// Check that neither part is empty
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.package.is_empty() {
            return Err(QueryError::EmptyPackage);
        }
        if self.type_name.is_empty() {
            return Err(QueryError::EmptyTypeName);
        }
        Ok(())
    }

    /// Last segment of the package path
    pub fn package_base(&self) -> &str {
        path_base(&self.package)
    }
}

/// Last element of a slash-separated path, ignoring trailing slashes
pub(crate) fn path_base(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { "/" };
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\".{}", self.package, self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare() {
        let q = Query::parse("os.File").unwrap();
        assert_eq!(q.package, "os");
        assert_eq!(q.type_name, "File");

        let q = Query::parse("github.com/rjeczalik/interfaces.Query").unwrap();
        assert_eq!(q.package, "github.com/rjeczalik/interfaces");
        assert_eq!(q.type_name, "Query");
    }

    #[test]
    fn test_parse_dotted_segment() {
        let q = Query::parse("gopkg.in/yaml.v3.Node").unwrap();
        assert_eq!(q.package, "gopkg.in/yaml.v3");
        assert_eq!(q.type_name, "Node");
    }

    #[test]
    fn test_parse_quoted() {
        let q = Query::parse(r#""github.com/minio/minio-go/v6".Client"#).unwrap();
        assert_eq!(q.package, "github.com/minio/minio-go/v6");
        assert_eq!(q.type_name, "Client");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Query::parse(""), Err(QueryError::Empty));
        assert!(matches!(Query::parse("os"), Err(QueryError::Syntax { .. })));
        assert!(matches!(
            Query::parse("example.com/pkg"),
            Err(QueryError::Syntax { .. })
        ));
        assert!(matches!(
            Query::parse(r#""os"File"#),
            Err(QueryError::Syntax { .. })
        ));
        assert!(matches!(
            Query::parse(r#""os.File"#),
            Err(QueryError::Syntax { .. })
        ));
        assert_eq!(Query::parse(".File"), Err(QueryError::EmptyPackage));
        assert_eq!(Query::parse("os."), Err(QueryError::EmptyTypeName));
        assert_eq!(Query::parse(r#""".File"#), Err(QueryError::EmptyPackage));
    }

    #[test]
    fn test_round_trip() {
        for raw in [
            r#""os".File"#,
            r#""github.com/acme/widgets".Widget"#,
            r#""gopkg.in/yaml.v3".Node"#,
            "net/http.Client",
        ] {
            let q = Query::parse(raw).unwrap();
            let reparsed = Query::parse(&q.to_string()).unwrap();
            assert_eq!(q, reparsed, "round trip of {raw}");
        }
    }

    #[test]
    fn test_path_base() {
        assert_eq!(path_base("github.com/acme/widgets"), "widgets");
        assert_eq!(path_base("os"), "os");
        assert_eq!(path_base("a/b/"), "b");
    }
}
