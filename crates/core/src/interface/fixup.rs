//! Textual rewriting of type names for emission
//!
//! Normalized composite names carry full import paths
//! (`[]*github.com/go-redis/redis.GeoLocation`); generated code needs the
//! package-qualified form (`[]*redis.GeoLocation`). The rewrite is purely textual
//! and idempotent.

use crate::models::Type;

use super::query::{Query, path_base};

const VENDOR_SEGMENT: &str = "/vendor/";

/// Rewrite `typ`'s name and import path relative to the queried package and
/// the package the output is generated into.
pub fn fixup(typ: &mut Type, query: &Query, package_name: Option<&str>) {
    if !typ.import_path.is_empty() && typ.is_composite {
        if typ.import_path == query.package {
            // Qualify by the declared package name, which may differ from the
            // path base (e.g. `minio-go/v6` declares `minio`).
            typ.name = typ.name.replace(&typ.import_path, &typ.package);
        } else if !typ.package.is_empty() {
            // Drop everything up to the package name: `github.com/x/hoge.T` -> `hoge.T`.
            if let Some(idx) = typ.import_path.rfind(&typ.package) {
                if idx > 0 {
                    let prefix = &typ.import_path[..idx];
                    typ.name = typ.name.replace(prefix, "");
                }
            }
        }
    }

    if !query.package.is_empty() {
        typ.name = typ.name.replace(&query.package, path_base(&query.package));
    }
    typ.import_path = trim_vendor_path(&typ.import_path);

    if let Some(name) = package_name {
        if !name.is_empty() && typ.package == name {
            typ.package.clear();
            typ.import_path.clear();
        }
    }
}

/// Remove a vendor directory prefix from an import path:
/// `github.com/foo/bar/vendor/github.com/pkg/errors` -> `github.com/pkg/errors`.
pub fn trim_vendor_path(path: &str) -> String {
    let mut parts = path.split(VENDOR_SEGMENT);
    let head = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts
        .flat_map(|p| p.split('/'))
        .filter(|segment| !segment.is_empty())
        .collect();
    if rest.is_empty() && !path.contains(VENDOR_SEGMENT) {
        return head.to_string();
    }
    rest.join("/")
}
