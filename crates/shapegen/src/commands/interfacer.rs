//! The `interfacer` command: emit an interface for a named type

use std::path::PathBuf;

use shapegen_core::interface::{InterfaceError, InterfaceOptions, Query, build_interface};
use shapegen_core::typeinfo::TypeCatalog;
use tracing::info;

use super::write_output;
use crate::error::CliError;
use crate::output::{GoIdent, render_interface};

/// Arguments for the `interfacer` command
pub struct InterfacerArgs {
    /// Type to generate an interface for, e.g. `"net/http".Client`
    pub query: String,
    /// Generated interface as `pkg.Name`
    pub as_name: String,
    /// Output file, `-` for stdout
    pub output: String,
    /// Include unexported methods
    pub all: bool,
    /// Catalog describing the loaded packages
    pub catalog: PathBuf,
}

/// Build the interface and render it as Go source
pub fn generate_interface(args: &InterfacerArgs) -> Result<String, CliError> {
    if args.query.is_empty() {
        return Err(CliError::InvalidArgument(
            "empty --for value; see --help for details".to_string(),
        ));
    }
    let query = Query::parse(&args.query).map_err(InterfaceError::from)?;
    let ident = GoIdent::parse(&args.as_name);

    let universe = TypeCatalog::from_path(&args.catalog)?.to_universe()?;
    let options = InterfaceOptions::builder(query)
        .unexported(args.all)
        .package_name(ident.package.clone())
        .build();
    let iface = build_interface(&universe, &options)?;

    info!(
        query = %args.query,
        methods = iface.len(),
        deps = iface.deps().len(),
        "Generated interface"
    );
    Ok(render_interface(&ident, &args.query, &iface))
}

/// Handle the `interfacer` command
pub fn handle_interfacer(args: &InterfacerArgs) -> Result<(), CliError> {
    if args.output.is_empty() {
        return Err(CliError::InvalidArgument(
            "empty -o value; see --help for details".to_string(),
        ));
    }
    let source = generate_interface(args)?;
    write_output(&args.output, &source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CATALOG: &str = r#"{
  "packages": [
    {
      "path": "example.com/store",
      "types": [
        {
          "name": "Item",
          "underlying": {"kind": "struct"}
        },
        {
          "name": "Store",
          "underlying": {"kind": "struct"},
          "methods": [
            {
              "name": "Get",
              "params": [{"name": "key", "type": {"kind": "basic", "name": "string"}}],
              "results": [
                {"type": {"kind": "pointer", "elem": {"kind": "named", "package": "example.com/store", "name": "Item"}}},
                {"type": {"kind": "basic", "name": "error"}}
              ]
            },
            {
              "name": "List",
              "results": [
                {"type": {"kind": "slice", "elem": {"kind": "named", "package": "example.com/store", "name": "Item"}}}
              ]
            },
            {"name": "reset"}
          ]
        }
      ]
    }
  ]
}"#;

    fn catalog_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();
        file
    }

    fn args(catalog: &tempfile::NamedTempFile, as_name: &str) -> InterfacerArgs {
        InterfacerArgs {
            query: "example.com/store.Store".into(),
            as_name: as_name.into(),
            output: "-".into(),
            all: false,
            catalog: catalog.path().to_path_buf(),
        }
    }

    #[test]
    fn test_generate_interface() {
        let catalog = catalog_file();
        let source = generate_interface(&args(&catalog, "mocks.Store")).unwrap();
        assert!(source.starts_with("// Created by interfacer; DO NOT EDIT\n\npackage mocks\n"));
        assert!(source.contains("\t\"example.com/store\"\n"));
        assert!(source.contains("\tGet(string) (*store.Item, error)\n"));
        assert!(source.contains("\tList() []store.Item\n"));
        assert!(!source.contains("reset"));
    }

    #[test]
    fn test_generate_into_source_package() {
        let catalog = catalog_file();
        let mut a = args(&catalog, "store.Storer");
        a.all = true;
        let source = generate_interface(&a).unwrap();
        assert!(!source.contains("import"));
        assert!(source.contains("\tGet(string) (*Item, error)\n"));
        assert!(source.contains("\treset()\n"));
    }

    #[test]
    fn test_write_to_file() {
        let catalog = catalog_file();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("store.go");
        let mut a = args(&catalog, "mocks.Store");
        a.output = out.display().to_string();
        handle_interfacer(&a).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains("type Store interface {"));
    }

    #[test]
    fn test_errors() {
        let catalog = catalog_file();
        let mut a = args(&catalog, "mocks.Store");
        a.query = String::new();
        assert!(matches!(
            generate_interface(&a),
            Err(CliError::InvalidArgument(_))
        ));

        a.query = "example.com/store.Missing".into();
        assert!(matches!(
            generate_interface(&a),
            Err(CliError::Interface(_))
        ));

        a.query = "example.com/store.Store".into();
        a.catalog = PathBuf::from("/nonexistent/catalog.json");
        assert!(matches!(generate_interface(&a), Err(CliError::Catalog(_))));
    }
}
