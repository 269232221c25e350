//! Go source rendering for generated interfaces and structs

use std::collections::BTreeSet;
use std::fmt::Write;

use shapegen_core::inference::SampleValueKind;
use shapegen_core::models::{Interface, Struct};

/// Package used when `--as` names only the type
pub const DEFAULT_PACKAGE: &str = "main";

/// A generated type's package and name, parsed from `--as pkg.Name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoIdent {
    pub package: String,
    pub name: String,
}

impl GoIdent {
    /// Split at the first `.`; without one the whole value is the type name.
    pub fn parse(value: &str) -> Self {
        match value.split_once('.') {
            Some((package, name)) => Self {
                package: package.to_string(),
                name: name.to_string(),
            },
            None => Self {
                package: DEFAULT_PACKAGE.to_string(),
                name: value.to_string(),
            },
        }
    }

    /// Receiver variable name for methods on this type
    pub fn receiver(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_lowercase().collect())
            .unwrap_or_else(|| "v".to_string())
    }
}

fn write_header(out: &mut String, tool: &str, package: &str, imports: &BTreeSet<String>) {
    let _ = writeln!(out, "// Created by {tool}; DO NOT EDIT\n");
    let _ = writeln!(out, "package {package}\n");
    if !imports.is_empty() {
        out.push_str("import (\n");
        for import in imports {
            let _ = writeln!(out, "\t\"{import}\"");
        }
        out.push_str(")\n\n");
    }
}

/// Render a Go file declaring `iface` as `ident`
pub fn render_interface(ident: &GoIdent, query: &str, iface: &Interface) -> String {
    let imports: BTreeSet<String> = iface.deps().into_iter().collect();
    let mut out = String::new();
    write_header(&mut out, "interfacer", &ident.package, &imports);
    let _ = writeln!(
        out,
        "// {} is an interface generated for {query}.",
        ident.name
    );
    let _ = writeln!(out, "type {} interface {{", ident.name);
    for func in iface {
        let _ = writeln!(out, "\t{func}");
    }
    out.push_str("}\n");
    out
}

/// Render a Go file declaring `fields` as struct `ident`, optionally followed
/// by CSV marshal methods. `extra_deps` are imports the methods may need; each
/// is kept only when the generated code refers to it.
pub fn render_struct(
    ident: &GoIdent,
    file_name: &str,
    fields: &Struct,
    methods: Option<(&str, &[&str])>,
) -> String {
    let body = methods
        .map(|(time_format, _)| render_csv_methods(ident, fields, time_format))
        .unwrap_or_default();

    let mut imports: BTreeSet<String> = fields.deps().into_iter().collect();
    if let Some((_, extra_deps)) = methods {
        for dep in extra_deps.iter().filter(|dep| body.contains(&format!("{dep}."))) {
            imports.insert(dep.to_string());
        }
    }

    let mut out = String::new();
    write_header(&mut out, "structer", &ident.package, &imports);
    let source = if file_name.is_empty() {
        "standard input".to_string()
    } else {
        format!("\"{file_name}\" file")
    };
    let _ = writeln!(out, "// {} is a struct generated from {source}.", ident.name);
    let _ = writeln!(out, "type {} struct {{", ident.name);
    let _ = write!(out, "{fields}");
    out.push_str("}\n");
    out.push_str(&body);
    out
}

/// Render `MarshalCSV` and `UnmarshalCSV` for `ident`. Record positions follow
/// field order.
pub fn render_csv_methods(ident: &GoIdent, fields: &Struct, time_format: &str) -> String {
    let r = ident.receiver();
    let name = &ident.name;
    let layout = go_quote(time_format);
    let mut out = String::new();

    let _ = writeln!(out, "\n// MarshalCSV encodes {r} as a single CSV record.");
    let _ = writeln!(out, "func ({r} *{name}) MarshalCSV() ([]string, error) {{");
    out.push_str("\trecords := []string{\n");
    for field in fields.iter() {
        let value = format!("{r}.{}", field.name);
        let encoded = match SampleValueKind::from_type(&field.ty) {
            Some(SampleValueKind::String) => value,
            Some(SampleValueKind::Bool) => format!("strconv.FormatBool({value})"),
            Some(SampleValueKind::Int64) => format!("strconv.FormatInt({value}, 10)"),
            Some(SampleValueKind::Float64) => {
                format!("strconv.FormatFloat({value}, 'f', -1, 64)")
            }
            Some(SampleValueKind::Timestamp) => format!("{value}.Format({layout})"),
            None => format!("fmt.Sprintf(\"%v\", {value})"),
        };
        let _ = writeln!(out, "\t\t{encoded},");
    }
    out.push_str("\t}\n\treturn records, nil\n}\n");

    let count = fields.len();
    let _ = writeln!(out, "\n// UnmarshalCSV decodes a single CSV record into {r}.");
    let _ = writeln!(out, "func ({r} *{name}) UnmarshalCSV(record []string) error {{");
    let _ = writeln!(out, "\tif len(record) != {count} {{");
    let _ = writeln!(
        out,
        "\t\treturn fmt.Errorf(\"invalid number of fields: want {count}, got %d\", len(record))"
    );
    out.push_str("\t}\n");
    for (i, field) in fields.iter().enumerate() {
        let target = format!("{r}.{}", field.name);
        let parse = match SampleValueKind::from_type(&field.ty) {
            Some(SampleValueKind::Bool) => format!("strconv.ParseBool(record[{i}])"),
            Some(SampleValueKind::Int64) => format!("strconv.ParseInt(record[{i}], 10, 64)"),
            Some(SampleValueKind::Float64) => format!("strconv.ParseFloat(record[{i}], 64)"),
            Some(SampleValueKind::Timestamp) => format!("time.Parse({layout}, record[{i}])"),
            Some(SampleValueKind::String) | None => {
                let _ = writeln!(out, "\t{target} = record[{i}]");
                continue;
            }
        };
        let _ = writeln!(out, "\tif record[{i}] != \"\" {{");
        let _ = writeln!(out, "\t\tval, err := {parse}");
        out.push_str("\t\tif err != nil {\n\t\t\treturn err\n\t\t}\n");
        let _ = writeln!(out, "\t\t{target} = val");
        out.push_str("\t}\n");
    }
    out.push_str("\treturn nil\n}\n");
    out
}

/// Quote a string as a Go interpreted string literal
fn go_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
