//! The `structer` command: emit a struct inferred from a sample file

use std::path::Path;

use shapegen_core::inference::{FormatRegistry, InferenceConfig, StructInferrer, camelcase};
use tracing::info;

use super::{STDIO, read_input, write_output};
use crate::error::CliError;
use crate::output::{GoIdent, render_struct};

/// Arguments for the `structer` command
pub struct StructerArgs {
    /// Struct tag to add to every field
    pub tag: Option<String>,
    /// Sample format; inferred from the input extension when absent
    pub format: Option<String>,
    /// Generated struct as `pkg.Name`
    pub as_name: String,
    /// Input file, `-` for stdin
    pub input: String,
    /// Output file, `-` for stdout
    pub output: String,
    /// Layout recognized as a timestamp, in Go reference-layout form
    pub time_format: String,
    /// Merge the kinds of every record instead of using only the first
    pub all_records: bool,
}

/// Infer the struct and render it as Go source
pub fn generate_struct(args: &StructerArgs, registry: &FormatRegistry) -> Result<String, CliError> {
    let path = (args.input != STDIO).then(|| Path::new(&args.input));
    let format_name = FormatRegistry::resolve_name(args.format.as_deref(), path);
    let format = registry.get(&format_name)?;

    let input = read_input(&args.input)?;
    let sample = format.parse(&mut input.as_slice())?;

    let config = InferenceConfig::builder()
        .time_format(args.time_format.clone())
        .build();
    let inferrer = StructInferrer::with_config(config);
    let mut fields = if args.all_records {
        inferrer.infer_sample_all(&sample)?
    } else {
        inferrer.infer_sample(&sample)?
    };

    if let Some(tag) = args.tag.as_deref().filter(|t| !t.is_empty()) {
        fields.tag_all(tag, |field| camelcase(&field.name));
    }

    info!(
        format = %format_name,
        fields = fields.len(),
        records = sample.records.len(),
        "Inferred struct"
    );

    let ident = GoIdent::parse(&args.as_name);
    let file_name = path
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(render_struct(
        &ident,
        &file_name,
        &fields,
        Some((inferrer.config().time_format.as_str(), format.deps())),
    ))
}

/// Handle the `structer` command
pub fn handle_structer(args: &StructerArgs, registry: &FormatRegistry) -> Result<(), CliError> {
    let source = generate_struct(args, registry)?;
    write_output(&args.output, &source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapegen_core::inference::{DEFAULT_TIME_FORMAT, InferenceError};
    use std::io::Write;

    fn sample_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn args(input: &tempfile::NamedTempFile) -> StructerArgs {
        StructerArgs {
            tag: None,
            format: None,
            as_name: "main.Struct".into(),
            input: input.path().display().to_string(),
            output: "-".into(),
            time_format: DEFAULT_TIME_FORMAT.into(),
            all_records: false,
        }
    }

    #[test]
    fn test_generate_struct_with_tag() {
        let input = sample_file(
            ".csv",
            "ID,Active,Amount,When,Note\n7,true,12.50,2020/01/02 03:04:05,\n",
        );
        let mut a = args(&input);
        a.tag = Some("csv".into());
        a.as_name = "billing.Payment".into();
        let source = generate_struct(&a, &FormatRegistry::with_defaults()).unwrap();

        assert!(source.starts_with("// Created by structer; DO NOT EDIT\n\npackage billing\n"));
        assert!(source.contains("import (\n\t\"fmt\"\n\t\"strconv\"\n\t\"time\"\n)\n"));
        assert!(source.contains("type Payment struct {\n"));
        assert!(source.contains("\tWhen   time.Time `csv:\"when\"`\n"));
        assert!(source.contains("\tID     int64     `csv:\"iD\"`\n"));
        assert!(source.contains("func (p *Payment) UnmarshalCSV(record []string) error {"));
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let input = sample_file(".dat", "a\tb\n1.5\tx\n");
        let mut a = args(&input);
        let registry = FormatRegistry::with_defaults();

        let err = generate_struct(&a, &registry).unwrap_err();
        assert!(matches!(
            err,
            CliError::Inference(InferenceError::UnsupportedFormat(ref name)) if name == "dat"
        ));

        a.format = Some("tsv".into());
        let source = generate_struct(&a, &registry).unwrap();
        assert!(source.contains("\tA float64\n"));
        assert!(source.contains("\tB string\n"));
    }

    #[test]
    fn test_later_records_ignored_unless_merging() {
        let input = sample_file(".csv", "count,flag\n7,1\n8.5,5\n");
        let mut a = args(&input);
        let registry = FormatRegistry::with_defaults();

        let source = generate_struct(&a, &registry).unwrap();
        assert!(source.contains("\tCount int64\n"));
        assert!(source.contains("\tFlag  bool\n"));

        a.all_records = true;
        let source = generate_struct(&a, &registry).unwrap();
        assert!(source.contains("\tCount float64\n"));
        assert!(source.contains("\tFlag  string\n"));
    }

    #[test]
    fn test_custom_time_format() {
        let input = sample_file(".csv", "day\n2024-02-29\n");
        let mut a = args(&input);
        a.time_format = "2006-01-02".into();
        let source = generate_struct(&a, &FormatRegistry::with_defaults()).unwrap();
        assert!(source.contains("\tDay time.Time\n"));
        assert!(source.contains("time.Parse(\"2006-01-02\", record[0])"));
    }

    #[test]
    fn test_write_to_file() {
        let input = sample_file(".txt", "name\nx\n");
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("row.go");
        let mut a = args(&input);
        a.output = out.display().to_string();
        handle_structer(&a, &FormatRegistry::with_defaults()).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains("generated from \""));
        assert!(written.contains("\tName string\n"));
    }
}
