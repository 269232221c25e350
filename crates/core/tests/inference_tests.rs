//! Struct inference from samples read through the format registry

use std::io::Write;

use shapegen_core::inference::{
    FormatRegistry, InferenceConfig, InferenceError, Sample, SampleValueKind, StructInferrer,
    camelcase, infer_struct,
};

fn type_names(fields: &shapegen_core::models::Struct) -> Vec<String> {
    fields.iter().map(|f| f.ty.to_string()).collect()
}

mod sniffing_tests {
    use super::*;

    #[test]
    fn test_reference_row() {
        let header = ["ID", "Active", "Amount", "When", "Note"];
        let record = ["7", "true", "12.50", "2020/01/02 03:04:05", ""];
        let fields = infer_struct(&header, &record).unwrap();
        assert_eq!(
            type_names(&fields),
            vec!["int64", "bool", "float64", "time.Time", "string"]
        );
    }

    #[test]
    fn test_values_sniffed_individually() {
        let inferrer = StructInferrer::new();
        let cases = [
            ("42", SampleValueKind::Int64),
            ("true", SampleValueKind::Bool),
            ("false", SampleValueKind::Bool),
            ("3.14", SampleValueKind::Float64),
            ("2020/01/02 03:04:05", SampleValueKind::Timestamp),
            ("", SampleValueKind::String),
            ("n/a", SampleValueKind::String),
        ];
        for (value, kind) in cases {
            assert_eq!(inferrer.sniff(value), kind, "value {value:?}");
        }
    }

    #[test]
    fn test_field_names_from_header() {
        let fields = infer_struct(&["billing-id", "amount_usd", "created:at"], &["1"]).unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["BillingID", "AmountUsd", "CreatedAt"]);
    }
}

mod sample_tests {
    use super::*;

    #[test]
    fn test_csv_file_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "order_id,paid,total,placed").unwrap();
        writeln!(file, "1001,false,19.99,2021-03-04").unwrap();
        writeln!(file, "1002,true,5,2021-03-05").unwrap();
        file.flush().unwrap();

        let registry = FormatRegistry::with_defaults();
        let name = FormatRegistry::resolve_name(None, Some(file.path()));
        assert_eq!(name, "csv");

        let mut reader = std::fs::File::open(file.path()).unwrap();
        let sample = registry.parse(&name, &mut reader).unwrap();

        let config = InferenceConfig::builder().time_format("2006-01-02").build();
        let fields = StructInferrer::with_config(config)
            .infer_sample(&sample)
            .unwrap();
        assert_eq!(
            type_names(&fields),
            vec!["int64", "bool", "float64", "time.Time"]
        );
        assert_eq!(fields.fields()[0].name, "OrderID");
        assert_eq!(fields.deps(), vec!["time"]);
    }

    #[test]
    fn test_tsv_sample() {
        let registry = FormatRegistry::with_defaults();
        let sample = registry
            .parse("tsv", &mut "name\tcount\n\"a, b\"\t3\n".as_bytes())
            .unwrap();
        assert_eq!(sample.first_record().unwrap(), ["a, b", "3"]);
        let fields = StructInferrer::new().infer_sample(&sample).unwrap();
        assert_eq!(type_names(&fields), vec!["string", "int64"]);
    }

    #[test]
    fn test_unsupported_format() {
        let registry = FormatRegistry::with_defaults();
        let err = registry
            .parse("json", &mut "{}".as_bytes())
            .unwrap_err();
        assert_eq!(err, InferenceError::UnsupportedFormat("json".into()));
    }

    #[test]
    fn test_first_record_is_representative() {
        let registry = FormatRegistry::with_defaults();
        let sample = registry
            .parse("csv", &mut "count,flag\n7,1\n8.5,5\n".as_bytes())
            .unwrap();
        let inferrer = StructInferrer::new();

        let first = inferrer.infer_sample(&sample).unwrap();
        assert_eq!(type_names(&first), vec!["int64", "bool"]);

        let merged = inferrer.infer_sample_all(&sample).unwrap();
        assert_eq!(type_names(&merged), vec!["float64", "string"]);
    }

    #[test]
    fn test_sample_without_records() {
        let sample = Sample {
            header: vec!["a".into()],
            records: Vec::new(),
        };
        assert_eq!(
            StructInferrer::new().infer_sample(&sample).unwrap_err(),
            InferenceError::MissingRecord
        );
    }

    #[test]
    fn test_short_sample_record() {
        let registry = FormatRegistry::with_defaults();
        let sample = registry
            .parse("csv", &mut "a,b,c\n2.5\n".as_bytes())
            .unwrap();
        let fields = StructInferrer::new().infer_sample(&sample).unwrap();
        assert_eq!(type_names(&fields), vec!["float64", "string", "string"]);
    }

    #[test]
    fn test_record_longer_than_header() {
        let registry = FormatRegistry::with_defaults();
        let sample = registry
            .parse("csv", &mut "a\n1,2\n".as_bytes())
            .unwrap();
        let err = StructInferrer::new().infer_sample(&sample).unwrap_err();
        assert_eq!(
            err,
            InferenceError::InvalidRecordLength {
                header: 1,
                record: 2
            }
        );
    }
}

mod rendering_tests {
    use super::*;

    #[test]
    fn test_tagged_struct_renders_aligned() {
        let mut fields = infer_struct(&["id", "display_name"], &["1", "Ada"]).unwrap();
        fields.tag_all("json", |f| camelcase(&f.name));
        assert_eq!(
            fields.to_string(),
            "\tID          int64  `json:\"iD\"`\n\tDisplayName string `json:\"displayName\"`\n"
        );
        assert_eq!(fields.fields()[1].tags.get("json"), Some("displayName"));
    }
}
