//! Snapshot tests for complete generated mock files.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use mockgen_codegen::{
    Canonical, FormatError, GenerateOptions, Generator, Gofmt, Source, SourceFormatter,
};
use mockgen_model::parse_str;

const STORE_MODEL: &str = r#"
[package]
name = "store"
path = "github.com/acme/store"

[imports]
context = "context"

[[interfaces]]
name = "Store"

[[interfaces.methods]]
name = "Get"
params = [{ name = "ctx", type = "context.Context" }, { name = "key", type = "string" }]
results = ["*Item", "error"]

[[interfaces.methods]]
name = "Put"
params = ["context.Context", "*Item"]
results = ["error"]

[[interfaces.methods]]
name = "Logf"
params = [{ name = "format", type = "string" }]
variadic = { name = "args", type = "interface{}" }

[[interfaces.methods]]
name = "Close"
"#;

const READER_MODEL: &str = r#"
[package]
name = "io"
path = "io"

[[interfaces]]
name = "Reader"

[[interfaces.methods]]
name = "Read"
params = [{ name = "p", type = "[]byte" }]
results = ["int", "error"]
"#;

fn store_output(formatter: &dyn SourceFormatter) -> Result<String, FormatError> {
    let model = parse_str(STORE_MODEL).unwrap();
    let options = GenerateOptions::for_package(&model.package);
    let generator = Generator::new(&model.package, Source::File("store.toml".into()), options);
    generator
        .generate(formatter)
        .map(|bytes| String::from_utf8(bytes).unwrap())
}

#[test]
fn test_store_mock() {
    let output = store_output(&Canonical).unwrap();
    insta::assert_snapshot!("store_mock", output);
}

#[test]
fn test_reader_mock_with_custom_runtime() {
    let model = parse_str(READER_MODEL).unwrap();
    let options =
        GenerateOptions::for_package(&model.package).with_runtime_import("example.com/mocking");
    let source = Source::Package {
        path: "io".into(),
        interfaces: model
            .package
            .interface_names()
            .into_iter()
            .map(String::from)
            .collect(),
    };
    let generator = Generator::new(&model.package, source, options);
    let output = String::from_utf8(generator.generate(&Canonical).unwrap()).unwrap();
    insta::assert_snapshot!("reader_mock", output);
}

#[test]
fn test_canonical_output_is_stable() {
    let once = store_output(&Canonical).unwrap();
    let twice = Canonical.format(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_canonical_matches_gofmt() {
    let canonical = store_output(&Canonical).unwrap();
    match store_output(&Gofmt::new()) {
        Ok(gofmt) => assert_eq!(canonical, gofmt),
        // gofmt is not installed
        Err(FormatError::Spawn { .. }) => {}
        Err(other) => panic!("gofmt failed: {other}"),
    }
}
