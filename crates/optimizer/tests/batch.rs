use jso_core::{EncodedScript, ScriptBuilder, TokenKind::*};
use jso_optimizer::{batch, BatchOptions, ConfigError, DictionaryPlacement, SourceFile};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_log() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("LOG"))
        .try_init();
}

fn member_statement(builder: ScriptBuilder, object: &str, property: &str) -> ScriptBuilder {
    builder
        .name(object)
        .token(Dot)
        .name(property)
        .token(Assign)
        .number(1.0)
        .token(Semi)
}

/// File 1: three `backgroundColor` accesses and one `style`. File 2: two
/// more `backgroundColor` accesses.
fn corpus() -> Vec<SourceFile> {
    let mut first = ScriptBuilder::new();
    for _ in 0..3 {
        first = member_statement(first, "el", "backgroundColor");
    }
    first = member_statement(first, "el", "style");

    let mut second = ScriptBuilder::new();
    for _ in 0..2 {
        second = member_statement(second, "el", "backgroundColor");
    }

    vec![
        SourceFile {
            name: "first.js".to_string(),
            original_size: 200,
            script: first.finish(),
        },
        SourceFile {
            name: "second.js".to_string(),
            original_size: 100,
            script: second.finish(),
        },
    ]
}

fn options(dictionary_file: &str) -> BatchOptions {
    BatchOptions {
        dictionary_file: dictionary_file.to_string(),
        preserve_names: Vec::new(),
    }
}

#[test]
fn frequent_property_is_aliased_and_singleton_is_not() {
    init_log();
    let output = batch::run(&corpus(), &options("dict.js")).unwrap();

    assert_eq!(output.dictionary, "a=\"backgroundColor\"\n");
    assert_eq!(
        output.files[0].text,
        "el[a]=1\nel[a]=1\nel[a]=1\nel.style=1\n"
    );
    assert_eq!(output.files[1].text, "el[a]=1\nel[a]=1\n");
}

#[test]
fn standalone_dictionary_placement() {
    init_log();
    let output = batch::run(&corpus(), &options("dict.js")).unwrap();

    assert_eq!(
        output.report.placement,
        DictionaryPlacement::Standalone("dict.js".to_string())
    );
    assert!(!output.files[0].text.starts_with(&output.dictionary));
}

#[test]
fn prepended_dictionary_placement() {
    init_log();
    let output = batch::run(&corpus(), &options("first.js")).unwrap();

    assert_eq!(
        output.report.placement,
        DictionaryPlacement::Prepended("first.js".to_string())
    );
    assert_eq!(
        output.files[0].text,
        "a=\"backgroundColor\"\nel[a]=1\nel[a]=1\nel[a]=1\nel.style=1\n"
    );
    // the second file is untouched
    assert_eq!(output.files[1].text, "el[a]=1\nel[a]=1\n");
}

#[test]
fn report_carries_sizes_and_totals() {
    init_log();
    let output = batch::run(&corpus(), &options("dict.js")).unwrap();
    let report = &output.report;

    assert_eq!(report.files.len(), 2);
    assert_eq!(report.files[0].original_size, 200);
    assert_eq!(report.files[0].minified_size, output.files[0].text.len());
    assert_eq!(report.original_total, 300);
    assert_eq!(report.dictionary_size, output.dictionary.len());
    assert_eq!(
        report.minified_total,
        output.files[0].text.len() + output.files[1].text.len() + output.dictionary.len()
    );
    assert!(report.files[0].reduction_percent() > 0.0);
}

#[test]
fn report_serializes_camel_case() {
    init_log();
    let output = batch::run(&corpus(), &options("dict.js")).unwrap();

    let json = serde_json::to_value(&output.report).unwrap();
    assert!(json["files"][0]["minifiedSize"].is_u64());
    assert!(json["originalTotal"].is_u64());
    assert_eq!(json["placement"]["standalone"], "dict.js");
}

#[test]
fn identical_runs_are_deterministic() {
    init_log();
    let first = batch::run(&corpus(), &options("dict.js")).unwrap();
    let second = batch::run(&corpus(), &options("dict.js")).unwrap();

    assert_eq!(first.dictionary, second.dictionary);
    for (a, b) in first.files.iter().zip(second.files.iter()) {
        assert_eq!(a.text, b.text);
    }
}

#[test]
fn preserve_names_are_honored() {
    init_log();
    let mut opts = options("dict.js");
    opts.preserve_names = vec!["a".to_string()];

    let output = batch::run(&corpus(), &opts).unwrap();
    assert_eq!(output.dictionary, "b=\"backgroundColor\"\n");
}

#[test]
fn empty_batch_is_a_configuration_error() {
    init_log();
    let err = batch::run(&[], &options("dict.js")).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::NoSourceFiles)
    );
}

#[test]
fn missing_dictionary_file_is_a_configuration_error() {
    init_log();
    let err = batch::run(&corpus(), &options("")).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::MissingDictionaryFile)
    );
}

#[test]
fn corrupted_stream_aborts_the_whole_run() {
    init_log();
    let mut files = corpus();
    files.push(SourceFile {
        name: "broken.js".to_string(),
        original_size: 10,
        script: EncodedScript::from_units(vec![0x3fff]),
    });

    assert!(batch::run(&files, &options("dict.js")).is_err());
}
