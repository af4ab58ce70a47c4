/// Integration tests against the swc engine

use modshift::{transform, TransformRequest, TransformResult, Transformer};
use serde_json::json;

/// Helper to transform a source string and unwrap the produced code
fn transform_source(source: &str, format: &str, minify: bool) -> Result<String, Vec<String>> {
    let request = TransformRequest::new(source).format(format).minify(minify);
    match transform(&request) {
        TransformResult::Success { code, .. } => Ok(code),
        TransformResult::Failure { errors } => Err(errors),
    }
}

#[test]
fn test_commonjs_export() {
    let js = transform_source("export const x = 1;", "cjs", false).expect("transform failed");

    assert!(js.contains("exports"));
    assert!(!js.contains("export const"));
    // Not minified: still spread over several lines
    assert!(js.lines().count() > 1);
}

#[test]
fn test_commonjs_minified() {
    let plain = transform_source("export const x = 1;", "cjs", false).expect("transform failed");
    let minified = transform_source("export const x = 1;", "cjs", true).expect("minify failed");

    assert!(minified.contains("exports"));
    assert!(minified.len() < plain.len());
    assert!(!minified.contains("\n    "));
}

#[test]
fn test_amd_wraps_in_define() {
    let js = transform_source("import a from 'a';\nexport default a;", "amd", false)
        .expect("transform failed");

    assert!(js.contains("define("));
    assert!(js.contains("\"a\""));
}

#[test]
fn test_amd_reapplied_does_not_error() {
    let once = transform_source("export const x = 1;", "amd", false).expect("transform failed");
    let twice = transform_source(&once, "amd", false);

    assert!(twice.is_ok(), "{:?}", twice);
}

#[test]
fn test_systemjs_register() {
    let js = transform_source(
        "export const x = 1;\nexport function load() { return import('./lazy.js'); }",
        "sjs",
        false,
    )
    .expect("transform failed");

    assert!(js.contains("System.register"));
}

#[test]
fn test_esm_passthrough_is_byte_identical() {
    let source = "export const x   =   1 ;\n// keep me\n";
    let map = json!({ "version": 3, "sources": ["x.ts"], "names": [], "mappings": "AAAA" });
    let request = TransformRequest::new(source).format("esm").source_map(map.clone());

    let result = transform(&request);

    assert_eq!(result, TransformResult::success(source, Some(map)));
}

#[test]
fn test_esm_passthrough_without_format() {
    let result = transform(&TransformRequest::new("export default 42;"));
    assert_eq!(result, TransformResult::success("export default 42;", None));
}

#[test]
fn test_esm_minified() {
    let js = transform_source("export const answer = 40 + 2;\n", "esm", true).expect("minify failed");
    assert!(js.contains("export"));
    assert!(!js.contains("\n    "));
}

#[test]
fn test_empty_code() {
    let errors = transform_source("", "amd", false).unwrap_err();
    assert_eq!(errors, vec!["Code specification is not defined".to_string()]);
}

#[test]
fn test_invalid_format() {
    let errors = transform_source("valid code", "xml", false).unwrap_err();
    assert_eq!(errors.len(), 1);
    for name in ["amd", "esm", "cjs", "sjs"] {
        assert!(errors[0].contains(name));
    }
}

#[test]
fn test_syntax_error_is_styled() {
    let errors = transform_source("export const = ;", "cjs", false).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error transforming to cjs module: <br/><br/>"));
    assert!(errors[0].contains("<div style=\"background: #333; color: white;\">"));
    assert!(!errors[0].contains('\x1b'));
    assert!(!errors[0].contains('\n'));
}

#[test]
fn test_input_map_produces_output_map() {
    let map = json!({
        "version": 3,
        "sources": ["original.js"],
        "names": [],
        "mappings": "AAAA",
        "sourcesContent": ["export const x = 1;"]
    });
    let request = TransformRequest::new("export const x = 1;").format("cjs").source_map(map);

    let result = transform(&request);

    assert!(result.is_success(), "{:?}", result.errors());
    let out_map = result.source_map().expect("expected an output map");
    assert_eq!(out_map["version"], 3);
}

#[test]
fn test_no_input_map_means_no_output_map() {
    let result = transform(&TransformRequest::new("export const x = 1;").format("amd"));
    assert!(result.is_success());
    assert!(result.source_map().is_none());
}

#[test]
fn test_transformer_is_reusable_across_threads() {
    let transformer: Transformer = Transformer::default();

    std::thread::scope(|s| {
        let handles: Vec<_> = ["amd", "cjs", "sjs"]
            .into_iter()
            .map(|format| {
                let transformer = &transformer;
                s.spawn(move || {
                    transformer.transform(&TransformRequest::new("export default 1;").format(format))
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_success());
        }
    });
}
