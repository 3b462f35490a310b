//! Architecture contract tests.

mod support;

use support::architecture::{forbidden_lines, path_exists};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = forbidden_lines(
        "src/domain",
        &[
            "crate::adapter",
            "crate::application",
            "crate::infrastructure",
            "crate::port",
            "crate::error",
            "tokio::",
            "reqwest::",
            "tracing::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_do_not_depend_on_implementations() {
    let hits = forbidden_lines(
        "src/port",
        &[
            "crate::adapter",
            "crate::application",
            "crate::infrastructure",
            "reqwest::",
        ],
    );

    assert!(hits.is_empty(), "found forbidden imports in ports: {hits:#?}");
}

#[test]
fn application_reaches_outside_world_only_through_ports() {
    let hits = forbidden_lines(
        "src/application",
        &["crate::adapter", "crate::infrastructure", "reqwest::"],
    );

    assert!(
        hits.is_empty(),
        "found adapter imports in application layer: {hits:#?}"
    );
}

#[test]
fn inbound_adapters_never_call_http_directly() {
    let hits = forbidden_lines("src/adapter/inbound", &["reqwest::", "adapter::outbound"]);

    assert!(
        hits.is_empty(),
        "inbound adapters must go through the engine: {hits:#?}"
    );
}

#[test]
fn each_layer_has_a_module_root() {
    for path in [
        "src/domain/mod.rs",
        "src/port/mod.rs",
        "src/application/mod.rs",
        "src/adapter/mod.rs",
        "src/infrastructure/mod.rs",
    ] {
        assert!(path_exists(path), "missing {path}");
    }
}
