use http::Method;
use std::io::Write;
use verbrouter::config::RouterConfig;
use verbrouter::dispatcher::{Request, Response};
use verbrouter::logging::LogFormat;
use verbrouter::router::{RouteEntry, RoutingTable};
use verbrouter::view::View;
use verbrouter::wrapper::WrapperChain;

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "method_override_field: _verb\nlog:\n  log_level: warn\n  format: pretty"
    )
    .unwrap();

    let config = RouterConfig::from_file(file.path()).unwrap();
    assert_eq!(config.log.log_level, "warn");
    assert_eq!(config.log.format, LogFormat::Pretty);
}

#[test]
fn test_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = RouterConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read config file"));
}

#[test]
fn test_custom_override_field_applies_to_dispatch() {
    let config = RouterConfig::from_yaml_str("method_override_field: _verb\n").unwrap();
    let mut table = RoutingTable::new().with_config(&config);
    table
        .register(
            vec![
                RouteEntry::verb(
                    Method::POST,
                    "^item$",
                    View::new("create", |_req, _args| Response::text("create")),
                ),
                RouteEntry::verb(
                    Method::DELETE,
                    "^item$",
                    View::new("delete", |_req, _args| Response::text("delete")),
                ),
            ],
            WrapperChain::new(),
        )
        .unwrap();
    assert_eq!(table.method_resolver().override_field(), "_verb");

    let call = table.resolve("/item").unwrap().unwrap();
    let mut req = Request::new(Method::POST, "/item").with_form_body("_verb=delete");
    assert_eq!(call.call(&mut req).text_body(), Some("delete"));
    let mut req = Request::new(Method::POST, "/item").with_form_body("_method=delete");
    assert_eq!(call.call(&mut req).text_body(), Some("create"));
}
