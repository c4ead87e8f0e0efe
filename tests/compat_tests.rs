//! Routing behaviour shared with plain path routers: named views, prefixes,
//! static kwargs, includes, reversal and the CSRF flag.

use http::Method;
use std::collections::BTreeMap;
use verbrouter::dispatcher::{Dispatcher, Request, Response};
use verbrouter::registry::ViewRegistry;
use verbrouter::router::{RouteEntry, RoutingTable};
use verbrouter::view::{CallArgs, Kwargs, View};
use verbrouter::wrapper::WrapperChain;
use verbrouter::RouteError;

fn text(name: &str, body: &'static str) -> View {
    View::new(name, move |_req, _args| Response::text(body))
}

fn registry() -> ViewRegistry {
    ViewRegistry::new()
        .with_view(text("tests.generic_view", "OK"))
        .with_view(text("tests.view_one", "ONE"))
        .with_view(text("tests.view_three", "THREE"))
        .with_view(View::new(
            "tests.kwarg_view",
            |_req: &mut Request, args: &CallArgs| {
                Response::text(args.kwarg_str("key").unwrap_or_default())
            },
        ))
}

fn table() -> RoutingTable {
    let mut included = RoutingTable::with_registry(registry());
    included
        .register(
            vec![RouteEntry::url("^included_view$", "generic_view").prefix("tests")],
            WrapperChain::new(),
        )
        .unwrap();

    let mut table = RoutingTable::with_registry(registry());
    table
        .register(
            vec![
                RouteEntry::url("^url$", "generic_view").prefix("tests"),
                RouteEntry::url("^non_string_view$", text("tests.direct", "OK")),
                RouteEntry::url("^view_with_name$", "generic_view")
                    .prefix("tests")
                    .name("view_with_name"),
                RouteEntry::url("^kwargs$", "kwarg_view")
                    .prefix("tests")
                    .default_arg("key", "value"),
                RouteEntry::url("^url_reverse$", "view_one").prefix("tests"),
                RouteEntry::url("^non_string_view_reverse$", text("tests.view_two", "TWO")),
                RouteEntry::url("^view_with_name_reverse$", "view_three")
                    .prefix("tests")
                    .name("view_with_name_reverse"),
                RouteEntry::url("^csrf_exempt_view$", text("tests.csrf", "OK").csrf_exempt()),
            ],
            WrapperChain::new(),
        )
        .unwrap();
    table.include("^include/", included, Kwargs::new()).unwrap();
    table
        .register(
            vec![RouteEntry::url("^prefix", "generic_view").prefix("tests")],
            WrapperChain::new(),
        )
        .unwrap();
    table
}

fn content(table: &RoutingTable, path: &str) -> String {
    let call = table.resolve(path).unwrap().unwrap();
    let mut req = Request::new(Method::GET, path);
    call.call(&mut req).text_body().unwrap_or_default().to_string()
}

#[test]
fn test_named_and_direct_views() {
    let table = table();
    assert_eq!(content(&table, "/url"), "OK");
    assert_eq!(content(&table, "/non_string_view"), "OK");
    assert_eq!(content(&table, "/view_with_name"), "OK");
    assert_eq!(content(&table, "/prefix"), "OK");
}

#[test]
fn test_static_kwargs() {
    assert_eq!(content(&table(), "/kwargs"), "value");
}

#[test]
fn test_included_view() {
    assert_eq!(content(&table(), "/include/included_view"), "OK");
}

#[test]
fn test_reverse() {
    let table = table();
    let none = BTreeMap::new();
    assert_eq!(table.reverse("tests.view_one", &[], &none).unwrap(), "/url_reverse");
    assert_eq!(
        table.reverse("tests.view_two", &[], &none).unwrap(),
        "/non_string_view_reverse"
    );
    assert_eq!(
        table.reverse("view_with_name_reverse", &[], &none).unwrap(),
        "/view_with_name_reverse"
    );
    assert_eq!(
        table.reverse("tests.generic_view", &[], &none).unwrap(),
        "/url"
    );
    assert!(matches!(
        table.reverse("tests.unknown", &[], &none),
        Err(RouteError::NoReverseMatch { .. })
    ));
}

#[test]
fn test_csrf_exempt_flag() {
    let table = table();
    let call = table.resolve("/csrf_exempt_view").unwrap().unwrap();
    assert!(call.view.csrf_exempt());
    assert!(!table.resolve("/url").unwrap().unwrap().view.csrf_exempt());
}

#[test]
fn test_empty_view_name_rejected() {
    let mut table = RoutingTable::with_registry(registry());
    let err = table
        .register(vec![RouteEntry::url("^x$", "").prefix("tests")], WrapperChain::new())
        .unwrap_err();
    assert_eq!(
        err,
        RouteError::EmptyViewReference {
            pattern: "^x$".to_string()
        }
    );
    assert!(err.to_string().contains("Empty view name"));
}

#[test]
fn test_not_found_and_server_error_handlers() {
    let mut table = table();
    table
        .register(
            vec![RouteEntry::url(
                "^explode$",
                View::new("tests.explode", |_req, _args| -> Response {
                    panic!("view failed")
                }),
            )],
            WrapperChain::new(),
        )
        .unwrap();
    let dispatcher = Dispatcher::from_table(table);

    let mut req = Request::new(Method::GET, "/missing");
    assert_eq!(dispatcher.handle(&mut req).unwrap().status, 404);
    let mut req = Request::new(Method::GET, "/explode");
    assert_eq!(dispatcher.handle(&mut req).unwrap().status, 500);
}
