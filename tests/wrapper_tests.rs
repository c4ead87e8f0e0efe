use http::Method;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use verbrouter::dispatcher::{Dispatcher, Request, Response};
use verbrouter::router::{RouteEntry, RoutingTable};
use verbrouter::view::{CallArgs, View};
use verbrouter::wrapper::{wrap_fn, AuthWrapper, MetricsWrapper, TracingWrapper, Wrapper, WrapperChain};

mod tracing_util;
use tracing_util::TestTracing;

fn wrapper_view() -> View {
    View::new("tests.wrapper_view", |req: &mut Request, _args: &CallArgs| {
        let tag = req
            .attribute("wrapper_test")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Response::text(format!("wrapper {tag}"))
    })
}

fn wrapper1() -> Arc<dyn Wrapper> {
    wrap_fn(|inner, req, args| {
        req.set_attribute("wrapper_test", Value::String("1".to_string()));
        inner(req, args)
    })
}

fn wrapper2() -> Arc<dyn Wrapper> {
    wrap_fn(|inner, req, args| {
        let tag = req
            .attribute("wrapper_test")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        req.set_attribute("wrapper_test", Value::String(format!("{tag} 2")));
        inner(req, args)
    })
}

fn content(table: &RoutingTable, path: &str) -> String {
    let call = table.resolve(path).unwrap().unwrap();
    let mut req = Request::new(Method::GET, path);
    call.call(&mut req).text_body().unwrap_or_default().to_string()
}

#[test]
fn test_single_wrapper() {
    let mut table = RoutingTable::new();
    table
        .register(
            vec![RouteEntry::url("^test$", wrapper_view())],
            WrapperChain::new().with(wrapper1()),
        )
        .unwrap();
    assert_eq!(content(&table, "/test"), "wrapper 1");
}

#[test]
fn test_wrapper_order() {
    let mut table = RoutingTable::new();
    table
        .register(
            vec![RouteEntry::url("^test$", wrapper_view())],
            WrapperChain::new().with(wrapper1()).with(wrapper2()),
        )
        .unwrap();
    assert_eq!(content(&table, "/test"), "wrapper 1 2");
}

#[test]
fn test_wrappers_wrap_grouped_views() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let recorder = |name: &'static str| {
        let log = Arc::clone(&log);
        wrap_fn(move |inner, req, args| {
            log.lock().unwrap().push(format!("{name}-enter"));
            let res = inner(req, args);
            log.lock().unwrap().push(format!("{name}-exit"));
            res
        })
    };
    let view_log = Arc::clone(&log);
    let view = View::new("h", move |_req, _args| {
        view_log.lock().unwrap().push("H".to_string());
        Response::text("H")
    });

    let mut table = RoutingTable::new();
    table
        .register(
            vec![RouteEntry::verb(Method::GET, "^test$", view)],
            WrapperChain::new().with(recorder("A")).with(recorder("B")),
        )
        .unwrap();

    let call = table.resolve("/test").unwrap().unwrap();
    let mut req = Request::new(Method::GET, "/test");
    assert_eq!(call.call(&mut req).text_body(), Some("H"));
    assert_eq!(
        *log.lock().unwrap(),
        vec!["A-enter", "B-enter", "H", "B-exit", "A-exit"]
    );

    // A 405 is answered before any wrapper runs
    log.lock().unwrap().clear();
    let mut req = Request::new(Method::PUT, "/test");
    assert_eq!(call.call(&mut req).status, 405);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_auth_wrapper_through_dispatcher() {
    let mut table = RoutingTable::new();
    table
        .register(
            vec![RouteEntry::url(
                "^secret$",
                View::new("secret", |req: &mut Request, _args: &CallArgs| {
                    let authenticated = req.attribute("authenticated") == Some(&Value::Bool(true));
                    Response::text(if authenticated { "in" } else { "out" })
                }),
            )],
            WrapperChain::new().with(Arc::new(AuthWrapper::new("Bearer s3cret".to_string()))),
        )
        .unwrap();
    let dispatcher = Dispatcher::from_table(table);

    let mut req = Request::new(Method::GET, "/secret");
    assert_eq!(dispatcher.handle(&mut req).unwrap().status, 401);

    let mut req = Request::new(Method::GET, "/secret").with_header("Authorization", "Bearer s3cret");
    assert_eq!(dispatcher.handle(&mut req).unwrap().text_body(), Some("in"));
}

#[test]
fn test_metrics_and_tracing_wrappers() {
    let tracing = TestTracing::init();
    let metrics = Arc::new(MetricsWrapper::new());
    let mut table = RoutingTable::new();
    table
        .register(
            vec![
                RouteEntry::verb(
                    Method::GET,
                    "^pets/(?P<id>\\d+)$",
                    View::new("get_pet", |_req, _args| Response::text("pet")),
                ),
                RouteEntry::url(
                    "^broken$",
                    View::new("broken", |_req, _args| Response::error(500, "broken")),
                ),
            ],
            WrapperChain::new()
                .with(Arc::clone(&metrics) as Arc<dyn Wrapper>)
                .with(Arc::new(TracingWrapper)),
        )
        .unwrap();
    let dispatcher = Dispatcher::from_table(table);

    let mut req = Request::new(Method::GET, "/pets/12345");
    assert_eq!(dispatcher.handle(&mut req).unwrap().status, 200);
    let mut req = Request::new(Method::GET, "/broken");
    assert_eq!(dispatcher.handle(&mut req).unwrap().status, 500);
    let mut req = Request::new(Method::DELETE, "/pets/1");
    assert_eq!(dispatcher.handle(&mut req).unwrap().status, 405);

    assert_eq!(metrics.request_count(), 2);
    assert_eq!(metrics.client_error_count(), 0);
    assert_eq!(metrics.server_error_count(), 1);
    assert!(tracing.contains("Dispatch complete"));
    assert!(tracing.contains("\"name\":\"dispatch\""));
}
