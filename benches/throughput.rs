use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;
use std::hint::black_box;
use std::sync::Arc;
use verbrouter::dispatcher::{Dispatcher, Request, Response};
use verbrouter::router::{RouteEntry, RoutingTable};
use verbrouter::view::View;
use verbrouter::wrapper::{MetricsWrapper, WrapperChain};

fn ok(name: &str) -> View {
    View::new(name, |_req, _args| Response::text("OK"))
}

fn zoo_table() -> RoutingTable {
    let animal = r"^zoo/animals/(?P<id>\d+)$";
    let mut table = RoutingTable::new();
    table
        .register(
            vec![
                RouteEntry::url("^$", ok("root_handler")),
                RouteEntry::verb(Method::GET, "^zoo/animals$", ok("get_animals")),
                RouteEntry::verb(Method::POST, "^zoo/animals$", ok("create_animal")),
                RouteEntry::verb(Method::GET, animal, ok("get_animal")),
                RouteEntry::verb(Method::PUT, animal, ok("update_animal")),
                RouteEntry::verb(Method::PATCH, animal, ok("patch_animal")),
                RouteEntry::verb(Method::DELETE, animal, ok("delete_animal")),
                RouteEntry::verb(
                    Method::GET,
                    r"^zoo/animals/(?P<id>\d+)/toys/(?P<toy_id>\d+)$",
                    ok("animal_toy"),
                ),
                RouteEntry::verb(
                    Method::GET,
                    r"^zoo/(?P<category>\w+)/animals/(?P<id>\d+)/habitats/(?P<habitat_id>\d+)/sections/(?P<section_id>\d+)$",
                    ok("habitat_section"),
                ),
                RouteEntry::verb(
                    Method::POST,
                    r"^inventory/(\d+)/feeds/(\d+)/items/(\d+)/batches/(\d+)$",
                    ok("post_item_batch"),
                ),
                RouteEntry::verb(Method::HEAD, "^zoo/health$", ok("health_check")),
                RouteEntry::verb(Method::OPTIONS, "^zoo/health$", ok("supported_ops")),
            ],
            WrapperChain::new().with(Arc::new(MetricsWrapper::new())),
        )
        .expect("zoo routes");
    table
}

const TEST_PATHS: [(Method, &str); 5] = [
    (Method::GET, "/zoo/animals/123"),
    (Method::GET, "/zoo/animals/123/toys/456"),
    (Method::GET, "/zoo/cats/animals/123/habitats/88/sections/5"),
    (Method::POST, "/inventory/1/feeds/2/items/3/batches/4"),
    (Method::PATCH, "/zoo/animals/7"),
];

fn bench_resolve(c: &mut Criterion) {
    let table = zoo_table();
    c.bench_function("resolve", |b| {
        b.iter(|| {
            for (_, path) in TEST_PATHS.iter() {
                let res = table.resolve(path);
                black_box(&res);
            }
        })
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let dispatcher = Dispatcher::from_table(zoo_table());
    c.bench_function("dispatch", |b| {
        b.iter(|| {
            for (method, path) in TEST_PATHS.iter() {
                let mut req = Request::new(method.clone(), path);
                let res = dispatcher.handle(&mut req);
                black_box(&res);
            }
        })
    });
}

criterion_group!(benches, bench_resolve, bench_dispatch);
criterion_main!(benches);
