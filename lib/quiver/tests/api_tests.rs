//! Generated API behavior against a recording transport.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use assert2::{check, let_assert};
use bytes::Bytes;
use quiver::{
    Api, ApiNode, Channel, Endpoint, Error, Method, Params, RequestConfig, Response, Result,
    Schema, Transport, params,
};
use serde_json::{Value, json};

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<RequestConfig>>,
}

impl Recorder {
    fn configs(&self) -> Vec<RequestConfig> {
        self.seen.lock().expect("lock").clone()
    }
}

impl Transport for Recorder {
    async fn dispatch(&self, config: RequestConfig) -> Result<Response> {
        let body = Bytes::from(config.url.clone());
        self.seen.lock().expect("lock").push(config);
        Ok(Response::new(200, HashMap::new(), body))
    }
}

fn data(value: Value) -> Option<Params> {
    Some(params(&value).expect("object payload"))
}

fn shop() -> Schema {
    Schema::from_json(
        r#"{
            "catalog": {
                "products": {
                    "list": {"apiSchema": {"url": "https://shop.example.com/products", "data": {"defaults": {"page": 1}}}},
                    "create": {
                        "apiSchema": {
                            "method": "POST",
                            "url": "https://shop.example.com/products",
                            "headers": {"Content-Type": "application/json"},
                            "data": {"required": ["sku", "price"]}
                        }
                    }
                },
                "search": {"apiSchema": {"url": "https://shop.example.com/search", "headers": {"Accept": "application/json"}}}
            },
            "health": {"apiSchema": {"url": "https://shop.example.com/health"}}
        }"#,
    )
    .expect("valid schema")
}

#[test]
fn two_level_schema_yields_matching_structure() {
    let api = Api::new(Recorder::default(), &shop());

    check!(api.root().keys().collect::<Vec<_>>() == ["catalog", "health"]);

    let_assert!(Some(catalog) = api.namespace("catalog"));
    check!(catalog.keys().collect::<Vec<_>>() == ["products", "search"]);
    let_assert!(Some(ApiNode::Namespace(products)) = catalog.get("products"));
    check!(products.len() == 2);
    check!(products.iter().all(|(_, node)| node.as_method().is_some()));

    check!(api.root().method("health").is_some());
    check!(api.root().namespace("health").is_none());
}

#[test]
fn every_leaf_becomes_exactly_one_method() {
    fn count(namespace: &quiver::Namespace<Recorder>) -> usize {
        namespace
            .iter()
            .map(|(_, node)| match node {
                ApiNode::Method(_) => 1,
                ApiNode::Namespace(inner) => count(inner),
            })
            .sum()
    }

    let api = Api::new(Recorder::default(), &shop());

    check!(count(api.root()) == 4);
}

#[test]
fn method_exposes_its_definition() {
    let api = Api::new(Recorder::default(), &shop());

    let_assert!(Some(create) = api.method("catalog.products.create"));

    check!(create.path() == "catalog.products.create");
    check!(create.endpoint().method == Some(Method::Post));
    check!(create.endpoint().url == "https://shop.example.com/products");
    check!(create.endpoint().required_params() == ["sku", "price"]);
}

#[test]
fn same_schema_builds_same_shape() {
    let schema = shop();
    let first = Api::new(Recorder::default(), &schema);
    let second = Api::new(Recorder::default(), &schema);

    check!(format!("{:?}", first.root()) == format!("{:?}", second.root()));
}

#[tokio::test]
async fn call_dispatches_routed_config() {
    let api = Api::new(Recorder::default(), &shop());

    let response = api
        .call("catalog.products.list", data(json!({"category": "books"})))
        .await
        .expect("listed");

    check!(response.body().as_ref() == b"https://shop.example.com/products");
    let configs = api.transport().configs();
    let_assert!([config] = configs.as_slice());
    check!(config.query == data(json!({"page": 1, "category": "books"})));
    check!(config.channels() == [Channel::Query, Channel::Json]);
}

#[tokio::test]
async fn json_post_goes_to_body_only() {
    let api = Api::new(Recorder::default(), &shop());

    api.call("catalog.products.create", data(json!({"sku": "A-1", "price": 9.5})))
        .await
        .expect("created");

    let configs = api.transport().configs();
    let_assert!([config] = configs.as_slice());
    check!(config.method == Some(Method::Post));
    check!(config.body == data(json!({"sku": "A-1", "price": 9.5})));
    check!(config.query.is_none());
    check!(config.json);
}

#[tokio::test]
async fn accept_only_headers_route_to_query_only() {
    let api = Api::new(Recorder::default(), &shop());

    api.call("catalog.search", data(json!({"q": "rust"})))
        .await
        .expect("searched");

    let configs = api.transport().configs();
    let_assert!([config] = configs.as_slice());
    check!(config.channels() == [Channel::Query]);
    check!(!config.json);
}

#[tokio::test]
async fn validation_failure_skips_transport() {
    let api = Api::new(Recorder::default(), &shop());

    let result = api
        .call("catalog.products.create", data(json!({"sku": "A-1"})))
        .await;

    let_assert!(Err(Error::MissingParameters { required, present }) = result);
    check!(required == ["sku", "price"]);
    check!(present == ["sku"]);
    check!(api.transport().configs().is_empty());
}

#[tokio::test]
async fn hook_and_validation_run_before_the_future_is_polled() {
    let calls = Arc::new(Mutex::new(0_u32));
    let counter = Arc::clone(&calls);
    let schema = Schema::new().endpoint(
        "count",
        Endpoint::post("https://example.com/count").extend_config(
            move |_: &mut RequestConfig, _: Option<&Params>| {
                *counter.lock().expect("lock") += 1;
            },
        ),
    );
    let api = Api::new(Recorder::default(), &schema);
    let method = api.method("count").expect("declared");

    let pending = method.call(None);
    check!(*calls.lock().expect("lock") == 1);
    check!(api.transport().configs().is_empty());

    pending.await.expect("dispatched");
    check!(api.transport().configs().len() == 1);
}

#[tokio::test]
async fn calls_do_not_leak_into_each_other_or_defaults() {
    let api = Api::new(Recorder::default(), &shop());
    let list = api.method("catalog.products.list").expect("declared");

    list.call(data(json!({"page": 5, "tag": "new"}))).await.expect("first");
    list.call(None).await.expect("second");

    let configs = api.transport().configs();
    let_assert!([first, second] = configs.as_slice());
    check!(first.query == data(json!({"page": 5, "tag": "new"})));
    check!(second.query == data(json!({"page": 1})));
    let defaults = data(json!({"page": 1}));
    check!(list.endpoint().data_defaults() == defaults.as_ref());
}

#[tokio::test]
async fn concurrent_calls_share_nothing_mutable() {
    let api = Api::new(Recorder::default(), &shop());
    let list = api.method("catalog.products.list").expect("declared").clone();

    let tasks: Vec<_> = (0..32)
        .map(|n| tokio::spawn(list.call(data(json!({"n": n})))))
        .collect();
    for task in tasks {
        task.await.expect("task").expect("call");
    }

    let mut seen: Vec<i64> = api
        .transport()
        .configs()
        .iter()
        .filter_map(|config| config.query.as_ref()?.get("n")?.as_i64())
        .collect();
    seen.sort_unstable();
    check!(seen == (0..32).collect::<Vec<i64>>());
    check!(
        api.transport()
            .configs()
            .iter()
            .all(|config| config.query.as_ref().and_then(|q| q.get("page")) == Some(&json!(1)))
    );
}

#[tokio::test]
async fn apis_can_share_a_transport() {
    let transport = Arc::new(Recorder::default());
    let shop_api = Api::with_shared(Arc::clone(&transport), &shop());
    let other = Api::with_shared(
        Arc::clone(&transport),
        &Schema::new().endpoint("ping", Endpoint::new("https://other.example.com/ping")),
    );

    shop_api.call("health", None).await.expect("health");
    other.call("ping", None).await.expect("ping");

    let urls: Vec<String> = transport.configs().into_iter().map(|c| c.url).collect();
    check!(urls == ["https://shop.example.com/health", "https://other.example.com/ping"]);
}
