//! End-to-end tests against a live server on an ephemeral port.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper_util::rt::TokioIo;
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::{JoinHandle, JoinSet};

use recipe_box::recipes::RecipeStore;
use recipe_box::{DEFAULT_BODY_LIMIT, Error, Server, app};

struct TestApp {
    addr: SocketAddr,
    store: Arc<RecipeStore>,
    shutdown: oneshot::Sender<()>,
    server: JoinHandle<Result<(), Error>>,
}

async fn send(addr: SocketAddr, method: &str, path: &str, body: Option<Value>) -> Reply {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) =
        hyper::client::conn::http1::handshake(TokioIo::new(stream)).await.unwrap();
    tokio::spawn(conn);

    let bytes = body.map(|v| serde_json::to_vec(&v).unwrap()).unwrap_or_default();
    let req = http::Request::builder()
        .method(method)
        .uri(path)
        .header("host", "localhost")
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(bytes)))
        .unwrap();

    let res = sender.send_request(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let body = res.into_body().collect().await.unwrap().to_bytes();
    Reply { status, headers, body }
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}

impl TestApp {
    async fn spawn(store: RecipeStore) -> Self {
        Self::spawn_with_limit(store, DEFAULT_BODY_LIMIT).await
    }

    async fn spawn_with_limit(store: RecipeStore, body_limit: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let store = Arc::new(store);
        let (shutdown, rx) = oneshot::channel::<()>();

        let server = Server::from_listener(listener)
            .body_limit(body_limit)
            .serve_with_shutdown(app(Arc::clone(&store)), async move {
                let _ = rx.await;
            });
        let server = tokio::spawn(server);

        Self { addr, store, shutdown, server }
    }

    async fn send(&self, method: &str, path: &str, body: Option<Value>) -> Reply {
        send(self.addr, method, path, body).await
    }

    async fn list(&self) -> Vec<Value> {
        let reply = self.send("GET", "/recipes", None).await;
        assert_eq!(reply.status, StatusCode::OK);
        match reply.json() {
            Value::Array(items) => items,
            other => panic!("expected an array, got {other}"),
        }
    }

    async fn first_id(&self) -> String {
        self.list().await[0]["id"].as_str().unwrap().to_owned()
    }

    async fn stop(self) {
        self.shutdown.send(()).unwrap();
        self.server.await.unwrap().unwrap();
    }
}

fn assert_recipe_shape(item: &Value) {
    let obj = item.as_object().expect("recipe is an object");
    for key in ["id", "name", "ingredients"] {
        assert!(obj.contains_key(key), "missing `{key}` in {item}");
    }
}

#[tokio::test]
async fn lists_recipes_on_get() {
    let app = TestApp::spawn(RecipeStore::with_samples()).await;

    let reply = app.send("GET", "/recipes", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.headers["content-type"], "application/json");

    let items = app.list().await;
    assert!(!items.is_empty());
    items.iter().for_each(assert_recipe_shape);

    app.stop().await;
}

#[tokio::test]
async fn adds_item_on_post() {
    let app = TestApp::spawn(RecipeStore::new()).await;
    let new_recipe = json!({"name": "creamed corn", "ingredients": ["cream", "corn", "salt"]});

    let reply = app.send("POST", "/recipes", Some(new_recipe.clone())).await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let body = reply.json();
    assert_recipe_shape(&body);
    let id = body["id"].as_str().expect("id is a string").to_owned();
    assert_eq!(reply.headers["location"], format!("/recipes/{id}").as_str());

    let mut expected = new_recipe;
    expected["id"] = json!(id);
    assert_eq!(body, expected);
    assert_eq!(app.list().await, vec![expected]);

    app.stop().await;
}

#[tokio::test]
async fn new_recipes_go_last() {
    let app = TestApp::spawn(RecipeStore::with_samples()).await;

    let reply = app
        .send("POST", "/recipes", Some(json!({"name": "toast", "ingredients": ["bread"]})))
        .await;
    let created = reply.json();

    let items = app.list().await;
    assert_eq!(items.len(), 3);
    assert_eq!(items.last(), Some(&created));

    app.stop().await;
}

#[tokio::test]
async fn rejects_post_with_missing_fields() {
    let app = TestApp::spawn(RecipeStore::new()).await;

    for body in [
        json!({"name": "no ingredients"}),
        json!({"ingredients": ["no", "name"]}),
        json!({"name": "", "ingredients": []}),
        json!({"name": "wrong type", "ingredients": "salt"}),
    ] {
        let reply = app.send("POST", "/recipes", Some(body)).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert!(reply.json()["error"].is_string());
    }

    let reply = app.send("POST", "/recipes", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty());

    app.stop().await;
}

#[tokio::test]
async fn updates_item_on_put() {
    let app = TestApp::spawn(RecipeStore::with_samples()).await;
    let id = app.first_id().await;
    let update = json!({"id": id, "name": "test", "ingredients": ["array", "of", "stuff"]});

    let reply = app.send("PUT", &format!("/recipes/{id}"), Some(update.clone())).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), update);

    let items = app.list().await;
    assert_eq!(items[0], update);
    assert_eq!(items.len(), 2);

    app.stop().await;
}

#[tokio::test]
async fn put_without_body_id_uses_path() {
    let app = TestApp::spawn(RecipeStore::with_samples()).await;
    let id = app.first_id().await;

    let reply = app
        .send("PUT", &format!("/recipes/{id}"), Some(json!({"name": "x", "ingredients": ["y"]})))
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), json!({"id": id, "name": "x", "ingredients": ["y"]}));

    app.stop().await;
}

#[tokio::test]
async fn put_failures() {
    let app = TestApp::spawn(RecipeStore::with_samples()).await;
    let id = app.first_id().await;
    let before = app.list().await;

    let unknown = "00000000-0000-4000-8000-000000000000";
    let reply = app
        .send("PUT", &format!("/recipes/{unknown}"), Some(json!({"name": "x", "ingredients": []})))
        .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let other = app.list().await[1]["id"].clone();
    let reply = app
        .send(
            "PUT",
            &format!("/recipes/{id}"),
            Some(json!({"id": other, "name": "x", "ingredients": []})),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let reply = app.send("PUT", &format!("/recipes/{id}"), Some(json!({"name": "x"}))).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.list().await, before);

    app.stop().await;
}

#[tokio::test]
async fn deletes_item_on_delete() {
    let app = TestApp::spawn(RecipeStore::with_samples()).await;
    let id = app.first_id().await;

    let reply = app.send("DELETE", &format!("/recipes/{id}"), None).await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);
    assert!(reply.body.is_empty());

    assert!(app.list().await.iter().all(|item| item["id"] != id.as_str()));

    let again = app.send("DELETE", &format!("/recipes/{id}"), None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let garbage = app.send("DELETE", "/recipes/not-a-uuid", None).await;
    assert_eq!(garbage.status, StatusCode::NOT_FOUND);

    app.stop().await;
}

#[tokio::test]
async fn create_update_delete_round() {
    let app = TestApp::spawn(RecipeStore::with_samples()).await;

    let created = app
        .send(
            "POST",
            "/recipes",
            Some(json!({"name": "creamed corn", "ingredients": ["cream", "corn", "salt"]})),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let recipe = created.json();
    let id = recipe["id"].as_str().unwrap().to_owned();
    assert!(app.list().await.contains(&recipe));

    let update = json!({"id": id, "name": "test", "ingredients": ["array", "of", "stuff"]});
    let updated = app.send("PUT", &format!("/recipes/{id}"), Some(update.clone())).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json(), update);

    let deleted = app.send("DELETE", &format!("/recipes/{id}"), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(app.list().await.iter().all(|item| item["id"] != id.as_str()));

    app.stop().await;
}

#[tokio::test]
async fn routing_misses() {
    let app = TestApp::spawn(RecipeStore::new()).await;

    let reply = app.send("GET", "/nowhere", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = app.send("PATCH", "/recipes", None).await;
    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(reply.headers["allow"], "GET, POST");

    app.stop().await;
}

#[tokio::test]
async fn health_probes() {
    let app = TestApp::spawn(RecipeStore::new()).await;

    let live = app.send("GET", "/healthz", None).await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.body, Bytes::from_static(b"ok"));

    let ready = app.send("GET", "/readyz", None).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body, Bytes::from_static(b"ready"));

    app.stop().await;
}

#[tokio::test]
async fn concurrent_posts_all_land_with_distinct_ids() {
    const POSTS: usize = 32;
    let app = TestApp::spawn(RecipeStore::new()).await;

    let mut posts = JoinSet::new();
    for i in 0..POSTS {
        let body = json!({"name": format!("batch {i}"), "ingredients": ["flour", "water"]});
        posts.spawn(send(app.addr, "POST", "/recipes", Some(body)));
    }

    let mut ids = HashSet::new();
    while let Some(reply) = posts.join_next().await {
        let reply = reply.unwrap();
        assert_eq!(reply.status, StatusCode::CREATED);
        ids.insert(reply.json()["id"].as_str().unwrap().to_owned());
    }

    assert_eq!(ids.len(), POSTS);
    assert_eq!(app.store.len(), POSTS);
    let listed: HashSet<_> = app
        .list()
        .await
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(listed, ids);

    app.stop().await;
}

#[tokio::test]
async fn racing_put_and_delete_see_whole_records() {
    let app = TestApp::spawn(RecipeStore::new()).await;

    for round in 0..10 {
        let created = app
            .send("POST", "/recipes", Some(json!({"name": "before", "ingredients": ["a"]})))
            .await
            .json();
        let id = created["id"].as_str().unwrap().to_owned();
        let path = format!("/recipes/{id}");
        let update = json!({"id": id, "name": format!("after {round}"), "ingredients": ["b", "c"]});

        let addr = app.addr;
        let put = tokio::spawn({
            let (path, update) = (path.clone(), update.clone());
            async move { send(addr, "PUT", &path, Some(update)).await }
        });
        let delete = tokio::spawn({
            let path = path.clone();
            async move { send(addr, "DELETE", &path, None).await }
        });
        let (put, delete) = (put.await.unwrap(), delete.await.unwrap());

        assert_eq!(delete.status, StatusCode::NO_CONTENT);
        match put.status {
            StatusCode::OK => assert_eq!(put.json(), update),
            StatusCode::NOT_FOUND => assert!(put.json()["error"].is_string()),
            other => panic!("unexpected PUT status {other}"),
        }
        assert!(app.list().await.iter().all(|item| item["id"] != id.as_str()));
    }

    app.stop().await;
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = TestApp::spawn_with_limit(RecipeStore::new(), 64).await;

    let body = json!({"name": "x".repeat(200), "ingredients": ["salt"]});
    let reply = app.send("POST", "/recipes", Some(body)).await;
    assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.store.is_empty());

    let reply = app
        .send("POST", "/recipes", Some(json!({"name": "tea", "ingredients": []})))
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);

    app.stop().await;
}

#[tokio::test]
async fn alternate_id_spellings_are_not_found() {
    let app = TestApp::spawn(RecipeStore::with_samples()).await;
    let id = app.first_id().await;

    for alias in [id.replace('-', ""), format!("urn:uuid:{id}"), id.to_uppercase()] {
        let reply = app.send("DELETE", &format!("/recipes/{alias}"), None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
    }
    assert_eq!(app.list().await.len(), 2);

    app.stop().await;
}
