use std::path::Path;

use quickbasket_api::app::{build_app, AppState};
use reqwest::{header, StatusCode};
use serde_json::{json, Value};

const ADMIN_TOKEN: &str = "test-admin-token";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Seeded store: 1 Rice 5kg (350.00 x 20), 2 Wheat 5kg, 3 Sugar 1kg, 4 Milk 1L.
    async fn spawn() -> Self {
        Self::spawn_with(None).await
    }

    async fn spawn_with(data_file: Option<&Path>) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let store = quickbasket_infra::open_store(data_file, true).expect("failed to open store");
        let app = build_app(AppState::new(store), ADMIN_TOKEN.to_string());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Value of the `cart` cookie set by a response, if any.
fn cart_cookie(res: &reqwest::Response) -> Option<String> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix("cart="))
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
}

async fn add_to_cart(
    client: &reqwest::Client,
    srv: &TestServer,
    cart: &str,
    body: Value,
) -> reqwest::Response {
    client
        .post(srv.url("/cart/items"))
        .header(header::COOKIE, format!("cart={cart}"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn product(client: &reqwest::Client, srv: &TestServer, id: u64) -> Value {
    let res = client.get(srv.url(&format!("/products/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

async fn sales(client: &reqwest::Client, srv: &TestServer) -> Vec<Value> {
    let res = client
        .get(srv.url("/admin/sales"))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    body["items"].as_array().unwrap().clone()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn lists_seeded_catalog() {
    let srv = TestServer::spawn().await;
    let body: Value = reqwest::get(srv.url("/products")).await.unwrap().json().await.unwrap();

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0], json!({"id": 1, "name": "Rice 5kg", "price": "350.00", "stock": 20}));
}

#[tokio::test]
async fn unknown_or_malformed_product_id() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/products/99")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = reqwest::get(srv.url("/products/abc")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_to_cart_accumulates_in_cookie() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = add_to_cart(&client, &srv, "", json!({"product_id": 1, "quantity": 2})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let cart = cart_cookie(&res).unwrap();
    assert_eq!(cart, "1:2");

    let res = add_to_cart(&client, &srv, &cart, json!({"product_id": 3})).await;
    let cart = cart_cookie(&res).unwrap();
    assert_eq!(cart, "1:2,3:1");

    let res = add_to_cart(&client, &srv, &cart, json!({"product_id": 1, "quantity": 3})).await;
    let cart = cart_cookie(&res).unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(cart, "1:5,3:1");
    assert_eq!(body["message"], "Added 3 x Rice 5kg to cart.");
    assert_eq!(body["cart"]["total"], "1795.00");
}

#[tokio::test]
async fn invalid_quantities_leave_cart_unchanged() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for qty in [0, -2, 21] {
        let res = add_to_cart(&client, &srv, "1:1", json!({"product_id": 1, "quantity": qty})).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "qty {qty}");
        assert_eq!(cart_cookie(&res), None);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "invalid_quantity");
    }

    let res = add_to_cart(&client, &srv, "", json!({"product_id": 42})).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn view_cart_skips_malformed_and_deleted_entries() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .delete(srv.url("/admin/products/2"))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(srv.url("/cart"))
        .header(header::COOKIE, "cart=4:2,bogus,2:1,x:3")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let lines = body["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["name"], "Milk 1L");
    assert_eq!(body["total"], "70.00");
}

#[tokio::test]
async fn empty_cart_views_as_empty() {
    let srv = TestServer::spawn().await;
    let body: Value = reqwest::get(srv.url("/cart")).await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({"lines": [], "total": "0.00"}));
}

#[tokio::test]
async fn removing_absent_item_is_a_noop() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .delete(srv.url("/cart/items/3"))
        .header(header::COOKIE, "cart=1:2")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(cart_cookie(&res).as_deref(), Some("1:2"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["removed"], false);

    let res = client
        .delete(srv.url("/cart/items/1"))
        .header(header::COOKIE, "cart=1:2")
        .send()
        .await
        .unwrap();
    assert_eq!(cart_cookie(&res).as_deref(), Some(""));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["removed"], true);
}

#[tokio::test]
async fn checkout_decrements_stock_and_clears_cookie() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/checkout"))
        .header(header::COOKIE, "cart=1:5")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.contains("Max-Age=0"));

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["sale"]["total"], "1750.00");
    assert_eq!(body["sale"]["lines"][0]["unit_price"], "350.00");
    assert_eq!(body["message"], "Checkout successful. Total paid: 1750.00");

    assert_eq!(product(&client, &srv, 1).await["stock"], 15);
    assert_eq!(sales(&client, &srv).await.len(), 1);
}

#[tokio::test]
async fn checkout_with_insufficient_stock_changes_nothing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/checkout"))
        .header(header::COOKIE, "cart=3:2,1:25")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(cart_cookie(&res), None);

    assert_eq!(product(&client, &srv, 1).await["stock"], 20);
    assert_eq!(product(&client, &srv, 3).await["stock"], 50);
    assert!(sales(&client, &srv).await.is_empty());
}

#[tokio::test]
async fn checkout_of_empty_cart_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.post(srv.url("/checkout")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "empty_cart");
}

#[tokio::test]
async fn admin_routes_require_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/admin/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(srv.url("/admin/products"))
        .bearer_auth("wrong")
        .json(&json!({"name": "Salt", "price": "10", "stock": "5"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_product_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/admin/products"))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({"name": "Salt 1kg", "price": 12.5, "stock": 40}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["product"], json!({"id": 5, "name": "Salt 1kg", "price": "12.50", "stock": 40}));

    let res = client
        .put(srv.url("/admin/products/5"))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({"name": "Sea Salt 1kg", "price": "15", "stock": "30"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(product(&client, &srv, 5).await["name"], "Sea Salt 1kg");

    let res = client
        .delete(srv.url("/admin/products/5"))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(srv.url("/admin/products/5"))
        .bearer_auth(ADMIN_TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_validation_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/admin/products"))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({"name": "  ", "price": "1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_required");

    let res = client
        .post(srv.url("/admin/products"))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({"name": "Salt", "price": "-1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = client
        .put(srv.url("/admin/products/77"))
        .bearer_auth(ADMIN_TOKEN)
        .json(&json!({"name": "Ghost"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn file_store_persists_checkout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grocery.json");
    let srv = TestServer::spawn_with(Some(path.as_path())).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/checkout"))
        .header(header::COOKIE, "cart=4:10")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    drop(srv);

    let text = std::fs::read_to_string(&path).unwrap();
    let saved: Value = serde_json::from_str(&text).unwrap();
    let milk = saved["products"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == 4)
        .unwrap();
    assert_eq!(milk["stock"], 90);
    assert_eq!(saved["sales"].as_array().unwrap().len(), 1);
}
