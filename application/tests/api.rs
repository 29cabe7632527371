//! End-to-end tests of the proxy and record store HTTP APIs.

use std::{net::SocketAddr, time::Duration};

use application::api;
use axum::Router;
use reqwest::StatusCode;
use serde_json::{json, Value};
use service::{
    domain::user,
    infra::{rest, Memory, Rest},
    Service,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

/// 25 active users followed by 5 inactive ones.
fn users() -> Vec<user::Detail> {
    (0..30)
        .map(|n| {
            serde_json::from_value(json!({
                "id": format!("u{n}"),
                "seq_no": format!("{}", n + 1),
                "name": format!("User {n}"),
                "job_rank": "Engineer",
                "position": "Platform",
                "email": format!("user{n}@example.com"),
                "active": n < 25,
                "ip_address": "10.0.0.1",
                "join_date": "2023-04-01T09:00:00Z",
            }))
            .unwrap()
        })
        .collect()
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    }));
    addr
}

async fn spawn_store() -> SocketAddr {
    spawn(api::router(
        Service::new(Memory::new(users())),
        CorsLayer::new(),
    ))
    .await
}

async fn spawn_proxy(store: SocketAddr) -> SocketAddr {
    let rest = Rest::new(&rest::Config {
        base_url: format!("http://{store}/api"),
        auth_key: "api-key".into(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();
    spawn(api::router(Service::new(rest), CorsLayer::new())).await
}

async fn get(url: String) -> (StatusCode, Value) {
    let resp = reqwest::get(url).await.unwrap();
    (resp.status(), resp.json().await.unwrap())
}

#[tokio::test]
async fn lists_filtered_page_through_proxy() {
    let proxy = spawn_proxy(spawn_store().await).await;

    let (status, body) = get(format!(
        "http://{proxy}/api/users?page_index=2&page_size=10&active=true",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"], json!({ "status": 200, "message": "Success" }));
    assert_eq!(body["data"]["page_index"], 2);
    assert_eq!(body["data"]["page_size"], 10);
    assert_eq!(body["data"]["total_count"], 25);
    assert_eq!(body["data"]["result_list"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"]["result_list"][0]["id"], "u10");
}

#[tokio::test]
async fn ignores_empty_search_values() {
    let store = spawn_store().await;

    let (status, body) =
        get(format!("http://{store}/api/users?name=&email=user2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page_index"], 1);
    assert_eq!(body["data"]["page_size"], 10);
    // `user2`, `user20` .. `user29`
    assert_eq!(body["data"]["total_count"], 11);
}

#[tokio::test]
async fn reports_missing_user() {
    let proxy = spawn_proxy(spawn_store().await).await;

    let (status, body) = get(format!("http://{proxy}/api/users/absent")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "meta": { "status": 404, "message": "User not found" } }),
    );
}

#[tokio::test]
async fn updates_user_partially() {
    let proxy = spawn_proxy(spawn_store().await).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{proxy}/api/users/u3"))
        .json(&json!({ "name": "Lee", "active": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({
            "meta": { "status": 200, "message": "User updated successfully" },
        }),
    );

    let (status, body) = get(format!("http://{proxy}/api/users/u3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Lee");
    assert_eq!(body["data"]["active"], false);
    assert_eq!(body["data"]["email"], "user3@example.com");
    assert_eq!(body["data"]["ip_address"], "10.0.0.1");

    let resp = client
        .post(format!("http://{proxy}/api/users/absent"))
        .json(&json!({ "name": "Lee" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deletes_user_once() {
    let proxy = spawn_proxy(spawn_store().await).await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("http://{proxy}/api/users/u0"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json::<Value>().await.unwrap()["meta"]["message"],
        "User deleted successfully",
    );

    let resp = client
        .delete(format!("http://{proxy}/api/users/u0"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let (_, body) = get(format!("http://{proxy}/api/users")).await;
    assert_eq!(body["data"]["total_count"], 29);
}

#[tokio::test]
async fn rejects_zero_page_index() {
    let store = spawn_store().await;
    let proxy = spawn_proxy(store).await;

    for addr in [store, proxy] {
        let (status, body) =
            get(format!("http://{addr}/api/users?page_index=0")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["meta"]["status"], 400);
        assert!(body.get("data").is_none());
    }
}

#[tokio::test]
async fn rejects_malformed_body() {
    let store = spawn_store().await;

    let resp = reqwest::Client::new()
        .post(format!("http://{store}/api/users/u1"))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>().await.unwrap()["meta"]["status"], 400);
}

#[tokio::test]
async fn fails_when_store_is_unreachable() {
    let unused = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();
    let proxy = spawn_proxy(unused).await;

    let (status, body) = get(format!("http://{proxy}/api/users")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["meta"]["status"], 500);
}
