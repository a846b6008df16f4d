mod common;

use axum::body::Body;
use axum::http::Request;
use serde_json::json;
use tower::ServiceExt;

fn delete(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn unauthenticated_requests_are_denied() {
    let res = common::app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/v1/fragments/random")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 401);
}

#[tokio::test]
async fn incorrect_credentials_are_denied() {
    let auth = common::basic("andjsdsb@email.com", "jncbccn");
    let res = common::app()
        .oneshot(delete("/v1/fragments/random", &auth))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 401);
}

#[tokio::test]
async fn unknown_id_returns_404() {
    let auth = common::basic("user1@email.com", "password1");
    let res = common::app()
        .oneshot(delete("/v1/fragments/random", &auth))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn deleted_fragments_are_gone_for_good() {
    let app = common::app();
    let auth = common::basic("user2@email.com", "password2");

    let res = app
        .clone()
        .oneshot(common::post_fragment(&auth, "text/plain", "This is fragment"))
        .await
        .unwrap();
    let body = common::json_body(res).await;
    let id = body["fragment"]["id"].as_str().unwrap().to_string();

    let res = app
        .clone()
        .oneshot(delete(&format!("/v1/fragments/{id}"), &auth))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body = common::json_body(res).await;
    assert_eq!(body["status"], "ok");

    let res = app
        .clone()
        .oneshot(common::get(&format!("/v1/fragments/{id}"), &auth))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);

    let res = app
        .oneshot(common::get("/v1/fragments", &auth))
        .await
        .unwrap();
    let body = common::json_body(res).await;
    assert_eq!(body["fragments"], json!([]));
}
