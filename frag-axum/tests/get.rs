mod common;

use axum::body::Body;
use axum::http::Request;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn unauthenticated_requests_are_denied() {
    let res = common::app()
        .oneshot(
            Request::builder()
                .uri("/v1/fragments")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 401);
}

#[tokio::test]
async fn incorrect_credentials_are_denied() {
    let auth = common::basic("invalid@email.com", "incorrect_password");
    let res = common::app()
        .oneshot(common::get("/v1/fragments", &auth))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 401);
}

#[tokio::test]
async fn a_user_with_no_fragments_still_gets_an_array() {
    let auth = common::basic("user1@email.com", "password1");
    let res = common::app()
        .oneshot(common::get("/v1/fragments", &auth))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);

    let body = common::json_body(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["fragments"], json!([]));
}

#[tokio::test]
async fn listing_returns_the_owners_fragment_ids_in_order() {
    let app = common::app();
    let auth = common::basic("user1@email.com", "password1");

    let mut ids = Vec::new();
    for payload in ["This is fragment", "This is fragment 2"] {
        let res = app
            .clone()
            .oneshot(common::post_fragment(&auth, "text/plain", payload))
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 201);
        let body = common::json_body(res).await;
        ids.push(body["fragment"]["id"].clone());
    }

    let res = app
        .oneshot(common::get("/v1/fragments", &auth))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body = common::json_body(res).await;
    assert_eq!(body["fragments"], json!(ids));
}

#[tokio::test]
async fn expand_returns_full_fragment_metadata() {
    let app = common::app();
    let auth = common::basic("user2@email.com", "password2");

    let mut fragments = Vec::new();
    for payload in ["This is fragment", "This is fragment 2"] {
        let res = app
            .clone()
            .oneshot(common::post_fragment(&auth, "text/plain", payload))
            .await
            .unwrap();
        let body = common::json_body(res).await;
        fragments.push(body["fragment"].clone());
    }

    let res = app
        .oneshot(common::get("/v1/fragments?expand=1", &auth))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body = common::json_body(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["fragments"], json!(fragments));
}

#[tokio::test]
async fn listings_are_scoped_to_the_authenticated_owner() {
    let app = common::app();
    let auth1 = common::basic("user1@email.com", "password1");
    let auth2 = common::basic("user2@email.com", "password2");

    let res = app
        .clone()
        .oneshot(common::post_fragment(&auth1, "text/plain", "mine"))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 201);

    let res = app
        .oneshot(common::get("/v1/fragments", &auth2))
        .await
        .unwrap();
    let body = common::json_body(res).await;
    assert_eq!(body["fragments"], json!([]));
}
