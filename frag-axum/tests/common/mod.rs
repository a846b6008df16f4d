#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use frag_axum::{router, AppState, BasicUsers};
use frag_store::MemoryFragmentStore;
use http_body_util::BodyExt;
use serde_json::Value;

pub const API_URL: &str = "http://localhost:8080";

/// A fresh application with the two well-known test users.
pub fn app() -> Router {
    let mut users = BasicUsers::new();
    users.insert("user1@email.com", "password1", 4).unwrap();
    users.insert("user2@email.com", "password2", 4).unwrap();
    router(AppState::new(MemoryFragmentStore::new(), users, API_URL))
}

pub fn basic(email: &str, password: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{email}:{password}")))
}

pub fn post_fragment(auth: &str, content_type: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/fragments")
        .header("authorization", auth)
        .header("content-type", content_type)
        .body(body.into())
        .unwrap()
}

pub fn get(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap()
}

pub async fn json_body(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn raw_body(res: axum::response::Response) -> Vec<u8> {
    res.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// A small JPEG payload for image round-trip tests.
pub fn jpeg_bytes() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        4,
        4,
        image::Rgb([0, 128, 255]),
    ));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Jpeg).unwrap();
    out.into_inner()
}
