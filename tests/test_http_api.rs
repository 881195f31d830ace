use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;

use recipe_snap::detectors::YoloHttpDetector;
use recipe_snap::generators::TgiGenerator;
use recipe_snap::server::build_router;
use recipe_snap::{ClassLabels, RecipePipeline, SamplingParams};
use serde_json::Value;

/// Bind the real router on an ephemeral port and return its address
async fn spawn_app(detector_url: String, generator_url: String) -> SocketAddr {
    let pipeline = Arc::new(RecipePipeline::new(
        Arc::new(YoloHttpDetector::with_base_url(detector_url)),
        Arc::new(TgiGenerator::with_base_url(generator_url)),
        ClassLabels::embedded(),
        SamplingParams::default(),
    ));
    let app = build_router(pipeline);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn png_bytes() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(4, 4));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    bytes.into_inner()
}

/// Hand-rolled multipart body with a single `image` field
fn multipart_image_body(boundary: &str, image: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"image\"; filename=\"food.png\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(image);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

#[tokio::test]
async fn test_root_serves_the_form() {
    let addr = spawn_app("http://unused".to_string(), "http://unused".to_string()).await;

    let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();
    assert!(response.status().is_success());
    let page = response.text().await.unwrap();
    assert!(page.contains("Recipe Snap"));
    assert!(page.contains("/detect"));
}

#[tokio::test]
async fn test_detect_returns_comma_joined_ingredients() {
    let mut detector_server = mockito::Server::new_async().await;
    let _mock = detector_server
        .mock("POST", "/predict")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"detections": [{"class_id": 6, "confidence": 0.9}, {"class_id": 20, "confidence": 0.8}]}"#,
        )
        .create();

    let addr = spawn_app(detector_server.url(), "http://unused".to_string()).await;

    let boundary = "recipe-snap-test-boundary";
    let response = reqwest::Client::new()
        .post(format!("http://{}/detect", addr))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(multipart_image_body(boundary, &png_bytes()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["ingredients"], "Carrot, Onion");
}

#[tokio::test]
async fn test_detect_without_image_field_is_client_error() {
    let addr = spawn_app("http://unused".to_string(), "http://unused".to_string()).await;

    let boundary = "recipe-snap-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{b}--\r\n",
        b = boundary
    );
    let response = reqwest::Client::new()
        .post(format!("http://{}/detect", addr))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing image upload");
}

#[tokio::test]
async fn test_detect_with_corrupt_image_is_client_error() {
    let addr = spawn_app("http://unused".to_string(), "http://unused".to_string()).await;

    let boundary = "recipe-snap-test-boundary";
    let response = reqwest::Client::new()
        .post(format!("http://{}/detect", addr))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(multipart_image_body(boundary, b"not an image"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_recipe_round_trip() {
    let mut generator_server = mockito::Server::new_async().await;
    let _mock = generator_server
        .mock("POST", "/generate")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"generated_text": "title: quick carrot salad<section>directions:<sep>- grate carrots<sep>- dress and toss"}"#,
        )
        .create();

    let addr = spawn_app("http://unused".to_string(), generator_server.url()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/recipe", addr))
        .json(&serde_json::json!({"ingredients": "Carrot, Lemon"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let recipe = body["recipe"].as_str().unwrap();
    assert!(recipe.starts_with("[TITLE]: Quick carrot salad"));
    assert!(recipe.contains("[DIRECTIONS]:"));
    assert!(recipe.contains("grate carrots"));
}

#[tokio::test]
async fn test_empty_ingredients_rejected_before_generation() {
    let mut generator_server = mockito::Server::new_async().await;
    let mock = generator_server.mock("POST", "/generate").expect(0).create();

    let addr = spawn_app("http://unused".to_string(), generator_server.url()).await;
    let client = reqwest::Client::new();

    for payload in [
        serde_json::json!({"ingredients": ""}),
        serde_json::json!({"ingredients": "   "}),
        serde_json::json!({}),
    ] {
        let response = client
            .post(format!("http://{}/recipe", addr))
            .json(&payload)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "No ingredients provided");
    }

    // the generation model is never invoked for rejected requests
    mock.assert();
}

#[tokio::test]
async fn test_generator_fault_is_generic_server_error() {
    let mut generator_server = mockito::Server::new_async().await;
    let _mock = generator_server
        .mock("POST", "/generate")
        .with_status(500)
        .with_body("tensor shape mismatch in decoder layer 3")
        .create();

    let addr = spawn_app("http://unused".to_string(), generator_server.url()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/recipe", addr))
        .json(&serde_json::json!({"ingredients": "Egg"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    // internal details stay in the logs
    assert_eq!(body["error"], "Internal Server Error");
}
