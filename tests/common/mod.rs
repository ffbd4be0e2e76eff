#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
};
use image_tagger::{VisionError, VisionModel};

pub const BOUNDARY: &str = "----image-tagger-test-boundary";

/// Vision backend that replays a canned reply and records every call.
#[derive(Clone)]
pub struct MockVision {
    reply: Arc<Result<String, String>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockVision {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Arc::new(Ok(text.to_string())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Arc::new(Err(message.to_string())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl VisionModel for MockVision {
    async fn complete(&self, data_uri: &str) -> Result<String, VisionError> {
        self.calls.lock().unwrap().push(data_uri.to_string());
        match self.reply.as_ref() {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(VisionError::Api {
                status: 502,
                message: message.clone(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock-vision"
    }
}

pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(filename: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name: "image",
            filename: Some(filename),
            content_type: Some(content_type),
            data,
        }
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(filename) = part.filename {
            disposition.push_str(&format!("; filename=\"{}\"", filename));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn analyze_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Smallest byte sequence the sniffer accepts as JPEG (JFIF APP0 header).
pub fn sample_jpeg() -> Vec<u8> {
    let mut bytes = vec![
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00,
    ];
    bytes.extend_from_slice(&[0x00; 50]);
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes
}

pub const TWO_TAGS: &str =
    r#"{"tags":[{"label":"Dog","confidence":0.98},{"label":"Grass","confidence":0.9}]}"#;
