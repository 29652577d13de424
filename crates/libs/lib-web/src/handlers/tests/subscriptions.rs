use super::*;
use serde_json::json;

const BOUNDARY: &str = "gatewaytestboundary";
const RECEIPT: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x00, 0xff, 0x10];

enum Field<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a str, &'a [u8]),
}

fn multipart_body(fields: &[Field]) -> Vec<u8> {
    let mut body = Vec::new();
    for field in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match field {
            Field::Text(name, value) => {
                body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes());
                body.extend_from_slice(value.as_bytes());
            }
            Field::File(name, file_name, content_type, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn purchase_request(fields: &[Field]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/subscriptions")
        .header(header::AUTHORIZATION, bearer(&user_token()))
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(multipart_body(fields)))
        .unwrap()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[tokio::test]
async fn test_list_mine() {
    let backend = FakeBackend::start(StatusCode::OK, r#"[{"id":"s1","type":"ivrex_pro","status":"active"}]"#).await;

    let (status, body) = send(
        app(&backend.url),
        empty_request(Method::GET, "/api/subscriptions", Some(&user_token())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["type"], "ivrex_pro");
    assert_eq!(backend.only_call().uri, "/subscriptions/me");
}

#[tokio::test]
async fn test_purchase_form_reshaped_for_backend() {
    let backend = FakeBackend::start(StatusCode::CREATED, r#"{"id":"s2","status":"pending"}"#).await;

    let request = purchase_request(&[
        Field::Text("service", "Copy Trading"),
        Field::Text("price", "49.90"),
        Field::Text("acceptTerms", "true"),
        Field::Text("paymentMethod", "bank_transfer"),
        Field::File("paymentProof", "receipt.png", "image/png", RECEIPT),
    ]);

    let (status, body) = send(app(&backend.url), request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": "s2", "status": "pending" }));

    let call = backend.only_call();
    assert_eq!(call.uri, "/subscriptions");
    assert!(call.content_type.unwrap().starts_with("multipart/form-data; boundary="));

    let sent = &call.body[..];
    assert!(contains(sent, b"name=\"type\"\r\n\r\ncopy_trading\r\n"));
    assert!(contains(sent, b"name=\"price\"\r\n\r\n49.9\r\n"));
    assert!(contains(sent, b"name=\"paymentMethod\"\r\n\r\nbank_transfer\r\n"));
    assert!(contains(sent, b"filename=\"receipt.png\""));
    assert!(contains(sent, b"Content-Type: image/png"));
    assert!(contains(sent, RECEIPT));
    assert!(!contains(sent, b"acceptTerms"));
    assert!(!contains(sent, b"name=\"service\""));
}

#[tokio::test]
async fn test_unknown_service_rejected_locally() {
    let backend = FakeBackend::start(StatusCode::CREATED, "{}").await;

    let request = purchase_request(&[Field::Text("service", "Crystal Ball"), Field::Text("price", "10")]);
    let (status, body) = send(app(&backend.url), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Unknown service: Crystal Ball" }));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_negative_price_rejected_locally() {
    let backend = FakeBackend::start(StatusCode::CREATED, "{}").await;

    let request = purchase_request(&[Field::Text("service", "IVREX Pro"), Field::Text("price", "-5")]);
    let (status, body) = send(app(&backend.url), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "price cannot be negative" }));
    assert!(backend.calls().is_empty());
}
