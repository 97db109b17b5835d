use pixy_imagery::{
    ClientConfig, Error, ImageUploadResult, ImageUrlOptions, ImageryClient, ImageryService,
    MockImageryClient, ServerError,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn services(base_url: &str, api_key: Option<&str>) -> Vec<Box<dyn ImageryService>> {
    let config = ClientConfig::new(base_url, api_key.map(str::to_string));
    vec![
        Box::new(ImageryClient::new(config.clone()).unwrap()),
        Box::new(MockImageryClient::new().with_config(config)),
    ]
}

#[test]
fn test_url_building_examples() {
    for service in services("http://x", None) {
        assert_eq!(
            service.image_url("abc123", Some(&ImageUrlOptions::new().width(100))),
            "http://x/abc123&w=100"
        );
        assert_eq!(service.image_url("abc123", None), "http://x/abc123");
    }

    for service in services("http://x", Some("K")) {
        assert_eq!(service.image_url("abc123", None), "http://x/abc123?api_key=K");
        assert_eq!(
            service.random_image_url(Some(
                &ImageUrlOptions::new()
                    .width(320)
                    .height(240)
                    .maintain_aspect_ratio(true)
            )),
            "http://x/random?api_key=K&w=320&h=240&maintain_aspect_ratio=true"
        );
    }
}

#[test]
fn test_default_options_emit_no_parameters() {
    let options = ImageUrlOptions {
        width: Some(0),
        height: None,
        maintain_aspect_ratio: false,
    };

    for service in services("http://x", Some("K")) {
        assert_eq!(service.image_url("id", Some(&options)), "http://x/id?api_key=K");
        assert_eq!(service.random_image_url(Some(&options)), "http://x/random?api_key=K");
    }
}

/// Upload two files against a stub server, then build URLs for the returned ids.
#[tokio::test]
async fn test_upload_then_build_urls() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir_all(&nested).unwrap();

    let paths: Vec<PathBuf> = vec![dir.path().join("sunset.jpg"), nested.join("beach.gif")];
    fs::write(&paths[0], [0xFF, 0xD8, 0xFF, 0xE0, 0x00]).unwrap();
    fs::write(&paths[1], b"GIF89a\x01\x00\x01\x00").unwrap();

    Mock::given(method("POST"))
        .and(path("/upload-image"))
        .and(query_param("api_key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "images": [
                { "image_id": "11111111", "url": format!("{}/11111111", server.uri()) },
                { "image_id": "22222222", "url": format!("{}/22222222", server.uri()) }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        ImageryClient::new(ClientConfig::new(server.uri(), Some("secret".to_string()))).unwrap();
    let result: ImageUploadResult = client.upload_images(&paths).await.unwrap();

    let ids: Vec<&str> = result.image_ids().collect();
    assert_eq!(ids, vec!["11111111", "22222222"]);

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(body.contains("filename=\"sunset.jpg\""));
    assert!(body.contains("filename=\"beach.gif\""));
    assert!(body.contains("Content-Type: image/jpeg"));
    assert!(body.contains("Content-Type: image/gif"));

    let thumb = ImageUrlOptions::new().width(64).maintain_aspect_ratio(true);
    assert_eq!(
        client.image_url(ids[1], Some(&thumb)),
        format!(
            "{}/22222222?api_key=secret&w=64&maintain_aspect_ratio=true",
            server.uri()
        )
    );
}

#[tokio::test]
async fn test_upload_rejected_by_server() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("cat.png");
    fs::write(&image, [0x89, 0x50, 0x4E, 0x47]).unwrap();

    Mock::given(method("POST"))
        .and(path("/upload-image"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({ "error": "bad key" })),
        )
        .mount(&server)
        .await;

    let client = ImageryClient::new(ClientConfig::new(server.uri(), None)).unwrap();
    let err = client.upload_images(&[image]).await.unwrap_err();

    assert_eq!(err.server_message(), "bad key");
    assert_eq!(
        err.to_string(),
        "image upload failed (status 403): bad key"
    );
    assert!(matches!(
        err,
        Error::Upload {
            status: 403,
            error: ServerError::Reported(_)
        }
    ));
}

#[tokio::test]
async fn test_missing_file_fails_for_every_service() {
    let missing = PathBuf::from("/no/such/dir/missing.png");

    for service in services("http://127.0.0.1:9", None) {
        let err = service.upload_images(&[missing.clone()]).await.unwrap_err();
        assert!(matches!(err, Error::FileAccess { .. }));
        assert!(err.to_string().contains("missing.png"));
    }
}

#[tokio::test]
async fn test_mock_client_records_uploads() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("photo.webp");
    fs::write(&image, b"RIFF\0\0\0\0WEBP").unwrap();

    let mock = MockImageryClient::new();
    let service: &dyn ImageryService = &mock;

    let result = service.upload_images(&[image.clone(), image]).await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(mock.get_upload_count(), 1);
    assert_eq!(mock.get_uploaded_names(), vec!["photo.webp", "photo.webp"]);
    assert!(result.images[0].url.starts_with("http://localhost:5100/"));
}
