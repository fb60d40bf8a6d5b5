use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::{setup_test_client, temp_path};
use telesocial::{MediaIdListResponse, TelesocialError};

#[tokio::test]
async fn create_media_returns_bound_handle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/media"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "MediaResponse": {"mediaId": "m-17"}
        })))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let media = client.create_media().await.unwrap();
    assert_eq!(media.id(), "m-17");
}

#[tokio::test]
async fn record_and_blast_post_their_actions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/media/m-17"))
        .and(body_string_contains("networkid=555-1234"))
        .and(body_string_contains("action=record"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/rest/media/m-17"))
        .and(body_string_contains("action=blast"))
        .and(body_string_contains("greetingid=m-2"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    client.media().record("m-17", "555-1234", None).await.unwrap();
    client.media().blast("m-17", "555-1234", Some("m-2")).await.unwrap();
}

#[tokio::test]
async fn status_posts_to_the_status_path() {
    let mock_server = MockServer::start().await;
    let body = json!({"MediaResponse": {"mediaId": "m-17", "fileSize": 12000}});

    Mock::given(method("POST"))
        .and(path("/api/rest/media/status/m-17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let res = client.media().status("m-17").await.unwrap();
    assert_eq!(res.body, body);
}

#[tokio::test]
async fn upload_grant_accessor_extracts_the_grant_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/media/m-17"))
        .and(body_string_contains("action=upload_grant"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "UploadResponse": {"grantId": 4711}
        })))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let grant = client.media().get("m-17").upload_grant().await.unwrap();
    assert_eq!(grant, "4711");
}

#[tokio::test]
async fn list_normalizes_uploaded_and_recorded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaidListResponse": {"uploaded": "m-1", "recorded": ["m-2", "m-3"]}
        })))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let res = client.media().list().await.unwrap();
    assert_eq!(
        res.body,
        json!({"MediaidListResponse": {"uploaded": ["m-1"], "recorded": ["m-2", "m-3"]}})
    );

    let list: MediaIdListResponse = res.decode("MediaidListResponse").unwrap();
    assert_eq!(list.uploaded, vec!["m-1"]);
    assert_eq!(list.recorded, vec!["m-2", "m-3"]);
}

#[tokio::test]
async fn remove_posts_the_remove_action() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/media/m-17"))
        .and(body_string_contains("action=remove"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    client.media().get("m-17").remove().await.unwrap();
}

#[tokio::test]
async fn upload_sends_multipart_and_applies_no_status_policy() {
    let mock_server = MockServer::start().await;

    // 415 would normally raise; upload returns it raw for the caller.
    Mock::given(method("POST"))
        .and(path("/forklift"))
        .and(body_string_contains("name=\"grant\""))
        .and(body_string_contains("g-123"))
        .and(body_string_contains("name=\"mediafile\""))
        .and(body_string_contains("audio/mpeg"))
        .and(body_string_contains("fake mp3 payload"))
        .respond_with(ResponseTemplate::new(415).set_body_json(json!({
            "UploadResponse": {"message": "unsupported codec"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let file = temp_path("upload.mp3");
    std::fs::write(&file, b"fake mp3 payload").unwrap();

    let client = setup_test_client(&mock_server.uri());
    let res = client.media().upload("g-123", &file).await.unwrap();
    assert_eq!(res.status, 415);
    assert_eq!(res.message().as_deref(), Some("unsupported codec"));

    let _ = std::fs::remove_file(&file);
}

#[tokio::test]
async fn upload_of_missing_file_is_an_io_error() {
    let mock_server = MockServer::start().await;
    let client = setup_test_client(&mock_server.uri());

    let err = client
        .media()
        .upload("g-123", temp_path("does-not-exist.mp3"))
        .await
        .unwrap_err();
    assert!(matches!(err, TelesocialError::Io(_)), "got: {err:?}");
}

#[tokio::test]
async fn download_writes_fetched_bytes_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/media/status/m-17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaResponse": {
                "mediaId": "m-17",
                "downloadUrl": format!("{}/media/content/m-17.mp3", mock_server.uri()),
                "fileSize": 5
            }
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/content/m-17.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"AUDIO".to_vec()))
        .mount(&mock_server)
        .await;

    let target = temp_path("download.mp3");
    let client = setup_test_client(&mock_server.uri());
    client.media().download("m-17", &target).await.unwrap();

    assert_eq!(std::fs::read(&target).unwrap(), b"AUDIO");
    let _ = std::fs::remove_file(&target);
}

#[tokio::test]
async fn download_without_content_propagates_a_service_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/media/status/m-17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaResponse": {"mediaId": "m-17"}
        })))
        .mount(&mock_server)
        .await;

    let target = temp_path("missing-content.mp3");
    let client = setup_test_client(&mock_server.uri());
    let err = client.media().download("m-17", &target).await.unwrap_err();

    assert!(matches!(err, TelesocialError::Service { .. }), "got: {err:?}");
    assert!(!target.exists());
}

#[tokio::test]
async fn download_fetch_failure_propagates_with_the_fetch_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/media/status/m-17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaResponse": {
                "mediaId": "m-17",
                "downloadUrl": format!("{}/media/content/m-17.mp3", mock_server.uri())
            }
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/content/m-17.mp3"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    let target = temp_path("gone.mp3");
    let client = setup_test_client(&mock_server.uri());
    let err = client.media().download("m-17", &target).await.unwrap_err();

    assert!(
        matches!(err, TelesocialError::Service { code: 410, .. }),
        "got: {err:?}"
    );
    assert!(!target.exists());
}

#[tokio::test]
async fn content_exists_distinguishes_200_from_other_2xx() {
    for (status, expected) in [(200u16, true), (202, false)] {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/rest/media/status/m-17"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "MediaResponse": {"mediaId": "m-17"}
            })))
            .mount(&mock_server)
            .await;

        let client = setup_test_client(&mock_server.uri());
        let media = client.media().get("m-17");
        assert_eq!(media.content_exists().await.unwrap(), expected);
    }
}

#[tokio::test]
async fn download_url_accessor_is_none_without_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/media/status/m-17"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "MediaResponse": {"mediaId": "m-17"}
        })))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let media = client.media().get("m-17");
    assert_eq!(media.download_url().await.unwrap(), None);
    assert_eq!(media.file_size().await.unwrap(), None);
}
