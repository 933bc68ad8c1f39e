mod common;

use assert_matches::assert_matches;
use serde_json::json;
use specimark_client::{AnnotationError, ResponseError};
use specimark_core::factory::make_default;
use specimark_core::model::Position;

use common::{client, private_media, query, FakeTransport};

fn labeled(shape: &str, x: f64, y: f64) -> specimark_core::model::Annotation {
    let mut a = make_default(shape, Position::new(x, y));
    a.label = "condyle".to_string();
    a
}

#[tokio::test]
async fn save_posts_batch_to_edit_endpoint() {
    let transport = FakeTransport::new();
    transport.respond_json(200, json!({"ok": true, "ids": [101]}));

    let mut existing = labeled("rect", 1.0, 2.0);
    existing.annotation_id = Some(55);
    let fresh = labeled("point", 3.0, 4.0);

    let result = client(&transport)
        .save(&private_media(), "M", 9, &[existing, fresh])
        .await
        .unwrap();
    assert_eq!(result, json!({"ok": true, "ids": [101]}));

    let req = transport.last();
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/services/projects/12/media/34/labels/edit");
    assert_eq!(req.query, query(&[("type", "M")]));

    let body = req.body.unwrap();
    assert_eq!(body["linkId"], json!(9));
    let save = body["save"].as_array().unwrap();
    assert_eq!(save.len(), 2);
    assert_eq!(save[0]["annotation_id"], json!(55));
    assert_eq!(save[0]["w"], json!(100.0));
    assert!(save[1].get("annotation_id").is_none());
    assert_eq!(save[1]["type"], json!("point"));
    assert_eq!(save[1]["w"], json!(1.0));
    assert_eq!(save[1]["showDefaultText"], json!(1));
}

#[tokio::test]
async fn update_is_a_single_element_save() {
    let transport = FakeTransport::new();
    transport.respond_json(200, json!({"ok": true}));
    let mut a = labeled("poly", 0.0, 0.0);
    a.annotation_id = Some(3);

    client(&transport)
        .update(&private_media(), "M", 9, &a)
        .await
        .unwrap();

    let req = transport.last();
    assert_eq!(req.path, "/services/projects/12/media/34/labels/edit");
    let body = req.body.unwrap();
    assert_eq!(body["save"].as_array().unwrap().len(), 1);
    assert_eq!(body["save"][0]["points"], json!([0.0, 0.0, 50.0, 0.0, 25.0, 50.0]));
}

#[tokio::test]
async fn save_error_uses_server_message() {
    let transport = FakeTransport::new();
    transport.respond_json(400, json!({"message": "Link not found"}));

    let err = client(&transport)
        .save(&private_media(), "M", 9, &[labeled("rect", 0.0, 0.0)])
        .await
        .unwrap_err();

    assert_matches!(
        &err,
        AnnotationError::Save(ResponseError::Server { status: 400, message }) if message == "Link not found"
    );
    assert!(err.to_string().contains("please try again"));
}

#[tokio::test]
async fn save_accepts_empty_success_body() {
    let transport = FakeTransport::new();
    transport.respond(200, "");
    let result = client(&transport)
        .save(&private_media(), "M", 9, &[labeled("rect", 0.0, 0.0)])
        .await
        .unwrap();
    assert!(result.is_null());
}

#[tokio::test]
async fn delete_normalizes_single_id() {
    let transport = FakeTransport::new();
    transport.respond_json(200, json!({"deleted": 1}));

    client(&transport).delete(&private_media(), 42_i64).await.unwrap();

    let req = transport.last();
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/services/projects/12/media/34/labels/delete");
    assert!(req.query.is_empty());
    assert_eq!(req.body.unwrap(), json!({"annotationIds": [42]}));
}

#[tokio::test]
async fn delete_sends_id_list() {
    let transport = FakeTransport::new();
    transport.respond_json(200, json!({"deleted": 3}));

    client(&transport)
        .delete(&private_media(), vec![1_i64, 2, 3])
        .await
        .unwrap();

    assert_eq!(transport.last().body.unwrap(), json!({"annotationIds": [1, 2, 3]}));
}

#[tokio::test]
async fn delete_failure_is_wrapped() {
    let transport = FakeTransport::new();
    transport.respond(500, "boom");
    let err = client(&transport)
        .delete(&private_media(), 1_i64)
        .await
        .unwrap_err();
    assert_matches!(err, AnnotationError::Delete(ResponseError::Server { status: 500, .. }));
}
