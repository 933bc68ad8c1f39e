mod common;

use assert_matches::assert_matches;
use specimark_client::{AnnotationError, ResponseError};
use specimark_core::query::{ContextFilter, ExportFormat};

use common::{client, private_media, query, FakeTransport};

#[tokio::test]
async fn json_export_is_pretty_printed() {
    let transport = FakeTransport::new();
    transport.respond(200, r#"{"labels":[{"id":1}]}"#);

    let out = client(&transport)
        .export(&private_media(), &ExportFormat::Json, "M", &ContextFilter::default())
        .await
        .unwrap();

    assert_eq!(out, "{\n  \"labels\": [\n    {\n      \"id\": 1\n    }\n  ]\n}");

    let req = transport.last();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/services/projects/12/media/34/labels/export");
    assert_eq!(req.query, query(&[("format", "json"), ("type", "M")]));
}

#[tokio::test]
async fn other_formats_are_returned_verbatim() {
    let transport = FakeTransport::new();
    let csv = "id,label\n1,femur\n";
    transport.respond(200, csv);

    let out = client(&transport)
        .export(&private_media(), &ExportFormat::Csv, "M", &ContextFilter::new("C", 4))
        .await
        .unwrap();

    assert_eq!(out, csv);
    assert_eq!(
        transport.last().query,
        query(&[("format", "csv"), ("type", "M"), ("context_type", "C"), ("context_id", "4")])
    );
}

#[tokio::test]
async fn invalid_json_export_is_malformed() {
    let transport = FakeTransport::new();
    transport.respond(200, "id,label");
    let err = client(&transport)
        .export(&private_media(), &ExportFormat::Json, "M", &ContextFilter::default())
        .await
        .unwrap_err();
    assert_matches!(err, AnnotationError::Export(ResponseError::Malformed(_)));
}

#[tokio::test]
async fn export_failure_asks_to_retry() {
    let transport = FakeTransport::new();
    transport.respond(500, "");
    let err = client(&transport)
        .export(&private_media(), &ExportFormat::Other("xml".into()), "M", &ContextFilter::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("please try again"));
    assert_eq!(err.cause().status(), Some(500));
}
