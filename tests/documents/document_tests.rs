// Document tests - MIME inference, file reading and response shapes

use celeste_docintel_core::{AIResponse, AIUsage, Document, ErrorKind, MimeType, Provider};
use serde_json::json;
use std::io::Write;

#[test]
fn mime_kind_is_inferred_from_extension() {
    let cases = [
        ("data/report.pdf", MimeType::Pdf),
        ("data/REPORT.PDF", MimeType::Pdf),
        ("src/app.js", MimeType::JavascriptText),
        ("scripts/job.py", MimeType::PythonText),
        ("notes/readme.md", MimeType::Markdown),
        ("notes/log.txt", MimeType::Text),
        ("site/index.html", MimeType::Html),
        ("site/style.css", MimeType::Css),
        ("exports/table.csv", MimeType::Csv),
        ("feeds/items.xml", MimeType::Xml),
        ("letters/draft.rtf", MimeType::Rtf),
    ];
    for (path, expected) in cases {
        let document = Document::from_path(path).expect("known extension");
        assert_eq!(document.mime_type, expected, "{path}");
        assert_eq!(document.path().to_str(), Some(path));
    }
}

#[test]
fn unknown_extension_is_invalid_document_type() {
    for path in ["photo.png", "archive", "deck.pptx"] {
        let err = Document::from_path(path).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::InvalidDocumentType, "{path}");
    }
}

#[test]
fn mime_strings_parse_to_closed_set() {
    for mime in MimeType::ALL {
        assert_eq!(mime.as_str().parse::<MimeType>().expect("parse"), mime);
    }
    assert_eq!("text/html; charset=utf-8".parse::<MimeType>().expect("parse"), MimeType::Html);
    assert!("image/jpeg".parse::<MimeType>().is_err());
}

#[tokio::test]
async fn read_bytes_returns_file_contents() {
    let mut file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("temp file");
    file.write_all(b"quarterly numbers").expect("write");

    let document = Document::from_path(file.path()).expect("document");
    let bytes = document.read_bytes().await.expect("bytes");

    assert_eq!(bytes, b"quarterly numbers");
}

#[tokio::test]
async fn read_bytes_reports_missing_file() {
    let document = Document::new("/definitely/not/here.pdf", MimeType::Pdf);
    let err = document.read_bytes().await.expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::DocumentRead);
    assert!(err.to_string().contains("here.pdf"));
}

#[test]
fn document_serializes_with_wire_mime_string() {
    let document = Document::new("data/report.pdf", MimeType::Pdf);
    let value = serde_json::to_value(&document).expect("serialize");
    assert_eq!(value, json!({ "file_path": "data/report.pdf", "mime_type": "application/pdf" }));
}

#[test]
fn response_deserializes_with_defaults() {
    let response: AIResponse = serde_json::from_value(json!({ "text": "hi" })).expect("response");

    assert_eq!(response.text, "hi");
    assert_eq!(response.usage, None);
    assert_eq!(response.provider, None);
    assert!(response.metadata.is_empty());
    assert!(!response.is_usage_marker());
}

#[test]
fn usage_marker_has_empty_text() {
    let marker = AIResponse::usage_marker(AIUsage::new(3, 3, 6)).with_provider(Provider::Google);

    assert!(marker.is_usage_marker());
    assert_eq!(marker.text, "");
    assert_eq!(
        serde_json::to_value(&marker).expect("serialize")["usage"],
        json!({ "input_tokens": 3, "output_tokens": 3, "total_tokens": 6 })
    );
}
