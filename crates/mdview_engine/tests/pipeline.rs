use std::sync::Once;

use mdview_core::{FailureKind, LoadPhase, Msg, PageBody, ViewerState};
use mdview_engine::{present_page, EffectRunner, EngineSettings};
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEFAULT_TITLE: &str = "Markdown Viewer";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn new_state(location: &str) -> ViewerState {
    ViewerState::new(Url::parse(location).unwrap(), DEFAULT_TITLE)
}

async fn load(state: ViewerState, query: &str) -> ViewerState {
    EffectRunner::from_settings(EngineSettings::default())
        .dispatch(
            state,
            Msg::Navigate {
                query: query.to_string(),
            },
        )
        .await
}

#[tokio::test]
async fn base64_hello_renders_without_error() {
    init_logging();
    let state = load(new_state("http://localhost/index.html"), "?base64=SGVsbG8=").await;

    assert_eq!(state.phase(), LoadPhase::Rendered);
    assert_eq!(state.base_href(), None);
    assert_eq!(state.title(), DEFAULT_TITLE);
    match state.view().body {
        PageBody::Document { html } => assert_eq!(html, "<p>Hello</p>\n"),
        other => panic!("expected document, got {other:?}"),
    }
}

#[tokio::test]
async fn base64_heading_sets_title_unless_overridden() {
    init_logging();
    // "# Hello\n\ntext"
    let state = load(new_state("http://localhost/"), "base64=IyBIZWxsbwoKdGV4dA").await;
    assert_eq!(state.title(), "Hello");

    let state = load(state, "base64=IyBIZWxsbwoKdGV4dA&title=X").await;
    assert_eq!(state.title(), "X");
}

#[tokio::test]
async fn gbk_payload_falls_back_without_error() {
    init_logging();
    // "# 你好" encoded as GBK bytes, then base64: 23 20 C4 E3 BA C3
    let state = load(new_state("http://localhost/"), "base64=IyDE47rD").await;
    assert_eq!(state.phase(), LoadPhase::Rendered);
    assert_eq!(state.title(), "你好");
}

#[tokio::test]
async fn malformed_base64_shows_decode_error() {
    init_logging();
    let state = load(new_state("http://localhost/"), "base64=%25%25%25%25").await;
    assert_eq!(state.phase(), LoadPhase::Errored);
    assert!(state.title().starts_with("Invalid base64 payload - "));
    match state.content() {
        mdview_core::Content::Failed(failure) => assert_eq!(failure.kind, FailureKind::Decode),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn remote_document_renders_with_directory_base() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/docs/guide.md"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "## Guide\n\n![logo](img/logo.png)\n",
            "text/markdown; charset=utf-8",
        ))
        .mount(&server)
        .await;

    let location = format!("{}/viewer/index.html", server.uri());
    let state = load(new_state(&location), "url=../docs/guide.md?v=2#top").await;

    assert_eq!(state.phase(), LoadPhase::Rendered);
    assert_eq!(state.title(), "Guide");
    let expected_base = format!("{}/docs/", server.uri());
    assert_eq!(state.base_href(), Some(expected_base.as_str()));

    let page = present_page(&state.view());
    assert!(page.contains(&format!("<base href=\"{expected_base}\">")));
    assert!(page.contains("<img src=\"img/logo.png\" alt=\"logo\" />"));
}

#[tokio::test]
async fn not_found_url_is_named_in_error() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let requested = format!("{}/missing.md", server.uri());
    let state = load(new_state("http://localhost/"), &format!("url={requested}")).await;

    assert_eq!(state.phase(), LoadPhase::Errored);
    match state.view().body {
        PageBody::Error {
            message, detail, ..
        } => {
            assert!(message.contains(&requested));
            assert!(detail.contains("404"));
        }
        other => panic!("expected error, got {other:?}"),
    }
    assert!(present_page(&state.view()).contains(&requested));
}

#[tokio::test]
async fn refused_connection_is_a_fetch_error_naming_the_url() {
    init_logging();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let requested = format!("http://{addr}/doc.md");
    let state = load(new_state("http://localhost/"), &format!("url={requested}")).await;

    assert_eq!(state.phase(), LoadPhase::Errored);
    match state.content() {
        mdview_core::Content::Failed(failure) => {
            assert_eq!(failure.kind, FailureKind::Fetch);
            assert!(failure.message.contains(&requested));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn no_parameters_show_welcome_and_picker() {
    init_logging();
    let state = load(new_state("http://localhost/"), "").await;

    assert_eq!(state.phase(), LoadPhase::Rendered);
    assert_eq!(state.base_href(), None);
    let page = present_page(&state.view());
    assert!(page.contains("Markdown Viewer"));
    assert!(page.contains("Markdown 查看器"));
    assert!(page.contains("<input type=\"file\""));
    assert!(!page.contains("<base"));
}

#[tokio::test]
async fn picked_local_file_is_rendered_and_titled() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.md");
    std::fs::write(&file, "# Inside\n\nbody\n").unwrap();

    let runner = EffectRunner::from_settings(EngineSettings::default());
    let state = runner
        .dispatch(
            new_state("http://localhost/"),
            Msg::Navigate {
                query: String::new(),
            },
        )
        .await;
    let state = runner
        .dispatch(state, Msg::LocalFilePicked { path: file })
        .await;

    assert_eq!(state.phase(), LoadPhase::Rendered);
    assert_eq!(state.title(), "notes.md");
    assert_eq!(state.load_id(), 2);
}

#[tokio::test]
async fn missing_local_file_is_a_read_error() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let runner = EffectRunner::from_settings(EngineSettings::default());
    let state = runner
        .dispatch(
            new_state("http://localhost/"),
            Msg::LocalFilePicked {
                path: dir.path().join("absent.md"),
            },
        )
        .await;

    assert_eq!(state.phase(), LoadPhase::Errored);
    match state.content() {
        mdview_core::Content::Failed(failure) => {
            assert_eq!(failure.kind, FailureKind::Read);
            assert!(failure.message.contains("absent.md"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn oversized_document_is_a_render_error() {
    init_logging();
    let settings = EngineSettings {
        max_render_bytes: 3,
        ..EngineSettings::default()
    };
    let state = EffectRunner::from_settings(settings)
        .dispatch(
            new_state("http://localhost/"),
            Msg::Navigate {
                query: "base64=SGVsbG8=".to_string(),
            },
        )
        .await;
    assert_eq!(state.phase(), LoadPhase::Errored);
    assert!(state.title().starts_with("Failed to render document"));
}
