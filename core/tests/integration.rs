//! End-to-end generation against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the core client over
//! real HTTP using ureq. Validates that request building and response parsing
//! agree with the server's independently defined schema.

use std::net::SocketAddr;

use crossword_core::{ApiError, CrosswordClient, CrosswordRequest, HttpRequest, HttpResponse, GRID_WIDTH};
use mock_server::MockConfig;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut builder = agent.get(&req.url);
    for (name, value) in &req.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let mut response = builder.call().expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Start the mock server on a random port in a background thread.
fn spawn_server(config: MockConfig) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, config).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn generate_round_trip() {
    let addr = spawn_server(MockConfig {
        api_key: Some("test_api_key".to_string()),
    });
    let client = CrosswordClient::new(&format!("http://{addr}")).with_header("x-api-key", "test_api_key");

    // Step 1: no parameters, server defaults apply.
    let req = client.build_generate(&CrosswordRequest::default()).unwrap();
    let data = client.parse_generate(execute(req)).unwrap();
    assert_eq!(data.theme, "random");
    assert_eq!(data.difficulty, "medium");
    assert_eq!(data.grid.len(), 15);
    assert!(data.grid.iter().all(|row| row.cells().len() == GRID_WIDTH));

    // Step 2: every parameter set.
    let request = CrosswordRequest {
        size: "large".to_string(),
        theme: "geography".to_string(),
        difficulty: "hard".to_string(),
    };
    let req = client.build_generate(&request).unwrap();
    let data = client.parse_generate(execute(req)).unwrap();
    assert_eq!(data.theme, "geography");
    assert_eq!(data.difficulty, "hard");
    assert_eq!(data.word_count, 7);
    assert_eq!(data.across.len() + data.down.len(), 7);

    // Step 3: clue answers agree with the letters in the grid.
    let first = &data.across[0];
    let row: String = (0..first.length as usize)
        .filter_map(|col| data.grid[0].letter(col))
        .collect();
    assert_eq!(row, first.answer);

    // Step 4: images are described.
    assert!(data.image.download_url.ends_with(".png"));
    assert_ne!(data.image.image_name, data.solution_image.image_name);
}

#[test]
fn unknown_value_passes_client_validation_but_server_rejects_it() {
    let addr = spawn_server(MockConfig::default());
    let client = CrosswordClient::new(&format!("http://{addr}"));

    let request = CrosswordRequest {
        theme: "music".to_string(),
        ..CrosswordRequest::default()
    };
    let req = client.build_generate(&request).unwrap();
    let err = client.parse_generate(execute(req)).unwrap_err();
    match err {
        ApiError::Http { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("Invalid theme: music"), "{body}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_api_key_is_rejected() {
    let addr = spawn_server(MockConfig {
        api_key: Some("test_api_key".to_string()),
    });
    let client = CrosswordClient::new(&format!("http://{addr}"));

    let req = client.build_generate(&CrosswordRequest::default()).unwrap();
    let err = client.parse_generate(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 401, .. }));
}
