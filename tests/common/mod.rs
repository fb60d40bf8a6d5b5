use telesocial::TelesocialClient;

#[allow(dead_code)]
pub const TEST_APP_KEY: &str = "test-app-key";

/// Set up a client pointed at a mock server.
#[allow(dead_code)]
pub fn setup_test_client(server_url: &str) -> TelesocialClient {
    TelesocialClient::builder()
        .app_key(TEST_APP_KEY)
        .host(server_url)
        .build()
        .unwrap()
}

/// A unique scratch-file path under the system temp directory.
#[allow(dead_code)]
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("telesocial-test-{}-{name}", std::process::id()))
}
