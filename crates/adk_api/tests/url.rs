use adk_api::{normalize_base_url, run_url, sessions_url};

#[test]
fn url_normalization_trims_trailing_slashes_and_whitespace() {
    assert_eq!(
        normalize_base_url("  http://localhost:8080/api//  "),
        "http://localhost:8080/api"
    );
}

#[test]
fn url_normalization_uses_default_for_blank_input() {
    assert_eq!(normalize_base_url("   "), "http://localhost:8080/api");
}

#[test]
fn sessions_url_appends_app_and_user_segments() {
    let url = sessions_url("http://localhost:8080/api/", "CodePipelineAgent", "simple_user")
        .expect("sessions url");
    assert_eq!(
        url.as_str(),
        "http://localhost:8080/api/apps/CodePipelineAgent/users/simple_user/sessions"
    );
}

#[test]
fn sessions_url_percent_encodes_segments() {
    let url = sessions_url("http://localhost:8080/api", "my app", "a/b").expect("sessions url");
    assert_eq!(
        url.as_str(),
        "http://localhost:8080/api/apps/my%20app/users/a%2Fb/sessions"
    );
}

#[test]
fn run_url_works_against_bare_host() {
    let url = run_url("https://agents.example.com").expect("run url");
    assert_eq!(url.as_str(), "https://agents.example.com/run");
}
