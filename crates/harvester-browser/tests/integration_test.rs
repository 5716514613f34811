use harvester_browser::{ChromeSessionProvider, Session, SessionProvider};
use harvester_core::BrowserConfig;
use std::time::Duration;

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_session_launch_and_release() {
    let provider = ChromeSessionProvider::new(BrowserConfig::default());
    let session = provider.acquire().await.expect("launch browser session");
    provider.release(session).await;
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_navigation() {
    let provider = ChromeSessionProvider::new(BrowserConfig::default());
    let session = provider.acquire().await.expect("launch browser session");

    let result = session.navigate("https://example.com").await;
    assert!(result.is_ok(), "Navigation failed");
    assert!(session
        .wait_for_selector("h1", Duration::from_secs(10))
        .await
        .is_ok());
    assert!(session.count("h1").await.expect("count") >= 1);

    provider.release(session).await;
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_sessions_are_isolated() {
    let provider = ChromeSessionProvider::new(BrowserConfig::default());
    let first = provider.acquire().await.expect("first session");
    let second = provider.acquire().await.expect("second session");

    first.navigate("https://example.com").await.expect("navigate");
    let blank = second.content().await.expect("content");
    assert!(!blank.contains("Example Domain"));

    provider.release(first).await;
    provider.release(second).await;
}
