/*!
 * End-to-end controller tests with a mock catalog
 */

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

use anyhow::Result;
use subgrab::app_config::{Config, LogLevel};
use subgrab::app_controller::Controller;
use subgrab::selection::Selector;
use crate::common::mock_catalog::MockCatalog;
use crate::common::{self, file_id_for, make_subtitle, make_subtitle_full};

fn test_config() -> Config {
    Config {
        username: "user".to_string(),
        password: "secret".to_string(),
        languages: vec!["en".to_string(), "fr".to_string()],
        app_name: "subgrab tests".to_string(),
        api_key: "key".to_string(),
        log_level: LogLevel::Error,
    }
}

/// Create a video file small enough that search degrades to name-only
fn create_video(dir: &PathBuf, name: &str) -> Result<PathBuf> {
    common::create_test_file(dir, name, b"not really a video")
}

async fn run_controller(
    catalog: &mut MockCatalog,
    input: &str,
    videos: &[PathBuf],
) -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let controller = Controller::with_config(test_config())?;
    let mut selector = Selector::new(Cursor::new(input.to_string()), 80);
    controller.run(catalog, &mut selector, videos).await
}

/// Test that one selected subtitle lands next to the video with its
/// extension replaced by .srt
#[tokio::test]
async fn test_run_withSingleSelection_shouldWritePlainSrtName() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let video = create_video(&dir, "movie.mkv")?;

    let mut catalog = MockCatalog::new(vec![make_subtitle("english", "en", true, false)]);
    run_controller(&mut catalog, "q\n", &[video]).await?;

    assert!(dir.join("movie.srt").exists());

    let downloads = catalog.downloads.lock().unwrap();
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].0, file_id_for("english"));
    assert_eq!(downloads[0].1, dir.join("movie.srt"));

    Ok(())
}

/// Test that multiple selections get counter and language in their names,
/// in selection order
#[tokio::test]
async fn test_run_withTwoSelections_shouldWriteNumberedNames() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let video = create_video(&dir, "movie.mkv")?;

    // Ranked order: en before fr (preference), so 'q' is the English row
    // and 'w' the French one.
    let mut catalog = MockCatalog::new(vec![
        make_subtitle("french", "fr", false, false),
        make_subtitle("english", "en", false, false),
    ]);
    run_controller(&mut catalog, "qw\n", &[video]).await?;

    assert!(dir.join("movie.1.en.srt").exists());
    assert!(dir.join("movie.2.fr.srt").exists());
    assert!(!dir.join("movie.srt").exists());

    Ok(())
}

/// Test that videos are processed in input order with one selection each
#[tokio::test]
async fn test_run_withTwoVideos_shouldProcessInInputOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let first = create_video(&dir, "first.mkv")?;
    let second = create_video(&dir, "second.mkv")?;

    let mut catalog = MockCatalog::new(vec![make_subtitle("english", "en", false, false)]);
    run_controller(&mut catalog, "q\nq\n", &[first, second]).await?;

    assert_eq!(catalog.search_calls.load(Ordering::SeqCst), 2);
    assert!(dir.join("first.srt").exists());
    assert!(dir.join("second.srt").exists());

    Ok(())
}

/// Test that a skipped video downloads nothing but the session still
/// opens and closes cleanly
#[tokio::test]
async fn test_run_withExplicitSkip_shouldDownloadNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let video = create_video(&dir, "movie.mkv")?;

    let mut catalog = MockCatalog::new(vec![make_subtitle("english", "en", false, false)]);
    run_controller(&mut catalog, "-\n", &[video]).await?;

    assert_eq!(catalog.login_calls.load(Ordering::SeqCst), 1);
    assert_eq!(catalog.logout_calls.load(Ordering::SeqCst), 1);
    assert_eq!(catalog.download_link_calls.load(Ordering::SeqCst), 0);
    assert!(!dir.join("movie.srt").exists());

    Ok(())
}

/// Test the teardown contract: a download failure mid-batch still logs
/// out exactly once, and the error propagates
#[tokio::test]
async fn test_run_withFailingSecondDownload_shouldStillLogoutOnce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let video = create_video(&dir, "movie.mkv")?;

    let mut catalog = MockCatalog::new(vec![
        make_subtitle("english", "en", true, false),
        make_subtitle("french", "fr", false, false),
        make_subtitle("german", "de", false, false),
    ])
    .failing_download_link_on(2);

    let result = run_controller(&mut catalog, "qwe\n", &[video]).await;
    assert!(result.is_err());

    assert_eq!(catalog.login_calls.load(Ordering::SeqCst), 1);
    assert_eq!(catalog.logout_calls.load(Ordering::SeqCst), 1);
    // The second link exchange failed, so the third was never attempted.
    assert_eq!(catalog.download_link_calls.load(Ordering::SeqCst), 2);
    assert_eq!(catalog.downloads.lock().unwrap().len(), 1);

    Ok(())
}

/// Test that machine- and AI-translated records never reach the selector:
/// the first displayed row is the only clean record
#[tokio::test]
async fn test_run_withTranslatedRecords_shouldFilterThemOut() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let video = create_video(&dir, "movie.mkv")?;

    let mut catalog = MockCatalog::new(vec![
        make_subtitle_full("ai", "en", true, false, true, false),
        make_subtitle_full("machine", "en", true, false, false, true),
        make_subtitle_full("clean", "en", false, false, false, false),
    ]);

    // 'q' picks the first displayed row; with the translated records
    // filtered out that must be the clean one despite its lower rank keys.
    run_controller(&mut catalog, "q\n", &[video]).await?;

    let downloads = catalog.downloads.lock().unwrap();
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].0, file_id_for("clean"));

    Ok(())
}

/// Test that an empty video list is rejected before any session opens
#[tokio::test]
async fn test_run_withNoVideos_shouldFailWithoutSession() -> Result<()> {
    let mut catalog = MockCatalog::new(Vec::new());
    let result = run_controller(&mut catalog, "", &[]).await;

    assert!(result.is_err());
    assert_eq!(catalog.login_calls.load(Ordering::SeqCst), 0);
    assert_eq!(catalog.logout_calls.load(Ordering::SeqCst), 0);

    Ok(())
}
