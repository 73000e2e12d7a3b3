use anyhow::{Result, anyhow};
use log::{warn, info, debug};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::FingerprintError;
use crate::file_utils::FileManager;
use crate::movie_hash::MovieHash;
use crate::opensubtitles::models::{SearchParams, Subtitle};
use crate::opensubtitles::SubtitleCatalog;
use crate::ranking::rank_subtitles;
use crate::selection::Selector;

// @module: Application controller driving search, selection and download

/// Main application controller for subtitle fetching
///
/// Processes videos strictly one at a time in input order: search, filter,
/// rank and select for every video first, then drive a single
/// authenticated catalog session that downloads all selections. The
/// session is torn down unconditionally once opened, even when a download
/// fails mid-batch.
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the main workflow over the given video files
    pub async fn run<C, R>(
        &self,
        catalog: &mut C,
        selector: &mut Selector<R>,
        videos: &[PathBuf],
    ) -> Result<()>
    where
        C: SubtitleCatalog,
        R: BufRead,
    {
        if videos.is_empty() {
            return Err(anyhow!("At least one video path must be provided"));
        }

        // Phase 1: search and interactive selection, one video at a time.
        let mut selected: Vec<(PathBuf, Vec<Subtitle>)> = Vec::new();
        for video in videos {
            let candidates = self.search_video(catalog, video).await?;

            // Authoritative client-side filter; the search request already
            // asks the catalog to exclude these.
            let candidates: Vec<Subtitle> = candidates
                .into_iter()
                .filter(|subtitle| {
                    !subtitle.attributes.is_ai_translated()
                        && !subtitle.attributes.is_machine_translated()
                })
                .collect();

            let ranked = rank_subtitles(candidates, &self.config.languages);
            let chosen = selector.select(&ranked, video)?;

            if chosen.is_empty() {
                info!("Skipping {:?}", video);
            }
            selected.push((video.clone(), chosen));
        }

        // Phase 2: one authenticated session for all downloads.
        let login = catalog
            .login(&self.config.username, &self.config.password)
            .await?;
        info!(
            "Logged in user {} (level {}); status: {}",
            login.user.user_id, login.user.level, login.status
        );
        if let Some(host) = &login.base_url {
            info!("Catalog redirected session to {}", host);
        }

        let download_result = self.download_all(catalog, &selected).await;

        // Teardown runs regardless of how the batch went.
        let logout_result = catalog.logout().await;

        download_result?;
        let logout = logout_result?;
        debug!("Logged out: {}", logout.message);

        Ok(())
    }

    /// Search the catalog for one video, by content hash and file name
    ///
    /// A file too small to hash degrades to a name-only search instead of
    /// failing the video.
    async fn search_video<C: SubtitleCatalog>(
        &self,
        catalog: &C,
        video: &Path,
    ) -> Result<Vec<Subtitle>> {
        let file_name = video
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| video.to_string_lossy().to_string());

        let mut params = SearchParams::new()
            .query(&file_name)
            .languages(&self.config.languages);

        match MovieHash::from_path(video) {
            Ok(hash) => params = params.moviehash(hash.to_string()),
            Err(FingerprintError::TooSmall { size }) => {
                warn!(
                    "{} is too small to hash ({} bytes), searching by name only",
                    file_name, size
                );
            }
            Err(error) => return Err(error.into()),
        }

        debug!("Searching subtitles for {}", file_name);
        let subtitles = catalog.search(params).await?;
        info!("Found {} candidate(s) for {}", subtitles.len(), file_name);

        Ok(subtitles)
    }

    /// Download every selected subtitle, in selection order
    async fn download_all<C: SubtitleCatalog>(
        &self,
        catalog: &C,
        selected: &[(PathBuf, Vec<Subtitle>)],
    ) -> Result<()> {
        let total: u64 = selected.iter().map(|(_, chosen)| chosen.len() as u64).sum();
        if total == 0 {
            info!("Nothing selected, nothing to download");
            return Ok(());
        }

        let progress = ProgressBar::new(total);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(template_result.progress_chars("█▓▒░"));
        progress.set_message("Downloading");

        for (video, chosen) in selected {
            // Single selection keeps the plain `.srt` name; multiple
            // selections get a counter and language code each.
            let numbered = chosen.len() > 1;

            for (index, subtitle) in chosen.iter().enumerate() {
                let file = subtitle.primary_file().ok_or_else(|| {
                    anyhow!("Subtitle record {} has no downloadable file", subtitle.id)
                })?;

                info!("Downloading {} {}", file.file_id, file.file_name);
                let grant = catalog.get_download_link(file.file_id).await?;

                let dest = if numbered {
                    FileManager::numbered_subtitle_output_path(
                        video,
                        index + 1,
                        &subtitle.attributes.language,
                    )
                } else {
                    FileManager::subtitle_output_path(video)
                };

                let written = catalog.download_to(&grant.link, &dest).await?;
                debug!(
                    "Wrote {} bytes to {:?}; {} download(s) remaining in quota",
                    written, dest, grant.remaining
                );
                progress.inc(1);
            }
        }

        progress.finish_and_clear();
        info!("Downloaded {} subtitle file(s)", total);

        Ok(())
    }
}
