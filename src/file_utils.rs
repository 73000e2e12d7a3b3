use anyhow::{Result, Context};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and path utilities

/// Video file extensions the walker picks up
const VIDEO_EXTENSIONS: [&str; 9] = [
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "mpg",
];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Whether a path looks like a video file, by extension
    pub fn is_video_file<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        if !path.is_file() {
            return false;
        }

        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                VIDEO_EXTENSIONS.contains(&ext.as_str())
            }
            None => false,
        }
    }

    /// Find all video files under a directory, recursively
    pub fn find_video_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if Self::is_video_file(path) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Expand CLI path arguments into a flat ordered list of video files
    ///
    /// A file argument is taken as-is (even with an unknown extension, the
    /// user named it deliberately); a directory argument is walked for
    /// video files. Globs are the shell's job and arrive pre-expanded.
    pub fn expand_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut videos = Vec::new();

        for path in paths {
            if path.is_dir() {
                videos.extend(Self::find_video_files(path)?);
            } else if path.is_file() {
                videos.push(path.clone());
            } else {
                return Err(anyhow::anyhow!("Input path does not exist: {:?}", path));
            }
        }

        Ok(videos)
    }

    /// Output path for the only selected subtitle of a video: the video
    /// path with its extension replaced by `.srt`
    pub fn subtitle_output_path<P: AsRef<Path>>(video: P) -> PathBuf {
        video.as_ref().with_extension("srt")
    }

    /// Output path for one of several selected subtitles:
    /// `<stem>.<counter>.<language>.srt` next to the video, counter
    /// incrementing in selection order starting at 1
    pub fn numbered_subtitle_output_path<P: AsRef<Path>>(
        video: P,
        counter: usize,
        language: &str,
    ) -> PathBuf {
        let video = video.as_ref();
        let stem = video.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = format!("{}.{}.{}.srt", stem, counter, language);

        match video.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}
