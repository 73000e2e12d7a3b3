/*!
 * OpenSubtitles REST API integration.
 *
 * This module contains the session client for the subtitle catalog:
 * - `client`: authenticated HTTP client with pagination and host switching
 * - `models`: request and response models for the wire protocol
 */

use std::path::Path;

use async_trait::async_trait;

use crate::errors::{ApiError, AppError};

pub mod client;
pub mod models;

pub use client::OpenSubtitlesClient;
pub use models::{
    DownloadResponse, LoginResponse, LogoutResponse, SearchParams, Subtitle,
};

/// Operations the orchestrator needs from the subtitle catalog
///
/// Implemented by [`OpenSubtitlesClient`]; tests substitute a mock to drive
/// the orchestrator without a network. At most one session is held at a
/// time: `login` populates it, `logout` clears it, and every implementation
/// must tolerate the orchestrator calling `logout` exactly once per
/// successful login regardless of how the download batch ended.
#[async_trait]
pub trait SubtitleCatalog {
    /// Authenticate and store the session token
    async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Search the catalog, transparently fetching all result pages
    async fn search(&self, params: SearchParams) -> Result<Vec<Subtitle>, ApiError>;

    /// Exchange a file identifier for a download grant, consuming one quota unit
    async fn get_download_link(&self, file_id: u64) -> Result<DownloadResponse, ApiError>;

    /// Invalidate the session remotely and clear the local token
    async fn logout(&mut self) -> Result<LogoutResponse, ApiError>;

    /// Stream a granted URL to disk, returning the number of bytes written
    async fn download_to(&self, url: &str, dest: &Path) -> Result<u64, AppError>;
}
