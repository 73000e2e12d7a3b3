/*!
 * Request and response models for the OpenSubtitles REST API.
 *
 * Optional request fields are serialized by omission: a field that is unset
 * is absent from the wire payload entirely, never sent as null or an empty
 * string. The remote API treats absent and null differently, so every
 * optional field carries `skip_serializing_if`.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login request body
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    /// Account user name
    pub username: String,

    /// Account password
    pub password: String,
}

/// Successful login response
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// Alternate API host all subsequent requests must use, when present
    pub base_url: Option<String>,

    /// Bearer token for authenticated requests
    pub token: String,

    /// HTTP-like status reported in the body
    pub status: u16,

    /// Account details
    pub user: User,
}

/// Logout response
#[derive(Debug, Deserialize)]
pub struct LogoutResponse {
    /// Human-readable status message
    pub message: String,

    /// HTTP-like status reported in the body
    pub status: u16,
}

/// Account details returned by login
#[derive(Debug, Deserialize)]
pub struct User {
    /// Downloads allowed per day for this account
    pub allowed_downloads: i64,

    /// Translations allowed per day for this account
    pub allowed_translations: Option<i64>,

    /// Account rank name
    pub level: String,

    /// Numeric account identifier
    pub user_id: i64,

    /// Whether the browser extension is installed
    pub ext_installed: Option<bool>,

    /// Whether the account has VIP status
    pub vip: Option<bool>,
}

/// Query parameters for the subtitle search endpoint
///
/// Built with the builder methods below; any field left unset is omitted
/// from the query string. AI- and machine-translated results are always
/// excluded at the request level (the orchestrator filters again after
/// retrieval, which is the authoritative layer).
#[derive(Debug, Clone, Serialize)]
pub struct SearchParams {
    /// Exclusion flag for AI-translated results
    ai_translated: &'static str,

    /// Exclusion flag for machine-translated results
    machine_translated: &'static str,

    /// Season number to search for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_number: Option<u32>,

    /// Episode number to search for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<u32>,

    /// Comma-joined language codes to filter by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,

    /// Content hash of the video file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moviehash: Option<String>,

    /// Free-text query, usually the video file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Page number, starting at 1
    pub page: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            ai_translated: "exclude",
            machine_translated: "exclude",
            season_number: None,
            episode_number: None,
            languages: None,
            moviehash: None,
            query: None,
            page: 1,
        }
    }
}

impl SearchParams {
    /// Create empty search parameters (page 1, translation exclusions set)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the content hash to search by
    pub fn moviehash(mut self, hash: impl Into<String>) -> Self {
        self.moviehash = Some(hash.into());
        self
    }

    /// Set the season number
    pub fn season(mut self, season: u32) -> Self {
        self.season_number = Some(season);
        self
    }

    /// Set the episode number
    pub fn episode(mut self, episode: u32) -> Self {
        self.episode_number = Some(episode);
        self
    }

    /// Set the language filter from an ordered list of codes
    ///
    /// An empty list leaves the filter unset.
    pub fn languages(mut self, codes: &[String]) -> Self {
        if !codes.is_empty() {
            self.languages = Some(codes.join(","));
        }
        self
    }

    /// Set the page number
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// One page of search results
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Total number of pages in the result set
    pub total_pages: u32,

    /// Total number of records in the result set
    pub total_count: u64,

    /// Records per page
    pub per_page: u32,

    /// This page's number
    pub page: u32,

    /// Records on this page, in catalog order
    pub data: Vec<Subtitle>,
}

/// A subtitle record returned by the catalog
#[derive(Debug, Clone, Deserialize)]
pub struct Subtitle {
    /// Catalog identifier
    pub id: String,

    /// Record type discriminator
    #[serde(rename = "type")]
    pub kind: String,

    /// Record attributes
    pub attributes: SubtitleAttributes,
}

impl Subtitle {
    /// The first downloadable file descriptor, used for download
    pub fn primary_file(&self) -> Option<&SubtitleFile> {
        self.attributes.files.first()
    }
}

/// Attributes of a subtitle record
#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleAttributes {
    /// Catalog-internal subtitle identifier
    pub subtitle_id: String,

    /// Language code of the subtitle
    pub language: String,

    /// Lifetime download count
    pub download_count: Option<i64>,

    /// Download count since the last reset
    pub new_download_count: Option<i64>,

    /// Whether the subtitle targets hearing-impaired viewers
    pub hearing_impaired: Option<bool>,

    /// Whether the subtitle was made from an HD source
    pub hd: Option<bool>,

    /// Frames per second the subtitle was timed against
    pub fps: Option<f64>,

    /// Vote count
    pub votes: Option<i64>,

    /// Points awarded by the catalog
    pub points: Option<i64>,

    /// Average rating
    pub ratings: Option<f64>,

    /// Whether the uploader is classified as trusted by the catalog
    pub from_trusted: Option<bool>,

    /// Whether the subtitle covers foreign-language parts only
    pub foreign_parts_only: Option<bool>,

    /// Whether the subtitle was AI-translated
    pub ai_translated: Option<bool>,

    /// Whether the subtitle was machine-translated
    pub machine_translated: Option<bool>,

    /// Upload timestamp as reported by the catalog
    pub upload_date: Option<String>,

    /// Release name the subtitle matches
    pub release: Option<String>,

    /// Uploader comments
    pub comments: Option<String>,

    /// Identifier in the catalog's legacy numbering
    pub legacy_subtitle_id: Option<i64>,

    /// Uploader details
    pub uploader: Option<Uploader>,

    /// Details of the movie or episode the subtitle belongs to
    pub feature_details: Option<FeatureDetails>,

    /// Catalog page URL for this record
    pub url: String,

    /// Related catalog links
    pub related_links: Option<Vec<RelatedLink>>,

    /// Downloadable files, at least one for any usable record
    pub files: Vec<SubtitleFile>,
}

impl SubtitleAttributes {
    /// Trusted-uploader flag, absent treated as untrusted
    pub fn is_trusted(&self) -> bool {
        self.from_trusted.unwrap_or(false)
    }

    /// Hearing-impaired flag, absent treated as not impaired
    pub fn is_hearing_impaired(&self) -> bool {
        self.hearing_impaired.unwrap_or(false)
    }

    /// HD-source flag, absent treated as not HD
    pub fn is_hd(&self) -> bool {
        self.hd.unwrap_or(false)
    }

    /// AI-translated flag, absent treated as not translated
    pub fn is_ai_translated(&self) -> bool {
        self.ai_translated.unwrap_or(false)
    }

    /// Machine-translated flag, absent treated as not translated
    pub fn is_machine_translated(&self) -> bool {
        self.machine_translated.unwrap_or(false)
    }
}

/// A downloadable file belonging to a subtitle record
#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleFile {
    /// Identifier exchanged for a download link
    pub file_id: u64,

    /// Disc number for multi-CD releases
    pub cd_number: Option<i64>,

    /// Display name of the file
    pub file_name: String,
}

/// A related catalog link
#[derive(Debug, Clone, Deserialize)]
pub struct RelatedLink {
    /// Link label
    pub label: Option<String>,

    /// Link target
    pub url: Option<String>,

    /// Preview image URL
    pub img_url: Option<String>,
}

/// Uploader details on a subtitle record
#[derive(Debug, Clone, Deserialize)]
pub struct Uploader {
    /// Numeric uploader identifier
    pub uploader_id: Option<i64>,

    /// Uploader display name
    pub name: Option<String>,

    /// Uploader rank name
    pub rank: Option<String>,
}

/// Details of the feature (movie or episode) a subtitle belongs to
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureDetails {
    /// Numeric feature identifier
    pub feature_id: i64,

    /// Feature type (movie, episode, ...)
    pub feature_type: Option<String>,

    /// Release year
    pub year: Option<i64>,

    /// Feature title
    pub title: Option<String>,

    /// Movie name including year
    pub movie_name: Option<String>,

    /// IMDb identifier
    pub imdb_id: Option<i64>,

    /// TMDB identifier
    pub tmdb_id: Option<i64>,
}

/// Download request body
///
/// Only `file_id` is required; every other field is omitted from the body
/// unless explicitly set.
#[derive(Debug, Serialize)]
pub struct DownloadRequest {
    /// File identifier to exchange for a direct link
    pub file_id: u64,

    /// Requested subtitle format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_format: Option<String>,

    /// Requested output file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Source frame rate for an fps conversion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_fps: Option<f64>,

    /// Target frame rate for an fps conversion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_fps: Option<f64>,

    /// Time shift to apply, in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeshift: Option<f64>,

    /// Force the download even when quota is spent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_download: Option<bool>,
}

impl DownloadRequest {
    /// Create a download request for one file identifier
    pub fn new(file_id: u64) -> Self {
        Self {
            file_id,
            sub_format: None,
            file_name: None,
            in_fps: None,
            out_fps: None,
            timeshift: None,
            force_download: None,
        }
    }
}

/// Download grant: a short-lived direct URL plus quota accounting
#[derive(Debug, Deserialize)]
pub struct DownloadResponse {
    /// Direct URL of the subtitle file
    pub link: String,

    /// Name of the granted file
    pub file_name: String,

    /// Requests consumed in the current quota window
    pub requests: i64,

    /// Requests remaining in the current quota window
    pub remaining: i64,

    /// Human-readable quota message
    pub message: String,

    /// Quota reset time in the account's locale
    pub reset_time: String,

    /// Quota reset time as UTC
    pub reset_time_utc: DateTime<Utc>,
}
