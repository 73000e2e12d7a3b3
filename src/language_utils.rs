use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for the search preference list
///
/// The catalog speaks lowercase ISO 639-1 codes, optionally carrying a
/// region suffix (`pt-br`, `zh-cn`). User input may arrive as 2-letter or
/// 3-letter codes in any case; this module validates it and normalizes it
/// to the catalog form.
/// Language code type
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
}

/// Validate that a language code (without region suffix) is a known ISO
/// 639 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized = code.trim().to_lowercase();

    if normalized.len() == 2 && Language::from_639_1(&normalized).is_some() {
        return Ok(LanguageCodeType::Part1);
    }

    if normalized.len() == 3 && Language::from_639_3(&normalized).is_some() {
        return Ok(LanguageCodeType::Part3);
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Normalize one preference entry to the lowercase 2-letter form the
/// catalog expects, keeping any region suffix
///
/// `EN` becomes `en`, `fra` becomes `fr`, `pt-BR` becomes `pt-br`. A
/// 3-letter code without a 2-letter equivalent is kept as-is.
pub fn normalize_code(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    let (primary, region) = match normalized.split_once('-') {
        Some((primary, region)) => (primary.to_string(), Some(region.to_string())),
        None => (normalized.clone(), None),
    };

    let primary = match validate_language_code(&primary)? {
        LanguageCodeType::Part1 => primary,
        LanguageCodeType::Part3 => {
            let language = Language::from_639_3(&primary)
                .ok_or_else(|| anyhow!("Invalid language code: {}", code))?;
            match language.to_639_1() {
                Some(part1) => part1.to_string(),
                None => primary,
            }
        }
    };

    Ok(match region {
        Some(region) => format!("{}-{}", primary, region),
        None => primary,
    })
}

/// Normalize an ordered preference list, preserving order
///
/// Fails on the first invalid entry so a typo surfaces before any network
/// round trip.
pub fn normalize_preference(codes: &[String]) -> Result<Vec<String>> {
    codes.iter().map(|code| normalize_code(code)).collect()
}
