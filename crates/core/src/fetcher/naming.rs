//! File naming and URL classification for retained assets.

/// Extensions kept as-is when saving a download.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "png", "jpeg"];

/// Extension used when the source one is not allowed.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Extensions treated as animated content.
pub const ANIMATED_EXTENSIONS: &[&str] = &["gif", "gifv"];

/// Lowercased extension of a URL's last path segment, query and fragment stripped.
pub fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Extension to save a download under, coerced into the allow-list.
pub fn destination_extension(url: &str) -> &'static str {
    url_extension(url)
        .and_then(|ext| ALLOWED_EXTENSIONS.iter().find(|a| **a == ext).copied())
        .unwrap_or(DEFAULT_EXTENSION)
}

/// Whether the URL points at an animated format.
pub fn is_animated(url: &str) -> bool {
    url_extension(url).is_some_and(|ext| ANIMATED_EXTENSIONS.contains(&ext.as_str()))
}

/// File name for a slot, e.g. `meme_007.jpg`.
pub fn slot_file_name(slot: u32, extension: &str) -> String {
    format!("meme_{:03}.{}", slot, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_extension() {
        assert_eq!(url_extension("https://i.redd.it/a.JPG").as_deref(), Some("jpg"));
        assert_eq!(
            url_extension("https://i.redd.it/a.png?width=640&s=x").as_deref(),
            Some("png")
        );
        assert_eq!(url_extension("https://example.com/v1.2/noext"), None);
        assert_eq!(url_extension("https://example.com/.hidden"), None);
    }

    #[test]
    fn test_destination_extension_keeps_allowed() {
        assert_eq!(destination_extension("https://x/a.jpeg"), "jpeg");
        assert_eq!(destination_extension("https://x/a.PNG?x=1"), "png");
    }

    #[test]
    fn test_destination_extension_coerces_unknown() {
        assert_eq!(destination_extension("https://x/a.webp"), DEFAULT_EXTENSION);
        assert_eq!(destination_extension("https://x/a"), DEFAULT_EXTENSION);
    }

    #[test]
    fn test_is_animated() {
        assert!(is_animated("https://i.redd.it/dance.gif"));
        assert!(is_animated("https://i.imgur.com/dance.GIFV?1"));
        assert!(!is_animated("https://i.redd.it/still.png"));
        assert!(!is_animated("https://i.redd.it/gif"));
    }

    #[test]
    fn test_slot_file_name_padding() {
        assert_eq!(slot_file_name(7, "jpg"), "meme_007.jpg");
        assert_eq!(slot_file_name(1234, "png"), "meme_1234.png");
    }
}
