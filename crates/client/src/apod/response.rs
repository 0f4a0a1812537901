//! APOD API response types and normalization.

use apod_core::{MediaDescriptor, MediaKind};
use serde::Deserialize;

/// Raw response from `GET /planetary/apod` for a single date.
#[derive(Debug, Deserialize)]
pub struct ApodApiResponse {
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    pub media_type: MediaKind,
    /// Standard-resolution media URL (the video embed URL for videos).
    #[serde(default)]
    pub url: Option<String>,
    /// High-resolution image URL; absent on videos and some images.
    #[serde(default)]
    pub hdurl: Option<String>,
    /// Present on videos when requested with `thumbs=true`.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl From<ApodApiResponse> for MediaDescriptor {
    /// Images prefer `hdurl` and fall back to `url`; video embed URLs are
    /// never used as image URLs. Scheme-relative URLs are passed through and
    /// resolved by the fetch client.
    fn from(raw: ApodApiResponse) -> Self {
        let image_url = match raw.media_type {
            MediaKind::Image => raw.hdurl.or(raw.url).unwrap_or_default(),
            MediaKind::Video | MediaKind::Other => String::new(),
        };

        MediaDescriptor {
            title: raw.title,
            explanation: raw.explanation,
            media_kind: raw.media_type,
            image_url: image_url.trim().to_string(),
            thumbnail_url: raw.thumbnail_url.unwrap_or_default().trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_FIXTURE: &str = r#"{
        "date": "2022-05-01",
        "explanation": "Is this galaxy inside a bubble?",
        "hdurl": "https://apod.nasa.gov/apod/image/2205/NGC3521LRGBHaAPOD-20.jpg",
        "media_type": "image",
        "service_version": "v1",
        "title": "NGC 3521: Galaxy in a Bubble",
        "url": "https://apod.nasa.gov/apod/image/2205/NGC3521LRGBHaAPOD-1024.jpg"
    }"#;

    const VIDEO_FIXTURE: &str = r#"{
        "date": "2021-07-08",
        "explanation": "A launch seen from orbit.",
        "media_type": "video",
        "service_version": "v1",
        "thumbnail_url": "https://img.youtube.com/vi/mhJRzQsLZGg/0.jpg",
        "title": "Launch from Orbit",
        "url": "https://www.youtube.com/embed/mhJRzQsLZGg?rel=0"
    }"#;

    #[test]
    fn test_image_prefers_hdurl() {
        let raw: ApodApiResponse = serde_json::from_str(IMAGE_FIXTURE).unwrap();
        let descriptor: MediaDescriptor = raw.into();

        assert_eq!(descriptor.media_kind, MediaKind::Image);
        assert_eq!(descriptor.title, "NGC 3521: Galaxy in a Bubble");
        assert_eq!(
            descriptor.resolve_image_url(),
            "https://apod.nasa.gov/apod/image/2205/NGC3521LRGBHaAPOD-20.jpg"
        );
    }

    #[test]
    fn test_image_without_hdurl_falls_back_to_url() {
        let json = r#"{"date": "2022-05-02", "title": "T", "explanation": "E",
                       "media_type": "image", "url": "https://apod.nasa.gov/apod/image/x.png"}"#;
        let descriptor: MediaDescriptor = serde_json::from_str::<ApodApiResponse>(json).unwrap().into();
        assert_eq!(descriptor.image_url, "https://apod.nasa.gov/apod/image/x.png");
    }

    #[test]
    fn test_video_uses_thumbnail_not_embed() {
        let raw: ApodApiResponse = serde_json::from_str(VIDEO_FIXTURE).unwrap();
        let descriptor: MediaDescriptor = raw.into();

        assert_eq!(descriptor.media_kind, MediaKind::Video);
        assert_eq!(descriptor.image_url, "");
        assert_eq!(descriptor.resolve_image_url(), "https://img.youtube.com/vi/mhJRzQsLZGg/0.jpg");
    }

    #[test]
    fn test_video_without_thumbnail_resolves_empty() {
        let json = r#"{"date": "2021-07-09", "title": "Vimeo", "explanation": "E",
                       "media_type": "video", "url": "https://player.vimeo.com/video/1"}"#;
        let descriptor: MediaDescriptor = serde_json::from_str::<ApodApiResponse>(json).unwrap().into();
        assert_eq!(descriptor.resolve_image_url(), "");
    }

    #[test]
    fn test_scheme_relative_thumbnail_resolves_at_fetch() {
        let json = r#"{"date": "2021-07-10", "title": "V", "explanation": "E",
                       "media_type": "video", "thumbnail_url": "//img.youtube.com/vi/a/0.jpg"}"#;
        let descriptor: MediaDescriptor = serde_json::from_str::<ApodApiResponse>(json).unwrap().into();
        assert_eq!(descriptor.thumbnail_url, "//img.youtube.com/vi/a/0.jpg");

        let url = crate::fetch::parse_image_url(descriptor.resolve_image_url()).unwrap();
        assert_eq!(url.as_str(), "https://img.youtube.com/vi/a/0.jpg");
    }

    #[test]
    fn test_copyright_is_ignored() {
        let json = r#"{"date": "2022-05-03", "title": "T", "explanation": "E", "copyright": "Someone",
                       "media_type": "image", "url": "https://apod.nasa.gov/apod/image/y.jpg"}"#;
        let descriptor: MediaDescriptor = serde_json::from_str::<ApodApiResponse>(json).unwrap().into();
        assert_eq!(descriptor.image_url, "https://apod.nasa.gov/apod/image/y.jpg");
    }
}
