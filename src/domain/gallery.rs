use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single photo inside a gallery event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPhoto {
    pub id: String,
    pub src: String,
    pub alt: String,
}

/// A gallery event with its cover image and photo set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub cover: String,
    pub photos: Vec<GalleryPhoto>,
}

fn photos(slug: &str, title: &str, count: u32) -> Vec<GalleryPhoto> {
    (1..=count)
        .map(|n| GalleryPhoto {
            id: format!("{}-{}", slug, n),
            src: format!("/images/gallery/{}/photo-{}.jpg", slug, n),
            alt: format!("{} photo {}", title, n),
        })
        .collect()
}

fn event(slug: &str, title: &str, date: Option<NaiveDate>, photo_count: u32) -> GalleryEvent {
    GalleryEvent {
        id: slug.to_string(),
        title: title.to_string(),
        date,
        cover: format!("/images/gallery/{}/cover.jpg", slug),
        photos: photos(slug, title, photo_count),
    }
}

/// The gallery events shown on the public site.
///
/// Photo paths are generated from each event's slug so the image
/// directory layout stays predictable. The list is static; events are
/// added here when the communications team publishes a new set.
pub fn gallery_events() -> Vec<GalleryEvent> {
    vec![
        event(
            "world-statistics-day-2024",
            "World Statistics Day 2024",
            NaiveDate::from_ymd_opt(2024, 10, 20),
            8,
        ),
        event(
            "census-enumerator-training",
            "Census Enumerator Training",
            NaiveDate::from_ymd_opt(2024, 3, 4),
            12,
        ),
        event(
            "data-user-forum",
            "National Data User Forum",
            NaiveDate::from_ymd_opt(2023, 11, 16),
            6,
        ),
        event(
            "trade-release-briefing",
            "Quarterly Trade Release Briefing",
            None,
            5,
        ),
    ]
}
