/// Page views rendered by askama
use crate::domain::{ImageOfDay, PhotoRecord, Rover, RoverEntry, Snapshot};
use crate::utils::s_pick;
use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub date: String,
    pub image_of_day: Option<ApodView>,
    pub rovers: Vec<RoverView>,
}

pub struct ApodView {
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail: String,
    pub is_video: bool,
}

pub struct RoverView {
    pub name: String,
    pub description: String,
    pub facts: Vec<Fact>,
    pub photos: Vec<PhotoView>,
}

pub struct Fact {
    pub label: &'static str,
    pub value: String,
}

pub struct PhotoView {
    pub img_src: String,
    pub camera: String,
    pub earth_date: String,
    pub sol: String,
}

impl IndexPage {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            date: snapshot.date.clone(),
            image_of_day: snapshot.image_of_day.as_ref().map(ApodView::from),
            rovers: snapshot.rover_entries.iter().map(RoverView::from).collect(),
        }
    }
}

impl From<&ImageOfDay> for ApodView {
    fn from(apod: &ImageOfDay) -> Self {
        Self {
            title: apod.title.clone(),
            description: apod.description.clone(),
            url: apod.image_url.clone(),
            thumbnail: apod.thumbnail_url.clone().unwrap_or_default(),
            is_video: apod.is_video(),
        }
    }
}

impl From<&RoverEntry> for RoverView {
    fn from(entry: &RoverEntry) -> Self {
        let (name, description) = match Rover::from_name(&entry.name) {
            Some(rover) => (rover.display_name().to_string(), rover.description()),
            None => (entry.name.clone(), ""),
        };

        let mut facts = Vec::new();
        if let Some(status) = entry.status() {
            facts.push(Fact {
                label: "Status",
                value: status.to_string(),
            });
        }
        if let Some(m) = &entry.manifest {
            for (label, value) in [
                ("Launched", m.launch_date.clone()),
                ("Landed", m.landing_date.clone()),
                ("Last sol", m.max_sol.to_string()),
                ("Last photo", m.max_date.clone()),
                ("Total photos", m.total_photos.to_string()),
            ] {
                if !value.is_empty() {
                    facts.push(Fact { label, value });
                }
            }
        }

        Self {
            name,
            description: description.to_string(),
            facts,
            photos: entry.photos.iter().filter_map(PhotoView::from_record).collect(),
        }
    }
}

impl PhotoView {
    fn from_record(photo: &PhotoRecord) -> Option<Self> {
        Some(Self {
            img_src: s_pick(photo, &["/img_src"])?,
            camera: s_pick(photo, &["/camera/full_name", "/camera/name"]).unwrap_or_default(),
            earth_date: s_pick(photo, &["/earth_date"]).unwrap_or_default(),
            sol: s_pick(photo, &["/sol"]).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoverManifest;
    use serde_json::json;

    fn snapshot() -> Snapshot {
        let mut curiosity = RoverEntry::new("curiosity");
        curiosity.photos = vec![
            json!({
                "id": 1,
                "sol": 4102,
                "img_src": "https://mars.nasa.gov/msl/1.jpg",
                "earth_date": "2024-02-19",
                "camera": {"name": "MAST", "full_name": "Mast Camera"},
                "rover": {"status": "active", "max_sol": 4102}
            }),
            json!({"id": 2, "sol": 4102}),
        ];
        curiosity.manifest = Some(RoverManifest {
            name: "Curiosity".to_string(),
            landing_date: "2012-08-06".to_string(),
            launch_date: "2011-11-26".to_string(),
            status: "active".to_string(),
            max_sol: 4102,
            max_date: "2024-02-19".to_string(),
            total_photos: 695_670,
        });
        Snapshot {
            date: "Mon Oct 19 2026".to_string(),
            rover_entries: vec![curiosity, RoverEntry::new("sojourner")],
            image_of_day: Some(ImageOfDay {
                image_url: "https://www.youtube.com/embed/xyz".to_string(),
                title: "Eclipse Timelapse".to_string(),
                description: "The Moon passes.".to_string(),
                media_type: "video".to_string(),
                thumbnail_url: Some("https://img.youtube.com/vi/xyz/0.jpg".to_string()),
            }),
        }
    }

    #[test]
    fn test_photos_without_image_are_skipped() {
        let page = IndexPage::from_snapshot(&snapshot());
        let curiosity = &page.rovers[0];
        assert_eq!(curiosity.name, "Curiosity");
        assert_eq!(curiosity.photos.len(), 1);
        assert_eq!(curiosity.photos[0].camera, "Mast Camera");
        assert_eq!(curiosity.photos[0].sol, "4102");
    }

    #[test]
    fn test_manifest_facts() {
        let page = IndexPage::from_snapshot(&snapshot());
        let labels: Vec<&str> = page.rovers[0].facts.iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            ["Status", "Launched", "Landed", "Last sol", "Last photo", "Total photos"]
        );
    }

    #[test]
    fn test_unknown_rover_keeps_raw_name() {
        let page = IndexPage::from_snapshot(&snapshot());
        assert_eq!(page.rovers[1].name, "sojourner");
        assert!(page.rovers[1].description.is_empty());
        assert!(page.rovers[1].facts.is_empty());
    }

    #[test]
    fn test_render_video_and_rovers() {
        let html = IndexPage::from_snapshot(&snapshot()).render().unwrap();
        assert!(html.contains("Eclipse Timelapse"));
        assert!(html.contains("<iframe"));
        assert!(html.contains("Mast Camera"));
        assert!(html.contains("Gale Crater"));
        assert!(html.contains("Mon Oct 19 2026"));
    }

    #[test]
    fn test_render_empty_snapshot() {
        let html = IndexPage::from_snapshot(&Snapshot::default()).render().unwrap();
        assert!(html.contains("No picture of the day yet"));
        assert!(!html.contains("<iframe"));
    }
}
