/// Domain models for the application
use crate::utils::{str_at, u32_at};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A photo record exactly as the rover photo API returns it
pub type PhotoRecord = Value;

/// Mission status reported for a retired rover
pub const STATUS_COMPLETE: &str = "complete";

/// Rovers the gallery tracks, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rover {
    Curiosity,
    Spirit,
    Opportunity,
    Perseverance,
}

impl Rover {
    pub const ROSTER: [Rover; 4] = [
        Rover::Curiosity,
        Rover::Spirit,
        Rover::Opportunity,
        Rover::Perseverance,
    ];

    /// Lowercase name used in API paths and the cache file
    pub fn api_name(self) -> &'static str {
        match self {
            Rover::Curiosity => "curiosity",
            Rover::Spirit => "spirit",
            Rover::Opportunity => "opportunity",
            Rover::Perseverance => "perseverance",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Rover::Curiosity => "Curiosity",
            Rover::Spirit => "Spirit",
            Rover::Opportunity => "Opportunity",
            Rover::Perseverance => "Perseverance",
        }
    }

    // Mission summaries adapted from mars.nasa.gov and jpl.nasa.gov
    pub fn description(self) -> &'static str {
        match self {
            Rover::Curiosity => {
                "Part of the Mars Science Laboratory mission, Curiosity landed in Gale Crater \
                 in 2012 to find out whether Mars ever offered environmental conditions \
                 favorable for microbial life."
            }
            Rover::Spirit => {
                "One of two Mars Exploration Rovers launched in 2003, Spirit explored Gusev \
                 Crater and found strong evidence of past water before falling silent in 2010."
            }
            Rover::Opportunity => {
                "Spirit's twin landed at Meridiani Planum in 2004. Planned for 90 sols, it \
                 drove more than a marathon's distance and worked for almost fifteen years."
            }
            Rover::Perseverance => {
                "The Mars 2020 rover landed in Jezero Crater in 2021 to seek signs of ancient \
                 life and collect rock and soil samples for a possible return to Earth."
            }
        }
    }

    pub fn from_name(name: &str) -> Option<Rover> {
        Rover::ROSTER
            .into_iter()
            .find(|r| r.api_name().eq_ignore_ascii_case(name.trim()))
    }
}

/// The persisted cache document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "rover_objs", default)]
    pub rover_entries: Vec<RoverEntry>,
    #[serde(rename = "apod_obj", default)]
    pub image_of_day: Option<ImageOfDay>,
    #[serde(default)]
    pub date: String,
}

impl Snapshot {
    pub fn entry(&self, name: &str) -> Option<&RoverEntry> {
        self.rover_entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Append an empty entry for every roster rover the snapshot lacks
    pub fn ensure_roster(&mut self) {
        for rover in Rover::ROSTER {
            if self.entry(rover.api_name()).is_none() {
                self.rover_entries.push(RoverEntry::new(rover.api_name()));
            }
        }
    }
}

/// Cached photos and manifest for one rover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoverEntry {
    pub name: String,
    #[serde(default)]
    pub photos: Vec<PhotoRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<RoverManifest>,
}

impl RoverEntry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            photos: Vec::new(),
            manifest: None,
        }
    }

    /// Mission status from the cached photos, falling back to the manifest
    pub fn status(&self) -> Option<&str> {
        match self.photos.first() {
            Some(photo) => str_at(photo, "/rover/status"),
            None => self
                .manifest
                .as_ref()
                .map(|m| m.status.as_str())
                .filter(|s| !s.is_empty()),
        }
    }

    /// Retired rovers need historical-sol sampling; unknown status counts as active
    pub fn is_inactive(&self) -> bool {
        self.status()
            .map(|s| s.eq_ignore_ascii_case(STATUS_COMPLETE))
            .unwrap_or(false)
    }

    /// Last known max sol, from the cached photos or the manifest
    pub fn max_sol(&self) -> Option<u32> {
        self.photos
            .first()
            .and_then(|p| u32_at(p, "/rover/max_sol"))
            .or_else(|| {
                self.manifest
                    .as_ref()
                    .map(|m| m.max_sol)
                    .filter(|sol| *sol > 0)
            })
    }
}

/// Mission manifest for a rover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoverManifest {
    pub name: String,
    #[serde(default)]
    pub landing_date: String,
    #[serde(default)]
    pub launch_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub max_sol: u32,
    #[serde(default)]
    pub max_date: String,
    #[serde(default)]
    pub total_photos: u64,
}

/// Astronomy picture of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOfDay {
    #[serde(rename = "image", default)]
    pub image_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub media_type: String,
    #[serde(rename = "thumbnail", default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl ImageOfDay {
    pub fn is_video(&self) -> bool {
        self.media_type.eq_ignore_ascii_case("video")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn photo(status: &str, max_sol: u32) -> PhotoRecord {
        json!({
            "id": 1,
            "sol": 12,
            "img_src": "https://mars.nasa.gov/a.jpg",
            "rover": {"name": "Spirit", "status": status, "max_sol": max_sol}
        })
    }

    fn manifest(status: &str, max_sol: u32) -> RoverManifest {
        RoverManifest {
            name: "Opportunity".to_string(),
            landing_date: "2004-01-25".to_string(),
            launch_date: "2003-07-07".to_string(),
            status: status.to_string(),
            max_sol,
            max_date: "2018-06-11".to_string(),
            total_photos: 198_439,
        }
    }

    #[test]
    fn test_default_snapshot_is_empty_skeleton() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.date, "");
        assert!(snapshot.rover_entries.is_empty());
        assert!(snapshot.image_of_day.is_none());
    }

    #[test]
    fn test_rover_from_name_is_case_insensitive() {
        assert_eq!(Rover::from_name("Curiosity"), Some(Rover::Curiosity));
        assert_eq!(Rover::from_name(" spirit "), Some(Rover::Spirit));
        assert_eq!(Rover::from_name("sojourner"), None);
    }

    #[test]
    fn test_ensure_roster_appends_missing_in_order() {
        let mut snapshot = Snapshot {
            rover_entries: vec![RoverEntry::new("opportunity")],
            ..Default::default()
        };
        snapshot.ensure_roster();

        let names: Vec<&str> = snapshot
            .rover_entries
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["opportunity", "curiosity", "spirit", "perseverance"]);
    }

    #[test]
    fn test_unknown_status_is_active() {
        let entry = RoverEntry::new("curiosity");
        assert!(!entry.is_inactive());
        assert_eq!(entry.max_sol(), None);
    }

    #[test]
    fn test_complete_photo_status_is_inactive() {
        let mut entry = RoverEntry::new("spirit");
        entry.photos.push(photo("complete", 2208));
        assert!(entry.is_inactive());
        assert_eq!(entry.max_sol(), Some(2208));
    }

    #[test]
    fn test_photo_status_wins_over_manifest() {
        let mut entry = RoverEntry::new("curiosity");
        entry.photos.push(photo("active", 4102));
        entry.manifest = Some(manifest("complete", 5111));
        assert!(!entry.is_inactive());
        assert_eq!(entry.max_sol(), Some(4102));
    }

    #[test]
    fn test_manifest_used_without_photos() {
        let mut entry = RoverEntry::new("opportunity");
        entry.manifest = Some(manifest("complete", 5111));
        assert!(entry.is_inactive());
        assert_eq!(entry.max_sol(), Some(5111));
    }

    #[test]
    fn test_snapshot_reads_legacy_field_names() {
        let raw = r#"{
            "rover_objs": [{"name": "spirit", "photos": []}],
            "apod_obj": {"image": "https://apod.nasa.gov/x.jpg", "title": "T",
                         "description": "D", "type": "image"},
            "date": "Sun Oct 18 2026"
        }"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.date, "Sun Oct 18 2026");
        assert_eq!(snapshot.rover_entries.len(), 1);
        let apod = snapshot.image_of_day.unwrap();
        assert_eq!(apod.image_url, "https://apod.nasa.gov/x.jpg");
        assert_eq!(apod.media_type, "image");
        assert!(apod.thumbnail_url.is_none());
    }

    #[test]
    fn test_video_media_type() {
        let apod = ImageOfDay {
            image_url: "https://www.youtube.com/embed/abc".to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
            media_type: "video".to_string(),
            thumbnail_url: None,
        };
        assert!(apod.is_video());
    }
}
