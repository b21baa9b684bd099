use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

impl Video {
    pub fn is_youtube(&self) -> bool {
        self.site.eq_ignore_ascii_case("youtube")
    }

    pub fn watch_url(&self) -> Option<String> {
        if self.is_youtube() {
            Some(format!("https://www.youtube.com/watch?v={}", self.key))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VideoList {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub results: Vec<Video>,
}

impl VideoList {
    /// Best trailer to show: official YouTube trailer, then any YouTube
    /// trailer, then a YouTube teaser.
    pub fn trailer(&self) -> Option<&Video> {
        let youtube = || self.results.iter().filter(|v| v.is_youtube());
        youtube()
            .find(|v| v.video_type == "Trailer" && v.official)
            .or_else(|| youtube().find(|v| v.video_type == "Trailer"))
            .or_else(|| youtube().find(|v| v.video_type == "Teaser"))
    }
}
