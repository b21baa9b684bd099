pub const DEFAULT_POSTER_SIZE: &str = "w500";
pub const DEFAULT_BACKDROP_SIZE: &str = "w1280";

/// Builds full image URLs from the relative paths the API returns
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
}

impl ImageUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn image(&self, path: Option<&str>, size: &str) -> Option<String> {
        let path = path.map(str::trim).filter(|p| !p.is_empty())?;
        let separator = if path.starts_with('/') { "" } else { "/" };
        Some(format!("{}/{}{}{}", self.base_url, size, separator, path))
    }

    pub fn poster(&self, path: Option<&str>) -> Option<String> {
        self.image(path, DEFAULT_POSTER_SIZE)
    }

    pub fn backdrop(&self, path: Option<&str>) -> Option<String> {
        self.image(path, DEFAULT_BACKDROP_SIZE)
    }
}
