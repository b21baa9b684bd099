use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Response body of the genre taxonomy endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl GenreList {
    pub fn find(&self, id: u32) -> Option<&Genre> {
        self.genres.iter().find(|g| g.id == id)
    }
}
