/// Last-known episode metadata for the podcast surface.
///
/// `artwork_fetched` records whether the host-side artwork fetch has already
/// been requested for the current `artwork_url`.  It resets iff the URL
/// changes to a new non-null value; unrelated fields never touch it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataCache {
    pub episode_name: Option<String>,
    pub podcast_name: Option<String>,
    pub artwork_url: Option<String>,
    pub artwork_fetched: bool,
}

impl MetadataCache {
    /// Merge a metadata command into the cache.  Absent fields keep their
    /// previous values.
    pub fn apply(
        &mut self,
        episode_name: Option<String>,
        podcast_name: Option<String>,
        artwork_url: Option<String>,
    ) {
        if episode_name.is_some() {
            self.episode_name = episode_name;
        }
        if podcast_name.is_some() {
            self.podcast_name = podcast_name;
        }
        if let Some(url) = artwork_url {
            if self.artwork_url.as_deref() != Some(url.as_str()) {
                self.artwork_fetched = false;
            }
            self.artwork_url = Some(url);
        }
    }

    /// Mark the current artwork URL as requested.
    pub fn mark_artwork_fetched(&mut self) {
        self.artwork_fetched = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
