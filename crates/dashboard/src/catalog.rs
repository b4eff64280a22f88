use foundation::{Region, RegionCode};

/// Message shown in place of the region selector when the catalog fetch fails.
pub const CATALOG_ERROR_MESSAGE: &str = "Error loading prefectures";

/// Region catalog lifecycle. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RegionCatalog {
    #[default]
    NotLoaded,
    Loaded(Vec<Region>),
    /// Holds the underlying error text for logs; the view shows
    /// [`CATALOG_ERROR_MESSAGE`].
    Failed(String),
}

impl RegionCatalog {
    pub fn is_loaded(&self) -> bool {
        matches!(self, RegionCatalog::Loaded(_))
    }

    pub fn regions(&self) -> &[Region] {
        match self {
            RegionCatalog::Loaded(regions) => regions,
            _ => &[],
        }
    }

    pub fn find(&self, code: RegionCode) -> Option<&Region> {
        self.regions().iter().find(|r| r.code == code)
    }

    /// Text for the selector area: `None` unless the load failed.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            RegionCatalog::Failed(_) => Some(CATALOG_ERROR_MESSAGE),
            _ => None,
        }
    }
}
