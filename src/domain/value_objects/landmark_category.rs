use serde::Serialize;

/// ARIA landmark role declared by a document
///
/// Any role value outside the eight landmark roles is folded into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkCategory {
    Banner,
    Navigation,
    Main,
    Complementary,
    ContentInfo,
    Search,
    Form,
    Application,
    /// Unrecognized role value
    Other,
}

impl LandmarkCategory {
    /// Number of categories, including `Other`
    pub const COUNT: usize = 9;

    /// All categories in report order
    pub const ALL: [LandmarkCategory; Self::COUNT] = [
        LandmarkCategory::Banner,
        LandmarkCategory::Navigation,
        LandmarkCategory::Main,
        LandmarkCategory::Complementary,
        LandmarkCategory::ContentInfo,
        LandmarkCategory::Search,
        LandmarkCategory::Form,
        LandmarkCategory::Application,
        LandmarkCategory::Other,
    ];

    /// Map a raw `role` attribute value to its category
    ///
    /// Matching is exact and case-sensitive.
    pub fn from_role(value: &[u8]) -> Self {
        match value {
            b"banner" => LandmarkCategory::Banner,
            b"navigation" => LandmarkCategory::Navigation,
            b"main" => LandmarkCategory::Main,
            b"complementary" => LandmarkCategory::Complementary,
            b"contentinfo" => LandmarkCategory::ContentInfo,
            b"search" => LandmarkCategory::Search,
            b"form" => LandmarkCategory::Form,
            b"application" => LandmarkCategory::Application,
            _ => LandmarkCategory::Other,
        }
    }

    /// Whether this category selects a document for output
    pub fn is_landmark(&self) -> bool {
        !matches!(self, LandmarkCategory::Other)
    }

    /// Stable position of the category in `ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The role attribute value, or `other`
    pub fn as_str(&self) -> &'static str {
        match self {
            LandmarkCategory::Banner => "banner",
            LandmarkCategory::Navigation => "navigation",
            LandmarkCategory::Main => "main",
            LandmarkCategory::Complementary => "complementary",
            LandmarkCategory::ContentInfo => "contentinfo",
            LandmarkCategory::Search => "search",
            LandmarkCategory::Form => "form",
            LandmarkCategory::Application => "application",
            LandmarkCategory::Other => "other",
        }
    }

    /// Human readable label used in the console report
    pub fn label(&self) -> &'static str {
        match self {
            LandmarkCategory::Banner => "Banner",
            LandmarkCategory::Navigation => "Navigation",
            LandmarkCategory::Main => "Main",
            LandmarkCategory::Complementary => "Complementary",
            LandmarkCategory::ContentInfo => "ContentInfo",
            LandmarkCategory::Search => "Search",
            LandmarkCategory::Form => "Form",
            LandmarkCategory::Application => "Application",
            LandmarkCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for LandmarkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LandmarkCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LandmarkCategory::from_role(s.as_bytes()))
    }
}
