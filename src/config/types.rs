//! Configuration constants and the dizmo store category set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sub-key of the project configuration holding all dizmo settings.
pub const DIZMO_SETTINGS_KEY: &str = "dizmo_settings";

/// Settings a parent project may override on an embedded sub-project.
pub const OVERRIDABLE_SETTINGS: &[&str] = &["width", "height", "allow_resize", "title_editable"];

/// Override key carrying a sub-project's bundle identifier; renamed to
/// `bundle_identifier` when the override is applied.
pub const SUBPROJECT_IDENTIFIER_KEY: &str = "bundle_identifier_subproject";

/// Shape a required setting must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// A string of at least one character.
    NonEmptyString,
    /// A non-empty string naming one of the [`Category`] values.
    CategoryName,
    /// An integer.
    Integer,
    /// A list of any values.
    List,
}

/// Required settings under `dizmo_settings`, in validation order.
pub const REQUIRED_SETTINGS: &[(&str, Requirement)] = &[
    ("display_name", Requirement::NonEmptyString),
    ("bundle_name", Requirement::NonEmptyString),
    ("bundle_identifier", Requirement::NonEmptyString),
    ("width", Requirement::Integer),
    ("height", Requirement::Integer),
    ("box_inset_x", Requirement::Integer),
    ("box_inset_y", Requirement::Integer),
    ("description", Requirement::NonEmptyString),
    ("tags", Requirement::List),
    ("category", Requirement::CategoryName),
    ("min_space_version", Requirement::NonEmptyString),
    ("change_log", Requirement::NonEmptyString),
    ("api_version", Requirement::NonEmptyString),
    ("main_html", Requirement::NonEmptyString),
];

/// Optional boolean settings and the value they take when absent.
pub const BOOLEAN_SETTING_DEFAULTS: &[(&str, bool)] = &[
    ("hidden_dizmo", false),
    ("allow_resize", false),
    ("title_editable", true),
    ("force_update", false),
];

/// Optional string settings; absent means "not set".
pub const OPTIONAL_STRING_SETTINGS: &[&str] = &["elements_version", "helper_version"];

/// Sub-mappings accepted under `tree_values`.
pub const TREE_VALUE_KEYS: &[&str] = &["attributes", "private", "public"];

/// Store category of a dizmo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BooksAndReferences,
    Comics,
    Communication,
    Education,
    Entertainment,
    Finance,
    Games,
    HealthAndFitness,
    LibrariesAndDemo,
    Lifestyle,
    MediaAndVideo,
    Medical,
    MusicAndAudio,
    NewsAndMagazines,
    Personalization,
    Photography,
    Productivity,
    Shopping,
    Social,
    Sports,
    Tools,
    Transportation,
    TravelAndLocal,
    Weather,
}

impl Category {
    /// Every category, in store order.
    pub const ALL: [Category; 24] = [
        Category::BooksAndReferences,
        Category::Comics,
        Category::Communication,
        Category::Education,
        Category::Entertainment,
        Category::Finance,
        Category::Games,
        Category::HealthAndFitness,
        Category::LibrariesAndDemo,
        Category::Lifestyle,
        Category::MediaAndVideo,
        Category::Medical,
        Category::MusicAndAudio,
        Category::NewsAndMagazines,
        Category::Personalization,
        Category::Photography,
        Category::Productivity,
        Category::Shopping,
        Category::Social,
        Category::Sports,
        Category::Tools,
        Category::Transportation,
        Category::TravelAndLocal,
        Category::Weather,
    ];

    /// Parse a category from its configuration name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// The configuration (and manifest) name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::BooksAndReferences => "books_and_references",
            Category::Comics => "comics",
            Category::Communication => "communication",
            Category::Education => "education",
            Category::Entertainment => "entertainment",
            Category::Finance => "finance",
            Category::Games => "games",
            Category::HealthAndFitness => "health_and_fitness",
            Category::LibrariesAndDemo => "libraries_and_demo",
            Category::Lifestyle => "lifestyle",
            Category::MediaAndVideo => "media_and_video",
            Category::Medical => "medical",
            Category::MusicAndAudio => "music_and_audio",
            Category::NewsAndMagazines => "news_and_magazines",
            Category::Personalization => "personalization",
            Category::Photography => "photography",
            Category::Productivity => "productivity",
            Category::Shopping => "shopping",
            Category::Social => "social",
            Category::Sports => "sports",
            Category::Tools => "tools",
            Category::Transportation => "transportation",
            Category::TravelAndLocal => "travel_and_local",
            Category::Weather => "weather",
        }
    }

    /// Quoted, comma separated list of all category names for error messages.
    pub fn names_for_display() -> String {
        Self::ALL
            .iter()
            .map(|c| format!("\"{}\"", c.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
