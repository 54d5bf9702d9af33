//! Localized strings shown by the block.

/// Every user-facing string the block needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKey {
    /// Block title
    PluginName,
    LoginRequired,
    NoRecommendations,
    /// Heading of the mobile list
    RecommendedCourses,
}

/// Source of localized strings, normally the host's language pack.
pub trait StringProvider: Send + Sync {
    fn get(&self, key: StringKey) -> String;
}

/// Built-in English strings
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishStrings;

impl StringProvider for EnglishStrings {
    fn get(&self, key: StringKey) -> String {
        match key {
            StringKey::PluginName => "Course recommendations",
            StringKey::LoginRequired => "Please log in to see course recommendations.",
            StringKey::NoRecommendations => {
                "No course recommendations yet. Enrol in a course to get suggestions."
            }
            StringKey::RecommendedCourses => "Recommended courses",
        }
        .to_string()
    }
}
