//! Task categories and their scoring weights.
//!
//! The set is closed: every category carries a fixed weight multiplier and a
//! theme colour. Categories travel as stable string tags; a tag that does not
//! name a known category decodes to [`TaskCategory::Reading`], the lowest
//! weight, so that records written by newer versions still load.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display colour token handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    Blue,
    Orange,
    Green,
    Red,
    Gray,
}

impl ThemeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeColor::Blue => "blue",
            ThemeColor::Orange => "orange",
            ThemeColor::Green => "green",
            ThemeColor::Red => "red",
            ThemeColor::Gray => "gray",
        }
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a task, deciding how much each actual minute is worth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskCategory {
    /// Core professional study (x3.0).
    Professional,
    /// Extended, adjacent study (x2.0).
    Extended,
    /// Reading accumulation (x1.0). Also the fallback for unknown tags.
    #[default]
    Reading,
}

struct CategoryInfo {
    tag: &'static str,
    /// Tag written by the first release of the app; still accepted on read.
    legacy_tag: &'static str,
    display_name: &'static str,
    multiplier: f64,
    color: ThemeColor,
}

const PROFESSIONAL: CategoryInfo = CategoryInfo {
    tag: "professional",
    legacy_tag: "专业学习",
    display_name: "Professional Study",
    multiplier: 3.0,
    color: ThemeColor::Blue,
};

const EXTENDED: CategoryInfo = CategoryInfo {
    tag: "extended",
    legacy_tag: "拓展学习",
    display_name: "Extended Study",
    multiplier: 2.0,
    color: ThemeColor::Orange,
};

const READING: CategoryInfo = CategoryInfo {
    tag: "reading",
    legacy_tag: "阅读积累",
    display_name: "Reading",
    multiplier: 1.0,
    color: ThemeColor::Green,
};

impl TaskCategory {
    /// All categories, outermost progress ring first.
    pub const ALL: [TaskCategory; 3] = [
        TaskCategory::Professional,
        TaskCategory::Extended,
        TaskCategory::Reading,
    ];

    fn info(&self) -> &'static CategoryInfo {
        match self {
            TaskCategory::Professional => &PROFESSIONAL,
            TaskCategory::Extended => &EXTENDED,
            TaskCategory::Reading => &READING,
        }
    }

    /// Weight applied to every actual minute logged in this category.
    pub fn multiplier(&self) -> f64 {
        self.info().multiplier
    }

    pub fn color(&self) -> ThemeColor {
        self.info().color
    }

    pub fn display_name(&self) -> &'static str {
        self.info().display_name
    }

    /// Stable tag used when the category is stored or exchanged.
    pub fn tag(&self) -> &'static str {
        self.info().tag
    }

    /// Decode a stored tag, falling back to `Reading` for anything unknown.
    pub fn from_tag(raw: &str) -> Self {
        match Self::parse_known(raw) {
            Some(category) => category,
            None => {
                tracing::warn!(tag = raw, "unknown task category tag, falling back to reading");
                TaskCategory::Reading
            }
        }
    }

    fn parse_known(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let normalized = trimmed.to_ascii_lowercase();
        Self::ALL.into_iter().find(|category| {
            let info = category.info();
            info.tag == normalized || info.legacy_tag == trimmed
        })
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TaskCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<String> for TaskCategory {
    fn from(raw: String) -> Self {
        Self::from_tag(&raw)
    }
}

impl From<TaskCategory> for String {
    fn from(category: TaskCategory) -> Self {
        category.tag().to_string()
    }
}

/// Weight multiplier for a category.
pub fn multiplier_of(category: TaskCategory) -> f64 {
    category.multiplier()
}

/// Theme colour for a category.
pub fn color_of(category: TaskCategory) -> ThemeColor {
    category.color()
}
