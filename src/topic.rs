//! Help topics and navigation pages

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Help domain that parameterizes the chat system instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Topic {
    Chat,
    Word,
    Excel,
    PowerPoint,
    Outlook,
    OneDrive,
    Teams,
}

/// Fixed reference card shown above the chat for some topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickGuide {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

const ONEDRIVE_GUIDE: QuickGuide = QuickGuide {
    title: "OneDrive Quick Guide",
    items: &[
        "**Find**: Click the OneDrive cloud icon or visit onedrive.live.com",
        "**Save**: File → Save As → OneDrive or drag into your OneDrive folder",
        "**Access**: Use the web or mobile app",
        "**Share**: Right-click → Share and set permissions",
        "**Restore**: Right-click → Version history to roll back",
    ],
};

const TEAMS_GUIDE: QuickGuide = QuickGuide {
    title: "Teams Quick Guide",
    items: &[
        "**Open**: Launch Teams or go to teams.microsoft.com",
        "**Join**: Use “Join or create a team”",
        "**Chat**: Chat tab → New chat",
        "**Meet**: Click the camera icon for calls",
        "**Files**: Files tab in a channel → Upload",
        "**Schedule**: Calendar → New meeting",
    ],
};

impl Topic {
    pub const ALL: [Topic; 7] = [
        Topic::Chat,
        Topic::Word,
        Topic::Excel,
        Topic::PowerPoint,
        Topic::Outlook,
        Topic::OneDrive,
        Topic::Teams,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Topic::Chat => "Chat",
            Topic::Word => "Word",
            Topic::Excel => "Excel",
            Topic::PowerPoint => "PowerPoint",
            Topic::Outlook => "Outlook",
            Topic::OneDrive => "OneDrive",
            Topic::Teams => "Teams",
        }
    }

    pub fn quick_guide(self) -> Option<&'static QuickGuide> {
        match self {
            Topic::OneDrive => Some(&ONEDRIVE_GUIDE),
            Topic::Teams => Some(&TEAMS_GUIDE),
            _ => None,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown topic: {0}")]
pub struct UnknownTopic(String);

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}

impl TryFrom<String> for Topic {
    type Error = UnknownTopic;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Navigation entry: the single-shot search page or a chat topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Search,
    Topic(Topic),
}

impl Page {
    /// Navigation entries in display order, search first
    pub fn all() -> Vec<Page> {
        std::iter::once(Page::Search)
            .chain(Topic::ALL.into_iter().map(Page::Topic))
            .collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            Page::Search => "Search",
            Page::Topic(topic) => topic.name(),
        }
    }
}
