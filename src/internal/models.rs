use jiff::Zoned;
use serde::{Deserialize, Serialize};

/// Stable identifier for the daily quote. The quote itself changes per fetch
/// but its favorite entry is always keyed by this id, so saving today's quote
/// replaces any previously saved one.
pub const QUOTE_ID: &str = "quote-of-the-day";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
}

impl Video {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// A user-saved item. Each variant carries the display fields its view needs,
/// plus the time it was saved. The favorites collection holds at most one
/// entry per id regardless of variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FavoriteEntry {
    Quote {
        id: String,
        text: String,
        author: String,
        saved_at: Zoned,
    },
    Tip {
        id: String,
        title: String,
        category: String,
        saved_at: Zoned,
    },
    Video {
        id: String,
        title: String,
        channel_title: String,
        saved_at: Zoned,
    },
}

impl FavoriteEntry {
    pub fn from_quote(quote: &Quote) -> Self {
        Self::Quote {
            id: quote.id.clone(),
            text: quote.text.clone(),
            author: quote.author.clone(),
            saved_at: Zoned::now(),
        }
    }

    pub fn from_tip(tip: &Tip) -> Self {
        Self::Tip {
            id: tip.id.clone(),
            title: tip.title.clone(),
            category: tip.category.clone(),
            saved_at: Zoned::now(),
        }
    }

    pub fn from_video(video: &Video) -> Self {
        Self::Video {
            id: video.video_id.clone(),
            title: video.title.clone(),
            channel_title: video.channel_title.clone(),
            saved_at: Zoned::now(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Quote { id, .. } | Self::Tip { id, .. } | Self::Video { id, .. } => id,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video { .. })
    }

    /// Watch URL for video entries; other variants have nothing to open.
    pub fn watch_url(&self) -> Option<String> {
        match self {
            Self::Video { id, .. } => Some(format!("https://www.youtube.com/watch?v={id}")),
            _ => None,
        }
    }
}
