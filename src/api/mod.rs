use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::internal::models::{QUOTE_ID, Quote, Video};

const QUOTE_API_URL: &str = "https://api.quotable.io/random";
const VIDEO_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Upper bound on video search results per query.
const VIDEO_RESULT_CAP: usize = 5;

/// Credential value shipped in the sample config; treated the same as no
/// credential at all.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Served whenever the quote provider cannot be reached or answers garbage.
pub static FALLBACK_QUOTE: Lazy<Quote> = Lazy::new(|| Quote {
    id: QUOTE_ID.to_string(),
    text: "The journey of a thousand miles begins with a single step.".to_string(),
    author: "Lao Tzu".to_string(),
});

/// Served when no video credential is configured, so the app is browsable
/// out of the box.
pub static MOCK_VIDEOS: Lazy<Vec<Video>> = Lazy::new(|| {
    vec![
        Video {
            video_id: "inpok4MKVLM".to_string(),
            title: "5-Minute Meditation You Can Do Anywhere".to_string(),
            channel_title: "Goodful".to_string(),
        },
        Video {
            video_id: "v7AYKMP6rOE".to_string(),
            title: "Yoga For Complete Beginners".to_string(),
            channel_title: "Yoga With Adriene".to_string(),
        },
    ]
});

/// Served when a real video search fails. Slightly richer than the mock list
/// so a transient outage still leaves the region populated.
pub static FALLBACK_VIDEOS: Lazy<Vec<Video>> = Lazy::new(|| {
    vec![
        Video {
            video_id: "ZToicYcHIOU".to_string(),
            title: "Daily Calm | 10 Minute Mindfulness Meditation".to_string(),
            channel_title: "Calm".to_string(),
        },
        Video {
            video_id: "COp7BR_Dvps".to_string(),
            title: "10 Minute Morning Yoga Full Body Stretch".to_string(),
            channel_title: "MadFit".to_string(),
        },
        Video {
            video_id: "F28MGLlpP90".to_string(),
            title: "Breathing Exercises To Relax In 10 Minutes Or Less".to_string(),
            channel_title: "TED-Ed".to_string(),
        },
    ]
});

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    content: String,
    author: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSnippet {
    title: String,
    channel_title: String,
}

/// HTTP gateway for the two remote providers (quote and video search).
///
/// Every public fetch degrades instead of failing: the caller always gets a
/// usable value and the underlying fault is logged here. This keeps error
/// substitution in one place instead of sprinkling it over the call sites.
#[derive(Clone)]
pub struct ApiService {
    client: Client,
    api_key: String,
    quote_url: String,
    video_base_url: String,
}

impl ApiService {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoints(api_key, QUOTE_API_URL, VIDEO_API_BASE_URL)
    }

    /// Construct against explicit endpoints. Tests point this at a local mock
    /// server.
    pub fn with_endpoints(
        api_key: impl Into<String>,
        quote_url: impl Into<String>,
        video_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            quote_url: quote_url.into(),
            video_base_url: video_base_url.into(),
        }
    }

    fn has_credential(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    /// GET `url` and deserialize the JSON body into `T`. Non-2xx statuses are
    /// errors here, not parse failures later.
    async fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = self
            .client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("failed to send GET request to {url}"))?
            .error_for_status()
            .with_context(|| format!("request to {url} returned an error status"))?;

        resp.json::<T>()
            .await
            .with_context(|| format!("failed to parse JSON response from {url}"))
    }

    /// Fetch the daily quote. Any transport, status, or parse fault yields
    /// the fixed fallback quote.
    pub async fn fetch_quote(&self) -> Quote {
        match self.try_fetch_quote().await {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "quote fetch failed, serving fallback");
                FALLBACK_QUOTE.clone()
            }
        }
    }

    async fn try_fetch_quote(&self) -> Result<Quote> {
        let body: QuoteResponse = self.get_json(&self.quote_url).await?;
        Ok(Quote {
            id: QUOTE_ID.to_string(),
            text: body.content,
            author: body.author,
        })
    }

    /// Search for short, embeddable, reusable-license videos matching `query`.
    ///
    /// Without a usable credential this short-circuits to the mock list and
    /// never touches the network. With one, any fault yields the fallback
    /// list; callers never need their own substitution.
    pub async fn fetch_videos(&self, query: &str) -> Vec<Video> {
        if !self.has_credential() {
            tracing::info!("no video API credential configured, serving mock results");
            return MOCK_VIDEOS.clone();
        }

        match self.try_fetch_videos(query).await {
            Ok(videos) => videos,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), query, "video search failed, serving fallback list");
                FALLBACK_VIDEOS.clone()
            }
        }
    }

    async fn try_fetch_videos(&self, query: &str) -> Result<Vec<Video>> {
        let url = format!("{}search", self.video_base_url);
        let cap = VIDEO_RESULT_CAP.to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", cap.as_str()),
                ("videoDuration", "short"),
                ("videoEmbeddable", "true"),
                ("videoLicense", "creativeCommon"),
                ("q", query),
                ("key", self.api_key.as_str()),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("failed to send video search for {query:?}"))?
            .error_for_status()
            .context("video search returned an error status")?;

        let body: SearchResponse = resp
            .json()
            .await
            .context("failed to parse video search response")?;

        // Entries without a video id (channels, deleted items) are dropped
        // while flattening the provider's nested shape.
        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(Video {
                    video_id,
                    title: item.snippet.title,
                    channel_title: item.snippet.channel_title,
                })
            })
            .take(VIDEO_RESULT_CAP)
            .collect())
    }
}
