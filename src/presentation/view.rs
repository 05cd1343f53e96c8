use crate::domain::model::Article;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

pub const UNTITLED: &str = "Untitled";
/// Number of grid cards flagged as freshly loaded.
pub const FRESH_CARDS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Featured {
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub source_name: String,
    pub description: String,
    pub published: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub source_name: String,
    pub description: Option<String>,
    pub published: String,
    pub fresh: bool,
}

/// 版面：第一篇為焦點，其餘為卡片
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontPage {
    pub featured: Option<Featured>,
    pub cards: Vec<Card>,
}

impl FrontPage {
    pub fn from_articles(articles: Vec<Article>) -> Self {
        let mut iter = articles.into_iter();
        let featured = iter.next().map(|first| Featured {
            title: title_or_default(&first),
            url: url_or_anchor(&first),
            source_name: first.source_name().unwrap_or_default().to_string(),
            description: first.description.clone().unwrap_or_default(),
            published: first
                .published_at
                .as_deref()
                .map(format_published)
                .unwrap_or_default(),
            image_url: non_blank(first.image_url),
        });

        let cards = iter
            .enumerate()
            .map(|(idx, article)| Card {
                title: title_or_default(&article),
                url: url_or_anchor(&article),
                source_name: article.source_name().unwrap_or_default().to_string(),
                published: article
                    .published_at
                    .as_deref()
                    .map(format_published)
                    .unwrap_or_default(),
                image_url: non_blank(article.image_url),
                description: non_blank(article.description),
                fresh: idx < FRESH_CARDS,
            })
            .collect();

        Self { featured, cards }
    }

    pub fn is_empty(&self) -> bool {
        self.featured.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn title_or_default(article: &Article) -> String {
    article
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(UNTITLED)
        .to_string()
}

fn url_or_anchor(article: &Article) -> String {
    article
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or("#")
        .to_string()
}

/// `<n>s` / `<n>m` / `<n>h`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else {
        format!("{}h", secs / 3600)
    }
}

/// RFC 3339 → `YYYY-MM-DD HH:MM UTC`; anything else is shown as received.
pub fn format_published(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}
