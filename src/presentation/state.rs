use crate::domain::model::{Article, SearchParams};
use crate::presentation::view::{format_elapsed, FrontPage};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Page size requested by the frontend.
pub const FRONTEND_PAGE_SIZE: u32 = 24;

pub const LOADING_TEXT: &str = "Loading…";
pub const ERROR_TEXT: &str = "Error loading news";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Idle,
    Loading,
    Updated,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavFilter {
    pub label: String,
    pub query: String,
}

impl NavFilter {
    pub fn new(label: &str, query: &str) -> Self {
        Self {
            label: label.to_string(),
            query: query.to_string(),
        }
    }
}

pub fn default_nav() -> Vec<NavFilter> {
    vec![
        NavFilter::new("Top", ""),
        NavFilter::new("World", "world"),
        NavFilter::new("Technology", "technology"),
        NavFilter::new("Business", "business"),
        NavFilter::new("Sports", "sports"),
        NavFilter::new("Science", "science"),
    ]
}

/// 前端畫面狀態：查詢欄位、載入狀態、焦點/卡片與導覽選取
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub query: String,
    pub country: String,
    pub status: FetchStatus,
    pub refresh_disabled: bool,
    pub empty_visible: bool,
    pub page: FrontPage,
    pub last_fetched: Option<DateTime<Utc>>,
    pub nav: Vec<NavFilter>,
    pub active_nav: Option<usize>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(default_nav())
    }
}

impl ViewState {
    pub fn new(nav: Vec<NavFilter>) -> Self {
        Self {
            query: String::new(),
            country: String::new(),
            status: FetchStatus::Idle,
            refresh_disabled: false,
            empty_visible: false,
            page: FrontPage::default(),
            last_fetched: None,
            nav,
            active_nav: None,
        }
    }

    /// 表單送出：更新欄位並開始抓取
    pub fn submit(&mut self, query: &str, country: &str) -> SearchParams {
        self.query = query.to_string();
        self.country = country.to_string();
        self.begin_fetch()
    }

    /// 導覽點選：設定預設查詢、清除國家、只標記此項為作用中
    pub fn select_nav(&mut self, index: usize) -> Option<SearchParams> {
        let query = self.nav.get(index)?.query.clone();
        self.query = query;
        self.country.clear();
        self.active_nav = Some(index);
        Some(self.begin_fetch())
    }

    pub fn begin_fetch(&mut self) -> SearchParams {
        self.status = FetchStatus::Loading;
        self.refresh_disabled = true;
        self.empty_visible = false;
        self.page = FrontPage::default();

        let q = self.query.trim();
        let country = self.country.trim();
        SearchParams {
            q: (!q.is_empty()).then(|| q.to_string()),
            country: (!country.is_empty()).then(|| country.to_string()),
            page_size: Some(FRONTEND_PAGE_SIZE.to_string()),
        }
    }

    pub fn complete_ok(&mut self, articles: Vec<Article>, now: DateTime<Utc>) {
        self.last_fetched = Some(now);
        self.refresh_disabled = false;
        self.status = FetchStatus::Updated;
        self.page = FrontPage::from_articles(articles);
        self.empty_visible = self.page.is_empty();
    }

    pub fn complete_err(&mut self) {
        self.refresh_disabled = false;
        self.status = FetchStatus::Failed;
        self.page = FrontPage::default();
        self.empty_visible = true;
    }

    /// 每秒重新計算的狀態文字
    pub fn status_text(&self, now: DateTime<Utc>) -> String {
        match (self.status, self.last_fetched) {
            (FetchStatus::Loading, _) => LOADING_TEXT.to_string(),
            (FetchStatus::Failed, _) => ERROR_TEXT.to_string(),
            (FetchStatus::Updated, Some(at)) => {
                let elapsed = (now - at).to_std().unwrap_or_default();
                format!("Updated {} ago", format_elapsed(elapsed))
            }
            _ => String::new(),
        }
    }
}
