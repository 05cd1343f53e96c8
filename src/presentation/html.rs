use crate::presentation::state::ViewState;
use crate::utils::error::{ProxyError, Result};
use chrono::{DateTime, Utc};
use tera::{Context, Tera};

// `.html` suffix turns on Tera's autoescaping.
const TEMPLATE_NAME: &str = "headlines.html";

const HEADLINES_TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Newsdesk</title>
  <link rel="stylesheet" href="/css/styles.css">
</head>
<body>
  <header class="topbar">
    <a class="brand" href="/headlines">Newsdesk</a>
    <nav class="nav">
      {% for filter in state.nav %}
      <a href="/headlines?nav={{ loop.index0 }}"{% if state.active_nav == loop.index0 %} class="active"{% endif %}>{{ filter.label }}</a>
      {% endfor %}
    </nav>
    <form class="search" method="get" action="/headlines">
      <input type="search" name="q" placeholder="Search news" value="{{ state.query }}">
      <input type="text" name="country" maxlength="2" placeholder="us" value="{{ state.country }}">
      <button type="submit">Search</button>
    </form>
  </header>
  <main>
    <p class="status">{{ status_text }}</p>
    {% if state.page.featured %}{% set first = state.page.featured %}
    <section class="feature">
      <div class="feature-card">
        {% if first.image_url %}<img src="{{ first.image_url }}" alt="{{ first.title }}">{% endif %}
        <div class="feature-content">
          <div class="kicker">{{ first.source_name }}</div>
          <h2 class="title"><a href="{{ first.url }}" target="_blank" rel="noopener noreferrer">{{ first.title }}</a></h2>
          <div class="excerpt">{{ first.description }}</div>
          <div class="meta">{{ first.published }}</div>
        </div>
      </div>
    </section>
    {% endif %}
    <section class="grid">
      {% for card in state.page.cards %}
      <article class="card{% if card.fresh %} fresh{% endif %}">
        <div class="thumb">{% if card.image_url %}<img src="{{ card.image_url }}" alt="{{ card.title }}">{% endif %}</div>
        <div class="kicker">{{ card.source_name }}</div>
        <h3 class="title"><a href="{{ card.url }}" target="_blank" rel="noopener noreferrer">{{ card.title }}</a></h3>
        {% if card.description %}<div class="desc">{{ card.description }}</div>{% endif %}
        <div class="meta-row"><span class="source">{{ card.source_name }}</span><span>{{ card.published }}</span></div>
      </article>
      {% endfor %}
    </section>
    {% if state.empty_visible %}<p class="empty">No news found.</p>{% endif %}
  </main>
</body>
</html>
"##;

/// 伺服器端渲染的頭條頁面（不需 JavaScript）
pub struct HeadlinesRenderer {
    tera: Tera,
}

impl HeadlinesRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, HEADLINES_TEMPLATE)
            .map_err(template_error)?;
        Ok(Self { tera })
    }

    pub fn render(&self, state: &ViewState, now: DateTime<Utc>) -> Result<String> {
        let mut context = Context::new();
        context.insert("state", state);
        context.insert("status_text", &state.status_text(now));
        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(template_error)
    }
}

fn template_error(e: tera::Error) -> ProxyError {
    ProxyError::ServerError {
        message: format!("template error: {}", e),
    }
}
