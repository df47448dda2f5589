//! Projection of directory state into page markup.
//!
//! Cards are rendered one member at a time. A member that fails to render is
//! logged and replaced by an error card; the rest of the view still renders.

use std::borrow::Borrow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use teamdir_core::Member;
use tracing::error;
use url::Url;

use crate::error::{RenderError, RenderResult};
use crate::navigation::Position;
use crate::summary::Summary;

/// Bio preview length used by list cards
pub const DEFAULT_PREVIEW_LEN: usize = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

/// Turns members into markup
pub trait CardRenderer {
    /// Card shown in the member grid or list
    fn render_card(&self, member: &Member, mode: ViewMode) -> RenderResult<String>;

    /// Body of the detail modal
    fn render_detail(&self, member: &Member, position: Option<Position>) -> RenderResult<String>;
}

/// One rendered entry of the card container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedCard {
    Card(String),
    Placeholder { markup: String, error: RenderError },
}

impl RenderedCard {
    pub fn markup(&self) -> &str {
        match self {
            Self::Card(markup) | Self::Placeholder { markup, .. } => markup,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Render every member of `view`, isolating per-member failures.
pub fn render_cards<R, M>(renderer: &R, view: &[M], mode: ViewMode) -> Vec<RenderedCard>
where
    R: CardRenderer + ?Sized,
    M: Borrow<Member>,
{
    view.iter()
        .map(|m| {
            let member = m.borrow();
            match renderer.render_card(member, mode) {
                Ok(markup) => RenderedCard::Card(markup),
                Err(err) => {
                    error!(member = %member.name, id = %member.id, error = %err, "Error creating member card");
                    RenderedCard::Placeholder {
                        markup: error_card(),
                        error: err,
                    }
                }
            }
        })
        .collect()
}

/// The stock HTML renderer for the directory page
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    preview_len: usize,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            preview_len: DEFAULT_PREVIEW_LEN,
        }
    }
}

impl HtmlRenderer {
    pub fn new(preview_len: usize) -> Self {
        Self { preview_len }
    }

    fn check(member: &Member) -> RenderResult<()> {
        if member.id.is_empty() {
            return Err(RenderError::MissingId {
                name: member.name.clone(),
            });
        }
        match Url::parse(&member.photo) {
            Ok(url) if !is_image_source(&url) => Err(RenderError::UnsafePhoto {
                id: member.id.clone(),
                photo: member.photo.clone(),
            }),
            _ => Ok(()),
        }
    }
}

/// Absolute photo URLs must be http(s) or an inline `data:image/` payload.
fn is_image_source(url: &Url) -> bool {
    match url.scheme() {
        "http" | "https" => true,
        "data" => url.path().to_ascii_lowercase().starts_with("image/"),
        _ => false,
    }
}

impl CardRenderer for HtmlRenderer {
    fn render_card(&self, member: &Member, mode: ViewMode) -> RenderResult<String> {
        Self::check(member)?;

        let name = escape(&member.name);
        let role = escape(&member.news_type);
        let details = details(member);
        let body = match mode {
            ViewMode::Grid => format!(
                r#"<div class="member-photo">{photo}</div>
<div class="member-info">
<h3 class="member-name">{name}</h3>
<div class="member-details">{details}</div>
<div class="member-role"><span class="role-tag">{role}</span></div>
</div>"#,
                photo = photo(member, "member-photo-img"),
            ),
            ViewMode::List => {
                let preview = if member.news_about.is_empty() {
                    String::new()
                } else {
                    format!(
                        r#"<p class="member-preview">{}</p>"#,
                        escape(&truncate_text(&member.news_about, self.preview_len))
                    )
                };
                format!(
                    r#"<div class="member-photo list-view">{photo}</div>
<div class="member-info list-view">
<div class="member-header"><h3 class="member-name">{name}</h3><span class="role-tag">{role}</span></div>
<div class="member-details">{details}</div>
{preview}
</div>"#,
                    photo = photo(member, "member-photo-img"),
                )
            }
        };

        Ok(format!(
            r#"<div class="member-card" data-id="{id}" role="button" tabindex="0" aria-label="View details for {name}, {role}">
{body}
</div>"#,
            id = escape(member.id.as_str()),
        ))
    }

    fn render_detail(&self, member: &Member, position: Option<Position>) -> RenderResult<String> {
        Self::check(member)?;

        let name = escape(&member.name);
        let bio = if member.news_about.is_empty() {
            format!("<p><em>More information about {name} will be added soon.</em></p>")
        } else {
            format!("<p>{}</p>", escape(&member.news_about))
        };
        let position = position.map(|p| p.to_string()).unwrap_or_default();

        Ok(format!(
            r#"<div class="modal-body">
<div class="modal-photo">{photo}</div>
<h2 id="modalTitle" class="modal-name">{name}</h2>
<div class="modal-details">{details}</div>
<div class="modal-bio">{bio}</div>
<div class="modal-role"><span class="modal-role-tag">{role}</span></div>
<div class="modal-navigation">
<button class="nav-btn prev-btn" data-direction="prev" aria-label="Previous member"><i class="fas fa-chevron-left"></i></button>
<span class="nav-position">{position}</span>
<button class="nav-btn next-btn" data-direction="next" aria-label="Next member"><i class="fas fa-chevron-right"></i></button>
</div>
</div>"#,
            photo = photo(member, "modal-photo-img"),
            details = details(member),
            role = escape(&member.news_type),
        ))
    }
}

fn photo(member: &Member, img_class: &str) -> String {
    let initials = escape(&initials(&member.name));
    if member.photo.is_empty() {
        format!(r#"<span class="photo-placeholder">{initials}</span>"#)
    } else {
        format!(
            r#"<img src="{src}" alt="{alt}" class="{img_class}" loading="lazy"><span class="photo-placeholder" style="display: none;">{initials}</span>"#,
            src = escape(&member.photo),
            alt = escape(&member.name),
        )
    }
}

fn details(member: &Member) -> String {
    let mut out = String::new();
    if !member.class_name.is_empty() {
        out.push_str(&format!(
            r#"<span class="member-class">{}</span>"#,
            escape(&member.class_name)
        ));
    }
    if !member.stream.is_empty() {
        out.push_str(&format!(
            r#"<span class="member-stream">{}</span>"#,
            escape(&member.stream)
        ));
    }
    out
}

fn error_card() -> String {
    r#"<div class="member-card error">
<div class="member-photo error"><span class="photo-placeholder">!</span></div>
<div class="member-info">
<h3 class="member-name">Error Loading</h3>
<div class="member-details"><span class="member-class">Unable to load</span></div>
<div class="member-role"><span class="role-tag error">Error</span></div>
</div>
</div>"#
        .to_string()
}

/// Up to two upper-cased initials; `?` for a blank name.
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();
    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

/// `text` cut to `max_chars` characters with `...` appended when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Inputs for a full directory page
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub summary: Summary,
    pub mode: ViewMode,
    pub streams: &'a [&'a str],
    pub roles: &'a [&'a str],
}

/// Assemble the static directory page around already rendered cards.
pub fn render_page(ctx: &PageContext<'_>, cards: &[RenderedCard]) -> String {
    let content = if cards.is_empty() {
        r#"<div id="noResults" class="no-results"><h3>No members found</h3><p>Try adjusting your search or filters.</p></div>"#
            .to_string()
    } else {
        cards
            .iter()
            .map(RenderedCard::markup)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<header><h1>{title}</h1><p><span id="headerMemberCount">{total}</span> team members</p></header>
<section id="members" class="tab-content active">
<div class="filters">
<select id="streamFilter"><option value="">All streams</option>{streams}</select>
<select id="newsTypeFilter"><option value="">All roles</option>{roles}</select>
</div>
<p id="resultsCount">{summary}</p>
<div id="membersContainer" data-view="{mode}">
{content}
</div>
</section>
</body>
</html>
"#,
        title = escape(ctx.title),
        total = ctx.summary.total,
        streams = options(ctx.streams),
        roles = options(ctx.roles),
        summary = escape(&ctx.summary.to_string()),
        mode = ctx.mode,
    )
}

fn options(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| {
            let v = escape(v);
            format!(r#"<option value="{v}">{v}</option>"#)
        })
        .collect()
}

/// Shown in place of the directory when the roster could not be loaded.
pub fn render_load_failure() -> String {
    r#"<div class="error-message">
<i class="fas fa-exclamation-triangle"></i>
<h3>Unable to Load Team Members</h3>
<p>We're having trouble loading the team information. Please check your connection and try again.</p>
<button onclick="location.reload()" class="retry-btn"><i class="fas fa-redo"></i> Try Again</button>
</div>"#
        .to_string()
}
