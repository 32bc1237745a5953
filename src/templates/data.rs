//! Data structures for template context

use serde::Serialize;

use crate::content::{Article, ImageField, LinkField};
use crate::helpers::{is_external, render_rich_text, PageMeta, ShareLink};
use crate::theme::NavContext;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageData {
    pub src: String,
    pub alt: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageData {
    /// `None` when the field has no URL
    pub fn from_field(field: &ImageField) -> Option<Self> {
        let src = field.src()?;
        Some(Self {
            src: src.to_string(),
            alt: field.alt_text().to_string(),
            width: field.dimensions.map(|d| d.width),
            height: field.dimensions.map(|d| d.height),
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinkData {
    pub href: String,
    pub label: String,
    pub new_tab: bool,
}

impl LinkData {
    pub fn new(href: &str, label: &str) -> Self {
        Self {
            href: href.to_string(),
            label: label.to_string(),
            new_tab: false,
        }
    }

    /// `None` when the field points nowhere
    pub fn from_field(field: &LinkField, fallback_label: &str) -> Option<Self> {
        let href = field.href()?;
        Some(Self {
            label: field.label(fallback_label).to_string(),
            new_tab: field.opens_new_tab() || is_external(&href),
            href,
        })
    }
}

/// Summary of an article for cards and lists
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArticleCard {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub category: Option<String>,
    pub author: Option<String>,
    /// Effective date in RFC 3339, formatted by the `date_format` filter
    pub date: Option<String>,
    pub reading_time: Option<i64>,
    pub image: Option<ImageData>,
    pub path: Option<String>,
    pub featured: bool,
}

impl ArticleCard {
    pub fn from_article(article: &Article) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title_text(),
            excerpt: article.excerpt_text(),
            category: article.category().map(str::to_string),
            author: article.author().map(str::to_string),
            date: article.effective_date().map(|d| d.to_rfc3339()),
            reading_time: article.reading_time(),
            image: ImageData::from_field(&article.data.featured_image),
            path: article.path(),
            featured: article.data.featured,
        }
    }
}

/// Values shared by every page layout
#[derive(Debug, Clone, Serialize)]
pub struct LayoutData {
    pub site_title: String,
    pub lang: String,
    pub meta: PageMeta,
    /// Pre-rendered Open Graph tags
    pub og_tags: String,
    pub nav: NavContext,
    pub year: i32,
}

// Slices

#[derive(Debug, Clone, Serialize)]
pub struct HeroAboutData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatData {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeroStatsData {
    pub title: String,
    pub description: String,
    pub stats: Vec<StatData>,
    pub primary_cta: Option<LinkData>,
    pub secondary_cta: Option<LinkData>,
    pub media: Option<ImageData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalData {
    pub icon: Option<ImageData>,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OurMissionData {
    pub title: String,
    pub mission_title: String,
    pub mission_description: String,
    pub vision_title: String,
    pub vision_description: String,
    pub goals: Vec<GoalData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineData {
    pub year: Option<String>,
    pub title: String,
    pub description: String,
    pub image: Option<ImageData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OurStoryData {
    pub title: String,
    pub description: String,
    pub image: Option<ImageData>,
    pub timeline: Vec<TimelineData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresenterData {
    pub name: String,
    pub role: Option<String>,
    pub bio: String,
    pub photo: Option<ImageData>,
    /// Shown when there is no photo
    pub initials: String,
    pub socials: Vec<LinkData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresentersTeamData {
    pub title: String,
    pub description: String,
    pub presenters: Vec<PresenterData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgramData {
    pub title: String,
    pub description: String,
    pub image: Option<ImageData>,
    pub episodes: Option<LinkData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgramsListData {
    pub title: String,
    pub description: String,
    pub programs: Vec<ProgramData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactData {
    pub title: String,
    pub description: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub socials: Vec<LinkData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeaturedArticlesData {
    pub title: String,
    pub description: String,
    pub lead: Option<ArticleCard>,
    pub others: Vec<ArticleCard>,
    /// Category links to the filtered news list
    pub categories: Vec<LinkData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A hidden form input
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

/// One entry of the numbered page strip
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageLinkData {
    pub number: Option<u32>,
    pub href: Option<String>,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaginationData {
    pub current: u32,
    pub total_pages: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub pages: Vec<PageLinkData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticlesGridData {
    pub section_title: Option<String>,
    pub show_search: bool,
    pub show_filters: bool,
    pub search: String,
    pub categories: Vec<SelectOption>,
    pub sorts: Vec<SelectOption>,
    /// Fields the filter form carries as hidden inputs
    pub hidden: Vec<HiddenField>,
    pub view: String,
    pub grid_href: String,
    pub list_href: String,
    pub clear_href: String,
    pub articles: Vec<ArticleCard>,
    pub result_count: u64,
    pub result_label: String,
    pub pagination: Option<PaginationData>,
}

/// Template input of one slice
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum SliceContent {
    HeroAbout(HeroAboutData),
    HeroStatsWithActions(HeroStatsData),
    OurMission(OurMissionData),
    OurStory(OurStoryData),
    PresentersTeam(PresentersTeamData),
    ProgramsList(ProgramsListData),
    ContactSection(ContactData),
    FeaturedArticles(FeaturedArticlesData),
    ArticlesGrid(ArticlesGridData),
}

/// A slice ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct SliceView {
    pub slice_type: &'static str,
    pub variation: String,
    pub content: SliceContent,
}

/// Article detail page
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetail {
    pub title: String,
    pub title_html: String,
    pub subtitle_html: String,
    pub excerpt_html: String,
    pub body_html: String,
    pub category: Option<String>,
    pub featured: bool,
    pub date_short: Option<String>,
    pub date_long: Option<String>,
    pub date_iso: Option<String>,
    pub reading_time: Option<String>,
    pub author: Option<String>,
    pub image: Option<ImageData>,
    pub tags: Vec<String>,
    pub share: Vec<ShareLink>,
    pub back: LinkData,
}

/// The not-found view
#[derive(Debug, Clone, Serialize)]
pub struct NotFoundData {
    pub heading: String,
    pub message: String,
    pub links: Vec<LinkData>,
}

/// Rich text rendered to HTML, or empty when the field has no content
pub fn rich_html(rich: &crate::content::RichText) -> String {
    if rich.is_filled() {
        render_rich_text(rich)
    } else {
        String::new()
    }
}
