//! Slices: typed, reorderable content blocks of a page

use serde::{Deserialize, Deserializer, Serialize};

use super::fields::{filled, lenient, ImageField, LinkField};
use super::rich_text::RichText;

/// Common envelope of every slice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct SliceBody<P> {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub variation: String,
    pub primary: P,
}

/// The closed set of slices known to the site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "slice_type", rename_all = "snake_case")]
pub enum Slice {
    HeroAbout(SliceBody<HeroAbout>),
    HeroStatsWithActions(SliceBody<HeroStatsWithActions>),
    OurMission(SliceBody<OurMission>),
    OurStory(SliceBody<OurStory>),
    PresentersTeam(SliceBody<PresentersTeam>),
    ProgramsList(SliceBody<ProgramsList>),
    ContactSection(SliceBody<ContactSection>),
    FeaturedArticles(SliceBody<FeaturedArticles>),
    ArticlesGrid(SliceBody<ArticlesGrid>),
    #[serde(other)]
    Unknown,
}

impl Slice {
    /// The `slice_type` tag, used for `data-slice-type` attributes
    pub fn slice_type(&self) -> &'static str {
        match self {
            Slice::HeroAbout(_) => "hero_about",
            Slice::HeroStatsWithActions(_) => "hero_stats_with_actions",
            Slice::OurMission(_) => "our_mission",
            Slice::OurStory(_) => "our_story",
            Slice::PresentersTeam(_) => "presenters_team",
            Slice::ProgramsList(_) => "programs_list",
            Slice::ContactSection(_) => "contact_section",
            Slice::FeaturedArticles(_) => "featured_articles",
            Slice::ArticlesGrid(_) => "articles_grid",
            Slice::Unknown => "unknown",
        }
    }

    /// The authored variation, `default` when unset
    pub fn variation(&self) -> &str {
        let variation = match self {
            Slice::HeroAbout(b) => &b.variation,
            Slice::HeroStatsWithActions(b) => &b.variation,
            Slice::OurMission(b) => &b.variation,
            Slice::OurStory(b) => &b.variation,
            Slice::PresentersTeam(b) => &b.variation,
            Slice::ProgramsList(b) => &b.variation,
            Slice::ContactSection(b) => &b.variation,
            Slice::FeaturedArticles(b) => &b.variation,
            Slice::ArticlesGrid(b) => &b.variation,
            Slice::Unknown => "",
        };
        if variation.is_empty() {
            "default"
        } else {
            variation
        }
    }
}

/// Decode a slice zone. A slice that fails to decode becomes
/// [`Slice::Unknown`] instead of failing the page.
pub fn deserialize_slices<'de, D>(deserializer: D) -> Result<Vec<Slice>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .map(|item| {
            Slice::deserialize(item).unwrap_or_else(|e| {
                tracing::debug!("Skipping malformed slice: {}", e);
                Slice::Unknown
            })
        })
        .collect())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroAbout {
    pub title: RichText,
    pub subtitle: RichText,
    pub description: RichText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stat {
    #[serde(deserialize_with = "lenient")]
    pub value: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroStatsWithActions {
    pub title: RichText,
    pub description: RichText,
    #[serde(deserialize_with = "lenient")]
    pub stats: Vec<Stat>,
    #[serde(deserialize_with = "lenient")]
    pub primary_cta: LinkField,
    #[serde(deserialize_with = "lenient")]
    pub secondary_cta: LinkField,
    #[serde(deserialize_with = "lenient")]
    pub main_media: ImageField,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalItem {
    #[serde(deserialize_with = "lenient")]
    pub icon: ImageField,
    pub title: RichText,
    pub description: RichText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OurMission {
    pub title: RichText,
    pub mission_title: RichText,
    pub mission_description: RichText,
    pub vision_title: RichText,
    pub vision_description: RichText,
    #[serde(deserialize_with = "lenient")]
    pub goal_item: Vec<GoalItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineItem {
    #[serde(deserialize_with = "lenient")]
    pub year: Option<String>,
    pub title: RichText,
    pub description: RichText,
    #[serde(deserialize_with = "lenient")]
    pub image: ImageField,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OurStory {
    pub title: RichText,
    pub description: RichText,
    #[serde(deserialize_with = "lenient")]
    pub main_image: ImageField,
    #[serde(deserialize_with = "lenient")]
    pub timeline_item: Vec<TimelineItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterSocial {
    #[serde(deserialize_with = "lenient")]
    pub social_platform: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub social_url: LinkField,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Presenter {
    #[serde(deserialize_with = "lenient")]
    pub presenter_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub presenter_role: Option<String>,
    pub presenter_bio: RichText,
    #[serde(deserialize_with = "lenient")]
    pub presenter_photo: ImageField,
    #[serde(deserialize_with = "lenient")]
    pub presenter_social_links: Vec<PresenterSocial>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentersTeam {
    pub title: RichText,
    pub description: RichText,
    #[serde(deserialize_with = "lenient")]
    pub presenters: Vec<Presenter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Program {
    #[serde(deserialize_with = "lenient")]
    pub program_title: Option<String>,
    pub program_description: RichText,
    #[serde(deserialize_with = "lenient")]
    pub program_image: ImageField,
    #[serde(deserialize_with = "lenient")]
    pub program_episodes_list: LinkField,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramsList {
    pub title: RichText,
    pub description: RichText,
    #[serde(deserialize_with = "lenient")]
    pub program: Vec<Program>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    #[serde(deserialize_with = "lenient")]
    pub platform: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub url: LinkField,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSection {
    pub title: RichText,
    pub description: RichText,
    #[serde(deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturedArticles {
    pub title: RichText,
    pub description: RichText,
    #[serde(deserialize_with = "lenient")]
    pub show_category_filter: bool,
}

/// A category offered by the news grid filter
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterCategory {
    #[serde(deserialize_with = "lenient")]
    pub category_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub category_slug: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticlesGrid {
    #[serde(deserialize_with = "lenient")]
    pub section_title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub show_search: bool,
    #[serde(deserialize_with = "lenient")]
    pub show_filters: bool,
    #[serde(deserialize_with = "lenient")]
    pub default_sort: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub articles_per_page: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub filter_categories: Vec<FilterCategory>,
}

/// Categories offered when the slice defines none
const FALLBACK_CATEGORIES: [(&str, &str); 6] = [
    ("Tecnologia", "tecnologia"),
    ("Economia", "economia"),
    ("Esportes", "esportes"),
    ("Política", "politica"),
    ("Cultura", "cultura"),
    ("Saúde", "saude"),
];

impl ArticlesGrid {
    /// `(name, slug)` pairs for the category selector
    pub fn categories(&self) -> Vec<(String, String)> {
        let defined: Vec<(String, String)> = self
            .filter_categories
            .iter()
            .filter_map(|c| {
                let name = filled(&c.category_name)?;
                let slug = filled(&c.category_slug)
                    .map(str::to_string)
                    .unwrap_or_else(|| slug::slugify(name));
                Some((name.to_string(), slug))
            })
            .collect();

        if defined.is_empty() {
            FALLBACK_CATEGORIES
                .iter()
                .map(|(name, slug)| (name.to_string(), slug.to_string()))
                .collect()
        } else {
            defined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_articles_grid() {
        let json = r#"{
            "slice_type": "articles_grid",
            "variation": "default",
            "primary": {
                "section_title": "Últimas notícias",
                "show_search": true,
                "show_filters": true,
                "default_sort": "title_asc",
                "articles_per_page": 6,
                "filter_categories": [
                    {"category_name": "Economia", "category_slug": "economia"},
                    {"category_name": "Agro"}
                ]
            }
        }"#;
        let slice: Slice = serde_json::from_str(json).unwrap();
        let Slice::ArticlesGrid(body) = slice else {
            panic!("expected articles grid");
        };
        assert_eq!(body.primary.articles_per_page, Some(6));
        assert_eq!(
            body.primary.categories(),
            vec![
                ("Economia".to_string(), "economia".to_string()),
                ("Agro".to_string(), "agro".to_string())
            ]
        );
    }

    #[test]
    fn test_fallback_categories() {
        let grid = ArticlesGrid::default();
        let categories = grid.categories();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[3], ("Política".to_string(), "politica".to_string()));
    }

    #[test]
    fn test_malformed_slice_becomes_unknown() {
        let slices: Vec<Slice> = deserialize_slices(serde_json::json!([
            {"slice_type": "contact_section", "primary": "not an object"},
            {"slice_type": "contact_section", "primary": {"email": "contato@junco.tv"}},
            42
        ]))
        .unwrap();

        assert_eq!(slices.len(), 3);
        assert!(matches!(slices[0], Slice::Unknown));
        assert_eq!(slices[1].slice_type(), "contact_section");
        assert!(matches!(slices[2], Slice::Unknown));
    }

    #[test]
    fn test_presenters() {
        let json = r#"{
            "slice_type": "presenters_team",
            "primary": {
                "title": "Apresentadores",
                "presenters": [{
                    "presenter_name": "João",
                    "presenter_role": "Âncora",
                    "presenter_social_links": [
                        {"social_platform": "instagram", "social_url": {"link_type": "Web", "url": "https://instagram.com/joao"}}
                    ]
                }]
            }
        }"#;
        let Slice::PresentersTeam(body) = serde_json::from_str::<Slice>(json).unwrap() else {
            panic!("expected presenters team");
        };
        let presenter = &body.primary.presenters[0];
        assert_eq!(presenter.presenter_name.as_deref(), Some("João"));
        assert!(presenter.presenter_social_links[0].social_url.is_filled());
    }
}
