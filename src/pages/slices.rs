//! Slices that need nothing beyond their own fields

use crate::content::fields::filled;
use crate::content::slice::{
    ContactSection, HeroAbout, HeroStatsWithActions, OurMission, OurStory, PresentersTeam,
    ProgramsList,
};
use crate::content::{LinkField, Slice};
use crate::templates::{
    rich_html, ContactData, GoalData, HeroAboutData, HeroStatsData, ImageData, LinkData,
    OurMissionData, OurStoryData, PresenterData, PresentersTeamData, ProgramData,
    ProgramsListData, SliceContent, StatData, TimelineData,
};

/// Template data of a self-contained slice. `None` for slices that fetch
/// articles and for unknown slices.
pub fn static_slice(slice: &Slice) -> Option<SliceContent> {
    let content = match slice {
        Slice::HeroAbout(body) => SliceContent::HeroAbout(hero_about(&body.primary)),
        Slice::HeroStatsWithActions(body) => {
            SliceContent::HeroStatsWithActions(hero_stats(&body.primary))
        }
        Slice::OurMission(body) => SliceContent::OurMission(our_mission(&body.primary)),
        Slice::OurStory(body) => SliceContent::OurStory(our_story(&body.primary)),
        Slice::PresentersTeam(body) => SliceContent::PresentersTeam(presenters(&body.primary)),
        Slice::ProgramsList(body) => SliceContent::ProgramsList(programs(&body.primary)),
        Slice::ContactSection(body) => SliceContent::ContactSection(contact(&body.primary)),
        Slice::FeaturedArticles(_) | Slice::ArticlesGrid(_) | Slice::Unknown => return None,
    };
    Some(content)
}

fn hero_about(slice: &HeroAbout) -> HeroAboutData {
    HeroAboutData {
        title: rich_html(&slice.title),
        subtitle: rich_html(&slice.subtitle),
        description: rich_html(&slice.description),
    }
}

fn hero_stats(slice: &HeroStatsWithActions) -> HeroStatsData {
    let stats = slice
        .stats
        .iter()
        .filter_map(|stat| {
            let value = filled(&stat.value);
            let label = filled(&stat.label);
            if value.is_none() && label.is_none() {
                return None;
            }
            Some(StatData {
                value: value.unwrap_or_default().to_string(),
                label: label.unwrap_or_default().to_string(),
            })
        })
        .collect();

    HeroStatsData {
        title: rich_html(&slice.title),
        description: rich_html(&slice.description),
        stats,
        primary_cta: LinkData::from_field(&slice.primary_cta, "Saiba mais"),
        secondary_cta: LinkData::from_field(&slice.secondary_cta, "Assista"),
        media: ImageData::from_field(&slice.main_media),
    }
}

fn our_mission(slice: &OurMission) -> OurMissionData {
    OurMissionData {
        title: rich_html(&slice.title),
        mission_title: rich_html(&slice.mission_title),
        mission_description: rich_html(&slice.mission_description),
        vision_title: rich_html(&slice.vision_title),
        vision_description: rich_html(&slice.vision_description),
        goals: slice
            .goal_item
            .iter()
            .map(|goal| GoalData {
                icon: ImageData::from_field(&goal.icon),
                title: goal.title.as_text(),
                description: rich_html(&goal.description),
            })
            .collect(),
    }
}

fn our_story(slice: &OurStory) -> OurStoryData {
    OurStoryData {
        title: rich_html(&slice.title),
        description: rich_html(&slice.description),
        image: ImageData::from_field(&slice.main_image),
        timeline: slice
            .timeline_item
            .iter()
            .map(|item| TimelineData {
                year: filled(&item.year).map(str::to_string),
                title: item.title.as_text(),
                description: rich_html(&item.description),
                image: ImageData::from_field(&item.image),
            })
            .collect(),
    }
}

fn presenters(slice: &PresentersTeam) -> PresentersTeamData {
    let presenters = slice
        .presenters
        .iter()
        .map(|presenter| {
            let name = filled(&presenter.presenter_name).unwrap_or_default();
            PresenterData {
                name: name.to_string(),
                role: filled(&presenter.presenter_role).map(str::to_string),
                bio: rich_html(&presenter.presenter_bio),
                photo: ImageData::from_field(&presenter.presenter_photo),
                initials: initials(name),
                socials: presenter
                    .presenter_social_links
                    .iter()
                    .filter_map(|s| social_link(&s.social_platform, &s.social_url))
                    .collect(),
            }
        })
        .collect();

    PresentersTeamData {
        title: rich_html(&slice.title),
        description: rich_html(&slice.description),
        presenters,
    }
}

fn programs(slice: &ProgramsList) -> ProgramsListData {
    ProgramsListData {
        title: rich_html(&slice.title),
        description: rich_html(&slice.description),
        programs: slice
            .program
            .iter()
            .map(|program| ProgramData {
                title: filled(&program.program_title).unwrap_or_default().to_string(),
                description: rich_html(&program.program_description),
                image: ImageData::from_field(&program.program_image),
                episodes: LinkData::from_field(&program.program_episodes_list, "Ver episódios"),
            })
            .collect(),
    }
}

fn contact(slice: &ContactSection) -> ContactData {
    ContactData {
        title: rich_html(&slice.title),
        description: rich_html(&slice.description),
        email: filled(&slice.email).map(str::to_string),
        phone: filled(&slice.phone).map(str::to_string),
        socials: slice
            .social_links
            .iter()
            .filter_map(|s| social_link(&s.platform, &s.url))
            .collect(),
    }
}

/// A social profile link labelled with its platform
fn social_link(platform: &Option<String>, url: &LinkField) -> Option<LinkData> {
    let mut link = LinkData::from_field(url, "Link")?;
    if let Some(platform) = filled(platform) {
        link.label = platform.to_string();
    }
    link.new_tab = true;
    Some(link)
}

/// Upper-cased first letter of every word of a name
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slice(value: serde_json::Value) -> Slice {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Maria da Silva"), "MDS");
        assert_eq!(initials("  joão  "), "J");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_presenters_team() {
        let slice = slice(json!({
            "slice_type": "presenters_team",
            "primary": {
                "title": [{"type": "heading2", "text": "Equipe", "spans": []}],
                "presenters": [{
                    "presenter_name": "Ana Lima",
                    "presenter_social_links": [
                        {"social_platform": "Instagram", "social_url": {"link_type": "Web", "url": "https://instagram.com/ana"}},
                        {"social_platform": "X", "social_url": {"link_type": "Any"}}
                    ]
                }]
            }
        }));

        let Some(SliceContent::PresentersTeam(data)) = static_slice(&slice) else {
            panic!("expected presenters team");
        };
        assert_eq!(data.title, "<h2>Equipe</h2>");
        let presenter = &data.presenters[0];
        assert_eq!(presenter.initials, "AL");
        assert!(presenter.photo.is_none());
        assert_eq!(presenter.role, None);
        assert_eq!(presenter.socials.len(), 1);
        assert_eq!(presenter.socials[0].label, "Instagram");
        assert!(presenter.socials[0].new_tab);
    }

    #[test]
    fn test_hero_stats_skips_empty_values() {
        let slice = slice(json!({
            "slice_type": "hero_stats_with_actions",
            "primary": {
                "stats": [{"value": "10 mil", "label": "Espectadores"}, {"value": "", "label": null}],
                "primary_cta": {"link_type": "Document", "type": "junco_news", "text": "Notícias"},
                "main_media": {"url": ""}
            }
        }));

        let Some(SliceContent::HeroStatsWithActions(data)) = static_slice(&slice) else {
            panic!("expected hero stats");
        };
        assert_eq!(data.stats.len(), 1);
        assert_eq!(data.title, "");
        let cta = data.primary_cta.unwrap();
        assert_eq!(cta.href, "/junco-news");
        assert_eq!(cta.label, "Notícias");
        assert!(data.secondary_cta.is_none());
        assert!(data.media.is_none());
    }

    #[test]
    fn test_data_slices_are_not_static() {
        assert!(static_slice(&Slice::Unknown).is_none());
        let grid = slice(json!({"slice_type": "articles_grid", "primary": {}}));
        assert!(static_slice(&grid).is_none());
    }
}
