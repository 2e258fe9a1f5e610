use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::lenient;
use crate::style::font_size::SizeToken;
use crate::style::margins::PageMargins;
use crate::style::paper::PaperSize;

pub const DEFAULT_ACCENT_COLOR: &str = "#3B82F6";

// ────────────────────────────────────────────────────────────────────────────
// Root record
// ────────────────────────────────────────────────────────────────────────────

/// The in-memory record holding everything the user entered for one resume,
/// content and styling alike.
///
/// Every field defaults so partial JSON from the client always deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    pub id: Uuid,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub professional_summary: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(alias = "project", deserialize_with = "lenient::null_as_default")]
    pub projects: Vec<ProjectEntry>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub soft_skills: Vec<String>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub languages: Vec<LanguageEntry>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub certifications: Vec<LooseEntry>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub achievements: Vec<LooseEntry>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub volunteer_work: Vec<LooseEntry>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub template: TemplateKind,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub accent_color: String,
    pub font_family: Option<String>,
    #[serde(deserialize_with = "lenient::size_tokens")]
    pub section_font_sizes: HashMap<String, SizeToken>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub paper_size: PaperSize,
    #[serde(deserialize_with = "lenient::or_default")]
    pub page_margins: PageMargins,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub public: bool,
}

impl Default for Resume {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            personal_info: PersonalInfo::default(),
            professional_summary: String::new(),
            experience: Vec::new(),
            education: Vec::new(),
            projects: Vec::new(),
            skills: Vec::new(),
            soft_skills: Vec::new(),
            languages: Vec::new(),
            certifications: Vec::new(),
            achievements: Vec::new(),
            volunteer_work: Vec::new(),
            template: TemplateKind::default(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            font_family: None,
            section_font_sizes: HashMap::new(),
            paper_size: PaperSize::default(),
            page_margins: PageMargins::default(),
            public: false,
        }
    }
}

impl Resume {
    /// Enforces the record-level invariants: a current entry carries no end date.
    pub fn normalize(&mut self) {
        for e in &mut self.experience {
            if e.is_current {
                e.end_date.clear();
            }
        }
        for e in &mut self.education {
            if e.is_current {
                e.end_date.clear();
            }
        }
        for p in &mut self.projects {
            if p.is_current {
                p.end_date.clear();
            }
        }
    }

    /// Returns the accent color, or the default when the field was left blank.
    pub fn accent(&self) -> &str {
        let trimmed = self.accent_color.trim();
        if trimmed.is_empty() {
            DEFAULT_ACCENT_COLOR
        } else {
            trimmed
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub phone: String,
    #[serde(alias = "location")]
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub address: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub profession: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub website: String,
    /// Profile picture as a `data:` URL. Only the Spotlight template shows it.
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub github: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub twitter: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub instagram: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub youtube: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub facebook: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub telegram: String,
}

/// A social/profile link with its platform label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink<'a> {
    pub platform: &'static str,
    pub url: &'a str,
}

impl PersonalInfo {
    /// Non-empty profile links in display order.
    pub fn social_links(&self) -> Vec<SocialLink<'_>> {
        [
            ("linkedin", self.linkedin.as_str()),
            ("website", self.website.as_str()),
            ("github", self.github.as_str()),
            ("twitter", self.twitter.as_str()),
            ("instagram", self.instagram.as_str()),
            ("youtube", self.youtube.as_str()),
            ("facebook", self.facebook.as_str()),
            ("telegram", self.telegram.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .map(|(platform, url)| SocialLink {
            platform,
            url: url.trim(),
        })
        .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub location: String,
    /// `YYYY-MM`
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub start_date: String,
    /// `YYYY-MM`; cleared when `is_current`.
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub is_current: bool,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub field: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub is_current: bool,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub gpa: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub organization: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub link: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub is_current: bool,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Native,
    Fluent,
    Advanced,
    #[default]
    Intermediate,
    Basic,
}

impl Proficiency {
    pub fn label(&self) -> &'static str {
        match self {
            Proficiency::Native => "Native",
            Proficiency::Fluent => "Fluent",
            Proficiency::Advanced => "Advanced",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Basic => "Basic",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageEntry {
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub proficiency: Proficiency,
}

/// Certifications, achievements and volunteer work are free-form: either a
/// bare line of text or an object whose well-known keys the renderer picks out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseEntry {
    Text(String),
    Fields(Map<String, Value>),
}

impl Default for LooseEntry {
    fn default() -> Self {
        LooseEntry::Fields(Map::new())
    }
}

impl LooseEntry {
    fn first_str(&self, keys: &[&str]) -> &str {
        let LooseEntry::Fields(fields) = self else {
            return "";
        };
        keys.iter()
            .filter_map(|k| fields.get(*k).and_then(Value::as_str))
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    pub fn heading(&self) -> &str {
        match self {
            LooseEntry::Text(text) => text.trim(),
            LooseEntry::Fields(_) => self.first_str(&["title", "name", "role", "position"]),
        }
    }

    pub fn issuer(&self) -> &str {
        self.first_str(&["issuer", "organization", "company", "institution"])
    }

    pub fn date(&self) -> &str {
        self.first_str(&["date", "start_date", "year"])
    }

    pub fn description(&self) -> &str {
        self.first_str(&["description", "details"])
    }

    pub fn is_blank(&self) -> bool {
        self.heading().is_empty() && self.issuer().is_empty() && self.description().is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template selector
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    #[default]
    Classic,
    Modern,
    Minimal,
    /// Minimal layout with a profile image.
    #[serde(alias = "minimal_image", alias = "minimal_with_image")]
    Spotlight,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Classic,
        TemplateKind::Modern,
        TemplateKind::Minimal,
        TemplateKind::Spotlight,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            TemplateKind::Classic => "classic",
            TemplateKind::Modern => "modern",
            TemplateKind::Minimal => "minimal",
            TemplateKind::Spotlight => "spotlight",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.slug().eq_ignore_ascii_case(slug.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::font_size::{resolve_px, SectionKey};
    use serde_json::json;

    #[test]
    fn test_default_resume_has_documented_accent() {
        let r = Resume::default();
        assert_eq!(r.accent_color, "#3B82F6");
        assert_eq!(r.template, TemplateKind::Classic);
        assert!(!r.public);
    }

    #[test]
    fn test_partial_json_deserializes_with_defaults() {
        let r: Resume = serde_json::from_value(json!({
            "title": "Backend CV",
            "personal_info": { "name": "Jane", "location": "Berlin" },
            "project": [{ "title": "Compiler" }]
        }))
        .unwrap();
        assert_eq!(r.title, "Backend CV");
        assert_eq!(r.personal_info.address, "Berlin");
        assert_eq!(r.projects.len(), 1);
        assert_eq!(r.accent_color, DEFAULT_ACCENT_COLOR);
    }

    #[test]
    fn test_normalize_clears_end_date_for_current_entries() {
        let mut r = Resume::default();
        r.experience.push(ExperienceEntry {
            position: "Engineer".into(),
            start_date: "2022-01".into(),
            end_date: "2023-05".into(),
            is_current: true,
            ..Default::default()
        });
        r.education.push(EducationEntry {
            end_date: "2020-06".into(),
            ..Default::default()
        });
        r.normalize();
        assert!(r.experience[0].end_date.is_empty());
        assert_eq!(r.education[0].end_date, "2020-06");
    }

    #[test]
    fn test_blank_accent_falls_back_to_default() {
        let r = Resume {
            accent_color: "  ".into(),
            ..Default::default()
        };
        assert_eq!(r.accent(), DEFAULT_ACCENT_COLOR);
    }

    #[test]
    fn test_loose_entry_picks_known_keys() {
        let entry: LooseEntry = serde_json::from_value(json!({
            "name": "AWS Solutions Architect",
            "issuer": "Amazon",
            "date": "2023-04",
            "badge_color": "orange"
        }))
        .unwrap();
        assert_eq!(entry.heading(), "AWS Solutions Architect");
        assert_eq!(entry.issuer(), "Amazon");
        assert_eq!(entry.date(), "2023-04");
        assert!(!entry.is_blank());
    }

    #[test]
    fn test_loose_entry_accepts_plain_text() {
        let r: Resume = serde_json::from_value(json!({
            "certifications": ["AWS SA", { "title": "CKA", "issuer": "CNCF" }]
        }))
        .unwrap();
        assert_eq!(r.certifications.len(), 2);
        assert_eq!(r.certifications[0], LooseEntry::Text("AWS SA".into()));
        assert_eq!(r.certifications[0].heading(), "AWS SA");
        assert_eq!(r.certifications[0].issuer(), "");
        assert_eq!(r.certifications[1].issuer(), "CNCF");
        assert!(LooseEntry::Text("  ".into()).is_blank());
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let r: Resume = serde_json::from_value(json!({
            "title": null,
            "personal_info": { "name": "Jane", "email": null },
            "experience": [{ "position": "Engineer", "end_date": null, "is_current": null }],
            "skills": null,
            "accent_color": null
        }))
        .unwrap();
        assert_eq!(r.title, "");
        assert_eq!(r.personal_info.email, "");
        assert_eq!(r.experience[0].end_date, "");
        assert!(!r.experience[0].is_current);
        assert!(r.skills.is_empty());
        assert_eq!(r.accent(), DEFAULT_ACCENT_COLOR);
    }

    #[test]
    fn test_unknown_tokens_fall_back_to_defaults() {
        let r: Resume = serde_json::from_value(json!({
            "template": "brutalist",
            "paper_size": "B5",
            "page_margins": "roomy",
            "section_font_sizes": { "name": "huge", "summary": "large" },
            "languages": [{ "language": "German", "proficiency": "conversational" }]
        }))
        .unwrap();
        assert_eq!(r.template, TemplateKind::Classic);
        assert_eq!(r.paper_size, PaperSize::default());
        assert_eq!(r.page_margins, PageMargins::default());
        assert_eq!(r.languages[0].proficiency, Proficiency::Intermediate);
        assert!(!r.section_font_sizes.contains_key("name"));
        assert_eq!(
            resolve_px(&r.section_font_sizes, SectionKey::Name),
            resolve_px(&HashMap::new(), SectionKey::Name)
        );
        assert_eq!(r.section_font_sizes["summary"], SizeToken::Large);
    }

    #[test]
    fn test_social_links_skip_empty() {
        let info = PersonalInfo {
            linkedin: "https://linkedin.com/in/jane".into(),
            github: "  ".into(),
            telegram: "t.me/jane".into(),
            ..Default::default()
        };
        let links = info.social_links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].platform, "linkedin");
        assert_eq!(links[1].platform, "telegram");
    }

    #[test]
    fn test_template_slug_lookup() {
        assert_eq!(TemplateKind::from_slug("Modern"), Some(TemplateKind::Modern));
        assert_eq!(TemplateKind::from_slug("nope"), None);
        let t: TemplateKind = serde_json::from_value(json!("minimal_with_image")).unwrap();
        assert_eq!(t, TemplateKind::Spotlight);
    }
}
