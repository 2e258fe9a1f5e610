//! Template-neutral view of a resume: what gets shown, in which order, with
//! every label already formatted. The HTML renderer, the PDF exporter and the
//! preview height estimate all walk this same structure.

use serde::{Deserialize, Serialize};

use crate::models::resume::{LooseEntry, Resume};
use crate::render::format::{display_social_url, format_date_range, format_month_year, social_href};
use crate::style::font_size::SectionKey;

// ────────────────────────────────────────────────────────────────────────────
// Visibility flags
// ────────────────────────────────────────────────────────────────────────────

/// Per-section render switches. Omitted flags default to visible, so callers
/// only name what they want hidden (e.g. when rendering a page slice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionVisibility {
    pub header: bool,
    pub summary: bool,
    pub experience: bool,
    pub education: bool,
    pub projects: bool,
    pub skills: bool,
    pub languages: bool,
    pub certifications: bool,
    pub achievements: bool,
    pub volunteer_work: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            header: true,
            summary: true,
            experience: true,
            education: true,
            projects: true,
            skills: true,
            languages: true,
            certifications: true,
            achievements: true,
            volunteer_work: true,
        }
    }
}

impl SectionVisibility {
    pub fn shows(&self, id: SectionId) -> bool {
        match id {
            SectionId::Summary => self.summary,
            SectionId::Experience => self.experience,
            SectionId::Education => self.education,
            SectionId::Projects => self.projects,
            SectionId::Skills => self.skills,
            SectionId::Languages => self.languages,
            SectionId::Certifications => self.certifications,
            SectionId::Achievements => self.achievements,
            SectionId::VolunteerWork => self.volunteer_work,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Summary,
    Experience,
    Education,
    Projects,
    Skills,
    Languages,
    Certifications,
    Achievements,
    VolunteerWork,
}

impl SectionId {
    pub const ORDER: [SectionId; 9] = [
        SectionId::Summary,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Projects,
        SectionId::Skills,
        SectionId::Languages,
        SectionId::Certifications,
        SectionId::Achievements,
        SectionId::VolunteerWork,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Summary => "Professional Summary",
            SectionId::Experience => "Experience",
            SectionId::Education => "Education",
            SectionId::Projects => "Projects",
            SectionId::Skills => "Skills",
            SectionId::Languages => "Languages",
            SectionId::Certifications => "Certifications",
            SectionId::Achievements => "Achievements",
            SectionId::VolunteerWork => "Volunteer Work",
        }
    }

    /// The font-size key governing this section's body text.
    pub fn size_key(&self) -> SectionKey {
        match self {
            SectionId::Summary => SectionKey::Summary,
            SectionId::Experience => SectionKey::Experience,
            SectionId::Education => SectionKey::Education,
            SectionId::Projects => SectionKey::Projects,
            SectionId::Skills => SectionKey::Skills,
            SectionId::Languages => SectionKey::Languages,
            SectionId::Certifications | SectionId::Achievements | SectionId::VolunteerWork => {
                SectionKey::Additional
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileLink {
    pub platform: &'static str,
    pub display: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Header {
    pub name: String,
    pub profession: String,
    pub contacts: Vec<String>,
    pub links: Vec<ProfileLink>,
    pub image: Option<String>,
}

impl Header {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.profession.is_empty()
            && self.contacts.is_empty()
            && self.links.is_empty()
            && self.image.is_none()
    }
}

/// One dated entry (a job, a degree, a project, a certificate...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entry {
    pub heading: String,
    pub subheading: String,
    pub dates: String,
    pub location: String,
    pub link: Option<ProfileLink>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagGroup {
    pub label: Option<&'static str>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    Text { text: String },
    Entries { entries: Vec<Entry> },
    Tags { groups: Vec<TagGroup> },
    Languages { items: Vec<(String, &'static str)> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub title: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeDocument {
    pub header: Option<Header>,
    pub sections: Vec<Section>,
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

/// Builds the document for `resume`. Empty and hidden sections are omitted.
pub fn build_document(resume: &Resume, visibility: &SectionVisibility) -> ResumeDocument {
    let header = if visibility.header {
        Some(build_header(resume)).filter(|h| !h.is_empty())
    } else {
        None
    };

    let sections = SectionId::ORDER
        .into_iter()
        .filter(|id| visibility.shows(*id))
        .filter_map(|id| {
            build_body(resume, id).map(|body| Section {
                id,
                title: id.title(),
                body,
            })
        })
        .collect();

    ResumeDocument { header, sections }
}

fn build_header(resume: &Resume) -> Header {
    let info = &resume.personal_info;
    let contacts = [&info.email, &info.phone, &info.address]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let links = info
        .social_links()
        .into_iter()
        .map(|l| ProfileLink {
            platform: l.platform,
            display: display_social_url(l.url),
            href: social_href(l.url),
        })
        .filter(|l| !l.display.is_empty())
        .collect();

    Header {
        name: info.name.trim().to_string(),
        profession: info.profession.trim().to_string(),
        contacts,
        links,
        image: info
            .image
            .as_deref()
            .map(str::trim)
            .filter(|s| s.starts_with("data:image/"))
            .map(str::to_string),
    }
}

fn build_body(resume: &Resume, id: SectionId) -> Option<SectionBody> {
    let body = match id {
        SectionId::Summary => {
            let text = resume.professional_summary.trim();
            if text.is_empty() {
                return None;
            }
            SectionBody::Text {
                text: text.to_string(),
            }
        }
        SectionId::Experience => entries(resume.experience.iter().map(|e| Entry {
            heading: e.position.trim().to_string(),
            subheading: e.company.trim().to_string(),
            dates: format_date_range(&e.start_date, &e.end_date, e.is_current),
            location: e.location.trim().to_string(),
            link: None,
            body: e.description.trim().to_string(),
        }))?,
        SectionId::Education => entries(resume.education.iter().map(|e| {
            let heading = match (e.degree.trim(), e.field.trim()) {
                (d, "") => d.to_string(),
                ("", f) => f.to_string(),
                (d, f) => format!("{d} in {f}"),
            };
            let mut body = e.description.trim().to_string();
            if !e.gpa.trim().is_empty() {
                let gpa = format!("GPA: {}", e.gpa.trim());
                body = if body.is_empty() { gpa } else { format!("{gpa}\n{body}") };
            }
            Entry {
                heading,
                subheading: e.institution.trim().to_string(),
                dates: format_date_range(&e.start_date, &e.end_date, e.is_current),
                location: String::new(),
                link: None,
                body,
            }
        }))?,
        SectionId::Projects => entries(resume.projects.iter().map(|p| Entry {
            heading: p.title.trim().to_string(),
            subheading: p.organization.trim().to_string(),
            dates: format_date_range(&p.start_date, &p.end_date, p.is_current),
            location: String::new(),
            link: Some(p.link.trim())
                .filter(|l| !l.is_empty())
                .map(|l| ProfileLink {
                    platform: "project",
                    display: display_social_url(l),
                    href: social_href(l),
                }),
            body: p.description.trim().to_string(),
        }))?,
        SectionId::Skills => {
            let skills = clean_tags(&resume.skills);
            let soft = clean_tags(&resume.soft_skills);
            let groups: Vec<TagGroup> = match (skills.is_empty(), soft.is_empty()) {
                (true, true) => return None,
                (false, true) => vec![TagGroup {
                    label: None,
                    tags: skills,
                }],
                (true, false) => vec![TagGroup {
                    label: None,
                    tags: soft,
                }],
                (false, false) => vec![
                    TagGroup {
                        label: Some("Technical"),
                        tags: skills,
                    },
                    TagGroup {
                        label: Some("Soft skills"),
                        tags: soft,
                    },
                ],
            };
            SectionBody::Tags { groups }
        }
        SectionId::Languages => {
            let items: Vec<(String, &'static str)> = resume
                .languages
                .iter()
                .filter(|l| !l.language.trim().is_empty())
                .map(|l| (l.language.trim().to_string(), l.proficiency.label()))
                .collect();
            if items.is_empty() {
                return None;
            }
            SectionBody::Languages { items }
        }
        SectionId::Certifications => loose_entries(&resume.certifications)?,
        SectionId::Achievements => loose_entries(&resume.achievements)?,
        SectionId::VolunteerWork => loose_entries(&resume.volunteer_work)?,
    };
    Some(body)
}

fn entries(iter: impl Iterator<Item = Entry>) -> Option<SectionBody> {
    let entries: Vec<Entry> = iter
        .filter(|e| !(e.heading.is_empty() && e.subheading.is_empty() && e.body.is_empty()))
        .collect();
    if entries.is_empty() {
        None
    } else {
        Some(SectionBody::Entries { entries })
    }
}

fn loose_entries(items: &[LooseEntry]) -> Option<SectionBody> {
    entries(items.iter().filter(|e| !e.is_blank()).map(|e| {
        let date = e.date();
        let formatted = format_month_year(date);
        Entry {
            heading: e.heading().to_string(),
            subheading: e.issuer().to_string(),
            // free-form dates ("2021", "Spring 2020") are shown as typed
            dates: if formatted.is_empty() {
                date.to_string()
            } else {
                formatted
            },
            location: String::new(),
            link: None,
            body: e.description().to_string(),
        }
    }))
}

fn clean_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ExperienceEntry, LanguageEntry, Proficiency};
    use serde_json::json;

    fn resume_with_experience() -> Resume {
        let mut r = Resume::default();
        r.personal_info.name = "Jane Doe".into();
        r.personal_info.email = "jane@example.com".into();
        r.experience.push(ExperienceEntry {
            position: "Engineer".into(),
            company: "Acme".into(),
            start_date: "2022-01".into(),
            end_date: String::new(),
            is_current: true,
            ..Default::default()
        });
        r
    }

    #[test]
    fn test_empty_resume_has_no_sections() {
        let doc = build_document(&Resume::default(), &SectionVisibility::default());
        assert!(doc.header.is_none());
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_experience_dates_formatted() {
        let doc = build_document(&resume_with_experience(), &SectionVisibility::default());
        assert_eq!(doc.sections.len(), 1);
        match &doc.sections[0].body {
            SectionBody::Entries { entries } => {
                assert_eq!(entries[0].dates, "Jan 2022 - Present");
                assert_eq!(entries[0].subheading, "Acme");
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_hidden_sections_are_skipped() {
        let vis = SectionVisibility {
            header: false,
            experience: false,
            ..Default::default()
        };
        let doc = build_document(&resume_with_experience(), &vis);
        assert!(doc.header.is_none());
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_visibility_defaults_when_omitted() {
        let vis: SectionVisibility = serde_json::from_value(json!({ "summary": false })).unwrap();
        assert!(!vis.summary);
        assert!(vis.header && vis.experience && vis.volunteer_work);
    }

    #[test]
    fn test_skill_groups_labelled_only_when_both_present() {
        let mut r = Resume::default();
        r.skills = vec!["Rust".into(), " ".into()];
        let doc = build_document(&r, &SectionVisibility::default());
        match &doc.sections[0].body {
            SectionBody::Tags { groups } => {
                assert_eq!(groups.len(), 1);
                assert_eq!(groups[0].label, None);
                assert_eq!(groups[0].tags, vec!["Rust".to_string()]);
            }
            other => panic!("unexpected body {other:?}"),
        }

        r.soft_skills = vec!["Mentoring".into()];
        let doc = build_document(&r, &SectionVisibility::default());
        match &doc.sections[0].body {
            SectionBody::Tags { groups } => assert_eq!(groups.len(), 2),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_languages_and_loose_entries() {
        let mut r = Resume::default();
        r.languages.push(LanguageEntry {
            language: "German".into(),
            proficiency: Proficiency::Fluent,
        });
        r.certifications
            .push(serde_json::from_value(json!({ "title": "CKA", "date": "2021" })).unwrap());
        r.achievements.push(serde_json::from_value(json!({})).unwrap());
        let doc = build_document(&r, &SectionVisibility::default());
        let ids: Vec<SectionId> = doc.sections.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![SectionId::Languages, SectionId::Certifications]);
        match &doc.sections[1].body {
            SectionBody::Entries { entries } => assert_eq!(entries[0].dates, "2021"),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_header_links_condensed() {
        let mut r = Resume::default();
        r.personal_info.linkedin = "https://www.linkedin.com/in/jane?utm=1".into();
        let doc = build_document(&r, &SectionVisibility::default());
        let header = doc.header.unwrap();
        assert_eq!(header.links[0].display, "linkedin.com/in/jane?utm=1");
    }

    #[test]
    fn test_non_image_data_is_dropped() {
        let mut r = Resume::default();
        r.personal_info.image = Some("javascript:alert(1)".into());
        let doc = build_document(&r, &SectionVisibility::default());
        assert!(doc.header.is_none());
    }
}
