//! Required-field checks that gate wizard advancement.
//!
//! Each check returns the paths of the missing fields (e.g.
//! `experience[1].company`) so the client can outline the offending inputs.
//! An empty list means the section may be left.

use crate::models::resume::Resume;

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn personal_missing(resume: &Resume) -> Vec<String> {
    let info = &resume.personal_info;
    [
        ("name", &info.name),
        ("email", &info.email),
        ("phone", &info.phone),
        ("address", &info.address),
        ("profession", &info.profession),
    ]
    .into_iter()
    .filter(|(_, value)| blank(value))
    .map(|(field, _)| format!("personal_info.{field}"))
    .collect()
}

pub fn experience_missing(resume: &Resume) -> Vec<String> {
    let mut missing = Vec::new();
    for (i, e) in resume.experience.iter().enumerate() {
        for (field, value) in [
            ("position", &e.position),
            ("company", &e.company),
            ("start_date", &e.start_date),
        ] {
            if blank(value) {
                missing.push(format!("experience[{i}].{field}"));
            }
        }
    }
    missing
}

pub fn education_missing(resume: &Resume) -> Vec<String> {
    let mut missing = Vec::new();
    for (i, e) in resume.education.iter().enumerate() {
        for (field, value) in [
            ("degree", &e.degree),
            ("institution", &e.institution),
            ("start_date", &e.start_date),
        ] {
            if blank(value) {
                missing.push(format!("education[{i}].{field}"));
            }
        }
    }
    missing
}

pub fn projects_missing(resume: &Resume) -> Vec<String> {
    resume
        .projects
        .iter()
        .enumerate()
        .filter(|(_, p)| blank(&p.title))
        .map(|(i, _)| format!("projects[{i}].title"))
        .collect()
}

/// Every gated field across the whole resume.
pub fn missing_fields_for_all(resume: &Resume) -> Vec<String> {
    let mut all = personal_missing(resume);
    all.extend(experience_missing(resume));
    all.extend(education_missing(resume));
    all.extend(projects_missing(resume));
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry};

    #[test]
    fn test_empty_personal_info_reports_all_required() {
        let missing = personal_missing(&Resume::default());
        assert_eq!(
            missing,
            vec![
                "personal_info.name",
                "personal_info.email",
                "personal_info.phone",
                "personal_info.address",
                "personal_info.profession",
            ]
        );
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut r = Resume::default();
        r.personal_info.name = "   ".into();
        assert!(personal_missing(&r).contains(&"personal_info.name".to_string()));
    }

    #[test]
    fn test_empty_lists_pass() {
        let r = Resume::default();
        assert!(experience_missing(&r).is_empty());
        assert!(education_missing(&r).is_empty());
        assert!(projects_missing(&r).is_empty());
    }

    #[test]
    fn test_entry_paths_are_indexed() {
        let mut r = Resume::default();
        r.experience.push(ExperienceEntry {
            position: "Engineer".into(),
            company: "Acme".into(),
            start_date: "2020-01".into(),
            ..Default::default()
        });
        r.experience.push(ExperienceEntry {
            position: "Lead".into(),
            ..Default::default()
        });
        r.education.push(EducationEntry::default());
        r.projects.push(ProjectEntry::default());

        assert_eq!(
            experience_missing(&r),
            vec!["experience[1].company", "experience[1].start_date"]
        );
        assert_eq!(education_missing(&r).len(), 3);
        assert_eq!(projects_missing(&r), vec!["projects[0].title"]);
    }

    #[test]
    fn test_end_date_is_never_required() {
        let mut r = Resume::default();
        r.experience.push(ExperienceEntry {
            position: "Engineer".into(),
            company: "Acme".into(),
            start_date: "2022-01".into(),
            end_date: String::new(),
            is_current: false,
            ..Default::default()
        });
        assert!(experience_missing(&r).is_empty());
    }
}
