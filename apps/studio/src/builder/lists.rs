//! Add / remove / reorder edits for the repeatable sections of a resume.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::resume::Resume;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKey {
    Experience,
    Education,
    #[serde(alias = "project")]
    Projects,
    Skills,
    SoftSkills,
    Languages,
    Certifications,
    Achievements,
    VolunteerWork,
}

impl ListKey {
    pub fn from_path(segment: &str) -> Option<Self> {
        serde_json::from_value(Value::String(segment.trim().to_ascii_lowercase())).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKey::Experience => "experience",
            ListKey::Education => "education",
            ListKey::Projects => "projects",
            ListKey::Skills => "skills",
            ListKey::SoftSkills => "soft_skills",
            ListKey::Languages => "languages",
            ListKey::Certifications => "certifications",
            ListKey::Achievements => "achievements",
            ListKey::VolunteerWork => "volunteer_work",
        }
    }
}

/// Binds `$list` to the vector named by `$key` and evaluates `$body` once per
/// element type.
macro_rules! with_list {
    ($resume:expr, $key:expr, |$list:ident| $body:expr) => {
        match $key {
            ListKey::Experience => {
                let $list = &mut $resume.experience;
                $body
            }
            ListKey::Education => {
                let $list = &mut $resume.education;
                $body
            }
            ListKey::Projects => {
                let $list = &mut $resume.projects;
                $body
            }
            ListKey::Skills => {
                let $list = &mut $resume.skills;
                $body
            }
            ListKey::SoftSkills => {
                let $list = &mut $resume.soft_skills;
                $body
            }
            ListKey::Languages => {
                let $list = &mut $resume.languages;
                $body
            }
            ListKey::Certifications => {
                let $list = &mut $resume.certifications;
                $body
            }
            ListKey::Achievements => {
                let $list = &mut $resume.achievements;
                $body
            }
            ListKey::VolunteerWork => {
                let $list = &mut $resume.volunteer_work;
                $body
            }
        }
    };
}

/// Appends an entry, built from `value` when given or blank otherwise.
/// Returns the new length.
pub fn add(resume: &mut Resume, key: ListKey, value: Option<Value>) -> Result<usize, AppError> {
    with_list!(resume, key, |list| push_entry(list, key, value))
}

pub fn remove(resume: &mut Resume, key: ListKey, index: usize) -> Result<usize, AppError> {
    with_list!(resume, key, |list| {
        check_index(list.len(), index, key)?;
        list.remove(index);
        Ok(list.len())
    })
}

/// Moves the entry at `from` so that it ends up at position `to`.
pub fn move_entry(
    resume: &mut Resume,
    key: ListKey,
    from: usize,
    to: usize,
) -> Result<usize, AppError> {
    with_list!(resume, key, |list| {
        check_index(list.len(), from, key)?;
        check_index(list.len(), to, key)?;
        let item = list.remove(from);
        list.insert(to, item);
        Ok(list.len())
    })
}

fn push_entry<T>(list: &mut Vec<T>, key: ListKey, value: Option<Value>) -> Result<usize, AppError>
where
    T: DeserializeOwned + Default,
{
    let entry = match value {
        None | Some(Value::Null) => T::default(),
        Some(v) => serde_json::from_value(v).map_err(|e| {
            AppError::Validation(format!("Invalid {} entry: {e}", key.as_str()))
        })?,
    };
    list.push(entry);
    Ok(list.len())
}

fn check_index(len: usize, index: usize, key: ListKey) -> Result<(), AppError> {
    if index >= len {
        return Err(AppError::Validation(format!(
            "Index {index} is out of range for {} ({len} entries)",
            key.as_str()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_blank_and_prefilled_entries() {
        let mut r = Resume::default();
        assert_eq!(add(&mut r, ListKey::Experience, None).unwrap(), 1);
        assert_eq!(r.experience[0].position, "");

        add(
            &mut r,
            ListKey::Experience,
            Some(json!({ "position": "Engineer", "company": "Acme" })),
        )
        .unwrap();
        assert_eq!(r.experience[1].company, "Acme");

        add(&mut r, ListKey::Skills, Some(json!("Rust"))).unwrap();
        assert_eq!(r.skills, vec!["Rust"]);
    }

    #[test]
    fn test_add_rejects_wrong_shape() {
        let mut r = Resume::default();
        let err = add(&mut r, ListKey::Skills, Some(json!({ "name": "Rust" }))).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(r.skills.is_empty());
    }

    #[test]
    fn test_remove_out_of_range_is_validation_error() {
        let mut r = Resume::default();
        add(&mut r, ListKey::Languages, None).unwrap();
        assert!(matches!(
            remove(&mut r, ListKey::Languages, 3),
            Err(AppError::Validation(_))
        ));
        assert_eq!(remove(&mut r, ListKey::Languages, 0).unwrap(), 0);
    }

    #[test]
    fn test_move_reorders() {
        let mut r = Resume::default();
        for s in ["a", "b", "c"] {
            add(&mut r, ListKey::SoftSkills, Some(json!(s))).unwrap();
        }
        move_entry(&mut r, ListKey::SoftSkills, 0, 2).unwrap();
        assert_eq!(r.soft_skills, vec!["b", "c", "a"]);
        move_entry(&mut r, ListKey::SoftSkills, 2, 0).unwrap();
        assert_eq!(r.soft_skills, vec!["a", "b", "c"]);
        assert!(move_entry(&mut r, ListKey::SoftSkills, 0, 3).is_err());
    }

    #[test]
    fn test_loose_sections_accept_free_form_objects() {
        let mut r = Resume::default();
        add(
            &mut r,
            ListKey::Certifications,
            Some(json!({ "name": "CKA", "issuer": "CNCF" })),
        )
        .unwrap();
        assert_eq!(r.certifications.len(), 1);
        assert_eq!(r.certifications[0].heading(), "CKA");
    }

    #[test]
    fn test_path_segment_lookup() {
        assert_eq!(ListKey::from_path("volunteer_work"), Some(ListKey::VolunteerWork));
        assert_eq!(ListKey::from_path("project"), Some(ListKey::Projects));
        assert_eq!(ListKey::from_path("hobbies"), None);
    }
}
