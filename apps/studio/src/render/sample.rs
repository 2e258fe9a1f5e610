use serde_json::json;

use crate::models::resume::{
    EducationEntry, ExperienceEntry, LanguageEntry, Proficiency, ProjectEntry, Resume, TemplateKind,
};

/// Placeholder resume shown in the template gallery.
pub fn sample_resume(template: TemplateKind) -> Resume {
    let mut r = Resume {
        title: "Sample resume".to_string(),
        template,
        professional_summary: "Product-minded software engineer with seven years of experience \
            building reliable web platforms. Comfortable owning features from design to on-call."
            .to_string(),
        ..Default::default()
    };

    let info = &mut r.personal_info;
    info.name = "Alex Morgan".to_string();
    info.profession = "Senior Software Engineer".to_string();
    info.email = "alex.morgan@example.com".to_string();
    info.phone = "+1 555 010 2030".to_string();
    info.address = "Portland, OR".to_string();
    info.linkedin = "https://www.linkedin.com/in/alexmorgan".to_string();
    info.github = "https://github.com/alexmorgan".to_string();

    r.experience = vec![
        ExperienceEntry {
            position: "Senior Software Engineer".to_string(),
            company: "Northwind Labs".to_string(),
            location: "Remote".to_string(),
            start_date: "2021-03".to_string(),
            end_date: String::new(),
            is_current: true,
            description: "Led the rewrite of the billing service, cutting invoice latency by 60%.\n\
                Mentored four engineers through their first on-call rotations."
                .to_string(),
        },
        ExperienceEntry {
            position: "Software Engineer".to_string(),
            company: "Contoso".to_string(),
            location: "Seattle, WA".to_string(),
            start_date: "2017-06".to_string(),
            end_date: "2021-02".to_string(),
            is_current: false,
            description: "Built the internal analytics pipeline processing 2M events per day."
                .to_string(),
        },
    ];

    r.education = vec![EducationEntry {
        degree: "B.Sc.".to_string(),
        institution: "Oregon State University".to_string(),
        field: "Computer Science".to_string(),
        start_date: "2013-09".to_string(),
        end_date: "2017-06".to_string(),
        ..Default::default()
    }];

    r.projects = vec![ProjectEntry {
        title: "Open-source rate limiter".to_string(),
        link: "https://github.com/alexmorgan/throttle".to_string(),
        description: "Token-bucket limiter used by a dozen downstream projects.".to_string(),
        ..Default::default()
    }];

    r.skills = ["Rust", "TypeScript", "PostgreSQL", "Kubernetes"]
        .into_iter()
        .map(String::from)
        .collect();
    r.soft_skills = ["Mentoring", "Technical writing"]
        .into_iter()
        .map(String::from)
        .collect();
    r.languages = vec![
        LanguageEntry {
            language: "English".to_string(),
            proficiency: Proficiency::Native,
        },
        LanguageEntry {
            language: "Spanish".to_string(),
            proficiency: Proficiency::Intermediate,
        },
    ];
    r.certifications = vec![serde_json::from_value(json!({
        "title": "Certified Kubernetes Administrator",
        "issuer": "CNCF",
        "date": "2022-05"
    }))
    .unwrap_or_default()];

    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_passes_all_required_field_checks() {
        let r = sample_resume(TemplateKind::Classic);
        assert!(crate::builder::validation::missing_fields_for_all(&r).is_empty());
    }

    #[test]
    fn test_sample_keeps_requested_template() {
        assert_eq!(sample_resume(TemplateKind::Modern).template, TemplateKind::Modern);
    }
}
