//! Resume data model: the validated input tree consumed by every LaTeX renderer.
//!
//! Every field is optional on the wire: a missing field or an explicit `null`
//! deserializes to its empty default, so renderers never see "absent" values,
//! only empty ones. The tree carries no identities or cross-references and is
//! never mutated while rendering.

use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// A repeatable resume section. Templates declare which of these they render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Education,
    Experiences,
    Skills,
    Projects,
    Awards,
    Leadership,
    Certifications,
    Languages,
    Publications,
    Coursework,
    References,
    Summary,
    Miscellaneous,
    Extracurricular,
}

impl Section {
    pub const ALL: [Section; 14] = [
        Section::Education,
        Section::Experiences,
        Section::Skills,
        Section::Projects,
        Section::Awards,
        Section::Leadership,
        Section::Certifications,
        Section::Languages,
        Section::Publications,
        Section::Coursework,
        Section::References,
        Section::Summary,
        Section::Miscellaneous,
        Section::Extracurricular,
    ];
}

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonData {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website_display: String,
    #[serde(deserialize_with = "null_as_default")]
    pub linkedin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub github: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tagline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nationality: String,
}

impl PersonData {
    /// `"first last"`, trimmed so a lone first or last name has no stray space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Display text for the website link. Falls back to the URL without its scheme.
    pub fn website_label(&self) -> String {
        if !self.website_display.is_empty() {
            return self.website_display.clone();
        }
        self.website
            .replace("https://", "")
            .replace("http://", "")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dates: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gpa: String,
    #[serde(deserialize_with = "null_as_default")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dates: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Free text, usually a comma-separated list.
    #[serde(deserialize_with = "null_as_default")]
    pub items: String,
}

/// Skills are either named categories or a flat list. Categories win when both are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsData {
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<SkillCategory>,
    #[serde(deserialize_with = "null_as_default")]
    pub flat: Vec<String>,
}

impl SkillsData {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.flat.is_empty()
    }

    /// The flat list as one line, only when no categories are present.
    pub fn flat_line(&self) -> Option<String> {
        if self.categories.is_empty() && !self.flat.is_empty() {
            Some(self.flat.join(", "))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub context: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dates: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadershipEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub organization: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dates: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub venue: String,
    #[serde(deserialize_with = "null_as_default")]
    pub authors: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseworkData {
    #[serde(deserialize_with = "null_as_default")]
    pub postgraduate: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub undergraduate: Vec<String>,
}

impl CourseworkData {
    pub fn is_empty(&self) -> bool {
        self.postgraduate.is_empty() && self.undergraduate.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiscellaneousEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Root
// ────────────────────────────────────────────────────────────────────────────

/// The root resume tree. `ResumeData::default()` is a valid, fully empty resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    #[serde(deserialize_with = "null_as_default")]
    pub person: PersonData,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub experiences: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: SkillsData,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub awards: Vec<AwardEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub leadership: Vec<LeadershipEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<CertificationEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<LanguageEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub publications: Vec<PublicationEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub coursework: CourseworkData,
    #[serde(deserialize_with = "null_as_default")]
    pub references: Vec<ReferenceEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub miscellaneous: Vec<MiscellaneousEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub extracurricular: Vec<String>,
}

impl ResumeData {
    /// True when the data backing `section` has nothing to render.
    pub fn is_section_empty(&self, section: Section) -> bool {
        match section {
            Section::Education => self.education.is_empty(),
            Section::Experiences => self.experiences.is_empty(),
            Section::Skills => self.skills.is_empty(),
            Section::Projects => self.projects.is_empty(),
            Section::Awards => self.awards.is_empty(),
            Section::Leadership => self.leadership.is_empty(),
            Section::Certifications => self.certifications.is_empty(),
            Section::Languages => self.languages.is_empty(),
            Section::Publications => self.publications.is_empty(),
            Section::Coursework => self.coursework.is_empty(),
            Section::References => self.references.is_empty(),
            Section::Summary => self.summary.is_empty(),
            Section::Miscellaneous => self.miscellaneous.is_empty(),
            Section::Extracurricular => self.extracurricular.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let data: ResumeData =
            serde_json::from_str(r#"{"person": {"first_name": "Ada"}}"#).unwrap();
        assert_eq!(data.person.first_name, "Ada");
        assert_eq!(data.person.last_name, "");
        assert!(data.experiences.is_empty());
        assert!(data.skills.is_empty());
    }

    #[test]
    fn test_explicit_nulls_are_treated_as_absent() {
        let data: ResumeData = serde_json::from_str(
            r#"{
                "person": {"first_name": null, "email": "a@b.c"},
                "experiences": null,
                "skills": {"categories": null, "flat": ["Rust"]},
                "coursework": null
            }"#,
        )
        .unwrap();
        assert_eq!(data.person.first_name, "");
        assert_eq!(data.person.email, "a@b.c");
        assert!(data.experiences.is_empty());
        assert_eq!(data.skills.flat, vec!["Rust".to_string()]);
        assert!(data.coursework.is_empty());
    }

    #[test]
    fn test_full_name_trims_missing_parts() {
        let mut person = PersonData {
            first_name: "Ada".to_string(),
            ..Default::default()
        };
        assert_eq!(person.full_name(), "Ada");
        person.last_name = "Lovelace".to_string();
        assert_eq!(person.full_name(), "Ada Lovelace");
        person.first_name.clear();
        assert_eq!(person.full_name(), "Lovelace");
    }

    #[test]
    fn test_website_label_strips_scheme() {
        let person = PersonData {
            website: "https://ada.dev/about".to_string(),
            ..Default::default()
        };
        assert_eq!(person.website_label(), "ada.dev/about");

        let labelled = PersonData {
            website: "https://ada.dev".to_string(),
            website_display: "Portfolio".to_string(),
            ..Default::default()
        };
        assert_eq!(labelled.website_label(), "Portfolio");
    }

    #[test]
    fn test_flat_skills_yield_to_categories() {
        let mut skills = SkillsData {
            categories: vec![],
            flat: vec!["Rust".to_string(), "Go".to_string()],
        };
        assert_eq!(skills.flat_line().as_deref(), Some("Rust, Go"));

        skills.categories.push(SkillCategory {
            name: "Languages".to_string(),
            items: "Rust".to_string(),
        });
        assert_eq!(skills.flat_line(), None);
        assert!(!skills.is_empty());
    }

    #[test]
    fn test_section_emptiness() {
        let mut data = ResumeData::default();
        assert!(data.is_section_empty(Section::Coursework));
        data.coursework.undergraduate.push("Compilers".to_string());
        assert!(!data.is_section_empty(Section::Coursework));
        assert!(data.is_section_empty(Section::Summary));
    }

    #[test]
    fn test_section_names_serialize_snake_case() {
        let json = serde_json::to_string(&[Section::Experiences, Section::Extracurricular]).unwrap();
        assert_eq!(json, r#"["experiences","extracurricular"]"#);
    }
}
