//! Template 4: Research Professional.
//!
//! Each section in this layout is wrapped in `\ifdefempty` on its buffer and
//! every entry owns its own list, so nothing needs patching or removal.

use crate::latex::escape::escape;
use crate::latex::injection::{items_block, non_empty, Injection};
use crate::latex::registry::TemplateInfo;
use crate::latex::renderer::LatexRenderer;
use crate::latex::TEMPLATES;
use crate::models::resume::{EducationEntry, ReferenceEntry, ResumeData};

pub struct ResearchProfessional;

/// GPA line first, then each detail, separated by forced line breaks.
fn education_details(edu: &EducationEntry) -> String {
    let gpa = (!edu.gpa.is_empty()).then(|| format!("GPA: {}", escape(&edu.gpa)));
    gpa.into_iter()
        .chain(non_empty(&edu.details).map(escape))
        .collect::<Vec<_>>()
        .join(" \\\\ ")
}

fn reference(inject: &mut Injection, side: &str, r: &ReferenceEntry) {
    // The layout has a department slot the data model does not carry.
    inject
        .directive(side)
        .arg(&r.name)
        .arg(&r.role)
        .empty()
        .arg(&r.institution)
        .arg(&r.email)
        .finish();
}

impl LatexRenderer for ResearchProfessional {
    fn info(&self) -> &'static TemplateInfo {
        &TEMPLATES[3]
    }

    fn inject(&self, data: &ResumeData) -> String {
        let mut inject = Injection::new();

        let p = &data.person;
        inject.renew("userName", &p.full_name());
        inject.renew("userCityCountry", &p.location);
        inject.renew("userPhone", &p.phone);
        inject.renew("userEmail", &p.email);
        inject.renew("userLinkedIn", &p.linkedin);
        inject.renew("userGithub", &p.github);
        inject.renew("userNationality", &p.nationality);
        if !p.profile.is_empty() {
            inject.renew("userProfile", &p.profile);
        }

        for edu in &data.education {
            inject
                .directive("education")
                .arg(&edu.dates)
                .arg(&edu.degree)
                .arg(&edu.institution)
                .arg(&edu.location)
                .raw(&education_details(edu))
                .finish();
        }

        for exp in &data.experiences {
            inject
                .directive("experience")
                .arg(&exp.dates)
                .arg(&exp.title)
                .arg(&exp.company)
                .arg(&exp.location)
                .raw(&items_block(&exp.bullets))
                .finish();
        }

        for publication in &data.publications {
            inject
                .directive("publication")
                .arg(&publication.title)
                .arg(&publication.venue)
                .arg(&publication.authors)
                .finish();
        }

        for proj in &data.projects {
            inject
                .directive("project")
                .arg(&proj.title)
                .arg(&proj.context)
                .raw(&items_block(&proj.bullets))
                .finish();
        }

        let mut skills: Vec<String> = data
            .skills
            .categories
            .iter()
            .map(|c| format!("\\textbf{{{}}}: {}", escape(&c.name), escape(&c.items)))
            .collect();
        if let Some(flat) = data.skills.flat_line() {
            skills.push(escape(&flat));
        }
        if !skills.is_empty() {
            inject.renew_raw("SkillsLine", &skills.join(" \\\\ "));
        }

        if !data.languages.is_empty() {
            let line = data
                .languages
                .iter()
                .map(|l| {
                    if l.level.is_empty() {
                        escape(&l.name)
                    } else {
                        format!("{} ({})", escape(&l.name), escape(&l.level))
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            inject.renew_raw("LanguagesLine", &line);
        }

        // Two reference columns; any further references are dropped.
        let mut refs = data.references.iter();
        if let Some(r) = refs.next() {
            reference(&mut inject, "refleft", r);
        }
        if let Some(r) = refs.next() {
            reference(&mut inject, "refright", r);
        }

        inject.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::injection::INJECTION_HEADER;
    use crate::latex::renderer::tests::minimal_resume;
    use crate::models::resume::{LanguageEntry, PublicationEntry, SkillCategory, SkillsData};

    fn reference_named(name: &str) -> ReferenceEntry {
        ReferenceEntry {
            name: name.to_string(),
            role: "Professor".to_string(),
            institution: "Cambridge".to_string(),
            email: format!("{}@cam.ac.uk", name.to_lowercase()),
        }
    }

    #[test]
    fn test_education_details_put_gpa_first() {
        let edu = EducationEntry {
            gpa: "3.9/4".to_string(),
            details: vec!["Thesis: Rust & TeX".to_string(), String::new()],
            ..Default::default()
        };
        assert_eq!(education_details(&edu), "GPA: 3.9/4 \\\\ Thesis: Rust \\& TeX");
        assert_eq!(education_details(&EducationEntry::default()), "");
    }

    #[test]
    fn test_experience_argument_order() {
        let tex = ResearchProfessional.render(&minimal_resume()).unwrap();
        assert!(tex.contains(
            "\\experience{1842--1843}{Engineer}{Analytical Engines}{}{\\item Wrote the first published program}\n"
        ));
    }

    #[test]
    fn test_skills_and_languages_are_single_lines() {
        let data = ResumeData {
            skills: SkillsData {
                categories: vec![SkillCategory {
                    name: "Systems".to_string(),
                    items: "Rust, C".to_string(),
                }],
                flat: vec!["Git".to_string()],
            },
            languages: vec![
                LanguageEntry {
                    name: "English".to_string(),
                    level: "Native".to_string(),
                },
                LanguageEntry {
                    name: "Latin".to_string(),
                    level: String::new(),
                },
            ],
            ..Default::default()
        };
        let tex = ResearchProfessional.render(&data).unwrap();
        assert!(tex.contains("\\renewcommand{\\SkillsLine}{\\textbf{Systems}: Rust, C}\n"));
        assert!(!tex.contains(" \\\\ Git"));
        assert!(tex.contains("\\renewcommand{\\LanguagesLine}{English (Native), Latin}"));
    }

    #[test]
    fn test_flat_skills_fill_line_without_categories() {
        let data = ResumeData {
            skills: SkillsData {
                categories: vec![],
                flat: vec!["Rust".to_string(), "C#".to_string()],
            },
            ..Default::default()
        };
        let tex = ResearchProfessional.render(&data).unwrap();
        assert!(tex.contains("\\renewcommand{\\SkillsLine}{Rust, C\\#}\n"));
    }

    /// The generated block between the injection header and the document body.
    fn injected(tex: &str) -> &str {
        let start = tex.find(INJECTION_HEADER).unwrap();
        let end = tex.find("\\begin{document}").unwrap();
        &tex[start..end]
    }

    #[test]
    fn test_empty_lines_are_not_renewed() {
        let tex = ResearchProfessional.render(&ResumeData::default()).unwrap();
        assert!(!tex.contains("\\renewcommand{\\SkillsLine}"));
        assert!(!tex.contains("\\renewcommand{\\LanguagesLine}"));
        assert!(!tex.contains("\\renewcommand{\\userProfile}"));
        let block = injected(&tex);
        assert!(!block.lines().any(|l| l.starts_with("\\refleft{")));
        assert!(!block.lines().any(|l| l.starts_with("\\refright{")));
    }

    #[test]
    fn test_only_first_two_references_render() {
        let data = ResumeData {
            references: vec![
                reference_named("Babbage"),
                reference_named("Somerville"),
                reference_named("De Morgan"),
            ],
            ..Default::default()
        };
        let tex = ResearchProfessional.render(&data).unwrap();
        assert!(tex.contains("\\refleft{Babbage}{Professor}{}{Cambridge}{babbage@cam.ac.uk}\n"));
        assert!(tex.contains("\\refright{Somerville}"));
        assert!(!tex.contains("De Morgan"));
    }

    #[test]
    fn test_publication_fields() {
        let data = ResumeData {
            publications: vec![PublicationEntry {
                title: "Notes on the Engine".to_string(),
                venue: "Taylor's Memoirs".to_string(),
                authors: "A. Lovelace".to_string(),
            }],
            ..Default::default()
        };
        let tex = ResearchProfessional.render(&data).unwrap();
        assert!(tex.contains("\\publication{Notes on the Engine}{Taylor's Memoirs}{A. Lovelace}"));
    }
}
