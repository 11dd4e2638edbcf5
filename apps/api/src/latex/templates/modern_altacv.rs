//! Template 2: Modern AltaCV.
//!
//! Every section's list is always present in the layout, so empty sections are
//! filled with one inert `\emptysection` item instead of being removed.

use crate::latex::injection::{items_block, Injection};
use crate::latex::registry::TemplateInfo;
use crate::latex::renderer::LatexRenderer;
use crate::latex::rules::Patch;
use crate::latex::TEMPLATES;
use crate::models::resume::{ResumeData, Section};

static PATCHES: [Patch; 1] = [
    // XeTeX reads UTF-8 natively and refuses inputenc.
    Patch::new(
        "\\usepackage[utf8]{inputenc}",
        "% inputenc removed (XeTeX reads UTF-8 natively)",
    ),
];

/// Section → the buffer that receives a placeholder item when it is empty.
const PLACEHOLDER_BUFFERS: &[(Section, &str)] = &[
    (Section::Skills, "SkillsList"),
    (Section::Education, "EducationList"),
    (Section::Experiences, "ExperienceList"),
    (Section::Projects, "ProjectsList"),
    (Section::Awards, "AwardsList"),
    (Section::Languages, "LanguagesList"),
];

pub struct ModernAltaCv;

impl LatexRenderer for ModernAltaCv {
    fn info(&self) -> &'static TemplateInfo {
        &TEMPLATES[1]
    }

    fn patches(&self) -> &'static [Patch] {
        &PATCHES
    }

    fn inject(&self, data: &ResumeData) -> String {
        let mut inject = Injection::new();

        let p = &data.person;
        inject.renew("userName", &p.full_name());
        inject.renew("userTagline", &p.tagline);
        inject.renew("userEmail", &p.email);
        inject.renew("userPhone", &p.phone);
        inject.renew("userLocation", &p.location);
        inject.renew("userGithub", &p.github);
        inject.renew("userLinkedIn", &p.linkedin);
        inject.renew("userWebsite", &p.website);

        for cat in &data.skills.categories {
            inject.directive("cvskill").arg(&cat.name).arg(&cat.items).finish();
        }
        if let Some(flat) = data.skills.flat_line() {
            inject.directive("cvskill").arg("Skills").arg(&flat).finish();
        }

        for edu in &data.education {
            inject
                .directive("cveducation")
                .arg(&edu.degree)
                .arg(&edu.institution)
                .arg(&edu.dates)
                .arg(&edu.gpa)
                .finish();
        }

        for exp in &data.experiences {
            inject
                .directive("cvexperience")
                .arg(&exp.title)
                .arg(&exp.company)
                .arg(&exp.dates)
                .arg(&exp.location)
                .raw(&items_block(&exp.bullets))
                .finish();
        }

        for proj in &data.projects {
            inject
                .directive("cvproject")
                .arg(&proj.title)
                .arg(&proj.context)
                .arg(&proj.dates)
                .raw(&items_block(&proj.bullets))
                .finish();
        }

        for award in &data.awards {
            inject
                .directive("cvaward")
                .arg(&award.title)
                .arg(&award.description)
                .finish();
        }

        for lang in &data.languages {
            inject
                .directive("cvlanguage")
                .arg(&lang.name)
                .arg(&lang.level)
                .finish();
        }

        for (section, buffer) in PLACEHOLDER_BUFFERS {
            if data.is_section_empty(*section) {
                inject
                    .directive("emptysection")
                    .raw(&format!("\\{buffer}"))
                    .finish();
            }
        }

        inject.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::assets::layout_source;
    use crate::latex::renderer::tests::minimal_resume;
    use crate::models::resume::LanguageEntry;

    #[test]
    fn test_patch_targets_the_asset() {
        let asset = layout_source("template2").unwrap();
        assert!(asset.contains(PATCHES[0].find));
        let tex = ModernAltaCv.render(&ResumeData::default()).unwrap();
        assert!(!tex.contains("\\usepackage[utf8]{inputenc}"));
    }

    #[test]
    fn test_every_placeholder_buffer_exists_in_layout() {
        let asset = layout_source("template2").unwrap();
        for (section, buffer) in PLACEHOLDER_BUFFERS {
            assert!(ModernAltaCv.info().supports(*section));
            assert!(asset.contains(&format!("\n\\{buffer}\n")), "{buffer}");
        }
    }

    #[test]
    fn test_empty_resume_gets_one_placeholder_per_section() {
        let tex = ModernAltaCv.render(&ResumeData::default()).unwrap();
        for (_, buffer) in PLACEHOLDER_BUFFERS {
            assert_eq!(
                tex.matches(&format!("\\emptysection{{\\{buffer}}}")).count(),
                1,
                "{buffer}"
            );
        }
    }

    #[test]
    fn test_populated_section_gets_no_placeholder() {
        let tex = ModernAltaCv.render(&minimal_resume()).unwrap();
        assert!(!tex.contains("\\emptysection{\\ExperienceList}"));
        assert!(tex.contains("\\emptysection{\\ProjectsList}"));
        assert!(tex.contains(
            "\\cvexperience{Engineer}{Analytical Engines}{1842--1843}{}{\\item Wrote the first published program}"
        ));
    }

    #[test]
    fn test_languages_render_with_level() {
        let data = ResumeData {
            languages: vec![LanguageEntry {
                name: "French".to_string(),
                level: "B2".to_string(),
            }],
            ..Default::default()
        };
        let tex = ModernAltaCv.render(&data).unwrap();
        assert!(tex.contains("\\cvlanguage{French}{B2}"));
    }
}
