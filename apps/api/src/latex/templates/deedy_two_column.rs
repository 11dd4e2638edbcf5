//! Template 5: Deedy Two-Column (XeLaTeX).

use std::sync::LazyLock;

use crate::latex::injection::{items_block, Injection};
use crate::latex::registry::TemplateInfo;
use crate::latex::renderer::LatexRenderer;
use crate::latex::rules::{ElisionRule, Patch, Trigger};
use crate::latex::TEMPLATES;
use crate::models::resume::{ResumeData, Section};

static PATCHES: [Patch; 1] = [
    // The bundled font files are not shipped; fall back to the engine default.
    Patch::new(
        "\\setmainfont[Path=fonts/lato/, BoldFont=Lato-Bol]{Lato-Lig}",
        "% custom font removed",
    ),
];

static ELISIONS: LazyLock<Vec<ElisionRule>> = LazyLock::new(|| {
    [
        ("Education", Section::Education, "EducationList"),
        ("Coursework", Section::Coursework, "CourseworkList"),
        ("Skills", Section::Skills, "SkillsList"),
        ("Experience", Section::Experiences, "ExperienceList"),
        ("Projects", Section::Projects, "ProjectsList"),
        ("Publications", Section::Publications, "PublicationsList"),
    ]
    .into_iter()
    .map(|(title, section, buffer)| {
        let pattern = [
            r"\\deedysection\{",
            &regex::escape(title),
            r"\}\s*\n\\begin\{deedylist\}\s*\n\s*\\",
            &regex::escape(buffer),
            r"\s*\n\\end\{deedylist\}(?:\s*\n\\sectionsep)?",
        ]
        .concat();
        ElisionRule::new(title, Trigger::WhenEmpty(section), &pattern)
    })
    .collect()
});

pub struct DeedyTwoColumn;

impl LatexRenderer for DeedyTwoColumn {
    fn info(&self) -> &'static TemplateInfo {
        &TEMPLATES[4]
    }

    fn patches(&self) -> &'static [Patch] {
        &PATCHES
    }

    fn elisions(&self) -> &'static [ElisionRule] {
        &ELISIONS
    }

    fn inject(&self, data: &ResumeData) -> String {
        let mut inject = Injection::new();

        let p = &data.person;
        inject.renew("userFirstName", &p.first_name);
        inject.renew("userLastName", &p.last_name);
        inject.renew("userEmail", &p.email);
        inject.renew("userPhone", &p.phone);
        inject.renew("userWebsite", &p.website_label());
        inject.renew("userLinkedIn", &p.linkedin);
        inject.renew("userGithub", &p.github);
        inject.renew("userLocation", &p.location);

        for edu in &data.education {
            inject
                .directive("education")
                .arg(&edu.degree)
                .arg(&edu.institution)
                .arg(&edu.dates)
                .arg(&edu.gpa)
                .finish();
        }

        let coursework = &data.coursework;
        for (label, courses) in [
            ("Graduate", &coursework.postgraduate),
            ("Undergraduate", &coursework.undergraduate),
        ] {
            if !courses.is_empty() {
                inject
                    .directive("coursework")
                    .arg(label)
                    .arg(&courses.join(", "))
                    .finish();
            }
        }

        for cat in &data.skills.categories {
            inject.directive("skillcat").arg(&cat.name).arg(&cat.items).finish();
        }
        if let Some(flat) = data.skills.flat_line() {
            inject.directive("skillcat").arg("Skills").arg(&flat).finish();
        }

        for exp in &data.experiences {
            inject
                .directive("experience")
                .arg(&exp.title)
                .arg(&exp.company)
                .arg(&exp.dates)
                .arg(&exp.location)
                .raw(&items_block(&exp.bullets))
                .finish();
        }

        for proj in &data.projects {
            inject
                .directive("project")
                .arg(&proj.title)
                .arg(&proj.context)
                .arg(&proj.dates)
                .raw(&items_block(&proj.bullets))
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

        inject.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::assets::layout_source;
    use crate::latex::renderer::tests::minimal_resume;
    use crate::latex::rules::apply_patches;
    use crate::latex::Engine;

    #[test]
    fn test_declares_xelatex() {
        assert_eq!(DeedyTwoColumn.info().engine, Engine::Xelatex);
    }

    #[test]
    fn test_font_patch_targets_the_asset() {
        let asset = layout_source("template5").unwrap();
        assert!(asset.contains(PATCHES[0].find));
        let tex = DeedyTwoColumn.render(&ResumeData::default()).unwrap();
        assert!(!tex.contains("\\setmainfont"));
        assert!(tex.contains("\\usepackage{fontspec}"));
    }

    #[test]
    fn test_every_rule_matches_the_asset_exactly_once() {
        let asset = apply_patches(layout_source("template5").unwrap(), &PATCHES);
        for rule in ELISIONS.iter() {
            assert_eq!(rule.pattern.find_iter(&asset).count(), 1, "{}", rule.label);
        }
    }

    #[test]
    fn test_trailing_separator_is_removed_with_block() {
        let tex = DeedyTwoColumn.render(&minimal_resume()).unwrap();
        assert!(tex.contains("% Education removed (empty)\n\n% Coursework removed (empty)"));
        assert!(tex.contains("\n\\ExperienceList\n"));
        // Experience stays, so its separator stays too.
        assert!(tex.contains("\\end{deedylist}\n\\sectionsep\n\n% Projects removed (empty)"));
    }

    #[test]
    fn test_name_is_split_across_commands() {
        let mut data = minimal_resume();
        data.person.last_name = "Lovelace".to_string();
        let tex = DeedyTwoColumn.render(&data).unwrap();
        assert!(tex.contains("\\renewcommand{\\userFirstName}{Ada}"));
        assert!(tex.contains("\\renewcommand{\\userLastName}{Lovelace}"));
    }

    #[test]
    fn test_coursework_levels() {
        let mut data = ResumeData::default();
        data.coursework.postgraduate = vec!["Type Theory".to_string()];
        let tex = DeedyTwoColumn.render(&data).unwrap();
        assert!(tex.contains("\\coursework{Graduate}{Type Theory}"));
        assert!(!tex.contains("% Coursework removed (empty)"));
    }
}
