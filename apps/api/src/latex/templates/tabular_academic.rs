//! Template 3: Tabular Academic.
//!
//! Education is a table (an empty table is valid), every other section is a
//! list that must be removed from the layout when its data is empty.

use std::sync::LazyLock;

use crate::latex::injection::{items_block, Injection};
use crate::latex::registry::TemplateInfo;
use crate::latex::renderer::LatexRenderer;
use crate::latex::rules::{ElisionRule, Patch, Trigger};
use crate::latex::TEMPLATES;
use crate::models::resume::{ResumeData, Section};

static PATCHES: [Patch; 1] = [
    // No logo file ships with the scratch directory.
    Patch::new(
        "\\includegraphics[width=2cm,clip]{\\userLogoPath}",
        "% logo removed",
    ),
];

/// `\section{\textbf{<title>}}`, an optional `\vspace`, then `<env>Start`,
/// the buffer, `<env>End`.
fn section_block(title: &str, buffer: &str, env: &str) -> String {
    [
        r"\\section\{\\textbf\{",
        &regex::escape(title),
        r"\}\}\s*\n",
        r"(?:\\vspace\{[^}]+\}\s*\n)?",
        r"\\",
        env,
        r"Start\s*\n",
        r"\s*\\",
        &regex::escape(buffer),
        r"\s*\n",
        r"\\",
        env,
        "End",
    ]
    .concat()
}

static ELISIONS: LazyLock<Vec<ElisionRule>> = LazyLock::new(|| {
    [
        ("Experience", Section::Experiences, "ExperienceList", "resumeSubHeadingList"),
        ("Projects", Section::Projects, "ProjectsList", "resumeSubHeadingList"),
        ("Technical Skills", Section::Skills, "TechSkillsList", "resumeHeadingSkill"),
        ("Key courses taken", Section::Coursework, "KeyCoursesList", "resumeHeadingSkill"),
        ("Certifications", Section::Certifications, "CertificationsList", "resumeItemList"),
        (
            "Positions of Responsibility",
            Section::Leadership,
            "PositionsList",
            "resumeSubHeadingList",
        ),
        ("Miscellaneous", Section::Miscellaneous, "MiscList", "resumeSubHeadingList"),
    ]
    .into_iter()
    .map(|(title, section, buffer, env)| {
        ElisionRule::new(
            title,
            Trigger::WhenEmpty(section),
            &section_block(title, buffer, env),
        )
    })
    .collect()
});

pub struct TabularAcademic;

impl LatexRenderer for TabularAcademic {
    fn info(&self) -> &'static TemplateInfo {
        &TEMPLATES[2]
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
        inject.renew("userName", &p.full_name());
        inject.renew("userPhone", &p.phone);
        inject.renew("userEmailA", &p.email);
        inject.renew("userEmailB", &p.email);
        inject.renew("userGithub", &p.github);
        inject.renew("userLinkedIn", &p.linkedin);
        if !p.location.is_empty() {
            inject.renew("userUniversityLine", &p.location);
        }
        inject.renew("userLogoPath", "");

        if let Some(edu) = data.education.first() {
            inject.renew("userCourse", &edu.degree);
        }
        for edu in &data.education {
            inject
                .directive("education")
                .arg(&edu.dates)
                .arg(&edu.degree)
                .arg(&edu.institution)
                .arg(&edu.gpa)
                .finish();
        }

        for exp in &data.experiences {
            inject
                .directive("experience")
                .arg(&exp.company)
                .arg(&exp.location)
                .arg(&exp.title)
                .arg(&exp.dates)
                .raw(&items_block(&exp.bullets))
                .finish();
        }

        for proj in &data.projects {
            inject
                .directive("project")
                .arg(&proj.title)
                .arg(&proj.context)
                .arg(&proj.dates)
                .arg(&proj.url)
                .raw(&items_block(&proj.bullets))
                .finish();
        }

        for cat in &data.skills.categories {
            inject.directive("techskill").arg(&cat.name).arg(&cat.items).finish();
        }
        if let Some(flat) = data.skills.flat_line() {
            inject.directive("techskill").arg("Skills").arg(&flat).finish();
        }

        let coursework = &data.coursework;
        for (label, courses) in [
            ("Postgraduate", &coursework.postgraduate),
            ("Undergraduate", &coursework.undergraduate),
        ] {
            if !courses.is_empty() {
                inject
                    .directive("keycourses")
                    .arg(label)
                    .arg(&courses.join(", "))
                    .finish();
            }
        }

        for cert in &data.certifications {
            inject
                .directive("certification")
                .arg(&cert.url)
                .arg(&cert.name)
                .arg(&cert.institution)
                .finish();
        }

        for lead in &data.leadership {
            inject
                .directive("position")
                .arg(&lead.title)
                .arg(&lead.organization)
                .arg(&lead.dates)
                .finish();
        }

        for misc in &data.miscellaneous {
            inject
                .directive("miscitem")
                .arg(&misc.title)
                .arg(&misc.description)
                .empty()
                .finish();
        }

        inject.finish()
    }
}
