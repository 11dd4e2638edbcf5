//! Template 7: IIT-Style.
//!
//! Section blocks are fingerprinted by the comment line, `\noindent` and
//! `\resheading` that precede each itemize. The courses block is never
//! populated, so it is always removed.

use std::sync::LazyLock;

use crate::latex::injection::{items_block, join_present, Injection};
use crate::latex::registry::TemplateInfo;
use crate::latex::renderer::LatexRenderer;
use crate::latex::rules::{ElisionRule, Patch, Trigger};
use crate::latex::TEMPLATES;
use crate::models::resume::{ResumeData, Section};

static PATCHES: [Patch; 2] = [
    // \href is used throughout but only `url` is loaded.
    Patch::new(
        "\\usepackage{url}",
        "\\usepackage{url}\n\\usepackage[hidelinks]{hyperref}",
    ),
    // No logo file ships with the scratch directory.
    Patch::new(
        "    \\if\\relax\\detokenize{\\userLogoPath}\\relax\\else\n      \\includegraphics[height =1in]{\\userLogoPath}\n    \\fi",
        "    % logo removed",
    ),
];

fn itemize_block(buffer: &str) -> String {
    [
        r"% [^\n]+\n\\noindent\n[^\n]+\n\\begin\{itemize\}[^\n]*\n",
        r"(?:\s*\\setlength\\itemsep\{[^}]+\}\n)?",
        r"\s*\\",
        &regex::escape(buffer),
        r"\s*\n\\end\{itemize\}",
    ]
    .concat()
}

static ELISIONS: LazyLock<Vec<ElisionRule>> = LazyLock::new(|| {
    let when_empty = [
        ("AchievementsList", Section::Awards),
        ("ExperienceList", Section::Experiences),
        ("SkillsList", Section::Skills),
        ("ProjectsList", Section::Projects),
        ("PositionsList", Section::Leadership),
        ("ExtracurricularList", Section::Extracurricular),
    ]
    .into_iter()
    .map(|(buffer, section)| {
        ElisionRule::new(buffer, Trigger::WhenEmpty(section), &itemize_block(buffer))
    });
    let always = std::iter::once(ElisionRule::new(
        "CoursesList",
        Trigger::Always,
        &itemize_block("CoursesList"),
    ));
    when_empty.chain(always).collect()
});

pub struct IitStyle;

impl LatexRenderer for IitStyle {
    fn info(&self) -> &'static TemplateInfo {
        &TEMPLATES[6]
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
        inject.renew("userEmail", &p.email);
        inject.renew("userLogoPath", "");

        if let Some(edu) = data.education.first() {
            inject.renew("userDegree", &edu.degree);
            inject.renew("userInstitution", &edu.institution);
        }
        for edu in &data.education {
            inject
                .directive("educationrow")
                .arg(&edu.degree)
                .arg(&edu.institution)
                .arg(&edu.dates)
                .arg(&edu.gpa)
                .finish();
        }

        for award in &data.awards {
            inject
                .directive("achievement")
                .arg(&join_present(&[award.title.as_str(), award.description.as_str()], ": "))
                .empty()
                .finish();
        }

        for exp in &data.experiences {
            inject
                .directive("experience")
                .arg(&join_present(&[exp.title.as_str(), exp.company.as_str()], " | "))
                .arg(&exp.dates)
                .raw(&items_block(&exp.bullets))
                .finish();
        }

        for cat in &data.skills.categories {
            inject.directive("skillcat").arg(&cat.name).arg(&cat.items).finish();
        }
        if let Some(flat) = data.skills.flat_line() {
            inject
                .directive("skillcat")
                .arg("Technical Skills")
                .arg(&flat)
                .finish();
        }

        for proj in &data.projects {
            inject
                .directive("project")
                .arg(&join_present(&[proj.title.as_str(), proj.context.as_str()], " | "))
                .arg(&proj.dates)
                .arg(&proj.url)
                .empty()
                .raw(&items_block(&proj.bullets))
                .finish();
        }

        for lead in &data.leadership {
            inject
                .directive("position")
                .arg(&join_present(&[lead.title.as_str(), lead.organization.as_str()], " | "))
                .arg(&lead.dates)
                .raw(&items_block(&lead.bullets))
                .finish();
        }

        for item in &data.extracurricular {
            inject.directive("extra").arg(item).finish();
        }

        inject.finish()
    }
}
