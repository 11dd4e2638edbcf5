//! Template 1: Classic Academic.
//!
//! Single-column layout whose section buffers are guarded by
//! `\ifx<buffer>\empty` in the layout itself, so empty sections disappear once
//! the buffers are declared with `\def`. Entries with no bullets get a `{~}`
//! placeholder bullet.

use std::collections::HashMap;

use crate::latex::injection::{non_empty, Injection};
use crate::latex::registry::TemplateInfo;
use crate::latex::renderer::LatexRenderer;
use crate::latex::rules::Patch;
use crate::latex::TEMPLATES;
use crate::models::resume::ResumeData;

/// Layout command for a skill row → the category name (lowercased) that fills it.
const SKILL_SLOTS: &[(&str, &str)] = &[
    ("skillsProgramming", "programming"),
    ("skillsAIML", "ai/ml"),
    ("skillsFrameworks", "frameworks"),
    ("skillsData", "data/infra"),
    ("skillsTools", "tools"),
    ("skillsLanguages", "languages"),
];

static PATCHES: [Patch; 6] = [
    // The buffer directives use \g@addto@macro, which needs @ as a letter.
    Patch::new(
        "\\documentclass[a4paper,10pt]{article}",
        "\\documentclass[a4paper,10pt]{article}\n\\makeatletter",
    ),
    // XeTeX-based engines reject font expansion.
    Patch::new(
        "\\microtypesetup{protrusion=true,expansion=true}",
        "\\microtypesetup{protrusion=true}",
    ),
    // \newcommand makes \long macros, which never \ifx-match \empty.
    Patch::new("\\newcommand{\\AwardsList}{}", "\\def\\AwardsList{}"),
    Patch::new("\\newcommand{\\ExperienceList}{}", "\\def\\ExperienceList{}"),
    Patch::new("\\newcommand{\\ProjectsList}{}", "\\def\\ProjectsList{}"),
    Patch::new("\\newcommand{\\LeadershipList}{}", "\\def\\LeadershipList{}"),
];

pub struct ClassicAcademic;

impl ClassicAcademic {
    /// Writes `\<name>Bullet{..}` lines followed by `\<name>End`.
    fn bullets(inject: &mut Injection, name: &str, bullets: &[String]) {
        let bullet_cmd = format!("{name}Bullet");
        let mut any = false;
        for bullet in non_empty(bullets) {
            inject.directive(&bullet_cmd).arg(bullet).finish();
            any = true;
        }
        if !any {
            inject.directive(&bullet_cmd).raw("~").finish();
        }
        inject.line(&format!("\\{name}End"));
    }
}

impl LatexRenderer for ClassicAcademic {
    fn info(&self) -> &'static TemplateInfo {
        &TEMPLATES[0]
    }

    fn patches(&self) -> &'static [Patch] {
        &PATCHES
    }

    fn inject(&self, data: &ResumeData) -> String {
        let mut inject = Injection::new();

        let p = &data.person;
        inject.renew("userName", &p.full_name());
        inject.renew("userEmail", &p.email);
        inject.renew("userPhone", &p.phone);
        inject.renew("userLocation", &p.location);
        if !p.website.is_empty() {
            inject.renew("userWebsite", &p.website);
            inject.renew("userWebsiteDisplay", &p.website_label());
        }

        // Only the first education entry fits the scalar header block.
        if let Some(edu) = data.education.first() {
            inject.renew("eduInstitution", &edu.institution);
            inject.renew("eduDates", &edu.dates);
            inject.renew("eduDegree", &edu.degree);
            inject.renew("eduGPA", &edu.gpa);
        }

        let categories: HashMap<String, &str> = data
            .skills
            .categories
            .iter()
            .map(|c| (c.name.to_lowercase(), c.items.as_str()))
            .collect();
        for (cmd, key) in SKILL_SLOTS {
            if let Some(items) = categories.get(*key) {
                inject.renew(cmd, items);
            }
        }
        if let Some(flat) = data.skills.flat_line() {
            inject.renew("skillsProgramming", &flat);
        }

        for award in &data.awards {
            inject
                .directive("award")
                .arg(&award.title)
                .arg(&award.description)
                .finish();
        }

        for exp in &data.experiences {
            inject
                .directive("experience")
                .arg(&exp.title)
                .arg(&exp.company)
                .arg(&exp.dates)
                .finish();
            Self::bullets(&mut inject, "experience", &exp.bullets);
        }

        for proj in &data.projects {
            inject
                .directive("project")
                .arg(&proj.title)
                .arg(&proj.url)
                .finish();
            Self::bullets(&mut inject, "project", &proj.bullets);
        }

        for lead in &data.leadership {
            inject
                .directive("leadership")
                .arg(&lead.title)
                .arg(&lead.dates)
                .finish();
            Self::bullets(&mut inject, "leadership", &lead.bullets);
        }

        inject.line("\\makeatother");
        inject.finish()
    }
}
