//! Template 6: Photo Resume.

use std::sync::LazyLock;

use crate::latex::injection::{items_block, Injection};
use crate::latex::registry::TemplateInfo;
use crate::latex::renderer::LatexRenderer;
use crate::latex::rules::{ElisionRule, Patch, Trigger};
use crate::latex::TEMPLATES;
use crate::models::resume::{ResumeData, Section};

static PATCHES: [Patch; 2] = [
    // \\ straight after \hrule is "no line to end" in vertical mode.
    Patch::new("\\hrule\\\\[-0.5cm]", "\\hrule\\vspace{-0.5cm}"),
    // Same error when the tagline is empty.
    Patch::new(
        "{\\small \\userTagline}\\\\[0.2em]",
        "\\ifthenelse{\\equal{\\userTagline}{}}{}{{\\small \\userTagline}\\\\[0.2em]}",
    ),
];

static ELISIONS: LazyLock<Vec<ElisionRule>> = LazyLock::new(|| {
    [
        ("Summary", Section::Summary, "SummaryList"),
        ("EDUCATION", Section::Education, "EducationList"),
        ("SKILLS", Section::Skills, "SkillsList"),
        ("PROJECTS", Section::Projects, "ProjectsList"),
        ("Significant Roles", Section::Leadership, "RolesList"),
        ("EXPERIENCE", Section::Experiences, "ExperienceList"),
        ("Global Certifications", Section::Certifications, "CertificationsList"),
        ("References", Section::References, "ReferencesList"),
    ]
    .into_iter()
    .map(|(title, section, buffer)| {
        let pattern = [
            r"\\csection\{",
            &regex::escape(title),
            r"\}\{\\small\s*\n\s*\\begin\{itemize\}\s*\n\s*\\",
            &regex::escape(buffer),
            r"\s*\n\s*\\end\{itemize\}\s*\n\}",
        ]
        .concat();
        ElisionRule::new(title, Trigger::WhenEmpty(section), &pattern)
    })
    .collect()
});

/// Expands a bare handle to a full profile URL; full URLs pass through.
fn profile_url(base: &str, handle: &str) -> String {
    if handle.starts_with("http") {
        handle.to_string()
    } else {
        format!("{base}{handle}")
    }
}

pub struct PhotoResume;

impl LatexRenderer for PhotoResume {
    fn info(&self) -> &'static TemplateInfo {
        &TEMPLATES[5]
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
        inject.renew("userTagline", &p.tagline);
        inject.renew("userAddress", &p.location);
        inject.renew("userEmail", &p.email);
        if !p.phone.is_empty() {
            inject.renew("userPhoneTelLink", &format!("tel:{}", p.phone));
            inject.renew("userPhoneLabel", &p.phone);
        }
        if !p.website.is_empty() {
            let text = if p.website_display.is_empty() {
                "Portfolio"
            } else {
                p.website_display.as_str()
            };
            inject.renew("userPortfolioURL", &p.website);
            inject.renew("userPortfolioText", text);
        }
        if !p.github.is_empty() {
            inject.renew("userGithubURL", &profile_url("https://github.com/", &p.github));
        }
        if !p.linkedin.is_empty() {
            inject.renew(
                "userLinkedInURL",
                &profile_url("https://linkedin.com/in/", &p.linkedin),
            );
        }
        // No photo is ever uploaded with the data.
        inject.renew("userPhotoPath", "");

        for item in &data.summary {
            inject.directive("summaryitem").arg(item).finish();
        }

        for edu in &data.education {
            inject
                .directive("education")
                .arg(&edu.degree)
                .arg(&edu.institution)
                .arg(&edu.gpa)
                .arg(&edu.dates)
                .finish();
        }

        for cat in &data.skills.categories {
            inject.directive("skillcat").arg(&cat.name).arg(&cat.items).finish();
        }
        if let Some(flat) = data.skills.flat_line() {
            inject.directive("skillcat").arg("Skills").arg(&flat).finish();
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

        for lead in &data.leadership {
            inject
                .directive("role")
                .arg(&lead.title)
                .arg(&lead.organization)
                .arg(&lead.dates)
                .finish();
        }

        for exp in &data.experiences {
            inject
                .directive("experience")
                .arg(&exp.title)
                .arg(&exp.company)
                .arg(&exp.dates)
                .raw(&items_block(&exp.bullets))
                .finish();
        }

        for cert in &data.certifications {
            inject
                .directive("certification")
                .arg(&cert.name)
                .arg(&cert.institution)
                .arg(&cert.url)
                .finish();
        }

        for r in &data.references {
            inject
                .directive("refitem")
                .arg(&r.name)
                .arg(&r.role)
                .arg(&r.email)
                .finish();
        }

        inject.finish()
    }
}
