//! Template registry: the static catalog of resume layouts.
//!
//! Populated at compile time and never mutated. The order here is the order
//! returned by the template listing endpoint.

use serde::Serialize;

use crate::models::resume::{ResumeData, Section};

/// The typesetting engine a layout was written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Pdflatex,
    Xelatex,
}

impl Engine {
    /// Executable name of the engine.
    pub fn program(self) -> &'static str {
        match self {
            Engine::Pdflatex => "pdflatex",
            Engine::Xelatex => "xelatex",
        }
    }
}

/// One registry entry.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub engine: Engine,
    pub supported_sections: &'static [Section],
}

impl TemplateInfo {
    pub fn supports(&self, section: Section) -> bool {
        self.supported_sections.contains(&section)
    }

    /// Sections that carry data this layout has no place for.
    pub fn ignored_sections(&self, data: &ResumeData) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| !self.supports(*s) && !data.is_section_empty(*s))
            .collect()
    }
}

pub static TEMPLATES: [TemplateInfo; 7] = [
    TemplateInfo {
        id: "template1",
        name: "Classic Academic",
        description: "Clean single-column academic resume with section dividers",
        engine: Engine::Pdflatex,
        supported_sections: &[
            Section::Education,
            Section::Awards,
            Section::Experiences,
            Section::Skills,
            Section::Projects,
            Section::Leadership,
        ],
    },
    TemplateInfo {
        id: "template2",
        name: "Modern AltaCV",
        description: "Colorful modern layout with icons and a red accent bar",
        engine: Engine::Xelatex,
        supported_sections: &[
            Section::Skills,
            Section::Education,
            Section::Experiences,
            Section::Projects,
            Section::Awards,
            Section::Languages,
        ],
    },
    TemplateInfo {
        id: "template3",
        name: "Tabular Academic",
        description: "Education in a table, structured sections with tcolorbox headers",
        engine: Engine::Pdflatex,
        supported_sections: &[
            Section::Education,
            Section::Experiences,
            Section::Projects,
            Section::Skills,
            Section::Certifications,
            Section::Leadership,
            Section::Miscellaneous,
            Section::Coursework,
        ],
    },
    TemplateInfo {
        id: "template4",
        name: "Research Professional",
        description: "Professional layout with blue headings, profile section, and references",
        engine: Engine::Pdflatex,
        supported_sections: &[
            Section::Education,
            Section::Experiences,
            Section::Publications,
            Section::Projects,
            Section::Skills,
            Section::Languages,
            Section::References,
        ],
    },
    TemplateInfo {
        id: "template5",
        name: "Deedy Two-Column",
        description: "Two-column Deedy-inspired layout with left sidebar",
        engine: Engine::Xelatex,
        supported_sections: &[
            Section::Education,
            Section::Coursework,
            Section::Skills,
            Section::Experiences,
            Section::Projects,
            Section::Publications,
        ],
    },
    TemplateInfo {
        id: "template6",
        name: "Photo Resume",
        description: "Professional resume with summary, roles section, and certifications",
        engine: Engine::Pdflatex,
        supported_sections: &[
            Section::Summary,
            Section::Education,
            Section::Skills,
            Section::Projects,
            Section::Leadership,
            Section::Experiences,
            Section::Certifications,
            Section::References,
        ],
    },
    TemplateInfo {
        id: "template7",
        name: "IIT-Style",
        description: "Compact IIT-style resume with education table and grey section headers",
        engine: Engine::Pdflatex,
        supported_sections: &[
            Section::Education,
            Section::Awards,
            Section::Experiences,
            Section::Skills,
            Section::Projects,
            Section::Leadership,
            Section::Extracurricular,
        ],
    },
];

/// Looks up a registry entry by id.
pub fn find_template(id: &str) -> Option<&'static TemplateInfo> {
    TEMPLATES.iter().find(|t| t.id == id)
}
