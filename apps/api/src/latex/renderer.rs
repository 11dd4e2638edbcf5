//! Renderer contract and dispatch.
//!
//! Every template implements [`LatexRenderer`]; the shared pipeline in
//! [`render_layout`] does the rest:
//!
//! 1. load the bundled layout asset
//! 2. apply the template's structural patches
//! 3. elide structural blocks for empty sections (block-removal templates)
//! 4. split at `\begin{document}`
//! 5. build the injection block from the resume data
//! 6. reassemble `preamble + injection + body`
//!
//! Templates that use the placeholder strategy instead of block removal emit
//! their placeholder items from `inject` and declare no elision rules.

use crate::latex::assets::layout_source;
use crate::latex::registry::TemplateInfo;
use crate::latex::rules::{apply_elisions, apply_patches, ElisionRule, Patch};
use crate::latex::templates::{
    ClassicAcademic, DeedyTwoColumn, IitStyle, ModernAltaCv, PhotoResume, ResearchProfessional,
    TabularAcademic,
};
use crate::latex::RenderError;
use crate::models::resume::ResumeData;

/// Marker separating a layout's preamble from its body.
pub const DOCUMENT_MARKER: &str = r"\begin{document}";

/// One resume layout.
pub trait LatexRenderer: Send + Sync {
    /// The registry entry this renderer implements.
    fn info(&self) -> &'static TemplateInfo;

    /// Literal corrections applied to the raw asset before anything else.
    fn patches(&self) -> &'static [Patch] {
        &[]
    }

    /// Section blocks removed from the layout when their data is empty.
    fn elisions(&self) -> &'static [ElisionRule] {
        &[]
    }

    /// Builds the injection block for `data`.
    fn inject(&self, data: &ResumeData) -> String;

    /// Renders `data` into complete LaTeX source.
    fn render(&self, data: &ResumeData) -> Result<String, RenderError> {
        let asset = layout_source(self.info().id)
            .ok_or_else(|| RenderError::MissingAsset(self.info().id.to_string()))?;
        render_layout(self, asset, data)
    }
}

/// Runs the shared render pipeline against an explicit layout asset.
pub fn render_layout<R>(renderer: &R, asset: &str, data: &ResumeData) -> Result<String, RenderError>
where
    R: LatexRenderer + ?Sized,
{
    let patched = apply_patches(asset, renderer.patches());
    let tex = apply_elisions(&patched, renderer.elisions(), data);

    let (preamble, body) =
        split_at_document(&tex).ok_or_else(|| RenderError::StructuralAsset {
            template_id: renderer.info().id.to_string(),
            marker: DOCUMENT_MARKER,
        })?;

    let injection = renderer.inject(data);
    Ok(format!("{preamble}{injection}\n{body}"))
}

/// Splits `tex` into `(preamble, body)` at the first `\begin{document}`.
/// The body keeps the marker.
pub fn split_at_document(tex: &str) -> Option<(&str, &str)> {
    tex.find(DOCUMENT_MARKER).map(|idx| tex.split_at(idx))
}

/// Resolves a template id to its renderer.
pub fn renderer_for(template_id: &str) -> Result<&'static dyn LatexRenderer, RenderError> {
    let renderer: &'static dyn LatexRenderer = match template_id {
        "template1" => &ClassicAcademic,
        "template2" => &ModernAltaCv,
        "template3" => &TabularAcademic,
        "template4" => &ResearchProfessional,
        "template5" => &DeedyTwoColumn,
        "template6" => &PhotoResume,
        "template7" => &IitStyle,
        other => return Err(RenderError::UnknownTemplate(other.to_string())),
    };
    Ok(renderer)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::latex::injection::INJECTION_HEADER;
    use crate::latex::TEMPLATES;
    use crate::models::resume::{ExperienceEntry, PersonData, ProjectEntry, SkillCategory};

    /// Ada with one experience and one bullet, everything else empty.
    pub(crate) fn minimal_resume() -> ResumeData {
        ResumeData {
            person: PersonData {
                first_name: "Ada".to_string(),
                ..Default::default()
            },
            experiences: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                company: "Analytical Engines".to_string(),
                dates: "1842--1843".to_string(),
                bullets: vec!["Wrote the first published program".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// A resume with hostile text in every commonly used field.
    pub(crate) fn hostile_resume() -> ResumeData {
        let nasty = r"100% \end{document} $x$ & #1 {a} ~b^c_d".to_string();
        ResumeData {
            person: PersonData {
                first_name: nasty.clone(),
                tagline: nasty.clone(),
                profile: nasty.clone(),
                ..Default::default()
            },
            experiences: vec![ExperienceEntry {
                title: nasty.clone(),
                company: nasty.clone(),
                bullets: vec![nasty.clone()],
                ..Default::default()
            }],
            projects: vec![ProjectEntry {
                title: nasty.clone(),
                bullets: vec![nasty.clone()],
                ..Default::default()
            }],
            skills: crate::models::resume::SkillsData {
                categories: vec![SkillCategory {
                    name: nasty.clone(),
                    items: nasty.clone(),
                }],
                flat: vec![],
            },
            summary: vec![nasty.clone()],
            extracurricular: vec![nasty],
            ..Default::default()
        }
    }

    struct CorruptLayout;

    impl LatexRenderer for CorruptLayout {
        fn info(&self) -> &'static TemplateInfo {
            &TEMPLATES[0]
        }

        fn inject(&self, _data: &ResumeData) -> String {
            INJECTION_HEADER.to_string()
        }
    }

    #[test]
    fn test_every_registered_id_resolves_to_its_renderer() {
        for template in &TEMPLATES {
            let renderer = renderer_for(template.id).unwrap();
            assert_eq!(renderer.info().id, template.id);
        }
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        let err = renderer_for("template42").err().unwrap();
        assert!(matches!(err, RenderError::UnknownTemplate(ref id) if id == "template42"));
        assert_eq!(err.to_string(), "Unknown template: template42");
    }

    #[test]
    fn test_missing_document_marker_is_structural_error() {
        let err = render_layout(
            &CorruptLayout,
            "\\documentclass{article}\nno body here",
            &ResumeData::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::StructuralAsset { .. }));
    }

    #[test]
    fn test_injection_lands_between_preamble_and_body() {
        let out = render_layout(
            &CorruptLayout,
            "\\documentclass{article}\n\\begin{document}\nbody\n\\end{document}\n",
            &ResumeData::default(),
        )
        .unwrap();
        assert_eq!(
            out,
            format!("\\documentclass{{article}}\n{INJECTION_HEADER}\n\\begin{{document}}\nbody\n\\end{{document}}\n")
        );
    }

    #[test]
    fn test_split_keeps_marker_in_body() {
        let (pre, body) = split_at_document("a\\begin{document}b").unwrap();
        assert_eq!(pre, "a");
        assert_eq!(body, "\\begin{document}b");
        assert!(split_at_document("nothing").is_none());
    }

    #[test]
    fn test_all_templates_render_empty_resume() {
        for template in &TEMPLATES {
            let tex = renderer_for(template.id)
                .unwrap()
                .render(&ResumeData::default())
                .unwrap_or_else(|e| panic!("{} failed: {e}", template.id));
            let injected = tex.find(INJECTION_HEADER.trim()).unwrap();
            let body = tex.find(DOCUMENT_MARKER).unwrap();
            assert!(injected < body, "{}: injection after body", template.id);
            assert_eq!(tex.matches(DOCUMENT_MARKER).count(), 1, "{}", template.id);
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let data = minimal_resume();
        for template in &TEMPLATES {
            let renderer = renderer_for(template.id).unwrap();
            assert_eq!(
                renderer.render(&data).unwrap(),
                renderer.render(&data).unwrap(),
                "{}",
                template.id
            );
        }
    }

    #[test]
    fn test_user_text_cannot_break_structure() {
        let data = hostile_resume();
        for template in &TEMPLATES {
            let tex = renderer_for(template.id).unwrap().render(&data).unwrap();
            assert_eq!(
                tex.matches("\\end{document}").count(),
                1,
                "{}: user text closed the document",
                template.id
            );
            assert!(!tex.contains("100% "), "{}: raw percent leaked", template.id);
        }
    }

    #[test]
    fn test_empty_supported_sections_leave_no_empty_lists() {
        let data = ResumeData::default();
        for template in &TEMPLATES {
            let renderer = renderer_for(template.id).unwrap();
            let tex = renderer.render(&data).unwrap();
            for rule in renderer.elisions() {
                assert!(
                    !rule.pattern.is_match(&tex),
                    "{}: block for {} survived",
                    template.id,
                    rule.label
                );
                assert!(tex.contains(&rule.replacement()), "{}: {}", template.id, rule.label);
            }
        }
    }
}
