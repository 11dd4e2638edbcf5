//! Bundled layout assets, one `.tex` file per template id.
//!
//! Assets are compiled into the binary, so they are immutable for the lifetime
//! of the process and need no filesystem access at render time.

/// Returns the raw layout source for `template_id`, before any patches.
pub fn layout_source(template_id: &str) -> Option<&'static str> {
    let source = match template_id {
        "template1" => include_str!("../../templates/template1.tex"),
        "template2" => include_str!("../../templates/template2.tex"),
        "template3" => include_str!("../../templates/template3.tex"),
        "template4" => include_str!("../../templates/template4.tex"),
        "template5" => include_str!("../../templates/template5.tex"),
        "template6" => include_str!("../../templates/template6.tex"),
        "template7" => include_str!("../../templates/template7.tex"),
        _ => return None,
    };
    Some(source)
}
