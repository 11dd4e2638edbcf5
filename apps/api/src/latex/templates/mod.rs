// One renderer per registry entry. Each file owns its template's patch and
// elision tables alongside the injection logic.

mod classic_academic;
mod deedy_two_column;
mod iit_style;
mod modern_altacv;
mod photo_resume;
mod research_professional;
mod tabular_academic;

pub use classic_academic::ClassicAcademic;
pub use deedy_two_column::DeedyTwoColumn;
pub use iit_style::IitStyle;
pub use modern_altacv::ModernAltaCv;
pub use photo_resume::PhotoResume;
pub use research_professional::ResearchProfessional;
pub use tabular_academic::TabularAcademic;
