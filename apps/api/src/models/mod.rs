pub mod resume;
pub mod suggestion;

pub use resume::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDraft};
pub use suggestion::{ActionPlan, ActionPlanItem, GradeReport, Priority, Suggestion};
