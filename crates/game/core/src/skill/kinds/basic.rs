use crate::skill::behavior::{SkillBehavior, SkillContext};
use crate::skill::data::SkillData;

/// Fallback behavior with no gameplay effect.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicSkill;

impl SkillBehavior for BasicSkill {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn execute(&mut self, data: &SkillData, _ctx: &mut SkillContext<'_>) {
        tracing::info!(skill = %data.name, "basic skill used");
    }
}
