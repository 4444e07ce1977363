//! Notification contract between a story runner and a report writer.
use crate::error::ReportError;
use crate::render::ErrorRecord;
use crate::step::{StepDescription, StepType};

/// Receives lifecycle notifications in execution order.
///
/// Runners call these one at a time and never outside valid nesting: no
/// scenario notification outside an open story, no step notification outside
/// an open scenario.
pub trait StoryListener {
    fn run_started(&mut self, count: usize) -> Result<(), ReportError>;

    /// Step descriptions known to the runner, announced before the first story.
    fn collected_steps(&mut self, steps: &[String]) -> Result<(), ReportError>;

    fn story_started(&mut self, title: &str, narrative: &str) -> Result<(), ReportError>;

    fn story_ended(&mut self, title: &str, narrative: &str) -> Result<(), ReportError>;

    fn scenario_started(&mut self, story_title: &str, scenario_name: &str)
        -> Result<(), ReportError>;

    fn scenario_succeeded(
        &mut self,
        story_title: &str,
        scenario_name: &str,
    ) -> Result<(), ReportError>;

    fn scenario_pending(
        &mut self,
        story_title: &str,
        scenario_name: &str,
        reason: &str,
    ) -> Result<(), ReportError>;

    fn scenario_failed(
        &mut self,
        story_title: &str,
        scenario_name: &str,
        error: &ErrorRecord,
    ) -> Result<(), ReportError>;

    /// A given-scenario step looked up the scenario it replays.
    fn found_scenario(
        &mut self,
        _step_type: StepType,
        _description: &str,
    ) -> Result<(), ReportError> {
        Ok(())
    }

    fn step_upcoming(
        &mut self,
        _step_type: StepType,
        _description: &StepDescription,
        _args: &[String],
    ) -> Result<(), ReportError> {
        Ok(())
    }

    fn step_succeeded(
        &mut self,
        step_type: StepType,
        description: &StepDescription,
        args: &[String],
    ) -> Result<(), ReportError>;

    fn step_pending(
        &mut self,
        step_type: StepType,
        description: &StepDescription,
        args: &[String],
    ) -> Result<(), ReportError>;

    fn step_failed(
        &mut self,
        step_type: StepType,
        description: &StepDescription,
        args: &[String],
    ) -> Result<(), ReportError>;

    fn run_ended(&mut self) -> Result<(), ReportError>;
}
