use crate::plan::{BuildPlan, BuildSummary};
use crate::step::{Step, TaskStep};

/// Formats build plans into human-readable tutorials
pub struct TutorialFormatter;

impl TutorialFormatter {
    /// Format a build plan as a numbered list, one step per entry with its wiring instruction.
    pub fn format_plan(plan: &BuildPlan) -> String {
        if plan.is_empty() {
            return "Nothing to build: the workflow has no executable nodes.\n".to_string();
        }

        let mut result = String::new();
        for step in plan.steps() {
            match step {
                Step::Task(task) => {
                    result.push_str(&format!(
                        "{}. {}{} ({})\n",
                        task.step_number,
                        task.node.name,
                        Self::format_markers(task),
                        task.node.node_type
                    ));
                }
                Step::Return(ret) => {
                    result.push_str(&format!(
                        "{}. ↩ Back to '{}'\n",
                        ret.step_number, ret.return_to_node_name
                    ));
                }
            }
            result.push_str(&format!(
                "   {}\n",
                step.connection_info().connection_instructions
            ));
        }

        if plan.report().is_degraded() {
            result.push_str(&format!(
                "\nNote: {} node(s) could not be ordered and were appended as-is.\n",
                plan.report().forced_nodes.len()
            ));
        }
        result
    }

    /// Format a summary block for the end of a tutorial.
    pub fn format_summary(summary: &BuildSummary) -> String {
        let mut result = String::new();
        result.push_str(&format!(
            "Steps:        {} ({} real, {} return)\n",
            summary.total_steps, summary.real_steps, summary.return_steps
        ));
        result.push_str(&format!("Triggers:     {}\n", summary.triggers));
        result.push_str(&format!("Dependencies: {}\n", summary.dependencies));
        result.push_str(&format!("Merge points: {}\n", summary.merge_points));
        result.push_str(&format!("Node types:   {}\n", summary.node_types.len()));
        result.push_str(&format!("Complexity:   {}\n", summary.complexity));
        result
    }

    fn format_markers(step: &TaskStep) -> String {
        let mut markers = String::new();
        if step.is_trigger {
            markers.push_str(" [trigger]");
        }
        if step.is_merge_node {
            markers.push_str(" [merge]");
        }
        if step.is_dependency {
            markers.push_str(" [dependency]");
        }
        markers
    }
}
