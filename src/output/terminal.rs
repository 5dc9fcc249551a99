//! Terminal output formatting with severity colors.

use colored::Colorize;

use crate::result::{ModuleResult, OperationResult};
use crate::state::ContrastState;

fn state_colored(state: ContrastState) -> String {
    match state {
        ContrastState::Match => state.label().green().bold().to_string(),
        ContrastState::Warn => state.label().yellow().bold().to_string(),
        ContrastState::Suspicious => state.label().red().bold().to_string(),
    }
}

/// Format a result tree as a human-readable, severity-colored summary.
///
/// Operations are listed worst-first. One line per operation plus one
/// per pipeline; detailed per-measurement tables are left to the HTML
/// reporting collaborator.
pub fn format_module(module: &ModuleResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} vs {}: {}\n",
        module.reference,
        module.profile,
        state_colored(module.state)
    ));
    if let Ok(sp) = module.similarity() {
        output.push_str(&format!("  {}\n", sp));
    }

    for operation in module.operations_by_severity() {
        output.push_str(&format_operation(operation));
    }

    output
}

fn format_operation(operation: &OperationResult) -> String {
    let mut output = String::new();

    if !operation.present {
        output.push_str(&format!(
            "  {}  {}  (not present in profile)\n",
            operation.operation,
            state_colored(operation.state)
        ));
        return output;
    }

    output.push_str(&format!(
        "  {}  {}",
        operation.operation,
        state_colored(operation.state)
    ));
    if let Ok(sp) = operation.similarity() {
        output.push_str(&format!("  {}", sp));
    }
    output.push('\n');

    for pipeline in &operation.pipelines {
        output.push_str(&format!(
            "    {} [{}]  {}  match {:.4}, warn {:.4}\n",
            pipeline.pipeline,
            pipeline.direction,
            state_colored(pipeline.state),
            pipeline.bounds.match_bound,
            pipeline.bounds.warn_bound
        ));
    }

    if let Some(bounds) = &operation.time_bounds {
        output.push_str(&format!(
            "    execution time  match ({:.4}, {:.4}), warn ({:.4}, {:.4})\n",
            bounds.match_low, bounds.match_high, bounds.warn_low, bounds.warn_high
        ));
        for (i, et) in operation.exec_times.iter().enumerate() {
            output.push_str(&format!(
                "      #{}: {:.4} {}  {}\n",
                i + 1,
                et.time,
                et.unit,
                state_colored(et.state)
            ));
        }
    }

    output
}
