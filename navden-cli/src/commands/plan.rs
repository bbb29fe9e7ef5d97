//! Mission planner CLI commands.
//!
//! Waypoints live in `~/.navden/waypoints.json`. Each edit loads the plan,
//! applies one change and writes it back. Positions shown to the user are
//! 1-based; ids are the stable ids assigned by the planner.

use std::path::Path;

use clap::Subcommand;
use navden::demo::DEFAULT_START;
use navden::model::WaypointId;
use navden::planner::store::{load_plan, plan_file_path, save_plan};
use navden::planner::{MissionPlan, CANVAS_HEIGHT, CANVAS_WIDTH};

use super::common::format_plan;
use crate::error::CliError;

/// Plan subcommands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum PlanCommands {
    /// List the planned waypoints
    List,

    /// Add a waypoint (coordinates are clamped to the 800x600 canvas)
    Add {
        x: f64,
        y: f64,

        /// Insert at this 1-based position instead of appending
        #[arg(long)]
        at: Option<usize>,
    },

    /// Remove a waypoint by id
    Remove { id: WaypointId },

    /// Move a waypoint to new coordinates
    Move { id: WaypointId, x: f64, y: f64 },

    /// Move the waypoint at 1-based position FROM to position TO
    Reorder { from: usize, to: usize },

    /// Move a waypoint one place earlier in the route
    Up { id: WaypointId },

    /// Move a waypoint one place later in the route
    Down { id: WaypointId },

    /// Remove every waypoint
    Clear,

    /// Replace the plan with the default demo route
    Default,
}

impl PlanCommands {
    fn is_read_only(&self) -> bool {
        matches!(self, PlanCommands::List)
    }
}

/// Run a plan subcommand against the default plan file.
pub fn run(command: PlanCommands) -> Result<(), CliError> {
    let output = run_at(&plan_file_path(), command)?;
    println!("{}", output);
    Ok(())
}

fn run_at(path: &Path, command: PlanCommands) -> Result<String, CliError> {
    let mut plan = load_plan(path)?;
    let read_only = command.is_read_only();

    let message = apply(&mut plan, command)?;
    if read_only {
        return Ok(message);
    }

    save_plan(path, &plan)?;
    Ok(format!("{}\n\n{}", message, format_plan(&plan, DEFAULT_START)))
}

/// Apply one edit and describe it.
pub fn apply(plan: &mut MissionPlan, command: PlanCommands) -> Result<String, CliError> {
    let message = match command {
        PlanCommands::List => format_plan(plan, DEFAULT_START),
        PlanCommands::Add { x, y, at } => {
            let id = match at {
                Some(position) => plan.insert(to_index(position)?, x, y)?,
                None => plan.add(x, y)?,
            };
            let waypoint = plan
                .get(id)
                .ok_or(navden::planner::PlannerError::UnknownWaypoint(id))?;
            let clamped = if waypoint.x != x || waypoint.y != y {
                format!(
                    " (clamped to the {}x{} canvas)",
                    CANVAS_WIDTH, CANVAS_HEIGHT
                )
            } else {
                String::new()
            };
            format!(
                "Added waypoint {} at ({:.1}, {:.1}){}",
                id, waypoint.x, waypoint.y, clamped
            )
        }
        PlanCommands::Remove { id } => {
            let removed = plan.remove(id)?;
            format!(
                "Removed waypoint {} at ({:.1}, {:.1})",
                removed.id, removed.x, removed.y
            )
        }
        PlanCommands::Move { id, x, y } => {
            plan.move_to(id, x, y)?;
            format!("Moved waypoint {}", id)
        }
        PlanCommands::Reorder { from, to } => {
            plan.reorder(to_index(from)?, to_index(to)?)?;
            format!("Moved position {} to {}", from, to)
        }
        PlanCommands::Up { id } => {
            plan.move_up(id)?;
            format!("Moved waypoint {} up", id)
        }
        PlanCommands::Down { id } => {
            plan.move_down(id)?;
            format!("Moved waypoint {} down", id)
        }
        PlanCommands::Clear => {
            let count = plan.len();
            plan.clear();
            format!("Cleared {} waypoints", count)
        }
        PlanCommands::Default => {
            plan.restore_demo_route();
            "Restored the default demo route".to_string()
        }
    };

    tracing::debug!(waypoints = plan.len(), "Plan edited");
    Ok(message)
}

/// Convert a 1-based position from the command line to an index.
fn to_index(position: usize) -> Result<usize, CliError> {
    position.checked_sub(1).ok_or_else(|| {
        CliError::InvalidArgument("waypoint positions start at 1 (got 0)".to_string())
    })
}
