//! Project generation
//!
//! One invocation of the project generator with the action keyword for
//! the host platform (Visual Studio, Xcode, or gmake), optionally
//! overridden from the command line.

use forgekit_core::Result;

use crate::invoke::{Plan, ToolInvocation};
use crate::toolchain::Toolchain;

/// Plan the project-generator invocation
pub fn plan(toolchain: &Toolchain, action: Option<&str>) -> Result<Plan> {
    let generator = toolchain.project_generator()?;
    let action = action.unwrap_or_else(|| toolchain.platform().project_action());

    let mut plan = Plan::default();
    plan.push(ToolInvocation::new(generator).arg(action));
    Ok(plan)
}
