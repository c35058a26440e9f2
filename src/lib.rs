mod cli;
mod data;
mod detect;
mod project;
mod util;

pub use cli::{cli, cnb_detect};
pub use data::build_plan::{BuildPlan, DetectOutcome, Requirement, RequirementMetadata};
pub use data::package_json::{PackageJson, PackageJsonError};
pub use detect::{detect, DetectContext};
pub use project::find_project_path;
pub use util::logger::{BuildLogger, GenericLogger, Logger, MemLogger};
