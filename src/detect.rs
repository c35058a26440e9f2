use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{anyhow, Context};

use crate::data::build_plan::{BuildPlan, DetectOutcome, Requirement};
use crate::data::package_json::{PackageJson, PackageJsonError};
use crate::project::find_project_path;
use crate::util::logger::Logger;

pub const NODE: &str = "node";
pub const YARN: &str = "yarn";
pub const NODE_MODULES: &str = "node-modules";
pub const WATCHEXEC: &str = "watchexec";

const LIVE_RELOAD_VAR: &str = "BP_LIVE_RELOAD_ENABLED";
const PROJECT_PATH_VAR: &str = "BP_NODE_PROJECT_PATH";
const SLUG_IGNORE: &str = ".slugignore";

/// Everything detection reads from its surroundings, captured up front so the
/// decision itself touches no process globals.
#[derive(Debug, Clone)]
pub struct DetectContext {
    /// Candidate application directory.
    pub working_dir: PathBuf,
    /// Directory searched for a `.slugignore`; normally the process working
    /// directory, which is not necessarily `working_dir`.
    pub slug_ignore_dir: PathBuf,
    /// Raw `BP_NODE_PROJECT_PATH` value, if set.
    pub project_path: Option<String>,
    /// Raw `BP_LIVE_RELOAD_ENABLED` value, if set.
    pub live_reload: Option<String>,
}

impl DetectContext {
    /// Build a context from the process environment.
    pub fn from_env(working_dir: impl Into<PathBuf>) -> Result<Self, anyhow::Error> {
        Ok(DetectContext {
            working_dir: working_dir.into(),
            slug_ignore_dir: env::current_dir().context("failed to resolve current directory")?,
            project_path: env::var(PROJECT_PATH_VAR).ok(),
            live_reload: env::var(LIVE_RELOAD_VAR).ok(),
        })
    }
}

/// `bin/detect`
///
/// Decides whether the application is a Yarn-managed Node.js project and, if
/// so, which build plan requirements this buildpack needs.
pub fn detect(
    context: &DetectContext,
    logger: &mut impl Logger,
) -> Result<DetectOutcome, anyhow::Error> {
    let project_path = find_project_path(&context.working_dir, context.project_path.as_deref())?;

    match fs::metadata(project_path.join("yarn.lock")) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(DetectOutcome::Fail(format!(
                "no 'yarn.lock' found in the project path {}",
                project_path.display()
            )));
        }
        Err(e) => return Err(anyhow::Error::new(e).context("failed to stat yarn.lock")),
    }

    let package = match PackageJson::read(&project_path) {
        Ok(package) => package,
        Err(PackageJsonError::Missing(_)) => {
            return Ok(DetectOutcome::Fail(format!(
                "no 'package.json' found in project path {}",
                project_path.display()
            )));
        }
        Err(e) => return Err(anyhow::Error::new(e).context("failed to open package.json")),
    };

    if let Some(start) = package.start_script() {
        logger.info(format!("Start script: {}", start))?;
    }

    let launch_node_modules = !slug_ignore_excludes_node_modules(&context.slug_ignore_dir, logger);

    let mut plan = BuildPlan::default();
    plan.requires.push(Requirement::new(NODE, true));
    plan.requires.push(Requirement::new(YARN, true));
    plan.requires
        .push(Requirement::new(NODE_MODULES, launch_node_modules));

    if live_reload_enabled(context.live_reload.as_deref())? {
        plan.requires.push(Requirement::new(WATCHEXEC, true));
    }

    Ok(DetectOutcome::Pass(plan))
}

fn live_reload_enabled(raw: Option<&str>) -> Result<bool, anyhow::Error> {
    match raw {
        None => Ok(false),
        Some(raw) => parse_bool(raw)
            .ok_or_else(|| anyhow!("failed to parse {} value {}", LIVE_RELOAD_VAR, raw)),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s == "1" || s.eq_ignore_ascii_case("t") || s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s == "0" || s.eq_ignore_ascii_case("f") || s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// True when `<dir>/.slugignore` has an exact `/node_modules` line. Any
/// trouble reading the file is logged and treated as if the file were absent.
fn slug_ignore_excludes_node_modules(dir: &Path, logger: &mut impl Logger) -> bool {
    let path = dir.join(SLUG_IGNORE);

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return false,
        Err(e) => {
            let _ = logger.warning(format!("Error opening {}", SLUG_IGNORE), e);
            return false;
        }
    };

    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => {
                if line == "/node_modules" {
                    return true;
                }
            }
            Err(e) => {
                let _ = logger.warning(format!("Error reading {}", SLUG_IGNORE), e);
                return false;
            }
        }
    }

    false
}
