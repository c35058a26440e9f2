use std::path::PathBuf;
use std::{env, fs, process};

use anyhow::anyhow;
use clap::{App, AppSettings, Arg, ArgMatches};

use crate::data::build_plan::{BuildPlan, DetectOutcome};
use crate::data::buildpack_toml::BuildpackToml;
use crate::detect::{detect, DetectContext};
use crate::util::logger::{BuildLogger, Logger};

/// Exit code the lifecycle expects from `bin/detect` when the buildpack does
/// not apply to the application.
const DETECT_FAIL_EXIT_CODE: i32 = 100;

pub fn cli() {
    if self::execute(env::args().collect()).is_err() {
        process::exit(1);
    }
}

pub fn execute(args: Vec<String>) -> Result<(), anyhow::Error> {
    let app = App::new("Yarn Start Buildpack CLI")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            App::new("detect")
                .about("Detect whether this buildpack can build the application")
                .setting(AppSettings::ArgRequiredElseHelp)
                .arg(
                    Arg::new("source")
                        .help("path to the application source directory")
                        .required(true),
                )
                .arg(
                    Arg::new("plan")
                        .help("path to write the build plan to when detection passes")
                        .takes_value(true)
                        .long("plan")
                        .short('o'),
                )
                .arg(
                    Arg::new("debug")
                        .help("enable debug logging")
                        .long("debug")
                        .short('d'),
                ),
        );

    let matches = app.get_matches_from(args);
    match matches.subcommand() {
        Some(("detect", matches)) => {
            let mut logger = BuildLogger::new(matches.is_present("debug"), true);
            run_detect(matches, &mut logger)
        }
        Some(_) => Err(anyhow!(
            "Command {} not supported",
            matches.subcommand().unwrap().0
        )),
        _ => Err(anyhow!("cli command missing")),
    }
}

fn run_detect(args: &ArgMatches, logger: &mut BuildLogger) -> Result<(), anyhow::Error> {
    let descriptor: BuildpackToml = toml::from_str(include_str!("../buildpack.toml"))?;
    logger.header(&descriptor.buildpack.name)?;

    let working_dir = PathBuf::from(args.value_of("source").unwrap());
    let context = DetectContext::from_env(working_dir)?;

    match detect(&context, logger) {
        Ok(DetectOutcome::Pass(plan)) => {
            emit_plan(&plan, args.value_of("plan"), logger)?;
            Ok(())
        }
        Ok(DetectOutcome::Fail(reason)) => {
            logger.warning("Detection failed", reason)?;
            process::exit(DETECT_FAIL_EXIT_CODE);
        }
        Err(e) => logger.error("Detection error", format!("{:#}", e)),
    }
}

fn emit_plan(
    plan: &BuildPlan,
    path: Option<&str>,
    logger: &mut impl Logger,
) -> Result<(), anyhow::Error> {
    let rendered = toml::to_string(plan)?;
    match path {
        Some(path) => {
            fs::write(path, &rendered)?;
            logger.debug(format!("Build plan written to {}", path))?;
        }
        None => logger.info(rendered.trim_end())?,
    }
    Ok(())
}

/// `bin/detect` per the buildpack lifecycle: the app directory is the process
/// working directory and the second positional argument is the build plan
/// path. Environment variables come straight from the process environment.
pub fn cnb_detect() {
    let mut logger = BuildLogger::new(false, false);

    match run_cnb_detect(env::args().collect(), &mut logger) {
        Ok(DetectOutcome::Pass(_)) => {}
        Ok(DetectOutcome::Fail(reason)) => {
            let _ = logger.info(reason);
            process::exit(DETECT_FAIL_EXIT_CODE);
        }
        Err(e) => {
            let _ = logger.error("Detection error", format!("{:#}", e));
            process::exit(1);
        }
    }
}

fn run_cnb_detect(
    args: Vec<String>,
    logger: &mut BuildLogger,
) -> Result<DetectOutcome, anyhow::Error> {
    let working_dir = env::current_dir()?;
    let context = DetectContext::from_env(working_dir)?;

    let outcome = detect(&context, logger)?;
    if let (DetectOutcome::Pass(plan), Some(plan_path)) = (&outcome, args.get(2)) {
        fs::write(plan_path, toml::to_string(plan)?)?;
    }
    Ok(outcome)
}
