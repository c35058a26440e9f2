extern crate yarn_start_buildpack;

use std::fs;
use std::path::PathBuf;

use assert_matches::assert_matches;
use tempfile::{tempdir, TempDir};

use yarn_start_buildpack::{detect, BuildPlan, DetectContext, DetectOutcome, MemLogger};

struct TempContext {
    // Hold reference to the temp dir so it's not cleaned off disk early
    _tmp_dir: TempDir,
    context: DetectContext,
}

fn make_temp_context() -> TempContext {
    let tmp_dir = tempdir().unwrap();
    let app_dir = tmp_dir.path().join("app");
    let cwd = tmp_dir.path().join("cwd");
    fs::create_dir_all(&app_dir).unwrap();
    fs::create_dir_all(&cwd).unwrap();

    let context = DetectContext {
        working_dir: app_dir,
        slug_ignore_dir: cwd,
        project_path: None,
        live_reload: None,
    };
    TempContext {
        _tmp_dir: tmp_dir,
        context,
    }
}

fn write_yarn_app(dir: &PathBuf, package_json: &str) {
    fs::write(dir.join("yarn.lock"), "# yarn lockfile v1\n").unwrap();
    fs::write(dir.join("package.json"), package_json).unwrap();
}

fn names_and_launch(plan: &BuildPlan) -> Vec<(String, bool)> {
    plan.requires
        .iter()
        .map(|r| (r.name.clone(), r.metadata.launch))
        .collect()
}

#[test]
fn test_detect_plain_yarn_app() {
    let tmp = make_temp_context();
    write_yarn_app(&tmp.context.working_dir, r#"{"name": "frontend"}"#);

    let mut logger = MemLogger::new(false, false);
    let outcome = detect(&tmp.context, &mut logger).unwrap();

    assert_matches!(outcome, DetectOutcome::Pass(plan) => {
        assert_eq!(
            names_and_launch(&plan),
            vec![
                ("node".to_string(), true),
                ("yarn".to_string(), true),
                ("node-modules".to_string(), true),
            ]
        );
    });
    // No start script declared, so nothing to trace.
    assert!(logger.stdout_as_string().is_empty());
}

#[test]
fn test_detect_with_live_reload_and_slug_ignore() {
    let tmp = make_temp_context();
    write_yarn_app(
        &tmp.context.working_dir,
        r#"{"scripts": {"start": "yarn run serve"}}"#,
    );
    fs::write(
        tmp.context.slug_ignore_dir.join(".slugignore"),
        "/node_modules\n",
    )
    .unwrap();

    let mut context = tmp.context.clone();
    context.live_reload = Some("true".to_string());

    let mut logger = MemLogger::new(false, false);
    let outcome = detect(&context, &mut logger).unwrap();

    assert_matches!(outcome, DetectOutcome::Pass(plan) => {
        assert_eq!(
            names_and_launch(&plan),
            vec![
                ("node".to_string(), true),
                ("yarn".to_string(), true),
                ("node-modules".to_string(), false),
                ("watchexec".to_string(), true),
            ]
        );
    });
    assert!(logger.stdout_as_string().contains("yarn run serve"));
}

#[test]
fn test_detect_fail_messages_name_the_project_path() {
    let tmp = make_temp_context();

    let outcome = detect(&tmp.context, &mut MemLogger::new(false, false)).unwrap();
    assert_matches!(outcome, DetectOutcome::Fail(reason) => {
        assert_eq!(
            reason,
            format!(
                "no 'yarn.lock' found in the project path {}",
                tmp.context.working_dir.display()
            )
        );
    });

    fs::write(tmp.context.working_dir.join("yarn.lock"), "").unwrap();
    let outcome = detect(&tmp.context, &mut MemLogger::new(false, false)).unwrap();
    assert_matches!(outcome, DetectOutcome::Fail(reason) => {
        assert_eq!(
            reason,
            format!(
                "no 'package.json' found in project path {}",
                tmp.context.working_dir.display()
            )
        );
    });
}

#[test]
fn test_malformed_package_json_is_a_hard_error() {
    let tmp = make_temp_context();
    fs::write(tmp.context.working_dir.join("yarn.lock"), "").unwrap();
    fs::write(tmp.context.working_dir.join("package.json"), "{oops").unwrap();

    let err = detect(&tmp.context, &mut MemLogger::new(false, false)).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to open package.json"));
}

#[test]
fn test_build_plan_toml_round_trip() {
    let tmp = make_temp_context();
    write_yarn_app(&tmp.context.working_dir, "{}");

    let outcome = detect(&tmp.context, &mut MemLogger::new(false, false)).unwrap();
    let plan = match outcome {
        DetectOutcome::Pass(plan) => plan,
        other => panic!("expected a pass, got {:?}", other),
    };

    let rendered = toml::to_string(&plan).unwrap();
    let reparsed: BuildPlan = toml::from_str(&rendered).unwrap();
    assert_eq!(reparsed, plan);
}
