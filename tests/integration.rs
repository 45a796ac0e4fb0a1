use std::fs;
use std::path::{Path, PathBuf};

use jinjadir::args::parse_arguments;
use jinjadir::error::JinjadirError;
use jinjadir::render::{process_templates, ProcessOptions};
use jinjadir::{init, InitOptions};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn write_template(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn init_options(templates: &Path, target: &Path, args: &[&str]) -> InitOptions {
    InitOptions {
        templates_path: templates.to_path_buf(),
        target_path: Some(target.to_path_buf()),
        working_dir: std::env::temp_dir(),
        args: args.iter().map(|a| a.to_string()).collect(),
        autoescape: false,
        dry_run: false,
    }
}

#[test]
fn test_render_config_template() {
    let output_dir = tempfile::tempdir().unwrap();
    let target = output_dir.path().join("my_app");

    let report = init(init_options(
        &fixture_path("config-template"),
        &target,
        &[
            "name_arg=confname",
            "value_arg=value0",
            "typer_version_arg=1.3.2",
        ],
    ))
    .unwrap();

    let expected_conf = "confname {\n    key = \"value0\"\n    key1 = \"value1\"\n}\n";
    assert_eq!(
        fs::read_to_string(target.join("config.conf")).unwrap(),
        expected_conf
    );
    assert_eq!(
        fs::read_to_string(target.join("more-configs/config.conf")).unwrap(),
        expected_conf
    );
    assert_eq!(
        fs::read_to_string(target.join("more-configs/requirements.txt")).unwrap(),
        "typer==1.3.2"
    );

    let written: Vec<_> = report
        .files
        .iter()
        .map(|f| f.relative_path.as_str())
        .collect();
    assert_eq!(
        written,
        vec![
            "config.conf",
            "more-configs/config.conf",
            "more-configs/requirements.txt"
        ]
    );
}

#[test]
fn test_render_placeholder_directory_and_file_names() {
    let templates = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write_template(
        templates.path(),
        "{{ dir_name }}/requirements-{{ env }}.txt",
        "typer=={{ typer_version_arg }}",
    );

    init(init_options(
        templates.path(),
        target.path(),
        &["typer_version_arg=1.11.0", "dir_name=requirements", "env=dev"],
    ))
    .unwrap();

    assert_eq!(
        fs::read_to_string(target.path().join("requirements/requirements-dev.txt")).unwrap(),
        "typer==1.11.0"
    );
    assert!(!target.path().join("{{ dir_name }}").exists());
}

#[test]
fn test_render_python_cli_fixture() {
    let output_dir = tempfile::tempdir().unwrap();

    init(init_options(
        &fixture_path("python-cli"),
        output_dir.path(),
        &["project=greeter"],
    ))
    .unwrap();

    let cli = fs::read_to_string(output_dir.path().join("greeter/cli.py")).unwrap();
    assert!(cli.starts_with("\"\"\"greeter command line entrypoint.\"\"\""));
    assert!(cli.contains("print(f\"Hello, {name}!\")"));

    let test = fs::read_to_string(output_dir.path().join("tests/test_greeter.py")).unwrap();
    assert!(test.contains("from greeter.cli import app"));
}

#[test]
fn test_placeholder_free_templates_are_copied_byte_for_byte() {
    let template_dir = fixture_path("rust-cli");
    let output_dir = tempfile::tempdir().unwrap();

    init(init_options(&template_dir, output_dir.path(), &[])).unwrap();

    for rel in ["src/main.rs", "tests/integration_test.rs"] {
        let source = fs::read(template_dir.join(rel)).unwrap();
        let rendered = fs::read(output_dir.path().join(rel)).unwrap();
        assert_eq!(source, rendered, "{rel} should be unchanged");
        assert_eq!(rendered.last(), Some(&b'\n'));
    }
}

#[test]
fn test_every_missing_variable_is_reported_once() {
    let templates = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write_template(templates.path(), "a.txt", "{{ first }}");
    write_template(templates.path(), "nested/b.txt", "{{ second }} {{ first }}");
    write_template(templates.path(), "nested/deeper/c.txt", "{{ third }}");
    write_template(templates.path(), "{{ fourth }}.txt", "static");

    let err = init(init_options(templates.path(), target.path(), &[])).unwrap_err();

    match err {
        JinjadirError::MissingVariables {
            mut names,
            templates_path,
        } => {
            names.sort();
            assert_eq!(names, vec!["first", "fourth", "second", "third"]);
            assert_eq!(templates_path, templates.path());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_variables_message_quotes_names() {
    let templates = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write_template(
        templates.path(),
        "requirements.txt",
        "typer=={{ typer_version_arg }}",
    );

    let err = init(init_options(templates.path(), target.path(), &[])).unwrap_err();

    assert_eq!(
        err.to_string(),
        format!(
            "'typer_version_arg' are required inside {}.",
            templates.path().display()
        )
    );
}

#[test]
fn test_resolvable_templates_are_written_when_others_fail() {
    let templates = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write_template(templates.path(), "good.txt", "hello {{ name }}\n");
    write_template(templates.path(), "bad.txt", "hello {{ missing }}\n");

    let arguments = parse_arguments(["name=world"]).unwrap();
    let result = process_templates(
        templates.path(),
        target.path(),
        &arguments,
        ProcessOptions::default(),
    );

    assert!(matches!(
        result,
        Err(JinjadirError::MissingVariables { .. })
    ));
    assert_eq!(
        fs::read_to_string(target.path().join("good.txt")).unwrap(),
        "hello world\n"
    );
    assert!(!target.path().join("bad.txt").exists());
}

#[test]
fn test_existing_files_are_overwritten() {
    let templates = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    write_template(templates.path(), "config.conf", "{{ value }}");
    fs::write(target.path().join("config.conf"), "old content that is longer").unwrap();

    init(init_options(templates.path(), target.path(), &["value=new"])).unwrap();

    assert_eq!(
        fs::read_to_string(target.path().join("config.conf")).unwrap(),
        "new"
    );
}

#[test]
fn test_invalid_arguments_are_reported_before_any_io() {
    let templates = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let target = output_dir.path().join("never-created");
    write_template(templates.path(), "config.conf", "conf");

    let err = init(init_options(
        templates.path(),
        &target,
        &["no-equals", "ok=1", "too=many=equals", "=empty-key", "empty-value="],
    ))
    .unwrap_err();

    match err {
        JinjadirError::InvalidArgumentFormat { entries } => assert_eq!(
            entries,
            vec!["no-equals", "too=many=equals", "=empty-key", "empty-value="]
        ),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!target.exists());
}

#[test]
fn test_target_directory_created_without_templates() {
    let templates = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let target = output_dir.path().join("a/b/project");

    let report = init(init_options(templates.path(), &target, &[])).unwrap();

    assert!(target.is_dir());
    assert!(report.files.is_empty());
}

#[test]
fn test_relative_paths_resolve_against_working_dir() {
    let workspace = tempfile::tempdir().unwrap();
    write_template(&workspace.path().join("templates"), "README.md", "# {{ name }}\n");

    init(InitOptions {
        templates_path: PathBuf::from("templates"),
        target_path: Some(PathBuf::from("out")),
        working_dir: workspace.path().to_path_buf(),
        args: vec!["name=demo".to_string()],
        autoescape: false,
        dry_run: false,
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(workspace.path().join("out/README.md")).unwrap(),
        "# demo\n"
    );
}

#[test]
fn test_target_defaults_to_working_dir() {
    let templates = tempfile::tempdir().unwrap();
    let workspace = tempfile::tempdir().unwrap();
    write_template(templates.path(), "hello.txt", "hi");

    init(InitOptions {
        templates_path: templates.path().to_path_buf(),
        target_path: None,
        working_dir: workspace.path().to_path_buf(),
        args: Vec::new(),
        autoescape: false,
        dry_run: false,
    })
    .unwrap();

    assert!(workspace.path().join("hello.txt").exists());
}

#[test]
fn test_missing_templates_directory() {
    let output_dir = tempfile::tempdir().unwrap();
    let missing = output_dir.path().join("no-templates");

    let err = init(init_options(&missing, &output_dir.path().join("out"), &[])).unwrap_err();

    assert!(matches!(
        err,
        JinjadirError::TemplatesDirectoryMissing { .. }
    ));
}

#[test]
fn test_dry_run_creates_nothing() {
    let output_dir = tempfile::tempdir().unwrap();
    let target = output_dir.path().join("my_app");

    let mut options = init_options(
        &fixture_path("config-template"),
        &target,
        &[
            "name_arg=confname",
            "value_arg=value0",
            "typer_version_arg=1.3.2",
        ],
    );
    options.dry_run = true;
    let report = init(options).unwrap();

    assert_eq!(report.files.len(), 3);
    assert!(!target.exists());
}
