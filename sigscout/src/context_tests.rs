use super::*;
use std::io::Write;

#[test]
fn test_verbosity_from_flags() {
    assert_eq!(VerbosityLevel::from_flags(0, false), VerbosityLevel::Normal);
    assert_eq!(VerbosityLevel::from_flags(1, false), VerbosityLevel::Verbose);
    assert_eq!(VerbosityLevel::from_flags(2, false), VerbosityLevel::Trace);
    assert_eq!(VerbosityLevel::from_flags(5, false), VerbosityLevel::Trace);
}

#[test]
fn test_quiet_wins_over_verbose() {
    assert_eq!(VerbosityLevel::from_flags(3, true), VerbosityLevel::Quiet);
}

#[test]
fn test_level_filters() {
    assert_eq!(VerbosityLevel::Quiet.level_filter(), LevelFilter::ERROR);
    assert_eq!(VerbosityLevel::Normal.level_filter(), LevelFilter::INFO);
    assert_eq!(VerbosityLevel::Verbose.level_filter(), LevelFilter::DEBUG);
    assert_eq!(VerbosityLevel::Trace.level_filter(), LevelFilter::TRACE);
}

#[test]
fn test_with_config_keeps_config_values_without_flags() {
    let config = Config::from_yaml_str("output:\n  limit: 4\n").unwrap();
    let ctx = AppContext::with_config(
        "library/ubuntu".to_string(),
        config,
        Overrides::default(),
        VerbosityLevel::Normal,
    );

    assert_eq!(ctx.repository, "library/ubuntu");
    assert_eq!(ctx.config.output.limit, 4);
    assert_eq!(ctx.log_file(), Path::new("sigscout.log"));
}

#[test]
fn test_cli_flags_override_config() {
    let config = Config::from_yaml_str("output:\n  limit: 4\n  log_file: from-file.log\n").unwrap();
    let overrides = Overrides {
        config_path: None,
        limit: Some(25),
        log_file: Some(PathBuf::from("from-cli.log")),
    };

    let ctx = AppContext::with_config(
        "acme/app".to_string(),
        config,
        overrides,
        VerbosityLevel::Verbose,
    );

    assert_eq!(ctx.config.output.limit, 25);
    assert_eq!(ctx.log_file(), Path::new("from-cli.log"));
    assert_eq!(ctx.verbosity, VerbosityLevel::Verbose);
}

#[test]
fn test_build_with_explicit_config_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "registry:\n  url: http://localhost:5000\noutput:\n  limit: 2").unwrap();

    let overrides = Overrides {
        config_path: Some(file.path().to_path_buf()),
        limit: None,
        log_file: None,
    };
    let ctx = AppContext::build("acme/app".to_string(), overrides, VerbosityLevel::Normal)
        .unwrap();

    assert_eq!(ctx.config.registry.url, "http://localhost:5000");
    assert_eq!(ctx.config.output.limit, 2);
}

#[test]
fn test_build_with_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let overrides = Overrides {
        config_path: Some(dir.path().join("nope.yaml")),
        ..Overrides::default()
    };

    let result = AppContext::build("acme/app".to_string(), overrides, VerbosityLevel::Normal);
    assert!(result.is_err());
}

#[test]
fn test_default_config_path_shape() {
    if let Some(path) = get_config_path() {
        assert!(path.ends_with("sigscout/config.yaml"));
    }
}
