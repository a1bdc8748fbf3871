use clap::Parser;
use hueswitch_cli::{Cli, Commands};

#[test]
fn test_parse_switch_with_silent() {
    let cli = Cli::try_parse_from(["hue", "switch", "dark", "--silent"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Switch {
            id: "dark".to_string(),
            silent: true,
        })
    );
}

#[test]
fn test_parse_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "hue",
        "list",
        "--themes-dir",
        "assets/themes",
        "--store",
        "prefs.json",
        "-v",
    ])
    .unwrap();
    assert_eq!(cli.command, Some(Commands::List));
    assert!(cli.verbose);

    let options = cli.setup_options();
    assert_eq!(options.themes_dir.unwrap().to_str(), Some("assets/themes"));
    assert_eq!(options.store.unwrap().to_str(), Some("prefs.json"));
    assert!(options.config.is_none());
}

#[test]
fn test_parse_toggle_forms() {
    let cli = Cli::try_parse_from(["hue", "toggle"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Toggle {
            first: None,
            second: None,
        })
    );

    let cli = Cli::try_parse_from(["hue", "toggle", "paper", "ink"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Toggle {
            first: Some("paper".to_string()),
            second: Some("ink".to_string()),
        })
    );

    assert!(Cli::try_parse_from(["hue", "toggle", "paper"]).is_err());
}

#[test]
fn test_parse_prev_alias() {
    let cli = Cli::try_parse_from(["hue", "previous"]).unwrap();
    assert_eq!(cli.command, Some(Commands::Prev));
}

#[test]
fn test_no_subcommand_is_allowed() {
    let cli = Cli::try_parse_from(["hue"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn test_switch_requires_id() {
    assert!(Cli::try_parse_from(["hue", "switch"]).is_err());
    assert!(Cli::try_parse_from(["hue", "group"]).is_err());
}
