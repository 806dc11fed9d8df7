#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_no_subcommand_means_generate() {
        let cli = Cli::try_parse_from(["elements"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.command.unwrap_or_default(), Command::Generate(_)));
    }

    #[test]
    fn test_generate_overrides() {
        let cli = Cli::try_parse_from([
            "elements",
            "generate",
            "--template",
            "src/registry.ts",
            "-o",
            "src/registry.generated.ts",
            "--tsconfig",
            "tsconfig.lib.json",
        ])
        .unwrap();

        let Some(Command::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        let overrides = args.to_overrides();
        assert_eq!(overrides.template, Some(PathBuf::from("src/registry.ts")));
        assert_eq!(overrides.output, Some(PathBuf::from("src/registry.generated.ts")));
        assert_eq!(overrides.tsconfig, Some(PathBuf::from("tsconfig.lib.json")));
    }

    #[test]
    fn test_check_without_overrides() {
        let cli = Cli::try_parse_from(["elements", "check"]).unwrap();
        let Some(Command::Check(args)) = cli.command else {
            panic!("expected check");
        };
        let overrides = args.to_overrides();
        assert!(overrides.template.is_none());
        assert!(overrides.output.is_none());
        assert!(overrides.tsconfig.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "elements",
            "inspect",
            "--resolved",
            "--cwd",
            "packages/grid",
            "--config",
            "elements.ci.toml",
            "--no-color",
        ])
        .unwrap();

        assert!(cli.no_color);
        assert_eq!(cli.project.cwd, Some(PathBuf::from("packages/grid")));
        assert_eq!(cli.project.config, Some(PathBuf::from("elements.ci.toml")));
        let Some(Command::Inspect(args)) = cli.command else {
            panic!("expected inspect");
        };
        assert!(args.resolved);
        assert!(!args.compact);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["elements", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_inspect_rejects_overrides() {
        assert!(Cli::try_parse_from(["elements", "inspect", "--template", "x.ts"]).is_err());
    }
}
