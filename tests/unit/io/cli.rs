//! Tests for command-line parsing and the solve runner

#[cfg(test)]
mod tests {
    use clap::Parser;
    use roadtiles::algorithm::solver::SolveOutcome;
    use roadtiles::io::cli::{Cli, SolveRunner};
    use roadtiles::io::configuration::{
        DEFAULT_HEIGHT, DEFAULT_MAX_ATTEMPTS, DEFAULT_RESTARTS, DEFAULT_WIDTH,
    };
    use roadtiles::io::export::read_placements;
    use std::path::PathBuf;

    const RING_CATALOG: &str = r#"
categories = ["road"]

[border]
name = "land"
sides = ["closed", "closed", "closed", "closed"]

[[tiles]]
name = "land"
sides = ["closed", "closed", "closed", "closed"]
"#;

    // Tests CLI parsing with no arguments uses the defaults
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["roadtiles"]);

        assert_eq!(cli.catalog, None);
        assert_eq!(cli.width, DEFAULT_WIDTH);
        assert_eq!(cli.height, DEFAULT_HEIGHT);
        assert_eq!(cli.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(cli.restarts, DEFAULT_RESTARTS);
        assert_eq!(cli.seed, None);
        assert!(!cli.quiet);
        assert!(!cli.preview);
        assert_eq!(cli.verbose, 0);
    }

    // Tests CLI parsing with all available arguments
    // Verified by swapping width and height fields
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "roadtiles",
            "--catalog",
            "tiles/rivers.toml",
            "--output",
            "out/grid.toml",
            "--width",
            "12",
            "--height",
            "7",
            "--seed",
            "123",
            "--max-attempts",
            "500",
            "--timeout-ms",
            "250",
            "--restarts",
            "3",
            "--preview",
            "--visualize",
            "--quiet",
        ]);

        assert_eq!(cli.catalog, Some(PathBuf::from("tiles/rivers.toml")));
        assert_eq!(cli.output, Some(PathBuf::from("out/grid.toml")));
        assert_eq!(cli.width, 12);
        assert_eq!(cli.height, 7);
        assert_eq!(cli.seed, Some(123));
        assert_eq!(cli.max_attempts, 500);
        assert_eq!(cli.timeout_ms, Some(250));
        assert_eq!(cli.restarts, 3);
        assert!(cli.preview);
        assert!(cli.visualize);
        assert!(cli.quiet);
    }

    // Tests short flags including repeated verbosity
    // Verified by changing short flag definitions
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["roadtiles", "-w", "8", "-H", "6", "-s", "9", "-vv", "-g"]);

        assert_eq!(cli.width, 8);
        assert_eq!(cli.height, 6);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.verbose, 2);
        assert!(cli.visualize);
    }

    // Tests progress display based on --quiet flag
    // Verified by inverting quiet flag logic
    #[test]
    fn test_should_show_progress() {
        assert!(Cli::parse_from(["roadtiles"]).should_show_progress());
        assert!(!Cli::parse_from(["roadtiles", "--quiet"]).should_show_progress());
    }

    // Tests derived output paths follow the catalog name
    // Verified by dropping the output suffix
    #[test]
    fn test_output_path_generation() {
        let builtin = Cli::parse_from(["roadtiles"]);
        assert_eq!(builtin.output_path(), PathBuf::from("roads_placements.toml"));
        assert_eq!(builtin.preview_path(), PathBuf::from("roads_placements.png"));
        assert_eq!(
            builtin.visualization_path(),
            PathBuf::from("roads_placements_visualization.gif")
        );

        let custom = Cli::parse_from(["roadtiles", "-c", "tiles/rivers.toml"]);
        assert_eq!(
            custom.output_path(),
            PathBuf::from("tiles/rivers_placements.toml")
        );

        let explicit = Cli::parse_from(["roadtiles", "-o", "out/grid.toml"]);
        assert_eq!(explicit.output_path(), PathBuf::from("out/grid.toml"));
        assert_eq!(
            explicit.visualization_path(),
            PathBuf::from("out/grid_visualization.gif")
        );
    }

    // Tests invalid dimensions are rejected before solving
    // Verified by skipping configuration validation
    #[test]
    fn test_runner_rejects_invalid_dimensions() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output = temp_dir.path().join("grid.toml");
        let output_arg = output.to_string_lossy().to_string();
        let cli = Cli::parse_from(["roadtiles", "-q", "-w", "2", "-o", output_arg.as_str()]);

        let result = SolveRunner::new(cli).run();
        assert!(result.is_err());
        assert!(!output.exists());
    }

    // Tests a full run writes the export, preview and animation
    // Verified by skipping the preview export
    #[test]
    fn test_runner_writes_outputs() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output = temp_dir.path().join("grid.toml");
        let output_arg = output.to_string_lossy().to_string();
        let cli = Cli::parse_from([
            "roadtiles",
            "--quiet",
            "--seed",
            "4",
            "--width",
            "6",
            "--height",
            "5",
            "--preview",
            "--visualize",
            "--output",
            output_arg.as_str(),
        ]);

        let outcome = SolveRunner::new(cli).run().expect("run should succeed");

        assert_eq!(outcome, SolveOutcome::Solved);
        let export = read_placements(&output).expect("export should read back");
        assert_eq!(export.seed, "4");
        assert_eq!(export.placements.len(), 12);
        assert!(temp_dir.path().join("grid.png").exists());
        assert!(temp_dir.path().join("grid_visualization.gif").exists());
    }

    // Tests a catalog file drives the run and names the outputs
    // Verified by always loading the built-in catalog
    #[test]
    fn test_runner_with_catalog_file() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let catalog = temp_dir.path().join("ring.toml");
        std::fs::write(&catalog, RING_CATALOG).expect("Failed to write catalog");
        let catalog_arg = catalog.to_string_lossy().to_string();
        let cli = Cli::parse_from(["roadtiles", "-q", "-c", catalog_arg.as_str(), "-s", "1"]);

        let outcome = SolveRunner::new(cli).run().expect("run should succeed");

        assert_eq!(outcome, SolveOutcome::Solved);
        let export = read_placements(&temp_dir.path().join("ring_placements.toml"))
            .expect("export should read back");
        assert!(export.placements.iter().all(|record| record.tile == "land"));
        assert_eq!(export.placements.len(), 64);
    }
}
