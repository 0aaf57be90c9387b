use clap::{Parser, Subcommand};

use infragraph_cli::{DiagramOptions, GenerateOptions, init_logging, run_diagram, run_generate};

#[derive(Parser, Debug)]
#[command(
    name = "infragraph",
    about = "infragraph: diagram your stacks, type your APIs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an infrastructure graph to DOT (and optionally PNG) artifacts
    Diagram(DiagramOptions),
    /// Generate typed infrastructure bindings from an OpenAPI specification
    Generate(GenerateOptions),
}

fn run(cli: Cli) -> infragraph_error::Result<()> {
    match cli.command {
        Command::Diagram(opts) => {
            let entries = run_diagram(&opts)?;
            for entry in &entries {
                for artifact in entry.artifacts.iter() {
                    println!("{}", artifact.filepath().display());
                }
            }
            Ok(())
        }
        Command::Generate(opts) => {
            let project = run_generate(&opts)?;
            for file in &project.files {
                println!("{}", project.root.join(file).display());
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "execution failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_diagram_defaults() {
        let cli = Cli::try_parse_from([
            "infragraph",
            "diagram",
            "--input",
            "graph.json",
            "--out",
            "report",
        ])
        .unwrap();

        match cli.command {
            Command::Diagram(opts) => {
                assert!(!opts.png);
                assert!(!opts.flat);
                assert_eq!(opts.engine, "dot");
                assert_eq!(opts.dpi, 96);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_generate_round_trips_command_builder() {
        let command = infragraph_codegen::GenerateCommand::new(
            "../spec.yaml",
            "infra",
            "client/type-manifest.json",
        );
        let mut argv = vec!["infragraph".to_string()];
        argv.extend(command.build_args());

        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Generate(opts) => {
                assert_eq!(opts.spec, std::path::PathBuf::from("../spec.yaml"));
                assert_eq!(opts.out, std::path::PathBuf::from("infra"));
                assert_eq!(
                    opts.types_manifest,
                    std::path::PathBuf::from("client/type-manifest.json")
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["infragraph"]).is_err());
    }
}
