//! Command-line arguments of the `bpmetrics` binary.

use clap::Parser;

/// Compute structural and cognitive complexity metrics of BPMN models.
///
/// INPUT is one diagram export, a JSON array of model records, or model
/// records as JSON Lines.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Export or model records to measure
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Where to write the metrics table (JSON)
    #[arg(short, long, value_name = "FILE", default_value = "metrics.json")]
    pub output: String,

    /// Also write the flattened elements (JSON Lines)
    #[arg(short, long, value_name = "FILE")]
    pub elements: Option<String>,

    /// Configuration file (TOML); searched for when omitted
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// One of off, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["bpmetrics", "models.jsonl"]).unwrap();

        assert_eq!(args.input, "models.jsonl");
        assert_eq!(args.output, "metrics.json");
        assert_eq!(args.elements, None);
        assert_eq!(args.config, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "bpmetrics",
            "models.jsonl",
            "-o",
            "out.json",
            "-e",
            "elements.jsonl",
            "-c",
            "cfg.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.output, "out.json");
        assert_eq!(args.elements.as_deref(), Some("elements.jsonl"));
        assert_eq!(args.config.as_deref(), Some("cfg.toml"));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_command_is_consistent() {
        Args::command().debug_assert();
    }
}
