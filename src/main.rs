use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use qutils::Result;
use qutils::log::{Aggregator, FieldPattern, LogParser, RegexParser, TimingTableParser};
use qutils::timing::{MonitorMode, ProfileOptions, print_statistics, try_profile};
use qutils::{qobj, render, topology};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qutils")]
#[command(about = "Helpers for quantum-circuit experiment logs and job files", long_about = None)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract numeric fields from every log under a directory and average them.
    Aggregate {
        #[arg(long)]
        logs: PathBuf,

        /// Field to extract, as NAME=REGEX with one capture group (repeatable).
        #[arg(short, long = "field", required = true)]
        fields: Vec<FieldPattern>,

        /// Only parse files with this extension.
        #[arg(long)]
        ext: Option<String>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Average timing tables (name<TAB>seconds) found under a directory.
    Timings {
        #[arg(long)]
        logs: PathBuf,

        /// Operation name to extract (repeatable, keeps order).
        #[arg(short, long = "name", required = true)]
        names: Vec<String>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Print the instruction list of every experiment in a Qobj file.
    Ops {
        #[arg(long)]
        qobj: PathBuf,

        #[arg(long)]
        without_measure: bool,
    },

    /// Print config.n_qubits of a Qobj file.
    Qubits {
        #[arg(long)]
        qobj: PathBuf,
    },

    /// Pretty-print a Qobj file with sorted keys.
    Dump {
        #[arg(long)]
        qobj: PathBuf,
    },

    /// Print the adjacency list of a coupling map (JSON list of pairs).
    Graph {
        #[arg(long)]
        coupling: PathBuf,
    },

    /// Print a JSON object as a tab-indented tree.
    Pretty {
        #[arg(long)]
        json: PathBuf,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Print cumulative timings of the run afterwards.
    #[arg(long)]
    stats: bool,

    /// Profile the run, sampling memory every SECS seconds.
    #[arg(long, value_name = "SECS")]
    monitor_mem: Option<f64>,

    /// External memory monitor, run as `<cmd> <pid> <secs>` (needs --monitor-mem).
    #[arg(long, requires = "monitor_mem")]
    monitor_cmd: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn aggregate<P: LogParser>(logs: PathBuf, parser: P, run: RunArgs) -> Result<()> {
    let mut agg = Aggregator::new(logs, parser);

    match run.monitor_mem {
        Some(secs) => {
            let opts = ProfileOptions {
                interval: Duration::try_from_secs_f64(secs)
                    .with_context(|| format!("bad --monitor-mem value {}", secs))?,
                mode: run
                    .monitor_cmd
                    .map(MonitorMode::Command)
                    .unwrap_or(MonitorMode::Sampler),
            };
            try_profile("aggregate", &opts, || agg.run())?;
        }
        None => {
            agg.run()?;
        }
    }

    if run.stats {
        print_statistics(&agg);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Aggregate {
            logs,
            fields,
            ext,
            run,
        } => {
            let mut parser = RegexParser::new(fields);
            if let Some(ext) = ext {
                parser = parser.with_extension(ext.trim_start_matches('.'));
            }
            let names: Vec<&str> = parser.field_names().collect();
            tracing::debug!(fields = ?names, "extracting fields");
            aggregate(logs, parser, run)?;
        }
        Commands::Timings { logs, names, run } => {
            aggregate(logs, TimingTableParser::new(names)?, run)?;
        }
        Commands::Ops {
            qobj: path,
            without_measure,
        } => {
            let doc = qobj::load_qobj(&path)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for (idx, ops) in qobj::op_lists(&doc)?.iter().enumerate() {
                writeln!(out, "# experiment {}", idx)?;
                qobj::print_op_list(&mut out, &qobj::filter_ops(ops, without_measure))?;
            }
        }
        Commands::Qubits { qobj: path } => {
            let doc = qobj::load_qobj(&path)?;
            println!("{}", qobj::n_qubits(&doc)?);
        }
        Commands::Dump { qobj: path } => {
            let doc = qobj::load_qobj(&path)?;
            println!("{}", qobj::to_pretty_json(&doc)?);
        }
        Commands::Graph { coupling } => {
            let map = topology::load_coupling_map(&coupling)?;
            let graph = topology::coupling_map_to_graph(&map)?;
            for (node, neighbors) in &graph {
                let list: Vec<String> = neighbors.iter().map(|n| n.to_string()).collect();
                println!("{}\t{}", node, list.join(","));
            }
        }
        Commands::Pretty { json } => {
            let text = std::fs::read_to_string(&json)
                .with_context(|| format!("read json file {}", json.display()))?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("parse json file {}", json.display()))?;
            let Some(map) = value.as_object() else {
                bail!("{} does not hold a JSON object", json.display());
            };
            render::pretty(map, 0)?;
        }
    }

    Ok(())
}
