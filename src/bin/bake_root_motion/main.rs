use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use root_motion::{
    config::BakeConfig,
    default_output_path,
    job_system::{retarget_batch, CancelToken},
    naming,
    resource_system::{load_rigs, save_rigs},
    Outcome,
};

mod selection;

#[derive(Parser, Debug)]
#[command(
    name = "bake_root_motion",
    version,
    about = "Move the hip translation of mocap rigs onto a dedicated root bone"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert a root bone and move the hip bone's location channels onto it
    Retarget {
        /// rig file (JSON)
        input: PathBuf,
        /// defaults to <input>_root.json next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// JSON file with hip_bone_name, root_bone_name and workers
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        hip: Option<String>,
        #[arg(long)]
        root: Option<String>,
        /// only process the rig with this name, may be repeated
        #[arg(long = "rig")]
        rigs: Vec<String>,
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Add or remove an engine import suffix on rig names
    Suffix {
        #[command(subcommand)]
        action: SuffixAction,
    },
    /// Print what an import suffix means, or list all known suffixes
    DescribeSuffix {
        #[arg(allow_hyphen_values = true)]
        suffix: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum SuffixAction {
    /// Append the suffix unless the name already contains it
    Add(SuffixArgs),
    /// Strip every occurrence of the suffix
    Remove(SuffixArgs),
}

#[derive(clap::Args, Debug)]
struct SuffixArgs {
    /// rig file (JSON)
    input: PathBuf,
    #[arg(allow_hyphen_values = true)]
    suffix: String,
    /// defaults to rewriting the input in place
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(long = "rig")]
    rigs: Vec<String>,
}

fn load(input: &Path) -> Result<Vec<root_motion::Rig>> {
    load_rigs(input).with_context(|| format!("failed to load rigs from {}", input.display()))
}

fn save(output: &Path, rigs: &[root_motion::Rig]) -> Result<()> {
    save_rigs(output, rigs).with_context(|| format!("failed to write {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn retarget(
    input: PathBuf,
    output: Option<PathBuf>,
    config: BakeConfig,
    rig_names: &[String],
) -> Result<()> {
    let rigs = load(&input)?;
    let selection::Selection { picked, rest } = selection::select(rigs, rig_names);
    if picked.is_empty() {
        bail!("no rigs selected");
    }
    log::info!(
        "retargeting {} rig(s): `{}` -> `{}` on {} worker(s)",
        picked.len(),
        config.request.hip_bone_name,
        config.request.root_bone_name,
        config.workers
    );

    let (positions, picked): (Vec<usize>, Vec<_>) = picked.into_iter().unzip();
    let responses = retarget_batch(picked, &config.request, config.workers, &CancelToken::new());
    if responses.len() != positions.len() {
        bail!(
            "only {} of {} rigs were processed, nothing written",
            responses.len(),
            positions.len()
        );
    }

    let mut changed = 0;
    let mut processed = Vec::with_capacity(responses.len());
    for response in responses {
        match response.outcome {
            Some(outcome) => {
                println!("{:<32} {}", response.rig.name, outcome);
                if outcome.mutated() {
                    changed += 1;
                }
                if outcome == Outcome::StructuralOnly {
                    log::warn!("{}: root bone added but there was no animation to move", response.rig.name);
                }
            }
            None => println!("{:<32} cancelled", response.rig.name),
        }
        processed.push((positions[response.position], response.rig));
    }
    println!("{} of {} rig(s) changed", changed, processed.len());

    let output = output.unwrap_or_else(|| default_output_path(&input));
    save(&output, &selection::merge(processed, rest))
}

fn rename(args: SuffixArgs, apply: impl Fn(&str, &str) -> String) -> Result<()> {
    let rigs = load(&args.input)?;
    let mut selected = selection::select(rigs, &args.rigs);
    if selected.picked.is_empty() {
        bail!("no rigs selected");
    }
    selection::rename(&mut selected, |name| apply(name, &args.suffix))?;
    let output = args.output.unwrap_or(args.input);
    save(&output, &selection::merge(selected.picked, selected.rest))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Retarget {
            input,
            output,
            config,
            hip,
            root,
            rigs,
            workers,
        } => {
            let config = match config {
                Some(path) => BakeConfig::load(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => BakeConfig::default(),
            }
            .with_overrides(hip, root, workers);
            retarget(input, output, config, &rigs)?;
        }
        Command::Suffix { action } => match action {
            SuffixAction::Add(args) => rename(args, naming::add_suffix)?,
            SuffixAction::Remove(args) => rename(args, naming::remove_suffix)?,
        },
        Command::DescribeSuffix { suffix } => match suffix {
            Some(suffix) => println!("{}", naming::suffix_description(&suffix)),
            None => {
                for suffix in naming::KNOWN_SUFFIXES {
                    println!("{:<14} {}", suffix, naming::suffix_description(suffix));
                }
            }
        },
    }
    Ok(())
}
