use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "promptcast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand a scene and print every generated prompt.
    Expand(ExpandArgs),
    /// Expand a scene and write renderer tasks as JSON.
    Tasks(TasksArgs),
    /// Resolve a legacy character (applying variation overrides) and print it as JSON.
    Resolve(ResolveArgs),
    /// Compose a single prompt from the legacy library.
    Legacy(LegacyArgs),
    /// List references in a database that do not resolve.
    Audit(AuditArgs),
}

#[derive(Args, Debug)]
struct CastArgs {
    /// Database snapshot JSON.
    #[arg(long)]
    db: PathBuf,

    /// Scene id.
    #[arg(long)]
    scene: String,

    /// Role assignment as `role=actor`; repeatable.
    #[arg(long = "assign", value_parser = parse_assignment)]
    assign: Vec<(String, String)>,
}

#[derive(Args, Debug)]
struct ExpandArgs {
    #[command(flatten)]
    cast: CastArgs,

    /// Print the batch as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct TasksArgs {
    #[command(flatten)]
    cast: CastArgs,

    /// Output tasks JSON path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Args, Debug, Default)]
struct RenderArgs {
    /// Override sampling steps.
    #[arg(long)]
    steps: Option<u32>,

    /// Override sampler name.
    #[arg(long)]
    sampler: Option<String>,

    /// Override guidance scale.
    #[arg(long)]
    cfg_scale: Option<f64>,

    /// Override seed (`-1` lets the renderer choose).
    #[arg(long, allow_hyphen_values = true)]
    seed: Option<i64>,

    /// Override output width.
    #[arg(long)]
    width: Option<u32>,

    /// Override output height.
    #[arg(long)]
    height: Option<u32>,

    /// Override img2img denoising strength.
    #[arg(long)]
    denoise: Option<f64>,
}

impl From<RenderArgs> for promptcast::RenderParamsOverride {
    fn from(a: RenderArgs) -> Self {
        Self {
            steps: a.steps,
            sampler_name: a.sampler,
            cfg_scale: a.cfg_scale,
            seed: a.seed,
            width: a.width,
            height: a.height,
            denoising_strength: a.denoise,
        }
    }
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Legacy library JSON.
    #[arg(long)]
    characters: PathBuf,

    /// Character id.
    #[arg(long)]
    id: String,
}

#[derive(Args, Debug)]
struct LegacyArgs {
    /// Legacy library JSON.
    #[arg(long)]
    library: PathBuf,

    /// Character id.
    #[arg(long, default_value = "")]
    character: String,

    /// Clothing id.
    #[arg(long, default_value = "")]
    clothing: String,

    /// Background id.
    #[arg(long, default_value = "")]
    background: String,

    /// Leave the character section out.
    #[arg(long)]
    no_character: bool,

    /// Leave the clothing section out.
    #[arg(long)]
    no_clothing: bool,

    /// Leave the background section out.
    #[arg(long)]
    no_background: bool,
}

#[derive(Args, Debug)]
struct AuditArgs {
    /// Database snapshot JSON.
    #[arg(long)]
    db: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Expand(args) => cmd_expand(args),
        Command::Tasks(args) => cmd_tasks(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Legacy(args) => cmd_legacy(args),
        Command::Audit(args) => cmd_audit(args),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (role, actor) = s
        .split_once('=')
        .ok_or_else(|| format!("expected role=actor, got {s:?}"))?;
    let role = role.trim();
    if role.is_empty() {
        return Err(format!("missing role in {s:?}"));
    }
    Ok((role.to_string(), actor.trim().to_string()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn read_db(path: &Path) -> anyhow::Result<promptcast::Database> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read database '{}'", path.display()))?;
    promptcast::import_database_json(&raw)
        .with_context(|| format!("parse database '{}'", path.display()))
}

fn expand(cast: &CastArgs, db: &promptcast::Database) -> Vec<promptcast::GeneratedPrompt> {
    let assignments = cast
        .assign
        .iter()
        .map(|(r, a)| (r.as_str(), a.as_str()))
        .collect::<promptcast::RoleAssignments>();
    promptcast::expand_scene(&cast.scene, &assignments, db)
}

fn cmd_expand(args: ExpandArgs) -> anyhow::Result<()> {
    let db = read_db(&args.cast.db)?;
    let batch = expand(&args.cast, &db);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    for p in &batch {
        println!("#{} {}", p.cut, p.label);
        println!("  + {}", p.positive);
        println!("  - {}", p.negative);
    }
    println!("{} prompt(s)", batch.len());
    Ok(())
}

fn cmd_tasks(args: TasksArgs) -> anyhow::Result<()> {
    let db = read_db(&args.cast.db)?;
    let batch = expand(&args.cast, &db);

    let overrides = promptcast::RenderParamsOverride::from(args.render);
    let params = overrides.apply(&db.render_params);
    let scene = db.scene(&args.cast.scene);
    if scene.is_none() {
        tracing::warn!(scene = %args.cast.scene, "scene not found; writing empty task list");
    }
    let tasks = promptcast::materialize_tasks(&batch, &params, scene);

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(&args.out)
        .with_context(|| format!("create tasks file '{}'", args.out.display()))?;
    promptcast::write_tasks_json(BufWriter::new(f), &tasks)
        .with_context(|| format!("write tasks '{}'", args.out.display()))?;

    eprintln!("wrote {} task(s) to {}", tasks.len(), args.out.display());
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let lib: promptcast::LegacyLibrary = read_json(&args.characters, "legacy library")?;
    let character = promptcast::resolve_character(&args.id, &lib.characters)?;
    println!("{}", serde_json::to_string_pretty(&character)?);
    Ok(())
}

fn cmd_legacy(args: LegacyArgs) -> anyhow::Result<()> {
    let lib: promptcast::LegacyLibrary = read_json(&args.library, "legacy library")?;
    let selection = promptcast::LegacySelection {
        character_id: args.character,
        clothing_id: args.clothing,
        background_id: args.background,
    };
    let flags = promptcast::IncludeFlags {
        character: !args.no_character,
        clothing: !args.no_clothing,
        background: !args.no_background,
    };
    println!(
        "{}",
        promptcast::generate_legacy_prompt(&selection, flags, &lib)?
    );
    Ok(())
}

fn cmd_audit(args: AuditArgs) -> anyhow::Result<()> {
    let db = read_db(&args.db)?;
    let dangling = db.dangling_references();
    if dangling.is_empty() {
        println!("no dangling references");
        return Ok(());
    }
    for d in &dangling {
        println!("{d}");
    }
    println!("{} dangling reference(s)", dangling.len());
    Ok(())
}
