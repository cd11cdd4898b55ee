use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use media_date_renamer_core::{
    app_paths, load_config, run, save_config, AppConfig, FileReport, RenameOutcome, RunOptions,
    RunReport,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "media-date-renamer-cli")]
#[command(about = "写真・動画を撮影日時 (YYYY.MM.DD.HH.MM.SS) のファイル名に一括リネームします")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    rename: RenameArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    Init,
}

#[derive(Debug, Args)]
struct RenameArgs {
    #[arg(long, default_value = ".")]
    dir: PathBuf,
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.rename.verbose);

    match cli.command {
        Some(Commands::Config(config)) => match config.action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Init => cmd_config_init(),
        },
        None => cmd_rename(cli.rename),
    }
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "media_date_renamer_core=debug,warn"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn cmd_rename(args: RenameArgs) -> Result<()> {
    let config = load_config()?;
    let mut options = RunOptions::from_config(&config, args.dir);
    options.dry_run |= args.dry_run;
    options.exclude = std::env::current_exe().ok();

    let report = match args.output {
        OutputFormat::Table => run(&options, |file| println!("{}", describe(file)))?,
        OutputFormat::Json => {
            let report = run(&options, |_| {})?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            report
        }
    };

    print_summary(&report);
    Ok(())
}

fn describe(file: &FileReport) -> String {
    let name = file
        .original_path
        .file_name()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_else(|| file.original_path.display().to_string());

    match &file.outcome {
        RenameOutcome::Renamed { target } => format!("リネーム: \"{name}\" -> \"{target}\""),
        RenameOutcome::WouldRename { target } => {
            format!("リネーム予定: \"{name}\" -> \"{target}\"")
        }
        RenameOutcome::SkippedAlreadyNamed => format!("変更なし: \"{name}\" は既に正しい名前です"),
        RenameOutcome::SkippedCollision { target } => format!(
            "スキップ: \"{target}\" が既に存在するため \"{name}\" はリネームしません"
        ),
        RenameOutcome::SkippedNoDate => {
            format!("スキップ: \"{name}\" の日時を取得できませんでした")
        }
        RenameOutcome::Failed { target, error } => {
            format!("リネーム失敗: \"{name}\" -> \"{target}\": {error}")
        }
    }
}

fn print_summary(report: &RunReport) {
    let stats = &report.stats;
    eprintln!(
        "\n集計: scanned={} renamed={} planned={} unchanged={} collision={} no_date={} failed={}",
        stats.scanned_files,
        stats.renamed,
        stats.planned,
        stats.already_named,
        stats.collisions,
        stats.no_date,
        stats.failed
    );
    if report.dry_run {
        eprintln!("dry-runモード: 実ファイルは変更していません。");
    }
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let paths = app_paths()?;
    println!("設定ファイル: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let paths = app_paths()?;
    if paths.config_path.exists() {
        println!("設定ファイルは既に存在します: {}", paths.config_path.display());
        return Ok(());
    }
    save_config(&AppConfig::default())?;
    println!("設定ファイルを作成しました: {}", paths.config_path.display());
    Ok(())
}
