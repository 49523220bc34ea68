use anyhow::Context;
use callcoach::{
    analysis::{sample_transcript, CoachingPlan, NextStep, TranscriptAnalyzer},
    analytics::{
        agent_performance_by_name, find_coaching_candidates, AgentPerformance, CountDistribution,
        DashboardSummary, ExportConfig, ExportFormat, ExportManager, ReportData, SortOrder,
    },
    config_manager::{AppConfig, ConfigManager},
    data::{self, Channel, Dataset, SampleDataGenerator, Sentiment},
    io, utils, CoachError,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

/// AI-Enhanced Coaching & Feedback Tool (demo)
#[derive(Parser, Debug)]
#[command(name = "callcoach", version, long_about = None)]
struct Cli {
    /// JSON形式で出力
    #[arg(long, global = true)]
    json: bool,

    /// サンプルデータの乱数シード（設定ファイルより優先）
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// NDJSONスナップショットからデータセットを読み込む
    #[arg(long, global = true, value_name = "PATH")]
    dataset: Option<PathBuf>,

    /// 設定ファイルのパス（省略時はXDG設定ディレクトリ）
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Team performance dashboard
    Dashboard {
        /// 評価上位として表示する人数
        #[arg(long)]
        top: Option<usize>,
    },
    /// Analyze an interaction transcript
    Analyze {
        /// 対応チャネル（書き起こし未指定時はサンプルを使用）
        #[arg(long, value_enum, default_value_t = ChannelArg::Call)]
        channel: ChannelArg,
        /// 対象オペレーター名（省略時は名簿の先頭）
        #[arg(long)]
        agent: Option<String>,
        /// 書き起こしテキスト
        #[arg(long, conflicts_with = "file")]
        transcript: Option<String>,
        /// 書き起こしファイル
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// 分析後に実行するアクション
        #[arg(long = "action", value_enum)]
        actions: Vec<ActionArg>,
    },
    /// Performance of a single agent
    Agent {
        /// オペレーター名
        name: String,
        /// 直近の対応として表示する件数
        #[arg(long)]
        recent: Option<usize>,
    },
    /// Coaching opportunities
    Coaching {
        /// 指定したオペレーターのコーチングプランを生成
        #[arg(long, value_name = "AGENT")]
        plan: Option<String>,
    },
    /// Export the interaction table and summary
    Export {
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        /// 出力先（省略時は標準出力）
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = SortArg::Chronological)]
        sort: SortArg,
        #[arg(long)]
        max_records: Option<usize>,
        /// 指定した感情の対応のみ出力
        #[arg(long, value_enum)]
        sentiment: Option<SentimentArg>,
        /// メタデータを出力しない
        #[arg(long)]
        no_metadata: bool,
    },
    /// Show or reset the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// 現在の設定を表示
    Show,
    /// 設定ファイルのパスを表示
    Path,
    /// 設定をデフォルトに戻す
    Reset,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChannelArg {
    Call,
    Chat,
    Email,
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Call => Channel::Call,
            ChannelArg::Chat => Channel::Chat,
            ChannelArg::Email => Channel::Email,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ActionArg {
    SaveFeedback,
    ScheduleCoaching,
    CreateActionPlan,
}

impl From<ActionArg> for NextStep {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::SaveFeedback => NextStep::SaveFeedback,
            ActionArg::ScheduleCoaching => NextStep::ScheduleCoachingSession,
            ActionArg::CreateActionPlan => NextStep::CreateActionPlan,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Chronological,
    ReverseChronological,
    Agent,
    Duration,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Chronological => SortOrder::Chronological,
            SortArg::ReverseChronological => SortOrder::ReverseChronological,
            SortArg::Agent => SortOrder::ByAgent,
            SortArg::Duration => SortOrder::ByDuration,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SentimentArg {
    Positive,
    Neutral,
    Negative,
}

impl From<SentimentArg> for Sentiment {
    fn from(arg: SentimentArg) -> Self {
        match arg {
            SentimentArg::Positive => Sentiment::Positive,
            SentimentArg::Neutral => Sentiment::Neutral,
            SentimentArg::Negative => Sentiment::Negative,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path)?,
        None => ConfigManager::new()?,
    };
    let (config, config_error) = match config_manager.load_config() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let _log_guard = utils::init_logging(&config.log)?;
    if let Some(e) = config_error {
        tracing::warn!("設定読み込みエラー、デフォルト設定を使用: {:#}", e);
    }

    tracing::debug!(command = ?cli.command, "🎬 Starting callcoach");

    if let Command::Config { action } = &cli.command {
        return run_config(&config_manager, &config, action, cli.json);
    }

    let dataset = resolve_dataset(&cli, &config)?;

    let result = match cli.command {
        Command::Dashboard { top } => {
            run_dashboard(dataset, top.unwrap_or(config.dashboard.top_agents), cli.json)
        }
        Command::Analyze {
            channel,
            agent,
            transcript,
            file,
            actions,
        } => run_analyze(dataset, channel.into(), agent, transcript, file, actions, cli.json),
        Command::Agent { name, recent } => run_agent(
            dataset,
            &name,
            recent.unwrap_or(config.dashboard.recent_interactions),
            cli.json,
        ),
        Command::Coaching { plan } => run_coaching(dataset, &config, plan, cli.json),
        Command::Export {
            format,
            output,
            sort,
            max_records,
            sentiment,
            no_metadata,
        } => {
            let export_config = ExportConfig {
                format: match format {
                    FormatArg::Csv => ExportFormat::Csv,
                    FormatArg::Json => ExportFormat::Json,
                },
                include_metadata: !no_metadata,
                date_range: None,
                sentiment: sentiment.map(Sentiment::from),
                max_records,
                sort_order: sort.into(),
            };
            run_export(dataset, &config, &export_config, output)
        }
        Command::Config { .. } => Ok(()),
    };

    if let Err(e) = &result {
        utils::log_error_with_context(e, "command");
    }
    result
}

/// 使用するデータセットを決定してキャッシュする
fn resolve_dataset(cli: &Cli, config: &AppConfig) -> anyhow::Result<&'static Dataset> {
    let prepared = match (&cli.dataset, cli.seed.or(config.data.seed)) {
        (Some(path), _) => Some(
            io::load_dataset(path)
                .map_err(CoachError::from)
                .with_context(|| format!("Failed to load dataset: {}", path.display()))?,
        ),
        (None, Some(seed)) => {
            tracing::info!(seed, "🎲 Generating seeded sample data");
            Some(SampleDataGenerator::with_seed(seed).generate())
        }
        (None, None) => None,
    };

    Ok(match prepared {
        Some(dataset) => data::sample_dataset_or_init(move || dataset),
        None => data::sample_dataset(),
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_distribution<K: Ord + Copy + std::fmt::Display>(title: &str, distribution: &CountDistribution<K>) {
    println!("\n{}", title);
    if distribution.is_empty() {
        println!("  (no data)");
        return;
    }
    for (key, count) in distribution.by_count_desc() {
        println!("  {:<20} {:>3} {}", key.to_string(), count, "█".repeat(count));
    }
}

fn run_dashboard(dataset: &Dataset, top: usize, json: bool) -> anyhow::Result<()> {
    let summary = DashboardSummary::compute(dataset.agents(), dataset.interactions(), top);
    if json {
        return print_json(&summary);
    }

    println!("📊 Team Performance Dashboard");
    println!("=============================");
    println!("Total Agents:        {}", summary.total_agents);
    println!("Average Rating:      {}", utils::format_rating(summary.average_rating));
    println!("Resolution Rate:     {}", summary.resolution_rate);
    println!("Negative Sentiment:  {}", summary.negative_rate);

    print_distribution("Customer Sentiment Distribution", &summary.sentiment_distribution);
    print_distribution("Interactions by Type", &summary.channel_distribution);

    println!("\nSentiment by Team");
    for (team, counts) in &summary.team_sentiment {
        let cells: Vec<String> = Sentiment::ALL
            .iter()
            .map(|s| format!("{}={}", s, counts.get(*s)))
            .collect();
        println!("  {:<20} {}", team.to_string(), cells.join("  "));
    }

    println!("\nTop Agents by Rating");
    for (rank, agent) in summary.top_agents.iter().enumerate() {
        println!("  {}. {:<20} {:.1}", rank + 1, agent.name, agent.avg_rating);
    }
    Ok(())
}

fn run_analyze(
    dataset: &Dataset,
    channel: Channel,
    agent: Option<String>,
    transcript: Option<String>,
    file: Option<PathBuf>,
    actions: Vec<ActionArg>,
    json: bool,
) -> anyhow::Result<()> {
    let agent_name = match agent {
        Some(name) => dataset
            .agent_by_name(&name)
            .map(|a| a.name.clone())
            .ok_or(CoachError::AgentNotFound { name })?,
        None => dataset
            .agents()
            .first()
            .map(|a| a.name.clone())
            .context("Dataset has no agents")?,
    };

    let transcript = match (transcript, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read transcript: {}", path.display()))?,
        (None, None) => sample_transcript(channel).to_string(),
    };

    let report = TranscriptAnalyzer::new().analyze(&transcript, &channel.to_string(), &agent_name);
    let acknowledgements: Vec<String> = actions
        .into_iter()
        .map(|action| NextStep::from(action).acknowledge(&agent_name))
        .collect();

    if json {
        return print_json(&serde_json::json!({
            "report": report,
            "acknowledgements": acknowledgements,
        }));
    }

    println!("{}", report.to_markdown());
    for message in acknowledgements {
        println!("✔ {}", message);
    }
    Ok(())
}

fn run_agent(dataset: &Dataset, name: &str, recent: usize, json: bool) -> anyhow::Result<()> {
    let performance: AgentPerformance = agent_performance_by_name(dataset, name, recent)?;
    if json {
        return print_json(&performance);
    }

    let agent = &performance.agent;
    println!("👤 {} ({})", agent.name, agent.team);
    println!("Average Rating:      {:.1}", agent.avg_rating);
    println!("Tenure (months):     {}", agent.tenure_months);
    println!("Resolution Rate:     {}", performance.resolution_rate);
    println!("Negative Sentiment:  {}", performance.negative_rate);

    if !performance.has_interactions() {
        println!("\nNo interactions found for this agent.");
        return Ok(());
    }

    print_distribution("Customer Sentiment Distribution", &performance.sentiment_distribution);
    print_distribution("Resolution Status", &performance.resolution_distribution);

    println!("\nRecent Interactions");
    for interaction in &performance.recent_interactions {
        println!(
            "  #{} {} {:<5} {:<18} {:>8} {:<8} {}",
            interaction.id,
            interaction.timestamp.format("%Y-%m-%d"),
            interaction.channel.to_string(),
            interaction.topic.to_string(),
            utils::format_duration(interaction.duration_secs),
            interaction.sentiment.to_string(),
            interaction.resolution
        );
    }
    Ok(())
}

fn run_coaching(dataset: &Dataset, config: &AppConfig, plan: Option<String>, json: bool) -> anyhow::Result<()> {
    let candidates = find_coaching_candidates(dataset.agents(), dataset.interactions(), &config.coaching);

    let plan = match plan {
        Some(name) => {
            let candidate = candidates
                .iter()
                .find(|c| c.agent_name.eq_ignore_ascii_case(name.trim()))
                .ok_or_else(|| anyhow::anyhow!("{} is not a coaching candidate", name))?;
            Some(CoachingPlan::for_agent(&candidate.agent_name))
        }
        None => None,
    };

    if json {
        return print_json(&serde_json::json!({
            "candidates": candidates,
            "plan": plan,
        }));
    }

    println!("🎓 Coaching Opportunities");
    if candidates.is_empty() {
        println!("No critical coaching opportunities identified. Team performance is within expected parameters.");
        return Ok(());
    }

    println!("  {:<20} {:>10} {:>12} {:>8}", "Agent", "Negative", "Resolution", "Priority");
    for candidate in &candidates {
        println!(
            "  {:<20} {:>10} {:>12} {:>8}",
            candidate.agent_name,
            candidate.negative_rate.to_string(),
            candidate.resolution_rate.to_string(),
            candidate.priority.to_string()
        );
    }

    if let Some(plan) = plan {
        println!("\n{}", plan.to_markdown());
    }
    Ok(())
}

fn run_export(
    dataset: &Dataset,
    config: &AppConfig,
    export_config: &ExportConfig,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let report = ReportData::from_dataset(dataset, &config.coaching, config.dashboard.top_agents);
    let manager = ExportManager::new();
    let bytes = manager
        .export(&report, export_config)
        .map_err(CoachError::from)?;

    match output {
        Some(path) => {
            let path = manager
                .output_path(path, export_config.format)
                .map_err(CoachError::from)?;
            std::fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            tracing::info!(path = %path.display(), "✅ Export written");
        }
        None => std::io::stdout().write_all(&bytes)?,
    }
    Ok(())
}

fn run_config(
    manager: &ConfigManager,
    config: &AppConfig,
    action: &ConfigAction,
    json: bool,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            if json {
                print_json(config)?;
            } else {
                print!("{}", toml::to_string_pretty(config)?);
            }
        }
        ConfigAction::Path => println!("{}", manager.config_file_path().display()),
        ConfigAction::Reset => {
            manager.reset_config()?;
            println!("🔄 Configuration reset: {}", manager.config_file_path().display());
        }
    }
    Ok(())
}
