use callcoach::{io::save_dataset, SampleDataGenerator};
use clap::Parser;
use std::path::PathBuf;

/// サンプルデータセットをNDJSONに書き出す
#[derive(Parser, Debug)]
#[command(name = "generate_sample_data", version)]
struct Args {
    /// 乱数シード（省略時は毎回異なるデータ）
    #[arg(long)]
    seed: Option<u64>,

    /// 出力先
    #[arg(short, long, default_value = "tests/data/sample_dataset.ndjson")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let dataset = match args.seed {
        Some(seed) => SampleDataGenerator::with_seed(seed).generate(),
        None => SampleDataGenerator::from_entropy().generate(),
    };

    // 出力先ディレクトリを作成
    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let lines = save_dataset(&args.output, &dataset)?;

    println!(
        "✅ サンプルデータを生成しました: {} ({} agents, {} interactions, {} lines)",
        args.output.display(),
        dataset.agents().len(),
        dataset.interactions().len(),
        lines
    );
    Ok(())
}
