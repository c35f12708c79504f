//! KIF 棋譜表示ツール
//!
//! KIF ファイルを 1 つ読み込み、本譜を指定した表記スタイルで表示する。
//! 終局面の SFEN、USI の position 行、JSON、KIF への再出力もできる。

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tsume_core::json::GameJson;
use tsume_core::kif::{read_kif_file, write_kif};
use tsume_core::{NotationStyle, NotationWriter};

#[derive(Parser, Debug)]
#[command(name = "tsume-kif")]
#[command(about = "KIF 棋譜を読み込み、本譜を指定の表記で表示する")]
struct Cli {
    /// 読み込む KIF ファイル（.kif / .kifu）
    path: PathBuf,

    /// 表記スタイル（western / kitao-kawasaki / japanese / iroha）
    #[arg(long, default_value = "japanese")]
    style: NotationStyle,

    /// 成れるかどうかが異なる駒も曖昧さ解消の候補にする
    #[arg(long, default_value_t = false)]
    aggressive: bool,

    /// 指し手に手数を付ける
    #[arg(long, default_value_t = false)]
    numbered: bool,

    /// 本譜の終局面を SFEN で表示
    #[arg(long, default_value_t = false)]
    sfen: bool,

    /// 本譜の終局面までを USI の position 行で表示
    #[arg(long, default_value_t = false)]
    usi: bool,

    /// 棋譜を JSON で表示
    #[arg(long, default_value_t = false)]
    json: bool,

    /// 棋譜を KIF 形式で再出力
    #[arg(long, default_value_t = false)]
    kif: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    let mut game = read_kif_file(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;
    info!(
        "loaded {} ({} nodes, {} headers)",
        cli.path.display(),
        game.tree().len() - 1,
        game.headers().len()
    );

    let writer = NotationWriter::new(cli.style).aggressive(cli.aggressive);
    let lines = writer
        .write_mainline(&game)
        .with_context(|| format!("failed to render moves in {} notation", cli.style))?;
    for (i, line) in lines.iter().enumerate() {
        if cli.numbered {
            println!("{:>4} {line}", i + 1);
        } else {
            println!("{line}");
        }
    }

    game.go_to_end().context("failed to replay the mainline")?;

    if cli.sfen {
        println!("{}", game.position().to_sfen());
    }
    if cli.usi {
        println!("position {}", game.to_usi_position());
    }
    if cli.json {
        let json = serde_json::to_string_pretty(&GameJson::from(&game))
            .context("failed to serialize the game as JSON")?;
        println!("{json}");
    }
    if cli.kif {
        print!("{}", write_kif(&game));
    }
    Ok(())
}
