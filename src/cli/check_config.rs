//! Check-config 命令 - 校验 slack.yaml 并打印解析结果

use super::{load_config, to_json};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Check-config 命令参数
#[derive(Args)]
pub struct CheckConfigArgs {
    /// slack.yaml 路径
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

pub fn handle_check_config(args: CheckConfigArgs) -> Result<()> {
    let config = load_config(args.config)?;

    let summary = serde_json::json!({
        "webhook": config.redacted_webhook(),
        "channels": config.channels,
        "statuses": config.statuses,
        "username": config.username,
    });
    println!("{}", to_json(&summary));
    Ok(())
}
