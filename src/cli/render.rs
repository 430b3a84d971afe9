//! Render 命令 - 打印每个渠道的 payload，不发送

use super::{load_config, to_json};
use crate::notification::{MessageFormatter, NotificationBuilder};
use crate::report::Report;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Render 命令参数
#[derive(Args)]
pub struct RenderArgs {
    /// Run report 文件（JSON 或 YAML，`-` 表示 stdin）
    #[arg(long, short)]
    pub report: PathBuf,

    /// slack.yaml 路径
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

pub fn handle_render(args: RenderArgs) -> Result<()> {
    let config = load_config(args.config)?;
    let report = Report::from_file(&args.report)
        .with_context(|| format!("读取报告失败: {}", args.report.display()))?;

    if !config.should_notify(report.status) {
        eprintln!(
            "[DRY-RUN] status '{}' not in filter {:?}, nothing would be sent",
            report.status, config.statuses
        );
    }

    let message = MessageFormatter::new().render(&report, &config)?;
    let payloads = NotificationBuilder::new(config).preview(&message);

    println!("{}", to_json(&payloads));
    Ok(())
}
