//! Notify 命令 - 渲染 run report 并投递到 Slack

use super::{format_outcomes, load_config, to_json};
use crate::report::Report;
use crate::reporter::SlackReporter;
use crate::notification::NotificationBuilder;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Notify 命令参数
#[derive(Args)]
pub struct NotifyArgs {
    /// Run report 文件（JSON 或 YAML，`-` 表示 stdin）
    #[arg(long, short)]
    pub report: PathBuf,

    /// slack.yaml 路径（默认按 PUPPET_SLACK_CONFIG / PUPPET_CONFDIR 查找）
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// 每个渠道一个线程并发投递
    #[arg(long)]
    pub concurrent: bool,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// 处理 notify 命令
///
/// 渠道投递失败不影响退出码，只有配置或报告不可用时返回错误。
pub fn handle_notify(args: NotifyArgs) -> Result<()> {
    let config = load_config(args.config)?;
    let report = Report::from_file(&args.report)
        .with_context(|| format!("读取报告失败: {}", args.report.display()))?;

    let dispatcher = NotificationBuilder::new(config.clone())
        .concurrent(args.concurrent)
        .build()?;
    let reporter = SlackReporter::with_dispatcher(config, dispatcher);

    let outcomes = reporter.process(&report)?;

    if args.json {
        println!("{}", to_json(&outcomes));
    } else {
        println!("{}", format_outcomes(&outcomes));
    }

    Ok(())
}
