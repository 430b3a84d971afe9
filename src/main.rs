//! puppet-slack CLI
//!
//! 把 Puppet run report 渲染成 Slack 消息并发送到配置的渠道

use anyhow::Result;
use clap::{Parser, Subcommand};
use puppet_slack::cli::{
    handle_check_config, handle_notify, handle_render, CheckConfigArgs, NotifyArgs, RenderArgs,
};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "puppet-slack")]
#[command(about = "puppet-slack - 把 Puppet run report 推送到 Slack")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 渲染报告并发送到所有配置的渠道
    Notify(NotifyArgs),
    /// 打印每个渠道的 payload（dry-run，不发送）
    Render(RenderArgs),
    /// 校验 slack.yaml
    CheckConfig(CheckConfigArgs),
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("puppet_slack=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Notify(args) => handle_notify(args),
        Commands::Render(args) => handle_render(args),
        Commands::CheckConfig(args) => handle_check_config(args),
    }
}
