use std::{
    collections::HashMap,
    path::Path,
    process::Stdio,
    time::{Duration, Instant},
};

use anyhow::Result;
use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::process::Command;

use crate::exit;

lazy_static::lazy_static! {
    static ref DOTS_STYLE: ProgressStyle = ProgressStyle::with_template("{spinner} {msg} {elapsed_precise}").unwrap().tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pub static ref GREEN_TICK: StyledObject<&'static str> = style("✔").green();
    pub static ref RED_CROSS: StyledObject<&'static str> = style("✗").red();
    pub static ref ARROW: StyledObject<&'static str> = style("→").cyan();
}

pub fn progress(msg: &str) -> ProgressBar {
    let w = ProgressBar::new_spinner();
    w.set_style(DOTS_STYLE.clone());
    w.enable_steady_tick(Duration::from_millis(80));
    w.set_message(msg.to_owned());
    w
}

/// Runs `cmd` inside `dir` with the console attached, so interactive
/// prompts from the child reach the operator.
///
/// `msgs` is `[ongoing, failure, success]`.
pub async fn command(
    cmd: &str,
    args: &[&str],
    msgs: [&str; 3],
    dir: &Path,
    env: &HashMap<String, String>,
) -> Result<()> {
    tracing::info!("{cmd} {args:?} in {}", dir.display());
    println!("{} {}", ARROW.to_string(), msgs[0]);

    let mut cmd = Command::new(cmd);
    let _cmd = cmd
        .current_dir(dir)
        .args(args)
        .envs(env)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let start_time = Instant::now();
    let status = _cmd.status().await?;
    let dur = start_time.elapsed();
    if !status.success() {
        exit!(
            format!("{} ({status})", msgs[1]),
            "{} {}",
            RED_CROSS.to_string(),
            msgs[1]
        );
    }

    finish_progress(msgs[2], &dir.display().to_string(), dur, None);
    Ok(())
}

fn elapsed_time_str(dur: &Duration) -> String {
    let seconds = dur.as_secs() % 60;
    let minutes = (dur.as_secs() / 60) % 60;
    let hours = (dur.as_secs() / 60) / 60;
    format!("{:0>2}:{:0>2}:{:0>2}", hours, minutes, seconds)
}

pub fn finish_progress(
    status_message: &str,
    context: &str,
    dur: Duration,
    pb: Option<ProgressBar>,
) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    println!(
        "{} {} ({}) took, {}",
        GREEN_TICK.to_string(),
        status_message,
        context,
        elapsed_time_str(&dur)
    );
}
