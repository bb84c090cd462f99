// src/main.rs - Demo node: evaluates samples from stdin against YAML alerts
use anyhow::{bail, Context, Result};
use log::{info, warn};
use n2k_alert::{AlertManager, Config};
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    n2k_alert::init();

    let config_path = match std::env::args().nth(1) {
        Some(path) => path,
        None => bail!("Usage: n2k-alert <config.yaml>"),
    };

    info!("n2k-alert v{} starting", n2k_alert::VERSION);

    let config = Config::from_file(&config_path)
        .with_context(|| format!("Failed to load {}", config_path))?;
    let mut manager = AlertManager::from_config(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (alert_id, sample) = match parse_sample(line) {
            Some(parsed) => parsed,
            None => {
                warn!("Expected '<alert_id> <sample>', got '{}'", line);
                continue;
            }
        };

        if let Err(e) = manager.test_threshold(alert_id, sample) {
            warn!("{}", e);
            continue;
        }

        if let Some(alert) = manager.get(alert_id) {
            let msg = alert.encode_notification();
            writeln!(out, "{}", hex::encode_upper(msg.data()))?;
            writeln!(out, "{}", serde_json::to_string(&alert.notification())?)?;
        }
    }

    info!("Input closed, {} alert(s) evaluated", manager.len());
    Ok(())
}

fn parse_sample(line: &str) -> Option<(u16, u64)> {
    let mut fields = line.split_whitespace();
    let alert_id = fields.next()?.parse().ok()?;
    let sample = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((alert_id, sample))
}
