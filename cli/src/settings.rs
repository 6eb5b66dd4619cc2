use anyhow::Context;
use clap::Args;
use crowdmines_core::{SessionSettings, clamp_ratio};
use std::path::PathBuf;

/// Session options, read from an optional TOML file and overridden by flags.
#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// TOML file with `seed`, `[game]` and `[timings]` tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board side length, 2 to 26
    #[arg(long)]
    size: Option<u8>,

    /// Number of mines
    #[arg(long)]
    mines: Option<u16>,

    /// Mine density kept when the board is resized
    #[arg(long)]
    ratio: Option<f64>,

    /// Quiet period after each accepted guess, in milliseconds
    #[arg(long)]
    cooldown_ms: Option<u64>,

    /// Delay before a cleared board is replaced, in milliseconds
    #[arg(long)]
    restart_delay_ms: Option<u64>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl SettingsArgs {
    pub fn load(&self) -> anyhow::Result<SessionSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => SessionSettings::default(),
        };

        if let Some(ratio) = self.ratio {
            settings.game.mine_ratio = ratio;
        }
        let mine_ratio = clamp_ratio(settings.game.mine_ratio);
        if mine_ratio != settings.game.mine_ratio {
            log::warn!(
                "Mine ratio {} is outside (0, 1), using {}",
                settings.game.mine_ratio,
                mine_ratio
            );
            settings.game.mine_ratio = mine_ratio;
        }
        if let Some(size) = self.size {
            settings.game.size = size;
            if self.mines.is_none() {
                settings.game.mine_count = settings.game.mines_for_size(size);
            }
        }
        if let Some(mines) = self.mines {
            settings.game.mine_count = mines;
        }
        if let Some(cooldown_ms) = self.cooldown_ms {
            settings.timings.cooldown_ms = cooldown_ms;
        }
        if let Some(restart_delay_ms) = self.restart_delay_ms {
            settings.timings.restart_delay_ms = restart_delay_ms;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }

        if let Err(err) = settings.game.validate() {
            log::warn!("{}, out-of-range values will be clamped", err);
        }
        log::debug!("settings: {:?}", settings);
        Ok(settings)
    }
}
