//! `lgtv`: command-line remote control for LG TVs.
//!
//! Every invocation runs one subcommand: connect, act, disconnect.  Queries
//! print their result to stdout, one value per line.
//!
//! # Usage
//!
//! ```text
//! lgtv --host 192.168.1.40 --keycode M9N0AZ62 volume
//! lgtv --host 192.168.1.40 --keycode M9N0AZ62 volume 25
//! lgtv --host 192.168.1.40 --mac DA:0A:0F:E1:60:CB power on
//! lgtv --host 192.168.1.40 key home pause arrowDown ok --pause-duration 0.5
//! ```
//!
//! # Environment variables
//!
//! | Variable        | Default                       | Description                          |
//! |-----------------|-------------------------------|--------------------------------------|
//! | `LGTV_HOST`     | `[device] host` in config     | IPv4 or IPv6 address of the TV       |
//! | `LGTV_MAC`      | `[device] mac` in config      | MAC address, needed for `power on`   |
//! | `LGTV_KEYCODE`  | none (plain-text protocol)    | 8-character keycode shown by the TV  |
//! | `RUST_LOG`      | `warn` (`debug` with `-v`)    | Log filter for `tracing-subscriber`  |
//!
//! Settings not given on the command line come from the config file
//! (`--config`, or the platform default location if it exists).

use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use lgtv_client::infrastructure::storage::config::{load_config, load_default_config, ClientConfig};
use lgtv_client::{ConnectOptions, LgTv, RequestChannel, SessionError};
use lgtv_core::{
    App, EnergySavingLevel, Input, Key, Keycode, MacAddress, MacInterface, PictureMode,
    ScreenMuteMode, Settings, UnknownVariant,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Command-line remote control for LG TVs over the IP-control port.
#[derive(Debug, Parser)]
#[command(name = "lgtv", about, version)]
struct Cli {
    /// IP address of the TV.
    #[arg(short = 'o', long, env = "LGTV_HOST")]
    host: Option<IpAddr>,

    /// MAC address of the TV, used to power it on.
    #[arg(short, long, env = "LGTV_MAC")]
    mac: Option<MacAddress>,

    /// Keycode shown on the TV's IP-control screen.  Without it, commands are
    /// sent unencrypted.
    #[arg(short, long, env = "LGTV_KEYCODE", hide_env_values = true)]
    keycode: Option<Keycode>,

    /// TCP port of the IP-control service.
    #[arg(short, long)]
    port: Option<u16>,

    /// Destination address for the wake-on-LAN packet.
    #[arg(short, long)]
    wol_address: Option<IpAddr>,

    /// Network timeout in seconds.
    #[arg(short, long, value_parser = parse_seconds)]
    timeout: Option<Duration>,

    /// Config file to read instead of the default location.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log protocol activity to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Turn the TV on or off, or report whether it is on.
    Power {
        #[arg(value_enum)]
        action: PowerAction,
    },
    /// Print the volume, or set it (0-100).
    Volume {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        level: Option<u8>,
    },
    /// Print the mute state, or set it.
    Mute {
        #[arg(value_enum)]
        state: Option<Toggle>,
    },
    /// Switch the video input.
    Input { input: Input },
    /// Set the energy-saving level.
    #[command(name = "energysaving")]
    EnergySaving { level: EnergySavingLevel },
    /// Set the picture mode.
    #[command(name = "picturemode")]
    PictureMode { mode: PictureMode },
    /// Blank or restore the screen.
    #[command(name = "screenmute")]
    ScreenMute { mode: ScreenMuteMode },
    /// Press remote-control keys in order; `pause` waits between presses.
    Key {
        #[arg(required = true)]
        keys: Vec<KeyStep>,

        /// Length of each `pause`, in seconds.
        #[arg(short = 'u', long, default_value = "1", value_parser = parse_seconds)]
        pause_duration: Duration,
    },
    /// Print the foreground app, or launch one by name or app id.
    App { name: Option<String> },
    /// Print the MAC address of a network interface.
    Mac { iface: MacInterface },
    /// Print whether IP control is enabled.
    #[command(name = "ipcontrol")]
    IpControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PowerAction {
    On,
    Off,
    State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Toggle {
    On,
    Off,
}

/// One entry of the `key` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyStep {
    Press(Key),
    Pause,
}

impl FromStr for KeyStep {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pause") {
            Ok(KeyStep::Pause)
        } else {
            s.parse().map(KeyStep::Press)
        }
    }
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("`{s}` is not a number of seconds"))?;
    if secs <= 0.0 {
        return Err("must be a positive number of seconds".to_string());
    }
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

/// The TV to talk to, after merging the command line over the config file.
#[derive(Debug)]
struct Target {
    host: IpAddr,
    mac: Option<MacAddress>,
    settings: Settings,
}

impl Cli {
    /// Applies command-line overrides to `config`.
    fn target(&self, config: ClientConfig) -> anyhow::Result<Target> {
        let host = self.host.or(config.device.host).context(
            "no TV address: pass --host, set LGTV_HOST, or add `host` under [device] in the config file",
        )?;

        let mut settings = config.settings;
        if let Some(port) = self.port {
            settings.network_port = port;
        }
        if let Some(wol_address) = self.wol_address {
            settings.wol_address = wol_address;
        }
        if let Some(timeout) = self.timeout {
            settings.network_timeout_ms = u64::try_from(timeout.as_millis())
                .unwrap_or(u64::MAX)
                .max(1);
        }

        Ok(Target {
            host,
            mac: self.mac.or(config.device.mac),
            settings,
        })
    }

    fn read_config(&self) -> anyhow::Result<ClientConfig> {
        match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => load_default_config().context("failed to load default config"),
        }
    }
}

// ── Command execution ─────────────────────────────────────────────────────────

/// `power on` wakes a TV that cannot accept connections yet, and `power state`
/// manages its own probe connection.
fn needs_connection(command: &Command) -> bool {
    !matches!(
        command,
        Command::Power {
            action: PowerAction::On | PowerAction::State
        }
    )
}

/// Runs `command` and returns the lines to print.
async fn run<C: RequestChannel>(tv: &mut LgTv<C>, command: Command) -> anyhow::Result<Vec<String>> {
    if !needs_connection(&command) {
        return Ok(execute(tv, command).await?);
    }

    tv.connect(ConnectOptions::default())
        .await
        .context("failed to connect to the TV")?;
    let outcome = execute(tv, command).await;
    if let Err(e) = tv.disconnect().await {
        warn!(error = %e, "disconnect failed");
    }
    Ok(outcome?)
}

async fn execute<C: RequestChannel>(
    tv: &mut LgTv<C>,
    command: Command,
) -> Result<Vec<String>, SessionError> {
    let mut lines = Vec::new();
    match command {
        Command::Power { action } => match action {
            PowerAction::On => tv.power_on().await?,
            PowerAction::Off => tv.power_off().await?,
            PowerAction::State => lines.push(tv.get_power_state().await?.name().to_string()),
        },
        Command::Volume { level: Some(level) } => tv.set_volume(level).await?,
        Command::Volume { level: None } => lines.push(tv.get_current_volume().await?.to_string()),
        Command::Mute { state: Some(state) } => tv.set_volume_mute(state == Toggle::On).await?,
        Command::Mute { state: None } => lines.push(on_off(tv.get_mute_state().await?)),
        Command::Input { input } => tv.set_input(input).await?,
        Command::EnergySaving { level } => tv.set_energy_saving(level).await?,
        Command::PictureMode { mode } => tv.set_picture_mode(mode).await?,
        Command::ScreenMute { mode } => tv.set_screen_mute(mode).await?,
        Command::Key {
            keys,
            pause_duration,
        } => {
            for step in keys {
                match step {
                    KeyStep::Press(key) => tv.send_key(key).await?,
                    KeyStep::Pause => {
                        debug!(?pause_duration, "pausing");
                        tokio::time::sleep(pause_duration).await;
                    }
                }
            }
        }
        Command::App { name: Some(name) } => {
            let app_id = match name.parse::<App>() {
                Ok(app) => app.as_str().to_string(),
                Err(_) => name,
            };
            tv.launch_app(&app_id).await?;
        }
        Command::App { name: None } => {
            let app = tv.get_current_app().await?;
            lines.push(app.unwrap_or_else(|| "none".to_string()));
        }
        Command::Mac { iface } => lines.push(tv.get_mac_address(iface).await?),
        Command::IpControl => lines.push(on_off(tv.get_ip_control_state().await?)),
    }
    Ok(lines)
}

fn on_off(flag: bool) -> String {
    let text = if flag { "on" } else { "off" };
    text.to_string()
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when both are given.
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let target = cli.target(cli.read_config()?)?;
    debug!(host = %target.host, port = target.settings.network_port, "resolved target");

    let mut tv = LgTv::new(target.host, target.mac, cli.keycode.as_ref(), target.settings)
        .context("invalid TV settings")?;

    for line in run(&mut tv, cli.command).await? {
        println!("{line}");
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
