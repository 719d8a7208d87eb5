//! LgTv: the remote-control API.
//!
//! Each method is one command.  Set-style methods require an `OK`
//! acknowledgement; query methods parse the reply with `lgtv_core::reply`.
//! The caller owns the connection lifecycle: connect once, issue any number of
//! commands, disconnect.

use std::net::IpAddr;

use lgtv_core::{
    command, reply, AppDetails, EncryptedCodec, EnergySavingLevel, Input, Key, Keycode,
    MacAddress, MacInterface, MessageCodec, PictureMode, PlainCodec, PowerState, ScreenMuteMode,
    Settings,
};
use tracing::{info, warn};

use super::session::{RequestChannel, Session, SessionError};
use crate::infrastructure::network::{ConnectOptions, TcpChannel};

/// Remote control for one TV.
pub struct LgTv<C = TcpChannel> {
    session: Session<C>,
}

impl LgTv<TcpChannel> {
    /// Builds a remote for the TV at `host`.
    ///
    /// A `keycode` selects the encrypted codec; without one, commands are sent
    /// in plain text.  The MAC address is only needed by [`LgTv::power_on`].
    ///
    /// # Errors
    ///
    /// [`SessionError::Config`] if `settings` fail validation,
    /// [`SessionError::Codec`] if they cannot drive the encrypted codec.
    pub fn new(
        host: IpAddr,
        mac: Option<MacAddress>,
        keycode: Option<&Keycode>,
        settings: Settings,
    ) -> Result<Self, SessionError> {
        settings
            .validate()
            .map_err(|e| SessionError::Config(e.to_string()))?;
        let codec: Box<dyn MessageCodec> = match keycode {
            Some(keycode) => Box::new(EncryptedCodec::new(keycode, &settings)?),
            None => Box::new(PlainCodec::new(&settings)),
        };
        let channel = TcpChannel::new(host, mac, settings);
        Ok(Self::with_session(Session::new(channel, codec)))
    }
}

impl<C: RequestChannel> LgTv<C> {
    pub fn with_session(session: Session<C>) -> Self {
        Self { session }
    }

    pub fn session_mut(&mut self) -> &mut Session<C> {
        &mut self.session
    }

    // ── Connection ────────────────────────────────────────────────────────────

    pub async fn connect(&mut self, options: ConnectOptions) -> Result<(), SessionError> {
        self.session.connect(options).await
    }

    pub async fn disconnect(&mut self) -> Result<(), SessionError> {
        self.session.disconnect().await
    }

    pub fn is_connected(&mut self) -> bool {
        self.session.is_connected()
    }

    // ── Power ─────────────────────────────────────────────────────────────────

    /// Sends the wake-on-LAN packet.  Does not wait for the TV to boot.
    pub async fn power_on(&self) -> Result<(), SessionError> {
        self.session.wake_on_lan().await?;
        info!("power-on packet sent");
        Ok(())
    }

    /// Wakes the TV, then connects while it boots.
    ///
    /// `None` uses [`ConnectOptions::after_wake`].
    pub async fn power_on_and_connect(
        &mut self,
        options: Option<ConnectOptions>,
    ) -> Result<(), SessionError> {
        self.power_on().await?;
        self.connect(options.unwrap_or_else(ConnectOptions::after_wake))
            .await
    }

    pub async fn power_off(&mut self) -> Result<(), SessionError> {
        self.session.call_ok(command::POWER_OFF).await
    }

    /// Probes whether the panel is on.
    ///
    /// When disconnected, the probe connects and always disconnects again.  A
    /// TV that does not answer in time is reported as [`PowerState::Unknown`].
    pub async fn get_power_state(&mut self) -> Result<PowerState, SessionError> {
        if self.session.is_connected() {
            return self.probe_power().await;
        }

        let outcome = match self.session.connect(ConnectOptions::default()).await {
            Ok(()) => self.probe_power().await,
            Err(e) => Err(e),
        };
        if let Err(e) = self.session.disconnect().await {
            warn!(error = %e, "disconnect after power probe failed");
        }

        match outcome {
            Err(e) if e.is_timeout() => Ok(PowerState::Unknown),
            other => other,
        }
    }

    async fn probe_power(&mut self) -> Result<PowerState, SessionError> {
        Ok(match self.get_current_app_details().await? {
            Some(_) => PowerState::On,
            None => PowerState::Off,
        })
    }

    // ── Audio ─────────────────────────────────────────────────────────────────

    /// Sets the volume; `level` above 100 fails before anything is sent.
    pub async fn set_volume(&mut self, level: u8) -> Result<(), SessionError> {
        let cmd = command::set_volume(level)?;
        self.session.call_ok(&cmd).await
    }

    pub async fn get_current_volume(&mut self) -> Result<u8, SessionError> {
        let text = self.session.call(command::CURRENT_VOLUME).await?;
        Ok(reply::parse_volume(&text)?)
    }

    pub async fn set_volume_mute(&mut self, muted: bool) -> Result<(), SessionError> {
        self.session.call_ok(&command::set_volume_mute(muted)).await
    }

    pub async fn get_mute_state(&mut self) -> Result<bool, SessionError> {
        let text = self.session.call(command::MUTE_STATE).await?;
        Ok(reply::parse_mute_state(&text)?)
    }

    // ── Picture and input ─────────────────────────────────────────────────────

    pub async fn set_input(&mut self, input: Input) -> Result<(), SessionError> {
        self.session.call_ok(&command::select_input(input)).await
    }

    pub async fn set_energy_saving(&mut self, level: EnergySavingLevel) -> Result<(), SessionError> {
        self.session.call_ok(&command::set_energy_saving(level)).await
    }

    pub async fn set_picture_mode(&mut self, mode: PictureMode) -> Result<(), SessionError> {
        self.session.call_ok(&command::set_picture_mode(mode)).await
    }

    pub async fn set_screen_mute(&mut self, mode: ScreenMuteMode) -> Result<(), SessionError> {
        self.session.call_ok(&command::set_screen_mute(mode)).await
    }

    pub async fn send_key(&mut self, key: Key) -> Result<(), SessionError> {
        self.session.call_ok(&command::key_action(key)).await
    }

    // ── Apps ──────────────────────────────────────────────────────────────────

    /// Launches an application by id (see [`lgtv_core::App`] for common ones).
    pub async fn launch_app(&mut self, app_id: &str) -> Result<(), SessionError> {
        self.session.call_ok(&command::launch_app(app_id)).await
    }

    /// Id of the foreground app, or `None` when the panel is off.
    pub async fn get_current_app(&mut self) -> Result<Option<String>, SessionError> {
        Ok(self.get_current_app_details().await?.map(|details| details.app))
    }

    pub async fn get_current_app_details(&mut self) -> Result<Option<AppDetails>, SessionError> {
        let text = self.session.call(command::CURRENT_APP).await?;
        Ok(reply::parse_current_app(&text)?)
    }

    // ── Device information ────────────────────────────────────────────────────

    /// `true` when IP control is enabled; any other answer is a parse error.
    pub async fn get_ip_control_state(&mut self) -> Result<bool, SessionError> {
        let text = self.session.call(command::IP_CONTROL_STATE).await?;
        Ok(reply::parse_ip_control_state(&text)?)
    }

    /// MAC address of the given interface, as reported by the TV.
    pub async fn get_mac_address(&mut self, iface: MacInterface) -> Result<String, SessionError> {
        self.session.call(&command::get_mac_address(iface)).await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
