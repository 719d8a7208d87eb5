//! Builders for the request strings understood by the TV.
//!
//! Each function returns the command text without a terminator; the codec
//! appends it.  Only [`set_volume`] can fail, because it is the only command
//! with an open-ended argument.

use crate::codec::CodecError;
use crate::vocabulary::{EnergySavingLevel, Input, Key, MacInterface, PictureMode, ScreenMuteMode};

/// Highest accepted volume level.
pub const MAX_VOLUME: u8 = 100;

pub const CURRENT_APP: &str = "CURRENT_APP";
pub const CURRENT_VOLUME: &str = "CURRENT_VOL";
pub const MUTE_STATE: &str = "MUTE_STATE";
pub const IP_CONTROL_STATE: &str = "GET_IPCONTROL_STATE";
pub const POWER_OFF: &str = "POWER off";

/// `VOLUME_CONTROL <level>`.
///
/// # Errors
///
/// Returns [`CodecError::InvalidCommand`] if `level` exceeds [`MAX_VOLUME`].
pub fn set_volume(level: u8) -> Result<String, CodecError> {
    if level > MAX_VOLUME {
        return Err(CodecError::InvalidCommand(format!(
            "volume level must be between 0 and {MAX_VOLUME}, got {level}"
        )));
    }
    Ok(format!("VOLUME_CONTROL {level}"))
}

pub fn set_volume_mute(muted: bool) -> String {
    format!("VOLUME_MUTE {}", if muted { "on" } else { "off" })
}

pub fn select_input(input: Input) -> String {
    format!("INPUT_SELECT {input}")
}

pub fn set_energy_saving(level: EnergySavingLevel) -> String {
    format!("ENERGY_SAVING {level}")
}

pub fn set_picture_mode(mode: PictureMode) -> String {
    format!("PICTURE_MODE {mode}")
}

pub fn set_screen_mute(mode: ScreenMuteMode) -> String {
    format!("SCREEN_MUTE {mode}")
}

pub fn key_action(key: Key) -> String {
    format!("KEY_ACTION {key}")
}

/// `APP_LAUNCH <id>` for any application id, well-known or not.
pub fn launch_app(app_id: &str) -> String {
    format!("APP_LAUNCH {app_id}")
}

pub fn get_mac_address(iface: MacInterface) -> String {
    format!("GET_MACADDRESS {iface}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::App;

    #[test]
    fn test_set_volume_formats_level() {
        assert_eq!(set_volume(0).unwrap(), "VOLUME_CONTROL 0");
        assert_eq!(set_volume(42).unwrap(), "VOLUME_CONTROL 42");
        assert_eq!(set_volume(100).unwrap(), "VOLUME_CONTROL 100");
    }

    #[test]
    fn test_set_volume_rejects_out_of_range_level() {
        assert!(matches!(set_volume(101), Err(CodecError::InvalidCommand(_))));
    }

    #[test]
    fn test_set_volume_mute_uses_on_off() {
        assert_eq!(set_volume_mute(true), "VOLUME_MUTE on");
        assert_eq!(set_volume_mute(false), "VOLUME_MUTE off");
    }

    #[test]
    fn test_vocabulary_commands_use_wire_values() {
        assert_eq!(select_input(Input::Hdmi2), "INPUT_SELECT hdmi2");
        assert_eq!(set_energy_saving(EnergySavingLevel::ScreenOff), "ENERGY_SAVING screen_off");
        assert_eq!(set_picture_mode(PictureMode::Expert1), "PICTURE_MODE expert1");
        assert_eq!(set_screen_mute(ScreenMuteMode::VideoMuteOn), "SCREEN_MUTE videomuteon");
        assert_eq!(key_action(Key::Home), "KEY_ACTION myapp");
        assert_eq!(get_mac_address(MacInterface::Wifi), "GET_MACADDRESS wifi");
    }

    #[test]
    fn test_launch_app_accepts_known_and_custom_ids() {
        assert_eq!(launch_app(App::Netflix.as_str()), "APP_LAUNCH netflix");
        assert_eq!(launch_app("com.example.app"), "APP_LAUNCH com.example.app");
    }
}
