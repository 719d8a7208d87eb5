wire_enum! {
    /// Video input sources for `INPUT_SELECT`.
    pub enum Input {
        DigitalTv => ("dtv", "dtv"),
        AnalogTv => ("atv", "atv"),
        CableDigitalTv => ("cadtv", "cadtv"),
        CableTv => ("catv", "catv"),
        Av1 => ("av1", "av1"),
        Component1 => ("component1", "component1"),
        Hdmi1 => ("hdmi1", "hdmi1"),
        Hdmi2 => ("hdmi2", "hdmi2"),
        Hdmi3 => ("hdmi3", "hdmi3"),
        Hdmi4 => ("hdmi4", "hdmi4"),
    }
}

wire_enum! {
    /// Levels for `ENERGY_SAVING`.
    pub enum EnergySavingLevel {
        Auto => ("auto", "auto"),
        ScreenOff => ("screenOff", "screen_off"),
        Maximum => ("maximum", "maximum"),
        Medium => ("medium", "medium"),
        Minimum => ("minimum", "minimum"),
        Off => ("off", "off"),
    }
}

wire_enum! {
    /// Remote-control buttons for `KEY_ACTION`.
    pub enum Key {
        ArrowDown => ("arrowDown", "arrowdown"),
        ArrowLeft => ("arrowLeft", "arrowleft"),
        ArrowRight => ("arrowRight", "arrowright"),
        ArrowUp => ("arrowUp", "arrowup"),
        AspectRatio => ("aspectRatio", "aspectratio"),
        AudioDescription => ("audioDescription", "audiodescription"),
        Back => ("back", "returnback"),
        BlueButton => ("blueButton", "bluebutton"),
        Captions => ("captions", "cc"),
        ChannelDown => ("channelDown", "channeldown"),
        ChannelList => ("channelList", "channellist"),
        ChannelUp => ("channelUp", "channelup"),
        DeviceInput => ("deviceInput", "deviceinput"),
        ScreenBrightness => ("screenBright", "screenbright"),
        Exit => ("exit", "exit"),
        FastForward => ("fastForward", "fastforward"),
        GreenButton => ("greenButton", "greenbutton"),
        Home => ("home", "myapp"),
        Info => ("info", "programminfo"),
        LiveTv => ("liveTv", "livetv"),
        Menu => ("menu", "settingmenu"),
        Number0 => ("number0", "number0"),
        Number1 => ("number1", "number1"),
        Number2 => ("number2", "number2"),
        Number3 => ("number3", "number3"),
        Number4 => ("number4", "number4"),
        Number5 => ("number5", "number5"),
        Number6 => ("number6", "number6"),
        Number7 => ("number7", "number7"),
        Number8 => ("number8", "number8"),
        Number9 => ("number9", "number9"),
        Ok => ("ok", "ok"),
        Play => ("play", "play"),
        PreviousChannel => ("previousChannel", "flashback"),
        ProgramGuide => ("programGuide", "programguide"),
        QuickSettings => ("quickSettings", "quickmenu"),
        Record => ("record", "record"),
        RedButton => ("redButton", "redbutton"),
        Rewind => ("rewind", "rewind"),
        SleepTimer => ("sleepTimer", "sleepreserve"),
        SoundMode => ("soundMode", "soundmode"),
        Stop => ("stop", "stop"),
        UserGuide => ("userGuide", "userguide"),
        VideoMode => ("videoMode", "videomode"),
        VolumeDown => ("volumeDown", "volumedown"),
        VolumeMute => ("volumeMute", "volumemute"),
        VolumeUp => ("volumeUp", "volumeup"),
        YellowButton => ("yellowButton", "yellowbutton"),
    }
}

wire_enum! {
    /// Picture presets for `PICTURE_MODE`.  Availability depends on the model
    /// and on the signal currently shown.
    pub enum PictureMode {
        Cinema => ("cinema", "cinema"),
        Eco => ("eco", "eco"),
        Expert1 => ("expert1", "expert1"),
        Expert2 => ("expert2", "expert2"),
        Game => ("game", "game"),
        Normal => ("normal", "normal"),
        Photo => ("photo", "photo"),
        Sports => ("sports", "sports"),
        Technicolor => ("technicolor", "technicolor"),
        Vivid => ("vivid", "vivid"),
        HdrEffect => ("hdrEffect", "hdreffect"),
        HdrCinema => ("hdrCinema", "hdrcinema"),
        HdrCinemaBright => ("hdrCinemaBright", "hdrcinemabright"),
        HdrExternal => ("hdrExternal", "hdrexternal"),
        HdrGame => ("hdrGame", "hdrgame"),
        HdrStandard => ("hdrStandard", "hdrstandard"),
        HdrTechnicolor => ("hdrTechnicolor", "hdrtechnicolor"),
        HdrVivid => ("hdrVivid", "hdrvivid"),
        DolbyHdrCinema => ("dolbyHdrCinema", "dolbycinema"),
        DolbyHdrCinemaBright => ("dolbyHdrCinemaBright", "dolbycinemabright"),
        DolbyHdrGame => ("dolbyHdrGame", "dolbygame"),
        DolbyHdrStandard => ("dolbyHdrStandard", "dolbystandard"),
        DolbyHdrVivid => ("dolbyHdrVivid", "dolbyvivid"),
        FilmMaker => ("filmMaker", "filmMaker"),
    }
}

wire_enum! {
    /// Blanking modes for `SCREEN_MUTE`.
    pub enum ScreenMuteMode {
        /// Blank the panel, keep audio.
        ScreenMuteOn => ("screenMuteOn", "screenmuteon"),
        /// Blank the current input only; on-screen menus still show.
        VideoMuteOn => ("videoMuteOn", "videomuteon"),
        AllMuteOff => ("allMuteOff", "allmuteoff"),
    }
}

wire_enum! {
    /// Well-known application ids for `APP_LAUNCH`.  Any other id can be
    /// launched by string.
    pub enum App {
        AmazonPrimeVideo => ("amazon", "amazon"),
        AppleTv => ("appletv", "com.apple.appletv"),
        DisneyPlus => ("disneyplus", "com.disney.disneyplus-prod"),
        HboMax => ("hbomax", "com.hbo.hbomax"),
        LiveTv => ("livetv", "com.webos.app.livetv"),
        Netflix => ("netflix", "netflix"),
        YouTube => ("youtube", "youtube.leanback.v4"),
    }
}

wire_enum! {
    /// Network interfaces for `GET_MACADDRESS`.
    pub enum MacInterface {
        Wired => ("wired", "wired"),
        Wifi => ("wifi", "wifi"),
    }
}

wire_enum! {
    /// Result of a power probe.
    pub enum PowerState {
        On => ("on", "on"),
        Off => ("off", "off"),
        /// The TV did not answer in time; it may be off or unreachable.
        Unknown => ("unknown", "unknown"),
    }
}
