//! Module and command tags.
//!
//! Byte 0 of a frame selects a [`Module`], byte 1 a command within that
//! module. Every enumeration here is closed over the known tags and carries an
//! `Unknown` arm for anything else; an unknown tag is never an error.

use core::fmt;

/// Module tags (byte 0 of every frame).
///
/// This module is non-exhaustive.
pub mod tags {
    pub const GENERAL: u8 = 0x00;
    pub const LOGGING: u8 = 0x01;
    pub const POWER: u8 = 0x02;
    pub const MEASURE: u8 = 0x03;
    pub const SENSOR: u8 = 0x04;
    pub const ALGORITHM: u8 = 0x05;
    pub const AIRBAG: u8 = 0x06;
    pub const SDCARD: u8 = 0x07;
    pub const CONFIGURE: u8 = 0x10;
    pub const SW_UPDATE: u8 = 0x20;
}

/// Controller subsystem addressed by a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    General,
    Logging,
    Power,
    Measure,
    Sensor,
    Algorithm,
    Airbag,
    SdCard,
    Configure,
    SwUpdate,
    Unknown(u8),
}

impl Module {
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            tags::GENERAL => Self::General,
            tags::LOGGING => Self::Logging,
            tags::POWER => Self::Power,
            tags::MEASURE => Self::Measure,
            tags::SENSOR => Self::Sensor,
            tags::ALGORITHM => Self::Algorithm,
            tags::AIRBAG => Self::Airbag,
            tags::SDCARD => Self::SdCard,
            tags::CONFIGURE => Self::Configure,
            tags::SW_UPDATE => Self::SwUpdate,
            other => Self::Unknown(other),
        }
    }

    pub const fn tag(self) -> u8 {
        match self {
            Self::General => tags::GENERAL,
            Self::Logging => tags::LOGGING,
            Self::Power => tags::POWER,
            Self::Measure => tags::MEASURE,
            Self::Sensor => tags::SENSOR,
            Self::Algorithm => tags::ALGORITHM,
            Self::Airbag => tags::AIRBAG,
            Self::SdCard => tags::SDCARD,
            Self::Configure => tags::CONFIGURE,
            Self::SwUpdate => tags::SW_UPDATE,
            Self::Unknown(tag) => tag,
        }
    }

    /// Display name of the module, `"unknown"` for unrecognised tags.
    pub const fn name(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Logging => "logging",
            Self::Power => "power",
            Self::Measure => "measure",
            Self::Sensor => "sensor",
            Self::Algorithm => "algorithm",
            Self::Airbag => "airbag",
            Self::SdCard => "sdcard",
            Self::Configure => "configure",
            Self::SwUpdate => "sw-update",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<u8> for Module {
    fn from(tag: u8) -> Self {
        Self::from_tag(tag)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! command_set {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident = $tag:literal => $label:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
            Unknown(u8),
        }

        impl $name {
            pub const fn from_tag(tag: u8) -> Self {
                match tag {
                    $($tag => Self::$variant,)*
                    other => Self::Unknown(other),
                }
            }

            pub const fn tag(self) -> u8 {
                match self {
                    $(Self::$variant => $tag,)*
                    Self::Unknown(tag) => tag,
                }
            }

            /// Wire name of the command, `None` for unrecognised tags.
            pub const fn name(self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($label),)*
                    Self::Unknown(_) => None,
                }
            }
        }

        impl From<u8> for $name {
            fn from(tag: u8) -> Self {
                Self::from_tag(tag)
            }
        }
    };
}

command_set! {
    /// [`Module::General`] commands.
    GeneralCmd {
        GetCtrlMode = 0x00 => "GET_CTRL_MODE",
        SetCtrlMode = 0x01 => "SET_CTRL_MODE",
        GetSoftwareVersion = 0x02 => "GET_SOFTWARE_VERSION",
        GetOperatingModus = 0x03 => "GET_OPERATING_MODUS",
        GetSerialNr = 0x04 => "GET_SERIALNR",
        SetSerialNr = 0x05 => "SET_SERIALNR",
        GetHardwareVersion = 0x06 => "GET_HARDWARE_VERSION",
        SetHardwareVersion = 0x07 => "SET_HARDWARE_VERSION",
        GetCustomerInfo = 0x08 => "GET_CUSTOMERINFO",
        SetCustomerInfo = 0x09 => "SET_CUSTOMERINFO",
        GetServiceDate = 0x0a => "GET_SERVICEDATE",
        SetServiceDate = 0x0b => "SET_SERVICEDATE",
    }
}

command_set! {
    /// [`Module::Logging`] commands.
    LoggingCmd {
        GetOpHours = 0x00 => "GET_OP_HOURS",
        ClearOpHours = 0x01 => "CLEAR_OP_HOURS",
        GetNumOfErrors = 0x02 => "GET_NUM_OF_ERRORS",
        GetErrorEntry = 0x03 => "GET_ERROR_ENTRY",
        ClearErrorHistory = 0x04 => "CLEAR_ERROR_HISTORY",
        GetNumOfPrecrashLogs = 0x05 => "GET_NUM_OF_PRECRASH_LOGS",
        GetPrecrashLogs = 0x06 => "GET_PRECRASH_LOGS",
        ClearPrecrashLog = 0x07 => "CLEAR_PRECRASH_LOG",
        GetNumOfPostcrashLogs = 0x08 => "GET_NUM_OF_POSTCRASH_LOGS",
        GetPostcrashBulk = 0x09 => "GET_POSTCRASH_BULK",
        ClearPostcrashLog = 0x0a => "CLEAR_POSTCRASH_LOG",
        GetPrecrashBulk = 0x0b => "GET_PRECRASH_BULK",
        GetErrorHistory = 0x0c => "GET_ERROR_HISTORY",
        GetPostcrashLogs = 0x0d => "GET_POSTCRASH_LOGS",
        GetBatCount = 0x0e => "GET_BATCOUNT",
        GetPrecrashEncBulk = 0x0f => "GET_PRECRASHENC_BULK",
        GetPostcrashEncBulk = 0x10 => "GET_POSTCRASHENC_BULK",
    }
}

command_set! {
    /// [`Module::Power`] commands.
    PowerCmd {
        GetSupplyState = 0x00 => "GET_SUPPLY_STATE",
        EnDisSupply = 0x01 => "EN_DIS_SUPPLY",
    }
}

command_set! {
    /// [`Module::Measure`] commands.
    MeasureCmd {
        GetLogicVoltage = 0x00 => "GET_LOGIC_VOLTAGE",
        GetPeripheralVoltage = 0x01 => "GET_PERIPHERAL_VOLTAGE",
        GetRightHandVoltage = 0x02 => "GET_RIGHT_HAND_VOLTAGE",
        GetLeftHandVoltage = 0x03 => "GET_LEFT_HAND_VOLTAGE",
        GetRightFootVoltage = 0x04 => "GET_RIGHT_FOOT_VOLTAGE",
        GetLeftFootVoltage = 0x05 => "GET_LEFT_FOOT_VOLTAGE",
        GetSquibVoltage = 0x06 => "GET_SQUIB_VOLTAGE",
        GetBatteryVoltage = 0x07 => "GET_BATTERY_VOLTAGE",
        GetChargingState = 0x08 => "GET_CHARGING_STATE",
        GetZipSwitchState = 0x09 => "GET_ZIP_SWITCH_STATE",
        SetExtDisplay = 0x0a => "SET_EXT_DISPLAY",
    }
}

command_set! {
    /// [`Module::Sensor`] commands.
    SensorCmd {
        EnableSensorReading = 0x00 => "ENABLE_SENSOR_READING",
        GetSensorReadingEnables = 0x01 => "GET_SENSOR_READING_ENABLES",
        GetRightHandAccel = 0x02 => "GET_RIGHT_HAND_ACCEL",
        GetLeftHandAccel = 0x03 => "GET_LEFT_HAND_ACCEL",
        GetRightFootAccel = 0x04 => "GET_RIGHT_FOOT_ACCEL",
        GetLeftFootAccel = 0x05 => "GET_LEFT_FOOT_ACCEL",
        GetBodyAccel = 0x06 => "GET_BODY_ACCEL",
        GetGyroscope = 0x07 => "GET_GYROSCOPE",
        GetSwvRh = 0x08 => "GET_SWV_RH",
        GetSwvLh = 0x09 => "GET_SWV_LH",
        GetSwvRf = 0x0a => "GET_SWV_RF",
        GetSwvLf = 0x0b => "GET_SWV_LF",
    }
}

command_set! {
    /// [`Module::Algorithm`] commands.
    AlgorithmCmd {
        InitAlgorithm = 0x00 => "INIT_ALGORITHM",
        DoSingleSampleCalc = 0x01 => "DO_SINGLE_SAMPLE_CALC",
        GetSingleSampleCalcState = 0x02 => "GET_SINGLE_SAMPLE_CALC_STATE",
        GetSingleSampleCalcResult = 0x03 => "GET_SINGLE_SAMPLE_CALC_RESULT",
        GetAlgorithmThresholds = 0x04 => "GET_ALOGRITHM_THRESHOLDS",
        SetAlgorithmThresholds = 0x05 => "SET_ALOGRITHM_THRESHOLDS",
        SetAlgorithmDefaultThresholds = 0x06 => "SET_ALOGRITHM_DEFAULT_THRESHOLDS",
    }
}

command_set! {
    /// [`Module::Airbag`] commands.
    AirbagCmd {
        GetIgnitionCtrlMode = 0x00 => "GET_IGNITION_CTRL_MODE",
        GetIgnitionCtrlStatus = 0x01 => "GET_IGNITION_CTRL_STATUS",
        InitIgnitionCtrl = 0x02 => "INIT_IGNITION_CTRL",
        DiagIgnitionCtrl = 0x03 => "DIAG_IGNITION_CTRL",
        ArmIgnitionCtrl = 0x04 => "ARM_IGNITION_CTRL",
        FireAirbag = 0x05 => "FIRE_AIRBAG",
        ResetIgnitionCtrl = 0x06 => "RESET_IGNITION_CTRL",
        DiagGetSquibRes = 0x07 => "DIAG_GET_SQUIBRES",
        GetCalibSquibRes = 0x08 => "GET_CALIBSQUIBRES",
        SetCalibSquibRes = 0x09 => "SET_CALIBSQUIBRES",
        GetInflationType = 0x0a => "GET_INFLATIONTYPE",
        SetInflationType = 0x0b => "SET_INFLATIONTYPE",
    }
}

command_set! {
    /// [`Module::SdCard`] commands.
    SdCardCmd {
        InitSdCardStart = 0x00 => "INIT_SDCARD_START",
        GetSdCardRecordInfoStart = 0x01 => "GET_SDCARDRECORDINFO_START",
        GetSdCardSensorDataBulkStart = 0x02 => "GET_SDCARDSENSORDATA_BULK_START",
        ClearSdCardRecordsStart = 0x03 => "CLEAR_SDCARDRECORDS_START",
    }
}

command_set! {
    /// [`Module::SwUpdate`] (bootloader) commands.
    SwUpdateCmd {
        StartBootloader = 0x00 => "START_BOOTLOADER",
        GetBootloaderVersion = 0x01 => "GET_BOOTLOADERVERSION",
        GetBootloaderState = 0x02 => "GET_BOOTLOADERSTATE",
        WriteFwData = 0x03 => "WRITE_FWDATA",
        QuitBootloader = 0x04 => "QUIT_BOOTLOADER",
        CrcCheck = 0x05 => "CRCCHECK",
    }
}

/// A command, resolved relative to its owning module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    General(GeneralCmd),
    Logging(LoggingCmd),
    Power(PowerCmd),
    Measure(MeasureCmd),
    Sensor(SensorCmd),
    Algorithm(AlgorithmCmd),
    Airbag(AirbagCmd),
    SdCard(SdCardCmd),
    SwUpdate(SwUpdateCmd),
    /// Command of a module with no known command set.
    Other { module: u8, tag: u8 },
}

impl Command {
    pub const fn new(module: Module, tag: u8) -> Self {
        match module {
            Module::General => Self::General(GeneralCmd::from_tag(tag)),
            Module::Logging => Self::Logging(LoggingCmd::from_tag(tag)),
            Module::Power => Self::Power(PowerCmd::from_tag(tag)),
            Module::Measure => Self::Measure(MeasureCmd::from_tag(tag)),
            Module::Sensor => Self::Sensor(SensorCmd::from_tag(tag)),
            Module::Algorithm => Self::Algorithm(AlgorithmCmd::from_tag(tag)),
            Module::Airbag => Self::Airbag(AirbagCmd::from_tag(tag)),
            Module::SdCard => Self::SdCard(SdCardCmd::from_tag(tag)),
            Module::SwUpdate => Self::SwUpdate(SwUpdateCmd::from_tag(tag)),
            Module::Configure | Module::Unknown(_) => Self::Other {
                module: module.tag(),
                tag,
            },
        }
    }

    pub const fn module(self) -> Module {
        match self {
            Self::General(_) => Module::General,
            Self::Logging(_) => Module::Logging,
            Self::Power(_) => Module::Power,
            Self::Measure(_) => Module::Measure,
            Self::Sensor(_) => Module::Sensor,
            Self::Algorithm(_) => Module::Algorithm,
            Self::Airbag(_) => Module::Airbag,
            Self::SdCard(_) => Module::SdCard,
            Self::SwUpdate(_) => Module::SwUpdate,
            Self::Other { module, .. } => Module::from_tag(module),
        }
    }

    pub const fn tag(self) -> u8 {
        match self {
            Self::General(cmd) => cmd.tag(),
            Self::Logging(cmd) => cmd.tag(),
            Self::Power(cmd) => cmd.tag(),
            Self::Measure(cmd) => cmd.tag(),
            Self::Sensor(cmd) => cmd.tag(),
            Self::Algorithm(cmd) => cmd.tag(),
            Self::Airbag(cmd) => cmd.tag(),
            Self::SdCard(cmd) => cmd.tag(),
            Self::SwUpdate(cmd) => cmd.tag(),
            Self::Other { tag, .. } => tag,
        }
    }

    pub const fn name(self) -> Option<&'static str> {
        match self {
            Self::General(cmd) => cmd.name(),
            Self::Logging(cmd) => cmd.name(),
            Self::Power(cmd) => cmd.name(),
            Self::Measure(cmd) => cmd.name(),
            Self::Sensor(cmd) => cmd.name(),
            Self::Algorithm(cmd) => cmd.name(),
            Self::Airbag(cmd) => cmd.name(),
            Self::SdCard(cmd) => cmd.name(),
            Self::SwUpdate(cmd) => cmd.name(),
            Self::Other { .. } => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "*unknown {} cmd 0x{:02x}*", self.module(), self.tag()),
        }
    }
}
