//! Report labels assigned at extraction time.
//!
//! Downstream reports key on these exact strings, so they are part of the
//! output format rather than display text.

pub const TEST_DATE: &str = "Test Date";
pub const AMBIENT_TEMP: &str = "Ambient Temp. (°C)";

pub const STRING_NAME: &str = "String Name";
pub const BATTERY_TYPE: &str = "Battery Type";

pub const NUM_JARS: &str = "Number of Jars";
pub const NUM_CELLS: &str = "Number of Cells";
pub const CELLS_PER_JAR: &str = "Number of Cells/Jar";
pub const NUM_STRAPS: &str = "Number of Straps";

pub const WARNING_DEVIATION_OHM: &str = "Warning Deviation (mΩ)";
pub const ALARM_DEVIATION_OHM: &str = "Alarm Deviation (mΩ)";
pub const WARNING_DEVIATION_PCT: &str = "Warning Deviation (%)";
pub const ALARM_DEVIATION_PCT: &str = "Alarm Deviation (%)";

pub const AVERAGE_IMPEDANCE: &str = "Average Impedance (mΩ)";
pub const TOTAL_STRING_VOLTAGE: &str = "Total String Voltage (V)";
pub const CHARGER_VOLTAGE_DEVIATION: &str = "Deviation from Charger Voltage (%)";
pub const MIN_VOLTAGE: &str = "Min Voltage (V)";
pub const MAX_VOLTAGE: &str = "Max Voltage (V)";
pub const AVERAGE_TEMPERATURE: &str = "Average Temperature (°C)";

/// Baseline impedance when no `InstrBaselineZ` tag is present
pub const BASELINE_DEFAULT: &str = "N/A";

// Source tag names as instruments spell them; `TagMatch::CaseInsensitive`
// also accepts any other casing
pub const TEMPERATURE_TAG: &str = "Temperature";
pub const FORM_NAME_TAG: &str = "FormName";
pub const BASELINE_TAG: &str = "InstrBaselineZ";

/// `data` tags feeding the table summary, in report order
pub const DATA_SUMMARY: &[(&str, &str)] = &[
    ("AvgImpedence", AVERAGE_IMPEDANCE),
    ("VoltageSum", TOTAL_STRING_VOLTAGE),
    ("DeviationVoltage", CHARGER_VOLTAGE_DEVIATION),
    ("MinVolts", MIN_VOLTAGE),
    ("MaxVolts", MAX_VOLTAGE),
    ("AvgTemp", AVERAGE_TEMPERATURE),
];

/// `nameplate` tags describing the string
pub const NAMEPLATE_STRING: &[(&str, &str)] = &[
    ("StringName", STRING_NAME),
    ("PDBEquipmentType", BATTERY_TYPE),
];

/// `nameplate` warning/alarm thresholds, impedance-based first
pub const NAMEPLATE_DEVIATION: &[(&str, &str)] = &[
    ("WarningDeviationOhm", WARNING_DEVIATION_OHM),
    ("AllowedDeviationOhm", ALARM_DEVIATION_OHM),
    ("WarningDeviation", WARNING_DEVIATION_PCT),
    ("AllowedDeviation", ALARM_DEVIATION_PCT),
];

/// `copyhistory` jar/cell/strap counts
pub const COPYHISTORY_JAR_CELLS: &[(&str, &str)] = &[
    ("NumJars", NUM_JARS),
    ("NumCells", NUM_CELLS),
    ("CellsPerJar", CELLS_PER_JAR),
    ("NumStraps", NUM_STRAPS),
];
