//! SCPI keyword paths of the GS200 command set.
//!
//! Spellings and casing follow the instrument's documented dialect; the
//! short/long keyword mix is what the device accepts on the wire. Paths of
//! set-or-query commands carry no suffix, the argument fragment or `?` is
//! appended per call.

pub const IDENTIFY: &str = "*IDN?";
pub const OPERATION_COMPLETE: &str = "*OPC?";

pub const OUTPUT: &str = ":OUTPut";

pub const SOURCE_FUNCTION: &str = "source:function";
pub const SOURCE_RANGE: &str = "source:range";
pub const SOURCE_LEVEL: &str = "source:level:auto";
pub const PROTECTION_VOLTAGE: &str = ":SOURce:PROTection:VOLTage";
pub const PROTECTION_CURRENT: &str = ":SOURce:PROTection:CURRent";

pub const INITIATE: &str = ":INITiate";
pub const FETCH: &str = ":FETCh?";
pub const READ: &str = ":READ?";
pub const MEASURE: &str = ":MEASure?";

pub const BNC_OUT: &str = ":ROUTe:BNCO";
pub const BNC_IN: &str = ":ROUTe:BNCI";

pub const SYSTEM_ERROR: &str = ":SYSTem:ERRor?";
pub const SYSTEM_LOCAL: &str = ":SYSTem:LOCal";
pub const SYSTEM_REMOTE: &str = ":SYSTem:REMote";
pub const LINE_FREQUENCY: &str = ":SYSTem:LFRequency?";

pub const STATUS_CONDITION: &str = ":STATus:CONDition?";
pub const STATUS_EVENT: &str = ":STATus:EVENt?";
pub const STATUS_ENABLE: &str = ":STATus:ENABle";
pub const STATUS_ERROR: &str = ":STATus:ERRor?";
