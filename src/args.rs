//! Argument vocabularies for the enumerated GS200 settings.
//!
//! Each setting gets a tagged enum: caller tokens are parsed into it at the
//! boundary (case-insensitive, via [`FromStr`]) and rendered back out as the
//! canonical SCPI fragment. Unknown tokens are rejected up front instead of
//! being silently turned into a query.

use core::str::FromStr;

use strum_macros::{EnumIter, EnumString};

/// The query marker. Every vocabulary accepts it and renders it bare.
pub const QUERY: &str = "?";

/// Common shape of an enumerated argument table.
///
/// `ACCEPTED` lists every caller token the table recognises (aliases
/// included, `?` always present) and is reported verbatim in
/// [`InvalidArgument`](crate::error::ArgumentError::InvalidArgument) errors.
pub(crate) trait Vocab: FromStr {
    const LABEL: &'static str;
    const ACCEPTED: &'static [&'static str];

    /// Canonical SCPI fragment, leading space included for set values,
    /// bare `?` for the query key.
    fn fragment(&self) -> &'static str;
}

/// Output relay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum OutputState {
    #[strum(serialize = "on", serialize = "true")]
    On,
    #[strum(serialize = "off", serialize = "false")]
    Off,
    #[strum(serialize = "?")]
    Query,
}

impl Vocab for OutputState {
    const LABEL: &'static str = "output";
    const ACCEPTED: &'static [&'static str] = &["on", "true", "off", "false", "?"];

    fn fragment(&self) -> &'static str {
        match self {
            Self::On => " on",
            Self::Off => " off",
            Self::Query => QUERY,
        }
    }
}

/// Source function selector (what quantity the instrument sources).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum SourceFunction {
    #[strum(serialize = "curr", serialize = "current")]
    Current,
    #[strum(serialize = "volt", serialize = "voltage")]
    Voltage,
    #[strum(serialize = "?")]
    Query,
}

impl Vocab for SourceFunction {
    const LABEL: &'static str = "function";
    const ACCEPTED: &'static [&'static str] = &["curr", "current", "volt", "voltage", "?"];

    fn fragment(&self) -> &'static str {
        match self {
            Self::Current => " current",
            Self::Voltage => " voltage",
            Self::Query => QUERY,
        }
    }
}

/// Source ranges in voltage mode, in volts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum VoltageRange {
    #[strum(serialize = "0.01")]
    Millivolt10,
    #[strum(serialize = "0.1")]
    Millivolt100,
    #[strum(serialize = "1")]
    Volt1,
    #[strum(serialize = "10")]
    Volt10,
    #[strum(serialize = "30")]
    Volt30,
    #[strum(serialize = "?")]
    Query,
}

impl Vocab for VoltageRange {
    const LABEL: &'static str = "source range (voltage mode)";
    const ACCEPTED: &'static [&'static str] = &["0.01", "0.1", "1", "10", "30", "?"];

    fn fragment(&self) -> &'static str {
        match self {
            Self::Millivolt10 => " 0.01",
            Self::Millivolt100 => " 0.1",
            Self::Volt1 => " 1",
            Self::Volt10 => " 10",
            Self::Volt30 => " 30",
            Self::Query => QUERY,
        }
    }
}

/// Source ranges in current mode, in milliamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum CurrentRange {
    #[strum(serialize = "1")]
    Milliamp1,
    #[strum(serialize = "10")]
    Milliamp10,
    #[strum(serialize = "100")]
    Milliamp100,
    #[strum(serialize = "200")]
    Milliamp200,
    #[strum(serialize = "?")]
    Query,
}

impl Vocab for CurrentRange {
    const LABEL: &'static str = "source range (current mode)";
    const ACCEPTED: &'static [&'static str] = &["1", "10", "100", "200", "?"];

    fn fragment(&self) -> &'static str {
        match self {
            Self::Milliamp1 => " 1",
            Self::Milliamp10 => " 10",
            Self::Milliamp100 => " 100",
            Self::Milliamp200 => " 200",
            Self::Query => QUERY,
        }
    }
}

/// Signal selection for the rear-panel BNC output connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum BncOut {
    #[strum(serialize = "trig", serialize = "trigger")]
    Trigger,
    #[strum(serialize = "output", serialize = "outp")]
    Output,
    #[strum(serialize = "read", serialize = "ready")]
    Ready,
    #[strum(serialize = "?")]
    Query,
}

impl Vocab for BncOut {
    const LABEL: &'static str = "bnc out";
    const ACCEPTED: &'static [&'static str] =
        &["trig", "trigger", "output", "outp", "read", "ready", "?"];

    fn fragment(&self) -> &'static str {
        match self {
            Self::Trigger => " trigger",
            Self::Output => " output",
            Self::Ready => " ready",
            Self::Query => QUERY,
        }
    }
}

/// Signal selection for the rear-panel BNC input connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum BncIn {
    #[strum(serialize = "trig", serialize = "trigger")]
    Trigger,
    #[strum(serialize = "output", serialize = "outp")]
    Output,
    #[strum(serialize = "?")]
    Query,
}

impl Vocab for BncIn {
    const LABEL: &'static str = "bnc in";
    const ACCEPTED: &'static [&'static str] = &["trig", "trigger", "output", "outp", "?"];

    fn fragment(&self) -> &'static str {
        match self {
            Self::Trigger => " trigger",
            Self::Output => " output",
            Self::Query => QUERY,
        }
    }
}

/// The quantity the instrument is currently sourcing, as reported by the
/// device itself. Legal source ranges and level bounds depend on it.
///
/// The driver never caches this; every dependent operation re-queries the
/// instrument so the mode is always authoritative. Callers that want to
/// save the round trip can hold onto a value and use the `*_in_mode`
/// session methods, invalidating it on any
/// [`function`](crate::gs200::Gs200::function) write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Current,
    Voltage,
}

impl SourceMode {
    /// Parse a `source:function?` reply. The GS200 answers with the short
    /// keyword form (`CURR` / `VOLT`).
    pub fn from_reply(reply: &str) -> Option<Self> {
        let reply = reply.trim().to_ascii_uppercase();
        if reply.starts_with("CURR") {
            Some(Self::Current)
        } else if reply.starts_with("VOLT") {
            Some(Self::Voltage)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn check_closure<V: Vocab + IntoEnumIterator + core::fmt::Debug>() {
        // Every accepted token must parse, case-insensitively.
        for token in V::ACCEPTED {
            assert!(
                V::from_str(token).is_ok(),
                "{}: token {token:?} does not parse",
                V::LABEL
            );
            assert!(V::from_str(&token.to_ascii_uppercase()).is_ok());
        }
        // Every variant must render a non-empty fragment.
        for variant in V::iter() {
            assert!(
                !variant.fragment().is_empty(),
                "{}: {variant:?} has an empty fragment",
                V::LABEL
            );
        }
        assert!(V::ACCEPTED.contains(&QUERY));
        assert!(V::from_str("no-such-token").is_err());
    }

    #[test]
    fn vocabularies_are_closed() {
        check_closure::<OutputState>();
        check_closure::<SourceFunction>();
        check_closure::<VoltageRange>();
        check_closure::<CurrentRange>();
        check_closure::<BncOut>();
        check_closure::<BncIn>();
    }

    #[test]
    fn output_state_aliases() {
        assert_eq!(OutputState::from_str("true").unwrap(), OutputState::On);
        assert_eq!(OutputState::from_str("FALSE").unwrap(), OutputState::Off);
        assert_eq!(OutputState::from_str("?").unwrap(), OutputState::Query);
        assert_eq!(OutputState::On.fragment(), " on");
        assert_eq!(OutputState::Off.fragment(), " off");
    }

    #[test]
    fn query_fragment_is_bare_marker() {
        assert_eq!(OutputState::Query.fragment(), "?");
        assert_eq!(SourceFunction::Query.fragment(), "?");
        assert_eq!(VoltageRange::Query.fragment(), "?");
        assert_eq!(CurrentRange::Query.fragment(), "?");
        assert_eq!(BncOut::Query.fragment(), "?");
        assert_eq!(BncIn::Query.fragment(), "?");
    }

    #[test]
    fn source_mode_from_reply() {
        assert_eq!(SourceMode::from_reply("CURR\n"), Some(SourceMode::Current));
        assert_eq!(SourceMode::from_reply("VOLT"), Some(SourceMode::Voltage));
        assert_eq!(SourceMode::from_reply("VOLTAGE"), Some(SourceMode::Voltage));
        assert_eq!(SourceMode::from_reply("curr"), Some(SourceMode::Current));
        assert_eq!(SourceMode::from_reply("banana"), None);
        assert_eq!(SourceMode::from_reply(""), None);
    }
}
