//! Property-based tests for rust_log_facade using proptest

use proptest::prelude::*;
use rust_log_facade::prelude::*;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Error),
        Just(Level::Fatal),
    ]
}

fn any_formatter() -> impl Strategy<Value = Formatter> {
    prop_oneof![
        Just(Formatter::Text),
        Just(Formatter::Json),
        Just(Formatter::Logfmt),
    ]
}

/// One option unit applied to a builder
#[derive(Debug, Clone)]
enum OptionUnit {
    Level(Level),
    Prefix(String),
    ReportCaller(bool),
    ReportTimestamp(bool),
    Formatter(Formatter),
    CallerOffset(usize),
}

fn any_option() -> impl Strategy<Value = OptionUnit> {
    prop_oneof![
        any_level().prop_map(OptionUnit::Level),
        "[a-z]{0,8}".prop_map(OptionUnit::Prefix),
        any::<bool>().prop_map(OptionUnit::ReportCaller),
        any::<bool>().prop_map(OptionUnit::ReportTimestamp),
        any_formatter().prop_map(OptionUnit::Formatter),
        (0usize..8).prop_map(OptionUnit::CallerOffset),
    ]
}

fn apply(builder: LoggerBuilder, unit: &OptionUnit) -> LoggerBuilder {
    match unit.clone() {
        OptionUnit::Level(level) => builder.level(level),
        OptionUnit::Prefix(prefix) => builder.prefix(prefix),
        OptionUnit::ReportCaller(report) => builder.report_caller(report),
        OptionUnit::ReportTimestamp(report) => builder.report_timestamp(report),
        OptionUnit::Formatter(formatter) => builder.formatter(formatter),
        OptionUnit::CallerOffset(offset) => builder.caller_offset(offset),
    }
}

proptest! {
    /// Level string conversions roundtrip
    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        let parsed: Level = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);

        let lower: Level = level.as_lowercase().parse().unwrap();
        prop_assert_eq!(level, lower);
    }

    /// Level ordering agrees with the numeric value
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a < b, (a as u8) < (b as u8));
        prop_assert_eq!(a == b, (a as u8) == (b as u8));
    }

    /// Each field ends with the last value applied to it; untouched fields keep defaults
    #[test]
    fn test_option_last_write_wins(units in prop::collection::vec(any_option(), 0..24)) {
        let builder = units.iter().fold(LoggerBuilder::new(), apply);
        let options = builder.options();

        let last_level = units.iter().rev().find_map(|u| match u {
            OptionUnit::Level(l) => Some(*l),
            _ => None,
        });
        let last_prefix = units.iter().rev().find_map(|u| match u {
            OptionUnit::Prefix(p) => Some(p.clone()),
            _ => None,
        });
        let last_caller = units.iter().rev().find_map(|u| match u {
            OptionUnit::ReportCaller(b) => Some(*b),
            _ => None,
        });
        let last_timestamp = units.iter().rev().find_map(|u| match u {
            OptionUnit::ReportTimestamp(b) => Some(*b),
            _ => None,
        });
        let last_formatter = units.iter().rev().find_map(|u| match u {
            OptionUnit::Formatter(f) => Some(*f),
            _ => None,
        });
        let last_offset = units.iter().rev().find_map(|u| match u {
            OptionUnit::CallerOffset(o) => Some(*o),
            _ => None,
        });

        prop_assert_eq!(options.level, last_level.unwrap_or(Level::Info));
        prop_assert_eq!(options.prefix.clone(), last_prefix.unwrap_or_default());
        prop_assert_eq!(options.report_caller, last_caller.unwrap_or(false));
        prop_assert_eq!(options.report_timestamp, last_timestamp.unwrap_or(false));
        prop_assert_eq!(options.formatter, last_formatter.unwrap_or(Formatter::Text));
        prop_assert_eq!(options.caller_offset, last_offset.unwrap_or(0));
        prop_assert_eq!(options.writer.name(), "stderr");
        prop_assert!(!options.is_default);
    }

    /// Records below the configured level never reach the sink
    #[test]
    fn test_level_filtering(threshold in any_level(), level in any_level()) {
        prop_assume!(level != Level::Fatal);
        let buf = SharedBuffer::new();
        let logger = Logger::builder().output(buf.clone()).level(threshold).build();
        logger.log(level, "probe", Vec::<Attr>::new());
        prop_assert_eq!(buf.is_empty(), level < threshold);
    }

    /// Text output stays on one line whatever the message contains
    #[test]
    fn test_message_single_line(message in "[a-z \n\r\t]{0,40}") {
        let buf = SharedBuffer::new();
        let logger = Logger::builder().output(buf.clone()).build();
        logger.info(message);
        prop_assert_eq!(buf.contents().matches('\n').count(), 1);
    }

    /// Repeated field keys keep the last value at the first position
    #[test]
    fn test_field_merge(values in prop::collection::vec(0i64..100, 1..6)) {
        let builder = values
            .iter()
            .fold(LoggerBuilder::new().field("first", true), |b, v| b.field("n", *v));
        let fields = &builder.options().fields;
        prop_assert_eq!(fields.len(), 2);
        prop_assert_eq!(fields[1].key.as_str(), "n");
        prop_assert_eq!(fields[1].value.to_string(), values[values.len() - 1].to_string());
    }
}
