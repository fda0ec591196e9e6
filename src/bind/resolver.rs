//! Whole-object resolution.
//!
//! Every registered field is resolved even after failures, so a single
//! report covers the whole section.

use tracing::{debug, warn};

use super::{resolve_field, Bind, BindError, ErrorReport, Schema};
use crate::config::{FlatSource, SectionProvider};

/// Binds `T` from the section `section` of `provider`.
pub fn resolve<T, P>(provider: &P, prefix: Option<&str>, section: &str) -> Result<T, BindError>
where
    T: Bind,
    P: SectionProvider + ?Sized,
{
    let source = provider
        .section(section)
        .ok_or_else(|| BindError::SectionNotFound(section.to_string()))?;

    debug!(section, ?prefix, entries = source.len(), "resolving section");
    resolve_source(prefix, &source)
}

/// Binds `T` from an already materialized section.
pub fn resolve_source<T: Bind>(prefix: Option<&str>, source: &FlatSource) -> Result<T, BindError> {
    bind_schema(T::schema(), prefix, source)
}

/// Binds a fresh `T::default()` through an explicit schema.
pub fn bind_schema<T: Default>(
    schema: &Schema<T>,
    prefix: Option<&str>,
    source: &FlatSource,
) -> Result<T, BindError> {
    let mut target = T::default();
    let mut report = ErrorReport::default();

    for field in schema.fields() {
        let key = field.key(prefix);
        if let Err(err) = resolve_field(&mut target, &key, field, source) {
            report.record(&key, &err, field.descriptor().error_suffix());
        }
    }

    if report.is_empty() {
        Ok(target)
    } else {
        warn!(failures = report.len(), "configuration rejected");
        Err(report.into())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::OnceLock;

    use rust_decimal::Decimal;

    use super::*;
    use crate::bind::{FieldDescriptor, HookError, RawList};

    crate::config_enum! {
        pub enum Direction {
            Outbound,
            Inbound,
        }
    }

    #[derive(Debug, Default)]
    struct PluginSettings {
        string: String,
        int16: i16,
        int32: i32,
        int64: i64,
        decimal: Decimal,
        double: f64,
        single: f32,
        boolean: bool,
        string_list: Vec<String>,
        integer_array: Box<[i32]>,
        raw_list: RawList,
        enumeration: Direction,
        endpoint: String,
        ip: String,
        port: String,
        uint16: u16,
        uint32: u32,
        uint64: u64,
        semicolon_list: Vec<String>,
        // Not registered in the schema.
        unbound: i32,
    }

    impl PluginSettings {
        fn split_endpoint(&mut self) -> Result<(), HookError> {
            match self.endpoint.split_once(':') {
                Some((ip, port)) if !port.contains(':') => {
                    self.ip = ip.to_string();
                    self.port = port.to_string();
                    Ok(())
                }
                _ => Err(format!("Tcp = {} is not correct (ip:port)", self.endpoint).into()),
            }
        }
    }

    impl Bind for PluginSettings {
        fn schema() -> &'static Schema<Self> {
            static SCHEMA: OnceLock<Schema<PluginSettings>> = OnceLock::new();
            SCHEMA.get_or_init(|| {
                Schema::new()
                    .field("String", FieldDescriptor::new(), |s: &mut Self, v: String| {
                        s.string = v
                    })
                    .field("Int16", FieldDescriptor::new(), |s: &mut Self, v: i16| s.int16 = v)
                    .field("Int32", FieldDescriptor::new(), |s: &mut Self, v: i32| s.int32 = v)
                    .field("Int64", FieldDescriptor::new(), |s: &mut Self, v: i64| s.int64 = v)
                    .field("Decimal", FieldDescriptor::new(), |s: &mut Self, v: Decimal| {
                        s.decimal = v
                    })
                    .field("Double", FieldDescriptor::new(), |s: &mut Self, v: f64| s.double = v)
                    .field("Single", FieldDescriptor::new(), |s: &mut Self, v: f32| s.single = v)
                    .field("Boolean", FieldDescriptor::new(), |s: &mut Self, v: bool| {
                        s.boolean = v
                    })
                    .field(
                        "StringList",
                        FieldDescriptor::new().with_delimiter(','),
                        |s: &mut Self, v: Vec<String>| s.string_list = v,
                    )
                    .field(
                        "IntegerArray",
                        FieldDescriptor::new().with_delimiter(','),
                        |s: &mut Self, v: Box<[i32]>| s.integer_array = v,
                    )
                    .field(
                        "ArrayList",
                        FieldDescriptor::new().with_delimiter(','),
                        |s: &mut Self, v: RawList| s.raw_list = v,
                    )
                    .field(
                        "Enumeration",
                        FieldDescriptor::new().with_error_suffix("This is a sample error message"),
                        |s: &mut Self, v: Direction| s.enumeration = v,
                    )
                    .field(
                        "StringCustomLoadMethod",
                        FieldDescriptor::new().with_post_load(Self::split_endpoint),
                        |s: &mut Self, v: String| s.endpoint = v,
                    )
                    .field("UInt16", FieldDescriptor::new(), |s: &mut Self, v: u16| {
                        s.uint16 = v
                    })
                    .field("UInt32", FieldDescriptor::new(), |s: &mut Self, v: u32| {
                        s.uint32 = v
                    })
                    .field("UInt64", FieldDescriptor::new(), |s: &mut Self, v: u64| {
                        s.uint64 = v
                    })
                    .field(
                        "EnumerableStringList",
                        FieldDescriptor::optional().with_delimiter(';'),
                        |s: &mut Self, v: Vec<String>| s.semicolon_list = v,
                    )
            })
        }
    }

    fn plug_settings() -> BTreeMap<String, FlatSource> {
        let valid = [
            ("TestPlugin_String", "some string"),
            ("TestPlugin_Int16", "32767"),
            ("TestPlugin_Int32", "1"),
            ("TestPlugin_Int64", "987654321"),
            ("TestPlugin_Decimal", "0.123"),
            ("TestPlugin_Double", "2.123"),
            ("TestPlugin_Single", "1.23"),
            ("TestPlugin_Boolean", "yes"),
            ("TestPlugin_StringList", "a,b,c"),
            ("TestPlugin_IntegerArray", "1,2,3,4"),
            ("TestPlugin_ArrayList", "a,b,c"),
            ("TestPlugin_Enumeration", "outbound"),
            ("TestPlugin_StringCustomLoadMethod", "10.88.22.95:40007"),
            ("TestPlugin_UInt16", "32767"),
            ("TestPlugin_UInt32", "1"),
            ("TestPlugin_UInt64", "987654321"),
            ("TestPlugin_unbound", "5"),
        ];
        let invalid = [
            ("TestPluginFail_String", " "),
            ("TestPluginFail_Int16", "32768"),
            ("TestPluginFail_Int32", "x"),
            ("TestPluginFail_Int64", "1.5"),
            ("TestPluginFail_Decimal", "x"),
            ("TestPluginFail_Double", "x"),
            ("TestPluginFail_Single", "x"),
            ("TestPluginFail_Boolean", "maybe"),
            ("TestPluginFail_StringList", "a,b"),
            ("TestPluginFail_IntegerArray", "1,a"),
            ("TestPluginFail_ArrayList", "a"),
            ("TestPluginFail_Enumeration", "otbound"),
            ("TestPluginFail_StringCustomLoadMethod", "10.88.22.95"),
            ("TestPluginFail_UInt16", "-1"),
            ("TestPluginFail_UInt32", "-1"),
            ("TestPluginFail_UInt64", "x"),
        ];

        let section: FlatSource = valid.into_iter().chain(invalid).collect();
        BTreeMap::from([("plugSettings".to_string(), section)])
    }

    #[test]
    fn test_resolves_every_field() {
        let settings: PluginSettings =
            resolve(&plug_settings(), Some("TestPlugin"), "plugSettings").unwrap();

        assert_eq!(settings.string, "some string");
        assert_eq!(settings.int16, 32767);
        assert_eq!(settings.int32, 1);
        assert_eq!(settings.int64, 987654321);
        assert_eq!(settings.decimal, Decimal::new(123, 3));
        assert_eq!(settings.double, 2.123);
        assert_eq!(settings.single, 1.23);
        assert!(settings.boolean);
        assert_eq!(settings.string_list, ["a", "b", "c"]);
        assert_eq!(&*settings.integer_array, &[1, 2, 3, 4]);
        assert_eq!(&*settings.raw_list, ["a", "b", "c"]);
        assert_eq!(settings.enumeration, Direction::Outbound);
        assert_eq!(settings.ip, "10.88.22.95");
        assert_eq!(settings.port, "40007");
        assert_eq!(settings.uint16, 32767);
        assert_eq!(settings.uint32, 1);
        assert_eq!(settings.uint64, 987654321);
        assert!(settings.semicolon_list.is_empty());
        assert_eq!(settings.unbound, 0);
    }

    #[test]
    fn test_reports_every_failing_field_in_order() {
        let sections = plug_settings();
        let err = resolve::<PluginSettings, _>(&sections, Some("TestPluginFail"), "plugSettings")
            .unwrap_err();

        let report = match err {
            BindError::Invalid(report) => report,
            other => panic!("expected an aggregate report, got {other:?}"),
        };

        let expected = [
            "Config Error: TestPluginFail_String [Value cannot be blank/empty] ",
            "Config Error: TestPluginFail_Int16 [Value must be numeric/number (Int16 type)] ",
            "Config Error: TestPluginFail_Int32 [Value must be numeric/number (Int32 type)] ",
            "Config Error: TestPluginFail_Int64 [Value must be numeric/number (Int64 type)] ",
            "Config Error: TestPluginFail_Decimal [Value must be numeric/number (Decimal type)] ",
            "Config Error: TestPluginFail_Double [Value must be numeric/number (Double type)] ",
            "Config Error: TestPluginFail_Single [Value must be numeric/number (Single type)] ",
            "Config Error: TestPluginFail_Boolean [Value must be a Boolean type. Case-insensitive \
             allowed values: ([True = true, yes, 1], [False = false, no, 0])] ",
            "Config Error: TestPluginFail_IntegerArray [Value must be numeric/number (Int32 type)] ",
            "Config Error: TestPluginFail_Enumeration [otbound is not defined in Direction \
             enumeration. Valid values: Outbound,Inbound] This is a sample error message",
            "Config Error: TestPluginFail_StringCustomLoadMethod [Tcp = 10.88.22.95 is not \
             correct (ip:port)] ",
            "Config Error: TestPluginFail_UInt16 [Value must be non-negative numeric/number \
             (UInt16 type)] ",
            "Config Error: TestPluginFail_UInt32 [Value must be non-negative numeric/number \
             (UInt32 type)] ",
            "Config Error: TestPluginFail_UInt64 [Value must be non-negative numeric/number \
             (UInt64 type)] ",
        ];
        assert_eq!(report.lines(), expected);
        assert_eq!(report.to_string(), expected.join("\n"));
    }

    #[test]
    fn test_missing_section_fails_immediately() {
        let sections = plug_settings();
        let err = resolve::<PluginSettings, _>(&sections, Some("TestPlugin"), "someSettings")
            .unwrap_err();

        assert!(matches!(err, BindError::SectionNotFound(_)));
        assert_eq!(err.to_string(), "Unable to find someSettings in the configuration");
    }

    #[test]
    fn test_missing_required_fields_get_one_line_each() {
        let source: FlatSource = [("Int32", "1")].into_iter().collect();
        let err = resolve_source::<PluginSettings>(None, &source).unwrap_err();

        let report = match err {
            BindError::Invalid(report) => report,
            other => panic!("expected an aggregate report, got {other:?}"),
        };
        // 16 required fields, one of them present.
        assert_eq!(report.len(), 15);
        assert_eq!(
            report.lines()[0],
            "Config Error: String [String is not found in the configuration \
             (Expected type: String)] "
        );
        assert!(report
            .lines()
            .iter()
            .all(|line| !line.starts_with("Config Error: Int32 [")));
        assert!(report.lines().iter().any(|line| line
            == "Config Error: UInt32 [UInt32 is not found in the configuration \
                (Expected type: UInt32)] "));
        assert!(report
            .lines()
            .iter()
            .any(|line| line.starts_with("Config Error: IntegerArray [IntegerArray is not found")
                && line.contains("(Expected type: Int32[])")));
    }

    #[test]
    fn test_bind_schema_without_bind_impl() {
        #[derive(Debug, Default)]
        struct Limits {
            max: u32,
        }

        let schema = Schema::new().field(
            "Max",
            FieldDescriptor::optional().with_default(10),
            |l: &mut Limits, v: u32| l.max = v,
        );

        let limits = bind_schema(&schema, Some("Api"), &FlatSource::new()).unwrap();
        assert_eq!(limits.max, 10);

        let source: FlatSource = [("Api_Max", "25")].into_iter().collect();
        let limits = bind_schema(&schema, Some("Api"), &source).unwrap();
        assert_eq!(limits.max, 25);
    }
}
