//! Declarative macros for generating command tests.
//!
//! CLI parsing, execution and output tests follow the same few shapes; these
//! macros let each command's test modules declare the cases and generate the
//! test functions.

// =============================================================================
// CLI Test Macros
// =============================================================================

/// Generate a `test_defaults` case: parse `tabledoc <command> <required args>`
/// and check each listed field of the parsed command struct.
///
/// # Example
///
/// ```ignore
/// cli_defaults_test! {
///     command: "convert",
///     variant: Convert,
///     required_args: [],
///     defaults: { root: None },
/// }
/// ```
#[macro_export]
macro_rules! cli_defaults_test {
    (
        command: $cmd:literal,
        variant: $variant:ident,
        required_args: [$($req_arg:literal),*],
        defaults: {
            $($def_field:ident : $def_expected:expr),* $(,)?
        } $(,)?
    ) => {
        #[rstest]
        fn test_defaults() {
            let args = Args::try_parse_from(["tabledoc", $cmd, $($req_arg),*])
                .expect(concat!("`tabledoc ", $cmd, "` should parse"));
            let crate::commands::Command::$variant(cmd) = args.command else {
                panic!(concat!("`tabledoc ", $cmd, "` did not parse as ", stringify!($variant)));
            };
            $(
                assert_eq!(cmd.$def_field, $def_expected,
                    concat!("default of --", stringify!($def_field), " changed"));
            )*
        }
    };
}

/// Generate one parsing case: `tabledoc <command> <args>` must yield the
/// `variant` command with `field` equal to `expected`.
///
/// # Example
///
/// ```ignore
/// cli_option_test! {
///     command: "convert",
///     variant: Convert,
///     test_name: test_with_root,
///     args: ["--root", "items"],
///     field: root,
///     expected: Some("items".to_string()),
/// }
/// ```
#[macro_export]
macro_rules! cli_option_test {
    (
        command: $cmd:literal,
        variant: $variant:ident,
        test_name: $test_name:ident,
        args: [$($arg:literal),+],
        field: $field:ident,
        expected: $expected:expr $(,)?
    ) => {
        #[rstest]
        fn $test_name() {
            let args = Args::try_parse_from(["tabledoc", $cmd, $($arg),+])
                .expect(concat!("`tabledoc ", $cmd, "` should accept ", stringify!($($arg) +)));
            let crate::commands::Command::$variant(cmd) = args.command else {
                panic!(concat!("`tabledoc ", $cmd, "` did not parse as ", stringify!($variant)));
            };
            assert_eq!(cmd.$field, $expected, concat!("parsed --", stringify!($field), " mismatch"));
        }
    };
}

/// Generate a test that verifies parsing fails with specific invalid args.
///
/// # Example
///
/// ```ignore
/// cli_error_test! {
///     command: "convert",
///     test_name: test_root_requires_value,
///     args: ["--root"],
/// }
/// ```
#[macro_export]
macro_rules! cli_error_test {
    (
        command: $cmd:literal,
        test_name: $test_name:ident,
        args: [$($arg:literal),+] $(,)?
    ) => {
        #[rstest]
        fn $test_name() {
            let result = Args::try_parse_from([
                "tabledoc",
                $cmd,
                $($arg),+
            ]);
            assert!(result.is_err());
        }
    };
}

// =============================================================================
// Execute Test Macros
// =============================================================================

/// Generate a fixture that parses an inline profile.
#[macro_export]
macro_rules! execute_test_fixture {
    (
        fixture_name: $name:ident,
        json: $json:expr $(,)?
    ) => {
        #[fixture]
        fn $name() -> crate::config::ProfileConfig {
            crate::config::ProfileConfig::from_json($json).expect("Profile should parse")
        }
    };
}

/// Generate a test that executes a command against a fixture profile.
#[macro_export]
macro_rules! execute_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        cmd: $cmd:expr,
        assertions: |$result:ident| $body:block $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: crate::config::ProfileConfig) {
            use crate::commands::Execute;
            let $result = $cmd.execute(&$fixture).expect("Command should succeed");
            $body
        }
    };
}

/// Generate a test that verifies command execution fails with a message.
#[macro_export]
macro_rules! execute_error_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        cmd: $cmd:expr,
        message: $needle:literal $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: crate::config::ProfileConfig) {
            use crate::commands::Execute;
            let err = $cmd.execute(&$fixture).err().expect("Command should fail");
            assert!(
                err.to_string().contains($needle),
                "unexpected error: {}",
                err
            );
        }
    };
}

// =============================================================================
// Output Test Macros
// =============================================================================

/// Generate a test that verifies formatted output matches expected string.
///
/// Works with rstest fixtures by accepting a fixture parameter.
///
/// # Example
/// ```ignore
/// output_table_test! {
///     test_name: test_to_table_empty,
///     fixture: empty_result,
///     fixture_type: ConvertResult,
///     expected: EMPTY_TABLE,
/// }
/// ```
#[macro_export]
macro_rules! output_table_test {
    // With format parameter (Json, JsonCompact, Toon)
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        expected: $expected:expr,
        format: $format:ident $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use crate::output::{Outputable, OutputFormat};
            assert_eq!($fixture.format(OutputFormat::$format), $expected);
        }
    };
    // Default table format
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        expected: $expected:expr $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use crate::output::Outputable;
            assert_eq!($fixture.to_table(), $expected);
        }
    };
}

/// Generate a test that verifies JSON output parses and matches expected values.
///
/// Each assertion pairs a JSON pointer with the expected `serde_json::Value`.
#[macro_export]
macro_rules! output_json_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        assertions: { $($pointer:literal : $expected:expr),* $(,)? } $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use crate::output::{Outputable, OutputFormat};
            let output = $fixture.format(OutputFormat::Json);
            let parsed: serde_json::Value = serde_json::from_str(&output)
                .expect("Should produce valid JSON");
            $(
                assert_eq!(
                    parsed.pointer($pointer),
                    Some(&$expected),
                    concat!("JSON value mismatch at: ", $pointer)
                );
            )*
        }
    };
}

/// Generate a test that verifies Toon output contains expected strings.
#[macro_export]
macro_rules! output_toon_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        contains: [$($needle:literal),* $(,)?] $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use crate::output::{Outputable, OutputFormat};
            let output = $fixture.format(OutputFormat::Toon);
            $(
                assert!(output.contains($needle), concat!("Toon output should contain: ", $needle));
            )*
        }
    };
}
