// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Call-site macros.
//!
//! Each macro checks the level gate first, so arguments are only formatted for messages that
//! will be delivered, and records the file, line and enclosing function of the call.

/// Expand to the name of the enclosing function.
///
/// Closures report the function they are defined in.
///
/// # Examples
///
/// ```
/// fn handler() -> &'static str {
///     logfan::function_name!()
/// }
///
/// assert_eq!(handler(), "handler");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::record::__function_name(type_name_of(__f))
    }};
}

/// Log a message at the given level.
///
/// The first argument is anything that dereferences to a [`Logger`](crate::Logger), such as
/// a `Logger` or an `Arc<Logger>`.
///
/// # Examples
///
/// ```
/// use logfan::LogLevel;
/// use logfan::Logger;
///
/// let logger = Logger::default();
/// logfan::log!(logger, LogLevel::EVENT, "user {} signed in", 42);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.accepts(level) {
            logger.send(
                &$crate::record::Record::builder()
                    .level(level)
                    .payload(&format_args!($($arg)+))
                    .file(file!())
                    .function($crate::function_name!())
                    .line(line!())
                    .build(),
            );
        }
    }};
}

/// Log a message at [`LogLevel::DEBUG`](crate::LogLevel::DEBUG).
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::DEBUG, $($arg)+)
    };
}

/// Log a message at [`LogLevel::INFO`](crate::LogLevel::INFO).
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::INFO, $($arg)+)
    };
}

/// Log a message at [`LogLevel::EVENT`](crate::LogLevel::EVENT).
#[macro_export]
macro_rules! event {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::EVENT, $($arg)+)
    };
}

/// Log a message at [`LogLevel::WARN`](crate::LogLevel::WARN).
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::WARN, $($arg)+)
    };
}

/// Log a message at [`LogLevel::ERROR`](crate::LogLevel::ERROR).
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::ERROR, $($arg)+)
    };
}

/// Log a diagnostic of the logging machinery at [`LogLevel::INTERNAL`](crate::LogLevel::INTERNAL).
#[macro_export]
macro_rules! internal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::INTERNAL, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use crate::Error;
    use crate::LogLevel;
    use crate::Logger;
    use crate::PrefixFields;
    use crate::execute::ExecutionContext;
    use crate::writer::Writer;

    #[derive(Debug, Default)]
    struct Capture {
        context: ExecutionContext,
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Writer for Capture {
        fn prefix(&self) -> PrefixFields {
            PrefixFields::LEVEL | PrefixFields::FUNCTION
        }

        fn execution_context(&self) -> &ExecutionContext {
            &self.context
        }

        fn write(&self, line: &str) -> Result<(), Error> {
            self.lines.lock().unwrap().push(line.to_string());
            Ok(())
        }
    }

    struct Counted<'a>(&'a AtomicUsize);

    impl std::fmt::Display for Counted<'_> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            self.0.fetch_add(1, Ordering::SeqCst);
            f.write_str("counted")
        }
    }

    #[test]
    fn test_function_name_in_closure() {
        let name = (|| crate::function_name!())();
        assert_eq!(name, "test_function_name_in_closure");
    }

    #[test]
    fn test_level_macros() {
        let capture = Capture::default();
        let lines = capture.lines.clone();
        let logger = Arc::new(Logger::builder().writer(capture).build());

        crate::debug!(logger, "d");
        crate::info!(logger, "i");
        crate::event!(logger, "e");
        crate::warn!(logger, "w");
        crate::error!(logger, "x");
        crate::internal!(logger, "l {}", 1);

        let lines = lines.lock().unwrap();
        let expected = [
            ("DEBUG", "d"),
            ("INFO", "i"),
            ("EVENT", "e"),
            ("WARNING", "w"),
            ("ERROR", "x"),
            ("LOG EVENT", "l 1"),
        ];
        assert_eq!(lines.len(), expected.len());
        for (line, (level, message)) in lines.iter().zip(expected) {
            let head = format!("[{level} {{macros.test_level_macros#");
            assert!(line.starts_with(&head), "{line}");
            assert!(line.ends_with(&format!("}}] {message}")), "{line}");
        }
    }

    #[test]
    fn test_arguments_are_lazy() {
        let counter = AtomicUsize::new(0);
        let logger = Logger::builder()
            .levels(LogLevel::ERROR)
            .writer(Capture::default())
            .build();

        crate::debug!(logger, "{}", Counted(&counter));
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        crate::error!(logger, "{}", Counted(&counter));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
