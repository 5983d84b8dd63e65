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

use std::fmt::Write;

use crate::PrefixFields;
use crate::record::Metadata;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3fZ";

/// Build the bracketed metadata prefix of a line.
///
/// An empty field set yields `[]`.
///
/// # Examples
///
/// ```
/// use logfan::LogLevel;
/// use logfan::PrefixFields;
/// use logfan::layout::format_prefix;
/// use logfan::record::Record;
///
/// let record = Record::builder()
///     .level(LogLevel::WARN)
///     .timestamp("2024-08-10T17:12:52.123Z".parse().unwrap())
///     .queue("io")
///     .thread("t1")
///     .file("/srv/app/src/disk.rs")
///     .function("check")
///     .line(12)
///     .build();
///
/// let prefix = format_prefix(PrefixFields::ALL, &record.metadata());
/// assert_eq!(prefix, "[WARNING 2024-08-10T17:12:52.123Z (io#t1) {disk.check#12}]");
/// ```
pub fn format_prefix(fields: PrefixFields, metadata: &Metadata) -> String {
    if fields.is_none() {
        return "[]".to_string();
    }

    // SAFETY: write to a string always succeeds
    let mut text = String::new();
    if fields.contains(PrefixFields::LEVEL) {
        write!(&mut text, "{} ", metadata.level).unwrap();
    }
    if fields.contains(PrefixFields::DATE) {
        write!(&mut text, "{} ", metadata.timestamp.strftime(DATE_FORMAT)).unwrap();
    }
    if fields.intersects(PrefixFields::QUEUE | PrefixFields::THREAD) {
        write!(&mut text, "({}#{}) ", metadata.queue, metadata.thread).unwrap();
    }
    if fields.intersects(PrefixFields::FILE | PrefixFields::FUNCTION | PrefixFields::LINE) {
        let file = source_filename(metadata.file);
        let function = metadata.function;
        let line = metadata.line;
        write!(&mut text, "{{{file}.{function}#{line}}} ").unwrap();
    }

    format!("[{}]", text.trim_matches(' '))
}

/// Build a full line: the prefix, a space, then the message.
pub fn format_line(fields: PrefixFields, metadata: &Metadata, message: &str) -> String {
    let prefix = format_prefix(fields, metadata);
    let mut line = String::with_capacity(prefix.len() + 1 + message.len());
    line.push_str(&prefix);
    line.push(' ');
    line.push_str(message);
    line
}

/// Reduce a source path to the file name without directories or extension.
///
/// The input is returned unchanged if the reduction leaves nothing.
///
/// # Examples
///
/// ```
/// use logfan::layout::source_filename;
///
/// assert_eq!(source_filename("/srv/app/src/handler.rs"), "handler");
/// assert_eq!(source_filename("name"), "name");
/// ```
pub fn source_filename(path: &str) -> &str {
    let filename = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match filename.split('.').next() {
        Some(stem) if !stem.is_empty() => stem,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::LogLevel;
    use crate::record::Record;

    fn metadata() -> Metadata<'static> {
        Record::builder()
            .level(LogLevel::ERROR)
            .timestamp(Timestamp::from_millisecond(1_723_309_972_123).unwrap())
            .queue("ingest")
            .thread("Main Thread")
            .file("src/service/handler.rs")
            .function("serve")
            .line(42)
            .build()
            .metadata()
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(format_prefix(PrefixFields::NONE, &metadata()), "[]");
    }

    #[test]
    fn test_all_fields_in_order() {
        assert_eq!(
            format_prefix(PrefixFields::ALL, &metadata()),
            "[ERROR 2024-08-10T17:12:52.123Z (ingest#Main Thread) {handler.serve#42}]"
        );
    }

    #[test]
    fn test_single_fields() {
        let metadata = metadata();
        let cases = [
            (PrefixFields::LEVEL, "[ERROR]"),
            (PrefixFields::DATE, "[2024-08-10T17:12:52.123Z]"),
            (PrefixFields::QUEUE, "[(ingest#Main Thread)]"),
            (PrefixFields::THREAD, "[(ingest#Main Thread)]"),
            (PrefixFields::FILE, "[{handler.serve#42}]"),
            (PrefixFields::FUNCTION, "[{handler.serve#42}]"),
            (PrefixFields::LINE, "[{handler.serve#42}]"),
        ];
        for (fields, expected) in cases {
            assert_eq!(format_prefix(fields, &metadata), expected, "{fields:?}");
        }
    }

    #[test]
    fn test_no_doubled_spaces() {
        let metadata = metadata();
        for bits in 1..(1u32 << 7) {
            let fields = PrefixFields::from_bits(bits);
            let prefix = format_prefix(fields, &metadata);
            assert!(prefix.starts_with('[') && prefix.ends_with(']'), "{prefix}");
            assert_eq!(prefix.matches('[').count(), 1, "{prefix}");
            let inner = &prefix[1..prefix.len() - 1];
            assert!(!inner.starts_with(' ') && !inner.ends_with(' '), "{prefix}");
            assert!(!inner.replace("Main Thread", "").contains("  "), "{prefix}");
        }
    }

    #[test]
    fn test_unnamed_bits_only() {
        let fields = PrefixFields::from_bits(1 << 20);
        assert_eq!(format_prefix(fields, &metadata()), "[]");
    }

    #[test]
    fn test_date_without_millis() {
        let mut metadata = metadata();
        metadata.timestamp = Timestamp::from_second(0).unwrap();
        assert_eq!(
            format_prefix(PrefixFields::DATE, &metadata),
            "[1970-01-01T00:00:00.000Z]"
        );
    }

    #[test]
    fn test_custom_level_name() {
        let mut metadata = metadata();
        metadata.level = LogLevel::WARN | LogLevel::INFO;
        assert_eq!(format_prefix(PrefixFields::LEVEL, &metadata), "[CUSTOM]");
    }

    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line(PrefixFields::LEVEL, &metadata(), "hello"),
            "[ERROR] hello"
        );
        assert_eq!(format_line(PrefixFields::NONE, &metadata(), "hello"), "[] hello");
    }

    #[test]
    fn test_source_filename() {
        assert_eq!(source_filename("/srv/app/src/handler.rs"), "handler");
        assert_eq!(source_filename("name"), "name");
        assert_eq!(source_filename("src/layout/prefix.rs"), "prefix");
        assert_eq!(source_filename(r"src\writer\file.rs"), "file");
        assert_eq!(source_filename("archive.tar.gz"), "archive");
        assert_eq!(source_filename("/a/b/.hidden"), "/a/b/.hidden");
        assert_eq!(source_filename(""), "");
    }
}
