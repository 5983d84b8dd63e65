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

//! Format the metadata prefix of log lines.
//!
//! Output format with every field enabled:
//!
//! ```text
//! [ERROR 2024-08-10T17:12:52.123Z (Unknown Queue#Main Thread) {main.main#42}] Hello error!
//! ```

use std::fmt;

pub use self::prefix::format_line;
pub use self::prefix::format_prefix;
pub use self::prefix::source_filename;

mod prefix;

bit_set! {
    /// The metadata segments rendered in a line prefix.
    ///
    /// Segments always appear in the same order: level, date, `(queue#thread)`, then
    /// `{file.function#line}`. Enabling any of `QUEUE`/`THREAD` renders the whole
    /// `(queue#thread)` group; any of `FILE`/`FUNCTION`/`LINE` renders the whole source group.
    ///
    /// # Examples
    ///
    /// ```
    /// use logfan::PrefixFields;
    ///
    /// let fields: PrefixFields = "level|date".parse().unwrap();
    /// assert_eq!(fields, PrefixFields::LEVEL | PrefixFields::DATE);
    /// ```
    pub struct PrefixFields {
        /// The level display name.
        const LEVEL = 1 << 0, "level";
        /// The timestamp, in UTC.
        const DATE = 1 << 1, "date";
        /// The queue label.
        const QUEUE = 1 << 2, "queue";
        /// The thread label.
        const THREAD = 1 << 3, "thread";
        /// The source file name.
        const FILE = 1 << 4, "file";
        /// The function name.
        const FUNCTION = 1 << 5, "function";
        /// The source line.
        const LINE = 1 << 6, "line";
    }
}

impl fmt::Display for PrefixFields {
    /// Lowercase field names joined by `,`, the format [`str::parse`] accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_names_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parses_back() {
        let fields = PrefixFields::LEVEL | PrefixFields::LINE;
        assert_eq!(fields.to_string(), "level,line");
        assert_eq!(fields.to_string().parse::<PrefixFields>().unwrap(), fields);
        assert_eq!(PrefixFields::ALL.to_string(), "all");
        assert_eq!(PrefixFields::NONE.to_string(), "none");
    }
}
