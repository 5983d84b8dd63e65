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

use jiff::Timestamp;

/// Source of the timestamps file names are derived from.
#[derive(Debug)]
pub(crate) enum Clock {
    DefaultClock,
    /// A fixed time that tests move by hand.
    #[cfg(test)]
    ManualClock(Timestamp),
}

impl Clock {
    pub(crate) fn now(&self) -> Timestamp {
        match self {
            Clock::DefaultClock => Timestamp::now(),
            #[cfg(test)]
            Clock::ManualClock(now) => *now,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_now(&mut self, new_time: Timestamp) {
        if let Clock::ManualClock(now) = self {
            *now = new_time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_moves_only_by_hand() {
        let start = Timestamp::from_second(1_723_309_972).unwrap();
        let mut clock = Clock::ManualClock(start);
        assert_eq!(clock.now(), start);

        let later = Timestamp::from_second(1_723_309_972 + 3600).unwrap();
        clock.set_now(later);
        assert_eq!(clock.now(), later);

        let mut system = Clock::DefaultClock;
        system.set_now(start);
        assert!(system.now() > start);
    }
}
