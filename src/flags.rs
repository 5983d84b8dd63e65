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

/// Declares a named bit-set over `u32` with `NONE` and `ALL` sentinels.
///
/// Each flag takes a canonical lowercase name and optional aliases, used by `Debug`,
/// `FromStr` and the optional serde support.
macro_rules! bit_set {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$flag_meta:meta])*
                const $flag:ident = $bits:expr, $label:literal $(| $alias:literal)*;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $name(u32);

        impl $name {
            /// The empty set. It never matches anything.
            pub const NONE: $name = $name(0);

            /// Every bit set, including bits without a name.
            pub const ALL: $name = $name(u32::MAX);

            $(
                $(#[$flag_meta])*
                pub const $flag: $name = $name($bits);
            )*

            const NAMED: &'static [(&'static str, &'static [&'static str], $name)] = &[
                $(($label, &[$($alias),*], $name::$flag),)*
            ];

            /// Create a set from raw bits. Bits without a name are kept.
            pub const fn from_bits(bits: u32) -> Self {
                Self(bits)
            }

            /// The raw bits of this set.
            pub const fn bits(self) -> u32 {
                self.0
            }

            /// Whether no bit is set.
            pub const fn is_none(self) -> bool {
                self.0 == 0
            }

            /// Whether every bit is set.
            pub const fn is_all(self) -> bool {
                self.0 == u32::MAX
            }

            /// Whether all bits of `other` are set in `self`.
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// Whether `self` and `other` share at least one bit.
            pub const fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }

            /// The bits set in either `self` or `other`.
            pub const fn union(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }

            /// The bits set in `self` but not in `other`.
            pub const fn difference(self, other: Self) -> Self {
                Self(self.0 & !other.0)
            }

            /// The canonical names of the named flags set in `self`.
            pub fn names(self) -> impl Iterator<Item = &'static str> {
                Self::NAMED
                    .iter()
                    .filter(move |(_, _, flag)| self.contains(*flag))
                    .map(|(name, _, _)| *name)
            }

            fn unnamed_bits(self) -> u32 {
                Self::NAMED
                    .iter()
                    .fold(self.0, |bits, (_, _, flag)| bits & !flag.0)
            }

            fn parse_one(name: &str) -> Option<Self> {
                if name.eq_ignore_ascii_case("all") {
                    return Some(Self::ALL);
                }
                if name.eq_ignore_ascii_case("none") || name.eq_ignore_ascii_case("off") {
                    return Some(Self::NONE);
                }
                if let Some(hex) = name.strip_prefix("0x") {
                    return u32::from_str_radix(hex, 16).ok().map(Self);
                }
                if let Ok(bits) = name.parse::<u32>() {
                    return Some(Self(bits));
                }
                Self::NAMED
                    .iter()
                    .find(|(label, aliases, _)| {
                        label.eq_ignore_ascii_case(name)
                            || aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
                    })
                    .map(|(_, _, flag)| *flag)
            }

            fn to_names_string(self) -> String {
                if self.is_all() {
                    return "all".to_string();
                }
                if self.is_none() {
                    return "none".to_string();
                }
                let mut names = self.names().map(str::to_string).collect::<Vec<_>>();
                let unnamed = self.unnamed_bits();
                if unnamed != 0 {
                    names.push(format!("{unnamed:#x}"));
                }
                names.join(",")
            }
        }

        impl ::std::ops::BitOr for $name {
            type Output = $name;

            fn bitor(self, rhs: $name) -> $name {
                self.union(rhs)
            }
        }

        impl ::std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: $name) {
                *self = self.union(rhs);
            }
        }

        impl ::std::ops::BitAnd for $name {
            type Output = $name;

            fn bitand(self, rhs: $name) -> $name {
                $name(self.0 & rhs.0)
            }
        }

        impl ::std::ops::BitAndAssign for $name {
            fn bitand_assign(&mut self, rhs: $name) {
                self.0 &= rhs.0;
            }
        }

        impl ::std::ops::Not for $name {
            type Output = $name;

            fn not(self) -> $name {
                $name(!self.0)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let names = self.to_names_string().replace(',', " | ");
                write!(f, "{}({names})", stringify!($name))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut set = $name::NONE;
                for part in s.split([',', '|']).map(str::trim).filter(|p| !p.is_empty()) {
                    match $name::parse_one(part) {
                        Some(flag) => set |= flag,
                        None => {
                            return Err($crate::Error::new(concat!(
                                "unknown flag name for ",
                                stringify!($name)
                            ))
                            .with_context("name", part));
                        }
                    }
                }
                Ok(set)
            }
        }

        #[cfg(feature = "serde")]
        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_names_string())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct FlagsVisitor;

                impl ::serde::de::Visitor<'_> for FlagsVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                        f.write_str("a list of flag names or raw bits")
                    }

                    fn visit_str<E: ::serde::de::Error>(self, v: &str) -> Result<$name, E> {
                        v.parse().map_err(E::custom)
                    }

                    fn visit_u64<E: ::serde::de::Error>(self, v: u64) -> Result<$name, E> {
                        u32::try_from(v).map($name::from_bits).map_err(E::custom)
                    }
                }

                deserializer.deserialize_any(FlagsVisitor)
            }
        }
    };
}
