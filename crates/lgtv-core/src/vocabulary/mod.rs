//! Named values accepted by the TV's command set.
//!
//! Every enumeration has two spellings per variant: a camel-case *name* used
//! on the command line (`hdmi1`, `screenOff`, `volumeUp`) and the *wire value*
//! actually sent to the device (`hdmi1`, `screen_off`, `volumeup`).  Parsing
//! accepts either; [`Display`](std::fmt::Display) always renders the wire value.

use thiserror::Error;

/// A string did not name any variant of a vocabulary enum.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed set of wire strings.
///
/// Each variant is written `Variant => ("cliName", "wire value")`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($cli:literal, $wire:literal), )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value sent on the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// The command-line spelling.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $cli,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::vocabulary::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(s) || v.as_str() == s)
                    .ok_or_else(|| $crate::vocabulary::UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    })
            }
        }
    };
}

mod tv;

pub use tv::{App, EnergySavingLevel, Input, Key, MacInterface, PictureMode, PowerState, ScreenMuteMode};
