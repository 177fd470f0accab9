// src/prep/param.rs

//! The five preprocessing axes and the legal values of each.

use std::fmt::{self, Display, Formatter};

use crate::tokenizer::result::ValidationError;

/// Axes of a preprocessing config, in encoding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrepParam {
    EnOnly,
    ComStr,
    Split,
    TabsNewlines,
    Caps,
}

impl PrepParam {
    /// Position `i` of an encoded config string holds `ALL[i]`.
    pub const ALL: [PrepParam; 5] = [
        PrepParam::EnOnly,
        PrepParam::ComStr,
        PrepParam::Split,
        PrepParam::TabsNewlines,
        PrepParam::Caps,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrepParam::EnOnly => "enonly",
            PrepParam::ComStr => "comstr",
            PrepParam::Split => "split",
            PrepParam::TabsNewlines => "tabsnewlines",
            PrepParam::Caps => "caps",
        }
    }

    pub fn possible_values(self) -> &'static [u8] {
        match self {
            PrepParam::EnOnly => EnOnly::POSSIBLE,
            PrepParam::ComStr => ComStr::POSSIBLE,
            PrepParam::Split => Split::POSSIBLE,
            PrepParam::TabsNewlines => TabsNewlines::POSSIBLE,
            PrepParam::Caps => Caps::POSSIBLE,
        }
    }
}

impl Display for PrepParam {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value of one axis, with its single-digit code.
pub trait ParamValue: Copy + Sized {
    const PARAM: PrepParam;
    const POSSIBLE: &'static [u8];

    fn code(self) -> u8;

    fn from_code(code: u8) -> Option<Self>;

    /// Human readable name, as used in reports and logs.
    fn describe(self) -> &'static str;

    fn parse_code(code: u8) -> Result<Self, ValidationError> {
        Self::from_code(code).ok_or(ValidationError::InvalidValue {
            param: Self::PARAM.name(),
            value: code,
            possible: Self::POSSIBLE,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnOnly {
    Multilang,
    AsciiOnly,
}

impl ParamValue for EnOnly {
    const PARAM: PrepParam = PrepParam::EnOnly;
    const POSSIBLE: &'static [u8] = &[0, 3];

    fn code(self) -> u8 {
        match self {
            EnOnly::Multilang => 0,
            EnOnly::AsciiOnly => 3,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(EnOnly::Multilang),
            3 => Some(EnOnly::AsciiOnly),
            _ => None,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            EnOnly::Multilang => "multilang",
            // Spelling kept so names match existing reports and dataset paths.
            EnOnly::AsciiOnly => "asci_only",
        }
    }
}

/// Which of strings and comments are kept as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComStr {
    StringsAndComments,
    NoStrings,
    NoStringsNoComments,
    NoComments,
}

impl ParamValue for ComStr {
    const PARAM: PrepParam = PrepParam::ComStr;
    const POSSIBLE: &'static [u8] = &[0, 1, 2, 3];

    fn code(self) -> u8 {
        match self {
            ComStr::StringsAndComments => 0,
            ComStr::NoStrings => 1,
            ComStr::NoStringsNoComments => 2,
            ComStr::NoComments => 3,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ComStr::StringsAndComments),
            1 => Some(ComStr::NoStrings),
            2 => Some(ComStr::NoStringsNoComments),
            3 => Some(ComStr::NoComments),
            _ => None,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            ComStr::StringsAndComments => "strings+comments",
            ComStr::NoStrings => "NO_strings+comments",
            ComStr::NoStringsNoComments => "NO_strings+NO_comments",
            ComStr::NoComments => "strings+NO_comments",
        }
    }
}

/// Subword splitting strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    NoSplitting,
    CamelUnderscore,
    CamelUnderscoreNumbers,
    /// Splitting done by an external library.
    Ronin,
    Bpe5k,
    Bpe1k,
    Bpe10k,
    Bpe20k,
    Bpe0,
    BpeCustom,
}

impl Split {
    pub fn is_bpe(self) -> bool {
        matches!(
            self,
            Split::Bpe5k | Split::Bpe1k | Split::Bpe10k | Split::Bpe20k | Split::Bpe0 | Split::BpeCustom
        )
    }

    /// Number of merges the vocabulary was built with, when fixed by the code.
    pub fn bpe_merges(self) -> Option<usize> {
        match self {
            Split::Bpe5k => Some(5_000),
            Split::Bpe1k => Some(1_000),
            Split::Bpe10k => Some(10_000),
            Split::Bpe20k => Some(20_000),
            Split::Bpe0 => Some(0),
            Split::BpeCustom
            | Split::NoSplitting
            | Split::CamelUnderscore
            | Split::CamelUnderscoreNumbers
            | Split::Ronin => None,
        }
    }
}

impl ParamValue for Split {
    const PARAM: PrepParam = PrepParam::Split;
    const POSSIBLE: &'static [u8] = &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9];

    fn code(self) -> u8 {
        match self {
            Split::NoSplitting => 0,
            Split::CamelUnderscore => 1,
            Split::CamelUnderscoreNumbers => 2,
            Split::Ronin => 3,
            Split::Bpe5k => 4,
            Split::Bpe1k => 5,
            Split::Bpe10k => 6,
            Split::Bpe20k => 7,
            Split::Bpe0 => 8,
            Split::BpeCustom => 9,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Split::NoSplitting),
            1 => Some(Split::CamelUnderscore),
            2 => Some(Split::CamelUnderscoreNumbers),
            3 => Some(Split::Ronin),
            4 => Some(Split::Bpe5k),
            5 => Some(Split::Bpe1k),
            6 => Some(Split::Bpe10k),
            7 => Some(Split::Bpe20k),
            8 => Some(Split::Bpe0),
            9 => Some(Split::BpeCustom),
            _ => None,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Split::NoSplitting => "NO_splitting",
            Split::CamelUnderscore => "camel+underscore",
            Split::CamelUnderscoreNumbers => "camel+underscore+numbers",
            Split::Ronin => "ronin",
            Split::Bpe5k => "camel+underscore+bpe_5k",
            Split::Bpe1k => "camel+underscore+bpe_1k",
            Split::Bpe10k => "camel+underscore+bpe_10k",
            Split::Bpe20k => "camel+underscore+bpe_20k",
            Split::Bpe0 => "camel+underscore+bpe_0",
            Split::BpeCustom => "camel+underscore+bpe_custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabsNewlines {
    Keep,
    Drop,
}

impl ParamValue for TabsNewlines {
    const PARAM: PrepParam = PrepParam::TabsNewlines;
    const POSSIBLE: &'static [u8] = &[0, 1];

    fn code(self) -> u8 {
        match self {
            TabsNewlines::Keep => 0,
            TabsNewlines::Drop => 1,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TabsNewlines::Keep),
            1 => Some(TabsNewlines::Drop),
            _ => None,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            TabsNewlines::Keep => "tabs+newlines",
            TabsNewlines::Drop => "NO_tabs+NO_newlines",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Caps {
    Preserved,
    Lowercased,
}

impl ParamValue for Caps {
    const PARAM: PrepParam = PrepParam::Caps;
    const POSSIBLE: &'static [u8] = &[0, 1];

    fn code(self) -> u8 {
        match self {
            Caps::Preserved => 0,
            Caps::Lowercased => 1,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Caps::Preserved),
            1 => Some(Caps::Lowercased),
            _ => None,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Caps::Preserved => "case_preserved",
            Caps::Lowercased => "lowercased",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_codes_round_trip<V: ParamValue + PartialEq + std::fmt::Debug>() {
        for &code in V::POSSIBLE {
            let value = V::from_code(code).unwrap();
            assert_eq!(value.code(), code);
            assert_eq!(V::parse_code(code).unwrap(), value);
        }
    }

    #[test]
    fn every_legal_code_maps_to_a_value() {
        assert_codes_round_trip::<EnOnly>();
        assert_codes_round_trip::<ComStr>();
        assert_codes_round_trip::<Split>();
        assert_codes_round_trip::<TabsNewlines>();
        assert_codes_round_trip::<Caps>();
    }

    #[test]
    fn illegal_code_names_axis_and_choices() {
        assert_eq!(
            EnOnly::parse_code(1).unwrap_err(),
            ValidationError::InvalidValue {
                param: "enonly",
                value: 1,
                possible: &[0, 3],
            }
        );
        assert!(ComStr::parse_code(4).is_err());
        assert!(Caps::parse_code(2).is_err());
    }

    #[test]
    fn bpe_codes() {
        let bpe: Vec<u8> = Split::POSSIBLE
            .iter()
            .copied()
            .filter(|&c| Split::from_code(c).is_some_and(Split::is_bpe))
            .collect();
        assert_eq!(bpe, vec![4, 5, 6, 7, 8, 9]);
        assert_eq!(Split::Bpe10k.bpe_merges(), Some(10_000));
        assert_eq!(Split::BpeCustom.bpe_merges(), None);
    }

    #[test]
    fn axis_order_matches_encoding() {
        let names: Vec<_> = PrepParam::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["enonly", "comstr", "split", "tabsnewlines", "caps"]);
        assert_eq!(PrepParam::Split.possible_values().len(), 10);
    }
}
