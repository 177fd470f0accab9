// src/prep/config.rs

//! Preprocessing options packed into a 5-digit code such as `30100`.
//!
//! Digit `i` is the code of axis `PrepParam::ALL[i]`. A `PrepConfig` can only
//! be built through validation, so holding one means the combination is legal.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::prep::param::{Caps, ComStr, EnOnly, ParamValue, PrepParam, Split, TabsNewlines};
use crate::prep::repr::{ReprConfig, ReprType, Splitter};
use crate::tokenizer::cache::{BpeData, SubwordCache};
use crate::tokenizer::result::ValidationError;
use crate::tokenizer::Model;

const N_PARAMS: usize = PrepParam::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PrepConfig {
    en_only: EnOnly,
    com_str: ComStr,
    split: Split,
    tabs_newlines: TabsNewlines,
    caps: Caps,
}

impl PrepConfig {
    pub fn new(
        en_only: EnOnly,
        com_str: ComStr,
        split: Split,
        tabs_newlines: TabsNewlines,
        caps: Caps,
    ) -> Result<Self, ValidationError> {
        let config = Self {
            en_only,
            com_str,
            split,
            tabs_newlines,
            caps,
        };
        config.check_invariants()?;
        Ok(config)
    }

    pub fn from_encoded_string(s: &str) -> Result<Self, ValidationError> {
        let n_chars = s.chars().count();
        if n_chars != N_PARAMS {
            return Err(ValidationError::ParamCount {
                expected: N_PARAMS,
                got: n_chars,
            });
        }

        let mut codes = [0u8; N_PARAMS];
        for (code, ch) in codes.iter_mut().zip(s.chars()) {
            *code = ch
                .to_digit(10)
                .ok_or(ValidationError::NotADigit(ch))? as u8;
        }
        Self::from_codes(codes)
    }

    /// Builds a config from an explicit axis → code map holding every axis.
    pub fn from_params(params: &HashMap<PrepParam, u8>) -> Result<Self, ValidationError> {
        let missing_axis = PrepParam::ALL.iter().any(|p| !params.contains_key(p));
        if params.len() != N_PARAMS || missing_axis {
            return Err(ValidationError::ParamCount {
                expected: N_PARAMS,
                got: params.len(),
            });
        }
        Self::from_codes(PrepParam::ALL.map(|p| params[&p]))
    }

    fn from_codes(codes: [u8; N_PARAMS]) -> Result<Self, ValidationError> {
        let [en_only, com_str, split, tabs_newlines, caps] = codes;
        Self::new(
            EnOnly::parse_code(en_only)?,
            ComStr::parse_code(com_str)?,
            Split::parse_code(split)?,
            TabsNewlines::parse_code(tabs_newlines)?,
            Caps::parse_code(caps)?,
        )
    }

    // Lowercasing works on subwords, so words must be split before.
    fn check_invariants(&self) -> Result<(), ValidationError> {
        match (self.caps, self.split) {
            (Caps::Lowercased, Split::NoSplitting | Split::Ronin) => {
                Err(ValidationError::UnsupportedCombination {
                    caps: self.caps.code(),
                    split: self.split.code(),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn en_only(&self) -> EnOnly {
        self.en_only
    }

    pub fn com_str(&self) -> ComStr {
        self.com_str
    }

    pub fn split(&self) -> Split {
        self.split
    }

    pub fn tabs_newlines(&self) -> TabsNewlines {
        self.tabs_newlines
    }

    pub fn caps(&self) -> Caps {
        self.caps
    }

    pub fn get_param_value(&self, param: PrepParam) -> u8 {
        match param {
            PrepParam::EnOnly => self.en_only.code(),
            PrepParam::ComStr => self.com_str.code(),
            PrepParam::Split => self.split.code(),
            PrepParam::TabsNewlines => self.tabs_newlines.code(),
            PrepParam::Caps => self.caps.code(),
        }
    }

    pub fn to_params(&self) -> HashMap<PrepParam, u8> {
        PrepParam::ALL
            .iter()
            .map(|&p| (p, self.get_param_value(p)))
            .collect()
    }

    /// `axis: value` pairs in encoding order, for logs and reports.
    pub fn describe(&self) -> String {
        let values = [
            self.en_only.describe(),
            self.com_str.describe(),
            self.split.describe(),
            self.tabs_newlines.describe(),
            self.caps.describe(),
        ];
        PrepParam::ALL
            .iter()
            .zip(values)
            .map(|(param, value)| format!("{param}: {value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The config whose vocabulary the BPE merges are learned from: basic
    /// camel-case/underscore splitting with everything kept, same casing.
    pub fn get_base_bpe_prep_config(&self) -> PrepConfig {
        PrepConfig {
            en_only: EnOnly::Multilang,
            com_str: ComStr::StringsAndComments,
            split: Split::CamelUnderscore,
            tabs_newlines: TabsNewlines::Keep,
            caps: self.caps,
        }
    }

    pub fn is_bpe(&self) -> bool {
        self.split.is_bpe()
    }

    pub fn is_ronin(&self) -> bool {
        self.split == Split::Ronin
    }

    pub fn get_number_splitter(&self) -> Splitter {
        match self.split {
            Split::NoSplitting | Split::CamelUnderscore => Splitter::Identity,
            Split::CamelUnderscoreNumbers | Split::Ronin => Splitter::Chars,
            Split::Bpe5k
            | Split::Bpe1k
            | Split::Bpe10k
            | Split::Bpe20k
            | Split::Bpe0
            | Split::BpeCustom => Splitter::Bpe,
        }
    }

    /// `None` means words are left unsplit, which differs from splitting
    /// them into a single unit.
    pub fn get_word_splitter(&self) -> Option<Splitter> {
        match self.split {
            Split::Bpe5k
            | Split::Bpe1k
            | Split::Bpe10k
            | Split::Bpe20k
            | Split::Bpe0
            | Split::BpeCustom => Some(Splitter::Bpe),
            Split::CamelUnderscore | Split::CamelUnderscoreNumbers => Some(Splitter::Identity),
            Split::NoSplitting | Split::Ronin => None,
        }
    }

    pub fn get_types_to_be_repr(&self) -> Vec<ReprType> {
        let mut res = Vec::new();
        if !matches!(self.split, Split::NoSplitting | Split::Ronin) {
            res.extend([ReprType::SplitContainer, ReprType::Word]);
        }
        if !matches!(self.split, Split::NoSplitting | Split::CamelUnderscore) {
            res.push(ReprType::Number);
        }
        let com_str_types: &[ReprType] = match self.com_str {
            ComStr::StringsAndComments => &[],
            ComStr::NoStrings => &[ReprType::StringLiteral],
            ComStr::NoStringsNoComments => &[
                ReprType::StringLiteral,
                ReprType::OneLineComment,
                ReprType::MultilineComment,
            ],
            ComStr::NoComments => &[ReprType::OneLineComment, ReprType::MultilineComment],
        };
        res.extend_from_slice(com_str_types);
        match self.en_only {
            EnOnly::Multilang => {}
            EnOnly::AsciiOnly => res.push(ReprType::NonEng),
        }
        match self.tabs_newlines {
            TabsNewlines::Keep => {}
            TabsNewlines::Drop => res.extend([ReprType::NewLine, ReprType::Tab]),
        }
        res
    }

    pub fn get_repr_config<'a, M: Model, C: SubwordCache>(
        &self,
        bpe_data: Option<&'a BpeData<M, C>>,
    ) -> ReprConfig<'a, M, C> {
        ReprConfig {
            types_to_be_repr: self.get_types_to_be_repr(),
            bpe_data,
            should_lowercase: self.caps == Caps::Lowercased,
            number_splitter: self.get_number_splitter(),
            word_splitter: self.get_word_splitter(),
            is_ronin: self.is_ronin(),
        }
    }
}

impl Display for PrepConfig {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for param in PrepParam::ALL {
            write!(f, "{}", self.get_param_value(param))?;
        }
        Ok(())
    }
}

impl FromStr for PrepConfig {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_encoded_string(s)
    }
}

impl TryFrom<String> for PrepConfig {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_encoded_string(&s)
    }
}

impl From<PrepConfig> for String {
    fn from(config: PrepConfig) -> Self {
        config.to_string()
    }
}
