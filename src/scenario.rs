//! Scenario descriptions: the universe of items, the sequence of
//! totals to visit, and the size of the report.
//!
//! A scenario is given in YAML, as a dictionary with the keys
//! `weights` and `sequence` (required), and `name` and `top`
//! (optional).  Lists of weights may be written either as YAML lists
//! or in short form, as strings of numbers separated by commas or
//! whitespace:
//!
//! ```yaml
//! name: deadlift
//! weights: 5, 10, 10, 10, 25, 25, 45, 45
//! sequence: [15, 25, 35, 55, 60]
//! top: 10
//! ```

use std::{fmt, fs::File, io::Read, path::Path, error::Error};
use regex::Regex;
use yaml_rust::{Yaml, YamlLoader};
use crate::Weight;

/// Largest sum of weights accepted in a scenario.  The enumerator
/// keeps a table indexed by every total up to this sum.
pub const MAX_WEIGHT_SUM: Weight = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    Empty,
    Multiple,
    NotADict,
    KeyNotString,
    KeyUnknown(String),
    NameNotString,
    WeightInvalid(String),
    WeightsMissing,
    WeightsEmpty,
    WeightsTooHeavy,
    SequenceMissing,
    SequenceEmpty,
    SequenceNotIncreasing(Weight, Weight),
    TopInvalid,
}

impl ScenarioError {
    pub fn description(&self) -> &str {
        use ScenarioError::*;

        match self {
            Empty => "Scenario is empty",
            Multiple => "Multiple scenarios in a single description",
            NotADict => "Bad scenario (not a dictionary)",
            KeyNotString => "Non-string key in scenario",
            KeyUnknown(_) => "Unknown key in scenario",
            NameNotString => "Non-string scenario name",
            WeightInvalid(_) => "Invalid weight in scenario",
            WeightsMissing => "Scenario has no weights",
            WeightsEmpty => "Scenario has an empty list of weights",
            WeightsTooHeavy => "Sum of weights in scenario is too large",
            SequenceMissing => "Scenario has no sequence",
            SequenceEmpty => "Scenario has an empty sequence",
            SequenceNotIncreasing(..) => "Scenario sequence isn't strictly increasing",
            TopInvalid => "Invalid number of top paths in scenario",
        }
    }
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ScenarioError::*;

        match self {
            KeyUnknown(key) => write!(f, "Unknown key '{}' in scenario", key),
            WeightInvalid(what) => write!(f, "Invalid weight '{}' in scenario", what),
            WeightsTooHeavy => {
                write!(f, "Sum of weights in scenario exceeds {}", MAX_WEIGHT_SUM)
            }
            SequenceNotIncreasing(prev, next) => {
                write!(f, "Scenario sequence isn't strictly increasing ({} then {})", prev, next)
            }
            _ => write!(f, "{}", self.description()),
        }
    }
}

impl Error for ScenarioError {}

/// Parses a short list of weights, like `"5, 10, 10 25"`.
pub fn parse_weights<S: AsRef<str>>(list: S) -> Result<Vec<Weight>, ScenarioError> {
    lazy_static! {
        static ref SEPARATOR_RE: Regex = Regex::new(r"[\s,]+").unwrap();
    }

    SEPARATOR_RE
        .split(list.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Weight>().map_err(|_| ScenarioError::WeightInvalid(s.to_owned())))
        .collect()
}

fn weights_from_yaml(yaml: &Yaml) -> Result<Vec<Weight>, ScenarioError> {
    match yaml {
        Yaml::String(list) => parse_weights(list),
        Yaml::Integer(_) => Ok(vec![weight_from_yaml(yaml)?]),
        Yaml::Array(items) => items.iter().map(weight_from_yaml).collect(),
        other => Err(ScenarioError::WeightInvalid(format!("{:?}", other))),
    }
}

fn weight_from_yaml(yaml: &Yaml) -> Result<Weight, ScenarioError> {
    match yaml {
        Yaml::Integer(value) if *value >= 0 => Ok(*value as Weight),
        Yaml::Integer(value) => Err(ScenarioError::WeightInvalid(value.to_string())),
        Yaml::String(s) => {
            s.trim().parse::<Weight>().map_err(|_| ScenarioError::WeightInvalid(s.to_owned()))
        }
        other => Err(ScenarioError::WeightInvalid(format!("{:?}", other))),
    }
}

/// A complete description of a single planning problem.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Scenario {
    name:     String,
    weights:  Vec<Weight>,
    sequence: Vec<Weight>,
    top:      usize,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            name:     "default".to_owned(),
            weights:  vec![5, 10, 10, 10, 25, 25, 45, 45],
            sequence: vec![15, 25, 35, 55, 60],
            top:      10,
        }
    }
}

impl Scenario {
    pub fn new<S: AsRef<str>>(name: S, weights: Vec<Weight>, sequence: Vec<Weight>) -> Self {
        Scenario { name: name.as_ref().to_owned(), weights, sequence, ..Default::default() }
    }

    pub fn from_yaml_str<S: AsRef<str>>(script: S) -> Result<Self, Box<dyn Error>> {
        let docs = YamlLoader::load_from_str(script.as_ref())?;

        if docs.len() > 1 {
            return Err(Box::new(ScenarioError::Multiple))
        }

        let doc = docs.into_iter().next().ok_or(ScenarioError::Empty)?;
        let dict = doc.into_hash().ok_or(ScenarioError::NotADict)?;

        let mut name = None;
        let mut weights = None;
        let mut sequence = None;
        let mut top = None;

        for (key, value) in dict.iter() {
            match key.as_str().ok_or(ScenarioError::KeyNotString)? {
                "name" => name = Some(value.as_str().ok_or(ScenarioError::NameNotString)?.to_owned()),
                "weights" => weights = Some(weights_from_yaml(value)?),
                "sequence" => sequence = Some(weights_from_yaml(value)?),
                "top" => match value.as_i64() {
                    Some(v) if v >= 0 => top = Some(v as usize),
                    _ => return Err(Box::new(ScenarioError::TopInvalid)),
                },
                other => return Err(Box::new(ScenarioError::KeyUnknown(other.to_owned()))),
            }
        }

        let mut scenario = Scenario::new(
            name.unwrap_or_else(|| "unnamed".to_owned()),
            weights.ok_or(ScenarioError::WeightsMissing)?,
            sequence.ok_or(ScenarioError::SequenceMissing)?,
        );

        if let Some(top) = top {
            scenario.top = top;
        }

        scenario.validate()?;

        Ok(scenario)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut fp = File::open(path.as_ref())?;
        let mut script = String::new();
        fp.read_to_string(&mut script)?;

        let mut scenario = Self::from_yaml_str(script)?;

        if scenario.name == "unnamed" {
            if let Some(stem) = path.as_ref().file_stem().and_then(|s| s.to_str()) {
                scenario.name = stem.to_owned();
            }
        }

        Ok(scenario)
    }

    /// Checks that the universe is nonempty and not heavier than
    /// [`MAX_WEIGHT_SUM`], and that the sequence of totals is nonempty,
    /// positive and strictly increasing.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.weights.is_empty() {
            return Err(ScenarioError::WeightsEmpty)
        }

        self.weights
            .iter()
            .try_fold(0 as Weight, |acc, &w| acc.checked_add(w).filter(|&sum| sum <= MAX_WEIGHT_SUM))
            .ok_or(ScenarioError::WeightsTooHeavy)?;

        if self.sequence.is_empty() {
            return Err(ScenarioError::SequenceEmpty)
        }

        let mut prev = 0;

        for &next in self.sequence.iter() {
            if next <= prev {
                return Err(ScenarioError::SequenceNotIncreasing(prev, next))
            }
            prev = next;
        }

        Ok(())
    }

    pub fn set_weights(&mut self, weights: Vec<Weight>) {
        self.weights = weights;
    }

    pub fn set_sequence(&mut self, sequence: Vec<Weight>) {
        self.sequence = sequence;
    }

    pub fn set_top(&mut self, top: usize) {
        self.top = top;
    }

    #[inline]
    pub fn get_name(&self) -> &str {
        self.name.as_str()
    }

    #[inline]
    pub fn get_weights(&self) -> &[Weight] {
        self.weights.as_slice()
    }

    #[inline]
    pub fn get_sequence(&self) -> &[Weight] {
        self.sequence.as_slice()
    }

    #[inline]
    pub fn get_top(&self) -> usize {
        self.top
    }
}
