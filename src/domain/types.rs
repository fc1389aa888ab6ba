use crate::domain::errors::SimulationError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Scored dimension of a method. The declaration order is also the draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Cost,
    Maturity,
    Integration,
    Interoperability,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Cost,
        Attribute::Maturity,
        Attribute::Integration,
        Attribute::Interoperability,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Attribute::Cost => "Cost",
            Attribute::Maturity => "Maturity",
            Attribute::Integration => "Integration",
            Attribute::Interoperability => "Interoperability",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Attribute {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cost" => Ok(Attribute::Cost),
            "maturity" => Ok(Attribute::Maturity),
            "integration" => Ok(Attribute::Integration),
            "interoperability" => Ok(Attribute::Interoperability),
            _ => anyhow::bail!(
                "Invalid attribute: {}. Must be 'cost', 'maturity', 'integration', or 'interoperability'",
                s
            ),
        }
    }
}

/// Catalog identifier of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodId(pub u32);

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed interval a sampled attribute value is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttributeRange {
    min: f64,
    max: f64,
}

impl AttributeRange {
    pub fn new(min: f64, max: f64) -> Result<Self, SimulationError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(SimulationError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Degenerate range holding a single value
    pub fn point(value: f64) -> Result<Self, SimulationError> {
        Self::new(value, value)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl<'de> Deserialize<'de> for AttributeRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            min: f64,
            max: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        AttributeRange::new(raw.min, raw.max).map_err(serde::de::Error::custom)
    }
}

/// The four ranges of one method, one per attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeRanges {
    pub cost: AttributeRange,
    pub maturity: AttributeRange,
    pub integration: AttributeRange,
    pub interoperability: AttributeRange,
}

impl AttributeRanges {
    pub fn get(&self, attribute: Attribute) -> AttributeRange {
        match attribute {
            Attribute::Cost => self.cost,
            Attribute::Maturity => self.maturity,
            Attribute::Integration => self.integration,
            Attribute::Interoperability => self.interoperability,
        }
    }
}

/// Per-method attribute weights. Every weight is finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightVector {
    cost: f64,
    maturity: f64,
    integration: f64,
    interoperability: f64,
}

impl WeightVector {
    pub fn new(
        cost: f64,
        maturity: f64,
        integration: f64,
        interoperability: f64,
    ) -> Result<Self, SimulationError> {
        let mut weights = Self::uniform_unchecked(0.0);
        for (attribute, value) in Attribute::ALL
            .into_iter()
            .zip([cost, maturity, integration, interoperability])
        {
            weights = weights.with(attribute, value)?;
        }
        Ok(weights)
    }

    pub fn uniform(weight: f64) -> Result<Self, SimulationError> {
        Self::new(weight, weight, weight, weight)
    }

    fn uniform_unchecked(weight: f64) -> Self {
        Self {
            cost: weight,
            maturity: weight,
            integration: weight,
            interoperability: weight,
        }
    }

    /// Returns a copy with one weight replaced
    pub fn with(mut self, attribute: Attribute, value: f64) -> Result<Self, SimulationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(SimulationError::InvalidWeight { attribute, value });
        }
        match attribute {
            Attribute::Cost => self.cost = value,
            Attribute::Maturity => self.maturity = value,
            Attribute::Integration => self.integration = value,
            Attribute::Interoperability => self.interoperability = value,
        }
        Ok(self)
    }

    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Cost => self.cost,
            Attribute::Maturity => self.maturity,
            Attribute::Integration => self.integration,
            Attribute::Interoperability => self.interoperability,
        }
    }

    pub fn sum(&self) -> f64 {
        self.cost + self.maturity + self.integration + self.interoperability
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::uniform_unchecked(1.0)
    }
}

/// Parses `cost=1.2,maturity=0.8`; attributes left out keep the default weight of 1.0.
impl FromStr for WeightVector {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut weights = WeightVector::default();
        let mut seen = Vec::with_capacity(Attribute::ALL.len());
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("Invalid weight '{}': expected attribute=value", pair))?;
            let attribute: Attribute = key.parse()?;
            if seen.contains(&attribute) {
                anyhow::bail!("Duplicate {} weight in '{}'", attribute, s);
            }
            seen.push(attribute);
            let value: f64 = value
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {} weight '{}': {}", attribute, value, e))?;
            weights = weights.with(attribute, value)?;
        }
        Ok(weights)
    }
}

/// Weight vectors keyed by method, supplied by the caller per run
pub type WeightTable = HashMap<MethodId, WeightVector>;

/// Ordered set of methods chosen for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodSelection {
    methods: Vec<MethodId>,
}

impl MethodSelection {
    pub fn new(methods: Vec<MethodId>) -> Result<Self, SimulationError> {
        let mut seen = HashSet::with_capacity(methods.len());
        for method in &methods {
            if !seen.insert(*method) {
                return Err(SimulationError::DuplicateMethod { method: *method });
            }
        }
        Ok(Self { methods })
    }

    pub fn iter(&self) -> impl Iterator<Item = MethodId> + '_ {
        self.methods.iter().copied()
    }

    pub fn as_slice(&self) -> &[MethodId] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
