use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Returned when a select value is not one of the offered options
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {field} option: {value}")]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Residential,
    Commercial,
    Office,
    Renovation,
    Consultation,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 6] = [
        ProjectType::Residential,
        ProjectType::Commercial,
        ProjectType::Office,
        ProjectType::Renovation,
        ProjectType::Consultation,
        ProjectType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Residential => "residential",
            ProjectType::Commercial => "commercial",
            ProjectType::Office => "office",
            ProjectType::Renovation => "renovation",
            ProjectType::Consultation => "consultation",
            ProjectType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Residential => "Residential Interior",
            ProjectType::Commercial => "Commercial Interior",
            ProjectType::Office => "Office Design",
            ProjectType::Renovation => "Renovation",
            ProjectType::Consultation => "Design Consultation",
            ProjectType::Other => "Other",
        }
    }
}

impl FromStr for ProjectType {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownOption { field: "projectType", value: s.to_string() })
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Budget brackets in Indian rupees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "under-50k")]
    Under50k,
    #[serde(rename = "50k-1l")]
    From50kTo1L,
    #[serde(rename = "1l-3l")]
    From1LTo3L,
    #[serde(rename = "3l-5l")]
    From3LTo5L,
    #[serde(rename = "5l-10l")]
    From5LTo10L,
    #[serde(rename = "above-10l")]
    Above10L,
}

impl BudgetRange {
    pub const ALL: [BudgetRange; 6] = [
        BudgetRange::Under50k,
        BudgetRange::From50kTo1L,
        BudgetRange::From1LTo3L,
        BudgetRange::From3LTo5L,
        BudgetRange::From5LTo10L,
        BudgetRange::Above10L,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetRange::Under50k => "under-50k",
            BudgetRange::From50kTo1L => "50k-1l",
            BudgetRange::From1LTo3L => "1l-3l",
            BudgetRange::From3LTo5L => "3l-5l",
            BudgetRange::From5LTo10L => "5l-10l",
            BudgetRange::Above10L => "above-10l",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetRange::Under50k => "Under ₹50,000",
            BudgetRange::From50kTo1L => "₹50,000 - ₹1,00,000",
            BudgetRange::From1LTo3L => "₹1,00,000 - ₹3,00,000",
            BudgetRange::From3LTo5L => "₹3,00,000 - ₹5,00,000",
            BudgetRange::From5LTo10L => "₹5,00,000 - ₹10,00,000",
            BudgetRange::Above10L => "Above ₹10,00,000",
        }
    }
}

impl FromStr for BudgetRange {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BudgetRange::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| UnknownOption { field: "budget", value: s.to_string() })
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "asap")]
    Asap,
    #[serde(rename = "1-3months")]
    OneToThreeMonths,
    #[serde(rename = "3-6months")]
    ThreeToSixMonths,
    #[serde(rename = "6-12months")]
    SixToTwelveMonths,
    #[serde(rename = "flexible")]
    Flexible,
}

impl Timeline {
    pub const ALL: [Timeline; 5] = [
        Timeline::Asap,
        Timeline::OneToThreeMonths,
        Timeline::ThreeToSixMonths,
        Timeline::SixToTwelveMonths,
        Timeline::Flexible,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeline::Asap => "asap",
            Timeline::OneToThreeMonths => "1-3months",
            Timeline::ThreeToSixMonths => "3-6months",
            Timeline::SixToTwelveMonths => "6-12months",
            Timeline::Flexible => "flexible",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeline::Asap => "ASAP",
            Timeline::OneToThreeMonths => "1-3 months",
            Timeline::ThreeToSixMonths => "3-6 months",
            Timeline::SixToTwelveMonths => "6-12 months",
            Timeline::Flexible => "Flexible",
        }
    }
}

impl FromStr for Timeline {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeline::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownOption { field: "timeline", value: s.to_string() })
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated quote request as built by the form before it is sent.
/// Never stored; it lives only until the relay acknowledges it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project_type: ProjectType,
    pub budget: Option<BudgetRange>,
    pub timeline: Option<Timeline>,
    pub message: Option<String>,
}
