use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    Yesno,
    Measurable,
}

impl HabitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitKind::Yesno => "yesno",
            HabitKind::Measurable => "measurable",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "yesno" => Some(HabitKind::Yesno),
            "measurable" => Some(HabitKind::Measurable),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    AtLeast,
    AtMost,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::AtLeast => "at_least",
            TargetType::AtMost => "at_most",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "at_least" => Some(TargetType::AtLeast),
            "at_most" => Some(TargetType::AtMost),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HabitRecord {
    pub id: String,
    pub name: String,
    pub color: String,
    pub question: String,
    pub frequency: String,
    pub reminder: String,
    pub notes: Option<String>,
    pub kind: HabitKind,
    pub unit: Option<String>,
    pub target: Option<f64>,
    pub target_type: Option<TargetType>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HabitCreateInput {
    pub name: String,
    pub color: String,
    pub question: String,
    pub frequency: String,
    pub reminder: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub kind: Option<HabitKind>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub target: Option<f64>,
    #[serde(default)]
    pub target_type: Option<TargetType>,
}
