use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Life area a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionCategory {
    #[serde(rename = "Social Skills & Communication")]
    SocialSkills,
    #[serde(rename = "Mental Health & Emotions")]
    MentalHealth,
    #[serde(rename = "Physical Health & Fitness")]
    PhysicalHealth,
    #[serde(rename = "Career & Professional Growth")]
    Career,
    #[serde(rename = "Money & Finance")]
    Money,
    #[serde(rename = "Time Management & Productivity")]
    TimeManagement,
    #[serde(rename = "Learning & Education")]
    Learning,
    #[serde(rename = "Family & Relationships")]
    Family,
    #[serde(rename = "Hobbies & Recreation")]
    Hobbies,
    #[serde(rename = "Home & Organization")]
    Home,
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 10] = [
        QuestionCategory::SocialSkills,
        QuestionCategory::MentalHealth,
        QuestionCategory::PhysicalHealth,
        QuestionCategory::Career,
        QuestionCategory::Money,
        QuestionCategory::TimeManagement,
        QuestionCategory::Learning,
        QuestionCategory::Family,
        QuestionCategory::Hobbies,
        QuestionCategory::Home,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::SocialSkills => "Social Skills & Communication",
            QuestionCategory::MentalHealth => "Mental Health & Emotions",
            QuestionCategory::PhysicalHealth => "Physical Health & Fitness",
            QuestionCategory::Career => "Career & Professional Growth",
            QuestionCategory::Money => "Money & Finance",
            QuestionCategory::TimeManagement => "Time Management & Productivity",
            QuestionCategory::Learning => "Learning & Education",
            QuestionCategory::Family => "Family & Relationships",
            QuestionCategory::Hobbies => "Hobbies & Recreation",
            QuestionCategory::Home => "Home & Organization",
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ValidationError::invalid("category", format!("unknown category '{s}'")))
    }
}

/// Whether a principle is still being tried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipleStatus {
    Testing,
    Tested,
}

impl PrincipleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipleStatus::Testing => "testing",
            PrincipleStatus::Tested => "tested",
        }
    }
}

impl fmt::Display for PrincipleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrincipleStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "testing" => Ok(PrincipleStatus::Testing),
            "tested" => Ok(PrincipleStatus::Tested),
            other => Err(ValidationError::invalid(
                "status",
                format!("expected 'testing' or 'tested', got '{other}'"),
            )),
        }
    }
}

/// A life question that principles answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub title: String,
    pub category: QuestionCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A guideline linked to exactly one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principle {
    pub id: i64,
    pub question_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub examples: Option<String>,
    pub status: PrincipleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_parses_from_its_label() {
        for category in QuestionCategory::ALL {
            assert_eq!(category.as_str().parse::<QuestionCategory>().unwrap(), category);
        }
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&QuestionCategory::Money).unwrap();
        assert_eq!(json, "\"Money & Finance\"");
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "Gardening".parse::<QuestionCategory>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::invalid("category", "unknown category 'Gardening'")
        );
    }
}
