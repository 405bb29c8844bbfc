//! Profile Intake
//!
//! The editable profile form and the validated snapshot that gets sent to
//! `POST /submit-details/`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ChatError, ChatResult};

/// Gender as offered by the profile form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Label for select options
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Dietary goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
#[cfg_attr(feature = "native", value(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    MuscleGain,
    WeightLoss,
    Maintenance,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::MuscleGain, Goal::WeightLoss, Goal::Maintenance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::MuscleGain => "muscle_gain",
            Goal::WeightLoss => "weight_loss",
            Goal::Maintenance => "maintenance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Goal::MuscleGain => "Muscle Gain",
            Goal::WeightLoss => "Weight Loss",
            Goal::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for select values that match no option
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown option: {0}")]
pub struct UnknownOption(pub String);

impl FromStr for Gender {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

impl FromStr for Goal {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Goal::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

/// The profile form as the user is editing it
///
/// Starts empty and stays editable after a successful save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub user_id: String,
    pub age: u32,
    pub weight: f64,
    /// Free text, e.g. "180 cm"
    pub height: String,
    pub gender: Option<Gender>,
    pub preferences: String,
    pub restrictions: String,
    pub goal: Option<Goal>,
}

/// A profile snapshot with every required field present
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSubmission {
    pub user_id: String,
    pub age: u32,
    pub weight: f64,
    pub height: String,
    pub gender: Gender,
    pub preferences: String,
    pub restrictions: String,
    pub goal: Goal,
}

impl ProfileForm {
    /// Check required-field presence and freeze the form for sending
    pub fn validate(&self) -> ChatResult<ProfileSubmission> {
        if self.user_id.trim().is_empty() {
            return Err(ChatError::MissingField("user_id"));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(ChatError::InvalidField("weight"));
        }
        if self.height.trim().is_empty() {
            return Err(ChatError::MissingField("height"));
        }
        let gender = self.gender.ok_or(ChatError::MissingField("gender"))?;
        let goal = self.goal.ok_or(ChatError::MissingField("goal"))?;

        Ok(ProfileSubmission {
            user_id: self.user_id.clone(),
            age: self.age,
            weight: self.weight,
            height: self.height.clone(),
            gender,
            preferences: self.preferences.clone(),
            restrictions: self.restrictions.clone(),
            goal,
        })
    }
}

impl ProfileSubmission {
    /// Multipart fields in the order the backend form declares them
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("user_id", self.user_id.clone()),
            ("age", self.age.to_string()),
            // f64 Display drops the ".0" on integral values, matching the page
            ("weight", self.weight.to_string()),
            ("height", self.height.clone()),
            ("gender", self.gender.as_str().to_string()),
            ("preferences", self.preferences.clone()),
            ("restrictions", self.restrictions.clone()),
            ("goal", self.goal.as_str().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ProfileForm {
        ProfileForm {
            user_id: "u-42".to_string(),
            age: 30,
            weight: 72.0,
            height: "180 cm".to_string(),
            gender: Some(Gender::Female),
            preferences: "vegetarian".to_string(),
            restrictions: String::new(),
            goal: Some(Goal::MuscleGain),
        }
    }

    #[test]
    fn test_empty_form_is_incomplete() {
        let form = ProfileForm::default();
        assert_eq!(form.validate(), Err(ChatError::MissingField("user_id")));
    }

    #[test]
    fn test_required_fields() {
        let mut form = filled_form();
        form.height = "   ".to_string();
        assert_eq!(form.validate(), Err(ChatError::MissingField("height")));

        let mut form = filled_form();
        form.gender = None;
        assert_eq!(form.validate(), Err(ChatError::MissingField("gender")));

        let mut form = filled_form();
        form.goal = None;
        assert_eq!(form.validate(), Err(ChatError::MissingField("goal")));

        let mut form = filled_form();
        form.weight = -1.0;
        assert_eq!(form.validate(), Err(ChatError::InvalidField("weight")));
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let mut form = filled_form();
        form.preferences.clear();
        form.restrictions.clear();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_form_fields_order_and_formatting() {
        let submission = filled_form().validate().unwrap();
        let fields = submission.form_fields();

        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["user_id", "age", "weight", "height", "gender", "preferences", "restrictions", "goal"]
        );
        assert_eq!(fields[1].1, "30");
        assert_eq!(fields[2].1, "72");
        assert_eq!(fields[4].1, "female");
        assert_eq!(fields[7].1, "muscle_gain");
    }

    #[test]
    fn test_fractional_weight() {
        let mut form = filled_form();
        form.weight = 72.5;
        let fields = form.validate().unwrap().form_fields();
        assert_eq!(fields[2].1, "72.5");
    }

    #[test]
    fn test_option_parsing() {
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("weight_loss".parse::<Goal>(), Ok(Goal::WeightLoss));
        assert!("".parse::<Goal>().is_err());
        assert!("other".parse::<Gender>().is_err());
    }
}
