//! Onboarding questionnaire models.
//!
//! Six questions, asked in a fixed order. The first is free text; the rest
//! take one value from a fixed option list.

use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, require_text};

/// A selectable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    /// Stored value.
    pub value: &'static str,
    /// Label shown to the user.
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> AnswerOption {
    AnswerOption { value, label }
}

const BUSINESS_TYPES: &[AnswerOption] = &[
    opt("services", "Vendo servicios"),
    opt("products", "Vendo productos"),
];

const AD_SPEND: &[AnswerOption] = &[
    opt("0-300", "0 – 300 USD"),
    opt("300-1000", "300 – 1,000 USD"),
    opt("1000-2500", "1,000 – 2,500 USD"),
    opt("2500+", "Más de 2,500 USD"),
];

const INDUSTRIES: &[AnswerOption] = &[
    opt("direct-sales", "🤝 Venta Directa y Multinivel"),
    opt("finance", "💰 Finanzas y Seguros"),
    opt("marketing", "📢 Marketing y Publicidad"),
    opt("real-estate", "🏡 Bienes Inmuebles"),
    opt("electronics", "📱 Electrónica"),
    opt("startups", "🚀 Emprendimientos"),
    opt("logistics", "🚚 Logística"),
    opt("commerce", "🛒 Comercio"),
    opt("education", "🎓 Educación"),
    opt("consulting", "🧑‍💼 Consultoría"),
    opt("health", "💊 Salud"),
    opt("tech", "💻 Tecnología"),
    opt("fashion", "👗 Moda"),
    opt("hospitality", "🏨 Turismo y Hospitalidad"),
];

const TEAM_SIZES: &[AnswerOption] = &[
    opt("1-2", "1 – 2 personas"),
    opt("3-5", "3 – 5 personas"),
    opt("6-10", "6 – 10 personas"),
    opt("11-25", "11 – 25 personas"),
    opt("25+", "25+ personas"),
];

const PROBLEMS: &[AnswerOption] = &[
    opt("inventory", "Tener mi inventario en WhatsApp y generar pedidos"),
    opt("integration", "Conectar mi WhatsApp con otros sistemas (CRM, ERP)"),
    opt("team", "Conectar a mi equipo a un solo número de WhatsApp"),
    opt("automation", "Automatizar mi negocio con IA"),
];

/// One onboarding question, in step order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnboardingField {
    BusinessName,
    BusinessType,
    MonthlyAdSpend,
    Industry,
    TeamSize,
    MainProblem,
}

impl OnboardingField {
    /// All fields, indexed by step.
    pub const STEPS: [Self; 6] = [
        Self::BusinessName,
        Self::BusinessType,
        Self::MonthlyAdSpend,
        Self::Industry,
        Self::TeamSize,
        Self::MainProblem,
    ];

    /// The field bound to a step index.
    #[must_use]
    pub fn for_step(step: usize) -> Option<Self> {
        Self::STEPS.get(step).copied()
    }

    /// JSON key of the field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::BusinessName => "businessName",
            Self::BusinessType => "businessType",
            Self::MonthlyAdSpend => "monthlyAdSpend",
            Self::Industry => "industry",
            Self::TeamSize => "teamSize",
            Self::MainProblem => "mainProblem",
        }
    }

    /// Question shown for this step.
    #[must_use]
    pub const fn question(self) -> &'static str {
        match self {
            Self::BusinessName => "¿Cuál es el nombre de tu negocio?",
            Self::BusinessType => "¿Qué vendes?",
            Self::MonthlyAdSpend => "¿Cuánto inviertes al mes en publicidad (Meta, Google, TikTok)?",
            Self::Industry => "¿A qué industria pertenece tu empresa?",
            Self::TeamSize => "¿Cuántas personas atienden clientes por WhatsApp actualmente?",
            Self::MainProblem => "¿Qué problema deseas resolver con Merchify?",
        }
    }

    /// Allowed values; empty for free-text fields.
    #[must_use]
    pub const fn options(self) -> &'static [AnswerOption] {
        match self {
            Self::BusinessName => &[],
            Self::BusinessType => BUSINESS_TYPES,
            Self::MonthlyAdSpend => AD_SPEND,
            Self::Industry => INDUSTRIES,
            Self::TeamSize => TEAM_SIZES,
            Self::MainProblem => PROBLEMS,
        }
    }

    /// Reject a value that is blank or outside the option list.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] for blank input and
    /// [`ValidationError::UnknownOption`] for an unlisted value.
    pub fn check(self, value: &str) -> Result<(), ValidationError> {
        require_text(self.key(), value)?;
        let options = self.options();
        if !options.is_empty() && !options.iter().any(|o| o.value == value) {
            return Err(ValidationError::UnknownOption {
                field: self.key(),
                value: value.to_owned(),
            });
        }
        Ok(())
    }
}

/// Answers collected so far plus the step the user is on.
///
/// Empty strings mean "not answered yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingAnswers {
    pub business_name: String,
    pub business_type: String,
    pub monthly_ad_spend: String,
    pub industry: String,
    pub team_size: String,
    pub main_problem: String,
    pub current_step: usize,
}

impl OnboardingAnswers {
    /// The stored answer for a field.
    #[must_use]
    pub fn get(&self, field: OnboardingField) -> &str {
        match field {
            OnboardingField::BusinessName => &self.business_name,
            OnboardingField::BusinessType => &self.business_type,
            OnboardingField::MonthlyAdSpend => &self.monthly_ad_spend,
            OnboardingField::Industry => &self.industry,
            OnboardingField::TeamSize => &self.team_size,
            OnboardingField::MainProblem => &self.main_problem,
        }
    }

    /// Validate and store an answer.
    ///
    /// # Errors
    ///
    /// See [`OnboardingField::check`].
    pub fn set(&mut self, field: OnboardingField, value: &str) -> Result<(), ValidationError> {
        field.check(value)?;
        let slot = match field {
            OnboardingField::BusinessName => &mut self.business_name,
            OnboardingField::BusinessType => &mut self.business_type,
            OnboardingField::MonthlyAdSpend => &mut self.monthly_ad_spend,
            OnboardingField::Industry => &mut self.industry,
            OnboardingField::TeamSize => &mut self.team_size,
            OnboardingField::MainProblem => &mut self.main_problem,
        };
        value.clone_into(slot);
        Ok(())
    }

    /// Whether a field has a non-empty answer.
    #[must_use]
    pub fn is_answered(&self, field: OnboardingField) -> bool {
        !self.get(field).trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_cover_every_field_once() {
        for (i, field) in OnboardingField::STEPS.iter().enumerate() {
            assert_eq!(OnboardingField::for_step(i), Some(*field));
        }
        assert_eq!(OnboardingField::for_step(6), None);
    }

    #[test]
    fn test_free_text_accepts_anything_non_blank() {
        let mut answers = OnboardingAnswers::default();
        assert!(answers.set(OnboardingField::BusinessName, "Tienda Sol").is_ok());
        assert_eq!(answers.business_name, "Tienda Sol");
        assert!(answers.set(OnboardingField::BusinessName, "").is_err());
        assert_eq!(answers.business_name, "Tienda Sol");
    }

    #[test]
    fn test_enumerated_field_rejects_unknown_value() {
        let mut answers = OnboardingAnswers::default();
        let err = answers
            .set(OnboardingField::Industry, "mining")
            .expect_err("unknown industry");
        assert!(matches!(err, ValidationError::UnknownOption { field: "industry", .. }));
        assert!(answers.set(OnboardingField::Industry, "fashion").is_ok());
        assert!(answers.is_answered(OnboardingField::Industry));
    }

    #[test]
    fn test_option_counts() {
        assert_eq!(OnboardingField::Industry.options().len(), 14);
        assert_eq!(OnboardingField::TeamSize.options().len(), 5);
        assert!(OnboardingField::BusinessName.options().is_empty());
    }

    #[test]
    fn test_persisted_shape_is_camel_case() {
        let answers = OnboardingAnswers {
            business_type: "products".to_string(),
            current_step: 2,
            ..OnboardingAnswers::default()
        };
        let json = serde_json::to_value(&answers).expect("serialize");
        assert_eq!(json["businessType"], "products");
        assert_eq!(json["currentStep"], 2);

        let partial: OnboardingAnswers =
            serde_json::from_str(r#"{"businessName":"Sol"}"#).expect("deserialize");
        assert_eq!(partial.business_name, "Sol");
        assert_eq!(partial.current_step, 0);
    }
}
