//! Client-side validation of the onboarding form.

use std::collections::BTreeMap;

use secrecy::SecretString;

use super::model::{Field, OnboardingForm, ValidatedRegistration};

/// Field name → human-readable error.
pub type FieldErrors = BTreeMap<Field, String>;

/// Validate a single field. Runs on blur and on change.
pub fn validate_field(field: Field, form: &OnboardingForm) -> Option<String> {
    match field {
        Field::Username => required(&form.username, "Username is required"),
        Field::Password => required(&form.password, "Password is required"),
        Field::Age => parse_age(&form.age).err(),
        Field::FitnessGoals => required(&form.fitness_goals, "Fitness goals are required"),
    }
}

/// Validate the whole record. Runs on submit.
pub fn validate(form: &OnboardingForm) -> Result<ValidatedRegistration, FieldErrors> {
    let errors: FieldErrors = Field::ALL
        .into_iter()
        .filter_map(|field| validate_field(field, form).map(|msg| (field, msg)))
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    let age = parse_age(&form.age).map_err(|msg| FieldErrors::from([(Field::Age, msg)]))?;

    Ok(ValidatedRegistration {
        username: form.username.trim().to_string(),
        password: SecretString::from(form.password.clone()),
        age,
        fitness_goals: form.fitness_goals.trim().to_string(),
    })
}

fn required(value: &str, message: &str) -> Option<String> {
    value.trim().is_empty().then(|| message.to_string())
}

/// Age must be a positive whole number.
fn parse_age(raw: &str) -> Result<u32, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Age is required".to_string());
    }
    let value: f64 = raw
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| "Age must be a number".to_string())?;
    if value <= 0.0 {
        return Err("Age must be a positive number".to_string());
    }
    if value.fract() != 0.0 {
        return Err("Age must be an integer".to_string());
    }
    if value > f64::from(u32::MAX) {
        return Err("Age is out of range".to_string());
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn form(username: &str, password: &str, age: &str, goals: &str) -> OnboardingForm {
        OnboardingForm {
            username: username.into(),
            password: password.into(),
            age: age.into(),
            fitness_goals: goals.into(),
        }
    }

    #[test]
    fn all_empty_reports_each_required_message() {
        let errors = validate(&OnboardingForm::default()).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[&Field::Username], "Username is required");
        assert_eq!(errors[&Field::Password], "Password is required");
        assert_eq!(errors[&Field::Age], "Age is required");
        assert_eq!(errors[&Field::FitnessGoals], "Fitness goals are required");
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let errors = validate(&form("  ", "\t", " ", "  ")).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn negative_age_fails() {
        let errors = validate(&form("sam", "pw", "-3", "lift")).unwrap_err();
        assert_eq!(errors[&Field::Age], "Age must be a positive number");
    }

    #[test]
    fn fractional_age_fails() {
        let errors = validate(&form("sam", "pw", "2.5", "lift")).unwrap_err();
        assert_eq!(errors[&Field::Age], "Age must be an integer");
    }

    #[test]
    fn zero_and_garbage_ages_fail() {
        assert_eq!(
            validate_field(Field::Age, &form("", "", "0", "")),
            Some("Age must be a positive number".into())
        );
        assert_eq!(
            validate_field(Field::Age, &form("", "", "abc", "")),
            Some("Age must be a number".into())
        );
        assert_eq!(
            validate_field(Field::Age, &form("", "", "NaN", "")),
            Some("Age must be a number".into())
        );
        assert_eq!(
            validate_field(Field::Age, &form("", "", "99999999999", "")),
            Some("Age is out of range".into())
        );
    }

    #[test]
    fn valid_form_produces_typed_record() {
        let record = validate(&form(" sam ", "hunter2", " 30 ", "Run 5k ")).unwrap();
        assert_eq!(record.username, "sam");
        assert_eq!(record.password.expose_secret(), "hunter2");
        assert_eq!(record.age, 30);
        assert_eq!(record.fitness_goals, "Run 5k");
    }

    #[test]
    fn password_is_not_trimmed() {
        let record = validate(&form("sam", " pw ", "30", "lift")).unwrap();
        assert_eq!(record.password.expose_secret(), " pw ");
    }

    #[test]
    fn single_field_check_ignores_others() {
        let f = form("sam", "", "", "");
        assert_eq!(validate_field(Field::Username, &f), None);
        assert!(validate_field(Field::Password, &f).is_some());
    }
}
