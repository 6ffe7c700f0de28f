// src/bmi.rs
//! Body-mass-index derivation used by the meal service.

/// BMI from imperial height and metric weight, rounded to 1 decimal place.
pub fn calculate_bmi(height_feet: u32, height_inches: u32, weight_kg: f64) -> f64 {
    let total_inches = (height_feet * 12 + height_inches) as f64;
    let height_m = total_inches * 0.0254;
    let bmi = weight_kg / (height_m * height_m);
    (bmi * 10.0).round() / 10.0
}

/// Four-bucket category with thresholds at 18.5 / 25 / 30. Boundary values
/// land in the upper bucket (exactly 18.5 is "Normal weight").
pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal weight"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

/// Suggested daily calorie intake per BMI bucket.
pub fn suggested_calorie_intake(bmi: f64) -> u32 {
    if bmi < 18.5 {
        2500
    } else if bmi < 24.9 {
        2200
    } else if bmi < 29.9 {
        2000
    } else {
        1800
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_is_deterministic() {
        // 5ft7in, 70kg -> 24.2, Normal weight
        let bmi = calculate_bmi(5, 7, 70.0);
        assert_eq!(bmi, 24.2);
        assert_eq!(bmi_category(bmi), "Normal weight");

        // Same height at 95kg lands in Obese
        let bmi = calculate_bmi(5, 7, 95.0);
        assert_eq!(bmi_category(bmi), "Obese");
    }

    #[test]
    fn test_category_boundaries_are_exact() {
        assert_eq!(bmi_category(18.4), "Underweight");
        assert_eq!(bmi_category(18.5), "Normal weight");
        assert_eq!(bmi_category(24.9), "Normal weight");
        assert_eq!(bmi_category(25.0), "Overweight");
        assert_eq!(bmi_category(29.9), "Overweight");
        assert_eq!(bmi_category(30.0), "Obese");
    }

    #[test]
    fn test_suggested_calorie_buckets() {
        assert_eq!(suggested_calorie_intake(17.0), 2500);
        assert_eq!(suggested_calorie_intake(22.0), 2200);
        assert_eq!(suggested_calorie_intake(27.0), 2000);
        assert_eq!(suggested_calorie_intake(33.0), 1800);
    }
}
