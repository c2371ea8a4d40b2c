use super::*;

fn request() -> EstimateRequest {
    EstimateRequest {
        project_name: "Lakeview Residency".into(),
        location: "Pune".into(),
        floor_area_sq_m: 120,
        floors: 2,
        material: MaterialGrade::Standard,
    }
}

// =========================================================================
// parse_estimate
// =========================================================================

#[test]
fn parser_takes_last_digit_run() {
    assert_eq!(parse_estimate("The cost is about 12000 to 15000"), Some(15_000));
}

#[test]
fn parser_bare_integer() {
    assert_eq!(parse_estimate("4800000"), Some(4_800_000));
}

#[test]
fn parser_number_with_trailing_text() {
    assert_eq!(parse_estimate("Approximately 2500000 rupees."), Some(2_500_000));
}

#[test]
fn parser_no_digits() {
    assert_eq!(parse_estimate("I cannot determine this."), None);
}

#[test]
fn parser_empty_string() {
    assert_eq!(parse_estimate(""), None);
}

#[test]
fn parser_grouped_digits_use_final_run() {
    // Separators split the number into runs; the last run wins by contract.
    assert_eq!(parse_estimate("1,200,000"), Some(0));
}

#[test]
fn parser_leading_zeros() {
    assert_eq!(parse_estimate("cost: 0074800000"), Some(74_800_000));
}

#[test]
fn parser_overflowing_run_is_no_value() {
    assert_eq!(parse_estimate("99999999999999999999999"), None);
}

#[test]
fn parser_digits_at_end_of_text() {
    assert_eq!(parse_estimate("final answer 31415"), Some(31_415));
}

// =========================================================================
// build_prompt
// =========================================================================

#[test]
fn prompt_names_every_parameter() {
    let prompt = build_prompt(&request());
    assert!(prompt.contains("Project Name: Lakeview Residency"));
    assert!(prompt.contains("Location: Pune"));
    assert!(prompt.contains("Area (in sq m): 120"));
    assert!(prompt.contains("Number of Floors: 2"));
    assert!(prompt.contains("Material Type: Standard"));
}

#[test]
fn prompt_demands_bare_integer_reply() {
    let prompt = build_prompt(&request());
    assert!(prompt.contains("Return ONLY a single numeric estimated price value."));
}

// =========================================================================
// MaterialGrade
// =========================================================================

#[test]
fn material_grade_round_trip() {
    for grade in [MaterialGrade::Standard, MaterialGrade::Premium, MaterialGrade::Luxury] {
        assert_eq!(MaterialGrade::from_str(grade.as_str()), Some(grade));
    }
}

#[test]
fn material_grade_rejects_unknown() {
    assert_eq!(MaterialGrade::from_str("Deluxe"), None);
    assert_eq!(MaterialGrade::from_str("standard"), None);
}

// =========================================================================
// format_inr
// =========================================================================

#[test]
fn inr_lakh_grouping() {
    assert_eq!(format_inr(4_800_000), "₹48,00,000");
}

#[test]
fn inr_small_amounts_ungrouped() {
    assert_eq!(format_inr(0), "₹0");
    assert_eq!(format_inr(123), "₹123");
}

#[test]
fn inr_four_digits() {
    assert_eq!(format_inr(1_234), "₹1,234");
}

#[test]
fn inr_crore_grouping() {
    assert_eq!(format_inr(123_456_789), "₹12,34,56,789");
}

#[test]
fn inr_negative() {
    assert_eq!(format_inr(-5_000), "-₹5,000");
}
