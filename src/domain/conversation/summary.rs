//! Response Composer - human-readable summaries of extracted data.
//!
//! Only attributes with a recognized value are rendered; empty fields are
//! omitted rather than shown blank. Section headers always render, even for
//! an all-empty record.

use crate::domain::documents::{PassportFields, VehicleFields};

const CONFIRM_QUESTION: &str = "Is this correct?";
const COMBINED_CONFIRM_QUESTION: &str = "Do you confirm?";

/// Builds the passport confirmation summary.
pub fn passport_summary(passport: &PassportFields) -> String {
    let mut out = String::from("Here's what I found\n");
    out.push_str(&passport_section(passport));
    out.push('\n');
    out.push_str(CONFIRM_QUESTION);
    out
}

/// Builds the vehicle confirmation summary.
pub fn vehicle_summary(vehicle: &VehicleFields) -> String {
    let mut out = String::from("Here's what I found\n");
    out.push_str(&vehicle_section(vehicle));
    out.push('\n');
    out.push_str(CONFIRM_QUESTION);
    out
}

/// Builds the combined summary shown before the price confirmation.
pub fn combined_summary(passport: &PassportFields, vehicle: &VehicleFields) -> String {
    let mut out = String::from("Here's what I found\n");
    out.push_str(&passport_section(passport));
    out.push('\n');
    out.push_str(&vehicle_section(vehicle));
    out.push('\n');
    out.push_str(COMBINED_CONFIRM_QUESTION);
    out
}

fn passport_section(passport: &PassportFields) -> String {
    let mut section = String::from("📄 Passport Information:\n");

    if let Some(full_name) = passport.full_name() {
        push_line(&mut section, "👤 Full Name", &full_name);
    }
    push_field(&mut section, "🆔 Record No", passport.record_no.text());
    push_field(&mut section, "👫 Sex", passport.sex.text());
    push_field(&mut section, "🎂 Date of Birth", passport.date_of_birth.text());
    push_field(&mut section, "📅 Expires On", passport.date_of_expiry.text());
    push_field(&mut section, "🌍 Nationality", passport.nationality.text());

    section
}

fn vehicle_section(vehicle: &VehicleFields) -> String {
    let mut section = String::from("🚗 Vehicle Information:\n");

    push_field(
        &mut section,
        "🔢 Reg Number",
        vehicle.registration_number.text(),
    );
    push_field(
        &mut section,
        "📅 First Registration",
        vehicle.date_of_first_registration.text(),
    );
    push_field(
        &mut section,
        "📅 Ukraine Registration",
        vehicle.date_of_first_registration_in_ukraine.text(),
    );
    if let Some(description) = vehicle.description() {
        push_line(&mut section, "🏷️ Make & Model", &description);
    }
    push_field(&mut section, "🎨 Color", vehicle.color_of_vehicle.text());

    section
}

fn push_field(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        push_line(out, label, value);
    }
}

fn push_line(out: &mut String, label: &str, value: &str) {
    out.push_str(label);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::documents::FieldValue;

    fn full_passport() -> PassportFields {
        PassportFields {
            record_no: "123456".into(),
            surname: "Shevchenko".into(),
            name: "Taras".into(),
            patronymic: "Hryhorovych".into(),
            sex: "M".into(),
            date_of_birth: "1990-03-09".into(),
            date_of_expiry: "2030-03-09".into(),
            nationality: "Ukraine".into(),
        }
    }

    fn full_vehicle() -> VehicleFields {
        VehicleFields {
            registration_number: "AA1234BB".into(),
            date_of_first_registration: "2015-06-01".into(),
            date_of_first_registration_in_ukraine: "2016-01-15".into(),
            make: "Toyota".into(),
            vehicle_type: "Sedan".into(),
            commercial_description: "Corolla".into(),
            color_of_vehicle: "Grey".into(),
        }
    }

    #[test]
    fn passport_summary_includes_recognized_fields() {
        let summary = passport_summary(&full_passport());
        assert!(summary.contains("👤 Full Name: Shevchenko Taras Hryhorovych"));
        assert!(summary.contains("🆔 Record No: 123456"));
        assert!(summary.contains("🌍 Nationality: Ukraine"));
        assert!(summary.ends_with("Is this correct?"));
    }

    #[test]
    fn passport_summary_omits_empty_fields() {
        let passport = PassportFields {
            surname: "Shevchenko".into(),
            name: "Taras".into(),
            record_no: FieldValue::empty(),
            ..Default::default()
        };
        let summary = passport_summary(&passport);
        assert!(!summary.contains("Record No"));
        assert!(!summary.contains("Nationality"));
        assert!(summary.contains("👤 Full Name: Shevchenko Taras"));
    }

    #[test]
    fn all_empty_record_still_renders_headers() {
        let summary = passport_summary(&PassportFields::default());
        assert!(summary.contains("📄 Passport Information:"));
        assert!(summary.ends_with("Is this correct?"));

        let summary = vehicle_summary(&VehicleFields::default());
        assert!(summary.contains("🚗 Vehicle Information:"));
    }

    #[test]
    fn combined_summary_has_both_sections_and_confirm_question() {
        let summary = combined_summary(&full_passport(), &full_vehicle());
        assert!(summary.contains("📄 Passport Information:"));
        assert!(summary.contains("🚗 Vehicle Information:"));
        assert!(summary.contains("🏷️ Make & Model: Toyota Sedan Corolla"));
        assert!(summary.ends_with("Do you confirm?"));
    }

    #[test]
    fn vehicle_summary_omits_unrecognized_color() {
        let vehicle = VehicleFields {
            registration_number: "AA1234BB".into(),
            color_of_vehicle: FieldValue::new("  "),
            ..Default::default()
        };
        let summary = vehicle_summary(&vehicle);
        assert!(summary.contains("🔢 Reg Number: AA1234BB"));
        assert!(!summary.contains("🎨 Color"));
    }
}
