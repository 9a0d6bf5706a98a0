//! PDF Policy Renderer - one-page insurance certificate.
//!
//! Draws the confirmed holder and vehicle data onto a single A4 page.
//! Unrecognized fields render as omitted lines, same as in the summaries.

use async_trait::async_trait;
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::domain::documents::{PassportFields, VehicleFields};
use crate::ports::{DocumentRenderer, RenderError};

const TITLE: &str = "Car Insurance Certificate";
const TITLE_SIZE: i64 = 18;
const BODY_SIZE: i64 = 12;
const LEFT_MARGIN: i64 = 40;
const PAGE_TOP: i64 = 800;
const LINE_HEIGHT: i64 = 20;

/// Renders the policy as a single-page PDF.
#[derive(Debug, Clone)]
pub struct PdfPolicyRenderer {
    price_usd: u32,
}

impl PdfPolicyRenderer {
    pub fn new(price_usd: u32) -> Self {
        Self { price_usd }
    }

    fn body_lines(&self, passport: &PassportFields, vehicle: &VehicleFields) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(name) = passport.full_name() {
            lines.push(format!("Name: {}", name));
        }
        if let Some(record_no) = passport.record_no.text() {
            lines.push(format!("Passport #: {}", record_no));
        }
        if let Some(description) = vehicle.description() {
            lines.push(format!("Vehicle: {}", description));
        }
        if let Some(reg_number) = vehicle.registration_number.text() {
            lines.push(format!("Reg Number: {}", reg_number));
        }

        lines.push(format!("Issued On: {}", Utc::now().format("%Y-%m-%d")));
        lines.push(format!("Policy Amount: {} USD", self.price_usd));

        lines
    }

    fn build_document(&self, lines: &[String]) -> Result<Vec<u8>, lopdf::Error> {
        let mut doc = Document::with_version("1.5");

        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), TITLE_SIZE.into()]),
            Operation::new("Td", vec![LEFT_MARGIN.into(), PAGE_TOP.into()]),
            Operation::new("Tj", vec![Object::string_literal(TITLE)]),
            Operation::new("ET", vec![]),
        ];

        let mut y = PAGE_TOP - 2 * LINE_HEIGHT;
        for line in lines {
            operations.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), BODY_SIZE.into()]),
                Operation::new("Td", vec![LEFT_MARGIN.into(), y.into()]),
                Operation::new("Tj", vec![Object::string_literal(line.as_str())]),
                Operation::new("ET", vec![]),
            ]);
            y -= LINE_HEIGHT;
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

#[async_trait]
impl DocumentRenderer for PdfPolicyRenderer {
    async fn render_policy(
        &self,
        passport: &PassportFields,
        vehicle: &VehicleFields,
    ) -> Result<Vec<u8>, RenderError> {
        let lines = self.body_lines(passport, vehicle);
        self.build_document(&lines)
            .map_err(|e| RenderError::Failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::documents::FieldValue;

    fn passport() -> PassportFields {
        PassportFields {
            surname: "Shevchenko".into(),
            name: "Taras".into(),
            record_no: "123456".into(),
            ..Default::default()
        }
    }

    fn vehicle() -> VehicleFields {
        VehicleFields {
            registration_number: "AA1234BB".into(),
            make: "Toyota".into(),
            vehicle_type: "Sedan".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn renders_a_pdf_document() {
        let renderer = PdfPolicyRenderer::new(100);
        let bytes = renderer.render_policy(&passport(), &vehicle()).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn all_empty_records_still_render() {
        let renderer = PdfPolicyRenderer::new(100);
        let bytes = renderer
            .render_policy(&PassportFields::default(), &VehicleFields::default())
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn body_lines_omit_unrecognized_fields() {
        let renderer = PdfPolicyRenderer::new(100);
        let mut passport = passport();
        passport.record_no = FieldValue::empty();

        let lines = renderer.body_lines(&passport, &vehicle());

        assert!(lines.iter().any(|l| l.starts_with("Name: ")));
        assert!(!lines.iter().any(|l| l.starts_with("Passport #")));
        assert!(lines.iter().any(|l| l == "Policy Amount: 100 USD"));
    }
}
