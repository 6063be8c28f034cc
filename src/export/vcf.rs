//! vCard 3.0 rendering.
//!
//! Every record becomes one `BEGIN:VCARD`/`END:VCARD` block, emitted in
//! collection order with CRLF line endings per the vCard convention. Photos
//! are embedded as base64 `PHOTO` fields; a `data:...;base64,` prefix is
//! stripped so the payload alone is emitted.

use crate::models::ContactRecord;
use std::fmt::Write;

/// Attribution note appended to every card.
const ATTRIBUTION_NOTE: &str = "Collected via SILA TECH VCF Collector";

/// Line terminator mandated by the vCard format.
const CRLF: &str = "\r\n";

/// Render the full collection as one vCard 3.0 document.
///
/// `branding_prefix`, when present, is prepended to every formatted name,
/// separated by a single space.
pub fn render_vcf(records: &[ContactRecord], branding_prefix: Option<&str>) -> String {
    let mut out = String::new();
    for record in records {
        render_card(&mut out, record, branding_prefix);
    }
    out
}

fn render_card(out: &mut String, record: &ContactRecord, branding_prefix: Option<&str>) {
    let _ = write!(out, "BEGIN:VCARD{CRLF}");
    let _ = write!(out, "VERSION:3.0{CRLF}");

    match branding_prefix {
        Some(prefix) => {
            let _ = write!(out, "FN:{} {}{CRLF}", prefix, record.name);
        }
        None => {
            let _ = write!(out, "FN:{}{CRLF}", record.name);
        }
    }

    let _ = write!(out, "TEL:{}{CRLF}", record.phone);

    if record.has_photo() {
        let _ = write!(
            out,
            "PHOTO;ENCODING=b;TYPE=JPEG:{}{CRLF}",
            photo_payload(&record.photo)
        );
    }

    let _ = write!(out, "NOTE:{ATTRIBUTION_NOTE}{CRLF}");
    let _ = write!(out, "END:VCARD{CRLF}");
}

/// Strip a data-URL style `...base64,` prefix, keeping the remainder.
///
/// Values without the marker are used unmodified.
fn photo_payload(photo: &str) -> &str {
    match photo.split_once("base64,") {
        Some((_, payload)) => payload,
        None => photo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactName, PhoneNumber};

    fn record(name: &str, phone: &str, photo: Option<&str>) -> ContactRecord {
        ContactRecord::create(
            1,
            ContactName::new(name).unwrap(),
            PhoneNumber::new(phone).unwrap(),
            photo.map(str::to_string),
            "Unknown".to_string(),
        )
    }

    #[test]
    fn test_one_card_per_record_in_order() {
        let records = vec![
            record("Asha", "0712345678", None),
            record("Ben", "555-0001", None),
        ];
        let vcf = render_vcf(&records, None);

        assert_eq!(vcf.matches("BEGIN:VCARD").count(), 2);
        assert_eq!(vcf.matches("END:VCARD").count(), 2);
        assert!(vcf.find("FN:Asha").unwrap() < vcf.find("FN:Ben").unwrap());
    }

    #[test]
    fn test_card_fields() {
        let vcf = render_vcf(&[record("Asha", "+255 712 345 678", None)], None);
        assert!(vcf.contains("VERSION:3.0\r\n"));
        assert!(vcf.contains("FN:Asha\r\n"));
        // Phone is emitted verbatim, formatting included
        assert!(vcf.contains("TEL:+255 712 345 678\r\n"));
        assert!(vcf.contains("NOTE:Collected via SILA TECH VCF Collector\r\n"));
        assert!(!vcf.contains("PHOTO"));
    }

    #[test]
    fn test_branding_prefix() {
        let vcf = render_vcf(&[record("Asha", "0712345678", None)], Some("SILA TECH"));
        assert!(vcf.contains("FN:SILA TECH Asha\r\n"));
    }

    #[test]
    fn test_photo_data_url_prefix_stripped() {
        let vcf = render_vcf(
            &[record(
                "Asha",
                "0712345678",
                Some("data:image/jpeg;base64,/9j/AAAA"),
            )],
            None,
        );
        assert!(vcf.contains("PHOTO;ENCODING=b;TYPE=JPEG:/9j/AAAA\r\n"));
    }

    #[test]
    fn test_bare_base64_photo_kept_as_is() {
        let vcf = render_vcf(&[record("Asha", "0712345678", Some("/9j/AAAA"))], None);
        assert!(vcf.contains("PHOTO;ENCODING=b;TYPE=JPEG:/9j/AAAA\r\n"));
    }

    #[test]
    fn test_empty_collection_renders_empty() {
        assert_eq!(render_vcf(&[], None), "");
    }
}
