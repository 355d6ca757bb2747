//! Field parsing of decrypted identifier text.

use std::num::ParseIntError;

use thiserror::Error;

use common::{AgentIdentifierRecord, Stage};

/// Separator between record fields in the decrypted text.
pub const FIELD_SEPARATOR: char = '_';

/// Number of fields in a well-formed record.
pub const FIELD_COUNT: usize = 4;

/// Errors produced while parsing decrypted text into a record.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Splitting on [`FIELD_SEPARATOR`] did not give [`FIELD_COUNT`] fields.
    #[error("expected {FIELD_COUNT} fields, got {0}")]
    FieldCount(usize),

    /// The first field is not an integer.
    #[error("region id is not an integer: {source}")]
    RegionId {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl RecordError {
    /// Stage at which this error was raised.
    pub fn stage(&self) -> Stage {
        match self {
            RecordError::FieldCount(_) => Stage::FieldSplit,
            RecordError::RegionId { .. } => Stage::FieldTyping,
        }
    }
}

/// Parse `<region_id>_<region_name>_<account_id>_<bot_id>`.
///
/// Empty fields are allowed. The region id may carry a sign and surrounding
/// whitespace; the other fields are kept verbatim. The full text becomes
/// `unique_identifier`.
pub fn parse_record(decrypted: &str) -> Result<AgentIdentifierRecord, RecordError> {
    let fields: Vec<&str> = decrypted.split(FIELD_SEPARATOR).collect();
    let [region, region_name, account_id, bot_id] = fields[..] else {
        return Err(RecordError::FieldCount(fields.len()));
    };

    let region_id = region
        .trim()
        .parse::<i64>()
        .map_err(|source| RecordError::RegionId {
            value: region.to_owned(),
            source,
        })?;

    Ok(AgentIdentifierRecord {
        region_id,
        region_name: region_name.to_owned(),
        account_id: account_id.to_owned(),
        bot_id: bot_id.to_owned(),
        unique_identifier: decrypted.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_four_fields() {
        let rec = parse_record("5_uswest_acct123_bot456").unwrap();
        assert_eq!(rec.region_id, 5);
        assert_eq!(rec.region_name, "uswest");
        assert_eq!(rec.account_id, "acct123");
        assert_eq!(rec.bot_id, "bot456");
        assert_eq!(rec.unique_identifier, "5_uswest_acct123_bot456");
    }

    #[test]
    fn hyphens_stay_inside_fields() {
        let rec = parse_record("2_cm-pg-us-2_239_324").unwrap();
        assert_eq!(rec.region_name, "cm-pg-us-2");
    }

    #[test]
    fn rejects_three_and_five_fields() {
        let err = parse_record("5_us_east").unwrap_err();
        assert!(matches!(err, RecordError::FieldCount(3)));
        assert_eq!(err.stage(), Stage::FieldSplit);

        assert!(matches!(
            parse_record("5_us_east_acct_bot"),
            Err(RecordError::FieldCount(5))
        ));
        assert!(matches!(parse_record("5"), Err(RecordError::FieldCount(1))));
        assert!(matches!(parse_record(""), Err(RecordError::FieldCount(1))));
    }

    #[test]
    fn rejects_non_numeric_region() {
        let err = parse_record("abc_us_acct_bot").unwrap_err();
        assert!(matches!(err, RecordError::RegionId { ref value, .. } if value == "abc"));
        assert_eq!(err.stage(), Stage::FieldTyping);

        assert!(parse_record("_us_acct_bot").is_err());
        assert!(parse_record("99999999999999999999_us_acct_bot").is_err());
    }

    #[test]
    fn region_id_is_limited_to_ascii_i64() {
        assert_eq!(
            parse_record("9223372036854775807_x_y_z").unwrap().region_id,
            i64::MAX
        );
        assert!(matches!(
            parse_record("9223372036854775808_x_y_z"),
            Err(RecordError::RegionId { .. })
        ));
        // Arabic-Indic five.
        assert!(matches!(
            parse_record("\u{0665}_x_y_z"),
            Err(RecordError::RegionId { .. })
        ));
    }

    #[test]
    fn region_id_tolerates_sign_and_whitespace() {
        assert_eq!(parse_record("-3_x_y_z").unwrap().region_id, -3);
        assert_eq!(parse_record("+7_x_y_z").unwrap().region_id, 7);
        let rec = parse_record(" 42 _x_y_z").unwrap();
        assert_eq!(rec.region_id, 42);
        assert_eq!(rec.unique_identifier, " 42 _x_y_z");
    }

    #[test]
    fn empty_fields_are_kept() {
        let rec = parse_record("1___").unwrap();
        assert_eq!(rec.region_name, "");
        assert_eq!(rec.account_id, "");
        assert_eq!(rec.bot_id, "");
    }
}
