//! Common test helpers and utilities shared across test suite.

use marcnorm::{Field, Record};

/// Builds a data field from `(code, value)` pairs.
#[allow(dead_code)]
pub fn make_field(tag: &str, ind1: char, ind2: char, subfields: &[(char, &str)]) -> Field {
    let mut field = Field::new(tag, ind1, ind2);
    for (code, value) in subfields {
        field.add_subfield(*code, value);
    }
    field
}

/// Creates a record with Hebrew and Arabic alternate-script fields.
///
/// - 100 linked to 880 occurrence 01 (Arabic, right to left)
/// - 245 linked to 880 occurrence 02 (Hebrew, right to left)
/// - 650 twice with no linkage, one a duplicate
/// - 880 occurrence 03 pointing at a 245 that does not exist (orphan)
#[allow(dead_code)]
pub fn create_linked_record() -> Record {
    Record::builder()
        .id("b10001936")
        .control_field("001", "10001936")
        .control_field("008", "850101s1985    is            000 0 heb d")
        .field(make_field(
            "100",
            '1',
            ' ',
            &[('6', "880-01"), ('a', "Ibn Rushd,"), ('d', "1126-1198.")],
        ))
        .field(make_field(
            "245",
            '1',
            '0',
            &[
                ('6', "880-02"),
                ('a', "Sefer ha-ḥayim :"),
                ('b', "meḥkarim /"),
                ('c', "ʻorekh"),
            ],
        ))
        .field(make_field("650", ' ', '0', &[('a', "Philosophy"), ('x', "History.")]))
        .field(make_field("650", ' ', '0', &[('a', "Philosophy"), ('x', "History.")]))
        .field(make_field(
            "880",
            '1',
            ' ',
            &[('6', "100-01/(3/r"), ('a', "ابن رشد،"), ('d', "1126-1198.")],
        ))
        .field(make_field(
            "880",
            '1',
            '0',
            &[('6', "245-02/(2/r"), ('a', "ספר החיים :"), ('b', "מחקרים /")],
        ))
        .field(make_field(
            "880",
            '1',
            '0',
            &[('6', "245-03/(2/r"), ('a', "כותר נוסף")],
        ))
        .build()
}
