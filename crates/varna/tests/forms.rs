//! Cross-module checks: the three normal forms and entity segmentation over
//! realistic roll names.

use naamkhoj_varna::{norm_exact, norm_loose, norm_strict, segment, strip_marks};

/// (raw OCR text, expected strict form)
const STRICT_CASES: &[(&str, &str)] = &[
    ("  राम   कुमार ", "राम कुमार"),
    ("सीता / देवी", "सीता देवी"),
    ("श्री. मोहन-लाल", "श्री मोहन लाल"),
    ("राम।", "राम"),
    ("", ""),
];

/// Pairs a searcher would expect to land on the same exact-form keys.
const EXACT_EQUAL_PAIRS: &[(&str, &str)] = &[
    ("राम", "रामं"),
    ("किशन", "कीशन"),
    ("सुरेश", "सूरेश"),
    ("जमुना", "जमूना"),
];

/// Pairs that only the loose form brings together.
const LOOSE_EQUAL_PAIRS: &[(&str, &str)] = &[
    ("बाला", "वाला"),
    ("धनराज", "घनराज"),
    ("हरि", "दरि"),
];

#[test]
fn strict_form_gold() {
    for (raw, expected) in STRICT_CASES {
        assert_eq!(norm_strict(raw), *expected, "strict({raw:?})");
    }
}

#[test]
fn exact_form_folds_variant_spellings_together() {
    for (a, b) in EXACT_EQUAL_PAIRS {
        assert_eq!(norm_exact(a), norm_exact(b), "exact({a}) vs exact({b})");
        assert_ne!(norm_strict(a), norm_strict(b), "pairs differ strictly");
    }
}

#[test]
fn loose_form_folds_visual_confusions_together() {
    for (a, b) in LOOSE_EQUAL_PAIRS {
        assert_eq!(norm_loose(a), norm_loose(b), "loose({a}) vs loose({b})");
        assert_ne!(norm_exact(a), norm_exact(b), "pairs differ exactly");
    }
}

#[test]
fn segmentation_reassembles_stripped_names() {
    for name in [
        "राम कुमार",
        "ईसिडोर तिर्की",
        "श्यामलाल",
        "रविशंकर",
        "कृष्णा",
    ] {
        for word in name.split_whitespace() {
            let stripped = strip_marks(word);
            assert_eq!(segment(&stripped).concat(), stripped, "totality for {word}");
        }
    }
}
