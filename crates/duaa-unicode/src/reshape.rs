// this_file: crates/duaa-unicode/src/reshape.rs

//! Arabic contextual joining into presentation forms

use ar_reshaper::{ArabicReshaper, ReshaperConfig};

fn reshaper() -> ArabicReshaper {
    ArabicReshaper::new(ReshaperConfig {
        delete_harakat: false,
        support_ligatures: true,
        ..ReshaperConfig::default()
    })
}

/// Replace each letter by its isolated, final, initial or medial form and
/// apply the Arabic ligatures (lam-alef and friends).
///
/// Works on logical order. Harakat are kept in place after their base letter
/// and are skipped when deciding whether neighbours connect.
pub fn reshape(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    reshaper().reshape(text)
}
