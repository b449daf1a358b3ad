/// Normalize free-form spreadsheet text for header and code matching:
/// trim, lowercase, fold French diacritics, treat `_`/`-` as spaces, and
/// collapse runs of whitespace. Placeholder "nan" cells become empty.
pub(crate) fn normalize_text(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("nan") {
        return String::new();
    }

    let mut folded = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        match fold_char(ch) {
            Fold::Char(c) => folded.push(c),
            Fold::Str(s) => folded.push_str(s),
            Fold::Skip => {}
        }
    }

    folded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

enum Fold {
    Char(char),
    Str(&'static str),
    Skip,
}

fn fold_char(ch: char) -> Fold {
    let lower = ch.to_ascii_lowercase();
    match lower {
        'à' | 'â' | 'ä' => Fold::Char('a'),
        'ç' => Fold::Char('c'),
        'é' | 'è' | 'ê' | 'ë' => Fold::Char('e'),
        'î' | 'ï' => Fold::Char('i'),
        'ô' | 'ö' => Fold::Char('o'),
        'ù' | 'û' | 'ü' => Fold::Char('u'),
        'œ' => Fold::Str("oe"),
        '’' => Fold::Char('\''),
        '_' | '-' => Fold::Char(' '),
        '\u{feff}' | '\u{200b}' => Fold::Skip,
        c if c.is_uppercase() => {
            // Non-ASCII uppercase accents fall through their lowercase form.
            match c.to_lowercase().next() {
                Some(folded) => match fold_char(folded) {
                    Fold::Char(f) => Fold::Char(f),
                    other => other,
                },
                None => Fold::Skip,
            }
        }
        c => Fold::Char(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accents_and_separators() {
        assert_eq!(normalize_text("  Échéances_Stratégiques "), "echeances strategiques");
        assert_eq!(normalize_text("Maîtrise-des-coûts"), "maitrise des couts");
        assert_eq!(normalize_text("cœur   métier"), "coeur metier");
    }

    #[test]
    fn nan_cells_become_empty() {
        assert_eq!(normalize_text("NaN"), "");
        assert_eq!(normalize_text("nan"), "");
    }

    #[test]
    fn strips_zero_width_marks() {
        assert_eq!(normalize_text("\u{feff}titre"), "titre");
    }
}
