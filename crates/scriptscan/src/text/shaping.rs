//! Arabic-letter contextual shaping.
//!
//! Arabic, Persian and Urdu letters change shape depending on whether they
//! join to their neighbours. Renderers without a shaping engine need the
//! presentation-form code points (U+FB50..U+FEFC) substituted up front; this
//! module does that substitution, including the mandatory lam-alef ligatures.
//! Combining marks are transparent: they neither join nor break a join.

use ahash::AHashMap;
use once_cell::sync::Lazy;

/// Presentation forms of one letter.
///
/// Right-joining letters (alef, dal, reh, waw, ...) only have isolated and
/// final forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Forms {
    isolated: char,
    final_: char,
    initial: Option<char>,
    medial: Option<char>,
}

impl Forms {
    const fn dual(isolated: u32, final_: u32, initial: u32, medial: u32) -> (u32, u32, Option<u32>, Option<u32>) {
        (isolated, final_, Some(initial), Some(medial))
    }

    const fn right(isolated: u32, final_: u32) -> (u32, u32, Option<u32>, Option<u32>) {
        (isolated, final_, None, None)
    }

    fn joins_next(&self) -> bool {
        self.initial.is_some()
    }
}

const TATWEEL: char = '\u{0640}';
const ZWJ: char = '\u{200D}';
const LAM: char = '\u{0644}';

/// (letter, isolated, final, initial, medial)
const LETTERS: &[(u32, (u32, u32, Option<u32>, Option<u32>))] = &[
    (0x0622, Forms::right(0xFE81, 0xFE82)),
    (0x0623, Forms::right(0xFE83, 0xFE84)),
    (0x0624, Forms::right(0xFE85, 0xFE86)),
    (0x0625, Forms::right(0xFE87, 0xFE88)),
    (0x0626, Forms::dual(0xFE89, 0xFE8A, 0xFE8B, 0xFE8C)),
    (0x0627, Forms::right(0xFE8D, 0xFE8E)),
    (0x0628, Forms::dual(0xFE8F, 0xFE90, 0xFE91, 0xFE92)),
    (0x0629, Forms::right(0xFE93, 0xFE94)),
    (0x062A, Forms::dual(0xFE95, 0xFE96, 0xFE97, 0xFE98)),
    (0x062B, Forms::dual(0xFE99, 0xFE9A, 0xFE9B, 0xFE9C)),
    (0x062C, Forms::dual(0xFE9D, 0xFE9E, 0xFE9F, 0xFEA0)),
    (0x062D, Forms::dual(0xFEA1, 0xFEA2, 0xFEA3, 0xFEA4)),
    (0x062E, Forms::dual(0xFEA5, 0xFEA6, 0xFEA7, 0xFEA8)),
    (0x062F, Forms::right(0xFEA9, 0xFEAA)),
    (0x0630, Forms::right(0xFEAB, 0xFEAC)),
    (0x0631, Forms::right(0xFEAD, 0xFEAE)),
    (0x0632, Forms::right(0xFEAF, 0xFEB0)),
    (0x0633, Forms::dual(0xFEB1, 0xFEB2, 0xFEB3, 0xFEB4)),
    (0x0634, Forms::dual(0xFEB5, 0xFEB6, 0xFEB7, 0xFEB8)),
    (0x0635, Forms::dual(0xFEB9, 0xFEBA, 0xFEBB, 0xFEBC)),
    (0x0636, Forms::dual(0xFEBD, 0xFEBE, 0xFEBF, 0xFEC0)),
    (0x0637, Forms::dual(0xFEC1, 0xFEC2, 0xFEC3, 0xFEC4)),
    (0x0638, Forms::dual(0xFEC5, 0xFEC6, 0xFEC7, 0xFEC8)),
    (0x0639, Forms::dual(0xFEC9, 0xFECA, 0xFECB, 0xFECC)),
    (0x063A, Forms::dual(0xFECD, 0xFECE, 0xFECF, 0xFED0)),
    (0x0641, Forms::dual(0xFED1, 0xFED2, 0xFED3, 0xFED4)),
    (0x0642, Forms::dual(0xFED5, 0xFED6, 0xFED7, 0xFED8)),
    (0x0643, Forms::dual(0xFED9, 0xFEDA, 0xFEDB, 0xFEDC)),
    (0x0644, Forms::dual(0xFEDD, 0xFEDE, 0xFEDF, 0xFEE0)),
    (0x0645, Forms::dual(0xFEE1, 0xFEE2, 0xFEE3, 0xFEE4)),
    (0x0646, Forms::dual(0xFEE5, 0xFEE6, 0xFEE7, 0xFEE8)),
    (0x0647, Forms::dual(0xFEE9, 0xFEEA, 0xFEEB, 0xFEEC)),
    (0x0648, Forms::right(0xFEED, 0xFEEE)),
    (0x0649, Forms::right(0xFEEF, 0xFEF0)),
    (0x064A, Forms::dual(0xFEF1, 0xFEF2, 0xFEF3, 0xFEF4)),
    // Persian and Urdu additions
    (0x0671, Forms::right(0xFB50, 0xFB51)),
    (0x0679, Forms::dual(0xFB66, 0xFB67, 0xFB68, 0xFB69)),
    (0x067E, Forms::dual(0xFB56, 0xFB57, 0xFB58, 0xFB59)),
    (0x0686, Forms::dual(0xFB7A, 0xFB7B, 0xFB7C, 0xFB7D)),
    (0x0688, Forms::right(0xFB88, 0xFB89)),
    (0x0691, Forms::right(0xFB8C, 0xFB8D)),
    (0x0698, Forms::right(0xFB8A, 0xFB8B)),
    (0x06A9, Forms::dual(0xFB8E, 0xFB8F, 0xFB90, 0xFB91)),
    (0x06AF, Forms::dual(0xFB92, 0xFB93, 0xFB94, 0xFB95)),
    (0x06BA, Forms::right(0xFB9E, 0xFB9F)),
    (0x06BE, Forms::dual(0xFBAA, 0xFBAB, 0xFBAC, 0xFBAD)),
    (0x06C1, Forms::dual(0xFBA6, 0xFBA7, 0xFBA8, 0xFBA9)),
    (0x06CC, Forms::dual(0xFBFC, 0xFBFD, 0xFBFE, 0xFBFF)),
    (0x06D2, Forms::right(0xFBAE, 0xFBAF)),
];

/// Lam followed by one of these alefs becomes a single ligature:
/// (alef, isolated ligature, final ligature).
const LAM_ALEF: &[(char, char, char)] = &[
    ('\u{0622}', '\u{FEF5}', '\u{FEF6}'),
    ('\u{0623}', '\u{FEF7}', '\u{FEF8}'),
    ('\u{0625}', '\u{FEF9}', '\u{FEFA}'),
    ('\u{0627}', '\u{FEFB}', '\u{FEFC}'),
];

static FORMS: Lazy<AHashMap<char, Forms>> = Lazy::new(|| {
    LETTERS
        .iter()
        .filter_map(|&(letter, (isolated, final_, initial, medial))| {
            Some((
                char::from_u32(letter)?,
                Forms {
                    isolated: char::from_u32(isolated)?,
                    final_: char::from_u32(final_)?,
                    initial: initial.and_then(char::from_u32),
                    medial: medial.and_then(char::from_u32),
                },
            ))
        })
        .collect()
});

/// Harakat, superscript alef and other marks that sit on a letter.
fn is_transparent(c: char) -> bool {
    matches!(c, '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}')
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Letter(char, Forms),
    LamAlef { isolated: char, final_: char },
    /// Tatweel or ZWJ: joins on both sides, has no forms of its own.
    JoinCausing(char),
    Transparent(char),
    Other(char),
}

impl Unit {
    fn joins_prev(&self) -> bool {
        matches!(self, Unit::Letter(..) | Unit::LamAlef { .. } | Unit::JoinCausing(_))
    }

    fn joins_next(&self) -> bool {
        match self {
            Unit::Letter(_, forms) => forms.joins_next(),
            Unit::JoinCausing(_) => true,
            _ => false,
        }
    }
}

fn classify(text: &str) -> Vec<Unit> {
    let mut units = Vec::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == LAM
            && let Some(&next) = chars.peek()
            && let Some(&(_, isolated, final_)) = LAM_ALEF.iter().find(|(alef, _, _)| *alef == next)
        {
            chars.next();
            units.push(Unit::LamAlef { isolated, final_ });
            continue;
        }

        let unit = if let Some(forms) = FORMS.get(&c) {
            Unit::Letter(c, *forms)
        } else if c == TATWEEL || c == ZWJ {
            Unit::JoinCausing(c)
        } else if is_transparent(c) {
            Unit::Transparent(c)
        } else {
            Unit::Other(c)
        };
        units.push(unit);
    }

    units
}

fn previous(units: &[Unit], index: usize) -> Option<&Unit> {
    units[..index].iter().rev().find(|u| !matches!(u, Unit::Transparent(_)))
}

fn next(units: &[Unit], index: usize) -> Option<&Unit> {
    units[index + 1..].iter().find(|u| !matches!(u, Unit::Transparent(_)))
}

/// Replace Arabic-script letters with their contextual presentation forms.
///
/// Text in logical order goes in, logical order comes out; reordering for
/// display is a separate step. Characters outside the Arabic letter table pass
/// through unchanged.
pub fn reshape(text: &str) -> String {
    let units = classify(text);
    let mut out = String::with_capacity(text.len());

    for (i, unit) in units.iter().enumerate() {
        let joined_prev = unit.joins_prev() && previous(&units, i).is_some_and(Unit::joins_next);
        let joined_next = unit.joins_next() && next(&units, i).is_some_and(Unit::joins_prev);

        let shaped = match *unit {
            Unit::Letter(c, forms) => match (joined_prev, joined_next) {
                (false, false) => forms.isolated,
                (true, false) => forms.final_,
                (false, true) => forms.initial.unwrap_or(c),
                (true, true) => forms.medial.unwrap_or(c),
            },
            Unit::LamAlef { isolated, final_ } => {
                if joined_prev {
                    final_
                } else {
                    isolated
                }
            }
            Unit::JoinCausing(c) | Unit::Transparent(c) | Unit::Other(c) => c,
        };
        out.push(shaped);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_complete() {
        assert_eq!(FORMS.len(), LETTERS.len());
    }

    #[test]
    fn test_dual_and_right_joining() {
        // beh alef beh
        assert_eq!(reshape("باب"), "\u{FE91}\u{FE8E}\u{FE8F}");
    }

    #[test]
    fn test_zero_width_joiner_causes_joining() {
        // beh ZWJ: initial beh, joiner kept
        assert_eq!(reshape("ب\u{200D}"), "\u{FE91}\u{200D}");
        // ZWJ beh: final beh
        assert_eq!(reshape("\u{200D}ب"), "\u{200D}\u{FE90}");
    }

    #[test]
    fn test_medial_form() {
        // beh teh beh: initial, medial, final
        assert_eq!(reshape("بتب"), "\u{FE91}\u{FE98}\u{FE90}");
    }

    #[test]
    fn test_isolated_letter() {
        assert_eq!(reshape("ب"), "\u{FE8F}");
        assert_eq!(reshape("ب ب"), "\u{FE8F} \u{FE8F}");
    }

    #[test]
    fn test_lam_alef_ligature() {
        assert_eq!(reshape("لا"), "\u{FEFB}");
        // beh + lam-alef: the ligature takes its final form
        assert_eq!(reshape("بلا"), "\u{FE91}\u{FEFC}");
    }

    #[test]
    fn test_marks_are_transparent() {
        // beh + fatha + alef still joins
        assert_eq!(reshape("بَا"), "\u{FE91}\u{064E}\u{FE8E}");
    }

    #[test]
    fn test_persian_letters() {
        // peh alef
        assert_eq!(reshape("پا"), "\u{FB58}\u{FE8E}");
        // farsi yeh alone
        assert_eq!(reshape("ی"), "\u{FBFC}");
    }

    #[test]
    fn test_tatweel_joins() {
        assert_eq!(reshape("بـ"), "\u{FE91}\u{0640}");
    }

    #[test]
    fn test_non_arabic_passes_through() {
        assert_eq!(reshape("hello שלום 123"), "hello שלום 123");
    }
}
