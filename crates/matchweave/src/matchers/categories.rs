//! # Unicode General Category Matchers
//!
//! Category classification comes from the `unicode-general-category`
//! crate; this module adds the fixed 30-name catalogue (the two-letter
//! aliases, `Lu` through `Cn`) and a leaf matcher over it.

use crate::errors::{MWResult, MatchweaveError};
use crate::matchers::{CodePointTest, Matcher, apply_code_point_test};
use crate::navigator::Navigator;
use crate::types::CodePoint;
use unicode_general_category::{GeneralCategory, get_general_category};

/// The 30 two-letter general category names, sorted.
pub const CATEGORY_NAMES: [&str; 30] = [
    "Cc", "Cf", "Cn", "Co", "Cs", "Ll", "Lm", "Lo", "Lt", "Lu", "Mc", "Me", "Mn", "Nd", "Nl",
    "No", "Pc", "Pd", "Pe", "Pf", "Pi", "Po", "Ps", "Sc", "Sk", "Sm", "So", "Zl", "Zp", "Zs",
];

/// Parse a two-letter category name.
///
/// ## Returns
/// An error for any name outside [`CATEGORY_NAMES`].
pub fn parse_category(name: &str) -> MWResult<GeneralCategory> {
    use GeneralCategory::*;
    Ok(match name {
        "Cc" => Control,
        "Cf" => Format,
        "Cn" => Unassigned,
        "Co" => PrivateUse,
        "Cs" => Surrogate,
        "Ll" => LowercaseLetter,
        "Lm" => ModifierLetter,
        "Lo" => OtherLetter,
        "Lt" => TitlecaseLetter,
        "Lu" => UppercaseLetter,
        "Mc" => SpacingMark,
        "Me" => EnclosingMark,
        "Mn" => NonspacingMark,
        "Nd" => DecimalNumber,
        "Nl" => LetterNumber,
        "No" => OtherNumber,
        "Pc" => ConnectorPunctuation,
        "Pd" => DashPunctuation,
        "Pe" => ClosePunctuation,
        "Pf" => FinalPunctuation,
        "Pi" => InitialPunctuation,
        "Po" => OtherPunctuation,
        "Ps" => OpenPunctuation,
        "Sc" => CurrencySymbol,
        "Sk" => ModifierSymbol,
        "Sm" => MathSymbol,
        "So" => OtherSymbol,
        "Zl" => LineSeparator,
        "Zp" => ParagraphSeparator,
        "Zs" => SpaceSeparator,
        _ => return Err(MatchweaveError::UnknownCategory(name.into())),
    })
}

/// The general category of a code point value.
///
/// Values that are not Unicode scalar values (lone surrogates) classify
/// as [`GeneralCategory::Surrogate`].
pub fn category_of(cp: CodePoint) -> GeneralCategory {
    match char::from_u32(cp) {
        Some(c) => get_general_category(c),
        None => GeneralCategory::Surrogate,
    }
}

/// Matches any code point of one general category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryMatcher {
    category: GeneralCategory,
}

impl CategoryMatcher {
    /// Match the named category.
    ///
    /// ## Returns
    /// An error for a name outside the 30-name catalogue.
    pub fn new(name: &str) -> MWResult<Self> {
        Ok(Self {
            category: parse_category(name)?,
        })
    }

    /// Match the given category.
    pub fn from_category(category: GeneralCategory) -> Self {
        Self { category }
    }

    /// The matched category.
    pub fn category(&self) -> GeneralCategory {
        self.category
    }
}

impl Matcher for CategoryMatcher {
    fn apply<'t>(
        &self,
        nav: Navigator<'t>,
    ) -> Option<Navigator<'t>> {
        apply_code_point_test(self, nav)
    }

    fn is_code_point(&self) -> bool {
        true
    }
}

impl CodePointTest for CategoryMatcher {
    fn test_code_point(
        &self,
        cp: CodePoint,
    ) -> bool {
        category_of(cp) == self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Utf16Text;

    #[test]
    fn test_catalogue() {
        assert_eq!(CATEGORY_NAMES.len(), 30);
        for name in CATEGORY_NAMES {
            assert!(parse_category(name).is_ok());
        }
        for bad in ["", "L", "Lx", "Uppercase", "lu"] {
            assert!(matches!(
                parse_category(bad),
                Err(MatchweaveError::UnknownCategory(_))
            ));
        }
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of('A' as u32), GeneralCategory::UppercaseLetter);
        assert_eq!(category_of('7' as u32), GeneralCategory::DecimalNumber);
        assert_eq!(category_of('😀' as u32), GeneralCategory::OtherSymbol);
        // A lone surrogate value classifies as Cs.
        assert_eq!(category_of(0xD800), GeneralCategory::Surrogate);
    }

    #[test]
    fn test_category_matcher() {
        let m = CategoryMatcher::new("Nd").unwrap();
        assert!(m.test_code_point('5' as u32));
        assert!(!m.test_code_point('x' as u32));

        let text = Utf16Text::new("42");
        let nav = m.apply(Navigator::new(&text)).unwrap();
        assert_eq!(nav.capture_len(), 1);

        assert!(matches!(
            CategoryMatcher::new("Xx"),
            Err(MatchweaveError::UnknownCategory(_))
        ));
    }
}
