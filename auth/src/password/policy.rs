use super::errors::PolicyViolation;

/// Symbols accepted as the "special character" of a password.
pub const ALLOWED_SYMBOLS: &str = "@$!%*?&";

/// Password strength policy.
///
/// Rules are evaluated in a fixed order and the first failing rule is reported:
/// 1. at least `min_length` characters
/// 2. an uppercase ASCII letter
/// 3. a lowercase ASCII letter
/// 4. an ASCII digit
/// 5. one of [`ALLOWED_SYMBOLS`]
/// 6. nothing outside ASCII letters, digits and [`ALLOWED_SYMBOLS`]
///
/// There is no maximum length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    pub const MIN_LENGTH: usize = 8;

    /// Create the policy with the canonical minimum length.
    pub fn new() -> Self {
        Self {
            min_length: Self::MIN_LENGTH,
        }
    }

    /// Validate a plaintext password.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than the minimum number of characters
    /// * `MissingUppercase` / `MissingLowercase` / `MissingDigit` / `MissingSymbol` -
    ///   A required character class is absent
    /// * `DisallowedCharacter` - Whitespace, non-ASCII or an unlisted symbol
    pub fn validate(&self, password: &str) -> Result<(), PolicyViolation> {
        self.with_valid_length(password)?;
        self.with_allowed_characters(password)
    }

    fn with_valid_length(&self, password: &str) -> Result<(), PolicyViolation> {
        // Count no further than the minimum; long inputs stay cheap.
        let counted = password.chars().take(self.min_length).count();
        if counted < self.min_length {
            return Err(PolicyViolation::TooShort {
                min: self.min_length,
                actual: counted,
            });
        }
        Ok(())
    }

    fn with_allowed_characters(&self, password: &str) -> Result<(), PolicyViolation> {
        let mut upper = false;
        let mut lower = false;
        let mut digit = false;
        let mut symbol = false;
        let mut disallowed = None;

        for c in password.chars() {
            if c.is_ascii_uppercase() {
                upper = true;
            } else if c.is_ascii_lowercase() {
                lower = true;
            } else if c.is_ascii_digit() {
                digit = true;
            } else if ALLOWED_SYMBOLS.contains(c) {
                symbol = true;
            } else if disallowed.is_none() {
                disallowed = Some(c);
            }
        }

        if !upper {
            Err(PolicyViolation::MissingUppercase)
        } else if !lower {
            Err(PolicyViolation::MissingLowercase)
        } else if !digit {
            Err(PolicyViolation::MissingDigit)
        } else if !symbol {
            Err(PolicyViolation::MissingSymbol)
        } else if let Some(found) = disallowed {
            Err(PolicyViolation::DisallowedCharacter(found))
        } else {
            Ok(())
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new()
    }
}
