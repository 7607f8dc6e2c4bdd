//! Numeric keypad input
//!
//! The measurements step edits sample values through an on-screen keypad.
//! Input state is an explicit machine over integer part, fraction part and
//! decimal flag, so invalid presses are rejected rather than silently
//! dropped: a second decimal point and an over-long value both return an
//! error and leave the display unchanged.

/// Longest display the keypad will build, decimal point included
const MAX_DISPLAY_LEN: usize = 10;

/// A keypad press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Dot,
    Del,
}

/// Rejected presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadError {
    /// Digit outside 0-9
    InvalidDigit,
    /// The value already contains a decimal point
    DuplicateDecimal,
    /// The display is at its maximum length
    TooLong,
}

impl std::fmt::Display for KeypadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeypadError::InvalidDigit => write!(f, "digit must be 0-9"),
            KeypadError::DuplicateDecimal => write!(f, "value already has a decimal point"),
            KeypadError::TooLong => write!(f, "value is too long"),
        }
    }
}

/// Keypad input state. Starts at `"0"` and can never display an empty
/// string: deleting the last character restores `"0"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadInput {
    int_part: String,
    frac_part: String,
    has_decimal: bool,
}

impl Default for KeypadInput {
    fn default() -> Self {
        Self::new()
    }
}

impl KeypadInput {
    pub fn new() -> Self {
        Self {
            int_part: "0".to_string(),
            frac_part: String::new(),
            has_decimal: false,
        }
    }

    /// Start editing from an existing value, trimming trailing zeros
    pub fn from_value(value: f64) -> Self {
        if !value.is_finite() || value < 0.0 {
            return Self::new();
        }
        let text = format!("{}", value);
        let mut input = Self::new();
        for ch in text.chars().take(MAX_DISPLAY_LEN) {
            let key = match ch {
                '.' => Key::Dot,
                d => match d.to_digit(10) {
                    Some(d) => Key::Digit(d as u8),
                    None => continue,
                },
            };
            // Presses replay the original text, so rejections cannot occur
            let _ = input.press(key);
        }
        input
    }

    /// Apply a key press. On `Err` the display is unchanged.
    pub fn press(&mut self, key: Key) -> Result<(), KeypadError> {
        match key {
            Key::Digit(d) if d > 9 => Err(KeypadError::InvalidDigit),
            Key::Digit(d) => {
                if self.display_len() >= MAX_DISPLAY_LEN {
                    return Err(KeypadError::TooLong);
                }
                let digit = char::from(b'0' + d);
                if self.has_decimal {
                    self.frac_part.push(digit);
                } else if self.int_part == "0" {
                    // Replace the leading zero rather than building "05"
                    self.int_part = digit.to_string();
                } else {
                    self.int_part.push(digit);
                }
                Ok(())
            }
            Key::Dot => {
                if self.has_decimal {
                    return Err(KeypadError::DuplicateDecimal);
                }
                if self.display_len() >= MAX_DISPLAY_LEN {
                    return Err(KeypadError::TooLong);
                }
                self.has_decimal = true;
                Ok(())
            }
            Key::Del => {
                if self.has_decimal {
                    if self.frac_part.pop().is_none() {
                        self.has_decimal = false;
                    }
                } else {
                    self.int_part.pop();
                    if self.int_part.is_empty() {
                        self.int_part = "0".to_string();
                    }
                }
                Ok(())
            }
        }
    }

    /// The string shown on screen, e.g. `"12.5"`
    pub fn display(&self) -> String {
        if self.has_decimal {
            format!("{}.{}", self.int_part, self.frac_part)
        } else {
            self.int_part.clone()
        }
    }

    /// Numeric value of the current display
    pub fn value(&self) -> f64 {
        self.display().parse().unwrap_or(0.0)
    }

    fn display_len(&self) -> usize {
        self.int_part.len() + self.frac_part.len() + usize::from(self.has_decimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(input: &mut KeypadInput, keys: &[Key]) {
        for &key in keys {
            let _ = input.press(key);
        }
    }

    #[test]
    fn test_leading_zero_is_replaced() {
        let mut input = KeypadInput::new();
        input.press(Key::Digit(5)).unwrap();
        assert_eq!(input.display(), "5");
    }

    #[test]
    fn test_second_decimal_point_rejected() {
        let mut input = KeypadInput::new();
        press_all(&mut input, &[Key::Digit(5), Key::Dot]);
        assert_eq!(input.display(), "5.");

        assert_eq!(input.press(Key::Dot), Err(KeypadError::DuplicateDecimal));
        assert_eq!(input.display(), "5.");
    }

    #[test]
    fn test_delete_never_empties_the_display() {
        let mut input = KeypadInput::new();
        press_all(&mut input, &[Key::Digit(1), Key::Dot, Key::Digit(5)]);
        assert_eq!(input.display(), "1.5");

        for _ in 0..10 {
            input.press(Key::Del).unwrap();
            assert!(!input.display().is_empty());
        }
        assert_eq!(input.display(), "0");
    }

    #[test]
    fn test_delete_steps_back_through_decimal() {
        let mut input = KeypadInput::new();
        press_all(&mut input, &[Key::Digit(5), Key::Dot, Key::Digit(2)]);

        input.press(Key::Del).unwrap();
        assert_eq!(input.display(), "5.");
        input.press(Key::Del).unwrap();
        assert_eq!(input.display(), "5");
        input.press(Key::Del).unwrap();
        assert_eq!(input.display(), "0");
    }

    #[test]
    fn test_zero_point_entry() {
        let mut input = KeypadInput::new();
        press_all(&mut input, &[Key::Dot, Key::Digit(5)]);
        assert_eq!(input.display(), "0.5");
        assert!((input.value() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_length_guard() {
        let mut input = KeypadInput::new();
        for _ in 0..MAX_DISPLAY_LEN {
            let _ = input.press(Key::Digit(9));
        }
        assert_eq!(input.press(Key::Digit(9)), Err(KeypadError::TooLong));
        assert_eq!(input.display().len(), MAX_DISPLAY_LEN);
    }

    #[test]
    fn test_invalid_digit_rejected() {
        let mut input = KeypadInput::new();
        assert_eq!(input.press(Key::Digit(10)), Err(KeypadError::InvalidDigit));
        assert_eq!(input.display(), "0");
    }

    #[test]
    fn test_from_value_round_trip() {
        let input = KeypadInput::from_value(12.5);
        assert_eq!(input.display(), "12.5");
        assert!((input.value() - 12.5).abs() < f64::EPSILON);

        assert_eq!(KeypadInput::from_value(-3.0).display(), "0");
        assert_eq!(KeypadInput::from_value(f64::NAN).display(), "0");
    }
}
