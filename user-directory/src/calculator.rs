use core::fmt;

use thiserror::Error;
use tracing::debug;

/// A key on the calculator's keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// `0` to `9`, construct with [`Key::digit`]. Anything above 9 is ignored by [`Calculator::press`].
    Digit(u8),
    /// `.`
    Point,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `=`, evaluates the input.
    Equals,
    /// `C`, clears the input and result.
    Clear,
}

/// The keypad, row by row.
pub const KEYPAD: [&[Key]; 5] = [
    &[Key::Digit(7), Key::Digit(8), Key::Digit(9), Key::Add],
    &[Key::Digit(4), Key::Digit(5), Key::Digit(6), Key::Subtract],
    &[Key::Digit(1), Key::Digit(2), Key::Digit(3), Key::Multiply],
    &[Key::Digit(0), Key::Point, Key::Equals, Key::Divide],
    &[Key::Clear],
];

impl Key {
    /// The digit key for `digit`, `None` if it isn't a single decimal digit.
    pub fn digit(digit: u8) -> Option<Self> {
        (digit <= 9).then_some(Key::Digit(digit))
    }

    /// The character printed on the key.
    pub fn symbol(&self) -> char {
        match self {
            Key::Digit(digit) => char::from_digit(u32::from(*digit), 10).unwrap_or('?'),
            Key::Point => '.',
            Key::Add => '+',
            Key::Subtract => '-',
            Key::Multiply => '*',
            Key::Divide => '/',
            Key::Equals => '=',
            Key::Clear => 'C',
        }
    }
}

impl TryFrom<char> for Key {
    type Error = char;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            '0'..='9' => Ok(Key::Digit(symbol as u8 - b'0')),
            '.' => Ok(Key::Point),
            '+' => Ok(Key::Add),
            '-' => Ok(Key::Subtract),
            '*' => Ok(Key::Multiply),
            '/' => Ok(Key::Divide),
            '=' => Ok(Key::Equals),
            'C' | 'c' => Ok(Key::Clear),
            other => Err(other),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The expression couldn't be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot evaluate expression: {0}")]
pub struct EvalError(
    /// Why evaluation failed.
    pub String,
);

/// Evaluates an arithmetic expression such as `"12+3*4"`.
///
/// Implemented for any `Fn(&str) -> Result<f64, EvalError>`.
pub trait Evaluate {
    /// Evaluate `expression`.
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError>;
}

impl<F> Evaluate for F
where
    F: Fn(&str) -> Result<f64, EvalError>,
{
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        self(expression)
    }
}

/// Calculator keypad state: the keys typed so far, the last result, and every successful evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calculator {
    input: Vec<Key>,
    result: Option<String>,
    history: Vec<String>,
}

impl Calculator {
    /// Empty input, no result, no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key press.
    ///
    /// `=` evaluates the input with `evaluator` and clears it: on success the result is shown and
    /// recorded in the history, on failure the result reads `Error`. `=` with nothing typed does nothing.
    /// `C` clears the input and result but keeps the history.
    pub fn press(mut self, key: Key, evaluator: &(impl Evaluate + ?Sized)) -> Self {
        match key {
            Key::Digit(digit) if digit > 9 => {
                debug!(digit, "ignoring invalid digit key");
            }
            Key::Equals => {
                if self.input.is_empty() {
                    return self;
                }
                let expression = self.display();
                self.input.clear();
                match evaluator.evaluate(&expression) {
                    Ok(value) => {
                        let value = format_value(value);
                        self.history.push(format!("{expression} = {value}"));
                        self.result = Some(value);
                    }
                    Err(err) => {
                        debug!(%expression, error = %err, "evaluation failed");
                        self.result = Some("Error".to_string());
                    }
                }
            }
            Key::Clear => {
                self.input.clear();
                self.result = None;
            }
            key => self.input.push(key),
        }
        self
    }

    /// The input typed so far.
    pub fn display(&self) -> String {
        self.input.iter().map(Key::symbol).collect()
    }

    /// The last result, `Error` if the last evaluation failed.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// `"{expression} = {value}"` for every successful evaluation, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}
