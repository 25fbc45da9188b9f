//! The sample record and how it is rendered on standard output.

use std::fmt::{self, Write as _};

use crate::random::{RandomSource, choose};

/// Labels printed ahead of every record, one per field.
pub const HEADER: [&str; 3] = ["h1", "h2", "h3"];

/// Closed range of `field1`.
pub const FIELD1_MIN: u32 = 1;
pub const FIELD1_MAX: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    A,
    B,
    C,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::A, Category::B, Category::C];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::A => "A",
            Category::B => "B",
            Category::C => "C",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One randomized row. Drawn once, printed once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRecord {
    pub field1: u32,
    pub field2: f64,
    pub field3: Category,
}

impl SampleRecord {
    pub fn generate(source: &mut dyn RandomSource) -> Self {
        let field1 = source.integer(FIELD1_MIN..=FIELD1_MAX);
        let field2 = source.float(0.0..1.0);
        // `Category::ALL` is never empty.
        let field3 = choose(source, &Category::ALL)
            .copied()
            .unwrap_or(Category::A);
        Self {
            field1,
            field2,
            field3,
        }
    }
}

impl fmt::Display for SampleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            self.field1,
            float(self.field2),
            quote(self.field3.as_str())
        )
    }
}

/// Render strings as a bracketed, comma separated list of quoted items.
pub fn list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<String> = items.into_iter().map(|item| quote(item.as_ref())).collect();
    format!("[{}]", items.join(", "))
}

/// Shortest round-trip rendering of a float. Whole values keep a `.0`, and
/// exponents carry a sign and at least two digits (`1e-05`, `1e+16`).
pub fn float(value: f64) -> String {
    let rendered = format!("{value:?}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => rendered,
    }
}

/// Quote a string for display inside a list.
///
/// Single quotes are used unless the string contains a single quote and no
/// double quote.
pub fn quote(value: &str) -> String {
    let delimiter = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push(delimiter);
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            }
            c if c.is_control() => {
                let _ = write!(quoted, "\\x{:02x}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}
