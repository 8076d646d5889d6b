//! `strftime`-style format templates that work in every calendar.
//!
//! Only the numeric directives needed for CF time stamps are supported:
//! `%Y`, `%m`, `%d`, `%H`, `%M`, `%S`, `%f` (microseconds) and `%%`.

use std::fmt::Write as _;

use crate::attribute::AttributeName;
use crate::date::CalendarTimestamp;
use crate::error::CalendarError;

/// Template used when none is configured.
pub const DEFAULT_TEMPLATE: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Fraction,
}

impl Field {
    fn attribute(self) -> AttributeName {
        match self {
            Field::Year => AttributeName::Year,
            Field::Month => AttributeName::Month,
            Field::Day => AttributeName::Day,
            Field::Hour => AttributeName::Hour,
            Field::Minute => AttributeName::Minute,
            Field::Second => AttributeName::Second,
            Field::Fraction => AttributeName::Microsecond,
        }
    }

    /// Widest digit run the field accepts when a literal or the end of text
    /// delimits it. A year directly followed by another field takes four.
    fn max_digits(self) -> usize {
        match self {
            Field::Year => 5,
            Field::Fraction => 6,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field(Field),
}

/// A parsed format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTemplate {
    source: String,
    tokens: Vec<Token>,
}

/// Field values captured by [`FormatTemplate::parse_fields`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedFields {
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub second: Option<u8>,
    pub microsecond: Option<u32>,
}

impl ParsedFields {
    /// Finest attribute that was captured, if any.
    pub fn finest(&self) -> Option<AttributeName> {
        [
            (self.microsecond.is_some(), AttributeName::Microsecond),
            (self.second.is_some(), AttributeName::Second),
            (self.minute.is_some(), AttributeName::Minute),
            (self.hour.is_some(), AttributeName::Hour),
            (self.day.is_some(), AttributeName::Day),
            (self.month.is_some(), AttributeName::Month),
            (self.year.is_some(), AttributeName::Year),
        ]
        .into_iter()
        .find_map(|(present, attribute)| present.then_some(attribute))
    }
}

impl FormatTemplate {
    /// Parses a template string.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTemplate`] for an unknown or dangling
    /// `%` directive.
    pub fn parse(template: &str) -> Result<Self, CalendarError> {
        let invalid = || CalendarError::InvalidTemplate {
            template: template.to_string(),
        };
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            let field = match chars.next().ok_or_else(invalid)? {
                '%' => {
                    literal.push('%');
                    continue;
                }
                'Y' => Field::Year,
                'm' => Field::Month,
                'd' => Field::Day,
                'H' => Field::Hour,
                'M' => Field::Minute,
                'S' => Field::Second,
                'f' => Field::Fraction,
                _ => return Err(invalid()),
            };
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Field(field));
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }
        Ok(Self {
            source: template.to_string(),
            tokens,
        })
    }

    /// Returns the template text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Attributes referenced by the template, in template order.
    pub fn attributes(&self) -> Vec<AttributeName> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Field(f) => Some(f.attribute()),
                Token::Literal(_) => None,
            })
            .collect()
    }

    /// Renders `timestamp`.
    pub fn format(&self, timestamp: &CalendarTimestamp) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            // Writing into a String cannot fail.
            let _ = match token {
                Token::Literal(s) => out.write_str(s),
                Token::Field(Field::Year) if timestamp.year() < 0 => {
                    write!(out, "-{:04}", -i64::from(timestamp.year()))
                }
                Token::Field(Field::Year) => write!(out, "{:04}", timestamp.year()),
                Token::Field(Field::Month) => write!(out, "{:02}", timestamp.month()),
                Token::Field(Field::Day) => write!(out, "{:02}", timestamp.day()),
                Token::Field(Field::Hour) => write!(out, "{:02}", timestamp.hour()),
                Token::Field(Field::Minute) => write!(out, "{:02}", timestamp.minute()),
                Token::Field(Field::Second) => write!(out, "{:02}", timestamp.second()),
                Token::Field(Field::Fraction) => write!(out, "{:06}", timestamp.microsecond()),
            };
        }
        out
    }

    /// Matches `text` against the template.
    ///
    /// Returns `None` unless the whole text is consumed. Numeric fields take
    /// one digit up to their natural width (`%Y` accepts a leading `-` and up
    /// to five digits, `%f` is right-padded to microseconds).
    pub fn parse_fields(&self, text: &str) -> Option<ParsedFields> {
        let mut rest = text;
        let mut fields = ParsedFields::default();
        for (i, token) in self.tokens.iter().enumerate() {
            match token {
                Token::Literal(s) => rest = rest.strip_prefix(s.as_str())?,
                Token::Field(field) => {
                    let negative = *field == Field::Year && rest.starts_with('-');
                    if negative {
                        rest = &rest[1..];
                    }
                    let width = match self.tokens.get(i + 1) {
                        Some(Token::Field(_)) if *field == Field::Year => 4,
                        _ => field.max_digits(),
                    };
                    let len = rest
                        .bytes()
                        .take(width)
                        .take_while(u8::is_ascii_digit)
                        .count();
                    if len == 0 {
                        return None;
                    }
                    let digits = &rest[..len];
                    rest = &rest[len..];
                    let value: u32 = digits.parse().ok()?;
                    match field {
                        Field::Year => {
                            let year = i32::try_from(value).ok()?;
                            fields.year = Some(if negative { -year } else { year });
                        }
                        Field::Month => fields.month = Some(u8::try_from(value).ok()?),
                        Field::Day => fields.day = Some(u8::try_from(value).ok()?),
                        Field::Hour => fields.hour = Some(u8::try_from(value).ok()?),
                        Field::Minute => fields.minute = Some(u8::try_from(value).ok()?),
                        Field::Second => fields.second = Some(u8::try_from(value).ok()?),
                        Field::Fraction => {
                            fields.microsecond = Some(value * 10_u32.pow((6 - len) as u32));
                        }
                    }
                }
            }
        }
        rest.is_empty().then_some(fields)
    }

    /// Returns the template followed by progressively shorter prefixes,
    /// each dropping the last field together with the literal before it.
    pub fn truncations(&self) -> Vec<FormatTemplate> {
        let mut out = vec![self.clone()];
        let mut tokens = self.tokens.clone();
        loop {
            // Drop trailing literals, then the last field and its separator.
            while matches!(tokens.last(), Some(Token::Literal(_))) {
                tokens.pop();
            }
            if tokens.pop().is_none() {
                break;
            }
            while matches!(tokens.last(), Some(Token::Literal(_))) {
                tokens.pop();
            }
            if tokens.is_empty() {
                break;
            }
            out.push(Self::from_tokens(tokens.clone()));
        }
        out
    }

    fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut source = String::new();
        for token in &tokens {
            match token {
                Token::Literal(s) => source.push_str(&s.replace('%', "%%")),
                Token::Field(f) => source.push_str(match f {
                    Field::Year => "%Y",
                    Field::Month => "%m",
                    Field::Day => "%d",
                    Field::Hour => "%H",
                    Field::Minute => "%M",
                    Field::Second => "%S",
                    Field::Fraction => "%f",
                }),
            }
        }
        Self { source, tokens }
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        let tokens = vec![
            Token::Field(Field::Year),
            Token::Literal("-".into()),
            Token::Field(Field::Month),
            Token::Literal("-".into()),
            Token::Field(Field::Day),
            Token::Literal("T".into()),
            Token::Field(Field::Hour),
            Token::Literal(":".into()),
            Token::Field(Field::Minute),
            Token::Literal(":".into()),
            Token::Field(Field::Second),
        ];
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            tokens,
        }
    }
}

impl std::str::FromStr for FormatTemplate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
