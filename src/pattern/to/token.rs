use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;

use crate::pattern::PatternError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Identifier<'t> {
    Index(usize),
    Name(Cow<'t, str>),
}

impl<'t> Display for Identifier<'t> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Identifier::Index(index) => write!(formatter, "{}", index),
            Identifier::Name(ref name) => write!(formatter, "{}", name),
        }
    }
}

impl From<usize> for Identifier<'static> {
    fn from(index: usize) -> Self {
        Identifier::Index(index)
    }
}

impl<'t> From<&'t str> for Identifier<'t> {
    fn from(name: &'t str) -> Self {
        Identifier::Name(name.into())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token<'t> {
    Literal(Cow<'t, str>),
    Capture(Identifier<'t>),
}

impl<'t> From<Identifier<'t>> for Token<'t> {
    fn from(identifier: Identifier<'t>) -> Self {
        Token::Capture(identifier)
    }
}

impl<'t> From<&'t str> for Token<'t> {
    fn from(literal: &'t str) -> Self {
        Token::Literal(literal.into())
    }
}

impl From<String> for Token<'static> {
    fn from(literal: String) -> Self {
        Token::Literal(literal.into())
    }
}

pub fn parse(text: &str) -> Result<Vec<Token<'_>>, PatternError> {
    use nom::bytes::complete as bytes;
    use nom::character::complete as character;
    use nom::error::{ErrorKind, FromExternalError, ParseError};
    use nom::{branch, combinator, multi, sequence, IResult};

    fn literal<'i, E>(input: &'i str) -> IResult<&'i str, Token<'i>, E>
    where
        E: ParseError<&'i str>,
    {
        combinator::map(bytes::is_not("\\"), Token::from)(input)
    }

    fn index<'i, E>(input: &'i str) -> IResult<&'i str, Identifier<'i>, E>
    where
        E: FromExternalError<&'i str, ParseIntError> + ParseError<&'i str>,
    {
        combinator::map_res(character::digit1, |text: &'i str| {
            usize::from_str_radix(text, 10).map(Identifier::from)
        })(input)
    }

    fn name<'i, E>(input: &'i str) -> IResult<&'i str, Identifier<'i>, E>
    where
        E: ParseError<&'i str>,
    {
        combinator::map(
            combinator::recognize(sequence::pair(
                character::satisfy(|x| x == '_' || x.is_alphabetic()),
                bytes::take_while(|x: char| x == '_' || x.is_alphanumeric()),
            )),
            Identifier::from,
        )(input)
    }

    /// Parses a back-reference.
    ///
    /// A back-reference is either one or two decimal digits with no leading
    /// zero (`\1` through `\99`) or an index or name delimited by angle brackets
    /// (`\g<0>`, `\g<name>`).
    fn capture<'i, E>(input: &'i str) -> IResult<&'i str, Token<'i>, E>
    where
        E: FromExternalError<&'i str, ParseIntError> + ParseError<&'i str>,
    {
        sequence::preceded(
            character::char('\\'),
            branch::alt((
                combinator::map(
                    sequence::preceded(
                        character::char('g'),
                        sequence::delimited(
                            character::char('<'),
                            branch::alt((index, name)),
                            character::char('>'),
                        ),
                    ),
                    Token::from,
                ),
                combinator::map(
                    combinator::map_res(
                        combinator::recognize(sequence::pair(
                            character::satisfy(|x| matches!(x, '1'..='9')),
                            combinator::opt(character::satisfy(|x| x.is_ascii_digit())),
                        )),
                        |text: &'i str| usize::from_str_radix(text, 10),
                    ),
                    |index| Token::from(Identifier::from(index)),
                ),
            )),
        )(input)
    }

    /// Parses an escape that is not a back-reference.
    ///
    /// Escapes of ASCII letters and digits that are not recognized are
    /// rejected. Escapes of any other character are kept verbatim, including
    /// the back slash.
    fn escape<'i, E>(input: &'i str) -> IResult<&'i str, Token<'i>, E>
    where
        E: ParseError<&'i str>,
    {
        sequence::preceded(
            character::char('\\'),
            branch::alt((
                combinator::map_opt(character::anychar, |x| {
                    let x = match x {
                        '\\' => '\\',
                        'a' => '\x07',
                        'b' => '\x08',
                        'f' => '\x0c',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        'v' => '\x0b',
                        _ => return None,
                    };
                    Some(Token::from(x.to_string()))
                }),
                combinator::map(
                    character::satisfy(|x| !x.is_ascii_alphanumeric()),
                    |x| Token::from(format!("\\{}", x)),
                ),
            )),
        )(input)
    }

    fn pattern<'i, E>(input: &'i str) -> IResult<&'i str, Vec<Token<'i>>, E>
    where
        E: FromExternalError<&'i str, ParseIntError> + ParseError<&'i str>,
    {
        combinator::all_consuming(multi::many0(branch::alt((literal, capture, escape))))(input)
    }

    pattern::<(_, ErrorKind)>(text)
        .map(|(_, tokens)| tokens)
        .map_err(Into::into)
}
