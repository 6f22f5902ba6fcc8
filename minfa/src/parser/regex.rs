use crate::regex::Regex;
use nom::branch::alt;
use nom::character::complete;
use nom::character::complete::{none_of, one_of};
use nom::combinator::{map, verify};
use nom::multi::{many0, many1, separated_list1};
use nom::sequence::{delimited, pair};
use nom::IResult;

pub(crate) fn full_regex(input: &str) -> IResult<&str, Regex> {
    expression(input)
}

fn expression(input: &str) -> IResult<&str, Regex> {
    alternation(input)
}

// `|` binds loosest; folding left gives `a|b|c` == `(a|b)|c`.
fn alternation(input: &str) -> IResult<&str, Regex> {
    map(
        separated_list1(complete::char('|'), sequence),
        fold_left(|l, r| Regex::Alt(Box::new(l), Box::new(r))),
    )(input)
}

// Implicit concatenation; folding left gives `abc` == `(ab)c`.
fn sequence(input: &str) -> IResult<&str, Regex> {
    map(
        many1(postfix),
        fold_left(|l, r| Regex::Concat(Box::new(l), Box::new(r))),
    )(input)
}

fn fold_left(f: impl Fn(Regex, Regex) -> Regex) -> impl Fn(Vec<Regex>) -> Regex {
    move |items| {
        let mut iter = items.into_iter();
        let first = iter
            .next()
            .expect("many1/separated_list1 yield at least one item");
        iter.fold(first, &f)
    }
}

// Postfix repetition binds strongest and may be stacked (`a**`).
fn postfix(input: &str) -> IResult<&str, Regex> {
    map(pair(atom, many0(one_of("*+"))), |(expr, ops)| {
        ops.into_iter().fold(expr, |expr, op| match op {
            '*' => Regex::Star(Box::new(expr)),
            '+' => Regex::Plus(Box::new(expr)),
            _ => unreachable!("one_of only yields '*' or '+'"),
        })
    })(input)
}

fn atom(input: &str) -> IResult<&str, Regex> {
    alt((
        delimited(complete::char('('), expression, complete::char(')')),
        literal,
    ))(input)
}

// Any single ASCII byte that is not an operator is an operand, `#` (ε)
// included.
fn literal(input: &str) -> IResult<&str, Regex> {
    map(verify(none_of("()|*+"), char::is_ascii), |c| {
        Regex::Char(c as u8)
    })(input)
}
